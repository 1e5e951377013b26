//! Text and JSON rendering of a [`ReplayOverview`].

use std::fmt::Write as _;

use sui_replay_types::encoding::{base64_encode, normalize_address_short};
use sui_replay_types::{
    ExecutionOutcome, InputDescriptor, ObjectArg, ObjectChangeRecord, SharedObjectKind,
};

use crate::config::InspectConfig;
use crate::effects::DecodedEffects;
use crate::error::Result;
use crate::gas::GasReport;
use crate::inputs::CommandSummary;
use crate::overview::{ReplayOverview, Section};
use crate::units::format_decimal;

const BOLD: &str = "1";
const RED: &str = "31";
const GREEN: &str = "32";
const YELLOW: &str = "33";
const CYAN: &str = "36";

#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Label printed after converted amounts
    pub unit: String,
    pub decimal_places: u32,
    /// Emit ANSI escapes
    pub color: bool,
    /// Include resolved argument values and shared-object notes
    pub verbose: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self::from_config(&InspectConfig::default())
    }
}

impl TextOptions {
    pub fn from_config(config: &InspectConfig) -> Self {
        Self {
            unit: config.unit.clone(),
            decimal_places: config.decimal_places,
            color: false,
            verbose: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        self.paint(text, BOLD)
    }
}

/// Format an overview as a human-readable report.
pub fn render_text(overview: &ReplayOverview, options: &TextOptions) -> String {
    let mut out = String::new();

    match &overview.status {
        Section::Ok(ExecutionOutcome::Success) => {
            out.push_str(&options.paint("✓ Transaction executed successfully", GREEN));
        }
        Section::Ok(ExecutionOutcome::Failure { error, command }) => {
            let mut line = format!("✗ Transaction failed: {}", error);
            if let Some(command) = command {
                let _ = write!(line, " (command {})", command);
            }
            out.push_str(&options.paint(&line, RED));
        }
        Section::Error(e) => {
            out.push_str(&options.paint(&format!("? Execution status unknown: {}", e), YELLOW));
        }
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "Digest: {}",
        overview.transaction_digest.as_deref().unwrap_or("-")
    );
    let epoch = match &overview.executed_epoch {
        Section::Ok(epoch) => optional(*epoch),
        Section::Error(e) => options.paint(&format!("could not interpret: {}", e), RED),
    };
    let _ = writeln!(out, "Executed Epoch: {}\n", epoch);

    let input_count = overview.inputs.ok().map(Vec::len);
    match &overview.gas {
        Section::Ok(gas) => render_gas(&mut out, gas, input_count, options),
        Section::Error(e) => section_error(&mut out, "Gas", e, options),
    }

    match &overview.inputs {
        Section::Ok(inputs) => render_inputs(&mut out, inputs, options),
        Section::Error(e) => section_error(&mut out, "Inputs", e, options),
    }

    match &overview.commands {
        Section::Ok(commands) => render_commands(&mut out, commands, options),
        Section::Error(e) => section_error(&mut out, "Commands", e, options),
    }

    match &overview.effects {
        Section::Ok(effects) => render_effects(&mut out, effects, options),
        Section::Error(e) => section_error(&mut out, "Object Changes", e, options),
    }

    let _ = writeln!(
        out,
        "1 MIST = 10^-{} {}",
        options.decimal_places, options.unit
    );
    out
}

/// Format an overview as pretty-printed JSON.
pub fn render_json(overview: &ReplayOverview) -> Result<String> {
    Ok(serde_json::to_string_pretty(overview)?)
}

fn section_error(out: &mut String, title: &str, error: &str, options: &TextOptions) {
    let _ = writeln!(out, "{}", options.heading(title));
    let _ = writeln!(
        out,
        "  {}\n",
        options.paint(&format!("could not interpret: {}", error), RED)
    );
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn amount(value: Option<&bigdecimal::BigDecimal>, options: &TextOptions) -> String {
    match value {
        Some(_) => format!("{} {}", format_decimal(value), options.unit),
        None => "-".to_string(),
    }
}

fn mist(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{} MIST", v))
}

fn render_gas(out: &mut String, gas: &GasReport, input_count: Option<usize>, options: &TextOptions) {
    let rows = [
        ("Total Gas Cost", amount(gas.total_cost.as_ref(), options)),
        ("Computation Cost", amount(gas.computation_cost.as_ref(), options)),
        ("Storage Cost", amount(gas.storage_cost.as_ref(), options)),
        ("Storage Rebate", amount(gas.storage_rebate.as_ref(), options)),
        (
            "Non-refundable Storage Fee",
            amount(gas.non_refundable_storage_fee.as_ref(), options),
        ),
    ];
    let _ = writeln!(out, "{}", options.heading("Gas Cost"));
    for (label, value) in rows {
        let _ = writeln!(out, "  {:<28} {}", label, value);
    }
    out.push('\n');

    let rows = [
        ("Gas Price", mist(gas.gas_price)),
        ("Reference Gas Price", mist(gas.reference_gas_price)),
        ("Gas Budget", mist(gas.gas_budget)),
        ("Max Gas Stack Height", optional(gas.stack_height_high_water_mark)),
        ("Max Gas Stack Size", optional(gas.stack_size_high_water_mark)),
        ("Instructions Executed", optional(gas.instructions_executed)),
        ("Input Arguments", optional(input_count)),
    ];
    let _ = writeln!(out, "{}", options.heading("Gas Info"));
    for (label, value) in rows {
        let _ = writeln!(out, "  {:<28} {}", label, value);
    }
    out.push('\n');
}

fn describe_input(input: &InputDescriptor) -> String {
    match input {
        InputDescriptor::Object(ObjectArg::ImmOrOwned {
            object_id, version, ..
        }) => format!("Object {} v{}", normalize_address_short(object_id), version),
        InputDescriptor::Object(ObjectArg::Shared {
            object_id,
            initial_shared_version,
            mutable,
        }) => format!(
            "Shared {} (initial v{}, {})",
            normalize_address_short(object_id),
            initial_shared_version,
            if *mutable { "mutable" } else { "immutable" }
        ),
        InputDescriptor::Object(ObjectArg::Receiving {
            object_id, version, ..
        }) => format!(
            "Receiving {} v{}",
            normalize_address_short(object_id),
            version
        ),
        InputDescriptor::Pure { bytes } => {
            format!("Pure {} byte(s) {}", bytes.len(), base64_encode(bytes))
        }
    }
}

fn render_inputs(out: &mut String, inputs: &[InputDescriptor], options: &TextOptions) {
    if inputs.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}", options.heading("Inputs"));
    for (i, input) in inputs.iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}", i, describe_input(input));
    }
    out.push('\n');
}

fn render_commands(out: &mut String, commands: &[CommandSummary], options: &TextOptions) {
    if commands.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}", options.heading("Commands"));
    for summary in commands {
        let args = summary
            .arguments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let name = match &summary.target {
            Some(target) => format!("{} {}", summary.kind, options.paint(target, CYAN)),
            None => summary.kind.to_string(),
        };
        let _ = writeln!(
            out,
            "  [{}] {}({}) -> {} value(s)",
            summary.index, name, args, summary.return_count
        );
        if options.verbose {
            for (arg, resolved) in summary.arguments.iter().zip(&summary.resolved) {
                let resolved = serde_json::to_string(resolved).unwrap_or_default();
                let _ = writeln!(out, "      {} = {}", arg, resolved);
            }
        }
    }
    out.push('\n');
}

fn describe_change(record: &ObjectChangeRecord, options: &TextOptions) -> String {
    let id = options.paint(&normalize_address_short(&record.reference.object_id), CYAN);
    let mut line = format!("{} v{}", id, record.reference.version);
    if let Some(owner) = &record.owner {
        let _ = write!(line, " owner: {}", owner);
    }
    if record.package {
        line.push_str(" [package]");
    }
    line
}

fn render_effects(out: &mut String, effects: &DecodedEffects, options: &TextOptions) {
    let _ = writeln!(
        out,
        "{} ({:?}, {} change(s))",
        options.heading("Object Changes"),
        effects.schema,
        effects.total_changes()
    );
    for (kind, records) in &effects.groups {
        if records.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  {} ({}):", kind, records.len());
        for record in records {
            let _ = writeln!(out, "    {}", describe_change(record, options));
        }
    }
    if !effects.unrecognized.is_empty() {
        let _ = writeln!(
            out,
            "  {}",
            options.paint(
                &format!("Unrecognized ({}):", effects.unrecognized.len()),
                YELLOW
            )
        );
        for change in &effects.unrecognized {
            let _ = writeln!(
                out,
                "    {} {:?} {:?} -> {:?}",
                normalize_address_short(&change.object_id),
                change.id_operation,
                change.input_state,
                change.output_state
            );
        }
    }
    if let Some(gas) = &effects.gas_object {
        let _ = writeln!(out, "  Gas Object: {}", describe_change(gas, options));
    }
    if !effects.dependencies.is_empty() {
        let _ = writeln!(out, "  Dependencies ({}):", effects.dependencies.len());
        for digest in &effects.dependencies {
            let _ = writeln!(out, "    {}", digest);
        }
    }
    if options.verbose && !effects.shared_notes.is_empty() {
        let _ = writeln!(out, "  Shared Objects ({}):", effects.shared_notes.len());
        for note in &effects.shared_notes {
            let kind = match &note.kind {
                SharedObjectKind::ReadOnlyRoot { version, .. } => format!("read-only v{}", version),
                SharedObjectKind::MutateDeleted { version } => {
                    format!("mutate deleted v{}", version)
                }
                SharedObjectKind::ReadDeleted { version } => format!("read deleted v{}", version),
                SharedObjectKind::Cancelled { version } => format!("cancelled v{}", version),
                SharedObjectKind::Unrecognized => "unrecognized".to_string(),
            };
            let _ = writeln!(out, "    {} {}", normalize_address_short(&note.object_id), kind);
        }
    }
    out.push('\n');
}
