//! One-call summary of a whole replay result.
//!
//! Each section is interpreted on its own. A structural problem in one
//! section is recorded as that section's error and the others are still
//! produced, so a viewer can show everything it could make sense of.

use serde::Serialize;
use sui_replay_types::wire;
use sui_replay_types::{ExecutionOutcome, InputDescriptor};
use tracing::{debug, warn};

use crate::config::InspectConfig;
use crate::effects::{self, DecodedEffects};
use crate::error::Result;
use crate::gas::{GasReport, GasReportBuilder};
use crate::inputs::{self, CommandSummary};
use crate::normalize::optional_integer;
use crate::status;

/// Outcome of interpreting one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section<T> {
    Ok(T),
    Error(String),
}

impl<T> Section<T> {
    fn from_result(name: &str, result: Result<T>) -> Self {
        match result {
            Ok(value) => Section::Ok(value),
            Err(e) => {
                warn!(section = name, error = %e, "could not interpret section");
                Section::Error(e.to_string())
            }
        }
    }

    pub fn ok(&self) -> Option<&T> {
        match self {
            Section::Ok(value) => Some(value),
            Section::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Section::Ok(_) => None,
            Section::Error(e) => Some(e),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Section::Ok(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayOverview {
    pub transaction_digest: Option<String>,
    /// `None` when the effects do not report an epoch
    pub executed_epoch: Section<Option<u64>>,
    pub status: Section<ExecutionOutcome>,
    pub gas: Section<GasReport>,
    pub inputs: Section<Vec<InputDescriptor>>,
    pub commands: Section<Vec<CommandSummary>>,
    pub effects: Section<DecodedEffects>,
}

impl ReplayOverview {
    /// Interpret every section of a replay result.
    pub fn from_replay(replay: &wire::ReplayResult, config: &InspectConfig) -> Self {
        let effects_version = &replay.effects.effects_version;

        let status = match &effects_version.status {
            Some(raw) => Section::from_result("status", status::execution_outcome(raw)),
            None => Section::Error("execution status missing".to_string()),
        };

        let gas_used = effects_version.gas_used.clone().unwrap_or_default();
        let gas = Section::from_result(
            "gas",
            GasReportBuilder::new()
                .decimal_places(config.decimal_places)
                .build(&gas_used, &replay.gas_status),
        );

        let ptb = replay
            .transaction_info
            .programmable_transaction
            .clone()
            .unwrap_or_default();
        let inputs = Section::from_result("inputs", inputs::summarize(&ptb.inputs));
        let commands = match &inputs {
            Section::Ok(resolved) => Section::from_result(
                "commands",
                inputs::summarize_commands(&ptb.commands, resolved),
            ),
            Section::Error(_) => Section::Error("inputs unavailable".to_string()),
        };

        let effects = Section::from_result("effects", effects::decode(&replay.effects));

        let overview = Self {
            transaction_digest: effects_version.transaction_digest.clone(),
            executed_epoch: Section::from_result(
                "epoch",
                optional_integer("executedEpoch", effects_version.executed_epoch.as_ref()),
            ),
            status,
            gas,
            inputs,
            commands,
            effects,
        };
        debug!(
            digest = overview.transaction_digest.as_deref().unwrap_or("-"),
            complete = overview.is_complete(),
            "built replay overview"
        );
        overview
    }

    /// True when every section was interpreted.
    pub fn is_complete(&self) -> bool {
        self.executed_epoch.is_ok()
            && self.status.is_ok()
            && self.gas.is_ok()
            && self.inputs.is_ok()
            && self.commands.is_ok()
            && self.effects.is_ok()
    }

    /// Errors of the sections that failed, by section name.
    pub fn section_errors(&self) -> Vec<(&'static str, &str)> {
        [
            ("epoch", self.executed_epoch.error()),
            ("status", self.status.error()),
            ("gas", self.gas.error()),
            ("inputs", self.inputs.error()),
            ("commands", self.commands.error()),
            ("effects", self.effects.error()),
        ]
        .into_iter()
        .filter_map(|(name, error)| error.map(|e| (name, e)))
        .collect()
    }
}

/// Parse a replay result from its JSON text.
pub fn parse_replay(json: &str) -> Result<wire::ReplayResult> {
    Ok(serde_json::from_str(json)?)
}

/// Parse and interpret a replay result in one step.
pub fn inspect_str(json: &str, config: &InspectConfig) -> Result<ReplayOverview> {
    let replay = parse_replay(json)?;
    Ok(ReplayOverview::from_replay(&replay, config))
}
