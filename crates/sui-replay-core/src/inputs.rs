//! Input classification and argument resolution.
//!
//! Inputs are positional: commands refer to them with `Input(i)`. Commands are
//! positional too, and a command may only consume results of commands declared
//! before it. [`summarize_commands`] walks the block in declaration order and
//! resolves each argument against the inputs and the earlier results only.

use serde::Serialize;
use serde_json::Value;
use sui_replay_types::wire;
use sui_replay_types::{Argument, Command, InputDescriptor};
use tracing::debug;

use crate::error::{ensure_single, ReplayError, Result};
use crate::normalize;

/// Classify every replay input, preserving order.
pub fn summarize(inputs: &[wire::ReplayInput]) -> Result<Vec<InputDescriptor>> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| classify(input, index))
        .collect()
}

fn classify(input: &wire::ReplayInput, index: usize) -> Result<InputDescriptor> {
    ensure_single(
        "input",
        index,
        &[input.object.is_some(), input.pure.is_some()],
    )?;
    match &input.object {
        Some(object) => Ok(InputDescriptor::Object(normalize::object_arg(
            object, index,
        )?)),
        None => Ok(InputDescriptor::Pure {
            bytes: input.pure.clone().unwrap_or_default(),
        }),
    }
}

/// What an argument points at once resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ResolvedArgument {
    GasCoin,
    Input {
        index: usize,
        input: InputDescriptor,
    },
    Result {
        command: usize,
        value: Value,
    },
    NestedResult {
        command: usize,
        position: usize,
        value: Value,
    },
}

/// Resolve an argument against the inputs and the return values of the
/// commands that ran before the one using it.
///
/// `prior_results[i]` holds the return values of command `i`.
pub fn resolve_argument(
    arg: &Argument,
    inputs: &[InputDescriptor],
    prior_results: &[Vec<Value>],
) -> Result<ResolvedArgument> {
    match *arg {
        Argument::GasCoin => Ok(ResolvedArgument::GasCoin),
        Argument::Input { index } => {
            let input = inputs
                .get(index)
                .ok_or_else(|| ReplayError::index_out_of_range("input", index, inputs.len()))?;
            Ok(ResolvedArgument::Input {
                index,
                input: input.clone(),
            })
        }
        Argument::Result { index: command } => {
            let values = command_results(command, prior_results)?;
            match values {
                [value] => Ok(ResolvedArgument::Result {
                    command,
                    value: value.clone(),
                }),
                _ => Err(ReplayError::InvalidResultArity {
                    command,
                    count: values.len(),
                }),
            }
        }
        Argument::NestedResult {
            index: command,
            result_index: position,
        } => {
            let values = command_results(command, prior_results)?;
            let value = values.get(position).ok_or_else(|| {
                ReplayError::index_out_of_range("nested result", position, values.len())
            })?;
            Ok(ResolvedArgument::NestedResult {
                command,
                position,
                value: value.clone(),
            })
        }
    }
}

fn command_results(command: usize, prior_results: &[Vec<Value>]) -> Result<&[Value]> {
    prior_results
        .get(command)
        .map(Vec::as_slice)
        .ok_or_else(|| ReplayError::index_out_of_range("result", command, prior_results.len()))
}

/// One command with its declared and resolved arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandSummary {
    pub index: usize,
    pub kind: &'static str,
    /// `package::module::function` for Move calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub command: Command,
    pub arguments: Vec<Argument>,
    pub resolved: Vec<ResolvedArgument>,
    /// Number of values the command returned during replay
    pub return_count: usize,
}

/// Convert the wire commands without resolving their arguments.
pub fn decode_commands(commands: &[wire::CommandWithOutput]) -> Result<Vec<Command>> {
    commands
        .iter()
        .map(|c| normalize::command(&c.command))
        .collect()
}

/// Summarize commands in declaration order, resolving each argument.
///
/// Command `k` sees only the results of commands `0..k`; a forward reference
/// fails with `IndexOutOfRange`.
pub fn summarize_commands(
    commands: &[wire::CommandWithOutput],
    inputs: &[InputDescriptor],
) -> Result<Vec<CommandSummary>> {
    let mut results: Vec<Vec<Value>> = Vec::with_capacity(commands.len());
    let mut summaries = Vec::with_capacity(commands.len());

    for (index, raw) in commands.iter().enumerate() {
        let command = normalize::command(&raw.command)?;
        let arguments = command.arguments();
        let resolved = arguments
            .iter()
            .map(|arg| resolve_argument(arg, inputs, &results))
            .collect::<Result<Vec<_>>>()?;

        summaries.push(CommandSummary {
            index,
            kind: command.kind(),
            target: command.target(),
            arguments,
            resolved,
            return_count: raw.return_values.len(),
            command,
        });
        // Results become visible only after the command itself is resolved
        results.push(raw.return_values.clone());
    }

    debug!(
        commands = summaries.len(),
        inputs = inputs.len(),
        "summarized commands"
    );
    Ok(summaries)
}
