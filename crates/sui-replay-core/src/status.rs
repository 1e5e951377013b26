//! Execution status derivation.
//!
//! V1 effects report `{"status": "success"}` or `{"status": "failure",
//! "error": ..}`; V2 effects report `{"success": ..}` or `{"failure": {"error",
//! "command"}}`. Some encoders emit a bare `"Success"` label instead.

use sui_replay_types::wire::{self, TagUnion};
use sui_replay_types::ExecutionOutcome;

use crate::error::{ReplayError, Result};
use crate::normalize::optional_integer;

/// Derive the execution outcome from either status layout.
pub fn execution_outcome(status: &wire::ExecutionStatus) -> Result<ExecutionOutcome> {
    match status {
        TagUnion::Label(label) => match label.to_ascii_lowercase().as_str() {
            "success" => Ok(ExecutionOutcome::Success),
            "failure" => Ok(ExecutionOutcome::Failure {
                error: "unknown error".to_string(),
                command: None,
            }),
            _ => Err(ReplayError::UnknownExecutionStatus {
                detail: format!("label '{}'", label),
            }),
        },
        TagUnion::Fields(fields) => from_fields(fields),
    }
}

fn from_fields(fields: &wire::StatusFields) -> Result<ExecutionOutcome> {
    match (&fields.status, &fields.success, &fields.failure) {
        (None, Some(_), None) => Ok(ExecutionOutcome::Success),
        (None, None, Some(failure)) => Ok(ExecutionOutcome::Failure {
            error: failure.error.clone(),
            command: optional_integer("command", failure.command.as_ref())?,
        }),
        (Some(status), None, None) => match status.to_ascii_lowercase().as_str() {
            "success" => Ok(ExecutionOutcome::Success),
            "failure" => Ok(ExecutionOutcome::Failure {
                error: fields
                    .error
                    .clone()
                    .unwrap_or_else(|| "unknown error".to_string()),
                command: None,
            }),
            other => Err(ReplayError::UnknownExecutionStatus {
                detail: format!("status '{}'", other),
            }),
        },
        (None, None, None) => Err(ReplayError::UnknownExecutionStatus {
            detail: "no success or failure marker".to_string(),
        }),
        _ => Err(ReplayError::UnknownExecutionStatus {
            detail: "conflicting success and failure markers".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(json: &str) -> Result<ExecutionOutcome> {
        execution_outcome(&serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_v1_status() {
        assert_eq!(
            outcome(r#"{"status": "success"}"#).unwrap(),
            ExecutionOutcome::Success
        );
        assert_eq!(
            outcome(r#"{"status": "failure", "error": "InsufficientGas"}"#).unwrap(),
            ExecutionOutcome::Failure {
                error: "InsufficientGas".into(),
                command: None
            }
        );
    }

    #[test]
    fn test_v2_status() {
        assert!(outcome(r#"{"success": ""}"#).unwrap().is_success());
        assert!(outcome(r#"{"success": null}"#).unwrap().is_success());
        assert_eq!(
            outcome(r#"{"failure": {"error": "MoveAbort(..., 3)", "command": 2}}"#).unwrap(),
            ExecutionOutcome::Failure {
                error: "MoveAbort(..., 3)".into(),
                command: Some(2)
            }
        );
    }

    #[test]
    fn test_malformed_failure_command() {
        assert!(matches!(
            outcome(r#"{"failure": {"error": "MoveAbort", "command": "second"}}"#),
            Err(ReplayError::MalformedInteger {
                field: "command",
                ..
            })
        ));
    }

    #[test]
    fn test_bare_label() {
        assert!(outcome(r#""Success""#).unwrap().is_success());
    }

    #[test]
    fn test_unknown_status() {
        assert!(matches!(
            outcome("{}"),
            Err(ReplayError::UnknownExecutionStatus { .. })
        ));
        assert!(matches!(
            outcome(r#"{"status": "pending"}"#),
            Err(ReplayError::UnknownExecutionStatus { .. })
        ));
        assert!(matches!(
            outcome(r#"{"success": "", "failure": {"error": "x"}}"#),
            Err(ReplayError::UnknownExecutionStatus { .. })
        ));
    }
}
