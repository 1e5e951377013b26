//! Transaction types for replay inspection.
//!
//! Normalized inputs, commands and arguments of a Programmable Transaction
//! Block, plus the execution outcome recorded in the effects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::encoding::{base64_bytes, base64_bytes_vec, normalize_address_short};

/// Argument reference in a PTB command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Argument {
    /// Gas coin (special input)
    GasCoin,

    /// Reference to a transaction input
    Input { index: usize },

    /// Reference to a previous command result
    Result { index: usize },

    /// Reference to a nested result (for multi-return functions)
    NestedResult { index: usize, result_index: usize },
}

impl std::fmt::Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Argument::GasCoin => write!(f, "GasCoin"),
            Argument::Input { index } => write!(f, "Input({})", index),
            Argument::Result { index } => write!(f, "Result({})", index),
            Argument::NestedResult {
                index,
                result_index,
            } => write!(f, "NestedResult({}, {})", index, result_index),
        }
    }
}

/// Object input of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ObjectArg {
    /// Immutable or address-owned object at an exact version
    ImmOrOwned {
        object_id: String,
        version: u64,
        digest: String,
    },

    /// Shared object reference
    Shared {
        object_id: String,
        initial_shared_version: u64,
        mutable: bool,
    },

    /// Object sent to another object, received in this transaction
    Receiving {
        object_id: String,
        version: u64,
        digest: String,
    },
}

impl ObjectArg {
    pub fn object_id(&self) -> &str {
        match self {
            ObjectArg::ImmOrOwned { object_id, .. }
            | ObjectArg::Shared { object_id, .. }
            | ObjectArg::Receiving { object_id, .. } => object_id,
        }
    }
}

/// Transaction input: an object or a pure BCS value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum InputDescriptor {
    /// Object reference
    Object(ObjectArg),

    /// Pure BCS-encoded value
    Pure {
        #[serde(with = "base64_bytes")]
        bytes: Vec<u8>,
    },
}

/// A command in a Programmable Transaction Block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Move function call
    MoveCall {
        package: String,
        module: String,
        function: String,
        type_arguments: Vec<Value>,
        arguments: Vec<Argument>,
    },

    /// Split coins
    SplitCoins {
        coin: Argument,
        amounts: Vec<Argument>,
    },

    /// Transfer objects
    TransferObjects {
        objects: Vec<Argument>,
        address: Argument,
    },

    /// Merge coins
    MergeCoins {
        destination: Argument,
        sources: Vec<Argument>,
    },

    /// Make move vector
    MakeMoveVec {
        type_arg: Option<Value>,
        elements: Vec<Argument>,
    },

    /// Publish new package
    Publish {
        #[serde(with = "base64_bytes_vec")]
        modules: Vec<Vec<u8>>,
        dependencies: Vec<String>,
    },

    /// Upgrade package
    Upgrade {
        #[serde(with = "base64_bytes_vec")]
        modules: Vec<Vec<u8>>,
        dependencies: Vec<String>,
        package: String,
        ticket: Argument,
    },
}

impl Command {
    /// Command name as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::MoveCall { .. } => "MoveCall",
            Command::SplitCoins { .. } => "SplitCoins",
            Command::TransferObjects { .. } => "TransferObjects",
            Command::MergeCoins { .. } => "MergeCoins",
            Command::MakeMoveVec { .. } => "MakeMoveVec",
            Command::Publish { .. } => "Publish",
            Command::Upgrade { .. } => "Upgrade",
        }
    }

    /// Every argument the command declares, in declaration order.
    pub fn arguments(&self) -> Vec<Argument> {
        match self {
            Command::MoveCall { arguments, .. } => arguments.clone(),
            Command::SplitCoins { coin, amounts } => {
                std::iter::once(*coin).chain(amounts.iter().copied()).collect()
            }
            Command::TransferObjects { objects, address } => objects
                .iter()
                .copied()
                .chain(std::iter::once(*address))
                .collect(),
            Command::MergeCoins {
                destination,
                sources,
            } => std::iter::once(*destination)
                .chain(sources.iter().copied())
                .collect(),
            Command::MakeMoveVec { elements, .. } => elements.clone(),
            Command::Publish { .. } => Vec::new(),
            Command::Upgrade { ticket, .. } => vec![*ticket],
        }
    }

    /// `package::module::function` for Move calls, with the package shortened.
    pub fn target(&self) -> Option<String> {
        match self {
            Command::MoveCall {
                package,
                module,
                function,
                ..
            } => Some(format!(
                "{}::{}::{}",
                normalize_address_short(package),
                module,
                function
            )),
            _ => None,
        }
    }
}

/// Execution outcome recorded in the effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionOutcome {
    Success,
    Failure {
        error: String,
        /// Index of the failing command, when reported
        command: Option<u64>,
    },
}

impl ExecutionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_arguments_in_declaration_order() {
        let cmd = Command::TransferObjects {
            objects: vec![
                Argument::Result { index: 0 },
                Argument::NestedResult {
                    index: 1,
                    result_index: 2,
                },
            ],
            address: Argument::Input { index: 3 },
        };
        assert_eq!(
            cmd.arguments(),
            vec![
                Argument::Result { index: 0 },
                Argument::NestedResult {
                    index: 1,
                    result_index: 2
                },
                Argument::Input { index: 3 },
            ]
        );
        assert_eq!(cmd.kind(), "TransferObjects");
        assert!(cmd.target().is_none());
    }

    #[test]
    fn test_move_call_target_shortens_package() {
        let cmd = Command::MoveCall {
            package: "0x0000000000000000000000000000000000000000000000000000000000000002".into(),
            module: "coin".into(),
            function: "split".into(),
            type_arguments: vec![],
            arguments: vec![Argument::GasCoin],
        };
        assert_eq!(cmd.target().as_deref(), Some("0x2::coin::split"));
    }

    #[test]
    fn test_pure_input_serializes_base64() {
        let input = InputDescriptor::Pure {
            bytes: vec![1, 2, 3],
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["kind"], "Pure");
        assert_eq!(json["bytes"], "AQID");
    }

    #[test]
    fn test_argument_display() {
        assert_eq!(Argument::GasCoin.to_string(), "GasCoin");
        assert_eq!(
            Argument::NestedResult {
                index: 1,
                result_index: 0
            }
            .to_string(),
            "NestedResult(1, 0)"
        );
    }
}
