//! Shared types for the sui-replay-inspect workspace.
//!
//! Two layers live here:
//!
//! - [`wire`] mirrors the replayer's JSON exactly, unions and all.
//! - [`effects`] and [`transaction`] hold the normalized closed enums that the
//!   decoders in `sui-replay-core` produce from the wire values.
//!
//! [`encoding`] carries the serde adapters both layers share, and
//! [`env_utils`] the environment helpers used for configuration.

pub mod effects;
pub mod encoding;
pub mod env_utils;
pub mod transaction;
pub mod wire;

// Re-export commonly used model types at crate root
pub use effects::{
    ChangeKind, IdOperation, ObjectChangeRecord, ObjectIn, ObjectOut, ObjectRef, Owner,
    SchemaVersion, SharedObjectKind, SharedObjectNote, UnrecognizedChange,
};
pub use transaction::{Argument, Command, ExecutionOutcome, InputDescriptor, ObjectArg};
