//! Normalized transaction-effects types.
//!
//! These are the closed sum types the decoder produces from either effects
//! schema version. They serialize back to JSON for any rendering layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Object reference: `(objectId, version, digest)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    pub object_id: String,
    pub version: u64,
    pub digest: String,
}

impl ObjectRef {
    pub fn new(object_id: impl Into<String>, version: u64, digest: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            version,
            digest: digest.into(),
        }
    }
}

/// Ownership of an object after a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Owner {
    /// Owned by an account address
    AddressOwner { address: String },
    /// Owned by another object (dynamic fields, wrapped children)
    ObjectOwner { object_id: String },
    /// Shared object, created shared at `initial_shared_version`
    Shared { initial_shared_version: u64 },
    /// Frozen object or package
    Immutable,
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::AddressOwner { address } => write!(f, "address {}", address),
            Owner::ObjectOwner { object_id } => write!(f, "object {}", object_id),
            Owner::Shared {
                initial_shared_version,
            } => write!(f, "shared (initial version {})", initial_shared_version),
            Owner::Immutable => write!(f, "immutable"),
        }
    }
}

/// The five kinds of object change a transaction can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    Created,
    Mutated,
    Wrapped,
    Unwrapped,
    Deleted,
}

impl ChangeKind {
    /// All kinds in display order.
    pub const ALL: [ChangeKind; 5] = [
        ChangeKind::Created,
        ChangeKind::Mutated,
        ChangeKind::Wrapped,
        ChangeKind::Unwrapped,
        ChangeKind::Deleted,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChangeKind::Created => "Created",
            ChangeKind::Mutated => "Mutated",
            ChangeKind::Wrapped => "Wrapped",
            ChangeKind::Unwrapped => "Unwrapped",
            ChangeKind::Deleted => "Deleted",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One normalized object change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectChangeRecord {
    pub kind: ChangeKind,
    pub reference: ObjectRef,
    /// Owner after the transaction; `None` for deletions.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub owner: Option<Owner>,
    /// Set for package writes (publish/upgrade output).
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub package: bool,
}

// =============================================================================
// V2 per-object change triple
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdOperation {
    None,
    Created,
    Deleted,
}

/// State of an object before the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectIn {
    NotExist,
    Exist { digest: String, owner: Owner },
}

/// State of an object after the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectOut {
    NotExist,
    ObjectWrite { digest: String, owner: Owner },
    PackageWrite { version: u64, digest: String },
}

/// A V2 change whose `(idOperation, inputState, outputState)` combination is
/// not one of the known object-change kinds. Kept verbatim for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnrecognizedChange {
    pub object_id: String,
    pub id_operation: IdOperation,
    pub input_state: ObjectIn,
    pub output_state: ObjectOut,
}

// =============================================================================
// Unchanged shared objects
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SharedObjectKind {
    /// Read-only access at `(version, digest)`
    ReadOnlyRoot { version: u64, digest: String },
    /// Mutable access to an object already deleted at `version`
    MutateDeleted { version: u64 },
    /// Read access to an object already deleted at `version`
    ReadDeleted { version: u64 },
    /// Access cancelled by congestion control
    Cancelled { version: u64 },
    /// A kind this decoder does not know about
    Unrecognized,
}

/// A shared object the transaction touched without changing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedObjectNote {
    pub object_id: String,
    pub kind: SharedObjectKind,
}

/// Which effects layout a value used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaVersion {
    V1,
    V2,
}
