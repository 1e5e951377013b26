//! Effects decoding.
//!
//! Replayed effects come in two layouts that carry no explicit version tag:
//!
//! - **V1** lists changes per kind: `created`, `mutated`, `wrapped`,
//!   `unwrapped`, `deleted`.
//! - **V2** lists one `changedObjects` entry per object with an
//!   `(idOperation, inputState, outputState)` triple, and versions every
//!   output at `lamportVersion`.
//!
//! [`detect_schema`] is the single place that decides the layout; the rest of
//! the decoder works on [`DecodedEffects`], the same normalized shape for both.
//!
//! V2 triples map to change kinds as follows:
//!
//! | idOperation | inputState | outputState  | kind              |
//! |-------------|------------|--------------|-------------------|
//! | Created     | NotExist   | ObjectWrite  | Created           |
//! | None        | Exist      | ObjectWrite  | Mutated           |
//! | None        | Exist      | NotExist     | Wrapped           |
//! | None        | NotExist   | ObjectWrite  | Unwrapped         |
//! | Deleted     | Exist      | NotExist     | Deleted           |
//! | Created     | NotExist   | PackageWrite | Created (package) |
//!
//! Any other triple is kept in [`DecodedEffects::unrecognized`]; decoding
//! never drops an object change.

use std::collections::BTreeMap;

use serde::Serialize;
use sui_replay_types::wire;
use sui_replay_types::{
    ChangeKind, IdOperation, ObjectChangeRecord, ObjectIn, ObjectOut, ObjectRef, SchemaVersion,
    SharedObjectNote, UnrecognizedChange,
};
use tracing::{debug, warn};

use crate::error::{ReplayError, Result};
use crate::normalize;

/// Normalized view of one transaction's effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedEffects {
    pub schema: SchemaVersion,
    /// One entry per [`ChangeKind`], empty lists included.
    pub groups: BTreeMap<ChangeKind, Vec<ObjectChangeRecord>>,
    /// V2 changes matching no known kind.
    pub unrecognized: Vec<UnrecognizedChange>,
    /// Shared objects accessed but not changed (V2 only).
    pub shared_notes: Vec<SharedObjectNote>,
    /// Digests of the transactions this one depends on.
    pub dependencies: Vec<String>,
    /// The coin that paid for gas, when the effects name it.
    pub gas_object: Option<ObjectChangeRecord>,
}

impl DecodedEffects {
    fn empty(schema: SchemaVersion, dependencies: Vec<String>) -> Self {
        Self {
            schema,
            groups: ChangeKind::ALL.iter().map(|k| (*k, Vec::new())).collect(),
            unrecognized: Vec::new(),
            shared_notes: Vec::new(),
            dependencies,
            gas_object: None,
        }
    }

    fn push(&mut self, record: ObjectChangeRecord) {
        self.groups.entry(record.kind).or_default().push(record);
    }

    /// Records of one kind, in input order.
    pub fn group(&self, kind: ChangeKind) -> &[ObjectChangeRecord] {
        self.groups.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of object changes, unrecognized ones included.
    pub fn total_changes(&self) -> usize {
        self.groups.values().map(Vec::len).sum::<usize>() + self.unrecognized.len()
    }
}

/// Decide which effects layout a value uses, by key presence.
///
/// A marker key counts even when its value is `null`.
pub fn detect_schema(effects: &wire::EffectsVersion) -> Result<SchemaVersion> {
    let v1 = effects.created.is_some()
        || effects.mutated.is_some()
        || effects.wrapped.is_some()
        || effects.unwrapped.is_some()
        || effects.deleted.is_some();
    let v2 = effects.changed_objects.is_some() || effects.lamport_version.is_some();

    match (v1, v2) {
        (true, false) => Ok(SchemaVersion::V1),
        (false, true) => Ok(SchemaVersion::V2),
        (true, true) => Err(ReplayError::unsupported_schema(
            "both V1 and V2 fields are present",
        )),
        (false, false) => Err(ReplayError::unsupported_schema(
            "neither V1 nor V2 fields are present",
        )),
    }
}

/// Decode effects of either layout into object-change groups.
pub fn decode(effects: &wire::Effects) -> Result<DecodedEffects> {
    let version = &effects.effects_version;
    let schema = detect_schema(version)?;
    let decoded = match schema {
        SchemaVersion::V1 => decode_v1(version)?,
        SchemaVersion::V2 => decode_v2(version)?,
    };
    debug!(
        schema = ?decoded.schema,
        changes = decoded.total_changes(),
        unrecognized = decoded.unrecognized.len(),
        "decoded effects"
    );
    Ok(decoded)
}

fn decode_v1(effects: &wire::EffectsVersion) -> Result<DecodedEffects> {
    let mut decoded = DecodedEffects::empty(
        SchemaVersion::V1,
        effects.dependencies.clone().unwrap_or_default(),
    );

    let owned_lists = [
        (ChangeKind::Created, &effects.created),
        (ChangeKind::Mutated, &effects.mutated),
        (ChangeKind::Wrapped, &effects.wrapped),
        (ChangeKind::Unwrapped, &effects.unwrapped),
    ];
    for (kind, list) in owned_lists {
        for (index, object) in listed(list).iter().enumerate() {
            decoded.push(ObjectChangeRecord {
                kind,
                reference: reference(&object.reference)?,
                owner: Some(normalize::owner(&object.owner, index)?),
                package: false,
            });
        }
    }
    for deleted in listed(&effects.deleted) {
        decoded.push(ObjectChangeRecord {
            kind: ChangeKind::Deleted,
            reference: reference(deleted)?,
            owner: None,
            package: false,
        });
    }

    if let Some(gas) = &effects.gas_object {
        decoded.gas_object = Some(ObjectChangeRecord {
            kind: ChangeKind::Mutated,
            reference: reference(&gas.reference)?,
            owner: Some(normalize::owner(&gas.owner, 0)?),
            package: false,
        });
    }

    Ok(decoded)
}

fn decode_v2(effects: &wire::EffectsVersion) -> Result<DecodedEffects> {
    let lamport_version = effects
        .lamport_version
        .as_ref()
        .and_then(Option::as_ref)
        .ok_or_else(|| ReplayError::unsupported_schema("V2 effects without lamportVersion"))?;
    let lamport_version = normalize::integer("lamportVersion", lamport_version)?;
    let mut decoded = DecodedEffects::empty(
        SchemaVersion::V2,
        effects.dependencies.clone().unwrap_or_default(),
    );

    let changed_objects = listed(&effects.changed_objects);
    let gas_index = effects
        .gas_obj_index
        .as_ref()
        .map(|raw| normalize::position("gasObjIndex", raw))
        .transpose()?;
    if let Some(gas_index) = gas_index {
        if gas_index >= changed_objects.len() {
            return Err(ReplayError::index_out_of_range(
                "gas object",
                gas_index,
                changed_objects.len(),
            ));
        }
    }

    for (index, changed) in changed_objects.iter().enumerate() {
        let change = &changed.effects_object_change;
        let id_operation = normalize::id_operation(&change.id_operation, index)?;
        let input_state = normalize::object_in(&change.input_state, index)?;
        let output_state = normalize::object_out(&change.output_state, index)?;

        match classify(
            &changed.object_id,
            lamport_version,
            id_operation,
            &input_state,
            &output_state,
        ) {
            Some(record) => {
                if gas_index == Some(index) {
                    decoded.gas_object = Some(record.clone());
                }
                decoded.push(record);
            }
            None => {
                warn!(
                    object_id = %changed.object_id,
                    ?id_operation,
                    "unrecognized V2 object change"
                );
                decoded.unrecognized.push(UnrecognizedChange {
                    object_id: changed.object_id.clone(),
                    id_operation,
                    input_state,
                    output_state,
                });
            }
        }
    }

    for (index, unchanged) in effects
        .unchanged_shared_objects
        .iter()
        .flatten()
        .enumerate()
    {
        decoded.shared_notes.push(SharedObjectNote {
            object_id: unchanged.object_id.clone(),
            kind: normalize::shared_kind(&unchanged.unchanged_shared_kind, index)?,
        });
    }

    Ok(decoded)
}

/// Map one V2 change triple to a record, or `None` if it matches no kind.
fn classify(
    object_id: &str,
    lamport_version: u64,
    id_operation: IdOperation,
    input: &ObjectIn,
    output: &ObjectOut,
) -> Option<ObjectChangeRecord> {
    let record = |kind, digest: &str, owner, package| ObjectChangeRecord {
        kind,
        reference: ObjectRef::new(object_id, lamport_version, digest),
        owner,
        package,
    };

    match (id_operation, input, output) {
        (IdOperation::Created, ObjectIn::NotExist, ObjectOut::ObjectWrite { digest, owner }) => {
            Some(record(ChangeKind::Created, digest, Some(owner.clone()), false))
        }
        (IdOperation::None, ObjectIn::Exist { .. }, ObjectOut::ObjectWrite { digest, owner }) => {
            Some(record(ChangeKind::Mutated, digest, Some(owner.clone()), false))
        }
        (IdOperation::None, ObjectIn::Exist { digest, owner }, ObjectOut::NotExist) => {
            Some(record(ChangeKind::Wrapped, digest, Some(owner.clone()), false))
        }
        (IdOperation::None, ObjectIn::NotExist, ObjectOut::ObjectWrite { digest, owner }) => {
            Some(record(ChangeKind::Unwrapped, digest, Some(owner.clone()), false))
        }
        (IdOperation::Deleted, ObjectIn::Exist { digest, .. }, ObjectOut::NotExist) => {
            Some(record(ChangeKind::Deleted, digest, None, false))
        }
        (
            IdOperation::Created,
            ObjectIn::NotExist,
            ObjectOut::PackageWrite { version, digest },
        ) => Some(ObjectChangeRecord {
            kind: ChangeKind::Created,
            reference: ObjectRef::new(object_id, *version, digest.as_str()),
            owner: Some(sui_replay_types::Owner::Immutable),
            package: true,
        }),
        _ => None,
    }
}

fn listed<T>(key: &Option<Option<Vec<T>>>) -> &[T] {
    key.as_ref()
        .and_then(Option::as_ref)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn reference(raw: &wire::ObjectReference) -> Result<ObjectRef> {
    Ok(ObjectRef::new(
        raw.object_id.as_str(),
        normalize::integer("version", &raw.version)?,
        raw.digest.as_str(),
    ))
}
