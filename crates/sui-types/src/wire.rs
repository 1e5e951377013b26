//! Wire shapes of a replay result, exactly as the replayer emits them.
//!
//! Unions in this format are "an object with one of several optional keys
//! populated" (sometimes a bare string for payload-less variants), so these
//! types keep every alternative as an `Option`. Nothing here decides which
//! alternative is meant; that happens once, when `sui-replay-core` converts
//! the wire values into the closed enums of [`crate::effects`] and
//! [`crate::transaction`].

use serde::Deserialize;
use serde_json::Value;

use crate::encoding::{nullable, present, AmountText, FlexU64};

/// A union that is either a bare label (`"Immutable"`, `"GasCoin"`, ...) or an
/// object carrying one of several optional keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagUnion<T> {
    Label(String),
    Fields(T),
}

/// Root value produced by the replayer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayResult {
    pub effects: Effects,
    #[serde(default)]
    pub gas_status: GasStatus,
    #[serde(default)]
    pub transaction_info: TransactionInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effects {
    pub effects_version: EffectsVersion,
}

/// Superset of the V1 and V2 effects layouts.
///
/// Which version is present is decided by key presence only: `created`,
/// `mutated`, `wrapped`, `unwrapped` or `deleted` mean V1, `changedObjects` or
/// `lamportVersion` mean V2. Those keys keep a `null` value apart from a
/// missing key (`Some(None)` vs `None`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectsVersion {
    // Common to both versions
    #[serde(default)]
    pub status: Option<ExecutionStatus>,
    #[serde(default)]
    pub executed_epoch: Option<FlexU64>,
    #[serde(default)]
    pub gas_used: Option<GasUsed>,
    #[serde(default)]
    pub transaction_digest: Option<String>,
    #[serde(default)]
    pub dependencies: Option<Vec<String>>,

    // V1
    #[serde(default, deserialize_with = "nullable")]
    pub created: Option<Option<Vec<EffectsObject>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub mutated: Option<Option<Vec<EffectsObject>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub wrapped: Option<Option<Vec<EffectsObject>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub unwrapped: Option<Option<Vec<EffectsObject>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub deleted: Option<Option<Vec<ObjectReference>>>,
    #[serde(default)]
    pub gas_object: Option<EffectsObject>,

    // V2
    #[serde(default, deserialize_with = "nullable")]
    pub lamport_version: Option<Option<FlexU64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub changed_objects: Option<Option<Vec<ChangedObject>>>,
    #[serde(default)]
    pub unchanged_shared_objects: Option<Vec<UnchangedSharedObject>>,
    /// Position of the gas coin in `changedObjects`
    #[serde(default)]
    pub gas_obj_index: Option<FlexU64>,
}

/// V1 `{status: "success"}`, V2 `{success: ..}` / `{failure: {..}}`, or a bare label.
pub type ExecutionStatus = TagUnion<StatusFields>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusFields {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub success: Option<Value>,
    #[serde(default)]
    pub failure: Option<ExecutionFailure>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionFailure {
    pub error: String,
    #[serde(default)]
    pub command: Option<FlexU64>,
}

/// Gas costs in MIST, as integer literals.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasUsed {
    #[serde(default)]
    pub computation_cost: Option<AmountText>,
    #[serde(default)]
    pub storage_cost: Option<AmountText>,
    #[serde(default)]
    pub storage_rebate: Option<AmountText>,
    #[serde(default)]
    pub non_refundable_storage_fee: Option<AmountText>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    pub object_id: String,
    pub version: FlexU64,
    pub digest: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EffectsObject {
    pub owner: EffectsOwner,
    pub reference: ObjectReference,
}

/// `{AddressOwner}`, `{ObjectOwner}`, `{Shared: {initialSharedVersion}}` or `"Immutable"`.
pub type EffectsOwner = TagUnion<OwnerFields>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OwnerFields {
    #[serde(default)]
    pub address_owner: Option<String>,
    #[serde(default)]
    pub object_owner: Option<String>,
    #[serde(default)]
    pub shared: Option<SharedOwner>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedOwner {
    pub initial_shared_version: FlexU64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedObject {
    pub object_id: String,
    pub effects_object_change: EffectsObjectChange,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectsObjectChange {
    pub input_state: ObjectIn,
    pub output_state: ObjectOut,
    pub id_operation: IdOperation,
}

pub type IdOperation = TagUnion<IdOperationFields>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdOperationFields {
    #[serde(default, deserialize_with = "present")]
    pub none: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub created: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub deleted: Option<Value>,
}

pub type ObjectIn = TagUnion<ObjectInFields>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectInFields {
    #[serde(default, deserialize_with = "present")]
    pub not_exist: Option<Value>,
    #[serde(default)]
    pub exist: Option<ExistState>,
}

pub type ObjectOut = TagUnion<ObjectOutFields>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectOutFields {
    #[serde(default, deserialize_with = "present")]
    pub not_exist: Option<Value>,
    #[serde(default)]
    pub object_write: Option<ExistState>,
    #[serde(default)]
    pub package_write: Option<VersionDigest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExistState {
    #[serde(rename = "Digest")]
    pub digest: String,
    pub owner: EffectsOwner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionDigest {
    pub version: FlexU64,
    pub digest: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnchangedSharedObject {
    pub object_id: String,
    pub unchanged_shared_kind: UnchangedSharedKind,
}

pub type UnchangedSharedKind = TagUnion<UnchangedSharedKindFields>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnchangedSharedKindFields {
    #[serde(default)]
    pub read_only_root: Option<VersionDigest>,
    #[serde(default)]
    pub mutate_deleted: Option<FlexU64>,
    #[serde(default)]
    pub read_deleted: Option<FlexU64>,
    #[serde(default)]
    pub cancelled: Option<FlexU64>,
}

// =============================================================================
// Gas status
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GasStatus {
    #[serde(rename = "V2", default)]
    pub v2: Option<GasStatusV2>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasStatusV2 {
    #[serde(default)]
    pub gas_status: Option<MeterStatus>,
    #[serde(default)]
    pub gas_budget: Option<FlexU64>,
    #[serde(default)]
    pub gas_price: Option<FlexU64>,
    #[serde(default)]
    pub reference_gas_price: Option<FlexU64>,
    #[serde(default)]
    pub storage_gas_price: Option<FlexU64>,
}

/// Execution metering counters of the Move gas meter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterStatus {
    #[serde(default)]
    pub gas_model_version: Option<FlexU64>,
    #[serde(default)]
    pub stack_height_high_water_mark: Option<FlexU64>,
    #[serde(default)]
    pub stack_size_high_water_mark: Option<FlexU64>,
    #[serde(default)]
    pub instructions_executed: Option<FlexU64>,
}

// =============================================================================
// Programmable transaction
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionInfo {
    #[serde(rename = "ProgrammableTransaction", default)]
    pub programmable_transaction: Option<ProgrammableTransaction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgrammableTransaction {
    #[serde(default)]
    pub inputs: Vec<ReplayInput>,
    #[serde(default)]
    pub commands: Vec<CommandWithOutput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReplayInput {
    #[serde(default)]
    pub object: Option<ObjectInput>,
    #[serde(default)]
    pub pure: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectInput {
    /// `[id, version, digest]`
    #[serde(default)]
    pub imm_or_owned_object: Option<(String, FlexU64, String)>,
    #[serde(default)]
    pub shared_object: Option<SharedObjectInput>,
    /// `[id, version, digest]`
    #[serde(default)]
    pub receiving: Option<(String, FlexU64, String)>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedObjectInput {
    pub id: String,
    pub initial_shared_version: FlexU64,
    pub mutable: bool,
}

/// A command plus what the replayer observed when running it.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandWithOutput {
    pub command: Command,
    #[serde(rename = "RetVals", default)]
    pub return_values: Vec<Value>,
}

/// Commands are positional tuples keyed by the command name.
#[derive(Debug, Clone, Deserialize)]
pub enum Command {
    MoveCall(MoveCall),
    SplitCoins(Argument, Vec<Argument>),
    TransferObjects(Vec<Argument>, Argument),
    MergeCoins(Argument, Vec<Argument>),
    MakeMoveVec(Option<Value>, Vec<Argument>),
    Publish(Vec<Vec<u8>>, Vec<String>),
    Upgrade(Vec<Vec<u8>>, Vec<String>, String, Argument),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCall {
    pub package: String,
    pub module: String,
    pub function: String,
    #[serde(default)]
    pub type_arguments: Vec<Value>,
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

/// `"GasCoin"`, `{Input: i}`, `{Result: i}` or `{NestedResult: [i, j]}`.
pub type Argument = TagUnion<ArgumentFields>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArgumentFields {
    #[serde(default)]
    pub input: Option<FlexU64>,
    #[serde(default)]
    pub result: Option<FlexU64>,
    #[serde(default)]
    pub nested_result: Option<(FlexU64, FlexU64)>,
}
