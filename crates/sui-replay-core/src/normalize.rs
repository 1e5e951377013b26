//! Wire → model conversion for the one-of unions.
//!
//! This is the only place that inspects which optional key of a wire union is
//! populated, and where deferred wire integers are validated. Each conversion
//! takes the position of the value in its parent list so an `AmbiguousInput`
//! error can say where it happened.

use sui_replay_types::encoding::FlexU64;
use sui_replay_types::wire::{self, TagUnion};
use sui_replay_types::{
    Argument, Command, IdOperation, ObjectArg, ObjectIn, ObjectOut, Owner, SharedObjectKind,
};

use crate::error::{ensure_single, single, ReplayError, Result};

pub(crate) fn integer(field: &'static str, raw: &FlexU64) -> Result<u64> {
    raw.parse().map_err(|_| malformed(field, raw))
}

pub(crate) fn optional_integer(field: &'static str, raw: Option<&FlexU64>) -> Result<Option<u64>> {
    raw.map(|value| integer(field, value)).transpose()
}

/// Parse an index into a list. Whether it is in range is for the resolver to
/// decide, against the list it indexes.
pub(crate) fn position(field: &'static str, raw: &FlexU64) -> Result<usize> {
    let value = integer(field, raw)?;
    usize::try_from(value).map_err(|_| malformed(field, raw))
}

fn malformed(field: &'static str, raw: &FlexU64) -> ReplayError {
    ReplayError::MalformedInteger {
        field,
        value: raw.as_str().to_string(),
    }
}

pub(crate) fn owner(raw: &wire::EffectsOwner, index: usize) -> Result<Owner> {
    match raw {
        TagUnion::Label(label) if label == "Immutable" => Ok(Owner::Immutable),
        TagUnion::Label(_) => Err(ReplayError::AmbiguousInput {
            what: "owner",
            index,
            found: 0,
        }),
        TagUnion::Fields(fields) => single(
            "owner",
            index,
            [
                fields.address_owner.as_ref().map(|address| Owner::AddressOwner {
                    address: address.clone(),
                }),
                fields.object_owner.as_ref().map(|object_id| Owner::ObjectOwner {
                    object_id: object_id.clone(),
                }),
                fields
                    .shared
                    .as_ref()
                    .map(|shared| {
                        integer("initialSharedVersion", &shared.initial_shared_version)
                            .map(|initial_shared_version| Owner::Shared {
                                initial_shared_version,
                            })
                    })
                    .transpose()?,
            ],
        ),
    }
}

pub(crate) fn id_operation(raw: &wire::IdOperation, index: usize) -> Result<IdOperation> {
    match raw {
        TagUnion::Label(label) => match label.as_str() {
            "None" => Ok(IdOperation::None),
            "Created" => Ok(IdOperation::Created),
            "Deleted" => Ok(IdOperation::Deleted),
            _ => Err(ReplayError::AmbiguousInput {
                what: "idOperation",
                index,
                found: 0,
            }),
        },
        TagUnion::Fields(fields) => {
            ensure_single(
                "idOperation",
                index,
                &[
                    fields.none.is_some(),
                    fields.created.is_some(),
                    fields.deleted.is_some(),
                ],
            )?;
            Ok(if fields.created.is_some() {
                IdOperation::Created
            } else if fields.deleted.is_some() {
                IdOperation::Deleted
            } else {
                IdOperation::None
            })
        }
    }
}

pub(crate) fn object_in(raw: &wire::ObjectIn, index: usize) -> Result<ObjectIn> {
    match raw {
        TagUnion::Label(label) if label == "NotExist" => Ok(ObjectIn::NotExist),
        TagUnion::Label(_) => Err(ReplayError::AmbiguousInput {
            what: "inputState",
            index,
            found: 0,
        }),
        TagUnion::Fields(fields) => {
            ensure_single(
                "inputState",
                index,
                &[fields.not_exist.is_some(), fields.exist.is_some()],
            )?;
            match &fields.exist {
                Some(exist) => Ok(ObjectIn::Exist {
                    digest: exist.digest.clone(),
                    owner: owner(&exist.owner, index)?,
                }),
                None => Ok(ObjectIn::NotExist),
            }
        }
    }
}

pub(crate) fn object_out(raw: &wire::ObjectOut, index: usize) -> Result<ObjectOut> {
    match raw {
        TagUnion::Label(label) if label == "NotExist" => Ok(ObjectOut::NotExist),
        TagUnion::Label(_) => Err(ReplayError::AmbiguousInput {
            what: "outputState",
            index,
            found: 0,
        }),
        TagUnion::Fields(fields) => {
            ensure_single(
                "outputState",
                index,
                &[
                    fields.not_exist.is_some(),
                    fields.object_write.is_some(),
                    fields.package_write.is_some(),
                ],
            )?;
            if let Some(write) = &fields.object_write {
                Ok(ObjectOut::ObjectWrite {
                    digest: write.digest.clone(),
                    owner: owner(&write.owner, index)?,
                })
            } else if let Some(package) = &fields.package_write {
                Ok(ObjectOut::PackageWrite {
                    version: integer("version", &package.version)?,
                    digest: package.digest.clone(),
                })
            } else {
                Ok(ObjectOut::NotExist)
            }
        }
    }
}

pub(crate) fn shared_kind(raw: &wire::UnchangedSharedKind, index: usize) -> Result<SharedObjectKind> {
    let fields = match raw {
        TagUnion::Label(_) => return Ok(SharedObjectKind::Unrecognized),
        TagUnion::Fields(fields) => fields,
    };
    let version = |raw: &Option<FlexU64>| optional_integer("version", raw.as_ref());
    let alternatives = [
        fields
            .read_only_root
            .as_ref()
            .map(|root| {
                integer("version", &root.version).map(|version| SharedObjectKind::ReadOnlyRoot {
                    version,
                    digest: root.digest.clone(),
                })
            })
            .transpose()?,
        version(&fields.mutate_deleted)?.map(|version| SharedObjectKind::MutateDeleted { version }),
        version(&fields.read_deleted)?.map(|version| SharedObjectKind::ReadDeleted { version }),
        version(&fields.cancelled)?.map(|version| SharedObjectKind::Cancelled { version }),
    ];
    // A kind added by a newer node is preserved rather than rejected
    if alternatives.iter().all(Option::is_none) {
        return Ok(SharedObjectKind::Unrecognized);
    }
    single("unchangedSharedKind", index, alternatives)
}

pub(crate) fn argument(raw: &wire::Argument, index: usize) -> Result<Argument> {
    match raw {
        TagUnion::Label(label) if label == "GasCoin" => Ok(Argument::GasCoin),
        TagUnion::Label(_) => Err(ReplayError::AmbiguousInput {
            what: "argument",
            index,
            found: 0,
        }),
        TagUnion::Fields(fields) => single(
            "argument",
            index,
            [
                fields
                    .input
                    .as_ref()
                    .map(|i| position("argument index", i).map(|index| Argument::Input { index }))
                    .transpose()?,
                fields
                    .result
                    .as_ref()
                    .map(|i| position("argument index", i).map(|index| Argument::Result { index }))
                    .transpose()?,
                fields
                    .nested_result
                    .as_ref()
                    .map(|(i, j)| -> Result<Argument> {
                        Ok(Argument::NestedResult {
                            index: position("argument index", i)?,
                            result_index: position("argument index", j)?,
                        })
                    })
                    .transpose()?,
            ],
        ),
    }
}

fn arguments(raw: &[wire::Argument]) -> Result<Vec<Argument>> {
    raw.iter()
        .enumerate()
        .map(|(i, arg)| argument(arg, i))
        .collect()
}

pub(crate) fn object_arg(raw: &wire::ObjectInput, index: usize) -> Result<ObjectArg> {
    single(
        "object input",
        index,
        [
            raw.imm_or_owned_object
                .as_ref()
                .map(|(id, version, digest)| -> Result<ObjectArg> {
                    Ok(ObjectArg::ImmOrOwned {
                        object_id: id.clone(),
                        version: integer("version", version)?,
                        digest: digest.clone(),
                    })
                })
                .transpose()?,
            raw.shared_object
                .as_ref()
                .map(|shared| -> Result<ObjectArg> {
                    Ok(ObjectArg::Shared {
                        object_id: shared.id.clone(),
                        initial_shared_version: integer(
                            "initialSharedVersion",
                            &shared.initial_shared_version,
                        )?,
                        mutable: shared.mutable,
                    })
                })
                .transpose()?,
            raw.receiving
                .as_ref()
                .map(|(id, version, digest)| -> Result<ObjectArg> {
                    Ok(ObjectArg::Receiving {
                        object_id: id.clone(),
                        version: integer("version", version)?,
                        digest: digest.clone(),
                    })
                })
                .transpose()?,
        ],
    )
}

/// Convert a wire command. Argument positions in errors are relative to the
/// argument list they appear in.
pub(crate) fn command(raw: &wire::Command) -> Result<Command> {
    Ok(match raw {
        wire::Command::MoveCall(call) => Command::MoveCall {
            package: call.package.clone(),
            module: call.module.clone(),
            function: call.function.clone(),
            type_arguments: call.type_arguments.clone(),
            arguments: arguments(&call.arguments)?,
        },
        wire::Command::SplitCoins(coin, amounts) => Command::SplitCoins {
            coin: argument(coin, 0)?,
            amounts: arguments(amounts)?,
        },
        wire::Command::TransferObjects(objects, address) => Command::TransferObjects {
            objects: arguments(objects)?,
            address: argument(address, objects.len())?,
        },
        wire::Command::MergeCoins(destination, sources) => Command::MergeCoins {
            destination: argument(destination, 0)?,
            sources: arguments(sources)?,
        },
        wire::Command::MakeMoveVec(type_arg, elements) => Command::MakeMoveVec {
            type_arg: type_arg.clone(),
            elements: arguments(elements)?,
        },
        wire::Command::Publish(modules, dependencies) => Command::Publish {
            modules: modules.clone(),
            dependencies: dependencies.clone(),
        },
        wire::Command::Upgrade(modules, dependencies, package, ticket) => Command::Upgrade {
            modules: modules.clone(),
            dependencies: dependencies.clone(),
            package: package.clone(),
            ticket: argument(ticket, 0)?,
        },
    })
}
