//! End-to-end interpretation of replay fixtures through the public API.

mod common;

use common::{assert_error_contains, assert_ok, fixture_text, load_replay};
use serde_json::json;
use sui_replay_inspect::types::{
    Argument, ChangeKind, ExecutionOutcome, InputDescriptor, ObjectArg, Owner, SchemaVersion,
    SharedObjectKind,
};
use sui_replay_inspect::{
    decode, format_decimal, inspect_documents, inspect_str, mist_to_sui, parse_replay,
    render_json, render_text, resolve_argument, summarize, summarize_batch, to_decimal,
    GasReportBuilder, InspectConfig, ReplayError, ReplayOverview, ResolvedArgument, Section,
    TextOptions,
};

#[test]
fn test_v2_effects_grouped_by_kind() {
    let replay = load_replay("replay_v2.json");
    let effects = assert_ok(decode(&replay.effects), "decode v2");

    assert_eq!(effects.schema, SchemaVersion::V2);
    assert_eq!(effects.dependencies.len(), 2);
    let gas = effects.gas_object.as_ref().unwrap();
    assert_eq!(gas.kind, ChangeKind::Mutated);
    assert_eq!(gas.reference.digest, "GasOut");

    let created = effects.group(ChangeKind::Created);
    assert_eq!(created.len(), 2);
    assert!(created[0].reference.object_id.ends_with("b2"));
    assert_eq!(created[0].reference.version, 4205);
    assert_eq!(created[0].reference.digest, "NewCoin");
    assert!(!created[0].package);

    let package = &created[1];
    assert!(package.package);
    assert_eq!(package.reference.version, 1);
    assert_eq!(package.reference.digest, "PkgDigest");
    assert_eq!(package.owner, Some(Owner::Immutable));

    let mutated = effects.group(ChangeKind::Mutated);
    assert_eq!(mutated.len(), 1);
    assert_eq!(mutated[0].reference.digest, "GasOut");

    let deleted = effects.group(ChangeKind::Deleted);
    assert_eq!(deleted.len(), 1);
    assert!(deleted[0].owner.is_none());

    let wrapped = effects.group(ChangeKind::Wrapped);
    assert_eq!(wrapped.len(), 1);
    assert_eq!(
        wrapped[0].owner,
        Some(Owner::ObjectOwner {
            object_id: "0xd0".into()
        })
    );

    assert!(effects.group(ChangeKind::Unwrapped).is_empty());

    assert_eq!(effects.unrecognized.len(), 1);
    assert!(effects.unrecognized[0].object_id.ends_with("f6"));
    assert_eq!(effects.total_changes(), 6);

    assert_eq!(effects.shared_notes.len(), 1);
    assert_eq!(
        effects.shared_notes[0].kind,
        SharedObjectKind::ReadOnlyRoot {
            version: 4100,
            digest: "Clock".into()
        }
    );
}

#[test]
fn test_v1_effects_grouped_by_kind() {
    let replay = load_replay("replay_v1.json");
    let effects = assert_ok(decode(&replay.effects), "decode v1");

    assert_eq!(effects.schema, SchemaVersion::V1);
    assert!(effects.group(ChangeKind::Created).is_empty());
    assert_eq!(effects.gas_object.as_ref().unwrap().reference.version, 42);
    assert_eq!(
        effects.dependencies,
        vec!["5Tx9Qw2Er3Ty4Ui5Op6As7Df8Gh9Jk1Lz2Xc3Vb4Nm5"]
    );

    let mutated = effects.group(ChangeKind::Mutated);
    assert_eq!(mutated.len(), 2);
    assert_eq!(mutated[0].reference.version, 42);
    assert_eq!(
        mutated[1].owner,
        Some(Owner::Shared {
            initial_shared_version: 12
        })
    );

    let deleted = effects.group(ChangeKind::Deleted);
    assert_eq!(deleted.len(), 1);
    assert_eq!(
        deleted[0].reference.digest,
        "7gyGAp71YXQRoxmFBaHxofQXAipvgHyBKPyxmdSJxyvz"
    );
    assert!(effects.unrecognized.is_empty());
}

#[test]
fn test_effects_with_both_layouts_rejected() {
    let replay = parse_replay(
        &json!({
            "effects": { "effectsVersion": {
                "created": [],
                "changedObjects": [],
                "lamportVersion": 1
            } }
        })
        .to_string(),
    )
    .unwrap();
    let err = decode(&replay.effects).unwrap_err();
    assert!(matches!(err, ReplayError::UnsupportedSchema { .. }));
}

#[test]
fn test_gas_report_from_fixture() {
    let replay = load_replay("replay_v2.json");
    let gas_used = replay.effects.effects_version.gas_used.clone().unwrap();
    let report = assert_ok(
        GasReportBuilder::new().build(&gas_used, &replay.gas_status),
        "gas report",
    );

    assert_eq!(format_decimal(report.total_cost.as_ref()), "0.00273588");
    assert_eq!(format_decimal(report.computation_cost.as_ref()), "0.00075");
    assert_eq!(format_decimal(report.storage_cost.as_ref()), "0.002964");
    assert_eq!(format_decimal(report.storage_rebate.as_ref()), "0.00097812");
    assert_eq!(
        format_decimal(report.non_refundable_storage_fee.as_ref()),
        "0.00000988"
    );
    assert_eq!(report.gas_price, Some(1000));
    assert_eq!(report.reference_gas_price, Some(750));
    assert_eq!(report.stack_height_high_water_mark, Some(14));
    assert_eq!(report.stack_size_high_water_mark, Some(2048));
    assert_eq!(report.instructions_executed, Some(1337));
    assert_eq!(report.gas_budget, Some(50_000_000));
}

#[test]
fn test_unit_conversion() {
    assert_eq!(
        format_decimal(mist_to_sui(Some("1000000000")).unwrap().as_ref()),
        "1"
    );
    assert_eq!(
        format_decimal(to_decimal(Some("123456789012345678901234567890"), 9).unwrap().as_ref()),
        "123456789012345678901.23456789"
    );
    assert!(mist_to_sui(None).unwrap().is_none());
    let err = mist_to_sui(Some("-5")).unwrap_err();
    assert_error_contains(err, "malformed amount", "signed literal");
}

#[test]
fn test_inputs_and_argument_resolution() {
    let replay = load_replay("replay_v2.json");
    let ptb = replay.transaction_info.programmable_transaction.unwrap();
    let inputs = assert_ok(summarize(&ptb.inputs), "summarize inputs");

    assert_eq!(inputs.len(), 4);
    assert!(matches!(&inputs[0], InputDescriptor::Pure { bytes } if bytes.len() == 8));
    assert!(matches!(
        &inputs[2],
        InputDescriptor::Object(ObjectArg::ImmOrOwned { version: 4100, .. })
    ));
    assert!(matches!(
        &inputs[3],
        InputDescriptor::Object(ObjectArg::Shared { mutable: false, .. })
    ));

    let err = resolve_argument(&Argument::Input { index: 5 }, &inputs, &[]).unwrap_err();
    assert!(matches!(
        err,
        ReplayError::IndexOutOfRange {
            index: 5,
            len: 4,
            ..
        }
    ));

    let resolved = resolve_argument(&Argument::Input { index: 3 }, &inputs, &[]).unwrap();
    assert!(matches!(resolved, ResolvedArgument::Input { index: 3, .. }));
}

#[test]
fn test_overview_of_v2_fixture() {
    let overview = assert_ok(
        inspect_str(&fixture_text("replay_v2.json"), &InspectConfig::default()),
        "inspect v2",
    );

    assert!(overview.is_complete());
    assert_eq!(overview.executed_epoch, Section::Ok(Some(512)));
    assert_eq!(overview.status, Section::Ok(ExecutionOutcome::Success));

    let commands = overview.commands.ok().unwrap();
    assert_eq!(commands.len(), 4);
    assert_eq!(
        commands[2].target.as_deref(),
        Some("0x2::clock::timestamp_ms")
    );
    assert_eq!(
        commands[3].resolved[0],
        ResolvedArgument::NestedResult {
            command: 0,
            position: 0,
            value: json!({ "type": "0x2::coin::Coin<0x2::sui::SUI>", "value": 1000000 })
        }
    );
}

#[test]
fn test_overview_of_v1_failure() {
    let overview = assert_ok(
        inspect_str(&fixture_text("replay_v1.json"), &InspectConfig::default()),
        "inspect v1",
    );
    assert_eq!(
        overview.status,
        Section::Ok(ExecutionOutcome::Failure {
            error: "InsufficientCoinBalance in command 0".into(),
            command: None
        })
    );
    let gas = overview.gas.ok().unwrap();
    assert_eq!(format_decimal(gas.total_cost.as_ref()), "0.00100988");
    assert!(gas.gas_budget.is_none());
}

#[test]
fn test_ambiguous_input_isolated_to_its_sections() {
    let overview = assert_ok(
        inspect_str(&fixture_text("replay_bad_input.json"), &InspectConfig::default()),
        "inspect bad input",
    );
    assert_error_contains(
        overview.inputs.error().unwrap(),
        "ambiguous input at position 0",
        "inputs section",
    );
    assert_eq!(overview.commands.error(), Some("inputs unavailable"));
    assert!(overview.gas.is_ok());
    assert!(overview.effects.is_ok());
    assert_eq!(overview.section_errors().len(), 2);
}

#[test]
fn test_malformed_scalar_fails_only_its_section() {
    let text = fixture_text("replay_v2.json").replace(
        r#""computationCost": "750000""#,
        r#""computationCost": 1.5"#,
    );
    let overview = assert_ok(
        inspect_str(&text, &InspectConfig::default()),
        "inspect with malformed amount",
    );
    assert_error_contains(
        overview.gas.error().unwrap(),
        "malformed amount '1.5'",
        "gas section",
    );
    assert_eq!(overview.section_errors().len(), 1);
    assert!(overview.effects.is_ok());

    let text = fixture_text("replay_v2.json").replace(r#"{ "Input": 3 }"#, r#"{ "Input": 70000 }"#);
    let overview = inspect_str(&text, &InspectConfig::default()).unwrap();
    assert_error_contains(
        overview.commands.error().unwrap(),
        "input index 70000 out of range (4 available)",
        "commands section",
    );
    assert!(overview.inputs.is_ok());
}

#[test]
fn test_batch_matches_single_inspection() {
    let replays = vec![
        load_replay("replay_v1.json"),
        load_replay("replay_v2.json"),
        load_replay("replay_bad_input.json"),
    ];
    let config = InspectConfig::default();
    let summary = summarize_batch(&replays, &config);

    assert_eq!(summary.total, 3);
    assert_eq!(summary.complete, 2);
    assert_eq!(summary.succeeded, 2);
    for (replay, overview) in replays.iter().zip(&summary.overviews) {
        assert_eq!(*overview, ReplayOverview::from_replay(replay, &config));
    }
}

#[test]
fn test_documents_fail_independently() {
    let documents = vec![
        fixture_text("replay_v2.json"),
        "{\"effects\": 3}".to_string(),
    ];
    let results = inspect_documents(&documents, &InspectConfig::default());
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(ReplayError::Json(_))));
}

#[test]
fn test_reports() {
    let overview = inspect_str(&fixture_text("replay_v2.json"), &InspectConfig::default()).unwrap();

    let text = render_text(&overview, &TextOptions::default());
    assert!(text.starts_with("✓ Transaction executed successfully\n"));
    assert!(text.contains("0.00273588 SUI"));
    assert!(text.contains("Unrecognized (1):"));
    assert!(text.contains("[package]"));

    let value: serde_json::Value = serde_json::from_str(&render_json(&overview).unwrap()).unwrap();
    assert_eq!(value["executed_epoch"]["ok"], 512);
    assert_eq!(value["status"]["ok"], "Success");
    assert_eq!(value["effects"]["ok"]["schema"], "V2");
    assert_eq!(value["effects"]["ok"]["groups"]["Created"][1]["package"], true);
}
