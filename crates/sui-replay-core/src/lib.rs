//! Interpretation of Sui transaction replay results.
//!
//! A replay result is the JSON document a replayer emits after re-executing a
//! transaction: the effects it produced, the gas meter state, and the
//! programmable transaction that ran. This crate turns that document into
//! normalized values a viewer can render directly.
//!
//! ## Components
//!
//! - [`units`]: exact MIST → SUI conversion of integer amount literals
//! - [`effects`]: V1/V2 effects detection and object-change grouping
//! - [`gas`]: gas cost and metering report
//! - [`inputs`]: input classification and command argument resolution
//! - [`status`]: execution success/failure from either status layout
//! - [`overview`]: all of the above for one replay, section by section
//! - [`batch`]: many replays in parallel
//! - [`presentation`]: text and JSON reports
//!
//! ## Example
//!
//! ```no_run
//! use sui_replay_core::{inspect_str, render_text, InspectConfig, TextOptions};
//!
//! let json = std::fs::read_to_string("replay.json").unwrap();
//! let config = InspectConfig::from_env();
//! let overview = inspect_str(&json, &config).unwrap();
//! println!("{}", render_text(&overview, &TextOptions::from_config(&config)));
//! ```
//!
//! All transforms are pure: they read their input and return new values.

pub mod batch;
pub mod config;
pub mod effects;
pub mod error;
pub mod gas;
pub mod inputs;
mod normalize;
pub mod overview;
pub mod presentation;
pub mod status;
pub mod units;

pub use batch::{configure_threads, inspect_documents, summarize_batch, BatchSummary};
pub use config::InspectConfig;
pub use effects::{decode, detect_schema, DecodedEffects};
pub use error::{ReplayError, Result};
pub use gas::{GasReport, GasReportBuilder};
pub use inputs::{
    decode_commands, resolve_argument, summarize, summarize_commands, CommandSummary,
    ResolvedArgument,
};
pub use overview::{inspect_str, parse_replay, ReplayOverview, Section};
pub use presentation::{render_json, render_text, TextOptions};
pub use status::execution_outcome;
pub use units::{format_decimal, mist_to_sui, to_decimal, SUI_DECIMALS};
