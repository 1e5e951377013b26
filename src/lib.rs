//! Sui Replay Inspector
//!
//! Tools for interpreting the results of replayed Sui transactions:
//!
//! - **Effects decoding**: V1 and V2 effects normalized into object-change groups
//! - **Gas reports**: exact MIST → SUI costs and gas meter figures
//! - **Input summaries**: inputs classified, command arguments resolved
//! - **Reports**: text and JSON renderings of a whole replay
//!
//! The work happens in [`sui_replay_core`]; the wire and model types live in
//! [`types`]. See [`ReplayOverview`] for the one-call entry point.

pub use sui_replay_core::*;
pub use sui_replay_types as types;
