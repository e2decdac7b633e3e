//! Test helpers shared across LawFort crates.

pub mod backend;
pub mod microphone;

pub use backend::{GatedBackend, RecordedCall, Reply, ScriptedBackend, UnreachableBackend};
pub use microphone::{MicrophoneStats, ScriptedMicrophone};
