#![forbid(unsafe_code)]

//! Core domain model and logic for the yarrow daily hexagram system.
//!
//! This crate provides:
//! - Domain types (lines, casts, daily records, history entries)
//! - Entropy sourcing (OS CSPRNG wrapper with rejection sampling)
//! - Line casting and hexagram encoding (King Wen sequence)
//! - Derivation of related hexagrams (nuclear, shadow, mirror, becoming)
//! - The per-day progressive reveal scheduler
//! - Persistence (current-day slot, append-only history log)

pub mod types;
pub mod error;
pub mod entropy;
pub mod caster;
pub mod codec;
pub mod derivation;
pub mod texts;
pub mod reveal;
pub mod store;
pub mod config;
pub mod logging;
pub mod engine;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use entropy::{Entropy, OsEntropy};
pub use caster::{cast_line, cast_lines};
pub use codec::{encode, to_binary, to_canonical, verify_table};
pub use derivation::derive_cast;
pub use reveal::{Reading, ReadingKind, RevealConfig, Style};
pub use store::StorePaths;
pub use config::Config;
pub use engine::run_invocation;
