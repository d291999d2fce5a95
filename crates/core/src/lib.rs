//! Core traits and types for the Chitti voice bridge
//!
//! This crate provides foundational types used across all other crates:
//! - Language and script definitions
//! - Core traits for pluggable backends (translation, romanization)
//! - Error types

pub mod error;
pub mod language;
pub mod traits;

pub use error::{Error, Result};
pub use language::{Language, RomanScheme, Script};
pub use traits::{Romanizer, Translator};
