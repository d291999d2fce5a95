//! Core traits for pluggable backends

mod text_processing;

pub use text_processing::{Romanizer, Translator};
