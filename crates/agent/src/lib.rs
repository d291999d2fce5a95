//! Translate-query-translate turn pipeline
//!
//! Features:
//! - Staged execution: normalize, filter, forward translate, LLM query,
//!   reverse translate, transliterate
//! - Per-stage fallback into a fully formed degraded result
//! - Quota accounting around every translation call
//! - Composition of speech markup, reprompt and display card

pub mod composer;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod result;

pub use composer::{ComposedResponse, ResponseComposer};
pub use error::{PipelineError, Stage};
pub use pipeline::{PipelineRequest, PipelineSettings, TranslationPipeline};
pub use result::PipelineResult;
