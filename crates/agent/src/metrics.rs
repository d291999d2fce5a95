//! Metric names emitted by the pipeline
//!
//! Recorded through the `metrics` facade; the server installs the
//! Prometheus recorder.

/// Turns by `outcome` and `stage`
pub const TURNS_TOTAL: &str = "chitti_pipeline_turns_total";
/// Stage latency by `stage`
pub const STAGE_DURATION_SECONDS: &str = "chitti_stage_duration_seconds";
/// Characters sent for translation by `stage`
pub const TRANSLATION_CHARACTERS_TOTAL: &str = "chitti_translation_characters_total";
pub const QUOTA_EXCEEDED_TOTAL: &str = "chitti_quota_exceeded_total";
