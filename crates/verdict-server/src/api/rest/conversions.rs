//! Type conversion utilities

use super::types::{RecordPayload, RequestOptions};
use std::time::Duration;
use verdict_core::{Record, Value};
use verdict_engine::EvaluationOptions;

/// Convert a wire record into an engine record
pub(super) fn to_record(payload: RecordPayload) -> Record {
    payload
        .into_iter()
        .map(|(k, v)| (k, Value::from(v)))
        .collect()
}

/// Engine options implied by the request options
pub(super) fn to_engine_options(options: &RequestOptions) -> EvaluationOptions {
    let mut engine = EvaluationOptions::default();
    engine.stop_on_first_match = options.stop_on_first_match;
    engine
}

/// Request deadline, if any
pub(super) fn deadline(options: &RequestOptions) -> Option<Duration> {
    options.timeout_ms.map(Duration::from_millis)
}
