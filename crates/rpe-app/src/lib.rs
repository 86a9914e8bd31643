//! Use case orchestration for rpe.
//!
//! This crate provides the application layer: use cases that coordinate the settings, domain,
//! and render layers. It is intentionally thin and delegates heavy lifting to those layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod evaluate;
mod explain;
mod report;
mod snapshot;

pub use evaluate::{EvaluateInput, EvaluateOutput, evaluate_fleet, run_evaluate};
pub use explain::{
    ExplainOutput, PolicySummary, format_explanation, format_not_found, format_policies,
    list_policies, run_explain,
};
pub use report::{parse_report_json, runtime_error_report, serialize_report, verdict_exit_code};
pub use rpe_render::render_markdown;
pub use rpe_types::RpeReport;
pub use snapshot::{SnapshotError, parse_snapshots, snapshot_from_value};
