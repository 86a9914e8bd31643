//! Stable DTOs and IDs used across the rpe workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable string IDs for policies, codes, and resource types
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod report;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use report::{
    Evaluation, Finding, ReportEnvelope, ResourceRef, RpeData, RpeReport, SCHEMA_REPORT_V1,
    Severity, ToolMeta, Verdict,
};
