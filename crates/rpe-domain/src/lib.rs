//! Pure policy evaluation (no IO).
//!
//! Input: resource snapshots and an effective config constructed elsewhere.
//! Output: per-policy evaluations, findings for violations, verdict and summary data.

#![forbid(unsafe_code)]

pub mod document;
pub mod exclusion;
pub mod model;
pub mod policies;
pub mod policy;
pub mod report;

mod engine;
mod fingerprint;

pub use engine::{SnapshotOutcome, evaluate, evaluate_all, evaluate_policy, summarize};

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
