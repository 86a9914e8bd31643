//! Config parsing and policy resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{ExclusionsConfig, PolicyConfig, RpeConfigV1};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `rpe.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<RpeConfigV1> {
    let cfg: RpeConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Parse a JSON configuration document into a typed model.
pub fn parse_config_json(input: &str) -> anyhow::Result<RpeConfigV1> {
    let cfg: RpeConfigV1 = serde_json::from_str(input)?;
    Ok(cfg)
}

/// Parse either format: input whose first non-blank character is `{` is read as JSON.
///
/// Blank input yields the default (empty) config.
pub fn parse_config(input: &str) -> anyhow::Result<RpeConfigV1> {
    let trimmed = input.trim_start();
    if trimmed.is_empty() {
        Ok(RpeConfigV1::default())
    } else if trimmed.starts_with('{') {
        parse_config_json(input)
    } else {
        parse_config_toml(input)
    }
}

/// Resolve the effective config used by the engine (defaults + per-policy config + overrides).
pub fn resolve_config(cfg: RpeConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

/// JSON Schema for `RpeConfigV1`, pretty-printed.
pub fn config_schema_json() -> anyhow::Result<String> {
    let schema = schemars::schema_for!(RpeConfigV1);
    Ok(serde_json::to_string_pretty(&schema)?)
}
