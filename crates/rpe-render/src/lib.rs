//! Rendering utilities for human-facing surfaces.

#![forbid(unsafe_code)]

mod markdown;

pub use markdown::render_markdown;
