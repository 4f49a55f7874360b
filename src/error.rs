/*
 * Error Module
 *
 * The simulation itself never fails: degenerate vectors resolve to defined
 * fallbacks inside the step. The only fallible surface is building and
 * loading a parameter set, which is reported through ParamsError.
 */

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("parameter `{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("parameter `{field}` must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("parameter `{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("parameter `{field}` must be at least 1, got {value}")]
    EmptyRange { field: &'static str, value: i32 },

    #[error("failed to read parameter file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse parameter file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
