//! Error types emitted by the Ridepark CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use ridepark_core::EngineError;
use thiserror::Error;

/// Errors emitted by the Ridepark CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag or positional name.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// The path being inspected.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Engine tuning overrides were rejected.
    #[error("invalid park tuning: {0}")]
    InvalidTuning(#[source] EngineError),
    /// Opening the layout file failed.
    #[error("failed to open park layout at {path:?}: {source}")]
    OpenLayout {
        /// Layout path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Layout JSON could not be decoded.
    #[error("failed to parse park layout JSON at {path:?}: {source}")]
    ParseLayout {
        /// Layout path.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The engine rejected an entry of the layout.
    #[error("park layout in {path:?} is invalid: {source}")]
    BuildPark {
        /// Layout path.
        path: Utf8PathBuf,
        /// Engine rejection.
        #[source]
        source: EngineError,
    },
    /// The engine rejected the query itself.
    #[error("{command} failed: {source}")]
    Query {
        /// Subcommand that ran the query.
        command: &'static str,
        /// Engine rejection.
        #[source]
        source: EngineError,
    },
    /// Serialising the command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
