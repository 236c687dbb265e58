//! Error types emitted by the caravan CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use caravan_core::{DecodeError, FormatError, ModelError, SolveError};
use thiserror::Error;

/// Errors emitted by the caravan CLI.
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
        field: &'static str,
        env: &'static str,
    },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        feature: &'static str,
        action: &'static str,
    },
    /// `--scale` was given alongside a policy that does not scale.
    #[error("--scale only applies to the scaled-floor distance policy")]
    ScaleWithoutFloorPolicy,
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading the instance file failed.
    #[error("failed to read instance at {path:?}: {source}")]
    ReadInstance {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The instance text does not follow the CVRPLIB layout.
    #[error("failed to parse instance at {path:?}: {source}")]
    ParseInstance {
        path: Utf8PathBuf,
        #[source]
        source: FormatError,
    },
    /// The parsed instance could not be turned into a routing model.
    #[error("failed to build routing model: {0}")]
    Model(#[from] ModelError),
    /// The solver rejected the model or found no feasible assignment.
    #[error("solver failed: {source}")]
    Solve { source: SolveError },
    /// The assignment returned by the solver failed decoding.
    #[error("failed to decode solver assignment: {0}")]
    Decode(#[from] DecodeError),
    /// Writing the solution report failed.
    #[error("failed to write solution report: {0}")]
    WriteOutput(#[source] std::io::Error),
}
