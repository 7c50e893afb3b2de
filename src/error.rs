use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixError {
    #[error("LM Studio server not available. Please ensure it's running at {0}")]
    ServerUnavailable(String),

    #[error("Usage: codefixer <filename>")]
    MissingArgument,

    #[error("Error reading file {}: {source}", path.display())]
    FileReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error building request: {0}")]
    RequestBuildFailure(String),

    #[error("Error contacting inference server: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("API request failed: {status}\nResponse: {body}")]
    NonSuccessStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Error parsing JSON response: {0}")]
    ResponseParseFailure(String),

    #[error("Model returned an empty fix; nothing to apply")]
    EmptyFix,

    #[error("User cancelled the operation")]
    ConfirmationDeclined,

    #[error("Error opening terminal: {0}")]
    TerminalUnavailable(#[source] std::io::Error),

    #[error("Error creating backup {}: {source}", backup.display())]
    BackupRenameFailure {
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error writing fixed code to {}: {source}", path.display())]
    FileWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Build failed: {status}\n{output}")]
    BuildValidationFailure { status: String, output: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl FixError {
    /// Cancellation and a failed build leave the run in a consistent state,
    /// so they exit cleanly. Everything else aborts with status 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            FixError::ConfirmationDeclined | FixError::BuildValidationFailure { .. } => 0,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, FixError>;
