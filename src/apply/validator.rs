use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};
use crate::error::{FixError, Result};

#[cfg(unix)]
const NULL_DEVICE: &str = "/dev/null";
#[cfg(windows)]
const NULL_DEVICE: &str = "NUL";

/// Checks that a freshly written file still builds.
pub trait BuildValidator {
    /// Human-readable name, e.g. "Go".
    fn name(&self) -> &str;

    /// Language label the model must report for this validator to run.
    fn language(&self) -> &str;

    fn extensions(&self) -> &[&str];

    fn validate(&self, path: &Path) -> Result<()>;

    fn applies_to(&self, language: &str, path: &Path) -> bool {
        language == self.language()
            && path
                .extension()
                .and_then(OsStr::to_str)
                .map_or(false, |ext| self.extensions().contains(&ext))
    }
}

/// Runs `go build` with the binary discarded.
///
/// Captured output is stdout followed by stderr, not interleaved; `go build`
/// reports compile errors on stderr only.
#[derive(Debug)]
pub struct GoValidator {
    program: PathBuf,
}

impl GoValidator {
    /// Use a specific `go` executable instead of the one on `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for GoValidator {
    fn default() -> Self {
        Self::with_program("go")
    }
}

impl BuildValidator for GoValidator {
    fn name(&self) -> &str {
        "Go"
    }

    fn language(&self) -> &str {
        "go"
    }

    fn extensions(&self) -> &[&str] {
        &["go"]
    }

    fn validate(&self, path: &Path) -> Result<()> {
        info!(program = %self.program.display(), path = %path.display(), "running go build");
        let output = Command::new(&self.program)
            .args(["build", "-o", NULL_DEVICE])
            .arg(path)
            .output()
            .map_err(|e| FixError::BuildValidationFailure {
                status: format!("failed to run {}", self.program.display()),
                output: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Err(FixError::BuildValidationFailure {
            status: output.status.to_string(),
            output: combined,
        })
    }
}

/// Registered validators, searched in order.
pub struct Validators {
    validators: Vec<Box<dyn BuildValidator>>,
}

impl Validators {
    pub fn empty() -> Self {
        Self { validators: Vec::new() }
    }

    pub fn with(mut self, validator: impl BuildValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn find(&self, language: &str, path: &Path) -> Option<&dyn BuildValidator> {
        let found = self
            .validators
            .iter()
            .map(|v| v.as_ref())
            .find(|v| v.applies_to(language, path));
        debug!(language, path = %path.display(), validator = found.map(|v| v.name()), "validator lookup");
        found
    }
}

impl Default for Validators {
    fn default() -> Self {
        Self::empty().with(GoValidator::default())
    }
}
