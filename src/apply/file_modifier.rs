use chrono::{DateTime, Local};
use colored::*;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use crate::api::CodeFix;
use crate::apply::prompter::Prompter;
use crate::apply::validator::Validators;
use crate::error::{FixError, Result};

pub const CONFIRM_QUESTION: &str = "\nApply these changes? [y/N]: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Passed { validator: String },
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedFix {
    pub backup_path: PathBuf,
    pub validation: Validation,
}

/// Confirms, backs up, writes and optionally builds a single fix.
pub struct FixApplier<P: Prompter> {
    prompter: P,
    validators: Validators,
}

impl<P: Prompter> FixApplier<P> {
    pub fn new(prompter: P) -> Self {
        Self::with_validators(prompter, Validators::default())
    }

    pub fn with_validators(prompter: P, validators: Validators) -> Self {
        Self { prompter, validators }
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// The original is renamed to the backup before the fix is written, so at
    /// every point either the backup or the original holds the old content.
    /// A failed build leaves the new file in place; the backup is the recovery path.
    pub fn apply(&mut self, path: &Path, fix: &CodeFix) -> Result<AppliedFix> {
        if fix.fixed_code.trim().is_empty() {
            return Err(FixError::EmptyFix);
        }

        debug!(path = %path.display(), "stage: confirm prompted");
        if !self.prompter.confirm(CONFIRM_QUESTION)? {
            debug!("stage: cancelled");
            return Err(FixError::ConfirmationDeclined);
        }

        let backup_path = backup_path_for(path, &Local::now());
        create_backup(path, &backup_path)?;
        debug!(backup = %backup_path.display(), "stage: backed up");

        write_fixed(path, &fix.fixed_code).map_err(|source| FixError::FileWriteFailure {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = fix.fixed_code.len(), "stage: written");

        println!("\n{} {}", "Backup saved to".dimmed(), backup_path.display());

        let validation = match self.validators.find(&fix.language, path) {
            Some(validator) => {
                println!("\n{}", format!("Validating {} code...", validator.name()).yellow());
                if let Err(e) = validator.validate(path) {
                    warn!(path = %path.display(), "stage: validation failed");
                    return Err(e);
                }
                println!("{}", "Code compiled successfully!".green());
                debug!("stage: validated ok");
                Validation::Passed { validator: validator.name().to_string() }
            }
            None => Validation::Skipped,
        };

        Ok(AppliedFix { backup_path, validation })
    }
}

/// `<path>.<YYYYMMDDHHMMSS>.bak`, next to the original.
pub fn backup_path_for(path: &Path, now: &DateTime<Local>) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{}.bak", now.format("%Y%m%d%H%M%S")));
    PathBuf::from(name)
}

fn create_backup(path: &Path, backup: &Path) -> Result<()> {
    // Refuses a backup name that is already taken, e.g. a second run within
    // the same second. Not atomic with the rename: a file created in between
    // is still replaced, as the target is assumed to be ours alone.
    if backup.exists() {
        return Err(FixError::BackupRenameFailure {
            backup: backup.to_path_buf(),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "backup file already exists"),
        });
    }

    fs::rename(path, backup).map_err(|source| FixError::BackupRenameFailure {
        backup: backup.to_path_buf(),
        source,
    })
}

fn write_fixed(path: &Path, content: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options.open(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}
