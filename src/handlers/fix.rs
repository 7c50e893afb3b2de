use colored::*;
use std::fs;
use std::path::Path;
use tracing::debug;
use crate::{
    api::InferenceClient,
    apply::{AppliedFix, FixApplier, Prompter, TtyPrompter},
    config::Config,
    error::{FixError, Result},
    renderer::ReportRenderer,
};

/// Runs the whole fix flow against the configured server, confirming on the terminal.
pub async fn handle_fix(file: Option<&Path>, config: &Config) -> Result<AppliedFix> {
    let client = InferenceClient::new(config)?;
    let mut applier = FixApplier::new(TtyPrompter);
    run_fix(&client, file, &mut applier).await
}

/// The server is checked before the argument is examined, and nothing is
/// requested from it unless the check passes.
pub async fn run_fix<P: Prompter>(
    client: &InferenceClient,
    file: Option<&Path>,
    applier: &mut FixApplier<P>,
) -> Result<AppliedFix> {
    client.ensure_available().await?;
    debug!(base_url = client.base_url(), "stage: health checked");

    let path = file.ok_or(FixError::MissingArgument)?;
    let content = fs::read_to_string(path).map_err(|source| FixError::FileReadFailure {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = content.len(), "stage: fix requested");
    let fix = client.request_fix(&content).await?;
    debug!(language = %fix.language, error_type = %fix.error_type, "stage: fix parsed");

    ReportRenderer::print(&fix);

    let applied = applier.apply(path, &fix)?;
    println!("\n{}", "Update successful!".green().bold());
    Ok(applied)
}
