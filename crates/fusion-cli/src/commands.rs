use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result, anyhow, bail};

use fusion_cli::preferences::{
    Preferences, default_preferences_path, load_preferences, save_preferences,
};
use fusion_core::{FusionError, FusionOutcome, run_fusion};
use fusion_model::{FusionConfig, FusionEvent};

use crate::cli::RunArgs;
use crate::progress::EventRenderer;

/// Runs one fusion job on a worker thread while rendering its events.
///
/// Preferences are saved after the attempt whether or not it succeeded,
/// including attempts that stop because the configuration is incomplete.
pub fn run_fusion_command(args: &RunArgs, preferences: Option<&Path>) -> Result<FusionOutcome> {
    let preferences_path = resolve_preferences_path(preferences);
    let stored = match &preferences_path {
        Some(path) => load_preferences(path)?,
        None => Preferences::default(),
    };
    let attempted = attempted_preferences(args, &stored);
    let result = resolve_config(&attempted).and_then(run_on_worker);

    if let Some(path) = &preferences_path
        && let Err(error) = save_preferences(path, &attempted)
    {
        tracing::warn!(error = %format!("{error:#}"), "failed to save preferences");
    }

    result
}

fn run_on_worker(config: FusionConfig) -> Result<FusionOutcome> {
    tracing::info!(
        input = %config.input_folder.display(),
        output = %config.output_file.display(),
        mode = %config.mode,
        "starting fusion"
    );

    let (sender, receiver) = mpsc::channel();
    let worker = spawn_fusion(config, sender)?;
    EventRenderer::new().drain(&receiver);
    let outcome = worker
        .join()
        .map_err(|_| anyhow!("the fusion worker stopped unexpectedly"))??;
    Ok(outcome)
}

/// Prints the stored preferences as JSON.
pub fn run_prefs(preferences: Option<&Path>) -> Result<()> {
    let Some(path) = resolve_preferences_path(preferences) else {
        bail!("no configuration directory is available on this platform; pass --preferences");
    };
    let stored = load_preferences(&path)?;
    println!("Preferences: {}", path.display());
    println!(
        "{}",
        serde_json::to_string_pretty(&stored).context("failed to serialize preferences")?
    );
    Ok(())
}

fn spawn_fusion(
    config: FusionConfig,
    sender: mpsc::Sender<FusionEvent>,
) -> Result<JoinHandle<Result<FusionOutcome, FusionError>>> {
    thread::Builder::new()
        .name("fusion-worker".into())
        .spawn(move || run_fusion(&config, &sender))
        .context("failed to start the fusion worker")
}

fn resolve_preferences_path(explicit: Option<&Path>) -> Option<PathBuf> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(default_preferences_path);
    if path.is_none() {
        tracing::warn!("no configuration directory available, preferences are not remembered");
    }
    path
}

/// Command-line values win; anything omitted comes from the stored preferences.
pub fn attempted_preferences(args: &RunArgs, stored: &Preferences) -> Preferences {
    Preferences {
        input_folder: args.input.clone().or_else(|| stored.input_folder.clone()),
        output_file: args.output.clone().or_else(|| stored.output_file.clone()),
        mode: Some(
            args.mode
                .map_or_else(|| stored.mode_or_default(), Into::into),
        ),
    }
}

/// Builds the job configuration, failing when the folder or output is unknown.
pub fn resolve_config(preferences: &Preferences) -> Result<FusionConfig> {
    let Some(input_folder) = preferences.input_folder.clone() else {
        bail!("no input folder given; pass --input DIR");
    };
    let Some(output_file) = preferences.output_file.clone() else {
        bail!("no output file given; pass --output FILE");
    };
    Ok(FusionConfig::new(
        input_folder,
        output_file,
        preferences.mode_or_default(),
    ))
}
