use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "assignmated.toml";

#[derive(Parser, Debug, Default)]
#[command(name = "assignmated", version, about = "Assignment tracker sidecar (JSON lines over stdio)")]
pub struct Cli {
    /// Workspace directory to open at startup.
    #[arg(long)]
    pub workspace: Option<PathBuf>,
    /// Config file; defaults to ./assignmated.toml when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Log filter, e.g. "info" or "assignmated=debug".
    #[arg(long = "log")]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub workspace: Option<PathBuf>,
    pub log_filter: String,
    /// Set when the implicit config file was unusable. Logging is not up yet
    /// while settings load, so the caller reports it.
    pub config_warning: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workspace: None,
            log_filter: "info".into(),
            config_warning: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    workspace: Option<PathBuf>,
    log_filter: Option<String>,
}

/// Defaults, then the config file, then the environment, then the command line.
pub fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let explicit = cli.config.is_some();
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    resolve(cli, &path, explicit, |k| std::env::var(k).ok())
}

fn resolve(
    cli: &Cli,
    path: &Path,
    explicit: bool,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match read_file_settings(path, explicit) {
        Ok(Some(file_cfg)) => apply_file(&mut settings, file_cfg),
        Ok(None) => {}
        // Only an explicit --config may stop startup.
        Err(e) if explicit => return Err(e),
        Err(e) => settings.config_warning = Some(format!("{e:#}")),
    }

    apply_env(&mut settings, var);

    if let Some(v) = &cli.workspace {
        settings.workspace = Some(v.clone());
    }
    if let Some(v) = &cli.log_filter {
        settings.log_filter = v.clone();
    }
    Ok(settings)
}

fn read_file_settings(path: &Path, required: bool) -> anyhow::Result<Option<FileSettings>> {
    let raw = match fs::read_to_string(path) {
        Ok(v) => v,
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| {
                format!("failed to read config file {}", path.to_string_lossy())
            })
        }
    };
    let parsed = toml::from_str::<FileSettings>(&raw)
        .with_context(|| format!("invalid config file {}", path.to_string_lossy()))?;
    Ok(Some(parsed))
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.workspace {
        settings.workspace = Some(v);
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("ASSIGNMATE_WORKSPACE").filter(|v| !v.trim().is_empty()) {
        settings.workspace = Some(PathBuf::from(v));
    }
    if let Some(v) = var("ASSIGNMATE_LOG").filter(|v| !v.trim().is_empty()) {
        settings.log_filter = v;
    }
}
