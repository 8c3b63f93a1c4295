use clap::Parser;
use eframe::egui;
use eyre::{Context, Result, eyre};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use openwebui_chat_export::app::{ConverterApp, DEFAULT_OUTPUT_DIR};

/// Convert Open WebUI chat-history JSON exports to plain-text transcripts.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON export file to preselect in the form.
    #[arg(value_name = "EXPORT_JSON")]
    input: Option<PathBuf>,

    /// Output directory to prefill.
    /// Defaults to ./converted_chats if not set in config.
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Path to a specific configuration file.
    /// Defaults to $XDG_CONFIG_HOME/openwebui-chat-export/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
struct FileConfig {
    output_dir: Option<PathBuf>,
}

fn load_file_config(explicit_path: Option<&Path>) -> Result<FileConfig> {
    let path = if let Some(p) = explicit_path {
        if !p.exists() {
            return Err(eyre!("Config file not found: {}", p.display()));
        }
        Some(p.to_path_buf())
    } else {
        // Search: XDG/OS config dir, then nothing
        dirs::config_dir()
            .map(|d| d.join("openwebui-chat-export/config.toml"))
            .filter(|p| p.exists())
    };

    match path {
        None => Ok(FileConfig::default()),
        Some(p) => {
            let content = fs::read_to_string(&p)
                .wrap_err_with(|| format!("Failed to read config: {}", p.display()))?;
            toml::from_str(&content)
                .wrap_err_with(|| format!("Failed to parse config: {}", p.display()))
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // 1. Load config file (CLI path > default path)
    let file_cfg = load_file_config(cli.config.as_deref())?;

    // 2. Resolve output_dir (CLI > Config > Default)
    let output_dir = cli
        .out_dir
        .or(file_cfg.output_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    // 3. Hand both to the form; conversion itself runs from there.
    let app = ConverterApp::new(cli.input, Some(output_dir));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Open WebUI Chat Exporter")
            .with_inner_size([520.0, 320.0])
            .with_min_inner_size([420.0, 260.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Open WebUI Chat Exporter",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|e| eyre!("Failed to start UI: {e}"))
}
