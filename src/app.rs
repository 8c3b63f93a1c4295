//! The desktop form: pick an export file, pick an output directory, convert.
//!
//! All session state (which file is selected, where output goes) lives here
//! and is handed to [`crate::export::execute`] as an explicit config; the
//! conversion core never reads form state. Conversion runs synchronously on
//! the UI thread, so the window freezes for the duration of a large export.

use eframe::egui;
use std::path::PathBuf;

use crate::error::ExportError;
use crate::export::{self, ExportConfig, ExportSummary};

pub const DEFAULT_OUTPUT_DIR: &str = "converted_chats";

/// Main application struct: form fields plus the currently shown dialog.
pub struct ConverterApp {
    /// Path of the selected export file, editable as text.
    input_path: String,
    /// Output directory, editable as text.
    output_dir: String,
    /// One-line status shown under the convert button.
    status: String,
    /// Modal dialog, if one is open.
    modal: Option<Modal>,
}

/// The modal dialogs the form can show, mirroring the outcomes of a run.
enum Modal {
    Complete {
        summary: ExportSummary,
        output_dir: PathBuf,
    },
    DocumentError {
        title: &'static str,
        detail: String,
    },
    NoFileSelected,
}

impl ConverterApp {
    pub fn new(input_file: Option<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        Self {
            input_path: input_file.map(|p| p.display().to_string()).unwrap_or_default(),
            output_dir: output_dir
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
            status: String::new(),
            modal: None,
        }
    }

    /// Triggered by the convert button. Validates the form, runs the batch
    /// and routes the outcome to a status line plus a modal.
    fn start_conversion(&mut self) {
        let input = self.input_path.trim();
        if input.is_empty() {
            self.modal = Some(Modal::NoFileSelected);
            return;
        }
        let output_dir = match self.output_dir.trim() {
            "" => DEFAULT_OUTPUT_DIR.to_string(),
            dir => dir.to_string(),
        };
        let config = ExportConfig {
            input_file: PathBuf::from(input),
            output_dir: PathBuf::from(output_dir),
        };

        // Conversion is synchronous, so the next status the user sees is the
        // result; an intermediate "Converting..." would never be painted.
        match export::execute(&config) {
            Ok(summary) => {
                self.status = format!("Converted {} conversations", summary.converted);
                self.modal = Some(Modal::Complete {
                    summary,
                    output_dir: config.output_dir,
                });
            }
            Err(error) => {
                self.status = "Conversion failed".to_string();
                let title = match &error {
                    ExportError::InvalidJson { .. } => "JSON Error",
                    ExportError::Read { .. } => "Read Error",
                    ExportError::CreateDir { .. } => "Output Error",
                };
                self.modal = Some(Modal::DocumentError {
                    title,
                    detail: error.to_string(),
                });
            }
        }
    }

    /// Accept the first `.json` file dropped onto the window as the input.
    /// Take `path` as the selected export file, whether it came from the
    /// picker dialog or drag-and-drop.
    fn select_input_file(&mut self, path: PathBuf) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.input_path = path.display().to_string();
        self.status = format!("Selected: {name}");
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(path) = dropped
            .into_iter()
            .filter_map(|f| f.path)
            .find(|p| p.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")))
        {
            self.select_input_file(path);
        }
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("Open WebUI Chat Export Converter");
        });
        ui.add_space(16.0);

        ui.label("Export file (you can also drop a .json file onto this window):");
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.input_path)
                    .hint_text("all-chats-export.json")
                    .desired_width(ui.available_width() - 80.0),
            );
            if ui.button("Browse...").clicked()
                && let Some(path) = rfd::FileDialog::new()
                    .add_filter("JSON files", &["json"])
                    .pick_file()
            {
                self.select_input_file(path);
            }
        });
        ui.add_space(10.0);

        ui.label("Output directory:");
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.output_dir)
                    .desired_width(ui.available_width() - 80.0),
            );
            if ui.button("Browse...").clicked()
                && let Some(dir) = rfd::FileDialog::new().pick_folder()
            {
                self.output_dir = dir.display().to_string();
            }
        });
        ui.add_space(16.0);

        ui.vertical_centered(|ui| {
            if ui
                .add_sized([180.0, 32.0], egui::Button::new("Convert to TXT"))
                .clicked()
            {
                self.start_conversion();
            }
            ui.add_space(8.0);
            if !self.status.is_empty() {
                ui.label(egui::RichText::new(&self.status).color(egui::Color32::LIGHT_BLUE));
            }
        });
    }

    fn render_modal(&mut self, ctx: &egui::Context) {
        let Some(modal) = &self.modal else { return };

        let (title, body) = match modal {
            Modal::Complete {
                summary,
                output_dir,
            } => {
                let shown = std::path::absolute(output_dir)
                    .unwrap_or_else(|_| output_dir.clone());
                (
                    "Conversion Complete",
                    format!(
                        "Successfully converted {} of {} conversations\nOutput directory: {}",
                        summary.converted,
                        summary.attempted,
                        shown.display()
                    ),
                )
            }
            Modal::DocumentError { title, detail } => (*title, detail.clone()),
            Modal::NoFileSelected => (
                "No File",
                "Please select a JSON export file first".to_string(),
            ),
        };

        let mut close = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(body);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        close = true;
                    }
                });
            });
        if close {
            self.modal = None;
        }
    }
}

impl eframe::App for ConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_form(ui);
        });
        self.render_modal(ctx);
    }
}
