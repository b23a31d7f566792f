//! Desktop window: pick a file, pick a target format, convert.
//!
//! Conversion runs on the UI thread, so the window does not repaint until it
//! finishes.

use crate::format::Format;
use crate::selection::{success_message, Selection, SUCCESS_TITLE, UNSUPPORTED_TITLE};
use crate::{ConvertOptions, Error, FileConverter};
use eframe::egui;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

const TITLE: &str = "File Format Converter";

/// Opens the converter window and blocks until it is closed.
pub fn run(options: ConvertOptions) -> eframe::Result {
    let native = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([500.0, 250.0])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        native,
        Box::new(|_cc| Ok(Box::new(ConverterApp::new(options)))),
    )
}

struct ConverterApp {
    converter: FileConverter,
    selection: Selection,
    path_text: String,
}

impl ConverterApp {
    fn new(options: ConvertOptions) -> Self {
        Self {
            converter: FileConverter::new(options),
            selection: Selection::new(),
            path_text: String::new(),
        }
    }

    fn choose(&mut self, path: String, announce: bool) {
        let choice = self.selection.choose_file(&path);
        self.path_text = path;
        if let (Some(warning), true) = (choice.warning, announce) {
            show_dialog(MessageLevel::Warning, UNSUPPORTED_TITLE, &warning);
        }
    }

    fn browse(&mut self) {
        if let Some(path) = FileDialog::new().set_title("Select a file").pick_file() {
            self.choose(path.display().to_string(), true);
        }
    }

    fn convert(&mut self) {
        // Pick up a path typed without leaving the field.
        if self.selection.path().map(|p| p.display().to_string()) != Some(self.path_text.clone()) {
            self.choose(self.path_text.clone(), false);
        }

        let request = match self.selection.request() {
            Ok(request) => request,
            Err(e) => return show_error(&e),
        };
        match self
            .converter
            .convert(&request.path, request.target.extension())
        {
            Ok(outcome) => show_dialog(MessageLevel::Info, SUCCESS_TITLE, &success_message(&outcome)),
            Err(e) => {
                log::warn!("conversion failed: {}", e);
                show_error(&e);
            }
        }
    }
}

impl eframe::App for ConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(TITLE);
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                ui.label("File:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.path_text).desired_width(320.0),
                );
                if response.lost_focus() {
                    self.choose(self.path_text.clone(), false);
                }
                if ui.button("Browse").clicked() {
                    self.browse();
                }
            });
            ui.add_space(8.0);

            let mut target = self.selection.target();
            let targets = self.selection.targets();
            ui.horizontal(|ui| {
                ui.label("Convert to:");
                egui::ComboBox::from_id_salt("target_format")
                    .selected_text(target.map(Format::extension).unwrap_or(""))
                    .show_ui(ui, |ui| {
                        for format in targets {
                            ui.selectable_value(&mut target, Some(*format), format.extension());
                        }
                    });
            });
            if target != self.selection.target() {
                self.selection.set_target(target);
            }
            ui.add_space(16.0);

            if ui.button("Convert").clicked() {
                self.convert();
            }
        });
    }
}

fn show_error(error: &Error) {
    show_dialog(MessageLevel::Error, error.title(), &error.to_string());
}

fn show_dialog(level: MessageLevel, title: &str, message: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
