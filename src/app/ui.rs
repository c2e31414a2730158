use super::MultiUploader;
use crate::upload::{FileId, FileStatus, TrackedFile};
use crate::utils::file_icon::FileKind;
use crate::utils::file_size::FileSizeUtils;
use eframe::egui::{self, Align, Color32, Layout, RichText};

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const DONE: Color32 = Color32::from_rgb(0, 180, 0);
const ERROR: Color32 = Color32::from_rgb(220, 50, 50);

enum Action {
    SelectFiles,
    SelectFolder,
    Upload,
    Clear,
    Remove(FileId),
}

impl MultiUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(20.0);
            ui.vertical_centered(|ui| {
                ui.heading("File Upload");
                ui.add_space(5.0);
                ui.label(
                    RichText::new("Pick files or drop them on the window")
                        .color(ui.visuals().text_color().gamma_multiply(0.7)),
                );
            });
            ui.add_space(20.0);

            ui.horizontal(|ui| {
                ui.add_enabled_ui(!self.state.is_uploading, |ui| {
                    if ui.button("➕ Select Files").clicked() {
                        action = Some(Action::SelectFiles);
                    }
                    if ui.button("📁 Add Folder").clicked() {
                        action = Some(Action::SelectFolder);
                    }
                });

                ui.add_enabled_ui(self.state.can_act(), |ui| {
                    if ui.button("📤 Upload").clicked() {
                        action = Some(Action::Upload);
                    }
                    if ui.button("🗑 Clear All").clicked() {
                        action = Some(Action::Clear);
                    }
                });

                if self.state.is_uploading {
                    ui.spinner();
                }
            });

            ui.add_space(10.0);

            egui::ScrollArea::vertical()
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    if let Some(id) = file_list(ui, &self.state.files, self.state.is_uploading) {
                        action = Some(Action::Remove(id));
                    }
                });

            if let Some(error) = &self.state.error_message {
                ui.with_layout(Layout::bottom_up(Align::Center), |ui| {
                    ui.add_space(15.0);
                    ui.colored_label(ERROR, error.as_str());
                });
            }
        });

        match action {
            Some(Action::SelectFiles) => self.select_files(),
            Some(Action::SelectFolder) => self.select_folder(),
            Some(Action::Upload) => self.start_upload(),
            Some(Action::Clear) => self.clear_files(),
            Some(Action::Remove(id)) => self.remove_file(id),
            None => {}
        }
    }
}

/// Returns the id whose remove control was clicked. Draws nothing for an
/// empty list.
fn file_list(ui: &mut egui::Ui, files: &[TrackedFile], uploading: bool) -> Option<FileId> {
    if files.is_empty() {
        return None;
    }

    let mut removed = None;
    ui.label(RichText::new("Files:").strong());
    ui.add_space(4.0);
    for tracked in files {
        if file_item(ui, tracked, uploading) {
            removed = Some(tracked.id);
        }
        ui.add_space(6.0);
    }
    removed
}

fn file_item(ui: &mut egui::Ui, tracked: &TrackedFile, uploading: bool) -> bool {
    let mut remove_clicked = false;
    let file = &tracked.file;
    let kind = FileKind::from_mime(&file.mime);

    egui::Frame::group(ui.style())
        .fill(ui.visuals().faint_bg_color)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(kind.icon()).size(32.0));
                ui.vertical(|ui| {
                    ui.label(RichText::new(&file.name).strong());
                    ui.label(
                        RichText::new(format!(
                            "{} - {}",
                            FileSizeUtils::format_size(file.size),
                            file.type_label()
                        ))
                        .small()
                        .weak(),
                    );
                });
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if !uploading && ui.button("✖").on_hover_text("Remove").clicked() {
                        remove_clicked = true;
                    }
                });
            });

            ui.with_layout(Layout::top_down(Align::Max), |ui| {
                status_label(ui, tracked);
            });

            progress_bar(ui, tracked.progress);
        });

    remove_clicked
}

fn status_label(ui: &mut egui::Ui, tracked: &TrackedFile) {
    let text = tracked.status_text();
    match &tracked.status {
        FileStatus::Completed => {
            ui.colored_label(DONE, text);
        }
        FileStatus::Failed(reason) => {
            ui.colored_label(ERROR, text).on_hover_text(reason.as_str());
        }
        FileStatus::Pending | FileStatus::Uploading => {
            ui.label(text);
        }
    }
}

/// Fill width follows `percent` as-is, even outside 0..=100.
fn progress_bar(ui: &mut egui::Ui, percent: u32) {
    let height = 8.0;
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), height),
        egui::Sense::hover(),
    );

    let painter = ui.painter();
    painter.rect_filled(rect, height / 2.0, ui.visuals().extreme_bg_color);

    let mut fill = rect;
    fill.set_width(rect.width() * percent as f32 / 100.0);
    painter.rect_filled(fill, height / 2.0, ACCENT);
}
