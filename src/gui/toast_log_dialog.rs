use crate::toast_log::TOAST_LOG_FILE;
use eframe::egui;
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct ToastLogDialog {
    pub open: bool,
    path: PathBuf,
    lines: Vec<String>,
}

impl ToastLogDialog {
    pub fn open(&mut self, data_dir: &Path) {
        self.path = data_dir.join(TOAST_LOG_FILE);
        self.lines = read_last_lines(&self.path, 20);
        self.open = true;
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }
        let mut close = false;
        egui::Window::new("Notification Log")
            .resizable(true)
            .default_size((360.0, 200.0))
            .open(&mut self.open)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.lines.is_empty() {
                        ui.weak("No notifications yet");
                    }
                    for line in &self.lines {
                        ui.label(line);
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button("Refresh").clicked() {
                        self.lines = read_last_lines(&self.path, 20);
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });
        if close {
            self.open = false;
        }
    }
}

pub fn read_last_lines(path: &Path, count: usize) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let mut lines: Vec<String> = content.lines().map(|s| s.to_owned()).collect();
            if lines.len() > count {
                lines.drain(0..lines.len() - count);
            }
            lines
        }
        Err(_) => Vec::new(),
    }
}
