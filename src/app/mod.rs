mod state;
mod ui;

use crate::config::Config;
use crate::upload::{
    collect_folder, read_selection, FileId, HttpTransport, Notify, UploadDispatcher,
};
use eframe::{egui, App};
pub use state::UploadState;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::{debug, info};

pub struct MultiUploader {
    state: UploadState,
    dispatcher: UploadDispatcher,
    notify: Notify,
    // Keeps upload tasks alive for as long as the window is open.
    _runtime: Runtime,
}

impl MultiUploader {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &Config, runtime: Runtime) -> Self {
        info!("Initializing uploader, endpoint {}", config.endpoint);

        let transport = Arc::new(HttpTransport::new(config.endpoint.clone()));
        let dispatcher = UploadDispatcher::new(runtime.handle().clone(), transport);

        let ctx = cc.egui_ctx.clone();
        let notify: Notify = Arc::new(move || ctx.request_repaint());

        Self {
            state: UploadState::default(),
            dispatcher,
            notify,
            _runtime: runtime,
        }
    }

    pub fn select_files(&mut self) {
        if let Some(paths) = rfd::FileDialog::new().pick_files() {
            self.add_paths(paths);
        }
    }

    pub fn select_folder(&mut self) {
        if let Some(folder) = rfd::FileDialog::new().pick_folder() {
            info!("Collecting files under {}", folder.display());
            self.add_paths(collect_folder(&folder));
        }
    }

    pub fn add_paths(&mut self, paths: Vec<PathBuf>) {
        if self.state.is_uploading {
            return;
        }

        let (selected, errors) = read_selection(paths);
        let added = self.state.add_files(selected);
        info!("Selected {} files", added);

        self.state.error_message = match errors.as_slice() {
            [] => None,
            [only] => Some(only.to_string()),
            [first, ..] => Some(format!("{} (and {} more)", first, errors.len() - 1)),
        };
    }

    pub fn remove_file(&mut self, id: FileId) {
        if let Some(removed) = self.state.remove(id) {
            debug!(%id, "Removed {}", removed.file.name);
        }
    }

    pub fn clear_files(&mut self) {
        self.state.clear();
    }

    pub fn start_upload(&mut self) {
        if !self.state.begin_upload(&self.dispatcher, self.notify.clone()) {
            debug!("Upload requested with nothing to do");
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            self.add_paths(dropped);
        }

        if self.state.poll_events() {
            ctx.request_repaint();
        }
    }
}

impl App for MultiUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
