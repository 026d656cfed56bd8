//! Presentation shell: the borderless preview window and its paint cycle.
//!
//! All work runs on the GUI event loop. The watcher thread only queues
//! signals and wakes the loop; scheduling, refreshing, and painting happen
//! here in order, so history mutations are always sequenced before the
//! repaint that shows them.

use std::path::PathBuf;
use std::time::Instant;

use eframe::{CreationContext, egui};
use tracing::{info, warn};

use crate::config::ViewConfig;
use crate::constants::{timing, view};
use crate::fatal;
use crate::refresh::RefreshController;
use crate::render;
use crate::watcher::DirWatcher;

/// Window geometry derived from a config: position plus a column tall enough
/// for a full history, fixed regardless of the current frame count.
pub fn window_geometry(config: &ViewConfig) -> (i32, i32, u32, u32) {
    let (x, y) = config.window_position;
    let (width, height) = config.image_size;
    let total_height = render::column_height(view::HISTORY_CAPACITY, height) as u32;
    (x, y, width, total_height)
}

pub struct PreviewApp {
    controller: RefreshController,
    watcher: Option<DirWatcher>,
    /// One uploaded texture per history frame, newest first.
    textures: Vec<egui::TextureHandle>,
    textures_generation: u64,
    applied_geometry: Option<(i32, i32, u32, u32)>,
}

impl PreviewApp {
    pub fn new(cc: &CreationContext<'_>, config_path: PathBuf, startup: &ViewConfig) -> Self {
        let controller = RefreshController::new(config_path, Instant::now());

        let watch_ctx = cc.egui_ctx.clone();
        let watcher = match DirWatcher::new(move || watch_ctx.request_repaint()) {
            Ok(watcher) => Some(watcher),
            Err(err) => {
                warn!("directory watching unavailable: {err:#}");
                None
            }
        };

        // Wake up in time for the startup refresh
        cc.egui_ctx.request_repaint_after(timing::STARTUP_DELAY);

        Self {
            controller,
            watcher,
            textures: Vec::new(),
            textures_generation: 0,
            applied_geometry: Some(window_geometry(startup)),
        }
    }

    fn rebuild_textures(&mut self, ctx: &egui::Context) {
        self.textures.clear();
        for (i, frame) in self.controller.history().iter().enumerate() {
            let size = [frame.image.width() as usize, frame.image.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, frame.image.as_raw());
            self.textures.push(ctx.load_texture(
                format!("frame-{i}"),
                color_image,
                egui::TextureOptions::LINEAR,
            ));
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        if let Some(watcher) = &self.watcher {
            for _ in 0..watcher.drain_signals() {
                self.controller.schedule(now);
            }
        }

        if let Err(err) = self.controller.poll(now) {
            fatal::report_fatal_error(&err);
        }

        if let Some(dir) = self.controller.watch_dir() {
            if let Some(watcher) = &mut self.watcher {
                watcher.ensure_watched(&dir);
            }
        }

        // The config is re-read on every refresh; follow it if it moved or
        // resized the window.
        if let Some(config) = self.controller.config() {
            let geometry = window_geometry(config);
            if self.applied_geometry != Some(geometry) {
                let (x, y, width, height) = geometry;
                ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
                    x as f32, y as f32,
                )));
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                    width as f32,
                    height as f32,
                )));
                self.applied_geometry = Some(geometry);
                info!(x, y, width, height, "window geometry updated");
            }
        }

        if self.textures_generation != self.controller.generation() {
            self.rebuild_textures(ctx);
            self.textures_generation = self.controller.generation();
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if let Some(config) = self.controller.config() {
                    let slots = render::layout_frames(
                        self.controller.history().len(),
                        config.image_size,
                        config.red_rect,
                        config.green_rect,
                    );
                    render::paint(ui.painter(), &slots, &self.textures);
                }
            });

        // Pending refresh deadlines need a wakeup; watcher signals wake the
        // loop themselves.
        if let Some(deadline) = self.controller.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}
