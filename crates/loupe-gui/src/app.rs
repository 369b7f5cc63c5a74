use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc;

use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::scene::Scene;
use crate::states::{ConfigState, UIState};
use crate::worker;

pub struct LoupeApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub ui_state: UIState,
    pub config: ConfigState,
    pub scene: Option<Scene>,
    /// Decoded images keyed by URL.
    pub textures: HashMap<String, egui::TextureHandle>,
    pub show_about: bool,
}

impl LoupeApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone());

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            ui_state: UIState::default(),
            config: ConfigState::default(),
            scene: None,
            textures: HashMap::new(),
            show_about: false,
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::ImageDecoded {
                    url,
                    natural,
                    image,
                } => {
                    let texture = ctx.load_texture(&url, image, egui::TextureOptions::LINEAR);
                    self.textures.insert(url.clone(), texture);
                    self.ui_state.add_log(format!(
                        "Loaded: {url} ({}x{})",
                        natural.width, natural.height
                    ));
                    if let Some(scene) = self.scene.as_mut() {
                        scene.deliver(&url, natural);
                        log_geometry(&mut self.ui_state, scene);
                    }
                }
                WorkerResult::ConfigImported { path, options } => {
                    self.config.apply_options(&options);
                    self.ui_state
                        .add_log(format!("Config imported from {}", path.display()));
                    self.apply_options();
                }
                WorkerResult::FileOpened { path } => {
                    self.open_image(path);
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    pub fn open_image(&mut self, path: PathBuf) {
        self.ui_state.add_log(format!("Opened: {}", path.display()));
        self.ui_state.file_path = Some(path);
        self.config.img.clear();
        self.rebuild_scene();
    }

    /// Throw the current page away and arm a fresh widget on a new one.
    pub fn rebuild_scene(&mut self) {
        self.scene = None;
        let options = self.config.to_options();
        match Scene::build(self.ui_state.file_path.as_deref(), options) {
            Ok(scene) => {
                self.ui_state
                    .add_log(format!("Armed ({})", self.config.to_options().zoom_mode()));
                self.scene = Some(scene);
                self.request_pending();
            }
            Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
        }
        self.ui_state.options_dirty = false;
    }

    /// Push edited options to the widget. A changed `img` needs a new page;
    /// anything else reconfigures the widget in place.
    pub fn apply_options(&mut self) {
        let options = self.config.to_options();
        let Some(scene) = self.scene.as_mut() else {
            self.rebuild_scene();
            return;
        };
        if scene.info().options.img != options.img {
            self.rebuild_scene();
            return;
        }
        match scene.reconfigure(options) {
            Ok(()) => {
                scene.relayout();
                self.ui_state.add_log("Options applied".into());
                log_geometry(&mut self.ui_state, scene);
            }
            Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
        }
        self.request_pending();
        self.ui_state.options_dirty = false;
    }

    pub fn request_pending(&mut self) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        for url in scene.take_pending_urls() {
            self.send_command(WorkerCommand::DecodeImage { url });
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

fn log_geometry(ui_state: &mut UIState, scene: &Scene) {
    let info = scene.info();
    if let (Some(lens), Some(view)) = (info.lens_size(), info.magnified_size()) {
        ui_state.add_log(format!(
            "Lens {:.1}x{:.1}, view {:.0}x{:.0}",
            lens.width, lens.height, view.width, view.height
        ));
    }
}

impl eframe::App for LoupeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        // About dialog
        if self.show_about {
            egui::Window::new("About Loupe")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Loupe");
                        ui.label("Image Magnifier");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
