use loupe_core::config::ZoomOptions;

use crate::app::LoupeApp;
use crate::messages::WorkerResult;
use crate::states::ConfigState;

const OPEN_SHORTCUT: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
const QUIT_SHORTCUT: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

pub fn show(ctx: &egui::Context, app: &mut LoupeApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open = egui::Button::new("Open Image...")
                    .shortcut_text(ctx.format_shortcut(&OPEN_SHORTCUT));
                if ui.add(open).clicked() {
                    ui.close();
                    open_file(ctx, app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(ctx, app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(ctx, app);
                }

                ui.separator();

                let quit = egui::Button::new("Quit")
                    .shortcut_text(ctx.format_shortcut(&QUIT_SHORTCUT));
                if ui.add(quit).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Defaults").clicked() {
                    ui.close();
                    app.config = ConfigState::default();
                    app.ui_state.add_log("Options reset to defaults".into());
                    app.apply_options();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&OPEN_SHORTCUT)) {
            open_file(ctx, app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&QUIT_SHORTCUT)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn open_file(ctx: &egui::Context, app: &mut LoupeApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = result_tx.send(WorkerResult::FileOpened { path });
            ctx.request_repaint();
        }
    });
}

fn import_config(ctx: &egui::Context, app: &mut LoupeApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result: Result<ZoomOptions, String> = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| toml::from_str(&content).map_err(|e| e.to_string()));
        let message = match result {
            Ok(options) => WorkerResult::ConfigImported { path, options },
            Err(e) => WorkerResult::Error {
                message: format!("Invalid config {}: {e}", path.display()),
            },
        };
        let _ = result_tx.send(message);
        ctx.request_repaint();
    });
}

fn export_config(ctx: &egui::Context, app: &mut LoupeApp) {
    let options = app.config.to_options();
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();

    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("loupe.toml")
            .save_file()
        else {
            return;
        };
        let message = match toml::to_string_pretty(&options)
            .map_err(|e| e.to_string())
            .and_then(|content| std::fs::write(&path, content).map_err(|e| e.to_string()))
        {
            Ok(()) => WorkerResult::Log {
                message: format!("Config exported to {}", path.display()),
            },
            Err(e) => WorkerResult::Error {
                message: format!("Failed to export config: {e}"),
            },
        };
        let _ = result_tx.send(message);
        ctx.request_repaint();
    });
}
