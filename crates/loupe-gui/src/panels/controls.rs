use loupe_core::config::ZoomPosition;

use crate::app::LoupeApp;
use crate::panels::{enum_combo, section_header};
use crate::scene::ZOOM_BOX_NAME;
use crate::states::ZoomModeChoice;

const LEFT_PANEL_WIDTH: f32 = 280.0;

pub fn show(ctx: &egui::Context, app: &mut LoupeApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                source_section(ui, app);
                ui.separator();
                zoom_section(ui, app);
                ui.separator();
                style_section(ui, app);
                ui.separator();
                actions_section(ui, app);
                ui.separator();
                instance_section(ui, app);
            });
        });
}

/// Checkbox + drag value for an extent that may be left to the image.
fn optional_extent(ui: &mut egui::Ui, label: &str, value: &mut Option<f64>) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        let mut auto = value.is_none();
        if ui.checkbox(&mut auto, format!("{label} auto")).changed() {
            *value = if auto { None } else { Some(400.0) };
            changed = true;
        }
        if let Some(v) = value.as_mut() {
            changed |= ui
                .add(egui::DragValue::new(v).range(1.0..=4000.0).suffix(" px"))
                .changed();
        }
    });
    changed
}

fn source_section(ui: &mut egui::Ui, app: &mut LoupeApp) {
    let file = app
        .ui_state
        .file_path
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned());
    section_header(ui, "Source", file.as_deref());
    ui.add_space(4.0);

    let config = &mut app.config;
    let mut changed = optional_extent(ui, "Width", &mut config.width);
    changed |= optional_extent(ui, "Height", &mut config.height);

    ui.horizontal(|ui| {
        ui.label("Image URL");
        changed |= ui
            .text_edit_singleline(&mut config.img)
            .on_hover_text("Leave empty to zoom the opened file")
            .changed();
    });

    app.ui_state.options_dirty |= changed;
}

fn zoom_section(ui: &mut egui::Ui, app: &mut LoupeApp) {
    section_header(ui, "Magnified View", None);
    ui.add_space(4.0);

    let config = &mut app.config;
    let mut changed = enum_combo(ui, "Mode", &mut config.mode, ZoomModeChoice::ALL);
    match config.mode {
        ZoomModeChoice::Scale => {
            changed |= ui
                .add(egui::Slider::new(&mut config.scale, 0.25..=8.0).text("Scale"))
                .changed();
        }
        ZoomModeChoice::FixedWidth => {
            changed |= ui
                .add(egui::Slider::new(&mut config.zoom_width, 50.0..=1600.0).text("Zoom Width"))
                .changed();
        }
        ZoomModeChoice::AutoFit => {
            ui.small("Sized by the container it is attached to");
        }
    }

    changed |= enum_combo(ui, "Position", &mut config.position, ZoomPosition::ALL);
    ui.horizontal(|ui| {
        ui.label("Offset");
        changed |= ui
            .add(egui::DragValue::new(&mut config.offset_horizontal).prefix("h: "))
            .changed();
        changed |= ui
            .add(egui::DragValue::new(&mut config.offset_vertical).prefix("v: "))
            .changed();
    });

    ui.horizontal(|ui| {
        ui.label("Zoom container");
        changed |= ui
            .text_edit_singleline(&mut config.zoom_container)
            .on_hover_text(format!("Region name, e.g. \"{ZOOM_BOX_NAME}\""))
            .changed();
    });

    app.ui_state.options_dirty |= changed;
}

fn style_section(ui: &mut egui::Ui, app: &mut LoupeApp) {
    section_header(ui, "Styles", None);
    ui.add_space(4.0);

    let config = &mut app.config;
    ui.label("Lens");
    let mut changed = ui
        .add(
            egui::TextEdit::singleline(&mut config.zoom_lens_style)
                .hint_text("opacity: 0.6; background-color: red;"),
        )
        .changed();
    ui.label("Magnified view");
    changed |= ui
        .add(egui::TextEdit::singleline(&mut config.zoom_style).hint_text("opacity: 1;"))
        .changed();

    app.ui_state.options_dirty |= changed;
}

fn actions_section(ui: &mut egui::Ui, app: &mut LoupeApp) {
    let dirty = app.ui_state.options_dirty;
    section_header(ui, "Widget", dirty.then_some("modified"));
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        if ui
            .add_enabled(dirty || app.scene.is_none(), egui::Button::new("Apply"))
            .clicked()
        {
            app.apply_options();
        }
        if ui.button("Kill").clicked() {
            if let Some(scene) = app.scene.as_mut() {
                scene.kill();
                app.ui_state.add_log("Widget torn down".into());
            }
        }
        if ui.button("Setup").clicked() {
            if let Some(scene) = app.scene.as_mut() {
                match scene.rearm() {
                    Ok(()) => {
                        scene.relayout();
                        app.ui_state.add_log("Widget armed".into());
                    }
                    Err(e) => app.ui_state.add_log(format!("ERROR: {e}")),
                }
                app.request_pending();
            }
        }
    });
}

fn instance_section(ui: &mut egui::Ui, app: &mut LoupeApp) {
    section_header(ui, "Instance", None);
    ui.add_space(4.0);

    let Some(scene) = app.scene.as_ref() else {
        ui.small("Open an image to begin");
        return;
    };
    let info = scene.info();

    egui::Grid::new("instance_info").num_columns(2).show(ui, |ui| {
        ui.label("State");
        ui.label(format!("{:?}", info.state));
        ui.end_row();

        ui.label("Mode");
        ui.label(info.options.zoom_mode().to_string());
        ui.end_row();

        if let Some(g) = info.geometry {
            ui.label("Natural");
            ui.label(format!("{}x{}", g.natural.width, g.natural.height));
            ui.end_row();

            ui.label("Lens");
            ui.label(format!("{:.1}x{:.1}", g.metrics.lens.width, g.metrics.lens.height));
            ui.end_row();

            ui.label("View");
            ui.label(format!(
                "{:.0}x{:.0}",
                g.metrics.magnified.width, g.metrics.magnified.height
            ));
            ui.end_row();
        } else {
            ui.label("Image");
            ui.label("pending");
            ui.end_row();
        }

        if let Some(offset) = info.background_offset {
            ui.label("Background");
            ui.label(format!("({:.0}, {:.0})", offset.x, offset.y));
            ui.end_row();
        }

        ui.label("Subscriptions");
        ui.label(info.subscriptions.to_string());
        ui.end_row();
    });
}
