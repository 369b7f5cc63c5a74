use crate::app::LoupeApp;

pub fn show(ctx: &egui::Context, app: &mut LoupeApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            let Some(scene) = app.scene.as_ref() else {
                ui.label("No widget");
                return;
            };
            let info = scene.info();
            ui.label(format!("{:?}", info.state));
            if let Some(display) = info.display_size() {
                ui.separator();
                ui.label(format!("{}x{}", display.width, display.height));
            }
            if let Some(scale) = info.scale() {
                ui.separator();
                ui.label(format!("Scale: {:.2} x {:.2}", scale.x, scale.y));
            }
            if let Some(lens) = info.lens_origin {
                ui.separator();
                ui.label(format!("Lens: ({:.0}, {:.0})", lens.x, lens.y));
            }
        });

        ui.add_space(2.0);
    });
}
