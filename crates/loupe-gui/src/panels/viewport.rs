use loupe_core::geometry::{Point, Size};
use loupe_core::headless::ElementRecord;
use loupe_core::style::StyleOverrides;
use loupe_core::surface::{ElementId, Surface};

use crate::app::LoupeApp;
use crate::convert::css_color;
use crate::scene::Scene;

pub fn show(ctx: &egui::Context, app: &mut LoupeApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let Some(scene) = app.scene.as_mut() else {
            show_placeholder(ui);
            return;
        };

        let content = to_vec2(scene.content_size());
        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let (page, _) = ui.allocate_exact_size(content, egui::Sense::hover());
                let viewport = ui.clip_rect();

                // Page scrolled by the distance between its top-left and the
                // visible area's top-left.
                let scroll = viewport.min - page.min;
                scene.scroll_to(Point::new(scroll.x as f64, scroll.y as f64));

                let pointer = ui
                    .input(|i| i.pointer.hover_pos())
                    .filter(|p| viewport.contains(*p))
                    .map(|p| {
                        let client = p - viewport.min;
                        Point::new(client.x as f64, client.y as f64)
                    });
                scene.pointer(pointer);

                draw_scene(ui, scene, &app.textures, viewport.min);
            });
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn to_vec2(size: Size) -> egui::Vec2 {
    egui::vec2(size.width as f32, size.height as f32)
}

/// Screen rectangle of `element`; `viewport` is the screen position of the
/// viewport origin.
fn screen_rect(scene: &Scene, element: ElementId, viewport: egui::Pos2) -> egui::Rect {
    let surface = scene.surface();
    let origin = surface.viewport_origin(element);
    let size = surface.rendered_size(element);
    egui::Rect::from_min_size(
        viewport + egui::vec2(origin.x as f32, origin.y as f32),
        to_vec2(size),
    )
}

fn draw_scene(
    ui: &egui::Ui,
    scene: &Scene,
    textures: &std::collections::HashMap<String, egui::TextureHandle>,
    viewport: egui::Pos2,
) {
    let info = scene.info();
    let surface = scene.surface();
    let painter = ui.painter();

    if info.options.zoom_container.is_some() {
        let zoom_box = screen_rect(scene, scene.zoom_box(), viewport);
        painter.rect_stroke(
            zoom_box,
            0.0,
            egui::Stroke::new(1.0, egui::Color32::from_gray(80)),
            egui::StrokeKind::Inside,
        );
    }

    let Some(source) = info.source else {
        return;
    };
    let texture = surface
        .image_url(source)
        .and_then(|url| textures.get(&url))
        .map(|t| t.id());

    let source_rect = screen_rect(scene, source, viewport);
    match texture {
        Some(id) if info.is_loaded() => {
            draw_image(ui, id, source_rect, full_uv(), egui::Color32::WHITE)
        }
        _ => draw_loading(ui, source_rect),
    }

    if let Some(lens) = info.lens.and_then(|id| surface.element(id).map(|r| (id, r))) {
        draw_lens(ui, scene, lens, viewport);
    }
    if let (Some(id), Some(texture)) = (info.magnified, texture) {
        if let Some(record) = surface.element(id) {
            draw_magnified(ui, scene, (id, record), texture, viewport);
        }
    }
}

fn full_uv() -> egui::Rect {
    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0))
}

fn draw_image(
    ui: &egui::Ui,
    texture_id: egui::TextureId,
    rect: egui::Rect,
    uv: egui::Rect,
    tint: egui::Color32,
) {
    ui.painter().image(texture_id, rect, uv, tint);
}

fn draw_loading(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(45));
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Loading...",
        egui::FontId::proportional(14.0),
        egui::Color32::from_gray(140),
    );
}

fn opacity(style: &StyleOverrides) -> f32 {
    style
        .get_f64("opacity")
        .map(|o| o.clamp(0.0, 1.0) as f32)
        .unwrap_or(1.0)
}

fn fill_color(style: &StyleOverrides) -> Option<egui::Color32> {
    style
        .get("background-color")
        .or_else(|| style.get("background"))
        .and_then(css_color)
}

fn draw_lens(
    ui: &egui::Ui,
    scene: &Scene,
    (id, record): (ElementId, &ElementRecord),
    viewport: egui::Pos2,
) {
    if !record.visibility.is_visible() {
        return;
    }
    let rect = screen_rect(scene, id, viewport);
    let color = fill_color(&record.style).unwrap_or(egui::Color32::WHITE);
    ui.painter()
        .rect_filled(rect, 0.0, color.gamma_multiply(opacity(&record.style)));
    ui.painter().rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_white_alpha(160)),
        egui::StrokeKind::Outside,
    );
}

/// Crop of the background image shown through the view. The background is
/// drawn at its own size, shifted left and up by the offset.
fn background_uv(record: &ElementRecord, view: egui::Vec2) -> Option<egui::Rect> {
    let background = record.background.as_ref()?;
    if !background.size.is_positive() {
        return None;
    }
    let offset = record.background_offset.unwrap_or(Point::ZERO);
    let w = background.size.width as f32;
    let h = background.size.height as f32;
    let min = egui::pos2(offset.x as f32 / w, offset.y as f32 / h);
    Some(egui::Rect::from_min_size(min, egui::vec2(view.x / w, view.y / h)))
}

fn draw_magnified(
    ui: &egui::Ui,
    scene: &Scene,
    (id, record): (ElementId, &ElementRecord),
    texture: egui::TextureId,
    viewport: egui::Pos2,
) {
    if !record.visibility.is_visible() {
        return;
    }
    let rect = screen_rect(scene, id, viewport);
    let Some(uv) = background_uv(record, rect.size()) else {
        return;
    };
    let alpha = opacity(&record.style);

    if let Some(color) = fill_color(&record.style) {
        ui.painter()
            .rect_filled(rect, 0.0, color.gamma_multiply(alpha));
    }
    // Parts of the crop outside [0, 1] stay empty rather than repeating.
    let clipped = uv.intersect(full_uv());
    if clipped.is_positive() {
        let sub = egui::Rect::from_min_max(
            rect.min + (clipped.min - uv.min) / uv.size() * rect.size(),
            rect.min + (clipped.max - uv.min) / uv.size() * rect.size(),
        );
        draw_image(ui, texture, sub, clipped, egui::Color32::WHITE.gamma_multiply(alpha));
    }
    ui.painter().rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(120)),
        egui::StrokeKind::Outside,
    );
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open an image to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
