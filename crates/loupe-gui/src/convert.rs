use image::RgbaImage;

/// Convert a decoded RGBA image to an egui ColorImage.
pub fn rgba_to_color_image(image: &RgbaImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

/// Resolve a style color value. Only hex notation and a few names are known.
pub fn css_color(value: &str) -> Option<egui::Color32> {
    let value = value.trim();
    if value.starts_with('#') {
        return egui::Color32::from_hex(value).ok();
    }
    let color = match value.to_ascii_lowercase().as_str() {
        "white" => egui::Color32::WHITE,
        "black" => egui::Color32::BLACK,
        "red" => egui::Color32::RED,
        "green" => egui::Color32::GREEN,
        "blue" => egui::Color32::BLUE,
        "yellow" => egui::Color32::YELLOW,
        "gray" | "grey" => egui::Color32::GRAY,
        "transparent" => egui::Color32::TRANSPARENT,
        _ => return None,
    };
    Some(color)
}
