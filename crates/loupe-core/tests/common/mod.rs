#![allow(dead_code)]

use loupe_core::config::ZoomOptions;
use loupe_core::geometry::{Point, Size};
use loupe_core::headless::HeadlessSurface;
use loupe_core::surface::ElementId;

/// Page position of the container in every fixture.
pub const CONTAINER_ORIGIN: Point = Point { x: 100.0, y: 50.0 };

pub const IMAGE_URL: &str = "photos/1.jpg";

/// A surface with one 400x250 container holding an image child.
///
/// `natural` is `None` to model an image whose data has not arrived.
pub struct Page {
    pub surface: HeadlessSurface,
    pub container: ElementId,
    pub image: ElementId,
}

pub fn page_with_image(natural: Option<Size>) -> Page {
    let mut surface = HeadlessSurface::new();
    let container = surface.add_region(
        None,
        "container",
        CONTAINER_ORIGIN,
        Size::new(400.0, 250.0),
    );
    let image = surface.add_image(container, IMAGE_URL, natural);
    Page {
        surface,
        container,
        image,
    }
}

/// An empty container; the image is expected to come from `img`.
pub fn empty_page() -> (HeadlessSurface, ElementId) {
    let mut surface = HeadlessSurface::new();
    let container = surface.add_region(
        None,
        "container",
        CONTAINER_ORIGIN,
        Size::new(400.0, 250.0),
    );
    surface.register_resource(IMAGE_URL, Size::new(800.0, 500.0));
    (surface, container)
}

/// `width: 400, height: 250, zoomWidth: 500`.
pub fn fixed_width_options() -> ZoomOptions {
    ZoomOptions {
        width: Some(400.0),
        height: Some(250.0),
        zoom_width: Some(500.0),
        ..ZoomOptions::default()
    }
}

/// Viewport position of a point given in container-local coordinates.
pub fn client(local_x: f64, local_y: f64) -> Point {
    Point::new(CONTAINER_ORIGIN.x + local_x, CONTAINER_ORIGIN.y + local_y)
}
