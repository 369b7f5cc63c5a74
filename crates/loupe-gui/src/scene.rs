//! The page the widget lives on: a retained in-memory surface holding one
//! container, an optional host image and a spare region that can act as an
//! alternate zoom container. egui draws it each frame from the surface's
//! element records.

use std::collections::HashSet;
use std::path::Path;

use loupe_core::config::ZoomOptions;
use loupe_core::controller::{ImageZoom, InstanceInfo};
use loupe_core::error::Result;
use loupe_core::geometry::{Point, Size};
use loupe_core::headless::HeadlessSurface;
use loupe_core::surface::{ElementId, Surface, ZoomEvent};
use tracing::debug;

/// Gap around the container inside the page.
pub const PAGE_MARGIN: f64 = 40.0;
/// Region name an options file can use as `zoomContainer`.
pub const ZOOM_BOX_NAME: &str = "zoom-box";

const ZOOM_BOX_SIZE: Size = Size {
    width: 320.0,
    height: 320.0,
};
const PLACEHOLDER_SIZE: Size = Size {
    width: 400.0,
    height: 300.0,
};

pub struct Scene {
    zoom: ImageZoom<HeadlessSurface>,
    zoom_box: ElementId,
    hovering: bool,
    last_client: Option<Point>,
    scroll: Point,
    requested: HashSet<String>,
}

impl Scene {
    /// Build a page around `file` (ignored when `options.img` is set) and
    /// arm a widget on it.
    pub fn build(file: Option<&Path>, options: ZoomOptions) -> Result<Self> {
        let mut surface = HeadlessSurface::new();
        let container_size = Size::new(
            options.display_width().unwrap_or(PLACEHOLDER_SIZE.width),
            options.display_height().unwrap_or(PLACEHOLDER_SIZE.height),
        );
        let container = surface.add_region(
            None,
            "container",
            Point::new(PAGE_MARGIN, PAGE_MARGIN),
            container_size,
        );
        let zoom_box = surface.add_region(
            None,
            ZOOM_BOX_NAME,
            Point::new(PAGE_MARGIN, 2.0 * PAGE_MARGIN + container_size.height),
            ZOOM_BOX_SIZE,
        );
        if options.img.is_none() {
            if let Some(path) = file {
                surface.add_image(container, &path.display().to_string(), None);
            }
        }

        let zoom = ImageZoom::attach(surface, container, options)?;
        Ok(Self {
            zoom,
            zoom_box,
            hovering: false,
            last_client: None,
            scroll: Point::ZERO,
            requested: HashSet::new(),
        })
    }

    pub fn info(&self) -> InstanceInfo {
        self.zoom.instance_info()
    }

    pub fn surface(&self) -> &HeadlessSurface {
        self.zoom.surface()
    }

    pub fn zoom_box(&self) -> ElementId {
        self.zoom_box
    }

    pub fn reconfigure(&mut self, options: ZoomOptions) -> Result<()> {
        self.hovering = false;
        self.last_client = None;
        self.zoom.reconfigure(options)
    }

    pub fn kill(&mut self) {
        self.hovering = false;
        self.zoom.kill();
    }

    pub fn rearm(&mut self) -> Result<()> {
        self.hovering = false;
        self.zoom.setup()
    }

    /// Complete every pending image whose data is already known and return
    /// the URLs the decoder still has to fetch. Each URL is returned once.
    pub fn take_pending_urls(&mut self) -> Vec<String> {
        let mut urls = Vec::new();
        for image in self.zoom.surface().pending_images() {
            if self.zoom.surface_mut().finish_loading(image) {
                self.finish_load(image);
                continue;
            }
            if let Some(url) = self.zoom.surface().image_url(image) {
                if self.requested.insert(url.clone()) {
                    urls.push(url);
                }
            }
        }
        urls
    }

    /// Hand decoded image data to every image waiting for `url`.
    pub fn deliver(&mut self, url: &str, natural: Size) {
        self.zoom.surface_mut().register_resource(url, natural);
        for image in self.zoom.surface().pending_images() {
            if self.zoom.surface().image_url(image).as_deref() == Some(url)
                && self.zoom.surface_mut().finish_loading(image)
            {
                self.finish_load(image);
            }
        }
    }

    fn finish_load(&mut self, image: ElementId) {
        let Some(status) = self.zoom.surface().image_status(image) else {
            return;
        };
        let options = self.zoom.options();
        let size = Size::new(
            options.display_width().unwrap_or(status.natural.width),
            options.display_height().unwrap_or(status.natural.height),
        );
        let container = self.zoom.container();
        self.zoom
            .surface_mut()
            .set_size(container, Some(size.width), Some(size.height));
        self.zoom.handle_event(ZoomEvent::ImageLoaded);
        self.relayout();
    }

    /// Move the container so a view placed left of or above it stays on
    /// the page, and keep the zoom box below it.
    pub fn relayout(&mut self) {
        let info = self.zoom.instance_info();
        let detached = info.options.zoom_container.is_some();
        let (dx, dy) = match info.geometry {
            Some(g) if !detached => (
                (-g.magnified_origin.x).max(0.0),
                (-g.magnified_origin.y).max(0.0),
            ),
            _ => (0.0, 0.0),
        };
        let container = self.zoom.container();
        let origin = Point::new(PAGE_MARGIN + dx, PAGE_MARGIN + dy);
        let current = self.page_origin(container);
        if current == origin {
            return;
        }

        debug!(x = origin.x, y = origin.y, "Container moved");
        let display = info.display_size().unwrap_or(PLACEHOLDER_SIZE);
        let below = Point::new(PAGE_MARGIN, origin.y + display.height + PAGE_MARGIN);
        let zoom_box = self.zoom_box;
        let surface = self.zoom.surface_mut();
        surface.set_position(container, origin);
        surface.set_position(zoom_box, below);
        // Cached page offsets are stale now, same as after a scroll.
        self.zoom.handle_event(ZoomEvent::Scroll);
    }

    /// Report the scroll position of the page.
    pub fn scroll_to(&mut self, scroll: Point) {
        if scroll == self.scroll {
            return;
        }
        self.scroll = scroll;
        self.zoom.surface_mut().scroll_to(scroll);
        self.zoom.handle_event(ZoomEvent::Scroll);
    }

    /// Feed the pointer position (viewport coordinates, `None` when the
    /// pointer is elsewhere) as enter, move and leave events.
    pub fn pointer(&mut self, client: Option<Point>) {
        let inside = client.filter(|&c| self.source_contains(c));
        match (self.hovering, inside) {
            (false, Some(c)) => {
                self.zoom.handle_event(ZoomEvent::PointerEnter);
                self.zoom.handle_event(ZoomEvent::PointerMove { client: c });
                self.hovering = true;
            }
            (true, Some(c)) if self.last_client != Some(c) => {
                self.zoom.handle_event(ZoomEvent::PointerMove { client: c });
            }
            (true, None) => {
                self.zoom.handle_event(ZoomEvent::PointerLeave);
                self.hovering = false;
            }
            _ => {}
        }
        self.last_client = inside;
    }

    /// Page extent covering every region and the magnified view.
    pub fn content_size(&self) -> Size {
        let surface = self.zoom.surface();
        let info = self.zoom.instance_info();
        let mut extent = Size::ZERO;
        let mut cover = |origin: Point, size: Size| {
            extent.width = extent.width.max(origin.x + size.width + PAGE_MARGIN);
            extent.height = extent.height.max(origin.y + size.height + PAGE_MARGIN);
        };

        let container = self.zoom.container();
        let container_origin = self.page_origin(container);
        cover(container_origin, surface.rendered_size(container));
        cover(self.page_origin(self.zoom_box), surface.rendered_size(self.zoom_box));
        if let (Some(g), Some(view)) = (info.geometry, info.magnified) {
            cover(self.page_origin(view), g.metrics.magnified);
        }
        extent
    }

    fn page_origin(&self, element: ElementId) -> Point {
        self.zoom.surface().viewport_origin(element) + self.scroll
    }

    fn source_contains(&self, client: Point) -> bool {
        let Some(source) = self.zoom.instance_info().source else {
            return false;
        };
        let surface = self.zoom.surface();
        let origin = surface.viewport_origin(source);
        let size = surface.rendered_size(source);
        client.x >= origin.x
            && client.y >= origin.y
            && client.x < origin.x + size.width
            && client.y < origin.y + size.height
    }
}
