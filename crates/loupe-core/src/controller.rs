use tracing::{debug, info, trace};

use crate::config::ZoomOptions;
use crate::consts::{DEFAULT_LENS_STYLE, DEFAULT_MAGNIFIED_STYLE};
use crate::error::{LoupeError, Result};
use crate::geometry::{background_offset, lens_origin, Point, ScaleFactors, Size};
use crate::placement::{detached_origin, magnified_origin};
use crate::scale::{compute_metrics, magnified_size, ZoomMetrics};
use crate::style::{StyleOverrides, Visibility};
use crate::surface::{
    ElementId, ElementKind, EventKind, EventTarget, ImageStatus, SubscriptionId, Surface,
    ZoomEvent,
};

/// Lifecycle of one widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    /// Set up, pointer has not entered yet.
    Armed,
    /// Pointer is over the source; views are shown.
    Tracking,
    /// Pointer left again; views are hidden.
    Idle,
    /// Killed. `setup` may arm it again.
    TornDown,
}

/// Geometry fixed by the most recent image load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadedGeometry {
    pub natural: Size,
    /// Display size of the source with unset extents resolved.
    pub display: Size,
    pub metrics: ZoomMetrics,
    /// Top-left of the magnified view inside its parent.
    pub magnified_origin: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum LoadState {
    Pending,
    Complete(LoadedGeometry),
}

/// Per-activation state. Dropped wholesale on kill.
#[derive(Debug)]
struct Session {
    source: ElementId,
    owns_source: bool,
    lens: ElementId,
    magnified: ElementId,
    detached_view: bool,
    subscriptions: Vec<SubscriptionId>,
    load: LoadState,
    source_origin: Option<Point>,
    lens_origin: Option<Point>,
    background_offset: Option<Point>,
    visibility: Visibility,
}

impl Session {
    fn geometry(&self) -> Option<&LoadedGeometry> {
        match &self.load {
            LoadState::Complete(geometry) => Some(geometry),
            LoadState::Pending => None,
        }
    }
}

/// Snapshot of the widget's internals, for inspection and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceInfo {
    pub state: LifecycleState,
    pub options: ZoomOptions,
    pub source: Option<ElementId>,
    pub lens: Option<ElementId>,
    pub magnified: Option<ElementId>,
    pub geometry: Option<LoadedGeometry>,
    pub source_origin: Option<Point>,
    pub lens_origin: Option<Point>,
    pub background_offset: Option<Point>,
    pub visibility: Visibility,
    pub subscriptions: usize,
}

impl InstanceInfo {
    pub fn is_loaded(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn scale(&self) -> Option<ScaleFactors> {
        self.geometry.map(|g| g.metrics.scale)
    }

    pub fn lens_size(&self) -> Option<Size> {
        self.geometry.map(|g| g.metrics.lens)
    }

    pub fn magnified_size(&self) -> Option<Size> {
        self.geometry.map(|g| g.metrics.magnified)
    }

    pub fn display_size(&self) -> Option<Size> {
        self.geometry.map(|g| g.display)
    }
}

/// Image magnifier bound to one container on a [`Surface`].
///
/// Events are fed through [`handle_event`](Self::handle_event). Nothing in
/// event handling fails: events that arrive before the image has loaded, or
/// outside the state they apply to, are ignored.
pub struct ImageZoom<S: Surface> {
    surface: S,
    container: ElementId,
    options: ZoomOptions,
    state: LifecycleState,
    session: Option<Session>,
}

impl<S: Surface> ImageZoom<S> {
    /// Create an unarmed widget. Call [`setup`](Self::setup) to activate it.
    pub fn new(surface: S, container: ElementId, options: ZoomOptions) -> Self {
        Self {
            surface,
            container,
            options,
            state: LifecycleState::Uninitialized,
            session: None,
        }
    }

    /// Create and immediately set up a widget.
    pub fn attach(surface: S, container: ElementId, options: ZoomOptions) -> Result<Self> {
        let mut zoom = Self::new(surface, container, options);
        zoom.setup()?;
        Ok(zoom)
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn options(&self) -> &ZoomOptions {
        &self.options
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Resolve the source image, create the lens and magnified view and
    /// register event interest.
    ///
    /// Calling this on an armed widget tears the previous session down
    /// first. If the image is already loaded the load routine runs before
    /// returning; otherwise it waits for [`ZoomEvent::ImageLoaded`].
    pub fn setup(&mut self) -> Result<()> {
        if self.session.is_some() {
            debug!("Re-arming an active widget");
            self.kill();
        }

        self.options.validate()?;
        if !self.surface.contains(self.container) {
            return Err(LoupeError::MissingContainer);
        }

        let view_parent = match &self.options.zoom_container {
            Some(name) => self
                .surface
                .find_region(name)
                .ok_or_else(|| LoupeError::MissingZoomContainer(name.clone()))?,
            None => self.container,
        };

        let (source, owns_source) = match &self.options.img {
            Some(url) => (self.surface.create_image(self.container, url)?, true),
            None => (
                self.surface
                    .first_image_child(self.container)
                    .ok_or(LoupeError::MissingSourceImage)?,
                false,
            ),
        };

        let (lens, magnified) = match self.create_views(view_parent) {
            Ok(views) => views,
            Err(e) => {
                if owns_source {
                    self.surface.detach(source);
                }
                return Err(e);
            }
        };

        self.surface.set_size(
            source,
            self.options.display_width(),
            self.options.display_height(),
        );

        let subscriptions = self.subscribe_all(source, lens);
        let subscription_count = subscriptions.len();

        self.session = Some(Session {
            source,
            owns_source,
            lens,
            magnified,
            detached_view: self.options.zoom_container.is_some(),
            subscriptions,
            load: LoadState::Pending,
            source_origin: None,
            lens_origin: None,
            background_offset: None,
            visibility: Visibility::Hidden,
        });
        self.state = LifecycleState::Armed;

        info!(
            mode = %self.options.zoom_mode(),
            position = %self.options.zoom_position,
            subscriptions = subscription_count,
            "Image zoom armed"
        );

        if self.surface.image_status(source).is_some() {
            self.complete_load();
        }
        Ok(())
    }

    /// Unregister all event interest, detach created elements and drop the
    /// session. Safe to call at any time, including before the image loaded.
    pub fn kill(&mut self) {
        let Some(session) = self.session.take() else {
            debug!(state = ?self.state, "Kill on a widget without a session");
            return;
        };

        for subscription in session.subscriptions {
            self.surface.unsubscribe(subscription);
        }
        self.surface.detach(session.lens);
        self.surface.detach(session.magnified);
        if session.owns_source {
            self.surface.detach(session.source);
        }

        self.state = LifecycleState::TornDown;
        info!("Image zoom torn down");
    }

    /// Replace the options and set up again.
    pub fn reconfigure(&mut self, options: ZoomOptions) -> Result<()> {
        self.kill();
        self.options = options;
        self.setup()
    }

    /// Dispatch one event to its handler.
    pub fn handle_event(&mut self, event: ZoomEvent) {
        trace!(kind = ?event.kind(), state = ?self.state, "Zoom event");
        match event {
            ZoomEvent::PointerMove { client } => self.on_pointer_move(client),
            ZoomEvent::PointerEnter => self.on_pointer_enter(),
            ZoomEvent::PointerLeave => self.on_pointer_leave(),
            ZoomEvent::Scroll => self.on_scroll(),
            ZoomEvent::ImageLoaded => self.on_image_loaded(),
        }
    }

    pub fn instance_info(&self) -> InstanceInfo {
        let session = self.session.as_ref();
        InstanceInfo {
            state: self.state,
            options: self.options.clone(),
            source: session.map(|s| s.source),
            lens: session.map(|s| s.lens),
            magnified: session.map(|s| s.magnified),
            geometry: session.and_then(|s| s.geometry().copied()),
            source_origin: session.and_then(|s| s.source_origin),
            lens_origin: session.and_then(|s| s.lens_origin),
            background_offset: session.and_then(|s| s.background_offset),
            visibility: session.map_or(Visibility::Hidden, |s| s.visibility),
            subscriptions: session.map_or(0, |s| s.subscriptions.len()),
        }
    }

    fn on_pointer_enter(&mut self) {
        if !matches!(self.state, LifecycleState::Armed | LifecycleState::Idle) {
            return;
        }
        self.set_views_visibility(Visibility::Visible);
        self.state = LifecycleState::Tracking;
    }

    fn on_pointer_leave(&mut self) {
        if self.state != LifecycleState::Tracking {
            return;
        }
        self.set_views_visibility(Visibility::Hidden);
        self.state = LifecycleState::Idle;
    }

    fn on_pointer_move(&mut self, client: Point) {
        if self.state != LifecycleState::Tracking {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let (Some(geometry), Some(origin)) = (session.geometry().copied(), session.source_origin)
        else {
            debug!("Pointer move before the source image resolved");
            return;
        };

        let lens = lens_origin(client - origin, geometry.metrics.lens, geometry.display);
        let offset = background_offset(lens, geometry.metrics.scale);

        self.surface.set_position(session.lens, lens);
        self.surface.set_background_offset(session.magnified, offset);
        session.lens_origin = Some(lens);
        session.background_offset = Some(offset);
    }

    fn on_scroll(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.source_origin = Some(self.surface.viewport_origin(session.source));
        }
    }

    fn on_image_loaded(&mut self) {
        self.complete_load();
    }

    /// Compute scale, lens and magnified view geometry from the loaded
    /// image and push sizes and placement to the surface.
    ///
    /// Runs again on every reload and always starts from the options, so
    /// repeated loads of the same image give the same geometry.
    fn complete_load(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(status) = self.surface.image_status(session.source) else {
            debug!("Load notification for an image that is still pending");
            return;
        };

        let display = resolve_display_size(&self.options, status);
        let mode = self.options.zoom_mode();

        let measured = if mode.needs_measurement() {
            // Provisionally show the view so the surface lays it out, then
            // restore whatever visibility the session had.
            self.surface.set_size(session.magnified, None, None);
            self.surface
                .set_visibility(session.magnified, Visibility::Visible);
            let measured = self.surface.rendered_size(session.magnified);
            self.surface
                .set_visibility(session.magnified, session.visibility);
            Some(measured)
        } else {
            None
        };

        let Some(metrics) = compute_metrics(status.natural, display, mode, measured) else {
            debug!(
                natural_width = status.natural.width,
                natural_height = status.natural.height,
                "Image has no usable extent; zoom stays unresolved"
            );
            session.load = LoadState::Pending;
            session.lens_origin = None;
            session.background_offset = None;
            return;
        };

        self.surface
            .set_size(session.source, Some(display.width), Some(display.height));
        if !mode.needs_measurement() {
            let size = magnified_size(mode, display, None);
            self.surface
                .set_size(session.magnified, Some(size.width), Some(size.height));
        }
        if let Some(url) = self.surface.image_url(session.source) {
            self.surface
                .set_background(session.magnified, &url, status.natural);
        }
        self.surface.set_size(
            session.lens,
            Some(metrics.lens.width),
            Some(metrics.lens.height),
        );

        let view_origin = if session.detached_view {
            detached_origin(self.options.offset)
        } else {
            magnified_origin(
                self.options.zoom_position,
                display,
                metrics.magnified,
                self.options.offset,
            )
        };
        self.surface.set_position(session.magnified, view_origin);

        session.load = LoadState::Complete(LoadedGeometry {
            natural: status.natural,
            display,
            metrics,
            magnified_origin: view_origin,
        });
        session.source_origin = Some(self.surface.viewport_origin(session.source));

        info!(
            natural_width = status.natural.width,
            natural_height = status.natural.height,
            scale_x = metrics.scale.x,
            scale_y = metrics.scale.y,
            lens_width = metrics.lens.width,
            lens_height = metrics.lens.height,
            "Source image loaded"
        );
    }

    fn create_views(&mut self, parent: ElementId) -> Result<(ElementId, ElementId)> {
        let lens = self.surface.create_element(self.container, ElementKind::Lens)?;
        let magnified = match self
            .surface
            .create_element(parent, ElementKind::MagnifiedView)
        {
            Ok(magnified) => magnified,
            Err(e) => {
                self.surface.detach(lens);
                return Err(e);
            }
        };

        let mut lens_style = StyleOverrides::parse(DEFAULT_LENS_STYLE);
        if let Some(extra) = &self.options.zoom_lens_style {
            lens_style.append(extra);
        }
        let mut view_style = StyleOverrides::parse(DEFAULT_MAGNIFIED_STYLE);
        if let Some(extra) = &self.options.zoom_style {
            view_style.append(extra);
        }

        self.surface.set_style(lens, &lens_style);
        self.surface.set_style(magnified, &view_style);
        self.surface.set_visibility(lens, Visibility::Hidden);
        self.surface.set_visibility(magnified, Visibility::Hidden);
        Ok((lens, magnified))
    }

    fn subscribe_all(&mut self, source: ElementId, lens: ElementId) -> Vec<SubscriptionId> {
        let container = EventTarget::Element(self.container);
        let lens = EventTarget::Element(lens);
        [
            (container, EventKind::PointerMove),
            (container, EventKind::PointerEnter),
            (container, EventKind::PointerLeave),
            (lens, EventKind::PointerEnter),
            (lens, EventKind::PointerLeave),
            (EventTarget::Window, EventKind::Scroll),
            (EventTarget::Element(source), EventKind::ImageLoaded),
        ]
        .into_iter()
        .map(|(target, kind)| self.surface.subscribe(target, kind))
        .collect()
    }

    fn set_views_visibility(&mut self, visibility: Visibility) {
        if let Some(session) = self.session.as_mut() {
            self.surface.set_visibility(session.magnified, visibility);
            self.surface.set_visibility(session.lens, visibility);
            session.visibility = visibility;
        }
    }
}

/// Display size with unset extents taken from the rendered image, falling
/// back to the natural size.
fn resolve_display_size(options: &ZoomOptions, status: ImageStatus) -> Size {
    let pick = |configured: Option<f64>, rendered: f64, natural: f64| {
        configured
            .or_else(|| (rendered.is_finite() && rendered > 0.0).then_some(rendered))
            .unwrap_or(natural)
    };
    Size::new(
        pick(
            options.display_width(),
            status.rendered.width,
            status.natural.width,
        ),
        pick(
            options.display_height(),
            status.rendered.height,
            status.natural.height,
        ),
    )
}
