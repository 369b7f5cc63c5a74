//! Capability interface to whatever actually draws the widget.
//!
//! The controller never creates pixels or listens to input itself. A host
//! (a browser binding, the egui front end, the in-memory
//! [`HeadlessSurface`](crate::headless::HeadlessSurface)) implements
//! [`Surface`] and forwards the events it was asked to subscribe to as
//! [`ZoomEvent`] values.

use crate::error::Result;
use crate::geometry::{Point, Size};
use crate::style::{StyleOverrides, Visibility};

/// Opaque handle to an element owned by a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Handle returned by [`Surface::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Elements the controller may create.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Lens,
    MagnifiedView,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    PointerEnter,
    PointerLeave,
    Scroll,
    ImageLoaded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Element(ElementId),
    /// Global events such as page scroll.
    Window,
}

/// A notification delivered by the host to
/// [`ImageZoom::handle_event`](crate::controller::ImageZoom::handle_event).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomEvent {
    /// Pointer moved; `client` is viewport-relative.
    PointerMove { client: Point },
    PointerEnter,
    PointerLeave,
    Scroll,
    /// The source image finished loading (or was reloaded).
    ImageLoaded,
}

impl ZoomEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerMove { .. } => EventKind::PointerMove,
            Self::PointerEnter => EventKind::PointerEnter,
            Self::PointerLeave => EventKind::PointerLeave,
            Self::Scroll => EventKind::Scroll,
            Self::ImageLoaded => EventKind::ImageLoaded,
        }
    }
}

/// Intrinsic and rendered size of a loaded image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageStatus {
    pub natural: Size,
    pub rendered: Size,
}

pub trait Surface {
    /// Whether `element` is attached.
    fn contains(&self, element: ElementId) -> bool;

    /// First image child of `container`, if any.
    fn first_image_child(&self, container: ElementId) -> Option<ElementId>;

    /// Region registered under `name`, used for alternate zoom containers.
    fn find_region(&self, name: &str) -> Option<ElementId>;

    /// Create an image element loading `url` and attach it to `parent`.
    fn create_image(&mut self, parent: ElementId, url: &str) -> Result<ElementId>;

    /// Create an empty element and attach it to `parent`.
    fn create_element(&mut self, parent: ElementId, kind: ElementKind) -> Result<ElementId>;

    /// Detach `element`. Unknown handles are ignored.
    fn detach(&mut self, element: ElementId);

    fn image_url(&self, image: ElementId) -> Option<String>;

    /// Natural and rendered size, or `None` while the image data is pending.
    fn image_status(&self, image: ElementId) -> Option<ImageStatus>;

    /// Box the surface currently renders for `element`. Hidden elements
    /// measure as zero.
    fn rendered_size(&self, element: ElementId) -> Size;

    /// Viewport-relative top-left of `element`.
    fn viewport_origin(&self, element: ElementId) -> Point;

    fn subscribe(&mut self, target: EventTarget, kind: EventKind) -> SubscriptionId;

    fn unsubscribe(&mut self, subscription: SubscriptionId);

    /// Position relative to the element's parent.
    fn set_position(&mut self, element: ElementId, origin: Point);

    /// Explicit size; `None` leaves that extent automatic.
    fn set_size(&mut self, element: ElementId, width: Option<f64>, height: Option<f64>);

    fn set_visibility(&mut self, element: ElementId, visibility: Visibility);

    /// Non-repeating background image drawn at `size`.
    fn set_background(&mut self, element: ElementId, url: &str, size: Size);

    /// Crop offset of the background, as a positive magnitude in background
    /// pixels. Surfaces shift the background by the negated value.
    fn set_background_offset(&mut self, element: ElementId, offset: Point);

    fn set_style(&mut self, element: ElementId, style: &StyleOverrides);
}
