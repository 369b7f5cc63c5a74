//! In-memory [`Surface`]: a retained element tree used by the tests, the
//! command-line replay and the desktop front end, which paints it.
//!
//! Models just enough of a document: a tree of regions and images with
//! explicit layout, a global scroll position, images whose data arrives
//! later, and a subscription registry. Elements the controller creates are
//! tracked separately so teardown can be checked.

use std::collections::{BTreeMap, HashMap};

use crate::error::{LoupeError, Result};
use crate::geometry::{Point, Size};
use crate::style::{StyleOverrides, Visibility};
use crate::surface::{
    ElementId, ElementKind, EventKind, EventTarget, ImageStatus, SubscriptionId, Surface,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Region,
    Image,
    Lens,
    MagnifiedView,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    pub url: String,
    pub size: Size,
}

#[derive(Clone, Debug)]
pub struct ElementRecord {
    pub kind: NodeKind,
    pub parent: Option<ElementId>,
    pub name: Option<String>,
    /// Offset from the parent's origin.
    pub position: Point,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub visibility: Visibility,
    pub style: StyleOverrides,
    pub background: Option<Background>,
    pub background_offset: Option<Point>,
    pub url: Option<String>,
    /// Known once the image data has arrived.
    pub natural: Option<Size>,
    /// Created through the [`Surface`] trait rather than by the host.
    pub created: bool,
}

impl ElementRecord {
    fn new(kind: NodeKind, parent: Option<ElementId>) -> Self {
        Self {
            kind,
            parent,
            name: None,
            position: Point::ZERO,
            width: None,
            height: None,
            visibility: Visibility::Visible,
            style: StyleOverrides::new(),
            background: None,
            background_offset: None,
            url: None,
            natural: None,
            created: false,
        }
    }
}

#[derive(Default)]
pub struct HeadlessSurface {
    elements: BTreeMap<ElementId, ElementRecord>,
    subscriptions: BTreeMap<SubscriptionId, (EventTarget, EventKind)>,
    resources: HashMap<String, Size>,
    scroll: Point,
    next_element: u64,
    next_subscription: u64,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a host region of fixed size at `position` (page coordinates for
    /// a root region, parent-relative otherwise).
    pub fn add_region(
        &mut self,
        parent: Option<ElementId>,
        name: &str,
        position: Point,
        size: Size,
    ) -> ElementId {
        let mut record = ElementRecord::new(NodeKind::Region, parent);
        record.name = Some(name.to_string());
        record.position = position;
        record.width = Some(size.width);
        record.height = Some(size.height);
        self.insert(record)
    }

    /// Add a host image to `parent`. `natural` is `None` while loading.
    pub fn add_image(&mut self, parent: ElementId, url: &str, natural: Option<Size>) -> ElementId {
        let mut record = ElementRecord::new(NodeKind::Image, Some(parent));
        record.url = Some(url.to_string());
        record.natural = natural;
        self.insert(record)
    }

    /// Make `url` loadable with the given intrinsic size.
    pub fn register_resource(&mut self, url: &str, natural: Size) {
        self.resources.insert(url.to_string(), natural);
    }

    /// Deliver image data for `image` from the registered resources.
    /// Returns `false` when the element or its resource is unknown.
    pub fn finish_loading(&mut self, image: ElementId) -> bool {
        let Some(record) = self.elements.get_mut(&image) else {
            return false;
        };
        let Some(natural) = record.url.as_ref().and_then(|u| self.resources.get(u)) else {
            return false;
        };
        record.natural = Some(*natural);
        true
    }

    /// Overwrite the intrinsic size of an image, as a reload would.
    pub fn set_natural_size(&mut self, image: ElementId, natural: Size) {
        if let Some(record) = self.elements.get_mut(&image) {
            record.natural = Some(natural);
        }
    }

    pub fn scroll_to(&mut self, scroll: Point) {
        self.scroll = scroll;
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementRecord> {
        self.elements.get(&id)
    }

    /// Elements created through the surface trait that are still attached.
    pub fn created_count(&self) -> usize {
        self.elements.values().filter(|r| r.created).count()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_subscribed(&self, target: EventTarget, kind: EventKind) -> bool {
        self.subscriptions
            .values()
            .any(|&(t, k)| t == target && k == kind)
    }

    /// Images created through the surface that have not loaded yet.
    pub fn pending_images(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, r)| r.kind == NodeKind::Image && r.natural.is_none())
            .map(|(id, _)| *id)
            .collect()
    }

    fn insert(&mut self, record: ElementRecord) -> ElementId {
        self.next_element += 1;
        let id = ElementId(self.next_element);
        self.elements.insert(id, record);
        id
    }

    fn create_child(&mut self, parent: ElementId, kind: NodeKind) -> Result<ElementId> {
        if !self.elements.contains_key(&parent) {
            return Err(LoupeError::Presentation(format!(
                "parent element {parent:?} is not attached"
            )));
        }
        let mut record = ElementRecord::new(kind, Some(parent));
        record.created = true;
        Ok(self.insert(record))
    }

    fn page_origin(&self, element: ElementId) -> Point {
        let mut origin = Point::ZERO;
        let mut current = Some(element);
        while let Some(id) = current {
            match self.elements.get(&id) {
                Some(record) => {
                    origin = origin + record.position;
                    current = record.parent;
                }
                None => break,
            }
        }
        origin
    }

    fn layout_size(&self, record: &ElementRecord) -> Size {
        match (record.width, record.height, record.natural) {
            (Some(w), Some(h), _) => Size::new(w, h),
            (Some(w), None, Some(n)) if n.width > 0.0 => Size::new(w, w * n.height / n.width),
            (None, Some(h), Some(n)) if n.height > 0.0 => Size::new(h * n.width / n.height, h),
            (None, None, Some(n)) => n,
            (w, h, _) => {
                // Auto-sized boxes fill their parent.
                let parent = record
                    .parent
                    .and_then(|p| self.elements.get(&p))
                    .map(|p| self.layout_size(p))
                    .unwrap_or(Size::ZERO);
                Size::new(w.unwrap_or(parent.width), h.unwrap_or(parent.height))
            }
        }
    }
}

impl Surface for HeadlessSurface {
    fn contains(&self, element: ElementId) -> bool {
        self.elements.contains_key(&element)
    }

    fn first_image_child(&self, container: ElementId) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|(_, r)| r.kind == NodeKind::Image && r.parent == Some(container))
            .map(|(id, _)| *id)
    }

    fn find_region(&self, name: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|(_, r)| r.kind == NodeKind::Region && r.name.as_deref() == Some(name))
            .map(|(id, _)| *id)
    }

    fn create_image(&mut self, parent: ElementId, url: &str) -> Result<ElementId> {
        let id = self.create_child(parent, NodeKind::Image)?;
        if let Some(record) = self.elements.get_mut(&id) {
            record.url = Some(url.to_string());
        }
        Ok(id)
    }

    fn create_element(&mut self, parent: ElementId, kind: ElementKind) -> Result<ElementId> {
        let kind = match kind {
            ElementKind::Lens => NodeKind::Lens,
            ElementKind::MagnifiedView => NodeKind::MagnifiedView,
        };
        self.create_child(parent, kind)
    }

    fn detach(&mut self, element: ElementId) {
        let mut doomed = vec![element];
        while let Some(id) = doomed.pop() {
            if self.elements.remove(&id).is_some() {
                doomed.extend(
                    self.elements
                        .iter()
                        .filter(|(_, r)| r.parent == Some(id))
                        .map(|(child, _)| *child),
                );
            }
        }
    }

    fn image_url(&self, image: ElementId) -> Option<String> {
        self.elements.get(&image).and_then(|r| r.url.clone())
    }

    fn image_status(&self, image: ElementId) -> Option<ImageStatus> {
        let record = self.elements.get(&image)?;
        let natural = record.natural?;
        Some(ImageStatus {
            natural,
            rendered: self.layout_size(record),
        })
    }

    fn rendered_size(&self, element: ElementId) -> Size {
        match self.elements.get(&element) {
            Some(record) if record.visibility.is_visible() => self.layout_size(record),
            _ => Size::ZERO,
        }
    }

    fn viewport_origin(&self, element: ElementId) -> Point {
        self.page_origin(element) - self.scroll
    }

    fn subscribe(&mut self, target: EventTarget, kind: EventKind) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscriptions.insert(id, (target, kind));
        id
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) {
        self.subscriptions.remove(&subscription);
    }

    fn set_position(&mut self, element: ElementId, origin: Point) {
        if let Some(record) = self.elements.get_mut(&element) {
            record.position = origin;
        }
    }

    fn set_size(&mut self, element: ElementId, width: Option<f64>, height: Option<f64>) {
        if let Some(record) = self.elements.get_mut(&element) {
            record.width = width;
            record.height = height;
        }
    }

    fn set_visibility(&mut self, element: ElementId, visibility: Visibility) {
        if let Some(record) = self.elements.get_mut(&element) {
            record.visibility = visibility;
        }
    }

    fn set_background(&mut self, element: ElementId, url: &str, size: Size) {
        if let Some(record) = self.elements.get_mut(&element) {
            record.background = Some(Background {
                url: url.to_string(),
                size,
            });
        }
    }

    fn set_background_offset(&mut self, element: ElementId, offset: Point) {
        if let Some(record) = self.elements.get_mut(&element) {
            record.background_offset = Some(offset);
        }
    }

    fn set_style(&mut self, element: ElementId, style: &StyleOverrides) {
        if let Some(record) = self.elements.get_mut(&element) {
            record.style = style.clone();
        }
    }
}
