use crate::config::{Offset, ZoomPosition};
use crate::geometry::{Point, Size};

/// Top-left corner of the magnified view relative to the source container.
///
/// `display` is the source image's display size and `magnified` the size of
/// the magnified view. Offsets push the view away from the source; the
/// overlay position ignores them.
pub fn magnified_origin(
    position: ZoomPosition,
    display: Size,
    magnified: Size,
    offset: Offset,
) -> Point {
    let h = offset.horizontal;
    let v = offset.vertical;
    match position {
        ZoomPosition::Right => Point::new(display.width + h, v),
        ZoomPosition::Left => Point::new(-(magnified.width + h), v),
        ZoomPosition::Top => Point::new(h, -(magnified.height + v)),
        ZoomPosition::Bottom => Point::new(h, display.height + v),
        ZoomPosition::Original => Point::ZERO,
    }
}

/// Origin inside an alternate zoom container: only the offset applies.
pub fn detached_origin(offset: Offset) -> Point {
    Point::new(offset.horizontal, offset.vertical)
}
