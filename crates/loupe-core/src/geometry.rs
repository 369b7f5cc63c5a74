use std::ops::{Add, Sub};

/// A point in CSS pixels. Depending on context this is viewport-relative
/// (pointer client coordinates, region origins) or relative to a parent
/// region (element placement).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width/height pair in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both extents are finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        is_positive(self.width) && is_positive(self.height)
    }

    /// Half of each extent.
    pub fn half(&self) -> Size {
        Size::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Horizontal and vertical ratio of natural to displayed image size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Clamp `value` into `[min, max]`.
///
/// When the range is inverted (`min > max`) the midpoint of the two bounds
/// is returned instead, so a lens larger than its source ends up centered
/// on the source.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if min > max {
        return (min + max) / 2.0;
    }
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Top-left lens coordinate along one axis.
///
/// Centers the lens on `pointer_offset` (measured from the source's leading
/// edge) while keeping the whole lens inside `[0, source_extent]`. The result
/// lies in `[0, source_extent - 2 * lens_half_extent]`; for a lens wider than
/// the source it is `source_extent / 2 - lens_half_extent`.
pub fn lens_position(pointer_offset: f64, lens_half_extent: f64, source_extent: f64) -> f64 {
    clamp(
        pointer_offset,
        lens_half_extent,
        source_extent - lens_half_extent,
    ) - lens_half_extent
}

/// Background offset magnitude in the magnified view for a lens coordinate.
///
/// Surfaces render this as a negative background position so the matching
/// crop scrolls into view.
pub fn magnified_offset(lens_position: f64, scale: f64) -> f64 {
    lens_position * scale
}

/// Two-dimensional [`lens_position`].
pub fn lens_origin(pointer: Point, lens: Size, source: Size) -> Point {
    let half = lens.half();
    Point::new(
        lens_position(pointer.x, half.width, source.width),
        lens_position(pointer.y, half.height, source.height),
    )
}

/// Two-dimensional [`magnified_offset`].
pub fn background_offset(lens_origin: Point, scale: ScaleFactors) -> Point {
    Point::new(
        magnified_offset(lens_origin.x, scale.x),
        magnified_offset(lens_origin.y, scale.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_picks_midpoint() {
        assert_eq!(clamp(7.0, 10.0, 2.0), 6.0);
        assert_eq!(clamp(-100.0, 10.0, 2.0), 6.0);
    }

    #[test]
    fn point_arithmetic() {
        let p = Point::new(5.0, 7.0) - Point::new(2.0, 3.0);
        assert_eq!(p, Point::new(3.0, 4.0));
        assert_eq!(p + Point::new(1.0, 1.0), Point::new(4.0, 5.0));
    }
}
