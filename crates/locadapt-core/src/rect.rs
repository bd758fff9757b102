//! Axis-aligned pixel rectangles.
//!
//! Used for the bounding box of an adaptation zone and for clipping that box
//! against the image tile being processed.
//!
//! # Coordinate System
//!
//! Origin at the top-left corner, X to the right, Y downward. Right and
//! bottom edges are exclusive.
//!
//! ```rust
//! use locadapt_core::Rect;
//!
//! let zone = Rect::from_signed_bounds(-20, 10, 60, 50).unwrap();
//! let tile = Rect::from_size(40, 40);
//! let clipped = zone.intersect(&tile).unwrap();
//! assert_eq!(clipped, Rect::new(0, 10, 40, 30));
//! ```

/// A rectangle defined by origin (x, y) and dimensions (width, height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle at the origin.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Creates a rectangle from signed edges, clamping the negative part away.
    ///
    /// `x1`/`y1` are exclusive. All edges are clamped to `0..=u32::MAX`, so
    /// the result always satisfies `x + width <= u32::MAX`. Returns `None`
    /// when nothing remains.
    pub fn from_signed_bounds(x0: i64, y0: i64, x1: i64, y1: i64) -> Option<Self> {
        let clamp = |v: i64| v.clamp(0, u32::MAX as i64) as u32;
        let (left, top) = (clamp(x0), clamp(y0));
        let (right, bottom) = (clamp(x1), clamp(y1));
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self::new(left, top, right - left, bottom - top))
    }

    /// Right edge (exclusive), saturating at `u32::MAX`.
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive), saturating at `u32::MAX`.
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True if the rectangle covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True if the point lies inside.
    #[inline]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True if row `y` crosses the rectangle.
    #[inline]
    pub const fn spans_row(&self, y: u32) -> bool {
        y >= self.y && y < self.bottom()
    }

    /// Intersection of two rectangles, `None` if they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 > x0 && y1 > y0 {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        } else {
            None
        }
    }
}
