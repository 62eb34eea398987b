//! Drawable primitives stamped onto a [`Canvas`] through its dot API.

use crate::canvas::Canvas;
use crate::line::Line;
use crate::sprite::Sprite;

/// Anything that can stamp dots onto a canvas.
///
/// Implementations only raise dots through [`Canvas::set_dot`], so clipping
/// at the canvas edges comes for free.
///
/// # Example
/// ```
/// use bp_canvas::{Canvas, Drawable};
///
/// struct Cross;
/// impl Drawable for Cross {
///     fn draw(&self, canvas: &mut Canvas) {
///         for i in 0..3 {
///             canvas.set_dot(i, 1, true);
///             canvas.set_dot(1, i, true);
///         }
///     }
/// }
///
/// let mut canvas = Canvas::new(4, 4).unwrap();
/// canvas.draw(&Cross);
/// assert!(canvas.get_dot(1, 1));
/// ```
pub trait Drawable {
    /// Stamp this shape onto `canvas`.
    fn draw(&self, canvas: &mut Canvas);
}

impl<T: Drawable + ?Sized> Drawable for &T {
    fn draw(&self, canvas: &mut Canvas) {
        (**self).draw(canvas);
    }
}

impl<T: Drawable> Drawable for [T] {
    fn draw(&self, canvas: &mut Canvas) {
        for shape in self {
            shape.draw(canvas);
        }
    }
}

/// Integer dot position. Also the simplest drawable: one dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Drawable for Point {
    fn draw(&self, canvas: &mut Canvas) {
        canvas.set_dot(self.x, self.y, true);
    }
}

/// Axis-aligned rectangle outline.
///
/// Only the border is stamped. Sizes below 1 are treated as 1, so a
/// degenerate rectangle collapses onto a single column or row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rectangle {
    pub origin: Point,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    #[inline]
    #[must_use]
    pub const fn new(origin: Point, width: i32, height: i32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Corners in order top-left, top-right, bottom-left, bottom-right.
    ///
    /// # Example
    /// ```
    /// use bp_canvas::{Point, Rectangle};
    /// let rect = Rectangle::new(Point::new(1, 2), 3, 1);
    /// let [tl, tr, bl, br] = rect.corners();
    /// assert_eq!((tl, tr), (Point::new(1, 2), Point::new(3, 2)));
    /// assert_eq!((bl, br), (tl, tr));
    /// ```
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        let left = self.origin.x;
        let top = self.origin.y;
        let right = left.saturating_add(self.width.max(1) - 1);
        let bottom = top.saturating_add(self.height.max(1) - 1);
        [
            Point::new(left, top),
            Point::new(right, top),
            Point::new(left, bottom),
            Point::new(right, bottom),
        ]
    }

    /// The four border edges: top, bottom, left, right.
    #[must_use]
    pub fn edges(&self) -> [Line; 4] {
        let [tl, tr, bl, br] = self.corners();
        [
            Line::new(tl, tr),
            Line::new(bl, br),
            Line::new(tl, bl),
            Line::new(tr, br),
        ]
    }
}

impl Drawable for Rectangle {
    fn draw(&self, canvas: &mut Canvas) {
        for edge in self.edges() {
            edge.draw(canvas);
        }
    }
}

/// Closed set of built-in shapes.
///
/// Custom shapes implement [`Drawable`] directly instead of extending this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    Point(Point),
    Line(Line),
    Rectangle(Rectangle),
    Sprite(Sprite<'a>),
}

impl Drawable for Shape<'_> {
    fn draw(&self, canvas: &mut Canvas) {
        match self {
            Shape::Point(p) => p.draw(canvas),
            Shape::Line(l) => l.draw(canvas),
            Shape::Rectangle(r) => r.draw(canvas),
            Shape::Sprite(s) => s.draw(canvas),
        }
    }
}

impl From<Point> for Shape<'_> {
    fn from(p: Point) -> Self {
        Shape::Point(p)
    }
}

impl From<Line> for Shape<'_> {
    fn from(l: Line) -> Self {
        Shape::Line(l)
    }
}

impl From<Rectangle> for Shape<'_> {
    fn from(r: Rectangle) -> Self {
        Shape::Rectangle(r)
    }
}

impl<'a> From<Sprite<'a>> for Shape<'a> {
    fn from(s: Sprite<'a>) -> Self {
        Shape::Sprite(s)
    }
}
