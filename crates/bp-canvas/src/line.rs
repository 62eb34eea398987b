//! Line rasterization by diagonal-distance stepping.
//!
//! A line from `p1` to `p2` takes `steps = max(|dx|, |dy|)` steps and stamps
//! `steps + 1` dots. Dot `i` sits at `p1 + i * (dx, dy) / steps`, each axis
//! rounded half away from zero. The division is done exactly on integers
//! rather than by accumulating a float step, so a line and its reverse land
//! on the same dots.

use crate::canvas::Canvas;
use crate::shapes::{Drawable, Point};

/// Segment between two dots, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
}

impl Line {
    #[inline]
    #[must_use]
    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Number of steps between the ends (the diagonal distance).
    #[must_use]
    pub fn steps(&self) -> u64 {
        let dx = i64::from(self.p2.x) - i64::from(self.p1.x);
        let dy = i64::from(self.p2.y) - i64::from(self.p1.y);
        dx.unsigned_abs().max(dy.unsigned_abs())
    }

    /// Dots stamped by this line, from `p1` to `p2`.
    ///
    /// # Example
    /// ```
    /// use bp_canvas::{Line, Point};
    /// let line = Line::new(Point::new(0, 0), Point::new(4, 2));
    /// let dots: Vec<(i32, i32)> = line.points().map(|p| (p.x, p.y)).collect();
    /// assert_eq!(dots, [(0, 0), (1, 1), (2, 1), (3, 2), (4, 2)]);
    /// ```
    #[must_use]
    pub fn points(&self) -> LinePoints {
        LinePoints {
            p1: self.p1,
            dx: i128::from(self.p2.x) - i128::from(self.p1.x),
            dy: i128::from(self.p2.y) - i128::from(self.p1.y),
            steps: self.steps(),
            next: 0,
            done: false,
        }
    }
}

impl Drawable for Line {
    fn draw(&self, canvas: &mut Canvas) {
        for p in self.points() {
            canvas.set_dot(p.x, p.y, true);
        }
    }
}

/// Iterator over the dots of a [`Line`]. Yields exactly `steps + 1` points.
#[derive(Debug, Clone)]
pub struct LinePoints {
    p1: Point,
    dx: i128,
    dy: i128,
    steps: u64,
    next: u64,
    done: bool,
}

/// `num / den` rounded half away from zero. `den` must be positive.
fn div_round(num: i128, den: i128) -> i128 {
    if num >= 0 {
        (2 * num + den) / (2 * den)
    } else {
        -((-2 * num + den) / (2 * den))
    }
}

impl LinePoints {
    fn axis(start: i32, delta: i128, i: u64, steps: u64) -> i32 {
        let steps = i128::from(steps);
        let num = i128::from(start) * steps + i128::from(i) * delta;
        // Always between the two endpoints, hence within i32.
        i32::try_from(div_round(num, steps)).unwrap_or(start)
    }
}

impl Iterator for LinePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let i = self.next;
        if i == self.steps {
            self.done = true;
        } else {
            self.next += 1;
        }
        if self.steps == 0 {
            return Some(self.p1);
        }
        Some(Point::new(
            Self::axis(self.p1.x, self.dx, i, self.steps),
            Self::axis(self.p1.y, self.dy, i, self.steps),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = self.steps - self.next + 1;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl std::iter::FusedIterator for LinePoints {}
