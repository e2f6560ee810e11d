use super::Direction;
use std::ops::{Add, AddAssign, Sub};

/// A position on a 2d grid.
///
/// Equality, ordering and hashing depend only on the coordinates, which makes
/// `Point` suitable as the sole key of search bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    /// Sum of the absolute values of the coordinates.
    ///
    /// Usually applied to the difference of two points.
    pub fn manhattan(self) -> i32 {
        self.x.abs() + self.y.abs()
    }

    /// Straight-line length of this point as a vector from the origin.
    pub fn euclidean(self) -> f64 {
        f64::from(self.x).hypot(f64::from(self.y))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

impl From<(usize, usize)> for Point {
    /// Assumes both coordinates can be represented in an `i32`.
    fn from((x, y): (usize, usize)) -> Self {
        Point {
            x: x as i32,
            y: y as i32,
        }
    }
}

impl AddAssign<Direction> for Point {
    fn add_assign(&mut self, rhs: Direction) {
        let (dx, dy) = rhs.deltas();
        self.x += dx;
        self.y += dy;
    }
}

impl Add<Direction> for Point {
    type Output = Point;

    fn add(mut self, rhs: Direction) -> Self::Output {
        self += rhs;
        self
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Self::Output {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Self::Output {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distances() {
        let d = Point::new(9, 9) - Point::new(6, 5);
        assert_eq!(d.manhattan(), 7);
        assert_eq!(d.euclidean(), 5.0);
    }

    #[test]
    fn test_step_and_return() {
        let origin = Point::new(3, 3);
        for direction in Direction::iter() {
            assert_eq!(origin + direction + direction.reverse(), origin);
        }
        assert_eq!(origin + Direction::Up, Point::new(3, 2));
    }
}
