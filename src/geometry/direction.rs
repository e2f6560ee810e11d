/// An orthogonal direction on a [`Map`][crate::geometry::Map].
///
/// The origin is the top left of the map, so `Up` decreases `y` and `Down`
/// increases it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Iterate through all `Direction`s, clockwise from `Right`.
    pub fn iter() -> impl Iterator<Item = Direction> {
        std::iter::successors(Some(Direction::Right), |direction| {
            use Direction::*;

            match direction {
                Right => Some(Down),
                Down => Some(Left),
                Left => Some(Up),
                Up => None,
            }
        })
    }

    /// `(dx, dy)` of a single step in this direction.
    pub fn deltas(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
        }
    }
}
