use crate::geometry::Point;

/// An estimate of the remaining cost between two points.
///
/// Estimates are in steps: [`SearchEngine`][super::SearchEngine] multiplies them by
/// the cheapest tile cost on the map. For the search to return a minimal path, an
/// estimate must never exceed the number of steps remaining.
pub trait Heuristic {
    fn estimate(&self, from: Point, to: Point) -> f64;
}

impl<H: Heuristic + ?Sized> Heuristic for &H {
    fn estimate(&self, from: Point, to: Point) -> f64 {
        (**self).estimate(from, to)
    }
}

/// Straight-line distance.
#[derive(Debug, Default, Clone, Copy)]
pub struct Euclidean;

impl Heuristic for Euclidean {
    fn estimate(&self, from: Point, to: Point) -> f64 {
        (to - from).euclidean()
    }
}

/// Taxicab distance: the minimum number of orthogonal steps.
#[derive(Debug, Default, Clone, Copy)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    fn estimate(&self, from: Point, to: Point) -> f64 {
        f64::from((to - from).manhattan())
    }
}

/// No estimate at all; the search degrades to Dijkstra's algorithm.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl Heuristic for Dijkstra {
    fn estimate(&self, _from: Point, _to: Point) -> f64 {
        0.0
    }
}
