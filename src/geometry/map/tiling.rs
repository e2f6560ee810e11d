use super::{
    tile::{Digit, WrapRule},
    Map,
};
use crate::geometry::Point;
use std::num::NonZeroUsize;

impl Map<Digit> {
    /// Tile this map `factor` times in each dimension.
    ///
    /// Each copy's values are increased by its tile row plus its tile column, counted
    /// from the top left copy, and then folded back into a digit by `rule`. The original
    /// map is unchanged; with a factor of 1 the result is equal to it.
    ///
    /// ```notrust
    /// 8     expand(2, Cyclic)    89
    ///       ----------------->   91
    /// ```
    pub fn expand(&self, factor: NonZeroUsize, rule: WrapRule) -> Map<Digit> {
        let width = self.width();
        let height = self.height();
        let factor = factor.get();

        let expanded = Map::procedural(width * factor, height * factor, |point| {
            let (x, y) = (point.x as usize, point.y as usize);
            let col_tile = x / width;
            let row_tile = y / height;
            let source: Point = (x % width, y % height).into();
            let value = u32::from(self[source]) + (row_tile + col_tile) as u32;
            Digit::wrapping(value, rule)
        });

        tracing::debug!(
            factor,
            ?rule,
            width = expanded.width(),
            height = expanded.height(),
            "expanded map"
        );
        expanded
    }
}
