//! Lowest total risk through a cave whose floor is a grid of risk levels.

use crate::{
    config::Expansion,
    geometry::{
        map::{Euclidean, SearchError},
        tile::Digit,
        Map, MapConversionErr,
    },
    input,
};
use std::path::Path;

/// A map of risk levels: the cost of entering each position.
pub type RiskMap = Map<Digit>;

/// Read a risk map from a file.
pub fn read_map(path: &Path) -> Result<RiskMap, Error> {
    let lines = input::read_lines(path)?;
    RiskMap::try_from_lines(lines).map_err(Into::into)
}

/// Lowest total risk of any path from the top left to the bottom right of `map`.
pub fn lowest_total_risk(map: &RiskMap) -> Result<u32, Error> {
    let path = map.lowest_risk_path(Euclidean)?;
    tracing::debug!(moves = path.len(), risk = path.total_risk(), "found lowest-risk path");
    Ok(path.total_risk())
}

/// Both answers for a single risk map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answers {
    /// Lowest total risk across the map as given.
    pub part1: u32,
    /// Lowest total risk across the expanded map.
    pub part2: u32,
}

/// Lowest total risk across `map`, then across `map` expanded per `expansion`.
pub fn solve(map: &RiskMap, expansion: Expansion) -> Result<Answers, Error> {
    let part1 = lowest_total_risk(map)?;
    let expanded = map.expand(expansion.factor, expansion.wrap);
    let part2 = lowest_total_risk(&expanded)?;
    Ok(Answers { part1, part2 })
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] input::Error),
    #[error("could not read map")]
    Map(#[from] MapConversionErr),
    #[error(transparent)]
    Search(#[from] SearchError),
}
