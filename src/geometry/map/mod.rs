mod a_star;
mod heuristic;
// This interior module is private; we reexport its contents.
#[allow(clippy::module_inception)]
mod map;
mod path;
mod tiling;

pub mod tile;

pub use a_star::{NodeId, SearchEngine, SearchError, SearchNode, SearchStats, Settled};
pub use heuristic::{Dijkstra, Euclidean, Heuristic, Manhattan};
pub use map::{Map, MapConversionErr};
pub use path::Path;
