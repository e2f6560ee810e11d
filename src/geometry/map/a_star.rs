use super::{Heuristic, Map, Path};
use crate::geometry::Point;
use ordered_float::OrderedFloat;
use std::collections::{BinaryHeap, HashMap};

/// Index of a [`SearchNode`] within the nodes of a single search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(super) usize);

/// A position discovered by the search, with the costs known when it was discovered.
///
/// Nodes are never used as keys; the same position may be discovered several times
/// with different costs, and only the cheapest discovery is ever expanded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchNode {
    pub position: Point,
    /// Cost of the cheapest known path from the start to `position`.
    pub g: u32,
    /// Estimated remaining cost from `position` to the destination.
    pub h: f64,
    /// The node this one was discovered from; `None` only for the start.
    pub predecessor: Option<NodeId>,
}

impl SearchNode {
    /// Estimated total cost of a path through this node.
    #[inline]
    pub fn f(&self) -> f64 {
        f64::from(self.g) + self.h
    }
}

/// Frontier entry
// https://doc.rust-lang.org/std/collections/binary_heap/#examples
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct FrontierEntry {
    f: OrderedFloat<f64>,
    sequence: usize,
    node: NodeId,
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &FrontierEntry) -> std::cmp::Ordering {
        // Notice that the we flip the ordering on costs.
        // Ties go to whichever entry was pushed first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &FrontierEntry) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Counters describing the work one search did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes pushed onto the frontier, including the start.
    pub pushed: usize,
    /// Nodes popped and finalized.
    pub expanded: usize,
    /// Nodes popped and discarded because their position was already settled more cheaply.
    pub stale: usize,
}

/// The outcome of a successful search.
///
/// Owns every node the search discovered, so that the path to the destination can
/// be recovered with [`Path::reconstruct`].
#[derive(Clone, Debug)]
pub struct Settled {
    pub(super) from: Point,
    pub(super) nodes: Vec<SearchNode>,
    pub(super) terminal: NodeId,
    pub(super) closed: HashMap<Point, u32>,
    pub(super) stats: SearchStats,
}

impl Settled {
    pub fn from(&self) -> Point {
        self.from
    }

    /// The node at which the search reached its destination.
    pub fn terminal(&self) -> &SearchNode {
        &self.nodes[self.terminal.0]
    }

    /// Minimum total cost from start to destination.
    pub fn cost(&self) -> u32 {
        self.terminal().g
    }

    pub fn node(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    /// Number of positions whose cost was finalized.
    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    /// Finalized cost of a position, if the search settled it.
    pub fn closed_cost(&self, point: Point) -> Option<u32> {
        self.closed.get(&point).copied()
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no path from {from:?} to {to:?}")]
    NoPathFound { from: Point, to: Point },
    #[error("predecessor chain from {terminal:?} stopped at {reached:?} after {steps} steps instead of reaching {start:?}")]
    InvalidChain {
        start: Point,
        terminal: Point,
        reached: Point,
        steps: usize,
    },
}

/// Best-first search for the cheapest orthogonal path across a [`Map`].
///
/// Entering a tile costs that tile's value; the start tile costs nothing.
/// Estimates are scaled by the cheapest tile on the map, so a map with a free tile
/// is searched with no estimate at all.
/// Each call to [`SearchEngine::run`] owns its own frontier and closed set, so one
/// engine may run any number of searches over the same map.
#[derive(Debug)]
pub struct SearchEngine<'a, Tile, H> {
    map: &'a Map<Tile>,
    heuristic: H,
    min_step_cost: u32,
}

impl<'a, Tile, H> SearchEngine<'a, Tile, H>
where
    Tile: Clone + Into<u32>,
    H: Heuristic,
{
    pub fn new(map: &'a Map<Tile>, heuristic: H) -> Self {
        let min_step_cost = map
            .iter()
            .map(|(_, tile)| Into::<u32>::into(tile.clone()))
            .min()
            .unwrap_or(0);
        SearchEngine {
            map,
            heuristic,
            min_step_cost,
        }
    }

    fn cost(&self, point: Point) -> u32 {
        self.map[point].clone().into()
    }

    // every step costs at least `min_step_cost`
    fn estimate(&self, from: Point, to: Point) -> f64 {
        self.heuristic.estimate(from, to) * f64::from(self.min_step_cost)
    }

    /// Find the cheapest path from `from` to `to` using A*.
    // https://en.wikipedia.org/wiki/A*_search_algorithm#Pseudocode
    //
    // Positions are never updated in place within the frontier. A cheaper discovery
    // pushes a fresh node, and the superseded ones are discarded when popped.
    pub fn run(&self, from: Point, to: Point) -> Result<Settled, SearchError> {
        if !self.map.in_bounds(from) || !self.map.in_bounds(to) {
            return Err(SearchError::NoPathFound { from, to });
        }

        let mut nodes = Vec::new();
        let mut open_set = BinaryHeap::new();
        let mut stats = SearchStats::default();

        // key: position
        // value: cheapest cost with which the position was ever pushed
        let mut cheapest_pushed = HashMap::new();

        // key: position
        // value: final cost of cheapest path from start
        let mut closed: HashMap<Point, u32> = HashMap::new();

        cheapest_pushed.insert(from, 0);
        push(
            &mut nodes,
            &mut open_set,
            &mut stats,
            SearchNode {
                position: from,
                g: 0,
                h: self.estimate(from, to),
                predecessor: None,
            },
        );

        while let Some(FrontierEntry { node: id, .. }) = open_set.pop() {
            let current = nodes[id.0];
            let position = current.position;

            let already_settled = closed.get(&position).is_some_and(|&g| g <= current.g);
            let superseded = cheapest_pushed
                .get(&position)
                .is_some_and(|&g| g < current.g);
            if already_settled || superseded {
                stats.stale += 1;
                tracing::trace!(?position, g = current.g, "skipping stale frontier entry");
                continue;
            }

            closed.insert(position, current.g);
            stats.expanded += 1;

            if position == to {
                tracing::debug!(
                    ?from,
                    ?to,
                    cost = current.g,
                    expanded = stats.expanded,
                    pushed = stats.pushed,
                    stale = stats.stale,
                    "search reached destination"
                );
                return Ok(Settled {
                    from,
                    nodes,
                    terminal: id,
                    closed,
                    stats,
                });
            }

            for neighbor in self.map.orthogonal_adjacencies(position) {
                if closed.contains_key(&neighbor) {
                    continue;
                }

                let tentative_g = current.g + self.cost(neighbor);
                if cheapest_pushed
                    .get(&neighbor)
                    .is_some_and(|&best| best <= tentative_g)
                {
                    continue;
                }

                // this path to the neighbor is better than any previous one
                cheapest_pushed.insert(neighbor, tentative_g);
                push(
                    &mut nodes,
                    &mut open_set,
                    &mut stats,
                    SearchNode {
                        position: neighbor,
                        g: tentative_g,
                        h: self.estimate(neighbor, to),
                        predecessor: Some(id),
                    },
                );
            }
        }

        tracing::debug!(?from, ?to, expanded = stats.expanded, "frontier exhausted");
        Err(SearchError::NoPathFound { from, to })
    }
}

fn push(
    nodes: &mut Vec<SearchNode>,
    open_set: &mut BinaryHeap<FrontierEntry>,
    stats: &mut SearchStats,
    node: SearchNode,
) {
    let id = NodeId(nodes.len());
    open_set.push(FrontierEntry {
        f: OrderedFloat(node.f()),
        sequence: stats.pushed,
        node: id,
    });
    nodes.push(node);
    stats.pushed += 1;
}

impl<Tile> Map<Tile>
where
    Tile: Clone + Into<u32>,
{
    /// navigate between the given points using A*
    pub fn navigate(
        &self,
        from: Point,
        to: Point,
        heuristic: impl Heuristic,
    ) -> Result<Path, SearchError> {
        let settled = SearchEngine::new(self, heuristic).run(from, to)?;
        Path::reconstruct(self, &settled)
    }

    /// Find the cheapest path from the top left to the bottom right of this map.
    pub fn lowest_risk_path(&self, heuristic: impl Heuristic) -> Result<Path, SearchError> {
        self.navigate(self.top_left(), self.bottom_right(), heuristic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::map::{tile::Digit, Dijkstra, Euclidean, Manhattan};
    use std::collections::HashSet;

    fn parse(input: &str) -> Map<Digit> {
        <Map<Digit> as TryFrom<&str>>::try_from(input.trim()).unwrap()
    }

    fn run(map: &Map<Digit>) -> Settled {
        SearchEngine::new(map, Euclidean)
            .run(map.top_left(), map.bottom_right())
            .unwrap()
    }

    #[test]
    fn test_frontier_is_min_heap_with_insertion_tiebreak() {
        let mut heap = BinaryHeap::new();
        for (sequence, f) in [(0, 3.0), (1, 1.0), (2, 2.0), (3, 1.0)] {
            heap.push(FrontierEntry {
                f: OrderedFloat(f),
                sequence,
                node: NodeId(sequence),
            });
        }
        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|entry| entry.sequence)).collect();
        assert_eq!(order, vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_small_example() {
        let map = parse("116\n138\n213");
        assert_eq!(run(&map).cost(), 7);
    }

    #[test]
    fn test_uniform_grid_costs_two_n_minus_two() {
        for n in 1..=12 {
            let map = Map::procedural(n, n, |_| 1_u32);
            let settled = SearchEngine::new(&map, Euclidean)
                .run(map.top_left(), map.bottom_right())
                .unwrap();
            assert_eq!(settled.cost(), 2 * n as u32 - 2);
        }
    }

    #[test]
    fn test_single_tile_costs_nothing() {
        let settled = run(&parse("9"));
        assert_eq!(settled.cost(), 0);
        assert_eq!(settled.terminal().predecessor, None);
    }

    #[test]
    fn test_start_cost_is_excluded() {
        // entering the start is free, entering the only other tile costs 1
        assert_eq!(run(&parse("91")).cost(), 1);
    }

    #[test]
    fn test_empty_map_has_no_path() {
        let map = parse("");
        let err = SearchEngine::new(&map, Euclidean)
            .run(map.top_left(), map.bottom_right())
            .unwrap_err();
        assert!(matches!(err, SearchError::NoPathFound { .. }));
    }

    #[test]
    fn test_out_of_bounds_endpoint_has_no_path() {
        let map = parse("11\n11");
        let err = SearchEngine::new(&map, Euclidean)
            .run(Point::new(0, 0), Point::new(2, 0))
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::NoPathFound {
                from: Point::new(0, 0),
                to: Point::new(2, 0)
            }
        );
    }

    #[test]
    fn test_expensive_walls_are_still_crossed() {
        // the destination is fenced in by nines, but there is always an orthogonal way in
        let map = parse("1199\n1999\n9991\n9919");
        let settled = run(&map);
        let dijkstra = SearchEngine::new(&map, Dijkstra)
            .run(map.top_left(), map.bottom_right())
            .unwrap();
        assert_eq!(settled.cost(), dijkstra.cost());
    }

    #[test]
    fn test_closed_set_bounded_and_consistent() {
        let map = parse(
            "1163751742\n1381373672\n2136511328\n3694931569\n7463417111\n\
             1319128137\n1359912421\n3125421639\n1293138521\n2311944581",
        );
        let settled = run(&map);
        assert!(settled.closed_len() <= map.area());
        assert_eq!(settled.stats().expanded, settled.closed_len());
        assert!(settled.stats().pushed >= settled.stats().expanded + settled.stats().stale);
        assert_eq!(settled.closed_cost(map.bottom_right()), Some(40));
        assert_eq!(settled.closed_cost(map.top_left()), Some(0));
    }

    #[test]
    fn test_g_never_decreases_along_chain() {
        let map = parse("1163751742\n1381373672\n2136511328\n3694931569");
        let settled = run(&map);
        let mut node = settled.terminal();
        while let Some(pred) = node.predecessor {
            let pred = settled.node(pred).unwrap();
            assert!(pred.g <= node.g);
            node = pred;
        }
        assert_eq!(node.position, map.top_left());
    }

    #[test]
    fn test_heuristics_agree() {
        let map = parse("1163751742\n1381373672\n2136511328\n3694931569\n7463417111");
        let costs: HashSet<u32> = [
            SearchEngine::new(&map, Euclidean)
                .run(map.top_left(), map.bottom_right())
                .unwrap()
                .cost(),
            SearchEngine::new(&map, Manhattan)
                .run(map.top_left(), map.bottom_right())
                .unwrap()
                .cost(),
            SearchEngine::new(&map, Dijkstra)
                .run(map.top_left(), map.bottom_right())
                .unwrap()
                .cost(),
        ]
        .into();
        assert_eq!(costs.len(), 1);
    }

    #[test]
    fn test_free_tiles_do_not_mislead_the_estimate() {
        let map = parse("00\n20\n03\n00");
        for cost in [
            SearchEngine::new(&map, Euclidean)
                .run(map.top_left(), map.bottom_right())
                .unwrap()
                .cost(),
            SearchEngine::new(&map, Manhattan)
                .run(map.top_left(), map.bottom_right())
                .unwrap()
                .cost(),
        ] {
            assert_eq!(cost, 2);
        }
        assert_eq!(map.lowest_risk_path(Euclidean).unwrap().total_risk(), 2);
    }

    #[test]
    fn test_estimate_scales_with_cheapest_tile() {
        let map = Map::procedural(4, 4, |_| 3_u32);
        let engine = SearchEngine::new(&map, Manhattan);
        assert_eq!(engine.estimate(Point::new(0, 0), Point::new(3, 3)), 18.0);
        assert_eq!(
            engine.run(map.top_left(), map.bottom_right()).unwrap().cost(),
            18
        );

        let free = parse("01\n11");
        let engine = SearchEngine::new(&free, Manhattan);
        assert_eq!(engine.estimate(Point::new(0, 0), Point::new(1, 1)), 0.0);
    }

    #[test]
    fn test_navigate_between_interior_points() {
        let map = parse("111\n191\n111");
        let path = map
            .navigate(Point::new(0, 1), Point::new(2, 1), Euclidean)
            .unwrap();
        // around the nine rather than through it
        assert_eq!(path.total_risk(), 4);
        assert_eq!(path.len(), 4);
    }
}
