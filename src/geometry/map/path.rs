use super::{Map, SearchError, Settled};
use crate::geometry::{Direction, Point};
use bitvec::bitvec;

/// A path found by a search, from its start to its destination inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    points: Vec<Point>,
    total_risk: u32,
}

impl Path {
    /// Walk the predecessor chain of a finished search back to its start.
    ///
    /// The total risk is the sum of every tile entered along the way; the start
    /// tile itself is never entered.
    ///
    /// Fails with [`SearchError::InvalidChain`] if the chain leaves the map, revisits
    /// a position, or ends anywhere but the start. A chain can never be longer than
    /// the map's area without revisiting something.
    pub fn reconstruct<Tile>(map: &Map<Tile>, settled: &Settled) -> Result<Path, SearchError>
    where
        Tile: Clone + Into<u32>,
    {
        let terminal = settled.terminal();
        let invalid = |reached: Point, steps: usize| SearchError::InvalidChain {
            start: settled.from(),
            terminal: terminal.position,
            reached,
            steps,
        };

        let mut visited = bitvec![0; map.area()];
        let mut points = Vec::new();
        let mut total_risk: u32 = 0;
        let mut node = terminal;

        loop {
            let position = node.position;
            if !map.in_bounds(position) {
                return Err(invalid(position, points.len()));
            }
            let index = map.point2index(position);
            if visited[index] {
                return Err(invalid(position, points.len()));
            }
            visited.set(index, true);
            points.push(position);

            let Some(predecessor) = node.predecessor else {
                break;
            };
            let risk: u32 = map[position].clone().into();
            total_risk += risk;
            node = settled
                .node(predecessor)
                .ok_or_else(|| invalid(position, points.len()))?;
        }

        if node.position != settled.from() {
            return Err(invalid(node.position, points.len() - 1));
        }

        points.reverse();
        Ok(Path { points, total_risk })
    }

    /// The positions visited, starting with the start and ending with the destination.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Sum of the risk of every tile entered.
    pub fn total_risk(&self) -> u32 {
        self.total_risk
    }

    /// Number of moves along this path.
    pub fn len(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// `true` when the start is the destination.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The moves which make up this path, in order.
    pub fn directions(&self) -> Vec<Direction> {
        self.points
            .windows(2)
            .filter_map(|pair| {
                Direction::iter().find(|&direction| pair[0] + direction == pair[1])
            })
            .collect()
    }
}
