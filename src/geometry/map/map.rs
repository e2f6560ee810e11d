use super::tile::DisplayWidth;
use crate::geometry::{Direction, Point};
use itertools::Itertools;
use std::{fmt, hash, io, ops::Index, str::FromStr};

/// A Map keeps track of a tile grid.
///
/// Its coordinate system places the origin at the top left: the first line of
/// input is row `y = 0`, and the first character of each line is column `x = 0`.
///
/// Maps are rectangular by construction.
///
/// ## Entry Points
///
/// - [`Map::procedural`] computes each tile from its position.
/// - When a map is provided as the day's input, use [`Map::try_from`] or
///   [`Map::try_from_lines`].
///
/// ## Panics
///
/// Several internal methods assume that the width and height of the map can be
/// represented in an `i32`. Very large maps may panic if that assumption is violated.
#[derive(Clone, Default)]
pub struct Map<Tile> {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl<Tile> Map<Tile> {
    /// Procedurally create a new `Map` from a function.
    pub fn procedural(width: usize, height: usize, procedure: impl Fn(Point) -> Tile) -> Map<Tile> {
        let area = width * height;
        let mut map = Map {
            tiles: Vec::with_capacity(area),
            width,
            height,
        };
        for idx in 0..area {
            let point = map.index2point(idx);
            map.tiles.push(procedure(point));
        }
        map
    }

    /// Width of this map.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of this map.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of tiles in this map.
    #[inline]
    pub fn area(&self) -> usize {
        self.tiles.len()
    }

    /// `true` when this map has no tiles at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Highest x coordinate which is in bounds of this map.
    ///
    /// Note that this is inclusive; use `..=` when using this to bound a range.
    #[inline]
    pub fn high_x(&self) -> i32 {
        self.width as i32 - 1
    }

    /// Highest y coordinate which is in bounds of this map.
    ///
    /// Note that this is inclusive; use `..=` when using this to bound a range.
    #[inline]
    pub fn high_y(&self) -> i32 {
        self.height as i32 - 1
    }

    /// The coordinates of the top left corner of this map: always `(0, 0)`.
    ///
    /// This is only a valid index if the map is not empty.
    #[inline]
    pub fn top_left(&self) -> Point {
        Point::default()
    }

    /// The coordinates of the bottom right corner of this map.
    ///
    /// This is only a valid index if the map is not empty.
    #[inline]
    pub fn bottom_right(&self) -> Point {
        Point::new(self.high_x(), self.high_y())
    }

    /// Iterate over the points and tiles of this map, row by row from the top.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Tile)> {
        let index2point = self.make_index2point();
        self.tiles
            .iter()
            .enumerate()
            .map(move |(idx, tile)| (index2point(idx), tile))
    }

    /// `true` when a point is legal within the bounds of this map.
    #[inline]
    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0 && point.y >= 0 && point.x <= self.high_x() && point.y <= self.high_y()
    }

    /// Make a function which returns `true` when the parameter is within the bounds of this map,
    /// without depending on the lifetime of `self`.
    pub fn make_in_bounds(&self) -> impl Fn(Point) -> bool {
        let high_x = self.high_x();
        let high_y = self.high_y();

        move |point| point.x >= 0 && point.y >= 0 && point.x <= high_x && point.y <= high_y
    }

    /// The tile at `point`, or `None` if it is out of range.
    pub fn get(&self, point: Point) -> Option<&Tile> {
        self.in_bounds(point)
            .then(|| self.tiles.get(self.point2index(point)))
            .flatten()
    }

    /// convert a 2d point into a 1d index into the tiles
    ///
    /// The point must be in bounds.
    pub(crate) fn point2index(&self, point: Point) -> usize {
        point.x as usize + (point.y as usize * self.width)
    }

    /// convert a 1d index in the tiles into a 2d point
    fn index2point(&self, idx: usize) -> Point {
        (idx % self.width, idx / self.width).into()
    }

    /// make a function which converts a 1d index in the tiles into a 2d point without borrowing self
    fn make_index2point(&self) -> impl Fn(usize) -> Point {
        let width = self.width;
        move |idx| (idx % width, idx / width).into()
    }

    /// Return an iterator of all legal points orthogonally adjacent to the given point.
    ///
    /// This iterator will return up to 4 elements; it does not include diagonals.
    /// Out-of-range neighbors are simply absent.
    pub fn orthogonal_adjacencies(&self, point: Point) -> impl Iterator<Item = Point> {
        let in_bounds = self.make_in_bounds();
        Direction::iter()
            .map(move |direction| point + direction)
            .filter(move |&point| in_bounds(point))
    }
}

impl<Tile> fmt::Debug for Map<Tile> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(&format!("Map<{}>", std::any::type_name::<Tile>()))
            .field("width", &self.width)
            .field("height", &self.height)
            .field("tiles", &format_args!("[...; {}]", self.tiles.len()))
            .finish()
    }
}

impl<Tile: hash::Hash> hash::Hash for Map<Tile> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.tiles.hash(state);
        self.width.hash(state);
        self.height.hash(state);
    }
}

impl<Tile: PartialEq> PartialEq for Map<Tile> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.tiles == other.tiles
    }
}

impl<Tile: Eq> Eq for Map<Tile> {}

impl<Tile> Map<Tile>
where
    Tile: DisplayWidth + FromStr,
    <Tile as FromStr>::Err: 'static + std::error::Error + Send + Sync,
{
    /// Try to convert the contents of a reader into a map.
    ///
    /// We don't actually `impl<T, R> TryFrom<R> for Map<T>` because there's a
    /// coherence conflict with the stdlib blanket impl
    ///
    /// ```rust,ignore
    /// impl<T, U> std::convert::TryFrom<U> for T where U: std::convert::Into<T>;
    /// ```
    ///
    /// Because there's a chance that `R` also implements `Into<Map<T>>`, we can't do it.
    ///
    /// That doesn't stop us from doing it here, and implementing the official trait for
    /// a few concrete types
    pub fn try_from<R>(input: R) -> Result<Self, MapConversionErr>
    where
        R: io::BufRead,
    {
        Self::try_from_lines(input.lines())
    }

    /// Try to convert a sequence of lines into a map.
    ///
    /// The first line is the top row. Trailing whitespace is ignored, and blank lines
    /// are skipped. Every remaining line must contain the same number of tiles.
    pub fn try_from_lines<I, S>(lines: I) -> Result<Self, MapConversionErr>
    where
        I: IntoIterator<Item = io::Result<S>>,
        S: AsRef<str>,
    {
        let mut tiles = Vec::new();
        let mut width = None;
        let mut height = 0;

        for (line_no, line) in (1..).zip(lines) {
            let line = line?;
            let line = line.as_ref().trim_end();
            if line.is_empty() {
                continue;
            }

            let row_start = tiles.len();
            for chunk in Tile::chunks(line) {
                tiles.push(Tile::from_str(&chunk).map_err(|err| {
                    MapConversionErr::TileConversion {
                        source: Box::new(err),
                        chunk: chunk.to_string(),
                        line: line_no,
                    }
                })?);
            }

            let row_width = tiles.len() - row_start;
            match width {
                None => width = Some(row_width),
                Some(expected) if expected != row_width => {
                    return Err(MapConversionErr::NotRectangular {
                        line: line_no,
                        expected,
                        found: row_width,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = width.unwrap_or_default();
        tracing::debug!(width, height, "parsed map");
        Ok(Map {
            tiles,
            width,
            height,
        })
    }
}

impl<Tile, Row> TryFrom<&[Row]> for Map<Tile>
where
    Tile: Clone,
    Row: AsRef<[Tile]>,
{
    type Error = MapConversionErr;

    /// Convert an input 2d array into a map.
    ///
    /// The input array is arranged with the y axis as the outer array, so
    /// `source[0][0]` is the top left corner of the map.
    fn try_from(source: &[Row]) -> Result<Self, Self::Error> {
        let width = source.first().map_or(0, |row| row.as_ref().len());
        if let Some((idx, row)) = source
            .iter()
            .find_position(|row| row.as_ref().len() != width)
        {
            return Err(MapConversionErr::NotRectangular {
                line: idx + 1,
                expected: width,
                found: row.as_ref().len(),
            });
        }

        Ok(Map {
            tiles: source
                .iter()
                .flat_map(|row| row.as_ref().iter().cloned())
                .collect(),
            width,
            height: source.len(),
        })
    }
}

impl<Tile> TryFrom<&str> for Map<Tile>
where
    Tile: DisplayWidth + FromStr,
    <Tile as FromStr>::Err: 'static + std::error::Error + Send + Sync,
{
    type Error = MapConversionErr;

    /// the input should be in natural graphical order:
    /// its first characters are the top left.
    fn try_from(input: &str) -> Result<Self, Self::Error> {
        <Self>::try_from(input.as_bytes())
    }
}

impl<Tile> Index<Point> for Map<Tile> {
    type Output = Tile;

    /// Panics if `point` is out of bounds.
    fn index(&self, point: Point) -> &Tile {
        assert!(self.in_bounds(point), "point {point:?} is out of bounds");
        self.tiles.index(self.point2index(point))
    }
}

impl<Tile> fmt::Display for Map<Tile>
where
    Tile: fmt::Display + DisplayWidth,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.width.max(1)) {
            for tile in row {
                write!(f, "{:width$}", tile, width = Tile::DISPLAY_WIDTH)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MapConversionErr {
    #[error("line {line}: converting tile from {chunk:?}")]
    TileConversion {
        #[source]
        source: Box<dyn 'static + std::error::Error + Send + Sync>,
        chunk: String,
        line: usize,
    },
    #[error("map must be rectangular: line {line} has {found} tiles, expected {expected}")]
    NotRectangular {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::map::tile::Digit;
    use std::collections::HashSet;

    fn parse(input: &str) -> Result<Map<Digit>, MapConversionErr> {
        <Map<Digit> as TryFrom<&str>>::try_from(input)
    }

    #[test]
    fn test_procedural() {
        let map = Map::procedural(2, 2, |point| point.x + point.y);
        assert_eq!(map.width, 2);
        assert_eq!(map.height, 2);
        assert_eq!(map.tiles, vec![0, 1, 1, 2]);
        assert!(map.iter().all(|(point, &tile)| point.x + point.y == tile));
    }

    #[test]
    fn test_point_index_conversion() {
        const EDGE: usize = 256;
        const AREA: usize = EDGE * EDGE;

        let map = Map::procedural(EDGE, EDGE, |_| ());
        let mut emitted_points = HashSet::new();
        for idx in 0..AREA {
            let point = map.index2point(idx);
            assert!(
                emitted_points.insert(point),
                "no duplicate point should ever be emitted"
            );
            assert_eq!(idx, map.point2index(point));
        }
    }

    #[test]
    fn test_boundaries() {
        let map = Map::procedural(4, 3, |_| ());

        assert_eq!(map.high_x(), 3);
        assert_eq!(map.high_y(), 2);
        assert_eq!(map.top_left(), Point::new(0, 0));
        assert_eq!(map.bottom_right(), Point::new(3, 2));
    }

    #[test]
    fn test_get_is_bounds_checked() {
        let map = Map::procedural(3, 2, |point| point.x * 10 + point.y);

        assert_eq!(map.get(Point::new(2, 1)), Some(&21));
        assert_eq!(map.get(Point::new(3, 1)), None);
        assert_eq!(map.get(Point::new(2, 2)), None);
        assert_eq!(map.get(Point::new(-1, 0)), None);
        assert_eq!(map.get(Point::new(0, -1)), None);
    }

    #[test]
    fn test_orthogonal_adjacencies() {
        let map = Map::procedural(3, 3, |_| ());

        let corner: HashSet<_> = map.orthogonal_adjacencies(Point::new(0, 0)).collect();
        assert_eq!(corner, [Point::new(1, 0), Point::new(0, 1)].into());

        assert_eq!(map.orthogonal_adjacencies(Point::new(1, 1)).count(), 4);
        assert_eq!(map.orthogonal_adjacencies(Point::new(2, 1)).count(), 3);
    }

    #[test]
    fn test_parse_top_row_first() {
        let map = parse("123\n456\n").unwrap();
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert_eq!(u8::from(map[Point::new(0, 0)]), 1);
        assert_eq!(u8::from(map[Point::new(2, 0)]), 3);
        assert_eq!(u8::from(map[Point::new(0, 1)]), 4);
        assert_eq!(u8::from(map[map.bottom_right()]), 6);
    }

    #[test]
    fn test_parse_tolerates_crlf_and_blank_lines() {
        let map = parse("12\r\n\r\n34\r\n").unwrap();
        assert_eq!(map.width(), 2);
        assert_eq!(map.height(), 2);
    }

    #[test]
    fn test_parse_ragged() {
        let err = parse("123\n45\n678").unwrap_err();
        assert!(matches!(
            err,
            MapConversionErr::NotRectangular {
                line: 2,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_parse_non_digit() {
        let err = parse("123\n4x6").unwrap_err();
        match err {
            MapConversionErr::TileConversion { chunk, line, .. } => {
                assert_eq!(chunk, "x");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty() {
        let map = parse("").unwrap();
        assert!(map.is_empty());
        assert_eq!(map.width(), 0);
        assert_eq!(map.height(), 0);
    }

    #[test]
    fn test_try_from_rows() {
        let rows = [[1, 2, 3], [4, 5, 6]];
        let map: Map<i32> = (&rows[..]).try_into().unwrap();
        assert_eq!(map.width(), 3);
        assert_eq!(map[Point::new(1, 1)], 5);

        let ragged: [&[u8]; 2] = [&[1, 2], &[3]];
        let result: Result<Map<u8>, _> = (&ragged[..]).try_into();
        assert!(matches!(
            result,
            Err(MapConversionErr::NotRectangular { line: 2, .. })
        ));
    }

    #[test]
    fn test_display_round_trip() {
        const GRID: &str = "116\n138\n213\n";
        let map = parse(GRID).unwrap();
        assert_eq!(map.to_string(), GRID);
    }
}
