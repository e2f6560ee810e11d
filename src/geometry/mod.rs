pub mod direction;
pub mod map;
pub mod point;

pub use direction::Direction;
pub use map::{tile, Map, MapConversionErr};
pub use point::Point;
