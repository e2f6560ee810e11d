use serde::Deserialize;
use smallstr::SmallString;
use std::{convert::TryFrom, marker::PhantomData};

/// Number of characters below which the [`Chunks`] iterator does not allocate.
pub const CHUNK_WIDTH: usize = 4;

/// A type implementing `DisplayWidth` has a constant width for display and parsing.
///
/// This makes it suitable for 2d cartesian maps.
pub trait DisplayWidth {
    const DISPLAY_WIDTH: usize;

    /// Split a string into an iterator of chunks of characters of length `DISPLAY_WIDTH`
    fn chunks(s: &str) -> Chunks<'_, Self> {
        Chunks(s.chars(), PhantomData)
    }
}

/// Iterator of chunks of equal width from a string.
///
/// Created with [`DisplayWidth::chunks`]. Never heap-allocates if `T::DISPLAY_WIDTH <= CHUNK_WIDTH`.
///
/// A trailing partial chunk is still yielded, so that a line whose length is not a
/// multiple of the width fails to parse instead of being silently truncated.
pub struct Chunks<'a, T: ?Sized>(std::str::Chars<'a>, PhantomData<T>);

impl<T: DisplayWidth> Iterator for Chunks<'_, T> {
    // 4 bytes in a max-width char
    type Item = SmallString<[u8; 4 * CHUNK_WIDTH]>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut s = SmallString::new();
        for _ in 0..T::DISPLAY_WIDTH {
            match self.0.next() {
                Some(ch) => s.push(ch),
                None => break,
            }
        }
        (!s.is_empty()).then_some(s)
    }
}

/// A Tile which contains a single digit.
///
/// Its range is `0..=9`. As a risk level, it is the price of entering the tile.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
)]
#[display("{0}")]
#[from_str(regex = r"(?P<0>\d)")]
pub struct Digit(u8);

impl Digit {
    /// Produce a digit from an arbitrary value according to a wrap rule.
    pub fn wrapping(value: u32, rule: WrapRule) -> Digit {
        // both rules leave values in 0..=9 alone and map everything else into 0..=9
        Digit(rule.wrap(value) as u8)
    }
}

impl DisplayWidth for Digit {
    const DISPLAY_WIDTH: usize = 1;
}

impl From<Digit> for u8 {
    fn from(Digit(value): Digit) -> Self {
        value
    }
}

impl From<Digit> for u32 {
    fn from(Digit(value): Digit) -> Self {
        value.into()
    }
}

impl TryFrom<u8> for Digit {
    type Error = DigitRangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        (value < 10)
            .then_some(Digit(value))
            .ok_or(DigitRangeError(value))
    }
}

/// A value did not fit in a single digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} is not a single digit")]
pub struct DigitRangeError(pub u8);

/// How a value greater than 9 is folded back into a [`Digit`].
///
/// Values in `0..=9` are never changed by either rule. The rules disagree on
/// exact multiples of 9: `18` becomes `9` when cyclic, but `0` under `Modulo`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WrapRule {
    /// Values cycle `1, 2, ..., 9, 1, ...`: `((v - 1) mod 9) + 1`.
    ///
    /// Never produces a zero from a value above 9.
    #[default]
    Cyclic,
    /// Values above 9 become `v mod 9`.
    ///
    /// Can produce zero-cost tiles.
    Modulo,
}

impl WrapRule {
    /// Apply this rule to a value.
    pub fn wrap(self, value: u32) -> u32 {
        if value <= 9 {
            return value;
        }
        match self {
            WrapRule::Cyclic => (value - 1) % 9 + 1,
            WrapRule::Modulo => value % 9,
        }
    }
}
