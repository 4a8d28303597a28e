//! Offset pagination
//!
//! `skip`/`take` windows over an already filtered and sorted sequence.

/// Offset used when `skip` is missing or invalid
pub const DEFAULT_SKIP: usize = 0;

/// Page size used when `take` is missing or invalid
pub const DEFAULT_TAKE: usize = 10;

/// A `[skip, skip + take)` window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub take: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIP,
            take: DEFAULT_TAKE,
        }
    }
}

impl Page {
    /// Parse raw `skip` and `take` values
    ///
    /// Each value is read up to its first non-digit, so `"1.5"` is 1 and
    /// `"10px"` is 10. Without leading digits, or negative, `skip` becomes 0.
    /// Without leading digits, zero or negative, `take` becomes 10. Values too
    /// large for `usize` saturate.
    pub fn parse(skip: Option<&str>, take: Option<&str>) -> Self {
        Self {
            skip: parse_count(skip)
                .filter(|skip| *skip >= 0)
                .map_or(DEFAULT_SKIP, to_usize),
            take: parse_count(take)
                .filter(|take| *take > 0)
                .map_or(DEFAULT_TAKE, to_usize),
        }
    }

    /// Bounds of this page within a sequence of `len` items
    ///
    /// Returns an empty range when `skip` is past the end.
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let start = self.skip.min(len);
        let end = self.skip.saturating_add(self.take).min(len);
        (start, end)
    }

    /// Take this page out of `items`
    pub fn apply<T>(&self, mut items: Vec<T>) -> Vec<T> {
        let (start, end) = self.bounds(items.len());
        items.truncate(end);
        items.drain(..start);
        items
    }
}

/// Leading optionally signed integer of `input`, saturating on overflow
fn parse_count(input: Option<&str>) -> Option<i128> {
    let input = input?.trim_start();
    let (negative, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i128, |acc, b| {
        acc.saturating_mul(10).saturating_add(i128::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

fn to_usize(value: i128) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}
