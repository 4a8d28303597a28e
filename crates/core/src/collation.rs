//! Locale-aware natural string collation
//!
//! Strings are turned into a [`CollationKey`], a sequence of units that compare
//! in a fixed total order:
//!
//! - digit runs (ASCII, Arabic-Indic and Persian digits) compare by numeric value,
//!   so `"item2"` sorts before `"item10"`;
//! - letters compare case- and diacritic-insensitively, Persian letters in
//!   Persian alphabetical order (`پ` after `ب`, `گ` after `ک`), with the Arabic
//!   forms of kaf, yeh and teh marbuta folded onto their Persian counterparts;
//! - zero-width joiners and tatweel are ignored.
//!
//! Unit classes order as symbols, then numbers, then letters.

use std::cmp::Ordering;

use serde_json::Number;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Persian alphabet in collation order, with hamza first
const PERSIAN_ALPHABET: [char; 33] = [
    'ء', 'ا', 'ب', 'پ', 'ت', 'ث', 'ج', 'چ', 'ح', 'خ', 'د', 'ذ', 'ر', 'ز', 'ژ', 'س', 'ش', 'ص', 'ض',
    'ط', 'ظ', 'ع', 'غ', 'ف', 'ق', 'ک', 'گ', 'ل', 'م', 'ن', 'و', 'ه', 'ی',
];

/// Persian letters are weighted as a block anchored at the first Arabic letter
const PERSIAN_ANCHOR: char = '\u{0621}';

/// Exact decimal number used for digit runs and JSON numbers
///
/// Kept normalized (no leading integer zeros, no trailing fraction zeros, no
/// negative zero) so that derived equality agrees with [`Ord`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Numeral {
    negative: bool,
    integer: String,
    fraction: String,
}

impl Numeral {
    fn new(negative: bool, integer: &str, fraction: &str) -> Self {
        let integer = integer.trim_start_matches('0').to_string();
        let fraction = fraction.trim_end_matches('0').to_string();
        let negative = negative && !(integer.is_empty() && fraction.is_empty());
        Self {
            negative,
            integer,
            fraction,
        }
    }

    /// Parse a plain decimal such as `42`, `-3.50` or `۱۲۰۰۰`
    ///
    /// Persian and Arabic-Indic digits are accepted. Exponents, separators and
    /// surrounding text are not.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (negative, unsigned) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input.strip_prefix('+').unwrap_or(input)),
        };
        let (integer, fraction) = match unsigned.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (unsigned, ""),
        };
        if integer.is_empty() && fraction.is_empty() {
            return None;
        }

        let integer = ascii_digits(integer)?;
        let fraction = ascii_digits(fraction)?;
        Some(Self::new(negative, &integer, &fraction))
    }

    /// Exact value of a JSON number
    pub fn from_json(number: &Number) -> Option<Self> {
        if let Some(i) = number.as_i64() {
            return Self::parse(&i.to_string());
        }
        if let Some(u) = number.as_u64() {
            return Self::parse(&u.to_string());
        }
        // f64 Display never uses exponent notation
        number
            .as_f64()
            .filter(|f| f.is_finite())
            .and_then(|f| Self::parse(&f.to_string()))
    }

    fn from_digit_run(digits: &str) -> Self {
        Self::new(false, digits, "")
    }

    fn magnitude_cmp(&self, other: &Self) -> Ordering {
        self.integer
            .len()
            .cmp(&other.integer.len())
            .then_with(|| self.integer.cmp(&other.integer))
            .then_with(|| self.fraction.cmp(&other.fraction))
    }
}

impl Ord for Numeral {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.magnitude_cmp(other),
            (true, true) => self.magnitude_cmp(other).reverse(),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Numeral {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Unit {
    Symbol(char),
    Number(Numeral),
    Letter(u32),
}

/// Precomputed comparison key for one value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollationKey(Vec<Unit>);

impl CollationKey {
    pub fn new(text: &str) -> Self {
        let mut units = Vec::new();
        let mut digits = String::new();

        for c in text.nfd().flat_map(char::to_lowercase) {
            if is_ignorable(c) {
                continue;
            }
            if let Some(d) = ascii_digit(c) {
                digits.push(d);
                continue;
            }
            if !digits.is_empty() {
                units.push(Unit::Number(Numeral::from_digit_run(&digits)));
                digits.clear();
            }

            let c = fold_arabic(c);
            units.push(if c.is_alphabetic() {
                Unit::Letter(letter_weight(c))
            } else {
                Unit::Symbol(c)
            });
        }

        if !digits.is_empty() {
            units.push(Unit::Number(Numeral::from_digit_run(&digits)));
        }

        Self(units)
    }
}

impl From<Numeral> for CollationKey {
    fn from(numeral: Numeral) -> Self {
        Self(vec![Unit::Number(numeral)])
    }
}

/// Compare two strings with natural, Persian-aware collation
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

/// Map a Persian, Arabic-Indic or ASCII digit to its ASCII form
fn ascii_digit(c: char) -> Option<char> {
    let offset = match c {
        '0'..='9' => return Some(c),
        '\u{0660}'..='\u{0669}' => c as u32 - 0x0660,
        '\u{06F0}'..='\u{06F9}' => c as u32 - 0x06F0,
        _ => return None,
    };
    char::from_digit(offset, 10)
}

fn ascii_digits(input: &str) -> Option<String> {
    input.chars().map(ascii_digit).collect()
}

fn is_ignorable(c: char) -> bool {
    is_combining_mark(c) || matches!(c, '\u{0640}' | '\u{200C}' | '\u{200D}')
}

fn fold_arabic(c: char) -> char {
    match c {
        // kaf
        '\u{0643}' => 'ک',
        // yeh, alef maksura
        '\u{064A}' | '\u{0649}' => 'ی',
        // teh marbuta, ae
        '\u{0629}' | '\u{06D5}' => 'ه',
        _ => c,
    }
}

fn letter_weight(c: char) -> u32 {
    match PERSIAN_ALPHABET.iter().position(|&letter| letter == c) {
        Some(index) => ((PERSIAN_ANCHOR as u32) << 8) | index as u32,
        None => (c as u32) << 8,
    }
}
