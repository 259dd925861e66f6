use std::{cmp::Ordering, fmt};

use anyhow::{bail, Result};
use serde::Serialize;

/// Integer value of a chapter / verse key, of any size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct KeyNumber {
    negative: bool,
    digits: String, // no leading zeros, "0" for zero
}

impl Ord for KeyNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        let magnitude = self
            .digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(&other.digits));

        match (self.negative, other.negative) {
            (false, false) => magnitude,
            (true, true) => magnitude.reverse(),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl PartialOrd for KeyNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for KeyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.digits)
    }
}

// Chapter / verse keys: surrounding whitespace and a leading sign are accepted
pub fn parse_number(s: &str) -> Result<KeyNumber> {
    let trimmed = s.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if unsigned.is_empty() || !unsigned.chars().all(|c| c.is_ascii_digit()) {
        bail!("Failed to parse {:?} as a number", s);
    }

    let digits = match unsigned.trim_start_matches('0') {
        "" => "0",
        d => d,
    };

    Ok(KeyNumber {
        negative: negative && digits != "0",
        digits: digits.to_owned(),
    })
}
