//! Block/byte size quantities and human-readable byte formatting
//!
//! The tool reports offsets and sizes as `"<blocks>/<bytes>"` tokens, where a
//! block is its native allocation unit. The two numbers come from independent
//! report columns, so no arithmetic relation between them is assumed or
//! checked here.

use crate::error::{FormatError, Result};
use std::cmp::Ordering;
use std::fmt;

/// Metric unit prefixes used by [`human_size`], smallest to largest
const UNIT_PREFIXES: [&str; 9] = ["", "k", "M", "G", "T", "P", "E", "Z", "Y"];

/// Format a byte count as a thousands-grouped integer with a metric prefix
///
/// The magnitude is divided by 1000 while its absolute value stays at or
/// above 1000 and the prefix ladder is not exhausted, then rendered without
/// a fractional part: `human_size(61440)` is `"61kB"`, `human_size(999_999)`
/// rounds up to `"1,000kB"`. Zero and negative inputs are valid; comparisons
/// use the absolute value.
pub fn human_size(bytes: i128) -> String {
    let mut magnitude = bytes as f64;
    for prefix in &UNIT_PREFIXES[..UNIT_PREFIXES.len() - 1] {
        if magnitude.abs() < 1000.0 {
            return format!("{}{prefix}B", group_thousands(round_half_even(magnitude)));
        }
        magnitude /= 1000.0;
    }
    format!(
        "{}{}B",
        group_thousands(round_half_even(magnitude)),
        UNIT_PREFIXES[UNIT_PREFIXES.len() - 1]
    )
}

fn round_half_even(magnitude: f64) -> i128 {
    magnitude.round_ties_even() as i128
}

/// Render an integer with `,` thousands separators
fn group_thousands(value: i128) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// A block count plus a byte count, as one listing-report token
///
/// Parsed from the `"<blocks>/<bytes>"` form used in the offset and size
/// columns of the listing report. The human-readable rendering is cached and
/// recomputed when either field is mutated; in practice quantities are
/// immutable once a listing has been built.
#[derive(Debug, Clone)]
pub struct SizeQuantity {
    blocks: u64,
    bytes: u64,
    display: String,
}

impl SizeQuantity {
    /// Create a quantity from raw block and byte counts
    pub fn new(blocks: u64, bytes: u64) -> Self {
        let display = render(blocks, bytes);
        Self {
            blocks,
            bytes,
            display,
        }
    }

    /// Parse a `"<blocks>/<bytes>"` token
    pub fn parse(token: &str) -> Result<Self> {
        let (blocks, bytes) = token
            .split_once('/')
            .ok_or_else(|| FormatError::InvalidSizeToken(token.to_string()))?;
        let blocks = blocks
            .trim()
            .parse::<u64>()
            .map_err(|_| FormatError::InvalidSizeToken(token.to_string()))?;
        let bytes = bytes
            .trim()
            .parse::<u64>()
            .map_err(|_| FormatError::InvalidSizeToken(token.to_string()))?;
        Ok(Self::new(blocks, bytes))
    }

    /// Block count, the tool's native allocation unit
    pub fn blocks(&self) -> u64 {
        self.blocks
    }

    /// Raw byte count
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Replace the block count, refreshing the cached rendering
    pub fn set_blocks(&mut self, blocks: u64) {
        self.blocks = blocks;
        self.display = render(self.blocks, self.bytes);
    }

    /// Replace the byte count, refreshing the cached rendering
    pub fn set_bytes(&mut self, bytes: u64) {
        self.bytes = bytes;
        self.display = render(self.blocks, self.bytes);
    }

    /// Re-render the exact `"<blocks>/<bytes>"` token this was parsed from
    pub fn token(&self) -> String {
        format!("{}/{}", self.blocks, self.bytes)
    }
}

fn render(blocks: u64, bytes: u64) -> String {
    format!(
        "{} / {}",
        group_thousands(i128::from(blocks)),
        human_size(i128::from(bytes))
    )
}

impl fmt::Display for SizeQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

// Equality and ordering cover the two counts; the cached rendering is
// derived from them and takes no part in comparisons. Blocks are the
// primary sort key, bytes break ties.
impl PartialEq for SizeQuantity {
    fn eq(&self, other: &Self) -> bool {
        self.blocks == other.blocks && self.bytes == other.bytes
    }
}

impl Eq for SizeQuantity {}

impl PartialOrd for SizeQuantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SizeQuantity {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.blocks, self.bytes).cmp(&(other.blocks, other.bytes))
    }
}
