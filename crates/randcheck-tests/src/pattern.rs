//! Fingerprint and pattern utilities.

use std::collections::BTreeMap;

use flate2::Crc;

use crate::error::{RandomnessError, Result};

/// CRC-32 (IEEE) over the low byte of each sample, in order.
///
/// An order-sensitive identity tag for a run, not a cryptographic digest.
pub fn crc32(samples: &[i64]) -> u32 {
    let bytes: Vec<u8> = samples.iter().map(|&v| (v & 0xFF) as u8).collect();
    let mut crc = Crc::new();
    crc.update(&bytes);
    crc.sum()
}

/// Index of the first contiguous occurrence of `pattern`, `None` if absent.
pub fn find_pattern(samples: &[i64], pattern: &[i64]) -> Result<Option<usize>> {
    if pattern.is_empty() {
        return Err(RandomnessError::InvalidArgument(
            "pattern must not be empty".to_string(),
        ));
    }
    if pattern.len() > samples.len() {
        return Ok(None);
    }
    Ok(samples.windows(pattern.len()).position(|w| w == pattern))
}

/// Every value seen at least twice, mapped to all of its indices in order.
pub fn duplicate_positions(samples: &[i64]) -> BTreeMap<i64, Vec<usize>> {
    let mut positions: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (i, &v) in samples.iter().enumerate() {
        positions.entry(v).or_default().push(i);
    }
    positions.retain(|_, idx| idx.len() > 1);
    positions
}

/// Length of the longest block of equal adjacent values (1 for any non-empty input).
pub fn longest_repeat_run(samples: &[i64]) -> usize {
    if samples.is_empty() {
        return 0;
    }
    let mut longest = 1usize;
    let mut current = 1usize;
    for pair in samples.windows(2) {
        if pair[0] == pair[1] {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
    }
    longest
}
