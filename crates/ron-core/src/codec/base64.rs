//! Base-64 digit runs and prefix markers.

use crate::constants::{ABC, ABC_PREFIX_BASE, INT60_LEN};

/// Decode up to ten base-64 digits, stopping at the first non-digit byte.
///
/// Returns the number of digits consumed and the accumulated integer
/// (right-aligned). Zero consumed means "no value here".
pub fn unzip_base64(input: &[u8]) -> (usize, u64) {
    let limit = input.len().min(INT60_LEN);
    let mut value = 0u64;
    let mut consumed = 0;
    for &byte in &input[..limit] {
        let code = ABC[byte as usize];
        if code < 0 {
            break;
        }
        value = (value << 6) | code as u64;
        consumed += 1;
    }
    (consumed, value)
}

/// Map a prefix marker byte to its shared-prefix tier (4..=9).
pub fn unzip_prefix_separator(byte: u8) -> Option<usize> {
    let code = ABC[byte as usize];
    if code <= ABC_PREFIX_BASE {
        Some((ABC_PREFIX_BASE - code) as usize + 4)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PREFIX_PUNCT;

    #[test]
    fn unzip_stops_at_non_digit() {
        assert_eq!(unzip_base64(b"12$3"), (2, 64 + 2));
        assert_eq!(unzip_base64(b"$"), (0, 0));
        assert_eq!(unzip_base64(b""), (0, 0));
    }

    #[test]
    fn unzip_reads_at_most_ten_digits() {
        let (n, value) = unzip_base64(b"~~~~~~~~~~~~");
        assert_eq!(n, 10);
        assert_eq!(value, (1 << 60) - 1);
    }

    #[test]
    fn prefix_markers_map_to_tiers() {
        for (i, &marker) in PREFIX_PUNCT.iter().enumerate() {
            assert_eq!(unzip_prefix_separator(marker), Some(i + 4));
        }
        assert_eq!(unzip_prefix_separator(b'A'), None);
        assert_eq!(unzip_prefix_separator(b'+'), None);
    }
}
