//! Context-relative encoding of 60-bit integers.
//!
//! Digits are left-aligned: `"1"` is `1 << 54`, trailing zero sextets are
//! never written. A leading prefix marker tells the reader how many leading
//! sextets to copy from the context.

use super::base64::{unzip_base64, unzip_prefix_separator};
use super::prefix::{common_prefix, zero_tail};
use crate::constants::{BASE64, INT60_ERROR, INT60_FULL, INT60_LEN, PREFIX_PUNCT};

/// Append the encoding of `value` relative to `context`; returns bytes written.
///
/// Equal values produce no output. The error sentinel is never used as a
/// compression context.
pub fn format_int(out: &mut Vec<u8>, value: u64, context: u64) -> usize {
    let value = value & INT60_FULL;
    let prefix = if context == INT60_ERROR {
        0
    } else {
        common_prefix(value, context & INT60_FULL)
    };
    if prefix == INT60_LEN {
        return 0;
    }
    let start = out.len();
    let width = INT60_LEN - prefix;
    if prefix > 0 {
        out.push(PREFIX_PUNCT[prefix - 4]);
    }
    let residual = value & low_mask(width);
    if residual == 0 {
        if prefix == 0 {
            out.push(b'0');
        }
        return out.len() - start;
    }
    let (tail, _) = zero_tail(residual);
    for sextet in (tail..width).rev() {
        out.push(BASE64[((residual >> (6 * sextet)) & 63) as usize]);
    }
    out.len() - start
}

/// Append `value` with no prefix marker; always writes at least one digit.
pub fn format_int_flat(out: &mut Vec<u8>, value: u64) -> usize {
    format_int(out, value, INT60_ERROR)
}

/// Decode an integer written by [`format_int`] against the same context.
///
/// Returns the value and the number of bytes consumed. Zero consumed means
/// the token is absent and the value is the context itself.
pub fn parse_int(input: &[u8], context: u64) -> (u64, usize) {
    let Some(&first) = input.first() else {
        return (context, 0);
    };
    let (prefix, mut off) = match unzip_prefix_separator(first) {
        Some(tier) => (tier, 1),
        None => (0, 0),
    };
    let width = INT60_LEN - prefix;
    let limit = input.len().min(off + width);
    let (digits, value) = unzip_base64(&input[off..limit]);
    if off == 0 && digits == 0 {
        return (context, 0);
    }
    off += digits;
    let head = if prefix == 0 {
        0
    } else {
        context & INT60_FULL & !low_mask(width)
    };
    let shift = 6 * (width - digits);
    let tail = if shift >= 64 { 0 } else { value << shift };
    (head | tail, off)
}

fn low_mask(sextets: usize) -> u64 {
    if sextets >= INT60_LEN {
        INT60_FULL
    } else {
        (1 << (6 * sextets)) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zip(value: u64, context: u64) -> String {
        let mut out = Vec::new();
        format_int(&mut out, value, context);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn digits_are_left_aligned() {
        assert_eq!(zip(1 << 54, 0), "1");
        assert_eq!(zip(0, 1 << 54), "0");
        assert_eq!(zip(1, 1 << 54), "0000000001");
    }

    #[test]
    fn equal_values_are_elided() {
        assert_eq!(zip(777, 777), "");
    }

    #[test]
    fn shared_prefix_uses_marker() {
        let context = 0x0abc_def0_1234_5678;
        let value = context ^ 0x3f;
        let text = zip(value, context);
        assert!(text.starts_with(')'), "{text}");
        assert_eq!(text.len(), 2);
        assert_eq!(parse_int(text.as_bytes(), context), (value, 2));
    }

    #[test]
    fn marker_alone_zeroes_the_tail() {
        let context = 0x0abc_def0_1234_5678;
        let value = context & !((1 << 24) - 1);
        let text = zip(value, context);
        assert_eq!(text, "{");
        assert_eq!(parse_int(b"{", context), (value, 1));
    }

    #[test]
    fn error_context_forces_full_digits() {
        let text = zip(INT60_ERROR, INT60_ERROR);
        assert_eq!(text, "~~~~~~~~~~");
        assert_eq!(parse_int(text.as_bytes(), INT60_ERROR), (INT60_ERROR, 10));
    }

    #[test]
    fn absent_token_keeps_context() {
        assert_eq!(parse_int(b"", 42), (42, 0));
        assert_eq!(parse_int(b"+abc", 42), (42, 0));
    }

    #[test]
    fn digit_run_is_capped_by_prefix_width() {
        // tier 9 leaves room for a single digit
        let (value, used) = parse_int(b")12", 0);
        assert_eq!(used, 2);
        assert_eq!(value, 1);
    }
}
