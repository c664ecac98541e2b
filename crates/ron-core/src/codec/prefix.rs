//! Shared-prefix and zero-tail analysis of 60-bit integers.

use crate::constants::INT60_LEN;

/// Number of leading sextets `value` shares with `context`, as a tier in
/// `{0, 4, 5, 6, 7, 8, 9, 10}`.
///
/// Sharing fewer than four sextets is reported as 0: a prefix marker byte
/// would not pay for itself. 10 means the two are equal.
pub fn common_prefix(value: u64, context: u64) -> usize {
    let xor = value ^ context;
    if xor >= 1 << (6 * 6) {
        return 0;
    }
    if xor == 0 {
        return INT60_LEN;
    }
    if xor >= 1 << (3 * 6) {
        if xor >= 1 << (5 * 6) {
            4
        } else if xor >= 1 << (4 * 6) {
            5
        } else {
            6
        }
    } else if xor >= 1 << (2 * 6) {
        7
    } else if xor >= 1 << 6 {
        8
    } else {
        9
    }
}

/// Count trailing all-zero sextets of a 60-bit value.
///
/// Zero runs are consumed greedily in windows of 30, 18, 12 and 6 bits.
/// Returns the count (capped at 10) and the value shifted right past them.
pub fn zero_tail(value: u64) -> (usize, u64) {
    let mut value = value;
    let mut tail = 0;
    if value & ((1 << 30) - 1) == 0 {
        tail += 5;
        value >>= 30;
    }
    if value & ((1 << 18) - 1) == 0 {
        tail += 3;
        value >>= 18;
    }
    if value & ((1 << 12) - 1) == 0 {
        tail += 2;
        value >>= 12;
    }
    if tail < INT60_LEN && value & ((1 << 6) - 1) == 0 {
        tail += 1;
        value >>= 6;
    }
    (tail.min(INT60_LEN), value)
}
