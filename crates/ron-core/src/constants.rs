//! Wire constants for the RON text grammar.
//!
//! Single source of truth for the base-64 alphabet, punctuation tables and
//! the reserved 60-bit integer patterns.

/// Maximum number of sextets in a 60-bit integer.
pub const INT60_LEN: usize = 10;

/// Number of atoms an op keeps inline before spilling to the heap.
pub const MAX_ATOMS: usize = 8;

/// All 60 payload bits set.
pub const INT60_FULL: u64 = (1 << 60) - 1;

/// Error sentinel value (`~~~~~~~~~~`).
pub const INT60_ERROR: u64 = INT60_FULL;

/// "Infinite future" timestamp (`~` followed by nine zero sextets).
pub const INT60_INFINITY: u64 = 63 << (6 * 9);

/// The four flag bits above the 60-bit payload of each word.
pub const INT60_FLAGS: u64 = 15 << 60;

/// Top four sextets of an origin; origins sharing them belong to one class.
pub const ORIGIN_CLASS_MASK: u64 = 0xff_ffff << 36;

/// Base-64 digits, sextet value order.
pub const BASE64: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz~";

/// Prefix markers for shared-prefix tiers 4 through 9.
pub const PREFIX_PUNCT: &[u8; 6] = b"([{}])";

/// UUID sign bytes: name, hash, event, derived.
pub const SIGN_PUNCT: &[u8; 4] = b"$%+-";

/// Spec field separators: type, object, event, location.
pub const SPEC_PUNCT: &[u8; 4] = b"*#@:";

/// Atom markers: integer, float, string, UUID.
pub const ATOM_PUNCT: &[u8; 4] = b"=^'>";

/// Op terminators: raw, reduced, header, query.
pub const TERM_PUNCT: &[u8; 4] = b";,!?";

/// Terminates a frame inside a multiframe.
pub const FRAME_TERM: u8 = b'.';

/// Lookup code for bytes that are neither digits nor prefix markers.
pub const ABC_NONE: i8 = -1;

/// Prefix markers are stored as `-(10 + tier - 4)`.
pub const ABC_PREFIX_BASE: i8 = -10;

/// Byte → sextet lookup. Digits map to `0..=63`, prefix markers to
/// `-10..=-15`, everything else to [`ABC_NONE`].
pub const ABC: [i8; 256] = build_abc();

const fn build_abc() -> [i8; 256] {
    let mut table = [ABC_NONE; 256];
    let mut i = 0;
    while i < BASE64.len() {
        table[BASE64[i] as usize] = i as i8;
        i += 1;
    }
    let mut p = 0;
    while p < PREFIX_PUNCT.len() {
        table[PREFIX_PUNCT[p] as usize] = ABC_PREFIX_BASE - p as i8;
        p += 1;
    }
    table
}
