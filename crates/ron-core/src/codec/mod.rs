//! Context-relative compression codec.
//!
//! Consecutive identifiers in a causal log usually share a replica and a
//! close-in-time counter. Each integer is written relative to the previous
//! one (its context): a prefix marker stands for the shared leading sextets,
//! trailing zero sextets are dropped, equal values vanish entirely.

pub mod base64;
pub mod int;
pub mod prefix;
pub mod uuid;

pub use base64::{unzip_base64, unzip_prefix_separator};
pub use int::{format_int, format_int_flat, parse_int};
pub use prefix::{common_prefix, zero_tail};
pub use uuid::{format_uuid, format_uuid_flat, parse_uuid};
