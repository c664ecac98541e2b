//! # ron-reduce
//!
//! Reduction of RON frames: merging the ops of one object, from any number
//! of frames, into a single reduced frame.
//!
//! - [`Reducer`]: the contract every data type implements.
//! - [`LwwReducer`]: last-writer-wins maps.
//! - [`Registry`]: data type to reducer, built once at startup.
//! - [`UuidHeap`]: the fan-in queue behind full and batch reduction.

pub mod lww;
pub mod reducer;
pub mod registry;
pub mod uheap;

pub use lww::{LwwReducer, LWW_UUID};
pub use reducer::{Reducer, ReducerMaker};
pub use registry::{ObjectResult, Registry, RegistryBuilder};
pub use uheap::{HeapEntry, HeapOrder, UuidHeap};
