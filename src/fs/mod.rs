//! Filesystem utilities for stackgen.
//!
//! Generation and repair both replace files wholesale; the atomic writer
//! guarantees a destination is never observed half-written.

pub mod atomic;

pub use atomic::atomic_write_file;
