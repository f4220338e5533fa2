//! Macros.

mod entry;
