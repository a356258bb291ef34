//! Built-in games for tests and examples.

pub mod binary;
