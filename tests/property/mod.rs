//! Property test modules

mod determinism;
