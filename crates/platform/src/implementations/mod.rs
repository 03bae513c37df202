//! Filesystem implementations

pub mod local;
