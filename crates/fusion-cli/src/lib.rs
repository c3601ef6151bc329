//! CLI library components for Table Fusion.

#![allow(missing_docs)]

pub mod logging;
pub mod preferences;
