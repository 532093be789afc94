//! Per-paragraph processing pipeline
//!
//! Pure text transforms and anomaly checks, driven in a fixed order by the
//! walker.

pub mod clean;
pub mod depth;
pub mod percent;
pub mod rebuild;
pub mod walker;
