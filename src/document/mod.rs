//! Document loading, data structures, and serialization
//!
//! This module reads a .docx well report into a flat structured
//! representation, and writes the processed result back out as a new .docx.

pub(crate) mod io;
pub mod loader;
pub mod models;
pub mod writer;

pub use loader::load_document;
pub use models::*;
pub use writer::write_document;
