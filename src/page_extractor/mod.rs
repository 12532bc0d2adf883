//! Page data extraction functions.
//!
//! This module turns raw HTML into the plain text and title that the index
//! stores, and re-extracts visible text from stored content for scanning.

// Sub-modules
pub mod text_cleaner;
pub mod title;

// Re-exports for public API
pub use text_cleaner::{clean_text, visible_text};
pub use title::extract_title;
