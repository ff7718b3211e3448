//! Page content extraction.
//!
//! This module pulls referenced hosts and image resources out of page markup
//! (`markup`) and domain-like strings out of free text such as OCR output
//! (`text`).

pub mod markup;
pub mod text;

pub use markup::{extract_page_content, ImageRecord, PageContent, Provenance};
pub use text::{extract_domains, TextDomain};
