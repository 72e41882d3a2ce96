//! Outbound adapters implementing the driven ports against real
//! infrastructure.
//!
//! - **supabase**: identity, file storage and the notes catalog over the
//!   Supabase REST APIs.
//! - **ocr**: text recognition through the Tesseract CLI.
//!
//! Adapters translate between domain types and wire formats. They contain no
//! business rules.

pub mod ocr;
pub mod supabase;
