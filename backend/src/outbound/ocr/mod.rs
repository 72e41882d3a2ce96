//! Text recognition adapters.

mod tesseract;

pub use tesseract::{DEFAULT_OCR_LANGUAGE, DEFAULT_OCR_TIMEOUT, TesseractOcrEngine};
