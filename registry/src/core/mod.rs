//! Registry core logic

pub mod extractor;

pub use extractor::{CodeExtractor, ParseFailure};
