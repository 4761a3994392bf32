//! Specification sheet parsing

mod extractor;

pub use extractor::SpecSheetExtractor;
