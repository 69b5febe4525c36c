pub mod pattern;

pub use pattern::{metadata_matcher, CompositionPattern};
