pub mod build;
pub mod reader;
pub mod types;
pub mod writer;

pub use reader::OffsetIndex;
pub use types::*;
pub use writer::write_index;
