//! Utility functions shared by the store, the index builder and the CLI.
//!
//! ## Modules
//!
//! - [`app_data`] - Application configuration (XDG-compliant data directory)
//! - [`progress`] - Spinner that compiles away without the `progress` feature
//! - [`validate`] - Header/body grammar checks and identifier extraction
//!
//! ## Key Functions
//!
//! ```no_run
//! use seqidx::utils::{extract_identifiers, is_header_line};
//!
//! assert!(is_header_line(">NR_118889.1 Amycolatopsis azurea"));
//! let ids = extract_identifiers(">NR_118889.1 Amycolatopsis azurea");
//! // Returns: ["NR_118889.1"]
//! ```

pub mod app_data;
pub mod progress;
pub mod validate;

pub use app_data::*;
pub use progress::spinner;
pub use validate::*;
