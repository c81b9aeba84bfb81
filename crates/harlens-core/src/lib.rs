pub mod analysis;
pub mod error;
pub mod har;
pub mod output;
pub mod report;
pub mod templates;

pub use error::{Error, Result};
