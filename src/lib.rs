pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod git;
pub mod range;
pub mod tag;
pub mod ui;
pub mod version;

pub use error::{LoggitError, Result};
