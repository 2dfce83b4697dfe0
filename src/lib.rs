pub mod classifier;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod error;
pub mod git;
pub mod manifest;
pub mod oracle;
pub mod policy;
pub mod ui;

pub use error::{BumpError, Result};
