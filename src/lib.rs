pub mod boundary;
pub mod config;
pub mod conventional;
pub mod detect;
pub mod document;
pub mod error;
pub mod generator;
pub mod git;
pub mod render;
pub mod tags;
pub mod ui;

pub use error::{ChangelogError, Result};
