//! Sectioned key/value configuration files.

pub mod configuration;
mod ini;

pub use configuration::{load_config, Configuration, Section, DEFAULT_SECTION};
