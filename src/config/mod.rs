//! Project configuration

mod slidepot_toml;

pub use slidepot_toml::{SlidepotConfig, CONFIG_FILE_NAME};
