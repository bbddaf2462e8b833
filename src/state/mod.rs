mod config;
mod path;

pub use config::Configuration;
pub use path::{search_dirs, Path};
