//! Config module.
//! Provides configuration types, default paths, XML loading, plain-text list
//! files, and validation of the root directory.

pub mod lists;
pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use lists::{read_extensions_file, read_rules_file};
pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor, CONFIG_ENV};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, load_config_from_xml_path, load_or_init, LoadResult};
