//! Infrastructure adapters for property access, configuration, resources, and logging.

pub mod accessor;
pub mod config;
pub mod logging;
pub mod resources;
