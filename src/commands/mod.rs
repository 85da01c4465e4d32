pub mod config_cmd;
pub mod remove;
pub mod scan;

pub use config_cmd::execute_config;
pub use remove::execute_remove;
pub use scan::execute_scan;
