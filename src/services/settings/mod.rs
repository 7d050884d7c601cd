// Settings service module
// Loads and saves the planner configuration file

mod service;

pub use service::{resolve_data_dir, SettingsService};
