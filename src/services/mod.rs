// Service module exports
// Layout and drag are pure; planner, storage and settings own persistence

pub mod drag;
pub mod layout;
pub mod planner;
pub mod settings;
pub mod storage;
