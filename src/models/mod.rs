// Module exports for models

pub mod content_card;
pub mod planner_day;
pub mod planner_item;
pub mod settings;
pub mod ui;
