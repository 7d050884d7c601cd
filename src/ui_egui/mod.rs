mod app;
pub mod drag;
pub mod theme;
pub mod views;

pub use app::PlannerApp;
