// Daily Planner Application
// Main entry point

use daily_planner::ui_egui::PlannerApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Daily Planner");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Daily Planner")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Daily Planner",
        options,
        Box::new(|cc| Ok(Box::new(PlannerApp::new(cc)))),
    )
}
