mod dialogs;
mod lifecycle;
mod navigation;
mod shortcuts;
mod state;
mod top_bar;

use self::state::AppState;
use crate::models::settings::PlannerConfig;
use crate::models::ui::{DisplayMode, ViewType};
use crate::services::planner::PlannerStore;
use crate::services::settings::SettingsService;
use crate::services::storage::KeyValueStore;
use crate::ui_egui::theme::PlannerTheme;
use crate::ui_egui::views::day_view::{DayView, DayViewState};
use crate::ui_egui::views::month_view::MonthView;
use crate::ui_egui::views::week_view::WeekView;
use crate::ui_egui::views::ViewResult;
use chrono::NaiveDate;

pub struct PlannerApp {
    /// Reads and writes `config.toml`
    settings_service: SettingsService,
    config: PlannerConfig,
    /// Planner data behind the on-disk store, or memory when the disk failed
    store: PlannerStore<Box<dyn KeyValueStore>>,
    current_view: ViewType,
    current_date: NaiveDate,
    display_mode: DisplayMode,
    active_theme: PlannerTheme,
    state: AppState,
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.persist_scroll();
    }
}

impl PlannerApp {
    fn render_main_panel(&mut self, ctx: &egui::Context) -> ViewResult {
        let zoom = self.store.zoom();
        let first_day_of_week = self.config.first_day_of_week;

        egui::CentralPanel::default()
            .show(ctx, |ui| match self.current_view {
                ViewType::Today => DayView::show(
                    ui,
                    self.current_date,
                    &self.store,
                    self.display_mode,
                    zoom,
                    &self.active_theme,
                    DayViewState {
                        scroll: &mut self.state.scroll,
                        drag: &mut self.state.drag,
                        quick_add: &mut self.state.quick_add,
                    },
                ),
                ViewType::Week => WeekView::show(
                    ui,
                    self.current_date,
                    first_day_of_week,
                    &self.store,
                    self.display_mode,
                    zoom,
                    &self.active_theme,
                    &mut self.state.scroll,
                    &mut self.state.drag,
                ),
                ViewType::Month => MonthView::show(
                    ui,
                    self.current_date,
                    first_day_of_week,
                    &self.store,
                    self.display_mode,
                    &self.active_theme,
                ),
            })
            .inner
    }
}
