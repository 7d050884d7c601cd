use super::state::{
    day_offset, initial_day_offset, metrics_for, view_offset, AppState, CreateDialogState,
    ItemEditorState,
};
use super::PlannerApp;
use crate::models::settings::PlannerConfig;
use crate::models::ui::{DisplayMode, ViewType};
use crate::services::drag::DragController;
use crate::services::layout::geometry::Zoom;
use crate::services::planner::{PlannerAction, PlannerStore};
use crate::services::settings::{resolve_data_dir, SettingsService};
use crate::services::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::ui_egui::drag::{drag_view_for, outcome_action};
use crate::ui_egui::theme::PlannerTheme;
use crate::ui_egui::views::ViewResult;
use chrono::Local;

/// Scroll changes smaller than this are not written back.
const SCROLL_SAVE_THRESHOLD: f32 = 1.0;

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings_service = SettingsService::from_default_location();
        let config = settings_service.get_or_default();
        log::info!(
            "Loaded settings from {}: view={:?}, mode={:?}",
            settings_service.path().display(),
            config.default_view,
            config.display_mode
        );

        let store = open_store(&config);

        let active_theme = PlannerTheme::for_mode(config.dark_mode);
        active_theme.apply_to_context(&cc.egui_ctx);

        let offset = store
            .scroll_offset()
            .unwrap_or_else(|| initial_day_offset(config.initial_scroll_hour, store.zoom()));
        let state = AppState::new(config.default_view, offset);

        Self {
            settings_service,
            current_view: config.default_view,
            current_date: Local::now().date_naive(),
            display_mode: config.display_mode,
            config,
            store,
            active_theme,
            state,
        }
    }

    pub(super) fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard_shortcuts(ctx);
        self.render_top_bar(ctx);

        let result = self.render_main_panel(ctx);
        self.apply_view_result(result);

        self.handle_dialogs(ctx);

        self.track_scroll();
        if scroll_settled(ctx) {
            self.persist_scroll();
        }
    }

    /// Apply an action, surfacing failures in the top bar.
    pub(super) fn dispatch(&mut self, action: PlannerAction) {
        if let Err(e) = self.store.dispatch(action) {
            log::error!("Failed to apply planner change: {:#}", e);
            self.state.status_message = Some(format!("Could not save: {e}"));
        }
    }

    fn apply_view_result(&mut self, result: ViewResult) {
        for action in result.actions {
            self.dispatch(action);
        }

        if let Some(zoom) = result.zoom {
            // The grid already anchored the scroll offset
            self.dispatch(PlannerAction::SetZoom(zoom));
        }

        if let Some(request) = result.create_request {
            self.state.create_dialog = Some(CreateDialogState::new(request));
        }

        if let Some(id) = result.edit_item {
            match self.store.find_item(&id) {
                Some(item) => self.state.item_editor = Some(ItemEditorState::new(item.clone())),
                None => log::warn!("Cannot edit unknown item {}", id),
            }
        }

        if let Some(date) = result.open_date {
            self.current_date = date;
            self.switch_view(ViewType::Today);
        }
    }

    /// Zoom from the top bar or keyboard, keeping the viewport centre fixed.
    pub(super) fn set_zoom(&mut self, zoom: Zoom) {
        let old = self.store.zoom();
        if zoom == old {
            return;
        }
        self.state.scroll.rezoom(old, zoom);
        self.dispatch(PlannerAction::SetZoom(zoom));
    }

    pub(super) fn switch_view(&mut self, view: ViewType) {
        if view == self.current_view {
            return;
        }

        let outcome = self.state.drag.cancel();
        if let Some(action) = outcome_action(outcome) {
            self.dispatch(action);
        }
        self.state.drag = DragController::for_view(drag_view_for(view));

        if let Some(metrics) = metrics_for(view) {
            self.state.scroll.jump_to(view_offset(self.state.day_offset, metrics));
        }

        log::debug!("Switched view {:?} -> {:?}", self.current_view, view);
        self.current_view = view;
    }

    pub(super) fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
        self.config.display_mode = mode;
        self.save_config();
    }

    pub(super) fn set_dark_mode(&mut self, ctx: &egui::Context, dark_mode: bool) {
        self.config.dark_mode = dark_mode;
        self.active_theme = PlannerTheme::for_mode(dark_mode);
        self.active_theme.apply_to_context(ctx);
        self.save_config();
    }

    fn save_config(&mut self) {
        if let Err(e) = self.settings_service.update(&self.config) {
            log::error!("Failed to save settings: {:#}", e);
            self.state.status_message = Some("Could not save settings".to_string());
        }
    }

    /// Mirror the visible grid's offset in Today-view pixels.
    fn track_scroll(&mut self) {
        if self.state.scroll.pending.is_some() {
            return;
        }
        if let Some(metrics) = metrics_for(self.current_view) {
            self.state.day_offset = day_offset(self.state.scroll.offset, metrics);
        }
    }

    pub(super) fn persist_scroll(&mut self) {
        let offset = self.state.day_offset;
        if (self.state.saved_day_offset - offset).abs() > SCROLL_SAVE_THRESHOLD {
            self.state.saved_day_offset = offset;
            self.dispatch(PlannerAction::SetScroll(offset));
        }
    }
}

/// No wheel momentum and no button held.
fn scroll_settled(ctx: &egui::Context) -> bool {
    ctx.input(|i| i.smooth_scroll_delta == egui::Vec2::ZERO && !i.pointer.any_down())
}

/// Open the on-disk store, falling back to memory so the planner still runs.
fn open_store(config: &PlannerConfig) -> PlannerStore<Box<dyn KeyValueStore>> {
    let data_dir = resolve_data_dir(config);
    let file_store: Box<dyn KeyValueStore> = Box::new(FileStore::new(&data_dir));

    match PlannerStore::load(file_store) {
        Ok(store) => {
            log::info!("Planner data directory: {}", data_dir.display());
            store
        }
        Err(e) => {
            log::error!(
                "Failed to open planner data in {}: {:#}; changes will not be saved",
                data_dir.display(),
                e
            );
            let fallback: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
            PlannerStore::empty(fallback)
        }
    }
}
