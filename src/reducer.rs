//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::api::ForecastRequest;
use crate::effect::Effect;
use crate::state::{AppState, CHART_COLS, CHART_ROWS, COORD_PLACES, PICKER_LINGER_TICKS};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Form actions =====
        Action::FormFieldChange { field, value } => {
            state.form.set_value(field, value);
            DispatchResult::changed()
        }

        Action::FormFocusNext => {
            state.form.focus = state.form.focus.next();
            DispatchResult::changed()
        }

        Action::FormFocusPrev => {
            state.form.focus = state.form.focus.prev();
            DispatchResult::changed()
        }

        Action::FormSubmit => {
            // The submit control is disabled while a request is in flight;
            // re-triggering it is a no-op, which serializes submissions.
            if state.submitting {
                return DispatchResult::unchanged();
            }
            let request = ForecastRequest::capture(&state.form);
            state.forecast = DataResource::Loading;
            state.submitting = true;
            state.overlay_scroll = 0;
            state.spinner_frame = 0;
            state.overlay.show();
            DispatchResult::changed_with(Effect::FetchForecast { request })
        }

        // ===== Forecast completion =====
        // Both arms restore the submit control; there is no path that
        // leaves it disabled.
        Action::ForecastDidLoad(forecast) => {
            state.forecast = DataResource::Loaded(forecast);
            state.submitting = false;
            DispatchResult::changed()
        }

        Action::ForecastDidError(message) => {
            state.forecast = DataResource::Failed(message);
            state.submitting = false;
            DispatchResult::changed()
        }

        // ===== Overlay actions =====
        Action::OverlayClose => {
            // No cancellation exists; while loading the overlay stays up so
            // the busy control and the in-flight task stay in step.
            if state.submitting || !state.overlay.hide() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::OverlayScroll(step) => {
            if !state.overlay.is_open() || !state.forecast.is_loaded() {
                return DispatchResult::unchanged();
            }
            let scrolled = if step < 0 {
                state.overlay_scroll.saturating_sub(step.unsigned_abs())
            } else {
                state.overlay_scroll.saturating_add(step as u16)
            };
            if scrolled == state.overlay_scroll {
                return DispatchResult::unchanged();
            }
            state.overlay_scroll = scrolled;
            DispatchResult::changed()
        }

        // ===== Picker actions =====
        Action::PickerOpen => {
            if state.overlay.is_open() || !state.picker.phase.show() {
                return DispatchResult::unchanged();
            }
            state.picker.linger_ticks = 0;
            // Resume at the marker if one is dropped, else the chart center.
            let view = state.picker.view();
            state.picker.cursor = state
                .picker
                .marker
                .and_then(|(lat, lon)| view.geo_to_cell(tide_chart::GeoPoint::new(lat, lon)))
                .unwrap_or_else(|| view.center_cell());
            DispatchResult::changed()
        }

        Action::PickerClose => {
            if !state.picker.phase.hide() {
                return DispatchResult::unchanged();
            }
            state.picker.linger_ticks = 0;
            DispatchResult::changed()
        }

        Action::PickerCursorMove { dx, dy } => {
            if !state.picker.phase.is_open() || state.picker.linger_ticks > 0 {
                return DispatchResult::unchanged();
            }
            let (col, row) = state.picker.cursor;
            let col = clamp_move(col, dx, CHART_COLS);
            let row = clamp_move(row, dy, CHART_ROWS);
            if (col, row) == state.picker.cursor {
                return DispatchResult::unchanged();
            }
            state.picker.cursor = (col, row);
            DispatchResult::changed()
        }

        Action::PickerConfirm => {
            if !state.picker.phase.is_open() || state.picker.linger_ticks > 0 {
                return DispatchResult::unchanged();
            }
            let view = state.picker.view();
            let Some(point) = view.cell_to_geo(state.picker.cursor.0, state.picker.cursor.1)
            else {
                return DispatchResult::unchanged();
            };
            // One marker at a time; a new pick replaces the old one.
            state.picker.marker = Some((point.lat, point.lon));
            state.picker.center = (point.lat, point.lon);
            state.picker.cursor = state.picker.view().center_cell();
            state.form.location = point.format_fixed(COORD_PLACES);
            state.picker.linger_ticks = PICKER_LINGER_TICKS;
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            let mut changed = false;
            if state.overlay.tick() {
                changed = true;
                if !state.overlay.is_open() {
                    // The result is consumed; the next submission starts clean.
                    state.forecast = DataResource::Empty;
                    state.overlay_scroll = 0;
                }
            }
            if state.picker.phase.tick() {
                changed = true;
            }
            if state.picker.linger_ticks > 0 {
                state.picker.linger_ticks -= 1;
                if state.picker.linger_ticks == 0 {
                    state.picker.phase.hide();
                }
                changed = true;
            }
            if state.submitting {
                state.spinner_frame = state.spinner_frame.wrapping_add(1);
                changed = true;
            }
            if changed {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn clamp_move(cell: u16, delta: i16, limit: u16) -> u16 {
    let moved = cell as i32 + delta as i32;
    moved.clamp(0, limit.saturating_sub(1) as i32) as u16
}
