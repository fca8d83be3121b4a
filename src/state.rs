//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tide_chart::{ChartSpan, ChartView, GeoPoint};
use tui_dispatch::DataResource;

/// Tick cadence for overlay transitions and the busy spinner.
pub const TICK_MS: u64 = 50;

/// Ticks an overlay stays unmasked-but-not-yet-visible before the visible
/// flag lands (lets the opening transition start from the unmasked state).
pub const OVERLAY_APPEAR_TICKS: u8 = 1;
/// Ticks between dropping the visible flag and remasking the overlay;
/// matches the closing transition's duration.
pub const OVERLAY_FADE_TICKS: u8 = 6;
/// Ticks the picker lingers after a pick so the marker is seen before the
/// modal dismisses.
pub const PICKER_LINGER_TICKS: u8 = 12;

/// Logical chart grid inside the picker modal.
pub const CHART_COLS: u16 = 56;
pub const CHART_ROWS: u16 = 16;
/// Degrees of latitude/longitude the picker chart spans.
pub const CHART_SPAN: ChartSpan = ChartSpan::new(8.0, 16.0);
/// Decimal places written into the location field on a pick.
pub const COORD_PLACES: usize = 4;

/// Forecast payload from the remote endpoint, displayed verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub weather: WeatherSummary,
    pub tides: TideTable,
    pub waves: String,
    pub forecast_text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSummary {
    pub condition: String,
    pub temp: String,
    pub wind: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TideTable {
    pub high: String,
    pub low: String,
}

/// The three text fields of the submission form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FormField {
    #[default]
    Location,
    Date,
    Comments,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Location => FormField::Date,
            FormField::Date => FormField::Comments,
            FormField::Comments => FormField::Location,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Location => FormField::Comments,
            FormField::Date => FormField::Location,
            FormField::Comments => FormField::Date,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormState {
    pub location: String,
    pub fishing_date: String,
    pub comments: String,
    pub focus: FormField,
}

impl FormState {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Location => &self.location,
            FormField::Date => &self.fishing_date,
            FormField::Comments => &self.comments,
        }
    }

    pub fn set_value(&mut self, field: FormField, value: String) {
        match field {
            FormField::Location => self.location = value,
            FormField::Date => self.fishing_date = value,
            FormField::Comments => self.comments = value,
        }
    }
}

/// Overlay visibility lifecycle: Hidden → Appearing → Visible →
/// Disappearing → Hidden.
///
/// `show` unmasks first and lands the visible flag a tick later; `hide`
/// drops the flag immediately and remasks after the fade. The enum makes
/// "hidden and visible at once" unrepresentable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum OverlayPhase {
    #[default]
    Hidden,
    Appearing {
        ticks_left: u8,
    },
    Visible,
    Disappearing {
        ticks_left: u8,
    },
}

impl OverlayPhase {
    /// Begin opening. No-op if already open or opening.
    pub fn show(&mut self) -> bool {
        match self {
            OverlayPhase::Hidden | OverlayPhase::Disappearing { .. } => {
                *self = OverlayPhase::Appearing {
                    ticks_left: OVERLAY_APPEAR_TICKS,
                };
                true
            }
            _ => false,
        }
    }

    /// Begin closing. The visible flag is gone as soon as this returns.
    pub fn hide(&mut self) -> bool {
        match self {
            OverlayPhase::Visible | OverlayPhase::Appearing { .. } => {
                *self = OverlayPhase::Disappearing {
                    ticks_left: OVERLAY_FADE_TICKS,
                };
                true
            }
            _ => false,
        }
    }

    /// Advance one tick. Returns true when the phase changed.
    pub fn tick(&mut self) -> bool {
        match self {
            OverlayPhase::Appearing { ticks_left } => {
                if *ticks_left <= 1 {
                    *self = OverlayPhase::Visible;
                } else {
                    *ticks_left -= 1;
                }
                true
            }
            OverlayPhase::Disappearing { ticks_left } => {
                if *ticks_left <= 1 {
                    *self = OverlayPhase::Hidden;
                } else {
                    *ticks_left -= 1;
                }
                true
            }
            _ => false,
        }
    }

    /// Unmasked: the overlay paints and intercepts input.
    pub fn is_open(&self) -> bool {
        !matches!(self, OverlayPhase::Hidden)
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, OverlayPhase::Visible)
    }

    pub fn in_transition(&self) -> bool {
        matches!(
            self,
            OverlayPhase::Appearing { .. } | OverlayPhase::Disappearing { .. }
        )
    }
}

/// Location-picker chart state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PickerState {
    pub phase: OverlayPhase,
    /// Cursor cell within the logical chart grid.
    pub cursor: (u16, u16),
    /// Chart center, `(lat, lon)`.
    pub center: (f64, f64),
    /// The dropped marker, `(lat, lon)`. At most one exists.
    pub marker: Option<(f64, f64)>,
    /// Countdown from a confirmed pick to the automatic close.
    pub linger_ticks: u8,
}

impl PickerState {
    pub fn view(&self) -> ChartView {
        ChartView::new(
            GeoPoint::new(self.center.0, self.center.1),
            CHART_SPAN,
            CHART_COLS,
            CHART_ROWS,
        )
        .expect("chart constants form a valid view")
    }
}

impl Default for PickerState {
    fn default() -> Self {
        Self {
            phase: OverlayPhase::Hidden,
            cursor: (CHART_COLS / 2, CHART_ROWS / 2),
            // Gulf coast, prime fishing water.
            center: (28.0, -90.0),
            marker: None,
            linger_ticks: 0,
        }
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Submission form fields and focus
    #[debug(section = "Form", label = "Fields", debug_fmt)]
    pub form: FormState,

    /// Forecast lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Forecast", label = "Data", debug_fmt)]
    pub forecast: DataResource<Forecast>,

    /// Whether a request is in flight (submit control disabled)
    #[debug(section = "Forecast", label = "In flight")]
    pub submitting: bool,

    // --- Overlay internals (skipped) ---
    /// Results overlay phase
    #[debug(skip)]
    pub overlay: OverlayPhase,

    /// Scroll offset into the forecast narrative
    #[debug(skip)]
    pub overlay_scroll: u16,

    /// Location picker modal
    #[debug(skip)]
    pub picker: PickerState,

    /// Busy spinner frame counter
    #[debug(skip)]
    pub spinner_frame: u8,

    /// Last observed terminal size
    #[debug(skip)]
    pub terminal_size: (u16, u16),
}

impl AppState {
    pub fn new() -> Self {
        Self {
            form: FormState::default(),
            forecast: DataResource::Empty,
            submitting: false,
            overlay: OverlayPhase::Hidden,
            overlay_scroll: 0,
            picker: PickerState::default(),
            spinner_frame: 0,
            terminal_size: (80, 24),
        }
    }

    /// Anything animating right now (drives tick re-renders).
    pub fn anim_active(&self) -> bool {
        self.submitting
            || self.overlay.in_transition()
            || self.picker.phase.in_transition()
            || self.picker.linger_ticks > 0
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_phase_walks_full_cycle() {
        let mut phase = OverlayPhase::Hidden;
        assert!(phase.show());
        assert!(matches!(phase, OverlayPhase::Appearing { .. }));
        assert!(phase.is_open());
        assert!(!phase.is_visible());

        while phase.in_transition() {
            phase.tick();
        }
        assert!(phase.is_visible());

        assert!(phase.hide());
        assert!(!phase.is_visible());
        assert!(phase.is_open());

        while phase.in_transition() {
            phase.tick();
        }
        assert_eq!(phase, OverlayPhase::Hidden);
    }

    #[test]
    fn hide_wins_over_immediately_preceding_show() {
        let mut phase = OverlayPhase::Hidden;
        phase.show();
        phase.hide();
        assert!(!phase.is_visible());

        for _ in 0..(OVERLAY_FADE_TICKS + 2) {
            phase.tick();
        }
        assert_eq!(phase, OverlayPhase::Hidden);
    }

    #[test]
    fn show_is_noop_while_open() {
        let mut phase = OverlayPhase::Visible;
        assert!(!phase.show());
        assert_eq!(phase, OverlayPhase::Visible);
    }

    #[test]
    fn form_field_cycle_is_closed() {
        let mut field = FormField::Location;
        for _ in 0..3 {
            field = field.next();
        }
        assert_eq!(field, FormField::Location);
        assert_eq!(FormField::Location.prev(), FormField::Comments);
    }

    #[test]
    fn picker_view_contains_its_center() {
        let picker = PickerState::default();
        let view = picker.view();
        assert_eq!(
            view.geo_to_cell(tide_chart::GeoPoint::new(28.0, -90.0)),
            Some(view.center_cell())
        );
    }
}
