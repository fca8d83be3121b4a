//! Actions - user intent and async completion events

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Forecast, FormField};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Form category =====
    /// A form field's text changed
    FormFieldChange { field: FormField, value: String },

    /// Move focus to the next field
    FormFocusNext,

    /// Move focus to the previous field
    FormFocusPrev,

    /// Submit the form (triggers the forecast fetch)
    FormSubmit,

    // ===== Forecast category =====
    /// Result: forecast loaded successfully
    ForecastDidLoad(Forecast),

    /// Result: forecast fetch failed (transport, parse, or embedded error)
    ForecastDidError(String),

    // ===== Overlay category =====
    /// Dismiss the results overlay
    OverlayClose,

    /// Scroll the forecast narrative by a signed step
    OverlayScroll(i16),

    // ===== Picker category =====
    /// Open the location-picker chart
    PickerOpen,

    /// Close the picker without picking
    PickerClose,

    /// Move the chart cursor by whole cells
    PickerCursorMove { dx: i16, dy: i16 },

    /// Drop the marker at the cursor and record the coordinate
    PickerConfirm,

    // ===== UI category =====
    /// Terminal was resized
    UiTerminalResize(u16, u16),

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for transitions and the busy spinner
    Tick,

    /// Exit the application
    Quit,
}

impl Action {
    // fn-pointer constructors for TextInput props
    pub fn location_changed(value: String) -> Action {
        Action::FormFieldChange {
            field: FormField::Location,
            value,
        }
    }

    pub fn date_changed(value: String) -> Action {
        Action::FormFieldChange {
            field: FormField::Date,
            value,
        }
    }

    pub fn comments_changed(value: String) -> Action {
        Action::FormFieldChange {
            field: FormField::Comments,
            value,
        }
    }

    pub fn submit_from_input(_value: String) -> Action {
        Action::FormSubmit
    }
}
