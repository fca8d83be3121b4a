//! Required-element registry.
//!
//! Every interactive surface the app wires is declared in one table and
//! resolved before any event handler is attached. Resolution is
//! all-or-nothing: a missing entry aborts startup with an error naming the
//! element, because partially wired controls fail silently.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementId {
    LocationField,
    DateField,
    CommentsField,
    SubmitButton,
    ForecastPanel,
    ChartPicker,
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ElementId::LocationField => "location-field",
            ElementId::DateField => "date-field",
            ElementId::CommentsField => "comments-field",
            ElementId::SubmitButton => "submit-button",
            ElementId::ForecastPanel => "forecast-panel",
            ElementId::ChartPicker => "chart-picker",
        };
        f.write_str(name)
    }
}

/// Static descriptor for one element: its label and secondary text
/// (placeholder for inputs, busy label for the submit control, subtitle
/// for panels).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementSpec {
    pub id: ElementId,
    pub label: &'static str,
    pub detail: &'static str,
}

const ELEMENTS: &[ElementSpec] = &[
    ElementSpec {
        id: ElementId::LocationField,
        label: "Location",
        detail: "Coordinates or a place name...",
    },
    ElementSpec {
        id: ElementId::DateField,
        label: "Date",
        detail: "YYYY-MM-DD",
    },
    ElementSpec {
        id: ElementId::CommentsField,
        label: "Comments",
        detail: "Target species, boat or bank, anything else...",
    },
    ElementSpec {
        id: ElementId::SubmitButton,
        label: "Cast Forecast",
        detail: "Consulting the tides",
    },
    ElementSpec {
        id: ElementId::ForecastPanel,
        label: "Your Fishing Forecast",
        detail: "esc close",
    },
    ElementSpec {
        id: ElementId::ChartPicker,
        label: "Pick a Spot",
        detail: "arrows move \u{2022} enter drop marker \u{2022} esc cancel",
    },
];

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum InitError {
    #[error("missing required ui element: {0}")]
    MissingElement(ElementId),
}

/// The fully resolved element set. Constructing this is the only way to
/// get element descriptors, so no component can be wired from a partial
/// table.
#[derive(Clone, Copy, Debug)]
pub struct Elements {
    pub location: ElementSpec,
    pub date: ElementSpec,
    pub comments: ElementSpec,
    pub submit: ElementSpec,
    pub forecast_panel: ElementSpec,
    pub chart_picker: ElementSpec,
}

impl Elements {
    pub fn resolve() -> Result<Self, InitError> {
        Self::resolve_from(ELEMENTS)
    }

    fn resolve_from(table: &[ElementSpec]) -> Result<Self, InitError> {
        let find = |id: ElementId| {
            table
                .iter()
                .find(|spec| spec.id == id)
                .copied()
                .ok_or(InitError::MissingElement(id))
        };
        Ok(Self {
            location: find(ElementId::LocationField)?,
            date: find(ElementId::DateField)?,
            comments: find(ElementId::CommentsField)?,
            submit: find(ElementId::SubmitButton)?,
            forecast_panel: find(ElementId::ForecastPanel)?,
            chart_picker: find(ElementId::ChartPicker)?,
        })
    }
}
