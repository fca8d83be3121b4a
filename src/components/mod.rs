pub mod forecast_overlay;
pub mod form_panel;
pub mod picker_overlay;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use forecast_overlay::{ForecastOverlay, ForecastOverlayProps, ERROR_ICON};
pub use form_panel::{FormPanel, FormPanelProps};
pub use picker_overlay::{PickerOverlay, PickerOverlayProps};
