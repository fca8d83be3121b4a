//! Nautical chart widget for coordinate picking in a terminal.
//!
//! `chart` holds the pure geometry (view bounds, cell/coordinate mapping);
//! `render` paints it with ratatui when the `ratatui` feature is on.

pub mod chart;
#[cfg(feature = "ratatui")]
pub mod render;

pub use chart::{ChartError, ChartSpan, ChartView, GeoPoint};
#[cfg(feature = "ratatui")]
pub use render::{adjust_color, cell_seed, ChartRenderer, ChartTheme, WaveGlyph};
