use std::fmt;

/// A latitude/longitude pair in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Clamp into the renderable range (poles excluded, lon wrapped to ±180).
    pub fn clamped(self) -> Self {
        let mut lon = self.lon;
        while lon > 180.0 {
            lon -= 360.0;
        }
        while lon < -180.0 {
            lon += 360.0;
        }
        Self {
            lat: self.lat.clamp(-85.0, 85.0),
            lon,
        }
    }

    /// `"lat,lon"` at a fixed number of decimal places.
    pub fn format_fixed(&self, places: usize) -> String {
        format!("{:.places$},{:.places$}", self.lat, self.lon, places = places)
    }
}

/// The angular extent a chart view covers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartSpan {
    pub lat_degrees: f64,
    pub lon_degrees: f64,
}

impl ChartSpan {
    pub const fn new(lat_degrees: f64, lon_degrees: f64) -> Self {
        Self {
            lat_degrees,
            lon_degrees,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChartError {
    DegenerateSpan { lat_degrees: f64, lon_degrees: f64 },
    EmptyGrid { cols: u16, rows: u16 },
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::DegenerateSpan {
                lat_degrees,
                lon_degrees,
            } => write!(
                f,
                "chart span must be positive: {}x{} degrees",
                lat_degrees, lon_degrees
            ),
            ChartError::EmptyGrid { cols, rows } => {
                write!(f, "chart grid must be non-empty: {}x{} cells", cols, rows)
            }
        }
    }
}

impl std::error::Error for ChartError {}

/// A window onto the globe: a center, an angular span, and a cell grid.
///
/// Row 0 is the northern edge; cell coordinates map to the cell's center
/// point so a pick lands mid-cell rather than on its corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartView {
    pub center: GeoPoint,
    pub span: ChartSpan,
    pub cols: u16,
    pub rows: u16,
}

impl ChartView {
    pub fn new(
        center: GeoPoint,
        span: ChartSpan,
        cols: u16,
        rows: u16,
    ) -> Result<Self, ChartError> {
        if span.lat_degrees <= 0.0 || span.lon_degrees <= 0.0 {
            return Err(ChartError::DegenerateSpan {
                lat_degrees: span.lat_degrees,
                lon_degrees: span.lon_degrees,
            });
        }
        if cols == 0 || rows == 0 {
            return Err(ChartError::EmptyGrid { cols, rows });
        }
        Ok(Self {
            center: center.clamped(),
            span,
            cols,
            rows,
        })
    }

    pub fn north(&self) -> f64 {
        self.center.lat + self.span.lat_degrees / 2.0
    }

    pub fn south(&self) -> f64 {
        self.center.lat - self.span.lat_degrees / 2.0
    }

    pub fn west(&self) -> f64 {
        self.center.lon - self.span.lon_degrees / 2.0
    }

    pub fn east(&self) -> f64 {
        self.center.lon + self.span.lon_degrees / 2.0
    }

    fn lat_step(&self) -> f64 {
        self.span.lat_degrees / self.rows as f64
    }

    fn lon_step(&self) -> f64 {
        self.span.lon_degrees / self.cols as f64
    }

    /// The coordinate at the center of a grid cell.
    pub fn cell_to_geo(&self, col: u16, row: u16) -> Option<GeoPoint> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        let lat = self.north() - (row as f64 + 0.5) * self.lat_step();
        let lon = self.west() + (col as f64 + 0.5) * self.lon_step();
        Some(GeoPoint::new(lat, lon))
    }

    /// The grid cell containing a coordinate, if it is inside the view.
    pub fn geo_to_cell(&self, point: GeoPoint) -> Option<(u16, u16)> {
        let col = (point.lon - self.west()) / self.lon_step();
        let row = (self.north() - point.lat) / self.lat_step();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as u16, row as u16);
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some((col, row))
    }

    /// Pan so the view is centered on `point` (the span is preserved).
    pub fn center_on(&mut self, point: GeoPoint) {
        self.center = point.clamped();
    }

    /// The cell the view center falls in.
    pub fn center_cell(&self) -> (u16, u16) {
        (self.cols / 2, self.rows / 2)
    }
}
