// Chart domain models - library-agnostic descriptions of what to draw

pub const PORTFOLIO_LABELS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
pub const PLACEHOLDER_DEPOSITS: [f64; 6] = [12000.0, 19000.0, 15000.0, 25000.0, 22000.0, 30000.0];
pub const PLACEHOLDER_LOANS: [f64; 6] = [8000.0, 12000.0, 10000.0, 18000.0, 16000.0, 22000.0];

pub const SEGMENT_LABELS: [&str; 4] = ["Retail", "Premium", "Corporate", "SME"];
pub const PLACEHOLDER_SEGMENTS: [f64; 4] = [45.0, 25.0, 20.0, 10.0];
pub const SEGMENT_COLORS: [&str; 4] = ["#007bff", "#28a745", "#ffc107", "#17a2b8"];

#[derive(Debug, Clone, PartialEq)]
pub enum LegendPosition {
    Top,
    Bottom,
}

impl LegendPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegendPosition::Top => "top",
            LegendPosition::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub label: String,
    pub border_color: String,
    pub fill_color: String,
    pub values: Vec<f64>,
}

impl SeriesData {
    pub fn new(label: &str, border_color: &str, fill_color: &str, values: Vec<f64>) -> Self {
        Self {
            label: label.to_string(),
            border_color: border_color.to_string(),
            fill_color: fill_color.to_string(),
            values,
        }
    }
}

/// Multi-series line chart over categorical period labels
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesChart {
    pub labels: Vec<String>,
    pub series: Vec<SeriesData>,
    pub tension: f64,
    pub filled: bool,
    pub begin_at_zero: bool,
    pub grid_color: String,
    pub legend: LegendPosition,
}

impl TimeSeriesChart {
    /// Deposits vs loans over six months of demo figures, shown until data arrives
    pub fn portfolio_placeholder() -> Self {
        Self {
            labels: PORTFOLIO_LABELS.iter().map(|l| l.to_string()).collect(),
            series: vec![
                SeriesData::new(
                    "Deposits",
                    "#007bff",
                    "rgba(0, 123, 255, 0.1)",
                    PLACEHOLDER_DEPOSITS.to_vec(),
                ),
                SeriesData::new(
                    "Loans",
                    "#28a745",
                    "rgba(40, 167, 69, 0.1)",
                    PLACEHOLDER_LOANS.to_vec(),
                ),
            ],
            tension: 0.4,
            filled: true,
            begin_at_zero: true,
            grid_color: "rgba(0, 0, 0, 0.05)".to_string(),
            legend: LegendPosition::Top,
        }
    }
}

/// Single-series proportional (doughnut) chart
#[derive(Debug, Clone, PartialEq)]
pub struct ProportionChart {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
    pub border_width: u32,
    pub legend: LegendPosition,
    pub legend_padding: u32,
}

impl ProportionChart {
    pub fn customer_placeholder() -> Self {
        Self {
            labels: SEGMENT_LABELS.iter().map(|l| l.to_string()).collect(),
            values: PLACEHOLDER_SEGMENTS.to_vec(),
            colors: SEGMENT_COLORS.iter().map(|c| c.to_string()).collect(),
            border_width: 0,
            legend: LegendPosition::Bottom,
            legend_padding: 20,
        }
    }
}
