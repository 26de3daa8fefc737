//! Chart view models and their Plotly JSON.
//!
//! The models are plain data so they can be compared and tested; `traces`
//! and `layout` produce the JSON handed to `Plotly.newPlot` in the browser.

use crate::breakdown::top_n;
use crate::theme::Theme;
use model::{CategoryAggregate, YearBreakdown};
use plotly::common::{Line, Marker};
use plotly::Bar;
use serde_json::{json, Value};

/// Colors cycled through pie slices.
pub const PIE_COLORS: [&str; 6] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40",
];

const SHOWS_FILL: &str = "rgba(75, 192, 192, 0.2)";
const SHOWS_BORDER: &str = "rgba(75, 192, 192, 1)";
const BASELINE_FILL: &str = "rgba(75, 192, 192, 0.6)";
const HIGHLIGHT_FILL: &str = "rgba(255, 99, 132, 0.6)";
const HIGHLIGHT_BORDER: &str = "rgba(255, 99, 132, 1)";

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub name: String,
    pub values: Vec<u64>,
    pub fill: &'static str,
    pub border: &'static str,
}

/// Shows per year, optionally overlaid on the unfiltered catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartModel {
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<BarSeries>,
}

impl BarChartModel {
    pub fn from_breakdown(breakdown: &YearBreakdown) -> Self {
        let labels = breakdown.filtered.labels().to_vec();
        let filtered = breakdown.filtered.counts().to_vec();

        let series = match &breakdown.baseline {
            Some(all) => vec![
                BarSeries {
                    name: "Total Shows by Year (All Data)".to_string(),
                    values: all.clone(),
                    fill: BASELINE_FILL,
                    border: SHOWS_BORDER,
                },
                BarSeries {
                    name: "Filtered Total Shows".to_string(),
                    values: filtered,
                    fill: HIGHLIGHT_FILL,
                    border: HIGHLIGHT_BORDER,
                },
            ],
            None => vec![BarSeries {
                name: "Number of Shows".to_string(),
                values: filtered,
                fill: SHOWS_FILL,
                border: SHOWS_BORDER,
            }],
        };

        Self {
            title: "Number of Shows per Year".to_string(),
            labels,
            series,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// One Plotly bar trace per series.
    pub fn traces(&self) -> Value {
        let traces: Vec<Value> = self
            .series
            .iter()
            .map(|series| {
                let trace = Bar::new(self.labels.clone(), series.values.clone())
                    .name(&series.name)
                    .marker(
                        Marker::new()
                            .color(series.fill)
                            .line(Line::new().color(series.border).width(1.0)),
                    );
                serde_json::to_value(&trace).unwrap_or(Value::Null)
            })
            .collect();
        Value::Array(traces)
    }

    pub fn layout(&self, theme: Theme) -> Value {
        json!({
            "title": {"text": self.title},
            "barmode": "group",
            "margin": {"t": 40, "r": 10, "l": 50, "b": 40},
            "paper_bgcolor": "rgba(0,0,0,0)",
            "plot_bgcolor": "rgba(0,0,0,0)",
            "font": {"color": theme.text()},
            "xaxis": {"title": {"text": "Year"}, "showgrid": false, "type": "category"},
            "yaxis": {"title": {"text": "Total Shows"}, "showgrid": true, "gridcolor": theme.grid(), "rangemode": "tozero"},
            "showlegend": self.series.len() > 1,
            "legend": {"orientation": "h", "y": -0.2},
        })
    }
}

/// A breakdown reduced to its largest slices.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChartModel {
    pub title: String,
    pub slices: CategoryAggregate,
}

impl PieChartModel {
    /// `None` when there is nothing to draw; the panel then shows
    /// "No data available for {title}".
    pub fn from_aggregate(title: &str, aggregate: &CategoryAggregate, slices: usize) -> Option<Self> {
        if aggregate.is_empty() {
            return None;
        }
        Some(Self {
            title: title.to_string(),
            slices: top_n(aggregate, slices),
        })
    }

    pub fn colors(&self) -> Vec<&'static str> {
        (0..self.slices.len())
            .map(|i| PIE_COLORS[i % PIE_COLORS.len()])
            .collect()
    }

    pub fn traces(&self) -> Value {
        json!([{
            "type": "pie",
            "labels": self.slices.labels(),
            "values": self.slices.counts(),
            "marker": {"colors": self.colors()},
            "sort": false,
            "textinfo": "percent",
            "hoverinfo": "label+value",
        }])
    }

    pub fn layout(&self, theme: Theme) -> Value {
        json!({
            "margin": {"t": 10, "r": 10, "l": 10, "b": 10},
            "paper_bgcolor": "rgba(0,0,0,0)",
            "font": {"color": theme.text()},
            "showlegend": true,
            "legend": {"font": {"color": theme.text()}},
        })
    }
}

/// Shared Plotly options for every dashboard chart.
pub fn plot_config() -> Value {
    json!({"responsive": true, "displayModeBar": false})
}
