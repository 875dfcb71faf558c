use serde::Serialize;

/// Visual encoding of a whole chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Line and bar series sharing a category axis.
    Combo,
    Doughnut,
    Radar,
    PolarArea,
    MultiLine,
}

/// How a single series is drawn inside its chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Line,
    Bar,
    /// Slices of a doughnut or polar-area chart, one per category.
    Segments,
    /// Closed polygon on a radial axis.
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    Linear,
    /// Values are shares of a whole.
    Proportional,
    Radial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPosition {
    Left,
    Right,
    Center,
}

/// A value axis. Every chart shares one category axis given by
/// [`ChartSpec::labels`]; these are the axes the series values are scaled on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub id: String,
    pub scale: ScaleKind,
    pub position: AxisPosition,
    pub begin_at_zero: bool,
    pub max: Option<f64>,
    /// Whether this axis draws grid lines across the plot area. Secondary
    /// axes leave the grid to the primary one.
    pub grid: bool,
}

impl Axis {
    pub fn linear(id: &str, position: AxisPosition) -> Self {
        Self {
            id: id.to_string(),
            scale: ScaleKind::Linear,
            position,
            begin_at_zero: false,
            max: None,
            grid: true,
        }
    }

    pub fn radial(id: &str) -> Self {
        Self {
            id: id.to_string(),
            scale: ScaleKind::Radial,
            position: AxisPosition::Center,
            begin_at_zero: false,
            max: None,
            grid: true,
        }
    }

    pub fn proportional(id: &str) -> Self {
        Self {
            id: id.to_string(),
            scale: ScaleKind::Proportional,
            position: AxisPosition::Center,
            begin_at_zero: true,
            max: Some(100.0),
            grid: false,
        }
    }

    pub fn begin_at_zero(mut self) -> Self {
        self.begin_at_zero = true;
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn without_grid(mut self) -> Self {
        self.grid = false;
        self
    }
}

/// One named data series, aligned point-for-point to the chart labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    /// Id of the [`Axis`] this series is plotted against.
    pub axis: String,
    pub points: Vec<f64>,
    /// One color for the series, or one per point for segment series.
    pub colors: Vec<String>,
    pub fill: bool,
}

impl Series {
    pub fn new(name: &str, kind: SeriesKind, axis: &str, points: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            axis: axis.to_string(),
            points,
            colors: Vec::new(),
            fill: false,
        }
    }

    pub fn color(mut self, color: &str) -> Self {
        self.colors = vec![color.to_string()];
        self
    }

    pub fn segment_colors(mut self, colors: &[&str]) -> Self {
        self.colors = colors.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn filled(mut self) -> Self {
        self.fill = true;
        self
    }
}

/// Declarative, renderer-agnostic description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Stable slot identifier (`performance`, `growth`, ...).
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    pub axes: Vec<Axis>,
    /// Series are split over two independently scaled value axes.
    pub dual_axis: bool,
    /// Hole size of a doughnut, as a percentage of the radius.
    pub cutout_pct: Option<u8>,
}

impl ChartSpec {
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn axis(&self, id: &str) -> Option<&Axis> {
        self.axes.iter().find(|a| a.id == id)
    }
}

/// The five charts of the analytics view, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub performance: ChartSpec,
    pub growth: ChartSpec,
    pub goals: ChartSpec,
    pub metrics: ChartSpec,
    pub timeseries: ChartSpec,
}

impl ChartSet {
    pub fn iter(&self) -> impl Iterator<Item = &ChartSpec> {
        [
            &self.performance,
            &self.growth,
            &self.goals,
            &self.metrics,
            &self.timeseries,
        ]
        .into_iter()
    }

    pub fn get(&self, id: &str) -> Option<&ChartSpec> {
        self.iter().find(|c| c.id == id)
    }
}
