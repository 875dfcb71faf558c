pub mod types;

pub use types::*;

use chrono::NaiveDate;

use crate::date_util::{daily_labels, month_labels};
use crate::metrics::capped_progress;
use crate::metrics::trend::{synthesize, DEFAULT_VARIANCE};
use crate::model::MetricRecord;
use crate::synthetic::PlaceholderSource;

const CYAN: &str = "#00ffff";
const VIOLET: &str = "#8b5cf6";
const PINK: &str = "#ec4899";
const AMBER: &str = "#f59e0b";
const TRACK: &str = "rgba(255, 255, 255, 0.1)";

const DAILY_POINTS: usize = 30;
const CONVERSION_VARIANCE: f64 = 0.5;

pub const GOAL_AXES: [&str; 6] = [
    "Revenue",
    "Users",
    "Conversion",
    "Engagement",
    "Retention",
    "Growth",
];
pub const GOAL_TARGETS: [f64; 6] = [100.0, 100.0, 100.0, 90.0, 85.0, 80.0];
pub const DISTRIBUTION_CATEGORIES: [&str; 4] = ["Revenue", "Users", "Conversion", "Engagement"];

/// Build all five chart specifications for a project.
pub fn build_specs(
    record: &MetricRecord,
    today: NaiveDate,
    source: &mut dyn PlaceholderSource,
) -> ChartSet {
    ChartSet {
        performance: performance_overview(record, source),
        growth: goal_progress(record),
        goals: goal_achievement(record, source),
        metrics: metrics_distribution(record, source),
        timeseries: daily_trend(record, today, source),
    }
}

/// Monthly revenue (line, left axis) against users (bar, right axis).
///
/// Revenue and user counts differ by orders of magnitude, so each gets its own
/// independently scaled axis over the shared month labels.
pub fn performance_overview(
    record: &MetricRecord,
    source: &mut dyn PlaceholderSource,
) -> ChartSpec {
    let labels = month_labels();
    let revenue = synthesize(record.current_revenue, labels.len(), DEFAULT_VARIANCE, source);
    let users = synthesize(
        record.current_users as f64,
        labels.len(),
        DEFAULT_VARIANCE,
        source,
    );

    ChartSpec {
        id: "performance".to_string(),
        title: "Performance Overview".to_string(),
        kind: ChartKind::Combo,
        labels,
        series: vec![
            Series::new("Revenue", SeriesKind::Line, "y", revenue)
                .color(CYAN)
                .filled(),
            Series::new("Users", SeriesKind::Bar, "y1", users).color(VIOLET),
        ],
        axes: vec![
            Axis::linear("y", AxisPosition::Left),
            Axis::linear("y1", AxisPosition::Right).without_grid(),
        ],
        dual_axis: true,
        cutout_pct: None,
    }
}

/// Achieved vs. remaining share of the revenue target. The two slices always
/// sum to 100; overshoot is absorbed by the achieved slice.
pub fn goal_progress(record: &MetricRecord) -> ChartSpec {
    let progress = record.revenue_progress();
    let achieved = progress.clamp(0.0, 100.0);
    let remaining = 100.0 - achieved;

    ChartSpec {
        id: "growth".to_string(),
        title: "Revenue Goal Progress".to_string(),
        kind: ChartKind::Doughnut,
        labels: vec!["Achieved".to_string(), "Remaining".to_string()],
        series: vec![Series::new(
            "Revenue Progress",
            SeriesKind::Segments,
            "share",
            vec![achieved, remaining],
        )
        .segment_colors(&[CYAN, TRACK])],
        axes: vec![Axis::proportional("share")],
        dual_axis: false,
        cutout_pct: Some(75),
    }
}

/// Radar of current performance against goals. The first three axes are real
/// ratios (zero target counts as 0%), the rest come from `source`.
pub fn goal_achievement(record: &MetricRecord, source: &mut dyn PlaceholderSource) -> ChartSpec {
    let current = vec![
        capped_progress(record.current_revenue, record.target_revenue),
        capped_progress(record.current_users as f64, record.target_users as f64),
        capped_progress(record.current_conversion, record.target_conversion),
        source.engagement(),
        source.retention(),
        source.growth(),
    ];

    ChartSpec {
        id: "goals".to_string(),
        title: "Goal Achievement".to_string(),
        kind: ChartKind::Radar,
        labels: GOAL_AXES.iter().map(|s| s.to_string()).collect(),
        series: vec![
            Series::new("Current", SeriesKind::Area, "r", current)
                .color(CYAN)
                .filled(),
            Series::new("Target", SeriesKind::Area, "r", GOAL_TARGETS.to_vec())
                .color(VIOLET)
                .filled(),
        ],
        axes: vec![Axis::radial("r").begin_at_zero().with_max(100.0)],
        dual_axis: false,
        cutout_pct: None,
    }
}

/// Polar-area comparison of headline metrics, each scaled to a similar
/// magnitude: revenue in thousands, users in hundreds, conversion x10.
pub fn metrics_distribution(
    record: &MetricRecord,
    source: &mut dyn PlaceholderSource,
) -> ChartSpec {
    let points = vec![
        record.current_revenue / 1000.0,
        record.current_users as f64 / 100.0,
        record.current_conversion * 10.0,
        source.distribution_engagement(),
    ];

    ChartSpec {
        id: "metrics".to_string(),
        title: "Metrics Distribution".to_string(),
        kind: ChartKind::PolarArea,
        labels: DISTRIBUTION_CATEGORIES
            .iter()
            .map(|s| s.to_string())
            .collect(),
        series: vec![
            Series::new("Metrics", SeriesKind::Segments, "r", points).segment_colors(&[
                CYAN, VIOLET, PINK, AMBER,
            ]),
        ],
        axes: vec![Axis::radial("r")],
        dual_axis: false,
        cutout_pct: None,
    }
}

/// Thirty days of synthesized daily revenue, users and conversion ending at
/// `today`.
pub fn daily_trend(
    record: &MetricRecord,
    today: NaiveDate,
    source: &mut dyn PlaceholderSource,
) -> ChartSpec {
    let per_day = DAILY_POINTS as f64;
    let revenue = synthesize(
        record.current_revenue / per_day,
        DAILY_POINTS,
        DEFAULT_VARIANCE,
        source,
    );
    let users = synthesize(
        record.current_users as f64 / per_day,
        DAILY_POINTS,
        DEFAULT_VARIANCE,
        source,
    );
    let conversion = synthesize(
        record.current_conversion,
        DAILY_POINTS,
        CONVERSION_VARIANCE,
        source,
    );

    ChartSpec {
        id: "timeseries".to_string(),
        title: "Daily Trend".to_string(),
        kind: ChartKind::MultiLine,
        labels: daily_labels(today, DAILY_POINTS),
        series: vec![
            Series::new("Daily Revenue", SeriesKind::Line, "y", revenue)
                .color(CYAN)
                .filled(),
            Series::new("Daily Users", SeriesKind::Line, "y", users)
                .color(VIOLET)
                .filled(),
            Series::new("Conversion Rate", SeriesKind::Line, "y", conversion)
                .color(PINK)
                .filled(),
        ],
        axes: vec![Axis::linear("y", AxisPosition::Left)],
        dual_axis: false,
        cutout_pct: None,
    }
}
