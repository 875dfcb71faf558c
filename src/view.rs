use chrono::NaiveDate;
use serde::Serialize;

use crate::charts::{build_specs, ChartSet};
use crate::error::{Error, Result};
use crate::metrics::{compute_kpis, KpiSummary};
use crate::model::MetricRecord;
use crate::synthetic::PlaceholderSource;

/// Everything the rendering boundary needs for one project's analytics view.
///
/// Always built fresh. A renderer holding chart resources from an earlier
/// bundle for the same slot must release them before drawing this one.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsBundle {
    pub project_id: String,
    pub title: String,
    pub kpis: KpiSummary,
    pub charts: ChartSet,
}

/// Resolve `project_id` in `projects` and derive its analytics bundle.
///
/// Returns [`Error::NotFound`] without computing anything when the id is not
/// in the collection.
pub fn open(
    projects: &[MetricRecord],
    project_id: &str,
    today: NaiveDate,
    source: &mut dyn PlaceholderSource,
) -> Result<AnalyticsBundle> {
    let record = projects
        .iter()
        .find(|p| p.id == project_id)
        .ok_or_else(|| Error::NotFound(project_id.to_string()))?;
    Ok(build_bundle(record, today, source))
}

/// Derive the bundle for an already-resolved record.
pub fn build_bundle(
    record: &MetricRecord,
    today: NaiveDate,
    source: &mut dyn PlaceholderSource,
) -> AnalyticsBundle {
    log::debug!("Building analytics bundle for project {}", record.id);
    let kpis = compute_kpis(record, source);
    let charts = build_specs(record, today, source);
    AnalyticsBundle {
        project_id: record.id.clone(),
        title: format!("{} - Advanced Analytics", record.name),
        kpis,
        charts,
    }
}
