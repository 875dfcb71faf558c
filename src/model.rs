use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a project. Only `Active` is ever produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(ProjectStatus::Active),
            _ => None,
        }
    }
}

/// Stored metrics for one analytics project.
///
/// All numeric fields are finite and non-negative; `team_size` is at least 1.
/// Build one through [`MetricRecord::from_input`] so those guarantees hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub id: String,
    pub name: String,
    pub analytics_type: String,
    pub data_source: String,
    pub time_range: String,
    pub metrics_of_interest: String,
    pub target_revenue: f64,
    pub current_revenue: f64,
    pub target_users: u64,
    pub current_users: u64,
    /// Percentage, 0-100 nominal.
    pub target_conversion: f64,
    /// Percentage, 0-100 nominal.
    pub current_conversion: f64,
    pub budget: f64,
    pub team_size: u32,
    pub created_at: DateTime<Utc>,
    pub status: ProjectStatus,
}

impl MetricRecord {
    /// Parse raw form input into a validated record. Unparseable, negative, or
    /// missing numbers fall back to 0 (1 for team size).
    pub fn from_input(input: &ProjectInput, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name.trim().to_string(),
            analytics_type: input.analytics_type.trim().to_string(),
            data_source: input.data_source.trim().to_string(),
            time_range: input.time_range.trim().to_string(),
            metrics_of_interest: input.metrics_of_interest.trim().to_string(),
            target_revenue: parse_amount(input.target_revenue.as_deref()),
            current_revenue: parse_amount(input.current_revenue.as_deref()),
            target_users: parse_count(input.target_users.as_deref()).unwrap_or(0),
            current_users: parse_count(input.current_users.as_deref()).unwrap_or(0),
            target_conversion: parse_amount(input.target_conversion.as_deref()),
            current_conversion: parse_amount(input.current_conversion.as_deref()),
            budget: parse_amount(input.budget.as_deref()),
            team_size: parse_count(input.team_size.as_deref())
                .filter(|n| *n > 0)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(1),
            created_at,
            status: ProjectStatus::Active,
        }
    }

    /// Revenue progress toward target as a percentage; 0 when there is no target.
    pub fn revenue_progress(&self) -> f64 {
        progress_pct(self.current_revenue, self.target_revenue)
    }

    /// User progress toward target as a percentage; 0 when there is no target.
    pub fn user_progress(&self) -> f64 {
        progress_pct(self.current_users as f64, self.target_users as f64)
    }
}

/// `current / target * 100`, or 0 when `target` is not positive.
pub fn progress_pct(current: f64, target: f64) -> f64 {
    if target > 0.0 {
        current / target * 100.0
    } else {
        0.0
    }
}

/// Raw, unvalidated project form input. Numeric fields are kept as the text
/// the user typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectInput {
    pub name: String,
    pub analytics_type: String,
    pub data_source: String,
    pub time_range: String,
    pub metrics_of_interest: String,
    pub target_revenue: Option<String>,
    pub current_revenue: Option<String>,
    pub target_users: Option<String>,
    pub current_users: Option<String>,
    pub target_conversion: Option<String>,
    pub current_conversion: Option<String>,
    pub budget: Option<String>,
    pub team_size: Option<String>,
}

impl ProjectInput {
    /// Load an existing record's values back into a form, so a modified copy can
    /// be launched as a new project. Zero values are left blank.
    pub fn from_record(record: &MetricRecord) -> Self {
        fn amount(v: f64) -> Option<String> {
            (v != 0.0).then(|| v.to_string())
        }
        fn count(v: u64) -> Option<String> {
            (v != 0).then(|| v.to_string())
        }

        Self {
            name: record.name.clone(),
            analytics_type: record.analytics_type.clone(),
            data_source: record.data_source.clone(),
            time_range: record.time_range.clone(),
            metrics_of_interest: record.metrics_of_interest.clone(),
            target_revenue: amount(record.target_revenue),
            current_revenue: amount(record.current_revenue),
            target_users: count(record.target_users),
            current_users: count(record.current_users),
            target_conversion: amount(record.target_conversion),
            current_conversion: amount(record.current_conversion),
            budget: amount(record.budget),
            team_size: Some(record.team_size.to_string()),
        }
    }

    /// Overlay every field that is set in `other` onto `self`.
    pub fn merge(mut self, other: ProjectInput) -> Self {
        fn text(dst: &mut String, src: String) {
            if !src.trim().is_empty() {
                *dst = src;
            }
        }
        fn num(dst: &mut Option<String>, src: Option<String>) {
            if src.is_some() {
                *dst = src;
            }
        }

        text(&mut self.name, other.name);
        text(&mut self.analytics_type, other.analytics_type);
        text(&mut self.data_source, other.data_source);
        text(&mut self.time_range, other.time_range);
        text(&mut self.metrics_of_interest, other.metrics_of_interest);
        num(&mut self.target_revenue, other.target_revenue);
        num(&mut self.current_revenue, other.current_revenue);
        num(&mut self.target_users, other.target_users);
        num(&mut self.current_users, other.current_users);
        num(&mut self.target_conversion, other.target_conversion);
        num(&mut self.current_conversion, other.current_conversion);
        num(&mut self.budget, other.budget);
        num(&mut self.team_size, other.team_size);
        self
    }
}

/// Parse a decimal amount; anything unusable becomes 0.
fn parse_amount(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// Parse a whole count. Fractional input is truncated ("12.7" -> 12).
fn parse_count(raw: Option<&str>) -> Option<u64> {
    let s = raw?.trim();
    if let Ok(n) = s.parse::<u64>() {
        return Some(n);
    }
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0 && *v < u64::MAX as f64)
        .map(|v| v.trunc() as u64)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProjectInput {
        ProjectInput {
            name: "  Checkout Funnel ".to_string(),
            analytics_type: "Revenue Analytics".to_string(),
            data_source: "Stripe".to_string(),
            time_range: "Last 30 days".to_string(),
            metrics_of_interest: "conversion, AOV".to_string(),
            target_revenue: Some("100000".to_string()),
            current_revenue: Some("50000.5".to_string()),
            target_users: Some("500".to_string()),
            current_users: Some("200".to_string()),
            target_conversion: Some("5.0".to_string()),
            current_conversion: Some("3.2".to_string()),
            budget: Some("10000".to_string()),
            team_size: Some("4".to_string()),
        }
    }

    #[test]
    fn test_from_input_parses_values() {
        let r = MetricRecord::from_input(&input(), "p1".to_string(), Utc::now());
        assert_eq!(r.name, "Checkout Funnel");
        assert_eq!(r.target_revenue, 100000.0);
        assert_eq!(r.current_revenue, 50000.5);
        assert_eq!(r.target_users, 500);
        assert_eq!(r.current_users, 200);
        assert_eq!(r.current_conversion, 3.2);
        assert_eq!(r.team_size, 4);
        assert_eq!(r.status, ProjectStatus::Active);
    }

    #[test]
    fn test_from_input_defaults_malformed_numbers() {
        let raw = ProjectInput {
            name: "Broken".to_string(),
            target_revenue: Some("lots".to_string()),
            current_revenue: Some("-50".to_string()),
            target_users: Some("NaN".to_string()),
            current_users: None,
            target_conversion: Some("inf".to_string()),
            current_conversion: Some("".to_string()),
            budget: Some("   ".to_string()),
            team_size: Some("0".to_string()),
            ..Default::default()
        };
        let r = MetricRecord::from_input(&raw, "p2".to_string(), Utc::now());
        assert_eq!(r.target_revenue, 0.0);
        assert_eq!(r.current_revenue, 0.0);
        assert_eq!(r.target_users, 0);
        assert_eq!(r.current_users, 0);
        assert_eq!(r.target_conversion, 0.0);
        assert_eq!(r.current_conversion, 0.0);
        assert_eq!(r.budget, 0.0);
        assert_eq!(r.team_size, 1);
    }

    #[test]
    fn test_count_truncates_fraction() {
        assert_eq!(parse_count(Some("12.7")), Some(12));
        assert_eq!(parse_count(Some(" 42 ")), Some(42));
        assert_eq!(parse_count(Some("-3")), None);
    }

    #[test]
    fn test_progress_zero_target() {
        assert_eq!(progress_pct(500.0, 0.0), 0.0);
        assert_eq!(progress_pct(50.0, 200.0), 25.0);
    }

    #[test]
    fn test_from_record_then_merge_overrides() {
        let r = MetricRecord::from_input(&input(), "p1".to_string(), Utc::now());
        let form = ProjectInput::from_record(&r).merge(ProjectInput {
            name: "Checkout Funnel v2".to_string(),
            current_users: Some("320".to_string()),
            ..Default::default()
        });
        let next = MetricRecord::from_input(&form, "p3".to_string(), Utc::now());
        assert_eq!(next.name, "Checkout Funnel v2");
        assert_eq!(next.current_users, 320);
        assert_eq!(next.target_users, 500);
        assert_eq!(next.analytics_type, "Revenue Analytics");
        assert_eq!(next.current_revenue, 50000.5);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(ProjectStatus::parse("Active"), Some(ProjectStatus::Active));
        assert_eq!(ProjectStatus::parse("archived"), None);
        assert_eq!(ProjectStatus::Active.as_str(), "active");
    }
}
