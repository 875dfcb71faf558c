use crate::metrics::{KpiDetail, KpiEntry, KpiKind};

/// Compact number: `1.5M`, `2.3K`, or the plain value below one thousand.
pub fn format_number(num: f64) -> String {
    if num >= 1_000_000.0 {
        format!("{:.1}M", num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("{:.1}K", num / 1_000.0)
    } else {
        format!("{num}")
    }
}

/// Headline text of a KPI card.
pub fn kpi_value(entry: &KpiEntry) -> String {
    match entry.kind {
        KpiKind::CurrentRevenue => format!("${}", format_number(entry.value)),
        KpiKind::ActiveUsers => format_number(entry.value),
        KpiKind::ConversionRate => format!("{}%", entry.value),
        KpiKind::BudgetUsed => format!("{:.1}%", entry.value),
        KpiKind::TeamMembers => format!("{}", entry.value),
    }
}

/// Secondary line of a KPI card.
pub fn kpi_detail(detail: &KpiDetail) -> String {
    match *detail {
        KpiDetail::ProgressOfTarget { percent } => format!("{percent:.1}% of target"),
        KpiDetail::DeltaVsTarget { delta } => {
            let sign = if delta >= 0.0 { "+" } else { "" };
            format!("{sign}{delta:.1}% vs target")
        }
        KpiDetail::Spent { amount } => format!("${} spent", format_number(amount)),
        KpiDetail::ActiveToday { count } => format!("{count} active today"),
    }
}
