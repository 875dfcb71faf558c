pub mod trend;
pub mod types;

pub use types::*;

use crate::model::{progress_pct, MetricRecord};
use crate::synthetic::PlaceholderSource;

/// Utilization at or above this share of budget is flagged.
const BUDGET_ALERT_PCT: f64 = 80.0;

/// Compute the five KPI entries for a project.
///
/// Budget utilization and the "active today" count come from `source`; every
/// other value is derived from the record alone.
pub fn compute_kpis(record: &MetricRecord, source: &mut dyn PlaceholderSource) -> KpiSummary {
    let revenue_progress = record.revenue_progress();
    let user_progress = record.user_progress();
    let conversion_delta = record.current_conversion - record.target_conversion;
    let budget_used = if record.budget > 0.0 {
        source.budget_utilization()
    } else {
        0.0
    };
    let active_today = source.active_today();

    KpiSummary {
        entries: vec![
            progress_entry(
                KpiKind::CurrentRevenue,
                record.current_revenue,
                revenue_progress,
            ),
            progress_entry(
                KpiKind::ActiveUsers,
                record.current_users as f64,
                user_progress,
            ),
            KpiEntry::new(
                KpiKind::ConversionRate,
                record.current_conversion,
                Signal::from_bool(conversion_delta >= 0.0),
                KpiDetail::DeltaVsTarget {
                    delta: conversion_delta,
                },
            ),
            KpiEntry::new(
                KpiKind::BudgetUsed,
                budget_used,
                Signal::from_bool(budget_used < BUDGET_ALERT_PCT),
                KpiDetail::Spent {
                    amount: record.budget * budget_used / 100.0,
                },
            ),
            KpiEntry::new(
                KpiKind::TeamMembers,
                record.team_size as f64,
                Signal::Favorable,
                KpiDetail::ActiveToday {
                    count: active_today,
                },
            ),
        ],
    }
}

fn progress_entry(kind: KpiKind, value: f64, percent: f64) -> KpiEntry {
    KpiEntry::new(
        kind,
        value,
        Signal::from_bool(percent >= 100.0),
        KpiDetail::ProgressOfTarget { percent },
    )
}

/// Percent of target for a ratio KPI, capped at 100 for goal charts.
pub(crate) fn capped_progress(current: f64, target: f64) -> f64 {
    progress_pct(current, target).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::scenario_record;
    use crate::synthetic::testing::FixedSource;
    use crate::synthetic::RandomSource;

    fn progress(entry: &KpiEntry) -> f64 {
        match entry.detail {
            KpiDetail::ProgressOfTarget { percent } => percent,
            other => panic!("expected progress detail, got {other:?}"),
        }
    }

    #[test]
    fn test_kpi_order_and_labels() {
        let kpis = compute_kpis(&scenario_record(), &mut FixedSource(0.5));
        let labels: Vec<&str> = kpis.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Current Revenue",
                "Active Users",
                "Conversion Rate",
                "Budget Used",
                "Team Members"
            ]
        );
    }

    #[test]
    fn test_scenario_values() {
        let kpis = compute_kpis(&scenario_record(), &mut RandomSource::seeded(1));

        let revenue = kpis.get(KpiKind::CurrentRevenue).unwrap();
        assert_eq!(revenue.value, 50_000.0);
        assert_eq!(progress(revenue), 50.0);
        assert_eq!(revenue.signal, Signal::Unfavorable);

        let users = kpis.get(KpiKind::ActiveUsers).unwrap();
        assert_eq!(users.value, 200.0);
        assert_eq!(progress(users), 40.0);
        assert_eq!(users.signal, Signal::Unfavorable);

        let conversion = kpis.get(KpiKind::ConversionRate).unwrap();
        assert_eq!(conversion.value, 3.2);
        assert_eq!(conversion.signal, Signal::Unfavorable);
        match conversion.detail {
            KpiDetail::DeltaVsTarget { delta } => assert!((delta + 1.8).abs() < 1e-9),
            other => panic!("unexpected detail {other:?}"),
        }

        let team = kpis.get(KpiKind::TeamMembers).unwrap();
        assert_eq!(team.value, 4.0);
        assert_eq!(team.signal, Signal::Favorable);
    }

    #[test]
    fn test_zero_targets_use_guard() {
        let mut record = scenario_record();
        record.target_revenue = 0.0;
        record.target_users = 0;
        record.target_conversion = 0.0;
        let kpis = compute_kpis(&record, &mut FixedSource(0.5));

        for kind in [KpiKind::CurrentRevenue, KpiKind::ActiveUsers] {
            let entry = kpis.get(kind).unwrap();
            assert_eq!(progress(entry), 0.0);
            assert_eq!(entry.signal, Signal::Unfavorable);
        }
        // 3.2 - 0 is non-negative
        assert!(kpis
            .get(KpiKind::ConversionRate)
            .unwrap()
            .signal
            .is_favorable());
    }

    #[test]
    fn test_target_met_is_favorable() {
        let mut record = scenario_record();
        record.current_revenue = 100_000.0;
        record.current_users = 750;
        let kpis = compute_kpis(&record, &mut FixedSource(0.5));
        assert!(kpis.get(KpiKind::CurrentRevenue).unwrap().signal.is_favorable());
        assert_eq!(progress(kpis.get(KpiKind::ActiveUsers).unwrap()), 150.0);
        assert!(kpis.get(KpiKind::ActiveUsers).unwrap().signal.is_favorable());
    }

    #[test]
    fn test_conversion_at_or_above_target_is_favorable() {
        let mut src = RandomSource::seeded(5);
        for (current, target) in [(5.0, 5.0), (7.5, 2.0), (0.0, 0.0), (100.0, 99.9)] {
            let mut record = scenario_record();
            record.current_conversion = current;
            record.target_conversion = target;
            let kpis = compute_kpis(&record, &mut src);
            let entry = kpis.get(KpiKind::ConversionRate).unwrap();
            assert_eq!(entry.signal, Signal::Favorable);
            match entry.detail {
                KpiDetail::DeltaVsTarget { delta } => assert!(delta >= 0.0),
                other => panic!("unexpected detail {other:?}"),
            }
        }
    }

    #[test]
    fn test_budget_used() {
        let mut record = scenario_record();
        // unit 0.5 -> 55% utilization
        let kpis = compute_kpis(&record, &mut FixedSource(0.5));
        let budget = kpis.get(KpiKind::BudgetUsed).unwrap();
        assert_eq!(budget.value, 55.0);
        assert_eq!(budget.signal, Signal::Favorable);
        assert_eq!(budget.detail, KpiDetail::Spent { amount: 5_500.0 });

        // unit 0.9 -> 83% utilization
        let kpis = compute_kpis(&record, &mut FixedSource(0.9));
        assert_eq!(
            kpis.get(KpiKind::BudgetUsed).unwrap().signal,
            Signal::Unfavorable
        );

        record.budget = 0.0;
        let kpis = compute_kpis(&record, &mut FixedSource(0.9));
        let budget = kpis.get(KpiKind::BudgetUsed).unwrap();
        assert_eq!(budget.value, 0.0);
        assert_eq!(budget.signal, Signal::Favorable);
        assert_eq!(budget.detail, KpiDetail::Spent { amount: 0.0 });
    }

    #[test]
    fn test_active_today_range() {
        let mut src = RandomSource::seeded(99);
        for _ in 0..200 {
            let kpis = compute_kpis(&scenario_record(), &mut src);
            match kpis.get(KpiKind::TeamMembers).unwrap().detail {
                KpiDetail::ActiveToday { count } => assert!((1..=5).contains(&count)),
                other => panic!("unexpected detail {other:?}"),
            }
        }
    }

    #[test]
    fn test_capped_progress() {
        assert_eq!(capped_progress(150.0, 100.0), 100.0);
        assert_eq!(capped_progress(25.0, 100.0), 25.0);
        assert_eq!(capped_progress(25.0, 0.0), 0.0);
    }
}
