use serde::Serialize;

/// Which way a KPI is pointing relative to its goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Favorable,
    Unfavorable,
}

impl Signal {
    pub fn from_bool(favorable: bool) -> Self {
        if favorable {
            Signal::Favorable
        } else {
            Signal::Unfavorable
        }
    }

    pub fn is_favorable(&self) -> bool {
        matches!(self, Signal::Favorable)
    }
}

/// The five KPIs of the analytics view, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiKind {
    CurrentRevenue,
    ActiveUsers,
    ConversionRate,
    BudgetUsed,
    TeamMembers,
}

impl KpiKind {
    pub fn label(&self) -> &'static str {
        match self {
            KpiKind::CurrentRevenue => "Current Revenue",
            KpiKind::ActiveUsers => "Active Users",
            KpiKind::ConversionRate => "Conversion Rate",
            KpiKind::BudgetUsed => "Budget Used",
            KpiKind::TeamMembers => "Team Members",
        }
    }
}

/// Secondary figure shown under a KPI value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KpiDetail {
    /// Percent of target reached.
    ProgressOfTarget { percent: f64 },
    /// Signed difference from target, in percentage points.
    DeltaVsTarget { delta: f64 },
    /// Amount of budget spent.
    Spent { amount: f64 },
    ActiveToday { count: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiEntry {
    pub kind: KpiKind,
    pub label: String,
    pub value: f64,
    pub signal: Signal,
    pub detail: KpiDetail,
}

impl KpiEntry {
    pub fn new(kind: KpiKind, value: f64, signal: Signal, detail: KpiDetail) -> Self {
        Self {
            kind,
            label: kind.label().to_string(),
            value,
            signal,
            detail,
        }
    }
}

/// Ordered KPI entries for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct KpiSummary {
    pub entries: Vec<KpiEntry>,
}

impl KpiSummary {
    pub fn get(&self, kind: KpiKind) -> Option<&KpiEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &KpiEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
