//! Task catalog returned by the schedule engine.

use serde::Serialize;

/// Recurrence class a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Tier {
    /// Tiers in display order.
    pub const ALL: [Tier; 4] = [Tier::Daily, Tier::Weekly, Tier::Monthly, Tier::Yearly];

    /// Stable machine id.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Heading shown to staff.
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Harian",
            Self::Weekly => "Mingguan",
            Self::Monthly => "Bulanan",
            Self::Yearly => "Tahunan",
        }
    }
}

/// Every task due on one date, grouped by tier.
///
/// Lists borrow the static rotation tables, so a catalog is `Copy` and
/// cannot be used to alter task-name text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskCatalog {
    pub daily: &'static [&'static str],
    pub weekly: &'static [&'static str],
    pub monthly: &'static [&'static str],
    pub yearly: &'static [&'static str],
}

impl TaskCatalog {
    /// Returns the ordered task list of one tier.
    pub fn tier(&self, tier: Tier) -> &'static [&'static str] {
        match tier {
            Tier::Daily => self.daily,
            Tier::Weekly => self.weekly,
            Tier::Monthly => self.monthly,
            Tier::Yearly => self.yearly,
        }
    }

    /// Iterates `(tier, task)` pairs in tier order, then list order.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &'static str)> + '_ {
        Tier::ALL
            .into_iter()
            .flat_map(move |tier| self.tier(tier).iter().map(move |task| (tier, *task)))
    }

    /// Total task count across all tiers.
    pub fn total(&self) -> usize {
        Tier::ALL.iter().map(|tier| self.tier(*tier).len()).sum()
    }

    /// Exact, case-sensitive membership check.
    pub fn contains(&self, task: &str) -> bool {
        self.iter().any(|(_, candidate)| candidate == task)
    }
}
