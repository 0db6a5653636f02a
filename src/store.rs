use crate::error::{LedgerError, Result};
use crate::period::PeriodKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateKind {
    Expense,
    Revenue,
}

pub type PeriodTotals = BTreeMap<PeriodKey, f64>;

/// Per-period running totals for expenses and revenue.
///
/// Both maps hold exactly the keys created by [`AggregateStore::new`]. Adding to
/// a period outside that set is refused, so the key set never changes after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateStore {
    expenses: PeriodTotals,
    revenue: PeriodTotals,
}

impl AggregateStore {
    /// Zeroed store for every (month, year) combination.
    pub fn new(years: &[i32], months: &[u32]) -> Result<Self> {
        let mut totals = PeriodTotals::new();
        for &year in years {
            for &month in months {
                totals.insert(PeriodKey::new(month, year)?, 0.0);
            }
        }

        Ok(Self {
            expenses: totals.clone(),
            revenue: totals,
        })
    }

    fn totals(&self, kind: AggregateKind) -> &PeriodTotals {
        match kind {
            AggregateKind::Expense => &self.expenses,
            AggregateKind::Revenue => &self.revenue,
        }
    }

    fn totals_mut(&mut self, kind: AggregateKind) -> &mut PeriodTotals {
        match kind {
            AggregateKind::Expense => &mut self.expenses,
            AggregateKind::Revenue => &mut self.revenue,
        }
    }

    pub fn contains(&self, period: &PeriodKey) -> bool {
        self.expenses.contains_key(period)
    }

    /// Adds `amount` to an existing bucket.
    pub fn add(&mut self, kind: AggregateKind, period: PeriodKey, amount: f64) -> Result<()> {
        let slot = self
            .totals_mut(kind)
            .get_mut(&period)
            .ok_or(LedgerError::PeriodNotInitialized {
                month: period.month(),
                year: period.year(),
            })?;
        *slot += amount;
        Ok(())
    }

    /// January through December totals of one year.
    ///
    /// Fails when the year is not tracked or any of its months was left out of
    /// the store; a partial sequence is never returned.
    pub fn totals_for_year(&self, kind: AggregateKind, year: i32) -> Result<[f64; 12]> {
        let totals = self.totals(kind);
        let mut series = [0.0; 12];
        let mut found = 0;

        for (idx, slot) in series.iter_mut().enumerate() {
            let key = PeriodKey::new(idx as u32 + 1, year)?;
            if let Some(value) = totals.get(&key) {
                *slot = *value;
                found += 1;
            }
        }

        match found {
            12 => Ok(series),
            0 => Err(LedgerError::PeriodNotInitialized { month: 1, year }),
            _ => Err(LedgerError::IncompleteYear { year, found }),
        }
    }

    pub fn single_total(&self, kind: AggregateKind, month: u32, year: i32) -> Result<f64> {
        self.totals(kind)
            .get(&PeriodKey::new(month, year)?)
            .copied()
            .ok_or(LedgerError::PeriodNotInitialized { month, year })
    }

    /// Tracked years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.expenses
            .keys()
            .map(|k| k.year())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Buckets in calendar order.
    pub fn iter(&self, kind: AggregateKind) -> impl Iterator<Item = (PeriodKey, f64)> + '_ {
        self.totals(kind).iter().map(|(k, v)| (*k, *v))
    }

    pub fn grand_total(&self, kind: AggregateKind) -> f64 {
        self.totals(kind).values().sum()
    }
}
