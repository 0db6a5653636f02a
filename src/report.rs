use crate::error::Result;
use crate::schema::Calendar;
use crate::store::{AggregateKind, AggregateStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSeries {
    pub year: i32,
    pub expenses: [f64; 12],
    pub revenue: [f64; 12],
}

impl YearSeries {
    pub fn expense_total(&self) -> f64 {
        self.expenses.iter().sum()
    }

    pub fn revenue_total(&self) -> f64 {
        self.revenue.iter().sum()
    }
}

/// Read-only snapshot of every tracked year, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerReport {
    pub month_labels: Vec<String>,
    pub years: BTreeMap<i32, YearSeries>,
}

impl LedgerReport {
    /// Fails if any tracked year lacks one of its 12 months.
    pub fn from_store(store: &AggregateStore, calendar: &Calendar) -> Result<Self> {
        let mut years = BTreeMap::new();

        for year in store.years() {
            years.insert(
                year,
                YearSeries {
                    year,
                    expenses: store.totals_for_year(AggregateKind::Expense, year)?,
                    revenue: store.totals_for_year(AggregateKind::Revenue, year)?,
                },
            );
        }

        Ok(Self {
            month_labels: calendar.labels.clone(),
            years,
        })
    }

    pub fn year(&self, year: i32) -> Option<&YearSeries> {
        self.years.get(&year)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One line per (year, month): `Period,Expenses,Revenue`, periods labelled like `jan_2023`.
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str("Period,Expenses,Revenue\n");

        for series in self.years.values() {
            for idx in 0..12 {
                let label = self
                    .month_labels
                    .get(idx)
                    .cloned()
                    .unwrap_or_else(|| format!("{:02}", idx + 1));
                output.push_str(&format!(
                    "{}_{},{:.2},{:.2}\n",
                    label, series.year, series.expenses[idx], series.revenue[idx]
                ));
            }
        }

        output
    }

    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(self.to_csv().as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
