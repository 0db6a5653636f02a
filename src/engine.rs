use crate::error::Result;
use crate::ingestion::Record;
use crate::period::PeriodKey;
use crate::schema::{FieldNames, LedgerConfig};
use crate::store::{AggregateKind, AggregateStore};
use crate::utils::{parse_amount, parse_timestamp};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What one aggregation pass did with its input rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationSummary {
    pub applied: usize,
    pub skipped_nature: usize,
    pub skipped_date: usize,
    pub out_of_window: usize,
    pub total: f64,
}

impl AggregationSummary {
    pub fn seen(&self) -> usize {
        self.applied + self.skipped_nature + self.skipped_date + self.out_of_window
    }
}

/// Summaries of the expense and revenue passes of one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationOutcome {
    pub expenses: AggregationSummary,
    pub revenue: AggregationSummary,
}

/// Buckets whitelisted expense rows by the month they are dated in.
pub struct ExpenseAggregator<'a> {
    codes: &'a BTreeSet<String>,
    fields: &'a FieldNames,
    date_format: &'a str,
}

impl<'a> ExpenseAggregator<'a> {
    pub fn new(config: &'a LedgerConfig) -> Self {
        Self {
            codes: &config.expense_codes,
            fields: &config.fields,
            date_format: &config.date_format,
        }
    }

    /// Not idempotent: running twice over the same store counts every row twice.
    pub fn accumulate(
        &self,
        records: &[Record],
        store: &mut AggregateStore,
    ) -> Result<AggregationSummary> {
        let pass = Pass {
            kind: AggregateKind::Expense,
            fields: self.fields,
            amount_field: &self.fields.expense_amount,
            date_format: self.date_format,
        };
        pass.run(
            records,
            store,
            |code| self.codes.contains(code),
            |period| period,
        )
    }
}

/// Buckets revenue rows one month after the month they are dated in.
///
/// A December row is recognized in January of the following year.
pub struct RevenueAggregator<'a> {
    revenue_code: &'a str,
    fields: &'a FieldNames,
    date_format: &'a str,
}

impl<'a> RevenueAggregator<'a> {
    pub fn new(config: &'a LedgerConfig) -> Self {
        Self {
            revenue_code: &config.revenue_code,
            fields: &config.fields,
            date_format: &config.date_format,
        }
    }

    /// Not idempotent: running twice over the same store counts every row twice.
    pub fn accumulate(
        &self,
        records: &[Record],
        store: &mut AggregateStore,
    ) -> Result<AggregationSummary> {
        let pass = Pass {
            kind: AggregateKind::Revenue,
            fields: self.fields,
            amount_field: &self.fields.income_amount,
            date_format: self.date_format,
        };
        pass.run(
            records,
            store,
            |code| code == self.revenue_code,
            PeriodKey::next,
        )
    }
}

// Shared filter -> date -> bucket loop for both aggregators.
struct Pass<'a> {
    kind: AggregateKind,
    fields: &'a FieldNames,
    amount_field: &'a str,
    date_format: &'a str,
}

impl Pass<'_> {
    fn run<F, S>(
        &self,
        records: &[Record],
        store: &mut AggregateStore,
        qualifies: F,
        recognize: S,
    ) -> Result<AggregationSummary>
    where
        F: Fn(&str) -> bool,
        S: Fn(PeriodKey) -> PeriodKey,
    {
        let mut summary = AggregationSummary::default();

        for record in records {
            let code = record.get(&self.fields.nature).unwrap_or_default();
            if !qualifies(code) {
                summary.skipped_nature += 1;
                continue;
            }

            let raw_date = record.get(&self.fields.date);
            let Some(timestamp) = parse_timestamp(raw_date, self.date_format) else {
                debug!(
                    "{:?}: skipping row with nature {} and unparseable date {:?}",
                    self.kind, code, raw_date
                );
                summary.skipped_date += 1;
                continue;
            };

            let period = recognize(PeriodKey::from_datetime(&timestamp));
            if !store.contains(&period) {
                debug!(
                    "{:?}: period {} is outside the tracked window, skipping",
                    self.kind, period
                );
                summary.out_of_window += 1;
                continue;
            }

            let amount = parse_amount(record.get(self.amount_field));
            store.add(self.kind, period, amount)?;
            summary.applied += 1;
            summary.total += amount;
        }

        debug!("{:?} pass finished: {:?}", self.kind, summary);

        Ok(summary)
    }
}
