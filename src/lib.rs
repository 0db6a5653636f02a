//! # Ledger Period Aggregator
//!
//! Classifies the rows of a ledger export and aggregates expenses and
//! recognized revenue into monthly buckets for a fixed window of years.
//!
//! ## Core Concepts
//!
//! - **Nature code**: the first digit of the `Natureza` column picks the category
//!   (1 = income, 2 = expense, 3 = bank movement, anything else is ignored)
//! - **Expenses**: whitelisted expense rows land in the month they are dated in
//! - **Revenue**: rows with the revenue code land one month *after* their date,
//!   so December revenue is reported in January of the next year
//! - **Store**: every (month, year) of the window exists from the start with a
//!   zero total; asking for anything outside the window is an error
//! - **Noise**: unclassifiable rows, bad dates and bad amounts are skipped or read
//!   as zero, never reported as errors
//!
//! ## Example
//!
//! ```rust
//! use ledger_period_aggregator::*;
//!
//! let config = LedgerConfig::default().with_expense_codes(["21001"]);
//! let rows = vec![
//!     Record::from_pairs([
//!         ("Natureza", "21001"),
//!         ("Data", "2023-03-05 00:00:00"),
//!         ("Saida", "150,00"),
//!     ]),
//!     Record::from_pairs([
//!         ("Natureza", "11101001"),
//!         ("Data", "2023-12-20 00:00:00"),
//!         ("Entrada", "1000.00"),
//!     ]),
//! ];
//!
//! let ledger = process_ledger(rows, config).unwrap();
//! assert_eq!(ledger.totals_for_year(AggregateKind::Expense, 2023).unwrap()[2], 150.0);
//! assert_eq!(ledger.totals_for_year(AggregateKind::Revenue, 2024).unwrap()[0], 1000.0);
//! ```

pub mod classifier;
pub mod engine;
pub mod error;
pub mod ingestion;
pub mod period;
pub mod report;
pub mod schema;
pub mod store;
pub mod utils;

pub use classifier::{classify, classify_nature_code, Category};
pub use engine::{AggregationOutcome, AggregationSummary, ExpenseAggregator, RevenueAggregator};
pub use error::{LedgerError, Result};
pub use ingestion::{FinancialDataset, Record};
pub use period::PeriodKey;
pub use report::{LedgerReport, YearSeries};
pub use schema::*;
pub use store::{AggregateKind, AggregateStore, PeriodTotals};
pub use utils::*;

use log::{debug, info};

/// Where a session is in its one-way lifecycle.
///
/// Aggregation runs to completion before returning, so `Aggregated` is also the
/// queryable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Empty,
    Classified,
    Aggregated,
}

/// One processing session: owns the classified rows and the aggregate store.
#[derive(Debug)]
pub struct LedgerProcessor {
    config: LedgerConfig,
    dataset: FinancialDataset,
    store: AggregateStore,
    stage: Stage,
    outcome: Option<AggregationOutcome>,
}

impl LedgerProcessor {
    pub fn new(config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        let store = AggregateStore::new(&config.years, &config.calendar.months)?;

        debug!(
            "Initialized store for years {:?} with {} months each",
            config.years,
            config.calendar.months.len()
        );

        Ok(Self {
            config,
            dataset: FinancialDataset::default(),
            store,
            stage: Stage::Empty,
            outcome: None,
        })
    }

    pub fn classify<I>(&mut self, records: I) -> Result<&FinancialDataset>
    where
        I: IntoIterator<Item = Record>,
    {
        if self.stage != Stage::Empty {
            return Err(LedgerError::AlreadyClassified);
        }

        self.dataset = FinancialDataset::from_records(records, &self.config.fields);
        self.stage = Stage::Classified;

        info!(
            "Classified {} rows ({} ignored)",
            self.dataset.classified_len(),
            self.dataset.ignored
        );

        Ok(&self.dataset)
    }

    /// Runs the expense and revenue passes. Allowed once per session; a second
    /// call is rejected and leaves the totals untouched.
    pub fn aggregate(&mut self) -> Result<&AggregationOutcome> {
        match self.stage {
            Stage::Empty => return Err(LedgerError::NotClassified),
            Stage::Aggregated => return Err(LedgerError::AlreadyAggregated),
            Stage::Classified => {}
        }

        let expenses = ExpenseAggregator::new(&self.config)
            .accumulate(self.dataset.records(Category::Expense), &mut self.store)?;
        let revenue = RevenueAggregator::new(&self.config)
            .accumulate(self.dataset.records(Category::Income), &mut self.store)?;

        info!(
            "Aggregated {} expense rows ({:.2}) and {} revenue rows ({:.2})",
            expenses.applied, expenses.total, revenue.applied, revenue.total
        );

        self.stage = Stage::Aggregated;
        Ok(&*self.outcome.insert(AggregationOutcome { expenses, revenue }))
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn dataset(&self) -> &FinancialDataset {
        &self.dataset
    }

    pub fn store(&self) -> &AggregateStore {
        &self.store
    }

    pub fn outcome(&self) -> Option<&AggregationOutcome> {
        self.outcome.as_ref()
    }

    /// Before aggregation every total is zero; that is not reported.
    pub fn totals_for_year(&self, kind: AggregateKind, year: i32) -> Result<[f64; 12]> {
        self.store.totals_for_year(kind, year)
    }

    pub fn single_total(&self, kind: AggregateKind, month: u32, year: i32) -> Result<f64> {
        self.store.single_total(kind, month, year)
    }

    pub fn report(&self) -> Result<LedgerReport> {
        LedgerReport::from_store(&self.store, &self.config.calendar)
    }
}

/// Classifies and aggregates `records` in one go.
pub fn process_ledger<I>(records: I, config: LedgerConfig) -> Result<LedgerProcessor>
where
    I: IntoIterator<Item = Record>,
{
    let mut processor = LedgerProcessor::new(config)?;
    processor.classify(records)?;
    processor.aggregate()?;
    Ok(processor)
}
