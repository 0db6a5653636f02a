use crate::classifier::{classify, Category};
use crate::schema::FieldNames;
use log::debug;
use serde::{Deserialize, Serialize};

/// One row of a ledger export: field name to raw cell text, in column order.
///
/// Repeated field names are kept; lookups see the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Builds a record, trimming whitespace around field names. Cell values are kept verbatim.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().trim().to_string(), v.into()))
            .collect();
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Rows split by category. Filled once by [`FinancialDataset::from_records`].
#[derive(Debug, Clone, Default)]
pub struct FinancialDataset {
    pub income: Vec<Record>,
    pub expenses: Vec<Record>,
    pub bank_movements: Vec<Record>,
    pub ignored: usize,
}

impl FinancialDataset {
    pub fn from_records<I>(records: I, fields: &FieldNames) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let mut dataset = Self::default();

        for record in records {
            match classify(&record, fields) {
                Category::Income => dataset.income.push(record),
                Category::Expense => dataset.expenses.push(record),
                Category::BankMovement => dataset.bank_movements.push(record),
                Category::Ignored => dataset.ignored += 1,
            }
        }

        debug!(
            "Classified {} income, {} expense, {} bank movement rows; {} ignored",
            dataset.income.len(),
            dataset.expenses.len(),
            dataset.bank_movements.len(),
            dataset.ignored
        );

        dataset
    }

    pub fn records(&self, category: Category) -> &[Record] {
        match category {
            Category::Income => &self.income,
            Category::Expense => &self.expenses,
            Category::BankMovement => &self.bank_movements,
            Category::Ignored => &[],
        }
    }

    pub fn classified_len(&self) -> usize {
        self.income.len() + self.expenses.len() + self.bank_movements.len()
    }
}
