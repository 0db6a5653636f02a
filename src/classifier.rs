use crate::ingestion::Record;
use crate::schema::FieldNames;
use serde::{Deserialize, Serialize};

/// Financial bucket of a ledger row, derived from the first digit of its nature code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Income,
    Expense,
    BankMovement,
    Ignored,
}

pub fn classify(record: &Record, fields: &FieldNames) -> Category {
    classify_nature_code(record.get(&fields.nature))
}

/// Never fails: anything that is not a known leading digit is `Ignored`.
/// Spreadsheet exports render empty cells as `"nan"`, which lands here too.
pub fn classify_nature_code(code: Option<&str>) -> Category {
    let Some(first) = code.and_then(|c| c.chars().next()) else {
        return Category::Ignored;
    };

    match first.to_digit(10) {
        Some(1) => Category::Income,
        Some(2) => Category::Expense,
        Some(3) => Category::BankMovement,
        _ => Category::Ignored,
    }
}
