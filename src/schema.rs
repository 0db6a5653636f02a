use crate::error::{LedgerError, Result};
use crate::period::validate_month;
use crate::utils::DEFAULT_DATE_FORMAT;
use chrono::format::{Item, StrftimeItems};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_REVENUE_CODE: &str = "11101001";

const DEFAULT_MONTH_LABELS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Column names of the ledger export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct FieldNames {
    #[schemars(description = "Column holding the nature code, whose first digit selects the category")]
    #[serde(default = "default_nature_field")]
    pub nature: String,

    #[schemars(description = "Column holding the transaction timestamp")]
    #[serde(default = "default_date_field")]
    pub date: String,

    #[schemars(description = "Amount column read for income rows")]
    #[serde(default = "default_income_amount_field")]
    pub income_amount: String,

    #[schemars(description = "Amount column read for expense rows")]
    #[serde(default = "default_expense_amount_field")]
    pub expense_amount: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            nature: default_nature_field(),
            date: default_date_field(),
            income_amount: default_income_amount_field(),
            expense_amount: default_expense_amount_field(),
        }
    }
}

/// Month numbers to initialize in the store, with their display labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct Calendar {
    #[schemars(description = "Month numbers (1-12) that get a zeroed bucket for every tracked year")]
    #[serde(default = "default_months")]
    pub months: Vec<u32>,

    #[schemars(description = "Short labels for January through December, used in reports")]
    #[serde(default = "default_month_labels")]
    pub labels: Vec<String>,
}

impl Calendar {
    pub fn label(&self, month: u32) -> Option<&str> {
        let idx = usize::try_from(month).ok()?.checked_sub(1)?;
        self.labels.get(idx).map(String::as_str)
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            months: default_months(),
            labels: default_month_labels(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct LedgerConfig {
    #[schemars(description = "Years that get a zeroed bucket for every configured month")]
    #[serde(default = "default_years")]
    pub years: Vec<i32>,

    #[serde(default)]
    pub calendar: Calendar,

    #[schemars(
        description = "Nature codes of expense rows that count towards expense totals. Matched exactly."
    )]
    #[serde(default)]
    pub expense_codes: BTreeSet<String>,

    #[schemars(description = "The single nature code of income rows recognized as revenue")]
    #[serde(default = "default_revenue_code")]
    pub revenue_code: String,

    #[serde(default)]
    pub fields: FieldNames,

    #[schemars(description = "chrono format string for the date column")]
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            years: default_years(),
            calendar: Calendar::default(),
            expense_codes: BTreeSet::new(),
            revenue_code: default_revenue_code(),
            fields: FieldNames::default(),
            date_format: default_date_format(),
        }
    }
}

impl LedgerConfig {
    pub fn with_expense_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expense_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.years = years.into_iter().collect();
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.years.is_empty() {
            return Err(LedgerError::InvalidConfig(
                "At least one year must be tracked".to_string(),
            ));
        }

        for &month in &self.calendar.months {
            validate_month(month)?;
        }

        if self.calendar.labels.len() != 12 {
            return Err(LedgerError::InvalidConfig(format!(
                "Expected 12 month labels, got {}",
                self.calendar.labels.len()
            )));
        }

        if self.date_format.is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(LedgerError::InvalidConfig(format!(
                "Invalid date format '{}'",
                self.date_format
            )));
        }

        if self.revenue_code.is_empty() {
            return Err(LedgerError::InvalidConfig(
                "Revenue nature code must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(LedgerConfig)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

fn default_nature_field() -> String {
    "Natureza".to_string()
}

fn default_date_field() -> String {
    "Data".to_string()
}

fn default_income_amount_field() -> String {
    "Entrada".to_string()
}

fn default_expense_amount_field() -> String {
    "Saida".to_string()
}

fn default_months() -> Vec<u32> {
    (1..=12).collect()
}

fn default_month_labels() -> Vec<String> {
    DEFAULT_MONTH_LABELS.iter().map(|s| s.to_string()).collect()
}

fn default_years() -> Vec<i32> {
    vec![2023, 2024, 2025]
}

fn default_revenue_code() -> String {
    DEFAULT_REVENUE_CODE.to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LedgerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.years, vec![2023, 2024, 2025]);
        assert_eq!(config.revenue_code, "11101001");
        assert_eq!(config.fields.nature, "Natureza");
        assert_eq!(config.calendar.label(1), Some("jan"));
        assert_eq!(config.calendar.label(12), Some("dez"));
        assert_eq!(config.calendar.label(0), None);
        assert_eq!(config.calendar.label(13), None);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config =
            LedgerConfig::from_json(r#"{"years": [2024], "expense_codes": ["21001", "21002"]}"#)
                .unwrap();
        assert_eq!(config.years, vec![2024]);
        assert!(config.expense_codes.contains("21001"));
        assert_eq!(config.calendar.months.len(), 12);
        assert_eq!(config.date_format, "%Y-%m-%d %H:%M:%S");
        assert_eq!(config.fields.expense_amount, "Saida");
    }

    #[test]
    fn test_validation_failures() {
        let config = LedgerConfig::default().with_years(Vec::new());
        assert!(matches!(
            config.validate(),
            Err(LedgerError::InvalidConfig(_))
        ));

        let mut config = LedgerConfig::default();
        config.calendar.months.push(13);
        assert!(matches!(config.validate(), Err(LedgerError::InvalidMonth(13))));

        let mut config = LedgerConfig::default();
        config.revenue_code.clear();
        assert!(config.validate().is_err());

        assert!(matches!(
            LedgerConfig::from_json("{not json"),
            Err(LedgerError::SerializationError(_))
        ));
    }

    #[test]
    fn test_invalid_date_format_rejected() {
        let result = LedgerConfig::from_json(
            r#"{"expense_codes": ["21001"], "date_format": "%Y-%m-%d %Q"}"#,
        );
        assert!(matches!(result, Err(LedgerError::InvalidConfig(_))));

        let mut config = LedgerConfig::default();
        config.date_format.clear();
        assert!(matches!(
            config.validate(),
            Err(LedgerError::InvalidConfig(_))
        ));

        config.date_format = "%d/%m/%Y %H:%M".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_schema_generation() {
        let schema_json = LedgerConfig::schema_as_json().unwrap();
        assert!(schema_json.contains("expense_codes"));
        assert!(schema_json.contains("revenue_code"));
        assert!(schema_json.contains("calendar"));
    }
}
