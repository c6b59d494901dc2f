//! Profit command - earnings before tax, profit and their ratio

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use rust_decimal::Decimal;
use tally_core::domain::result::Result as CoreResult;
use tally_core::{EntryPoint, Error, ProfitInputs};

use super::{get_context, get_logger, log_failure, log_success, value_or_prompt};
use crate::output;

pub fn run(
    data_dir: &Path,
    revenue: Option<String>,
    expenses: Option<String>,
    tax_rate: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context(data_dir)?;
    let logger = get_logger(data_dir, EntryPoint::Command);

    let revenue = value_or_prompt(revenue, "Revenue")?;
    let expenses = value_or_prompt(expenses, "Expenses")?;
    let tax_rate = value_or_prompt(tax_rate, "Tax Rate")?;

    let outcome = build_inputs(&revenue, &expenses, &tax_rate)
        .and_then(|inputs| ctx.profit_service.calculate(&inputs))
        .and_then(|financials| {
            let path = ctx.profit_service.store(&financials)?;
            Ok((financials, path))
        });

    let (financials, path) = match outcome {
        Ok(stored) => {
            log_success(&logger, "profit");
            stored
        }
        Err(e) => {
            log_failure(&logger, "profit", &e);
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&financials)?);
        return Ok(());
    }

    print!("{}", financials.report());
    println!("  Saved to {}", path.display().to_string().dimmed());
    if financials.profit.is_zero() {
        output::warning("Profit is zero, so there is no ratio.");
    }
    Ok(())
}

fn build_inputs(revenue: &str, expenses: &str, tax_rate: &str) -> CoreResult<ProfitInputs> {
    ProfitInputs::new(
        parse_value(revenue)?,
        parse_value(expenses)?,
        parse_value(tax_rate)?,
    )
}

fn parse_value(text: &str) -> CoreResult<Decimal> {
    text.trim()
        .parse::<Decimal>()
        .map_err(|_| Error::validation("Value must be a positive number."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value(" 20 ").unwrap(), Decimal::from(20));
        assert!(matches!(parse_value("abc"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_build_inputs_rejects_zero() {
        let err = build_inputs("0", "1", "1").unwrap_err();
        assert_eq!(err.to_string(), "Value must be a positive number.");
    }

    #[test]
    fn test_overflowing_inputs_are_refused_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            dir.path(),
            Some("70000000000000000000000000000".to_string()),
            Some("1".to_string()),
            Some("300".to_string()),
            true,
        );

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Values are too large to calculate a profit.");
        assert!(!dir.path().join("results.txt").exists());
    }
}
