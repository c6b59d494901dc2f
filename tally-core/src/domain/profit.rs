//! Profit calculator domain model

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::result::{Error, Result};

/// Inputs to the profit calculation, all strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfitInputs {
    pub revenue: Decimal,
    pub expenses: Decimal,
    /// Percentage, e.g. `20` for 20%
    pub tax_rate: Decimal,
}

impl ProfitInputs {
    pub fn new(revenue: Decimal, expenses: Decimal, tax_rate: Decimal) -> Result<Self> {
        Ok(Self {
            revenue: positive_value(revenue)?,
            expenses: positive_value(expenses)?,
            tax_rate: positive_value(tax_rate)?,
        })
    }
}

/// Reject zero and negative inputs
pub fn positive_value(value: Decimal) -> Result<Decimal> {
    if value <= Decimal::ZERO {
        return Err(Error::validation("Value must be a positive number."));
    }
    Ok(value)
}

/// Earnings before tax, profit after tax and their ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Financials {
    pub ebt: Decimal,
    pub profit: Decimal,
    /// `ebt / profit`; absent when profit is zero
    pub ratio: Option<Decimal>,
}

impl Financials {
    /// Fails when an intermediate value does not fit in a `Decimal`
    pub fn calculate(inputs: &ProfitInputs) -> Result<Self> {
        let ebt = inputs
            .revenue
            .checked_sub(inputs.expenses)
            .ok_or_else(too_large)?;
        let kept_share = inputs
            .tax_rate
            .checked_div(Decimal::ONE_HUNDRED)
            .and_then(|rate| Decimal::ONE.checked_sub(rate))
            .ok_or_else(too_large)?;
        let profit = ebt.checked_mul(kept_share).ok_or_else(too_large)?;
        let ratio = if profit.is_zero() {
            None
        } else {
            Some(ebt.checked_div(profit).ok_or_else(too_large)?)
        };

        Ok(Self { ebt, profit, ratio })
    }

    /// Report as written to `results.txt`
    pub fn report(&self) -> String {
        let ratio = self
            .ratio
            .map(|r| format!("{:.3}", round(r, 3)))
            .unwrap_or_else(|| "n/a".to_string());
        format!(
            "EBT: {:.1}\nProfit: {:.1}\nRatio: {}\n",
            round(self.ebt, 1),
            round(self.profit, 1),
            ratio
        )
    }
}

fn too_large() -> Error {
    Error::validation("Values are too large to calculate a profit.")
}

fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
