//! Provides daily exchange rate lookups for the application.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Archive dates are exchanged and displayed as DD.MM.YYYY.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// A bank's buy/sell prices for one currency on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyQuote {
    pub currency: String,
    pub purchase: f64,
    pub sale: f64,
}

/// All quotes published by the bank for a single archive date.
#[derive(Debug, Clone)]
pub struct DayRates {
    pub date: NaiveDate,
    pub quotes: Vec<CurrencyQuote>,
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_day_rates(&self, date: NaiveDate) -> Result<DayRates>;
}
