use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::rate_provider::{CurrencyQuote, DATE_FORMAT, DayRates, RateProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.privatbank.ua";

// PrivatBankProvider implementation for RateProvider
pub struct PrivatBankProvider {
    base_url: String,
}

impl PrivatBankProvider {
    pub fn new(base_url: &str) -> Self {
        PrivatBankProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct ArchiveResponse {
    #[serde(alias = "exchangeRate")]
    exchange_rate: Vec<ArchiveRateEntry>,
}

#[derive(Deserialize, Debug)]
struct ArchiveRateEntry {
    currency: Option<String>,
    // Cash rates are missing for minor currencies; only NB reference
    // rates are published for those.
    #[serde(alias = "purchaseRate")]
    purchase_rate: Option<f64>,
    #[serde(alias = "saleRate")]
    sale_rate: Option<f64>,
}

#[async_trait]
impl RateProvider for PrivatBankProvider {
    #[instrument(
        name = "ArchiveRateFetch",
        skip(self),
        fields(date = %date)
    )]
    async fn fetch_day_rates(&self, date: NaiveDate) -> Result<DayRates> {
        let formatted_date = date.format(DATE_FORMAT).to_string();
        let url = format!(
            "{}/p24api/exchange_rates?date={}",
            self.base_url, formatted_date
        );
        debug!("Requesting archive rates from {}", url);

        let client = reqwest::Client::builder().user_agent("uafx/1.0").build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for date: {} URL: {}", e, formatted_date, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for date: {}",
                response.status(),
                formatted_date
            ));
        }

        let text = response.text().await?;

        let data: ArchiveResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", formatted_date, e))?;

        let quotes = data
            .exchange_rate
            .into_iter()
            .filter_map(|entry| {
                let currency = entry.currency?;
                let purchase = entry.purchase_rate?;
                let sale = entry.sale_rate?;
                Some(CurrencyQuote {
                    currency,
                    purchase,
                    sale,
                })
            })
            .collect();

        Ok(DayRates { date, quotes })
    }
}
