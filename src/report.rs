use crate::rate_provider::{CurrencyQuote, DATE_FORMAT, RateProvider};
use crate::ui;
use anyhow::Result;
use chrono::{Duration, NaiveDate};
use comfy_table::Cell;
use indicatif::ProgressBar;
use tracing::{debug, warn};

/// The quotes matched for one archive date, ready for display.
#[derive(Debug)]
pub struct DayReport {
    pub date: NaiveDate,
    pub quotes: Vec<CurrencyQuote>,
}

impl DayReport {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Currency"),
            ui::header_cell("Purchase"),
            ui::header_cell("Sale"),
        ]);

        for quote in &self.quotes {
            table.add_row(vec![
                Cell::new(&quote.currency),
                ui::rate_cell(quote.purchase),
                ui::rate_cell(quote.sale),
            ]);
        }

        // Date as a title above the table
        format!(
            "{}\n\n{}",
            ui::style_text(
                &self.date.format(DATE_FORMAT).to_string(),
                ui::StyleType::Title
            ),
            table
        )
    }
}

/// Fetches rates for every date from `days` back up to `today` inclusive,
/// one request at a time. Dates whose fetch fails, or where none of the
/// requested currencies carry both a purchase and a sale value, are
/// skipped.
pub async fn generate_reports(
    provider: &(dyn RateProvider + Send + Sync),
    today: NaiveDate,
    days: u32,
    currencies: &[String],
    pb: ProgressBar,
) -> Vec<DayReport> {
    let mut reports = Vec::new();

    let mut date = today - Duration::days(i64::from(days));
    while date <= today {
        match provider.fetch_day_rates(date).await {
            Ok(day_rates) => {
                let quotes: Vec<CurrencyQuote> = currencies
                    .iter()
                    .filter_map(|code| {
                        day_rates.quotes.iter().find(|q| &q.currency == code).cloned()
                    })
                    .collect();

                if quotes.is_empty() {
                    debug!(
                        "No matching currencies for {}",
                        date.format(DATE_FORMAT)
                    );
                } else {
                    reports.push(DayReport { date, quotes });
                }
            }
            Err(e) => {
                warn!("Failed to fetch rates for {}: {}", date.format(DATE_FORMAT), e);
            }
        }
        pb.inc(1);
        date += Duration::days(1);
    }

    reports
}

pub async fn generate_and_display_reports(
    provider: &(dyn RateProvider + Send + Sync),
    today: NaiveDate,
    days: u32,
    currencies: &[String],
) -> Result<()> {
    let pb = ui::new_progress_bar(u64::from(days) + 1, true);
    pb.set_message("Fetching exchange rates...");

    let reports = generate_reports(provider, today, days, currencies, pb.clone()).await;
    pb.finish_and_clear();

    if reports.is_empty() {
        println!(
            "{}",
            ui::style_text("No exchange rate data available.", ui::StyleType::Subtle)
        );
        return Ok(());
    }

    let num_reports = reports.len();
    for (i, report) in reports.iter().enumerate() {
        println!("{}", report.display_as_table());
        if i < num_reports - 1 {
            ui::print_separator();
        }
    }

    Ok(())
}
