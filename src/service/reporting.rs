use crate::dates;
use crate::db::queries::{self, Table};
use crate::error::Result;
use crate::models::{round2, InvoiceReport, InvoiceSummary, ReportRow};
use crate::service::rates::{normalized_label, ExchangeRates};
use crate::table;
use sqlx::SqlitePool;
use std::path::Path;

pub const REPORT_HEADER: [&str; 7] = ["Date", "Invoice", "Client", "Currency", "VAT", "NETTO", "BRUTTO"];

/// Date-range summaries of invoices, as a table or as CSV
pub struct Reporter {
    pool: SqlitePool,
    rates: Box<dyn ExchangeRates>,
}

impl Reporter {
    pub fn new(pool: SqlitePool, rates: Box<dyn ExchangeRates>) -> Self {
        Self { pool, rates }
    }

    /// Invoices created between two `dd.mm.yyyy` dates (the end date up to
    /// 23:59:59), oldest first, with net and gross totals in the client currency.
    pub async fn list_invoices(&self, from: &str, to: &str) -> Result<Vec<InvoiceSummary>> {
        let from_ts = dates::parse_date(from)?;
        let to_ts = dates::parse_date_end_of_day(to)?;

        let mut conn = self.pool.acquire().await?;
        let rows = queries::sum_invoices_between(&mut conn, from_ts, to_ts).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let net_total = round2(row.net_sum);
                InvoiceSummary {
                    created: row.created,
                    invoice_id: row.invoice_id,
                    client_name: row.client_name,
                    currency: row.currency,
                    vat: row.vat,
                    net_total,
                    gross_total: round2(net_total * (1.0 + row.vat)),
                }
            })
            .collect())
    }

    /// Listing with amounts converted for display and a grand total.
    ///
    /// The total sums the displayed (converted) amounts.
    pub async fn invoice_report(&self, from: &str, to: &str) -> Result<InvoiceReport> {
        let summaries = self.list_invoices(from, to).await?;

        let mut rows = Vec::with_capacity(summaries.len());
        let mut total_net = 0.0;
        let mut total_gross = 0.0;

        for summary in summaries {
            let (currency, net, gross) = match self.rates.multiplier(&summary.currency) {
                Some(rate) => (
                    normalized_label(&summary.currency, rate),
                    round2(summary.net_total * rate),
                    round2(summary.gross_total * rate),
                ),
                None => (summary.currency.clone(), summary.net_total, summary.gross_total),
            };

            total_net += net;
            total_gross += gross;
            rows.push(ReportRow {
                date: dates::format_date(summary.created)?,
                invoice_id: summary.invoice_id,
                client_name: summary.client_name,
                currency,
                vat: summary.vat,
                net,
                gross,
            });
        }

        Ok(InvoiceReport {
            rows,
            total_net: round2(total_net),
            total_gross: round2(total_gross),
        })
    }

    /// The normalized report rendered as a console table
    pub async fn print_invoice_report(&self, from: &str, to: &str) -> Result<String> {
        let report = self.invoice_report(from, to).await?;

        let mut lines: Vec<Vec<String>> = Vec::with_capacity(report.rows.len() + 3);
        lines.push(REPORT_HEADER.iter().map(|h| h.to_string()).collect());
        for row in &report.rows {
            lines.push(vec![
                row.date.clone(),
                row.invoice_id.to_string(),
                row.client_name.clone(),
                row.currency.clone(),
                row.vat.to_string(),
                format!("{:.2}", row.net),
                format!("{:.2}", row.gross),
            ]);
        }
        lines.push(vec![String::new(); REPORT_HEADER.len()]);
        lines.push(vec![
            "TOTAL".to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            format!("{:.2}", report.total_net),
            format!("{:.2}", report.total_gross),
        ]);

        Ok(table::render(&lines))
    }

    /// Write the listing to a CSV file, amounts in the client currency
    pub async fn export_invoices_to_csv(&self, from: &str, to: &str, output_path: &Path) -> Result<usize> {
        let summaries = self.list_invoices(from, to).await?;

        let mut writer = csv::Writer::from_path(output_path)?;
        writer.write_record(REPORT_HEADER)?;
        for summary in &summaries {
            writer.write_record(&[
                dates::format_date(summary.created)?,
                summary.invoice_id.to_string(),
                summary.client_name.clone(),
                summary.currency.clone(),
                summary.vat.to_string(),
                format!("{:.2}", summary.net_total),
                format!("{:.2}", summary.gross_total),
            ])?;
        }
        writer.flush()?;

        tracing::info!("{} invoices exported to {}", summaries.len(), output_path.display());
        Ok(summaries.len())
    }

    /// Raw contents of one table rendered as a console table
    pub async fn dump_table(&self, which: Table) -> Result<String> {
        let mut conn = self.pool.acquire().await?;
        let rows = queries::dump_table(&mut conn, which).await?;

        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(which.columns().iter().map(|c| c.to_string()).collect());
        lines.extend(rows);
        Ok(table::render(&lines))
    }
}
