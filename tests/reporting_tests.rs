//! Date-range listings, the normalized console report and CSV export.

mod common;

use common::{bank, client, ledger, reporter};
use hammer_faktura::dates::parse_date;
use hammer_faktura::db::Table;
use hammer_faktura::models::{round2, InvoiceOptions, NewItem};
use hammer_faktura::InvoiceLedger;

async fn invoice_with_item(ledger: &InvoiceLedger, client: i64, bank: i64, date: &str, job_id: &str, net: f64) -> i64 {
    let created = parse_date(date).unwrap();
    let pk = ledger
        .add_item(&NewItem {
            work_date: created,
            job_id: job_id.to_string(),
            description: "Translation".to_string(),
            net,
            vat: None,
            client,
        })
        .await
        .unwrap();
    let invoice = ledger
        .add_invoice(client, bank, InvoiceOptions { created: Some(created), ..Default::default() })
        .await
        .unwrap();
    ledger.assign_item_by_pk(invoice, pk).await.unwrap();
    invoice
}

#[tokio::test]
async fn single_invoice_totals() {
    let ledger = ledger().await;
    let acme = client(&ledger, "911111111", 0.25, "NOK").await;
    let bank = bank(&ledger).await;

    let pk = ledger
        .add_item(&NewItem {
            work_date: parse_date("01.06.2024").unwrap(),
            job_id: "J1".to_string(),
            description: "Translation".to_string(),
            net: 1000.0,
            vat: None,
            client: acme,
        })
        .await
        .unwrap();
    let invoice = ledger
        .add_invoice(
            acme,
            bank,
            InvoiceOptions { created: Some(parse_date("01.06.2024").unwrap() + 3600), ..Default::default() },
        )
        .await
        .unwrap();
    assert_eq!(ledger.assign_items_by_date(invoice, "01.06.2024", "01.06.2024").await.unwrap(), 1);
    assert_eq!(ledger.item(pk).await.unwrap().unwrap().invoice, Some(invoice));

    let rows = reporter(&ledger).list_invoices("01.06.2024", "01.06.2024").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].invoice_id, invoice);
    assert_eq!(rows[0].currency, "NOK");
    assert_eq!(rows[0].net_total, 1000.0);
    assert_eq!(rows[0].gross_total, 1250.0);
}

#[tokio::test]
async fn gross_is_rounded_net_times_vat_for_every_rate() {
    let ledger = ledger().await;
    let bank = bank(&ledger).await;

    for (idx, vat) in [0.0, 0.12, 0.15, 0.25, 0.333, 1.0].into_iter().enumerate() {
        let org_nr = format!("9{:08}", idx);
        let client = client(&ledger, &org_nr, vat, "NOK").await;
        invoice_with_item(&ledger, client, bank, "10.06.2024", &format!("J{}", idx), 1234.567).await;
    }

    let rows = reporter(&ledger).list_invoices("01.06.2024", "30.06.2024").await.unwrap();
    assert_eq!(rows.len(), 6);
    for row in rows {
        assert_eq!(row.net_total, 1234.57);
        assert_eq!(row.gross_total, round2(row.net_total * (1.0 + row.vat)));
    }
}

#[tokio::test]
async fn listing_is_limited_to_range_and_ordered_by_creation() {
    let ledger = ledger().await;
    let acme = client(&ledger, "911111111", 0.25, "NOK").await;
    let bank = bank(&ledger).await;

    let late = invoice_with_item(&ledger, acme, bank, "20.06.2024", "J2", 200.0).await;
    let early = invoice_with_item(&ledger, acme, bank, "02.06.2024", "J1", 100.0).await;
    invoice_with_item(&ledger, acme, bank, "01.07.2024", "J3", 300.0).await;
    // empty invoices do not show up
    ledger
        .add_invoice(acme, bank, InvoiceOptions { created: Some(parse_date("05.06.2024").unwrap()), ..Default::default() })
        .await
        .unwrap();

    let rows = reporter(&ledger).list_invoices("01.06.2024", "30.06.2024").await.unwrap();
    let ids: Vec<i64> = rows.iter().map(|r| r.invoice_id).collect();
    assert_eq!(ids, [early, late]);
}

#[tokio::test]
async fn report_normalizes_foreign_currency_but_csv_does_not() {
    let ledger = ledger().await;
    let euro = client(&ledger, "911111111", 0.0, "EUR").await;
    let krone = client(&ledger, "922222222", 0.25, "NOK").await;
    let bank = bank(&ledger).await;
    invoice_with_item(&ledger, euro, bank, "01.06.2024", "J1", 100.0).await;
    invoice_with_item(&ledger, krone, bank, "02.06.2024", "J2", 200.0).await;
    let reporter = reporter(&ledger);

    let report = reporter.invoice_report("01.06.2024", "30.06.2024").await.unwrap();
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].currency, "EUR (* 10)");
    assert_eq!(report.rows[0].net, 1000.0);
    assert_eq!(report.rows[0].gross, 1000.0);
    assert_eq!(report.rows[0].date, "01.06.2024");
    assert_eq!(report.rows[1].currency, "NOK");
    assert_eq!(report.rows[1].net, 200.0);
    assert_eq!(report.total_net, 1200.0);
    assert_eq!(report.total_gross, 1250.0);

    let printed = reporter.print_invoice_report("01.06.2024", "30.06.2024").await.unwrap();
    assert!(printed.starts_with("Date"));
    assert!(printed.contains("EUR (* 10)"));
    assert!(printed.lines().last().unwrap().starts_with("TOTAL"));
    assert!(printed.lines().last().unwrap().ends_with("1250.00"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invoices.csv");
    let written = reporter.export_invoices_to_csv("01.06.2024", "30.06.2024", &path).await.unwrap();
    assert_eq!(written, 2);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, ["Date", "Invoice", "Client", "Currency", "VAT", "NETTO", "BRUTTO"]);

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(&records[0][0], "01.06.2024");
    assert_eq!(&records[0][3], "EUR");
    assert_eq!(records[0][5].parse::<f64>().unwrap(), 100.0);
    assert_eq!(records[1][6].parse::<f64>().unwrap(), 250.0);
}

#[tokio::test]
async fn raw_table_listing_shows_nulls_as_blank() {
    let ledger = ledger().await;
    let acme = client(&ledger, "911111111", 0.25, "NOK").await;
    ledger
        .add_item(&NewItem {
            work_date: parse_date("01.06.2024").unwrap(),
            job_id: "J1".to_string(),
            description: "Translation".to_string(),
            net: 99.5,
            vat: None,
            client: acme,
        })
        .await
        .unwrap();

    let reporter = reporter(&ledger);
    let clients = reporter.dump_table(Table::Clients).await.unwrap();
    assert!(clients.lines().next().unwrap().starts_with("pk"));
    assert!(clients.contains("911111111"));

    let items = reporter.dump_table(Table::InvoiceItems).await.unwrap();
    let row = items.lines().nth(1).unwrap();
    assert!(row.contains("99.5"));
    assert!(row.contains("Translation"));
}
