use crate::models::{Bank, Client, Invoice, InvoiceItem, InvoiceSumRow, ItemLine, NewBank, NewClient, NewItem};
use sqlx::SqliteConnection;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, TypeInfo, ValueRef};

/// Insert a client, returning its generated pk
pub async fn insert_client(conn: &mut SqliteConnection, client: &NewClient) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO clients (navn, org_nr, adresse, vat, valuta)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&client.name)
    .bind(&client.org_nr)
    .bind(&client.address)
    .bind(client.vat)
    .bind(&client.currency)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Insert a bank, returning its generated pk
pub async fn insert_bank(conn: &mut SqliteConnection, bank: &NewBank) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO banks (konto, iban, bic, bank)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&bank.account)
    .bind(&bank.iban)
    .bind(&bank.bic)
    .bind(&bank.bank_name)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Insert an unassigned item, returning its generated pk
pub async fn insert_item(conn: &mut SqliteConnection, item: &NewItem) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO invoice_items (dato, id, beskrivelse, netto, vat, client)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(item.work_date)
    .bind(&item.job_id)
    .bind(&item.description)
    .bind(item.net)
    .bind(item.vat)
    .bind(item.client)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Insert an invoice header; the id is chosen by the caller
pub async fn insert_invoice(conn: &mut SqliteConnection, invoice: &Invoice) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO invoices (id, dato, forfall, language, client, bank)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(invoice.id)
    .bind(invoice.created)
    .bind(invoice.due)
    .bind(&invoice.language)
    .bind(invoice.client)
    .bind(invoice.bank)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Look up an invoice header
pub async fn get_invoice(conn: &mut SqliteConnection, invoice_id: i64) -> Result<Option<Invoice>, sqlx::Error> {
    sqlx::query_as::<_, Invoice>(
        r#"
        SELECT id, dato AS created, forfall AS due, language, client, bank
        FROM invoices
        WHERE id = ?1
        "#,
    )
    .bind(invoice_id)
    .fetch_optional(&mut *conn)
    .await
}

/// Client owning an invoice
pub async fn get_invoice_client(conn: &mut SqliteConnection, invoice_id: i64) -> Result<Option<Client>, sqlx::Error> {
    sqlx::query_as::<_, Client>(
        r#"
        SELECT c.pk, c.navn AS name, c.org_nr, c.adresse AS address, c.vat, c.valuta AS currency
        FROM clients c
        INNER JOIN invoices i ON i.client = c.pk
        WHERE i.id = ?1
        "#,
    )
    .bind(invoice_id)
    .fetch_optional(&mut *conn)
    .await
}

/// Bank an invoice is paid to
pub async fn get_invoice_bank(conn: &mut SqliteConnection, invoice_id: i64) -> Result<Option<Bank>, sqlx::Error> {
    sqlx::query_as::<_, Bank>(
        r#"
        SELECT b.pk, b.konto AS account, b.iban, b.bic, b.bank AS bank_name
        FROM banks b
        INNER JOIN invoices i ON i.bank = b.pk
        WHERE i.id = ?1
        "#,
    )
    .bind(invoice_id)
    .fetch_optional(&mut *conn)
    .await
}

/// Lines of an invoice ordered by work date
pub async fn list_invoice_lines(conn: &mut SqliteConnection, invoice_id: i64) -> Result<Vec<ItemLine>, sqlx::Error> {
    sqlx::query_as::<_, ItemLine>(
        r#"
        SELECT dato AS work_date, id AS job_id, beskrivelse AS description, netto AS net, vat
        FROM invoice_items
        WHERE invoice = ?1
        ORDER BY dato, pk
        "#,
    )
    .bind(invoice_id)
    .fetch_all(&mut *conn)
    .await
}

/// Look up a single item by pk
pub async fn get_item(conn: &mut SqliteConnection, pk: i64) -> Result<Option<InvoiceItem>, sqlx::Error> {
    sqlx::query_as::<_, InvoiceItem>(
        r#"
        SELECT pk, dato AS work_date, id AS job_id, beskrivelse AS description,
               netto AS net, vat, client, invoice
        FROM invoice_items
        WHERE pk = ?1
        "#,
    )
    .bind(pk)
    .fetch_optional(&mut *conn)
    .await
}

/// Point every item of `client` with a work date in [from, to] at the invoice
pub async fn assign_items_between(
    conn: &mut SqliteConnection,
    invoice_id: i64,
    client: i64,
    from: i64,
    to: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE invoice_items
        SET invoice = ?1
        WHERE dato BETWEEN ?2 AND ?3
          AND client = ?4
        "#,
    )
    .bind(invoice_id)
    .bind(from)
    .bind(to)
    .bind(client)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected())
}

/// Point one item at the invoice, whatever its client
pub async fn assign_item_by_pk(conn: &mut SqliteConnection, invoice_id: i64, pk: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE invoice_items
        SET invoice = ?1
        WHERE pk = ?2
        "#,
    )
    .bind(invoice_id)
    .bind(pk)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected())
}

/// Net sum per invoice created in [from, to], oldest first.
/// Invoices without items do not appear.
pub async fn sum_invoices_between(
    conn: &mut SqliteConnection,
    from: i64,
    to: i64,
) -> Result<Vec<InvoiceSumRow>, sqlx::Error> {
    sqlx::query_as::<_, InvoiceSumRow>(
        r#"
        SELECT i.dato AS created,
               i.id AS invoice_id,
               c.navn AS client_name,
               c.valuta AS currency,
               c.vat AS vat,
               SUM(ii.netto) AS net_sum
        FROM invoices i
        INNER JOIN invoice_items ii ON ii.invoice = i.id
        INNER JOIN clients c ON c.pk = i.client
        WHERE i.dato BETWEEN ?1 AND ?2
        GROUP BY i.id, i.dato, c.navn, c.valuta, c.vat
        ORDER BY i.dato, i.id
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_all(&mut *conn)
    .await
}

/// Raw tables that can be listed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Clients,
    Banks,
    Invoices,
    InvoiceItems,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Clients => "clients",
            Table::Banks => "banks",
            Table::Invoices => "invoices",
            Table::InvoiceItems => "invoice_items",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Table::Clients => &["pk", "navn", "org_nr", "adresse", "vat", "valuta"],
            Table::Banks => &["pk", "konto", "iban", "bic", "bank"],
            Table::Invoices => &["id", "dato", "forfall", "language", "client", "bank"],
            Table::InvoiceItems => &["pk", "dato", "id", "beskrivelse", "netto", "vat", "client", "invoice"],
        }
    }
}

impl std::str::FromStr for Table {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clients" => Ok(Table::Clients),
            "banks" => Ok(Table::Banks),
            "invoices" => Ok(Table::Invoices),
            "invoice_items" | "items" => Ok(Table::InvoiceItems),
            other => Err(format!("unknown table `{}`", other)),
        }
    }
}

/// Every row of a table with each cell rendered as text (NULL as empty)
pub async fn dump_table(conn: &mut SqliteConnection, table: Table) -> Result<Vec<Vec<String>>, sqlx::Error> {
    let sql = format!("SELECT {} FROM {}", table.columns().join(", "), table.name());
    let rows = sqlx::query(&sql).fetch_all(&mut *conn).await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut cells = Vec::with_capacity(table.columns().len());
        for idx in 0..table.columns().len() {
            cells.push(cell_to_string(row, idx)?);
        }
        out.push(cells);
    }
    Ok(out)
}

fn cell_to_string(row: &SqliteRow, idx: usize) -> Result<String, sqlx::Error> {
    let raw = row.try_get_raw(idx)?;
    if raw.is_null() {
        return Ok(String::new());
    }
    let type_name = raw.type_info().name().to_string();
    match type_name.as_str() {
        "INTEGER" => Ok(row.try_get::<i64, _>(idx)?.to_string()),
        "REAL" => Ok(row.try_get::<f64, _>(idx)?.to_string()),
        _ => row.try_get::<String, _>(idx),
    }
}
