use crate::db::queries;
use crate::error::{FakturaError, Result};
use crate::models::Generator;
use sqlx::SqliteConnection;

/// Rebuild the full invoice view from normalized storage.
///
/// Reads invoice, client, bank, then the item lines. Either every part is
/// found or an error is returned; an invoice without items is still valid.
pub async fn assemble(conn: &mut SqliteConnection, invoice_id: i64) -> Result<Generator> {
    let invoice = queries::get_invoice(conn, invoice_id)
        .await?
        .ok_or(FakturaError::InvoiceNotFound(invoice_id))?;

    // client and bank are mandatory foreign keys
    let client = queries::get_invoice_client(conn, invoice_id)
        .await?
        .ok_or(FakturaError::InvoiceNotFound(invoice_id))?;
    let bank = queries::get_invoice_bank(conn, invoice_id)
        .await?
        .ok_or(FakturaError::InvoiceNotFound(invoice_id))?;

    let items = queries::list_invoice_lines(conn, invoice_id).await?;
    tracing::debug!("assembled invoice {} with {} items", invoice_id, items.len());

    Ok(Generator {
        invoice,
        client,
        bank,
        items,
    })
}
