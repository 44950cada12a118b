use crate::config::InvoiceDefaults;
use crate::dates;
use crate::db::queries;
use crate::error::{FakturaError, Result};
use crate::models::{
    Generator, Invoice, InvoiceItem, InvoiceOptions, ItemDraft, NewBank, NewClient, NewItem,
};
use crate::service::assembler;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

/// Invoice lifecycle: clients, banks, items, invoices and item assignment.
///
/// Every public operation runs in its own transaction; dropping it on an
/// error path rolls back. No transaction is held across two calls.
pub struct InvoiceLedger {
    pool: SqlitePool,
    defaults: InvoiceDefaults,
}

impl InvoiceLedger {
    pub fn new(pool: SqlitePool, defaults: InvoiceDefaults) -> Self {
        Self { pool, defaults }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Store a client and return its pk
    pub async fn add_client(&self, client: &NewClient) -> Result<i64> {
        let mut tx = self.pool.begin().await?;
        let pk = queries::insert_client(&mut tx, client).await?;
        tx.commit().await?;

        tracing::info!("client {} ({}) stored as {}", client.name, client.org_nr, pk);
        Ok(pk)
    }

    /// Store a bank and return its pk
    pub async fn add_bank(&self, bank: &NewBank) -> Result<i64> {
        let mut tx = self.pool.begin().await?;
        let pk = queries::insert_bank(&mut tx, bank).await?;
        tx.commit().await?;

        tracing::info!("bank account {} stored as {}", bank.account, pk);
        Ok(pk)
    }

    /// Store an unassigned item and return its pk.
    ///
    /// A second item with the same (work date, job id) fails with
    /// [`FakturaError::DuplicateItem`].
    pub async fn add_item(&self, item: &NewItem) -> Result<i64> {
        let mut tx = self.pool.begin().await?;
        let pk = insert_item(&mut tx, item).await?;
        tx.commit().await?;

        tracing::debug!("item {} stored as {}", item.job_id, pk);
        Ok(pk)
    }

    /// Create an empty invoice and return its id.
    ///
    /// Creation time defaults to the moment of the call.
    pub async fn add_invoice(&self, client: i64, bank: i64, options: InvoiceOptions) -> Result<i64> {
        let created = options.created.unwrap_or_else(dates::now);
        let due_in_days = options.due_in_days.unwrap_or(self.defaults.due_in_days);
        let language = options.language.unwrap_or_else(|| self.defaults.language.clone());

        let invoice = Invoice {
            id: new_invoice_id(),
            created,
            due: created + dates::SECONDS_PER_DAY * i64::from(due_in_days),
            language,
            client,
            bank,
        };

        let mut tx = self.pool.begin().await?;
        queries::insert_invoice(&mut tx, &invoice).await?;
        tx.commit().await?;

        tracing::info!("invoice {} created for client {}", invoice.id, client);
        Ok(invoice.id)
    }

    /// Assign the invoice client's items worked between two `dd.mm.yyyy`
    /// dates, both inclusive (the end date up to 23:59:59).
    pub async fn assign_items_by_date(&self, invoice_id: i64, from: &str, to: &str) -> Result<u64> {
        let from_ts = dates::parse_date(from)?;
        let to_ts = dates::parse_date_end_of_day(to)?;
        self.assign_items_between(invoice_id, from_ts, to_ts).await
    }

    /// Assign the invoice client's items with a work date in [from, to].
    ///
    /// Re-running with the same range is a no-op.
    pub async fn assign_items_between(&self, invoice_id: i64, from: i64, to: i64) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let client = queries::get_invoice(&mut tx, invoice_id)
            .await?
            .ok_or(FakturaError::InvoiceNotFound(invoice_id))?
            .client;
        let assigned = queries::assign_items_between(&mut tx, invoice_id, client, from, to).await?;
        tx.commit().await?;

        tracing::info!("{} items assigned to invoice {}", assigned, invoice_id);
        Ok(assigned)
    }

    /// Assign one item by pk. The item's client is not checked.
    pub async fn assign_item_by_pk(&self, invoice_id: i64, pk: i64) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let assigned = queries::assign_item_by_pk(&mut tx, invoice_id, pk).await?;
        tx.commit().await?;

        if assigned == 0 {
            tracing::warn!("no item with pk {} to assign to invoice {}", pk, invoice_id);
        }
        Ok(assigned)
    }

    pub async fn item(&self, pk: i64) -> Result<Option<InvoiceItem>> {
        let mut conn = self.pool.acquire().await?;
        Ok(queries::get_item(&mut conn, pk).await?)
    }

    /// Assemble the full view of one invoice
    pub async fn make_generator(&self, invoice_id: i64) -> Result<Generator> {
        let mut tx = self.pool.begin().await?;
        let generator = assembler::assemble(&mut tx, invoice_id).await?;
        tx.commit().await?;
        Ok(generator)
    }

    /// Invoice a batch of items in one go.
    ///
    /// Every draft is checked for its mandatory keys before anything is
    /// written. Each item is then inserted and assigned by pk; duplicates are
    /// logged and skipped, any other error aborts.
    pub async fn quick_generator_from_list(&self, items: &[ItemDraft], client: i64, bank: i64) -> Result<Generator> {
        let items = validate_all(items, client)?;

        let invoice_id = self.add_invoice(client, bank, InvoiceOptions::default()).await?;
        for item in &items {
            match self.insert_and_assign(item, invoice_id).await {
                Ok(_) => {}
                Err(e) if e.is_duplicate() => {
                    tracing::warn!("invoice item {} already exists. Skipped.", item.job_id);
                }
                Err(e) => return Err(e),
            }
        }

        self.make_generator(invoice_id).await
    }

    /// Batch variant that assigns by the batch's date span instead of by pk.
    ///
    /// Every unassigned or assigned item of the client between the earliest
    /// and latest work date in the batch ends up on the new invoice,
    /// including items stored earlier.
    pub async fn quick_generator_by_date_range(
        &self,
        items: &[ItemDraft],
        client: i64,
        bank: i64,
    ) -> Result<Generator> {
        let items = validate_all(items, client)?;

        for item in &items {
            match self.add_item(item).await {
                Ok(_) => {}
                Err(e) if e.is_duplicate() => {
                    tracing::warn!("invoice item {} already exists. Skipped.", item.job_id);
                }
                Err(e) => return Err(e),
            }
        }

        let invoice_id = self.add_invoice(client, bank, InvoiceOptions::default()).await?;
        let span = items.iter().map(|item| item.work_date);
        if let (Some(from), Some(to)) = (span.clone().min(), span.max()) {
            self.assign_items_between(invoice_id, from, to).await?;
        }

        self.make_generator(invoice_id).await
    }

    /// Invoice a single item worked on a `dd.mm.yyyy` date
    pub async fn quick_generator_from_item(
        &self,
        date: &str,
        job_id: &str,
        description: &str,
        net: f64,
        client: i64,
        bank: i64,
    ) -> Result<Generator> {
        let item = NewItem {
            work_date: dates::parse_date(date)?,
            job_id: job_id.to_string(),
            description: description.to_string(),
            net,
            vat: None,
            client,
        };

        let pk = self.add_item(&item).await?;
        let invoice_id = self.add_invoice(client, bank, InvoiceOptions::default()).await?;
        self.assign_item_by_pk(invoice_id, pk).await?;

        self.make_generator(invoice_id).await
    }

    async fn insert_and_assign(&self, item: &NewItem, invoice_id: i64) -> Result<i64> {
        let mut tx = self.pool.begin().await?;
        let pk = insert_item(&mut tx, item).await?;
        queries::assign_item_by_pk(&mut tx, invoice_id, pk).await?;
        tx.commit().await?;
        Ok(pk)
    }
}

/// Opaque random invoice token: the first 32-bit field of a v4 UUID
fn new_invoice_id() -> i64 {
    i64::from(Uuid::new_v4().as_fields().0)
}

fn validate_all(items: &[ItemDraft], client: i64) -> Result<Vec<NewItem>> {
    items.iter().map(|draft| draft.validate(client)).collect()
}

async fn insert_item(conn: &mut SqliteConnection, item: &NewItem) -> Result<i64> {
    queries::insert_item(conn, item).await.map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => FakturaError::DuplicateItem {
            work_date: item.work_date,
            job_id: item.job_id.clone(),
        },
        other => FakturaError::Storage(other),
    })
}
