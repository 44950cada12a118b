use sqlx::SqlitePool;

const TABLES: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS clients (
        pk      INTEGER PRIMARY KEY AUTOINCREMENT,
        navn    TEXT NOT NULL,
        org_nr  TEXT NOT NULL,
        adresse TEXT NOT NULL,
        vat     REAL NOT NULL,
        valuta  TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS banks (
        pk    INTEGER PRIMARY KEY AUTOINCREMENT,
        konto TEXT NOT NULL,
        iban  TEXT NOT NULL,
        bic   TEXT NOT NULL,
        bank  TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS invoices (
        id       INTEGER PRIMARY KEY,
        dato     INTEGER NOT NULL,
        forfall  INTEGER NOT NULL,
        language TEXT NOT NULL,
        client   INTEGER NOT NULL REFERENCES clients (pk),
        bank     INTEGER NOT NULL REFERENCES banks (pk)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS invoice_items (
        pk          INTEGER PRIMARY KEY AUTOINCREMENT,
        dato        INTEGER NOT NULL,
        id          TEXT NOT NULL,
        beskrivelse TEXT NOT NULL,
        netto       REAL NOT NULL,
        vat         REAL,
        client      INTEGER NOT NULL REFERENCES clients (pk),
        invoice     INTEGER REFERENCES invoices (id),
        UNIQUE (dato, id)
    )
    "#,
];

/// Create the four tables when they do not exist yet
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in TABLES {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::debug!("schema ready");
    Ok(())
}
