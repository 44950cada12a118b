use clap::{Parser, Subcommand};
use hammer_faktura::db::Table;
use hammer_faktura::models::{InvoiceOptions, ItemDraft, NewBank, NewClient, NewItem};
use hammer_faktura::{
    create_pool, dates, ensure_schema, ingest, AppConfig, FixedRates, InvoiceLedger, Reporter,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

/// Invoicing record-keeper
#[derive(Parser, Debug)]
#[command(author, version, name = "hammer-faktura")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the database tables
    Init,
    AddClient {
        #[arg(long)]
        name: String,
        #[arg(long)]
        org_nr: String,
        #[arg(long)]
        address: String,
        /// Fraction, 0.25 = 25%
        #[arg(long)]
        vat: f64,
        #[arg(long, default_value = "NOK")]
        currency: String,
    },
    AddBank {
        #[arg(long)]
        account: String,
        #[arg(long)]
        iban: String,
        #[arg(long)]
        bic: String,
        #[arg(long)]
        bank_name: String,
    },
    AddItem {
        /// dd.mm.yyyy
        #[arg(long)]
        date: String,
        #[arg(long)]
        job_id: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        net: f64,
        #[arg(long)]
        client: i64,
        /// Overrides the client's VAT
        #[arg(long)]
        vat: Option<f64>,
    },
    NewInvoice {
        #[arg(long)]
        client: i64,
        #[arg(long)]
        bank: i64,
        /// dd.mm.yyyy, defaults to now
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        due_in_days: Option<u32>,
        #[arg(long)]
        language: Option<String>,
    },
    /// Assign the client's items worked between two dates
    Assign {
        #[arg(long)]
        invoice: i64,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    AssignItem {
        #[arg(long)]
        invoice: i64,
        #[arg(long)]
        item: i64,
    },
    /// Print an assembled invoice as JSON
    Show {
        #[arg(long)]
        invoice: i64,
    },
    /// Invoice a single item in one go
    Quick {
        #[arg(long)]
        date: String,
        #[arg(long)]
        job_id: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        net: f64,
        #[arg(long)]
        client: i64,
        #[arg(long)]
        bank: i64,
    },
    /// Invoice a batch of items from a JSON file
    ImportItems {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
        #[arg(long)]
        client: i64,
        #[arg(long)]
        bank: i64,
        /// Assign by the batch's date span instead of item by item
        #[arg(long)]
        by_date_range: bool,
    },
    /// Invoice an XTRF job export
    ImportXtrf {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
        #[arg(long)]
        client: i64,
        #[arg(long)]
        bank: i64,
    },
    Report {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    Export {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the raw rows of a table
    List { table: Table },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load()?;
    info!("Starting with config: {:?}", config);

    let pool = create_pool(&config.database.url, config.database.max_connections).await?;
    ensure_schema(&pool).await?;

    let ledger = InvoiceLedger::new(pool.clone(), config.invoice.clone());
    let reporter = Reporter::new(pool, Box::new(FixedRates::new(config.currency.rates.clone())));

    match cli.command {
        Command::Init => info!("Database ready at {}", config.database.url),
        Command::AddClient { name, org_nr, address, vat, currency } => {
            let pk = ledger
                .add_client(&NewClient { name, org_nr, address, vat, currency })
                .await?;
            println!("{}", pk);
        }
        Command::AddBank { account, iban, bic, bank_name } => {
            let pk = ledger.add_bank(&NewBank { account, iban, bic, bank_name }).await?;
            println!("{}", pk);
        }
        Command::AddItem { date, job_id, description, net, client, vat } => {
            let item = NewItem {
                work_date: dates::parse_date(&date)?,
                job_id,
                description,
                net,
                vat,
                client,
            };
            println!("{}", ledger.add_item(&item).await?);
        }
        Command::NewInvoice { client, bank, date, due_in_days, language } => {
            let created = date.as_deref().map(dates::parse_date).transpose()?;
            let options = InvoiceOptions { created, due_in_days, language };
            println!("{}", ledger.add_invoice(client, bank, options).await?);
        }
        Command::Assign { invoice, from, to } => {
            let assigned = ledger.assign_items_by_date(invoice, &from, &to).await?;
            println!("{} items assigned", assigned);
        }
        Command::AssignItem { invoice, item } => {
            ledger.assign_item_by_pk(invoice, item).await?;
        }
        Command::Show { invoice } => {
            let generator = ledger.make_generator(invoice).await?;
            println!("{}", serde_json::to_string_pretty(&generator)?);
        }
        Command::Quick { date, job_id, description, net, client, bank } => {
            let generator = ledger
                .quick_generator_from_item(&date, &job_id, &description, net, client, bank)
                .await?;
            println!("{}", serde_json::to_string_pretty(&generator)?);
        }
        Command::ImportItems { file, client, bank, by_date_range } => {
            let drafts: Vec<ItemDraft> = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
            let generator = if by_date_range {
                ledger.quick_generator_by_date_range(&drafts, client, bank).await?
            } else {
                ledger.quick_generator_from_list(&drafts, client, bank).await?
            };
            println!("{}", serde_json::to_string_pretty(&generator)?);
        }
        Command::ImportXtrf { file, client, bank } => {
            let jobs = ingest::parse_export(&std::fs::read_to_string(&file)?)?;
            let drafts = ingest::to_item_drafts(&jobs)?;
            info!("{} jobs read from {}", drafts.len(), file.display());
            let generator = ledger.quick_generator_from_list(&drafts, client, bank).await?;
            println!("{}", serde_json::to_string_pretty(&generator)?);
        }
        Command::Report { from, to } => {
            print!("{}", reporter.print_invoice_report(&from, &to).await?);
        }
        Command::Export { from, to, output } => {
            let count = reporter.export_invoices_to_csv(&from, &to, &output).await?;
            println!("{} invoices written to {}", count, output.display());
        }
        Command::List { table } => {
            print!("{}", reporter.dump_table(table).await?);
        }
    }

    Ok(())
}
