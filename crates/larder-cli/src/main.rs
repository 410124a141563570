#![forbid(unsafe_code)]

use clap::{Args, Parser, Subcommand};
use larder_model::MenuDataset;
use larder_seed::{seed_catalog, SeedCollections, FIELD_CATEGORY_REF, FIELD_NAME, FIELD_PRICE};
use larder_store::{
    resolve_setting, CollectionId, DocumentStore, HttpDocumentStore, ListQuery, RemoteStoreConfig,
    ENV_LARDER_API_KEY, ENV_LARDER_DATABASE, ENV_LARDER_ENDPOINT, ENV_LARDER_LOG_LEVEL,
    ENV_LARDER_PROJECT,
};
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

const EXIT_INTERNAL: u8 = 10;

#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Larder storefront catalog CLI")]
struct Cli {
    #[arg(long, global = true, default_value_t = false, help = "Output machine-readable JSON")]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reset the catalog collections and repopulate them from a dataset.
    Seed {
        #[command(flatten)]
        connect: ConnectArgs,
        #[command(flatten)]
        collections: CollectionArgs,
        #[arg(long, help = "Dataset JSON file; defaults to the built-in dataset")]
        dataset: Option<PathBuf>,
    },
    Dataset {
        #[command(subcommand)]
        command: DatasetCommand,
    },
    Menu {
        #[command(subcommand)]
        command: MenuCommand,
    },
}

#[derive(Subcommand)]
enum DatasetCommand {
    /// Validate a dataset file (or the built-in dataset) without writing.
    Validate {
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum MenuCommand {
    /// List menu documents, optionally filtered by category name or a
    /// search needle.
    List {
        #[command(flatten)]
        connect: ConnectArgs,
        #[command(flatten)]
        collections: CollectionArgs,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 25)]
        limit: usize,
    },
}

#[derive(Args)]
struct ConnectArgs {
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    project: Option<String>,
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long)]
    database: Option<String>,
}

impl ConnectArgs {
    fn into_store(self) -> Result<HttpDocumentStore, String> {
        let config = RemoteStoreConfig::new(
            resolve_setting(self.endpoint, ENV_LARDER_ENDPOINT).map_err(|e| e.to_string())?,
            resolve_setting(self.project, ENV_LARDER_PROJECT).map_err(|e| e.to_string())?,
            resolve_setting(self.api_key, ENV_LARDER_API_KEY).map_err(|e| e.to_string())?,
            resolve_setting(self.database, ENV_LARDER_DATABASE).map_err(|e| e.to_string())?,
        )
        .map_err(|e| e.to_string())?;
        Ok(HttpDocumentStore::new(config))
    }
}

#[derive(Args)]
struct CollectionArgs {
    #[arg(long, default_value = "categories")]
    categories_collection: String,
    #[arg(long, default_value = "customizations")]
    customizations_collection: String,
    #[arg(long, default_value = "menu")]
    menu_collection: String,
    #[arg(long, default_value = "menu_customizations")]
    menu_customizations_collection: String,
}

impl CollectionArgs {
    fn into_collections(self) -> Result<SeedCollections, String> {
        SeedCollections::parse(
            &self.categories_collection,
            &self.customizations_collection,
            &self.menu_collection,
            &self.menu_customizations_collection,
        )
        .map_err(|e| e.to_string())
    }
}

fn main() -> ProcessExitCode {
    init_tracing();
    match run() {
        Ok(()) => ProcessExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ProcessExitCode::from(EXIT_INTERNAL)
        }
    }
}

fn init_tracing() {
    let filter = std::env::var(ENV_LARDER_LOG_LEVEL).unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Seed {
            connect,
            collections,
            dataset,
        } => run_seed(cli.json, connect, collections, dataset),
        Commands::Dataset { command } => match command {
            DatasetCommand::Validate { path } => validate_dataset(cli.json, path),
        },
        Commands::Menu { command } => match command {
            MenuCommand::List {
                connect,
                collections,
                category,
                search,
                limit,
            } => list_menu(cli.json, connect, collections, category, search, limit),
        },
    }
}

fn load_dataset(path: Option<PathBuf>) -> Result<MenuDataset, String> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            serde_json::from_str(&raw).map_err(|e| format!("invalid dataset file: {e}"))
        }
        None => Ok(MenuDataset::builtin()),
    }
}

fn run_seed(
    json: bool,
    connect: ConnectArgs,
    collections: CollectionArgs,
    dataset: Option<PathBuf>,
) -> Result<(), String> {
    let store = connect.into_store()?;
    let collections = collections.into_collections()?;
    let dataset = load_dataset(dataset)?;

    let report = seed_catalog(&store, &dataset, &collections).map_err(|e| e.to_string())?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?
        );
    } else {
        println!("seed: deleted {} stale documents", report.documents_deleted);
        println!("seed: created {} categories", report.categories_created);
        println!(
            "seed: created {} customizations",
            report.customizations_created
        );
        println!(
            "seed: created {} menu items with {} links",
            report.menu_items_created, report.links_created
        );
        for warning in &report.warnings {
            println!("seed: warning: {warning}");
        }
    }
    Ok(())
}

fn validate_dataset(json: bool, path: Option<PathBuf>) -> Result<(), String> {
    let dataset = load_dataset(path)?;
    dataset.validate().map_err(|e| e.to_string())?;
    if json {
        println!(
            "{}",
            serde_json::json!({
                "ok": true,
                "categories": dataset.categories.len(),
                "customizations": dataset.customizations.len(),
                "menu_items": dataset.menu.len(),
            })
        );
    } else {
        println!(
            "dataset validation: OK ({} categories, {} customizations, {} menu items)",
            dataset.categories.len(),
            dataset.customizations.len(),
            dataset.menu.len()
        );
    }
    Ok(())
}

fn list_menu(
    json: bool,
    connect: ConnectArgs,
    collections: CollectionArgs,
    category: Option<String>,
    search: Option<String>,
    limit: usize,
) -> Result<(), String> {
    let store = connect.into_store()?;
    let menu_collection =
        CollectionId::parse(&collections.menu_collection).map_err(|e| e.to_string())?;

    let mut query = ListQuery::default().with_limit(limit);
    if let Some(category_name) = category {
        let categories_collection =
            CollectionId::parse(&collections.categories_collection).map_err(|e| e.to_string())?;
        let matches = store
            .list_documents(
                &categories_collection,
                &ListQuery::default().with_equal(FIELD_NAME, category_name.as_str()),
            )
            .map_err(|e| e.to_string())?;
        let category_doc = matches
            .first()
            .ok_or_else(|| format!("category not found: {category_name}"))?;
        query = query.with_equal(FIELD_CATEGORY_REF, category_doc.id.as_str());
    }
    if let Some(needle) = search {
        query = query.with_search(FIELD_NAME, needle);
    }

    let documents = store
        .list_documents(&menu_collection, &query)
        .map_err(|e| e.to_string())?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&documents).map_err(|e| e.to_string())?
        );
    } else {
        for doc in &documents {
            println!(
                "{}\t{}\t{:.2}",
                doc.id,
                doc.field_str(FIELD_NAME).unwrap_or("?"),
                doc.field_f64(FIELD_PRICE).unwrap_or(0.0)
            );
        }
    }
    Ok(())
}
