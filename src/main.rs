// src/main.rs

use carelist::constants::DISPLAY_PAGE_SIZE;
use carelist::{
    AppError, CommandLineInput, DocumentStore, HttpStore, Listing, ListingConfig, MemoryStore,
    PaginatedSource, RecordActions, Resource, ResourceSource, StoreTarget,
};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("carelist.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = CommandLineInput::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config = match ListingConfig::resolve(cli) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(config: &ListingConfig) -> Result<(), AppError> {
    match &config.target {
        StoreTarget::Offline => {
            let store = MemoryStore::with_demo_data();
            run_with_store(store, config).await
        }
        StoreTarget::Gateway { endpoint, api_key } => {
            let store = HttpStore::new(endpoint.clone(), api_key)?;
            run_with_store(store, config).await
        }
    }
}

/// Binds the configured resource to the store and drives the listing.
async fn run_with_store<S>(store: S, config: &ListingConfig) -> Result<(), AppError>
where
    S: DocumentStore,
{
    let source = match (config.resource, &config.tag) {
        (Resource::Users, Some(tag)) => ResourceSource::users(store, tag.clone()),
        (resource, _) => ResourceSource::new(store, resource),
    };
    run_listing(source, config).await
}

async fn run_listing<S>(source: S, config: &ListingConfig) -> Result<(), AppError>
where
    S: PaginatedSource + RecordActions,
{
    let mut listing = Listing::with_page_sizes(source, config.page_size, DISPLAY_PAGE_SIZE);
    listing.load_initial().await;

    // Prefetch further server pages so search and windowing have data to
    // work over. One page is the default, matching the console's mount.
    let mut fetched = 1u32;
    while listing.state().error().is_none()
        && listing.state().has_more()
        && config.max_server_pages.map_or(true, |max| fetched < max)
    {
        listing.fetch_more().await;
        fetched += 1;
    }

    if let Some(id) = &config.delete {
        match listing.delete(id).await {
            Ok(()) => println!("deleted {}", id),
            Err(e) => println!("delete failed: {}", e),
        }
    }

    if let Some(term) = &config.search {
        listing.set_search(term.clone());
    }
    listing.go_to_page(config.display_page);

    // A failed first page shows an inline message instead of rows; it
    // does not retry and it does not crash the listing.
    if let Some(error) = listing.state().error() {
        println!("could not load {}: {}", config.resource, error);
        if !listing.state().items().is_empty() {
            print_rows(&listing);
        }
        return Ok(());
    }

    print_rows(&listing);
    Ok(())
}

fn print_rows<S: PaginatedSource + RecordActions>(listing: &Listing<S>) {
    for record in listing.visible() {
        let id = record
            .id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let fields: Vec<String> = record
            .fields()
            .filter(|(name, _)| *name != "id")
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        println!("{:<16} {}", id, fields.join(" "));
    }

    println!(
        "page {}/{} | {} matching of {} fetched | more on server: {}",
        listing.display_page() + 1,
        listing.display_page_count(),
        listing.filtered().len(),
        listing.state().items().len(),
        listing.state().has_more()
    );
}
