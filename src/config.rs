// src/config.rs
use crate::constants::SERVER_PAGE_SIZE;
use crate::error::AppError;
use crate::resources::{ActionTag, Resource};
use crate::types::{ApiKey, RecordId, ValidationError};
use clap::Parser;
use url::Url;

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Resource to list (medicines, categories, diseases, pharmacies, labs, ambulances, users)
    pub resource: String,

    /// Case-insensitive search term applied over fetched records
    #[arg(short, long)]
    pub search: Option<String>,

    /// Display page to show, 1-based
    #[arg(short = 'P', long, default_value_t = 1)]
    pub page: usize,

    /// Maximum number of server pages to fetch (0 = fetch until exhausted)
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Server page size
    #[arg(long, default_value_t = SERVER_PAGE_SIZE)]
    pub page_size: u32,

    /// Action tag to narrow the users listing by (users resource only)
    #[arg(long)]
    pub tag: Option<String>,

    /// Delete this record id before showing the listing
    #[arg(long)]
    pub delete: Option<String>,

    /// Run against the built-in demo store instead of a gateway
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    /// Document-store gateway URL (overrides CARELIST_STORE_URL)
    #[arg(long)]
    pub store_url: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// How to reach the document store.
#[derive(Debug, Clone)]
pub enum StoreTarget {
    /// A gateway at this endpoint with this key.
    Gateway { endpoint: Url, api_key: ApiKey },
    /// The in-process demo store.
    Offline,
}

/// Resolved listing configuration, validated and ready to drive a run.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    pub resource: Resource,
    pub search: Option<String>,
    /// Display page to show, zero-based.
    pub display_page: usize,
    /// Server pages to fetch; `None` means until the store is exhausted.
    pub max_server_pages: Option<u32>,
    pub page_size: u32,
    pub tag: Option<ActionTag>,
    pub delete: Option<RecordId>,
    pub target: StoreTarget,
    pub verbose: bool,
}

impl ListingConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let resource: Resource = cli.resource.parse::<Resource>()?;

        if cli.tag.is_some() && resource != Resource::Users {
            return Err(AppError::MissingConfiguration(format!(
                "--tag only applies to the users resource, not {}",
                resource
            )));
        }

        let target = if cli.offline {
            StoreTarget::Offline
        } else {
            let raw_url = match cli.store_url {
                Some(url) => url,
                None => std::env::var("CARELIST_STORE_URL").map_err(|_| {
                    AppError::MissingConfiguration(
                        "CARELIST_STORE_URL environment variable not set (or pass --offline)"
                            .to_string(),
                    )
                })?,
            };
            let endpoint = Url::parse(&raw_url).map_err(|e| {
                ValidationError::InvalidEndpoint {
                    url: raw_url,
                    reason: e.to_string(),
                }
            })?;

            let api_key_str = std::env::var("CARELIST_API_KEY").map_err(|_| {
                AppError::MissingConfiguration(
                    "CARELIST_API_KEY environment variable not set".to_string(),
                )
            })?;
            let api_key = ApiKey::new(api_key_str)?;

            StoreTarget::Gateway { endpoint, api_key }
        };

        let delete = cli.delete.map(RecordId::new).transpose()?;

        Ok(ListingConfig {
            resource,
            search: cli.search,
            display_page: cli.page.saturating_sub(1),
            max_server_pages: (cli.pages > 0).then_some(cli.pages),
            page_size: cli.page_size,
            tag: cli.tag.map(ActionTag::new),
            delete,
            target,
            verbose: cli.verbose,
        })
    }
}
