//! Command line arguments
//!
//! - content-studio                              open the content type list
//! - content-studio --content-type 3             create an entry of type 3
//! - content-studio --content-type 3 --entry 9   edit entry 9
//! - content-studio --new-type                   author a new content type

use crate::config::AppConfig;
use crate::schema::{ContentTypeId, EntryId};
use clap::Parser;

/// Terminal admin client for a schema-driven content API
#[derive(Parser, Debug)]
#[command(name = "content-studio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the content API
    #[arg(long, env = "CONTENT_STUDIO_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, env = "CONTENT_STUDIO_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Open the entry editor for this content type
    #[arg(long, value_name = "ID")]
    pub content_type: Option<ContentTypeId>,

    /// Edit this existing entry instead of creating one
    #[arg(long, value_name = "ID", requires = "content_type")]
    pub entry: Option<EntryId>,

    /// Open the schema builder
    #[arg(long, conflicts_with = "content_type")]
    pub new_type: bool,

    /// Refuse to save entries whose required fields are blank
    #[arg(long)]
    pub enforce_required: bool,

    /// Write the resulting settings to the config file before starting
    #[arg(long)]
    pub save_config: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Settings given on the command line or through the environment
    pub fn overrides(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.api_url.clone(),
            api_token: self.api_token.clone(),
            enforce_required: self.enforce_required.then_some(true),
            send_required_flag: None,
        }
    }
}
