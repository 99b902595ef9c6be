use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use wormhole_core::CreationRequest;
use wormhole_shortener::settings::DEFAULT_BASE_URL;
use wormhole_shortener::{parse_validity, ValidationError};

pub const STORE_PATH_ENV: &str = "WORMHOLE_STORE_PATH";
pub const BASE_URL_ENV: &str = "WORMHOLE_BASE_URL";
pub const SEED_ENV: &str = "WORMHOLE_SEED";
pub const LOG_FORMAT_ENV: &str = "WORMHOLE_LOG_FORMAT";
pub const USER_AGENT_ENV: &str = "WORMHOLE_USER_AGENT";

pub const DEFAULT_STORE_PATH: &str = "wormhole_shortened_urls.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wormhole",
    about = "Shorten URLs, follow short codes and inspect click statistics"
)]
pub struct Cli {
    /// JSON file holding every shortened URL.
    #[arg(long, global = true, env = STORE_PATH_ENV, default_value = DEFAULT_STORE_PATH)]
    pub store_path: PathBuf,

    /// Prefix of every short URL.
    #[arg(long, global = true, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Seed for short codes and click metadata, for reproducible runs.
    #[arg(long, global = true, env = SEED_ENV)]
    pub seed: Option<u64>,

    #[arg(
        long,
        global = true,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create short URLs for up to five long URLs.
    Shorten(ShortenArgs),
    /// List every stored short URL.
    List {
        /// Print the records as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show click statistics.
    Stats {
        /// Include every recorded click.
        #[arg(long)]
        clicks: bool,
    },
    /// Resolve a short code, recording a click.
    Open {
        code: String,
        #[arg(long, env = USER_AGENT_ENV)]
        user_agent: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ShortenArgs {
    /// URLs to shorten.
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Validity in minutes; the Nth value applies to the Nth URL.
    #[arg(long = "validity", allow_negative_numbers = true)]
    pub validities: Vec<String>,

    /// Custom short code; the Nth value applies to the Nth URL. Pass "" to skip a URL.
    #[arg(long = "code")]
    pub codes: Vec<String>,
}

/// The requests of a `shorten` call, plus any option that could not be
/// turned into a request field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortenBatch {
    pub requests: Vec<CreationRequest>,
    pub input_errors: Vec<ValidationError>,
}

impl ShortenArgs {
    /// Pairs each URL with the options given at the same position.
    ///
    /// A validity that is not a whole number leaves the request without one
    /// and is reported in `input_errors` instead.
    pub fn requests(&self) -> Result<ShortenBatch, String> {
        if self.validities.len() > self.urls.len() {
            return Err(format!(
                "got {} --validity values for {} URLs",
                self.validities.len(),
                self.urls.len()
            ));
        }
        if self.codes.len() > self.urls.len() {
            return Err(format!(
                "got {} --code values for {} URLs",
                self.codes.len(),
                self.urls.len()
            ));
        }

        let mut batch = ShortenBatch::default();
        for (index, url) in self.urls.iter().enumerate() {
            let validity_minutes = match self.validities.get(index) {
                Some(raw) => match parse_validity(index, raw) {
                    Ok(minutes) => Some(minutes),
                    Err(e) => {
                        batch.input_errors.push(e);
                        None
                    }
                },
                None => None,
            };

            batch.requests.push(CreationRequest {
                original_url: url.clone(),
                validity_minutes,
                custom_shortcode: self.codes.get(index).cloned(),
            });
        }
        Ok(batch)
    }
}
