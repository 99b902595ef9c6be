use crate::cli::Command;
use crate::output;
use anyhow::{Context, Result};
use std::io::Write;
use tracing::{error, info, warn};
use wormhole_core::{CreationRequest, LinkStats, Shortener, UrlStore};
use wormhole_generator::RandomGenerator;
use wormhole_redirector::{RandomClickMetadata, RedirectorService, Resolution};
use wormhole_shortener::{validate_urls, ShortenerService, ShortenerSettings, ValidationError};

/// Most URLs a single `shorten` call accepts.
pub const MAX_BATCH_SIZE: usize = 5;

pub const CREATE_FAILED: &str = "Failed to create shortened URLs. Please try again.";
pub const NOT_FOUND: &str = "Short URL not found or has expired";

/// Result of a command, as the user should see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The command ran but could not do what was asked. The message is
    /// meant for the user.
    Failure(String),
}

/// Wires the shortener and the redirector to one store.
pub struct App<S> {
    shortener: ShortenerService<S, RandomGenerator>,
    redirector: RedirectorService<S, RandomClickMetadata>,
}

impl<S: UrlStore + Clone> App<S> {
    /// Builds both services over `store`. A seed makes short codes and click
    /// metadata reproducible.
    pub fn new(store: S, settings: ShortenerSettings, seed: Option<u64>) -> Self {
        let (generator, metadata) = match seed {
            Some(seed) => (
                RandomGenerator::from_seed(seed),
                RandomClickMetadata::from_seed(seed.wrapping_add(1)),
            ),
            None => (RandomGenerator::new(), RandomClickMetadata::new()),
        };

        Self {
            shortener: ShortenerService::new(store.clone(), generator, settings),
            redirector: RedirectorService::new(store, metadata),
        }
    }

    pub async fn run<W: Write>(&self, command: Command, out: &mut W) -> Result<Outcome> {
        match command {
            Command::Shorten(args) => match args.requests() {
                Ok(batch) => {
                    self.shorten_checked(&batch.requests, batch.input_errors, out).await
                }
                Err(message) => Ok(Outcome::Failure(message)),
            },
            Command::List { json } => self.list(json, out).await,
            Command::Stats { clicks } => self.stats(clicks, out).await,
            Command::Open { code, user_agent } => self.open(&code, user_agent, out).await,
        }
    }

    pub async fn shorten<W: Write>(
        &self,
        requests: &[CreationRequest],
        out: &mut W,
    ) -> Result<Outcome> {
        self.shorten_checked(requests, Vec::new(), out).await
    }

    /// Like [`App::shorten`], with problems already found while reading the
    /// input reported alongside the validation errors, in row order.
    async fn shorten_checked<W: Write>(
        &self,
        requests: &[CreationRequest],
        input_errors: Vec<ValidationError>,
        out: &mut W,
    ) -> Result<Outcome> {
        if requests.len() > MAX_BATCH_SIZE {
            return Ok(Outcome::Failure(format!(
                "At most {} URLs can be shortened at once, got {}",
                MAX_BATCH_SIZE,
                requests.len()
            )));
        }

        let mut errors = input_errors;
        errors.extend(validate_urls(requests));
        errors.sort_by_key(|e| (e.index, e.kind));
        if !errors.is_empty() {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n");
            return Ok(Outcome::Failure(message));
        }

        let created = match self.shortener.create_shortened_urls(requests).await {
            Ok(created) => created,
            Err(e) => {
                error!(error = %e, "url creation failed");
                return Ok(Outcome::Failure(CREATE_FAILED.to_string()));
            }
        };

        info!(
            created_count = created.len(),
            short_codes = ?created.iter().map(|r| r.short_code.as_str()).collect::<Vec<_>>(),
            "urls created successfully"
        );
        output::write_created(out, &created).context("failed to write output")?;
        Ok(Outcome::Success)
    }

    pub async fn list<W: Write>(&self, json: bool, out: &mut W) -> Result<Outcome> {
        let records = self.shortener.list().await;
        if json {
            serde_json::to_writer_pretty(&mut *out, &records).context("failed to write output")?;
            writeln!(out).context("failed to write output")?;
        } else {
            output::write_list(out, &records).context("failed to write output")?;
        }
        Ok(Outcome::Success)
    }

    pub async fn stats<W: Write>(&self, clicks: bool, out: &mut W) -> Result<Outcome> {
        let records = self.shortener.list().await;
        let stats = LinkStats::from_records(&records);
        output::write_stats(out, &stats, &records, clicks).context("failed to write output")?;
        Ok(Outcome::Success)
    }

    pub async fn open<W: Write>(
        &self,
        code: &str,
        user_agent: Option<String>,
        out: &mut W,
    ) -> Result<Outcome> {
        info!(code = %code, "processing redirect request");

        let resolution = self
            .redirector
            .record_click(code, user_agent)
            .await
            .context("failed to record click")?;

        match resolution {
            Resolution::Redirect(url) => {
                info!(code = %code, url = %url, "redirect successful");
                writeln!(out, "{}", url).context("failed to write output")?;
                Ok(Outcome::Success)
            }
            Resolution::NotFound => {
                warn!(code = %code, "redirect failed");
                Ok(Outcome::Failure(NOT_FOUND.to_string()))
            }
        }
    }
}
