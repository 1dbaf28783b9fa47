// ABOUTME: The main Client struct that fetches listing pages and runs the field extractor.
// ABOUTME: Provides async scrape()/scrape_all() and an offline scrape_html() for saved pages.

use scraper::Html;

use crate::error::ScrapeError;
use crate::extractors::compiled::precompile_selectors;
use crate::extractors::listing::{extract_vehicle, LISTING_SELECTORS};
use crate::options::{ClientBuilder, Options};
use crate::record::VehicleRecord;
use crate::resource::{fetch, validate_url, FetchOptions};

/// Outcome of scraping one URL in a batch.
#[derive(Debug)]
pub struct ScrapeOutcome {
    pub url: String,
    pub result: Result<VehicleRecord, ScrapeError>,
}

impl ScrapeOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Fetches vehicle listing pages and turns them into [`VehicleRecord`]s.
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Result<Self, ScrapeError> {
        let http_client = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .cookie_store(true)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .map_err(|e| {
                    ScrapeError::fetch(
                        "",
                        "Client",
                        Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
                    )
                })?,
        };

        precompile_selectors(LISTING_SELECTORS);

        Ok(Self { opts, http_client })
    }

    /// Fetch `url` and extract its vehicle record.
    pub async fn scrape(&self, url: &str) -> Result<VehicleRecord, ScrapeError> {
        let result = self.scrape_inner(url).await;
        if let Err(ref e) = result {
            tracing::error!(url, error = %e, "error scraping listing");
        }
        result
    }

    async fn scrape_inner(&self, url: &str) -> Result<VehicleRecord, ScrapeError> {
        validate_url(url, "Scrape")?;

        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
        };
        let fetched = fetch(&self.http_client, url, &fetch_opts).await?;
        let html = fetched.text();

        // The record keeps the URL the operator asked for, not the redirect target.
        extract_from_html(&html, url)
    }

    /// Extract a vehicle record from already-fetched HTML.
    pub fn scrape_html(&self, html: &str, url: &str) -> Result<VehicleRecord, ScrapeError> {
        let result = extract_from_html(html, url);
        if let Err(ref e) = result {
            tracing::error!(url, error = %e, "error scraping listing");
        }
        result
    }

    /// Scrape every URL in order. A failing URL does not stop the batch.
    pub async fn scrape_all<I, S>(&self, urls: I) -> Vec<ScrapeOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outcomes = Vec::new();
        for url in urls {
            let url = url.as_ref();
            let result = self.scrape(url).await;
            outcomes.push(ScrapeOutcome {
                url: url.to_string(),
                result,
            });
        }
        tracing::info!(
            total = outcomes.len(),
            failed = outcomes.iter().filter(|o| !o.is_ok()).count(),
            "batch finished"
        );
        outcomes
    }
}

fn extract_from_html(html: &str, url: &str) -> Result<VehicleRecord, ScrapeError> {
    let doc = Html::parse_document(html);
    let record =
        extract_vehicle(&doc, url).map_err(|e| ScrapeError::extract(url, "Extract", e))?;
    tracing::debug!(
        url,
        known = record.known_attributes(),
        features = record.features.len(),
        "extracted listing"
    );
    Ok(record)
}
