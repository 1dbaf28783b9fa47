// ABOUTME: Main library entry point for the car-analyzer listing scraper.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, Options, VehicleRecord and the error types.

//! Scrapes vehicle classified-ad pages into structured records.
//!
//! The core is [`extract_vehicle`], a pure function from a parsed listing
//! page to a [`VehicleRecord`]. [`Client`] wraps it with HTTP fetching.
//!
//! # Example
//!
//! ```no_run
//! use car_analyzer::{Client, ScrapeError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ScrapeError> {
//!     let client = Client::builder().build()?;
//!     let record = client
//!         .scrape("https://www.kleinanzeigen.de/s-anzeige/vw-golf/123")
//!         .await?;
//!     println!("{}", record.format_summary());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod document;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod options;
pub mod record;
pub mod resource;

pub use crate::client::{Client, ScrapeOutcome};
pub use crate::document::ListingDocument;
pub use crate::error::{ErrorCode, FieldError, ScrapeError};
pub use crate::extractors::labels::VehicleAttribute;
pub use crate::extractors::listing::extract_vehicle;
pub use crate::options::{ClientBuilder, Options};
pub use crate::record::{is_sentinel, VehicleRecord, SENTINEL};
