// ABOUTME: Pre-compiled CSS selector cache shared by every document lookup.
// ABOUTME: Listing selectors are fixed strings, so each is parsed once per process.

//! Selector caching for repeated DOM queries.
//!
//! The extractor issues the same handful of selectors against every page.
//! Parsing them is more expensive than matching, so compiled selectors are
//! kept in a process-wide cache. Invalid selectors are cached as `None`.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use scraper::Selector;

static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Selector>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `None` if the selector does not parse. A poisoned lock falls
/// back to compiling without caching.
pub fn get_or_compile(css: &str) -> Option<Selector> {
    if let Ok(cache) = SELECTOR_CACHE.read() {
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Selector::parse(css).ok();
    if compiled.is_none() {
        tracing::debug!(selector = css, "invalid CSS selector");
    }
    if let Ok(mut cache) = SELECTOR_CACHE.write() {
        // Another thread may have inserted while we compiled.
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
        cache.insert(css.to_string(), compiled.clone());
    }
    compiled
}

/// Compiles a batch of selectors into the cache up front.
pub fn precompile_selectors<I, S>(selectors: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for css in selectors {
        get_or_compile(css.as_ref());
    }
}
