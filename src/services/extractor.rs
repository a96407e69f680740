//! Listing extractor service.
//!
//! Turns the directives listing page into an ordered list of records using
//! a configured CSS selector for the directive links.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{DirectiveRecord, SourceConfig, parse_timestamp};
use crate::utils::canonical_url;

/// Extracts directive records from listing HTML.
pub struct ListingExtractor {
    link_selector: Selector,
    link_selector_source: String,
    time_selector: Selector,
    base_url: Url,
}

impl ListingExtractor {
    /// Create an extractor for the configured listing page.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        Ok(Self {
            link_selector: Self::parse_selector(&config.link_selector)?,
            link_selector_source: config.link_selector.clone(),
            time_selector: Self::parse_selector("time[datetime]")?,
            base_url: Url::parse(&config.url)?,
        })
    }

    /// Extract records in page order.
    ///
    /// `fetched_at` is used as the publication time of entries that carry no
    /// `<time datetime>` element. Fails when no directive link is found, so
    /// that a broken page can never be mistaken for an empty listing.
    pub fn extract(
        &self,
        html: &str,
        fetched_at: DateTime<Utc>,
    ) -> Result<Vec<DirectiveRecord>> {
        let document = Html::parse_document(html);

        let mut seen = HashSet::new();
        let mut records = Vec::new();
        let mut matched = 0usize;

        for anchor in document.select(&self.link_selector) {
            matched += 1;
            let Some(record) = self.parse_anchor(&anchor, fetched_at) else {
                continue;
            };
            if seen.insert(record.id.clone()) {
                records.push(record);
            }
        }

        if records.is_empty() {
            return Err(AppError::extract(format!(
                "no directive entries found ({} links matched '{}')",
                matched,
                self.link_selector_source
            )));
        }

        log::debug!(
            "Extracted {} directives from {} matching links",
            records.len(),
            matched
        );
        Ok(records)
    }

    fn parse_anchor(
        &self,
        anchor: &ElementRef,
        fetched_at: DateTime<Utc>,
    ) -> Option<DirectiveRecord> {
        let href = anchor.value().attr("href")?;
        let url = canonical_url(&self.base_url, href)?;

        let title = normalize_whitespace(&anchor.text().collect::<String>());
        if title.is_empty() {
            return None;
        }

        let published = self.published_near(anchor).unwrap_or(fetched_at);
        Some(DirectiveRecord::new(title, url, Some(published)))
    }

    // A <time> inside the link, or the only <time> in a parent that holds
    // no other directive link.
    fn published_near(&self, anchor: &ElementRef) -> Option<DateTime<Utc>> {
        if let Some(time) = anchor.select(&self.time_selector).next() {
            return time.value().attr("datetime").and_then(parse_timestamp);
        }

        let parent = anchor.parent().and_then(ElementRef::wrap)?;
        if parent.select(&self.link_selector).nth(1).is_some() {
            return None;
        }
        let mut times = parent.select(&self.time_selector);
        let time = times.next()?;
        if times.next().is_some() {
            return None;
        }
        time.value().attr("datetime").and_then(parse_timestamp)
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
