//! RSS 2.0 feed writer.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{AppError, Result};
use crate::feed::{FeedMetadata, FeedPublisher};
use crate::models::DirectiveRecord;
use crate::utils::fs::write_atomic;

const GENERATOR: &str = concat!("directive-watch/", env!("CARGO_PKG_VERSION"));

/// Writes an RSS 2.0 document to a fixed path.
#[derive(Debug, Clone)]
pub struct RssPublisher {
    path: PathBuf,
}

impl RssPublisher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Render the feed document.
    ///
    /// `now` stamps `lastBuildDate` and any item without a publication time.
    pub fn render(
        &self,
        metadata: &FeedMetadata,
        records: &[DirectiveRecord],
        now: DateTime<Utc>,
    ) -> Result<String> {
        let mut doc = RssDocument::new();
        doc.write_document(metadata, records, now)
            .map_err(|e| AppError::feed(&self.path, e))?;
        String::from_utf8(doc.into_bytes()).map_err(|e| AppError::feed(&self.path, e))
    }
}

#[async_trait]
impl FeedPublisher for RssPublisher {
    async fn publish(&self, metadata: &FeedMetadata, records: &[DirectiveRecord]) -> Result<()> {
        let xml = self.render(metadata, records, Utc::now())?;
        write_atomic(&self.path, xml.as_bytes())
            .await
            .map_err(|e| AppError::feed(&self.path, e))?;
        log::debug!(
            "Wrote {} feed items to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Thin event writer over an in-memory buffer.
struct RssDocument {
    writer: Writer<Vec<u8>>,
}

// quick-xml reports write failures as its own error type or io::Error
// depending on the call; both are flattened to a message here.
type WriteResult = std::result::Result<(), String>;

impl RssDocument {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner()
    }

    fn event(&mut self, event: Event<'_>) -> WriteResult {
        self.writer.write_event(event).map_err(|e| e.to_string())
    }

    fn text_element(&mut self, name: &str, text: &str) -> WriteResult {
        self.event(Event::Start(BytesStart::new(name)))?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn write_document(
        &mut self,
        metadata: &FeedMetadata,
        records: &[DirectiveRecord],
        now: DateTime<Utc>,
    ) -> WriteResult {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        self.event(Event::Start(rss))?;
        self.event(Event::Start(BytesStart::new("channel")))?;

        self.text_element("title", &metadata.title)?;
        self.text_element("link", &metadata.link)?;
        self.text_element("description", &metadata.description)?;
        self.text_element("language", &metadata.language)?;
        self.text_element("lastBuildDate", &now.to_rfc2822())?;
        self.text_element("generator", GENERATOR)?;

        for record in records {
            self.write_item(record, now)?;
        }

        self.event(Event::End(BytesEnd::new("channel")))?;
        self.event(Event::End(BytesEnd::new("rss")))
    }

    fn write_item(&mut self, record: &DirectiveRecord, now: DateTime<Utc>) -> WriteResult {
        self.event(Event::Start(BytesStart::new("item")))?;
        self.text_element("title", &record.title)?;
        self.text_element("link", &record.url)?;

        let mut guid = BytesStart::new("guid");
        guid.push_attribute(("isPermaLink", "false"));
        self.event(Event::Start(guid))?;
        self.event(Event::Text(BytesText::new(&record.id)))?;
        self.event(Event::End(BytesEnd::new("guid")))?;

        let published = record.published.unwrap_or(now);
        self.text_element("pubDate", &published.to_rfc2822())?;
        self.event(Event::End(BytesEnd::new("item")))
    }
}
