//! Conversion service.
//!
//! Request handling for a web front end, without the web server: uploads
//! arrive as bytes plus form fields, responses are `serde` types ready to be
//! sent as JSON and failures carry an HTTP status. Conversion records live
//! in an injected [`ConversionStore`].
//!
//! # Example
//!
//! ```
//! use md2wechat::service::{ConversionService, ConvertRequest, MemoryStore, UploadedFile};
//!
//! let service = ConversionService::new(MemoryStore::new());
//! let request = ConvertRequest::new(UploadedFile::new("post.md", "# Hello"))
//!     .with_style("tech");
//! let response = service.convert_upload(request).unwrap();
//! assert!(response.success);
//! assert!(service.preview(&response.conversion_id).is_ok());
//! ```

mod filename;
mod store;

pub use filename::{converted_filename, secure_filename, split_extension, unique_filename};
pub use store::{ConversionRecord, ConversionStore, MemoryStore};

use crate::converter::Converter;
use crate::detect::{detect_format, Format};
use crate::model::SourceDocument;
use crate::render::ConvertOptions;
use crate::styles::{all_styles, find_style, DEFAULT_STYLE};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Largest accepted upload: 16 MiB.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Number of records returned by [`ConversionService::history`].
pub const HISTORY_LIMIT: usize = 50;

/// Age after which records are purged.
pub const RECORD_TTL_HOURS: i64 = 24;

/// Failures reported to service clients.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The request carried no file.
    #[error("no file uploaded")]
    NoFile,

    /// The file part has an empty name.
    #[error("no file selected")]
    EmptyFilename,

    /// The file extension is not supported.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The upload exceeds the size limit.
    #[error("file too large ({size} bytes), the limit is {limit} bytes")]
    TooLarge {
        /// Upload size
        size: usize,
        /// Configured limit
        limit: usize,
    },

    /// No record with this id.
    #[error("conversion record not found: {0}")]
    NotFound(String),

    /// The conversion itself failed.
    #[error("conversion failed: {0}")]
    ConversionFailed(String),
}

impl ServiceError {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::NoFile
            | ServiceError::EmptyFilename
            | ServiceError::UnsupportedFormat(_) => 400,
            ServiceError::TooLarge { .. } => 413,
            ServiceError::NotFound(_) => 404,
            ServiceError::ConversionFailed(_) => 500,
        }
    }

    /// JSON error body: `{"error": message}`.
    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

/// An uploaded file.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name as sent by the client
    pub filename: String,
    /// File content
    pub content: Vec<u8>,
}

impl UploadedFile {
    /// Create an upload.
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// A conversion request: the file part plus form fields.
#[derive(Debug, Clone, Default)]
pub struct ConvertRequest {
    /// Uploaded file, if the request had one
    pub file: Option<UploadedFile>,
    /// `title` form field
    pub title: String,
    /// `subtitle` form field
    pub subtitle: String,
    /// `style` form field
    pub style: Option<String>,
}

impl ConvertRequest {
    /// Create a request for a file.
    pub fn new(file: UploadedFile) -> Self {
        Self {
            file: Some(file),
            ..Default::default()
        }
    }

    /// Set the title field.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the subtitle field.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Set the style field.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

/// Successful conversion response.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResponse {
    /// Always true
    pub success: bool,
    /// Id for preview and history lookups
    pub conversion_id: String,
    /// The converted article
    pub html: String,
    /// Name of the converted article
    pub filename: String,
    /// Style actually applied
    pub style: String,
    /// Title as given
    pub title: String,
    /// Subtitle as given
    pub subtitle: String,
}

/// A style listing entry.
#[derive(Debug, Clone, Serialize)]
pub struct StyleInfo {
    /// Style id
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
}

/// A format listing entry.
#[derive(Debug, Clone, Serialize)]
pub struct FormatInfo {
    /// Display name
    pub name: &'static str,
    /// Dotted extensions
    pub extensions: Vec<String>,
    /// How the format is handled
    pub description: &'static str,
}

/// Conversion counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    /// Number of stored records
    pub total_conversions: usize,
    /// Records per style id
    pub style_stats: BTreeMap<String, usize>,
    /// Records per lower-cased dotted extension
    pub format_stats: BTreeMap<String, usize>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct Health {
    /// Always "healthy"
    pub status: &'static str,
    /// Time of the check
    pub timestamp: DateTime<Utc>,
    /// Crate version
    pub version: &'static str,
}

/// Conversion service over a record store.
#[derive(Debug)]
pub struct ConversionService<S: ConversionStore = MemoryStore> {
    store: S,
    max_upload_bytes: usize,
}

impl<S: ConversionStore> ConversionService<S> {
    /// Create a service backed by `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }

    /// Override the upload size limit.
    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }

    /// The record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Convert an uploaded file and record the result.
    pub fn convert_upload(&self, request: ConvertRequest) -> Result<ConvertResponse, ServiceError> {
        let file = request.file.ok_or(ServiceError::NoFile)?;
        if file.filename.is_empty() {
            return Err(ServiceError::EmptyFilename);
        }

        // Sanitizing can strip the stem, so detect on the client name
        let format = detect_format(&file.filename);
        if format == Format::Unknown {
            return Err(ServiceError::UnsupportedFormat(file.filename));
        }
        if file.content.len() > self.max_upload_bytes {
            return Err(ServiceError::TooLarge {
                size: file.content.len(),
                limit: self.max_upload_bytes,
            });
        }

        let style = request
            .style
            .as_deref()
            .and_then(find_style)
            .map_or(DEFAULT_STYLE, |s| s.id);

        let now = Utc::now();
        let conversion_id = uuid::Uuid::new_v4().to_string();
        let filename = secure_filename(&file.filename);
        let unique = unique_filename(&filename, now, &uuid::Uuid::new_v4().to_string());
        let output_filename = converted_filename(&unique);
        log::info!("upload accepted: {} ({} bytes)", unique, file.content.len());

        let options = ConvertOptions::new()
            .with_style(style)
            .with_title(request.title.clone())
            .with_subtitle(request.subtitle.clone());
        let file_size = file.content.len();
        let source = SourceDocument::new(file.content, format).with_path(&unique);
        let document = Converter::new(options)
            .convert_source(&source)
            .map_err(|e| {
                log::error!("conversion of {} failed: {}", unique, e);
                ServiceError::ConversionFailed(e.to_string())
            })?;

        self.store.insert(ConversionRecord {
            id: conversion_id.clone(),
            original_filename: filename,
            converted_filename: output_filename.clone(),
            style: style.to_string(),
            title: request.title.clone(),
            subtitle: request.subtitle.clone(),
            timestamp: now,
            file_size,
            html: document.html.clone(),
        });
        log::info!("conversion complete: {}", conversion_id);

        Ok(ConvertResponse {
            success: true,
            conversion_id,
            html: document.html,
            filename: output_filename,
            style: style.to_string(),
            title: request.title,
            subtitle: request.subtitle,
        })
    }

    /// The stored article for a conversion.
    pub fn preview(&self, conversion_id: &str) -> Result<String, ServiceError> {
        self.store
            .get(conversion_id)
            .map(|record| record.html)
            .ok_or_else(|| ServiceError::NotFound(conversion_id.to_string()))
    }

    /// Available styles with descriptions.
    pub fn styles(&self) -> Vec<StyleInfo> {
        all_styles()
            .iter()
            .map(|style| StyleInfo {
                name: style.id,
                description: style.description,
            })
            .collect()
    }

    /// Supported input formats.
    pub fn formats(&self) -> Vec<FormatInfo> {
        Format::all_supported()
            .iter()
            .map(|format| FormatInfo {
                name: format.name(),
                extensions: format
                    .extensions()
                    .into_iter()
                    .map(|ext| format!(".{}", ext))
                    .collect(),
                description: format.note(),
            })
            .collect()
    }

    /// The most recent records, oldest first.
    pub fn history(&self) -> Vec<ConversionRecord> {
        self.store.recent(HISTORY_LIMIT)
    }

    /// Counts by style and by file extension.
    pub fn stats(&self) -> Stats {
        let mut stats = Stats::default();
        for record in self.store.all() {
            stats.total_conversions += 1;
            *stats.style_stats.entry(record.style.clone()).or_default() += 1;
            let ext = split_extension(&record.original_filename).1.to_lowercase();
            *stats.format_stats.entry(ext).or_default() += 1;
        }
        stats
    }

    /// Drop records older than the retention period, returning how many
    /// were removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_before(Utc::now() - TimeDelta::hours(RECORD_TTL_HOURS))
    }

    /// Drop records created before `cutoff`.
    pub fn purge_before(&self, cutoff: DateTime<Utc>) -> usize {
        let removed = self.store.remove_before(cutoff).len();
        log::info!("purged {} expired conversion records", removed);
        removed
    }

    /// Service health.
    pub fn health(&self) -> Health {
        Health {
            status: "healthy",
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

impl Default for ConversionService<MemoryStore> {
    fn default() -> Self {
        Self::new(MemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content: &str) -> ConvertRequest {
        ConvertRequest::new(UploadedFile::new(name, content))
    }

    #[test]
    fn test_convert_upload_response() {
        let service = ConversionService::default();
        let response = service
            .convert_upload(upload("post.md", "# Hi").with_title("T").with_style("dark"))
            .unwrap();

        assert!(response.success);
        assert_eq!(response.style, "dark");
        assert_eq!(response.title, "T");
        assert_eq!(response.subtitle, "");
        assert!(response.filename.starts_with("converted_post_"));
        assert!(response.filename.ends_with(".md.html"));
        assert!(response.html.contains("<h1 class=\"wechat-title\">T</h1>"));

        let json = serde_json::to_value(&response).unwrap();
        for key in ["success", "conversion_id", "html", "filename", "style", "title", "subtitle"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_unknown_style_falls_back() {
        let service = ConversionService::default();
        let response = service
            .convert_upload(upload("a.txt", "x").with_style("neon"))
            .unwrap();
        assert_eq!(response.style, "default");
    }

    #[test]
    fn test_non_ascii_filename_keeps_format() {
        let service = ConversionService::default();
        let response = service.convert_upload(upload("文档.md", "# 标题")).unwrap();
        assert!(response.html.contains("标题"));
        assert!(response.filename.starts_with("converted_md_"));
    }

    #[test]
    fn test_request_errors() {
        let service = ConversionService::default().with_max_upload_bytes(4);

        let err = service.convert_upload(ConvertRequest::default()).unwrap_err();
        assert_eq!(err.status(), 400);

        let err = service.convert_upload(upload("", "x")).unwrap_err();
        assert!(matches!(err, ServiceError::EmptyFilename));

        let err = service.convert_upload(upload("a.pdf", "x")).unwrap_err();
        assert_eq!(err.status(), 400);

        let err = service.convert_upload(upload("a.md", "too long")).unwrap_err();
        assert_eq!(err.status(), 413);

        let err = service.preview("missing").unwrap_err();
        assert_eq!(err.status(), 404);
        assert_eq!(err.body()["error"], "conversion record not found: missing");
    }

    #[test]
    fn test_conversion_failure_is_500() {
        let service = ConversionService::default();
        let err = service
            .convert_upload(ConvertRequest::new(UploadedFile::new("a.md", vec![0xff, 0xfe])))
            .unwrap_err();
        assert_eq!(err.status(), 500);
        assert!(service.store().is_empty());
    }

    #[test]
    fn test_history_stats_preview() {
        let service = ConversionService::default();
        let first = service.convert_upload(upload("a.md", "one")).unwrap();
        service
            .convert_upload(upload("b.TXT", "two").with_style("tech"))
            .unwrap();

        assert_eq!(service.history().len(), 2);
        assert_eq!(service.preview(&first.conversion_id).unwrap(), first.html);

        let stats = service.stats();
        assert_eq!(stats.total_conversions, 2);
        assert_eq!(stats.style_stats["default"], 1);
        assert_eq!(stats.style_stats["tech"], 1);
        assert_eq!(stats.format_stats[".md"], 1);
        assert_eq!(stats.format_stats[".txt"], 1);
    }

    #[test]
    fn test_history_limit() {
        let service = ConversionService::default();
        for i in 0..(HISTORY_LIMIT + 5) {
            service.convert_upload(upload(&format!("{}.md", i), "x")).unwrap();
        }
        let history = service.history();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].original_filename, "5.md");
    }

    #[test]
    fn test_purge() {
        let service = ConversionService::default();
        service.convert_upload(upload("a.md", "x")).unwrap();
        assert_eq!(service.purge_expired(), 0);
        assert_eq!(service.purge_before(Utc::now() + TimeDelta::seconds(1)), 1);
        assert!(service.history().is_empty());
    }

    #[test]
    fn test_listings_and_health() {
        let service = ConversionService::default();
        assert_eq!(service.styles().len(), 8);
        let formats = service.formats();
        assert_eq!(formats.len(), 6);
        assert_eq!(formats[0].extensions, vec![".md", ".markdown"]);
        let health = service.health();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }
}
