//! Poster scanning: contrast normalization, text recognition, then field
//! heuristics that pre-fill the society event form.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

pub mod clean;
pub mod date;
pub mod extract;
pub mod preprocess;
pub mod recognizer;

pub use clean::clean_text;
pub use date::normalize_date;
pub use recognizer::{TesseractRecognizer, TextRecognizer};

use crate::models::{PosterFields, ScanOutcome};

pub const REVIEW_NOTICE: &str = "Fields were filled from the poster. Review every value before publishing.";
pub const NOTHING_FOUND_NOTICE: &str =
    "No event details were recognized on the poster. Fill the form manually and review before publishing.";
pub const SCAN_FAILED_NOTICE: &str = "Could not read the poster. Fill the form manually.";

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Failed to process image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image is too large to process")]
    TooLarge,

    #[error("Recognizer I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Recognizer failed: {0}")]
    Recognizer(String),

    #[error("Scan task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Which field heuristic runs over recognized text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Labeled pairs first, gaps filled from the longest-line scan.
    #[default]
    Auto,
    LongestLine,
    Labeled,
}

impl ExtractionStrategy {
    pub fn extract(&self, text: &str) -> PosterFields {
        match self {
            ExtractionStrategy::Auto => extract::labeled(text).or(extract::longest_line(text)),
            ExtractionStrategy::LongestLine => extract::longest_line(text),
            ExtractionStrategy::Labeled => extract::labeled(text),
        }
    }
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExtractionStrategy::Auto => "auto",
            ExtractionStrategy::LongestLine => "longest-line",
            ExtractionStrategy::Labeled => "labeled",
        })
    }
}

impl FromStr for ExtractionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ExtractionStrategy::Auto),
            "longest-line" | "longest_line" => Ok(ExtractionStrategy::LongestLine),
            "labeled" | "labelled" => Ok(ExtractionStrategy::Labeled),
            other => Err(format!("unknown extraction strategy '{}'", other)),
        }
    }
}

#[derive(Clone)]
pub struct PosterScanner {
    recognizer: Arc<dyn TextRecognizer>,
    strategy: ExtractionStrategy,
}

impl PosterScanner {
    pub fn new(recognizer: Arc<dyn TextRecognizer>, strategy: ExtractionStrategy) -> Self {
        Self {
            recognizer,
            strategy,
        }
    }

    /// Never fails: any error becomes a notice and an empty form.
    pub async fn scan(&self, image: Vec<u8>) -> ScanOutcome {
        let raw = match self.read_text(image).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Poster scan failed");
                return ScanOutcome {
                    scanned: false,
                    fields: PosterFields::default(),
                    raw_text: None,
                    notice: SCAN_FAILED_NOTICE.to_string(),
                };
            }
        };

        let text = clean_text(&raw);
        let fields = self.strategy.extract(&text);
        info!(
            strategy = %self.strategy,
            lines = text.lines().count(),
            title = fields.title.is_some(),
            date = fields.date.is_some(),
            venue = fields.venue.is_some(),
            "Poster scanned"
        );

        let notice = if fields.is_empty() {
            NOTHING_FOUND_NOTICE
        } else {
            REVIEW_NOTICE
        };

        ScanOutcome {
            scanned: true,
            fields,
            raw_text: Some(text),
            notice: notice.to_string(),
        }
    }

    async fn read_text(&self, image: Vec<u8>) -> Result<String, ScanError> {
        let png = tokio::task::spawn_blocking(move || preprocess::normalize_contrast(&image)).await??;
        self.recognizer.recognize(png).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use image::{DynamicImage, GrayImage, ImageFormat, Luma};
    use std::io::Cursor;

    struct FixedText(&'static str);

    #[async_trait]
    impl TextRecognizer for FixedText {
        async fn recognize(&self, _png: Vec<u8>) -> Result<String, ScanError> {
            Ok(self.0.to_string())
        }
    }

    struct Broken;

    #[async_trait]
    impl TextRecognizer for Broken {
        async fn recognize(&self, _png: Vec<u8>) -> Result<String, ScanError> {
            Err(ScanError::Recognizer("engine crashed".to_string()))
        }
    }

    fn tiny_png() -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([90])))
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[tokio::test]
    async fn test_auto_merges_labeled_and_longest_line() {
        let scanner = PosterScanner::new(
            Arc::new(FixedText("Annual Research Symposium 2025\nVenue: Conference Center\n21/12/2025\n")),
            ExtractionStrategy::Auto,
        );

        let outcome = scanner.scan(tiny_png()).await;

        assert!(outcome.scanned);
        assert_eq!(outcome.fields.title.as_deref(), Some("Annual Research Symposium 2025"));
        assert_eq!(outcome.fields.venue.as_deref(), Some("Conference Center"));
        assert_eq!(outcome.fields.date.as_deref(), Some("2025-12-21"));
        assert_eq!(outcome.notice, REVIEW_NOTICE);
    }

    #[tokio::test]
    async fn test_recognizer_failure_is_not_fatal() {
        let scanner = PosterScanner::new(Arc::new(Broken), ExtractionStrategy::Labeled);
        let outcome = scanner.scan(tiny_png()).await;

        assert!(!outcome.scanned);
        assert!(outcome.fields.is_empty());
        assert_eq!(outcome.notice, SCAN_FAILED_NOTICE);
    }

    #[tokio::test]
    async fn test_undecodable_upload_is_not_fatal() {
        let scanner = PosterScanner::new(Arc::new(FixedText("ignored")), ExtractionStrategy::Auto);
        let outcome = scanner.scan(b"GIF89a?".to_vec()).await;

        assert!(!outcome.scanned);
        assert_eq!(outcome.notice, SCAN_FAILED_NOTICE);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("longest-line".parse::<ExtractionStrategy>(), Ok(ExtractionStrategy::LongestLine));
        assert_eq!("Labeled".parse::<ExtractionStrategy>(), Ok(ExtractionStrategy::Labeled));
        assert!("magic".parse::<ExtractionStrategy>().is_err());
    }
}
