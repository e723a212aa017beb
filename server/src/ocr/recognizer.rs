use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

use super::ScanError;

/// Turns a preprocessed PNG into raw text.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, png: Vec<u8>) -> Result<String, ScanError>;
}

/// Runs the `tesseract` CLI, piping the image through stdin and reading the
/// text back from stdout.
pub struct TesseractRecognizer {
    binary: String,
    language: String,
}

impl TesseractRecognizer {
    pub fn new(binary: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    #[instrument(skip(self, png), fields(bytes = png.len(), binary = %self.binary))]
    async fn recognize(&self, png: Vec<u8>) -> Result<String, ScanError> {
        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", self.language.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ScanError::Recognizer("stdin was not captured".to_string()))?;
        let feeder = tokio::spawn(async move {
            stdin.write_all(&png).await?;
            stdin.shutdown().await
        });

        let output = child.wait_with_output().await?;
        let fed = feeder.await;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScanError::Recognizer(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }
        fed??;

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(chars = text.len(), "Recognizer finished");
        Ok(text)
    }
}
