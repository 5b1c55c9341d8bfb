//! Attachment extraction by running ffmpeg.

use async_trait::async_trait;
use mkvfont_core::{AttachmentExtractor, ExtractionFailure, FontBlob};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::sync::Semaphore;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ExtractorSettings {
    pub program: PathBuf,
    /// `None` lets a stalled process run forever.
    pub timeout: Option<Duration>,
    pub max_concurrent: usize,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        ExtractorSettings {
            program: PathBuf::from("ffmpeg"),
            timeout: Some(Duration::from_secs(30)),
            max_concurrent: 4,
        }
    }
}

/// Dumps one attachment to stdout and discards everything else.
///
/// One process per call. Dropping the returned future kills the process, so
/// a caller that goes away takes its ffmpeg with it.
pub struct FfmpegExtractor {
    settings: ExtractorSettings,
    permits: Arc<Semaphore>,
}

impl FfmpegExtractor {
    pub fn new(settings: ExtractorSettings) -> Self {
        let permits = Arc::new(Semaphore::new(settings.max_concurrent.max(1)));
        FfmpegExtractor { settings, permits }
    }

    fn command(&self, path: &Path, position: usize) -> Command {
        let mut command = Command::new(&self.settings.program);
        command
            .arg("-nostdin")
            .arg(format!("-dump_attachment:t:{}", position))
            .arg("pipe:1")
            .arg("-i")
            .arg(path)
            .args(["-t", "0", "-f", "null", "null"])
            .env_remove("LD_LIBRARY_PATH")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            command.current_dir(dir);
        }
        command
    }

    async fn run(&self, path: &Path, position: usize) -> Result<FontBlob, ExtractionFailure> {
        let mut child = self.command(path, position).spawn().map_err(ExtractionFailure::Spawn)?;
        let mut stdout = child.stdout.take().ok_or(ExtractionFailure::Empty)?;

        let mut buffer = Vec::new();
        let work = async {
            stdout.read_to_end(&mut buffer).await?;
            child.wait().await
        };
        let finished = match self.settings.timeout {
            Some(limit) => tokio::time::timeout(limit, work).await.map_err(|_| limit),
            None => Ok(work.await),
        };
        let status = match finished {
            Ok(status) => status.map_err(ExtractionFailure::Io)?,
            Err(limit) => {
                let _ = child.start_kill();
                return Err(ExtractionFailure::TimedOut(limit));
            }
        };

        if !status.success() {
            return Err(ExtractionFailure::Exit(status.code()));
        }
        if buffer.is_empty() {
            return Err(ExtractionFailure::Empty);
        }
        Ok(FontBlob::from(buffer))
    }
}

#[async_trait]
impl AttachmentExtractor for FfmpegExtractor {
    async fn extract_attachment(&self, path: &Path, position: usize) -> Result<FontBlob, ExtractionFailure> {
        let _permit = self.permits.acquire().await.map_err(|_| ExtractionFailure::Closed)?;
        debug!(path = %path.display(), position, "running {}", self.settings.program.display());
        self.run(path, position).await
    }
}
