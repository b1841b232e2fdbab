use anyhow::{Context, Result};
use flock_shared::{FlockSettings, FrameSnapshot, SettingsUpdate, StatusResponse};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Destination for frame snapshots produced by the driver.
pub trait FrameSink {
    fn send(&mut self, frame: &FrameSnapshot) -> Result<()>;

    /// Settings pushed back by the consumer, if any changed since last poll.
    fn poll_settings(&mut self) -> Result<Option<FlockSettings>> {
        Ok(None)
    }

    fn finish(&mut self, _status: &StatusResponse) -> Result<()> {
        Ok(())
    }
}

/// Writes one JSON `FrameSnapshot` per line.
pub struct JsonLinesSink {
    writer: BufWriter<File>,
}

impl JsonLinesSink {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl FrameSink for JsonLinesSink {
    fn send(&mut self, frame: &FrameSnapshot) -> Result<()> {
        serde_json::to_writer(&mut self.writer, frame).context("Failed to encode frame")?;
        self.writer
            .write_all(b"\n")
            .context("Failed to write frame")?;
        Ok(())
    }

    fn finish(&mut self, _status: &StatusResponse) -> Result<()> {
        self.writer.flush().context("Failed to flush output file")
    }
}

/// Posts frames to a renderer over HTTP and polls it for settings changes.
///
/// Network failures are logged and skipped so a renderer restart does not
/// stop the simulation.
pub struct HttpSink {
    base_url: String,
    http_client: reqwest::blocking::Client,
    last_settings: Option<FlockSettings>,
}

impl HttpSink {
    pub fn new(base_url: &str) -> Result<Self> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            last_settings: None,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

impl FrameSink for HttpSink {
    fn send(&mut self, frame: &FrameSnapshot) -> Result<()> {
        match self.http_client.post(self.url("/api/frame")).json(frame).send() {
            Ok(response) => {
                if response.status().is_success() {
                    log::debug!("Frame {} sent", frame.tick);
                } else {
                    log::warn!("Renderer returned error: {}", response.status());
                }
            }
            Err(e) => {
                log::warn!("Failed to send frame {}: {}", frame.tick, e);
            }
        }

        Ok(())
    }

    fn poll_settings(&mut self) -> Result<Option<FlockSettings>> {
        let response = match self.http_client.get(self.url("/api/settings")).send() {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Failed to poll settings: {}", e);
                return Ok(None);
            }
        };

        if !response.status().is_success() {
            log::debug!("No settings available: {}", response.status());
            return Ok(None);
        }

        let settings = match response.json::<SettingsUpdate>() {
            Ok(update) => update.settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings update: {}", e);
                return Ok(None);
            }
        };

        if self.last_settings == Some(settings) {
            return Ok(None);
        }
        self.last_settings = Some(settings);
        Ok(Some(settings))
    }

    fn finish(&mut self, status: &StatusResponse) -> Result<()> {
        if let Err(e) = self
            .http_client
            .post(self.url("/api/status"))
            .json(status)
            .send()
        {
            log::warn!("Failed to send final status: {}", e);
        }
        Ok(())
    }
}
