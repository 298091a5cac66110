//! Streams application logs from the receptor while a command waits.

use std::sync::Mutex;

use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::ports::LogTailer;
use crate::domain::config::receptor_url_for;

/// `LogTailer` that follows `GET /v1/logs/{app}` in a background task.
pub struct ReceptorLogTailer {
    http: reqwest::Client,
    base_url: String,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ReceptorLogTailer {
    #[must_use]
    pub fn new(domain: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: receptor_url_for(domain),
            task: Mutex::new(None),
        }
    }
}

impl LogTailer for ReceptorLogTailer {
    fn start(&self, app_name: &str) {
        let request = self
            .http
            .get(format!("{}/v1/logs/{app_name}", self.base_url));
        let app = app_name.to_string();

        let handle = tokio::spawn(async move {
            let response = match request.send().await.and_then(reqwest::Response::error_for_status) {
                Ok(response) => response,
                Err(e) => {
                    warn!(app = %app, error = %e, "log stream unavailable");
                    return;
                }
            };
            let mut stream = response.bytes_stream();
            let mut lines = LineBuffer::default();
            while let Some(chunk) = stream.next().await {
                match chunk {
                    Ok(bytes) => {
                        for line in lines.push(&bytes) {
                            println!("{line}");
                        }
                    }
                    Err(e) => {
                        warn!(app = %app, error = %e, "log stream interrupted");
                        break;
                    }
                }
            }
            debug!(app = %app, "log stream ended");
        });

        if let Ok(mut task) = self.task.lock()
            && let Some(previous) = task.replace(handle)
        {
            previous.abort();
        }
    }

    fn stop(&self) {
        if let Ok(mut task) = self.task.lock()
            && let Some(handle) = task.take()
        {
            handle.abort();
        }
    }
}

/// Splits a byte stream into lines, decoding each only once it is complete so
/// multi-byte characters split across chunks survive.
#[derive(Debug, Default)]
struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);
        let mut lines = Vec::new();
        while let Some(idx) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=idx).collect();
            lines.push(String::from_utf8_lossy(&line).trim_end().to_string());
        }
        lines
    }
}

/// `LogTailer` that streams nothing, used when output is machine-readable.
pub struct NoopLogTailer;

impl LogTailer for NoopLogTailer {
    fn start(&self, _app_name: &str) {}
    fn stop(&self) {}
}
