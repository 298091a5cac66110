//! Shared mock infrastructure for unit tests.
//!
//! Every mock records what it was asked to do behind a `Mutex` so tests can
//! assert on calls after the service returns.

#![allow(clippy::expect_used, dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use ltc_cli::application::ports::{
    AppScaler, AppSubmitter, Clock, ConfigStore, ImageMetadataSource, InstanceStatusQuery,
    LogTailer, ProgressReporter,
};
use ltc_cli::domain::{CreationRequest, ImageMetadata, InstanceStatus, LtcConfig};

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Virtual clock: `sleep` advances time instantly.
pub struct FakeClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
    sleeps: Mutex<u32>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
            sleeps: Mutex::new(0),
        }
    }

    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().expect("lock")
    }

    pub fn sleeps(&self) -> u32 {
        *self.sleeps.lock().expect("lock")
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        *self.elapsed.lock().expect("lock") += duration;
        *self.sleeps.lock().expect("lock") += 1;
    }
}

// ── Status query ──────────────────────────────────────────────────────────────

/// Instance status answers served in order, then `fallback` forever.
pub struct StatusScript {
    answers: Mutex<VecDeque<Result<InstanceStatus>>>,
    fallback: InstanceStatus,
    queries: Mutex<u32>,
}

impl StatusScript {
    pub fn always(running: u32, placement_error: bool) -> Self {
        Self::scripted(Vec::new(), running, placement_error)
    }

    pub fn scripted(answers: Vec<Result<InstanceStatus>>, running: u32, placement_error: bool) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            fallback: InstanceStatus {
                running,
                placement_error,
            },
            queries: Mutex::new(0),
        }
    }

    pub fn queries(&self) -> u32 {
        *self.queries.lock().expect("lock")
    }
}

pub fn status(running: u32, placement_error: bool) -> Result<InstanceStatus> {
    Ok(InstanceStatus {
        running,
        placement_error,
    })
}

impl InstanceStatusQuery for StatusScript {
    async fn instances_status(&self, _name: &str) -> Result<InstanceStatus> {
        *self.queries.lock().expect("lock") += 1;
        self.answers
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or(Ok(self.fallback))
    }
}

// ── Cluster ───────────────────────────────────────────────────────────────────

/// Cluster that records submissions and scale calls and answers status from
/// a `StatusScript`.
pub struct RecordingCluster {
    pub status: StatusScript,
    submitted: Mutex<Vec<CreationRequest>>,
    scaled: Mutex<Vec<(String, u32)>>,
    fail_with: Option<String>,
}

impl RecordingCluster {
    pub fn new(status: StatusScript) -> Self {
        Self {
            status,
            submitted: Mutex::new(Vec::new()),
            scaled: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    /// Cluster whose submit and scale calls fail with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new(StatusScript::always(0, false))
        }
    }

    pub fn submitted(&self) -> Vec<CreationRequest> {
        self.submitted.lock().expect("lock").clone()
    }

    pub fn scaled(&self) -> Vec<(String, u32)> {
        self.scaled.lock().expect("lock").clone()
    }
}

impl AppSubmitter for RecordingCluster {
    async fn submit(&self, request: CreationRequest) -> Result<()> {
        if let Some(message) = &self.fail_with {
            anyhow::bail!("{message}");
        }
        self.submitted.lock().expect("lock").push(request);
        Ok(())
    }
}

impl AppScaler for RecordingCluster {
    async fn scale(&self, name: &str, instances: u32) -> Result<()> {
        if let Some(message) = &self.fail_with {
            anyhow::bail!("{message}");
        }
        self.scaled
            .lock()
            .expect("lock")
            .push((name.to_string(), instances));
        Ok(())
    }
}

impl InstanceStatusQuery for RecordingCluster {
    async fn instances_status(&self, name: &str) -> Result<InstanceStatus> {
        self.status.instances_status(name).await
    }
}

// ── Image metadata ────────────────────────────────────────────────────────────

/// Metadata source returning a fixed answer.
pub struct StaticMetadata {
    answer: std::result::Result<ImageMetadata, String>,
    fetched: Mutex<Vec<String>>,
}

impl StaticMetadata {
    pub fn new(metadata: ImageMetadata) -> Self {
        Self {
            answer: Ok(metadata),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().expect("lock").clone()
    }
}

impl ImageMetadataSource for StaticMetadata {
    async fn fetch(&self, image: &str) -> Result<ImageMetadata> {
        self.fetched.lock().expect("lock").push(image.to_string());
        self.answer.clone().map_err(|message| anyhow::anyhow!(message))
    }
}

/// Metadata with a start command and no ports or working directory.
pub fn metadata_with_start(command: &[&str]) -> ImageMetadata {
    ImageMetadata {
        start_command: command.iter().map(|s| (*s).to_string()).collect(),
        ..ImageMetadata::default()
    }
}

// ── Log tailer ────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingTailer {
    started: Mutex<Vec<String>>,
    stops: Mutex<u32>,
}

impl RecordingTailer {
    pub fn started(&self) -> Vec<String> {
        self.started.lock().expect("lock").clone()
    }

    pub fn stops(&self) -> u32 {
        *self.stops.lock().expect("lock")
    }
}

impl LogTailer for RecordingTailer {
    fn start(&self, app_name: &str) {
        self.started.lock().expect("lock").push(app_name.to_string());
    }

    fn stop(&self) {
        *self.stops.lock().expect("lock") += 1;
    }
}

// ── Reporter ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Step(String),
    Detail(String),
    Success(String),
    Error(String),
    Tick,
    EndLine,
}

/// Reporter capturing every event in order.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().expect("lock").clone()
    }

    /// Text of every event that carries a message.
    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Step(m)
                | Event::Detail(m)
                | Event::Success(m)
                | Event::Error(m) => Some(m),
                Event::Tick | Event::EndLine => None,
            })
            .collect()
    }

    pub fn ticks(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| **event == Event::Tick)
            .count()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages().iter().any(|m| m == message)
    }

    fn push(&self, event: Event) {
        self.events.lock().expect("lock").push(event);
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.push(Event::Step(message.to_string()));
    }
    fn detail(&self, message: &str) {
        self.push(Event::Detail(message.to_string()));
    }
    fn success(&self, message: &str) {
        self.push(Event::Success(message.to_string()));
    }
    fn error(&self, message: &str) {
        self.push(Event::Error(message.to_string()));
    }
    fn tick(&self) {
        self.push(Event::Tick);
    }
    fn end_line(&self) {
        self.push(Event::EndLine);
    }
}

// ── Config store ──────────────────────────────────────────────────────────────

/// In-memory `ConfigStore`.
#[derive(Default)]
pub struct MemoryConfigStore {
    config: Mutex<LtcConfig>,
    saves: Mutex<u32>,
}

impl MemoryConfigStore {
    pub fn with(config: LtcConfig) -> Self {
        Self {
            config: Mutex::new(config),
            saves: Mutex::new(0),
        }
    }

    pub fn current(&self) -> LtcConfig {
        self.config.lock().expect("lock").clone()
    }

    pub fn saves(&self) -> u32 {
        *self.saves.lock().expect("lock")
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<LtcConfig> {
        Ok(self.current())
    }

    fn save(&self, config: &LtcConfig) -> Result<()> {
        *self.config.lock().expect("lock") = config.clone();
        *self.saves.lock().expect("lock") += 1;
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("/tmp/ltc-test/config.yaml"))
    }
}
