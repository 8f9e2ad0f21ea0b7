//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::github::LiveGitHub;
use crate::adapters::recording::RecordingRepoHost;
use crate::adapters::replaying::ReplayingRepoHost;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Config;
use crate::ports::filesystem::FileSystem;
use crate::ports::repo_host::RepoHost;

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different host adapters (live, recording,
/// replaying); output always goes through the given filesystem.
pub struct ServiceContext {
    /// Repository host the gatherer reads from.
    pub host: Box<dyn RepoHost>,
    /// Filesystem the rendered document is written to.
    pub fs: Box<dyn FileSystem>,
    /// Recorder shared with a recording host; flushed on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(host: Box<dyn RepoHost>, fs: Box<dyn FileSystem>) -> Self {
        Self { host, fs, recorder: None }
    }

    /// Creates a live context talking to the configured API.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self::new(
            Box::new(LiveGitHub::new(config.api_url.clone(), config.token.clone())),
            Box::new(LiveFileSystem),
        )
    }

    /// Creates a live context that also records every host call.
    ///
    /// The cassette is written to `path` when this context is dropped,
    /// whether or not the run succeeded.
    #[must_use]
    pub fn recording(config: &Config, path: &Path, repository: &str) -> Self {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("readmegen-{repository}"),
            repository,
        )));
        let live = Box::new(LiveGitHub::new(config.api_url.clone(), config.token.clone()));
        Self {
            host: Box::new(RecordingRepoHost::new(live, Arc::clone(&recorder))),
            fs: Box::new(LiveFileSystem),
            recorder: Some(recorder),
        }
    }

    /// Creates a context that serves host calls from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        Ok(Self::new(
            Box::new(ReplayingRepoHost::new(CassetteReplayer::new(&cassette))),
            Box::new(LiveFileSystem),
        ))
    }

    /// Picks replaying, recording, or live wiring from `config`.
    ///
    /// Replay takes precedence over recording.
    ///
    /// # Errors
    ///
    /// Returns an error if a replay cassette cannot be loaded.
    pub fn from_config(config: &Config, repository: &str) -> Result<Self, String> {
        if let Some(path) = &config.replay {
            tracing::info!(cassette = %path.display(), "replaying host interactions");
            return Self::replaying(path);
        }
        if let Some(path) = &config.record {
            tracing::info!(cassette = %path.display(), "recording host interactions");
            return Ok(Self::recording(config, path, repository));
        }
        Ok(Self::live(config))
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        let Ok(mut recorder) = recorder.lock() else {
            tracing::warn!("cassette recorder lock poisoned; nothing written");
            return;
        };
        match recorder.finish() {
            Ok(path) => eprintln!("Recording saved to: {}", path.display()),
            Err(e) => tracing::warn!("failed to write cassette: {e}"),
        }
    }
}
