//! Directory-change-driven refresh pipeline.
//!
//! Raw watch signals never act immediately: each one schedules an attempt a
//! settle delay later, coalescing the event bursts a single file save can
//! produce. The attempt itself re-reads the config, reloads and scales the
//! image, and applies the acceptance debounce before shifting the history.
//! Deadlines are never cancelled; a redundant attempt is filtered by the
//! debounce, not by unscheduling.

use std::path::PathBuf;
use std::time::Instant;

use image::imageops::FilterType;
use tracing::{debug, info};

use crate::config::{self, ConfigError, ViewConfig};
use crate::constants::{timing, view};
use crate::history::{Frame, FrameHistory};

/// Outcome of a single refresh attempt. Only `Accepted` mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new frame was decoded and pushed into the history.
    Accepted,
    /// Image file absent or not decodable; treated as a write still in
    /// progress and abandoned without touching the history.
    ImageNotReady,
    /// Too close to the previously accepted refresh.
    Debounced,
}

pub struct RefreshController {
    config_path: PathBuf,
    /// Latest successfully loaded config; geometry and layout read from here.
    config: Option<ViewConfig>,
    history: FrameHistory,
    /// Scheduled refresh deadlines, one per raw directory signal.
    pending: Vec<Instant>,
    /// Timestamp of the last accepted refresh, the debounce reference point.
    last_accepted: Option<Instant>,
    /// Bumped on every accepted refresh so the shell knows to re-upload
    /// textures.
    generation: u64,
}

impl RefreshController {
    pub fn new(config_path: PathBuf, now: Instant) -> Self {
        Self {
            config_path,
            config: None,
            history: FrameHistory::new(view::HISTORY_CAPACITY),
            // One unconditional refresh shortly after startup, once the
            // window has finished construction.
            pending: vec![now + timing::STARTUP_DELAY],
            last_accepted: None,
            generation: 0,
        }
    }

    /// Schedule a refresh attempt one settle delay after a raw directory
    /// signal.
    pub fn schedule(&mut self, now: Instant) {
        debug!("directory changed, scheduling refresh");
        self.pending.push(now + timing::SETTLE_DELAY);
    }

    /// Fire every refresh attempt whose deadline has passed. A config
    /// failure is fatal and aborts the remaining attempts.
    pub fn poll(&mut self, now: Instant) -> Result<(), ConfigError> {
        while let Some(idx) = self.pending.iter().position(|deadline| *deadline <= now) {
            self.pending.swap_remove(idx);
            self.attempt(now)?;
        }
        Ok(())
    }

    /// One refresh attempt: re-read the config, reload the image, debounce,
    /// shift the history.
    pub fn attempt(&mut self, now: Instant) -> Result<RefreshOutcome, ConfigError> {
        let config = config::load(&self.config_path)?;
        // Keep the config even when the image is not ready; window geometry
        // follows the file immediately.
        self.config = Some(config.clone());

        if !config.image_path.exists() {
            debug!(image = %config.image_path.display(), "image missing, refresh abandoned");
            return Ok(RefreshOutcome::ImageNotReady);
        }
        let decoded = match image::open(&config.image_path) {
            Ok(decoded) => decoded,
            Err(err) => {
                debug!(
                    image = %config.image_path.display(),
                    "image not decodable, refresh abandoned: {err}"
                );
                return Ok(RefreshOutcome::ImageNotReady);
            }
        };
        let (width, height) = config.image_size;
        // Non-uniform scale to the configured size; aspect ratio is ignored.
        let scaled = decoded.resize_exact(width, height, FilterType::Triangle).to_rgba8();

        if let Some(last) = self.last_accepted {
            if now.duration_since(last) < timing::MIN_REFRESH_INTERVAL {
                debug!("refresh canceled, interval below the debounce floor");
                return Ok(RefreshOutcome::Debounced);
            }
        }

        self.history.push_front(Frame { image: scaled });
        self.last_accepted = Some(now);
        self.generation += 1;
        info!(frames = self.history.len(), "accepted refresh");
        Ok(RefreshOutcome::Accepted)
    }

    pub fn config(&self) -> Option<&ViewConfig> {
        self.config.as_ref()
    }

    pub fn history(&self) -> &FrameHistory {
        &self.history
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn watch_dir(&self) -> Option<PathBuf> {
        self.config.as_ref().map(ViewConfig::watch_dir)
    }

    /// Earliest pending deadline, for scheduling the next GUI wakeup.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().min().copied()
    }
}
