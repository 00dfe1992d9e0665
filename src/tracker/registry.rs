//! Track registry: greedy association, confidence hysteresis and identity lifecycle.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{Result, TrackError};
use crate::tracker::matching::{self, Detection, MatchGate, StableDetection};
use crate::tracker::track::{MAX_TRACKING_CONFIDENCE, ObjectId, Track};
use crate::tracker::track_state::TrackState;

/// Configuration for the TrackRegistry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Max center distance for a match, percent of the frame diagonal (inclusive)
    pub max_distance_pct: f64,
    /// Max area difference for a match, percent (exclusive)
    pub max_size_difference_pct: f64,
    /// Frames after the last match beyond which a track can no longer be matched
    pub stale_after_frames: u64,
    /// Tracking confidence at which a track is emitted
    pub confirm_threshold: u8,
    /// Tracking confidence gained per match
    pub confirm_step: u8,
    /// Tracking confidence lost per frame without a match
    pub decay_step: u8,
    /// Drop tracks that are stale and have no tracking confidence left
    pub evict_expired: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_distance_pct: 15.0,
            max_size_difference_pct: 30.0,
            stale_after_frames: 25,
            confirm_threshold: 60,
            confirm_step: 15,
            decay_step: 5,
            evict_expired: false,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.max_distance_pct.is_finite() && self.max_distance_pct > 0.0) {
            return Err(TrackError::config(format!(
                "max_distance_pct must be finite and positive, got {}",
                self.max_distance_pct
            )));
        }
        if !(self.max_size_difference_pct.is_finite() && self.max_size_difference_pct > 0.0) {
            return Err(TrackError::config(format!(
                "max_size_difference_pct must be finite and positive, got {}",
                self.max_size_difference_pct
            )));
        }
        if self.confirm_threshold == 0 || self.confirm_threshold >= MAX_TRACKING_CONFIDENCE {
            return Err(TrackError::config(format!(
                "confirm_threshold must be in 1..{MAX_TRACKING_CONFIDENCE}, got {}",
                self.confirm_threshold
            )));
        }
        if self.confirm_step == 0 {
            return Err(TrackError::config("confirm_step must be non-zero"));
        }
        Ok(())
    }

    /// Number of consecutive matches after creation needed before a track is emitted.
    pub fn matches_to_confirm(&self) -> u32 {
        u32::from(self.confirm_threshold).div_ceil(u32::from(self.confirm_step.max(1)))
    }

    pub fn gate(&self) -> MatchGate {
        MatchGate {
            max_distance_pct: self.max_distance_pct,
            max_size_difference_pct: self.max_size_difference_pct,
        }
    }
}

/// Owns every known track of one video stream.
///
/// `analyse` must be called once per frame, in frame order, by a single caller.
#[derive(Debug, Clone)]
pub struct TrackRegistry {
    tracks: Vec<Track>,
    index: HashMap<ObjectId, usize>,
    frame_id: u64,
    next_id: u64,
    width: u32,
    height: u32,
    diagonal: f64,
    config: TrackerConfig,
}

impl TrackRegistry {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_config(width, height, TrackerConfig::default())
    }

    pub fn with_config(width: u32, height: u32, config: TrackerConfig) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TrackError::InvalidFrameSize { width, height });
        }
        config.validate()?;
        Ok(Self {
            tracks: Vec::new(),
            index: HashMap::new(),
            frame_id: 0,
            next_id: 0,
            width,
            height,
            diagonal: matching::frame_diagonal(width, height),
            config,
        })
    }

    /// Forget every track and restart frame and identity counters.
    pub fn reset(&mut self) {
        debug!(
            frame = self.frame_id,
            tracks = self.tracks.len(),
            "resetting track registry"
        );
        self.tracks.clear();
        self.index.clear();
        self.frame_id = 0;
        self.next_id = 0;
    }

    /// Advance one frame and return the detections of confirmed tracks.
    pub fn analyse(&mut self, detections: &[Detection]) -> Vec<StableDetection> {
        self.frame_id += 1;
        let frame = self.frame_id;

        if self.tracks.is_empty() {
            for det in detections {
                self.spawn(det, frame);
            }
            return Vec::new();
        }

        // Tracks spawned below are appended past `existing` and never scored this frame.
        let existing = self.tracks.len();
        let scores = matching::score_matrices(&self.tracks, detections, self.diagonal);
        let gate = self.config.gate();
        let mut claimed = vec![false; existing];
        let mut stable = Vec::new();

        for (idet, det) in detections.iter().enumerate() {
            let best =
                matching::select_best(&scores, idet, &self.tracks[..existing], &claimed, &gate);
            let Some(row) = best.filter(|&row| {
                !self.tracks[row].is_stale(frame, self.config.stale_after_frames)
            }) else {
                self.spawn(det, frame);
                continue;
            };

            claimed[row] = true;
            let track = &mut self.tracks[row];
            track.update(det, frame, self.config.confirm_step);
            trace!(
                object_id = %track.object_id,
                frame,
                distance_pct = scores.distance[[row, idet]],
                size_difference_pct = scores.size_difference[[row, idet]],
                tracking_confidence = track.tracking_confidence,
                "matched detection"
            );

            if track.tracking_confidence >= self.config.confirm_threshold {
                stable.push(StableDetection::new(track.object_id, det.clone()));
            }
        }

        for track in self.tracks.iter_mut().filter(|t| !t.seen_at(frame)) {
            track.decrease_tracking_confidence(self.config.decay_step);
        }

        if self.config.evict_expired {
            self.evict_expired(frame);
        }

        stable
    }

    fn spawn(&mut self, detection: &Detection, frame: u64) -> ObjectId {
        let object_id = self.next_object_id();
        debug!(%object_id, frame, label = %detection.label, "new track");
        self.index.insert(object_id, self.tracks.len());
        self.tracks.push(Track::new(object_id, detection, frame));
        object_id
    }

    fn next_object_id(&mut self) -> ObjectId {
        self.next_id += 1;
        ObjectId(self.next_id)
    }

    fn evict_expired(&mut self, frame: u64) {
        let window = self.config.stale_after_frames;
        let before = self.tracks.len();
        self.tracks
            .retain(|t| !(t.tracking_confidence == 0 && t.is_stale(frame, window)));
        if self.tracks.len() != before {
            debug!(frame, evicted = before - self.tracks.len(), "evicted expired tracks");
            self.index = self
                .tracks
                .iter()
                .enumerate()
                .map(|(i, t)| (t.object_id, i))
                .collect();
        }
    }

    /// Number of frames analysed since construction or the last reset.
    pub fn frame_index(&self) -> u64 {
        self.frame_id
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// All tracks in creation order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn track(&self, object_id: &ObjectId) -> Option<&Track> {
        self.index.get(object_id).map(|&i| &self.tracks[i])
    }

    pub fn track_state(&self, object_id: &ObjectId) -> Option<TrackState> {
        self.track(object_id)
            .map(|t| t.state(self.frame_id, &self.config))
    }

    /// Frame (width, height) the registry normalizes distances against.
    pub fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}
