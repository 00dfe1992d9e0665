//! Single tracked object and its identity.

use std::fmt;

use crate::tracker::matching::Detection;
use crate::tracker::rect::Rect;
use crate::tracker::registry::TrackerConfig;
use crate::tracker::track_state::TrackState;

/// Upper clamp for [`Track::tracking_confidence`].
pub const MAX_TRACKING_CONFIDENCE: u8 = 100;

/// Persistent identity of a tracked object.
///
/// The numeric value is the identity; `Display` renders it as `O00042`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl ObjectId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O{:05}", self.0)
    }
}

/// Tracker-side record of one physical object.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Unique object identifier
    pub object_id: ObjectId,
    /// Class label of the most recent matching detection
    pub label: String,
    /// Detection confidence of the most recent matching detection
    pub confidence: f64,
    /// Last observed bounding box
    pub bbox: Rect,
    /// Match-streak strength in `[0, 100]`
    pub tracking_confidence: u8,
    /// Frame index at which the track was created
    pub first_seen_frame: u64,
    /// Frame index at which the track was last matched
    pub last_seen_frame: u64,
    /// Number of detections matched to this track after creation
    pub hits: u32,
}

impl Track {
    /// Create a new track from the detection that could not be matched.
    pub fn new(object_id: ObjectId, detection: &Detection, frame: u64) -> Self {
        Self {
            object_id,
            label: detection.label.clone(),
            confidence: detection.confidence,
            bbox: detection.bbox,
            tracking_confidence: 0,
            first_seen_frame: frame,
            last_seen_frame: frame,
            hits: 0,
        }
    }

    /// Absorb a matched detection and strengthen the track.
    pub fn update(&mut self, detection: &Detection, frame: u64, step: u8) {
        self.label.clone_from(&detection.label);
        self.confidence = detection.confidence;
        self.bbox = detection.bbox;
        self.last_seen_frame = frame;
        self.hits = self.hits.saturating_add(1);
        self.increase_tracking_confidence(step);
    }

    pub fn increase_tracking_confidence(&mut self, step: u8) {
        self.tracking_confidence = self
            .tracking_confidence
            .saturating_add(step)
            .min(MAX_TRACKING_CONFIDENCE);
    }

    pub fn decrease_tracking_confidence(&mut self, step: u8) {
        self.tracking_confidence = self.tracking_confidence.saturating_sub(step);
    }

    /// Whether the track was last matched more than `window` frames before `frame`.
    #[inline]
    pub fn is_stale(&self, frame: u64, window: u64) -> bool {
        self.last_seen_frame.saturating_add(window) < frame
    }

    pub fn seen_at(&self, frame: u64) -> bool {
        self.last_seen_frame == frame
    }

    pub fn state(&self, frame: u64, config: &TrackerConfig) -> TrackState {
        if self.is_stale(frame, config.stale_after_frames) {
            TrackState::Stale
        } else if self.tracking_confidence >= config.confirm_threshold {
            TrackState::Confirmed
        } else {
            TrackState::Tentative
        }
    }
}
