//! Greedy nearest-neighbour multi-object tracker.
//!
//! [`TrackRegistry`] turns per-frame detections into detections tagged with
//! a stable [`ObjectId`], emitting a track only after it has been matched on
//! enough consecutive frames.

pub mod error;
pub mod integration;
pub mod tracker;

pub use error::TrackError;
pub use integration::{DetectionBuilder, DetectionSource, IntoDetections, TrackerPipeline};
pub use tracker::{
    Detection, ObjectId, Rect, StableDetection, Track, TrackRegistry, TrackState, TrackerConfig,
};
