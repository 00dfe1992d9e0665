//! Integration module for connecting object detection backends with the tracker.
//!
//! Detection itself happens elsewhere; this module only defines the seam a
//! detector plugs into and a pipeline that feeds its output to a
//! [`TrackRegistry`](crate::tracker::TrackRegistry).

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::TrackerPipeline;
