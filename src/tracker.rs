mod matching;
mod rect;
mod registry;
mod track;
mod track_state;

pub use matching::{
    Detection, MatchGate, MatchScores, StableDetection, distance_percentage, frame_diagonal,
    score_matrices, select_best, size_difference_percentage,
};
pub use rect::Rect;
pub use registry::{TrackRegistry, TrackerConfig};
pub use track::{MAX_TRACKING_CONFIDENCE, ObjectId, Track};
pub use track_state::TrackState;
