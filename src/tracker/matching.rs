//! Matching utilities for multi-object tracking.

use nalgebra::{Point2, Vector2};
use ndarray::Array2;

use crate::tracker::rect::Rect;
use crate::tracker::track::{ObjectId, Track};

/// Detection input for the tracker.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Detection {
    /// Class label reported by the detector
    pub label: String,
    /// Detection confidence score
    pub confidence: f64,
    /// Bounding box in TLWH format
    pub bbox: Rect,
}

impl Detection {
    pub fn new(label: impl Into<String>, confidence: f64, bbox: Rect) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox,
        }
    }

    pub fn from_tlbr(
        label: impl Into<String>,
        confidence: f64,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    ) -> Self {
        Self::new(label, confidence, Rect::from_tlbr(x1, y1, x2, y2))
    }
}

/// Detection confirmed by the tracker, tagged with a persistent identity.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StableDetection {
    pub object_id: ObjectId,
    #[serde(flatten)]
    pub detection: Detection,
}

impl StableDetection {
    pub fn new(object_id: ObjectId, detection: Detection) -> Self {
        Self {
            object_id,
            detection,
        }
    }

    pub fn label(&self) -> &str {
        &self.detection.label
    }

    pub fn confidence(&self) -> f64 {
        self.detection.confidence
    }

    pub fn bbox(&self) -> Rect {
        self.detection.bbox
    }
}

/// Length of the frame diagonal in pixels.
pub fn frame_diagonal(width: u32, height: u32) -> f64 {
    Vector2::new(f64::from(width), f64::from(height)).norm()
}

/// Distance between two box centers as a percentage of the frame diagonal.
pub fn distance_percentage(a: &Rect, b: &Rect, diagonal: f64) -> f64 {
    let (ax, ay) = a.center();
    let (bx, by) = b.center();
    let current = nalgebra::distance(
        &Point2::new(ax as f64, ay as f64),
        &Point2::new(bx as f64, by as f64),
    );
    100.0 * current / diagonal
}

/// Symmetric difference between two box areas, in percent of the larger one.
pub fn size_difference_percentage(a: &Rect, b: &Rect) -> f64 {
    let area_a = a.area();
    let area_b = b.area();
    if area_a == area_b {
        return 0.0;
    }
    let (small, large) = if area_a < area_b {
        (area_a, area_b)
    } else {
        (area_b, area_a)
    };
    100.0 - 100.0 * small as f64 / large as f64
}

/// Per-frame scores between existing tracks (rows) and detections (columns).
#[derive(Debug, Clone)]
pub struct MatchScores {
    pub distance: Array2<f64>,
    pub size_difference: Array2<f64>,
}

impl MatchScores {
    pub fn num_tracks(&self) -> usize {
        self.distance.nrows()
    }

    pub fn num_detections(&self) -> usize {
        self.distance.ncols()
    }
}

/// Compute distance and size-difference matrices between tracks and detections.
pub fn score_matrices(tracks: &[Track], detections: &[Detection], diagonal: f64) -> MatchScores {
    let shape = (tracks.len(), detections.len());
    let mut distance = Array2::zeros(shape);
    let mut size_difference = Array2::zeros(shape);
    for (i, t) in tracks.iter().enumerate() {
        for (j, d) in detections.iter().enumerate() {
            distance[[i, j]] = distance_percentage(&t.bbox, &d.bbox, diagonal);
            size_difference[[i, j]] = size_difference_percentage(&t.bbox, &d.bbox);
        }
    }
    MatchScores {
        distance,
        size_difference,
    }
}

/// Admission limits a track must satisfy to be considered for a detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchGate {
    /// Inclusive upper bound on center distance, percent of frame diagonal
    pub max_distance_pct: f64,
    /// Exclusive upper bound on area difference, percent
    pub max_size_difference_pct: f64,
}

impl MatchGate {
    #[inline]
    pub fn admits(&self, distance: f64, size_difference: f64) -> bool {
        distance <= self.max_distance_pct && size_difference < self.max_size_difference_pct
    }
}

/// Greedily pick the closest admissible, unclaimed track for one detection.
///
/// `tracks` and `claimed` are indexed like the score rows. Equal distances
/// prefer the most recently seen track, then the earlier row.
pub fn select_best(
    scores: &MatchScores,
    detection: usize,
    tracks: &[Track],
    claimed: &[bool],
    gate: &MatchGate,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for row in 0..scores.num_tracks() {
        if claimed[row] {
            continue;
        }
        let distance = scores.distance[[row, detection]];
        let size_difference = scores.size_difference[[row, detection]];
        if !gate.admits(distance, size_difference) {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_row, best_distance)) => match distance.total_cmp(&best_distance) {
                std::cmp::Ordering::Less => true,
                std::cmp::Ordering::Equal => {
                    tracks[row].last_seen_frame > tracks[best_row].last_seen_frame
                }
                std::cmp::Ordering::Greater => false,
            },
        };
        if better {
            best = Some((row, distance));
        }
    }
    best.map(|(row, _)| row)
}
