//! TrackerPipeline for combining detection with tracking.

use crate::error::Result;
use crate::tracker::{StableDetection, TrackRegistry, TrackerConfig};

use super::{DetectionSource, IntoDetections};

/// A combined tracker that bundles detection inference with a `TrackRegistry`.
///
/// The frame size is fixed at construction; every frame is handed to the
/// detector with those dimensions. A resolution change needs a new pipeline.
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    tracker: TrackRegistry,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new tracking pipeline with the given detector and tracker config.
    pub fn new(detector: D, width: u32, height: u32, config: TrackerConfig) -> Result<Self> {
        Ok(Self {
            detector,
            tracker: TrackRegistry::with_config(width, height, config)?,
        })
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(detector: D, width: u32, height: u32) -> Result<Self> {
        Self::new(detector, width, height, TrackerConfig::default())
    }

    /// Run detection on one frame of raw image bytes and track the result.
    pub fn process_frame(
        &mut self,
        input: &[u8],
    ) -> std::result::Result<Vec<StableDetection>, D::Error> {
        let (width, height) = self.tracker.frame_size();
        let detections = self.detector.detect(input, width, height)?;
        Ok(self.tracker.analyse(&detections))
    }

    /// Track detections produced outside the bundled detector.
    pub fn process_detections<O: IntoDetections>(&mut self, output: O) -> Vec<StableDetection> {
        self.tracker.analyse(&output.into_detections())
    }

    /// Start a new stream: forget all tracks and identities.
    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &TrackRegistry {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut TrackRegistry {
        &mut self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{Detection, Rect};

    struct MockDetector {
        detections: Vec<Detection>,
        seen_sizes: Vec<(u32, u32)>,
    }

    impl DetectionSource for MockDetector {
        type Error = std::convert::Infallible;

        fn detect(
            &mut self,
            _input: &[u8],
            width: u32,
            height: u32,
        ) -> std::result::Result<Vec<Detection>, Self::Error> {
            self.seen_sizes.push((width, height));
            Ok(self.detections.clone())
        }
    }

    struct FailingDetector;

    impl DetectionSource for FailingDetector {
        type Error = String;

        fn detect(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> std::result::Result<Vec<Detection>, Self::Error> {
            Err("model not loaded".to_string())
        }
    }

    #[test]
    fn test_tracker_pipeline() {
        let detector = MockDetector {
            detections: vec![Detection::new("car", 0.9, Rect::new(10, 20, 40, 60))],
            seen_sizes: Vec::new(),
        };

        let mut pipeline = TrackerPipeline::with_default_config(detector, 640, 480).unwrap();

        // First frame only creates tracks.
        assert!(pipeline.process_frame(&[]).unwrap().is_empty());
        for _ in 0..3 {
            assert!(pipeline.process_frame(&[]).unwrap().is_empty());
        }
        let stable = pipeline.process_frame(&[]).unwrap();
        assert_eq!(stable.len(), 1);
        assert_eq!(stable[0].object_id.to_string(), "O00001");

        assert_eq!(pipeline.detector().seen_sizes, vec![(640, 480); 5]);
        assert_eq!(pipeline.tracker().frame_index(), 5);
    }

    #[test]
    fn test_pipeline_propagates_detector_error() {
        let mut pipeline = TrackerPipeline::with_default_config(FailingDetector, 640, 480).unwrap();
        assert_eq!(pipeline.process_frame(&[]).unwrap_err(), "model not loaded");
        assert_eq!(pipeline.tracker().frame_index(), 0);
    }

    #[test]
    fn test_process_detections_and_reset() {
        let detector = MockDetector {
            detections: Vec::new(),
            seen_sizes: Vec::new(),
        };
        let mut pipeline = TrackerPipeline::with_default_config(detector, 640, 480).unwrap();
        let dets = vec![Detection::new("car", 0.9, Rect::new(10, 20, 40, 60))];
        pipeline.process_detections(dets.clone());
        assert_eq!(pipeline.tracker().len(), 1);

        pipeline.reset();
        assert!(pipeline.tracker().is_empty());
        pipeline.process_detections(dets);
        assert_eq!(
            pipeline.tracker().tracks().next().map(|t| t.object_id.to_string()),
            Some("O00001".to_string())
        );
    }

    #[test]
    fn test_pipeline_rejects_zero_frame() {
        let detector = MockDetector {
            detections: Vec::new(),
            seen_sizes: Vec::new(),
        };
        assert!(TrackerPipeline::with_default_config(detector, 0, 0).is_err());
    }
}
