//! Seam between an upstream detector and the track registry.

use crate::tracker::Detection;

/// A detector that yields one batch of detections per video frame.
///
/// The pipeline calls `detect` once per frame, in frame order, always with the
/// frame size its registry was built for. Every returned box must be in whole
/// pixels of that `width` x `height` frame, because match distances are
/// normalized by its diagonal. Detectors producing float boxes can convert
/// them with [`DetectionBuilder`](super::DetectionBuilder).
///
/// # Example
///
/// ```ignore
/// use stabletrack_rs::{Detection, DetectionBuilder, DetectionSource};
///
/// struct YoloDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for YoloDetector {
///     type Error = std::io::Error;
///
///     fn detect(
///         &mut self,
///         input: &[u8],
///         width: u32,
///         height: u32,
///     ) -> Result<Vec<Detection>, Self::Error> {
///         let boxes: Vec<(String, f64, [f32; 4])> = run_model(input, width, height)?;
///         Ok(boxes
///             .into_iter()
///             .map(|(label, score, [x1, y1, x2, y2])| {
///                 DetectionBuilder::new()
///                     .tlbr(x1, y1, x2, y2)
///                     .label(label)
///                     .confidence(score)
///                     .build()
///             })
///             .collect())
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures. A failed frame is not fed to the registry.
    type Error;

    /// Detect objects in one frame of raw image bytes.
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

/// Conversion from a detector's native output into one frame's detection batch.
pub trait IntoDetections {
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

impl IntoDetections for &[Detection] {
    fn into_detections(self) -> Vec<Detection> {
        self.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Rect;

    #[test]
    fn test_slice_into_detections() {
        let dets = [
            Detection::new("car", 0.9, Rect::new(0, 0, 10, 10)),
            Detection::new("bus", 0.4, Rect::new(20, 0, 30, 10)),
        ];
        let batch = dets.as_slice().into_detections();
        assert_eq!(batch, dets.to_vec());
    }
}
