/// Integer bounding box in frame pixel coordinates.
///
/// Supports two common bounding box formats:
/// - TLWH: Top-Left X, Top-Left Y, Width, Height
/// - TLBR: Top-Left X, Top-Left Y, Bottom-Right X, Bottom-Right Y
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: i32,
    /// Top-left y coordinate
    pub y: i32,
    /// Width of the bounding box
    pub width: i32,
    /// Height of the bounding box
    pub height: i32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2.saturating_sub(x1),
            height: y2.saturating_sub(y1),
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2). Corners saturate at the `i32` range.
    #[inline]
    pub fn to_tlbr(&self) -> [i32; 4] {
        [
            self.x,
            self.y,
            self.x.saturating_add(self.width),
            self.y.saturating_add(self.height),
        ]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [i32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Center point of the bounding box, rounded toward zero.
    ///
    /// Computed in 64-bit so boxes near the `i32` limits still score.
    #[inline]
    pub fn center(&self) -> (i64, i64) {
        (
            i64::from(self.x) + i64::from(self.width / 2),
            i64::from(self.y) + i64::from(self.height / 2),
        )
    }

    /// Area of the bounding box. Negative extents count as zero.
    #[inline]
    pub fn area(&self) -> i64 {
        i64::from(self.width.max(0)) * i64::from(self.height.max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_conversions() {
        let rect = Rect::new(10, 20, 30, 40);

        // TLWH
        assert_eq!(rect.to_tlwh(), [10, 20, 30, 40]);

        // TLBR
        assert_eq!(rect.to_tlbr(), [10, 20, 40, 60]);
    }

    #[test]
    fn test_from_tlbr() {
        let rect = Rect::from_tlbr(10, 20, 40, 60);
        assert_eq!(rect.to_tlwh(), [10, 20, 30, 40]);
    }

    #[test]
    fn test_center_truncates() {
        let rect = Rect::new(0, 0, 5, 7);
        assert_eq!(rect.center(), (2, 3));

        let rect = Rect::new(100, 50, 20, 10);
        assert_eq!(rect.center(), (110, 55));
    }

    #[test]
    fn test_area() {
        assert_eq!(Rect::new(0, 0, 30, 40).area(), 1200);
        assert_eq!(Rect::new(0, 0, 0, 40).area(), 0);
        assert_eq!(Rect::new(0, 0, -3, 40).area(), 0);
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let rect = Rect::new(i32::MAX - 1, i32::MIN + 1, 10, 10);
        assert_eq!(
            rect.center(),
            (i64::from(i32::MAX) + 4, i64::from(i32::MIN) + 6)
        );
        assert_eq!(rect.to_tlbr()[2], i32::MAX);

        let rect = Rect::from_tlbr(i32::MAX, 0, i32::MIN, 10);
        assert_eq!(rect.width, i32::MIN);
        assert_eq!(rect.area(), 0);
    }

    #[test]
    fn test_area_does_not_overflow() {
        let rect = Rect::new(0, 0, 100_000, 100_000);
        assert_eq!(rect.area(), 10_000_000_000);
    }
}
