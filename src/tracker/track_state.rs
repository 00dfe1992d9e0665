/// Lifecycle state of a track, derived from its tracking confidence and staleness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum TrackState {
    /// Seen recently but not yet above the confirmation threshold
    #[default]
    Tentative,
    /// Tracking confidence has reached the confirmation threshold
    Confirmed,
    /// Not matched within the staleness window; no longer eligible for matching
    Stale,
}

impl TrackState {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}
