//! Annotation data types.

/// One labeled time-frequency box drawn over a recording's spectrogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Start of the annotated interval in seconds from recording start.
    pub begin_time: f64,
    /// End of the annotated interval in seconds from recording start.
    pub end_time: f64,
    /// Lower frequency bound in Hz, when the table carries one.
    pub low_freq: Option<f64>,
    /// Upper frequency bound in Hz, when the table carries one.
    pub high_freq: Option<f64>,
    /// Class label, normalized to lowercase.
    pub label: String,
}

impl Annotation {
    /// Length of temporal overlap with the half-open interval
    /// `[start, end)`, in seconds. Zero when disjoint.
    pub fn overlap_with(&self, start: f64, end: f64) -> f64 {
        (self.end_time.min(end) - self.begin_time.max(start)).max(0.0)
    }
}
