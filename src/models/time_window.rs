//! Time window type.

/// A time window constraint for service at a node.
///
/// The vehicle must arrive no later than `latest` and no earlier than
/// `earliest`. Arriving early means waiting at the previous stop, bounded by
/// the time dimension's slack.
///
/// # Examples
///
/// ```
/// use vrp_engine::models::TimeWindow;
///
/// let tw = TimeWindow::new(100, 200).unwrap();
/// assert!(tw.earliest() <= tw.latest());
/// assert!(tw.contains(150));
/// assert!(!tw.contains(250));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    earliest: i64,
    latest: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `earliest > latest`.
    pub fn new(earliest: i64, latest: i64) -> Option<Self> {
        if earliest > latest {
            return None;
        }
        Some(Self { earliest, latest })
    }

    /// The window used when none is given: `[0, +∞)`.
    pub fn unbounded() -> Self {
        Self {
            earliest: 0,
            latest: i64::MAX,
        }
    }

    /// Earliest allowable arrival time.
    pub fn earliest(&self) -> i64 {
        self.earliest
    }

    /// Latest allowable arrival time.
    pub fn latest(&self) -> i64 {
        self.latest
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: i64) -> bool {
        time >= self.earliest && time <= self.latest
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::unbounded()
    }
}
