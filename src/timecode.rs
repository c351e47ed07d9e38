use std::fmt;

// @module: SRT clock formatting

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Media offset at millisecond resolution, rendered as `HH:MM:SS,mmm`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SrtTimestamp {
    millis: u64,
}

impl SrtTimestamp {
    /// Creates a timestamp from a whole number of milliseconds
    pub fn from_millis(millis: u64) -> Self {
        SrtTimestamp { millis }
    }

    /// Creates a timestamp from fractional seconds.
    ///
    /// The offset is first resolved to whole microseconds, then truncated to
    /// milliseconds, so representation noise such as `10.2` or `5.999999999994`
    /// lands on `10,200` and `06,000` instead of `10,199` or a `1000` ms field.
    /// Negative and non-finite input saturates to zero.
    pub fn from_seconds(seconds: f64) -> Self {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Self::default();
        }

        // `as` saturates at u64::MAX for absurdly large offsets
        let micros = (seconds * MICROS_PER_SECOND).round_ties_even() as u64;
        SrtTimestamp { millis: micros / 1_000 }
    }

    /// Total milliseconds
    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    pub fn hours(&self) -> u64 {
        self.millis / 3_600_000
    }

    pub fn minutes(&self) -> u64 {
        (self.millis % 3_600_000) / 60_000
    }

    pub fn seconds(&self) -> u64 {
        (self.millis % 60_000) / 1_000
    }

    pub fn subsec_millis(&self) -> u64 {
        self.millis % 1_000
    }
}

impl fmt::Display for SrtTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Hours are not capped at 24 or 99
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.subsec_millis()
        )
    }
}

/// Format a timestamp in seconds to SRT format (HH:MM:SS,mmm)
pub fn format_time(seconds: f64) -> String {
    SrtTimestamp::from_seconds(seconds).to_string()
}
