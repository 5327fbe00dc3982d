/*!
    Clock time and rational number types.
*/

use std::fmt;
use std::ops::{Add, AddAssign};

/**
    A point in stream time, or a span of it, in nanoseconds.

    Streams deliver timestamps that may simply be absent; absence is modeled
    as `Option<ClockTime>` rather than a sentinel value.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u64);

impl ClockTime {
    /// Zero nanoseconds.
    pub const ZERO: ClockTime = ClockTime(0);
    /// One second.
    pub const SECOND: ClockTime = ClockTime(1_000_000_000);
    /// One millisecond.
    pub const MSECOND: ClockTime = ClockTime(1_000_000);

    /**
        Create a clock time from nanoseconds.
    */
    pub const fn from_nanos(nanos: u64) -> Self {
        ClockTime(nanos)
    }

    /**
        Create a clock time from whole seconds.
    */
    pub const fn from_secs(secs: u64) -> Self {
        ClockTime(secs * Self::SECOND.0)
    }

    /**
        Nanoseconds since the stream time origin.
    */
    pub const fn nanos(self) -> u64 {
        self.0
    }

    /**
        Seconds as a float, for display and rough comparisons.
    */
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / Self::SECOND.0 as f64
    }

    /**
        Duration of `count` audio sample frames at `rate` Hz.

        Returns `None` for a zero rate.
    */
    pub fn from_sample_frames(count: u64, rate: u32) -> Option<ClockTime> {
        if rate == 0 {
            return None;
        }
        Some(ClockTime(count * Self::SECOND.0 / rate as u64))
    }

    /**
        Duration of one video frame at the given frame rate.

        Returns `None` when the rate is missing or degenerate.
    */
    pub fn from_frame_rate(rate: Rational) -> Option<ClockTime> {
        if rate.num <= 0 || rate.den <= 0 {
            return None;
        }
        Some(ClockTime(
            Self::SECOND.0 * rate.den as u64 / rate.num as u64,
        ))
    }
}

impl Add for ClockTime {
    type Output = ClockTime;

    fn add(self, rhs: ClockTime) -> ClockTime {
        ClockTime(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for ClockTime {
    fn add_assign(&mut self, rhs: ClockTime) {
        *self = *self + rhs;
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0 / Self::SECOND.0;
        let nanos = self.0 % Self::SECOND.0;
        write!(f, "{}.{:09}", secs, nanos)
    }
}

/**
    A rational number, used for frame rates and aspect ratios.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    /// Numerator.
    pub num: i32,
    /// Denominator.
    pub den: i32,
}

impl Rational {
    /**
        Create a new rational.
    */
    pub const fn new(num: i32, den: i32) -> Self {
        Rational { num, den }
    }

    /**
        Value as a float. Returns 0.0 for a zero denominator.
    */
    pub fn to_f64(self) -> f64 {
        if self.den == 0 {
            return 0.0;
        }
        self.num as f64 / self.den as f64
    }

    /**
        True when both terms are positive, i.e. the rational describes an
        actual rate or ratio.
    */
    pub const fn is_positive(self) -> bool {
        self.num > 0 && self.den > 0
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_add_and_display() {
        let t = ClockTime::from_secs(1) + ClockTime::MSECOND;
        assert_eq!(t.nanos(), 1_001_000_000);
        assert_eq!(t.to_string(), "1.001000000");
    }

    #[test]
    fn clock_time_from_sample_frames() {
        // 480 sample frames at 48 kHz is exactly 10 ms.
        let d = ClockTime::from_sample_frames(480, 48_000).unwrap();
        assert_eq!(d, ClockTime::MSECOND + ClockTime::from_nanos(9_000_000));
        assert_eq!(ClockTime::from_sample_frames(480, 0), None);
    }

    #[test]
    fn clock_time_from_frame_rate() {
        let d = ClockTime::from_frame_rate(Rational::new(25, 1)).unwrap();
        assert_eq!(d.nanos(), 40_000_000);
        assert_eq!(ClockTime::from_frame_rate(Rational::new(0, 1)), None);
        assert_eq!(ClockTime::from_frame_rate(Rational::new(30, 0)), None);
    }

    #[test]
    fn rational_to_f64() {
        assert_eq!(Rational::new(30, 1).to_f64(), 30.0);
        assert!((Rational::new(24000, 1001).to_f64() - 23.976).abs() < 0.001);
        assert_eq!(Rational::new(1, 0).to_f64(), 0.0);
    }
}
