use std::{fmt, iter::StepBy, ops::RangeInclusive, str::FromStr};

use crate::foundation::error::{VredError, VredResult};

/// Frame step used when a range does not specify one.
pub const FRAME_STEP_DEFAULT: i64 = 1;

/// A single frame or an inclusive stepped frame range.
///
/// Text form is `S`, `S-E` or `S-E:step` (`S-ExStep` is accepted on input as well).
/// Frames may be negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame.
    pub start: i64,
    /// Last frame (inclusive); `None` means a single frame.
    pub stop: Option<i64>,
    /// Frame increment; `None` means [`FRAME_STEP_DEFAULT`].
    pub step: Option<i64>,
}

impl FrameRange {
    /// Range holding exactly one frame.
    pub fn single(frame: i64) -> Self {
        Self {
            start: frame,
            stop: None,
            step: None,
        }
    }

    /// Build a range from discrete fields, rejecting inverted ranges and non-positive steps.
    pub fn new(start: i64, stop: Option<i64>, step: Option<i64>) -> VredResult<Self> {
        if let Some(stop) = stop
            && stop < start
        {
            return Err(VredError::validation(format!(
                "frame range stop ({stop}) is before start ({start})"
            )));
        }
        if let Some(step) = step
            && step < 1
        {
            return Err(VredError::validation(format!(
                "frame step must be >= 1, got {step}"
            )));
        }
        Ok(Self { start, stop, step })
    }

    /// Last frame of the range (inclusive bound, not necessarily a produced frame).
    pub fn stop_frame(&self) -> i64 {
        self.stop.unwrap_or(self.start)
    }

    /// Effective frame increment.
    pub fn step_size(&self) -> i64 {
        self.step.unwrap_or(FRAME_STEP_DEFAULT)
    }

    /// True when the range produces exactly one frame.
    pub fn is_single(&self) -> bool {
        self.stop_frame() == self.start
    }

    /// Number of frames produced by [`FrameRange::iter`].
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Ranges never produce zero frames.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Frames in ascending order: `start, start + step, ...` while `<= stop`.
    ///
    /// The iterator is a fresh value on every call, so a range can be walked any number of times.
    pub fn iter(&self) -> StepBy<RangeInclusive<i64>> {
        let step = usize::try_from(self.step_size().max(1)).unwrap_or(1);
        (self.start..=self.stop_frame()).step_by(step)
    }
}

impl IntoIterator for FrameRange {
    type Item = i64;
    type IntoIter = StepBy<RangeInclusive<i64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &FrameRange {
    type Item = i64;
    type IntoIter = StepBy<RangeInclusive<i64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for FrameRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            return write!(f, "{}", self.start);
        }
        match self.step {
            None | Some(1) => write!(f, "{}-{}", self.start, self.stop_frame()),
            Some(step) => write!(f, "{}-{}:{step}", self.start, self.stop_frame()),
        }
    }
}

impl FromStr for FrameRange {
    type Err = VredError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || VredError::validation(format!("Invalid frame range format: '{s}'"));

        let text = s.trim();
        let (start, rest) = split_leading_int(text).ok_or_else(bad)?;
        if rest.is_empty() {
            return Ok(Self::single(start));
        }

        let rest = rest.strip_prefix('-').ok_or_else(bad)?;
        let (stop, rest) = split_leading_int(rest).ok_or_else(bad)?;
        if rest.is_empty() {
            return Self::new(start, Some(stop), None);
        }

        let step_text = rest
            .strip_prefix(':')
            .or_else(|| rest.strip_prefix('x'))
            .ok_or_else(bad)?;
        if step_text.is_empty() || !step_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let step = step_text.parse::<i64>().map_err(|_| bad())?;
        Self::new(start, Some(stop), Some(step))
    }
}

/// Split an optionally negative decimal integer off the front of `s`.
fn split_leading_int(s: &str) -> Option<(i64, &str)> {
    let digits_from = usize::from(s.starts_with('-'));
    let digits_len = s[digits_from..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    let end = digits_from + digits_len;
    let value = s[..end].parse::<i64>().ok()?;
    Some((value, &s[end..]))
}

/// Full (untiled) output image resolution in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ImageSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageSize {
    /// Build a size, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> VredResult<Self> {
        if width == 0 || height == 0 {
            return Err(VredError::tiling(format!(
                "image size must be > 0 in both dimensions, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
