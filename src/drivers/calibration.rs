use crate::drivers::error::GloveError;
use crate::drivers::framer::RawVector;
/// Baseline-subtracted, peak-normalized frame. Immutable value object handed
/// to exactly one consumer per acquisition; the maximum element of any
/// successfully produced instance is exactly 1.0.
#[derive(Clone, Debug, PartialEq)]
pub struct AdjustedVector {
    pub values: Vec<f32>,
}
/// Channel-wise running sum with an explicit growth rule: a pushed vector
/// longer than anything seen so far appends its novel trailing channels to
/// the sum instead of erroring. The glove occasionally reports extra
/// channels once it warms up and calibration tolerates that.
#[derive(Debug, Default)]
pub struct BaselineAccumulator {
    sum: Vec<f32>,
}
impl BaselineAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn channel_count(&self) -> usize {
        self.sum.len()
    }
    pub fn push(&mut self, vector: &[f32]) {
        for (index, &value) in vector.iter().enumerate() {
            if index >= self.sum.len() {
                self.sum.push(value);
            } else {
                self.sum[index] += value;
            }
        }
    }
    pub fn mean(self, count: usize) -> Vec<f32> {
        self.sum
            .into_iter()
            .map(|value| value / count as f32)
            .collect()
    }
}
/// Holds the dark-current baseline and applies it to raw frames.
///
/// The baseline starts empty; run a calibration before adjusting anything.
/// Replacement is wholesale: `rebuild` only swaps the stored baseline after
/// every requested sample has been read, so a channel failure mid-calibration
/// leaves the previous baseline in place.
#[derive(Debug, Default)]
pub struct CalibrationModel {
    baseline: Vec<f32>,
}
impl CalibrationModel {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_baseline(baseline: Vec<f32>) -> Self {
        Self { baseline }
    }
    pub fn baseline(&self) -> &[f32] {
        &self.baseline
    }
    pub fn channel_count(&self) -> usize {
        self.baseline.len()
    }
    /// Recomputes the baseline as the channel-wise mean of `n` frames pulled
    /// through `sample`.
    ///
    /// `n == 0` reads (and discards) a single frame purely to discover the
    /// channel count, yielding an all-zero baseline of that length. `n == 1`
    /// stores the single sampled frame verbatim. Larger `n` averages with
    /// [`BaselineAccumulator`], so a later longer frame widens the baseline.
    pub fn rebuild<F>(&mut self, n: usize, mut sample: F) -> Result<(), GloveError>
    where
        F: FnMut() -> Result<RawVector, GloveError>,
    {
        let first = sample()?;
        let baseline = match n {
            0 => vec![0.0; first.len()],
            1 => first,
            _ => {
                let mut accumulator = BaselineAccumulator::new();
                accumulator.push(&first);
                for _ in 1..n {
                    accumulator.push(&sample()?);
                }
                accumulator.mean(n)
            }
        };
        log::info!(
            "dark-current baseline rebuilt over {n} frame(s), {} channel(s)",
            baseline.len()
        );
        self.baseline = baseline;
        Ok(())
    }
    /// Subtracts the baseline and scales so the strongest channel reads 1.0.
    ///
    /// Fails with `EmptyFrame` for a zero-length frame, `ChannelMismatch`
    /// when the frame width disagrees with the baseline, and
    /// `DegenerateVector` when the post-subtraction maximum is not positive
    /// (nothing brighter than the dark reference, so the scale is undefined).
    pub fn adjust(&self, raw: RawVector) -> Result<AdjustedVector, GloveError> {
        if raw.is_empty() {
            return Err(GloveError::EmptyFrame);
        }
        if raw.len() != self.baseline.len() {
            return Err(GloveError::ChannelMismatch {
                expected: self.baseline.len(),
                actual: raw.len(),
            });
        }
        let mut values: Vec<f32> = raw
            .iter()
            .zip(&self.baseline)
            .map(|(value, dark)| value - dark)
            .collect();
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        if max <= 0.0 {
            return Err(GloveError::DegenerateVector { max });
        }
        for value in &mut values {
            *value /= max;
        }
        Ok(AdjustedVector { values })
    }
}
