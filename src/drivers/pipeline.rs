use crate::drivers::calibration::{AdjustedVector, CalibrationModel};
use crate::drivers::channel::ByteChannel;
use crate::drivers::error::GloveError;
use crate::drivers::framer::VectorFramer;
/// The single blocking entry point consumers pull calibrated frames from.
///
/// Owns the channel, the framer, and the calibration model, which makes the
/// baseline single-writer by construction. There is no internal retry:
/// channel loss and degenerate frames propagate unchanged and the caller
/// decides whether to retry, skip, or abort.
pub struct AcquisitionPipeline<C: ByteChannel> {
    channel: C,
    framer: VectorFramer,
    calibration: CalibrationModel,
}
impl<C: ByteChannel> AcquisitionPipeline<C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            framer: VectorFramer::new(),
            calibration: CalibrationModel::new(),
        }
    }
    /// Rebuilds the dark-current baseline from `n` freshly framed vectors.
    pub fn calibrate(&mut self, n: usize) -> Result<(), GloveError> {
        let framer = &mut self.framer;
        let channel = &mut self.channel;
        self.calibration
            .rebuild(n, || framer.next_vector(channel))
    }
    /// Blocks until one full frame arrives, then adjusts it against the
    /// current baseline.
    pub fn read_adjusted_vector(&mut self) -> Result<AdjustedVector, GloveError> {
        let raw = self.framer.next_vector(&mut self.channel)?;
        self.calibration.adjust(raw)
    }
    /// Writes one raw command byte back to the device and flushes.
    pub fn send_code(&mut self, code: u8) -> Result<(), GloveError> {
        self.channel.write_byte(code)?;
        self.channel.flush()
    }
    pub fn calibration(&self) -> &CalibrationModel {
        &self.calibration
    }
    /// How many garbled readings the framer has coerced to 0.0 so far.
    pub fn recovered_lines(&self) -> u64 {
        self.framer.recovered_lines()
    }
    pub fn channel(&self) -> &C {
        &self.channel
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::channel::ScriptedChannel;
    #[test]
    fn calibrated_pipeline_yields_normalized_vectors() {
        let channel = ScriptedChannel::new([
            "v", "0.0", "0.0", "e", // calibration frame
            "v", "1.0", "2.0", "e", // acquisition frame
        ]);
        let mut pipeline = AcquisitionPipeline::new(channel);
        pipeline.calibrate(1).unwrap();
        let adjusted = pipeline.read_adjusted_vector().unwrap();
        assert_eq!(adjusted.values, vec![0.5, 1.0]);
    }
    #[test]
    fn garbled_reading_decodes_to_zero_end_to_end() {
        let channel = ScriptedChannel::new([
            "v", "0.0", "0.0", "e", // calibration frame
            "v", "bad", "3.0", "e", // acquisition frame with a garbled line
        ]);
        let mut pipeline = AcquisitionPipeline::new(channel);
        pipeline.calibrate(1).unwrap();
        let adjusted = pipeline.read_adjusted_vector().unwrap();
        assert_eq!(adjusted.values, vec![0.0, 1.0]);
        assert_eq!(pipeline.recovered_lines(), 1);
    }
    #[test]
    fn frame_matching_the_baseline_is_reported_degenerate() {
        let channel = ScriptedChannel::new([
            "v", "1.0", "2.0", "e", // calibration frame
            "v", "1.0", "2.0", "e", // identical acquisition frame
        ]);
        let mut pipeline = AcquisitionPipeline::new(channel);
        pipeline.calibrate(1).unwrap();
        let result = pipeline.read_adjusted_vector();
        assert!(matches!(result, Err(GloveError::DegenerateVector { .. })));
    }
    #[test]
    fn disconnect_mid_frame_propagates_channel_error() {
        let channel = ScriptedChannel::new(["v", "0.0", "0.0", "e", "v", "1.0"]);
        let mut pipeline = AcquisitionPipeline::new(channel);
        pipeline.calibrate(1).unwrap();
        let result = pipeline.read_adjusted_vector();
        assert!(matches!(result, Err(GloveError::Channel { .. })));
    }
    #[test]
    fn calibrate_zero_discovers_width_and_zeroes_the_baseline() {
        let channel = ScriptedChannel::new(["v", "4.0", "5.0", "6.0", "e"]);
        let mut pipeline = AcquisitionPipeline::new(channel);
        pipeline.calibrate(0).unwrap();
        assert_eq!(pipeline.calibration().baseline(), &[0.0, 0.0, 0.0]);
    }
    #[test]
    fn send_code_writes_one_byte_and_flushes() {
        let channel = ScriptedChannel::new(Vec::<String>::new());
        let mut pipeline = AcquisitionPipeline::new(channel);
        pipeline.send_code(2).unwrap();
        assert_eq!(pipeline.channel().written_bytes(), &[2]);
        assert_eq!(pipeline.channel().flush_count(), 1);
    }
}
