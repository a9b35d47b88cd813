use crate::drivers::channel::ByteChannel;
use crate::drivers::error::GloveError;
/// Line that opens a frame on the wire.
pub const FRAME_START: &str = "v";
/// Line that closes a frame on the wire.
pub const FRAME_END: &str = "e";
/// One frame of per-channel voltages as parsed off the wire.
pub type RawVector = Vec<f32>;
/// Decodes sentinel-delimited frames out of the line stream.
///
/// Anything read before the start sentinel is discarded, which lets the
/// framer attach to a device that is already mid-transmission. A reading
/// that fails to parse is coerced to 0.0 and counted rather than aborting
/// the frame. No maximum frame length is enforced.
///
/// The framer holds no partial-frame state between calls: a channel failure
/// mid-frame drops the unfinished vector on the floor and the next call
/// starts hunting for a fresh start sentinel.
#[derive(Debug, Default)]
pub struct VectorFramer {
    recovered_lines: u64,
}
impl VectorFramer {
    pub fn new() -> Self {
        Self::default()
    }
    /// Total number of unparsable readings coerced to 0.0 so far.
    pub fn recovered_lines(&self) -> u64 {
        self.recovered_lines
    }
    /// Blocks until one complete frame has been read and returns it.
    ///
    /// Sentinel comparison and parsing happen on whitespace-trimmed lines.
    /// An empty frame (start directly followed by end) is returned as a
    /// zero-length vector; rejecting it is the consumer's call.
    pub fn next_vector<C: ByteChannel>(&mut self, channel: &mut C) -> Result<RawVector, GloveError> {
        while channel.read_line()?.trim() != FRAME_START {
            continue;
        }
        let mut vector = RawVector::new();
        loop {
            let line = channel.read_line()?;
            let reading = line.trim();
            if reading == FRAME_END {
                return Ok(vector);
            }
            match reading.parse::<f32>() {
                Ok(value) => vector.push(value),
                Err(_) => {
                    self.recovered_lines += 1;
                    log::warn!(
                        "unparsable reading {reading:?} coerced to 0.0 ({} recovered so far)",
                        self.recovered_lines
                    );
                    vector.push(0.0);
                }
            }
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::channel::ScriptedChannel;
    #[test]
    fn well_formed_frame_parses_readings_in_order() {
        let mut channel = ScriptedChannel::new(["v", "1.0", "2.5", "-0.5", "e"]);
        let mut framer = VectorFramer::new();
        let vector = framer.next_vector(&mut channel).unwrap();
        assert_eq!(vector, vec![1.0, 2.5, -0.5]);
        assert_eq!(framer.recovered_lines(), 0);
    }
    #[test]
    fn noise_before_start_sentinel_is_discarded() {
        let mut channel = ScriptedChannel::new(["garbage", "0.3", "v", "4.0", "e"]);
        let mut framer = VectorFramer::new();
        let vector = framer.next_vector(&mut channel).unwrap();
        assert_eq!(vector, vec![4.0]);
    }
    #[test]
    fn non_numeric_reading_coerces_to_zero_and_is_counted() {
        let mut channel = ScriptedChannel::new(["v", "bad", "3.0", "e"]);
        let mut framer = VectorFramer::new();
        let vector = framer.next_vector(&mut channel).unwrap();
        assert_eq!(vector, vec![0.0, 3.0]);
        assert_eq!(framer.recovered_lines(), 1);
    }
    #[test]
    fn empty_frame_is_a_legal_zero_length_vector() {
        let mut channel = ScriptedChannel::new(["v", "e"]);
        let mut framer = VectorFramer::new();
        let vector = framer.next_vector(&mut channel).unwrap();
        assert!(vector.is_empty());
    }
    #[test]
    fn frames_longer_than_the_expected_channel_count_are_accepted() {
        let mut lines = vec!["v".to_string()];
        lines.extend((0..500).map(|i| format!("{}.0", i)));
        lines.push("e".to_string());
        let mut channel = ScriptedChannel::new(lines);
        let mut framer = VectorFramer::new();
        let vector = framer.next_vector(&mut channel).unwrap();
        assert_eq!(vector.len(), 500);
    }
    #[test]
    fn disconnect_mid_frame_surfaces_channel_error() {
        let mut channel = ScriptedChannel::new(["v", "1.0"]);
        let mut framer = VectorFramer::new();
        let result = framer.next_vector(&mut channel);
        assert!(matches!(result, Err(GloveError::Channel { .. })));
    }
    #[test]
    fn consecutive_calls_read_consecutive_frames() {
        let mut channel = ScriptedChannel::new(["v", "1.0", "e", "v", "2.0", "e"]);
        let mut framer = VectorFramer::new();
        assert_eq!(framer.next_vector(&mut channel).unwrap(), vec![1.0]);
        assert_eq!(framer.next_vector(&mut channel).unwrap(), vec![2.0]);
    }
    #[test]
    fn lines_are_trimmed_before_sentinel_comparison() {
        let mut channel = ScriptedChannel::new(["v ", " 1.5 ", " e"]);
        let mut framer = VectorFramer::new();
        let vector = framer.next_vector(&mut channel).unwrap();
        assert_eq!(vector, vec![1.5]);
    }
}
