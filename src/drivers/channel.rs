use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Write};
use std::time::Duration;
use rand::Rng;
use serialport::SerialPort;
use crate::drivers::error::GloveError;
/// Line-oriented byte transport to the glove.
///
/// The device speaks newline-terminated UTF-8 text inbound and accepts single
/// raw command bytes outbound. Every failure (timeout, disconnect, EOF)
/// surfaces as `GloveError::Channel`; the per-line read timeout is owned by
/// the implementation, not by the callers.
pub trait ByteChannel {
    /// Blocks until one line is available and returns it without the
    /// trailing CR/LF.
    fn read_line(&mut self) -> Result<String, GloveError>;
    fn write_line(&mut self, line: &str) -> Result<(), GloveError>;
    fn write_byte(&mut self, byte: u8) -> Result<(), GloveError>;
    fn flush(&mut self) -> Result<(), GloveError>;
}
impl<C: ByteChannel + ?Sized> ByteChannel for Box<C> {
    fn read_line(&mut self) -> Result<String, GloveError> {
        (**self).read_line()
    }
    fn write_line(&mut self, line: &str) -> Result<(), GloveError> {
        (**self).write_line(line)
    }
    fn write_byte(&mut self, byte: u8) -> Result<(), GloveError> {
        (**self).write_byte(byte)
    }
    fn flush(&mut self) -> Result<(), GloveError> {
        (**self).flush()
    }
}
fn strip_line_ending(line: &mut String) {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
}
/// Serial-port backed channel. Reads go through a `BufReader` over the port;
/// writes go through a cloned handle of the same port.
pub struct SerialChannel {
    reader: BufReader<Box<dyn SerialPort>>,
    writer: Box<dyn SerialPort>,
}
impl SerialChannel {
    pub fn open(port: &str, baud_rate: u32, timeout: Duration) -> Result<Self, GloveError> {
        let reader = serialport::new(port, baud_rate).timeout(timeout).open()?;
        let writer = reader.try_clone()?;
        log::info!("opened serial port {port} at {baud_rate} baud");
        Ok(Self {
            reader: BufReader::new(reader),
            writer,
        })
    }
}
impl ByteChannel for SerialChannel {
    fn read_line(&mut self) -> Result<String, GloveError> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            return Err(GloveError::channel("serial port closed"));
        }
        strip_line_ending(&mut line);
        Ok(line)
    }
    fn write_line(&mut self, line: &str) -> Result<(), GloveError> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
    fn write_byte(&mut self, byte: u8) -> Result<(), GloveError> {
        self.writer.write_all(&[byte])?;
        Ok(())
    }
    fn flush(&mut self) -> Result<(), GloveError> {
        self.writer.flush()?;
        Ok(())
    }
}
/// Hardware-free channel that emits well-formed frames forever. Each channel
/// carries a slow sine on top of a resting level plus measurement noise, so
/// the grid view moves like a real glove in ambient light.
pub struct SimulatedChannel {
    channels: usize,
    cursor: usize,
    phase: f32,
    pub last_code: Option<u8>,
}
impl SimulatedChannel {
    pub fn new(channels: usize) -> Self {
        Self {
            channels,
            cursor: 0,
            phase: 0.0,
            last_code: None,
        }
    }
}
impl ByteChannel for SimulatedChannel {
    fn read_line(&mut self) -> Result<String, GloveError> {
        let line = if self.cursor == 0 {
            "v".to_string()
        } else if self.cursor <= self.channels {
            let idx = self.cursor - 1;
            let noise: f32 = rand::thread_rng().gen_range(-0.05..0.05);
            let value = 1.2 + (self.phase * (idx as f32 * 0.1 + 1.0)).sin() * 0.3 + noise;
            format!("{value:.4}")
        } else {
            "e".to_string()
        };
        if self.cursor == self.channels + 1 {
            self.cursor = 0;
            self.phase += 0.1;
        } else {
            self.cursor += 1;
        }
        Ok(line)
    }
    fn write_line(&mut self, _line: &str) -> Result<(), GloveError> {
        Ok(())
    }
    fn write_byte(&mut self, byte: u8) -> Result<(), GloveError> {
        self.last_code = Some(byte);
        Ok(())
    }
    fn flush(&mut self) -> Result<(), GloveError> {
        Ok(())
    }
}
/// In-memory transcript useful for tests and deterministic playback. Reads
/// pop scripted lines; once the transcript runs out the channel reports
/// itself closed, which doubles as a disconnect in mid-frame scenarios.
#[derive(Default)]
pub struct ScriptedChannel {
    lines: VecDeque<String>,
    written_bytes: Vec<u8>,
    written_lines: Vec<String>,
    flushes: usize,
}
impl ScriptedChannel {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
    pub fn written_bytes(&self) -> &[u8] {
        &self.written_bytes
    }
    pub fn written_lines(&self) -> &[String] {
        &self.written_lines
    }
    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}
impl ByteChannel for ScriptedChannel {
    fn read_line(&mut self) -> Result<String, GloveError> {
        self.lines
            .pop_front()
            .ok_or_else(|| GloveError::channel("scripted transcript exhausted"))
    }
    fn write_line(&mut self, line: &str) -> Result<(), GloveError> {
        self.written_lines.push(line.to_string());
        Ok(())
    }
    fn write_byte(&mut self, byte: u8) -> Result<(), GloveError> {
        self.written_bytes.push(byte);
        Ok(())
    }
    fn flush(&mut self) -> Result<(), GloveError> {
        self.flushes += 1;
        Ok(())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn scripted_channel_replays_then_reports_closed() {
        let mut channel = ScriptedChannel::new(["v", "1.0", "e"]);
        assert_eq!(channel.read_line().unwrap(), "v");
        assert_eq!(channel.read_line().unwrap(), "1.0");
        assert_eq!(channel.read_line().unwrap(), "e");
        assert!(matches!(
            channel.read_line(),
            Err(GloveError::Channel { .. })
        ));
    }
    #[test]
    fn simulated_channel_emits_framed_numbers() {
        let mut channel = SimulatedChannel::new(4);
        assert_eq!(channel.read_line().unwrap(), "v");
        for _ in 0..4 {
            let line = channel.read_line().unwrap();
            assert!(line.parse::<f32>().is_ok(), "not numeric: {line}");
        }
        assert_eq!(channel.read_line().unwrap(), "e");
        // Next frame starts over.
        assert_eq!(channel.read_line().unwrap(), "v");
    }
    #[test]
    fn simulated_channel_records_last_code() {
        let mut channel = SimulatedChannel::new(1);
        channel.write_byte(2).unwrap();
        assert_eq!(channel.last_code, Some(2));
    }
}
