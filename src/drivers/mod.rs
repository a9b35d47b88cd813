// src/drivers/mod.rs
pub mod calibration;
pub mod channel;
pub mod error;
pub mod framer;
pub mod pipeline;
pub mod plot;
pub use calibration::{AdjustedVector, BaselineAccumulator, CalibrationModel};
pub use channel::{ByteChannel, ScriptedChannel, SerialChannel, SimulatedChannel};
pub use error::GloveError;
pub use framer::{RawVector, VectorFramer, FRAME_END, FRAME_START};
pub use pipeline::AcquisitionPipeline;
pub use plot::{render_grid_png, GridStyle};
