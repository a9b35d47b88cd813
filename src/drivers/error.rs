use thiserror::Error;
#[derive(Debug, Error)]
pub enum GloveError {
    #[error("channel i/o failed: {reason}")]
    Channel { reason: String },
    #[error("frame contained no readings; nothing to adjust")]
    EmptyFrame,
    #[error("degenerate frame: post-subtraction maximum {max} is not positive")]
    DegenerateVector { max: f32 },
    #[error("channel count mismatch: baseline has {expected}, frame has {actual}")]
    ChannelMismatch { expected: usize, actual: usize },
    #[error("failed to render grid snapshot: {0}")]
    Render(String),
}
impl GloveError {
    pub fn channel(reason: impl Into<String>) -> Self {
        GloveError::Channel {
            reason: reason.into(),
        }
    }
    /// Degenerate frames can be skipped by the caller; channel loss cannot.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            GloveError::EmptyFrame
                | GloveError::DegenerateVector { .. }
                | GloveError::ChannelMismatch { .. }
        )
    }
}
impl From<std::io::Error> for GloveError {
    fn from(value: std::io::Error) -> Self {
        GloveError::Channel {
            reason: value.to_string(),
        }
    }
}
impl From<serialport::Error> for GloveError {
    fn from(value: serialport::Error) -> Self {
        GloveError::Channel {
            reason: value.to_string(),
        }
    }
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for GloveError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        GloveError::Render(format!("{value:?}"))
    }
}
impl From<image::ImageError> for GloveError {
    fn from(value: image::ImageError) -> Self {
        GloveError::Render(value.to_string())
    }
}
