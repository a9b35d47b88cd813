use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;
use crate::drivers::error::GloveError;
/// Rendering options for the sensor-grid snapshot.
#[derive(Clone, Debug)]
pub struct GridStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    /// Display normalization range; values at or below the low end render
    /// black, values at or above the high end render white.
    pub range: (f32, f32),
    pub caption: String,
}
impl Default for GridStyle {
    fn default() -> Self {
        Self {
            width: 360,
            height: 400,
            background: RGBColor(10, 10, 10),
            range: (0.0, 1.0),
            caption: "glove frame".to_string(),
        }
    }
}
/// Renders one adjusted vector as a grayscale cell grid, `cols` channels per
/// row, row 0 at the top — the layout of the sensors on the glove itself.
/// A trailing partial row is left as background.
pub fn render_grid_png(
    values: &[f32],
    cols: usize,
    style: &GridStyle,
) -> Result<Vec<u8>, GloveError> {
    if values.is_empty() {
        return Err(GloveError::Render("vector has no channels to draw".into()));
    }
    if cols == 0 {
        return Err(GloveError::Render("grid must be at least one column wide".into()));
    }
    let rows = (values.len() + cols - 1) / cols;
    let (low, high) = style.range;
    let span = (high - low).max(f32::EPSILON);
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(
                &style.caption,
                ("sans-serif", 20).into_font().color(&WHITE),
            )
            .build_cartesian_2d(0i32..cols as i32, 0i32..rows as i32)?;
        chart.draw_series(values.iter().enumerate().map(|(idx, value)| {
            let col = (idx % cols) as i32;
            // Flip so channel 0 lands in the top-left corner.
            let row = (rows - 1 - idx / cols) as i32;
            let norm = ((value - low) / span).clamp(0.0, 1.0);
            let shade = (norm * 255.0) as u8;
            Rectangle::new(
                [(col, row), (col + 1, row + 1)],
                RGBColor(shade, shade, shade).filled(),
            )
        }))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, GloveError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| GloveError::Render("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn renders_a_full_grid_to_png_bytes() {
        let values: Vec<f32> = (0..36).map(|i| i as f32 / 35.0).collect();
        let png = render_grid_png(&values, 6, &GridStyle::default()).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
    #[test]
    fn partial_last_row_is_accepted() {
        let values = vec![0.2, 0.4, 0.6, 0.8, 1.0];
        let png = render_grid_png(&values, 3, &GridStyle::default()).unwrap();
        assert!(!png.is_empty());
    }
    #[test]
    fn empty_vector_is_a_render_error() {
        let result = render_grid_png(&[], 6, &GridStyle::default());
        assert!(matches!(result, Err(GloveError::Render(_))));
    }
    #[test]
    fn zero_columns_is_a_render_error() {
        let result = render_grid_png(&[1.0], 0, &GridStyle::default());
        assert!(matches!(result, Err(GloveError::Render(_))));
    }
}
