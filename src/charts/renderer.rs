//! Static Chart Renderer
//! Draws onto an in-memory RGB bitmap and encodes it as PNG.
//!
//! Every chart uses a fixed canvas size and white background so the same
//! table always produces the same bytes.

use super::ChartError;
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;

pub const FONT: &str = "sans-serif";

pub struct ChartRenderer;

impl ChartRenderer {
    /// Run `draw` on a white canvas of `size` pixels and return PNG bytes.
    pub fn render_png<F>(size: (u32, u32), draw: F) -> Result<Vec<u8>, ChartError>
    where
        F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<(), ChartError>,
    {
        let (width, height) = size;
        let mut buffer = vec![0u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
            root.fill(&WHITE)?;
            draw(&root)?;
            root.present()?;
        }

        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| ChartError::Drawing("bitmap buffer has the wrong size".to_string()))?;

        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    /// Compact axis label for large counts: 1.2B, 345.6M, 12.0K.
    pub fn format_count(value: f64) -> String {
        let abs = value.abs();
        if abs >= 1e9 {
            format!("{:.1}B", value / 1e9)
        } else if abs >= 1e6 {
            format!("{:.1}M", value / 1e6)
        } else if abs >= 1e3 {
            format!("{:.1}K", value / 1e3)
        } else {
            format!("{:.0}", value)
        }
    }

    /// Upper bound for a value axis with some headroom above `max`.
    pub fn headroom(max: f64) -> f64 {
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }
}
