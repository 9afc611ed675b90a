//! Canvas contract and an in-memory RGBA pixel buffer

use crate::math::Color;
use std::ops::Range;
use std::path::Path;

/// Render target addressed by signed offsets from its center, +y up.
///
/// The renderer only writes; each pixel in
/// [`columns`](Canvas::columns) x [`rows`](Canvas::rows) is written exactly once
/// per frame.
pub trait Canvas {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn put_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Horizontal offsets covering the canvas: `-w/2 .. w - w/2`
    fn columns(&self) -> Range<i32> {
        centered_range(self.width())
    }

    /// Vertical offsets covering the canvas: `-h/2 .. h - h/2`
    fn rows(&self) -> Range<i32> {
        centered_range(self.height())
    }
}

/// Offsets `-n/2 .. n - n/2`; for even `n` this is `-n/2 .. n/2`, odd sizes get
/// the extra pixel on the positive side.
pub fn centered_range(extent: u32) -> Range<i32> {
    let extent = i32::try_from(extent).unwrap_or(i32::MAX);
    let half = extent / 2;
    -half..extent - half
}

/// Row-major RGBA buffer, row 0 at the top
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Buffer filled with opaque black
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    /// Map a centered offset to (column, row), or `None` if outside the buffer
    pub fn to_index(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        let columns = self.columns();
        let rows = self.rows();
        if !columns.contains(&x) || !rows.contains(&y) {
            return None;
        }
        let col = (x - columns.start) as u32;
        let row = (rows.end - 1 - y) as u32;
        Some((col, row))
    }

    pub fn pixel(&self, col: u32, row: u32) -> Option<Color> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.pixels.get(row as usize * self.width as usize + col as usize).copied()
    }

    /// Read back the pixel at a centered offset
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        let (col, row) = self.to_index(x, y)?;
        self.pixel(col, row)
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Row-major pixels, top row first
    pub(crate) fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    /// Raw `[r, g, b, a]` bytes
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_array()).collect()
    }

    /// `0x00RRGGBB` words, one per pixel
    pub fn to_packed_rgb(&self) -> Vec<u32> {
        self.pixels.iter().map(|c| c.to_packed_rgb()).collect()
    }

    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |col, row| {
            image::Rgba(self.pixel(col, row).unwrap_or(Color::BLACK).to_array())
        })
    }

    /// Write the buffer as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        self.to_image().save_with_format(path, image::ImageFormat::Png)
    }

    /// Grayscale text rendering, one character per pixel
    pub fn to_ascii(&self) -> String {
        let gradient_chars: Vec<char> = crate::ASCII_GRADIENT.chars().collect();
        let last = gradient_chars.len() - 1;
        let width = self.width as usize;
        let mut result = String::with_capacity(self.pixels.len() * 3 + self.height as usize);

        for row in self.pixels.chunks_exact(width.max(1)) {
            for color in row {
                let luminance = color.luminance().clamp(0.0, 1.0);
                let index = ((luminance * last as f32).round() as usize).min(last);
                result.push(gradient_chars[index]);
            }
            result.push('\n');
        }

        result
    }
}

impl Canvas for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        match self.to_index(x, y) {
            Some((col, row)) => {
                let index = row as usize * self.width as usize + col as usize;
                self.pixels[index] = color;
            }
            None => tracing::warn!(x, y, "pixel write outside canvas ignored"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_range_even() {
        assert_eq!(centered_range(100), -50..50);
    }

    #[test]
    fn test_centered_range_odd() {
        let range = centered_range(5);
        assert_eq!(range, -2..3);
        assert_eq!(range.len(), 5);
        assert!(centered_range(0).is_empty());
    }

    #[test]
    fn test_center_origin_mapping() {
        let buffer = PixelBuffer::new(4, 4);
        assert_eq!(buffer.to_index(-2, 1), Some((0, 0)));
        assert_eq!(buffer.to_index(1, -2), Some((3, 3)));
        assert_eq!(buffer.to_index(0, 0), Some((2, 1)));
        assert_eq!(buffer.to_index(2, 0), None);
        assert_eq!(buffer.to_index(0, -3), None);
    }

    #[test]
    fn test_put_pixel_and_read_back() {
        let mut buffer = PixelBuffer::new(3, 3);
        buffer.put_pixel(-1, 1, Color::RED);
        buffer.put_pixel(1, -1, Color::BLUE);
        assert_eq!(buffer.pixel(0, 0), Some(Color::RED));
        assert_eq!(buffer.pixel(2, 2), Some(Color::BLUE));
        assert_eq!(buffer.get(-1, 1), Some(Color::RED));
    }

    #[test]
    fn test_put_pixel_out_of_bounds_is_ignored() {
        let mut buffer = PixelBuffer::new(2, 2);
        let before = buffer.clone();
        buffer.put_pixel(5, 5, Color::RED);
        buffer.put_pixel(-2, 0, Color::RED);
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_every_offset_maps_to_a_distinct_pixel() {
        let mut buffer = PixelBuffer::new(7, 4);
        let mut seen = std::collections::HashSet::new();
        for x in buffer.columns() {
            for y in buffer.rows() {
                assert!(seen.insert(buffer.to_index(x, y).unwrap()));
            }
        }
        assert_eq!(seen.len(), 28);
        buffer.resize(1, 1);
        assert_eq!(buffer.to_index(0, 0), Some((0, 0)));
    }

    #[test]
    fn test_export_formats() {
        let mut buffer = PixelBuffer::new(2, 1);
        buffer.put_pixel(-1, 0, Color::rgb(1, 2, 3));
        buffer.put_pixel(0, 0, Color::WHITE);
        assert_eq!(buffer.to_rgba8(), vec![1, 2, 3, 255, 255, 255, 255, 255]);
        assert_eq!(buffer.to_packed_rgb(), vec![0x010203, 0xffffff]);
        let image = buffer.to_image();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(1, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_to_ascii() {
        let mut buffer = PixelBuffer::new(3, 2);
        buffer.put_pixel(0, 0, Color::WHITE);
        let ascii = buffer.to_ascii();
        assert_eq!(ascii.lines().count(), 2);
        let first: Vec<char> = ascii.lines().next().unwrap().chars().collect();
        assert_eq!(first.len(), 3);
        assert_eq!(first[0], ' ');
        assert_eq!(first[1], '█');
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let buffer = PixelBuffer::new(4, 4);
        buffer.save_png(&path).unwrap();
        assert!(path.exists());
    }
}
