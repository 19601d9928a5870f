//! Fixed-size color grid the pipeline draws into.
//!
//! Row 0 is the **bottom** of the image, matching the viewport transform
//! where y grows upward. Anything that hands the pixels to a top-down
//! consumer (a window texture, a PNG) must reverse the row order; the
//! `to_*` conversions below do that.

use crate::color::Color;

/// Owned W x H grid of colors.
///
/// There is no depth buffer: a second write to the same pixel within a frame
/// simply replaces the first.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            pixels: vec![background; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset every pixel to `color`.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Whether (x, y) addresses a stored pixel.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Store `color` at (x, y). Later writes win.
    ///
    /// # Panics
    /// Panics if (x, y) lies outside the buffer. Callers are expected to have
    /// bounds-checked already; an out-of-range write is a pipeline bug.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        assert!(
            self.contains(x, y),
            "pixel ({x}, {y}) outside {}x{} framebuffer",
            self.width,
            self.height
        );
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.contains(x, y).then(|| self.pixels[self.index(x, y)])
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Bottom-up row `y`.
    pub fn row(&self, y: u32) -> &[Color] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Native-endian ARGB8888 bytes, top row first.
    pub fn to_argb8888_flipped(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for y in (0..self.height).rev() {
            for color in self.row(y) {
                bytes.extend_from_slice(&color.to_argb().to_ne_bytes());
            }
        }
        bytes
    }

    /// RGBA image, top row first.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let c = self.row(self.height - 1 - y)[x as usize];
            image::Rgba([c.r, c.g, c.b, c.a])
        })
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn clear_fills_every_pixel() {
        let mut fb = FrameBuffer::new(4, 3, RED);
        fb.clear(BLACK);
        assert!(fb.pixels().iter().all(|&c| c == BLACK));
        assert_eq!(fb.pixels().len(), 12);
    }

    #[test]
    fn later_write_wins() {
        let mut fb = FrameBuffer::new(4, 4, BLACK);
        fb.set_pixel(1, 2, RED);
        fb.set_pixel(1, 2, WHITE);
        assert_eq!(fb.get_pixel(1, 2), Some(WHITE));
    }

    #[test]
    fn get_pixel_out_of_bounds_is_none() {
        let fb = FrameBuffer::new(4, 4, BLACK);
        assert_eq!(fb.get_pixel(4, 0), None);
        assert_eq!(fb.get_pixel(0, 4), None);
        assert_eq!(fb.get_pixel(-1, 0), None);
    }

    #[test]
    #[should_panic(expected = "outside 4x4 framebuffer")]
    fn set_pixel_at_width_panics() {
        let mut fb = FrameBuffer::new(4, 4, BLACK);
        fb.set_pixel(4, 0, RED);
    }

    #[test]
    fn argb_bytes_are_row_flipped() {
        let mut fb = FrameBuffer::new(2, 2, BLACK);
        fb.set_pixel(0, 0, RED); // bottom-left

        let bytes = fb.to_argb8888_flipped();
        assert_eq!(bytes.len(), 16);
        // Bottom-left lands in the last row of the output.
        let bottom_left = u32::from_ne_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        assert_eq!(bottom_left, RED.to_argb());
        let top_left = u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        assert_eq!(top_left, BLACK.to_argb());
    }

    #[test]
    fn rgba_image_is_row_flipped() {
        let mut fb = FrameBuffer::new(3, 2, BLACK);
        fb.set_pixel(2, 1, RED); // top-right in image terms

        let img = fb.to_rgba_image();
        assert_eq!(img.get_pixel(2, 0).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(2, 1).0, [0, 0, 0, 255]);
    }
}
