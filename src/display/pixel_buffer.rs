use super::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Write ABGR pixel to slice (RGBA8888 little-endian byte order)
#[inline]
fn write_pixel(dest: &mut [u8], r: u8, g: u8, b: u8) {
    dest[0] = 255; // A
    dest[1] = b; // B
    dest[2] = g; // G
    dest[3] = r; // R
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// Bytes needed for a `width` x `height` RGBA8888 image, None on overflow
fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(4)
}

/// RGBA8888 pixel buffer for software rendering.
/// Serves both as the live framebuffer and as the captured background image.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl PixelBuffer {
    /// Create a new pixel buffer with default resolution (640x480)
    pub fn new() -> Self {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Create a black pixel buffer with custom resolution
    pub fn with_size(width: u32, height: u32) -> Self {
        let mut buffer = Self {
            pixels: Vec::new(),
            width: 0,
            height: 0,
        };
        buffer.resize(width, height);
        buffer
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocate for a new resolution. Contents are reset to black.
    ///
    /// A size whose byte count does not fit in `usize` leaves an empty 0x0
    /// buffer, so every later write is rejected by the bounds checks.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height, len) = match byte_len(width, height) {
            Some(len) => (width, height, len),
            None => (0, 0, 0),
        };
        self.width = width;
        self.height = height;
        self.pixels = vec![0; len];
        self.clear(0, 0, 0);
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Clear to a solid color
    /// Optimized: uses u32 fill for maximum speed
    pub fn clear(&mut self, r: u8, g: u8, b: u8) {
        let pixel = u32::from_ne_bytes([255, b, g, r]);

        // Safety: pixels.len() is always byte_len(width, height), a multiple of 4.
        // write_unaligned avoids assuming alignment of Vec<u8>.
        let ptr = self.pixels.as_mut_ptr() as *mut u32;
        let len = self.pixels.len() / 4;
        for i in 0..len {
            unsafe {
                ptr.add(i).write_unaligned(pixel);
            }
        }
    }

    /// Set a single pixel (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel(&mut self.pixels[idx..idx + 4], r, g, b);
        }
    }

    /// Fast unchecked pixel set - use when you've already bounds-checked
    #[inline]
    unsafe fn set_pixel_unchecked(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) {
        let idx = self.pixel_index(x, y);
        *self.pixels.get_unchecked_mut(idx) = 255;
        *self.pixels.get_unchecked_mut(idx + 1) = b;
        *self.pixels.get_unchecked_mut(idx + 2) = g;
        *self.pixels.get_unchecked_mut(idx + 3) = r;
    }

    /// Read a pixel from the buffer (bounds checked)
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<(u8, u8, u8)> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some((
                self.pixels[idx + 3], // R
                self.pixels[idx + 2], // G
                self.pixels[idx + 1], // B
            ))
        } else {
            None
        }
    }

    /// Number of pixels exactly matching a color
    pub fn count_color(&self, r: u8, g: u8, b: u8) -> usize {
        self.pixels
            .chunks_exact(4)
            .filter(|px| px[3] == r && px[2] == g && px[1] == b)
            .count()
    }

    /// Draw a horizontal span, clipped to the buffer
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, r: u8, g: u8, b: u8) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = x1.max(0);
        let end = x2.min(self.width as i32 - 1);
        if start > end {
            return;
        }

        let mut idx = self.pixel_index(start as u32, y as u32);
        for _ in start..=end {
            write_pixel(&mut self.pixels[idx..idx + 4], r, g, b);
            idx += 4;
        }
    }

    /// Draw a line using Bresenham's algorithm with Cohen-Sutherland clipping
    ///
    /// Clips to screen bounds first, then draws without per-pixel bounds checks.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, r: u8, g: u8, b: u8) {
        let Some((cx0, cy0, cx1, cy1)) = self.clip_line(x0, y0, x1, y1) else {
            return;
        };

        let dx = (cx1 - cx0).abs();
        let dy = -((cy1 - cy0).abs());
        let sx = if cx0 < cx1 { 1i32 } else { -1i32 };
        let sy = if cy0 < cy1 { 1i32 } else { -1i32 };
        let mut err = dx + dy;
        let mut x = cx0;
        let mut y = cy0;

        loop {
            // Safety: coordinates are clipped to valid range
            unsafe {
                self.set_pixel_unchecked(x as u32, y as u32, r, g, b);
            }
            if x == cx1 && y == cy1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Cohen-Sutherland line clipping.
    /// Returns the clipped endpoints, or None when the line is fully outside.
    fn clip_line(
        &self,
        mut x0: i32,
        mut y0: i32,
        mut x1: i32,
        mut y1: i32,
    ) -> Option<(i32, i32, i32, i32)> {
        const INSIDE: u8 = 0;
        const LEFT: u8 = 1;
        const RIGHT: u8 = 2;
        const BOTTOM: u8 = 4;
        const TOP: u8 = 8;
        // Converges in at most 4 iterations for valid input
        const MAX_ITERATIONS: u32 = 16;

        let w = self.width as i32;
        let h = self.height as i32;

        let outcode = |x: i32, y: i32| -> u8 {
            let mut code = INSIDE;
            if x < 0 {
                code |= LEFT;
            } else if x >= w {
                code |= RIGHT;
            }
            if y < 0 {
                code |= TOP;
            } else if y >= h {
                code |= BOTTOM;
            }
            code
        };

        let mut code0 = outcode(x0, y0);
        let mut code1 = outcode(x1, y1);

        for _ in 0..MAX_ITERATIONS {
            if (code0 | code1) == 0 {
                return Some((x0, y0, x1, y1));
            }
            if (code0 & code1) != 0 {
                return None;
            }

            let code_out = if code0 != 0 { code0 } else { code1 };
            let dy = y1 - y0;
            let dx = x1 - x0;
            let (x, y);

            if (code_out & BOTTOM) != 0 {
                if dy == 0 {
                    return None;
                }
                x = x0 + dx * (h - 1 - y0) / dy;
                y = h - 1;
            } else if (code_out & TOP) != 0 {
                if dy == 0 {
                    return None;
                }
                x = x0 + dx * (0 - y0) / dy;
                y = 0;
            } else if (code_out & RIGHT) != 0 {
                if dx == 0 {
                    return None;
                }
                y = y0 + dy * (w - 1 - x0) / dx;
                x = w - 1;
            } else {
                if dx == 0 {
                    return None;
                }
                y = y0 + dy * (0 - x0) / dx;
                x = 0;
            }

            if code_out == code0 {
                x0 = x;
                y0 = y;
                code0 = outcode(x0, y0);
            } else {
                x1 = x;
                y1 = y;
                code1 = outcode(x1, y1);
            }
        }

        None
    }

    /// Fill a polygon using the scanline algorithm (pixel centers at +0.5)
    pub fn fill_polygon(&mut self, vertices: &[(f32, f32)], r: u8, g: u8, b: u8) {
        if vertices.len() < 3 {
            return;
        }

        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for (_, y) in vertices {
            min_y = min_y.min(*y);
            max_y = max_y.max(*y);
        }

        let min_y = (min_y as i32).max(0);
        let max_y = (max_y as i32).min(self.height as i32 - 1);

        // Reused per scanline
        let mut intersections = Vec::with_capacity(vertices.len());
        let n = vertices.len();

        for y in min_y..=max_y {
            intersections.clear();
            let yf = y as f32 + 0.5;

            for i in 0..n {
                let (x1, y1) = vertices[i];
                let (x2, y2) = vertices[(i + 1) % n];

                if (y1 <= yf && y2 > yf) || (y2 <= yf && y1 > yf) {
                    let x = x1 + (yf - y1) / (y2 - y1) * (x2 - x1);
                    intersections.push(x as i32);
                }
            }

            intersections.sort_unstable();
            for pair in intersections.chunks_exact(2) {
                self.hline(pair[0], pair[1], y, r, g, b);
            }
        }
    }

    /// Copy contents from another buffer (must be same size)
    pub fn copy_from(&mut self, src: &PixelBuffer) {
        if self.pixels.len() == src.pixels.len() {
            self.pixels.copy_from_slice(&src.pixels);
        }
    }

    /// Raw bytes for SDL texture upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}
