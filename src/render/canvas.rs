use itertools::Itertools;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Rgb {
    pub(crate) const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linearly interpolate towards `other` by `t` in [0, 1].
    pub(crate) fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let r = (self.r as f32 + (other.r as f32 - self.r as f32) * t).round() as i32;
        let g = (self.g as f32 + (other.g as f32 - self.g as f32) * t).round() as i32;
        let b = (self.b as f32 + (other.b as f32 - self.b as f32) * t).round() as i32;
        Rgb::new(r.clamp(0, 255) as u8, g.clamp(0, 255) as u8, b.clamp(0, 255) as u8)
    }

    /// Parse a `#RRGGBB` hex color.
    pub(crate) fn from_hex(input: &str) -> Result<Self, ColorError> {
        let digits = input
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MalformedHex(input.to_string()))?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorError::MalformedHex(input.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorError::InvalidDigits(input.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Format as `#RRGGBB`. Channels are zero padded so single-digit values
    /// still produce a well-formed six-digit string.
    pub(crate) fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Errors that can occur when parsing palette colors
#[derive(thiserror::Error, Debug)]
pub(crate) enum ColorError {
    #[error("malformed hex color '{0}': expected '#RRGGBB'")]
    MalformedHex(String),

    #[error("invalid hex digits in color '{0}'")]
    InvalidDigits(String),
}

/// A point in logical canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Vec2 {
    pub(crate) x: f32,
    pub(crate) y: f32,
}

impl Vec2 {
    pub(crate) const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub(crate) fn dist(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An RGB framebuffer addressed in logical canvas units and backed by a
/// device-resolution pixel grid. The logical-to-device scale is fixed at
/// construction; nothing reallocates at runtime.
pub(crate) struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    scale_x: f32,
    scale_y: f32,
}

impl Canvas {
    pub(crate) fn new(width: usize, height: usize, logical_width: f32, logical_height: f32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::default(); width * height],
            scale_x: width as f32 / logical_width,
            scale_y: height as f32 / logical_height,
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    /// Device-space pixel accessor. Out-of-bounds reads return the default color.
    pub(crate) fn pixel(&self, x: usize, y: usize) -> Rgb {
        if x >= self.width || y >= self.height {
            return Rgb::default();
        }
        self.pixels[y * self.width + x]
    }

    /// Hard fill, used once at startup before the first frame.
    pub(crate) fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Blend a low-alpha fill over every pixel. Called once per frame instead
    /// of a hard clear, so previous frames linger as a short motion trail.
    pub(crate) fn fade(&mut self, color: Rgb, alpha: f32) {
        for pixel in &mut self.pixels {
            *pixel = pixel.lerp(color, alpha);
        }
    }

    /// Stroke a polyline given in logical units. `width` is the stroke width
    /// in logical units; `alpha` blends the stroke over the backdrop.
    pub(crate) fn stroke_polyline(&mut self, points: &[Vec2], color: Rgb, width: f32, alpha: f32) {
        // The minimum keeps hairline strokes visible at terminal resolutions,
        // including samples that land exactly on a pixel boundary.
        let radius = (width * self.scale_x.min(self.scale_y) * 0.5).max(0.75);
        for (a, b) in points.iter().tuple_windows() {
            self.stroke_segment(*a, *b, color, radius, alpha);
        }
    }

    fn stroke_segment(&mut self, a: Vec2, b: Vec2, color: Rgb, radius: f32, alpha: f32) {
        let ax = a.x * self.scale_x;
        let ay = a.y * self.scale_y;
        let bx = b.x * self.scale_x;
        let by = b.y * self.scale_y;
        let len = ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt();
        let steps = len.ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let cx = ax + (bx - ax) * t;
            let cy = ay + (by - ay) * t;
            self.stamp(cx, cy, radius, color, alpha);
        }
    }

    /// Blend a disc of device-space `radius` centered at (cx, cy).
    fn stamp(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        let min_x = (cx - radius).floor().max(0.0) as i64;
        let max_x = (cx + radius).ceil() as i64;
        let min_y = (cy - radius).floor().max(0.0) as i64;
        let max_y = (cy + radius).ceil() as i64;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
                    continue;
                }
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let i = y as usize * self.width + x as usize;
                self.pixels[i] = self.pixels[i].lerp(color, alpha);
            }
        }
    }
}
