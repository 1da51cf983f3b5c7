//! Colors used by the output encoders.

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        Self::new(
            (f32::from(self.r) * inv_t + f32::from(other.r) * t) as u8,
            (f32::from(self.g) * inv_t + f32::from(other.g) * t) as u8,
            (f32::from(self.b) * inv_t + f32::from(other.b) * t) as u8,
            (f32::from(self.a) * inv_t + f32::from(other.a) * t) as u8,
        )
    }

    /// CSS color string (`rgb(..)` when opaque, `rgba(..)` otherwise).
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, f32::from(self.a) / 255.0)
        }
    }
}

/// Colors for each layer of a rendered trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Canvas background.
    pub background: Rgba,
    /// Cell grid lines.
    pub grid: Rgba,
    /// Emitted cells. Cells emitted more than once are shaded towards
    /// [`Palette::repeat`], reaching it at four hits.
    pub pixel: Rgba,
    /// Cells emitted four times or more.
    pub repeat: Rgba,
    /// The continuous segment.
    pub segment: Rgba,
    /// Recorded sample points.
    pub sample: Rgba,
    /// Error-term helper segments.
    pub helper: Rgba,
    /// Samples flagged as anomalous.
    pub anomaly: Rgba,
}

impl Palette {
    /// Light theme.
    pub const LIGHT: Self = Self {
        background: Rgba::WHITE,
        grid: Rgba::rgb(210, 210, 210),
        pixel: Rgba::rgb(120, 160, 220),
        repeat: Rgba::rgb(40, 70, 160),
        segment: Rgba::BLACK,
        sample: Rgba::RED,
        helper: Rgba::rgb(0, 150, 60),
        anomaly: Rgba::rgb(255, 140, 0),
    };

    /// Dark theme.
    pub const DARK: Self = Self {
        background: Rgba::rgb(24, 24, 28),
        grid: Rgba::rgb(60, 60, 68),
        pixel: Rgba::rgb(70, 110, 170),
        repeat: Rgba::rgb(150, 190, 255),
        segment: Rgba::WHITE,
        sample: Rgba::rgb(255, 90, 90),
        helper: Rgba::rgb(90, 220, 120),
        anomaly: Rgba::rgb(255, 180, 40),
    };

    /// Fill color for a cell emitted `hits` times.
    #[must_use]
    pub fn cell(&self, hits: u16) -> Rgba {
        match hits {
            0 => self.background,
            1 => self.pixel,
            n => self.pixel.lerp(self.repeat, f32::from(n - 1) / 3.0),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::LIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::RED.to_array(), [255, 0, 0, 255]);
        assert_eq!(Palette::LIGHT.background, Rgba::WHITE);
        assert_eq!(Palette::LIGHT.sample, Rgba::RED);
    }

    #[test]
    fn test_rgba_lerp() {
        let mid = Rgba::BLACK.lerp(Rgba::WHITE, 0.5);
        assert_eq!(mid.r, 127);
        assert_eq!(mid.g, 127);
        assert_eq!(mid.b, 127);
    }

    #[test]
    fn test_lerp_boundaries() {
        let black = Rgba::BLACK;
        let white = Rgba::WHITE;
        assert_eq!(black.lerp(white, 0.0), black);
        assert_eq!(black.lerp(white, 1.0), white);
        assert_eq!(black.lerp(white, -0.5), black);
        assert_eq!(black.lerp(white, 1.5), white);
    }

    #[test]
    fn test_to_css() {
        assert_eq!(Rgba::rgb(1, 2, 3).to_css(), "rgb(1,2,3)");
        assert_eq!(Rgba::new(255, 0, 0, 0).to_css(), "rgba(255,0,0,0.000)");
    }

    #[test]
    fn test_palette_cell_shading() {
        let palette = Palette::default();
        assert_eq!(palette.cell(0), palette.background);
        assert_eq!(palette.cell(1), palette.pixel);
        assert_eq!(palette.cell(4), palette.repeat);
        assert_eq!(palette.cell(7), palette.repeat);
        assert_ne!(palette.cell(2), palette.pixel);
        assert_ne!(palette.cell(2), palette.repeat);
        assert_ne!(Palette::LIGHT, Palette::DARK);
    }
}
