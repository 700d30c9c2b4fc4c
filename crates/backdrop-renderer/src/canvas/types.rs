use backdrop_common::Color;

/// One pixel as stored in a [`Surface`](super::Surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub fn to_color(self) -> Color {
        Color::from_rgba(self.r, self.g, self.b, self.a)
    }
}

impl From<Color> for Rgba {
    fn from(c: Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// How a source color combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    SourceOver,
    /// Additive-looking lighten: `1 - (1 - src) * (1 - dst)`.
    Screen,
}

/// Drawing state that generators may change and must put back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    pub global_alpha: f32,
    pub blend: BlendMode,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            global_alpha: 1.0,
            blend: BlendMode::SourceOver,
        }
    }
}

pub type Point = (f64, f64);
