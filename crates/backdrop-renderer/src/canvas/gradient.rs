use backdrop_common::{Color, RenderError};
use backdrop_config::colors::sanitize_hex;

/// Concentric radial gradient between an inner and an outer radius.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    cx: f64,
    cy: f64,
    r0: f64,
    r1: f64,
    stops: Vec<(f64, Color)>,
}

impl RadialGradient {
    /// Fails for negative or non-finite geometry.
    pub fn new(cx: f64, cy: f64, r0: f64, r1: f64) -> Result<Self, RenderError> {
        if ![cx, cy, r0, r1].iter().all(|v| v.is_finite()) {
            return Err(RenderError::InvalidGradient(format!(
                "non-finite geometry ({cx}, {cy}, {r0}, {r1})"
            )));
        }
        if r0 < 0.0 || r1 < 0.0 {
            return Err(RenderError::InvalidGradient(format!(
                "negative radius ({r0}, {r1})"
            )));
        }
        Ok(Self {
            cx,
            cy,
            r0,
            r1,
            stops: Vec::new(),
        })
    }

    /// Add a stop from a color string. Only literal hex is accepted.
    pub fn add_stop(&mut self, offset: f64, color: &str) -> Result<(), RenderError> {
        let parsed =
            sanitize_hex(color).ok_or_else(|| RenderError::InvalidColor(color.to_string()))?;
        self.add_color_stop(offset, parsed)
    }

    pub fn add_color_stop(&mut self, offset: f64, color: Color) -> Result<(), RenderError> {
        if !(0.0..=1.0).contains(&offset) {
            return Err(RenderError::InvalidGradient(format!(
                "stop offset {offset} outside 0..=1"
            )));
        }
        // Stable insertion keeps equal offsets in the order they were added.
        let at = self.stops.partition_point(|(o, _)| *o <= offset);
        self.stops.insert(at, (offset, color));
        Ok(())
    }

    pub fn center(&self) -> (f64, f64) {
        (self.cx, self.cy)
    }

    pub fn outer_radius(&self) -> f64 {
        self.r1
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Color at distance `d` from the center. `None` when the gradient has
    /// no stops or its radii coincide.
    pub fn color_at_distance(&self, d: f64) -> Option<Color> {
        let span = self.r1 - self.r0;
        if self.stops.is_empty() || span.abs() < f64::EPSILON {
            return None;
        }
        let t = ((d - self.r0) / span).clamp(0.0, 1.0);
        Some(self.color_at(t))
    }

    fn color_at(&self, t: f64) -> Color {
        let (first_offset, first) = self.stops[0];
        if t <= first_offset {
            return first;
        }
        for pair in self.stops.windows(2) {
            let (o0, c0) = pair[0];
            let (o1, c1) = pair[1];
            if t <= o1 {
                if o1 - o0 < f64::EPSILON {
                    return c1;
                }
                return c0.lerp(&c1, ((t - o0) / (o1 - o0)) as f32);
            }
        }
        self.stops[self.stops.len() - 1].1
    }
}
