use backdrop_common::{Color, RenderError, SurfaceId};

use super::gradient::RadialGradient;
use super::types::{BlendMode, DrawState, Point, Rgba};

/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 16_384;

/// Segments used to flatten one quadratic curve.
const CURVE_SEGMENTS: usize = 16;

/// Owned RGBA drawing target.
///
/// Coordinates are in pixels with the origin at the top-left corner; a
/// pixel `(x, y)` covers the square `[x, x+1) × [y, y+1)` and is sampled at
/// its center.
#[derive(Debug, Clone)]
pub struct Surface {
    id: SurfaceId,
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    state: DrawState,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        check_dimensions(width, height)?;
        Ok(Self {
            id: SurfaceId::new(),
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; (width * height) as usize],
            state: DrawState::default(),
        })
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p.a > 0).count()
    }

    /// Change the pixel dimensions. Destructive: all content is cleared and
    /// the drawing state is reset, but the surface keeps its id.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        check_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgba::TRANSPARENT; (width * height) as usize];
        self.state = DrawState::default();
        Ok(())
    }

    /// Clear to fully transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    // -- drawing state --

    pub fn global_alpha(&self) -> f32 {
        self.state.global_alpha
    }

    pub fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() {
            self.state.global_alpha = alpha.clamp(0.0, 1.0);
        }
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.state.blend
    }

    pub fn set_blend_mode(&mut self, blend: BlendMode) {
        self.state.blend = blend;
    }

    pub fn save(&self) -> DrawState {
        self.state
    }

    pub fn restore(&mut self, state: DrawState) {
        self.state = state;
    }

    // -- primitives --

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        let Some((x0, x1)) = self.span(x, x + w, self.width) else {
            return;
        };
        let Some((y0, y1)) = self.span(y, y + h, self.height) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color, 1.0);
            }
        }
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        if radius.is_nan() || radius <= 0.0 || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let Some((x0, x1)) = self.span(cx - radius - 1.0, cx + radius + 1.0, self.width) else {
            return;
        };
        let Some((y0, y1)) = self.span(cy - radius - 1.0, cy + radius + 1.0, self.height) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                let d = ((px as f64 + 0.5 - cx).powi(2) + (py as f64 + 0.5 - cy).powi(2)).sqrt();
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(px, py, color, coverage as f32);
                }
            }
        }
    }

    /// Anti-aliased line with round caps.
    pub fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        let (x0, y0) = from;
        let (x1, y1) = to;
        if ![x0, y0, x1, y1, width].iter().all(|v| v.is_finite()) || width <= 0.0 {
            return;
        }
        let half = width / 2.0;
        let reach = half * 1.5 + 1.0;
        let (dx, dy) = (x1 - x0, y1 - y0);

        if dx.abs() >= dy.abs() {
            // Walk columns, cover a vertical band around the line.
            let (lo, hi) = (x0.min(x1) - half - 1.0, x0.max(x1) + half + 1.0);
            let Some((c0, c1)) = self.span(lo, hi, self.width) else {
                return;
            };
            for px in c0..c1 {
                let cx = px as f64 + 0.5;
                let t = if dx == 0.0 { 0.0 } else { ((cx - x0) / dx).clamp(0.0, 1.0) };
                let yc = y0 + dy * t;
                let Some((r0, r1)) = self.span(yc - reach, yc + reach, self.height) else {
                    continue;
                };
                for py in r0..r1 {
                    self.cover_segment(px, py, from, to, half, color);
                }
            }
        } else {
            let (lo, hi) = (y0.min(y1) - half - 1.0, y0.max(y1) + half + 1.0);
            let Some((r0, r1)) = self.span(lo, hi, self.height) else {
                return;
            };
            for py in r0..r1 {
                let cy = py as f64 + 0.5;
                let t = ((cy - y0) / dy).clamp(0.0, 1.0);
                let xc = x0 + dx * t;
                let Some((c0, c1)) = self.span(xc - reach, xc + reach, self.width) else {
                    continue;
                };
                for px in c0..c1 {
                    self.cover_segment(px, py, from, to, half, color);
                }
            }
        }
    }

    pub fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color, closed: bool) {
        for pair in points.windows(2) {
            self.stroke_line(pair[0], pair[1], width, color);
        }
        if closed && points.len() > 2 {
            self.stroke_line(points[points.len() - 1], points[0], width, color);
        }
    }

    /// Fill with the even-odd rule, sampling pixel centers.
    pub fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 || points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return;
        }
        let (min_y, max_y) = points
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));
        let Some((r0, r1)) = self.span(min_y, max_y + 1.0, self.height) else {
            return;
        };

        let mut crossings = Vec::with_capacity(points.len());
        for py in r0..r1 {
            let sy = py as f64 + 0.5;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.1 <= sy && b.1 > sy) || (b.1 <= sy && a.1 > sy) {
                    crossings.push(a.0 + (sy - a.1) / (b.1 - a.1) * (b.0 - a.0));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                // Pixel centers inside [left, right).
                let first = (pair[0] - 0.5).ceil().max(0.0);
                let last = (pair[1] - 0.5).ceil().min(self.width as f64);
                let mut px = first as i64;
                while (px as f64) < last {
                    self.blend(px as u32, py, color, 1.0);
                    px += 1;
                }
            }
        }
    }

    /// Quadratic Bézier from `from` through control `ctrl` to `to`.
    pub fn stroke_quadratic(&mut self, from: Point, ctrl: Point, to: Point, width: f64, color: Color) {
        let points: Vec<Point> = (0..=CURVE_SEGMENTS)
            .map(|i| {
                let t = i as f64 / CURVE_SEGMENTS as f64;
                let u = 1.0 - t;
                (
                    u * u * from.0 + 2.0 * u * t * ctrl.0 + t * t * to.0,
                    u * u * from.1 + 2.0 * u * t * ctrl.1 + t * t * to.1,
                )
            })
            .collect();
        self.stroke_polyline(&points, width, color, false);
    }

    /// Paint the disc of the gradient's outer radius.
    pub fn fill_radial(&mut self, gradient: &RadialGradient) {
        let (cx, cy) = gradient.center();
        let radius = gradient.outer_radius();
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let Some((x0, x1)) = self.span(cx - radius, cx + radius, self.width) else {
            return;
        };
        let Some((y0, y1)) = self.span(cy - radius, cy + radius, self.height) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                let d = ((px as f64 + 0.5 - cx).powi(2) + (py as f64 + 0.5 - cy).powi(2)).sqrt();
                if d <= radius {
                    if let Some(color) = gradient.color_at_distance(d) {
                        self.blend(px, py, color, 1.0);
                    }
                }
            }
        }
    }

    fn cover_segment(&mut self, px: u32, py: u32, a: Point, b: Point, half: f64, color: Color) {
        let d = distance_to_segment((px as f64 + 0.5, py as f64 + 0.5), a, b);
        let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
        if coverage > 0.0 {
            self.blend(px, py, color, coverage as f32);
        }
    }

    /// Clamp the pixel range whose centers lie in `[lo, hi)` to `[0, limit)`.
    fn span(&self, lo: f64, hi: f64, limit: u32) -> Option<(u32, u32)> {
        if !lo.is_finite() || !hi.is_finite() {
            return None;
        }
        let start = lo.floor().max(0.0);
        let end = hi.ceil().min(limit as f64);
        if start >= end {
            return None;
        }
        Some((start as u32, end as u32))
    }

    fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        let src_a = color.a as f32 / 255.0 * coverage * self.state.global_alpha;
        if src_a <= 0.0 {
            return;
        }
        let idx = (y * self.width + x) as usize;
        let dst = self.pixels[idx];
        let dst_a = dst.a as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }

        let mode = self.state.blend;
        let channel = |s: u8, d: u8| -> u8 {
            let s = s as f32 / 255.0;
            let d = d as f32 / 255.0;
            let src = match mode {
                BlendMode::SourceOver => s,
                BlendMode::Screen => {
                    // Over an empty pixel screen degrades to plain source.
                    let screened = 1.0 - (1.0 - s) * (1.0 - d);
                    s * (1.0 - dst_a) + screened * dst_a
                }
            };
            let c = (src * src_a + d * dst_a * (1.0 - src_a)) / out_a;
            (c * 255.0).round().clamp(0.0, 255.0) as u8
        };

        let out = Rgba {
            r: channel(color.r, dst.r),
            g: channel(color.g, dst.g),
            b: channel(color.b, dst.b),
            a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        };
        self.pixels[idx] = out;
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), RenderError> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (qx, qy) = (a.0 + dx * t, a.1 + dy * t);
    ((p.0 - qx).powi(2) + (p.1 - qy).powi(2)).sqrt()
}
