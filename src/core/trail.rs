// Cursor trail field.
//
// Pointer samples are kept for a fixed number of frames and rasterized every
// frame into a small RGBA8 bitmap. The red and green channels carry the
// motion direction remapped from [-1, 1] to [0, 255], blue carries the decay
// intensity. The shader samples this bitmap as a continuous displacement
// field, so its size is independent of the on-screen surface size.

use super::constants::{
    TRAIL_BLUR_FACTOR, TRAIL_BRUSH_OPACITY, TRAIL_EASE_IN_FRACTION, TRAIL_FORCE_SCALE,
    TRAIL_MAX_AGE, TRAIL_RADIUS_FACTOR, TRAIL_WIDTH,
};
use glam::Vec2;
use smallvec::SmallVec;

const CLEAR_PIXEL: [u8; 4] = [0, 0, 0, 255];

/// One pointer sample, in coordinates normalized to the owning surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub force: f32,
    pub age: u32,
}

pub struct TrailField {
    points: SmallVec<[TrailPoint; 32]>,
    last: Option<Vec2>,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    // raster still shows content from points that have since been evicted
    residual: bool,
    // raster changed since the GPU copy was last refreshed
    dirty: bool,
}

impl TrailField {
    /// `aspect` is the owning surface's height divided by its width.
    pub fn new(aspect: f32) -> Self {
        let height = raster_height(aspect);
        let mut field = Self {
            points: SmallVec::new(),
            last: None,
            width: TRAIL_WIDTH,
            height,
            pixels: vec![0; (TRAIL_WIDTH * height * 4) as usize],
            residual: false,
            dirty: true,
        };
        field.clear();
        field
    }

    pub fn add_point(&mut self, u: f32, v: f32) {
        let pos = Vec2::new(u, v);
        let (velocity, force) = match self.last {
            Some(last) => {
                let delta = pos - last;
                let dist2 = delta.length_squared();
                (
                    delta.normalize_or_zero(),
                    (TRAIL_FORCE_SCALE * dist2).min(1.0),
                )
            }
            None => (Vec2::ZERO, 0.0),
        };
        self.last = Some(pos);
        self.points.push(TrailPoint {
            pos,
            velocity,
            force,
            age: 0,
        });
    }

    /// Age every sample by one frame, evict expired ones and redraw.
    pub fn update(&mut self) {
        if self.points.is_empty() {
            if self.residual {
                self.residual = false;
                self.clear();
                self.dirty = true;
            }
            return;
        }

        self.residual = true;
        self.points.retain(|p| {
            p.age += 1;
            p.age <= TRAIL_MAX_AGE
        });
        self.clear();
        for i in 0..self.points.len() {
            let p = self.points[i];
            self.draw_point(&p);
        }
        self.dirty = true;
    }

    pub fn reset(&mut self) {
        self.clear();
        self.points.clear();
        self.last = None;
        self.residual = false;
        self.dirty = true;
    }

    /// Reallocate the raster for a new surface aspect ratio. The GPU owner is
    /// expected to recreate its texture at [`TrailField::size`].
    pub fn resize(&mut self, aspect: f32) {
        self.last = None;
        self.height = raster_height(aspect);
        self.pixels = vec![0; (self.width * self.height * 4) as usize];
        self.clear();
        self.dirty = true;
    }

    pub fn points(&self) -> &[TrailPoint] {
        &self.points
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn has_residual(&self) -> bool {
        self.residual
    }

    /// Returns whether the raster changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    fn clear(&mut self) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&CLEAR_PIXEL);
        }
    }

    fn draw_point(&mut self, p: &TrailPoint) {
        let s = intensity(p.age) * p.force;
        if s <= 0.0 {
            return;
        }
        let color = [
            (p.velocity.x + 1.0) * 0.5 * 255.0,
            (p.velocity.y + 1.0) * 0.5 * 255.0,
            255.0 * s,
        ];
        let opacity = TRAIL_BRUSH_OPACITY * s;

        let radius = TRAIL_RADIUS_FACTOR * self.width as f32;
        let blur = radius * TRAIL_BLUR_FACTOR;
        let reach = radius + blur;
        let cx = p.pos.x * self.width as f32;
        let cy = p.pos.y * self.height as f32;

        let x0 = (cx - reach).floor().max(0.0) as u32;
        let y0 = (cy - reach).floor().max(0.0) as u32;
        let x1 = ((cx + reach).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((cy + reach).ceil().max(0.0) as u32).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let d = Vec2::new(x as f32 + 0.5 - cx, y as f32 + 0.5 - cy).length();
                let alpha = opacity * coverage(d, radius, blur);
                if alpha <= 0.0 {
                    continue;
                }
                let i = ((y * self.width + x) * 4) as usize;
                for c in 0..3 {
                    let dst = self.pixels[i + c] as f32;
                    let out = dst + (color[c] - dst) * alpha;
                    self.pixels[i + c] = out.round().clamp(0.0, 255.0) as u8;
                }
            }
        }
    }
}

/// Fade envelope over a sample's life: sine ease-in over the first 30% of
/// the maximum age, quadratic ease-out over the rest.
pub fn intensity(age: u32) -> f32 {
    let max_age = TRAIL_MAX_AGE as f32;
    let age = age as f32;
    let ease_in = TRAIL_EASE_IN_FRACTION * max_age;
    if age < ease_in {
        (age / ease_in * std::f32::consts::FRAC_PI_2).sin()
    } else {
        let k = (1.0 - (age - ease_in) / ((1.0 - TRAIL_EASE_IN_FRACTION) * max_age)).max(0.0);
        -k * (k - 2.0)
    }
}

fn raster_height(aspect: f32) -> u32 {
    let aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    };
    ((TRAIL_WIDTH as f32 * aspect).round() as u32).max(1)
}

// Soft-edged disc: 1 inside `radius - blur`, 0 beyond `radius + blur`,
// smoothstep in between.
#[inline]
fn coverage(d: f32, radius: f32, blur: f32) -> f32 {
    let t = ((radius + blur - d) / (2.0 * blur)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
