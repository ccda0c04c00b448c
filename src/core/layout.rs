use super::constants::MAX_PIXEL_RATIO;
use glam::Vec2;

/// An element's layout box in viewport (client) coordinates, CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Height over width, 1.0 for empty boxes.
    #[inline]
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.height / self.width
        } else {
            1.0
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.top + self.height
    }

    /// Like [`Rect::normalize`], but only for points inside the box.
    pub fn local_point(&self, x: f32, y: f32) -> Option<Vec2> {
        if !self.contains(x, y) {
            return None;
        }
        self.normalize(x, y)
    }

    /// Map a viewport-space point into this box's [0,1]x[0,1] space.
    /// Returns `None` for empty boxes.
    pub fn normalize(&self, x: f32, y: f32) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let u = ((x - self.left) / self.width).clamp(0.0, 1.0);
        let v = ((y - self.top) / self.height).clamp(0.0, 1.0);
        Some(Vec2::new(u, v))
    }
}

/// Layout viewport shared by every surface, recomputed once per resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            pixel_ratio: if device_pixel_ratio > 0.0 {
                device_pixel_ratio.min(MAX_PIXEL_RATIO) as f32
            } else {
                1.0
            },
        }
    }

    /// Layout viewport from the root element's client size, which excludes
    /// classic scrollbars and so matches a `position:fixed` 100% box. Falls
    /// back to the window's inner size when the client size is unknown.
    pub fn from_client(client: Vec2, inner: Vec2, device_pixel_ratio: f64) -> Self {
        let width = if client.x > 0.0 { client.x } else { inner.x };
        let height = if client.y > 0.0 { client.y } else { inner.y };
        Self::new(width, height, device_pixel_ratio)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Drawing-buffer size of the overlay canvas in physical pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.width * self.pixel_ratio).round() as u32;
        let h = (self.height * self.pixel_ratio).round() as u32;
        (w.max(1), h.max(1))
    }
}

/// Clip-space placement of a unit quad covering an element's box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QuadTransform {
    pub center: Vec2,
    pub half_extent: Vec2,
}

impl QuadTransform {
    pub fn from_rect(rect: &Rect, viewport: &Viewport) -> Self {
        let vw = viewport.width;
        let vh = viewport.height;
        let cx = (rect.left + rect.width * 0.5) / vw * 2.0 - 1.0;
        let cy = 1.0 - (rect.top + rect.height * 0.5) / vh * 2.0;
        Self {
            center: Vec2::new(cx, cy),
            half_extent: Vec2::new(rect.width / vw, rect.height / vh),
        }
    }

    /// Packed as `[center.x, center.y, half.x, half.y]` for the shader.
    pub fn to_array(&self) -> [f32; 4] {
        [
            self.center.x,
            self.center.y,
            self.half_extent.x,
            self.half_extent.y,
        ]
    }
}
