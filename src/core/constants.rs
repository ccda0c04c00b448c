// Trail raster and effect tuning constants.

// Trail raster
pub const TRAIL_WIDTH: u32 = 60; // fixed raster width; height follows the surface aspect
pub const TRAIL_MAX_AGE: u32 = 50; // frames a sample lives before eviction
pub const TRAIL_RADIUS_FACTOR: f32 = 0.08; // brush radius as a fraction of the raster width
pub const TRAIL_BLUR_FACTOR: f32 = 0.5; // soft edge as a fraction of the brush radius
pub const TRAIL_BRUSH_OPACITY: f32 = 0.2;
pub const TRAIL_FORCE_SCALE: f32 = 10_000.0; // force = min(scale * dist^2, 1)
pub const TRAIL_EASE_IN_FRACTION: f32 = 0.3; // share of max age spent fading in

// Interaction
pub const INTERACTIVE_MIN_WIDTH: f32 = 991.0; // below this layout width pointer input is ignored
pub const MAX_PIXEL_RATIO: f64 = 1.5;

// Animation
pub const TIME_STEP: f32 = 0.01; // per-frame time advance
pub const TIME_WRAP: f32 = 1000.0;

// Shader defaults
pub const DEFAULT_SPEED: f32 = 0.25;
pub const DEFAULT_ZOOM: f32 = 1.1;
pub const DEFAULT_GRAIN_AMOUNT: f32 = 0.07;
pub const DEFAULT_GRAIN_SPEED: f32 = 5.0;
pub const DEFAULT_IMAGE_SIZE: [f32; 2] = [512.0, 512.0];

// DOM contract
pub const TARGET_ATTRIBUTE: &str = "data-gradient-smudge";

/// CSS selector matching every element that carries `attribute`.
pub fn attribute_selector(attribute: &str) -> String {
    format!("[{}]", attribute)
}
