use super::constants::{
    DEFAULT_GRAIN_AMOUNT, DEFAULT_GRAIN_SPEED, DEFAULT_SPEED, DEFAULT_ZOOM, TIME_STEP,
};
use super::error::EffectError;

/// Shader tuning for one surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectParams {
    pub speed: f32,
    pub zoom: f32,
    pub grain_amount: f32,
    pub grain_speed: f32,
    pub time_step: f32,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            zoom: DEFAULT_ZOOM,
            grain_amount: DEFAULT_GRAIN_AMOUNT,
            grain_speed: DEFAULT_GRAIN_SPEED,
            time_step: TIME_STEP,
        }
    }
}

// Element attributes that may override a default.
pub const ATTR_SPEED: &str = "data-smudge-speed";
pub const ATTR_ZOOM: &str = "data-smudge-zoom";
pub const ATTR_GRAIN_AMOUNT: &str = "data-smudge-grain-amount";
pub const ATTR_GRAIN_SPEED: &str = "data-smudge-grain-speed";

impl EffectParams {
    /// Apply per-element overrides. `lookup` returns the raw attribute value
    /// for a name; unparsable values are logged and the current value kept.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let fields: [(&'static str, &mut f32); 4] = [
            (ATTR_SPEED, &mut self.speed),
            (ATTR_ZOOM, &mut self.zoom),
            (ATTR_GRAIN_AMOUNT, &mut self.grain_amount),
            (ATTR_GRAIN_SPEED, &mut self.grain_speed),
        ];
        for (key, slot) in fields {
            let Some(raw) = lookup(key) else {
                continue;
            };
            match parse_param(key, &raw) {
                Ok(v) => *slot = v,
                Err(e) => log::warn!("[params] {}", e),
            }
        }
        self
    }
}

pub fn parse_param(key: &'static str, raw: &str) -> Result<f32, EffectError> {
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(EffectError::InvalidParam {
            key,
            value: raw.to_string(),
        }),
    }
}
