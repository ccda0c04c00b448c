pub mod constants;
pub mod error;
pub mod layout;
pub mod params;
pub mod registry;
pub mod scheduler;
pub mod trail;

pub use constants::*;
pub use error::EffectError;
pub use layout::{QuadTransform, Rect, Viewport};
pub use params::EffectParams;
pub use registry::{Surface, SurfaceRegistry};
pub use scheduler::{FrameScheduler, LoopAction};
pub use trail::TrailField;

// Shaders bundled as string constants
pub static SMUDGE_WGSL: &str = include_str!("../../shaders/smudge.wgsl");
