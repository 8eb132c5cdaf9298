// Rendering-side tuning. Simulation constants live in viz-core.

/// World-space quad size of one trajectory particle.
pub const POINT_SPRITE_SIZE: f32 = 0.08;
pub const POINT_SPRITE_OPACITY: f32 = 0.7;

// World-space quad sizes per symbol shape, multiplied by the per-symbol
// random scale.
pub const DOT_BASE_SIZE: f32 = 0.4;
pub const BAR_BASE_SIZE: f32 = 0.8;
pub const RING_BASE_SIZE: f32 = 0.5;

/// Frames slower than this get a debug log line.
pub const SLOW_FRAME_MILLIS: u128 = 50;
