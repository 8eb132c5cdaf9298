use glam::Vec3;

// Shared tuning constants for both visualizations.

// Lorenz system
pub const SIGMA: f32 = 10.0;
pub const RHO: f32 = 28.0;
pub const BETA: f32 = 8.0 / 3.0;
pub const DT: f32 = 0.01; // integration time step
pub const SAMPLE_COUNT: usize = 5000;
pub const DISPLAY_SCALE: f32 = 0.5; // shrinks the attractor to fit the view
pub const INITIAL_STATE: [f32; 3] = [0.1, 0.0, 0.0];

// Trajectory colors: offset + amplitude * sin(2*pi*t + phase) per channel
pub const COLOR_R_OFFSET: f32 = 0.4;
pub const COLOR_R_AMPLITUDE: f32 = 0.6;
pub const COLOR_R_PHASE: f32 = 0.0;
pub const COLOR_G_OFFSET: f32 = 0.4;
pub const COLOR_G_AMPLITUDE: f32 = 0.6;
pub const COLOR_G_PHASE: f32 = 2.0;
pub const COLOR_B_OFFSET: f32 = 0.8;
pub const COLOR_B_AMPLITUDE: f32 = 0.2;
pub const COLOR_B_PHASE: f32 = 4.0;

// Curve and tube
pub const CURVE_STRIDE: usize = 50; // every Nth trajectory sample becomes a control point
pub const TUBE_SEGMENTS: usize = 150;
pub const TUBE_RADIUS: f32 = 0.03;
pub const TUBE_RADIAL_SEGMENTS: usize = 8;

// Symbol field
pub const SYMBOL_COUNT: usize = 40;
pub const FIELD_BOUND_X: f32 = 15.0;
pub const FIELD_BOUND_Y: f32 = 8.0;
pub const FIELD_BOUND_Z: f32 = 5.0;
pub const LINK_DISTANCE: f32 = 5.0; // max distance for a proximity edge
pub const EDGE_REFRESH_INTERVAL: u32 = 20; // frames between edge-set rebuilds
pub const SECONDARY_ROTATION_FACTOR: f32 = 0.7; // y-axis spin relative to x-axis spin

// Gestures
pub const DRAG_ROTATE_FACTOR: f32 = 0.01; // radians per dragged pixel
pub const ZOOM_STEP: f32 = 0.1;
pub const ZOOM_MIN: f32 = 0.5; // exclusive
pub const ZOOM_MAX: f32 = 2.0; // exclusive

// Render loop
pub const BACKGROUND_SPIN: f32 = 0.002; // radians per frame, additive with drags

// Cameras
pub const ATTRACTOR_CAMERA_Z: f32 = 30.0;
pub const SYMBOL_CAMERA_Z: f32 = 15.0;
pub const CAMERA_FOVY_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

#[inline]
pub fn initial_state_vec3() -> Vec3 {
    Vec3::new(INITIAL_STATE[0], INITIAL_STATE[1], INITIAL_STATE[2])
}
