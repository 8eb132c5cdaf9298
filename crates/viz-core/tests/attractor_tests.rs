use viz_core::constants::*;
use viz_core::{generate_trajectory, initial_state_vec3, sample_color, LorenzParams};

const EPS: f32 = 1e-5;

#[test]
fn produces_exact_sample_counts() {
    let params = LorenzParams::default();
    for n in [1usize, 10, 500, SAMPLE_COUNT] {
        let traj = generate_trajectory(&params, initial_state_vec3(), n);
        assert_eq!(traj.positions.len(), n);
        assert_eq!(traj.colors.len(), n);
        assert_eq!(traj.len(), n);
    }
}

#[test]
fn zero_samples_yield_empty_trajectory() {
    let traj = generate_trajectory(&LorenzParams::default(), initial_state_vec3(), 0);
    assert!(traj.is_empty());
    assert!(traj.colors.is_empty());
    // The color fraction must not divide by zero either.
    let c = sample_color(0, 0);
    assert!(c.x.is_finite() && c.y.is_finite() && c.z.is_finite());
}

#[test]
fn integration_is_deterministic() {
    let params = LorenzParams::default();
    let a = generate_trajectory(&params, initial_state_vec3(), 2000);
    let b = generate_trajectory(&params, initial_state_vec3(), 2000);
    assert_eq!(a.positions, b.positions);
    assert_eq!(a.colors, b.colors);
}

#[test]
fn first_sample_is_one_euler_step_from_initial() {
    let params = LorenzParams::default();
    let initial = initial_state_vec3();
    let traj = generate_trajectory(&params, initial, 1);

    let (x, y, z) = (initial.x, initial.y, initial.z);
    let dx = params.sigma * (y - x) * params.dt;
    let dy = (x * (params.rho - z) - y) * params.dt;
    let dz = (x * y - params.beta * z) * params.dt;
    let expected = glam::Vec3::new(x + dx, y + dy, z + dz) * DISPLAY_SCALE;

    assert!((traj.positions[0] - expected).length() < EPS);
}

#[test]
fn color_channels_stay_within_their_bands() {
    let traj = generate_trajectory(&LorenzParams::default(), initial_state_vec3(), 1000);
    for c in &traj.colors {
        assert!(c.x >= COLOR_R_OFFSET - COLOR_R_AMPLITUDE - EPS);
        assert!(c.x <= COLOR_R_OFFSET + COLOR_R_AMPLITUDE + EPS);
        assert!(c.y >= COLOR_G_OFFSET - COLOR_G_AMPLITUDE - EPS);
        assert!(c.y <= COLOR_G_OFFSET + COLOR_G_AMPLITUDE + EPS);
        assert!(c.z >= COLOR_B_OFFSET - COLOR_B_AMPLITUDE - EPS);
        assert!(c.z <= COLOR_B_OFFSET + COLOR_B_AMPLITUDE + EPS);
    }
}

#[test]
fn colors_depend_only_on_index_fraction() {
    // Same index fraction, different trajectories: colors match exactly.
    let a = sample_color(250, 1000);
    let b = sample_color(25, 100);
    assert!((a - b).length() < EPS);

    // Phases are 0, 2 and 4 radians; at t = 0 that pins each channel.
    let c0 = sample_color(0, 1000);
    assert!((c0.x - COLOR_R_OFFSET).abs() < EPS);
    assert!((c0.y - (COLOR_G_OFFSET + COLOR_G_AMPLITUDE * 2.0f32.sin())).abs() < EPS);
    assert!((c0.z - (COLOR_B_OFFSET + COLOR_B_AMPLITUDE * 4.0f32.sin())).abs() < EPS);
}
