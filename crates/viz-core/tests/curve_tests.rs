use glam::Vec3;
use viz_core::constants::*;
use viz_core::{
    control_points, generate_trajectory, initial_state_vec3, sweep_tube, CatmullRom, LorenzParams,
    VizError,
};

const EPS: f32 = 1e-4;

fn sample_trajectory(n: usize) -> Vec<Vec3> {
    generate_trajectory(&LorenzParams::default(), initial_state_vec3(), n).positions
}

#[test]
fn control_point_count_matches_stride() {
    let positions = sample_trajectory(SAMPLE_COUNT);
    let points = control_points(&positions, CURVE_STRIDE).unwrap();
    assert_eq!(points.len(), SAMPLE_COUNT.div_ceil(CURVE_STRIDE) + 1);

    let positions = sample_trajectory(101);
    let points = control_points(&positions, 50).unwrap();
    // Samples at 0, 50, 100 plus the closing point.
    assert_eq!(points.len(), 4);
}

#[test]
fn loop_is_closed() {
    let positions = sample_trajectory(500);
    let points = control_points(&positions, 50).unwrap();
    assert_eq!(points.first(), points.last());
}

#[test]
fn degenerate_when_stride_exceeds_length() {
    let positions = sample_trajectory(30);
    match control_points(&positions, 50) {
        Err(VizError::DegenerateCurve(n)) => assert_eq!(n, 1),
        other => panic!("expected DegenerateCurve, got {other:?}"),
    }

    match control_points(&[], 50) {
        Err(VizError::DegenerateCurve(0)) => {}
        other => panic!("expected DegenerateCurve(0), got {other:?}"),
    }
}

#[test]
fn curve_needs_two_points() {
    assert!(CatmullRom::new(vec![Vec3::ZERO]).is_err());
    assert!(CatmullRom::new(vec![Vec3::ZERO, Vec3::X]).is_ok());
}

#[test]
fn curve_interpolates_its_control_points() {
    let points = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 2.0, 0.0),
        Vec3::new(3.0, 1.0, -1.0),
        Vec3::new(4.0, -1.0, 2.0),
    ];
    let curve = CatmullRom::new(points.clone()).unwrap();
    let n = points.len();
    for (i, p) in points.iter().enumerate() {
        let t = i as f32 / (n - 1) as f32;
        assert!(
            (curve.position(t) - *p).length() < EPS,
            "knot {i} not interpolated"
        );
    }
}

#[test]
fn tube_has_expected_vertex_and_index_counts() {
    let positions = sample_trajectory(SAMPLE_COUNT);
    let curve = CatmullRom::new(control_points(&positions, CURVE_STRIDE).unwrap()).unwrap();
    let mesh = sweep_tube(&curve, TUBE_SEGMENTS, TUBE_RADIUS, TUBE_RADIAL_SEGMENTS);

    // One ring per sampled span end, open at both ends.
    assert_eq!(mesh.vertices.len(), (TUBE_SEGMENTS + 1) * TUBE_RADIAL_SEGMENTS);
    assert_eq!(mesh.indices.len(), TUBE_SEGMENTS * TUBE_RADIAL_SEGMENTS * 6);
    let max = mesh.vertices.len() as u32;
    assert!(mesh.indices.iter().all(|&i| i < max));
}

#[test]
fn tube_rings_sit_at_the_cross_section_radius() {
    let positions = sample_trajectory(SAMPLE_COUNT);
    let curve = CatmullRom::new(control_points(&positions, CURVE_STRIDE).unwrap()).unwrap();
    let mesh = sweep_tube(&curve, TUBE_SEGMENTS, TUBE_RADIUS, TUBE_RADIAL_SEGMENTS);

    for (i, v) in mesh.vertices.iter().enumerate() {
        let ring = i / TUBE_RADIAL_SEGMENTS;
        let t = ring as f32 / TUBE_SEGMENTS as f32;
        let center = curve.position(t);
        let dist = (Vec3::from(v.position) - center).length();
        assert!(
            (dist - TUBE_RADIUS).abs() < EPS,
            "ring {ring}: vertex at distance {dist} from centerline"
        );
        // Normals point outward from the centerline and are unit length.
        assert!((Vec3::from(v.normal).length() - 1.0).abs() < EPS);
    }
}
