use glam::Vec3;
use viz_core::constants::*;
use viz_core::{FieldBounds, Symbol, SymbolField};

#[test]
fn seeded_spawn_is_reproducible() {
    let a = SymbolField::new(SYMBOL_COUNT, FieldBounds::default(), 7);
    let b = SymbolField::new(SYMBOL_COUNT, FieldBounds::default(), 7);
    assert_eq!(a.symbols.len(), SYMBOL_COUNT);
    for (sa, sb) in a.symbols.iter().zip(&b.symbols) {
        assert_eq!(sa.position, sb.position);
        assert_eq!(sa.direction, sb.direction);
        assert_eq!(sa.kind, sb.kind);
        assert_eq!(sa.scale, sb.scale);
    }

    let c = SymbolField::new(SYMBOL_COUNT, FieldBounds::default(), 8);
    assert!(a.symbols.iter().zip(&c.symbols).any(|(x, y)| x.position != y.position));
}

#[test]
fn spawn_respects_configured_ranges() {
    let field = SymbolField::new(200, FieldBounds::default(), 42);
    for s in &field.symbols {
        assert!(s.position.x.abs() <= 15.0);
        assert!(s.position.y.abs() <= 7.5);
        assert!(s.position.z.abs() <= 5.0);
        assert!((0.5..=2.0).contains(&s.scale));
        assert!(s.rotation_speed.abs() <= 0.01);
        assert!((0.01..=0.03).contains(&s.movement_speed));
        assert!(s.direction.x.abs() <= 0.005);
        assert!((0.4..=0.7).contains(&s.opacity));
        for c in [s.color.x, s.color.y, s.color.z] {
            assert!((0.0..=1.0).contains(&c));
        }
    }
}

fn single_symbol_field(position: Vec3, direction: Vec3) -> SymbolField {
    SymbolField {
        symbols: vec![Symbol {
            position,
            direction,
            ..Symbol::default()
        }],
        bounds: FieldBounds::default(),
    }
}

#[test]
fn wall_bounce_flips_direction_component() {
    let mut field = single_symbol_field(Vec3::new(16.0, 0.0, 0.0), Vec3::new(0.02, 0.0, 0.0));
    field.step();
    assert_eq!(field.symbols[0].direction.x, -0.02);
}

#[test]
fn bounce_does_not_clamp_position() {
    let mut field = single_symbol_field(Vec3::new(14.99, 0.0, 0.0), Vec3::new(0.02, 0.0, 0.0));

    // The step that crosses the wall reverses the direction but leaves the
    // position where it landed, just outside the box.
    field.step();
    assert!(field.symbols[0].position.x > 15.0);
    assert_eq!(field.symbols[0].direction.x, -0.02);

    // The next step carries it back inside; no further flip happens.
    field.step();
    assert!(field.symbols[0].position.x <= 15.0);
    assert_eq!(field.symbols[0].direction.x, -0.02);
}

#[test]
fn in_bounds_direction_is_untouched() {
    let dir = Vec3::new(0.004, -0.003, 0.002);
    let mut field = single_symbol_field(Vec3::new(1.0, -2.0, 0.5), dir);
    for _ in 0..10 {
        field.step();
    }
    assert_eq!(field.symbols[0].direction, dir);
}

#[test]
fn each_axis_reflects_independently() {
    let mut field = single_symbol_field(
        Vec3::new(16.0, 9.0, 0.0),
        Vec3::new(0.02, 0.01, 0.005),
    );
    field.step();
    let d = field.symbols[0].direction;
    assert_eq!(d.x, -0.02);
    assert_eq!(d.y, -0.01);
    assert_eq!(d.z, 0.005);
}

#[test]
fn rotation_advances_with_secondary_axis() {
    let mut field = single_symbol_field(Vec3::ZERO, Vec3::ZERO);
    field.symbols[0].rotation_speed = 0.01;
    field.step();
    let r = field.symbols[0].rotation;
    assert!((r.x - 0.01).abs() < 1e-6);
    assert!((r.y - 0.01 * SECONDARY_ROTATION_FACTOR).abs() < 1e-6);
    assert_eq!(r.z, 0.0);
}

fn pair_field(a: Vec3, b: Vec3) -> SymbolField {
    SymbolField {
        symbols: vec![
            Symbol {
                position: a,
                ..Symbol::default()
            },
            Symbol {
                position: b,
                ..Symbol::default()
            },
        ],
        bounds: FieldBounds::default(),
    }
}

#[test]
fn edge_appears_just_inside_the_threshold() {
    let field = pair_field(Vec3::ZERO, Vec3::new(LINK_DISTANCE - 1e-3, 0.0, 0.0));
    assert_eq!(field.proximity_edges(LINK_DISTANCE), vec![(0, 1)]);
}

#[test]
fn no_edge_just_outside_the_threshold() {
    let field = pair_field(Vec3::ZERO, Vec3::new(LINK_DISTANCE + 1e-3, 0.0, 0.0));
    assert!(field.proximity_edges(LINK_DISTANCE).is_empty());
}

#[test]
fn edges_are_unique_ordered_pairs() {
    let field = SymbolField::new(SYMBOL_COUNT, FieldBounds::default(), 3);
    let edges = field.proximity_edges(LINK_DISTANCE);
    for &(i, j) in &edges {
        assert!(i < j, "pair ({i}, {j}) not ordered");
        assert!(j < field.symbols.len());
    }
    let mut dedup = edges.clone();
    dedup.sort_unstable();
    dedup.dedup();
    assert_eq!(dedup.len(), edges.len());
}
