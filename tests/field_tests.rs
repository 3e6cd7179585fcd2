use neonfx::{
    Color, DrawCommand, ParticleConfig, ParticleField, ParticleOptions, RecordingSurface, Vec2,
};

fn quiet_field(count: usize, width: f32, height: f32) -> ParticleField<f32> {
    let config = ParticleConfig::new().with_count(count).with_blink_probability(0.0);
    let mut field = ParticleField::new(config, width, height, 9).unwrap();
    for p in field.particles_mut() {
        p.velocity = Vec2::new(0.0, 0.0);
    }
    field
}

#[test]
fn particles_stay_in_bounds() {
    for seed in 0..8 {
        let config = ParticleConfig::new().with_count(60).with_speed(3.0);
        let mut field: ParticleField<f32> = ParticleField::new(config, 300.0, 200.0, seed).unwrap();
        field.set_pointer(Some(Vec2::new(150.0, 100.0)));
        for frame in 0..1000 {
            field.tick(frame as f64 * 16.7);
            for p in field.particles() {
                assert!(p.pos.x >= 0.0 && p.pos.x < 300.0, "x out of bounds: {}", p.pos.x);
                assert!(p.pos.y >= 0.0 && p.pos.y < 200.0, "y out of bounds: {}", p.pos.y);
            }
        }
    }
}

#[test]
fn particle_leaving_right_edge_reenters_left() {
    let mut field = quiet_field(1, 100.0, 100.0);
    let p = &mut field.particles_mut()[0];
    p.pos = Vec2::new(99.5, 40.0);
    p.velocity = Vec2::new(1.0, 0.0);
    field.tick(0.0);
    let p = &field.particles()[0];
    assert!(p.pos.x < 1.0, "expected wrap, got {}", p.pos.x);
    assert_eq!(p.pos.y, 40.0);
}

#[test]
fn pointer_repels_inside_radius() {
    let mut field = quiet_field(1, 400.0, 400.0);
    field.particles_mut()[0].pos = Vec2::new(110.0, 100.0);
    field.set_pointer(Some(Vec2::new(100.0, 100.0)));
    field.tick(0.0);
    let p = &field.particles()[0];
    assert!((p.pos.x - 110.9).abs() < 1e-4, "got {}", p.pos.x);
    assert_eq!(p.pos.y, 100.0);
}

#[test]
fn pointer_ignores_particles_outside_radius() {
    let mut field = quiet_field(1, 400.0, 400.0);
    field.particles_mut()[0].pos = Vec2::new(250.0, 100.0);
    field.set_pointer(Some(Vec2::new(100.0, 100.0)));
    field.tick(0.0);
    assert_eq!(field.particles()[0].pos, Vec2::new(250.0, 100.0));
}

#[test]
fn pointer_cleared_stops_repulsion() {
    let mut field = quiet_field(1, 400.0, 400.0);
    field.particles_mut()[0].pos = Vec2::new(110.0, 100.0);
    field.set_pointer(Some(Vec2::new(100.0, 100.0)));
    field.set_pointer(None);
    field.tick(0.0);
    assert_eq!(field.particles()[0].pos, Vec2::new(110.0, 100.0));
}

#[test]
fn non_interactive_field_ignores_pointer() {
    let config = ParticleConfig::new().with_count(1).with_mouse_interactive(false);
    let mut field: ParticleField<f32> = ParticleField::new(config, 400.0, 400.0, 3).unwrap();
    field.set_pointer(Some(Vec2::new(10.0, 10.0)));
    assert!(field.pointer().position.is_none());
}

#[test]
fn update_options_rebuilds_population() {
    let mut field: ParticleField<f32> =
        ParticleField::new(ParticleConfig::new().with_count(10), 500.0, 500.0, 5).unwrap();
    let red = Color::rgb(255, 0, 64);
    field
        .update_options(&ParticleOptions { count: Some(25), color: Some(red), ..Default::default() })
        .unwrap();
    assert_eq!(field.particles().len(), 25);
    assert!(field.particles().iter().all(|p| p.color == red));
    assert_eq!(field.config().count, 25);
}

#[test]
fn rejected_update_leaves_field_untouched() {
    let mut field: ParticleField<f32> =
        ParticleField::new(ParticleConfig::new().with_count(10), 500.0, 500.0, 5).unwrap();
    let before: Vec<_> = field.particles().to_vec();
    assert!(field
        .update_options(&ParticleOptions { opacity: Some(1.5), ..Default::default() })
        .is_err());
    assert_eq!(field.particles(), &before[..]);
    assert_eq!(field.config().opacity, 0.6);
}

#[test]
fn empty_field_is_valid() {
    let mut field: ParticleField<f32> =
        ParticleField::new(ParticleConfig::new().with_count(0), 500.0, 500.0, 1).unwrap();
    let mut surface = RecordingSurface::new(500.0, 500.0);
    field.tick(16.0);
    field.render(&mut surface);
    assert!(field.particles().is_empty());
    assert!(surface.commands().is_empty());
    assert_eq!(surface.clears(), 1);
}

#[test]
fn resize_repopulates_inside_new_bounds() {
    let mut field: ParticleField<f32> =
        ParticleField::new(ParticleConfig::new().with_count(40), 1000.0, 1000.0, 11).unwrap();
    field.resize(50.0, 20.0);
    assert_eq!(field.particles().len(), 40);
    assert_eq!(field.bounds(), (50.0, 20.0));
    for p in field.particles() {
        assert!(p.pos.x >= 0.0 && p.pos.x < 50.0);
        assert!(p.pos.y >= 0.0 && p.pos.y < 20.0);
    }
}

#[test]
fn blinking_opacity_stays_clamped() {
    let config = ParticleConfig::new().with_count(30).with_blink_probability(1.0);
    let mut field: ParticleField<f32> = ParticleField::new(config, 300.0, 300.0, 4).unwrap();
    assert!(field.particles().iter().all(|p| p.blinking));
    for frame in 0..500 {
        field.tick(1000.0 + frame as f64 * 16.0);
        for p in field.particles() {
            assert!(p.opacity >= 0.1 && p.opacity <= 1.0);
        }
    }
}

#[test]
fn render_draws_discs_then_links() {
    let mut field = quiet_field(3, 1000.0, 1000.0);
    {
        let ps = field.particles_mut();
        ps[0].pos = Vec2::new(100.0, 100.0);
        ps[0].size = 2.0;
        ps[0].opacity = 0.6;
        ps[1].pos = Vec2::new(150.0, 100.0);
        ps[1].size = 3.0;
        ps[2].pos = Vec2::new(800.0, 800.0);
    }
    let mut surface = RecordingSurface::new(1000.0, 1000.0);
    field.render(&mut surface);

    assert_eq!(surface.discs().count(), 3);
    assert!(matches!(surface.commands()[3], DrawCommand::Line { .. }));

    let lines: Vec<_> = surface.lines().collect();
    assert_eq!(lines.len(), 1);
    match lines[0] {
        DrawCommand::Line { from, to, paint } => {
            assert_eq!(*from, Vec2::new(100.0, 100.0));
            assert_eq!(*to, Vec2::new(150.0, 100.0));
            assert!((paint.alpha - 0.06).abs() < 1e-6, "alpha {}", paint.alpha);
            assert!((paint.line_width - 0.5).abs() < 1e-6);
        }
        other => panic!("unexpected command {:?}", other),
    }

    match &surface.commands()[0] {
        DrawCommand::Disc { radius, paint, .. } => {
            assert_eq!(*radius, 2.0);
            assert_eq!(paint.glow, 4.0);
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn bright_particles_draw_with_unit_alpha() {
    let mut field = quiet_field(1, 500.0, 500.0);
    field.particles_mut()[0].opacity = 1.1;
    let mut surface = RecordingSurface::new(500.0, 500.0);
    field.render(&mut surface);
    match &surface.commands()[0] {
        DrawCommand::Disc { paint, .. } => assert_eq!(paint.alpha, 1.0),
        other => panic!("unexpected command {:?}", other),
    }
}
