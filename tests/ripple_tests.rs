use neonfx::ripple::{ECHO_LINE_WIDTH, ECHO_OPACITY, INNER_RING};
use neonfx::{Color, DrawCommand, RecordingSurface, RippleConfig, RippleManager, RippleOptions};

fn manager() -> RippleManager<f64> {
    RippleManager::new(RippleConfig::default()).unwrap()
}

#[test]
fn ripple_starts_at_zero_radius() {
    let mut ripples = manager();
    ripples.trigger(50.0, 60.0, 1000.0);
    ripples.tick(1000.0);
    let event = &ripples.events()[0];
    assert_eq!(event.radius, 0.0);
    assert!((event.opacity - 0.5).abs() < 1e-12);
}

#[test]
fn ripple_reaches_full_size_near_the_end() {
    let mut ripples = manager();
    ripples.trigger(0.0, 0.0, 0.0);
    ripples.tick(999.0);
    let primary = ripples.events().iter().find(|e| e.start == 0.0).unwrap();
    assert!((primary.radius - 300.0).abs() < 1.0, "radius {}", primary.radius);
    assert!(primary.opacity < 0.001);
}

#[test]
fn opacity_strictly_decreases() {
    let mut ripples = manager();
    ripples.trigger(0.0, 0.0, 0.0);
    let mut last = f64::INFINITY;
    let mut now = 0.0;
    while now < 1000.0 {
        ripples.tick(now);
        let primary = ripples.events().iter().find(|e| e.start == 0.0).unwrap();
        assert!(primary.opacity < last, "opacity did not fall at {}", now);
        last = primary.opacity;
        now += 16.0;
    }
}

#[test]
fn ripple_removed_after_duration() {
    let mut ripples = manager();
    ripples.trigger(0.0, 0.0, 0.0);
    ripples.tick(1000.0);
    assert!(ripples.events().iter().all(|e| e.start != 0.0));
    ripples.tick(1100.0);
    assert!(ripples.events().is_empty());
    assert_eq!(ripples.pending_echoes(), 0);
}

#[test]
fn trigger_pairs_primary_with_echo() {
    let mut ripples = manager();
    ripples.trigger(30.0, 40.0, 500.0);
    ripples.tick(600.0);

    let events = ripples.events();
    assert_eq!(events.len(), 2);
    let (primary, echo) = (&events[0], &events[1]);
    assert_eq!(echo.start - primary.start, 100.0);
    assert_eq!(echo.origin, primary.origin);
    assert!((echo.base_opacity - primary.base_opacity * f64::from(ECHO_OPACITY)).abs() < 1e-6);
    assert!((echo.line_width - primary.line_width * f64::from(ECHO_LINE_WIDTH)).abs() < 1e-6);
    assert_eq!(echo.radius, 0.0);
}

#[test]
fn inactive_manager_ignores_triggers() {
    let mut ripples: RippleManager<f64> =
        RippleManager::new(RippleConfig::new().with_active(false)).unwrap();
    assert!(!ripples.trigger(10.0, 10.0, 0.0));
    ripples.tick(50.0);
    ripples.tick(150.0);
    assert!(ripples.events().is_empty());
    assert_eq!(ripples.pending_echoes(), 0);
}

#[test]
fn deactivating_drops_pending_echoes() {
    let mut ripples = manager();
    ripples.trigger(10.0, 10.0, 0.0);
    ripples.set_accepting(false);
    ripples.tick(200.0);
    assert_eq!(ripples.events().len(), 1);
    assert_eq!(ripples.pending_echoes(), 0);
}

#[test]
fn options_only_affect_future_ripples() {
    let mut ripples = manager();
    ripples.trigger(0.0, 0.0, 0.0);
    ripples
        .update_options(&RippleOptions {
            size: Some(100.0),
            duration: Some(500.0),
            color: Some(Color::rgb(255, 0, 0)),
            ..Default::default()
        })
        .unwrap();
    ripples.trigger(0.0, 0.0, 10.0);
    ripples.tick(400.0);

    let old = ripples.events().iter().find(|e| e.start == 0.0).unwrap();
    let new = ripples.events().iter().find(|e| e.start == 10.0).unwrap();
    assert_eq!(old.max_size, 300.0);
    assert_eq!(old.duration, 1000.0);
    assert_eq!(old.color, Color::NEON);
    assert_eq!(new.max_size, 100.0);
    assert_eq!(new.duration, 500.0);
}

#[test]
fn invalid_duration_rejected() {
    let mut ripples = manager();
    let err = ripples.update_options(&RippleOptions { duration: Some(0.0), ..Default::default() });
    assert!(err.is_err());
    assert_eq!(ripples.config().duration, 1000.0);
}

#[test]
fn render_draws_two_rings_per_ripple() {
    let mut ripples = manager();
    let mut surface = RecordingSurface::new(800.0, 600.0);
    ripples.trigger(100.0, 200.0, 0.0);
    ripples.tick(500.0);
    ripples.render(&mut surface);

    let circles: Vec<_> = surface.circles().collect();
    assert_eq!(circles.len(), 4);
    match (circles[0], circles[1]) {
        (
            DrawCommand::Circle { center, radius: outer, paint },
            DrawCommand::Circle { radius: inner, .. },
        ) => {
            assert_eq!(center.x, 100.0);
            assert_eq!(center.y, 200.0);
            assert!((outer - 150.0).abs() < 1e-3);
            assert!((inner - outer * INNER_RING).abs() < 1e-3);
            assert!((paint.alpha - 0.25).abs() < 1e-6);
            assert_eq!(paint.line_width, 2.0);
            assert!(paint.glow > 0.0);
        }
        other => panic!("unexpected commands {:?}", other),
    }
}

#[test]
fn late_echo_keeps_start_order() {
    let mut ripples = manager();
    ripples.trigger(10.0, 10.0, 0.0);
    ripples.trigger(90.0, 90.0, 150.0);
    // First frame after a long stall: the first echo (due at 100) is promoted
    // after the second primary already exists.
    ripples.tick(200.0);

    let starts: Vec<f64> = ripples.events().iter().map(|e| e.start).collect();
    assert_eq!(starts, vec![0.0, 100.0, 150.0]);

    let mut surface = RecordingSurface::new(800.0, 600.0);
    ripples.render(&mut surface);
    let centers: Vec<f32> = surface
        .circles()
        .map(|c| match c {
            DrawCommand::Circle { center, .. } => center.x,
            other => panic!("unexpected command {:?}", other),
        })
        .collect();
    assert_eq!(centers, vec![10.0, 10.0, 10.0, 10.0, 90.0, 90.0]);
}
