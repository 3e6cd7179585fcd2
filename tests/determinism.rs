use neonfx::{
    CursorConfig, CursorFollower, ParticleConfig, ParticleField, RippleConfig, RippleManager, Vec2,
};

#[test]
fn field_deterministic_for_seed() {
    let results: Vec<_> = (0..5).map(|_| {
        let mut field: ParticleField<f32> = ParticleField::new(
            ParticleConfig::new().with_count(30), 640.0, 480.0, 42,
        ).unwrap();
        field.set_pointer(Some(Vec2::new(320.0, 240.0)));
        for frame in 0..300 {
            field.tick(frame as f64 * 16.0);
        }
        field.particles().iter().map(|p| (p.pos.x, p.pos.y, p.opacity)).collect::<Vec<_>>()
    }).collect();

    for r in &results[1..] {
        assert_eq!(&results[0], r);
    }
}

#[test]
fn field_seeds_differ() {
    let a: ParticleField<f32> = ParticleField::new(ParticleConfig::new(), 640.0, 480.0, 1).unwrap();
    let b: ParticleField<f32> = ParticleField::new(ParticleConfig::new(), 640.0, 480.0, 2).unwrap();
    assert_ne!(a.particles()[0].pos, b.particles()[0].pos);
}

#[test]
fn cursor_deterministic() {
    let results: Vec<_> = (0..5).map(|_| {
        let mut cursor: CursorFollower<f32> = CursorFollower::new(CursorConfig::default()).unwrap();
        let mut now = 0.0;
        for i in 0..120 {
            now += 16.0;
            let angle = i as f32 * 0.1;
            cursor.on_pointer_move(200.0 + 80.0 * angle.cos(), 200.0 + 80.0 * angle.sin(), now);
            cursor.tick(now);
        }
        cursor.transform()
    }).collect();

    for r in &results[1..] {
        assert_eq!(results[0], *r);
    }
}

#[test]
fn ripples_deterministic() {
    let results: Vec<_> = (0..5).map(|_| {
        let mut ripples: RippleManager<f64> = RippleManager::new(RippleConfig::default()).unwrap();
        ripples.trigger(10.0, 10.0, 0.0);
        ripples.trigger(90.0, 40.0, 250.0);
        for frame in 0..40 {
            ripples.tick(frame as f64 * 16.0);
        }
        ripples.events().to_vec()
    }).collect();

    for r in &results[1..] {
        assert_eq!(&results[0], r);
    }
}
