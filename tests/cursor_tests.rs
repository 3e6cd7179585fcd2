use neonfx::cursor::{MOVING_SCALE, PRESSED_SCALE};
use neonfx::{CursorConfig, CursorFollower, CursorOptions, SpringOptions};

fn follower() -> CursorFollower<f32> {
    CursorFollower::new(CursorConfig::default()).unwrap()
}

#[test]
fn marker_converges_on_pointer() {
    let mut cursor = follower();
    cursor.on_pointer_move(300.0, 120.0, 0.0);
    let mut now = 0.0;
    for _ in 0..600 {
        now += 16.0;
        cursor.tick(now);
    }
    let t = cursor.transform();
    assert!((t.x - 300.0).abs() < 0.01, "x {}", t.x);
    assert!((t.y - 120.0).abs() < 0.01, "y {}", t.y);
    assert!((t.scale - 1.0).abs() < 0.01);
    assert!(cursor.is_at_rest());
}

#[test]
fn circling_pointer_unwraps_rotation() {
    let mut cursor = follower();
    let mut now = 0.0;
    let mut targets = Vec::new();
    for i in 0..100 {
        now += 16.0;
        let angle = i as f32 * 0.2;
        cursor.on_pointer_move(400.0 + 100.0 * angle.cos(), 400.0 + 100.0 * angle.sin(), now);
        targets.push(cursor.rotation().target().0);
    }
    for pair in targets[2..].windows(2) {
        let step = (pair[1] - pair[0]).abs();
        assert!(step < 20.0, "rotation target jumped by {}", step);
    }
    let total = (targets[targets.len() - 1] - targets[2]).abs();
    assert!(total > 1000.0, "expected three turns, got {} degrees", total);
}

#[test]
fn heading_points_along_motion() {
    let mut cursor = follower();
    cursor.on_pointer_move(100.0, 100.0, 0.0);
    cursor.on_pointer_move(110.0, 100.0, 10.0);
    // Moving right: atan2 gives 0 degrees, plus the quarter turn.
    assert!((cursor.rotation().target().0 - 90.0).abs() < 1e-4);
}

#[test]
fn slow_motion_does_not_rotate() {
    let mut cursor = follower();
    cursor.on_pointer_move(100.0, 100.0, 0.0);
    cursor.on_pointer_move(100.5, 100.0, 100.0);
    assert_eq!(cursor.rotation().target().0, 0.0);
    assert!(!cursor.is_moving());
}

#[test]
fn moving_squashes_then_relaxes() {
    let mut cursor = follower();
    cursor.on_pointer_move(0.0, 0.0, 1000.0);
    cursor.on_pointer_move(20.0, 0.0, 1016.0);
    assert!(cursor.is_moving());
    assert_eq!(cursor.scale().target().0, MOVING_SCALE);

    cursor.tick(1165.0);
    assert_eq!(cursor.scale().target().0, MOVING_SCALE);
    cursor.tick(1166.0);
    assert_eq!(cursor.scale().target().0, 1.0);
    assert!(!cursor.is_moving());
}

#[test]
fn continued_motion_postpones_relax() {
    let mut cursor = follower();
    cursor.on_pointer_move(0.0, 0.0, 0.0);
    cursor.on_pointer_move(20.0, 0.0, 16.0);
    cursor.on_pointer_move(40.0, 0.0, 120.0);
    cursor.tick(200.0);
    assert_eq!(cursor.scale().target().0, MOVING_SCALE);
    cursor.tick(270.0);
    assert_eq!(cursor.scale().target().0, 1.0);
}

#[test]
fn press_pops_then_reverts() {
    let mut cursor = follower();
    cursor.on_trigger(500.0);
    assert_eq!(cursor.scale().target().0, PRESSED_SCALE);
    assert!(cursor.transform().pressed);

    cursor.tick(650.0);
    assert_eq!(cursor.scale().target().0, PRESSED_SCALE);
    assert!(cursor.scale().value().0 > 1.0);

    cursor.tick(700.0);
    assert_eq!(cursor.scale().target().0, 1.0);
    assert!(cursor.transform().pressed);

    cursor.tick(800.0);
    assert!(!cursor.transform().pressed);
}

#[test]
fn options_keep_motion() {
    let mut cursor = follower();
    cursor.on_pointer_move(200.0, 0.0, 0.0);
    for i in 1..=5 {
        cursor.tick(i as f64 * 16.0);
    }
    let before = cursor.transform();
    let velocity = cursor.position().velocity();
    cursor
        .update_options(&CursorOptions {
            spring_config: Some(SpringOptions { stiffness: Some(150.0), ..Default::default() }),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(cursor.transform(), before);
    assert_eq!(cursor.position().velocity(), velocity);
    assert_eq!(cursor.config().spring_config.stiffness, 150.0);
}

#[test]
fn rejected_options_keep_config() {
    let mut cursor = follower();
    let result = cursor.update_options(&CursorOptions {
        spring_config: Some(SpringOptions { mass: Some(0.0), ..Default::default() }),
        ..Default::default()
    });
    assert!(result.is_err());
    assert_eq!(cursor.config().spring_config.mass, 1.0);
}
