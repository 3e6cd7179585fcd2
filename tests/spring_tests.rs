use neonfx::spring::step;
use neonfx::{ChannelState, PlanarChannel, Scalar, ScalarChannel, SpringChannel, SpringConfig, Vec2, FRAME_DT};

#[test]
fn rest_is_a_fixed_point() {
    let mut x = Scalar(3.5f32);
    let mut v = Scalar(0.0f32);
    for _ in 0..1000 {
        let (nx, nv) = step(x, Scalar(3.5), v, 400.0, 45.0, 1.0, FRAME_DT);
        x = nx;
        v = nv;
    }
    assert_eq!(x.0, 3.5);
    assert_eq!(v.0, 0.0);
}

#[test]
fn standard_profile_converges_within_bounded_steps() {
    let config = SpringConfig::default();
    let mut channel: ScalarChannel<f32> = SpringChannel::new(Scalar(0.0));
    channel.set_target(Scalar(10.0));

    let mut steps = 0;
    while channel.state(config.rest_delta) == ChannelState::Settling {
        channel.update(&config, FRAME_DT);
        steps += 1;
        assert!(steps < 600, "spring did not settle: value {}", channel.value().0);
    }
    assert!((channel.value().0 - 10.0).abs() < config.rest_delta);
}

#[test]
fn standard_profile_stays_finite() {
    let config = SpringConfig::default();
    let mut channel: PlanarChannel<f32> = SpringChannel::new(Vec2::new(0.0, 0.0));
    channel.set_target(Vec2::new(1920.0, -1080.0));
    for _ in 0..2000 {
        channel.update(&config, FRAME_DT);
        assert!(channel.value().x.is_finite() && channel.value().y.is_finite());
        assert!(channel.velocity().x.is_finite() && channel.velocity().y.is_finite());
    }
}

#[test]
fn planar_components_integrate_independently() {
    let config = SpringConfig::default();
    let mut planar: PlanarChannel<f64> = SpringChannel::new(Vec2::new(0.0, 0.0));
    let mut x: ScalarChannel<f64> = SpringChannel::new(Scalar(0.0));
    let mut y: ScalarChannel<f64> = SpringChannel::new(Scalar(0.0));
    planar.set_target(Vec2::new(40.0, -15.0));
    x.set_target(Scalar(40.0));
    y.set_target(Scalar(-15.0));

    for _ in 0..45 {
        planar.update(&config, 1.0 / 60.0);
        x.update(&config, 1.0 / 60.0);
        y.update(&config, 1.0 / 60.0);
    }
    assert_eq!(planar.value().x, x.value().0);
    assert_eq!(planar.value().y, y.value().0);
}

#[test]
fn softer_spring_lags_behind() {
    let stiff = SpringConfig::default();
    let soft = SpringConfig::new().with_stiffness(100.0);
    let mut a: ScalarChannel<f32> = SpringChannel::new(Scalar(0.0));
    let mut b: ScalarChannel<f32> = SpringChannel::new(Scalar(0.0));
    a.set_target(Scalar(10.0));
    b.set_target(Scalar(10.0));
    for _ in 0..10 {
        a.update(&stiff, FRAME_DT);
        b.update(&soft, FRAME_DT);
    }
    assert!(a.value().0 > b.value().0);
}

#[test]
fn retarget_keeps_velocity() {
    let config = SpringConfig::default();
    let mut channel: ScalarChannel<f32> = SpringChannel::new(Scalar(0.0));
    channel.set_target(Scalar(10.0));
    for _ in 0..5 {
        channel.update(&config, FRAME_DT);
    }
    let velocity = channel.velocity().0;
    channel.set_target(Scalar(-10.0));
    assert_eq!(channel.velocity().0, velocity);
    assert_eq!(channel.state(config.rest_delta), ChannelState::Settling);
}
