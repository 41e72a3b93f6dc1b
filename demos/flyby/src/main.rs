// flyby: a headless tour of the tweening engine.
//
// Spawns a few props into a PropStage and runs the scheduler at a
// simulated 60 fps: a drone flies a bezier arc while facing along it, a
// beacon pulses and washes through colors, and the soundtrack cross-fades
// from one track to another. Run with RUST_LOG=debug for scheduler chatter.

use std::sync::Arc;

use glam::{Quat, Vec3};
use glide_engine::{
    Curve, Motion, MotionPath, Pose, Prop, PropStage, Rgba, Rng, Scheduler, TargetId, TickDelta,
    Tween, TweenEvent, WeightedTable,
};

const DRONE: TargetId = TargetId(1);
const BEACON: TargetId = TargetId(2);
const TRACK_A: TargetId = TargetId(3);
const TRACK_B: TargetId = TargetId(4);
const CAMERA: TargetId = TargetId(5);

const EV_FLIGHT_DONE: TweenEvent = TweenEvent(1);
const EV_PULSE_DONE: TweenEvent = TweenEvent(2);
const EV_FADE_DONE: TweenEvent = TweenEvent(3);

const DT: f32 = 1.0 / 60.0;
const RUN_SECONDS: f32 = 6.0;

fn main() {
    env_logger::init();

    let mut stage = PropStage::new();
    stage.spawn(DRONE, Prop::new());
    stage.spawn(BEACON, Prop::new().with_position(Vec3::new(0.0, 2.0, 0.0)));
    stage.spawn(TRACK_A, Prop::new().with_volume(0.8));
    stage.spawn(TRACK_B, Prop::new().with_volume(0.0));
    stage.spawn(CAMERA, Prop::new().with_position(Vec3::new(-12.0, 4.0, 6.0)));

    let mut scheduler = Scheduler::new();

    // Drone: fly an arc over the beacon, nose along the path.
    let arc = Arc::new(
        MotionPath::quadratic(
            Vec3::new(-8.0, 0.0, 0.0),
            Vec3::new(0.0, 6.0, 0.0),
            Vec3::new(8.0, 0.0, 0.0),
            48,
            true,
        )
        .expect("flight path"),
    );
    scheduler.add(
        DRONE,
        Tween::follow_path(arc, Motion::over(4.0).with_event(EV_FLIGHT_DONE)).aligned(),
    );

    // Beacon: pulse the scale out and back twice, symmetric legs.
    scheduler.add(
        BEACON,
        Tween::scale(
            Vec3::ONE,
            Vec3::splat(1.6),
            Motion::over(0.75)
                .with_curve(Curve::ease_in())
                .mirror_ping_pong(3)
                .with_event(EV_PULSE_DONE),
        ),
    );

    // Beacon: wash toward a randomly chosen highlight color.
    let mut rng = Rng::new(0xF1B7);
    let palette = WeightedTable::new()
        .with(Rgba::new(1.0, 0.45, 0.1, 1.0), 3)
        .with(Rgba::new(0.2, 0.6, 1.0, 1.0), 3)
        .with(Rgba::GREEN, 1);
    let wash = *palette.pick(&mut rng).expect("palette is non-empty");
    scheduler.add(
        BEACON,
        Tween::color(Rgba::WHITE, wash, Motion::over(2.0).with_curve(Curve::linear())),
    );

    // Camera: glide to the landing spot as one pose operation.
    let camera_from = Pose::of(stage.get(CAMERA).expect("camera prop"));
    let camera_to = Pose::new(
        Vec3::new(10.0, 1.5, 2.0),
        Quat::from_rotation_y(-0.4),
        Vec3::splat(0.8),
    );
    scheduler.match_pose(CAMERA, &camera_from, &camera_to, Motion::over(5.0));

    // Soundtrack: hand over from track A to track B.
    scheduler.cross_fade(
        TRACK_A,
        0.8,
        TRACK_B,
        1.0,
        Motion::over(3.0).with_event(EV_FADE_DONE),
    );

    let ticks = (RUN_SECONDS / DT) as u32;
    for tick in 0..ticks {
        scheduler.advance_all(TickDelta::uniform(DT), &mut stage);

        for event in scheduler.drain_completed() {
            let t = tick as f32 * DT;
            match event {
                EV_FLIGHT_DONE => log::info!("[{t:5.2}s] drone landed"),
                EV_PULSE_DONE => log::info!("[{t:5.2}s] beacon pulse finished"),
                EV_FADE_DONE => log::info!("[{t:5.2}s] cross-fade complete"),
                other => log::warn!("[{t:5.2}s] unexpected event {other:?}"),
            }
        }

        if tick % 60 == 0 {
            let drone = stage.get(DRONE).expect("drone prop");
            println!(
                "t={:4.1}s drone=({:6.2}, {:5.2}) beacon scale={:.2}",
                tick as f32 * DT,
                drone.position.x,
                drone.position.y,
                stage.get(BEACON).expect("beacon prop").scale.x,
            );
        }
    }

    let drone = stage.get(DRONE).expect("drone prop");
    let beacon = stage.get(BEACON).expect("beacon prop");
    println!(
        "done: drone at ({:.2}, {:.2}), beacon color ({:.2}, {:.2}, {:.2}), volumes A={:.2} B={:.2}",
        drone.position.x,
        drone.position.y,
        beacon.color.r,
        beacon.color.g,
        beacon.color.b,
        stage.get(TRACK_A).expect("track A").volume,
        stage.get(TRACK_B).expect("track B").volume,
    );
    assert!(scheduler.is_empty(), "all tweens should have completed");
}
