// Host-side tests for the frame-update model of both sketches, driven
// through the recording surface and manual audio clock.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sketch_core::testing::{DrawCommand, ManualAudio, RecordingSurface};
use glam::Vec2;
use sketch_core::*;

fn reactor() -> AudioReactor<ManualAudio> {
    AudioReactor::new(ManualAudio::new())
}

fn ouroboros(seed: u64) -> Scene<Ouroboros, StdRng> {
    Scene::new(800.0, 600.0, StdRng::seed_from_u64(seed)).unwrap()
}

fn cave(seed: u64) -> Scene<Cave, StdRng> {
    Scene::new(800.0, 600.0, StdRng::seed_from_u64(seed)).unwrap()
}

#[test]
fn scene_rejects_empty_canvas() {
    let r = Scene::<Ouroboros, _>::new(0.0, 600.0, StdRng::seed_from_u64(1));
    assert!(matches!(r, Err(SceneError::InvalidViewport { .. })));
    let r = Scene::<Cave, _>::new(800.0, -1.0, StdRng::seed_from_u64(1));
    assert!(r.is_err());
}

#[test]
fn primitive_counts_match_configuration() {
    assert_eq!(ouroboros(1).primitive_count(), 10_000);
    assert_eq!(cave(1).primitive_count(), 300 * 100);
    let c = cave(1);
    assert_eq!(c.sketch().ridges().len(), 300);
    assert!(c.sketch().ridges().iter().all(|r| r.ys.len() == 100));
}

#[test]
fn primitive_count_is_invariant_across_frames() {
    let mut scene = ouroboros(2);
    let mut audio = reactor();
    let mut surface = RecordingSurface::new();
    for _ in 0..5 {
        surface.clear();
        scene.frame(&mut surface, &mut audio).unwrap();
        assert_eq!(scene.primitive_count(), 10_000);
        // halo + core per dot, plus the 150 gradient rings
        assert_eq!(surface.ellipses().count(), 10_000 * 2 + 150);
    }
}

#[test]
fn clock_advances_by_fixed_step_each_frame() {
    let mut scene = ouroboros(3);
    let mut audio = reactor();
    let mut surface = RecordingSurface::new();
    let mut prev = scene.t();
    assert_eq!(prev, 0.0);
    for frame in 1..=20u64 {
        surface.clear();
        let stats = scene.frame(&mut surface, &mut audio).unwrap();
        assert_eq!(stats.t, prev);
        let t = scene.t();
        assert!(t > prev);
        assert!((t - prev - 0.02).abs() < 1e-5);
        assert_eq!(scene.frames(), frame);
        prev = t;
    }

    let mut scene = cave(3);
    let mut surface = RecordingSurface::new();
    for _ in 0..10 {
        surface.clear();
        scene.frame(&mut surface, &mut audio).unwrap();
    }
    assert!((scene.t() - 0.1).abs() < 1e-5);
}

#[test]
fn dot_brightness_stays_in_visible_range() {
    let scene = ouroboros(4);
    for step in 0..400 {
        let t = step as f64 * 0.05;
        for dot in scene.sketch().dots() {
            let b = dot.brightness(t);
            assert!((30.0..=100.0).contains(&b), "brightness {b} at t={t}");
        }
    }
}

#[test]
fn drawn_dots_stay_inside_ring_band() {
    let mut scene = ouroboros(5);
    let ring = scene.sketch().ring();
    assert!((ring.base_radius - 270.0).abs() < 1e-3);
    assert!((ring.amplitude - 27.0).abs() < 1e-3);

    let mut surface = RecordingSurface::new();
    scene.frame(&mut surface, &mut reactor()).unwrap();
    let lo = ring.base_radius - ring.amplitude - 1e-2;
    let hi = ring.base_radius + ring.amplitude + 1e-2;
    let dots = surface.ellipses().filter(|(_, w, _)| *w == 4.0);
    let mut n = 0;
    for (center, _, color) in dots {
        let r = center.length();
        assert!(r >= lo && r <= hi, "radius {r} outside [{lo}, {hi}]");
        assert_eq!(color.a, 100.0);
        n += 1;
    }
    assert_eq!(n, 10_000);
}

#[test]
fn ouroboros_draw_order_is_background_then_dots_then_glitch() {
    let mut scene = ouroboros(6);
    scene.set_trigger(GlitchTrigger {
        probability: 1.0,
        ..GlitchTrigger::scatter()
    });
    let mut surface = RecordingSurface::new();
    let stats = scene.frame(&mut surface, &mut reactor()).unwrap();
    assert!(stats.glitched());

    let cmds = &surface.commands;
    assert!(matches!(cmds[0], DrawCommand::Rect { .. }));
    let first_halo = cmds
        .iter()
        .position(|c| matches!(c, DrawCommand::Ellipse { w, .. } if *w == 10.0))
        .unwrap();
    let last_dot = cmds
        .iter()
        .rposition(|c| matches!(c, DrawCommand::Ellipse { w, .. } if *w == 4.0))
        .unwrap();
    let first_line = cmds
        .iter()
        .position(|c| matches!(c, DrawCommand::Line { .. }))
        .unwrap();
    assert!(first_halo > 150);
    assert!(first_line > last_dot);
    assert_eq!(surface.lines().count(), stats.glitch_lines);
    assert!(matches!(cmds.last(), Some(DrawCommand::Restore)));

    // Halo precedes core for the same dot.
    match (&cmds[first_halo], &cmds[first_halo + 1]) {
        (
            DrawCommand::Ellipse { center: a, color: ca, .. },
            DrawCommand::Ellipse { center: b, w, color: cb, .. },
        ) => {
            assert_eq!(a, b);
            assert_eq!(*w, 4.0);
            assert_eq!(ca.b, cb.b);
            assert_eq!(ca.a, 20.0);
        }
        other => panic!("unexpected commands {other:?}"),
    }
}

#[test]
fn radial_gradient_brightens_toward_centre() {
    let mut scene = ouroboros(7);
    scene.set_trigger(GlitchTrigger {
        probability: 0.0,
        ..GlitchTrigger::scatter()
    });
    let mut surface = RecordingSurface::new();
    scene.frame(&mut surface, &mut reactor()).unwrap();
    let rings: Vec<_> = surface.ellipses().take(150).collect();
    assert!((rings[0].1 - 1000.0).abs() < 1e-2, "outer diameter spans the corners");
    assert_eq!(rings[0].2.b, 0.0);
    for pair in rings.windows(2) {
        assert!(pair[1].1 < pair[0].1);
        assert!(pair[1].2.b > pair[0].2.b);
    }
    assert!(rings[149].2.b < 10.0);
}

#[test]
fn ring_rotates_slowly_each_frame() {
    let mut scene = ouroboros(8);
    let mut surface = RecordingSurface::new();
    let mut audio = reactor();
    for _ in 0..10 {
        scene.frame(&mut surface, &mut audio).unwrap();
    }
    assert!((scene.sketch().rotation() + 0.002).abs() < 1e-6);
}

#[test]
fn cave_draws_glitch_under_ridges_with_one_burst() {
    let mut scene = cave(9);
    scene.set_trigger(GlitchTrigger {
        probability: 1.0,
        ..GlitchTrigger::vertical()
    });
    let mut surface = RecordingSurface::new();
    let mut audio = reactor();
    let before = audio.sink().count(NoiseChannel::Burst);
    let stats = scene.frame(&mut surface, &mut audio).unwrap();
    assert_eq!(stats.glitch_lines, 1);
    assert_eq!(stats.bursts, 1);
    assert_eq!(audio.sink().count(NoiseChannel::Burst), before + 1);

    let cmds = &surface.commands;
    let line = cmds
        .iter()
        .position(|c| matches!(c, DrawCommand::Line { .. }))
        .unwrap();
    let first_ridge = cmds
        .iter()
        .position(|c| matches!(c, DrawCommand::Polyline { .. }))
        .unwrap();
    let last_row = cmds
        .iter()
        .rposition(|c| matches!(c, DrawCommand::Rect { .. }))
        .unwrap();
    assert!(last_row < line && line < first_ridge);
    assert_eq!(surface.rects().count(), 600);
    assert_eq!(surface.polylines().count(), 300);
}

#[test]
fn ridges_move_as_one_within_jitter_bounds() {
    let mut scene = cave(10);
    scene.set_trigger(GlitchTrigger {
        probability: 0.0,
        ..GlitchTrigger::vertical()
    });
    let anchors: Vec<f32> = scene.sketch().ridges().iter().map(|r| r.base_x).collect();
    assert!((anchors[0] - 80.0).abs() < 1e-3);
    assert!((anchors[299] - 720.0).abs() < 1e-3);

    let mut audio = reactor();
    for _ in 0..30 {
        let mut surface = RecordingSurface::new();
        scene.frame(&mut surface, &mut audio).unwrap();
        for (ridge, base_x) in surface.polylines().zip(&anchors) {
            assert_eq!(ridge.len(), 100);
            let dx = ridge[0].x - base_x;
            assert!(dx.abs() <= 5.0, "jitter {dx}");
            assert!(ridge.iter().all(|p| (p.x - ridge[0].x).abs() < 1e-4));
            assert!((ridge[0].y - 60.0).abs() < 1e-3);
            assert!((ridge[99].y - 540.0).abs() < 1e-3);
        }
    }
}

#[test]
fn scatter_glitch_fires_one_burst_per_line() {
    let mut scene = ouroboros(11);
    scene.set_trigger(GlitchTrigger {
        probability: 1.0,
        ..GlitchTrigger::scatter()
    });
    let mut audio = reactor();
    let mut surface = RecordingSurface::new();
    let stats = scene.frame(&mut surface, &mut audio).unwrap();
    assert!((3..=7).contains(&stats.glitch_lines));
    assert_eq!(stats.bursts, stats.glitch_lines);
    // one initial silence envelope plus one per burst
    assert_eq!(audio.sink().count(NoiseChannel::Burst), 1 + stats.bursts);
    let peak = audio.burst_envelope().points[0].value;
    assert!((0.05..0.1).contains(&peak));
}

#[test]
fn long_run_glitch_rate_tracks_probability() {
    let mut scene = cave(12);
    let mut audio = reactor();
    // Refuse every draw call: only the trial, bursts and clock run.
    let mut surface = RecordingSurface::failing_after(0);
    let frames = 100_000;
    for _ in 0..frames {
        assert!(scene.frame(&mut surface, &mut audio).is_err());
    }
    assert_eq!(scene.frames(), frames);
    // cave fires one burst per successful trial
    let glitched = audio.sink().count(NoiseChannel::Burst) - 1;
    let rate = glitched as f64 / frames as f64;
    assert!((rate - 0.1).abs() < 0.01, "rate {rate}");
}

#[test]
fn failed_draw_skips_frame_but_time_moves_on() {
    let mut scene = ouroboros(13);
    let mut audio = reactor();
    let mut surface = RecordingSurface::failing_after(10);
    let err = scene.frame(&mut surface, &mut audio).unwrap_err();
    assert!(matches!(err, DrawError::Surface(_)));
    assert_eq!(scene.frames(), 1);

    let mut surface = RecordingSurface::new();
    let stats = scene.frame(&mut surface, &mut audio).unwrap();
    assert!((stats.t - 0.02).abs() < 1e-6);
}

#[test]
fn aborted_frame_does_not_leak_transform_into_next_frame() {
    let mut scene = ouroboros(20);
    scene.set_trigger(GlitchTrigger {
        probability: 0.0,
        ..GlitchTrigger::scatter()
    });
    let mut audio = reactor();
    // Call 200 is a dot, inside the ring's translate/rotate block.
    let mut surface = RecordingSurface::failing_once_at(200);
    assert!(scene.frame(&mut surface, &mut audio).is_err());
    assert_eq!(surface.depth(), 1);
    assert_eq!(surface.offset(), Vec2::new(400.0, 300.0));

    surface.clear();
    scene.frame(&mut surface, &mut audio).unwrap();
    assert_eq!(surface.frames_begun(), 2);
    assert!(matches!(
        surface.commands[0],
        DrawCommand::Rect { x, y, w, h, .. } if x == 0.0 && y == 0.0 && w == 800.0 && h == 600.0
    ));
    assert!(surface
        .commands
        .iter()
        .any(|c| matches!(c, DrawCommand::Translate(v) if *v == Vec2::new(400.0, 300.0))));
    assert_eq!(surface.depth(), 0);
    assert_eq!(surface.offset(), Vec2::ZERO);
}

#[test]
fn every_frame_starts_with_a_clean_surface() {
    let mut scene = cave(21);
    let mut audio = reactor();
    let mut surface = RecordingSurface::new();
    for _ in 0..3 {
        scene.frame(&mut surface, &mut audio).unwrap();
    }
    assert_eq!(surface.frames_begun(), 3);
    assert_eq!(surface.depth(), 0);
}

#[test]
fn resize_is_used_by_following_frames() {
    let mut scene = ouroboros(14);
    let ring_before = scene.sketch().ring();
    scene.resize(1024.0, 768.0);
    assert_eq!(scene.viewport(), Viewport::new(1024.0, 768.0).unwrap());
    assert_eq!(scene.sketch().ring(), ring_before);

    let mut surface = RecordingSurface::new();
    scene.frame(&mut surface, &mut reactor()).unwrap();
    assert!(matches!(
        surface.commands[0],
        DrawCommand::Rect { w, h, .. } if w == 1024.0 && h == 768.0
    ));
    assert!(surface
        .commands
        .iter()
        .any(|c| matches!(c, DrawCommand::Translate(v) if v.x == 512.0 && v.y == 384.0)));

    let mut cave = cave(14);
    cave.resize(300.0, 200.0);
    let mut surface = RecordingSurface::new();
    cave.frame(&mut surface, &mut reactor()).unwrap();
    assert_eq!(surface.rects().count(), 200);
}

#[test]
fn degenerate_resize_keeps_running() {
    let mut scene = cave(15);
    scene.set_trigger(GlitchTrigger {
        probability: 1.0,
        ..GlitchTrigger::vertical()
    });
    scene.resize(0.0, 0.0);
    let mut surface = RecordingSurface::new();
    let mut audio = reactor();
    for _ in 0..3 {
        scene.frame(&mut surface, &mut audio).unwrap();
    }
    assert_eq!(scene.frames(), 3);
}

#[test]
fn same_seed_gives_same_layout() {
    let a = ouroboros(16);
    let b = ouroboros(16);
    assert_eq!(a.sketch().dots(), b.sketch().dots());
    let c = ouroboros(17);
    assert_ne!(a.sketch().dots(), c.sketch().dots());
}

#[test]
fn dot_phases_are_uniform_over_full_turn() {
    let scene = ouroboros(18);
    let tau = std::f32::consts::TAU;
    let mut quadrants = [0usize; 4];
    for d in scene.sketch().dots() {
        for v in [d.angle, d.blink_phase, d.radius_phase] {
            assert!((0.0..tau).contains(&v));
        }
        quadrants[((d.angle / tau) * 4.0) as usize % 4] += 1;
    }
    for q in quadrants {
        assert!((2200..2800).contains(&q), "quadrant count {q}");
    }
}

#[test]
fn any_scene_dispatches_by_kind() {
    let mut scene = AnyScene::new(SketchKind::Cave, 640.0, 480.0, StdRng::seed_from_u64(19)).unwrap();
    assert_eq!(scene.kind(), SketchKind::Cave);
    assert_eq!(scene.primitive_count(), 30_000);
    let mut surface = RecordingSurface::new();
    scene.frame(&mut surface, &mut reactor()).unwrap();
    assert!((scene.t() - 0.01).abs() < 1e-6);
    scene.resize(320.0, 240.0);
    assert_eq!(scene.viewport().width, 320.0);

    let scene = AnyScene::new(SketchKind::Ouroboros, 640.0, 480.0, StdRng::seed_from_u64(19)).unwrap();
    assert_eq!(scene.kind(), SketchKind::Ouroboros);
    assert_eq!(scene.frames(), 0);
}
