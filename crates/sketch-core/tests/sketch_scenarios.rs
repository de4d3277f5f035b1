//! End-to-end scenarios for the sketch: particle lifetimes, click bursts,
//! clearing, ring geometry, resize preservation and the auto-pattern loop.

use std::f64::consts::TAU;

use sketch_core::schedule::TaskId;
use sketch_core::{
    Control, DrawOp, Input, Pattern, Raster, RecordingSurface, Rgba, Sketch, SketchConfig,
    Surface,
};

fn config(seed: u64) -> SketchConfig {
    SketchConfig {
        seed: Some(seed),
        greeting: false,
        ..SketchConfig::default()
    }
}

fn recording(seed: u64) -> Sketch<RecordingSurface> {
    Sketch::new(RecordingSurface::new(400.0, 300.0), &config(seed))
}

fn to_particles(sketch: &mut Sketch<impl Surface>) {
    while sketch.mode() != Pattern::Particles {
        sketch.next_mode();
    }
}

// ── Particle lifetime ───────────────────────────────────────────────────

#[test]
fn single_particle_lives_one_hundred_passes() {
    let mut field = sketch_core::ParticleField::new();
    let palette = *sketch_core::PaletteRegistry::builtin().get(0);
    let mut rng = fastrand::Rng::with_seed(11);
    let mut surface = RecordingSurface::new(100.0, 100.0);
    field.spawn(10.0, 10.0, 1, &palette, &mut rng);

    for _ in 0..99 {
        assert_eq!(field.advance_all(&mut surface), 1);
    }
    assert_eq!(field.len(), 1);
    assert_eq!(field.iter().next().map(|p| p.life), Some(1));

    // The 100th pass spends the last life; the particle is drawn fully
    // transparent and pruned on the following pass.
    assert_eq!(field.advance_all(&mut surface), 1);
    assert!(field.iter().all(|p| !p.is_alive()));
    assert_eq!(surface.fills().last().map(|f| f.alpha), Some(0.0));

    assert_eq!(field.advance_all(&mut surface), 0);
    assert!(field.is_empty());
    assert_eq!(surface.fills().len(), 100);
}

#[test]
fn empty_field_stays_empty_and_reports_zero() {
    let mut field = sketch_core::ParticleField::new();
    let mut surface = RecordingSurface::new(10.0, 10.0);
    for _ in 0..3 {
        assert_eq!(field.advance_all(&mut surface), 0);
    }
    assert!(field.is_empty());
    assert!(surface.ops().is_empty());
}

#[test]
fn particle_task_drains_field_outside_particle_mode() {
    let mut s = recording(2);
    s.handle(Input::Click { x: 20.0, y: 20.0 });
    assert_eq!(s.mode(), Pattern::Rings);
    for _ in 0..101 {
        s.frame();
    }
    assert!(s.particles().is_empty());
    assert_eq!(s.status().count_label(), "Particles: 0");
}

// ── Click ───────────────────────────────────────────────────────────────

#[test]
fn click_adds_one_hundred_particles() {
    let mut s = recording(3);
    s.handle(Input::Click { x: 50.0, y: 50.0 });
    assert_eq!(s.particles().len(), 100);
    assert!(s.particles().iter().all(|p| (p.x, p.y) == (50.0, 50.0)));

    s.handle(Input::Click { x: 50.0, y: 50.0 });
    assert_eq!(s.particles().len(), 200);
}

#[test]
fn click_in_particle_mode_does_not_also_burst() {
    let mut s = recording(3);
    to_particles(&mut s);
    s.handle(Input::Click { x: 5.0, y: 5.0 });
    assert_eq!(s.particles().len(), 100);
}

// ── Clear ───────────────────────────────────────────────────────────────

#[test]
fn field_clear_leaves_drawing_alone() {
    let mut raster = Raster::new(120, 120);
    let palette = *sketch_core::PaletteRegistry::builtin().get(0);
    let mut rng = fastrand::Rng::with_seed(4);
    sketch_core::pattern::draw_rings(&mut raster, 60.0, 60.0, &palette);

    let mut field = sketch_core::ParticleField::new();
    field.spawn(60.0, 60.0, 100, &palette, &mut rng);
    assert_eq!(field.advance_all(&mut raster), 100);
    let before: Vec<Vec<Rgba>> = (0..raster.height_px())
        .map(|y| raster.row(y).to_vec())
        .collect();
    assert!(!raster.is_blank());

    field.clear();
    assert!(field.is_empty());
    assert_eq!(field.advance_all(&mut raster), 0);
    for (y, row) in before.iter().enumerate() {
        assert_eq!(raster.row(y as u32), &row[..], "row {y} changed");
    }
}

#[test]
fn clear_control_wipes_drawing_on_raster() {
    let mut s = Sketch::new(Raster::new(200, 200), &SketchConfig {
        seed: Some(5),
        ..SketchConfig::default()
    });
    assert_eq!(s.surface().texts().len(), 1);
    s.handle(Input::PointerMove { x: 100.0, y: 100.0 });
    assert!(!s.surface().is_blank());

    s.handle(Input::Control(Control::Clear));
    assert!(s.surface().is_blank());
    assert!(s.surface().texts().is_empty());
    assert_eq!(s.status().count_label(), "Particles: 0");
}

// ── Rings ───────────────────────────────────────────────────────────────

#[test]
fn rings_draw_five_strokes_cycling_colours() {
    let mut s = recording(6);
    let colors = *s.active_palette().colors();
    s.handle(Input::PointerMove { x: 100.0, y: 100.0 });

    let strokes = s.surface().strokes();
    assert_eq!(strokes.len(), 5);
    let expected_colors = [colors[0], colors[1], colors[2], colors[3], colors[0]];
    for (i, stroke) in strokes.iter().enumerate() {
        assert_eq!(stroke.color, expected_colors[i]);
        assert_eq!(stroke.line_width, 3.0);
        assert_eq!(
            stroke.path,
            vec![DrawOp::Arc {
                cx: 100.0,
                cy: 100.0,
                radius: (i + 1) as f64 * 20.0,
                start: 0.0,
                end: TAU,
            }]
        );
    }
}

// ── Resize ──────────────────────────────────────────────────────────────

#[test]
fn marker_survives_growing_resize() {
    let mut s = Sketch::new(Raster::new(120, 80), &config(7));
    let marker = Rgba::hex(0xFF00E5);
    {
        let surface = s.surface_mut();
        surface.set_fill_color(marker);
        surface.begin_path();
        surface.move_to(10.0, 10.0);
        surface.line_to(20.0, 10.0);
        surface.line_to(20.0, 20.0);
        surface.line_to(10.0, 20.0);
        surface.fill();
    }
    assert_eq!(s.surface().pixel(15, 15), marker);

    s.handle(Input::Resize {
        width: 300.0,
        height: 200.0,
    });
    assert_eq!(s.surface().width_px(), 300);
    assert_eq!(s.surface().height_px(), 200);
    assert_eq!(s.surface().pixel(15, 15), marker);
    assert_eq!(s.surface().pixel(250, 150), Rgba::TRANSPARENT);
}

#[test]
fn shrinking_resize_discards_outside_content() {
    let mut s = Sketch::new(Raster::new(200, 200), &config(8));
    s.handle(Input::PointerMove { x: 150.0, y: 150.0 });
    s.handle(Input::Resize {
        width: 50.0,
        height: 50.0,
    });
    s.handle(Input::Resize {
        width: 200.0,
        height: 200.0,
    });
    for y in 50..200 {
        assert!(s.surface().row(y).iter().all(|c| c.is_transparent()));
    }
}

// ── Auto-animate ────────────────────────────────────────────────────────

#[test]
fn auto_pattern_draws_every_fifth_frame() {
    let mut s = recording(9);
    s.handle(Input::Control(Control::SetAutoAnimate(true)));

    let mut drawn_on = Vec::new();
    for frame in 1..=20 {
        s.surface_mut().reset();
        s.frame();
        if !s.surface().strokes().is_empty() {
            assert_eq!(s.surface().strokes().len(), 5);
            drawn_on.push(frame);
        }
    }
    assert_eq!(drawn_on, vec![5, 10, 15, 20]);
}

#[test]
fn auto_points_land_inside_surface() {
    let mut s = recording(10);
    s.handle(Input::Control(Control::SetAutoAnimate(true)));
    for _ in 0..200 {
        s.frame();
    }
    for stroke in s.surface().strokes() {
        if let Some(DrawOp::Arc { cx, cy, .. }) = stroke.path.first() {
            assert!((0.0..400.0).contains(cx));
            assert!((0.0..300.0).contains(cy));
        }
    }
}

#[test]
fn switching_auto_off_stops_task_next_frame() {
    let mut s = recording(12);
    s.handle(Input::Control(Control::SetAutoAnimate(true)));
    s.frame();
    s.frame();
    s.handle(Input::Control(Control::SetAutoAnimate(false)));
    assert!(s.is_task_armed(TaskId::AutoPattern));

    s.frame();
    assert!(!s.is_task_armed(TaskId::AutoPattern));
    assert!(s.is_task_armed(TaskId::ParticleAdvance));
    assert_eq!(s.auto_frames(), 2);

    s.surface_mut().reset();
    for _ in 0..10 {
        s.frame();
    }
    assert!(s.surface().ops().is_empty());
}

#[test]
fn auto_counter_resumes_after_re_enable() {
    let mut s = recording(13);
    s.handle(Input::Control(Control::SetAutoAnimate(true)));
    for _ in 0..3 {
        s.frame();
    }
    s.handle(Input::Control(Control::SetAutoAnimate(false)));
    s.frame();
    s.handle(Input::Control(Control::SetAutoAnimate(true)));
    s.surface_mut().reset();
    s.frame();
    assert!(s.surface().strokes().is_empty());
    s.frame();
    assert_eq!(s.auto_frames(), 5);
    assert_eq!(s.surface().strokes().len(), 5);
}

#[test]
fn auto_in_particle_mode_spawns_bursts() {
    let mut s = recording(14);
    to_particles(&mut s);
    s.handle(Input::Control(Control::SetAutoAnimate(true)));
    for _ in 0..5 {
        s.frame();
    }
    assert_eq!(s.particles().len(), 5);
}

#[test]
fn start_with_auto_enabled() {
    let s = Sketch::new(RecordingSurface::new(10.0, 10.0), &SketchConfig {
        seed: Some(1),
        auto_animate: true,
        greeting: false,
    });
    assert!(s.auto_animate());
    assert!(s.is_task_armed(TaskId::AutoPattern));
}
