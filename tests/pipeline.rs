use airink::engine::{Finalized, Transition};
use airink::gesture::{PointerSample, Source};
use airink::projector::PerspectiveCamera;
use airink::{Color, Config, LineWidth, Mode, Pipeline};
use approx::assert_abs_diff_eq;
use glam::{vec2, Vec2};
use std::time::Duration;

fn ms(value: u64) -> Duration {
	Duration::from_millis(value)
}

fn pointer(position: Vec2, engaged: bool) -> Option<PointerSample> {
	Some(PointerSample {
		position,
		source: Source::Hand,
		engaged,
	})
}

struct Harness {
	camera: PerspectiveCamera,
	config: Config,
	pipeline: Pipeline,
	now: Duration,
}

impl Harness {
	fn new(config: Config) -> Self {
		Self {
			camera: PerspectiveCamera::default(),
			config,
			pipeline: Pipeline::new(),
			now: Duration::ZERO,
		}
	}

	fn tick(&mut self, sample: Option<PointerSample>) -> anyhow::Result<Transition> {
		let transition = self
			.pipeline
			.tick(&self.camera, sample, &self.config, self.now)?;
		self.now += ms(16);
		Ok(transition)
	}

	fn stroke(&mut self, points: &[Vec2]) -> anyhow::Result<Transition> {
		for &point in points {
			self.tick(pointer(point, true))?;
		}
		let last = points.last().copied().unwrap_or(Vec2::ZERO);
		self.tick(pointer(last, false))
	}
}

#[test]
fn committed_stroke_keeps_the_style_it_was_drawn_with() -> anyhow::Result<()> {
	let mut harness = Harness::new(
		Config::builder()
			.color(Color::PURPLE)
			.line_width(LineWidth::new(12)?)
			.build(),
	);
	harness.stroke(&[vec2(0.3, 0.5), vec2(0.4, 0.5), vec2(0.5, 0.5)])?;
	harness.config.pick_color(Color::GREEN);
	harness.config.line_width = LineWidth::new(3)?;

	let frame = harness.pipeline.frame(&harness.config);
	assert_eq!(frame.strokes.len(), 1);
	let stroke = &frame.strokes[0];
	assert_eq!(stroke.points().len(), 3);
	assert_eq!(stroke.color(), Color::PURPLE);
	assert_eq!(stroke.width().get(), 12);
	assert!(stroke.length() > 0.0);
	Ok(())
}

#[test]
fn switching_to_eraser_abandons_the_stroke_in_progress() -> anyhow::Result<()> {
	let mut harness = Harness::new(Config::default());
	harness.tick(pointer(vec2(0.3, 0.5), true))?;
	harness.tick(pointer(vec2(0.4, 0.5), true))?;
	harness.config.mode = Mode::Erasing;
	let transition = harness.tick(pointer(vec2(0.45, 0.5), true))?;
	assert_eq!(
		transition,
		Transition::Erased {
			removed: Vec::new(),
			abandoned: true
		}
	);
	harness.tick(None)?;
	assert!(harness.pipeline.scene().is_empty());
	Ok(())
}

#[test]
fn eraser_only_removes_strokes_within_reach() -> anyhow::Result<()> {
	let mut harness = Harness::new(Config::default());
	harness.stroke(&[vec2(0.2, 0.2), vec2(0.3, 0.2)])?;
	harness.now += ms(100);
	harness.stroke(&[vec2(0.2, 0.8), vec2(0.3, 0.8)])?;
	assert_eq!(harness.pipeline.scene().len(), 2);

	harness.config.mode = Mode::Erasing;
	let (removed, abandoned) = match harness.tick(pointer(vec2(0.3, 0.2), true))? {
		Transition::Erased { removed, abandoned } => (removed, abandoned),
		other => anyhow::bail!("expected an erase, got {other:?}"),
	};
	assert!(!abandoned);
	assert_eq!(removed.len(), 1);
	assert_eq!(harness.pipeline.scene().len(), 1);
	assert!(harness.pipeline.scene().get(removed[0]).is_none());
	Ok(())
}

#[test]
fn release_twice_within_cooldown_commits_once() -> anyhow::Result<()> {
	let mut harness = Harness::new(Config::default());
	let first = harness.stroke(&[vec2(0.3, 0.5), vec2(0.4, 0.5)])?;
	assert!(matches!(first, Transition::Finalized(Finalized::Committed(_))));
	// A flickering pinch re-engages right after release.
	let second = harness.stroke(&[vec2(0.4, 0.5), vec2(0.45, 0.5)])?;
	assert_eq!(second, Transition::Finalized(Finalized::CoolingDown));
	assert_eq!(harness.pipeline.scene().len(), 1);
	Ok(())
}

#[test]
fn single_point_strokes_are_discarded() -> anyhow::Result<()> {
	let mut harness = Harness::new(Config::default());
	let transition = harness.stroke(&[vec2(0.5, 0.5)])?;
	assert_eq!(transition, Transition::Finalized(Finalized::TooShort));
	assert!(harness.pipeline.scene().is_empty());
	Ok(())
}

#[test]
fn clear_empties_everything_once_per_signal() -> anyhow::Result<()> {
	let mut harness = Harness::new(Config::default());
	harness.stroke(&[vec2(0.3, 0.5), vec2(0.4, 0.5)])?;
	harness.now += ms(100);
	harness.tick(pointer(vec2(0.6, 0.5), true))?;

	assert!(!harness.pipeline.clear(0));
	assert!(harness.pipeline.clear(1));
	assert!(!harness.pipeline.clear(1));
	let frame = harness.pipeline.frame(&harness.config);
	assert!(frame.strokes.is_empty());
	assert!(frame.active.is_none());
	assert!(frame.cursor.is_none());

	// Ids keep counting after a clear.
	harness.now += ms(100);
	harness.stroke(&[vec2(0.3, 0.5), vec2(0.4, 0.5)])?;
	assert_eq!(harness.pipeline.scene().strokes()[0].id().get(), 1);
	Ok(())
}

#[test]
fn ink_sits_at_the_drawing_depth() -> anyhow::Result<()> {
	let mut harness = Harness::new(Config::default());
	harness.stroke(&[vec2(0.1, 0.1), vec2(0.9, 0.9)])?;
	let camera = harness.camera.position;
	for point in harness.pipeline.scene().strokes()[0].points() {
		assert_abs_diff_eq!(point.distance(camera), 0.5, epsilon = 1e-5);
	}
	Ok(())
}
