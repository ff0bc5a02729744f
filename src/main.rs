//! Runs a scripted air-writing session against a synthetic hand and prints what was drawn.

use airink::gesture::{Detection, DetectorError, HandDetector, Landmark, VideoFrame};
use airink::gesture::{INDEX_FINGER_TIP, THUMB_TIP};
use airink::projector::PerspectiveCamera;
use airink::session::{SessionError, VideoSource, VideoStream};
use airink::{Color, Config, Mode, SceneEvent, Session};
use futures::executor::block_on;
use std::{f32::consts::TAU, rc::Rc, time::Duration};

#[derive(thiserror::Error, Debug)]
#[error("no global tracing subscriber set")]
struct NoTracingSubscriber;

fn configure_tracing() -> anyhow::Result<()> {
	let result = Err(NoTracingSubscriber);

	let result = result.or_else(|_| {
		let max_level = if cfg!(debug_assertions) {
			tracing::Level::TRACE
		} else {
			tracing::Level::INFO
		};
		tracing::subscriber::set_global_default(
			tracing_subscriber::FmtSubscriber::builder()
				.with_max_level(max_level)
				.finish(),
		)
	});

	Ok(result?)
}

fn configure_logging() -> anyhow::Result<()> {
	configure_tracing()?;

	// Redirect `log` to `tracing` for any dependency that still logs through it.
	#[cfg(feature = "log")]
	tracing_log::LogTracer::init()?;

	Ok(())
}

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const FRAMES: u64 = 360;

/// A hand circling the middle of the frame, pinching for the first three quarters of each lap.
struct SyntheticHand {
	rng: fastrand::Rng,
	lap: Duration,
}

impl SyntheticHand {
	fn pose(&self, timestamp: Duration) -> Detection {
		let phase = (timestamp.as_secs_f32() / self.lap.as_secs_f32()).fract();
		let angle = TAU * phase;
		let tip = glam::Vec2::new(0.5 + 0.2 * angle.cos(), 0.5 + 0.2 * angle.sin());
		let thumb_offset = if phase < 0.75 { 0.03 } else { 0.15 };
		let mut hand = vec![Landmark::default(); 21];
		hand[INDEX_FINGER_TIP] = Landmark::new(tip.x, tip.y, 0.0);
		hand[THUMB_TIP] = Landmark::new(tip.x, tip.y + thumb_offset, 0.0);
		Detection { hands: vec![hand] }
	}
}

impl HandDetector for SyntheticHand {
	async fn initialize(&mut self) -> Result<(), DetectorError> {
		Ok(())
	}

	fn detect(
		&mut self,
		_frame: &VideoFrame,
		timestamp: Duration,
	) -> Result<Option<Detection>, DetectorError> {
		// Real models occasionally drop a frame.
		if self.rng.u8(..) < 8 {
			return Err(DetectorError::Detect("model returned no result".to_owned()));
		}
		Ok(Some(self.pose(timestamp)))
	}
}

struct SyntheticCamera;

struct SyntheticStream {
	frame: VideoFrame,
}

impl VideoSource for SyntheticCamera {
	type Stream = SyntheticStream;

	async fn acquire(&mut self) -> Result<SyntheticStream, SessionError> {
		let (width, height) = (1280, 720);
		Ok(SyntheticStream {
			frame: VideoFrame {
				width,
				height,
				pixels: Rc::from(vec![0u8; (width * height * 4) as usize]),
			},
		})
	}
}

impl VideoStream for SyntheticStream {
	fn latest_frame(&self) -> Option<VideoFrame> {
		Some(self.frame.clone())
	}

	fn stop(&mut self) {}
}

fn run() -> anyhow::Result<()> {
	let hand = SyntheticHand {
		rng: fastrand::Rng::with_seed(7),
		lap: Duration::from_secs(2),
	};
	let mut session: Session<SyntheticHand, SyntheticStream> = Session::new(hand, Config::default());
	block_on(session.initialize());
	block_on(session.start(&mut SyntheticCamera))?;
	session.subscribe(|event| match event {
		SceneEvent::Committed(id) => tracing::info!(%id, "stroke committed"),
		SceneEvent::Erased(ids) => tracing::info!(count = ids.len(), "strokes erased"),
		SceneEvent::Cleared => tracing::info!("scene cleared"),
	});

	let mut camera = PerspectiveCamera::default();
	camera.set_viewport(1280.0, 720.0);

	for frame in 0..FRAMES {
		let now = FRAME_INTERVAL * frame as u32;
		if frame == FRAMES / 2 {
			session.config_mut().pick_color(Color::BLUE);
		}
		if frame == FRAMES * 5 / 6 {
			session.config_mut().mode = Mode::Erasing;
		}
		session.sample(now);
		let rendered = session.render(&camera, now);
		tracing::trace!(strokes = rendered.strokes.len(), cursor = ?rendered.cursor);
	}

	let status = session.status();
	let scene = session.pipeline().scene();
	tracing::info!(strokes = scene.len(), ?status, "session finished");
	for stroke in scene.strokes() {
		tracing::info!(
			id = %stroke.id(),
			points = stroke.points().len(),
			length = stroke.length(),
			color = %stroke.color(),
			"stroke"
		);
	}

	session.clear(1);
	session.stop();
	Ok(())
}

fn main() {
	if let Err(error) = configure_logging() {
		// We can technically continue without logging.
		tracing::error!(error = error.to_string());
	}

	if let Err(error) = run() {
		tracing::error!(%error, "session failed");
		std::process::exit(1);
	}
}
