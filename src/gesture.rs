//! Gesture fusion: turns hand detections and pointer-device events into a single pointer sample.

use crate::config::Config;
use crate::geom::mirror_x;
use crate::util::{Latest, ResultExt, Throttle};
use glam::Vec2;
use std::{rc::Rc, time::Duration};

/// Landmark indices in the 21-point hand skeleton.
pub const THUMB_TIP: usize = 4;
pub const INDEX_FINGER_TIP: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
	pub x: f32,
	pub y: f32,
	pub z: f32,
}

impl Landmark {
	pub fn new(x: f32, y: f32, z: f32) -> Self {
		Self { x, y, z }
	}

	pub fn xy(&self) -> Vec2 {
		Vec2::new(self.x, self.y)
	}
}

/// Landmarks of every tracked hand, in normalized frame coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Detection {
	pub hands: Vec<Vec<Landmark>>,
}

/// A decoded video frame. Pixel layout is whatever the detector expects.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoFrame {
	pub width: u32,
	pub height: u32,
	pub pixels: Rc<[u8]>,
}

impl VideoFrame {
	/// Some detectors crash on frames without dimensions, which streams produce while warming up.
	pub fn is_valid(&self) -> bool {
		self.width > 0 && self.height > 0
	}
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DetectorError {
	#[error("hand detector failed to initialize: {0}")]
	Initialize(String),

	#[error("hand detection failed: {0}")]
	Detect(String),
}

static_assertions::assert_impl_all!(DetectorError: std::error::Error, Send, Sync);

/// An external hand-landmark model.
///
/// Detectors are unusable until `initialize` succeeds. After that, `detect` may fail transiently
/// on any frame; callers treat a failure as "no hand" for that frame.
#[allow(async_fn_in_trait)]
pub trait HandDetector {
	async fn initialize(&mut self) -> Result<(), DetectorError>;

	fn detect(
		&mut self,
		frame: &VideoFrame,
		timestamp: Duration,
	) -> Result<Option<Detection>, DetectorError>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetectorState {
	#[default]
	Pending,
	Ready,
	Failed,
}

/// What one detector pass saw.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandReading {
	/// Index fingertip, mirrored if configured.
	pub position: Option<Vec2>,
	pub pinching: bool,
}

impl HandReading {
	pub const NONE: HandReading = HandReading {
		position: None,
		pinching: false,
	};

	/// Reads the first tracked hand. Hands missing the fingertip landmarks count as no hand.
	pub fn from_detection(detection: Option<&Detection>, mirrored: bool, pinch_threshold: f32) -> Self {
		let Some(hand) = detection.and_then(|d| d.hands.first()) else {
			return Self::NONE;
		};
		let (Some(index_tip), Some(thumb_tip)) = (hand.get(INDEX_FINGER_TIP), hand.get(THUMB_TIP))
		else {
			return Self::NONE;
		};
		let tip = index_tip.xy();
		let position = if mirrored { mirror_x(tip) } else { tip };
		Self {
			position: Some(position),
			pinching: tip.distance(thumb_tip.xy()) < pinch_threshold,
		}
	}
}

/// The fallback pointer: a mouse or a touch.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerDevice {
	position: Option<Vec2>,
	pressed: bool,
}

impl PointerDevice {
	/// `position` is normalized to the viewport.
	pub fn moved(&mut self, position: Vec2) {
		self.position = Some(position);
	}

	pub fn pressed(&mut self) {
		self.pressed = true;
	}

	pub fn released(&mut self) {
		self.pressed = false;
	}

	pub fn position(&self) -> Option<Vec2> {
		self.position
	}

	pub fn is_pressed(&self) -> bool {
		self.pressed
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
	Hand,
	PointerDevice,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
	pub position: Vec2,
	pub source: Source,
	pub engaged: bool,
}

/// Picks the active pointer. A visible hand always wins, so a held button cannot draw while a hand
/// is tracked.
pub fn fuse(hand: HandReading, device: &PointerDevice) -> Option<PointerSample> {
	let from_hand = hand.position.map(|position| PointerSample {
		position,
		source: Source::Hand,
		engaged: hand.pinching,
	});
	let from_device = device.position.map(|position| PointerSample {
		position,
		source: Source::PointerDevice,
		engaged: device.pressed,
	});
	from_hand.or(from_device)
}

/// Runs a detector at a throttled rate and publishes each reading for the render loop.
#[derive(Debug)]
pub struct GestureFusion<D> {
	detector: D,
	state: DetectorState,
	throttle: Throttle,
	latest: Latest<HandReading>,
}

impl<D: HandDetector> GestureFusion<D> {
	pub fn new(detector: D, config: &Config) -> Self {
		Self {
			detector,
			state: DetectorState::Pending,
			throttle: Throttle::new(config.tuning.sample_interval),
			latest: Latest::new(),
		}
	}

	#[tracing::instrument(skip(self))]
	pub async fn initialize(&mut self) -> DetectorState {
		self.state = match self.detector.initialize().await.ok_or_log() {
			Some(()) => {
				tracing::info!("hand detector ready");
				DetectorState::Ready
			}
			None => DetectorState::Failed,
		};
		self.state
	}

	pub fn state(&self) -> DetectorState {
		self.state
	}

	pub fn detector(&self) -> &D {
		&self.detector
	}

	/// A handle on the most recent reading, shared with the render loop.
	pub fn latest(&self) -> Latest<HandReading> {
		self.latest.clone()
	}

	/// The most recent reading, or no hand if nothing has been sampled yet.
	pub fn reading(&self) -> HandReading {
		self.latest.peek().unwrap_or(HandReading::NONE)
	}

	/// Runs one detector pass if the detector is ready, the frame is usable and the sampling
	/// interval has elapsed. Returns the published reading, or `None` if nothing was sampled.
	pub fn sample(
		&mut self,
		now: Duration,
		frame: Option<&VideoFrame>,
		config: &Config,
	) -> Option<HandReading> {
		if self.state != DetectorState::Ready {
			return None;
		}
		let frame = frame.filter(|frame| frame.is_valid())?;
		self.throttle.set_interval(config.tuning.sample_interval);
		if !self.throttle.ready(now) {
			return None;
		}
		let detection = self.detector.detect(frame, now).ok_or_debug().flatten();
		let reading = HandReading::from_detection(
			detection.as_ref(),
			config.mirrored,
			config.tuning.pinch_threshold,
		);
		tracing::trace!(?reading, "sampled hand");
		self.latest.publish(reading);
		Some(reading)
	}

	/// Forgets the last reading and restarts the sampling interval.
	pub fn reset(&mut self) {
		self.throttle.reset();
		self.latest.clear();
	}
}
