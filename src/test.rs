use crate::gesture::{Detection, DetectorError, HandDetector, Landmark, VideoFrame, INDEX_FINGER_TIP, THUMB_TIP};
use crate::projector::CameraView;
use crate::session::{SessionError, VideoSource, VideoStream};
use glam::{Vec2, Vec3};
use std::{cell::Cell, collections::VecDeque, rc::Rc, time::Duration};

/// Replays queued detection results, then reports no hand.
#[derive(Debug, Default)]
pub struct ScriptedDetector {
	pub fail_initialize: bool,
	pub calls: usize,
	pub script: VecDeque<Result<Option<Detection>, DetectorError>>,
}

impl ScriptedDetector {
	pub fn push(&mut self, result: Result<Option<Detection>, DetectorError>) {
		self.script.push_back(result);
	}
}

impl HandDetector for ScriptedDetector {
	async fn initialize(&mut self) -> Result<(), DetectorError> {
		if self.fail_initialize {
			Err(DetectorError::Initialize("model missing".to_owned()))
		} else {
			Ok(())
		}
	}

	fn detect(
		&mut self,
		_frame: &VideoFrame,
		_timestamp: Duration,
	) -> Result<Option<Detection>, DetectorError> {
		self.calls += 1;
		self.script.pop_front().unwrap_or(Ok(None))
	}
}

/// A single hand with only the index fingertip and thumb tip placed.
pub fn detection_at(tip: Vec2, thumb: Vec2) -> Detection {
	let mut hand = vec![Landmark::default(); 21];
	hand[INDEX_FINGER_TIP] = Landmark::new(tip.x, tip.y, 0.0);
	hand[THUMB_TIP] = Landmark::new(thumb.x, thumb.y, 0.0);
	Detection { hands: vec![hand] }
}

pub fn frame(width: u32, height: u32) -> VideoFrame {
	VideoFrame {
		width,
		height,
		pixels: Rc::from(vec![0u8; (width * height * 4) as usize]),
	}
}

/// A camera whose inverse projection is singular.
#[derive(Clone, Copy, Debug)]
pub struct DegenerateCamera;

impl CameraView for DegenerateCamera {
	fn position(&self) -> Vec3 {
		Vec3::ZERO
	}

	fn unproject(&self, _ndc: Vec3) -> Vec3 {
		Vec3::NAN
	}
}

#[derive(Debug)]
pub struct FakeStream {
	pub stopped: Rc<Cell<usize>>,
}

impl VideoStream for FakeStream {
	fn latest_frame(&self) -> Option<VideoFrame> {
		Some(frame(64, 48))
	}

	fn stop(&mut self) {
		self.stopped.set(self.stopped.get() + 1);
	}
}

#[derive(Debug, Default)]
pub struct FakeSource {
	pub deny: bool,
	pub stopped: Rc<Cell<usize>>,
}

impl FakeSource {
	/// How many streams handed out so far have been stopped.
	pub fn stopped(&self) -> usize {
		self.stopped.get()
	}
}

impl VideoSource for FakeSource {
	type Stream = FakeStream;

	async fn acquire(&mut self) -> Result<FakeStream, SessionError> {
		if self.deny {
			return Err(SessionError::CameraUnavailable("permission denied".to_owned()));
		}
		Ok(FakeStream {
			stopped: self.stopped.clone(),
		})
	}
}
