//! Wires the sensor loop and the render loop together around a scoped camera stream.

use crate::config::{Config, Mode};
use crate::engine::{Frame, Pipeline, SceneEvent};
use crate::gesture::{
	fuse, DetectorState, GestureFusion, HandDetector, HandReading, PointerDevice, PointerSample,
	Source, VideoFrame,
};
use crate::projector::CameraView;
use crate::util::ResultExt;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
	#[error("camera unavailable: {0}")]
	CameraUnavailable(String),
}

static_assertions::assert_impl_all!(SessionError: std::error::Error, Send, Sync);

/// A live camera stream.
pub trait VideoStream {
	/// The most recent decoded frame, if the stream has produced one yet.
	fn latest_frame(&self) -> Option<VideoFrame>;

	/// Stops every track of the stream. Called exactly once.
	fn stop(&mut self);
}

/// Grants access to a camera, e.g. after a permission prompt.
#[allow(async_fn_in_trait)]
pub trait VideoSource {
	type Stream: VideoStream;

	async fn acquire(&mut self) -> Result<Self::Stream, SessionError>;
}

/// Stops the wrapped stream when dropped.
#[derive(Debug)]
struct ScopedStream<S: VideoStream>(S);

impl<S: VideoStream> Drop for ScopedStream<S> {
	fn drop(&mut self) {
		self.0.stop();
		tracing::info!("camera stream released");
	}
}

/// What the status badge shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
	/// The hand detector is still loading.
	Loading,
	Unavailable(String),
	WaitingForHand,
	Ready,
	Writing,
	Erasing,
}

pub struct Session<D, S: VideoStream> {
	gesture: GestureFusion<D>,
	stream: Option<ScopedStream<S>>,
	device: PointerDevice,
	pipeline: Pipeline,
	config: Config,
	fault: Option<SessionError>,
	running: bool,
}

impl<D: HandDetector, S: VideoStream> Session<D, S> {
	pub fn new(detector: D, config: Config) -> Self {
		Self {
			gesture: GestureFusion::new(detector, &config),
			stream: None,
			device: PointerDevice::default(),
			pipeline: Pipeline::new(),
			config,
			fault: None,
			running: false,
		}
	}

	pub async fn initialize(&mut self) -> DetectorState {
		self.gesture.initialize().await
	}

	/// Acquires the camera and starts accepting input.
	///
	/// A failure is returned once and leaves the session running without a hand source; the
	/// pointer device keeps working.
	#[tracing::instrument(skip_all)]
	pub async fn start(&mut self, source: &mut impl VideoSource<Stream = S>) -> Result<(), SessionError> {
		self.stop();
		self.running = true;
		match source.acquire().await {
			Ok(stream) => {
				tracing::info!("camera stream acquired");
				self.stream = Some(ScopedStream(stream));
				self.fault = None;
				Ok(())
			}
			Err(err) => {
				tracing::warn!(%err, "continuing without a camera");
				self.fault = Some(err.clone());
				Err(err)
			}
		}
	}

	/// Releases the camera and stops accepting input. Any stroke in progress is committed on the
	/// next render.
	pub fn stop(&mut self) {
		self.stream = None;
		self.gesture.reset();
		self.running = false;
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn has_camera(&self) -> bool {
		self.stream.is_some()
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn config_mut(&mut self) -> &mut Config {
		&mut self.config
	}

	pub fn device_mut(&mut self) -> &mut PointerDevice {
		&mut self.device
	}

	pub fn pipeline(&self) -> &Pipeline {
		&self.pipeline
	}

	pub fn subscribe(&mut self, observer: impl FnMut(&SceneEvent) + 'static) {
		self.pipeline.subscribe(observer);
	}

	/// Sensor loop body. Cheap to call every frame; the detector only runs when due.
	pub fn sample(&mut self, now: Duration) -> Option<HandReading> {
		let frame = self.stream.as_ref()?.0.latest_frame();
		self.gesture.sample(now, frame.as_ref(), &self.config)
	}

	/// The pointer the next render will use.
	pub fn pointer(&self) -> Option<PointerSample> {
		if !self.running {
			return None;
		}
		fuse(self.gesture.reading(), &self.device)
	}

	/// Render loop body: advances the stroke engine and returns what to draw.
	pub fn render(&mut self, camera: &impl CameraView, now: Duration) -> Frame<'_> {
		let pointer = self.pointer();
		let _ = self
			.pipeline
			.tick(camera, pointer, &self.config, now)
			.ok_or_debug();
		self.pipeline.frame(&self.config)
	}

	pub fn clear(&mut self, signal: u64) -> bool {
		self.pipeline.clear(signal)
	}

	pub fn status(&self) -> Status {
		if let Some(fault) = &self.fault {
			return Status::Unavailable(fault.to_string());
		}
		match self.gesture.state() {
			DetectorState::Pending => return Status::Loading,
			DetectorState::Failed => {
				return Status::Unavailable("hand detector failed to load".to_owned())
			}
			DetectorState::Ready => {}
		}
		if self.config.mode == Mode::Erasing {
			return Status::Erasing;
		}
		match self.pointer() {
			Some(PointerSample { engaged: true, .. }) => Status::Writing,
			Some(PointerSample {
				source: Source::Hand,
				..
			}) => Status::Ready,
			_ => Status::WaitingForHand,
		}
	}
}
