//! Turns hand gestures and pointer input into 3D ink strokes.
//!
//! The sensor loop feeds [`gesture::GestureFusion`] with camera frames; the render loop drives
//! [`engine::Pipeline`], which projects the fused pointer into the scene and runs the stroke
//! lifecycle. [`session::Session`] owns both along with the camera stream.

pub(crate) mod util;

pub mod config;
pub mod engine;
pub mod geom;
pub mod gesture;
pub mod projector;
pub mod session;

pub use config::{Color, Config, LineWidth, Mode, Style, Tuning};
pub use engine::{Frame, Pipeline, Scene, SceneEvent, Stroke, StrokeId};
pub use session::{Session, Status};

#[cfg(test)]
pub mod test;
