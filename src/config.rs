use bon::Builder;
use glam::Vec3;
use std::{fmt, str::FromStr, time::Duration};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid color {input:?}: {reason}")]
	Color { input: String, reason: String },

	#[error("line width {0} is outside 2..=60")]
	LineWidth(u32),
}

static_assertions::assert_impl_all!(ConfigError: std::error::Error, Send, Sync);

/// What an engaged pointer does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Mode {
	#[default]
	#[display("drawing")]
	Drawing,
	#[display("erasing")]
	Erasing,
}

/// An opaque sRGB ink color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color([u8; 3]);

impl Color {
	pub const RED: Color = Color([0xef, 0x44, 0x44]);
	pub const BLUE: Color = Color([0x3b, 0x82, 0xf6]);
	pub const GREEN: Color = Color([0x22, 0xc5, 0x5e]);
	pub const YELLOW: Color = Color([0xea, 0xb3, 0x08]);
	pub const PURPLE: Color = Color([0xa8, 0x55, 0xf7]);
	pub const SLATE: Color = Color([0x1e, 0x29, 0x3b]);

	/// The preset inks offered by the toolbar.
	pub const PALETTE: [Color; 6] = [
		Self::RED,
		Self::BLUE,
		Self::GREEN,
		Self::YELLOW,
		Self::PURPLE,
		Self::SLATE,
	];

	pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
		Self([r, g, b])
	}

	/// Parses any CSS color, e.g. `#3b82f6`, `#38f` or `rebeccapurple`. Alpha is discarded.
	pub fn parse(input: &str) -> Result<Self, ConfigError> {
		let color = csscolorparser::parse(input).map_err(|err| ConfigError::Color {
			input: input.to_owned(),
			reason: err.to_string(),
		})?;
		let [r, g, b, _] = color.to_rgba8();
		Ok(Self([r, g, b]))
	}

	pub fn rgb8(self) -> [u8; 3] {
		self.0
	}

	/// Channels in `0.0..=1.0`, in the layout renderers expect for uniforms.
	pub fn to_vec3(self) -> Vec3 {
		let [r, g, b] = self.0;
		Vec3::new(r as f32, g as f32, b as f32) / 255.0
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::RED
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let [r, g, b] = self.0;
		write!(f, "#{r:02x}{g:02x}{b:02x}")
	}
}

impl FromStr for Color {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

/// Stroke width in screen pixels, as chosen on the width slider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub struct LineWidth(u32);

impl LineWidth {
	pub const MIN: u32 = 2;
	pub const MAX: u32 = 60;

	pub fn new(value: u32) -> Result<Self, ConfigError> {
		if (Self::MIN..=Self::MAX).contains(&value) {
			Ok(Self(value))
		} else {
			Err(ConfigError::LineWidth(value))
		}
	}

	pub fn get(self) -> u32 {
		self.0
	}

	pub fn as_f32(self) -> f32 {
		self.0 as f32
	}
}

impl Default for LineWidth {
	fn default() -> Self {
		Self(8)
	}
}

impl TryFrom<u32> for LineWidth {
	type Error = ConfigError;

	fn try_from(value: u32) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

/// Empirically chosen constants of the input pipeline.
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct Tuning {
	/// Fingertip to thumb-tip distance, in normalized frame units, below which a hand is pinching.
	#[builder(default = 0.08)]
	pub pinch_threshold: f32,

	/// Minimum world-space spacing between consecutive points of a stroke.
	#[builder(default = 0.005)]
	pub decimation_distance: f32,

	#[builder(default = 0.01)]
	pub erase_base_radius: f32,

	/// Added to `erase_base_radius` once per unit of line width.
	#[builder(default = 0.002)]
	pub erase_radius_per_width: f32,

	#[builder(default = Duration::from_millis(50))]
	pub finalize_cooldown: Duration,

	/// Distance from the camera at which ink is placed.
	#[builder(default = 0.5)]
	pub drawing_depth: f32,

	#[builder(default = Duration::from_millis(30))]
	pub sample_interval: Duration,
}

impl Default for Tuning {
	fn default() -> Self {
		Self::builder().build()
	}
}

/// Ink appearance captured when a stroke is committed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
	pub color: Color,
	pub width: LineWidth,
}

/// User-facing options. Every field is read on each tick, so changes apply immediately.
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct Config {
	/// Flip the hand position horizontally before use.
	#[builder(default = true)]
	pub mirrored: bool,

	#[builder(default)]
	pub color: Color,

	#[builder(default)]
	pub line_width: LineWidth,

	#[builder(default)]
	pub mode: Mode,

	#[builder(default)]
	pub tuning: Tuning,
}

impl Default for Config {
	fn default() -> Self {
		Self::builder().build()
	}
}

impl Config {
	pub fn style(&self) -> Style {
		Style {
			color: self.color,
			width: self.line_width,
		}
	}

	/// Picking a color always switches back to drawing.
	pub fn pick_color(&mut self, color: Color) {
		self.color = color;
		self.mode = Mode::Drawing;
	}
}
