//! Color-state synchronization engine for interactive color pickers.
//!
//! # Usage
//!
//! A picker UI shows the same color as sliders, a hex field, a preview
//! swatch, and an overlay text color. This crate keeps those
//! representations consistent: one [`ColorPickerController`] per picker
//! session holds the canonical RGBA color, applies edits arriving from any
//! single representation, and hands the UI a fresh [`DisplaySnapshot`]
//! together with a hint on whether the update should animate.
//!
//! ```
//! use colorsheet_core::{
//!     ChangeCallback, Color, ColorPickerController, ColorSpace, ComponentKey, PickerConfig,
//! };
//!
//! let controller = ColorPickerController::new(
//!     PickerConfig::default()
//!         .initial_color(Color::RED)
//!         .initial_space(ColorSpace::Rgb),
//! );
//! controller.set_on_change(ChangeCallback::new(|snapshot, animated| {
//!     // Hand the new representations to the view layer.
//!     let _ = (snapshot.hex.as_str(), animated);
//! }));
//!
//! // A slider drag: not animated.
//! let snapshot = controller
//!     .set_component(ColorSpace::Rgb, ComponentKey::Green, 128.0)
//!     .unwrap();
//! assert_eq!(snapshot.hex, "FF8000");
//!
//! // A committed hex entry: animated.
//! let snapshot = controller.commit_hex("0F0").unwrap();
//! assert_eq!(snapshot.preview, Color::GREEN);
//! ```
//!
//! The view hierarchy, gesture handling, haptics, and persistence live
//! outside this crate; they consume snapshots and route raw input back in.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod codec;
pub mod color;
pub mod controller;
pub mod hex;
pub mod space;
pub mod state;

pub use codec::ContrastColors;
pub use color::Color;
pub use controller::{
    ChangeCallback, ColorPickerController, DisplaySnapshot, PickerConfig, PickerError,
};
pub use hex::{HexParseError, parse_commit, sanitize_for_typing};
pub use space::{ColorSpace, ComponentKey, ComponentSpec};
pub use state::ColorState;
