#![warn(missing_docs)]
//! Tap-to-place on detected AR planes.
//!
//! A reticle follows the first hit-test result of every frame; a pointer press copies the
//! remembered hit onto a box and reveals it.

mod app;
mod config;
mod controller;
mod notifier;
mod setup;

pub use app::{ArApp, XrInit, UNSUPPORTED_MESSAGE};
pub use config::SceneConfig;
pub use controller::{PlacementController, PlacementEvent};
pub use notifier::{LogNotifier, Notifier, RecordingNotifier};
pub use setup::{build_scene, SceneEntities};
