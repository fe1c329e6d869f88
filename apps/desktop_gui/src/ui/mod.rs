//! UI layer: egui shell, render tree, and painting.

pub mod app;
pub mod panels;
pub mod view;

pub use app::{StartupConfig, StrydeApp};
