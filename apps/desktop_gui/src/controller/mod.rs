//! Controller layer: controller inputs, the session reducer, and effect orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
