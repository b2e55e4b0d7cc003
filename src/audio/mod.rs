//! Delivery of rendered audio to an output device.
//!
//! The fill side (a node graph rendered on its own thread) and the device
//! callback share exactly one thing: a lock-free ring plus a handful of
//! atomic flags. Everything else stays on the side that owns it.

mod callback;
/// cpal-backed hardware output.
pub mod cpal_device;
/// Device abstraction and the in-process `ManualDevice`.
pub mod device;
/// Start/stop state machine around one output stream.
pub mod engine;
/// `play` entry point and the fill thread.
pub mod player;
/// Single-producer single-consumer sample ring.
pub mod ring;
mod shared;

pub use cpal_device::CpalDevice;
pub use device::{AudioDevice, ManualDevice, OutputStream, RenderFn};
pub use engine::{AudioEngine, StreamWriter};
pub use player::{Delivery, Player};
pub use ring::SampleRing;
pub use shared::StreamStats;
