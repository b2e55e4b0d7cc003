use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    config::EngineConfig,
    error::{Error, Result},
};

/// The callback a device runs every period. It receives a mono buffer of
/// `frames` samples and must fill all of it.
pub type RenderFn = Box<dyn FnMut(&mut [f32]) + Send + 'static>;

/// Something that can run a [`RenderFn`] at a fixed period.
pub trait AudioDevice {
    /// Human-readable backend name for logs.
    fn name(&self) -> String;

    /// Open and start a mono output stream. On error nothing is left
    /// running.
    fn open(&self, config: &EngineConfig, render: RenderFn) -> Result<Box<dyn OutputStream>>;
}

/// A running stream. Dropping the handle stops it as well.
pub trait OutputStream {
    fn close(self: Box<Self>);
}

/// A device with no hardware behind it.
///
/// Whoever holds a clone drives the callback by calling [`pull`]. Used for
/// tests and for rendering offline at faster than realtime.
///
/// [`pull`]: ManualDevice::pull
#[derive(Clone, Default)]
pub struct ManualDevice {
    slot: Arc<Mutex<Option<RenderFn>>>,
    refuse: bool,
}

impl ManualDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// A device whose `open` always fails, for exercising error paths.
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    /// Run the callback once over `out`. Returns false (and writes
    /// silence) when no stream is open.
    pub fn pull(&self, out: &mut [f32]) -> bool {
        match lock(&self.slot).as_mut() {
            Some(render) => {
                render(out);
                true
            }
            None => {
                out.fill(0.0);
                false
            }
        }
    }

    /// Pull exactly `frames` samples into a new vector.
    pub fn pull_vec(&self, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0; frames];
        self.pull(&mut out);
        out
    }

    pub fn is_open(&self) -> bool {
        lock(&self.slot).is_some()
    }
}

impl AudioDevice for ManualDevice {
    fn name(&self) -> String {
        "manual".to_string()
    }

    fn open(&self, _config: &EngineConfig, render: RenderFn) -> Result<Box<dyn OutputStream>> {
        if self.refuse {
            return Err(Error::Device("manual device refused to open".to_string()));
        }

        *lock(&self.slot) = Some(render);
        Ok(Box::new(ManualStream {
            slot: Arc::clone(&self.slot),
        }))
    }
}

struct ManualStream {
    slot: Arc<Mutex<Option<RenderFn>>>,
}

impl OutputStream for ManualStream {
    fn close(self: Box<Self>) {}
}

impl Drop for ManualStream {
    fn drop(&mut self) {
        lock(&self.slot).take();
    }
}

// A panic inside a test callback must not wedge every later pull
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
