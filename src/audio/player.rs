use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use tracing::{debug, info};

use crate::{
    audio::engine::{AudioEngine, StreamWriter},
    error::{Error, Result},
    graph::{node::Generator, param::Param},
    MAX_BLOCK_SIZE,
};

/*
Playing a Graph
===============

`Player::play(root, volume, delivery)` is where a composed node meets the
device. Two delivery modes:

  Buffered   A fill thread renders the root in blocks and pushes them into
             the engine's ring. The callback only copies samples out. This
             is the default and tolerates graphs whose cost varies.

                 fill thread                      device callback
             root.render(block) ─push─→ [ ring ] ─pop─→ speakers
             sleep when full

  Direct     The root moves into the callback and is ticked there, one
             frame at a time. Lowest latency, but the whole graph must fit
             in the device period every time. Only for cheap graphs.

The fill loop renders `block_size` samples whenever at least that much
space is free and otherwise sleeps for half a block's duration. It exits
when the player stops it or the engine goes inactive.

Volume is a live parameter applied after the root, in both modes.
*/

/// How rendered audio reaches the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delivery {
    #[default]
    Buffered,
    Direct,
}

#[cfg(feature = "rtrb")]
type Tap = Option<rtrb::Producer<f32>>;
#[cfg(not(feature = "rtrb"))]
type Tap = ();

struct FillThread {
    running: Arc<AtomicBool>,
    handle: JoinHandle<Tap>,
}

pub struct Player {
    engine: AudioEngine,
    volume: Param,
    fill: Option<FillThread>,
    tap: Tap,
}

impl Player {
    pub fn new(engine: AudioEngine) -> Self {
        Self {
            engine,
            volume: Param::new(1.0),
            fill: None,
            tap: Tap::default(),
        }
    }

    /// Mirror every rendered block into `tap` (buffered delivery only).
    /// Samples that do not fit are dropped; the fill thread never waits.
    #[cfg(feature = "rtrb")]
    pub fn with_tap(mut self, tap: rtrb::Producer<f32>) -> Self {
        self.tap = Some(tap);
        self
    }

    /// Start playing `root`.
    ///
    /// The root is moved to the engine's sample rate first. Fails with
    /// `AlreadyActive` while something is playing.
    pub fn play<G: Generator + 'static>(
        &mut self,
        mut root: G,
        volume: f32,
        delivery: Delivery,
    ) -> Result<()> {
        if self.engine.is_active() {
            return Err(Error::AlreadyActive);
        }

        let sample_rate = self.engine.config().sample_rate;
        root.set_sample_rate(sample_rate);
        self.volume.set(volume);

        match delivery {
            Delivery::Direct => {
                self.engine
                    .start_direct(sample_rate, Box::new(root), self.volume.clone())?;
                info!("playing direct at {} Hz", sample_rate);
            }
            Delivery::Buffered => {
                self.engine.start(sample_rate)?;
                if let Err(err) = self.spawn_fill(root) {
                    self.engine.stop();
                    return Err(err);
                }
                info!("playing buffered at {} Hz", sample_rate);
            }
        }

        Ok(())
    }

    fn spawn_fill<G: Generator + 'static>(&mut self, root: G) -> Result<()> {
        let running = Arc::new(AtomicBool::new(true));
        let mut fill = Fill {
            root,
            writer: self.engine.writer(),
            volume: self.volume.clone(),
            running: Arc::clone(&running),
            block_size: self.engine.config().block_size,
            idle: half_block(self.engine.config().block_size, self.engine.config().sample_rate),
            tap: std::mem::take(&mut self.tap),
        };

        let handle = thread::Builder::new()
            .name("radspberry-fill".to_string())
            .spawn(move || {
                fill.run();
                fill.tap
            })
            .map_err(|err| Error::Device(format!("failed to spawn fill thread: {err}")))?;

        self.fill = Some(FillThread { running, handle });
        Ok(())
    }

    /// Stop filling, then stop the stream. Does nothing when stopped.
    pub fn stop(&mut self) {
        if let Some(fill) = self.fill.take() {
            fill.running.store(false, Ordering::Release);
            match fill.handle.join() {
                Ok(tap) => self.tap = tap,
                Err(_) => debug!("fill thread panicked"),
            }
        }
        self.engine.stop();
    }

    pub fn is_playing(&self) -> bool {
        self.engine.is_active()
    }

    /// Live handle to the output volume.
    pub fn volume(&self) -> Param {
        self.volume.clone()
    }

    pub fn engine(&self) -> &AudioEngine {
        &self.engine
    }

    pub fn mute(&self) {
        self.engine.mute();
    }

    pub fn unmute(&self) {
        self.engine.unmute();
    }

    pub fn toggle(&self) -> bool {
        self.engine.toggle()
    }

    pub fn is_muted(&self) -> bool {
        self.engine.is_muted()
    }

    pub fn fade_out(&self) {
        self.engine.fade_out();
    }

    pub fn is_faded(&self) -> bool {
        self.engine.is_faded()
    }

    pub fn available(&self) -> Result<usize> {
        self.engine.available()
    }

    pub fn buffered(&self) -> Result<usize> {
        self.engine.buffered()
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.stop();
    }
}

fn half_block(block_size: usize, sample_rate: f32) -> Duration {
    Duration::from_secs_f32(block_size as f32 / sample_rate / 2.0)
}

struct Fill<G> {
    root: G,
    writer: StreamWriter,
    volume: Param,
    running: Arc<AtomicBool>,
    block_size: usize,
    idle: Duration,
    tap: Tap,
}

impl<G: Generator> Fill<G> {
    fn run(&mut self) {
        debug!("fill thread started ({} samples per block)", self.block_size);
        let mut block = vec![0.0f32; MAX_BLOCK_SIZE];

        while self.running.load(Ordering::Acquire) {
            let free = match self.writer.available() {
                Ok(free) => free,
                Err(_) => break,
            };

            if free < self.block_size {
                thread::sleep(self.idle);
                continue;
            }

            let block = &mut block[..self.block_size];
            self.root.render(block);

            let volume = self.volume.get();
            for sample in block.iter_mut() {
                *sample *= volume;
            }

            mirror(&mut self.tap, block);

            if self.writer.push(block).is_err() {
                break;
            }
        }

        debug!("fill thread exiting");
    }
}

#[cfg(feature = "rtrb")]
fn mirror(tap: &mut Tap, block: &[f32]) {
    if let Some(producer) = tap {
        for &sample in block {
            if producer.push(sample).is_err() {
                break;
            }
        }
    }
}

#[cfg(not(feature = "rtrb"))]
fn mirror(_tap: &mut Tap, _block: &[f32]) {}
