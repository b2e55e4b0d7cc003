use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

/*
Live Parameters
===============

A parameter is read by the fill thread on every tick and may be written at
any moment from somewhere else: a UI thread, a modulation wrapper, a test.
Each parameter therefore lives in its own single-word atomic cell.

    control thread                 fill thread
    ──────────────                 ───────────
    param.set(880.0) ──store──→ [ AtomicU32 ] ──load──→ osc.tick()

An f32 is stored as its raw bits in an `AtomicU32`. One load observes one
complete write; a value can never be half-old and half-new. There is no
ordering between DIFFERENT parameters: writing cutoff then resonance may be
observed by the tick as new cutoff with old resonance for one sample.

Whichever write lands last before a tick is the value that tick sees.

`Param` is a cheap, cloneable handle. Clone it out of a node before the node
moves into a player, keep the clone on the control side, and every `set` is
visible to the next tick.

Bounds
------

A cell may carry [min, max] bounds. Writes are clamped, reads are not (the
stored value is always already in range). NaN writes are ignored so a
broken modulation source cannot poison a filter.
*/

#[derive(Debug)]
struct ParamCell {
    bits: AtomicU32,
    min: f32,
    max: f32,
}

#[derive(Debug, Clone)]
pub struct Param {
    cell: Arc<ParamCell>,
}

impl Param {
    /// An unbounded parameter.
    pub fn new(value: f32) -> Self {
        Self::bounded(value, f32::NEG_INFINITY, f32::INFINITY)
    }

    /// A parameter whose writes are clamped to `[min, max]`.
    pub fn bounded(value: f32, min: f32, max: f32) -> Self {
        let min = if min.is_nan() { f32::NEG_INFINITY } else { min };
        let max = if max.is_nan() { f32::INFINITY } else { max };
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let initial = if value.is_nan() { min.max(0.0).min(max) } else { value.clamp(min, max) };

        Self {
            cell: Arc::new(ParamCell {
                bits: AtomicU32::new(initial.to_bits()),
                min,
                max,
            }),
        }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.cell.bits.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set(&self, value: f32) {
        if value.is_nan() {
            return;
        }
        let clamped = value.clamp(self.cell.min, self.cell.max);
        self.cell.bits.store(clamped.to_bits(), Ordering::Relaxed);
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.cell.min, self.cell.max)
    }

    /// True when both handles point at the same cell.
    pub fn same_cell(&self, other: &Param) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}
