use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/*
Sample Ring
===========

A fixed-capacity circular buffer of f32 samples with exactly one producer
(the fill thread) and one consumer (the device callback). No locks: the
callback must never wait on a producer that the OS has preempted.

           read                  write
            ↓                      ↓
    [ . . . x x x x x x x x x x x . . . . ]
            └──── buffered ───────┘└ free ┘

Cursors count samples since the last reset and only ever grow; the slot
is `cursor % capacity`. 64 bits never wrap in practice, so a cursor value
is never reused and `write - read` is the buffered count.

Only the producer stores `write`. `read` is advanced by the consumer one
sample at a time, and by `clear`, which jumps it to the current `write`.
Both advance it with compare-exchange, so a pop racing a clear either
lands first or retries from the cleared position. Nothing but `reset`
ever moves a cursor backwards.

One Slot Is Reserved
--------------------

The ring holds at most `capacity − 1` samples, the limit of a classic
ring whose cursors wrap at its capacity (there, `write == read` has to
mean empty and never full). Callers size blocks against that, so at every
instant

    buffered + available == capacity − 1

Publication
-----------

The producer stores samples first, then publishes the new write cursor
with `Release`. The consumer loads the write cursor with `Acquire` before
reading samples, so every sample it sees behind the cursor is complete.
A successful read-cursor exchange publishes the freed slots the same way.
A pop whose exchange fails throws its sample away: after a clear the slot
may already hold newer audio.

Samples are kept as raw bits in `AtomicU32` so both sides can touch the
storage through a shared reference without `unsafe`.

Backpressure
------------

Neither side blocks. `push` writes as much as fits and reports the count;
`pop` returns `None` on an empty ring. The caller decides what a short
write or an underrun means.
*/

pub struct SampleRing {
    buffer: Box<[AtomicU32]>,
    write: AtomicU64,
    read: AtomicU64,
}

impl SampleRing {
    /// A ring holding up to `capacity - 1` samples. Capacities below 2 are
    /// raised to 2.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            buffer: (0..capacity).map(|_| AtomicU32::new(0)).collect(),
            write: AtomicU64::new(0),
            read: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    fn slot(&self, cursor: u64) -> &AtomicU32 {
        &self.buffer[(cursor % self.buffer.len() as u64) as usize]
    }

    /// Samples waiting to be read.
    pub fn buffered(&self) -> usize {
        // `read` first: whatever `write` we see afterwards is not behind it
        let read = self.read.load(Ordering::Acquire);
        let write = self.write.load(Ordering::Acquire);
        (write.saturating_sub(read) as usize).min(self.capacity() - 1)
    }

    /// Free slots the producer may fill.
    pub fn available(&self) -> usize {
        self.capacity() - 1 - self.buffered()
    }

    /// Write as many of `samples` as fit; returns the count written.
    ///
    /// Producer side only.
    pub fn push(&self, samples: &[f32]) -> usize {
        let write = self.write.load(Ordering::Relaxed);
        let read = self.read.load(Ordering::Acquire);

        let used = write.saturating_sub(read) as usize;
        let free = (self.capacity() - 1).saturating_sub(used);
        let count = samples.len().min(free);

        for (offset, sample) in samples[..count].iter().enumerate() {
            self.slot(write + offset as u64).store(sample.to_bits(), Ordering::Relaxed);
        }

        self.write.store(write + count as u64, Ordering::Release);
        count
    }

    /// Take the oldest sample. Consumer side only.
    #[inline]
    pub fn pop(&self) -> Option<f32> {
        let mut read = self.read.load(Ordering::Acquire);
        loop {
            let write = self.write.load(Ordering::Acquire);
            if read >= write {
                return None;
            }

            let bits = self.slot(read).load(Ordering::Relaxed);
            match self.read.compare_exchange_weak(
                read,
                read + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Some(f32::from_bits(bits)),
                Err(current) => read = current,
            }
        }
    }

    /// Discard the oldest sample without reading it. Returns false when
    /// the ring was empty.
    #[inline]
    pub fn skip(&self) -> bool {
        let mut read = self.read.load(Ordering::Acquire);
        loop {
            let write = self.write.load(Ordering::Acquire);
            if read >= write {
                return false;
            }

            match self.read.compare_exchange_weak(
                read,
                read + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(current) => read = current,
            }
        }
    }

    /// Discard everything buffered; returns how many samples were dropped.
    ///
    /// Safe from any thread while a producer and consumer are running:
    /// only the read cursor moves, forward to the current write cursor.
    /// Samples pushed after the exchange are kept.
    pub fn clear(&self) -> usize {
        let mut read = self.read.load(Ordering::Acquire);
        loop {
            let write = self.write.load(Ordering::Acquire);
            if read >= write {
                return 0;
            }

            match self.read.compare_exchange_weak(
                read,
                write,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return (write - read) as usize,
                Err(current) => read = current,
            }
        }
    }

    /// Rewind both cursors to zero and zero the storage, for a fresh stream.
    ///
    /// Only valid while no producer or consumer is running.
    pub fn reset(&self) {
        self.read.store(0, Ordering::Release);
        self.write.store(0, Ordering::Release);
        for slot in self.buffer.iter() {
            slot.store(0, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::{atomic::AtomicBool, Arc},
        thread,
    };

    #[test]
    fn one_slot_stays_reserved() {
        let ring = SampleRing::new(8);
        assert_eq!(ring.available(), 7);

        let written = ring.push(&[1.0; 10]);
        assert_eq!(written, 7, "push must truncate to free space");
        assert_eq!(ring.buffered(), 7);
        assert_eq!(ring.available(), 0);
    }

    #[test]
    fn wraps_around_in_fifo_order() {
        let ring = SampleRing::new(4);

        for round in 0..10 {
            let base = round as f32 * 3.0;
            assert_eq!(ring.push(&[base, base + 1.0, base + 2.0]), 3);
            assert_eq!(ring.pop(), Some(base));
            assert_eq!(ring.pop(), Some(base + 1.0));
            assert_eq!(ring.pop(), Some(base + 2.0));
            assert_eq!(ring.pop(), None);
            assert_eq!(ring.buffered() + ring.available(), 3);
        }
    }

    #[test]
    fn skip_advances_without_reading() {
        let ring = SampleRing::new(8);
        ring.push(&[0.1, 0.2]);

        assert!(ring.skip());
        assert_eq!(ring.pop(), Some(0.2));
        assert!(!ring.skip(), "skipping an empty ring is a no-op");
        assert_eq!(ring.buffered(), 0);
    }

    #[test]
    fn clear_and_reset_empty_the_ring() {
        let ring = SampleRing::new(16);
        ring.push(&[0.5; 9]);
        ring.pop();

        assert_eq!(ring.clear(), 8, "clear reports what it discarded");
        assert_eq!(ring.buffered(), 0);
        assert_eq!(ring.available(), 15);
        assert_eq!(ring.clear(), 0, "clearing an empty ring is a no-op");

        ring.push(&[0.5; 3]);
        ring.reset();
        assert_eq!(ring.buffered(), 0);
        assert_eq!(ring.buffer.iter().filter(|s| s.load(Ordering::Relaxed) != 0).count(), 0);
    }

    #[test]
    fn producer_and_consumer_threads_agree_on_order() {
        const TOTAL: usize = 100_000;
        let ring = Arc::new(SampleRing::new(64));
        let producer_ring = Arc::clone(&ring);

        let producer = thread::spawn(move || {
            let mut next = 0usize;
            while next < TOTAL {
                let end = (next + 17).min(TOTAL);
                let chunk: Vec<f32> = (next..end).map(|i| i as f32).collect();
                next += producer_ring.push(&chunk);
                thread::yield_now();
            }
        });

        let mut expected = 0usize;
        while expected < TOTAL {
            match ring.pop() {
                Some(sample) => {
                    assert_eq!(sample, expected as f32, "samples must arrive in push order");
                    expected += 1;
                }
                None => thread::yield_now(),
            }
        }

        producer.join().expect("producer thread panicked");
    }

    #[test]
    fn clear_keeps_the_producer_cursor_and_later_samples() {
        let ring = SampleRing::new(8);
        ring.push(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(ring.pop(), Some(1.0));

        ring.clear();
        ring.push(&[6.0, 7.0]);
        assert_eq!(ring.pop(), Some(6.0), "only audio pushed after the clear plays");
        assert_eq!(ring.pop(), Some(7.0));
        assert_eq!(ring.pop(), None);

        // Wrapping past the end keeps working after a clear
        for round in 0..5 {
            let base = 10.0 * round as f32;
            assert_eq!(ring.push(&[base, base + 1.0, base + 2.0, base + 3.0, base + 4.0]), 5);
            ring.clear();
            assert_eq!(ring.push(&[base + 5.0]), 1);
            assert_eq!(ring.pop(), Some(base + 5.0));
            assert_eq!(ring.buffered() + ring.available(), 7);
        }
    }

    #[test]
    fn clear_from_a_third_thread_never_replays_audio() {
        const TOTAL: usize = 200_000;
        let ring = Arc::new(SampleRing::new(256));
        let finished = Arc::new(AtomicBool::new(false));

        let producer = {
            let ring = Arc::clone(&ring);
            let finished = Arc::clone(&finished);
            thread::spawn(move || {
                let mut next = 0usize;
                while next < TOTAL {
                    let end = (next + 31).min(TOTAL);
                    let chunk: Vec<f32> = (next..end).map(|i| i as f32).collect();
                    next += ring.push(&chunk);
                    thread::yield_now();
                }
                finished.store(true, Ordering::Release);
            })
        };

        let consumer = {
            let ring = Arc::clone(&ring);
            let finished = Arc::clone(&finished);
            thread::spawn(move || {
                let mut last = -1.0f32;
                let mut received = 0usize;
                loop {
                    match ring.pop() {
                        Some(sample) => {
                            assert!(sample > last, "sample {sample} came out after {last}");
                            last = sample;
                            received += 1;
                        }
                        None if finished.load(Ordering::Acquire) && ring.buffered() == 0 => break,
                        None => thread::yield_now(),
                    }
                }
                received
            })
        };

        let mut clears = 0usize;
        while !finished.load(Ordering::Acquire) {
            ring.clear();
            clears += 1;
            let buffered = ring.buffered();
            assert!(buffered <= 255, "buffered count {buffered} escaped the ring");
            thread::yield_now();
        }

        producer.join().expect("producer thread panicked");
        let received = consumer.join().expect("consumer thread panicked");
        assert!(clears > 0);
        assert!(received <= TOTAL, "received {received} of {TOTAL} pushed");
        assert_eq!(ring.buffered() + ring.available(), 255);
    }
}
