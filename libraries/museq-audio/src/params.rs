//! Shared EQ parameters
//!
//! Written by control threads, read by the audio callback at the start of
//! every block. Each slot is an `f32` stored as bits in an `AtomicU32`.

use museq_core::{EqVector, EQ_DB_LIMIT, EQ_SLOTS};
use std::sync::atomic::{AtomicU32, Ordering};

/// Lock-free EQ vector shared with the audio thread
#[derive(Debug)]
pub struct EqParams {
    slots: [AtomicU32; EQ_SLOTS],
}

impl Default for EqParams {
    fn default() -> Self {
        Self::new()
    }
}

impl EqParams {
    /// All slots at 0 dB
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| AtomicU32::new(0.0_f32.to_bits())),
        }
    }

    /// Parameters initialised from an EQ vector
    pub fn from_vector(eq: &EqVector) -> Self {
        let params = Self::new();
        params.store(eq);
        params
    }

    /// Read one slot (0.0 for out-of-range indices)
    #[inline]
    pub fn get(&self, slot: usize) -> f32 {
        self.slots
            .get(slot)
            .map_or(0.0, |s| f32::from_bits(s.load(Ordering::Relaxed)))
    }

    /// Write one slot, clamped to ±12 dB
    ///
    /// Returns `false` if `slot` is out of range.
    pub fn set(&self, slot: usize, db: f32) -> bool {
        let Some(cell) = self.slots.get(slot) else {
            return false;
        };
        let db = if db.is_nan() { 0.0 } else { db.clamp(-EQ_DB_LIMIT, EQ_DB_LIMIT) };
        cell.store(db.to_bits(), Ordering::Relaxed);
        true
    }

    /// Overwrite every slot
    pub fn store(&self, eq: &EqVector) {
        for (slot, db) in eq.as_array().iter().enumerate() {
            self.set(slot, *db);
        }
    }

    /// Copy of the current values
    pub fn snapshot(&self) -> EqVector {
        EqVector::new(std::array::from_fn(|slot| self.get(slot)))
    }
}
