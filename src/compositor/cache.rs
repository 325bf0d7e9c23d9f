use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use crate::compositor::mask::{GlyphMask, MaskKey, TextStyle};
use crate::compositor::raster::GlyphRasterizer;
use crate::foundation::error::{GlyphFxError, GlyphFxResult};

#[derive(Default)]
struct Slot {
    mask: OnceLock<Arc<GlyphMask>>,
    fill_lock: Mutex<()>,
}

/// Shared memo of rasterized masks keyed by `(text, style)`.
///
/// Readers never block each other once a key is populated. On a concurrent first access exactly
/// one caller rasterizes; the rest wait on that slot and then read the published mask. A failed
/// rasterization gives its key back, so it neither counts toward the limit nor blocks a retry.
pub struct MaskCache {
    slots: Mutex<HashMap<MaskKey, Arc<Slot>>>,
    max_entries: usize,
    rasterizations: AtomicU64,
}

impl std::fmt::Debug for MaskCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskCache")
            .field("entries", &self.len())
            .field("max_entries", &self.max_entries)
            .field("rasterizations", &self.rasterization_count())
            .finish()
    }
}

impl MaskCache {
    /// Cache holding at most `max_entries` distinct keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            max_entries,
            rasterizations: AtomicU64::new(0),
        }
    }

    /// Mask for `(text, style)`, rasterizing it on first use.
    ///
    /// Returns [`GlyphFxError::ResourceExhausted`] when a new key would exceed the entry limit.
    pub fn get_or_rasterize(
        &self,
        rasterizer: &dyn GlyphRasterizer,
        text: &str,
        style: &TextStyle,
    ) -> GlyphFxResult<Arc<GlyphMask>> {
        let key = MaskKey::new(text, style);
        let slot = {
            let mut slots = self
                .slots
                .lock()
                .map_err(|_| GlyphFxError::render("mask cache poisoned"))?;
            match slots.get(&key) {
                Some(slot) => Arc::clone(slot),
                None => {
                    if slots.len() >= self.max_entries {
                        return Err(GlyphFxError::exhausted(format!(
                            "mask cache is full ({} entries)",
                            self.max_entries
                        )));
                    }
                    let slot = Arc::new(Slot::default());
                    slots.insert(key.clone(), Arc::clone(&slot));
                    slot
                }
            }
        };

        if let Some(mask) = slot.mask.get() {
            tracing::trace!(text = key.text(), "mask cache hit");
            return Ok(Arc::clone(mask));
        }

        let _fill = slot
            .fill_lock
            .lock()
            .map_err(|_| GlyphFxError::render("mask slot poisoned"))?;
        if let Some(mask) = slot.mask.get() {
            return Ok(Arc::clone(mask));
        }

        tracing::debug!(text = key.text(), "mask cache miss");
        let mask = match rasterizer.rasterize(text, style) {
            Ok(mask) => Arc::new(mask),
            Err(e) => {
                drop(_fill);
                self.release_unfilled(&key, &slot);
                return Err(e);
            }
        };
        self.rasterizations.fetch_add(1, Ordering::Relaxed);
        let _ = slot.mask.set(Arc::clone(&mask));
        Ok(mask)
    }

    fn release_unfilled(&self, key: &MaskKey, slot: &Arc<Slot>) {
        let Ok(mut slots) = self.slots.lock() else {
            return;
        };
        if slots
            .get(key)
            .is_some_and(|s| Arc::ptr_eq(s, slot) && s.mask.get().is_none())
        {
            slots.remove(key);
        }
    }

    /// Drop the entry for `(text, style)`, if any.
    pub fn evict(&self, text: &str, style: &TextStyle) -> bool {
        match self.slots.lock() {
            Ok(mut slots) => slots.remove(&MaskKey::new(text, style)).is_some(),
            Err(_) => false,
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.clear();
        }
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.slots.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// `true` when no key is held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total successful rasterizations performed through this cache.
    pub fn rasterization_count(&self) -> u64 {
        self.rasterizations.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/cache.rs"]
mod tests;
