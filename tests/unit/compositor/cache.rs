use std::sync::atomic::AtomicUsize;
use std::time::Duration;

use super::*;
use crate::compositor::raster::BlockRasterizer;

#[derive(Default)]
struct SlowCounting {
    calls: AtomicUsize,
}

impl GlyphRasterizer for SlowCounting {
    fn rasterize(&self, text: &str, style: &TextStyle) -> GlyphFxResult<GlyphMask> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(20));
        BlockRasterizer.rasterize(text, style)
    }
}

struct Failing;

impl GlyphRasterizer for Failing {
    fn rasterize(&self, _text: &str, _style: &TextStyle) -> GlyphFxResult<GlyphMask> {
        Err(GlyphFxError::render("boom"))
    }
}

#[test]
fn second_lookup_hits_cache() {
    let cache = MaskCache::new(8);
    let style = TextStyle::default();
    let a = cache.get_or_rasterize(&BlockRasterizer, "Merci", &style).unwrap();
    let b = cache.get_or_rasterize(&BlockRasterizer, "Merci", &style).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.rasterization_count(), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn concurrent_first_access_rasterizes_once() {
    let cache = MaskCache::new(8);
    let raster = SlowCounting::default();
    let style = TextStyle::default();

    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                let m = cache.get_or_rasterize(&raster, "Danke", &style).unwrap();
                assert!(!m.is_empty());
            });
        }
    });

    assert_eq!(raster.calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.rasterization_count(), 1);
}

#[test]
fn full_cache_reports_exhaustion() {
    let cache = MaskCache::new(1);
    let style = TextStyle::default();
    cache.get_or_rasterize(&BlockRasterizer, "a", &style).unwrap();
    let err = cache
        .get_or_rasterize(&BlockRasterizer, "b", &style)
        .unwrap_err();
    assert!(matches!(err, GlyphFxError::ResourceExhausted(_)));
    assert!(err.is_recoverable());

    assert!(cache.evict("a", &style));
    assert!(cache.get_or_rasterize(&BlockRasterizer, "b", &style).is_ok());
}

#[test]
fn failed_rasterization_can_be_retried() {
    let cache = MaskCache::new(4);
    let style = TextStyle::default();
    assert!(cache.get_or_rasterize(&Failing, "x", &style).is_err());
    assert!(cache.is_empty());
    assert!(cache.get_or_rasterize(&BlockRasterizer, "x", &style).is_ok());
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn failed_key_does_not_hold_an_entry() {
    let cache = MaskCache::new(1);
    let style = TextStyle::default();
    for _ in 0..3 {
        assert!(matches!(
            cache.get_or_rasterize(&Failing, "x", &style),
            Err(GlyphFxError::Render(_))
        ));
    }
    assert_eq!(cache.len(), 0);
    assert!(cache.get_or_rasterize(&BlockRasterizer, "y", &style).is_ok());
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.rasterization_count(), 1);
}
