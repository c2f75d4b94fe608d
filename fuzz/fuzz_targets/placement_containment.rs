#![no_main]

use layout::{PlacementConfig, Rectangle, Size, place};
use libfuzzer_sys::fuzz_target;

fn f(bytes: &[u8], i: usize) -> f32 {
    let b = bytes.get(i * 2..i * 2 + 2).unwrap_or(&[0, 0]);
    i16::from_le_bytes([b[0], b[1]]) as f32 / 4.0
}

fuzz_target!(|data: &[u8]| {
    let anchor = Rectangle::new(f(data, 0), f(data, 1), f(data, 2).abs(), f(data, 3).abs());
    let offset = f(data, 4);
    let size = Size::new(f(data, 5).abs(), f(data, 6).abs());
    let viewport = Size::new(f(data, 7).abs(), f(data, 8).abs());
    let cfg = PlacementConfig::default();

    let p = place(anchor, offset, size, viewport, &cfg);
    let r = p.rect;
    assert!(r.is_finite());
    assert!(r.width >= 0.0 && r.height >= 0.0);
    if viewport.width >= 2.0 * cfg.margin && viewport.height >= 2.0 * cfg.margin {
        assert!(r.left() >= cfg.margin, "{r:?} in {viewport:?}");
        assert!(r.top() >= cfg.margin, "{r:?} in {viewport:?}");
        assert!(r.right() <= viewport.width - cfg.margin + 1e-3, "{r:?} in {viewport:?}");
        assert!(r.bottom() <= viewport.height - cfg.margin + 1e-3, "{r:?} in {viewport:?}");
    }
});
