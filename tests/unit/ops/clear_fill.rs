use std::sync::Mutex;

use super::*;
use crate::format::descriptor::PixelFormat;

fn ctx() -> Context {
    Context::new(Some(3)).unwrap()
}

fn perf(workers: usize, mem: bool) -> PerformanceOptions {
    PerformanceOptions::default()
        .with_workers(workers)
        .with_mem(mem)
}

#[test]
fn splat_paths_agree() {
    let pattern = [1u8, 2, 3, 4, 5, 6];
    for pixels in [1, 2, 3, 7, 16] {
        let mut a = vec![0u8; pixels * 6];
        let mut b = vec![9u8; pixels * 6];
        splat(&mut a, &pattern, true);
        splat(&mut b, &pattern, false);
        assert_eq!(a, b, "{pixels} pixels");
        assert!(a.chunks_exact(6).all(|p| p == pattern));
    }
}

#[test]
fn fill_writes_converted_color_everywhere() {
    let ctx = ctx();
    let mut block = Block::new(5, 4, PixelFormat::BGRA8).unwrap();
    fill(&ctx, &mut block, &Color::rgba8(10, 20, 30, 255), perf(1, true), false);
    assert!(block.data().chunks_exact(4).all(|p| p == [30, 20, 10, 255]));
}

#[test]
fn fill_rect_is_clipped_and_invalidates_once() {
    let ctx = ctx();
    let seen = Mutex::new(Vec::new());
    let mut block = Block::new(4, 4, PixelFormat::RGBA8).unwrap();
    block.set_invalidate_callback(|r| seen.lock().unwrap().push(*r));

    let red = Color::rgb(1.0, 0.0, 0.0);
    fill_rect(&ctx, &mut block, &red, Rect::new(-1, 2, 3, 9), perf(3, false), true);

    for y in 0..4 {
        for x in 0..4 {
            let r = block.pixel(x, y).unwrap().bytes()[0];
            let inside = x < 2 && y >= 2;
            assert_eq!(r, if inside { 255 } else { 0 }, "({x}, {y})");
        }
    }
    drop(block);
    assert_eq!(*seen.lock().unwrap(), vec![Rect::new(0, 2, 2, 2)]);
}

#[test]
fn fill_outside_block_is_noop() {
    let ctx = ctx();
    let calls = Mutex::new(0);
    let mut block = Block::new(2, 2, PixelFormat::RGBA8).unwrap();
    block.set_invalidate_callback(|_| *calls.lock().unwrap() += 1);
    fill_rect(&ctx, &mut block, &Color::grey(1.0), Rect::new(5, 5, 2, 2), perf(1, true), true);
    assert!(block.data().iter().all(|&b| b == 0));
    drop(block);
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[test]
fn fill_preserve_alpha_keeps_alpha() {
    let ctx = ctx();
    let data: Vec<u8> = (0..6).flat_map(|i| [0, 0, 0, i * 40]).collect();
    let mut block = Block::from_vec(3, 2, PixelFormat::ARGB8, data.clone()).unwrap();
    fill_preserve_alpha(&ctx, &mut block, &Color::rgb(0.0, 1.0, 0.0), perf(2, true), false);
    for (i, p) in block.data().chunks_exact(4).enumerate() {
        assert_eq!(p[0], data[i * 4 + 3]);
        assert_eq!(p[2], 255);
        assert_eq!((p[1], p[3]), (0, 0));
    }
}

#[test]
fn fill_preserve_alpha_without_alpha_channel_fills() {
    let ctx = ctx();
    let mut block = Block::new(2, 2, PixelFormat::RGB8).unwrap();
    fill_preserve_alpha(&ctx, &mut block, &Color::rgb(0.0, 0.0, 1.0), perf(1, true), false);
    assert!(block.data().chunks_exact(3).all(|p| p == [0, 0, 255]));
}

#[test]
fn clear_serial_and_parallel_match() {
    let ctx = ctx();
    let data: Vec<u8> = (0..8 * 8 * 8).map(|i| (i % 251) as u8).collect();
    let mut a = Block::from_vec(8, 8, PixelFormat::RGBA16, data.clone()).unwrap();
    let mut b = Block::from_vec(8, 8, PixelFormat::RGBA16, data).unwrap();
    clear_rect(&ctx, &mut a, Rect::new(2, 1, 4, 5), perf(1, true), false);
    clear_rect(&ctx, &mut b, Rect::new(2, 1, 4, 5), perf(4, false), false);
    assert_eq!(a.data(), b.data());
    assert!(a.pixel(3, 3).unwrap().bytes().iter().all(|&v| v == 0));
    assert!(a.pixel(0, 0).unwrap().bytes().iter().any(|&v| v != 0));

    clear(&ctx, &mut a, perf(2, true), false);
    assert!(a.data().iter().all(|&v| v == 0));
}
