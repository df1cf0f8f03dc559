//! Solid fills and clears over whole blocks or clipped rectangles.

use crate::color::value::Color;
use crate::context::Context;
use crate::foundation::core::Rect;
use crate::foundation::options::PerformanceOptions;
use crate::image::block::Block;
use crate::image::pixel::PixelAccess;

/// Run `f` on the `clip` span of every affected row, one job per row when parallel.
pub(crate) fn for_each_span<F>(
    ctx: &Context,
    block: &mut Block<'_>,
    clip: Rect,
    perf: PerformanceOptions,
    f: F,
) where
    F: Fn(&mut [u8]) + Sync,
{
    let bpp = block.bytes_per_pixel();
    let (x0, w) = (clip.x as usize, clip.w as usize);
    let spans = block
        .rows_mut()
        .skip(clip.y as usize)
        .take(clip.h as usize)
        .map(|row| &mut row[x0 * bpp..(x0 + w) * bpp]);
    if perf.is_parallel() {
        ctx.pool().run_jobs(spans.collect::<Vec<_>>(), f);
    } else {
        spans.for_each(f);
    }
}

/// Write `pattern` into every pixel of `span`.
fn splat(span: &mut [u8], pattern: &[u8], use_mem: bool) {
    if use_mem {
        if let Some(&b) = pattern.first()
            && pattern.iter().all(|&v| v == b)
        {
            span.fill(b);
            return;
        }
        // Doubling copy: each pass duplicates everything written so far.
        let n = pattern.len();
        span[..n].copy_from_slice(pattern);
        let mut filled = n;
        while filled < span.len() {
            let len = filled.min(span.len() - filled);
            span.copy_within(..len, filled);
            filled += len;
        }
    } else {
        for px in span.chunks_exact_mut(pattern.len()) {
            px.copy_from_slice(pattern);
        }
    }
}

/// Fill the whole block with `color`.
pub fn fill(
    ctx: &Context,
    block: &mut Block<'_>,
    color: &Color,
    perf: PerformanceOptions,
    invalidate: bool,
) {
    let rect = block.rect();
    fill_rect(ctx, block, color, rect, perf, invalidate);
}

/// Fill the part of `rect` inside the block with `color`, converted to the block's format.
#[tracing::instrument(skip(ctx, block, color))]
pub fn fill_rect(
    ctx: &Context,
    block: &mut Block<'_>,
    color: &Color,
    rect: Rect,
    perf: PerformanceOptions,
    invalidate: bool,
) {
    let clip = block.rect().intersection(rect);
    if clip.is_empty() {
        return;
    }
    let px = color.to_pixel(block.format());
    let pattern = px.bytes();
    for_each_span(ctx, block, clip, perf, |span| {
        splat(span, pattern, perf.use_mem_if_available)
    });
    if invalidate {
        block.invalidate(clip);
    }
}

/// Replace every pixel's color channels with `color`, keeping each pixel's alpha.
#[tracing::instrument(skip(ctx, block, color))]
pub fn fill_preserve_alpha(
    ctx: &Context,
    block: &mut Block<'_>,
    color: &Color,
    perf: PerformanceOptions,
    invalidate: bool,
) {
    let format = block.format();
    let Some(alpha_at) = format.alpha_offset() else {
        fill(ctx, block, color, perf, invalidate);
        return;
    };
    let px = color.to_pixel(format);
    let pattern = px.bytes();
    let bps = format.bytes_per_sample();
    let alpha = alpha_at..alpha_at + bps;
    let clip = block.rect();
    for_each_span(ctx, block, clip, perf, |span| {
        for dst in span.chunks_exact_mut(pattern.len()) {
            for (i, (d, s)) in dst.iter_mut().zip(pattern).enumerate() {
                if !alpha.contains(&i) {
                    *d = *s;
                }
            }
        }
    });
    if invalidate {
        block.invalidate(clip);
    }
}

/// Zero every byte of the block: transparent black for every format.
pub fn clear(ctx: &Context, block: &mut Block<'_>, perf: PerformanceOptions, invalidate: bool) {
    let rect = block.rect();
    clear_rect(ctx, block, rect, perf, invalidate);
}

/// Zero the part of `rect` inside the block.
#[tracing::instrument(skip(ctx, block))]
pub fn clear_rect(
    ctx: &Context,
    block: &mut Block<'_>,
    rect: Rect,
    perf: PerformanceOptions,
    invalidate: bool,
) {
    let clip = block.rect().intersection(rect);
    if clip.is_empty() {
        return;
    }
    let zero = vec![0u8; block.bytes_per_pixel()];
    for_each_span(ctx, block, clip, perf, |span| {
        splat(span, &zero, perf.use_mem_if_available)
    });
    if invalidate {
        block.invalidate(clip);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/clear_fill.rs"]
mod tests;
