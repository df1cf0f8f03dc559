//! Raw copies between blocks of one format, and alpha-based trimming.

use crate::context::Context;
use crate::format::sample::SampleType;
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{PigmentError, PigmentResult};
use crate::foundation::options::PerformanceOptions;
use crate::image::block::Block;

fn check_formats(src: &Block<'_>, dst: &Block<'_>) -> PigmentResult<()> {
    if src.format() != dst.format() {
        return Err(PigmentError::format(format!(
            "raw copy needs identical formats, got {} and {}",
            src.format(),
            dst.format()
        )));
    }
    Ok(())
}

/// Copy all of `src` into `dst`'s top-left corner, clipped to `dst`.
pub fn copy_block_into(
    ctx: &Context,
    src: &Block<'_>,
    dst: &mut Block<'_>,
    perf: PerformanceOptions,
) -> PigmentResult<()> {
    copy_block_rect_into(ctx, src, dst, src.rect(), Point::default(), perf)
}

/// Copy `src_rect` of `src` so that its origin lands on `dst_pos` in `dst`.
///
/// Parts falling outside either block are skipped.
#[tracing::instrument(skip(ctx, src, dst))]
pub fn copy_block_rect_into(
    ctx: &Context,
    src: &Block<'_>,
    dst: &mut Block<'_>,
    src_rect: Rect,
    dst_pos: Point,
    perf: PerformanceOptions,
) -> PigmentResult<()> {
    check_formats(src, dst)?;
    // A shift outside i32 moves every source pixel off the destination.
    let (Some(shift_x), Some(shift_y)) = (
        dst_pos.x.checked_sub(src_rect.x),
        dst_pos.y.checked_sub(src_rect.y),
    ) else {
        return Ok(());
    };
    let shift = Point::new(shift_x, shift_y);
    let dst_rect = src
        .rect()
        .intersection(src_rect)
        .offset(shift)
        .intersection(dst.rect());
    if dst_rect.is_empty() {
        return Ok(());
    }

    let bpp = dst.bytes_per_pixel();
    let (w, h) = (dst_rect.w as usize, dst_rect.h as usize);
    let (sx, sy) = ((dst_rect.x - shift.x) as usize, (dst_rect.y - shift.y) as usize);
    let (dx, dy) = (dst_rect.x as usize, dst_rect.y as usize);

    let src_spans = src.rows().skip(sy).take(h).map(|r| &r[sx * bpp..(sx + w) * bpp]);
    let dst_spans = dst
        .rows_mut()
        .skip(dy)
        .take(h)
        .map(|r| &mut r[dx * bpp..(dx + w) * bpp]);
    let jobs: Vec<(&[u8], &mut [u8])> = src_spans.zip(dst_spans).collect();
    let job = |(s, d): (&[u8], &mut [u8])| d.copy_from_slice(s);
    if perf.is_parallel() {
        ctx.pool().run_jobs(jobs, job);
    } else {
        jobs.into_iter().for_each(job);
    }
    Ok(())
}

/// Smallest rectangle holding every pixel with non-zero alpha.
///
/// Formats without alpha are fully opaque and return the whole block; a fully transparent
/// block returns an empty rectangle.
pub fn trimmed_transparency_rect(block: &Block<'_>) -> Rect {
    let format = block.format();
    let Some(alpha_at) = format.alpha_offset() else {
        return block.rect();
    };
    let sample = format.sample_type();
    let bpp = format.bytes_per_pixel();
    let visible = |px: &[u8]| match sample {
        SampleType::F32 => sample.read_norm(&px[alpha_at..]) > 0.0,
        _ => px[alpha_at..alpha_at + sample.bytes()].iter().any(|&b| b != 0),
    };

    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for (y, row) in block.rows().enumerate() {
        let mut xs = row.chunks_exact(bpp).enumerate().filter(|(_, px)| visible(px));
        let Some((first, _)) = xs.next() else {
            continue;
        };
        let last = xs.last().map_or(first, |(x, _)| x);
        bounds = Some(match bounds {
            None => (first, y, last, y),
            Some((l, t, r, _)) => (l.min(first), t, r.max(last), y),
        });
    }
    match bounds {
        Some((l, t, r, b)) => Rect::new(l as i32, t as i32, (r - l + 1) as i32, (b - t + 1) as i32),
        None => Rect::default(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/copy.rs"]
mod tests;
