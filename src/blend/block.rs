//! Block-level blending: clipping, format bridging, kernel dispatch and scanline scheduling.

use std::sync::Arc;

use crate::blend::modes::{AlphaMode, BlendMode};
use crate::blend::pixel::{Kernel, PixelBlender};
use crate::blend::rgba8::Rgba8Kernel;
use crate::color::bridge::PixelConverter;
use crate::color::profile::{ColorProfile, same_profile};
use crate::context::Context;
use crate::format::descriptor::PixelFormat;
use crate::format::sample::{Sample, SampleType};
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{PigmentError, PigmentResult};
use crate::foundation::options::PerformanceOptions;
use crate::image::block::Block;

/// Parameters of one blend call.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BlendParams {
    /// Horizontal position of the source block's origin in the backdrop.
    pub x: i32,
    /// Vertical position of the source block's origin in the backdrop.
    pub y: i32,
    /// Color formula.
    pub mode: BlendMode,
    /// Alpha formula.
    pub alpha_mode: AlphaMode,
    /// Source alpha multiplier in `[0, 1]`.
    pub opacity: f32,
    /// Execution hints.
    pub perf: PerformanceOptions,
    /// Fire the backdrop's invalidation callback with the affected rectangle.
    pub invalidate: bool,
}

impl Default for BlendParams {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            mode: BlendMode::Normal,
            alpha_mode: AlphaMode::Normal,
            opacity: 1.0,
            perf: PerformanceOptions::default(),
            invalidate: true,
        }
    }
}

impl BlendParams {
    /// Default parameters with the given blend mode.
    pub fn new(mode: BlendMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Place the source origin at `(x, y)` in the backdrop.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the blend mode.
    pub fn with_mode(mut self, mode: BlendMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the alpha mode.
    pub fn with_alpha_mode(mut self, alpha_mode: AlphaMode) -> Self {
        self.alpha_mode = alpha_mode;
        self
    }

    /// Set the opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set the execution hints.
    pub fn with_perf(mut self, perf: PerformanceOptions) -> Self {
        self.perf = perf;
        self
    }

    /// Enable or disable the invalidation callback.
    pub fn with_invalidate(mut self, invalidate: bool) -> Self {
        self.invalidate = invalidate;
        self
    }

    fn validate(&self) -> PigmentResult<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(PigmentError::validation(format!(
                "opacity must be within [0, 1], got {}",
                self.opacity
            )));
        }
        Ok(())
    }
}

/// Blend `top` onto `back` with `top`'s origin at `(params.x, params.y)`.
///
/// Only the overlap of both blocks is touched. Source pixel `(bx - x, by - y)` lands on
/// backdrop pixel `(bx, by)`.
#[tracing::instrument(skip_all, fields(mode = %params.mode, alpha_mode = %params.alpha_mode))]
pub fn blend(
    ctx: &Context,
    top: &Block<'_>,
    back: &mut Block<'_>,
    params: &BlendParams,
) -> PigmentResult<()> {
    params.validate()?;
    let shift = Point::new(params.x, params.y);
    let top_bb = top.rect().offset(shift);
    let inter = back.rect().intersection(top_bb);
    blend_region(ctx, top, back, inter, shift, params)
}

/// Blend the part of `area` covered by both blocks, with source and backdrop aligned at the
/// origin. `params.x` and `params.y` are ignored.
#[tracing::instrument(skip_all, fields(mode = %params.mode, alpha_mode = %params.alpha_mode))]
pub fn blend_rect(
    ctx: &Context,
    top: &Block<'_>,
    back: &mut Block<'_>,
    area: Rect,
    params: &BlendParams,
) -> PigmentResult<()> {
    params.validate()?;
    let inter = back.rect().intersection(area).intersection(top.rect());
    blend_region(ctx, top, back, inter, Point::default(), params)
}

/// Source pixels addressed in backdrop coordinates.
struct SourceView<'s> {
    data: &'s [u8],
    stride: usize,
    bpp: usize,
    /// Backdrop position of `data`'s first pixel.
    origin: Point,
}

impl<'s> SourceView<'s> {
    fn span(&self, bx: usize, by: usize, w: usize) -> &'s [u8] {
        let sx = (bx as i64 - i64::from(self.origin.x)) as usize;
        let sy = (by as i64 - i64::from(self.origin.y)) as usize;
        let start = sy * self.stride + sx * self.bpp;
        &self.data[start..start + w * self.bpp]
    }
}

/// Copy of the source region in the backdrop's format and profile.
fn bridged_region(
    top: &Block<'_>,
    top_profile: &Arc<ColorProfile>,
    dst: PixelFormat,
    dst_profile: &Arc<ColorProfile>,
    inter: Rect,
    shift: Point,
) -> PigmentResult<Vec<u8>> {
    let converter = PixelConverter::new(top.format(), top_profile, dst, dst_profile)?;
    let (w, h) = (inter.w as usize, inter.h as usize);
    let (sbpp, dbpp) = (top.bytes_per_pixel(), dst.bytes_per_pixel());
    let sx = (inter.x - shift.x) as usize;
    let sy = (inter.y - shift.y) as usize;

    let mut out = vec![0u8; w * h * dbpp];
    let src_rows = top.rows().skip(sy).take(h);
    for (src, dst_row) in src_rows.zip(out.chunks_exact_mut(w * dbpp)) {
        converter.convert_run(&src[sx * sbpp..(sx + w) * sbpp], dst_row);
    }
    Ok(out)
}

fn blend_region(
    ctx: &Context,
    top: &Block<'_>,
    back: &mut Block<'_>,
    inter: Rect,
    shift: Point,
    params: &BlendParams,
) -> PigmentResult<()> {
    if inter.is_empty() || params.opacity == 0.0 {
        return Ok(());
    }

    let format = back.format();
    let top_profile = ctx.profiles().resolve(top.profile(), top.format().model())?;
    let back_profile = ctx.profiles().resolve(back.profile(), format.model())?;

    let bridged;
    let src = if top.format() == format && same_profile(&top_profile, &back_profile) {
        SourceView {
            data: top.data(),
            stride: top.stride(),
            bpp: top.bytes_per_pixel(),
            origin: shift,
        }
    } else {
        tracing::debug!(top = %top.format(), back = %format, "bridging source region");
        bridged = bridged_region(top, &top_profile, format, &back_profile, inter, shift)?;
        SourceView {
            data: &bridged,
            stride: inter.w as usize * format.bytes_per_pixel(),
            bpp: format.bytes_per_pixel(),
            origin: Point::new(inter.x, inter.y),
        }
    };

    let blender = PixelBlender::new(format, params.mode, params.alpha_mode, f64::from(params.opacity));
    let fast = match blender.kernel {
        Kernel::Separable(_) if format == PixelFormat::RGBA8 && params.perf.use_sse_if_available => {
            Rgba8Kernel::new(params.mode, params.alpha_mode, blender.opacity)
        }
        _ => None,
    };
    tracing::debug!(fast = fast.is_some(), workers = params.perf.desired_workers, "blend path");

    match format.sample_type() {
        SampleType::U8 => run_rows::<u8>(ctx, &blender, fast, back, &src, inter, params.perf),
        SampleType::U16 => run_rows::<u16>(ctx, &blender, None, back, &src, inter, params.perf),
        SampleType::U32 => run_rows::<u32>(ctx, &blender, None, back, &src, inter, params.perf),
        SampleType::F32 => run_rows::<f32>(ctx, &blender, None, back, &src, inter, params.perf),
    }

    if params.invalidate {
        back.invalidate(inter);
    }
    Ok(())
}

/// One job per backdrop scanline; the serial path runs the same jobs in order.
fn run_rows<S: Sample>(
    ctx: &Context,
    blender: &PixelBlender,
    fast: Option<Rgba8Kernel>,
    back: &mut Block<'_>,
    src: &SourceView<'_>,
    inter: Rect,
    perf: PerformanceOptions,
) {
    let bpp = back.bytes_per_pixel();
    let (x0, w) = (inter.x as usize, inter.w as usize);
    let jobs: Vec<(usize, &mut [u8], &[u8])> = back
        .rows_mut()
        .enumerate()
        .skip(inter.y as usize)
        .take(inter.h as usize)
        .map(|(by, row)| (by, &mut row[x0 * bpp..(x0 + w) * bpp], src.span(x0, by, w)))
        .collect();

    let job = |(by, b, t): (usize, &mut [u8], &[u8])| match fast {
        Some(k) => k.blend_row(b, t),
        None => blender.apply_run::<S>(b, t, x0 as i64, by as i64),
    };
    if perf.is_parallel() {
        ctx.pool().run_jobs(jobs, job);
    } else {
        jobs.into_iter().for_each(job);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/block.rs"]
mod tests;
