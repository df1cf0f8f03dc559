//! Whole-block format and color-space conversion.

use crate::color::bridge::PixelConverter;
use crate::context::Context;
use crate::foundation::error::{PigmentError, PigmentResult};
use crate::foundation::options::PerformanceOptions;
use crate::image::block::Block;

fn check_dimensions(src: &Block<'_>, dst: &Block<'_>) -> PigmentResult<()> {
    if (src.width(), src.height()) != (dst.width(), dst.height()) {
        return Err(PigmentError::validation(format!(
            "conversion needs equal dimensions, got {}x{} and {}x{}",
            src.width(),
            src.height(),
            dst.width(),
            dst.height()
        )));
    }
    Ok(())
}

fn run_converter(
    ctx: &Context,
    converter: &PixelConverter,
    src: &Block<'_>,
    dst: &mut Block<'_>,
    perf: PerformanceOptions,
) {
    if converter.is_raw_copy() && perf.use_mem_if_available {
        dst.data_mut().copy_from_slice(src.data());
        return;
    }
    let jobs: Vec<(&[u8], &mut [u8])> = src.rows().zip(dst.rows_mut()).collect();
    let job = |(s, d): (&[u8], &mut [u8])| converter.convert_run(s, d);
    if perf.is_parallel() {
        ctx.pool().run_jobs(jobs, job);
    } else {
        jobs.into_iter().for_each(job);
    }
}

/// Convert between sample types and channel layouts of the same color model.
///
/// No colorimetric transform runs; values are rescaled channel by channel. Identical formats
/// are copied byte for byte.
#[tracing::instrument(skip(ctx, src, dst))]
pub fn convert_type_and_layout_into(
    ctx: &Context,
    src: &Block<'_>,
    dst: &mut Block<'_>,
    perf: PerformanceOptions,
) -> PigmentResult<()> {
    check_dimensions(src, dst)?;
    let (sf, df) = (src.format(), dst.format());
    if sf.model() != df.model() {
        return Err(PigmentError::format(format!(
            "type and layout conversion needs one color model, got {sf} and {df}"
        )));
    }
    let profile = ctx.profiles().default_for(sf.model())?;
    let converter = PixelConverter::new(sf, &profile, df, &profile)?;
    run_converter(ctx, &converter, src, dst, perf);
    Ok(())
}

/// Convert `src` into `dst` across color models and profiles through the connection space.
///
/// Blocks without an explicit profile use the registry default for their model.
#[tracing::instrument(skip(ctx, src, dst))]
pub fn convert_into(
    ctx: &Context,
    src: &Block<'_>,
    dst: &mut Block<'_>,
    perf: PerformanceOptions,
) -> PigmentResult<()> {
    check_dimensions(src, dst)?;
    let src_profile = ctx.profiles().resolve(src.profile(), src.format().model())?;
    let dst_profile = ctx.profiles().resolve(dst.profile(), dst.format().model())?;
    let converter = PixelConverter::new(src.format(), &src_profile, dst.format(), &dst_profile)?;
    run_converter(ctx, &converter, src, dst, perf);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/ops/convert.rs"]
mod tests;
