//! Lane-batched kernel for canonical 8-bit RGBA and separable blend modes.
//!
//! Pixels are loaded four at a time into per-channel lane arrays. The row loop is generic over
//! the channel function and instantiated once per separable mode, so the function is inlined
//! into straight-line arithmetic over fixed-size arrays that the compiler can vectorize. The
//! math is the scalar path's math (same functions, same operation order), so both produce the
//! same bytes; the fast path additionally skips lanes whose result is known without arithmetic.

use crate::blend::compositor::{AlphaTerms, composite};
use crate::blend::func;
use crate::blend::modes::{AlphaMode, BlendMode};
use crate::format::sample::Sample;

const LANES: usize = 4;
const CHUNK: usize = LANES * 4;
const M: f64 = 255.0;

/// Alpha modes for which a fully transparent source returns the backdrop alpha unchanged.
fn transparent_source_is_noop(am: AlphaMode) -> bool {
    matches!(
        am,
        AlphaMode::Normal
            | AlphaMode::Erase
            | AlphaMode::Back
            | AlphaMode::Sub
            | AlphaMode::Add
            | AlphaMode::Max
    )
}

/// Fast-path state for one blend call.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Rgba8Kernel {
    mode: BlendMode,
    alpha_mode: AlphaMode,
    opacity: f64,
    /// Normal/Normal at full opacity: an opaque source pixel is copied verbatim.
    copy_opaque: bool,
    skip_transparent: bool,
}

impl Rgba8Kernel {
    /// Kernel for `mode`, or `None` when the mode is not separable.
    pub(crate) fn new(mode: BlendMode, alpha_mode: AlphaMode, opacity: f64) -> Option<Self> {
        func::separable_fn(mode)?;
        Some(Self {
            mode,
            alpha_mode,
            opacity,
            copy_opaque: mode == BlendMode::Normal
                && alpha_mode == AlphaMode::Normal
                && opacity >= 1.0,
            skip_transparent: transparent_source_is_noop(alpha_mode),
        })
    }

    pub(crate) fn blend_row(&self, back: &mut [u8], top: &[u8]) {
        match self.mode {
            BlendMode::Normal => self.blend_row_with(back, top, func::normal),
            BlendMode::Erase | BlendMode::Behind => self.blend_row_with(back, top, func::backdrop),
            BlendMode::Darken => self.blend_row_with(back, top, func::darken),
            BlendMode::Multiply => self.blend_row_with(back, top, func::multiply),
            BlendMode::ColorBurn => self.blend_row_with(back, top, func::color_burn),
            BlendMode::LinearBurn => self.blend_row_with(back, top, func::linear_burn),
            BlendMode::Lighten => self.blend_row_with(back, top, func::lighten),
            BlendMode::Screen => self.blend_row_with(back, top, func::screen),
            BlendMode::ColorDodge => self.blend_row_with(back, top, func::color_dodge),
            BlendMode::LinearDodge => self.blend_row_with(back, top, func::linear_dodge),
            BlendMode::Overlay => self.blend_row_with(back, top, func::overlay),
            BlendMode::SoftLight => self.blend_row_with(back, top, func::soft_light),
            BlendMode::HardLight => self.blend_row_with(back, top, func::hard_light),
            BlendMode::VividLight => self.blend_row_with(back, top, func::vivid_light),
            BlendMode::LinearLight => self.blend_row_with(back, top, func::linear_light),
            BlendMode::PinLight => self.blend_row_with(back, top, func::pin_light),
            BlendMode::HardMix => self.blend_row_with(back, top, func::hard_mix),
            BlendMode::Difference => self.blend_row_with(back, top, func::difference),
            BlendMode::Exclusion => self.blend_row_with(back, top, func::exclusion),
            BlendMode::Substract => self.blend_row_with(back, top, func::substract),
            BlendMode::Divide => self.blend_row_with(back, top, func::divide),
            // Rejected by `new`.
            BlendMode::Dissolve
            | BlendMode::DarkerColor
            | BlendMode::LighterColor
            | BlendMode::Hue
            | BlendMode::Saturation
            | BlendMode::Color
            | BlendMode::Luminosity => {}
        }
    }

    fn blend_row_with<F>(&self, back: &mut [u8], top: &[u8], f: F)
    where
        F: Fn(f64, f64, f64) -> f64 + Copy,
    {
        let mut back_chunks = back.chunks_exact_mut(CHUNK);
        let mut top_chunks = top.chunks_exact(CHUNK);
        for (b, t) in back_chunks.by_ref().zip(top_chunks.by_ref()) {
            self.blend_lanes(b, t, f);
        }
        let pairs = back_chunks
            .into_remainder()
            .chunks_exact_mut(4)
            .zip(top_chunks.remainder().chunks_exact(4));
        for (b, t) in pairs {
            self.blend_one(b, t, f);
        }
    }

    fn blend_lanes<F: Fn(f64, f64, f64) -> f64>(&self, back: &mut [u8], top: &[u8], f: F) {
        let top_alpha: [u8; LANES] = std::array::from_fn(|l| top[l * 4 + 3]);
        if self.skip_transparent && top_alpha == [0; LANES] {
            return;
        }
        if self.copy_opaque && top_alpha == [255; LANES] {
            back.copy_from_slice(top);
            return;
        }

        let terms: [AlphaTerms; LANES] = std::array::from_fn(|l| {
            let ab = f64::from(back[l * 4 + 3]);
            let at = f64::from(top_alpha[l]) * self.opacity;
            AlphaTerms::new(self.alpha_mode, ab, at, M)
        });
        for c in 0..3 {
            let cb: [f64; LANES] = std::array::from_fn(|l| f64::from(back[l * 4 + c]));
            let cs: [f64; LANES] = std::array::from_fn(|l| f64::from(top[l * 4 + c]));
            let out: [f64; LANES] = std::array::from_fn(|l| {
                composite(cb[l], cs[l], f(cb[l], cs[l], M), terms[l].back, terms[l].var, M)
            });
            for l in 0..LANES {
                back[l * 4 + c] = u8::from_scaled(out[l]);
            }
        }
        for l in 0..LANES {
            back[l * 4 + 3] = u8::from_scaled(terms[l].result);
        }
    }

    fn blend_one<F: Fn(f64, f64, f64) -> f64>(&self, back: &mut [u8], top: &[u8], f: F) {
        if self.skip_transparent && top[3] == 0 {
            return;
        }
        if self.copy_opaque && top[3] == 255 {
            back.copy_from_slice(top);
            return;
        }
        let t = AlphaTerms::new(
            self.alpha_mode,
            f64::from(back[3]),
            f64::from(top[3]) * self.opacity,
            M,
        );
        for c in 0..3 {
            let (cb, cs) = (f64::from(back[c]), f64::from(top[c]));
            back[c] = u8::from_scaled(composite(cb, cs, f(cb, cs, M), t.back, t.var, M));
        }
        back[3] = u8::from_scaled(t.result);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/rgba8.rs"]
mod tests;
