use smallvec::SmallVec;

use crate::blend::alpha::blend_alpha;
use crate::blend::compositor::{AlphaTerms, composite};
use crate::blend::func::{NonSeparableFn, SeparableFn, non_separable_fn, separable_fn};
use crate::blend::modes::{AlphaMode, BlendMode};
use crate::color::value::{model_from_rgb, model_to_rgb};
use crate::format::descriptor::PixelFormat;
use crate::format::sample::Sample;

/// Per-pixel operation selected once per blend call.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Kernel {
    Separable(SeparableFn),
    /// Keeps backdrop color; only the alpha mode acts.
    Erase,
    NonSeparable(NonSeparableFn),
    Dissolve,
}

impl Kernel {
    pub(crate) fn for_mode(mode: BlendMode) -> Self {
        if mode == BlendMode::Erase {
            return Self::Erase;
        }
        if let Some(f) = non_separable_fn(mode) {
            return Self::NonSeparable(f);
        }
        // Dissolve is the only mode in neither table.
        match separable_fn(mode) {
            Some(f) => Self::Separable(f),
            None => Self::Dissolve,
        }
    }
}

/// Everything a pixel blender needs besides the pixels themselves.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PixelBlender {
    pub(crate) format: PixelFormat,
    pub(crate) kernel: Kernel,
    pub(crate) alpha_mode: AlphaMode,
    pub(crate) opacity: f64,
}

/// Deterministic stipple threshold for backdrop pixel `(x, y)`, in `[0, 1)`.
pub fn dissolve_toss(x: i64, y: i64) -> f32 {
    let sum = (x * y + (x + y)) as f32;
    let spread = (8_253_729.0 * ((sum.sin() + sum.cos() + 2.0) / 4.0)) as i64;
    ((spread + 2_396_403) % 65_537) as f32 / 65_537.0
}

impl PixelBlender {
    pub(crate) fn new(
        format: PixelFormat,
        mode: BlendMode,
        alpha_mode: AlphaMode,
        opacity: f64,
    ) -> Self {
        Self {
            format,
            kernel: Kernel::for_mode(mode),
            alpha_mode,
            opacity,
        }
    }

    #[inline]
    fn read_alpha<S: Sample>(&self, px: &[u8]) -> f64 {
        match self.format.alpha_offset() {
            Some(o) => S::read(&px[o..]).to_scaled(),
            None => S::MAX_SCALE,
        }
    }

    #[inline]
    fn write_alpha<S: Sample>(&self, px: &mut [u8], v: f64) {
        if let Some(o) = self.format.alpha_offset() {
            S::from_scaled(v).write(&mut px[o..]);
        }
    }

    #[inline]
    fn read_color<S: Sample>(&self, px: &[u8], i: usize) -> f64 {
        S::read(&px[self.format.color_offset(i)..]).to_scaled()
    }

    #[inline]
    fn write_color<S: Sample>(&self, px: &mut [u8], i: usize, v: f64) {
        S::from_scaled(v).write(&mut px[self.format.color_offset(i)..]);
    }

    /// Blend one source pixel into one backdrop pixel at backdrop coordinates `(x, y)`.
    pub(crate) fn apply<S: Sample>(&self, back: &mut [u8], top: &[u8], x: i64, y: i64) {
        let m = S::MAX_SCALE;
        let ab = self.read_alpha::<S>(back);
        let at = self.read_alpha::<S>(top) * self.opacity;

        match self.kernel {
            Kernel::Dissolve => {
                let threshold = (at / m) as f32;
                if dissolve_toss(x, y) < threshold {
                    back.copy_from_slice(top);
                    self.write_alpha::<S>(back, blend_alpha(self.alpha_mode, ab, m, m));
                }
            }
            Kernel::Erase => {
                let t = AlphaTerms::new(self.alpha_mode, ab, at, m);
                self.write_alpha::<S>(back, t.result);
            }
            Kernel::Separable(f) => {
                let t = AlphaTerms::new(self.alpha_mode, ab, at, m);
                for i in 0..self.format.color_channels() {
                    let cb = self.read_color::<S>(back, i);
                    let cs = self.read_color::<S>(top, i);
                    let v = composite(cb, cs, f(cb, cs, m), t.back, t.var, m);
                    self.write_color::<S>(back, i, v);
                }
                self.write_alpha::<S>(back, t.result);
            }
            Kernel::NonSeparable(f) => {
                let t = AlphaTerms::new(self.alpha_mode, ab, at, m);
                let n = self.format.color_channels();
                let model = self.format.model();
                let cb: SmallVec<[f64; 4]> =
                    (0..n).map(|i| self.read_color::<S>(back, i)).collect();
                let cs: SmallVec<[f64; 4]> =
                    (0..n).map(|i| self.read_color::<S>(top, i)).collect();
                let rgb = |v: &[f64]| {
                    let normalized: SmallVec<[f64; 4]> = v.iter().map(|c| c / m).collect();
                    model_to_rgb(model, &normalized)
                };
                let blended = model_from_rgb(f(rgb(&cb), rgb(&cs)), model);
                for i in 0..n {
                    let v = composite(cb[i], cs[i], blended[i] * m, t.back, t.var, m);
                    self.write_color::<S>(back, i, v);
                }
                self.write_alpha::<S>(back, t.result);
            }
        }
    }

    /// Blend a run of pixels. `x0, y` are the backdrop coordinates of the first pixel.
    pub(crate) fn apply_run<S: Sample>(&self, back: &mut [u8], top: &[u8], x0: i64, y: i64) {
        let bpp = self.format.bytes_per_pixel();
        let pairs = back.chunks_exact_mut(bpp).zip(top.chunks_exact(bpp));
        for (i, (b, t)) in pairs.enumerate() {
            self.apply::<S>(b, t, x0 + i as i64, y);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/pixel.rs"]
mod tests;
