use crate::blend::alpha::blend_alpha;
use crate::blend::modes::AlphaMode;

/// Per-pixel alpha quantities shared by every color channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlphaTerms {
    /// Backdrop alpha.
    pub back: f64,
    /// Source alpha scaled by opacity.
    pub top: f64,
    /// Weight of the blended value against the untouched backdrop.
    pub var: f64,
    /// Alpha written back, from the selected alpha mode.
    pub result: f64,
}

impl AlphaTerms {
    /// Derive the terms from backdrop and (opacity-scaled) source alpha on a scale of `m`.
    #[inline]
    pub fn new(mode: AlphaMode, back: f64, top: f64, m: f64) -> Self {
        let comp = blend_alpha(AlphaMode::Normal, back, top, m);
        let var = if comp == 0.0 { 0.0 } else { top * m / comp };
        Self {
            back,
            top,
            var,
            result: blend_alpha(mode, back, top, m),
        }
    }
}

/// Final channel value: the backdrop interpolated toward the blend result by `var`, where
/// the blend result is itself the source interpolated toward `blended` by backdrop alpha.
#[inline]
pub fn composite(cb: f64, cs: f64, blended: f64, ab: f64, var: f64, m: f64) -> f64 {
    ((m - var) * cb + var * ((m - ab) * cs + ab * blended) / m) / m
}

#[cfg(test)]
#[path = "../../tests/unit/blend/compositor.rs"]
mod tests;
