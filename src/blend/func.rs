//! Blend-mode math.
//!
//! Separable functions take `(back, src, max)` on the sample's own scale, in `f64`, which is
//! wider than any storage type. Divisions by a possibly-zero divisor are branch-guarded.
//! Non-separable functions work on normalized RGB triples.

use crate::blend::modes::BlendMode;
use crate::color::space::lum;
use crate::format::sample::Sample;

/// Per-channel blend function: `(back, src, max) -> result`.
pub type SeparableFn = fn(f64, f64, f64) -> f64;

/// Whole-pixel blend function on normalized RGB: `(back, src) -> result`.
pub type NonSeparableFn = fn([f64; 3], [f64; 3]) -> [f64; 3];

pub fn normal(_cb: f64, cs: f64, _m: f64) -> f64 {
    cs
}

pub fn backdrop(cb: f64, _cs: f64, _m: f64) -> f64 {
    cb
}

pub fn darken(cb: f64, cs: f64, _m: f64) -> f64 {
    cb.min(cs)
}

pub fn lighten(cb: f64, cs: f64, _m: f64) -> f64 {
    cb.max(cs)
}

pub fn multiply(cb: f64, cs: f64, m: f64) -> f64 {
    cb * cs / m
}

pub fn screen(cb: f64, cs: f64, m: f64) -> f64 {
    cb + cs - cb * cs / m
}

pub fn color_burn(cb: f64, cs: f64, m: f64) -> f64 {
    if cs <= 0.0 {
        return 0.0;
    }
    m - m.min((m - cb) * m / cs)
}

pub fn linear_burn(cb: f64, cs: f64, m: f64) -> f64 {
    if cs + cb < m { 0.0 } else { cs + cb - m }
}

pub fn color_dodge(cb: f64, cs: f64, m: f64) -> f64 {
    if cs >= m {
        return m;
    }
    m.min(cb * m / (m - cs))
}

pub fn linear_dodge(cb: f64, cs: f64, m: f64) -> f64 {
    m.min(cb + cs)
}

pub fn overlay(cb: f64, cs: f64, m: f64) -> f64 {
    if cb < m / 2.0 {
        2.0 * cs * cb / m
    } else {
        m - 2.0 * (m - cs) * (m - cb) / m
    }
}

pub fn soft_light(cb: f64, cs: f64, m: f64) -> f64 {
    let q = cb * cb / m;
    let d = 2.0 * cs;
    q + d * cb / m - d * q / m
}

pub fn hard_light(cb: f64, cs: f64, m: f64) -> f64 {
    overlay(cs, cb, m)
}

/// Split on the source midpoint: `low(cb, 2*cs)` below, `high(cb, 2*(cs - max/2))` above.
fn split_light(cb: f64, cs: f64, m: f64, low: SeparableFn, high: SeparableFn) -> f64 {
    let half = m / 2.0;
    if cs < half {
        low(cb, 2.0 * cs, m)
    } else {
        high(cb, m.min(2.0 * (cs - half)), m)
    }
}

pub fn vivid_light(cb: f64, cs: f64, m: f64) -> f64 {
    split_light(cb, cs, m, color_burn, color_dodge)
}

pub fn linear_light(cb: f64, cs: f64, m: f64) -> f64 {
    split_light(cb, cs, m, linear_burn, linear_dodge)
}

pub fn pin_light(cb: f64, cs: f64, m: f64) -> f64 {
    split_light(cb, cs, m, darken, lighten)
}

pub fn hard_mix(cb: f64, cs: f64, m: f64) -> f64 {
    if vivid_light(cb, cs, m) < m / 2.0 { 0.0 } else { m }
}

pub fn difference(cb: f64, cs: f64, _m: f64) -> f64 {
    (cb - cs).abs()
}

pub fn exclusion(cb: f64, cs: f64, m: f64) -> f64 {
    cb + cs - 2.0 * cb * cs / m
}

pub fn substract(cb: f64, cs: f64, _m: f64) -> f64 {
    if cb > cs { cb - cs } else { 0.0 }
}

pub fn divide(cb: f64, cs: f64, m: f64) -> f64 {
    if cs <= 0.0 {
        return m;
    }
    m.min(cb * m / cs)
}

/// Channel function for a separable mode; `None` for non-separable modes.
pub const fn separable_fn(mode: BlendMode) -> Option<SeparableFn> {
    Some(match mode {
        BlendMode::Normal => normal,
        BlendMode::Erase | BlendMode::Behind => backdrop,
        BlendMode::Darken => darken,
        BlendMode::Multiply => multiply,
        BlendMode::ColorBurn => color_burn,
        BlendMode::LinearBurn => linear_burn,
        BlendMode::Lighten => lighten,
        BlendMode::Screen => screen,
        BlendMode::ColorDodge => color_dodge,
        BlendMode::LinearDodge => linear_dodge,
        BlendMode::Overlay => overlay,
        BlendMode::SoftLight => soft_light,
        BlendMode::HardLight => hard_light,
        BlendMode::VividLight => vivid_light,
        BlendMode::LinearLight => linear_light,
        BlendMode::PinLight => pin_light,
        BlendMode::HardMix => hard_mix,
        BlendMode::Difference => difference,
        BlendMode::Exclusion => exclusion,
        BlendMode::Substract => substract,
        BlendMode::Divide => divide,
        BlendMode::Dissolve
        | BlendMode::DarkerColor
        | BlendMode::LighterColor
        | BlendMode::Hue
        | BlendMode::Saturation
        | BlendMode::Color
        | BlendMode::Luminosity => return None,
    })
}

/// Blend two samples of the same storage type with a separable mode.
///
/// Non-separable modes return the source sample.
pub fn blend_channel<S: Sample>(mode: BlendMode, cb: S, cs: S) -> S {
    match separable_fn(mode) {
        Some(f) => S::from_scaled(f(cb.to_scaled(), cs.to_scaled(), S::MAX_SCALE)),
        None => cs,
    }
}

fn sat(c: [f64; 3]) -> f64 {
    c[0].max(c[1]).max(c[2]) - c[0].min(c[1]).min(c[2])
}

fn clip_color(c: [f64; 3]) -> [f64; 3] {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 && l - n > 0.0 {
        out = out.map(|v| l + (v - l) * l / (l - n));
    }
    if x > 1.0 && x - l > 0.0 {
        out = out.map(|v| l + (v - l) * (1.0 - l) / (x - l));
    }
    out
}

fn set_lum(c: [f64; 3], l: f64) -> [f64; 3] {
    let d = l - lum(c);
    clip_color(c.map(|v| v + d))
}

fn set_sat(c: [f64; 3], s: f64) -> [f64; 3] {
    let mut idx = [0usize, 1, 2];
    idx.sort_by(|&a, &b| c[a].total_cmp(&c[b]));
    let [lo, mid, hi] = idx;
    let mut out = [0.0; 3];
    if c[hi] > c[lo] {
        out[mid] = (c[mid] - c[lo]) * s / (c[hi] - c[lo]);
        out[hi] = s;
    }
    out
}

pub fn hue(cb: [f64; 3], cs: [f64; 3]) -> [f64; 3] {
    set_lum(set_sat(cs, sat(cb)), lum(cb))
}

pub fn saturation(cb: [f64; 3], cs: [f64; 3]) -> [f64; 3] {
    set_lum(set_sat(cb, sat(cs)), lum(cb))
}

pub fn color(cb: [f64; 3], cs: [f64; 3]) -> [f64; 3] {
    set_lum(cs, lum(cb))
}

pub fn luminosity(cb: [f64; 3], cs: [f64; 3]) -> [f64; 3] {
    set_lum(cb, lum(cs))
}

pub fn darker_color(cb: [f64; 3], cs: [f64; 3]) -> [f64; 3] {
    if lum(cb) < lum(cs) { cb } else { cs }
}

pub fn lighter_color(cb: [f64; 3], cs: [f64; 3]) -> [f64; 3] {
    if lum(cb) > lum(cs) { cb } else { cs }
}

/// Pixel function for a non-separable mode. Dissolve and separable modes return `None`.
pub const fn non_separable_fn(mode: BlendMode) -> Option<NonSeparableFn> {
    match mode {
        BlendMode::Hue => Some(hue),
        BlendMode::Saturation => Some(saturation),
        BlendMode::Color => Some(color),
        BlendMode::Luminosity => Some(luminosity),
        BlendMode::DarkerColor => Some(darker_color),
        BlendMode::LighterColor => Some(lighter_color),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/func.rs"]
mod tests;
