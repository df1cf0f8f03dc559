//! Device-level conversions between the RGB family and the other color models.
//!
//! All values are normalized to `[0, 1]`; hue is a fraction of a full turn.

/// Luminance weights used by grey conversion and the non-separable blend modes.
pub const LUM_WEIGHTS: [f64; 3] = [0.3, 0.59, 0.11];

/// Weighted luminance of an RGB triple.
pub fn lum(rgb: [f64; 3]) -> f64 {
    LUM_WEIGHTS[0] * rgb[0] + LUM_WEIGHTS[1] * rgb[1] + LUM_WEIGHTS[2] * rgb[2]
}

fn max3(v: [f64; 3]) -> f64 {
    v[0].max(v[1]).max(v[2])
}

fn min3(v: [f64; 3]) -> f64 {
    v[0].min(v[1]).min(v[2])
}

fn hue_of(rgb: [f64; 3], max: f64, delta: f64) -> f64 {
    let [r, g, b] = rgb;
    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    h / 6.0
}

/// RGB to HSL.
pub fn rgb_to_hsl(rgb: [f64; 3]) -> [f64; 3] {
    let max = max3(rgb);
    let min = min3(rgb);
    let l = (max + min) / 2.0;
    let d = max - min;
    if d <= 0.0 {
        return [0.0, 0.0, l];
    }
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    [hue_of(rgb, max, d), s, l]
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// HSL to RGB.
pub fn hsl_to_rgb(hsl: [f64; 3]) -> [f64; 3] {
    let [h, s, l] = hsl;
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

/// RGB to HSV.
pub fn rgb_to_hsv(rgb: [f64; 3]) -> [f64; 3] {
    let max = max3(rgb);
    let d = max - min3(rgb);
    if d <= 0.0 {
        return [0.0, 0.0, max];
    }
    [hue_of(rgb, max, d), d / max, max]
}

/// HSV to RGB.
pub fn hsv_to_rgb(hsv: [f64; 3]) -> [f64; 3] {
    let [h, s, v] = hsv;
    if s <= 0.0 {
        return [v, v, v];
    }
    let h6 = h.rem_euclid(1.0) * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as u8 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// RGB to naive (profile-less) CMYK.
pub fn rgb_to_cmyk(rgb: [f64; 3]) -> [f64; 4] {
    let k = 1.0 - max3(rgb);
    if k >= 1.0 {
        return [0.0, 0.0, 0.0, 1.0];
    }
    let inv = 1.0 - k;
    [
        (1.0 - rgb[0] - k) / inv,
        (1.0 - rgb[1] - k) / inv,
        (1.0 - rgb[2] - k) / inv,
        k,
    ]
}

/// Naive CMYK to RGB.
pub fn cmyk_to_rgb(cmyk: [f64; 4]) -> [f64; 3] {
    let [c, m, y, k] = cmyk;
    [
        (1.0 - c) * (1.0 - k),
        (1.0 - m) * (1.0 - k),
        (1.0 - y) * (1.0 - k),
    ]
}

/// L*a*b* in native units (`L` in `[0, 100]`, `a`/`b` in `[-128, 127]`) to storage range.
pub fn lab_to_norm(lab: [f64; 3]) -> [f64; 3] {
    [lab[0] / 100.0, (lab[1] + 128.0) / 255.0, (lab[2] + 128.0) / 255.0]
}

/// Inverse of [`lab_to_norm`].
pub fn lab_from_norm(n: [f64; 3]) -> [f64; 3] {
    [n[0] * 100.0, n[1] * 255.0 - 128.0, n[2] * 255.0 - 128.0]
}

#[cfg(test)]
#[path = "../../tests/unit/color/space.rs"]
mod tests;
