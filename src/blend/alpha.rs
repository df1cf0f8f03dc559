use crate::blend::modes::AlphaMode;

/// Combine backdrop alpha `b` and source alpha `s` on a scale of `m`.
pub fn blend_alpha(mode: AlphaMode, b: f64, s: f64, m: f64) -> f64 {
    match mode {
        AlphaMode::Normal => b + s - b * s / m,
        AlphaMode::Erase => (m - s) * b / m,
        AlphaMode::Top => s,
        AlphaMode::Back => b,
        AlphaMode::Sub => {
            if b > s {
                b - s
            } else {
                0.0
            }
        }
        AlphaMode::Add => m.min(b + s),
        AlphaMode::Mul => b * s / m,
        AlphaMode::Min => b.min(s),
        AlphaMode::Max => b.max(s),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/alpha.rs"]
mod tests;
