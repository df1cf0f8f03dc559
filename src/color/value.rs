use smallvec::SmallVec;

use crate::color::profile::{D65_WHITE, lab_to_xyz, srgb_to_xyz, xyz_to_lab, xyz_to_srgb};
use crate::color::space;
use crate::format::descriptor::{ColorModel, PixelFormat};
use crate::foundation::error::{PigmentError, PigmentResult};
use crate::image::pixel::{PixelAccess, PixelAccessMut, PixelValue};

/// Color value in any supported model, detached from pixel storage.
///
/// Components are normalized the same way pixel channels are: `[0, 1]` per channel, hue as a
/// fraction of a turn, L*a*b* scaled into `[0, 1]` (see [`space::lab_to_norm`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Color {
    model: ColorModel,
    values: SmallVec<[f64; 4]>,
    alpha: f64,
}

impl Color {
    /// Color from normalized components in `model`.
    pub fn new(model: ColorModel, values: &[f64], alpha: f64) -> PigmentResult<Self> {
        if values.len() != model.color_channels() {
            return Err(PigmentError::validation(format!(
                "{model:?} color needs {} components, got {}",
                model.color_channels(),
                values.len()
            )));
        }
        Ok(Self {
            model,
            values: SmallVec::from_slice(values),
            alpha,
        })
    }

    fn from_array<const N: usize>(model: ColorModel, values: [f64; N], alpha: f64) -> Self {
        Self {
            model,
            values: SmallVec::from_slice(&values),
            alpha,
        }
    }

    /// Opaque RGB.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::from_array(ColorModel::Rgb, [r, g, b], 1.0)
    }

    /// RGB with alpha.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::from_array(ColorModel::Rgb, [r, g, b], a)
    }

    /// RGBA from 8-bit components.
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let n = |v: u8| f64::from(v) / 255.0;
        Self::rgba(n(r), n(g), n(b), n(a))
    }

    /// Opaque grey.
    pub fn grey(g: f64) -> Self {
        Self::from_array(ColorModel::Grey, [g], 1.0)
    }

    /// Opaque HSL.
    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self::from_array(ColorModel::Hsl, [h, s, l], 1.0)
    }

    /// Opaque HSV.
    pub fn hsv(h: f64, s: f64, v: f64) -> Self {
        Self::from_array(ColorModel::Hsv, [h, s, v], 1.0)
    }

    /// Opaque CMYK.
    pub fn cmyk(c: f64, m: f64, y: f64, k: f64) -> Self {
        Self::from_array(ColorModel::Cmyk, [c, m, y, k], 1.0)
    }

    /// Opaque L*a*b* from native units (`L` in `[0, 100]`).
    pub fn lab(l: f64, a: f64, b: f64) -> Self {
        Self::from_array(ColorModel::Lab, space::lab_to_norm([l, a, b]), 1.0)
    }

    /// Opaque CIE XYZ.
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::from_array(ColorModel::Xyz, [x, y, z], 1.0)
    }

    /// Read a pixel's channels into a color of the pixel's model.
    pub fn from_pixel(px: &impl PixelAccess) -> Self {
        let f = px.format();
        Self {
            model: f.model(),
            values: (0..f.color_channels()).map(|i| px.color_norm(i)).collect(),
            alpha: px.alpha_norm(),
        }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Color model.
    pub fn model(&self) -> ColorModel {
        self.model
    }

    /// Normalized components.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Alpha in `[0, 1]`.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Device-level conversion into `target`, through sRGB for the CIE models.
    pub fn to_model(&self, target: ColorModel) -> Color {
        if target == self.model {
            return self.clone();
        }
        Self {
            model: target,
            values: model_from_rgb(model_to_rgb(self.model, &self.values), target),
            alpha: self.alpha,
        }
    }

    /// Pixel of `format` holding this color, converted to the format's model first.
    pub fn to_pixel(&self, format: PixelFormat) -> PixelValue {
        let c = self.to_model(format.model());
        let mut px = PixelValue::new(format);
        for (i, &v) in c.values.iter().enumerate() {
            px.set_color_norm(i, v);
        }
        px.set_alpha_norm(c.alpha);
        px
    }
}

/// Device RGB of normalized `values` in `model`. CIE models go through sRGB.
pub(crate) fn model_to_rgb(model: ColorModel, v: &[f64]) -> [f64; 3] {
    match model {
        ColorModel::Rgb => [v[0], v[1], v[2]],
        ColorModel::Grey => [v[0]; 3],
        ColorModel::Hsl => space::hsl_to_rgb([v[0], v[1], v[2]]),
        ColorModel::Hsv => space::hsv_to_rgb([v[0], v[1], v[2]]),
        ColorModel::Cmyk => space::cmyk_to_rgb([v[0], v[1], v[2], v[3]]),
        ColorModel::Lab => {
            xyz_to_srgb(lab_to_xyz(space::lab_from_norm([v[0], v[1], v[2]]), D65_WHITE))
        }
        ColorModel::Xyz => xyz_to_srgb([v[0], v[1], v[2]]),
    }
}

/// Inverse of [`model_to_rgb`].
pub(crate) fn model_from_rgb(rgb: [f64; 3], model: ColorModel) -> SmallVec<[f64; 4]> {
    match model {
        ColorModel::Rgb => SmallVec::from_slice(&rgb),
        ColorModel::Grey => SmallVec::from_slice(&[space::lum(rgb)]),
        ColorModel::Hsl => SmallVec::from_slice(&space::rgb_to_hsl(rgb)),
        ColorModel::Hsv => SmallVec::from_slice(&space::rgb_to_hsv(rgb)),
        ColorModel::Cmyk => SmallVec::from_slice(&space::rgb_to_cmyk(rgb)),
        ColorModel::Lab => {
            let lab = xyz_to_lab(srgb_to_xyz(rgb), D65_WHITE);
            SmallVec::from_slice(&space::lab_to_norm(lab))
        }
        ColorModel::Xyz => SmallVec::from_slice(&srgb_to_xyz(rgb)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/value.rs"]
mod tests;
