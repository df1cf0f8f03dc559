use std::sync::Arc;

use smallvec::SmallVec;

use crate::color::profile::{
    ColorProfile, ColorTransform, ConnectionValues, ProfileTransform, same_profile,
};
use crate::color::space;
use crate::format::descriptor::{ColorModel, PixelFormat};
use crate::format::sample::SampleType;
use crate::foundation::error::{PigmentError, PigmentResult};
use crate::image::pixel::{PixelAccess, PixelAccessMut, PixelProxy, PixelRef};

/// What two sides of a conversion have in common.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Diagnosis {
    /// Identical pixel formats.
    pub same_format: bool,
    /// Identical sample types.
    pub same_type: bool,
    /// Identical color models.
    pub same_model: bool,
    /// Identical channel placement.
    pub same_layout: bool,
    /// Interchangeable profiles.
    pub same_profile: bool,
}

impl Diagnosis {
    /// Compare two formats and their resolved profiles.
    pub fn new(
        src: PixelFormat,
        src_profile: &Arc<ColorProfile>,
        dst: PixelFormat,
        dst_profile: &Arc<ColorProfile>,
    ) -> Self {
        Self {
            same_format: src == dst,
            same_type: src.sample_type() == dst.sample_type(),
            same_model: src.model() == dst.model(),
            same_layout: src.same_layout(&dst),
            same_profile: same_profile(src_profile, dst_profile),
        }
    }
}

/// Pixel format of the connection space pixels of `model` travel through.
pub const fn connection_format(model: ColorModel) -> PixelFormat {
    match model {
        ColorModel::Grey => PixelFormat::GAF,
        ColorModel::Rgb | ColorModel::Hsl | ColorModel::Hsv => PixelFormat::RGBAF,
        ColorModel::Cmyk => PixelFormat::CMYKA16,
        ColorModel::Lab => PixelFormat::LABAF,
        ColorModel::Xyz => PixelFormat::XYZAF,
    }
}

fn quantize(v: f64, sample: SampleType) -> f64 {
    if sample.is_float() {
        return v;
    }
    let m = sample.max_value();
    (v.clamp(0.0, 1.0) * m).round() / m
}

/// Map a pixel into its model's connection space. Returns connection values and alpha.
pub fn forward_connect(px: &impl PixelAccess) -> (ConnectionValues, f64) {
    let f = px.format();
    let n = |i: usize| px.color_norm(i);
    let values: ConnectionValues = match f.model() {
        ColorModel::Rgb => SmallVec::from_slice(&[n(0), n(1), n(2)]),
        ColorModel::Hsl => SmallVec::from_slice(&space::hsl_to_rgb([n(0), n(1), n(2)])),
        ColorModel::Hsv => SmallVec::from_slice(&space::hsv_to_rgb([n(0), n(1), n(2)])),
        ColorModel::Grey => SmallVec::from_slice(&[n(0)]),
        ColorModel::Cmyk => {
            let sample = connection_format(ColorModel::Cmyk).sample_type();
            (0..4).map(|i| quantize(n(i), sample)).collect()
        }
        ColorModel::Lab => SmallVec::from_slice(&space::lab_from_norm([n(0), n(1), n(2)])),
        ColorModel::Xyz => SmallVec::from_slice(&[n(0), n(1), n(2)]),
    };
    (values, px.alpha_norm())
}

/// Write connection-space values into `dst`'s color channels, and alpha when given.
pub fn drop_connect(values: &[f64], alpha: Option<f64>, dst: &mut impl PixelAccessMut) {
    let f = dst.format();
    let rgb = || [values[0], values[1], values[2]].map(|c| c.clamp(0.0, 1.0));
    let out: SmallVec<[f64; 4]> = match f.model() {
        ColorModel::Rgb => SmallVec::from_slice(&rgb()),
        ColorModel::Hsl => SmallVec::from_slice(&space::rgb_to_hsl(rgb())),
        ColorModel::Hsv => SmallVec::from_slice(&space::rgb_to_hsv(rgb())),
        ColorModel::Grey => SmallVec::from_slice(&[values[0]]),
        ColorModel::Cmyk => SmallVec::from_slice(&values[..4]),
        ColorModel::Lab => {
            SmallVec::from_slice(&space::lab_to_norm([values[0], values[1], values[2]]))
        }
        ColorModel::Xyz => SmallVec::from_slice(&values[..3]),
    };
    for (i, v) in out.iter().enumerate() {
        dst.set_color_norm(i, *v);
    }
    if let Some(a) = alpha {
        dst.set_alpha_norm(a);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConvertPath {
    RawCopy,
    TypeAndLayout,
    Bridge,
}

/// Reusable converter between two pixel formats and profiles.
///
/// The colorimetric transform is built once here and shared by every pixel of the call.
pub struct PixelConverter {
    src: PixelFormat,
    dst: PixelFormat,
    path: ConvertPath,
    transform: Option<Box<dyn ColorTransform>>,
}

impl std::fmt::Debug for PixelConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelConverter")
            .field("src", &self.src.name())
            .field("dst", &self.dst.name())
            .field("path", &self.path)
            .field("has_transform", &self.transform.is_some())
            .finish()
    }
}

impl PixelConverter {
    /// Build a converter from `src` pixels in `src_profile` to `dst` pixels in `dst_profile`.
    pub fn new(
        src: PixelFormat,
        src_profile: &Arc<ColorProfile>,
        dst: PixelFormat,
        dst_profile: &Arc<ColorProfile>,
    ) -> PigmentResult<Self> {
        for (fmt, prof) in [(src, src_profile), (dst, dst_profile)] {
            if !prof.supports(fmt.model()) {
                return Err(PigmentError::conversion(format!(
                    "profile '{}' cannot describe {} pixels",
                    prof.name(),
                    fmt
                )));
            }
        }
        let diag = Diagnosis::new(src, src_profile, dst, dst_profile);
        let (path, transform): (ConvertPath, Option<Box<dyn ColorTransform>>) =
            if diag.same_format && diag.same_profile {
                (ConvertPath::RawCopy, None)
            } else if diag.same_model && diag.same_profile {
                (ConvertPath::TypeAndLayout, None)
            } else if diag.same_profile {
                (ConvertPath::Bridge, None)
            } else {
                let t: Box<dyn ColorTransform> = Box::new(ProfileTransform::new(
                    Arc::clone(src_profile),
                    Arc::clone(dst_profile),
                ));
                (ConvertPath::Bridge, Some(t))
            };
        tracing::debug!(src = %src, dst = %dst, ?path, "built pixel converter");
        Ok(Self {
            src,
            dst,
            path,
            transform,
        })
    }

    /// True when conversion is a plain byte copy.
    pub fn is_raw_copy(&self) -> bool {
        self.path == ConvertPath::RawCopy
    }

    /// True when a colorimetric transform runs for every pixel.
    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    /// Convert one pixel. `with_alpha = false` leaves the destination alpha untouched.
    pub fn convert(&self, src: &impl PixelAccess, dst: &mut impl PixelAccessMut, with_alpha: bool) {
        match self.path {
            ConvertPath::RawCopy if with_alpha => dst.bytes_mut().copy_from_slice(src.bytes()),
            ConvertPath::RawCopy | ConvertPath::TypeAndLayout => {
                for i in 0..self.src.color_channels() {
                    dst.set_color_norm(i, src.color_norm(i));
                }
                if with_alpha {
                    dst.set_alpha_norm(src.alpha_norm());
                }
            }
            ConvertPath::Bridge => {
                let (values, alpha) = forward_connect(src);
                let values = match &self.transform {
                    Some(t) => t.apply(&values),
                    None => values,
                };
                drop_connect(&values, with_alpha.then_some(alpha), dst);
            }
        }
    }

    /// Convert a run of pixels, alpha included. Both slices must hold the same pixel count.
    pub fn convert_run(&self, src: &[u8], dst: &mut [u8]) {
        if self.path == ConvertPath::RawCopy {
            dst.copy_from_slice(src);
            return;
        }
        let sb = self.src.bytes_per_pixel();
        let db = self.dst.bytes_per_pixel();
        for (s, d) in src.chunks_exact(sb).zip(dst.chunks_exact_mut(db)) {
            let s = PixelRef::new(self.src, s);
            let mut d = PixelProxy::new(self.dst, d);
            self.convert(&s, &mut d, true);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/bridge.rs"]
mod tests;
