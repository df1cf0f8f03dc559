use std::collections::HashMap;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::color::space;
use crate::format::descriptor::ColorModel;
use crate::foundation::error::{PigmentError, PigmentResult};

type Mat3 = [[f64; 3]; 3];

/// CIE D65 reference white.
pub const D65_WHITE: [f64; 3] = [0.95047, 1.0, 1.08883];

const SRGB_TO_XYZ: Mat3 = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

const XYZ_TO_SRGB: Mat3 = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

const DISPLAY_P3_TO_XYZ: Mat3 = [
    [0.4865709, 0.2656677, 0.1982173],
    [0.2289746, 0.6917385, 0.0792869],
    [0.0000000, 0.0451134, 1.0439444],
];

const ADOBE_RGB_TO_XYZ: Mat3 = [
    [0.5767309, 0.1855540, 0.1881852],
    [0.2973769, 0.6273491, 0.0752741],
    [0.0270343, 0.0706872, 0.9911085],
];

/// Values in a profile's connection space. Up to four color components.
pub type ConnectionValues = SmallVec<[f64; 4]>;

/// Tone response curve of a device profile.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferFn {
    /// Identity.
    Linear,
    /// Piecewise sRGB curve.
    Srgb,
    /// Pure power law with the given exponent.
    Gamma(f64),
}

impl TransferFn {
    /// Encoded device value to linear light.
    pub fn decode(self, v: f64) -> f64 {
        let (sign, a) = (v.signum(), v.abs());
        sign * match self {
            Self::Linear => a,
            Self::Srgb if a <= 0.04045 => a / 12.92,
            Self::Srgb => ((a + 0.055) / 1.055).powf(2.4),
            Self::Gamma(g) => a.powf(g),
        }
    }

    /// Linear light to encoded device value.
    pub fn encode(self, v: f64) -> f64 {
        let (sign, a) = (v.signum(), v.abs());
        sign * match self {
            Self::Linear => a,
            Self::Srgb if a <= 0.0031308 => a * 12.92,
            Self::Srgb => 1.055 * a.powf(1.0 / 2.4) - 0.055,
            Self::Gamma(g) => a.powf(1.0 / g),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum ProfileKind {
    Rgb {
        to_xyz: Mat3,
        from_xyz: Mat3,
        transfer: TransferFn,
    },
    Grey {
        transfer: TransferFn,
    },
    /// Naive CMYK printed through an sRGB device.
    Cmyk,
    Lab {
        white: [f64; 3],
    },
    Xyz,
}

/// Colorimetric description attached to a block.
///
/// Blocks share profiles through `Arc`; two blocks holding the same `Arc` are known to need no
/// conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorProfile {
    name: String,
    kind: ProfileKind,
}

fn mat_mul_vec(m: &Mat3, v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

fn invert(m: &Mat3) -> Option<Mat3> {
    let det = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);
    if det.abs() < 1e-12 || !det.is_finite() {
        return None;
    }
    let inv = 1.0 / det;
    Some([
        [
            (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv,
            (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv,
            (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv,
        ],
        [
            (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv,
            (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv,
            (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv,
        ],
        [
            (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv,
            (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv,
            (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv,
        ],
    ])
}

fn lab_f(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

fn lab_f_inv(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

/// sRGB-encoded RGB to CIE XYZ (D65).
pub fn srgb_to_xyz(rgb: [f64; 3]) -> [f64; 3] {
    mat_mul_vec(&SRGB_TO_XYZ, rgb.map(|c| TransferFn::Srgb.decode(c)))
}

/// CIE XYZ (D65) to sRGB-encoded RGB, clamped to `[0, 1]`.
pub fn xyz_to_srgb(xyz: [f64; 3]) -> [f64; 3] {
    mat_mul_vec(&XYZ_TO_SRGB, xyz).map(|c| TransferFn::Srgb.encode(c).clamp(0.0, 1.0))
}

/// CIE XYZ to L*a*b* (native units) against `white`.
pub fn xyz_to_lab(xyz: [f64; 3], white: [f64; 3]) -> [f64; 3] {
    let fx = lab_f(xyz[0] / white[0]);
    let fy = lab_f(xyz[1] / white[1]);
    let fz = lab_f(xyz[2] / white[2]);
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// L*a*b* (native units) to CIE XYZ against `white`.
pub fn lab_to_xyz(lab: [f64; 3], white: [f64; 3]) -> [f64; 3] {
    let fy = (lab[0] + 16.0) / 116.0;
    let fx = fy + lab[1] / 500.0;
    let fz = fy - lab[2] / 200.0;
    [
        white[0] * lab_f_inv(fx),
        white[1] * lab_f_inv(fy),
        white[2] * lab_f_inv(fz),
    ]
}

impl ColorProfile {
    /// Matrix/shaper RGB profile from a linear-RGB-to-XYZ (D65) matrix.
    pub fn rgb_matrix(
        name: impl Into<String>,
        to_xyz: [[f64; 3]; 3],
        transfer: TransferFn,
    ) -> PigmentResult<Self> {
        let name = name.into();
        let from_xyz = invert(&to_xyz).ok_or_else(|| {
            PigmentError::validation(format!("profile '{name}' has a singular primaries matrix"))
        })?;
        Ok(Self {
            name,
            kind: ProfileKind::Rgb {
                to_xyz,
                from_xyz,
                transfer,
            },
        })
    }

    fn builtin_rgb(name: &str, to_xyz: Mat3, transfer: TransferFn) -> Self {
        let from_xyz = invert(&to_xyz).unwrap_or(XYZ_TO_SRGB);
        Self {
            name: name.to_owned(),
            kind: ProfileKind::Rgb {
                to_xyz,
                from_xyz,
                transfer,
            },
        }
    }

    /// IEC 61966-2-1 sRGB.
    pub fn srgb() -> Self {
        Self::builtin_rgb("srgb", SRGB_TO_XYZ, TransferFn::Srgb)
    }

    /// sRGB primaries with a linear response.
    pub fn linear_srgb() -> Self {
        Self::builtin_rgb("linear-srgb", SRGB_TO_XYZ, TransferFn::Linear)
    }

    /// Display P3 (P3 primaries, D65, sRGB curve).
    pub fn display_p3() -> Self {
        Self::builtin_rgb("display-p3", DISPLAY_P3_TO_XYZ, TransferFn::Srgb)
    }

    /// Adobe RGB (1998).
    pub fn adobe_rgb() -> Self {
        Self::builtin_rgb("adobe-rgb", ADOBE_RGB_TO_XYZ, TransferFn::Gamma(563.0 / 256.0))
    }

    /// Grey profile with the given response, D65 white.
    pub fn grey(name: impl Into<String>, transfer: TransferFn) -> Self {
        Self {
            name: name.into(),
            kind: ProfileKind::Grey { transfer },
        }
    }

    /// Naive CMYK printed through sRGB.
    pub fn cmyk_naive() -> Self {
        Self {
            name: "cmyk-naive".to_owned(),
            kind: ProfileKind::Cmyk,
        }
    }

    /// L*a*b* relative to D65.
    pub fn lab_d65() -> Self {
        Self {
            name: "lab-d65".to_owned(),
            kind: ProfileKind::Lab { white: D65_WHITE },
        }
    }

    /// CIE XYZ, D65.
    pub fn xyz_d65() -> Self {
        Self {
            name: "xyz-d65".to_owned(),
            kind: ProfileKind::Xyz,
        }
    }

    /// Profile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Model whose connection space this profile describes.
    pub fn connection_model(&self) -> ColorModel {
        match self.kind {
            ProfileKind::Rgb { .. } => ColorModel::Rgb,
            ProfileKind::Grey { .. } => ColorModel::Grey,
            ProfileKind::Cmyk => ColorModel::Cmyk,
            ProfileKind::Lab { .. } => ColorModel::Lab,
            ProfileKind::Xyz => ColorModel::Xyz,
        }
    }

    /// True when pixels of `model` can carry this profile.
    pub fn supports(&self, model: ColorModel) -> bool {
        let own = self.connection_model();
        own == model || (own == ColorModel::Rgb && model.is_rgb_family())
    }

    /// Connection values to CIE XYZ (D65).
    pub fn to_xyz(&self, conn: &[f64]) -> [f64; 3] {
        match &self.kind {
            ProfileKind::Rgb {
                to_xyz, transfer, ..
            } => {
                let lin = [
                    transfer.decode(conn[0]),
                    transfer.decode(conn[1]),
                    transfer.decode(conn[2]),
                ];
                mat_mul_vec(to_xyz, lin)
            }
            ProfileKind::Grey { transfer } => {
                let y = transfer.decode(conn[0]);
                [D65_WHITE[0] * y, y, D65_WHITE[2] * y]
            }
            ProfileKind::Cmyk => {
                srgb_to_xyz(space::cmyk_to_rgb([conn[0], conn[1], conn[2], conn[3]]))
            }
            ProfileKind::Lab { white } => lab_to_xyz([conn[0], conn[1], conn[2]], *white),
            ProfileKind::Xyz => [conn[0], conn[1], conn[2]],
        }
    }

    /// CIE XYZ (D65) to connection values.
    pub fn from_xyz(&self, xyz: [f64; 3]) -> ConnectionValues {
        match &self.kind {
            ProfileKind::Rgb {
                from_xyz, transfer, ..
            } => {
                let lin = mat_mul_vec(from_xyz, xyz);
                lin.iter().map(|&c| transfer.encode(c)).collect()
            }
            ProfileKind::Grey { transfer } => SmallVec::from_slice(&[transfer.encode(xyz[1])]),
            ProfileKind::Cmyk => {
                SmallVec::from_slice(&space::rgb_to_cmyk(xyz_to_srgb(xyz)))
            }
            ProfileKind::Lab { white } => SmallVec::from_slice(&xyz_to_lab(xyz, *white)),
            ProfileKind::Xyz => SmallVec::from_slice(&xyz),
        }
    }
}

/// Colorimetric transform between two connection spaces, built once and applied per pixel.
pub trait ColorTransform: Send + Sync {
    /// Map source connection values to destination connection values.
    fn apply(&self, src: &[f64]) -> ConnectionValues;
}

/// Transform through CIE XYZ using the built-in profile math.
#[derive(Clone, Debug)]
pub struct ProfileTransform {
    src: Arc<ColorProfile>,
    dst: Arc<ColorProfile>,
}

impl ProfileTransform {
    /// Build a transform from `src` to `dst`.
    pub fn new(src: Arc<ColorProfile>, dst: Arc<ColorProfile>) -> Self {
        Self { src, dst }
    }
}

impl ColorTransform for ProfileTransform {
    fn apply(&self, src: &[f64]) -> ConnectionValues {
        self.dst.from_xyz(self.src.to_xyz(src))
    }
}

/// Read-mostly set of named profiles and per-model defaults.
#[derive(Clone, Debug)]
pub struct ProfileRegistry {
    by_name: HashMap<String, Arc<ColorProfile>>,
    defaults: HashMap<ColorModel, Arc<ColorProfile>>,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileRegistry {
    /// Registry holding the built-in profiles, with sRGB-based defaults.
    pub fn new() -> Self {
        let builtins = [
            ColorProfile::srgb(),
            ColorProfile::linear_srgb(),
            ColorProfile::display_p3(),
            ColorProfile::adobe_rgb(),
            ColorProfile::grey("gray-srgb", TransferFn::Srgb),
            ColorProfile::grey("gray-linear", TransferFn::Linear),
            ColorProfile::cmyk_naive(),
            ColorProfile::lab_d65(),
            ColorProfile::xyz_d65(),
        ];
        let by_name: HashMap<String, Arc<ColorProfile>> = builtins
            .into_iter()
            .map(|p| (p.name().to_owned(), Arc::new(p)))
            .collect();

        let mut registry = Self {
            by_name,
            defaults: HashMap::new(),
        };
        let defaults = [
            (ColorModel::Grey, "gray-srgb"),
            (ColorModel::Rgb, "srgb"),
            (ColorModel::Hsl, "srgb"),
            (ColorModel::Hsv, "srgb"),
            (ColorModel::Cmyk, "cmyk-naive"),
            (ColorModel::Lab, "lab-d65"),
            (ColorModel::Xyz, "xyz-d65"),
        ];
        for (model, name) in defaults {
            if let Some(p) = registry.by_name.get(name) {
                registry.defaults.insert(model, Arc::clone(p));
            }
        }
        registry
    }

    /// Look up a profile by name.
    pub fn get(&self, name: &str) -> Option<Arc<ColorProfile>> {
        self.by_name.get(name).cloned()
    }

    /// Add or replace a named profile, returning the shared handle.
    pub fn register(&mut self, profile: ColorProfile) -> Arc<ColorProfile> {
        let p = Arc::new(profile);
        self.by_name.insert(p.name().to_owned(), Arc::clone(&p));
        p
    }

    /// Default profile for `model`.
    pub fn default_for(&self, model: ColorModel) -> PigmentResult<Arc<ColorProfile>> {
        self.defaults
            .get(&model)
            .cloned()
            .ok_or_else(|| PigmentError::conversion(format!("no default profile for {model:?}")))
    }

    /// Make the named profile the default for `model`.
    pub fn set_default(&mut self, model: ColorModel, name: &str) -> PigmentResult<()> {
        let p = self
            .get(name)
            .ok_or_else(|| PigmentError::validation(format!("unknown profile '{name}'")))?;
        if !p.supports(model) {
            return Err(PigmentError::validation(format!(
                "profile '{name}' cannot describe {model:?} pixels"
            )));
        }
        self.defaults.insert(model, p);
        Ok(())
    }

    /// Explicit profile if present, else the default for `model`.
    pub fn resolve(
        &self,
        explicit: Option<&Arc<ColorProfile>>,
        model: ColorModel,
    ) -> PigmentResult<Arc<ColorProfile>> {
        match explicit {
            Some(p) => Ok(Arc::clone(p)),
            None => self.default_for(model),
        }
    }
}

/// True when two profile handles are interchangeable: same instance, or equal descriptions.
pub fn same_profile(a: &Arc<ColorProfile>, b: &Arc<ColorProfile>) -> bool {
    Arc::ptr_eq(a, b) || **a == **b
}

#[cfg(test)]
#[path = "../../tests/unit/color/profile.rs"]
mod tests;
