use crate::format::sample::SampleType;

/// Color model of the non-alpha channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorModel {
    /// Single grey channel.
    Grey,
    /// Red, green, blue.
    Rgb,
    /// Hue, saturation, lightness.
    Hsl,
    /// Hue, saturation, value.
    Hsv,
    /// Cyan, magenta, yellow, key.
    Cmyk,
    /// CIE L*a*b*.
    Lab,
    /// CIE XYZ.
    Xyz,
}

impl ColorModel {
    /// Number of color (non-alpha) channels.
    pub const fn color_channels(self) -> usize {
        match self {
            Self::Grey => 1,
            Self::Cmyk => 4,
            Self::Rgb | Self::Hsl | Self::Hsv | Self::Lab | Self::Xyz => 3,
        }
    }

    /// Channel letters in logical order.
    pub const fn channel_names(self) -> &'static [&'static str] {
        match self {
            Self::Grey => &["G"],
            Self::Rgb => &["R", "G", "B"],
            Self::Hsl => &["H", "S", "L"],
            Self::Hsv => &["H", "S", "V"],
            Self::Cmyk => &["C", "M", "Y", "K"],
            Self::Lab => &["L", "a", "b"],
            Self::Xyz => &["X", "Y", "Z"],
        }
    }

    /// Models whose device values are derived from RGB and share its profiles.
    pub const fn is_rgb_family(self) -> bool {
        matches!(self, Self::Rgb | Self::Hsl | Self::Hsv)
    }
}

/// Where the alpha channel sits in memory, if anywhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaPlacement {
    /// No alpha channel; reads report a fully opaque pixel.
    None,
    /// Alpha precedes the color channels (`ARGB`).
    First,
    /// Alpha follows the color channels (`RGBA`).
    Last,
}

/// Immutable description of a pixel's memory layout.
///
/// Logical channel `i` is the model's `i`-th channel (`R`, `G`, `B` for RGB) regardless of
/// where it is stored; [`PixelFormat::color_index`] maps it to its physical slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelFormat {
    model: ColorModel,
    sample: SampleType,
    alpha: AlphaPlacement,
    reversed: bool,
    normalized: bool,
}

impl PixelFormat {
    /// Canonical 8-bit RGBA. Blends on this layout may use the lane-batched fast path.
    pub const RGBA8: Self = Self::new(ColorModel::Rgb, SampleType::U8, AlphaPlacement::Last, false);
    /// 8-bit BGRA.
    pub const BGRA8: Self = Self::new(ColorModel::Rgb, SampleType::U8, AlphaPlacement::Last, true);
    /// 8-bit ARGB.
    pub const ARGB8: Self = Self::new(ColorModel::Rgb, SampleType::U8, AlphaPlacement::First, false);
    /// 8-bit ABGR.
    pub const ABGR8: Self = Self::new(ColorModel::Rgb, SampleType::U8, AlphaPlacement::First, true);
    /// 8-bit RGB without alpha.
    pub const RGB8: Self = Self::new(ColorModel::Rgb, SampleType::U8, AlphaPlacement::None, false);
    /// 8-bit BGR without alpha.
    pub const BGR8: Self = Self::new(ColorModel::Rgb, SampleType::U8, AlphaPlacement::None, true);
    /// 16-bit RGBA.
    pub const RGBA16: Self =
        Self::new(ColorModel::Rgb, SampleType::U16, AlphaPlacement::Last, false);
    /// 32-bit integer RGBA.
    pub const RGBA32: Self =
        Self::new(ColorModel::Rgb, SampleType::U32, AlphaPlacement::Last, false);
    /// Normalized float RGBA.
    pub const RGBAF: Self = Self::new(ColorModel::Rgb, SampleType::F32, AlphaPlacement::Last, false);
    /// 8-bit grey with alpha.
    pub const GA8: Self = Self::new(ColorModel::Grey, SampleType::U8, AlphaPlacement::Last, false);
    /// 8-bit grey.
    pub const G8: Self = Self::new(ColorModel::Grey, SampleType::U8, AlphaPlacement::None, false);
    /// 16-bit grey with alpha.
    pub const GA16: Self =
        Self::new(ColorModel::Grey, SampleType::U16, AlphaPlacement::Last, false);
    /// Normalized float grey with alpha.
    pub const GAF: Self = Self::new(ColorModel::Grey, SampleType::F32, AlphaPlacement::Last, false);
    /// 8-bit HSL with alpha.
    pub const HSLA8: Self = Self::new(ColorModel::Hsl, SampleType::U8, AlphaPlacement::Last, false);
    /// Normalized float HSL with alpha.
    pub const HSLAF: Self = Self::new(ColorModel::Hsl, SampleType::F32, AlphaPlacement::Last, false);
    /// 8-bit HSV with alpha.
    pub const HSVA8: Self = Self::new(ColorModel::Hsv, SampleType::U8, AlphaPlacement::Last, false);
    /// 8-bit CMYK with alpha.
    pub const CMYKA8: Self =
        Self::new(ColorModel::Cmyk, SampleType::U8, AlphaPlacement::Last, false);
    /// 16-bit CMYK with alpha.
    pub const CMYKA16: Self =
        Self::new(ColorModel::Cmyk, SampleType::U16, AlphaPlacement::Last, false);
    /// Normalized float L*a*b* with alpha.
    pub const LABAF: Self = Self::new(ColorModel::Lab, SampleType::F32, AlphaPlacement::Last, false);
    /// Normalized float XYZ with alpha.
    pub const XYZAF: Self = Self::new(ColorModel::Xyz, SampleType::F32, AlphaPlacement::Last, false);

    /// Describe a format. `reversed` stores the color channels in reverse logical order
    /// (`BGR` for RGB).
    pub const fn new(
        model: ColorModel,
        sample: SampleType,
        alpha: AlphaPlacement,
        reversed: bool,
    ) -> Self {
        Self {
            model,
            sample,
            alpha,
            reversed,
            normalized: sample.is_float(),
        }
    }

    /// Color model.
    pub const fn model(&self) -> ColorModel {
        self.model
    }

    /// Sample storage type.
    pub const fn sample_type(&self) -> SampleType {
        self.sample
    }

    /// Alpha placement.
    pub const fn alpha_placement(&self) -> AlphaPlacement {
        self.alpha
    }

    /// True when a physical alpha channel exists.
    pub const fn has_alpha(&self) -> bool {
        !matches!(self.alpha, AlphaPlacement::None)
    }

    /// True when color channels are stored in reverse order.
    pub const fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// True when samples are normalized to `[0, 1]` rather than spanning the integer range.
    pub const fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Number of color channels.
    pub const fn color_channels(&self) -> usize {
        self.model.color_channels()
    }

    /// Number of physical channels, alpha included.
    pub const fn channels(&self) -> usize {
        self.color_channels() + if self.has_alpha() { 1 } else { 0 }
    }

    /// Bytes per pixel.
    pub const fn bytes_per_pixel(&self) -> usize {
        self.channels() * self.sample.bytes()
    }

    /// Bytes per sample.
    pub const fn bytes_per_sample(&self) -> usize {
        self.sample.bytes()
    }

    /// Physical slot of logical color channel `i`.
    pub const fn color_index(&self, i: usize) -> usize {
        let n = self.color_channels();
        let slot = if self.reversed { n - 1 - i } else { i };
        match self.alpha {
            AlphaPlacement::First => slot + 1,
            AlphaPlacement::None | AlphaPlacement::Last => slot,
        }
    }

    /// Physical slot of the alpha channel.
    pub const fn alpha_index(&self) -> Option<usize> {
        match self.alpha {
            AlphaPlacement::None => None,
            AlphaPlacement::First => Some(0),
            AlphaPlacement::Last => Some(self.color_channels()),
        }
    }

    /// Byte offset of logical color channel `i` within a pixel.
    pub const fn color_offset(&self, i: usize) -> usize {
        self.color_index(i) * self.sample.bytes()
    }

    /// Byte offset of the alpha channel within a pixel.
    pub const fn alpha_offset(&self) -> Option<usize> {
        match self.alpha_index() {
            Some(i) => Some(i * self.sample.bytes()),
            None => None,
        }
    }

    /// Same format with a different sample type.
    pub const fn with_sample_type(self, sample: SampleType) -> Self {
        Self::new(self.model, sample, self.alpha, self.reversed)
    }

    /// Same model and sample type, with alpha last and forward channel order.
    pub const fn canonical(self) -> Self {
        Self::new(self.model, self.sample, AlphaPlacement::Last, false)
    }

    /// True when both formats place every channel at the same slot.
    pub fn same_layout(&self, other: &PixelFormat) -> bool {
        self.model.color_channels() == other.model.color_channels()
            && self.alpha == other.alpha
            && self.reversed == other.reversed
    }

    /// Human-readable name such as `RGBA8`, `BGRA16` or `LabAF`.
    pub fn name(&self) -> String {
        let names = self.model.channel_names();
        let mut slots = vec![""; self.channels()];
        for (i, n) in names.iter().enumerate() {
            slots[self.color_index(i)] = *n;
        }
        if let Some(a) = self.alpha_index() {
            slots[a] = "A";
        }
        let suffix = match self.sample {
            SampleType::U8 => "8",
            SampleType::U16 => "16",
            SampleType::U32 => "32",
            SampleType::F32 => "F",
        };
        format!("{}{}", slots.concat(), suffix)
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/descriptor.rs"]
mod tests;
