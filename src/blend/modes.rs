use std::str::FromStr;

use crate::foundation::error::PigmentError;

/// How a source channel or pixel is combined with the backdrop.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// Source replaces backdrop.
    #[default]
    Normal,
    /// Backdrop color kept; source acts only through the alpha mode.
    Erase,
    /// Backdrop color kept, source shows through where the backdrop is transparent.
    Behind,
    /// Stochastic stipple: each pixel is either source or backdrop.
    Dissolve,
    /// Per-channel minimum.
    Darken,
    /// Product.
    Multiply,
    /// Darkens the backdrop by increasing contrast.
    ColorBurn,
    /// Sum minus max.
    LinearBurn,
    /// Whole pixel with the lower luminance.
    DarkerColor,
    /// Per-channel maximum.
    Lighten,
    /// Inverted product of inverses.
    Screen,
    /// Brightens the backdrop by decreasing contrast.
    ColorDodge,
    /// Saturated sum.
    LinearDodge,
    /// Whole pixel with the higher luminance.
    LighterColor,
    /// Multiply or screen depending on the backdrop.
    Overlay,
    /// Gentle darken or lighten depending on the source.
    SoftLight,
    /// Overlay with operands swapped.
    HardLight,
    /// Color burn or color dodge depending on the source.
    VividLight,
    /// Linear burn or linear dodge depending on the source.
    LinearLight,
    /// Darken or lighten depending on the source.
    PinLight,
    /// Vivid light thresholded to the channel extremes.
    HardMix,
    /// Absolute difference.
    Difference,
    /// Low-contrast difference.
    Exclusion,
    /// Saturated subtraction of source from backdrop.
    Substract,
    /// Backdrop divided by source.
    Divide,
    /// Source hue with backdrop saturation and luminosity.
    Hue,
    /// Source saturation with backdrop hue and luminosity.
    Saturation,
    /// Source hue and saturation with backdrop luminosity.
    Color,
    /// Source luminosity with backdrop hue and saturation.
    Luminosity,
}

impl BlendMode {
    /// Every mode, in declaration order.
    pub const ALL: [BlendMode; 29] = [
        Self::Normal,
        Self::Erase,
        Self::Behind,
        Self::Dissolve,
        Self::Darken,
        Self::Multiply,
        Self::ColorBurn,
        Self::LinearBurn,
        Self::DarkerColor,
        Self::Lighten,
        Self::Screen,
        Self::ColorDodge,
        Self::LinearDodge,
        Self::LighterColor,
        Self::Overlay,
        Self::SoftLight,
        Self::HardLight,
        Self::VividLight,
        Self::LinearLight,
        Self::PinLight,
        Self::HardMix,
        Self::Difference,
        Self::Exclusion,
        Self::Substract,
        Self::Divide,
        Self::Hue,
        Self::Saturation,
        Self::Color,
        Self::Luminosity,
    ];

    /// True for modes that need every channel of a pixel at once.
    pub const fn is_non_separable(self) -> bool {
        matches!(
            self,
            Self::Dissolve
                | Self::DarkerColor
                | Self::LighterColor
                | Self::Hue
                | Self::Saturation
                | Self::Color
                | Self::Luminosity
        )
    }

    /// Stable kebab-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Erase => "erase",
            Self::Behind => "behind",
            Self::Dissolve => "dissolve",
            Self::Darken => "darken",
            Self::Multiply => "multiply",
            Self::ColorBurn => "color-burn",
            Self::LinearBurn => "linear-burn",
            Self::DarkerColor => "darker-color",
            Self::Lighten => "lighten",
            Self::Screen => "screen",
            Self::ColorDodge => "color-dodge",
            Self::LinearDodge => "linear-dodge",
            Self::LighterColor => "lighter-color",
            Self::Overlay => "overlay",
            Self::SoftLight => "soft-light",
            Self::HardLight => "hard-light",
            Self::VividLight => "vivid-light",
            Self::LinearLight => "linear-light",
            Self::PinLight => "pin-light",
            Self::HardMix => "hard-mix",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Substract => "substract",
            Self::Divide => "divide",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Color => "color",
            Self::Luminosity => "luminosity",
        }
    }
}

impl std::fmt::Display for BlendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = PigmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| PigmentError::validation(format!("unknown blend mode '{s}'")))
    }
}

/// How source and backdrop alpha combine into the result alpha.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum AlphaMode {
    /// `b + s - b*s`.
    #[default]
    Normal,
    /// Source alpha erases the backdrop: `(1 - s) * b`.
    Erase,
    /// Source alpha.
    Top,
    /// Backdrop alpha.
    Back,
    /// Saturated `b - s`.
    Sub,
    /// Saturated `b + s`.
    Add,
    /// `b * s`.
    Mul,
    /// Minimum.
    Min,
    /// Maximum.
    Max,
}

impl AlphaMode {
    /// Every mode, in declaration order.
    pub const ALL: [AlphaMode; 9] = [
        Self::Normal,
        Self::Erase,
        Self::Top,
        Self::Back,
        Self::Sub,
        Self::Add,
        Self::Mul,
        Self::Min,
        Self::Max,
    ];

    /// Stable kebab-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Erase => "erase",
            Self::Top => "top",
            Self::Back => "back",
            Self::Sub => "sub",
            Self::Add => "add",
            Self::Mul => "mul",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

impl std::fmt::Display for AlphaMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlphaMode {
    type Err = PigmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| PigmentError::validation(format!("unknown alpha mode '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/modes.rs"]
mod tests;
