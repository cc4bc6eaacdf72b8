use std::{fmt, str::FromStr};

/// The closed set of print layouts.
///
/// A layout fixes how many photos a print takes and the shape of every slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum LayoutKind {
    /// One photo covering the whole sheet.
    Single,
    /// One photo over the top part of the sheet, logo band underneath.
    SingleWithLogo,
    /// Two identical strips of four stacked photos, cut apart after printing.
    FourCutDualStrip,
    /// Four photos in a 2x2 grid.
    TwoByTwo,
    /// Two photos stacked vertically.
    VerticalTwo,
    /// One wide photo on top, two side by side below.
    OnePlusTwo,
}

/// Where a layout draws the logo relative to its photo tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoLayer {
    None,
    BeneathPhotos,
    AbovePhotos,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 6] = [
        LayoutKind::Single,
        LayoutKind::SingleWithLogo,
        LayoutKind::FourCutDualStrip,
        LayoutKind::TwoByTwo,
        LayoutKind::VerticalTwo,
        LayoutKind::OnePlusTwo,
    ];

    /// Number of distinct photos the layout places.
    pub const fn required_photos(self) -> usize {
        match self {
            LayoutKind::Single | LayoutKind::SingleWithLogo => 1,
            LayoutKind::FourCutDualStrip | LayoutKind::TwoByTwo => 4,
            LayoutKind::VerticalTwo => 2,
            LayoutKind::OnePlusTwo => 3,
        }
    }

    pub const fn is_single_photo(self) -> bool {
        matches!(self, LayoutKind::Single | LayoutKind::SingleWithLogo)
    }

    pub const fn logo_layer(self) -> LogoLayer {
        match self {
            LayoutKind::Single => LogoLayer::None,
            LayoutKind::SingleWithLogo | LayoutKind::FourCutDualStrip => LogoLayer::BeneathPhotos,
            LayoutKind::TwoByTwo | LayoutKind::VerticalTwo | LayoutKind::OnePlusTwo => {
                LogoLayer::AbovePhotos
            }
        }
    }

    /// Stable identifier used in requests and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            LayoutKind::Single => "single",
            LayoutKind::SingleWithLogo => "single-with-logo",
            LayoutKind::FourCutDualStrip => "four-cut-dual-strip",
            LayoutKind::TwoByTwo => "two-by-two",
            LayoutKind::VerticalTwo => "vertical-two",
            LayoutKind::OnePlusTwo => "one-plus-two",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let kind = match key.as_str() {
            "single" => LayoutKind::Single,
            "single-with-logo" => LayoutKind::SingleWithLogo,
            "four-cut-dual-strip" | "4cut" => LayoutKind::FourCutDualStrip,
            "two-by-two" | "2x2" => LayoutKind::TwoByTwo,
            "vertical-two" => LayoutKind::VerticalTwo,
            "one-plus-two" | "1+2" => LayoutKind::OnePlusTwo,
            _ => return Err(format!("unknown layout \"{s}\"")),
        };
        Ok(kind)
    }
}

impl TryFrom<String> for LayoutKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/kind.rs"]
mod tests;
