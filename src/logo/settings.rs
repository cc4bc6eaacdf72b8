use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerticalAnchor {
    Top,
    Center,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HorizontalAnchor {
    Left,
    Center,
    Right,
}

/// One of the nine preset logo positions, e.g. `bottom-center`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LogoAnchor {
    pub vertical: VerticalAnchor,
    pub horizontal: HorizontalAnchor,
}

impl LogoAnchor {
    pub const BOTTOM_CENTER: Self = Self {
        vertical: VerticalAnchor::Bottom,
        horizontal: HorizontalAnchor::Center,
    };
}

impl FromStr for LogoAnchor {
    type Err = String;

    /// Accepts `<vertical>-<horizontal>` (`top-left` ... `bottom-right`) and a bare
    /// `center` for the middle position.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let (v, h) = match key.as_str() {
            "center" => ("center", "center"),
            other => other
                .split_once('-')
                .ok_or_else(|| format!("invalid logo position \"{s}\""))?,
        };
        let vertical = match v {
            "top" => VerticalAnchor::Top,
            "center" | "middle" => VerticalAnchor::Center,
            "bottom" => VerticalAnchor::Bottom,
            _ => return Err(format!("invalid vertical logo anchor \"{v}\" in \"{s}\"")),
        };
        let horizontal = match h {
            "left" => HorizontalAnchor::Left,
            "center" => HorizontalAnchor::Center,
            "right" => HorizontalAnchor::Right,
            _ => return Err(format!("invalid horizontal logo anchor \"{h}\" in \"{s}\"")),
        };
        Ok(Self {
            vertical,
            horizontal,
        })
    }
}

impl fmt::Display for LogoAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self.vertical {
            VerticalAnchor::Top => "top",
            VerticalAnchor::Center => "center",
            VerticalAnchor::Bottom => "bottom",
        };
        let h = match self.horizontal {
            HorizontalAnchor::Left => "left",
            HorizontalAnchor::Center => "center",
            HorizontalAnchor::Right => "right",
        };
        write!(f, "{v}-{h}")
    }
}

/// Where the logo goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogoPlacement {
    Preset(LogoAnchor),
    /// Logo center, as percentages of the canvas width and of the logo region height.
    Custom { x_percent: f64, y_percent: f64 },
}

/// Per-event logo configuration.
///
/// Wire form: `{ "position": "bottom-center", "size": 80, "custom_x": 50, "custom_y": 50 }`
/// where `position` may also be `"custom"`. The position string is parsed once, when the
/// settings are loaded.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "LogoSettingsDef", into = "LogoSettingsDef")]
pub struct LogoSettings {
    pub placement: LogoPlacement,
    /// Logo width as a percentage of the full canvas width, within `1..=100`.
    pub size_percent: f64,
}

impl Default for LogoSettings {
    fn default() -> Self {
        Self {
            placement: LogoPlacement::Preset(LogoAnchor::BOTTOM_CENTER),
            size_percent: 80.0,
        }
    }
}

impl LogoSettings {
    pub fn new(placement: LogoPlacement, size_percent: f64) -> Result<Self, String> {
        if !size_percent.is_finite() {
            return Err("logo size must be a finite percentage".to_owned());
        }
        if let LogoPlacement::Custom {
            x_percent,
            y_percent,
        } = placement
            && !(x_percent.is_finite() && y_percent.is_finite())
        {
            return Err("custom logo coordinates must be finite".to_owned());
        }
        Ok(Self {
            placement,
            size_percent: size_percent.clamp(1.0, 100.0),
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct LogoSettingsDef {
    #[serde(default = "default_position")]
    position: String,
    #[serde(default = "default_size")]
    size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_y: Option<f64>,
}

fn default_position() -> String {
    LogoAnchor::BOTTOM_CENTER.to_string()
}

fn default_size() -> f64 {
    80.0
}

impl TryFrom<LogoSettingsDef> for LogoSettings {
    type Error = String;

    fn try_from(def: LogoSettingsDef) -> Result<Self, Self::Error> {
        let placement = if def.position.trim().eq_ignore_ascii_case("custom") {
            LogoPlacement::Custom {
                x_percent: def.custom_x.unwrap_or(50.0),
                y_percent: def.custom_y.unwrap_or(50.0),
            }
        } else {
            LogoPlacement::Preset(def.position.parse()?)
        };
        LogoSettings::new(placement, def.size)
    }
}

impl From<LogoSettings> for LogoSettingsDef {
    fn from(s: LogoSettings) -> Self {
        match s.placement {
            LogoPlacement::Preset(anchor) => Self {
                position: anchor.to_string(),
                size: s.size_percent,
                custom_x: None,
                custom_y: None,
            },
            LogoPlacement::Custom {
                x_percent,
                y_percent,
            } => Self {
                position: "custom".to_owned(),
                size: s.size_percent,
                custom_x: Some(x_percent),
                custom_y: Some(y_percent),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/logo/settings.rs"]
mod tests;
