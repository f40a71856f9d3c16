//! WMO weather-code lookup tables.
//!
//! Maps WMO code-flag 0-20-003 integer codes to the condition groups the
//! weather widget renders: a terminal glyph (with day/night variants where
//! the condition looks different at night) and a human-readable label.
//! Reference: <https://codes.wmo.int/bufr4/codeflag/0-20-003>

/// Condition groups, each covering one or more WMO codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionGroup {
    Clear,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    FreezingDrizzle,
    Rain,
    FreezingRain,
    Snow,
    SnowGrains,
    RainShowers,
    SnowShowers,
    Thunderstorm,
    ThunderstormHail,
}

/// Glyph shown when a code is not covered by any group.
pub const FALLBACK_GLYPH: &str = "☁";

/// Label returned for codes outside every group.
pub const UNKNOWN_LABEL: &str = "Unknown weather";

// Day/night variants exist for clear skies, light cloud, and rain showers.
const CLEAR_DAY: &str = "☀";
const CLEAR_NIGHT: &str = "☾";
const FEW_CLOUDS_DAY: &str = "⛅";
const FEW_CLOUDS_NIGHT: &str = "☁☾";
const SHOWERS_DAY: &str = "☀⛆";
const SHOWERS_NIGHT: &str = "☾⛆";

impl ConditionGroup {
    pub const ALL: [ConditionGroup; 15] = [
        Self::Clear,
        Self::MainlyClear,
        Self::PartlyCloudy,
        Self::Overcast,
        Self::Fog,
        Self::Drizzle,
        Self::FreezingDrizzle,
        Self::Rain,
        Self::FreezingRain,
        Self::Snow,
        Self::SnowGrains,
        Self::RainShowers,
        Self::SnowShowers,
        Self::Thunderstorm,
        Self::ThunderstormHail,
    ];

    /// WMO codes belonging to this group.
    #[must_use]
    pub const fn codes(self) -> &'static [u8] {
        match self {
            Self::Clear => &[0],
            Self::MainlyClear => &[1],
            Self::PartlyCloudy => &[2],
            Self::Overcast => &[3],
            Self::Fog => &[45, 48],
            Self::Drizzle => &[51, 53, 55],
            Self::FreezingDrizzle => &[56, 57],
            Self::Rain => &[61, 63, 65],
            Self::FreezingRain => &[66, 67],
            Self::Snow => &[71, 73, 75],
            Self::SnowGrains => &[77],
            Self::RainShowers => &[80, 81, 82],
            Self::SnowShowers => &[85, 86],
            Self::Thunderstorm => &[95],
            Self::ThunderstormHail => &[96, 99],
        }
    }

    /// Resolve the group covering a WMO code, if any.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.codes().contains(&code))
    }

    /// Display label for the group.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "Clear sky",
            Self::MainlyClear => "Mainly clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::FreezingDrizzle => "Freezing drizzle",
            Self::Rain => "Rain",
            Self::FreezingRain => "Freezing rain",
            Self::RainShowers => "Rain showers",
            Self::Snow => "Snow",
            Self::SnowGrains => "Snow grains",
            Self::SnowShowers => "Snow showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::ThunderstormHail => "Thunderstorm with hail",
        }
    }

    /// Terminal glyph for the group. `is_night` selects the night variant
    /// where one exists.
    #[must_use]
    pub const fn glyph(self, is_night: bool) -> &'static str {
        match self {
            Self::Clear => {
                if is_night { CLEAR_NIGHT } else { CLEAR_DAY }
            }
            Self::MainlyClear | Self::PartlyCloudy => {
                if is_night { FEW_CLOUDS_NIGHT } else { FEW_CLOUDS_DAY }
            }
            Self::RainShowers => {
                if is_night { SHOWERS_NIGHT } else { SHOWERS_DAY }
            }
            Self::Overcast => "☁",
            Self::Fog => "≋",
            Self::Drizzle => "☂",
            Self::FreezingDrizzle | Self::FreezingRain => "⛇",
            Self::Rain => "⛆",
            Self::Snow | Self::SnowShowers => "❅",
            Self::SnowGrains => "❄",
            Self::Thunderstorm => "⚡",
            Self::ThunderstormHail => "⚡⛇",
        }
    }
}

/// Glyph for a WMO code; falls back to a generic cloud for unmapped codes.
#[must_use]
pub fn glyph_for_code(code: u8, is_night: bool) -> &'static str {
    ConditionGroup::from_code(code).map_or(FALLBACK_GLYPH, |g| g.glyph(is_night))
}

/// Label for a WMO code; `"Unknown weather"` for unmapped codes.
#[must_use]
pub fn label_for_code(code: u8) -> &'static str {
    ConditionGroup::from_code(code).map_or(UNKNOWN_LABEL, ConditionGroup::label)
}

/// Glyph and label pair, the shape the weather panel consumes.
#[must_use]
pub fn glyph_and_label(code: u8, is_night: bool) -> (&'static str, &'static str) {
    (glyph_for_code(code, is_night), label_for_code(code))
}

/// Fine-grained per-code description (the group labels collapse intensity).
#[must_use]
pub fn describe_code(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}
