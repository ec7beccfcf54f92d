/// Primary condition groups reported in `weather[0].main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeatherCondition {
    #[default]
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    /// Mist, fog, haze, dust, sand and ash share one glyph.
    Atmosphere,
    Squall,
    Tornado,
}

impl WeatherCondition {
    /// Keyword match is case-sensitive; anything unrecognised reads as clear sky.
    pub fn from_keyword(keyword: Option<&str>) -> Self {
        match keyword {
            Some("Clear") => Self::Clear,
            Some("Clouds") => Self::Clouds,
            Some("Rain") => Self::Rain,
            Some("Drizzle") => Self::Drizzle,
            Some("Thunderstorm") => Self::Thunderstorm,
            Some("Snow") => Self::Snow,
            Some("Mist" | "Fog" | "Haze" | "Dust" | "Sand" | "Ash") => Self::Atmosphere,
            Some("Squall") => Self::Squall,
            Some("Tornado") => Self::Tornado,
            _ => Self::Clear,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::Clouds => "⛅",
            Self::Rain => "🌧️",
            Self::Drizzle => "🌦️",
            Self::Thunderstorm => "⛈️",
            Self::Snow => "❄️",
            Self::Atmosphere => "🌫️",
            Self::Squall => "💨",
            Self::Tornado => "🌪️",
        }
    }
}

/// Glyph for a raw condition keyword.
pub fn weather_icon(keyword: Option<&str>) -> &'static str {
    WeatherCondition::from_keyword(keyword).glyph()
}
