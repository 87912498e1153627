//! Condition labels and their display icons.

/// Label used when the provider sends no condition at all
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Icon for labels outside the known categories
pub const UNKNOWN_ICON: &str = "unknown.svg";

/// Condition categories reported in OpenWeather's `weather[].main`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionCategory {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Mist,
    Smoke,
    Haze,
    Dust,
    Fog,
    Sand,
    Ash,
    Clear,
    Clouds,
}

impl ConditionCategory {
    pub const ALL: [ConditionCategory; 13] = [
        Self::Thunderstorm,
        Self::Drizzle,
        Self::Rain,
        Self::Snow,
        Self::Mist,
        Self::Smoke,
        Self::Haze,
        Self::Dust,
        Self::Fog,
        Self::Sand,
        Self::Ash,
        Self::Clear,
        Self::Clouds,
    ];

    /// Match an already normalized label (see [`tcase`])
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == label)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "Thunderstorm",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Mist => "Mist",
            Self::Smoke => "Smoke",
            Self::Haze => "Haze",
            Self::Dust => "Dust",
            Self::Fog => "Fog",
            Self::Sand => "Sand",
            Self::Ash => "Ash",
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
        }
    }

    /// SVG asset shown for this category
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "thunderstorm.svg",
            Self::Drizzle => "drizzle.svg",
            Self::Rain => "rain.svg",
            Self::Snow => "snow.svg",
            Self::Mist
            | Self::Smoke
            | Self::Haze
            | Self::Dust
            | Self::Fog
            | Self::Sand
            | Self::Ash => "atmosphere.svg",
            Self::Clear => "clear.svg",
            Self::Clouds => "clouds.svg",
        }
    }
}

/// Normalize a free-text label: trim, lowercase, capitalize the first letter.
///
/// An empty label becomes `"Unknown"`. A whitespace-only label is not empty,
/// so it normalizes to `""`.
pub fn tcase(label: &str) -> String {
    if label.is_empty() {
        return UNKNOWN_LABEL.to_string();
    }

    let lowered = label.trim().to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Icon asset for a raw or normalized condition label
pub fn icon_for(label: &str) -> &'static str {
    ConditionCategory::from_label(&tcase(label))
        .map(|c| c.icon_name())
        .unwrap_or(UNKNOWN_ICON)
}
