//! Song selection criteria and their translation into Spotify requests.
//!
//! The UI collects four values: a mood, an energy level, a genre and a
//! tempo. [`SelectionCriteria`] validates them and maps them either to a free
//! text search query or to the query parameters of the recommendations
//! endpoint.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::error::{AppError, Result};

/// Genre seeds offered in the UI. Any other valid slug is accepted as well.
pub const GENRES: &[&str] = &[
    "pop",
    "rock",
    "hip-hop",
    "electronic",
    "dance",
    "indie",
    "jazz",
    "classical",
    "r-n-b",
    "soul",
    "funk",
    "country",
    "folk",
    "metal",
    "punk",
    "reggae",
    "latin",
    "blues",
    "ambient",
    "k-pop",
];

const FALLBACK_QUERY: &str = "top hits";
const MAX_GENRE_LEN: usize = 40;

/// How a set of criteria is turned into a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStrategy {
    /// Free text search built from the criteria.
    #[default]
    Search,
    /// The recommendations endpoint, falling back to search when unavailable.
    Recommendations,
}

impl FromStr for SelectionStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" => Ok(SelectionStrategy::Search),
            "recommendations" | "recommendation" => Ok(SelectionStrategy::Recommendations),
            other => Err(AppError::Validation(format!(
                "unknown selection strategy '{}', expected 'search' or 'recommendations'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mood {
    #[default]
    Any,
    Happy,
    Sad,
    Chill,
    Energetic,
    Romantic,
    Angry,
    Focused,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Any,
        Mood::Happy,
        Mood::Sad,
        Mood::Chill,
        Mood::Energetic,
        Mood::Romantic,
        Mood::Angry,
        Mood::Focused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Any => "any",
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Chill => "chill",
            Mood::Energetic => "energetic",
            Mood::Romantic => "romantic",
            Mood::Angry => "angry",
            Mood::Focused => "focused",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Any => "Any mood",
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Chill => "Chill",
            Mood::Energetic => "Energetic",
            Mood::Romantic => "Romantic",
            Mood::Angry => "Angry",
            Mood::Focused => "Focused",
        }
    }

    fn keywords(&self) -> &'static str {
        match self {
            Mood::Any => "",
            Mood::Happy => "happy upbeat",
            Mood::Sad => "sad melancholy",
            Mood::Chill => "chill relaxing",
            Mood::Energetic => "energetic hype",
            Mood::Romantic => "romantic love",
            Mood::Angry => "angry aggressive",
            Mood::Focused => "focus instrumental",
        }
    }

    /// Target musical positiveness for the recommendations endpoint.
    pub fn target_valence(&self) -> Option<f32> {
        match self {
            Mood::Any => None,
            Mood::Happy => Some(0.85),
            Mood::Sad => Some(0.15),
            Mood::Chill => Some(0.5),
            Mood::Energetic => Some(0.7),
            Mood::Romantic => Some(0.6),
            Mood::Angry => Some(0.25),
            Mood::Focused => Some(0.4),
        }
    }
}

impl FromStr for Mood {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().to_ascii_lowercase();
        if value.is_empty() {
            return Ok(Mood::Any);
        }
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown mood '{}'", s.trim())))
    }
}

/// Energy level in percent, 0 (calm) to 100 (intense).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Energy(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl Energy {
    pub const DEFAULT: Energy = Energy(50);

    pub fn new(percent: u8) -> Result<Self> {
        if percent > 100 {
            return Err(AppError::Validation(format!(
                "energy must be between 0 and 100, got {}",
                percent
            )));
        }
        Ok(Energy(percent))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    pub fn as_fraction(&self) -> f32 {
        f32::from(self.0) / 100.0
    }

    pub fn level(&self) -> EnergyLevel {
        match self.0 {
            0..=33 => EnergyLevel::Low,
            67..=100 => EnergyLevel::High,
            _ => EnergyLevel::Medium,
        }
    }
}

impl Default for Energy {
    fn default() -> Self {
        Energy::DEFAULT
    }
}

impl FromStr for Energy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        if value.is_empty() {
            return Ok(Energy::DEFAULT);
        }
        let percent: u8 = value.parse().map_err(|_| {
            AppError::Validation(format!(
                "energy must be between 0 and 100, got '{}'",
                value
            ))
        })?;
        Energy::new(percent)
    }
}

/// A seed genre slug, or no genre constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Genre(Option<String>);

impl Genre {
    pub fn any() -> Self {
        Genre(None)
    }

    pub fn slug(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromStr for Genre {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().to_ascii_lowercase();
        if value.is_empty() || value == "any" {
            return Ok(Genre(None));
        }

        let valid = value.len() <= MAX_GENRE_LEN
            && value
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(AppError::Validation(format!(
                "genre '{}' is not a valid genre name",
                s.trim()
            )));
        }

        Ok(Genre(Some(value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tempo {
    #[default]
    Any,
    Slow,
    Moderate,
    Fast,
}

impl Tempo {
    pub const ALL: [Tempo; 4] = [Tempo::Any, Tempo::Slow, Tempo::Moderate, Tempo::Fast];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tempo::Any => "any",
            Tempo::Slow => "slow",
            Tempo::Moderate => "moderate",
            Tempo::Fast => "fast",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tempo::Any => "Any tempo",
            Tempo::Slow => "Slow (< 95 BPM)",
            Tempo::Moderate => "Moderate (95-125 BPM)",
            Tempo::Fast => "Fast (> 125 BPM)",
        }
    }

    /// `(min, max, target)` in beats per minute.
    pub fn bpm_range(&self) -> Option<(u16, u16, u16)> {
        match self {
            Tempo::Any => None,
            Tempo::Slow => Some((60, 95, 80)),
            Tempo::Moderate => Some((95, 125, 110)),
            Tempo::Fast => Some((125, 180, 140)),
        }
    }

    fn keywords(&self) -> &'static str {
        match self {
            Tempo::Any | Tempo::Moderate => "",
            Tempo::Slow => "slow",
            Tempo::Fast => "fast",
        }
    }
}

impl FromStr for Tempo {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().to_ascii_lowercase();
        if value.is_empty() {
            return Ok(Tempo::Any);
        }
        Tempo::ALL
            .into_iter()
            .find(|t| t.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown tempo '{}'", s.trim())))
    }
}

/// Raw form submission; every field is optional and validated separately.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CriteriaForm {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub energy: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub tempo: Option<String>,
}

/// The ephemeral selection made in one UI interaction. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionCriteria {
    pub mood: Mood,
    pub energy: Energy,
    pub genre: Genre,
    pub tempo: Tempo,
}

impl SelectionCriteria {
    pub fn from_form(form: &CriteriaForm) -> Result<Self> {
        Ok(SelectionCriteria {
            mood: form.mood.as_deref().unwrap_or_default().parse()?,
            energy: form.energy.as_deref().unwrap_or_default().parse()?,
            genre: form.genre.as_deref().unwrap_or_default().parse()?,
            tempo: form.tempo.as_deref().unwrap_or_default().parse()?,
        })
    }

    /// Free text search query for `GET /search?type=track`.
    pub fn search_query(&self) -> String {
        let energy = match self.energy.level() {
            EnergyLevel::Low => "calm",
            EnergyLevel::Medium => "",
            EnergyLevel::High => "high energy",
        };

        self.build_query(&[self.mood.keywords(), energy, self.tempo.keywords()])
    }

    /// A looser query with only mood and genre, used when the full one finds nothing.
    pub fn relaxed_query(&self) -> String {
        self.build_query(&[self.mood.keywords()])
    }

    fn build_query(&self, keywords: &[&str]) -> String {
        let mut parts: Vec<String> = keywords
            .iter()
            .filter(|k| !k.is_empty())
            .map(|k| k.to_string())
            .collect();

        if let Some(genre) = self.genre.slug() {
            parts.push(format!("genre:\"{}\"", genre));
        }

        if parts.is_empty() {
            FALLBACK_QUERY.to_string()
        } else {
            parts.join(" ")
        }
    }

    /// Query parameters for `GET /recommendations`.
    pub fn recommendation_params(&self, limit: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("seed_genres", self.genre.slug().unwrap_or("pop").to_string()),
            ("target_energy", format!("{:.2}", self.energy.as_fraction())),
        ];

        if let Some(valence) = self.mood.target_valence() {
            params.push(("target_valence", format!("{:.2}", valence)));
        }

        if let Some((min, max, target)) = self.tempo.bpm_range() {
            params.push(("min_tempo", min.to_string()));
            params.push(("max_tempo", max.to_string()));
            params.push(("target_tempo", target.to_string()));
        }

        params.push(("limit", limit.clamp(1, 100).to_string()));
        params
    }
}

impl fmt::Display for SelectionCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mood={} energy={}% genre={} tempo={}",
            self.mood.as_str(),
            self.energy.percent(),
            self.genre.slug().unwrap_or("any"),
            self.tempo.as_str()
        )
    }
}
