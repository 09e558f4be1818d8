use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DURATION_DAYS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Agadir,
    /// The hinterland: Tafraout, Tiznit and the Anti-Atlas.
    Region,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Agadir, Region::Region];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "agadir" | "coast" | "côte" | "cote" => Some(Self::Agadir),
            "region" | "région" | "hinterland" | "arriere-pays" | "arrière-pays" => {
                Some(Self::Region)
            }
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Agadir => "Agadir",
            Self::Region => "Region",
        }
    }

    /// Interests that may be offered while this region is selected.
    pub fn interests(self) -> &'static [Interest] {
        match self {
            Self::Agadir => &AGADIR_INTERESTS,
            Self::Region => &REGION_INTERESTS,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interest {
    BeachLounging,
    SurfWaterSports,
    GastronomyNightlife,
    GolfResorts,
    MountainTrekking,
    AdventureAdrenaline,
    BerberCulture,
    BivouacNights,
}

const AGADIR_INTERESTS: [Interest; 4] = [
    Interest::BeachLounging,
    Interest::SurfWaterSports,
    Interest::GastronomyNightlife,
    Interest::GolfResorts,
];

const REGION_INTERESTS: [Interest; 4] = [
    Interest::MountainTrekking,
    Interest::AdventureAdrenaline,
    Interest::BerberCulture,
    Interest::BivouacNights,
];

impl Interest {
    pub fn label(self) -> &'static str {
        match self {
            Self::BeachLounging => "Farniente & Plage",
            Self::SurfWaterSports => "Surf & Sports Nautiques",
            Self::GastronomyNightlife => "Gastronomie & Vie Nocturne",
            Self::GolfResorts => "Golf & Resorts",
            Self::MountainTrekking => "Trekking en Montagne",
            Self::AdventureAdrenaline => "Aventure & Adrénaline",
            Self::BerberCulture => "Culture Berbère",
            Self::BivouacNights => "Nuits en Bivouac",
        }
    }

    pub fn region(self) -> Region {
        if AGADIR_INTERESTS.contains(&self) {
            Region::Agadir
        } else {
            Region::Region
        }
    }

    /// Accepts either the display label or a short keyword.
    pub fn parse(value: &str) -> Option<Self> {
        let lower = value.trim().to_lowercase();
        if let Some(found) = AGADIR_INTERESTS
            .iter()
            .chain(REGION_INTERESTS.iter())
            .find(|interest| interest.label().to_lowercase() == lower)
        {
            return Some(*found);
        }

        match lower.as_str() {
            "beach" | "plage" | "farniente" => Some(Self::BeachLounging),
            "surf" | "nautique" => Some(Self::SurfWaterSports),
            "gastronomy" | "gastronomie" | "nightlife" => Some(Self::GastronomyNightlife),
            "golf" => Some(Self::GolfResorts),
            "trekking" | "montagne" => Some(Self::MountainTrekking),
            "adventure" | "aventure" => Some(Self::AdventureAdrenaline),
            "berber" | "culture" => Some(Self::BerberCulture),
            "bivouac" => Some(Self::BivouacNights),
            _ => None,
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetTier {
    Economique,
    #[default]
    Confort,
    Luxe,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Economique, BudgetTier::Confort, BudgetTier::Luxe];

    /// Unrecognised labels resolve to `Confort`.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "économique" | "economique" | "economy" | "eco" => Self::Economique,
            "luxe" | "luxury" => Self::Luxe,
            _ => Self::Confort,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Economique => "Économique",
            Self::Confort => "Confort",
            Self::Luxe => "Luxe",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub image_url: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripPreferences {
    pub region: Option<Region>,
    pub interests: BTreeSet<Interest>,
    pub duration_days: u32,
    pub budget: BudgetTier,
}

impl Default for TripPreferences {
    fn default() -> Self {
        Self {
            region: None,
            interests: BTreeSet::new(),
            duration_days: DEFAULT_DURATION_DAYS,
            budget: BudgetTier::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ContactInfo {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.phone]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Everything the prompt builder needs for one itinerary request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryRequest {
    pub region: Region,
    pub interests: Vec<Interest>,
    pub duration_days: u32,
    pub budget: BudgetTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub amount: u64,
    pub budget: BudgetTier,
    pub duration_days: u32,
}

impl PriceQuote {
    pub const CURRENCY: &'static str = "MAD";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedItinerary {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSession {
    pub contact: ContactInfo,
    pub preferences: TripPreferences,
    pub quote: PriceQuote,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyContent {
    pub tagline: String,
    pub about: String,
}
