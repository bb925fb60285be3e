use crate::rules::BadgeRule;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Region {
    Alaska,
    #[serde(rename = "West Coast")]
    WestCoast,
    Rockies,
    Southwest,
    Midwest,
    #[serde(rename = "East Coast")]
    EastCoast,
    Tropical,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Alaska,
        Region::WestCoast,
        Region::Rockies,
        Region::Southwest,
        Region::Midwest,
        Region::EastCoast,
        Region::Tropical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Alaska => "Alaska",
            Region::WestCoast => "West Coast",
            Region::Rockies => "Rockies",
            Region::Southwest => "Southwest",
            Region::Midwest => "Midwest",
            Region::EastCoast => "East Coast",
            Region::Tropical => "Tropical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Popularity {
    High,
    Medium,
    Low,
}

impl Popularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Popularity::High => "High",
            Popularity::Medium => "Medium",
            Popularity::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Park {
    pub id: String,
    pub name: String,
    pub state: String,
    #[serde(default)]
    pub emoji: String,
    pub coordinates: Option<Coordinates>,
    pub region: Region,
    pub best_seasons: Vec<Season>,
    pub popularity: Popularity,
    #[serde(default)]
    pub established: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fun_fact: String,
}

/// Four-tier park rating. Zero is the lowest real tier, not "unrated".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rating {
    LearnedALot = 0,
    Good = 1,
    Great = 2,
    TopTier = 3,
}

impl Rating {
    /// Highest tier first, the order the journal legend uses.
    pub const ALL: [Rating; 4] = [Rating::TopTier, Rating::Great, Rating::Good, Rating::LearnedALot];

    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::TopTier => "Top Tier",
            Rating::Great => "Great",
            Rating::Good => "Good",
            Rating::LearnedALot => "Learned a Lot",
        }
    }

    pub fn meaning(&self) -> &'static str {
        match self {
            Rating::TopTier => "Worth a dedicated trip",
            Rating::Great => "Worth a detour",
            Rating::Good => "A pleasant stop",
            Rating::LearnedALot => "A learning experience",
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Rating::LearnedALot),
            1 => Ok(Rating::Good),
            2 => Ok(Rating::Great),
            3 => Ok(Rating::TopTier),
            other => Err(format!("rating must be 0..=3, got {}", other)),
        }
    }
}

impl From<Rating> for u8 {
    fn from(r: Rating) -> u8 {
        r.value()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VisitLog {
    pub date: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UserParkHistory {
    #[serde(alias = "parkId")]
    pub park_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub visits: Vec<VisitLog>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Journal {
    pub version: u32,
    pub histories: Vec<UserParkHistory>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub rule: BadgeRule,
    /// Goal shown by the progress bar when the rule has no checklist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_target: Option<u32>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ParkCatalog {
    pub version: u32,
    pub parks: Vec<Park>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BadgeCatalog {
    pub version: u32,
    pub badges: Vec<Badge>,
}
