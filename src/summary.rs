use crate::badges::BadgeStatus;
use crate::history::HistoryIndex;
use crate::model::{Park, Rating, Region};

#[derive(Debug, Clone, serde::Serialize)]
pub struct Summary {
    pub parks: ParksSection,
    pub ratings: Vec<RatingRow>,
    pub regions: Vec<RegionRow>,
    pub badges: BadgesSection,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ParksSection {
    pub visited: usize,
    pub total: usize,
    pub percent: u32,
    pub total_visits: usize,
    pub rated: usize,
    /// Visited ids the catalog does not know. They still count toward badges.
    pub off_catalog: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct RatingRow {
    pub rating: Rating,
    pub label: String,
    pub parks: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct RegionRow {
    pub region: String,
    pub visited: usize,
    pub total: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct BadgesSection {
    pub unlocked: usize,
    pub total: usize,
}

pub fn build_summary(index: &HistoryIndex, parks: &[Park], statuses: &[BadgeStatus]) -> Summary {
    let visited_in_catalog = parks.iter().filter(|p| index.is_visited(&p.id)).count();
    let percent = if parks.is_empty() {
        0
    } else {
        ((visited_in_catalog as f64 / parks.len() as f64) * 100.0).round() as u32
    };

    let ratings = Rating::ALL
        .iter()
        .map(|r| RatingRow {
            rating: *r,
            label: r.label().to_string(),
            parks: index.ratings().filter(|x| x == r).count(),
        })
        .collect();

    let regions = Region::ALL
        .iter()
        .map(|r| {
            let in_region: Vec<&Park> = parks.iter().filter(|p| p.region == *r).collect();
            RegionRow {
                region: r.as_str().to_string(),
                visited: in_region.iter().filter(|p| index.is_visited(&p.id)).count(),
                total: in_region.len(),
            }
        })
        .collect();

    Summary {
        parks: ParksSection {
            visited: visited_in_catalog,
            total: parks.len(),
            percent,
            total_visits: index.total_visits(),
            rated: index.rated_count(),
            off_catalog: index
                .visited_park_ids()
                .iter()
                .filter(|id| !parks.iter().any(|p| &p.id == *id))
                .count(),
        },
        ratings,
        regions,
        badges: BadgesSection {
            unlocked: statuses.iter().filter(|s| s.is_unlocked).count(),
            total: statuses.len(),
        },
    }
}
