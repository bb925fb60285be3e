use crate::history::HistoryIndex;
use crate::model::{Park, Popularity, Region, Season};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitStatus {
    #[default]
    All,
    Visited,
    Unvisited,
}

/// Attribute filters. An empty set means "no constraint".
#[derive(Debug, Clone, Default)]
pub struct ParkFilter {
    pub regions: Vec<Region>,
    pub seasons: Vec<Season>,
    pub popularity: Vec<Popularity>,
    pub status: VisitStatus,
}

impl ParkFilter {
    pub fn matches(&self, park: &Park, index: &HistoryIndex) -> bool {
        let visited = index.is_visited(&park.id);
        match self.status {
            VisitStatus::Visited if !visited => return false,
            VisitStatus::Unvisited if visited => return false,
            _ => {}
        }

        let region_ok = self.regions.is_empty() || self.regions.contains(&park.region);
        let season_ok = self.seasons.is_empty()
            || park.best_seasons.iter().any(|s| self.seasons.contains(s));
        let pop_ok = self.popularity.is_empty() || self.popularity.contains(&park.popularity);
        region_ok && season_ok && pop_ok
    }
}

pub fn filter_parks<'a>(parks: &'a [Park], index: &HistoryIndex, filter: &ParkFilter) -> Vec<&'a Park> {
    parks.iter().filter(|p| filter.matches(p, index)).collect()
}

/// Shuffled recommendation queue.
///
/// Lucky mode ignores every filter. With status `All` (or lucky), unvisited
/// parks come first and visited parks after, each group shuffled on its own.
pub fn recommend<'a, R: Rng + ?Sized>(
    parks: &'a [Park],
    index: &HistoryIndex,
    filter: &ParkFilter,
    lucky: bool,
    rng: &mut R,
) -> Vec<&'a Park> {
    let candidates: Vec<&Park> = if lucky {
        parks.iter().collect()
    } else {
        filter_parks(parks, index, filter)
    };

    if lucky || filter.status == VisitStatus::All {
        let (mut unvisited, mut visited): (Vec<&Park>, Vec<&Park>) =
            candidates.into_iter().partition(|p| !index.is_visited(&p.id));
        unvisited.shuffle(rng);
        visited.shuffle(rng);
        unvisited.extend(visited);
        unvisited
    } else {
        let mut queue = candidates;
        queue.shuffle(rng);
        queue
    }
}
