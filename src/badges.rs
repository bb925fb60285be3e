use crate::history::HistoryIndex;
use crate::model::{Badge, Park, UserParkHistory};
use crate::progress::{project_progress, Progress};

#[derive(Debug, Clone, serde::Serialize)]
pub struct BadgeStatus {
    pub badge: Badge,
    pub is_unlocked: bool,
}

/// Unlock status for every badge, in catalog order.
pub fn evaluate_badges(
    histories: &[UserParkHistory],
    _parks: &[Park],
    badges: &[Badge],
) -> Vec<BadgeStatus> {
    evaluate_with_index(&HistoryIndex::build(histories), badges)
}

pub fn evaluate_with_index(index: &HistoryIndex, badges: &[Badge]) -> Vec<BadgeStatus> {
    badges
        .iter()
        .map(|b| BadgeStatus {
            badge: b.clone(),
            is_unlocked: b.rule.is_satisfied(index),
        })
        .collect()
}

/// Unlocked badges first; catalog order is kept within each group.
pub fn unlocked_first(mut statuses: Vec<BadgeStatus>) -> Vec<BadgeStatus> {
    statuses.sort_by_key(|s| !s.is_unlocked);
    statuses
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct BadgeReport {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub rule: String,
    pub is_unlocked: bool,
    pub progress: Progress,
}

pub fn build_report(
    status: &BadgeStatus,
    histories: &[UserParkHistory],
    parks: &[Park],
) -> BadgeReport {
    BadgeReport {
        id: status.badge.id.clone(),
        name: status.badge.name.clone(),
        description: status.badge.description.clone(),
        icon: status.badge.icon.clone(),
        rule: status.badge.rule.describe(),
        is_unlocked: status.is_unlocked,
        progress: project_progress(&status.badge, histories, parks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::tests::history;
    use crate::store::{bundled_badges, bundled_parks, read_history, HistorySource};

    fn unlocked(statuses: &[BadgeStatus], id: &str) -> bool {
        statuses.iter().find(|s| s.badge.id == id).unwrap().is_unlocked
    }

    #[test]
    fn single_zion_visit_unlocks_rookie_only() {
        let parks = bundled_parks().unwrap().parks;
        let badges = bundled_badges().unwrap().badges;
        let h = vec![history("zion", &["2023-01-01"])];
        let s = evaluate_badges(&h, &parks, &badges);

        assert_eq!(s.len(), badges.len());
        assert!(unlocked(&s, "ranger-rookie"));
        assert!(!unlocked(&s, "seasoned-explorer"));
        assert!(unlocked(&s, "canyon-conqueror"));
        assert!(!unlocked(&s, "red-rock-royalty"));
    }

    #[test]
    fn super_fan_needs_three_visits_to_one_park() {
        let parks = bundled_parks().unwrap().parks;
        let badges = bundled_badges().unwrap().badges;

        let three = vec![history("yosemite", &["2024-01-01", "2025-01-01", "2025-08-13"])];
        assert!(unlocked(&evaluate_badges(&three, &parks, &badges), "super-fan"));

        let two = vec![history("yosemite", &["2024-01-01", "2025-01-01"])];
        assert!(!unlocked(&evaluate_badges(&two, &parks, &badges), "super-fan"));
    }

    #[test]
    fn rating_only_records_unlock_nothing() {
        let parks = bundled_parks().unwrap().parks;
        let badges = bundled_badges().unwrap().badges;
        let mut h = history("zion", &[]);
        h.rating = Some(crate::model::Rating::TopTier);
        let s = evaluate_badges(&[h], &parks, &badges);
        assert!(s.iter().all(|b| !b.is_unlocked));
    }

    #[test]
    fn unlocked_first_is_stable() {
        let parks = bundled_parks().unwrap().parks;
        let badges = bundled_badges().unwrap().badges;
        let h = vec![history("zion", &["2023-01-01"]), history("denali", &["2023-02-01"])];
        let sorted = unlocked_first(evaluate_badges(&h, &parks, &badges));

        let first_locked = sorted.iter().position(|s| !s.is_unlocked).unwrap();
        assert!(sorted[first_locked..].iter().all(|s| !s.is_unlocked));

        let pos = |id: &str| badges.iter().position(|b| b.id == id).unwrap();
        for pair in sorted[..first_locked].windows(2) {
            assert!(pos(&pair[0].badge.id) < pos(&pair[1].badge.id));
        }
        for pair in sorted[first_locked..].windows(2) {
            assert!(pos(&pair[0].badge.id) < pos(&pair[1].badge.id));
        }
    }

    #[test]
    fn evaluation_is_repeatable() {
        let parks = bundled_parks().unwrap().parks;
        let badges = bundled_badges().unwrap().badges;
        let journal = read_history(&HistorySource::Bundled).unwrap();
        let a: Vec<bool> = evaluate_badges(&journal.histories, &parks, &badges)
            .iter()
            .map(|s| s.is_unlocked)
            .collect();
        let b: Vec<bool> = evaluate_badges(&journal.histories, &parks, &badges)
            .iter()
            .map(|s| s.is_unlocked)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn demo_history_unlocks_expected_set() {
        let parks = bundled_parks().unwrap().parks;
        let badges = bundled_badges().unwrap().badges;
        let journal = read_history(&HistorySource::Bundled).unwrap();
        let s = evaluate_badges(&journal.histories, &parks, &badges);

        assert!(unlocked(&s, "grand-tour"));
        assert!(unlocked(&s, "halfway-there"));
        assert!(unlocked(&s, "super-fan"));
        assert!(!unlocked(&s, "elite-explorer"));
        assert!(!unlocked(&s, "red-rock-royalty"));
        assert!(!unlocked(&s, "remote-ranger"));
    }
}
