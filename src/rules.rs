use crate::history::HistoryIndex;

/// Unlock rule for a badge. The same variant drives both the unlock check and
/// the progress checklist, so the two cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BadgeRule {
    AnyOf { parks: Vec<String> },
    AllOf { parks: Vec<String> },
    AtLeastOf { parks: Vec<String>, count: u32 },
    CountAtLeast { count: u32 },
    RepeatVisit { visits: u32 },
}

impl BadgeRule {
    pub fn is_satisfied(&self, index: &HistoryIndex) -> bool {
        match self {
            BadgeRule::AnyOf { parks } => parks.iter().any(|id| index.is_visited(id)),
            BadgeRule::AllOf { parks } => {
                !parks.is_empty() && parks.iter().all(|id| index.is_visited(id))
            }
            BadgeRule::AtLeastOf { parks, count } => {
                visited_in(parks, index) >= *count as usize
            }
            BadgeRule::CountAtLeast { count } => index.visited_count() >= *count as usize,
            BadgeRule::RepeatVisit { visits } => index.max_visit_count() >= *visits as usize,
        }
    }

    /// Parks backing the checklist view; empty for quantity rules.
    pub fn checklist(&self) -> &[String] {
        match self {
            BadgeRule::AnyOf { parks }
            | BadgeRule::AllOf { parks }
            | BadgeRule::AtLeastOf { parks, .. } => parks,
            BadgeRule::CountAtLeast { .. } | BadgeRule::RepeatVisit { .. } => &[],
        }
    }

    /// Numeric goal of a quantity rule.
    pub fn threshold(&self) -> Option<u32> {
        match self {
            BadgeRule::CountAtLeast { count } => Some(*count),
            BadgeRule::RepeatVisit { visits } => Some(*visits),
            _ => None,
        }
    }

    /// How many units the rule needs before it unlocks.
    pub fn required_matches(&self) -> usize {
        match self {
            BadgeRule::AnyOf { .. } => 1,
            BadgeRule::AllOf { parks } => parks.len(),
            BadgeRule::AtLeastOf { count, .. } => *count as usize,
            BadgeRule::CountAtLeast { count } => *count as usize,
            BadgeRule::RepeatVisit { visits } => *visits as usize,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            BadgeRule::AnyOf { parks } => format!("visit any of {} parks", parks.len()),
            BadgeRule::AllOf { parks } => format!("visit all {} parks", parks.len()),
            BadgeRule::AtLeastOf { parks, count } => {
                format!("visit {} of {} parks", count, parks.len())
            }
            BadgeRule::CountAtLeast { count } => format!("visit {} unique parks", count),
            BadgeRule::RepeatVisit { visits } => format!("visit one park {} times", visits),
        }
    }
}

fn visited_in(parks: &[String], index: &HistoryIndex) -> usize {
    parks.iter().filter(|id| index.is_visited(id)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::tests::history;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    const UTAH: [&str; 5] = ["arches", "bryce-canyon", "canyonlands", "capitol-reef", "zion"];

    #[test]
    fn all_of_flips_back_when_one_visit_is_removed() {
        let rule = BadgeRule::AllOf { parks: ids(&UTAH) };
        let mut h: Vec<_> = UTAH.iter().map(|id| history(id, &["2024-01-01"])).collect();
        assert!(rule.is_satisfied(&HistoryIndex::build(&h)));

        h[2].visits.clear();
        assert!(!rule.is_satisfied(&HistoryIndex::build(&h)));
    }

    #[test]
    fn all_of_with_empty_list_never_unlocks() {
        let rule = BadgeRule::AllOf { parks: Vec::new() };
        let idx = HistoryIndex::build(&[history("zion", &["2024-01-01"])]);
        assert!(!rule.is_satisfied(&idx));
    }

    #[test]
    fn any_of_needs_a_real_visit() {
        let rule = BadgeRule::AnyOf { parks: ids(&["grand-canyon", "zion"]) };
        assert!(!rule.is_satisfied(&HistoryIndex::build(&[history("zion", &[])])));
        assert!(rule.is_satisfied(&HistoryIndex::build(&[history("zion", &["2023-01-01"])])));
    }

    #[test]
    fn at_least_of_counts_only_listed_parks() {
        let rule = BadgeRule::AtLeastOf {
            parks: ids(&["american-samoa", "dry-tortugas", "isle-royale", "kobuk-valley"]),
            count: 3,
        };
        let mut h = vec![
            history("american-samoa", &["2024-01-01"]),
            history("isle-royale", &["2024-02-01"]),
            history("zion", &["2024-03-01"]),
        ];
        assert!(!rule.is_satisfied(&HistoryIndex::build(&h)));
        h.push(history("kobuk-valley", &["2024-04-01"]));
        assert!(rule.is_satisfied(&HistoryIndex::build(&h)));
    }

    #[test]
    fn count_threshold_is_monotonic() {
        let rule = BadgeRule::CountAtLeast { count: 3 };
        let all = ["acadia", "zion", "arches", "denali", "olympic"];
        let mut h = Vec::new();
        let mut was_unlocked = false;
        for id in all {
            h.push(history(id, &["2024-01-01"]));
            let now = rule.is_satisfied(&HistoryIndex::build(&h));
            assert!(now || !was_unlocked, "count badge re-locked after adding {}", id);
            was_unlocked = now;
        }
        assert!(was_unlocked);
    }

    #[test]
    fn repeat_visit_needs_one_park_not_many() {
        let rule = BadgeRule::RepeatVisit { visits: 3 };
        let spread = vec![
            history("acadia", &["2024-01-01"]),
            history("zion", &["2024-01-02"]),
            history("arches", &["2024-01-03"]),
        ];
        assert!(!rule.is_satisfied(&HistoryIndex::build(&spread)));

        let two = vec![history("yosemite", &["2024-01-01", "2025-01-01"])];
        assert!(!rule.is_satisfied(&HistoryIndex::build(&two)));

        let three = vec![history("yosemite", &["2024-01-01", "2025-01-01", "2025-08-13"])];
        assert!(rule.is_satisfied(&HistoryIndex::build(&three)));
    }

    #[test]
    fn rules_deserialize_from_tagged_json() {
        let r: BadgeRule =
            serde_json::from_str(r#"{"kind":"at_least_of","parks":["a","b","c"],"count":2}"#)
                .unwrap();
        assert_eq!(r.checklist().len(), 3);
        assert_eq!(r.required_matches(), 2);
        assert_eq!(r.threshold(), None);

        let r: BadgeRule = serde_json::from_str(r#"{"kind":"repeat_visit","visits":3}"#).unwrap();
        assert!(r.checklist().is_empty());
        assert_eq!(r.threshold(), Some(3));
    }
}
