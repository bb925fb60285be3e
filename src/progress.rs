//! Display-ready progress for a single badge.
//!
//! List rules project a checklist in declared order. Quantity rules project
//! a counter against a target resolved from, in order: the badge's explicit
//! `display_target`, the rule's own threshold, and the first number in the
//! description text.

use crate::history::HistoryIndex;
use crate::model::{Badge, Park, UserParkHistory};
use crate::rules::BadgeRule;

#[derive(Debug, Clone, serde::Serialize)]
pub struct ChecklistItem {
    pub park_id: String,
    pub park_name: String,
    pub visited: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Progress {
    Checklist {
        items: Vec<ChecklistItem>,
        visited: usize,
        total: usize,
        text: String,
    },
    Quantity {
        current: usize,
        target: Option<u32>,
        text: String,
    },
}

impl Progress {
    pub fn text(&self) -> &str {
        match self {
            Progress::Checklist { text, .. } | Progress::Quantity { text, .. } => text,
        }
    }

    /// 0.0..=1.0, or None when there is nothing to measure against.
    pub fn fraction(&self) -> Option<f64> {
        match self {
            Progress::Checklist { visited, total, .. } => {
                if *total == 0 {
                    None
                } else {
                    Some(*visited as f64 / *total as f64)
                }
            }
            Progress::Quantity { current, target, .. } => match target {
                Some(t) if *t > 0 => Some((*current as f64 / *t as f64).min(1.0)),
                _ => None,
            },
        }
    }
}

/// First run of ASCII digits in `text`. Zero and overflow count as no target.
pub fn target_from_description(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

fn quantity_target(badge: &Badge) -> Option<u32> {
    badge
        .display_target
        .or_else(|| badge.rule.threshold())
        .or_else(|| target_from_description(&badge.description))
        .filter(|n| *n > 0)
}

pub fn project_with_index(badge: &Badge, index: &HistoryIndex, parks: &[Park]) -> Progress {
    let items: Vec<ChecklistItem> = badge
        .rule
        .checklist()
        .iter()
        .filter_map(|id| match parks.iter().find(|p| &p.id == id) {
            Some(p) => Some(ChecklistItem {
                park_id: p.id.clone(),
                park_name: p.name.clone(),
                visited: index.is_visited(&p.id),
            }),
            None => {
                log::debug!("badge {}: dropping unknown park {} from checklist", badge.id, id);
                None
            }
        })
        .collect();

    if !items.is_empty() {
        let visited = items.iter().filter(|c| c.visited).count();
        let total = items.len();
        return Progress::Checklist {
            items,
            visited,
            total,
            text: format!("{} / {} Parks", visited, total),
        };
    }

    let (current, unit) = match badge.rule {
        BadgeRule::RepeatVisit { .. } => (index.max_visit_count(), "Visits"),
        _ => (index.visited_count(), "Parks"),
    };
    let target = quantity_target(badge);
    let text = match target {
        Some(t) => format!("{} / {} {}", current.min(t as usize), t, unit),
        None => format!("{} Visited", current),
    };

    Progress::Quantity {
        current,
        target,
        text,
    }
}

pub fn project_progress(badge: &Badge, histories: &[UserParkHistory], parks: &[Park]) -> Progress {
    project_with_index(badge, &HistoryIndex::build(histories), parks)
}

/// Text bar for table output.
pub fn render_progress_bar(fraction: Option<f64>, width: usize) -> String {
    match fraction {
        None => "-".repeat(width),
        Some(f) => {
            let filled = (f.clamp(0.0, 1.0) * width as f64).round() as usize;
            let filled = filled.min(width);
            format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
        }
    }
}
