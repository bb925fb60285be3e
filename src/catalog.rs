use crate::error::CliError;
use crate::model::{Badge, Park, UserParkHistory};
use crate::progress::target_from_description;
use crate::rules::BadgeRule;
use std::collections::BTreeSet;

/// Resolve a selector to an index: exact id first, then a unique
/// case-insensitive prefix of the name or id.
fn select_index<T>(
    items: &[T],
    selector: &str,
    kind: &str,
    id_of: impl Fn(&T) -> &str,
    name_of: impl Fn(&T) -> &str,
) -> Result<usize, CliError> {
    let s = selector.trim();
    if s.is_empty() {
        return Err(CliError::usage(format!("{} selector is required", kind)));
    }

    if let Some(i) = items.iter().position(|it| id_of(it) == s) {
        return Ok(i);
    }

    let prefix = s.to_lowercase();
    let matches: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, it)| {
            name_of(it).to_lowercase().starts_with(&prefix) || id_of(it).starts_with(&prefix)
        })
        .map(|(i, _)| i)
        .collect();

    match matches.as_slice() {
        [] => Err(CliError::not_found(format!("{} not found: {}", kind, selector))),
        [only] => Ok(*only),
        many => {
            let candidates = many
                .iter()
                .map(|&i| format!("{} ({})", id_of(&items[i]), name_of(&items[i])))
                .collect::<Vec<String>>()
                .join(", ");
            Err(CliError::ambiguous(format!(
                "Ambiguous selector '{}'. Candidates: {}",
                selector, candidates
            )))
        }
    }
}

pub fn select_park<'a>(parks: &'a [Park], selector: &str) -> Result<&'a Park, CliError> {
    let i = select_index(parks, selector, "Park", |p| p.id.as_str(), |p| p.name.as_str())?;
    Ok(&parks[i])
}

pub fn select_badge<'a>(badges: &'a [Badge], selector: &str) -> Result<&'a Badge, CliError> {
    let i = select_index(badges, selector, "Badge", |b| b.id.as_str(), |b| b.name.as_str())?;
    Ok(&badges[i])
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LintFinding {
    pub subject: String,
    pub message: String,
}

impl LintFinding {
    fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// Cross-check catalogs and history for silent divergence. Never fails.
pub fn lint(parks: &[Park], badges: &[Badge], histories: &[UserParkHistory]) -> Vec<LintFinding> {
    let mut out: Vec<LintFinding> = Vec::new();

    let mut park_ids: BTreeSet<&str> = BTreeSet::new();
    for p in parks.iter() {
        if !park_ids.insert(p.id.as_str()) {
            out.push(LintFinding::new(&p.id, "duplicate park id"));
        }
    }

    let mut badge_ids: BTreeSet<&str> = BTreeSet::new();
    for b in badges.iter() {
        if !badge_ids.insert(b.id.as_str()) {
            out.push(LintFinding::new(&b.id, "duplicate badge id"));
        }

        for id in b.rule.checklist().iter() {
            if !park_ids.contains(id.as_str()) {
                out.push(LintFinding::new(&b.id, format!("rule names unknown park {}", id)));
            }
        }

        match &b.rule {
            BadgeRule::AtLeastOf { parks, count } if *count as usize > parks.len() => {
                out.push(LintFinding::new(
                    &b.id,
                    format!("needs {} parks but lists only {}", count, parks.len()),
                ));
            }
            BadgeRule::CountAtLeast { count: 0 } | BadgeRule::RepeatVisit { visits: 0 } => {
                out.push(LintFinding::new(&b.id, "threshold of 0 unlocks unconditionally"));
            }
            _ => {}
        }

        if let Some(n) = target_from_description(&b.description) {
            let goal = b
                .display_target
                .map(|t| t as usize)
                .unwrap_or_else(|| b.rule.required_matches());
            if n as usize != goal {
                out.push(LintFinding::new(
                    &b.id,
                    format!("description mentions {} but the rule needs {}", n, goal),
                ));
            }
        }
    }

    for h in histories.iter() {
        if !park_ids.contains(h.park_id.as_str()) {
            out.push(LintFinding::new(&h.park_id, "history references unknown park"));
        }
    }

    out
}
