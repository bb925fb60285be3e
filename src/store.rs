use crate::error::CliError;
use crate::model::{Journal, ParkCatalog, BadgeCatalog};
use serde::de::DeserializeOwned;
use std::fs;

const BUNDLED_PARKS: &str = include_str!("../data/parks.json");
const BUNDLED_BADGES: &str = include_str!("../data/badges.json");
const BUNDLED_HISTORY: &str = include_str!("../data/demo_history.json");

pub const HISTORY_ENV: &str = "PARKFOLIO_HISTORY";

/// Where the visit history comes from for this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistorySource {
    Bundled,
    File(String),
}

impl HistorySource {
    pub fn label(&self) -> &str {
        match self {
            HistorySource::Bundled => "bundled demo history",
            HistorySource::File(p) => p.as_str(),
        }
    }
}

pub fn resolve_history_source(cli_path: Option<&str>) -> HistorySource {
    if let Some(p) = cli_path.map(|s| s.trim()).filter(|s| !s.is_empty()) {
        return HistorySource::File(p.to_string());
    }

    if let Ok(p) = std::env::var(HISTORY_ENV) {
        let p = p.trim().to_string();
        if !p.is_empty() {
            return HistorySource::File(p);
        }
    }

    HistorySource::Bundled
}

fn parse_document<T: DeserializeOwned>(what: &str, txt: &str) -> Result<T, CliError> {
    serde_json::from_str(txt).map_err(|e| CliError::corrupted(what, e))
}

fn validate_version(what: &str, version: u32) -> Result<(), CliError> {
    if version != 1 {
        return Err(CliError::corrupted(
            what,
            format!("unsupported version {}", version),
        ));
    }
    Ok(())
}

pub fn parse_history(txt: &str) -> Result<Journal, CliError> {
    let journal: Journal = parse_document("History", txt)?;
    validate_version("History", journal.version)?;
    for h in journal.histories.iter() {
        if h.park_id.trim().is_empty() {
            return Err(CliError::corrupted("History", "record without park_id"));
        }
        if h.visits.is_empty() {
            log::debug!("history record for {} has no visits; not counted as visited", h.park_id);
        }
        for v in h.visits.iter() {
            if crate::date::parse_visit_date(&v.date).is_none() {
                log::warn!("visit to {} has unparsable date {:?}", h.park_id, v.date);
            }
        }
    }
    Ok(journal)
}

pub fn read_history(source: &HistorySource) -> Result<Journal, CliError> {
    match source {
        HistorySource::Bundled => bundled_history(),
        HistorySource::File(path) => match fs::read_to_string(path) {
            Ok(txt) => {
                log::info!("loading history from {}", path);
                parse_history(&txt)
            }
            Err(e) => {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Err(CliError::not_found(format!("History file not found: {}", path)))
                } else {
                    Err(CliError::io(format!("History IO error: {}", e)))
                }
            }
        },
    }
}

pub fn bundled_history() -> Result<Journal, CliError> {
    parse_history(BUNDLED_HISTORY)
}

pub fn bundled_parks() -> Result<ParkCatalog, CliError> {
    let catalog: ParkCatalog = parse_document("Park catalog", BUNDLED_PARKS)?;
    validate_version("Park catalog", catalog.version)?;
    Ok(catalog)
}

pub fn bundled_badges() -> Result<BadgeCatalog, CliError> {
    let catalog: BadgeCatalog = parse_document("Badge catalog", BUNDLED_BADGES)?;
    validate_version("Badge catalog", catalog.version)?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryIndex;

    #[test]
    fn bundled_catalogs_parse() {
        let parks = bundled_parks().unwrap().parks;
        let badges = bundled_badges().unwrap().badges;
        assert_eq!(parks.len(), 63);
        assert_eq!(badges.len(), 30);
        assert_eq!(badges[0].id, "ranger-rookie");
    }

    #[test]
    fn bundled_history_matches_demo_journal() {
        let journal = read_history(&HistorySource::Bundled).unwrap();
        let idx = HistoryIndex::build(&journal.histories);
        assert_eq!(idx.visited_count(), 35);
        assert_eq!(idx.visit_count("yosemite"), 3);
    }

    #[test]
    fn cli_path_beats_default() {
        assert_eq!(
            resolve_history_source(Some(" /tmp/h.json ")),
            HistorySource::File("/tmp/h.json".to_string())
        );
    }

    #[test]
    fn unsupported_version_is_corruption() {
        let err = parse_history(r#"{"version":2,"histories":[]}"#).unwrap_err();
        assert_eq!(err.exit_code, 5);
        assert!(err.message.contains("History corrupted"));
    }

    #[test]
    fn blank_park_id_is_corruption() {
        let err = parse_history(r#"{"version":1,"histories":[{"park_id":" ","visits":[]}]}"#)
            .unwrap_err();
        assert_eq!(err.exit_code, 5);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = read_history(&HistorySource::File(path.to_string_lossy().to_string())).unwrap_err();
        assert_eq!(err.exit_code, 3);
    }
}
