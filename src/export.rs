use crate::badges::BadgeReport;
use crate::error::CliError;
use crate::history::JournalEntry;
use std::fs;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

fn csv_escape(value: &str) -> String {
    if value.contains(['\n', '\r', '"', ',']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn to_csv_line(values: &[String]) -> String {
    values.iter().map(|v| csv_escape(v)).collect::<Vec<String>>().join(",")
}

pub fn visits_csv(entries: &[JournalEntry]) -> String {
    let mut lines = vec![to_csv_line(&[
        "park_id".to_string(),
        "park_name".to_string(),
        "date".to_string(),
        "rating".to_string(),
        "notes".to_string(),
    ])];
    for e in entries.iter() {
        lines.push(to_csv_line(&[
            e.park_id.clone(),
            e.park_name.clone(),
            e.date.clone(),
            e.rating.map(|r| r.value().to_string()).unwrap_or_default(),
            e.notes.clone(),
        ]));
    }
    lines.join("\n") + "\n"
}

pub fn badges_csv(reports: &[BadgeReport]) -> String {
    let mut lines = vec![to_csv_line(&[
        "id".to_string(),
        "name".to_string(),
        "unlocked".to_string(),
        "progress".to_string(),
    ])];
    for r in reports.iter() {
        lines.push(to_csv_line(&[
            r.id.clone(),
            r.name.clone(),
            r.is_unlocked.to_string(),
            r.progress.text().to_string(),
        ]));
    }
    lines.join("\n") + "\n"
}

fn write_private(path: &Path, data: &str) -> Result<(), CliError> {
    fs::write(path, data.as_bytes())
        .map_err(|e| CliError::io(format!("Export IO error: {}: {}", path.display(), e)))?;
    #[cfg(unix)]
    {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(())
}

pub fn export_csv_to_dir(
    out_dir: &str,
    entries: &[JournalEntry],
    reports: &[BadgeReport],
) -> Result<(), CliError> {
    let out_path = Path::new(out_dir);
    fs::create_dir_all(out_path)
        .map_err(|e| CliError::io(format!("Export IO error: {}: {}", out_dir, e)))?;

    write_private(&out_path.join("visits.csv"), &visits_csv(entries))?;
    write_private(&out_path.join("badges.csv"), &badges_csv(reports))?;
    log::info!("exported {} visits and {} badges to {}", entries.len(), reports.len(), out_dir);
    Ok(())
}

pub fn export_json_to_file(path: &str, data: &str) -> Result<(), CliError> {
    if let Some(dir) = Path::new(path).parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| CliError::io(format!("Export IO error: {}: {}", dir.display(), e)))?;
    }
    write_private(Path::new(path), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rating;

    fn entry(notes: &str, rating: Option<Rating>) -> JournalEntry {
        JournalEntry {
            park_id: "acadia".into(),
            park_name: "Acadia".into(),
            state: "ME".into(),
            date: "2025-10-13".into(),
            notes: notes.into(),
            rating,
        }
    }

    #[test]
    fn notes_with_commas_and_quotes_are_quoted() {
        let csv = visits_csv(&[entry("Lobster, \"wild\" caught", Some(Rating::Great))]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "park_id,park_name,date,rating,notes");
        assert_eq!(lines[1], "acadia,Acadia,2025-10-13,2,\"Lobster, \"\"wild\"\" caught\"");
    }

    #[test]
    fn rating_zero_is_written_and_missing_is_blank() {
        let csv = visits_csv(&[entry("", Some(Rating::LearnedALot)), entry("", None)]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], "acadia,Acadia,2025-10-13,0,");
        assert_eq!(lines[2], "acadia,Acadia,2025-10-13,,");
    }
}
