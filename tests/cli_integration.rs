use std::process::Command;

fn parkfolio_bin() -> &'static str {
    env!("CARGO_BIN_EXE_parkfolio")
}

fn run_parkfolio(args: &[&str], envs: &[(&str, &str)]) -> std::process::Output {
    let mut cmd = Command::new(parkfolio_bin());
    cmd.env_remove("PARKFOLIO_HISTORY").env_remove("NO_COLOR");
    cmd.args(args);
    for (k, v) in envs {
        cmd.env(k, v);
    }
    cmd.output().expect("failed to run parkfolio binary")
}

fn stdout_str(out: &std::process::Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

fn stderr_str(out: &std::process::Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

#[test]
fn table_views_over_a_small_journal() {
    let tmp = tempfile::tempdir().unwrap();
    let history_path = tmp.path().join("history.json");
    std::fs::write(
        &history_path,
        r#"{
  "version": 1,
  "histories": [
    { "park_id": "denali", "rating": 3, "visits": [{ "date": "2024-07-04", "notes": "Saw a grizzly" }] },
    { "park_id": "katmai", "visits": [{ "date": "2024-07-09" }] }
  ]
}"#,
    )
    .unwrap();
    let history = history_path.to_string_lossy().to_string();
    let global = ["--history", history.as_str(), "--no-color"];

    // 1) badge list: rookie unlocked, checklist text for the Alaska badge
    {
        let mut args: Vec<&str> = Vec::new();
        args.extend_from_slice(&global);
        args.push("badges");

        let out = run_parkfolio(&args, &[]);
        assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr_str(&out));
        let s = stdout_str(&out);
        assert!(!s.contains('\u{001b}'));
        let rookie = s.lines().find(|l| l.contains("ranger-rookie")).unwrap();
        assert!(rookie.starts_with("Unlocked"));
        let frontier = s.lines().find(|l| l.contains("the-last-frontier")).unwrap();
        assert!(frontier.starts_with("Locked"));
        assert!(frontier.contains("2 / 8 Parks"));
    }

    // 2) park detail with rating and notes
    {
        let mut args: Vec<&str> = Vec::new();
        args.extend_from_slice(&global);
        args.extend_from_slice(&["park", "denali"]);

        let out = run_parkfolio(&args, &[]);
        assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr_str(&out));
        let s = stdout_str(&out);
        assert!(s.contains("Rating: 3 Top Tier"));
        assert!(s.contains("Saw a grizzly"));
    }

    // 3) unvisited park detail
    {
        let mut args: Vec<&str> = Vec::new();
        args.extend_from_slice(&global);
        args.extend_from_slice(&["park", "acadia"]);

        let out = run_parkfolio(&args, &[]);
        assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr_str(&out));
        assert!(stdout_str(&out).contains("Not visited yet."));
    }

    // 4) --unlocked hides locked badges
    {
        let mut args: Vec<&str> = Vec::new();
        args.extend_from_slice(&global);
        args.extend_from_slice(&["badges", "--unlocked"]);

        let out = run_parkfolio(&args, &[]);
        assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr_str(&out));
        let s = stdout_str(&out);
        assert!(s.lines().skip(1).all(|l| l.starts_with("Unlocked")));
    }

    // 5) summary
    {
        let mut args: Vec<&str> = Vec::new();
        args.extend_from_slice(&global);
        args.push("summary");

        let out = run_parkfolio(&args, &[]);
        assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr_str(&out));
        let s = stdout_str(&out);
        assert!(s.contains("Parks visited: 2 / 63 (3%)"));
        assert!(s.contains("Total visits: 2"));
    }
}

#[test]
fn no_color_env_disables_ansi() {
    let out = run_parkfolio(&["badges"], &[("NO_COLOR", "1")]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr_str(&out));
    assert!(!stdout_str(&out).contains('\u{001b}'));

    let out = run_parkfolio(&["badges"], &[]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr_str(&out));
    assert!(stdout_str(&out).contains('\u{001b}'));
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let out = run_parkfolio(&["visit", "zion"], &[]);
    assert_eq!(out.status.code(), Some(2));
}
