mod badges;
mod catalog;
mod date;
mod discover;
mod error;
mod export;
mod history;
mod model;
mod output;
mod progress;
mod rules;
mod store;
mod summary;

use crate::badges::{build_report, evaluate_badges, evaluate_with_index, unlocked_first, BadgeReport};
use crate::catalog::{lint, select_badge, select_park};
use crate::date::validate_range;
use crate::discover::{filter_parks, recommend, ParkFilter, VisitStatus};
use crate::error::CliError;
use crate::export::{badges_csv, export_csv_to_dir, export_json_to_file, visits_csv};
use crate::history::{journal_entries, sorted_visits, HistoryIndex, JournalEntry};
use crate::model::{Badge, Journal, Park, Popularity, Rating, Region, Season};
use crate::output::{stable_json, Styler, Table};
use crate::progress::{render_progress_bar, Progress};
use crate::store::{bundled_badges, bundled_parks, read_history, resolve_history_source};
use crate::summary::build_summary;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "parkfolio", version, about = "US National Park visit tracker and badge collection")]
struct Cli {
    /// Visit history JSON file. Defaults to $PARKFOLIO_HISTORY, then the bundled demo journal.
    #[arg(long, global = true)]
    history: Option<String>,

    /// Output format. Most commands support table/json. `export` supports json/csv.
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: Format,

    /// Disables ANSI color output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List parks, optionally filtered.
    Parks(FilterArgs),
    /// Show one park with its visit log.
    Park(SelectorArgs),
    /// Badge collection, unlocked first.
    Badges(BadgesArgs),
    /// Show one badge with its checklist or counter.
    Badge(SelectorArgs),
    /// Every logged visit, newest first.
    Journal(JournalArgs),
    /// Shuffled park recommendations.
    Discover(DiscoverArgs),
    /// Collection overview.
    Summary,
    /// Cross-check catalogs and history for inconsistencies.
    Check,
    /// Export visits and badge progress.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct SelectorArgs {
    /// Exact id (zion) or unique name prefix (case-insensitive)
    selector: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum RegionArg {
    Alaska,
    #[value(alias = "West Coast")]
    WestCoast,
    Rockies,
    Southwest,
    Midwest,
    #[value(alias = "East Coast")]
    EastCoast,
    Tropical,
}

impl RegionArg {
    fn to_region(self) -> Region {
        match self {
            RegionArg::Alaska => Region::Alaska,
            RegionArg::WestCoast => Region::WestCoast,
            RegionArg::Rockies => Region::Rockies,
            RegionArg::Southwest => Region::Southwest,
            RegionArg::Midwest => Region::Midwest,
            RegionArg::EastCoast => Region::EastCoast,
            RegionArg::Tropical => Region::Tropical,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum SeasonArg {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl SeasonArg {
    fn to_season(self) -> Season {
        match self {
            SeasonArg::Spring => Season::Spring,
            SeasonArg::Summer => Season::Summer,
            SeasonArg::Fall => Season::Fall,
            SeasonArg::Winter => Season::Winter,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum PopularityArg {
    High,
    Medium,
    Low,
}

impl PopularityArg {
    fn to_popularity(self) -> Popularity {
        match self {
            PopularityArg::High => Popularity::High,
            PopularityArg::Medium => Popularity::Medium,
            PopularityArg::Low => Popularity::Low,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum StatusArg {
    All,
    Visited,
    Unvisited,
}

impl StatusArg {
    fn to_status(self) -> VisitStatus {
        match self {
            StatusArg::All => VisitStatus::All,
            StatusArg::Visited => VisitStatus::Visited,
            StatusArg::Unvisited => VisitStatus::Unvisited,
        }
    }
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Repeatable; a park matches any listed region
    #[arg(long, value_enum, ignore_case = true)]
    region: Vec<RegionArg>,

    /// Repeatable; a park matches if any of its best seasons is listed
    #[arg(long, value_enum, ignore_case = true)]
    season: Vec<SeasonArg>,

    /// Repeatable
    #[arg(long, value_enum, ignore_case = true)]
    popularity: Vec<PopularityArg>,

    #[arg(long, value_enum, default_value = "all")]
    status: StatusArg,
}

impl FilterArgs {
    fn to_filter(&self) -> ParkFilter {
        ParkFilter {
            regions: self.region.iter().map(|r| r.to_region()).collect(),
            seasons: self.season.iter().map(|s| s.to_season()).collect(),
            popularity: self.popularity.iter().map(|p| p.to_popularity()).collect(),
            status: self.status.to_status(),
        }
    }
}

#[derive(Args, Debug)]
struct BadgesArgs {
    /// Only unlocked badges
    #[arg(long, conflicts_with = "locked")]
    unlocked: bool,

    /// Only locked badges
    #[arg(long)]
    locked: bool,
}

#[derive(Args, Debug)]
struct JournalArgs {
    #[arg(long)]
    from: Option<String>,

    #[arg(long)]
    to: Option<String>,

    /// Restrict to one park (id or unique name prefix)
    #[arg(long)]
    park: Option<String>,
}

#[derive(Args, Debug)]
struct DiscoverArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Ignore every filter and draw from the whole catalog
    #[arg(long)]
    lucky: bool,

    /// Seed for a reproducible queue
    #[arg(long)]
    seed: Option<u64>,

    /// Integer >= 1
    #[arg(long, default_value_t = 5)]
    limit: usize,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// JSON: output file (stdout if omitted). CSV: output directory (required).
    #[arg(long)]
    out: Option<String>,
}

struct Context {
    parks: Vec<Park>,
    badges: Vec<Badge>,
    journal: Journal,
    index: HistoryIndex,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(c) => c,
        Err(e) => {
            let code = if e.use_stderr() { 2 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let exit = match run(cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", e);
            e.exit_code
        }
    };

    std::process::exit(exit);
}

fn print_line(s: &str) {
    println!("{}", s);
}

fn print_json<T: serde::Serialize>(obj: &T) -> Result<(), CliError> {
    let s = stable_json(obj)?;
    println!("{}", s);
    Ok(())
}

fn resolve_color_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    true
}

fn ensure_format_supported(format: Format, allow_csv: bool) -> Result<(), CliError> {
    if format == Format::Csv && !allow_csv {
        return Err(CliError::usage(
            "--format csv is only supported by `parkfolio export`",
        ));
    }
    Ok(())
}

fn load_context(history: Option<&str>) -> Result<Context, CliError> {
    let source = resolve_history_source(history);
    let journal = read_history(&source)?;
    let parks = bundled_parks()?.parks;
    let badges = bundled_badges()?.badges;
    let index = HistoryIndex::build(&journal.histories);
    log::debug!(
        "loaded {} history records from {} ({} parks visited)",
        journal.histories.len(),
        source.label(),
        index.visited_count()
    );
    Ok(Context {
        parks,
        badges,
        journal,
        index,
    })
}

fn rating_cell(rating: Option<Rating>) -> String {
    match rating {
        Some(r) => format!("{} {}", r.value(), r.label()),
        None => "-".to_string(),
    }
}

fn badge_reports(ctx: &Context) -> Vec<BadgeReport> {
    unlocked_first(evaluate_badges(&ctx.journal.histories, &ctx.parks, &ctx.badges))
        .iter()
        .map(|s| build_report(s, &ctx.journal.histories, &ctx.parks))
        .collect()
}

fn run(cli: Cli) -> Result<(), CliError> {
    let styler = Styler::new(resolve_color_enabled(cli.no_color));
    let ctx = load_context(cli.history.as_deref())?;

    match cli.command {
        Command::Parks(args) => {
            ensure_format_supported(cli.format, false)?;
            let parks = filter_parks(&ctx.parks, &ctx.index, &args.to_filter());

            if cli.format == Format::Json {
                #[derive(serde::Serialize)]
                struct Row<'a> {
                    #[serde(flatten)]
                    park: &'a Park,
                    visited: bool,
                    visit_count: usize,
                    rating: Option<Rating>,
                }
                #[derive(serde::Serialize)]
                struct Out<'a> {
                    parks: Vec<Row<'a>>,
                }
                let rows = parks
                    .iter()
                    .map(|p| Row {
                        park: *p,
                        visited: ctx.index.is_visited(&p.id),
                        visit_count: ctx.index.visit_count(&p.id),
                        rating: ctx.index.rating(&p.id),
                    })
                    .collect();
                print_json(&Out { parks: rows })?;
            } else {
                let mut table = Table::new(&["id", "name", "state", "region", "visits", "rating"]);
                for p in parks.iter() {
                    let visits = ctx.index.visit_count(&p.id);
                    table.row(vec![
                        p.id.clone(),
                        p.name.clone(),
                        p.state.clone(),
                        p.region.as_str().to_string(),
                        styler.flag(visits > 0, &visits.to_string(), "0"),
                        rating_cell(ctx.index.rating(&p.id)),
                    ]);
                }
                print_line(&table.render());
            }

            Ok(())
        }

        Command::Park(args) => {
            ensure_format_supported(cli.format, false)?;
            let park = select_park(&ctx.parks, &args.selector)?;
            let visits = sorted_visits(&ctx.journal.histories, &park.id);
            let rating = ctx.index.rating(&park.id);

            if cli.format == Format::Json {
                #[derive(serde::Serialize)]
                struct Out<'a> {
                    park: &'a Park,
                    visited: bool,
                    rating: Option<Rating>,
                    rating_label: Option<&'static str>,
                    visits: Vec<crate::model::VisitLog>,
                }
                print_json(&Out {
                    park,
                    visited: !visits.is_empty(),
                    rating,
                    rating_label: rating.map(|r| r.label()),
                    visits,
                })?;
            } else {
                print_line(&styler.bold(&format!("{} {} ({})", park.emoji, park.name, park.state)));
                print_line(&park.description);
                print_line(&format!("Established: {}", park.established));
                print_line(&format!(
                    "Region: {}  Best seasons: {}  Popularity: {}",
                    park.region.as_str(),
                    park.best_seasons.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", "),
                    park.popularity.as_str()
                ));
                if !park.fun_fact.is_empty() {
                    print_line(&format!("Fun fact: {}", park.fun_fact));
                }
                print_line("");

                if visits.is_empty() {
                    print_line(&styler.gray("Not visited yet."));
                } else {
                    if let Some(r) = rating {
                        print_line(&format!("Rating: {} ({})", rating_cell(Some(r)), r.meaning()));
                    }
                    let mut table = Table::new(&["date", "notes"]);
                    for v in visits.iter() {
                        let notes = if v.notes.is_empty() {
                            styler.gray("No notes recorded.")
                        } else {
                            v.notes.clone()
                        };
                        table.row(vec![v.date.clone(), notes]);
                    }
                    print_line(&table.render());
                }
            }

            Ok(())
        }

        Command::Badges(args) => {
            ensure_format_supported(cli.format, false)?;
            let reports: Vec<BadgeReport> = badge_reports(&ctx)
                .into_iter()
                .filter(|r| !args.unlocked || r.is_unlocked)
                .filter(|r| !args.locked || !r.is_unlocked)
                .collect();

            if cli.format == Format::Json {
                #[derive(serde::Serialize)]
                struct Out {
                    unlocked: usize,
                    total: usize,
                    badges: Vec<BadgeReport>,
                }
                print_json(&Out {
                    unlocked: reports.iter().filter(|r| r.is_unlocked).count(),
                    total: ctx.badges.len(),
                    badges: reports,
                })?;
            } else {
                let mut table = Table::new(&["status", "id", "name", "progress", ""]);
                for r in reports.iter() {
                    table.row(vec![
                        styler.flag(r.is_unlocked, "Unlocked", "Locked"),
                        r.id.clone(),
                        r.name.clone(),
                        r.progress.text().to_string(),
                        render_progress_bar(r.progress.fraction(), 10),
                    ]);
                }
                print_line(&table.render());
            }

            Ok(())
        }

        Command::Badge(args) => {
            ensure_format_supported(cli.format, false)?;
            let badge = select_badge(&ctx.badges, &args.selector)?;
            let statuses = evaluate_with_index(&ctx.index, std::slice::from_ref(badge));
            let report = build_report(&statuses[0], &ctx.journal.histories, &ctx.parks);

            if cli.format == Format::Json {
                #[derive(serde::Serialize)]
                struct Out {
                    badge: BadgeReport,
                }
                print_json(&Out { badge: report })?;
            } else {
                print_line(&styler.bold(&report.name));
                print_line(&report.description);
                print_line(&format!(
                    "Status: {}",
                    styler.flag(report.is_unlocked, "Unlocked!", "Locked")
                ));
                print_line(&format!(
                    "Progress: {}  {}",
                    report.progress.text(),
                    render_progress_bar(report.progress.fraction(), 20)
                ));
                if let Progress::Checklist { items, .. } = &report.progress {
                    print_line("");
                    let mut table = Table::new(&["", "park"]);
                    for item in items.iter() {
                        table.row(vec![
                            styler.flag(item.visited, "[x]", "[ ]"),
                            item.park_name.clone(),
                        ]);
                    }
                    print_line(&table.render());
                }
            }

            Ok(())
        }

        Command::Journal(args) => {
            ensure_format_supported(cli.format, false)?;
            let (from, to) = validate_range(args.from.as_deref(), args.to.as_deref())?;
            let park_id = match args.park.as_deref() {
                Some(sel) => Some(select_park(&ctx.parks, sel)?.id.clone()),
                None => None,
            };
            let entries = journal_entries(
                &ctx.journal.histories,
                &ctx.parks,
                from,
                to,
                park_id.as_deref(),
            );

            if cli.format == Format::Json {
                #[derive(serde::Serialize)]
                struct Out {
                    entries: Vec<JournalEntry>,
                }
                print_json(&Out { entries })?;
            } else if entries.is_empty() {
                print_line("No visits logged.");
            } else {
                let mut table = Table::new(&["date", "park", "rating", "notes"]);
                for e in entries.iter() {
                    table.row(vec![
                        e.date.clone(),
                        format!("{} ({})", e.park_name, e.state),
                        rating_cell(e.rating),
                        if e.notes.is_empty() {
                            styler.gray("No notes written...")
                        } else {
                            e.notes.clone()
                        },
                    ]);
                }
                print_line(&table.render());
            }

            Ok(())
        }

        Command::Discover(args) => {
            ensure_format_supported(cli.format, false)?;
            if args.limit < 1 {
                return Err(CliError::usage("Invalid limit"));
            }
            let mut rng = match args.seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };
            let queue = recommend(
                &ctx.parks,
                &ctx.index,
                &args.filter.to_filter(),
                args.lucky,
                &mut rng,
            );
            let picks: Vec<&Park> = queue.into_iter().take(args.limit).collect();

            if cli.format == Format::Json {
                #[derive(serde::Serialize)]
                struct Pick<'a> {
                    id: &'a str,
                    name: &'a str,
                    region: Region,
                    visited: bool,
                }
                #[derive(serde::Serialize)]
                struct Out<'a> {
                    recommendations: Vec<Pick<'a>>,
                }
                let recommendations = picks
                    .iter()
                    .map(|p| Pick {
                        id: &p.id,
                        name: &p.name,
                        region: p.region,
                        visited: ctx.index.is_visited(&p.id),
                    })
                    .collect();
                print_json(&Out { recommendations })?;
            } else if picks.is_empty() {
                print_line("No parks match these filters.");
            } else {
                let mut table = Table::new(&["#", "id", "name", "region", "status"]);
                for (i, p) in picks.iter().enumerate() {
                    table.row(vec![
                        (i + 1).to_string(),
                        p.id.clone(),
                        p.name.clone(),
                        p.region.as_str().to_string(),
                        styler.flag(ctx.index.is_visited(&p.id), "Visited", "New"),
                    ]);
                }
                print_line(&table.render());
            }

            Ok(())
        }

        Command::Summary => {
            ensure_format_supported(cli.format, false)?;
            let statuses = evaluate_with_index(&ctx.index, &ctx.badges);
            let summary = build_summary(&ctx.index, &ctx.parks, &statuses);

            if cli.format == Format::Json {
                print_json(&summary)?;
            } else {
                print_line(&format!(
                    "Parks visited: {} / {} ({}%)  {}",
                    summary.parks.visited,
                    summary.parks.total,
                    summary.parks.percent,
                    render_progress_bar(Some(summary.parks.percent as f64 / 100.0), 20)
                ));
                print_line(&format!("Total visits: {}", summary.parks.total_visits));
                if summary.parks.off_catalog > 0 {
                    print_line(&styler.gray(&format!(
                        "Visited ids not in the park catalog: {}",
                        summary.parks.off_catalog
                    )));
                }
                print_line(&format!(
                    "Badges unlocked: {} / {}",
                    summary.badges.unlocked, summary.badges.total
                ));
                print_line("");

                let mut ratings = Table::new(&["rating", "parks"]);
                for r in summary.ratings.iter() {
                    ratings.row(vec![rating_cell(Some(r.rating)), r.parks.to_string()]);
                }
                print_line(&ratings.render());
                print_line("");

                let mut regions = Table::new(&["region", "visited"]);
                for r in summary.regions.iter() {
                    regions.row(vec![r.region.clone(), format!("{} / {}", r.visited, r.total)]);
                }
                print_line(&regions.render());
            }

            Ok(())
        }

        Command::Check => {
            ensure_format_supported(cli.format, false)?;
            let findings = lint(&ctx.parks, &ctx.badges, &ctx.journal.histories);

            if cli.format == Format::Json {
                #[derive(serde::Serialize)]
                struct Out {
                    findings: Vec<crate::catalog::LintFinding>,
                }
                print_json(&Out { findings })?;
            } else {
                let mut table = Table::new(&["subject", "finding"]);
                for f in findings.iter() {
                    table.row(vec![f.subject.clone(), f.message.clone()]);
                }
                if table.is_empty() {
                    print_line("No findings.");
                } else {
                    print_line(&table.render());
                }
            }

            Ok(())
        }

        Command::Export(args) => {
            if cli.format == Format::Table {
                return Err(CliError::usage(
                    "`parkfolio export` requires --format json|csv",
                ));
            }

            let entries = journal_entries(&ctx.journal.histories, &ctx.parks, None, None, None);
            let reports = badge_reports(&ctx);

            if cli.format == Format::Json {
                #[derive(serde::Serialize)]
                struct Payload<'a> {
                    version: u32,
                    histories: &'a [crate::model::UserParkHistory],
                    badges: Vec<BadgeReport>,
                }
                let data = stable_json(&Payload {
                    version: 1,
                    histories: &ctx.journal.histories,
                    badges: reports,
                })? + "\n";

                match args.out.as_deref() {
                    Some(p) => export_json_to_file(p, &data)?,
                    None => print!("{}", data),
                }
            } else {
                match args.out.as_deref() {
                    Some(dir) => export_csv_to_dir(dir, &entries, &reports)?,
                    None => {
                        print!("{}", visits_csv(&entries));
                        print!("\n{}", badges_csv(&reports));
                    }
                }
            }

            Ok(())
        }
    }
}
