use std::process::ExitCode;
use std::sync::Arc;

use devpulse::error::{AppError, AppResult};
use devpulse::models::query::{DateRange, DeveloperFilter};
use devpulse::services::backend_client::BackendClient;
use devpulse::services::fetch_service::{FetchCoordinator, FetchStatus};
use devpulse::services::{reconciliation_service, rollup_service, stats_service};
use devpulse::state::{DashboardSnapshot, DashboardState};
use devpulse::utils::logger;
use tracing::error;

struct CliArgs {
    range: DateRange,
    filter: DeveloperFilter,
    reload: bool,
}

fn parse_args() -> AppResult<CliArgs> {
    let mut dates: Vec<String> = Vec::new();
    let mut filter = DeveloperFilter::All;
    let mut reload = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--developer" => {
                let name = args
                    .next()
                    .ok_or_else(|| AppError::validation("--developer requires a name"))?;
                filter = DeveloperFilter::from_selection(&name);
            }
            "--reload" => reload = true,
            other if other.starts_with("--") => {
                return Err(AppError::validation(format!("unknown flag {other}")));
            }
            date => dates.push(date.to_string()),
        }
    }

    let range = match dates.len() {
        0 => DateRange::default(),
        2 => DateRange::parse(&dates[0], &dates[1])?,
        _ => {
            return Err(AppError::validation(
                "expected either no dates or START END (YYYY-MM-DD)",
            ))
        }
    };

    Ok(CliArgs {
        range,
        filter,
        reload,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = logger::init_logging(None) {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run(args).await {
        Ok(status) => match status {
            FetchStatus::Failed => ExitCode::FAILURE,
            _ => ExitCode::SUCCESS,
        },
        Err(err) => {
            error!(target: "app::fetch", error = %err, "dashboard run failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> AppResult<FetchStatus> {
    let client = Arc::new(BackendClient::from_env()?);
    let coordinator = FetchCoordinator::new(client);
    let state = DashboardState::new();

    let status = if args.reload {
        // Cache invalidation first, then the fetch; a reload failure
        // propagates without touching any data.
        let report = coordinator.reload_dashboard(&args.range).await?;
        let status = report.status();
        let generation = state.begin_fetch();
        state.commit(generation, report.into_snapshot(args.range));
        status
    } else {
        coordinator.refresh(&state, &args.range).await
    };

    let snapshot = state.snapshot();
    render(&snapshot, &args.filter);
    Ok(status)
}

fn render(snapshot: &DashboardSnapshot, filter: &DeveloperFilter) {
    println!(
        "Developer activity {} .. {}",
        snapshot.range.start_param(),
        snapshot.range.end_param()
    );

    if let Some(warning) = &snapshot.warning {
        println!("! {warning}");
    }

    let data = &snapshot.data;
    let cards = rollup_service::overview_cards(data);
    println!();
    println!(
        "Commits: {}   Tasks: {} ({} done, {} in progress, {}% complete)",
        cards.total_commits,
        cards.total_tasks,
        cards.completed_tasks,
        cards.in_progress_tasks,
        cards.completion_rate_percent
    );
    println!(
        "Developers: {}   Lines added: {}",
        cards.active_developers, cards.total_lines_added
    );

    let rollups = rollup_service::developer_rollups(&data.git_report.commits, filter);
    if rollups.is_empty() {
        println!("\nNo commit data available");
    } else {
        println!("\n{:<24} {:>7} {:>8} {:>8} {:>6} {:>6}", "Developer", "Commits", "Added", "Deleted", "Files", "Repos");
        for rollup in &rollups {
            println!(
                "{:<24} {:>7} {:>8} {:>8} {:>6} {:>6}",
                rollup.developer,
                rollup.commits,
                rollup.added,
                rollup.deleted,
                rollup.files,
                rollup.repos
            );
        }
    }

    for slice in stats_service::task_status_slices(&data.asana_summary) {
        println!("{}: {}", slice.label, slice.value);
    }

    if let Some(analytics) = &data.analytics {
        let performance = stats_service::developer_performance(analytics);
        if !performance.is_empty() {
            println!("\nPerformance (server analytics)");
            for perf in &performance {
                println!(
                    "  {}: {} done, {} in progress, {} commits",
                    perf.developer, perf.done, perf.in_progress, perf.commits
                );
            }
        }
    }

    let rows = reconciliation_service::comparison_rows(
        &data.asana_summary,
        &data.git_report.commits,
        &data.developer_efforts,
    );
    if rows.is_empty() {
        println!("\nNo comparison data available");
        return;
    }

    let summary = reconciliation_service::summarize(&rows);
    println!(
        "\nTask alignment: {} completed+coded, {} done without code, {} active, {} inactive",
        summary.completed_with_commits,
        summary.completed_no_commits,
        summary.in_progress_with_commits,
        summary.no_activity
    );
    for row in &rows {
        println!(
            "  [{}] {}: {} ({} commits, +{}/-{})",
            row.status_score,
            row.task_name,
            row.completion_status.display_label(),
            row.commits,
            row.lines_added,
            row.lines_deleted
        );
    }
}
