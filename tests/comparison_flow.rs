use devpulse::models::asana::{AsanaSummary, Effort};
use devpulse::models::comparison::AlignmentStatus;
use devpulse::models::git::GitReport;
use devpulse::models::query::DeveloperFilter;
use devpulse::services::{reconciliation_service, rollup_service};
use serde_json::json;

/// Payloads shaped exactly like the backend responses, pushed through serde
/// and the full reconciliation path.
fn fixture() -> (GitReport, AsanaSummary, Vec<Effort>) {
    let git: GitReport = serde_json::from_value(json!({
        "commits": [
            {
                "developer": "Alice",
                "repo": "backend",
                "timestamp": 100,
                "added": 10,
                "deleted": 2,
                "files": 1,
                "message": "first",
                "link": "https://git.example/backend/1"
            },
            {
                "developer": "Alice",
                "repo": "frontend",
                "timestamp": 200,
                "added": 5,
                "deleted": 1,
                "files": 1,
                "message": "second",
                "link": "https://git.example/frontend/2"
            },
            {
                "developer": "Carol",
                "repo": "backend",
                "timestamp": 150,
                "added": 30,
                "deleted": 30,
                "files": 3,
                "message": "refactor",
                "link": "https://git.example/backend/3"
            }
        ],
        "count": 3
    }))
    .expect("git report parses");

    let summary: AsanaSummary = serde_json::from_value(json!({
        "developers": {
            "Alice": {
                "in_progress": [
                    {
                        "id": "t1",
                        "name": "Ship effort report",
                        "url": "https://asana.example/t1",
                        "assignee": "Alice",
                        "section": "Sprint 12",
                        "completed": false
                    }
                ],
                "done": [
                    {
                        "id": "t2",
                        "name": "Design review",
                        "url": "https://asana.example/t2",
                        "section": "Sprint 11",
                        "completed": true
                    }
                ]
            },
            "Bob": {
                "in_progress": [
                    {
                        "id": "t3",
                        "name": "Write docs",
                        "url": "https://asana.example/t3",
                        "completed": false
                    }
                ],
                "done": []
            }
        },
        "total_in_progress": 2,
        "total_done": 1
    }))
    .expect("summary parses");

    let efforts: Vec<Effort> = serde_json::from_value(json!([
        {
            "task_id": "t1",
            "task_name": "Ship effort report",
            "assignee": "Alice",
            "section": "Sprint 12",
            "time_spent_minutes": 150,
            "commit_count": 2,
            "lines_added": 15,
            "lines_deleted": 3,
            "analysis": "two focused sessions"
        }
    ]))
    .expect("efforts parse");

    (git, summary, efforts)
}

#[test]
fn reconciliation_over_wire_shaped_payloads() {
    let (git, summary, efforts) = fixture();
    let rows = reconciliation_service::comparison_rows(&summary, &git.commits, &efforts);

    assert_eq!(rows.len(), 3);

    // Score order: Alice's done task (4), Alice's in-progress task (2),
    // Bob's untouched task (1).
    assert_eq!(rows[0].task_id, "t2");
    assert_eq!(
        rows[0].completion_status,
        AlignmentStatus::CompletedWithCommits
    );
    assert_eq!(rows[1].task_id, "t1");
    assert_eq!(
        rows[1].completion_status,
        AlignmentStatus::InProgressWithCommits
    );
    assert_eq!(rows[2].task_id, "t3");
    assert_eq!(rows[2].completion_status, AlignmentStatus::NoActivity);

    // Alice's rows aggregate both of her commits, regardless of task.
    assert_eq!(rows[1].commits, 2);
    assert_eq!(rows[1].lines_added, 15);
    assert_eq!(rows[1].lines_deleted, 3);
    assert_eq!(rows[1].files_changed, 2);
    assert_eq!(rows[1].first_commit, Some(100));
    assert_eq!(rows[1].last_commit, Some(200));

    // 150 minutes rounds to 3 hours; estimated and actual always agree.
    assert_eq!(rows[1].estimated_hours, 3);
    assert_eq!(rows[1].actual_hours, rows[1].estimated_hours);

    // t2 has no effort record of its own but matches on assignee.
    assert_eq!(rows[0].estimated_hours, 3);

    // Missing assignee falls back to the developer key.
    assert_eq!(rows[2].assignee, "Bob");
    assert_eq!(rows[2].estimated_hours, 0);

    let counts = reconciliation_service::summarize(&rows);
    assert_eq!(counts.total_tasks, 3);
    assert_eq!(counts.completed_with_commits, 1);
    assert_eq!(counts.in_progress_with_commits, 1);
    assert_eq!(counts.no_activity, 1);
    assert_eq!(counts.completed_no_commits, 0);
}

#[test]
fn rollups_and_dropdown_from_the_same_payloads() {
    let (git, summary, _) = fixture();

    let rollups = rollup_service::developer_rollups(&git.commits, &DeveloperFilter::All);
    assert_eq!(rollups.len(), 2);
    assert_eq!(rollups[0].developer, "Alice");
    assert_eq!(rollups[0].commits, 2);
    assert_eq!(rollups[0].repos, 2);
    assert_eq!(rollups[0].last_commit, Some(200_000));
    assert_eq!(rollups[1].developer, "Carol");

    // Commit authors in feed order first, then Asana-only developers.
    let names = rollup_service::developer_names(&git.commits, &summary);
    assert_eq!(names, vec!["Alice", "Carol", "Bob"]);

    let tasks = rollup_service::flatten_tasks(&summary);
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].developer, "Alice");
    assert_eq!(tasks[0].task.id, "t1");
    assert_eq!(tasks[1].task.id, "t2");
    assert_eq!(tasks[2].developer, "Bob");
}
