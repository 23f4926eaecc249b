//! Project deadline, update and task ownership tests.

use crate::tracker::domain::{
    DEFAULT_DEADLINE_DAYS, IdAllocator, NewProject, NewTask, Priority, Project, ProjectUpdate,
    Task, TaskId, TaskKind, TrackerDomainError,
};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};

/// Clock pinned to a single instant.
struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

fn instant(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 30, 0)
        .single()
        .expect("unambiguous instant")
}

fn launch_project(ids: &mut IdAllocator, clock: &DefaultClock) -> Project {
    Project::new(
        NewProject::new("Launch", "v1").with_deadline("2025-06-30"),
        ids,
        clock,
    )
    .expect("valid project")
}

fn qa_task(id: u64) -> NewTask {
    NewTask::new(
        TaskKind::Qa {
            test_type: "smoke".to_owned(),
        },
        "Smoke test",
        "",
        Priority::Medium,
    )
    .with_id(TaskId::new(id))
}

#[rstest]
#[case(instant(2025, 1, 1, 9), date(2025, 1, 31))]
#[case(instant(2024, 2, 15, 23), date(2024, 3, 16))]
#[case(instant(2025, 12, 10, 0), date(2026, 1, 9))]
fn missing_deadline_defaults_to_thirty_days_out(
    #[case] now: DateTime<Utc>,
    #[case] expected: NaiveDate,
) {
    let clock = FixedClock(now);
    let project = Project::new(
        NewProject::new("Launch", "v1"),
        &mut IdAllocator::new(),
        &clock,
    )
    .expect("valid project");

    assert_eq!(DEFAULT_DEADLINE_DAYS, 30);
    assert_eq!(project.deadline(), Some(expected));
}

#[rstest]
fn blank_deadline_text_counts_as_missing(clock: DefaultClock) {
    let project = Project::new(
        NewProject::new("Launch", "v1").with_deadline("  "),
        &mut IdAllocator::new(),
        &clock,
    )
    .expect("valid project");
    assert!(project.deadline().is_some());
}

#[rstest]
fn invalid_deadline_text_is_rejected(clock: DefaultClock) {
    let result = Project::new(
        NewProject::new("Launch", "v1").with_deadline("30/06/2025"),
        &mut IdAllocator::new(),
        &clock,
    );
    assert!(matches!(
        result,
        Err(TrackerDomainError::InvalidDeadline(text)) if text == "30/06/2025"
    ));
}

#[rstest]
#[case("2025-07-04")]
#[case("2025-07-04T18:30:00")]
#[case("2025-07-04 18:30:00.250")]
#[case("2025-07-04T18:30:00+02:00")]
fn set_deadline_accepts_iso_forms(clock: DefaultClock, #[case] input: &str) {
    let mut project = launch_project(&mut IdAllocator::new(), &clock);
    project.set_deadline(input).expect("ISO deadline");
    assert_eq!(project.deadline(), Some(date(2025, 7, 4)));
}

#[rstest]
fn set_deadline_accepts_dates(clock: DefaultClock) {
    let mut project = launch_project(&mut IdAllocator::new(), &clock);
    project.set_deadline(date(2026, 1, 15)).expect("date deadline");
    assert_eq!(project.to_dict().deadline.as_deref(), Some("2026-01-15"));
}

#[rstest]
fn update_project_skips_empty_values(clock: DefaultClock) {
    let mut project = launch_project(&mut IdAllocator::new(), &clock);
    project
        .update_project(
            ProjectUpdate::new()
                .with_name("")
                .with_description("v2")
                .with_deadline(""),
        )
        .expect("valid update");

    assert_eq!(project.name(), "Launch");
    assert_eq!(project.description(), "v2");
    assert_eq!(project.deadline(), Some(date(2025, 6, 30)));
}

#[rstest]
fn update_project_with_bad_deadline_changes_nothing(clock: DefaultClock) {
    let mut project = launch_project(&mut IdAllocator::new(), &clock);
    let result = project.update_project(
        ProjectUpdate::new()
            .with_name("Relaunch")
            .with_deadline("soon"),
    );

    assert_eq!(
        result,
        Err(TrackerDomainError::InvalidDeadline("soon".to_owned()))
    );
    assert_eq!(project.name(), "Launch");
}

#[rstest]
fn tasks_are_keyed_by_id_and_removal_is_a_no_op_when_absent(clock: DefaultClock) {
    let mut ids = IdAllocator::new();
    let mut project = launch_project(&mut ids, &clock);
    let first = Task::new(qa_task(1), &mut ids).expect("explicit id");
    let duplicate = Task::new(qa_task(1), &mut ids).expect("explicit id");
    let second = Task::new(qa_task(2), &mut ids).expect("explicit id");

    assert!(project.add_task(first.clone()));
    assert!(!project.add_task(duplicate));
    assert!(project.add_task(second));
    assert_eq!(project.tasks().len(), 2);

    assert_eq!(project.remove_task(&first), Some(first.clone()));
    assert_eq!(project.remove_task(&first), None);
    assert_eq!(project.remove_task_by_id(TaskId::new(99)), None);
    assert_eq!(project.tasks().len(), 1);
}

#[rstest]
fn to_dict_nests_tasks_and_formats_deadline(clock: DefaultClock) {
    let mut ids = IdAllocator::new();
    let mut project = launch_project(&mut ids, &clock);
    project.add_task(Task::new(qa_task(5), &mut ids).expect("explicit id"));

    let record = project.to_dict();
    assert_eq!(record.name.as_deref(), Some("Launch"));
    assert_eq!(record.deadline.as_deref(), Some("2025-06-30"));
    assert_eq!(record.tasks.len(), 1);
    assert_eq!(
        record.tasks.first().and_then(|task| task.test_type.as_deref()),
        Some("smoke")
    );
}

#[rstest]
fn describe_mentions_deadline_and_task_count(clock: DefaultClock) {
    let project = launch_project(&mut IdAllocator::new(), &clock);
    assert_eq!(project.describe(), "Launch - v1 - 2025-06-30 - 0 task(s)");
    assert_eq!(project.to_string(), "Launch - v1");
}
