//! Then steps for tracker persistence BDD scenarios.

use super::world::TrackerWorld;
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskboard::tracker::{
    domain::TrackerDomainError,
    ports::StoreError,
    services::{CreateTaskRequest, TrackerError},
};

#[then("the new session has {users:usize} user with {projects:usize} project holding {tasks:usize} task")]
fn session_has_graph(
    world: &TrackerWorld,
    users: usize,
    projects: usize,
    tasks: usize,
) -> Result<(), eyre::Report> {
    let session = world
        .reloaded
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing reloaded session in scenario world"))?;
    let loaded_users = session.list_users();
    let loaded_projects: usize = loaded_users.iter().map(|user| user.projects().len()).sum();
    let loaded_tasks: usize = loaded_users
        .iter()
        .flat_map(|user| user.projects().iter())
        .map(|project| project.tasks().len())
        .sum();

    eyre::ensure!(
        loaded_users.len() == users,
        "expected {users} users, found {}",
        loaded_users.len()
    );
    eyre::ensure!(
        loaded_projects == projects,
        "expected {projects} projects, found {loaded_projects}"
    );
    eyre::ensure!(
        loaded_tasks == tasks,
        "expected {tasks} tasks, found {loaded_tasks}"
    );
    Ok(())
}

#[then("newly created tasks receive ids above the loaded ones")]
fn new_task_ids_exceed_loaded(world: &mut TrackerWorld) -> Result<(), eyre::Report> {
    let user = world
        .user
        .ok_or_else(|| eyre::eyre!("missing user in scenario world"))?;
    let project = world
        .project
        .ok_or_else(|| eyre::eyre!("missing project in scenario world"))?;
    let highest = world
        .tasks
        .iter()
        .max()
        .copied()
        .ok_or_else(|| eyre::eyre!("no tasks were created before the restart"))?;
    let session = world
        .reloaded
        .as_mut()
        .ok_or_else(|| eyre::eyre!("missing reloaded session in scenario world"))?;

    let created = session
        .create_task(
            user,
            project,
            CreateTaskRequest::new("QATask", "Follow-up", "", "Low", "smoke"),
        )
        .wrap_err("create task after restart")?;
    eyre::ensure!(
        created > highest,
        "task id {created} does not exceed loaded id {highest}"
    );
    Ok(())
}

#[then("the new session has no users")]
fn session_has_no_users(world: &TrackerWorld) -> Result<(), eyre::Report> {
    let result = world
        .load_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing load result in scenario world"))?;
    if let Err(err) = result {
        return Err(eyre::eyre!("unexpected load failure: {err}"));
    }
    let session = world
        .reloaded
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing reloaded session in scenario world"))?;
    eyre::ensure!(
        session.list_users().is_empty(),
        "expected no users after loading a missing document"
    );
    Ok(())
}

#[then("loading fails with an unknown task type error")]
fn loading_fails_with_unknown_type(world: &TrackerWorld) -> Result<(), eyre::Report> {
    let result = world
        .load_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing load result in scenario world"))?;
    if !matches!(
        result,
        Err(TrackerError::Store(StoreError::Domain(
            TrackerDomainError::UnknownTaskType(Some(_))
        )))
    ) {
        return Err(eyre::eyre!(
            "expected unknown task type error, got {result:?}"
        ));
    }
    Ok(())
}
