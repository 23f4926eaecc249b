//! Given steps for tracker persistence BDD scenarios.

use super::world::TrackerWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::json;
use taskboard::tracker::services::{
    CreateProjectRequest, CreateTaskRequest, CreateUserRequest,
};

#[given(r#"a user "{name}" with email "{email}""#)]
fn a_user_with_email(
    world: &mut TrackerWorld,
    name: String,
    email: String,
) -> Result<(), eyre::Report> {
    let id = world
        .service
        .create_user(CreateUserRequest::new(name, "Tester", email))
        .wrap_err("create user for scenario")?;
    world.user = Some(id);
    Ok(())
}

#[given(r#"a project "{name}" owned by that user"#)]
fn a_project_owned_by_user(world: &mut TrackerWorld, name: String) -> Result<(), eyre::Report> {
    let user = world
        .user
        .ok_or_else(|| eyre::eyre!("missing user in scenario world"))?;
    let project = world
        .service
        .create_project(user, CreateProjectRequest::new(name, "scenario project"))
        .wrap_err("create project for scenario")?;
    world.project = Some(project);
    Ok(())
}

#[given(r#"a "{task_type}" named "{name}" with priority "{priority}" in that project"#)]
fn a_task_in_project(
    world: &mut TrackerWorld,
    task_type: String,
    name: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let user = world
        .user
        .ok_or_else(|| eyre::eyre!("missing user in scenario world"))?;
    let project = world
        .project
        .ok_or_else(|| eyre::eyre!("missing project in scenario world"))?;
    let task = world
        .service
        .create_task(
            user,
            project,
            CreateTaskRequest::new(task_type, name, "", priority, "Rust"),
        )
        .wrap_err("create task for scenario")?;
    world.tasks.push(task);
    Ok(())
}

#[given("no saved tracker data")]
fn no_saved_tracker_data(world: &mut TrackerWorld) -> Result<(), eyre::Report> {
    if world.data_path.exists() {
        return Err(eyre::eyre!("expected no document at {}", world.data_path));
    }
    Ok(())
}

#[given(r#"saved tracker data containing a task of type "{task_type}""#)]
fn saved_data_with_task_type(
    world: &mut TrackerWorld,
    task_type: String,
) -> Result<(), eyre::Report> {
    let document = json!([{
        "id": 1,
        "name": "Ada",
        "surname": "Tester",
        "email": "ada@example.com",
        "projects": [{
            "id": 1,
            "name": "Engine",
            "description": "",
            "deadline": null,
            "tasks": [{ "id": 1, "name": "Deploy", "_type": task_type, "priority": 2 }]
        }]
    }]);
    let parent = world
        .data_path
        .parent()
        .ok_or_else(|| eyre::eyre!("data path has no parent"))?;
    std::fs::create_dir_all(parent).wrap_err("create data directory")?;
    std::fs::write(&world.data_path, document.to_string()).wrap_err("write users document")?;
    Ok(())
}
