//! When steps for tracker persistence BDD scenarios.

use super::world::{TrackerWorld, new_session};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the tracker data is saved and loaded into a new session")]
fn save_and_reload(world: &mut TrackerWorld) -> Result<(), eyre::Report> {
    world.service.save_data().wrap_err("save tracker data")?;
    restart(world);
    Ok(())
}

#[when("the tracker data is loaded into a new session")]
fn load_into_new_session(world: &mut TrackerWorld) {
    restart(world);
}

fn restart(world: &mut TrackerWorld) {
    let mut session = new_session(&world.data_path);
    world.load_result = Some(session.load_data());
    world.reloaded = Some(session);
}
