//! Identifier allocation and set-identity tests.

use crate::tracker::domain::{
    IdAllocator, IdKind, IdentitySet, NewProject, NewUser, Project, ProjectId, Registry,
    TrackerDomainError, User, UserId,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn ids() -> IdAllocator {
    IdAllocator::new()
}

fn project(ids: &mut IdAllocator, id: u64, name: &str, description: &str) -> Project {
    Project::new(
        NewProject::new(name, description).with_id(ProjectId::new(id)),
        ids,
        &DefaultClock,
    )
    .expect("valid project")
}

fn user(ids: &mut IdAllocator, id: u64, name: &str, email: &str) -> User {
    User::new(
        NewUser::new(name, "Doe", email).with_id(UserId::new(id)),
        ids,
    )
    .expect("explicit id")
}

#[rstest]
fn counters_are_independent_per_kind(mut ids: IdAllocator) {
    assert_eq!(ids.next(IdKind::User), Ok(1));
    assert_eq!(ids.next(IdKind::User), Ok(2));
    assert_eq!(ids.next(IdKind::Project), Ok(1));
    assert_eq!(ids.next(IdKind::Task), Ok(1));
}

#[rstest]
fn validate_raises_but_never_lowers(mut ids: IdAllocator) {
    ids.validate(IdKind::Project, 40);
    ids.validate(IdKind::Project, 12);
    assert_eq!(ids.last(IdKind::Project), 40);
    assert_eq!(ids.next(IdKind::Project), Ok(41));
    assert_eq!(ids.last(IdKind::User), 0);
}

#[rstest]
fn allocated_ids_exceed_everything_seen(mut ids: IdAllocator) {
    let mut seen = Vec::new();
    for candidate in [3, 17, 5] {
        ids.validate(IdKind::Task, candidate);
        seen.push(candidate);
        let issued = ids.next(IdKind::Task).expect("id available");
        assert!(seen.iter().all(|previous| issued > *previous));
        seen.push(issued);
    }
}

#[rstest]
#[case(IdKind::User)]
#[case(IdKind::Project)]
#[case(IdKind::Task)]
fn exhausted_counter_refuses_to_reissue(mut ids: IdAllocator, #[case] kind: IdKind) {
    ids.validate(kind, u64::MAX - 1);
    assert_eq!(ids.next(kind), Ok(u64::MAX));

    assert_eq!(ids.next(kind), Err(TrackerDomainError::IdSpaceExhausted(kind)));
    assert_eq!(ids.next(kind), Err(TrackerDomainError::IdSpaceExhausted(kind)));
    assert_eq!(ids.last(kind), u64::MAX);
}

#[rstest]
fn entities_need_a_fresh_id_only_when_none_is_given(mut ids: IdAllocator) {
    ids.validate(IdKind::User, u64::MAX);

    let fresh = User::new(NewUser::new("Bob", "Doe", "bob@example.com"), &mut ids);
    assert!(matches!(
        fresh,
        Err(TrackerDomainError::IdSpaceExhausted(IdKind::User))
    ));

    let explicit = user(&mut ids, 3, "Ada", "ada@example.com");
    assert_eq!(explicit.id(), UserId::new(3));
}

#[rstest]
fn projects_collide_on_name_and_description_regardless_of_id(mut ids: IdAllocator) {
    let mut set = IdentitySet::new();
    assert!(set.insert(project(&mut ids, 1, "Launch", "v1")));
    assert!(!set.insert(project(&mut ids, 2, "Launch", "v1")));
    assert!(set.insert(project(&mut ids, 3, "Launch", "v2")));

    assert_eq!(set.len(), 2);
    let kept = set.iter().next().map(Project::id);
    assert_eq!(kept, Some(ProjectId::new(1)));
}

#[rstest]
fn users_collide_on_email_and_name_with_different_ids(mut ids: IdAllocator) {
    let mut set = IdentitySet::new();
    assert!(set.insert(user(&mut ids, 1, "Ada", "ada@example.com")));
    assert!(!set.insert(user(&mut ids, 2, "Ada", "ada@example.com")));
    assert_eq!(set.len(), 1);
}

#[rstest]
fn users_with_the_same_id_collide_despite_other_fields(mut ids: IdAllocator) {
    let original = user(&mut ids, 4, "Ada", "ada@example.com");
    let impostor = user(&mut ids, 4, "Grace", "grace@example.com");
    let mut set: IdentitySet<User> = std::iter::once(original).collect();

    assert!(set.contains(&impostor));
    assert!(!set.insert(impostor));
}

#[rstest]
fn users_sharing_only_a_name_stay_distinct(mut ids: IdAllocator) {
    let set: IdentitySet<User> = [
        user(&mut ids, 1, "Ada", "ada@example.com"),
        user(&mut ids, 2, "Ada", "ada@work.example"),
    ]
    .into_iter()
    .collect();
    assert_eq!(set.len(), 2);
}

#[rstest]
fn registry_standalone_projects_share_project_identity() {
    let mut registry = Registry::new();
    let first = project(registry.ids_mut(), 1, "Docs", "site");
    let twin = project(registry.ids_mut(), 2, "Docs", "site");

    assert!(registry.add_project(first));
    assert!(!registry.add_project(twin.clone()));
    assert_eq!(registry.projects().len(), 1);

    let removed = registry.remove_project(&twin);
    assert_eq!(removed.map(|project| project.id()), Some(ProjectId::new(1)));
    assert!(registry.remove_project(&twin).is_none());
    assert!(registry.projects().is_empty());
}

#[rstest]
fn registry_users_are_found_and_removed_by_id() {
    let mut registry = Registry::new();
    let ada = user(registry.ids_mut(), 8, "Ada", "ada@example.com");
    registry.add_user(ada);

    assert!(registry.find_user(UserId::new(8)).is_some());
    assert!(registry.remove_user_by_id(UserId::new(9)).is_none());
    assert!(registry.remove_user_by_id(UserId::new(8)).is_some());
    assert!(registry.users().is_empty());
    assert_eq!(registry.ids().last(IdKind::User), 8);
}
