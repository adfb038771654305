use super::*;
use crate::state::{Transition, reduce};
use crate::test_helpers::user;

fn signed_in(role: Role) -> Session {
    reduce(
        &Session::default(),
        &Transition::Established(wire::SessionGrant {
            user: user("u1", role),
            access_token: "T".to_owned(),
            refresh_token: "R".to_owned(),
        }),
    )
}

#[test]
fn unauthenticated_is_sent_to_login() {
    let anon = Session::default();
    assert_eq!(evaluate("/tasks", &anon), GuardDecision::Redirect(LOGIN_PATH));
    assert_eq!(evaluate("/dashboard", &anon), GuardDecision::Redirect(LOGIN_PATH));
    assert_eq!(evaluate("/", &anon), GuardDecision::Redirect(LOGIN_PATH));
}

#[test]
fn unauthenticated_may_view_login() {
    assert_eq!(evaluate("/login", &Session::default()), GuardDecision::Render);
    assert_eq!(evaluate("/login/", &Session::default()), GuardDecision::Render);
}

#[test]
fn field_worker_cannot_open_users() {
    assert_eq!(evaluate("/users", &signed_in(Role::FieldWorker)), GuardDecision::Redirect(LANDING_PATH));
}

#[test]
fn admin_can_open_users() {
    assert_eq!(evaluate("/users", &signed_in(Role::Admin)), GuardDecision::Render);
}

#[test]
fn team_leader_can_open_teams_but_not_users() {
    let leader = signed_in(Role::TeamLeader);
    assert_eq!(evaluate("/teams", &leader), GuardDecision::Render);
    assert_eq!(evaluate("/users", &leader), GuardDecision::Redirect(LANDING_PATH));
}

#[test]
fn authenticated_on_login_or_root_goes_to_landing() {
    let manager = signed_in(Role::Manager);
    assert_eq!(evaluate("/login", &manager), GuardDecision::Redirect(LANDING_PATH));
    assert_eq!(evaluate("/", &manager), GuardDecision::Redirect(LANDING_PATH));
}

#[test]
fn nested_paths_inherit_parent_rule() {
    assert_eq!(evaluate("/users/42", &signed_in(Role::FieldWorker)), GuardDecision::Redirect(LANDING_PATH));
    assert_eq!(evaluate("/tasks/7?tab=photos", &signed_in(Role::FieldWorker)), GuardDecision::Render);
    assert!(rule_for("/usersettings").is_none());
}

#[test]
fn user_without_flag_is_treated_as_unauthenticated() {
    let mut session = signed_in(Role::Admin);
    session.is_authenticated = false;
    assert_eq!(evaluate("/users", &session), GuardDecision::Redirect(LOGIN_PATH));
}

#[test]
fn visible_routes_follow_role_sets() {
    let worker: Vec<_> = visible_routes(Role::FieldWorker).map(|r| r.path).collect();
    assert_eq!(worker, vec!["/dashboard", "/tasks", "/submissions"]);

    let admin = visible_routes(Role::Admin).count();
    assert_eq!(admin, ROUTES.len());
}
