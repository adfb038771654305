use super::*;
use wire::User;

fn signed_in(role: Role, name: &str) -> Session {
    Session {
        user: Some(User {
            id: "u1".to_owned(),
            email: "worker@example.com".to_owned(),
            name: name.to_owned(),
            role,
            team_id: None,
            profile_photo: None,
        }),
        access_token: Some("T".to_owned()),
        refresh_token: Some("R".to_owned()),
        is_authenticated: true,
    }
}

#[test]
fn section_links_skip_landing_page() {
    let paths: Vec<_> = section_links(Role::Admin).iter().map(|rule| rule.path).collect();
    assert_eq!(paths, vec!["/tasks", "/submissions", "/teams", "/users"]);
}

#[test]
fn section_links_hide_management_pages_from_field_workers() {
    let paths: Vec<_> = section_links(Role::FieldWorker).iter().map(|rule| rule.path).collect();
    assert_eq!(paths, vec!["/tasks", "/submissions"]);
}

#[test]
fn team_leaders_see_teams_but_not_users() {
    let paths: Vec<_> = section_links(Role::TeamLeader).iter().map(|rule| rule.path).collect();
    assert!(paths.contains(&"/teams"));
    assert!(!paths.contains(&"/users"));
}

#[test]
fn greeting_uses_display_name_with_email_fallback() {
    assert_eq!(greeting(&signed_in(Role::Manager, "Mia")), "Welcome back, Mia");
    assert_eq!(greeting(&signed_in(Role::Manager, "  ")), "Welcome back, worker@example.com");
    assert_eq!(greeting(&Session::default()), "Welcome");
}
