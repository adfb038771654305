use super::*;
use wire::User;

fn session_with(name: &str, role: Role) -> Session {
    Session {
        user: Some(User {
            id: "u1".to_owned(),
            email: "lead@example.com".to_owned(),
            name: name.to_owned(),
            role,
            team_id: Some("t1".to_owned()),
            profile_photo: None,
        }),
        access_token: Some("T".to_owned()),
        refresh_token: Some("R".to_owned()),
        is_authenticated: true,
    }
}

#[test]
fn initials_take_first_letters_of_two_words() {
    assert_eq!(initials("ada lovelace byron"), "AL");
    assert_eq!(initials("Mia"), "M");
    assert_eq!(initials("   "), "?");
}

#[test]
fn identity_reports_name_and_role_label() {
    let me = identity(&session_with("Tom Lee", Role::TeamLeader)).expect("identity");
    assert_eq!(me.name, "Tom Lee");
    assert_eq!(me.initials, "TL");
    assert_eq!(me.role, Role::TeamLeader.label());
}

#[test]
fn identity_is_absent_when_signed_out() {
    assert_eq!(identity(&Session::default()), None);
    let mut stale = session_with("Tom", Role::Admin);
    stale.is_authenticated = false;
    assert_eq!(identity(&stale), None);
}

#[test]
fn nav_links_follow_role_table() {
    assert!(nav_links(None).is_empty());
    let manager: Vec<_> = nav_links(Some(Role::Manager)).iter().map(|r| r.path).collect();
    assert_eq!(manager, vec!["/dashboard", "/tasks", "/submissions", "/teams", "/users"]);
}
