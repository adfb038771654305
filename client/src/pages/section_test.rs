use super::*;

#[test]
fn section_title_comes_from_route_table() {
    assert_eq!(section_title("/tasks"), "Tasks");
    assert_eq!(section_title("/teams/7"), "Teams");
    assert_eq!(section_title("/users/"), "Users");
}

#[test]
fn section_title_falls_back_for_unknown_paths() {
    assert_eq!(section_title("/nowhere"), "FieldOps");
}
