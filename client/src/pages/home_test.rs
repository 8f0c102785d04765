use super::*;
use access::{Identity, Role, User};

fn signed_in(role: Role) -> Session {
    Session::signed_in(Identity {
        token: "tok".to_owned(),
        user: User { id: "1".to_owned(), name: "N".to_owned(), email: "n@example.com".to_owned(), role },
    })
}

#[test]
fn loading_session_stays_put() {
    assert_eq!(dashboard_home_target(&Session::default(), &RouteTable::default()), None);
}

#[test]
fn anonymous_session_goes_to_public_root() {
    assert_eq!(dashboard_home_target(&Session::signed_out(), &RouteTable::default()).as_deref(), Some("/"));
}

#[test]
fn each_role_lands_in_its_own_area() {
    let table = RouteTable::default();
    assert_eq!(dashboard_home_target(&signed_in(Role::Admin), &table).as_deref(), Some("/dashboard/admin"));
    assert_eq!(dashboard_home_target(&signed_in(Role::Cashier), &table).as_deref(), Some("/dashboard/cashier"));
    assert_eq!(dashboard_home_target(&signed_in(Role::Waiter), &table).as_deref(), Some("/dashboard/waiter"));
}
