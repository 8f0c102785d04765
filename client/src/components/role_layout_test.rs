use super::*;

#[test]
fn pending_placeholder_never_mentions_redirects() {
    assert!(!placeholder_message(&GateState::Pending).contains("Redirecting"));
}

#[test]
fn rejection_placeholders_are_non_empty() {
    let unauthorized = GateState::Unauthorized { redirect: "/".to_owned() };
    let wrong = GateState::WrongRole {
        required: Role::Admin,
        actual: Role::Waiter,
        redirect: "/dashboard/waiter".to_owned(),
    };
    assert!(!placeholder_message(&unauthorized).is_empty());
    assert!(!placeholder_message(&wrong).is_empty());
}
