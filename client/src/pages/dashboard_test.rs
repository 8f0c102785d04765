use super::*;

#[test]
fn stat_cards_format_sales_with_two_decimals() {
    let stats = DashboardStats { total_sales: 1234.5, orders_today: 3, ..DashboardStats::default() };
    let cards = stat_cards(&stats);
    assert_eq!(cards[0], ("Sales", "1234.50".to_owned()));
    assert_eq!(cards[1], ("Orders today", "3".to_owned()));
    assert_eq!(cards.len(), 5);
}

#[test]
fn greeting_prefers_user_name() {
    assert_eq!(greeting("Ada", Role::Admin), "Welcome, Ada");
    assert_eq!(greeting("", Role::Waiter), "Welcome, Waiter");
}
