use super::*;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn restock_adds_to_stock() {
    let t = transition(dec("10"), dec("100"), None, StockMutation::Restock(dec("5"))).unwrap();
    assert_eq!(t.new_stock, dec("15"));
    assert!(!t.low_stock_alert);
}

#[test]
fn consume_subtracts_from_stock() {
    let t = transition(dec("50"), dec("100"), None, StockMutation::Consume(dec("8"))).unwrap();
    assert_eq!(t.new_stock, dec("42"));
    assert!(!t.low_stock_alert);
}

#[test]
fn physical_count_overwrites_absolutely() {
    let t = transition(
        dec("50"),
        dec("100"),
        None,
        StockMutation::PhysicalCount(dec("73")),
    )
    .unwrap();
    assert_eq!(t.new_stock, dec("73"));
}

#[test]
fn consume_beyond_stock_is_rejected() {
    let err = transition(dec("5"), dec("100"), None, StockMutation::Consume(dec("6"))).unwrap_err();
    assert_eq!(
        err,
        StockError::NegativeStockRejected {
            attempted: dec("-1")
        }
    );
}

#[test]
fn negative_recount_is_rejected() {
    let err = transition(
        dec("5"),
        dec("100"),
        None,
        StockMutation::PhysicalCount(dec("-1")),
    )
    .unwrap_err();
    assert!(matches!(err, StockError::NegativeStockRejected { .. }));
}

#[test]
fn zero_and_negative_deltas_are_rejected() {
    assert_eq!(
        transition(dec("5"), dec("100"), None, StockMutation::Restock(dec("0"))).unwrap_err(),
        StockError::NonPositiveAmount(dec("0"))
    );
    assert_eq!(
        transition(dec("5"), dec("100"), None, StockMutation::Consume(dec("-2"))).unwrap_err(),
        StockError::NonPositiveAmount(dec("-2"))
    );
}

#[test]
fn consuming_to_exactly_zero_is_allowed() {
    let t = transition(dec("5"), dec("100"), None, StockMutation::Consume(dec("5"))).unwrap();
    assert_eq!(t.new_stock, Decimal::ZERO);
}

#[test]
fn alert_fires_on_downward_threshold_edge_only() {
    // stock 25, max 100, threshold 0.2 => alert level 20
    let first = transition(
        dec("25"),
        dec("100"),
        Some(dec("0.2")),
        StockMutation::Consume(dec("10")),
    )
    .unwrap();
    assert_eq!(first.new_stock, dec("15"));
    assert!(first.low_stock_alert);

    // already below: no second alert
    let second = transition(
        first.new_stock,
        dec("100"),
        Some(dec("0.2")),
        StockMutation::Consume(dec("1")),
    )
    .unwrap();
    assert_eq!(second.new_stock, dec("14"));
    assert!(!second.low_stock_alert);
}

#[test]
fn landing_exactly_on_threshold_fires() {
    let t = transition(
        dec("25"),
        dec("100"),
        Some(dec("0.2")),
        StockMutation::Consume(dec("5")),
    )
    .unwrap();
    assert_eq!(t.new_stock, dec("20"));
    assert!(t.low_stock_alert);
}

#[test]
fn restocking_above_threshold_fires_no_recovery_notice() {
    let t = transition(
        dec("10"),
        dec("100"),
        Some(dec("0.2")),
        StockMutation::Restock(dec("50")),
    )
    .unwrap();
    assert_eq!(t.new_stock, dec("60"));
    assert!(!t.low_stock_alert);
}

#[test]
fn default_threshold_is_one_fifth_of_max() {
    // max 50 => default alert level 10
    let t = transition(dec("11"), dec("50"), None, StockMutation::Consume(dec("1"))).unwrap();
    assert_eq!(t.new_stock, dec("10"));
    assert!(t.low_stock_alert);
}

#[test]
fn repeated_recount_is_idempotent_and_alerts_once() {
    // 30 -> 12 crosses the edge (alert level 20)
    let first = transition(
        dec("30"),
        dec("100"),
        Some(dec("0.2")),
        StockMutation::PhysicalCount(dec("12")),
    )
    .unwrap();
    assert_eq!(first.new_stock, dec("12"));
    assert!(first.low_stock_alert);

    // same recount again: same state, no further alert
    let second = transition(
        first.new_stock,
        dec("100"),
        Some(dec("0.2")),
        StockMutation::PhysicalCount(dec("12")),
    )
    .unwrap();
    assert_eq!(second.new_stock, dec("12"));
    assert!(!second.low_stock_alert);
}

#[test]
fn failed_mutation_reports_the_attempted_level() {
    let err = transition(
        dec("3"),
        dec("100"),
        None,
        StockMutation::Consume(dec("10")),
    )
    .unwrap_err();
    assert_eq!(
        err,
        StockError::NegativeStockRejected {
            attempted: dec("-7")
        }
    );
}
