use super::*;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn parse_accepts_plain_and_fractional_amounts() {
    assert_eq!(parse_cash_input("Opening cash", "100").unwrap(), dec("100"));
    assert_eq!(
        parse_cash_input("Opening cash", " 875.50 ").unwrap(),
        dec("875.50")
    );
}

#[test]
fn parse_rejects_missing_input() {
    let err = parse_cash_input("Opening cash", "").unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = parse_cash_input("Counted cash", "   ").unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn parse_rejects_garbage() {
    let err = parse_cash_input("Counted cash", "abc").unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn parse_has_no_range_check() {
    // Only parseability is validated; a negative float is the operator's call
    assert_eq!(parse_cash_input("Opening cash", "-5").unwrap(), dec("-5"));
}

#[test]
fn variance_shortage_scenario() {
    // opening 100, cash sales 875.50 => expected 975.50; counted 970 => -5.50
    let (expected, variance) = compute_variance_amounts(dec("100"), dec("875.50"), dec("970"));
    assert_eq!(expected, dec("975.50"));
    assert_eq!(variance, dec("-5.50"));
}

#[test]
fn variance_surplus_is_positive() {
    let (expected, variance) = compute_variance_amounts(dec("50"), dec("200"), dec("260"));
    assert_eq!(expected, dec("250"));
    assert_eq!(variance, dec("10"));
}

#[test]
fn variance_zero_when_counts_match() {
    let (_, variance) = compute_variance_amounts(dec("80"), dec("120.25"), dec("200.25"));
    assert_eq!(variance, Decimal::ZERO);
}
