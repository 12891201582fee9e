use mortgage_core::amortization::{calculate, calculate_mortgage, calculate_with};
use mortgage_core::format::LoanDisplay;
use mortgage_core::{LoanInputs, MortgageError, TermPolicy};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Known-answer scenarios
// ===========================================================================

#[test]
fn test_thirty_year_six_percent_no_down_payment() {
    let inputs = LoanInputs::new(dec!(300000), dec!(6), Some(30));
    let result = calculate(&inputs).unwrap();

    assert_eq!(result.loan_amount, dec!(300000));
    assert_eq!(result.monthly_rate, dec!(0.005));
    assert_eq!(result.number_of_months, 360);
    assert!(
        (result.monthly_principal_and_interest - dec!(1798.65)).abs() < dec!(0.01),
        "Expected P&I ~1798.65, got {}",
        result.monthly_principal_and_interest
    );
    assert!((result.total_payments - dec!(647515)).abs() < dec!(1));
    assert!((result.total_interest - dec!(347515)).abs() < dec!(1));
}

#[test]
fn test_twenty_percent_down_payment() {
    let inputs = LoanInputs::new(dec!(300000), dec!(6), Some(30)).with_down_payment(dec!(60000));
    let result = calculate(&inputs).unwrap();

    assert_eq!(result.loan_amount, dec!(240000));
    assert!(
        (result.monthly_principal_and_interest - dec!(1438.92)).abs() < dec!(0.01),
        "Expected P&I ~1438.92, got {}",
        result.monthly_principal_and_interest
    );
}

#[test]
fn test_zero_rate_fifteen_years() {
    let inputs = LoanInputs::new(dec!(120000), dec!(0), Some(15));
    let result = calculate(&inputs).unwrap();

    assert_eq!(result.monthly_principal_and_interest, dec!(120000) / dec!(180));
    assert_eq!(result.monthly_principal_and_interest.round_dp(2), dec!(666.67));
    assert_eq!(result.total_interest, Decimal::ZERO);
}

#[test]
fn test_escrow_added_after_amortization() {
    let plain = calculate(&LoanInputs::new(dec!(300000), dec!(6), Some(30))).unwrap();
    let inputs = LoanInputs::new(dec!(300000), dec!(6), Some(30))
        .with_property_tax(dec!(3600))
        .with_insurance(dec!(1200));
    let result = calculate(&inputs).unwrap();

    assert_eq!(result.monthly_escrow, dec!(400));
    assert_eq!(
        result.monthly_principal_and_interest,
        plain.monthly_principal_and_interest
    );
    assert!((result.total_monthly_payment - dec!(2198.65)).abs() < dec!(0.01));
    // Escrow never feeds into interest
    assert_eq!(result.total_interest, plain.total_interest);
}

#[test]
fn test_all_escrow_components() {
    let inputs = LoanInputs::new(dec!(400000), dec!(7), Some(30))
        .with_property_tax(dec!(4800))
        .with_insurance(dec!(1500))
        .with_pmi(dec!(1200))
        .with_hoa(dec!(175));
    let result = calculate(&inputs).unwrap();
    // (4800 + 1500 + 1200) / 12 + 175 = 800
    assert_eq!(result.monthly_escrow, dec!(800));
    assert_eq!(
        result.total_monthly_payment,
        result.monthly_principal_and_interest + dec!(800)
    );
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_positive_rate_gives_positive_payment_and_interest() {
    let rates = [dec!(0.01), dec!(0.5), dec!(3.25), dec!(6), dec!(12.5), dec!(29.99)];
    let terms = [1u32, 5, 10, 15, 30, 40, 50];
    for rate in rates {
        for years in terms {
            let inputs = LoanInputs::new(dec!(250000), rate, Some(years));
            let result = calculate(&inputs).unwrap();
            assert!(
                result.monthly_principal_and_interest > Decimal::ZERO,
                "rate {rate} years {years}"
            );
            assert!(result.total_interest >= Decimal::ZERO, "rate {rate} years {years}");
        }
    }
}

#[test]
fn test_zero_rate_is_straight_line_for_any_term() {
    for years in [1u32, 7, 15, 30] {
        let inputs = LoanInputs::new(dec!(90000), Decimal::ZERO, Some(years));
        let result = calculate(&inputs).unwrap();
        let months = Decimal::from(years * 12);
        assert_eq!(result.monthly_principal_and_interest, dec!(90000) / months);
        assert_eq!(result.total_interest, Decimal::ZERO);
    }
}

#[test]
fn test_identical_inputs_identical_results() {
    let inputs = LoanInputs::new(dec!(512345.67), dec!(6.875), Some(25))
        .with_down_payment(dec!(102469.13))
        .with_property_tax(dec!(6200));
    let first = calculate(&inputs).unwrap();
    let second = calculate(&inputs).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_down_payment_monotonicity() {
    let price = dec!(300000);
    let mut previous = calculate(&LoanInputs::new(price, dec!(6), Some(30))).unwrap();

    for step in 1..30 {
        let down = Decimal::from(step * 10000);
        let inputs = LoanInputs::new(price, dec!(6), Some(30)).with_down_payment(down);
        let current = calculate(&inputs).unwrap();

        assert!(current.loan_amount < previous.loan_amount, "down {down}");
        assert!(
            current.monthly_principal_and_interest < previous.monthly_principal_and_interest,
            "down {down}"
        );
        assert!(current.total_interest < previous.total_interest, "down {down}");
        previous = current;
    }
}

#[test]
fn test_small_rate_long_term_precision() {
    // 0.05%/yr over 50 years: payment barely above straight-line
    let inputs = LoanInputs::new(dec!(600000), dec!(0.05), Some(50));
    let result = calculate(&inputs).unwrap();
    let straight_line = dec!(600000) / dec!(600);
    assert!(result.monthly_principal_and_interest > straight_line);
    // Roughly 1.25% of principal in total interest
    assert!(result.total_interest > dec!(7000) && result.total_interest < dec!(8000));
}

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn test_down_payment_equal_to_price_rejected() {
    let inputs = LoanInputs::new(dec!(300000), dec!(6), Some(30)).with_down_payment(dec!(300000));
    assert!(matches!(
        calculate(&inputs),
        Err(MortgageError::InvalidLoanAmount { .. })
    ));
}

#[test]
fn test_down_payment_above_price_rejected() {
    let inputs = LoanInputs::new(dec!(300000), dec!(6), Some(30)).with_down_payment(dec!(350000));
    match calculate(&inputs) {
        Err(MortgageError::InvalidLoanAmount { loan_amount }) => {
            assert_eq!(loan_amount, dec!(-50000))
        }
        other => panic!("expected InvalidLoanAmount, got {other:?}"),
    }
}

#[test]
fn test_zero_price_rejected() {
    let inputs = LoanInputs::new(Decimal::ZERO, dec!(6), Some(30));
    let err = calculate(&inputs).unwrap_err();
    assert_eq!(
        err.user_message(),
        "Please enter valid principal and interest rate values."
    );
}

#[test]
fn test_negative_price_is_invalid_input() {
    let inputs = LoanInputs::new(dec!(-250000), dec!(6), Some(30)).with_down_payment(dec!(0));
    match calculate(&inputs) {
        Err(MortgageError::InvalidInput { field, .. }) => assert_eq!(field, "property_price"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_unusable_term_defaults_to_thirty_years() {
    for term in [r#"-5"#, r#""abc""#, r#"12.5"#, r#"null"#, r#"0"#] {
        let json = format!(
            r#"{{"property_price": "300000", "down_payment": "60000",
                "annual_rate_percent": "6", "term_years": {term}}}"#
        );
        let inputs: LoanInputs = serde_json::from_str(&json).unwrap();
        let output = calculate_mortgage(&inputs, TermPolicy::default()).unwrap();
        assert_eq!(output.result.term_years, 30, "term {term}");
        assert_eq!(output.warnings.len(), 1, "term {term}");
        assert!(output.warnings[0].contains("defaulted to 30"));
    }
}

#[test]
fn test_unusable_term_still_fails_strict_policy() {
    let inputs: LoanInputs = serde_json::from_str(
        r#"{"property_price": 300000, "annual_rate_percent": 6, "term_years": -5}"#,
    )
    .unwrap();
    assert_eq!(inputs.term_years, None);
    assert!(matches!(
        calculate_with(&inputs, TermPolicy::Reject),
        Err(MortgageError::InvalidTerm { years: 0 })
    ));
}

#[test]
fn test_strict_term_policy() {
    let inputs = LoanInputs::new(dec!(300000), dec!(6), None);
    assert!(calculate(&inputs).is_ok());
    assert!(matches!(
        calculate_with(&inputs, TermPolicy::Reject),
        Err(MortgageError::InvalidTerm { .. })
    ));
}

// ===========================================================================
// Envelope and display
// ===========================================================================

#[test]
fn test_envelope_round_trips_inputs_from_json() {
    let inputs: LoanInputs = serde_json::from_str(
        r#"{"property_price": "300000", "annual_rate_percent": 6, "term_years": 30,
            "down_payment": 60000}"#,
    )
    .unwrap();
    let output = calculate_mortgage(&inputs, TermPolicy::default()).unwrap();
    assert_eq!(output.result.loan_amount, dec!(240000));
    assert!(output.warnings.is_empty());
}

#[test]
fn test_display_matches_site_format() {
    let inputs = LoanInputs::new(dec!(300000), dec!(6), Some(30))
        .with_property_tax(dec!(3600))
        .with_insurance(dec!(1200));
    let result = calculate(&inputs).unwrap();
    let display = LoanDisplay::from(&result);

    assert_eq!(display.monthly_payment, "2,198.65");
    assert_eq!(display.monthly_principal_and_interest, "1,798.65");
    assert_eq!(display.monthly_escrow, "400.00");
    assert_eq!(display.total_interest, "347,515");
    assert_eq!(display.months, 360);
    // Formatting leaves the numeric result untouched
    assert!(result.total_monthly_payment.scale() > 2);
}
