use chrono::NaiveDate;
use fin_formulas::{irr, mirr, npv, xirr, xnpv, FinanceError};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual}"
    );
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn series_2016() -> (Vec<f64>, Vec<NaiveDate>) {
    (
        vec![-10_000.0, 2_000.0, 2_400.0, 2_900.0, 3_500.0, 4_100.0],
        vec![
            d(2016, 1, 1),
            d(2016, 2, 1),
            d(2016, 5, 1),
            d(2016, 7, 1),
            d(2016, 9, 1),
            d(2017, 1, 1),
        ],
    )
}

#[test]
fn npv_leaves_first_flow_undiscounted() {
    let result = npv(0.1, &[-10_000.0, 3_000.0, 4_200.0]).unwrap();
    let expected = -10_000.0 + 3_000.0 / 1.1 + 4_200.0 / 1.1_f64.powi(2);
    assert_close(result, expected, 1e-9);
}

#[test]
fn npv_with_leading_zero_discounts_from_period_one() {
    let result = npv(0.1, &[0.0, -10_000.0, 3_000.0, 4_200.0, 6_800.0]).unwrap();
    assert_close(result, 1_188.4434123352216, 1e-9);
}

#[test]
fn npv_of_empty_series_is_zero() {
    let v = npv(0.1, &[]).unwrap();
    assert_eq!(v, 0.0);
    assert!(v.is_sign_positive());
}

#[test]
fn irr_matches_reference_values() {
    assert_close(irr(&[-100.0, 39.0, 59.0, 55.0, 20.0]).unwrap(), 0.2809484211599611, 1e-9);

    let values = [-70_000.0, 12_000.0, 15_000.0, 18_000.0, 21_000.0, 26_000.0];
    assert_close(irr(&values).unwrap(), 0.08663094803653162, 1e-10);
}

#[test]
fn irr_requires_sign_change() {
    assert_eq!(irr(&[1.0, 2.0, 3.0]), Err(FinanceError::NoSolution));
    assert_eq!(irr(&[0.0, 100.0]), Err(FinanceError::NoSolution));
}

#[test]
fn irr_zeroes_npv() {
    let values = [-1_000.0, 300.0, 400.0, 400.0, 300.0];
    let r = irr(&values).unwrap();
    assert_close(npv(r, &values).unwrap(), 0.0, 1e-6);
}

#[test]
fn irr_picks_the_root_closest_to_zero() {
    // NPV vanishes at -5% and at 25%.
    assert_close(irr(&[80.0, -176.0, 95.0]).unwrap(), -0.05, 1e-12);
}

#[test]
fn irr_finds_roots_far_below_the_usual_seed() {
    let values = [-100.0, 1.0, 1.0, 1.0, 1.0, 1.0];
    let r = irr(&values).unwrap();
    assert_close(r, -0.5535003021309258, 1e-10);
    assert_close(npv(r, &values).unwrap(), 0.0, 1e-9);
}

#[test]
fn irr_ignores_leading_and_trailing_zero_flows() {
    let base = irr(&[-100.0, 39.0, 59.0, 55.0, 20.0]).unwrap();
    assert_close(irr(&[-100.0, 39.0, 59.0, 55.0, 20.0, 0.0]).unwrap(), base, 1e-12);
    // A leading zero shifts every flow one period later without changing the rate.
    assert_close(irr(&[0.0, -100.0, 39.0, 59.0, 55.0, 20.0]).unwrap(), base, 1e-12);
}

#[test]
fn mirr_matches_reference_value() {
    let result = mirr(&[-1_000.0, 300.0, 400.0, 400.0, 300.0], 0.12, 0.10).unwrap();
    assert_close(result, 0.12875502614825352, 1e-12);
}

#[test]
fn mirr_without_negative_leg_is_division_by_zero() {
    assert_eq!(mirr(&[0.0, 100.0], 0.1, 0.1), Err(FinanceError::DivisionByZero));
}

#[test]
fn xnpv_matches_reference_values() {
    let (values, dates) = series_2016();
    assert_close(xnpv(0.05, &values, &dates).unwrap(), 4_475.448794482614, 1e-9);

    let mut values = values;
    let mut dates = dates;
    values.push(5_300.0);
    dates.push(d(2017, 2, 3));
    assert_close(xnpv(0.05, &values, &dates).unwrap(), 9_500.179287007002, 1e-9);

    let values = [-1_000.0, 300.0, 400.0, 400.0, 300.0];
    let dates = [d(2011, 12, 1), d(2012, 1, 1), d(2013, 2, 1), d(2014, 3, 1), d(2015, 4, 1)];
    assert_close(xnpv(0.05, &values, &dates).unwrap(), 289.90172260419456, 1e-9);
}

#[test]
fn xnpv_rejects_mismatched_lengths() {
    assert_eq!(xnpv(0.05, &[-100.0], &[]), Err(FinanceError::ShapeMismatch));
    assert_eq!(
        xirr(&[-100.0], &[], None),
        Err(FinanceError::ShapeMismatch)
    );
}

#[test]
fn xnpv_rejects_unordered_dates() {
    let dates = [d(2016, 2, 1), d(2016, 1, 1)];
    assert_eq!(
        xnpv(0.05, &[-10_000.0, 2_000.0], &dates),
        Err(FinanceError::UnorderedDates)
    );
    assert_eq!(
        xirr(&[-100.0, 20.0], &[d(2016, 4, 1), d(2016, 1, 1)], None),
        Err(FinanceError::UnorderedDates)
    );
}

#[test]
fn xnpv_accepts_tied_dates() {
    let dates = [d(2016, 1, 1), d(2016, 1, 1), d(2017, 1, 1)];
    let result = xnpv(0.05, &[-100.0, 50.0, 60.0], &dates).unwrap();
    assert_close(result, 7.135219271486015, 1e-12);
}

#[test]
fn xnpv_of_empty_series_is_zero() {
    let v = xnpv(0.05, &[], &[]).unwrap();
    assert_eq!(v, 0.0);
    // Serialized results must read `0.0`, not `-0.0`.
    assert!(v.is_sign_positive());
}

#[test]
fn xirr_matches_reference_values() {
    let dates = [d(2016, 1, 1), d(2016, 4, 1), d(2016, 10, 1), d(2017, 2, 1)];
    let r = xirr(&[-100.0, 20.0, 40.0, 25.0], &dates, None).unwrap();
    assert_close(r, -0.19674386129832788, 1e-10);

    let dates = [
        d(2016, 1, 1),
        d(2016, 4, 1),
        d(2016, 10, 1),
        d(2017, 2, 1),
        d(2017, 3, 1),
        d(2017, 6, 1),
    ];
    let r = xirr(&[-100.0, 20.0, 40.0, 25.0, 8.0, 15.0], &dates, None).unwrap();
    assert_close(r, 0.09443907444452011, 1e-10);

    let dates = [d(2011, 12, 1), d(2012, 1, 1), d(2013, 2, 1), d(2014, 3, 1), d(2015, 4, 1)];
    let r = xirr(&[-1_000.0, 300.0, 400.0, 400.0, 300.0], &dates, Some(0.1)).unwrap();
    assert_close(r, 0.23860325587216993, 1e-10);
}

#[test]
fn xirr_and_xnpv_agree() {
    let values = [-10_000.0, 2_750.0, 4_250.0, 3_250.0, 2_750.0];
    let dates = [d(2008, 1, 1), d(2008, 3, 1), d(2008, 10, 30), d(2009, 2, 15), d(2009, 4, 1)];

    assert_close(xnpv(0.09, &values, &dates).unwrap(), 2_086.647602031535, 1e-9);

    let r = xirr(&values, &dates, None).unwrap();
    assert_close(r, 0.37336253351882864, 1e-10);
    assert_close(xnpv(r, &values, &dates).unwrap(), 0.0, 1e-6);
}

#[test]
fn xirr_without_root_does_not_converge() {
    let dates = [d(2016, 1, 1), d(2017, 1, 1)];
    assert!(matches!(
        xirr(&[0.0, 100.0], &dates, None),
        Err(FinanceError::NoConvergence { .. })
    ));
}

#[test]
fn xirr_is_deterministic() {
    let (values, dates) = series_2016();
    let first = xirr(&values, &dates, Some(0.2)).unwrap();
    for _ in 0..5 {
        assert_eq!(xirr(&values, &dates, Some(0.2)).unwrap(), first);
    }
}
