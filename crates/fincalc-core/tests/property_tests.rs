use fincalc_core::{
    calculate_npv, calculate_pmt, round, FinancialInput, NpvInput, PaymentTiming, PmtInput,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn round_is_idempotent(x in -1e9f64..1e9, p in 0u32..=10) {
        let once = round(x, p);
        prop_assert_eq!(round(once, p), once);
    }

    #[test]
    fn round_is_symmetric(x in 0f64..1e6, p in 0u32..=10) {
        prop_assert_eq!(round(-x, p), -round(x, p));
    }

    #[test]
    fn round_stays_within_half_unit(x in -1e6f64..1e6, p in 0u32..=6) {
        let unit = 10f64.powi(-(p as i32));
        prop_assert!((round(x, p) - x).abs() <= unit / 2.0 + 1e-9);
    }

    #[test]
    fn npv_at_zero_rate_is_plain_sum(flows in prop::collection::vec(-1e4f64..1e4, 1..20)) {
        let input = NpvInput {
            base: FinancialInput::with_precision(1.0, 2),
            rate: 0.0,
            cash_flows: flows.clone(),
        };
        let sum: f64 = flows.iter().sum();
        prop_assert!((calculate_npv(&input).unwrap() - sum).abs() <= 0.005 + 1e-9);
    }

    #[test]
    fn pmt_ordinary_is_due_compounded_one_period(
        rate in 0.001f64..0.5,
        periods in 1i32..360,
        present_value in 1f64..1e6,
        precision in 2i32..=6,
    ) {
        let make = |timing| PmtInput {
            base: FinancialInput::with_precision(1.0, precision),
            rate,
            periods,
            present_value,
            future_value: None,
            timing: Some(timing),
        };
        let ordinary = calculate_pmt(&make(PaymentTiming::End)).unwrap();
        let due = calculate_pmt(&make(PaymentTiming::Beginning)).unwrap();

        let half_unit = 0.5 * 10f64.powi(-precision);
        let tolerance = half_unit * (2.0 + rate) + 1e-9 * ordinary.abs();
        prop_assert!(
            (ordinary - due * (1.0 + rate)).abs() <= tolerance,
            "ordinary {} due {} rate {}", ordinary, due, rate
        );
    }
}
