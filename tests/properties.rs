//! Property-based tests for the rate model.

use proptest::prelude::*;
use throttled_rate::{ensure_precision, Hit, Operand, Rate, PRECISION};

fn hit_strategy() -> impl Strategy<Value = Hit> {
    (0.0..1_000_000.0f64, -5i64..20).prop_map(|(time, cost)| Hit::new("", time, cost))
}

proptest! {
    #[test]
    fn prop_ratio_formula(hits in 0i64..1_000_000, interval in 0.0..10_000.0f64) {
        let rate = Rate::new(hits, interval);
        prop_assert_eq!(rate.ratio(), hits as f64 / interval.max(PRECISION));
    }

    #[test]
    fn prop_negative_hits_have_zero_ratio(hits in i64::MIN..0, interval in any::<f64>()) {
        prop_assert_eq!(Rate::new(hits, interval).ratio(), 0.0);
    }

    #[test]
    fn prop_ratio_finite_and_non_negative(hits in any::<i64>(), interval in any::<f64>()) {
        let ratio = Rate::new(hits, interval).ratio();
        prop_assert!(ratio.is_finite());
        prop_assert!(ratio >= 0.0);
    }

    #[test]
    fn prop_single_hit(hit in hit_strategy()) {
        let rate = Rate::from_hits([&hit]);
        prop_assert_eq!(rate.hits(), hit.cost());
        prop_assert_eq!(rate.interval(), 0.0);
        if hit.cost() > 0 {
            prop_assert_eq!(rate.ratio(), hit.cost() as f64 / PRECISION);
        }
    }

    #[test]
    fn prop_matches_three_pass_definition(hits in prop::collection::vec(hit_strategy(), 0..64)) {
        let cost: i64 = hits.iter().map(Hit::cost).sum();
        let interval = if cost > 0 {
            let latest = hits.iter().max_by(|a, b| a.cmp_time(b)).unwrap();
            let earliest = hits.iter().min_by(|a, b| a.cmp_time(b)).unwrap();
            ensure_precision(latest.time() - earliest.time())
        } else {
            0.0
        };

        let rate = Rate::from_hits(&hits);
        prop_assert_eq!(rate.hits(), cost);
        prop_assert_eq!(rate.interval(), interval);
        prop_assert_eq!(rate, Rate::new(cost, interval));
    }

    #[test]
    fn prop_order_does_not_matter(hits in prop::collection::vec(hit_strategy(), 0..32)) {
        let forward = Rate::from_hits(&hits);
        let backward = Rate::from_hits(hits.iter().rev());

        prop_assert_eq!(forward.hits(), backward.hits());
        prop_assert_eq!(forward.interval(), backward.interval());
    }

    #[test]
    fn prop_comparison_agrees_with_ratio(
        a in (0i64..1_000, 0.0..100.0f64),
        b in (0i64..1_000, 0.0..100.0f64),
    ) {
        let left = Rate::new(a.0, a.1);
        let right = Rate::new(b.0, b.1);

        prop_assert_eq!(left > right, left.ratio() > right.ratio());
        prop_assert_eq!(left < right, left.ratio() < right.ratio());
        prop_assert_eq!(left == right, left.ratio() == right.ratio());
        prop_assert_eq!(left.try_gt(right), Ok(left.ratio() > right.ratio()));
        prop_assert_eq!(left.try_eq(Operand::Number(right.ratio())), Ok(left == right));
    }
}
