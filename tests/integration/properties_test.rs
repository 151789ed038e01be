//! Behavioural properties of the labeling stages on synthetic paths

use crate::common::{random_walk, series, ts};
use approx::assert_abs_diff_eq;
use chrono::Duration;
use triple_barrier::filter::{CusumDirection, CusumFilter};
use triple_barrier::labeling::{
    define_events, generate_labels, label_of, resolve_barriers, vertical_barriers, BarrierParams,
    BarrierTouch, Event, EventId, Side, Sides,
};
use triple_barrier::model::VolatilityEstimator;
use triple_barrier::series::PriceSeries;
use triple_barrier::weights::{compute_weights, WeightOptions};

fn resolved_events(s: &PriceSeries, threshold: f64, horizon: Option<i64>) -> Vec<Event> {
    let times = CusumFilter::new(threshold).unwrap().filter(s);
    let volatility = VolatilityEstimator::new(20).unwrap().estimate(s);
    let deadlines = horizon.map(|m| vertical_barriers(s, &times, Duration::minutes(m)));
    let params = BarrierParams {
        profit_multiple: 1.5,
        loss_multiple: 1.0,
        min_return: 0.0,
    };
    let mut events = define_events(s, &times, &volatility, &params, deadlines.as_ref(), None).events;
    resolve_barriers(&mut events, s);
    events
}

#[test]
fn test_cusum_is_deterministic() {
    let s = series(&random_walk(2_000, 7, 0.01));
    let filter = CusumFilter::new(0.01).unwrap();
    assert_eq!(filter.detect(&s), filter.detect(&s));
}

#[test]
fn test_cusum_threshold_monotonicity() {
    for seed in [1, 2, 3, 4, 5] {
        let s = series(&random_walk(1_500, seed, 0.01));
        let counts: Vec<usize> = [0.002, 0.005, 0.01, 0.02, 0.05, 0.1]
            .iter()
            .map(|&h| CusumFilter::new(h).unwrap().filter(&s).len())
            .collect();
        assert!(
            counts.windows(2).all(|w| w[0] >= w[1]),
            "seed {}: {:?}",
            seed,
            counts
        );
    }
}

#[test]
fn test_cusum_hand_traced_scenario() {
    let s = series(&[100.0, 101.0, 99.0, 102.0, 95.0, 110.0]);
    let events = CusumFilter::new(0.02).unwrap().detect(&s);
    let got: Vec<_> = events.iter().map(|e| (e.time, e.direction)).collect();
    assert_eq!(
        got,
        vec![
            (ts(2), CusumDirection::Down),
            (ts(3), CusumDirection::Up),
            (ts(4), CusumDirection::Down),
            (ts(5), CusumDirection::Up),
        ]
    );
}

#[test]
fn test_barrier_resolution_soundness() {
    let s = series(&random_walk(1_000, 11, 0.01));
    let last = s.last_time().unwrap();

    for horizon in [None, Some(15)] {
        let events = resolved_events(&s, 0.01, horizon);
        assert!(!events.is_empty());

        for event in &events {
            let exit = event.exit.unwrap();
            let limit = event.deadline.filter(|d| *d <= last).unwrap_or(last);
            assert!(exit.time >= event.start && exit.time <= limit);

            let entry = s.price_at(event.start).unwrap();
            let ret = (s.price_asof(exit.time).unwrap() / entry - 1.0) * event.side.sign();
            match exit.touch {
                BarrierTouch::ProfitTake => assert!(ret > event.upper_level()),
                BarrierTouch::StopLoss => assert!(ret < event.lower_level()),
                BarrierTouch::VerticalBarrier => assert_eq!(Some(exit.time), event.deadline),
                BarrierTouch::EndOfSeries => assert_eq!(exit.time, last),
            }
            assert!(!exit.tie);
        }
    }
}

#[test]
fn test_profit_take_scenario() {
    // Path rises 6% within the window; target 5%
    let s = series(&[100.0, 102.0, 104.0, 106.0, 103.0]);
    let mut events = vec![Event {
        id: EventId(0),
        start: ts(0),
        target: 0.05,
        side: Side::Long,
        profit_multiple: 1.0,
        loss_multiple: 1.0,
        deadline: Some(ts(4)),
        exit: None,
    }];
    resolve_barriers(&mut events, &s);

    let exit = events[0].exit.unwrap();
    assert_eq!(exit.time, ts(3));
    assert_eq!(exit.touch, BarrierTouch::ProfitTake);

    let bins = generate_labels(&events, &s);
    assert_eq!(bins[0].label, 1);
    assert_abs_diff_eq!(bins[0].ret, 0.06, epsilon = 1e-12);
}

#[test]
fn test_label_sign_and_short_side() {
    let s = series(&[100.0, 99.0, 97.0, 95.0, 94.0, 92.0, 93.0]);
    let times = vec![ts(2), ts(3), ts(4)];
    let volatility = VolatilityEstimator::new(3).unwrap().estimate(&s);
    let sides: Sides = times.iter().map(|t| (*t, Side::Short)).collect();
    let params = BarrierParams {
        profit_multiple: 1.0,
        loss_multiple: 1.0,
        min_return: 0.0,
    };

    let mut events = define_events(&s, &times, &volatility, &params, None, Some(&sides)).events;
    assert_eq!(events.len(), 3);
    resolve_barriers(&mut events, &s);

    for bin in generate_labels(&events, &s) {
        assert_eq!(bin.label, label_of(bin.ret));
        // Falling prices pay the short side
        if bin.exit_time > bin.start {
            assert!(bin.ret > 0.0, "{:?}", bin);
            assert_eq!(bin.label, 1);
        }
    }
}

#[test]
fn test_weights_normalise_and_uniqueness_bounds() {
    for seed in [21, 22, 23] {
        let s = series(&random_walk(800, seed, 0.01));
        let events = resolved_events(&s, 0.008, Some(30));
        let weights = compute_weights(&events, &s, &WeightOptions::default());

        assert_eq!(weights.len(), events.len());
        let total: f64 = weights.iter().map(|w| w.weight).sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
        for w in &weights {
            assert!(w.weight >= 0.0);
            assert!(w.average_uniqueness > 0.0 && w.average_uniqueness <= 1.0);
        }
    }
}

#[test]
fn test_fully_overlapping_events_are_half_unique() {
    let s = series(&[100.0, 101.0, 102.0, 101.0, 103.0, 104.0]);
    let event = |id| Event {
        id: EventId(id),
        start: ts(1),
        target: 0.5,
        side: Side::Long,
        profit_multiple: 1.0,
        loss_multiple: 1.0,
        deadline: Some(ts(4)),
        exit: None,
    };
    let mut events = vec![event(0), event(1)];
    resolve_barriers(&mut events, &s);

    let weights = compute_weights(&events, &s, &WeightOptions::default());
    for w in &weights {
        assert_abs_diff_eq!(w.average_uniqueness, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(w.weight, 0.5, epsilon = 1e-12);
    }
}

#[test]
fn test_decay_keeps_newest_and_non_negative() {
    let s = series(&random_walk(600, 31, 0.01));
    let events = resolved_events(&s, 0.01, Some(20));
    let plain = compute_weights(&events, &s, &WeightOptions::default());

    for oldest_weight in [0.5, 0.0, -0.5] {
        let decayed = compute_weights(&events, &s, &WeightOptions { oldest_weight });
        assert_eq!(decayed.len(), plain.len());
        assert!(decayed.iter().all(|w| w.weight >= 0.0));
        let newest = plain.len() - 1;
        assert_abs_diff_eq!(decayed[newest].weight, plain[newest].weight, epsilon = 1e-12);
        for (d, p) in decayed.iter().zip(&plain) {
            assert!(d.weight <= p.weight + 1e-12);
        }
    }
}
