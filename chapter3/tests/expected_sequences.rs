//! Known values of the SICP 3.5 streams, checked through the public API.

use proptest::prelude::*;
use sicp_chapter3::section_3_5::*;
use sicp_stream::Stream;

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-12, "expected {e}, got {a}");
    }
}

#[test]
fn primes_in_interval() {
    assert_eq!(
        prime_enumerate_interval(10, 30).to_vec(),
        vec![11, 13, 17, 19, 23, 29]
    );
    assert_eq!(
        prime_enumerate_interval(10_000, 40_000).reduce(0, |acc, p| acc + p),
        73_434_270
    );
    assert_eq!(delayed_lists::second_prime(10_000, 11_000), Ok(10_009));
}

#[test]
fn sieve_and_trial_division_agree() {
    assert_eq!(prime_sieve().take(100), primes().take(100));
    assert_eq!(primes().at(49), Ok(&229));
}

#[test]
fn square_root_guesses() {
    assert_close(
        &sqrt_stream(2.0).take(5).to_vec(),
        &[
            1.0,
            1.5,
            1.4166666666666665,
            1.4142156862745097,
            1.4142135623746899,
        ],
    );
}

#[test]
fn pi_series_and_acceleration() {
    assert_close(
        &pi_stream().take(3).to_vec(),
        &[4.0, 2.666666666666667, 3.466666666666667],
    );
    assert_close(
        &euler_transform(&pi_stream()).take(3).to_vec(),
        &[3.166666666666667, 3.1333333333333337, 3.1452380952380956],
    );
    assert_close(
        &accelerated_sequence(pi_stream(), euler_transform)
            .take(4)
            .to_vec(),
        &[4.0, 3.166666666666667, 3.142105263157895, 3.141599357319005],
    );
}

#[test]
fn pairs_with_prime_sums() {
    let pairs = pairs(&integers(), &integers()).select(|(i, j)| is_prime(i + j));
    assert_eq!(
        pairs.take(5).to_vec(),
        vec![(1, 1), (1, 2), (2, 3), (1, 4), (1, 6)]
    );
}

#[test]
fn exponential_by_integration() {
    let y = solve(|y| y, 1.0, 0.001).unwrap();
    assert!((y.at(1000).unwrap() - 2.716923932235896).abs() < 1e-9);
}

#[test]
fn no_sevens_prefix() {
    assert_eq!(
        no_sevens().take(10).to_vec(),
        vec![1, 2, 3, 4, 5, 6, 8, 9, 10, 11]
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn pairs_are_ordered_and_complete(n in 1u64..12) {
        // Every (i, j) with i <= j <= n shows up before 2^(n+1) pairs.
        let budget = 1usize << (n + 1);
        let seen = pairs(&integers(), &integers()).take(budget).to_vec();
        prop_assert!(seen.iter().all(|(i, j)| i <= j));
        for j in 1..=n {
            for i in 1..=j {
                prop_assert!(seen.contains(&(i, j)), "missing ({}, {})", i, j);
            }
        }
    }

    #[test]
    fn enumerate_interval_matches_range(low in 0u64..200, len in 0u64..50) {
        let high = low + len;
        let stream: Stream<u64> = delayed_lists::enumerate_interval(low, high);
        prop_assert_eq!(stream.to_vec(), (low..=high).collect::<Vec<_>>());
    }
}
