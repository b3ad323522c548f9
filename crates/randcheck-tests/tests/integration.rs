//! Integration tests for randcheck-tests.
//!
//! These exercise the public surface end to end:
//! construction → cached hypothesis tests → fingerprints → report.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use randcheck_tests::{RandomnessError, RandomnessTester, ReportConfig};

/// Pseudo-random bytes (simple LCG) widened to samples.
fn pseudo_random(n: usize) -> Vec<i64> {
    let mut data = Vec::with_capacity(n);
    let mut state: u64 = 0xDEAD_BEEF_CAFE_BABE;
    for _ in 0..n {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        data.push(((state >> 33) as u8) as i64);
    }
    data
}

fn seeded_samples(seed: u64, n: usize, max: i64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(0..=max)).collect()
}

#[test]
fn random_bytes_pass_sixteen_bin_chi_square() {
    let tester = RandomnessTester::new(&pseudo_random(2048), 0, 255).unwrap();
    let (statistic, p, passed) = tester.chi_square_verdict(16, 0.05);
    assert!(passed, "chi2={statistic} p={p}");
    assert!(p > 0.05);
    assert!(tester.ks_passes(0.05));
    assert!(tester.runs_passes(0.05));
    let ac = tester.autocorrelation(1).unwrap();
    assert!(ac.abs() < 0.2, "Autocorrelation too high: {ac}");
    assert!(tester.longest_repeat_run() < 10);
}

#[test]
fn constant_sequence_fails_chi_square() {
    let tester = RandomnessTester::new(&[200; 100], 0, 255).unwrap();
    let outcome = tester.chi_square(16);
    assert!(outcome.p_value < 1e-10, "p={}", outcome.p_value);
    assert!(!outcome.passes(0.05));
    assert_eq!(tester.longest_repeat_run(), 100);
    assert!(!tester.ks_passes(0.05));
    assert!(!tester.runs_passes(0.05));
}

#[test]
fn construction_errors() {
    assert!(matches!(
        RandomnessTester::new(&[], 0, 255),
        Err(RandomnessError::InvalidInput(_))
    ));
    assert!(matches!(
        RandomnessTester::new(&[1, 2], 3, 3),
        Err(RandomnessError::InvalidInput(_))
    ));
}

#[test]
fn repeated_construction_is_deterministic() {
    let samples = seeded_samples(42, 4096, 255);
    let config = ReportConfig {
        chi_square_bins: 16,
        ..ReportConfig::default()
    };
    let first = RandomnessTester::new(&samples, 0, 255).unwrap().report(&config);
    for _ in 0..3 {
        let again = RandomnessTester::new(&samples, 0, 255).unwrap().report(&config);
        assert_eq!(again, first);
        assert_eq!(
            again.ks.statistic.to_bits(),
            first.ks.statistic.to_bits()
        );
    }
}

#[test]
fn same_seed_same_crc_different_seed_different_crc() {
    let a = RandomnessTester::new(&seeded_samples(7, 1000, 255), 0, 255).unwrap();
    let b = RandomnessTester::new(&seeded_samples(7, 1000, 255), 0, 255).unwrap();
    let c = RandomnessTester::new(&seeded_samples(8, 1000, 255), 0, 255).unwrap();
    assert_eq!(a.crc32(), b.crc32());
    assert_ne!(a.crc32(), c.crc32());
}

#[test]
fn autocorrelation_bounds_on_seeded_data() {
    for seed in 0..5 {
        let tester = RandomnessTester::new(&seeded_samples(seed, 200, 1000), 0, 1000).unwrap();
        for lag in [1, 2, 5, 50, 199] {
            let r = tester.autocorrelation(lag).unwrap();
            assert!((-1.0 - 1e-12..=1.0 + 1e-12).contains(&r), "seed={seed} lag={lag} r={r}");
        }
    }
}

#[test]
fn chi_square_counts_sum_to_n() {
    let samples = seeded_samples(3, 777, 99);
    let tester = RandomnessTester::new(&samples, 0, 99).unwrap();
    for bins in [0, 2, 3, 10, 33, 100, 500] {
        let outcome = tester.chi_square(bins);
        assert_eq!(outcome.observed.values().sum::<u64>(), 777, "bins={bins}");
        assert!(outcome.observed.len() <= outcome.bins);
        assert!(outcome.observed.keys().all(|&bin| bin < outcome.bins));
    }
}

#[test]
fn oversized_bin_counts_are_answered() {
    let tester = RandomnessTester::new(&[1, 2, 3], 0, 255).unwrap();
    for bins in [1 << 40, usize::MAX / 2, usize::MAX] {
        let (statistic, p, passed) = tester.chi_square_verdict(bins, 0.05);
        assert!(statistic.is_finite(), "bins={bins}");
        assert!((0.0..=1.0).contains(&p), "bins={bins} p={p}");
        assert_eq!(passed, p > 0.05);
        assert_eq!(tester.chi_square(bins).observed.values().sum::<u64>(), 3);
    }
}

#[test]
fn runs_boundaries() {
    let alternating: Vec<i64> = (0..30).map(|i| if i % 2 == 0 { 1 } else { 9 }).collect();
    let tester = RandomnessTester::new(&alternating, 0, 10).unwrap();
    assert_eq!(tester.runs().runs, 30);

    let monotonic: Vec<i64> = (0..30).collect();
    let tester = RandomnessTester::new(&monotonic, 0, 29).unwrap();
    assert_eq!(tester.runs().runs, 2);
}

#[test]
fn pattern_and_duplicates() {
    let tester = RandomnessTester::new(&[5, 1, 2, 3, 9], 0, 10).unwrap();
    assert_eq!(tester.find_pattern(&[1, 2, 3]).unwrap(), Some(1));
    assert_eq!(tester.find_pattern(&[9, 9]).unwrap(), None);
    assert!(matches!(
        tester.find_pattern(&[]),
        Err(RandomnessError::InvalidArgument(_))
    ));

    let tester = RandomnessTester::new(&[7, 3, 7, 2, 3, 3], 0, 10).unwrap();
    let dups = tester.duplicate_positions();
    assert_eq!(dups.get(&7), Some(&vec![0, 2]));
    assert_eq!(dups.get(&3), Some(&vec![1, 4, 5]));
    assert_eq!(dups.get(&2), None);
}

#[test]
fn concurrent_queries_agree() {
    let tester = RandomnessTester::new(&seeded_samples(11, 5000, 255), 0, 255).unwrap();
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let tester = &tester;
                scope.spawn(move || {
                    let bins = if i % 2 == 0 { 8 } else { 16 };
                    (
                        tester.ks(),
                        tester.runs(),
                        tester.chi_square(bins).statistic,
                        bins,
                    )
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker panicked"))
            .collect()
    });

    let fresh = RandomnessTester::new(tester.samples(), 0, 255).unwrap();
    for (ks, runs, chi, bins) in results {
        assert_eq!(ks, fresh.ks());
        assert_eq!(runs, fresh.runs());
        assert_eq!(chi, fresh.chi_square(bins).statistic);
    }
}

#[test]
fn report_serializes_to_json() {
    let tester = RandomnessTester::new(&pseudo_random(512), 0, 255).unwrap();
    let report = tester.report(&ReportConfig::default());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["count"], 512);
    assert_eq!(json["ks"]["name"], "Kolmogorov-Smirnov");
    assert_eq!(json["chi_square_bins"], 8);
    assert_eq!(json["crc32"], report.crc32);
}
