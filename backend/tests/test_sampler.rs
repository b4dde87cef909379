//! Statistical tests for the attribute sampler
//!
//! 100 000 draws per test; tolerances are several standard errors wide.

use saidman_pool_core::{AttributeSampler, BloodType, PoolGenerator, SaidmanParams, SaidmanSampler};

const DRAWS: usize = 100_000;
const TOLERANCE: f64 = 0.01;

fn frequencies(draws: &[BloodType]) -> [f64; 4] {
    let mut counts = [0usize; 4];
    for bt in draws {
        let idx = BloodType::ALL.iter().position(|t| t == bt).unwrap();
        counts[idx] += 1;
    }
    counts.map(|c| c as f64 / draws.len() as f64)
}

fn expected_blood_types(o: f64, a: f64, b: f64) -> [f64; 4] {
    [o, a, b, 1.0 - o - a - b]
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "{}: observed {:.4}, expected {:.4}",
        what,
        actual,
        expected
    );
}

#[test]
fn test_patient_blood_type_distribution() {
    let mut sampler = SaidmanSampler::new(2024);
    let draws: Vec<_> = (0..DRAWS).map(|_| sampler.draw_patient_blood_type()).collect();

    let p = SaidmanParams::default();
    let expected = expected_blood_types(p.pr_patient_type_o, p.pr_patient_type_a, p.pr_patient_type_b);
    for (bt, (obs, exp)) in BloodType::ALL.iter().zip(frequencies(&draws).iter().zip(expected)) {
        assert_close(*obs, exp, &format!("patient type {}", bt));
    }
}

#[test]
fn test_donor_blood_type_distribution() {
    let mut sampler = SaidmanSampler::new(4048);
    let draws: Vec<_> = (0..DRAWS).map(|_| sampler.draw_donor_blood_type()).collect();

    let p = SaidmanParams::default();
    let expected = expected_blood_types(p.pr_donor_type_o, p.pr_donor_type_a, p.pr_donor_type_b);
    for (bt, (obs, exp)) in BloodType::ALL.iter().zip(frequencies(&draws).iter().zip(expected)) {
        assert_close(*obs, exp, &format!("donor type {}", bt));
    }
}

#[test]
fn test_bernoulli_draws() {
    let mut sampler = SaidmanSampler::new(99);
    let female = (0..DRAWS).filter(|_| sampler.is_patient_female()).count();
    let spouse = (0..DRAWS).filter(|_| sampler.is_donor_spouse()).count();

    let p = SaidmanParams::default();
    assert_close(female as f64 / DRAWS as f64, p.pr_female, "female");
    assert_close(spouse as f64 / DRAWS as f64, p.pr_spousal_donor, "spouse");
}

#[test]
fn test_pra_tier_distribution() {
    let mut sampler = SaidmanSampler::new(7);
    let draws: Vec<f64> = (0..DRAWS)
        .map(|_| sampler.generate_pra_incompatibility(false))
        .collect();

    let p = SaidmanParams::default();
    let share = |v: f64| draws.iter().filter(|&&x| x == v).count() as f64 / DRAWS as f64;
    assert_close(share(p.pr_low_pra_incompatibility), p.pr_low_pra, "low PRA");
    assert_close(share(p.pr_med_pra_incompatibility), p.pr_med_pra, "medium PRA");
    assert_close(
        share(p.pr_high_pra_incompatibility),
        1.0 - p.pr_low_pra - p.pr_med_pra,
        "high PRA",
    );
}

/// Probability that a freshly drawn pair is intrinsically compatible:
/// P(ABO compatible) * (1 - E[CPRA]), the two being independent.
fn expected_compatibility_rate(p: &SaidmanParams) -> f64 {
    let patient = expected_blood_types(p.pr_patient_type_o, p.pr_patient_type_a, p.pr_patient_type_b);
    let donor = expected_blood_types(p.pr_donor_type_o, p.pr_donor_type_a, p.pr_donor_type_b);

    let mut abo = 0.0;
    for (i, d) in BloodType::ALL.iter().enumerate() {
        for (j, pt) in BloodType::ALL.iter().enumerate() {
            if d.can_donate_to(*pt) {
                abo += donor[i] * patient[j];
            }
        }
    }

    let tiers = [
        (p.pr_low_pra, p.pr_low_pra_incompatibility),
        (p.pr_med_pra, p.pr_med_pra_incompatibility),
        (1.0 - p.pr_low_pra - p.pr_med_pra, p.pr_high_pra_incompatibility),
    ];
    let base: f64 = tiers.iter().map(|(w, v)| w * v).sum();
    let spousal: f64 = tiers
        .iter()
        .map(|(w, v)| w * (1.0 - p.pr_spousal_pra_compatibility * (1.0 - v)))
        .sum();
    let pr_spousal = p.pr_female * p.pr_spousal_donor;
    let mean_cpra = (1.0 - pr_spousal) * base + pr_spousal * spousal;

    abo * (1.0 - mean_cpra)
}

#[test]
fn test_intrinsic_compatibility_rate() {
    let mut generator = PoolGenerator::new(31337);
    let compatible = (0..DRAWS)
        .filter(|_| generator.generate_pair().unwrap().is_compatible())
        .count();

    let expected = expected_compatibility_rate(&SaidmanParams::default());
    assert_close(compatible as f64 / DRAWS as f64, expected, "intrinsic compatibility");
}

#[test]
fn test_spousal_share_of_pairs() {
    let mut generator = PoolGenerator::new(5150);
    let spousal = (0..DRAWS)
        .filter(|_| generator.generate_pair().unwrap().is_spousal_donor())
        .count();

    let p = SaidmanParams::default();
    assert_close(spousal as f64 / DRAWS as f64, p.pr_female * p.pr_spousal_donor, "spousal");
}
