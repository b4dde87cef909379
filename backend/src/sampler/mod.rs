//! Attribute sampling for the Saidman pool model
//!
//! Draws blood types, spousal-donor status and the PRA-derived crossmatch
//! probability for each participant. The probabilities are the published
//! constants of Saidman et al. as used by Roth, Sönmez, Ünver, Delmonico
//! and Saidman (2006).
//!
//! # Draw order
//!
//! For one pair the draws happen in this order, each consuming one uniform
//! sample:
//!
//! 1. patient blood type
//! 2. donor blood type
//! 3. patient female
//! 4. donor is spouse (only if female)
//! 5. PRA tier
//! 6. own-donor crossmatch (only if ABO-compatible)
//!
//! The order only matters for bit-for-bit reproducibility against a seed.

mod params;

pub use params::SaidmanParams;

use crate::models::BloodType;
use crate::rng::{RngManager, UniformSource};

/// Draws participant attributes from a uniform source.
///
/// Every method has a default implementation following the Saidman model,
/// parameterised by [`AttributeSampler::params`]. Implementors only need to
/// supply the uniform source and the parameters; tests override individual
/// draws to force a population shape.
pub trait AttributeSampler: UniformSource {
    fn params(&self) -> &SaidmanParams;

    fn draw_patient_blood_type(&mut self) -> BloodType {
        let r = self.next_uniform();
        let thresholds = self.params().patient_blood_type_thresholds();
        pick_blood_type(r, thresholds)
    }

    fn draw_donor_blood_type(&mut self) -> BloodType {
        let r = self.next_uniform();
        let thresholds = self.params().donor_blood_type_thresholds();
        pick_blood_type(r, thresholds)
    }

    fn is_patient_female(&mut self) -> bool {
        self.next_uniform() <= self.params().pr_female
    }

    fn is_donor_spouse(&mut self) -> bool {
        self.next_uniform() <= self.params().pr_spousal_donor
    }

    /// Crossmatch-rejection probability (the patient's CPRA).
    ///
    /// Spousal donors get `1 - c * (1 - base)` where `c` is
    /// `pr_spousal_pra_compatibility`.
    fn generate_pra_incompatibility(&mut self, spousal_donor: bool) -> f64 {
        let r = self.next_uniform();
        let params = self.params();
        let base = if r <= params.pr_low_pra {
            params.pr_low_pra_incompatibility
        } else if r <= params.pr_low_pra + params.pr_med_pra {
            params.pr_med_pra_incompatibility
        } else {
            params.pr_high_pra_incompatibility
        };

        if spousal_donor {
            1.0 - params.pr_spousal_pra_compatibility * (1.0 - base)
        } else {
            base
        }
    }

    /// True means the crossmatch is positive, i.e. the transplant is refused.
    fn is_positive_crossmatch(&mut self, pr_incompatibility: f64) -> bool {
        self.next_uniform() <= pr_incompatibility
    }
}

/// Map one uniform draw onto a blood type using cumulative thresholds
/// for (O, O+A, O+A+B); anything above falls through to AB.
fn pick_blood_type(r: f64, thresholds: [f64; 3]) -> BloodType {
    let [o, oa, oab] = thresholds;
    if r <= o {
        BloodType::O
    } else if r <= oa {
        BloodType::A
    } else if r <= oab {
        BloodType::B
    } else {
        BloodType::AB
    }
}

/// The standard sampler: Saidman parameters over an [`RngManager`].
///
/// # Example
/// ```
/// use saidman_pool_core::sampler::{AttributeSampler, SaidmanSampler};
///
/// let mut sampler = SaidmanSampler::new(34252);
/// let cpra = sampler.generate_pra_incompatibility(false);
/// assert!([0.05, 0.45, 0.90].contains(&cpra));
/// ```
#[derive(Debug, Clone)]
pub struct SaidmanSampler {
    params: SaidmanParams,
    rng: RngManager,
}

impl SaidmanSampler {
    /// Sampler with the published parameters.
    pub fn new(seed: u64) -> Self {
        Self::with_params(SaidmanParams::default(), RngManager::new(seed))
    }

    pub fn with_params(params: SaidmanParams, rng: RngManager) -> Self {
        Self { params, rng }
    }

    pub fn rng(&self) -> &RngManager {
        &self.rng
    }
}

impl UniformSource for SaidmanSampler {
    fn next_uniform(&mut self) -> f64 {
        self.rng.next_f64()
    }
}

impl AttributeSampler for SaidmanSampler {
    fn params(&self) -> &SaidmanParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of uniforms.
    struct Scripted {
        draws: Vec<f64>,
        params: SaidmanParams,
    }

    impl Scripted {
        fn new(draws: &[f64]) -> Self {
            let mut draws = draws.to_vec();
            draws.reverse();
            Self {
                draws,
                params: SaidmanParams::default(),
            }
        }
    }

    impl UniformSource for Scripted {
        fn next_uniform(&mut self) -> f64 {
            self.draws.pop().expect("script exhausted")
        }
    }

    impl AttributeSampler for Scripted {
        fn params(&self) -> &SaidmanParams {
            &self.params
        }
    }

    #[test]
    fn test_blood_type_thresholds() {
        let mut s = Scripted::new(&[0.0, 0.48, 0.49, 0.81, 0.82, 0.96, 0.97, 0.999]);
        let drawn: Vec<BloodType> = (0..8).map(|_| s.draw_patient_blood_type()).collect();
        assert_eq!(
            drawn,
            vec![
                BloodType::O,
                BloodType::O,
                BloodType::A,
                BloodType::A,
                BloodType::B,
                BloodType::B,
                BloodType::AB,
                BloodType::AB,
            ]
        );
    }

    #[test]
    fn test_pra_tiers_without_spouse() {
        let mut s = Scripted::new(&[0.5, 0.8, 0.95]);
        assert_eq!(s.generate_pra_incompatibility(false), 0.05);
        assert_eq!(s.generate_pra_incompatibility(false), 0.45);
        assert_eq!(s.generate_pra_incompatibility(false), 0.90);
    }

    #[test]
    fn test_pra_spousal_adjustment() {
        let mut s = Scripted::new(&[0.5, 0.8, 0.95]);
        let expected = [0.2875, 0.5875, 0.925];
        for want in expected {
            let got = s.generate_pra_incompatibility(true);
            assert!((got - want).abs() < 1e-12, "got {}, want {}", got, want);
        }
    }

    #[test]
    fn test_crossmatch_is_rejection_probability() {
        let mut s = Scripted::new(&[0.3, 0.3]);
        assert!(s.is_positive_crossmatch(0.45));
        assert!(!s.is_positive_crossmatch(0.05));
    }

    #[test]
    fn test_sampler_is_deterministic() {
        let mut a = SaidmanSampler::new(99);
        let mut b = SaidmanSampler::new(99);
        for _ in 0..200 {
            assert_eq!(a.draw_donor_blood_type(), b.draw_donor_blood_type());
            assert_eq!(a.is_patient_female(), b.is_patient_female());
        }
        assert_eq!(a.rng(), b.rng());
    }
}
