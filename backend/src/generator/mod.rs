//! Pool generation: participant factory and population assembler
//!
//! [`PoolGenerator`] owns the attribute sampler and the participant ID
//! counter. Each generator is an independent stream: two generators built
//! from the same seed produce identical pools, and nothing is shared
//! between instances.
//!
//! # Example
//!
//! ```
//! use saidman_pool_core::{get_pool_data_synthetic, GeneratorConfig};
//!
//! let data = get_pool_data_synthetic(&GeneratorConfig::new(5, 1)).unwrap();
//! assert_eq!(data.pool.pairs().len(), 5);
//! assert_eq!(data.pool.altruists().len(), 1);
//! assert_eq!(data.edges.size(), 6);
//! ```

mod config;
mod output;

pub use config::{AltruistCpraPolicy, GeneratorConfig, DEFAULT_MAX_ATTEMPTS_PER_PAIR, DEFAULT_SEED};
pub use output::{encoding_rows, PoolData, SyntheticPopulation};

use tracing::{debug, info, warn};

use crate::error::{matrix_side, GeneratorError};
use crate::matrix::build_compatibility_matrix;
use crate::models::{Altruist, BloodTypeEncoding, Pair, ParticipantId, Pool};
use crate::rng::RngManager;
use crate::sampler::{AttributeSampler, SaidmanSampler};

/// Builds synthetic kidney-exchange pools.
pub struct PoolGenerator<S = SaidmanSampler> {
    sampler: S,

    /// ID handed to the next accepted participant
    next_id: ParticipantId,

    max_attempts_per_pair: usize,
    altruist_cpra: AltruistCpraPolicy,
}

impl PoolGenerator<SaidmanSampler> {
    /// Generator with the published parameters and default limits.
    pub fn new(seed: u64) -> Self {
        Self::with_sampler(SaidmanSampler::new(seed))
    }

    /// Generator configured from `config` (counts are ignored here; they
    /// are passed to the generation calls).
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        config.validate()?;
        let sampler = SaidmanSampler::with_params(config.params.clone(), RngManager::new(config.seed));
        Ok(Self::with_sampler(sampler)
            .with_max_attempts_per_pair(config.max_attempts_per_pair)
            .with_altruist_cpra(config.altruist_cpra))
    }
}

impl<S: AttributeSampler> PoolGenerator<S> {
    pub fn with_sampler(sampler: S) -> Self {
        Self {
            sampler,
            next_id: 0,
            max_attempts_per_pair: DEFAULT_MAX_ATTEMPTS_PER_PAIR,
            altruist_cpra: AltruistCpraPolicy::default(),
        }
    }

    pub fn with_max_attempts_per_pair(mut self, attempts: usize) -> Self {
        self.max_attempts_per_pair = attempts;
        self
    }

    pub fn with_altruist_cpra(mut self, policy: AltruistCpraPolicy) -> Self {
        self.altruist_cpra = policy;
        self
    }

    pub fn next_id(&self) -> ParticipantId {
        self.next_id
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// Draw one pair.
    ///
    /// The pair carries the current counter value as its ID, but the counter
    /// only advances when the assembler accepts the pair; a discarded
    /// (compatible) pair leaves no gap in the ID space.
    pub fn generate_pair(&mut self) -> Result<Pair, GeneratorError> {
        let patient = self.sampler.draw_patient_blood_type();
        let donor = self.sampler.draw_donor_blood_type();
        let spousal = self.sampler.is_patient_female() && self.sampler.is_donor_spouse();
        let cpra = self.sampler.generate_pra_incompatibility(spousal);

        let compatible = donor.can_donate_to(patient) && !self.sampler.is_positive_crossmatch(cpra);

        Ok(Pair::new(self.next_id, patient, donor, spousal, cpra, compatible)?)
    }

    /// Draw one altruist, consuming an ID.
    pub fn generate_altruist(&mut self) -> Altruist {
        let donor = self.sampler.draw_donor_blood_type();
        let altruist = Altruist::new(self.next_id, donor);
        self.next_id += 1;
        altruist
    }

    /// Assemble exactly `num_pairs` incompatible pairs followed by
    /// `num_altruists` altruists.
    ///
    /// Compatible pairs are discarded and redrawn. At most
    /// `max_attempts_per_pair * max(num_pairs, 1)` pairs are drawn before
    /// failing with [`GeneratorError::GenerationExhausted`].
    pub fn generate_synthetic(
        &mut self,
        num_pairs: usize,
        num_altruists: usize,
    ) -> Result<SyntheticPopulation, GeneratorError> {
        matrix_side(num_pairs, num_altruists)?;
        if self.max_attempts_per_pair == 0 {
            return Err(GeneratorError::InvalidParameter {
                name: "max_attempts_per_pair",
                reason: "must be at least 1".to_string(),
            });
        }
        let budget = self.max_attempts_per_pair.saturating_mul(num_pairs.max(1));

        info!(
            num_pairs,
            num_altruists,
            first_id = self.next_id,
            "Assembling synthetic pool"
        );

        let mut pool = Pool::new();
        let mut donor_encodings = Vec::with_capacity(num_pairs);
        let mut patient_encodings = Vec::with_capacity(num_pairs);
        let mut altruist_encodings = Vec::with_capacity(num_altruists);
        let mut cpra = Vec::with_capacity(num_pairs + num_altruists);

        let mut attempts = 0usize;
        while pool.pairs().len() < num_pairs {
            if attempts >= budget {
                let accepted = pool.pairs().len();
                warn!(
                    attempts,
                    accepted,
                    requested = num_pairs,
                    "Pair rejection sampling exhausted its budget"
                );
                return Err(GeneratorError::GenerationExhausted {
                    attempts,
                    accepted,
                    requested: num_pairs,
                });
            }
            attempts += 1;

            let pair = self.generate_pair()?;
            if pair.is_compatible() {
                continue;
            }
            self.next_id += 1;

            donor_encodings.push(BloodTypeEncoding::new(pair.donor_blood_type()));
            patient_encodings.push(BloodTypeEncoding::new(pair.patient_blood_type()));
            cpra.push(pair.patient_cpra());
            pool.add_pair(pair);
        }

        debug!(
            attempts,
            rejected = attempts - num_pairs,
            "Collected incompatible pairs"
        );

        let altruist_cpra = match self.altruist_cpra {
            AltruistCpraPolicy::Zero => 0.0,
            AltruistCpraPolicy::LastPair => cpra.last().copied().unwrap_or(0.0),
        };

        for _ in 0..num_altruists {
            let altruist = self.generate_altruist();
            altruist_encodings.push(BloodTypeEncoding::new(altruist.donor_blood_type()));
            cpra.push(altruist_cpra);
            pool.add_altruist(altruist);
        }

        info!(
            pairs = pool.pairs().len(),
            altruists = pool.altruists().len(),
            next_id = self.next_id,
            "Synthetic pool assembled"
        );

        Ok(SyntheticPopulation {
            pool,
            donor_encodings,
            patient_encodings,
            altruist_encodings,
            cpra,
        })
    }

    /// Full pipeline: assemble the population, then build the
    /// compatibility matrices with the same random stream.
    pub fn get_pool_data_synthetic(
        &mut self,
        num_pairs: usize,
        num_altruists: usize,
    ) -> Result<PoolData, GeneratorError> {
        let SyntheticPopulation {
            mut pool,
            mut donor_encodings,
            mut patient_encodings,
            altruist_encodings,
            cpra,
        } = self.generate_synthetic(num_pairs, num_altruists)?;

        // Altruists fill both roles structurally
        donor_encodings.extend_from_slice(&altruist_encodings);
        patient_encodings.extend_from_slice(&altruist_encodings);

        let (edges, edge_weights) = build_compatibility_matrix(
            num_pairs,
            num_altruists,
            &donor_encodings,
            &patient_encodings,
            &cpra,
            &mut self.sampler,
        )?;

        pool.record_edges(&edges);

        Ok(PoolData {
            pool,
            edges,
            edge_weights,
            donor_encodings,
            patient_encodings,
            cpra,
        })
    }
}

/// Assemble a population with a fresh generator built from `config`.
pub fn generate_synthetic(config: &GeneratorConfig) -> Result<SyntheticPopulation, GeneratorError> {
    PoolGenerator::from_config(config)?.generate_synthetic(config.num_pairs, config.num_altruists)
}

/// Run the full pipeline with a fresh generator built from `config`.
pub fn get_pool_data_synthetic(config: &GeneratorConfig) -> Result<PoolData, GeneratorError> {
    PoolGenerator::from_config(config)?
        .get_pool_data_synthetic(config.num_pairs, config.num_altruists)
}
