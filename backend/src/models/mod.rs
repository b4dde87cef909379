//! Domain models for pool generation

pub mod blood_type;
pub mod participant;
pub mod pool;

// Re-exports
pub use blood_type::{BloodType, BloodTypeEncoding, ENCODING_WIDTH};
pub use participant::{validate_cpra, Altruist, Pair, ParticipantError, ParticipantId};
pub use pool::{Pool, PoolEdge};
