//! Abstract storage traits for the SLUICE settlement ledger.
//!
//! Persistence technology is deliberately unspecified: any backend that
//! preserves the keyed tables below is conformant. The traits are
//! byte-oriented — the engine crates own serialization (bincode) so a
//! backend never needs to know the entity types.
//!
//! Tables: projects, claims, rewards (project-scoped entities keyed by
//! global id), milestone sequences and revenue queues (keyed by project),
//! attestations (keyed by 32-byte attestation key), payment proofs (keyed
//! by external reference), and a metadata table for scalars.

pub mod error;
pub mod memory;
pub mod tables;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use tables::{
    AttestationStore, ClaimStore, MetaStore, MilestoneStore, ProjectStore, RevenueStore,
    RewardStore, SettlementStore,
};
