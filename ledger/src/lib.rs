//! The SLUICE settlement ledger.
//!
//! This crate is the trust boundary of the engine: every externally-invoked
//! operation enters here, gets its capability check (admin, project
//! creator, claim/reward owner) against the caller identity, and runs to
//! completion atomically — it commits all of its state changes and emitted
//! records together, or fails and commits nothing.
//!
//! Operations that move value to externally-controlled owners (distribute,
//! reward burn) hold an execution lock for their full duration, so a payout
//! sink can never re-enter the ledger mid-operation.

pub mod engine;
pub mod error;
pub mod event;
pub mod lock;
pub mod project;
pub mod snapshot;

pub use engine::SettlementLedger;
pub use error::LedgerError;
pub use event::LedgerEvent;
pub use lock::{ExecutionLock, LockGuard};
pub use project::Project;
