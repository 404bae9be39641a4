//! The reward/stake engine.
//!
//! Staking pauses a claim's revenue and mints a freely-transferable reward
//! paired 1:1 with it; burning the reward is the only way back. The pause
//! follows the claim, not the reward's current owner — a transferred reward
//! keeps the underlying claim paused for everyone.

pub mod engine;
pub mod error;
pub mod reward;

pub use engine::RewardEngine;
pub use error::RewardError;
pub use reward::Reward;
