//! External payment proof records.

use serde::{Deserialize, Serialize};
use sluice_types::{Amount, PaymentRef, Timestamp};

/// A recorded proof of an externally-observed payment.
///
/// Keyed by the external transaction reference; created at most once per
/// reference. Sender and recipient are opaque external-chain addresses, not
/// `slc_` identities.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentProof {
    pub payment_ref: PaymentRef,
    pub sender: String,
    pub recipient: String,
    pub amount: Amount,
    pub external_timestamp: Timestamp,
    pub block_number: u64,
    pub verified: bool,
}

/// A payment observation submitted by the monitoring relay (via the admin).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentProofSubmission {
    pub payment_ref: PaymentRef,
    pub sender: String,
    pub recipient: String,
    pub amount: Amount,
    pub external_timestamp: Timestamp,
    pub block_number: u64,
}

impl PaymentProofSubmission {
    /// Convert into a stored, verified proof.
    pub fn into_proof(self) -> PaymentProof {
        PaymentProof {
            payment_ref: self.payment_ref,
            sender: self.sender,
            recipient: self.recipient,
            amount: self.amount,
            external_timestamp: self.external_timestamp,
            block_number: self.block_number,
            verified: true,
        }
    }
}
