//! Event types and topic constants for the Loan contract.
//! Stable event schemas for indexing and audit replay.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

use crate::types::{TransferExpectation, TransferPolicy};

pub const LOAN_TOPIC: Symbol = symbol_short!("loan");
pub const CREATED_TOPIC: Symbol = symbol_short!("created");
pub const TRANSFER_EXPECTED_TOPIC: Symbol = symbol_short!("xfer_exp");
pub const POLICY_TOPIC: Symbol = symbol_short!("policy");

/// Event emitted when the registry creates a loan.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanCreatedEvent {
    pub loan_id: u64,
    pub borrower: Address,
    pub holder: Address,
    pub collateral_amount: u128,
    pub collateral_currency: Symbol,
}

/// Event emitted when a transfer expectation is recorded.
///
/// Topics are `("loan", "xfer_exp", loan_id, sequence_index)`, so topics and
/// data together reproduce the stored [`TransferExpectation`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferExpectedEvent {
    pub from: Address,
    pub to: Address,
    pub amount: u128,
    pub currency: Symbol,
    pub reason: String,
}

impl From<&TransferExpectation> for TransferExpectedEvent {
    fn from(entry: &TransferExpectation) -> Self {
        TransferExpectedEvent {
            from: entry.from.clone(),
            to: entry.to.clone(),
            amount: entry.amount,
            currency: entry.currency.clone(),
            reason: entry.reason.clone(),
        }
    }
}

/// Publish a loan creation event.
pub fn publish_loan_created(env: &Env, event: LoanCreatedEvent) {
    env.events().publish((LOAN_TOPIC, CREATED_TOPIC), event);
}

/// Publish the projection of a freshly appended expectation and return it.
pub fn publish_transfer_expected(env: &Env, entry: &TransferExpectation) -> TransferExpectedEvent {
    let event = TransferExpectedEvent::from(entry);
    env.events().publish(
        (
            LOAN_TOPIC,
            TRANSFER_EXPECTED_TOPIC,
            entry.loan_id,
            entry.sequence_index,
        ),
        event.clone(),
    );
    event
}

/// Publish a transfer policy change.
pub fn publish_policy_updated(env: &Env, policy: TransferPolicy) {
    env.events().publish((LOAN_TOPIC, POLICY_TOPIC), policy);
}
