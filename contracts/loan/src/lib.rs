#![no_std]

//! Loan contract: a registry of loans and, per loan, an append-only log of
//! expected transfers.
//!
//! # Atomicity
//! Every entry point validates its inputs before touching storage. A call
//! that returns an error is rolled back by the host together with any event
//! it published, so the expectation log and the `TransferExpected` events
//! never diverge.

mod engine;
mod events;
mod registry;
mod storage;
mod types;

use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Symbol, Vec};

pub use engine::MAX_PAGE_SIZE;
pub use events::{LoanCreatedEvent, TransferExpectedEvent};
pub use types::{
    ContractError, LoanDescriptor, LoanRecord, TransferExpectation, TransferPolicy, MAX_REASON_LEN,
};

use events::publish_policy_updated;
use storage::{bump_instance, has_admin, read_admin, read_policy, write_admin, write_policy};

fn require_admin_auth(env: &Env) -> Result<Address, ContractError> {
    let admin = read_admin(env)?;
    admin.require_auth();
    Ok(admin)
}

#[contract]
pub struct LoanContract;

#[contractimpl]
impl LoanContract {
    /// Initialize the contract with the admin that operates the registry.
    pub fn init(env: Env, admin: Address) -> Result<(), ContractError> {
        if has_admin(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        write_admin(&env, &admin);
        write_policy(&env, TransferPolicy::Open);
        bump_instance(&env);
        Ok(())
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        read_admin(&env)
    }

    /// Change which parties an expectation may name (admin only).
    pub fn set_transfer_policy(env: Env, policy: TransferPolicy) -> Result<(), ContractError> {
        require_admin_auth(&env)?;
        write_policy(&env, policy);
        bump_instance(&env);
        publish_policy_updated(&env, policy);
        log!(&env, "transfer policy updated", policy);
        Ok(())
    }

    pub fn get_transfer_policy(env: Env) -> TransferPolicy {
        read_policy(&env)
    }

    /// Create a loan from `descriptor` and return its id (admin only).
    ///
    /// # Errors
    /// * `NotInitialized` – no admin configured
    /// * `InvalidLoanTerms` – zero collateral, empty currency, or borrower equal to holder
    pub fn create_loan(env: Env, descriptor: LoanDescriptor) -> Result<u64, ContractError> {
        require_admin_auth(&env)?;
        let loan_id = registry::create_loan(&env, descriptor)?;
        bump_instance(&env);
        Ok(loan_id)
    }

    /// Get a loan by id (view function).
    pub fn get_loan(env: Env, loan_id: u64) -> Option<LoanRecord> {
        registry::get_loan(&env, loan_id)
    }

    pub fn loan_count(env: Env) -> u64 {
        registry::loan_count(&env)
    }

    /// Record that `amount` of `currency` is expected to move from `from` to
    /// `to` on loan `loan_id`. `caller` must authorize and be the loan's
    /// borrower or holder. Not idempotent: every success appends a new entry.
    ///
    /// # Errors
    /// * `UnknownLoan` – `loan_id` was never created
    /// * `Unauthorized` – caller is not a participant, or the transfer policy rejects the parties
    /// * `InvalidParties` – `from == to`
    /// * `InvalidAmount` – `amount == 0`
    /// * `InvalidCurrency` – empty currency
    /// * `InvalidReason` – empty reason or longer than `MAX_REASON_LEN` bytes
    #[allow(clippy::too_many_arguments)]
    pub fn expect_transfer(
        env: Env,
        loan_id: u64,
        caller: Address,
        from: Address,
        to: Address,
        amount: u128,
        currency: Symbol,
        reason: String,
    ) -> Result<TransferExpectedEvent, ContractError> {
        let event =
            engine::expect_transfer(&env, loan_id, &caller, from, to, amount, currency, reason)?;
        bump_instance(&env);
        Ok(event)
    }

    pub fn expectation_count(env: Env, loan_id: u64) -> Result<u64, ContractError> {
        engine::expectation_count(&env, loan_id)
    }

    pub fn get_expectation(
        env: Env,
        loan_id: u64,
        sequence_index: u64,
    ) -> Option<TransferExpectation> {
        engine::get_expectation(&env, loan_id, sequence_index)
    }

    /// Page through a loan's expectation log in sequence order.
    pub fn list_expectations(
        env: Env,
        loan_id: u64,
        start: u64,
        limit: u32,
    ) -> Result<Vec<TransferExpectation>, ContractError> {
        engine::list_expectations(&env, loan_id, start, limit)
    }

    /// Renew the storage lifetime of a loan and a page of its expectation
    /// log. Anyone may call this; it changes no state besides lifetimes.
    pub fn extend_loan_ttl(
        env: Env,
        loan_id: u64,
        start: u64,
        limit: u32,
    ) -> Result<u32, ContractError> {
        let renewed = engine::extend_loan_ttl(&env, loan_id, start, limit)?;
        bump_instance(&env);
        Ok(renewed)
    }
}
