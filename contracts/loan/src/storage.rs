//! Storage keys and entry lifetimes.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{ContractError, LoanRecord, TransferExpectation, TransferPolicy};

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub(crate) const LOAN_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const LOAN_LIFETIME_THRESHOLD: u32 = LOAN_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    Policy,
    LoanCounter,
    Loan(u64),
    Expectation(u64, u64),
}

pub(crate) fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub(crate) fn read_admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ContractError::NotInitialized)
}

pub(crate) fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub(crate) fn write_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub(crate) fn read_policy(env: &Env) -> TransferPolicy {
    env.storage()
        .instance()
        .get(&DataKey::Policy)
        .unwrap_or(TransferPolicy::Open)
}

pub(crate) fn write_policy(env: &Env, policy: TransferPolicy) {
    env.storage().instance().set(&DataKey::Policy, &policy);
}

pub(crate) fn read_loan_counter(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::LoanCounter)
        .unwrap_or(0)
}

pub(crate) fn write_loan_counter(env: &Env, count: u64) {
    env.storage().instance().set(&DataKey::LoanCounter, &count);
}

pub(crate) fn read_loan(env: &Env, loan_id: u64) -> Option<LoanRecord> {
    env.storage().persistent().get(&DataKey::Loan(loan_id))
}

pub(crate) fn write_loan(env: &Env, record: &LoanRecord) {
    env.storage()
        .persistent()
        .set(&DataKey::Loan(record.loan_id), record);
    bump_loan(env, record.loan_id);
}

pub(crate) fn bump_loan(env: &Env, loan_id: u64) {
    env.storage().persistent().extend_ttl(
        &DataKey::Loan(loan_id),
        LOAN_LIFETIME_THRESHOLD,
        LOAN_BUMP_AMOUNT,
    );
}

pub(crate) fn read_expectation(
    env: &Env,
    loan_id: u64,
    sequence_index: u64,
) -> Option<TransferExpectation> {
    env.storage()
        .persistent()
        .get(&DataKey::Expectation(loan_id, sequence_index))
}

pub(crate) fn has_expectation(env: &Env, loan_id: u64, sequence_index: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Expectation(loan_id, sequence_index))
}

/// Entries are written exactly once, at their own `sequence_index`.
pub(crate) fn write_expectation(env: &Env, entry: &TransferExpectation) {
    let key = DataKey::Expectation(entry.loan_id, entry.sequence_index);
    env.storage().persistent().set(&key, entry);
    bump_expectation(env, entry.loan_id, entry.sequence_index);
}

/// Renew an entry to the same lifetime as its loan record.
pub(crate) fn bump_expectation(env: &Env, loan_id: u64, sequence_index: u64) {
    env.storage().persistent().extend_ttl(
        &DataKey::Expectation(loan_id, sequence_index),
        LOAN_LIFETIME_THRESHOLD,
        LOAN_BUMP_AMOUNT,
    );
}
