//! Transfer-expectation engine.
//!
//! Each loan owns an append-only log of expected transfers. Recording an
//! expectation validates everything first, then writes the entry at the next
//! sequence index, bumps the loan's counter and publishes the event. An error
//! returned from here aborts the invocation, and the host discards any write
//! or event along with it.

use soroban_sdk::{log, Address, Env, String, Symbol, Vec};

use crate::events::{publish_transfer_expected, TransferExpectedEvent};
use crate::registry::require_loan;
use crate::storage::{
    bump_expectation, bump_loan, has_expectation, read_expectation, read_policy,
    write_expectation, write_loan,
};
use crate::types::{
    is_empty_symbol, ContractError, LoanDescriptor, TransferExpectation, TransferPolicy,
    MAX_REASON_LEN,
};

/// Largest page returned by [`list_expectations`] or renewed by
/// [`extend_loan_ttl`]. Recording an expectation also renews the previous
/// `MAX_PAGE_SIZE` entries of its loan.
pub const MAX_PAGE_SIZE: u32 = 50;

#[allow(clippy::too_many_arguments)]
pub fn expect_transfer(
    env: &Env,
    loan_id: u64,
    caller: &Address,
    from: Address,
    to: Address,
    amount: u128,
    currency: Symbol,
    reason: String,
) -> Result<TransferExpectedEvent, ContractError> {
    let mut record = require_loan(env, loan_id)?;

    caller.require_auth();
    if !record.descriptor.is_participant(caller) {
        return Err(ContractError::Unauthorized);
    }

    if from == to {
        return Err(ContractError::InvalidParties);
    }
    if amount == 0 {
        return Err(ContractError::InvalidAmount);
    }
    if is_empty_symbol(env, &currency) {
        return Err(ContractError::InvalidCurrency);
    }
    if reason.len() == 0 || reason.len() > MAX_REASON_LEN {
        return Err(ContractError::InvalidReason);
    }
    check_policy(read_policy(env), &record.descriptor, &from, &to)?;

    let sequence_index = record.expectation_count;
    record.expectation_count = sequence_index
        .checked_add(1)
        .ok_or(ContractError::Overflow)?;

    let entry = TransferExpectation {
        loan_id,
        sequence_index,
        from,
        to,
        amount,
        currency,
        reason,
    };
    write_expectation(env, &entry);
    write_loan(env, &record);
    let window_start = sequence_index.saturating_sub(u64::from(MAX_PAGE_SIZE));
    for index in window_start..sequence_index {
        bump_expectation(env, loan_id, index);
    }

    let event = publish_transfer_expected(env, &entry);
    log!(env, "transfer expected", loan_id, sequence_index);

    Ok(event)
}

fn check_policy(
    policy: TransferPolicy,
    descriptor: &LoanDescriptor,
    from: &Address,
    to: &Address,
) -> Result<(), ContractError> {
    match policy {
        TransferPolicy::Open => Ok(()),
        TransferPolicy::LoanParties => {
            let forward = *from == descriptor.borrower && *to == descriptor.holder;
            let reverse = *from == descriptor.holder && *to == descriptor.borrower;
            if forward || reverse {
                Ok(())
            } else {
                Err(ContractError::Unauthorized)
            }
        }
    }
}

pub fn expectation_count(env: &Env, loan_id: u64) -> Result<u64, ContractError> {
    Ok(require_loan(env, loan_id)?.expectation_count)
}

pub fn get_expectation(
    env: &Env,
    loan_id: u64,
    sequence_index: u64,
) -> Option<TransferExpectation> {
    let entry = read_expectation(env, loan_id, sequence_index)?;
    bump_expectation(env, loan_id, sequence_index);
    Some(entry)
}

fn page_end(start: u64, limit: u32, count: u64) -> u64 {
    start
        .saturating_add(u64::from(limit.min(MAX_PAGE_SIZE)))
        .min(count)
}

/// Entries `start..start + limit` in sequence order, `limit` capped at
/// [`MAX_PAGE_SIZE`]. Returned entries are renewed.
pub fn list_expectations(
    env: &Env,
    loan_id: u64,
    start: u64,
    limit: u32,
) -> Result<Vec<TransferExpectation>, ContractError> {
    let record = require_loan(env, loan_id)?;
    let end = page_end(start, limit, record.expectation_count);

    let mut page = Vec::new(env);
    for index in start..end {
        // Every index below `expectation_count` was written exactly once.
        let entry =
            read_expectation(env, loan_id, index).ok_or(ContractError::MissingExpectation)?;
        bump_expectation(env, loan_id, index);
        page.push_back(entry);
    }
    bump_loan(env, loan_id);
    Ok(page)
}

/// Renew the loan record and entries `start..start + limit` (capped at
/// [`MAX_PAGE_SIZE`]) to the full loan lifetime. Returns how many entries
/// were renewed.
pub fn extend_loan_ttl(
    env: &Env,
    loan_id: u64,
    start: u64,
    limit: u32,
) -> Result<u32, ContractError> {
    let record = require_loan(env, loan_id)?;
    bump_loan(env, loan_id);

    let end = page_end(start, limit, record.expectation_count);
    let mut renewed = 0;
    for index in start..end {
        if !has_expectation(env, loan_id, index) {
            return Err(ContractError::MissingExpectation);
        }
        bump_expectation(env, loan_id, index);
        renewed += 1;
    }
    Ok(renewed)
}
