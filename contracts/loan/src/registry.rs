//! Loan registry: allocates loan ids and indexes loan records by id.

use soroban_sdk::{log, Env};

use crate::events::{publish_loan_created, LoanCreatedEvent};
use crate::storage::{read_loan, read_loan_counter, write_loan, write_loan_counter};
use crate::types::{ContractError, LoanDescriptor, LoanRecord};

/// Validate `descriptor`, store a new loan with an empty expectation log and
/// return its id. Ids start at 1 and are never reused.
pub fn create_loan(env: &Env, descriptor: LoanDescriptor) -> Result<u64, ContractError> {
    descriptor.validate(env)?;

    let loan_id = read_loan_counter(env)
        .checked_add(1)
        .ok_or(ContractError::Overflow)?;

    let record = LoanRecord {
        loan_id,
        descriptor,
        expectation_count: 0,
        created_at: env.ledger().timestamp(),
    };
    write_loan_counter(env, loan_id);
    write_loan(env, &record);

    publish_loan_created(
        env,
        LoanCreatedEvent {
            loan_id,
            borrower: record.descriptor.borrower.clone(),
            holder: record.descriptor.holder.clone(),
            collateral_amount: record.descriptor.collateral_amount,
            collateral_currency: record.descriptor.collateral_currency.clone(),
        },
    );
    log!(env, "loan created", loan_id);

    Ok(loan_id)
}

pub fn get_loan(env: &Env, loan_id: u64) -> Option<LoanRecord> {
    read_loan(env, loan_id)
}

pub fn require_loan(env: &Env, loan_id: u64) -> Result<LoanRecord, ContractError> {
    read_loan(env, loan_id).ok_or(ContractError::UnknownLoan)
}

/// Number of loans created so far.
pub fn loan_count(env: &Env) -> u64 {
    read_loan_counter(env)
}
