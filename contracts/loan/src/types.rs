//! Core data types for the Loan contract.

use soroban_sdk::{contracttype, Address, Bytes, Env, String, Symbol};

/// Maximum length of a transfer reason, in bytes.
pub const MAX_REASON_LEN: u32 = 64;

#[soroban_sdk::contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidLoanTerms = 4,
    UnknownLoan = 5,
    InvalidParties = 6,
    InvalidAmount = 7,
    InvalidCurrency = 8,
    InvalidReason = 9,
    Overflow = 10,
    MissingExpectation = 11,
}

/// Which `from`/`to` pairs a participant may register an expectation for.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransferPolicy {
    /// Any two distinct parties.
    Open = 0,
    /// Exactly the loan's borrower and holder, in either direction.
    LoanParties = 1,
}

/// Terms a loan is created from. Immutable once the loan exists.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanDescriptor {
    pub borrower: Address,
    /// Party holding the collateral.
    pub holder: Address,
    pub collateral_amount: u128,
    pub collateral_currency: Symbol,
    /// Remaining loan terms, carried through untouched.
    pub terms: Bytes,
}

impl LoanDescriptor {
    pub fn validate(&self, env: &Env) -> Result<(), ContractError> {
        if self.collateral_amount == 0
            || self.borrower == self.holder
            || is_empty_symbol(env, &self.collateral_currency)
        {
            return Err(ContractError::InvalidLoanTerms);
        }
        Ok(())
    }

    pub fn is_participant(&self, who: &Address) -> bool {
        *who == self.borrower || *who == self.holder
    }
}

/// Stored loan, addressed by `loan_id`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanRecord {
    pub loan_id: u64,
    pub descriptor: LoanDescriptor,
    /// Number of recorded expectations; also the next `sequence_index`.
    pub expectation_count: u64,
    /// Ledger timestamp at creation.
    pub created_at: u64,
}

/// One entry of a loan's append-only expectation log.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferExpectation {
    pub loan_id: u64,
    pub sequence_index: u64,
    pub from: Address,
    pub to: Address,
    pub amount: u128,
    pub currency: Symbol,
    pub reason: String,
}

pub(crate) fn is_empty_symbol(env: &Env, symbol: &Symbol) -> bool {
    *symbol == Symbol::new(env, "")
}
