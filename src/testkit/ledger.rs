//! In-memory token ledger.

use std::collections::HashMap;

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::token::Token;
use crate::error::{ExecutionError, Result};
use crate::port::outbound::ledger::TokenLedger;

/// An approval the ledger was asked to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalCall {
    pub token: Address,
    pub spender: Address,
    pub amount: U256,
}

#[derive(Default)]
struct State {
    balances: HashMap<(Address, Address), U256>,
    allowances: HashMap<(Address, Address, Address), U256>,
    approvals: Vec<ApprovalCall>,
    allowance_reads: usize,
    reject_approvals: bool,
}

/// Token balances and allowances held in memory.
///
/// Approvals succeed immediately and raise the stored allowance, unless
/// [`MemoryLedger::reject_approvals`] was called.
pub struct MemoryLedger {
    account: Address,
    state: Mutex<State>,
}

impl MemoryLedger {
    #[must_use]
    pub fn new(account: Address) -> Self {
        Self {
            account,
            state: Mutex::new(State::default()),
        }
    }

    #[must_use]
    pub fn with_balance(self, token: &Token, owner: Address, amount: U256) -> Self {
        self.state
            .lock()
            .balances
            .insert((token.address, owner), amount);
        self
    }

    #[must_use]
    pub fn with_allowance(
        self,
        token: &Token,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Self {
        self.state
            .lock()
            .allowances
            .insert((token.address, owner, spender), amount);
        self
    }

    /// Make every later approval fail as a reverted transaction.
    #[must_use]
    pub fn reject_approvals(self) -> Self {
        self.state.lock().reject_approvals = true;
        self
    }

    /// Approvals submitted so far, oldest first.
    pub fn approvals(&self) -> Vec<ApprovalCall> {
        self.state.lock().approvals.clone()
    }

    /// Number of allowance reads so far.
    pub fn allowance_reads(&self) -> usize {
        self.state.lock().allowance_reads
    }
}

#[async_trait]
impl TokenLedger for MemoryLedger {
    fn account(&self) -> Address {
        self.account
    }

    async fn balance_of(&self, token: &Token, owner: Address) -> Result<U256> {
        Ok(self
            .state
            .lock()
            .balances
            .get(&(token.address, owner))
            .copied()
            .unwrap_or_default())
    }

    async fn allowance(&self, token: &Token, owner: Address, spender: Address) -> Result<U256> {
        let mut state = self.state.lock();
        state.allowance_reads += 1;
        Ok(state
            .allowances
            .get(&(token.address, owner, spender))
            .copied()
            .unwrap_or_default())
    }

    async fn approve(&self, token: &Token, spender: Address, amount: U256) -> Result<B256> {
        let mut state = self.state.lock();
        state.approvals.push(ApprovalCall {
            token: token.address,
            spender,
            amount,
        });
        if state.reject_approvals {
            return Err(ExecutionError::Reverted {
                reason: "approval rejected".into(),
            }
            .into());
        }
        state
            .allowances
            .insert((token.address, self.account, spender), amount);
        let tx_hash = B256::with_last_byte(u8::try_from(state.approvals.len()).unwrap_or(u8::MAX));
        Ok(tx_hash)
    }
}
