//! Scripted fill and filler-service doubles.

use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::order::SignedOrder;
use crate::error::Result;
use crate::port::outbound::filler::{
    ExecuteRequest, ExecuteResponse, FillerApi, QuoteRequest, QuoteResponse,
};
use crate::port::outbound::protocol::{FillReceipt, FillSimulation, OrderFiller};

/// Records fills and answers simulations with a fixed outcome.
pub struct ScriptedFiller {
    simulation: FillSimulation,
    simulated: Mutex<Vec<(B256, Address)>>,
    executed: Mutex<Vec<B256>>,
}

impl ScriptedFiller {
    #[must_use]
    pub fn succeeding() -> Self {
        Self::with_simulation(FillSimulation::Success)
    }

    #[must_use]
    pub fn reverting(reason: &str) -> Self {
        Self::with_simulation(FillSimulation::Reverted {
            reason: reason.to_string(),
        })
    }

    fn with_simulation(simulation: FillSimulation) -> Self {
        Self {
            simulation,
            simulated: Mutex::new(Vec::new()),
            executed: Mutex::new(Vec::new()),
        }
    }

    /// `(order hash, taker)` of every simulation.
    pub fn simulated(&self) -> Vec<(B256, Address)> {
        self.simulated.lock().clone()
    }

    /// Order hashes of every executed fill.
    pub fn executed(&self) -> Vec<B256> {
        self.executed.lock().clone()
    }
}

#[async_trait]
impl OrderFiller for ScriptedFiller {
    async fn simulate_fill(&self, order: &SignedOrder, taker: Address) -> Result<FillSimulation> {
        self.simulated.lock().push((order.order_hash(), taker));
        Ok(self.simulation.clone())
    }

    async fn execute_fill(&self, order: &SignedOrder) -> Result<FillReceipt> {
        self.executed.lock().push(order.order_hash());
        Ok(FillReceipt {
            tx_hash: order.order_hash(),
            gas_used: 120_000,
            block_number: Some(1),
        })
    }
}

/// Filler service that replays canned replies and records requests.
pub struct ScriptedFillerApi {
    quote: QuoteResponse,
    execute: ExecuteResponse,
    quotes: Mutex<Vec<QuoteRequest>>,
    executions: Mutex<Vec<ExecuteRequest>>,
}

impl ScriptedFillerApi {
    #[must_use]
    pub fn new(quote: QuoteResponse, execute: ExecuteResponse) -> Self {
        Self {
            quote,
            execute,
            quotes: Mutex::new(Vec::new()),
            executions: Mutex::new(Vec::new()),
        }
    }

    /// Replies to quotes only; executions report success without a tx id.
    #[must_use]
    pub fn quoting(quote: QuoteResponse) -> Self {
        Self::new(
            quote,
            ExecuteResponse {
                success: true,
                ..ExecuteResponse::default()
            },
        )
    }

    /// Replies to executions only; quotes carry no amounts.
    #[must_use]
    pub fn executing(execute: ExecuteResponse) -> Self {
        Self::new(QuoteResponse::default(), execute)
    }

    pub fn quotes(&self) -> Vec<QuoteRequest> {
        self.quotes.lock().clone()
    }

    pub fn executions(&self) -> Vec<ExecuteRequest> {
        self.executions.lock().clone()
    }
}

#[async_trait]
impl FillerApi for ScriptedFillerApi {
    async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResponse> {
        self.quotes.lock().push(request.clone());
        Ok(self.quote.clone())
    }

    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse> {
        self.executions.lock().push(request.clone());
        Ok(self.execute.clone())
    }
}
