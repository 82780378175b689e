//! JSON-RPC client for token and protocol calls.
//!
//! Holds a read provider and a wallet-backed provider for one endpoint and
//! one signer. Implements [`TokenLedger`] for the signer's account and
//! [`OrderFiller`] with the signer as taker.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_provider::network::{EthereumWallet, ReceiptResponse};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use tracing::{debug, info, warn};
use url::Url;

use super::contract::{ILimitOrderProtocol, IERC20};
use super::revert::decode_revert;
use crate::domain::order::{Order, SignedOrder};
use crate::domain::token::Token;
use crate::domain::traits::TakerTraits;
use crate::error::{ExecutionError, Result};
use crate::port::outbound::ledger::TokenLedger;
use crate::port::outbound::protocol::{FillReceipt, FillSimulation, OrderFiller};

/// Percentage added on top of the gas estimate for fill transactions.
const GAS_HEADROOM_PERCENT: u64 = 10;

/// Fill arguments shared by simulation and execution.
struct FillArgs {
    order: ILimitOrderProtocol::Order,
    r: B256,
    vs: B256,
    amount: U256,
    taker_traits: U256,
}

impl FillArgs {
    /// Fill the whole order: amount is the making amount and the taking
    /// amount is the threshold the taker will pay at most.
    fn full(signed: &SignedOrder) -> Self {
        let order = signed.order();
        let compact = signed.compact_signature();
        let taker_traits = TakerTraits::default()
            .with_maker_amount()
            .with_threshold(order.takingAmount);
        Self {
            order: ILimitOrderProtocol::Order::from(order),
            r: compact.r,
            vs: compact.vs,
            amount: order.makingAmount,
            taker_traits: taker_traits.into_raw(),
        }
    }
}

/// Gas limit for a fill: the estimate plus [`GAS_HEADROOM_PERCENT`].
fn gas_with_headroom(estimate: u64) -> u64 {
    estimate.saturating_add(estimate.saturating_mul(GAS_HEADROOM_PERCENT) / 100)
}

/// Accept a mined transaction only if its receipt reports success.
fn ensure_succeeded(status: bool, tx_hash: B256, action: &str) -> Result<B256> {
    if status {
        Ok(tx_hash)
    } else {
        Err(ExecutionError::Reverted {
            reason: format!("{action} transaction {tx_hash} failed"),
        }
        .into())
    }
}

/// RPC client bound to one signer and one protocol deployment.
pub struct EvmClient {
    reader: DynProvider,
    writer: DynProvider,
    signer: PrivateKeySigner,
    protocol: Address,
}

impl EvmClient {
    /// Build providers for `rpc_url`. No request is made until first use.
    #[must_use]
    pub fn connect(rpc_url: &Url, signer: PrivateKeySigner, protocol: Address) -> Self {
        let reader = ProviderBuilder::new()
            .connect_http(rpc_url.clone())
            .erased();
        let wallet = EthereumWallet::from(signer.clone());
        let writer = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(rpc_url.clone())
            .erased();

        Self::from_providers(reader, writer, signer, protocol)
    }

    /// Use existing providers. `writer` must sign for `signer`.
    #[must_use]
    pub fn from_providers(
        reader: DynProvider,
        writer: DynProvider,
        signer: PrivateKeySigner,
        protocol: Address,
    ) -> Self {
        Self {
            reader,
            writer,
            signer,
            protocol,
        }
    }

    #[must_use]
    pub fn protocol(&self) -> Address {
        self.protocol
    }

    /// Re-issue the call as a raw `eth_call` and pull revert data out of the
    /// error payload. Some providers drop it from the first error.
    async fn refetch_revert_data(&self, from: Address, calldata: &Bytes) -> Option<Bytes> {
        let params = serde_json::json!([
            { "from": from, "to": self.protocol, "data": calldata },
            "latest"
        ]);
        match self
            .reader
            .raw_request::<_, Bytes>("eth_call".into(), params)
            .await
        {
            Ok(_) => {
                debug!("raw eth_call succeeded on retry");
                None
            }
            Err(err) => err.as_error_resp().and_then(|payload| payload.as_revert_data()),
        }
    }

    /// Turn a failed contract call into a revert reason, or an RPC error when
    /// the node never answered.
    async fn revert_reason(
        &self,
        from: Address,
        calldata: &Bytes,
        err: alloy_contract::Error,
    ) -> Result<String> {
        let data = match self.refetch_revert_data(from, calldata).await {
            Some(data) => Some(data),
            None => err.as_revert_data(),
        };
        if let Some(data) = data {
            return Ok(decode_revert(&data));
        }
        match err {
            alloy_contract::Error::TransportError(ref transport)
                if transport.as_error_resp().is_none() =>
            {
                Err(ExecutionError::Rpc(err.to_string()).into())
            }
            other => Ok(other.to_string()),
        }
    }
}

#[async_trait]
impl TokenLedger for EvmClient {
    fn account(&self) -> Address {
        self.signer.address()
    }

    async fn balance_of(&self, token: &Token, owner: Address) -> Result<U256> {
        let erc20 = IERC20::new(token.address, &self.reader);
        let balance: U256 = erc20
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| ExecutionError::Rpc(format!("Failed to get {token} balance: {e}")))?;
        Ok(balance)
    }

    async fn allowance(&self, token: &Token, owner: Address, spender: Address) -> Result<U256> {
        let erc20 = IERC20::new(token.address, &self.reader);
        let allowance: U256 = erc20
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| ExecutionError::Rpc(format!("Failed to get {token} allowance: {e}")))?;
        Ok(allowance)
    }

    async fn approve(&self, token: &Token, spender: Address, amount: U256) -> Result<B256> {
        info!(
            owner = %self.signer.address(),
            token = %token,
            spender = %spender,
            amount = %amount,
            "Approving token spending"
        );

        let erc20 = IERC20::new(token.address, &self.writer);
        let pending_tx = erc20.approve(spender, amount).send().await.map_err(|e| {
            ExecutionError::SubmissionFailed(format!("Failed to send approval: {e}"))
        })?;

        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(|e| ExecutionError::SubmissionFailed(format!("Failed to get receipt: {e}")))?;

        let tx_hash = ensure_succeeded(receipt.status(), receipt.transaction_hash(), "approval")?;
        info!(tx_hash = %tx_hash, "Approval transaction confirmed");
        Ok(tx_hash)
    }
}

#[async_trait]
impl OrderFiller for EvmClient {
    async fn simulate_fill(&self, signed: &SignedOrder, taker: Address) -> Result<FillSimulation> {
        let args = FillArgs::full(signed);
        let protocol = ILimitOrderProtocol::new(self.protocol, &self.reader);
        let call = protocol
            .fillOrder(args.order, args.r, args.vs, args.amount, args.taker_traits)
            .from(taker);
        let calldata = call.calldata().clone();

        debug!(order_hash = %signed.order_hash(), taker = %taker, "Simulating fill");

        match call.call().await {
            Ok(_) => Ok(FillSimulation::Success),
            Err(err) => {
                let reason = self.revert_reason(taker, &calldata, err).await?;
                warn!(reason = %reason, "Fill simulation reverted");
                Ok(FillSimulation::Reverted { reason })
            }
        }
    }

    async fn execute_fill(&self, signed: &SignedOrder) -> Result<FillReceipt> {
        let taker = self.signer.address();
        let args = FillArgs::full(signed);
        let protocol = ILimitOrderProtocol::new(self.protocol, &self.writer);
        let call = protocol
            .fillOrder(args.order, args.r, args.vs, args.amount, args.taker_traits)
            .from(taker);
        let calldata = call.calldata().clone();

        let estimate = match call.estimate_gas().await {
            Ok(gas) => gas,
            Err(err) => {
                let reason = self.revert_reason(taker, &calldata, err).await?;
                return Err(ExecutionError::Reverted { reason }.into());
            }
        };
        let gas_limit = gas_with_headroom(estimate);

        info!(
            order_hash = %signed.order_hash(),
            estimate,
            gas_limit,
            "Sending fill transaction"
        );

        let pending_tx = call.gas(gas_limit).send().await.map_err(|e| {
            ExecutionError::SubmissionFailed(format!("Failed to send fill: {e}"))
        })?;
        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(|e| ExecutionError::SubmissionFailed(format!("Failed to get receipt: {e}")))?;

        let tx_hash = ensure_succeeded(receipt.status(), receipt.transaction_hash(), "fill")?;
        info!(tx_hash = %tx_hash, gas_used = receipt.gas_used(), "Fill confirmed");

        Ok(FillReceipt {
            tx_hash,
            gas_used: receipt.gas_used(),
            block_number: receipt.block_number(),
        })
    }
}

/// Ask the deployed contract for its hash of `order`.
///
/// # Errors
///
/// Returns an RPC error if the call fails.
pub async fn onchain_order_hash(rpc_url: &Url, protocol: Address, order: &Order) -> Result<B256> {
    let provider = ProviderBuilder::new().connect_http(rpc_url.clone());
    let contract = ILimitOrderProtocol::new(protocol, &provider);
    let hash: B256 = contract
        .hashOrder(ILimitOrderProtocol::Order::from(order))
        .call()
        .await
        .map_err(|e| ExecutionError::Rpc(format!("Failed to call hashOrder: {e}")))?;
    Ok(hash)
}
