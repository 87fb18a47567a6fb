// SPDX-License-Identifier: GPL-3.0

//! [`ChainClient`] implementation backed by subxt.
//!
//! Best-block lookups go through the legacy `chain_*` RPCs, which every Polkadot SDK node
//! exposes; blocks, events and submission go through [`OnlineClient`].

use crate::{
	ChainClient, Error, HeadStream,
	strings::rpc::methods,
	types::{EventRecord, Extrinsic, NewHead, Phase, RegistryError},
};
use futures::StreamExt;
use heck::ToLowerCamelCase;
use subxt::{
	OnlineClient, SubstrateConfig,
	backend::{legacy::LegacyRpcMethods, rpc::RpcClient},
	events::Phase as EventPhase,
	tx::DynamicPayload,
	utils::H256,
};
use subxt_signer::sr25519::Keypair;
use url::Url;

/// A connection to a live node.
///
/// # Example
///
/// ```ignore
/// use pop_e2e::SubxtChainClient;
///
/// let client = SubxtChainClient::connect(&"ws://127.0.0.1:9944".parse()?).await?;
/// pop_e2e::wait_for_blocks(&client, 2).await?;
/// ```
#[derive(Clone)]
pub struct SubxtChainClient {
	online: OnlineClient<SubstrateConfig>,
	legacy: LegacyRpcMethods<SubstrateConfig>,
	endpoint: Url,
}

impl SubxtChainClient {
	/// Connect to a node.
	///
	/// # Arguments
	/// * `endpoint` - WebSocket URL of the node's RPC endpoint.
	pub async fn connect(endpoint: &Url) -> Result<Self, Error> {
		let rpc = RpcClient::from_url(endpoint.as_str())
			.await
			.map_err(|e| connection_failure(endpoint, e))?;
		let online = OnlineClient::<SubstrateConfig>::from_rpc_client(rpc.clone())
			.await
			.map_err(|e| connection_failure(endpoint, e))?;
		let legacy = LegacyRpcMethods::new(rpc);
		Ok(Self { online, legacy, endpoint: endpoint.clone() })
	}

	/// The endpoint this client is connected to.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// The underlying subxt client, e.g. to build calls against the node's metadata.
	pub fn online(&self) -> &OnlineClient<SubstrateConfig> {
		&self.online
	}
}

fn connection_failure(endpoint: &Url, error: impl ToString) -> Error {
	Error::ConnectionFailure { endpoint: endpoint.to_string(), message: error.to_string() }
}

impl From<EventPhase> for Phase {
	fn from(phase: EventPhase) -> Self {
		match phase {
			EventPhase::ApplyExtrinsic(index) => Phase::ApplyExtrinsic(index),
			EventPhase::Initialization => Phase::Initialization,
			EventPhase::Finalization => Phase::Finalization,
		}
	}
}

#[async_trait::async_trait]
impl ChainClient for SubxtChainClient {
	type Call = DynamicPayload;
	type Signer = Keypair;

	async fn subscribe_new_heads(&self) -> Result<HeadStream, Error> {
		let blocks = self
			.online
			.blocks()
			.subscribe_best()
			.await
			.map_err(|e| Error::SubscriptionFailed(e.to_string()))?;
		Ok(Box::pin(blocks.map(|block| {
			let block = block.map_err(|e| Error::SubscriptionFailed(e.to_string()))?;
			// Substrate headers do not carry the author.
			Ok(NewHead { number: block.number().into(), hash: block.hash(), author: None })
		})))
	}

	async fn best_block_hash(&self) -> Result<H256, Error> {
		self.legacy
			.chain_get_block_hash(None)
			.await
			.map_err(|e| Error::RpcRequestFailed {
				method: methods::CHAIN_GET_BLOCK_HASH,
				message: e.to_string(),
			})?
			.ok_or_else(|| Error::BlockNotFound("node returned no best block hash".into()))
	}

	async fn block_extrinsics(&self, at: H256) -> Result<Vec<Extrinsic>, Error> {
		let block = self.online.blocks().at(at).await.map_err(|e| Error::RpcRequestFailed {
			method: methods::CHAIN_GET_BLOCK,
			message: e.to_string(),
		})?;
		let extrinsics = block.extrinsics().await.map_err(|e| Error::RpcRequestFailed {
			method: methods::CHAIN_GET_BLOCK,
			message: e.to_string(),
		})?;
		Ok(extrinsics
			.iter()
			.map(|ext| Extrinsic {
				index: ext.index(),
				hash: H256::from(sp_core::blake2_256(ext.bytes())),
				block_hash: at,
				bytes: ext.bytes().to_vec(),
			})
			.collect())
	}

	async fn events_at(&self, at: H256) -> Result<Vec<EventRecord>, Error> {
		let events = self.online.events().at(at).await.map_err(|e| Error::RpcRequestFailed {
			method: methods::STATE_GET_STORAGE,
			message: e.to_string(),
		})?;
		events
			.iter()
			.map(|event| {
				let event = event.map_err(|e| Error::EventDecoding(e.to_string()))?;
				let fields = event
					.field_values()
					.map_err(|e| Error::EventDecoding(e.to_string()))?
					.into_values()
					.map(|value| value.remove_context())
					.collect();
				Ok(EventRecord {
					index: event.index(),
					phase: event.phase().into(),
					section: event.pallet_name().to_lower_camel_case(),
					method: event.variant_name().to_string(),
					fields,
				})
			})
			.collect()
	}

	async fn sign_and_submit(
		&self,
		call: &Self::Call,
		signer: &Self::Signer,
	) -> Result<H256, Error> {
		self.online
			.tx()
			.sign_and_submit_default(call, signer)
			.await
			.map_err(|e| Error::ExtrinsicSubmissionError(format!("{:?}", e)))
	}

	fn module_error(&self, pallet_index: u8, error_index: u8) -> Option<RegistryError> {
		let metadata = self.online.metadata();
		let pallet = metadata.pallet_by_index(pallet_index)?;
		let variant = pallet.error_variant_by_index(error_index)?;
		Some(RegistryError {
			section: pallet.name().to_lower_camel_case(),
			name: variant.name.clone(),
			docs: variant.docs.clone(),
		})
	}
}
