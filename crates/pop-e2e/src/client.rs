// SPDX-License-Identifier: GPL-3.0

//! The chain client abstraction the resolver is built on.

use crate::{
	Error,
	types::{EventRecord, Extrinsic, NewHead, RegistryError},
};
use futures::Stream;
use std::pin::Pin;
use subxt::utils::H256;

/// A stream of new chain heads. Dropping the stream unsubscribes.
pub type HeadStream = Pin<Box<dyn Stream<Item = Result<NewHead, Error>> + Send>>;

/// The subset of a chain client needed to drive end-to-end tests.
///
/// [`crate::SubxtChainClient`] implements it on top of a live node.
#[async_trait::async_trait]
pub trait ChainClient: Send + Sync {
	/// A submittable call.
	type Call: Send + Sync;
	/// The account signing submitted calls.
	type Signer: Send + Sync;

	/// Subscribe to new best heads.
	///
	/// The first item is the head at the time of subscribing.
	async fn subscribe_new_heads(&self) -> Result<HeadStream, Error>;

	/// Hash of the current best block.
	async fn best_block_hash(&self) -> Result<H256, Error>;

	/// Extrinsics of the block at `at`, in block order.
	async fn block_extrinsics(&self, at: H256) -> Result<Vec<Extrinsic>, Error>;

	/// Events emitted by the block at `at`, in emission order.
	async fn events_at(&self, at: H256) -> Result<Vec<EventRecord>, Error>;

	/// Sign `call` with `signer`, submit it and return the extrinsic hash.
	async fn sign_and_submit(&self, call: &Self::Call, signer: &Self::Signer)
	-> Result<H256, Error>;

	/// Resolve a module error to its metadata entry, if the client has metadata.
	fn module_error(&self, _pallet_index: u8, _error_index: u8) -> Option<RegistryError> {
		None
	}
}
