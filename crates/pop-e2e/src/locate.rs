// SPDX-License-Identifier: GPL-3.0

use crate::{
	ChainClient, Error,
	strings::targets,
	types::{EventRecord, Extrinsic},
};
use subxt::utils::H256;

/// The result of looking for an extrinsic within a block.
#[derive(Clone, Debug, PartialEq)]
pub struct LocatedExtrinsic {
	/// The block that was inspected.
	pub block_hash: H256,
	/// The extrinsic, if the block contains it.
	pub extrinsic: Option<Extrinsic>,
	/// Events emitted while applying the extrinsic. Empty if it was not found.
	pub events: Vec<EventRecord>,
}

impl LocatedExtrinsic {
	/// Whether events of the extrinsic were found.
	pub fn is_found(&self) -> bool {
		!self.events.is_empty()
	}
}

/// Looks for an extrinsic within the current best block.
///
/// # Arguments
/// * `client` - The client used to interact with the chain.
/// * `extrinsic_hash` - Hash of the submitted extrinsic.
pub async fn locate_in_best_block<C: ChainClient + ?Sized>(
	client: &C,
	extrinsic_hash: H256,
) -> Result<LocatedExtrinsic, Error> {
	let best = client.best_block_hash().await?;
	locate_in_block(client, best, extrinsic_hash).await
}

/// Looks for an extrinsic within the block at `block_hash` and collects the events it emitted.
///
/// A block that does not contain the extrinsic is not an error: the result then holds no
/// extrinsic and no events.
///
/// # Arguments
/// * `client` - The client used to interact with the chain.
/// * `block_hash` - The block to inspect.
/// * `extrinsic_hash` - Hash of the submitted extrinsic.
pub async fn locate_in_block<C: ChainClient + ?Sized>(
	client: &C,
	block_hash: H256,
	extrinsic_hash: H256,
) -> Result<LocatedExtrinsic, Error> {
	let extrinsic = client
		.block_extrinsics(block_hash)
		.await?
		.into_iter()
		.find(|ext| ext.hash == extrinsic_hash);
	let Some(extrinsic) = extrinsic else {
		log::debug!(
			target: targets::EXTRINSICS,
			"Extrinsic {extrinsic_hash:?} is missing in the block {block_hash:?}"
		);
		return Ok(LocatedExtrinsic { block_hash, extrinsic: None, events: vec![] });
	};

	let events = client
		.events_at(block_hash)
		.await?
		.into_iter()
		.filter(|record| record.phase.is_apply_extrinsic(extrinsic.index))
		.collect();
	Ok(LocatedExtrinsic { block_hash, extrinsic: Some(extrinsic), events })
}
