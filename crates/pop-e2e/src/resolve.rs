// SPDX-License-Identifier: GPL-3.0

use crate::{
	BlockSelection, ChainClient, Error, ExtrinsicOutcome, HeadStream, LocatedExtrinsic,
	ResolveOptions,
	blocks::{report_head, wait_for_blocks},
	locate::{locate_in_best_block, locate_in_block},
	strings::{console::EXTRINSIC_CALL_MARKER, targets},
};
use futures::StreamExt;
use subxt::utils::H256;

/// Waits for the events of a submitted extrinsic to appear in a block.
///
/// Every new block is one attempt. With [`BlockSelection::Observed`] each block announced by
/// a single head subscription is inspected; with [`BlockSelection::Best`] the best block is
/// inspected after waiting for one new block.
///
/// # Arguments
/// * `client` - The client used to interact with the chain.
/// * `extrinsic_hash` - Hash of the submitted extrinsic.
/// * `options` - Bounds and block selection strategy.
pub async fn resolve_extrinsic<C: ChainClient + ?Sized>(
	client: &C,
	extrinsic_hash: H256,
	options: &ResolveOptions,
) -> Result<LocatedExtrinsic, Error> {
	let heads = subscribe_if_observing(client, options).await?;
	resolve(client, heads, extrinsic_hash, options).await
}

/// Signs and submits a call, then waits for its outcome.
///
/// Submission failures are returned as [`Error::ExtrinsicSubmissionError`] and not retried.
/// A dispatch failure is not an error; it is reported by the returned outcome.
///
/// # Arguments
/// * `client` - The client used to interact with the chain.
/// * `sender` - The account signing the call.
/// * `call` - The call to submit.
/// * `options` - Bounds and block selection strategy.
pub async fn submit_and_resolve<C: ChainClient + ?Sized>(
	client: &C,
	sender: &C::Signer,
	call: &C::Call,
	options: &ResolveOptions,
) -> Result<ExtrinsicOutcome, Error> {
	println!("{EXTRINSIC_CALL_MARKER}");
	// Subscribe first so the block including the extrinsic cannot be missed.
	let heads = subscribe_if_observing(client, options).await?;
	let hash = client.sign_and_submit(call, sender).await?;
	log::debug!(target: targets::EXTRINSICS, "submitted extrinsic {hash:?}");
	let located = resolve(client, heads, hash, options).await?;
	// Resolution only completes once events were found.
	ExtrinsicOutcome::from_located(client, hash, located)
		.ok_or(Error::ExtrinsicNotFound { hash, attempts: 0 })
}

async fn subscribe_if_observing<C: ChainClient + ?Sized>(
	client: &C,
	options: &ResolveOptions,
) -> Result<Option<HeadStream>, Error> {
	match options.block_selection {
		BlockSelection::Observed => Ok(Some(client.subscribe_new_heads().await?)),
		BlockSelection::Best => Ok(None),
	}
}

async fn resolve<C: ChainClient + ?Sized>(
	client: &C,
	heads: Option<HeadStream>,
	extrinsic_hash: H256,
	options: &ResolveOptions,
) -> Result<LocatedExtrinsic, Error> {
	let attempts = retry(client, heads, extrinsic_hash, options.max_attempts);
	match options.timeout {
		Some(timeout) => tokio::time::timeout(timeout, attempts)
			.await
			.map_err(|_| Error::Timeout { hash: extrinsic_hash, timeout })?,
		None => attempts.await,
	}
}

async fn retry<C: ChainClient + ?Sized>(
	client: &C,
	mut heads: Option<HeadStream>,
	extrinsic_hash: H256,
	max_attempts: Option<u32>,
) -> Result<LocatedExtrinsic, Error> {
	let mut attempts = 0;
	loop {
		if max_attempts.is_some_and(|max| attempts >= max) {
			return Err(Error::ExtrinsicNotFound { hash: extrinsic_hash, attempts });
		}
		let located = match heads.as_mut() {
			Some(heads) => {
				let head = heads.next().await.ok_or(Error::SubscriptionClosed)??;
				report_head(&head);
				locate_in_block(client, head.hash, extrinsic_hash).await?
			},
			None => {
				wait_for_blocks(client, 1).await?;
				locate_in_best_block(client, extrinsic_hash).await?
			},
		};
		attempts += 1;
		if located.is_found() {
			log::debug!(
				target: targets::EXTRINSICS,
				"found {} event(s) of extrinsic {extrinsic_hash:?} in block {:?} after {attempts} attempt(s)",
				located.events.len(),
				located.block_hash,
			);
			return Ok(located);
		}
	}
}
