// SPDX-License-Identifier: GPL-3.0

use crate::{ChainClient, Error, strings::targets, types::NewHead};
use futures::StreamExt;

/// Number of blocks [`wait_for_blocks`] callers usually wait for.
pub const DEFAULT_BLOCKS_TO_WAIT: u32 = 1;

/// Waits until `number_of_blocks` new blocks have been produced.
///
/// The head subscription yields the current head first, so this returns once
/// `1 + number_of_blocks` heads have been observed. The subscription is dropped before
/// returning.
///
/// # Arguments
/// * `client` - The client used to interact with the chain.
/// * `number_of_blocks` - Number of new blocks to wait for.
pub async fn wait_for_blocks<C: ChainClient + ?Sized>(
	client: &C,
	number_of_blocks: u32,
) -> Result<(), Error> {
	wait_for_head(client, number_of_blocks).await.map(|_| ())
}

/// Like [`wait_for_blocks`], returning the last observed head.
pub(crate) async fn wait_for_head<C: ChainClient + ?Sized>(
	client: &C,
	number_of_blocks: u32,
) -> Result<NewHead, Error> {
	let mut heads = client.subscribe_new_heads().await?;
	let target = number_of_blocks as usize + 1;
	let mut count = 0;
	while let Some(head) = heads.next().await {
		let head = head?;
		report_head(&head);
		count += 1;
		if count == target {
			drop(heads);
			return Ok(head);
		}
	}
	Err(Error::SubscriptionClosed)
}

/// Prints the progress line for a newly observed head.
pub(crate) fn report_head(head: &NewHead) {
	println!("{}", elapsed_message(head));
	log::debug!(target: targets::BLOCKS, "observed head #{} ({:?})", head.number, head.hash);
}

fn elapsed_message(head: &NewHead) -> String {
	format!("One block elapsed : #{}: author : {}", head.number, head.author_label())
}
