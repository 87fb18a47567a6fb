// SPDX-License-Identifier: GPL-3.0

//! Background logging of every new block and its events.

use crate::{ChainClient, strings::targets, types::NewHead};
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle to a running block and event logger.
///
/// Dropping the handle stops the logger.
pub struct EventLogger {
	token: CancellationToken,
	handle: Option<JoinHandle<()>>,
}

impl EventLogger {
	/// Stop logging and wait for the background task to finish.
	pub async fn stop(mut self) {
		self.token.cancel();
		if let Some(handle) = self.handle.take() {
			if let Err(e) = handle.await {
				log::warn!(target: targets::EVENTS, "event logger task failed: {e}");
			}
		}
	}

	/// Whether the background task has finished, e.g. because the subscription ended.
	pub fn is_finished(&self) -> bool {
		self.handle.as_ref().is_none_or(JoinHandle::is_finished)
	}
}

impl Drop for EventLogger {
	fn drop(&mut self) {
		self.token.cancel();
	}
}

/// Logs every new block and each of its events at debug level, until the returned handle is
/// stopped or dropped.
///
/// # Arguments
/// * `client` - The client used to interact with the chain.
/// * `name` - Label of the chain in log lines, e.g. `relay` or `parachain`.
pub fn log_events<C: ChainClient + 'static>(
	client: Arc<C>,
	name: impl Into<String>,
) -> EventLogger {
	let name = name.into();
	let token = CancellationToken::new();
	let cancelled = token.clone();
	let handle = tokio::spawn(async move {
		let mut heads = match client.subscribe_new_heads().await {
			Ok(heads) => heads,
			Err(e) => {
				log::warn!(
					target: targets::EVENTS,
					"{name}: unable to subscribe to new heads: {e}"
				);
				return;
			},
		};
		loop {
			tokio::select! {
				biased;

				_ = cancelled.cancelled() => break,

				head = heads.next() => match head {
					Some(Ok(head)) => log_block(client.as_ref(), &name, &head).await,
					Some(Err(e)) => log::warn!(target: targets::EVENTS, "{name}: {e}"),
					None => break,
				},
			}
		}
	});
	EventLogger { token, handle: Some(handle) }
}

async fn log_block<C: ChainClient + ?Sized>(client: &C, name: &str, head: &NewHead) {
	log::debug!(
		target: targets::EVENTS,
		"------------- {name} BLOCK#{}: author {}, hash {:?}",
		head.number,
		head.author_label(),
		head.hash
	);
	let events = match client.events_at(head.hash).await {
		Ok(events) => events,
		Err(e) => {
			log::warn!(
				target: targets::EVENTS,
				"{name}: unable to fetch events of block #{}: {e}",
				head.number
			);
			return;
		},
	};
	for (i, event) in events.iter().enumerate() {
		log::debug!(
			target: targets::EVENTS,
			"{name} Event : {i} {:?} {} {}",
			head.hash,
			event.section,
			event.method
		);
	}
}
