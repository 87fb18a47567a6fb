// SPDX-License-Identifier: GPL-3.0

#![doc = include_str!("../README.md")]

/// Waiting for blocks to be produced.
mod blocks;
/// The chain client abstraction.
mod client;
mod config;
mod error;
/// Classification of the events emitted by an extrinsic.
pub mod events;
mod locate;
mod logger;
mod online;
mod outcome;
mod resolve;
mod signer;
mod strings;
#[cfg(test)]
mod testing;
mod types;

pub use blocks::{DEFAULT_BLOCKS_TO_WAIT, wait_for_blocks};
pub use client::{ChainClient, HeadStream};
pub use config::{
	BlockSelection, DEFAULT_MAX_ATTEMPTS, DEFAULT_NODE_URL, DEFAULT_TIMEOUT, E2eConfig,
	ResolveOptions,
};
pub use error::Error;
pub use events::{extract_error, extract_info, filter_and_apply, is_extrinsic_successful};
pub use locate::{LocatedExtrinsic, locate_in_best_block, locate_in_block};
pub use logger::{EventLogger, log_events};
pub use online::SubxtChainClient;
pub use outcome::ExtrinsicOutcome;
pub use resolve::{resolve_extrinsic, submit_and_resolve};
pub use signer::create_signer;
pub use types::{EventRecord, Extrinsic, NewHead, Phase, RegistryError};
// External export from subxt.
pub use subxt::{tx::DynamicPayload, utils::H256};

/// Default log filter used by [`init_logger`] when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "pop_e2e=debug";

/// Installs an `env_logger` logger honouring `RUST_LOG`.
///
/// Safe to call from every test: only the first call installs the logger.
pub fn init_logger() {
	let _ = env_logger::Builder::from_env(
		env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER),
	)
	.is_test(true)
	.try_init();
}
