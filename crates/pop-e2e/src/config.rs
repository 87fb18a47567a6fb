// SPDX-License-Identifier: GPL-3.0

//! Configuration of end-to-end helpers, loaded from the environment.

use crate::{Error, strings::env};
use std::time::Duration;
use strum_macros::{AsRefStr, Display, EnumString};
use url::Url;

/// Default node endpoint, as exposed by a node started with `--dev`.
pub const DEFAULT_NODE_URL: &str = "ws://127.0.0.1:9944";
/// Default number of blocks inspected before giving up on an extrinsic.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;
/// Default deadline for resolving an extrinsic.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Which block is inspected after each new head.
#[derive(AsRefStr, Clone, Copy, Debug, Default, Display, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BlockSelection {
	/// The block announced by the head subscription. A single subscription is kept for the
	/// whole resolution, so every produced block is inspected.
	#[default]
	Observed,
	/// The best block at the time of the lookup, after waiting for one new block.
	Best,
}

/// Bounds and strategy for resolving a submitted extrinsic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveOptions {
	/// Maximum number of blocks to inspect. `None` retries forever.
	pub max_attempts: Option<u32>,
	/// Deadline for the whole resolution. `None` waits forever.
	pub timeout: Option<Duration>,
	pub block_selection: BlockSelection,
}

impl Default for ResolveOptions {
	fn default() -> Self {
		Self {
			max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
			timeout: Some(DEFAULT_TIMEOUT),
			block_selection: BlockSelection::default(),
		}
	}
}

impl ResolveOptions {
	/// Retry until the extrinsic is found, however long it takes.
	pub fn unbounded() -> Self {
		Self { max_attempts: None, timeout: None, ..Default::default() }
	}

	pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
		self.max_attempts = Some(max_attempts);
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	pub fn with_block_selection(mut self, block_selection: BlockSelection) -> Self {
		self.block_selection = block_selection;
		self
	}
}

/// Configuration of an end-to-end test session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct E2eConfig {
	/// WebSocket endpoint of the node under test.
	pub node_url: Url,
	pub resolve: ResolveOptions,
}

impl Default for E2eConfig {
	fn default() -> Self {
		Self {
			node_url: Url::parse(DEFAULT_NODE_URL).expect("default node url is valid"),
			resolve: ResolveOptions::default(),
		}
	}
}

impl E2eConfig {
	/// Load the configuration from the environment, falling back to defaults.
	///
	/// * `POP_E2E_NODE_URL` - node endpoint.
	/// * `POP_E2E_MAX_ATTEMPTS` - blocks to inspect, `0` for no limit.
	/// * `POP_E2E_TIMEOUT_SECS` - resolution deadline in seconds, `0` for no deadline.
	/// * `POP_E2E_BLOCK_SELECTION` - `observed` or `best`.
	pub fn from_env() -> Result<Self, Error> {
		let mut config = Self::default();
		if let Some(url) = var(env::NODE_URL) {
			config.node_url = Url::parse(&url)
				.map_err(|e| Error::Config(format!("{}: invalid url `{url}`: {e}", env::NODE_URL)))?;
		}
		if let Some(attempts) = var(env::MAX_ATTEMPTS) {
			let attempts: u32 = parse(env::MAX_ATTEMPTS, &attempts)?;
			config.resolve.max_attempts = (attempts > 0).then_some(attempts);
		}
		if let Some(secs) = var(env::TIMEOUT_SECS) {
			let secs: u64 = parse(env::TIMEOUT_SECS, &secs)?;
			config.resolve.timeout = (secs > 0).then(|| Duration::from_secs(secs));
		}
		if let Some(selection) = var(env::BLOCK_SELECTION) {
			config.resolve.block_selection = parse(env::BLOCK_SELECTION, &selection)?;
		}
		Ok(config)
	}
}

fn var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse<T>(name: &str, value: &str) -> Result<T, Error>
where
	T: std::str::FromStr,
	T::Err: std::fmt::Display,
{
	value
		.trim()
		.parse()
		.map_err(|e| Error::Config(format!("{name}: invalid value `{value}`: {e}")))
}
