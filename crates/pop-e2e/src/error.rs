// SPDX-License-Identifier: GPL-3.0

//! Error types for end-to-end helpers.

use std::time::Duration;
use subxt::utils::H256;
use thiserror::Error;

/// Errors that can occur while waiting for blocks, submitting extrinsics or resolving their
/// outcome.
#[derive(Debug, Error)]
pub enum Error {
	/// The best block hash could not be determined.
	#[error("Block not found: {0}")]
	BlockNotFound(String),
	/// Invalid configuration.
	#[error("Configuration error: {0}")]
	Config(String),
	/// Failed to connect to the node.
	#[error("Failed to connect to {endpoint}: {message}")]
	ConnectionFailure {
		/// The endpoint URL that failed to connect.
		endpoint: String,
		/// The error message describing the failure.
		message: String,
	},
	/// Events or extrinsics of a block could not be decoded.
	#[error("Failed to decode block data: {0}")]
	EventDecoding(String),
	/// The extrinsic was not found within the allowed number of blocks.
	#[error("Extrinsic {hash:?} not found after inspecting {attempts} block(s)")]
	ExtrinsicNotFound {
		/// Hash of the submitted extrinsic.
		hash: H256,
		/// Number of blocks inspected.
		attempts: u32,
	},
	#[error("Extrinsic submission error: {0}")]
	ExtrinsicSubmissionError(String),
	#[error("Failed to create keypair from URI: {0}")]
	KeyPairCreation(String),
	#[error("Failed to parse secret URI: {0}")]
	ParseSecretURI(String),
	/// RPC request failed.
	#[error("RPC request `{method}` failed: {message}")]
	RpcRequestFailed {
		/// The RPC method that failed.
		method: &'static str,
		/// The error message describing the failure.
		message: String,
	},
	/// The head subscription ended before the expected number of blocks was observed.
	#[error("Head subscription closed unexpectedly")]
	SubscriptionClosed,
	#[error("Failed to subscribe to new heads: {0}")]
	SubscriptionFailed(String),
	/// The extrinsic was not resolved before the deadline.
	#[error("Extrinsic {hash:?} not resolved within {timeout:?}")]
	Timeout {
		/// Hash of the submitted extrinsic.
		hash: H256,
		/// The deadline that elapsed.
		timeout: Duration,
	},
}
