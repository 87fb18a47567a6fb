// SPDX-License-Identifier: GPL-3.0

//! String constants shared across the crate.

/// Log targets, one per concern.
pub mod targets {
	pub const BLOCKS: &str = "pop_e2e::blocks";
	pub const EVENTS: &str = "pop_e2e::events";
	pub const EXTRINSICS: &str = "pop_e2e::extrinsics";
}

/// Unconditional console output.
pub mod console {
	/// Printed before every extrinsic submission.
	pub const EXTRINSIC_CALL_MARKER: &str =
		"-------------- EXTRINSIC CALL -------------------------------";
	/// Printed in place of an author the client cannot derive.
	pub const UNKNOWN_AUTHOR: &str = "unknown";
}

/// Names of the `System` pallet events used to classify an extrinsic outcome.
pub mod system {
	/// Section of the `System` pallet as reported in event records.
	pub const SECTION: &str = "system";
	pub const EXTRINSIC_SUCCESS: &str = "ExtrinsicSuccess";
	pub const EXTRINSIC_FAILED: &str = "ExtrinsicFailed";
}

/// Names found inside a decoded `DispatchError`.
pub mod dispatch_error {
	pub const MODULE: &str = "Module";
	pub const INDEX: &str = "index";
	pub const ERROR: &str = "error";
}

/// JSON-RPC method names used for error reporting.
pub mod rpc {
	pub mod methods {
		pub const CHAIN_GET_BLOCK: &str = "chain_getBlock";
		pub const CHAIN_GET_BLOCK_HASH: &str = "chain_getBlockHash";
		pub const STATE_GET_STORAGE: &str = "state_getStorage";
	}
}

/// Environment variables read by [`crate::E2eConfig::from_env`].
pub mod env {
	pub const NODE_URL: &str = "POP_E2E_NODE_URL";
	pub const MAX_ATTEMPTS: &str = "POP_E2E_MAX_ATTEMPTS";
	pub const TIMEOUT_SECS: &str = "POP_E2E_TIMEOUT_SECS";
	pub const BLOCK_SELECTION: &str = "POP_E2E_BLOCK_SELECTION";
}
