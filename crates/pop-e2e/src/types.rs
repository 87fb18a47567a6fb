// SPDX-License-Identifier: GPL-3.0

//! Plain data types exchanged between the chain client and the resolver.

use crate::strings::console::UNKNOWN_AUTHOR;
use scale_value::Value;
use subxt::utils::H256;

/// A new chain head as delivered by a head subscription.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewHead {
	/// Block number.
	pub number: u64,
	/// Block hash.
	pub hash: H256,
	/// Block author, when the client is able to derive it.
	pub author: Option<String>,
}

impl NewHead {
	/// The author for display purposes.
	pub fn author_label(&self) -> &str {
		self.author.as_deref().unwrap_or(UNKNOWN_AUTHOR)
	}
}

/// The phase of block execution in which an event was emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Applying an extrinsic, identified by its index within the block.
	ApplyExtrinsic(u32),
	/// Block initialization.
	Initialization,
	/// Block finalization.
	Finalization,
}

impl Phase {
	/// Whether the event was emitted while applying the extrinsic at `index`.
	pub fn is_apply_extrinsic(&self, index: u32) -> bool {
		matches!(self, Phase::ApplyExtrinsic(i) if *i == index)
	}
}

/// A decoded event together with the phase in which it was emitted.
#[derive(Clone, Debug, PartialEq)]
pub struct EventRecord {
	/// Position of the event within the block's event list.
	pub index: u32,
	/// Phase in which the event was emitted.
	pub phase: Phase,
	/// Lower camel case name of the emitting pallet, e.g. `system`.
	pub section: String,
	/// Name of the event variant, e.g. `ExtrinsicSuccess`.
	pub method: String,
	/// The event data, positionally.
	pub fields: Vec<Value>,
}

impl EventRecord {
	/// Whether the event matches the given section and method.
	pub fn is(&self, section: &str, method: &str) -> bool {
		self.section == section && self.method == method
	}
}

/// An extrinsic found within a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extrinsic {
	/// Position of the extrinsic within its block.
	pub index: u32,
	/// Blake2-256 hash of the encoded extrinsic.
	pub hash: H256,
	/// Hash of the block containing the extrinsic.
	pub block_hash: H256,
	/// The encoded extrinsic.
	pub bytes: Vec<u8>,
}

/// A dispatch error resolved against the runtime metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryError {
	/// Lower camel case name of the pallet that raised the error.
	pub section: String,
	/// Name of the error variant.
	pub name: String,
	/// Documentation of the error variant.
	pub docs: Vec<String>,
}

impl std::fmt::Display for RegistryError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}", self.section, self.name)?;
		if !self.docs.is_empty() {
			write!(f, ": {}", self.docs.join(" "))?;
		}
		Ok(())
	}
}
