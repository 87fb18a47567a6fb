// SPDX-License-Identifier: GPL-3.0

use crate::{
	ChainClient, LocatedExtrinsic,
	events::{extract_error, extract_info, is_extrinsic_successful, module_error_indices},
	types::{EventRecord, Extrinsic, RegistryError},
};
use scale_value::Value;
use subxt::utils::H256;

/// The outcome of an extrinsic included in a block.
///
/// A failed dispatch is not an error: inspect [`ExtrinsicOutcome::successful`] and
/// [`ExtrinsicOutcome::error`].
#[derive(Clone, Debug, PartialEq)]
pub struct ExtrinsicOutcome {
	/// Hash of the submitted extrinsic.
	pub hash: H256,
	/// Hash of the block the events were found in.
	pub block_hash: H256,
	pub extrinsic: Option<Extrinsic>,
	/// Events emitted while applying the extrinsic, in emission order. Never empty.
	pub events: Vec<EventRecord>,
	pub successful: bool,
	/// The dispatch error, for failed extrinsics.
	pub error: Option<Value>,
	/// The dispatch info (weight, class, fee payment).
	pub info: Option<Value>,
	/// The dispatch error resolved against the runtime metadata, for module errors.
	pub registry_error: Option<RegistryError>,
}

impl ExtrinsicOutcome {
	/// Classifies the events of an extrinsic.
	///
	/// Returns `None` while no event of the extrinsic has been observed.
	pub fn from_events(
		hash: H256,
		block_hash: H256,
		extrinsic: Option<Extrinsic>,
		events: Vec<EventRecord>,
	) -> Option<Self> {
		if events.is_empty() {
			return None;
		}
		Some(Self {
			hash,
			block_hash,
			extrinsic,
			successful: is_extrinsic_successful(&events),
			error: extract_error(&events),
			info: extract_info(&events),
			registry_error: None,
			events,
		})
	}

	/// Classifies a located extrinsic, resolving module errors through `client`.
	pub fn from_located<C: ChainClient + ?Sized>(
		client: &C,
		hash: H256,
		located: LocatedExtrinsic,
	) -> Option<Self> {
		let mut outcome =
			Self::from_events(hash, located.block_hash, located.extrinsic, located.events)?;
		outcome.registry_error = outcome
			.error
			.as_ref()
			.and_then(module_error_indices)
			.and_then(|(pallet, error)| client.module_error(pallet, error));
		Some(outcome)
	}
}
