// SPDX-License-Identifier: GPL-3.0

//! Filtering and classification of the events emitted by an extrinsic.

use crate::{
	strings::{dispatch_error, system},
	types::EventRecord,
};
use scale_value::{Composite, Value, ValueDef};

/// Applies `on_found` to every event of `section` whose method is one of `methods`.
///
/// Input order is preserved and every match is projected exactly once.
///
/// # Arguments
/// * `events` - The events to filter.
/// * `section` - Lower camel case pallet name, e.g. `system`.
/// * `methods` - Accepted event variant names.
/// * `on_found` - Projection applied to each matching event.
pub fn filter_and_apply<T>(
	events: &[EventRecord],
	section: &str,
	methods: &[&str],
	on_found: impl FnMut(&EventRecord) -> T,
) -> Vec<T> {
	events
		.iter()
		.filter(|record| record.section == section && methods.contains(&record.method.as_str()))
		.map(on_found)
		.collect()
}

/// The dispatch error carried by an `ExtrinsicFailed` event.
pub fn dispatch_error(record: &EventRecord) -> Option<Value> {
	record.fields.first().cloned()
}

/// The dispatch info carried by an `ExtrinsicSuccess` or `ExtrinsicFailed` event.
///
/// `ExtrinsicSuccess { dispatch_info }` carries it first while
/// `ExtrinsicFailed { dispatch_error, dispatch_info }` carries it second.
pub fn dispatch_info(record: &EventRecord) -> Option<Value> {
	let position = if record.method == system::EXTRINSIC_SUCCESS { 0 } else { 1 };
	record.fields.get(position).cloned()
}

/// The dispatch error of the first `system.ExtrinsicFailed` event, if any.
pub fn extract_error(events: &[EventRecord]) -> Option<Value> {
	filter_and_apply(events, system::SECTION, &[system::EXTRINSIC_FAILED], dispatch_error)
		.into_iter()
		.next()
		.flatten()
}

/// Whether the events contain a `system.ExtrinsicSuccess` event.
pub fn is_extrinsic_successful(events: &[EventRecord]) -> bool {
	!filter_and_apply(events, system::SECTION, &[system::EXTRINSIC_SUCCESS], |_| ()).is_empty()
}

/// The dispatch info of the first `system.ExtrinsicSuccess` or `system.ExtrinsicFailed` event.
pub fn extract_info(events: &[EventRecord]) -> Option<Value> {
	filter_and_apply(
		events,
		system::SECTION,
		&[system::EXTRINSIC_FAILED, system::EXTRINSIC_SUCCESS],
		dispatch_info,
	)
	.into_iter()
	.next()
	.flatten()
}

/// Pallet and error indices of a `DispatchError::Module` error.
///
/// Handles both the current `error: [u8; 4]` and the legacy `error: u8` layouts.
pub fn module_error_indices(error: &Value) -> Option<(u8, u8)> {
	let ValueDef::Variant(variant) = &error.value else { return None };
	if variant.name != dispatch_error::MODULE {
		return None;
	}
	// Some runtimes wrap the module error in an unnamed single field.
	let fields = match &variant.values {
		Composite::Named(fields) => fields,
		Composite::Unnamed(values) => match values.first().map(|v| &v.value) {
			Some(ValueDef::Composite(Composite::Named(fields))) => fields,
			_ => return None,
		},
	};
	let field = |name: &str| fields.iter().find(|(n, _)| n == name).map(|(_, v)| v);
	let index = u8::try_from(field(dispatch_error::INDEX)?.as_u128()?).ok()?;
	let error = field(dispatch_error::ERROR)?;
	let error = match &error.value {
		ValueDef::Composite(bytes) => bytes.values().next()?.as_u128()?,
		_ => error.as_u128()?,
	};
	Some((index, u8::try_from(error).ok()?))
}
