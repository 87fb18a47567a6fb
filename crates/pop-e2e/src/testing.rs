// SPDX-License-Identifier: GPL-3.0

//! In-memory chain used by the unit tests.
//!
//! Blocks are produced lazily: a head subscription first yields the current best block and
//! then produces a new block each time it is polled. Every block contains an inherent at
//! index 0 which emits `system.ExtrinsicSuccess`, so tests also cover filtering by phase.
//! [`MockChain::no_events`] turns every event list empty.

use crate::{
	ChainClient, Error, HeadStream,
	strings::system,
	types::{EventRecord, Extrinsic, NewHead, Phase, RegistryError},
};
use futures::Stream;
use scale_value::Value;
use std::{
	collections::HashMap,
	pin::Pin,
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
	task::{Context, Poll},
};
use subxt::utils::H256;

/// Hash of the mock block at `number`.
pub(crate) fn block_hash(number: u64) -> H256 {
	H256::from_low_u64_be(number + 1)
}

fn block_number(hash: H256) -> u64 {
	hash.to_low_u64_be().saturating_sub(1)
}

/// Dispatch info as emitted by the `System` pallet.
pub(crate) fn dispatch_info(weight: u128) -> Value {
	Value::named_composite([
		("weight", Value::u128(weight)),
		("class", Value::unnamed_variant("Normal", [])),
		("pays_fee", Value::unnamed_variant("Yes", [])),
	])
}

/// A `DispatchError::Module` error.
pub(crate) fn module_error(index: u8, error: u8) -> Value {
	Value::named_variant(
		"Module",
		[
			("index", Value::u128(index.into())),
			("error", Value::unnamed_composite([error, 0, 0, 0].map(|b| Value::u128(b.into())))),
		],
	)
}

/// An event emitted while applying a submitted call: `(section, method, fields)`.
pub(crate) type MockEvent = (&'static str, &'static str, Vec<Value>);

/// A call submitted to the mock chain.
#[derive(Clone, Debug, Default)]
pub(crate) struct MockCall {
	/// The encoded extrinsic.
	pub bytes: Vec<u8>,
	/// Number of blocks after the current best block in which the call is included.
	pub include_after: u64,
	/// Events emitted by the call once included.
	pub events: Vec<MockEvent>,
	/// Whether the node rejects the submission.
	pub reject: bool,
}

impl MockCall {
	/// A call included in the next block which succeeds.
	pub fn succeeding(bytes: &[u8]) -> Self {
		Self {
			bytes: bytes.to_vec(),
			include_after: 1,
			events: vec![(system::SECTION, system::EXTRINSIC_SUCCESS, vec![dispatch_info(10)])],
			reject: false,
		}
	}

	/// A call included in the next block which fails with a module error.
	pub fn failing(bytes: &[u8], pallet: u8, error: u8) -> Self {
		Self {
			events: vec![(
				system::SECTION,
				system::EXTRINSIC_FAILED,
				vec![module_error(pallet, error), dispatch_info(20)],
			)],
			..Self::succeeding(bytes)
		}
	}

	pub fn included_after(mut self, blocks: u64) -> Self {
		self.include_after = blocks;
		self
	}
}

#[derive(Default)]
struct MockBlock {
	extrinsics: Vec<Vec<u8>>,
	events: Vec<(Phase, MockEvent)>,
}

#[derive(Default)]
struct MockState {
	best: u64,
	blocks: HashMap<u64, MockBlock>,
	/// Subscriptions stop producing blocks once the best block reaches this number.
	stall_at: Option<u64>,
	/// Produce a block on every best block query, as if the chain advanced in between.
	advance_on_best_query: bool,
	fail_events: bool,
	/// Blocks emit no events at all, not even the inherent's.
	no_events: bool,
	panic_on_events: bool,
}

#[derive(Default)]
struct Counters {
	delivered: AtomicUsize,
	subscribed: AtomicUsize,
	unsubscribed: AtomicUsize,
	events_fetched: AtomicUsize,
	best_queries: AtomicUsize,
}

/// An in-memory [`ChainClient`].
#[derive(Clone, Default)]
pub(crate) struct MockChain {
	state: Arc<Mutex<MockState>>,
	counters: Arc<Counters>,
}

impl MockChain {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stop producing blocks once the best block reaches `number`.
	pub fn stall_at(self, number: u64) -> Self {
		self.state.lock().unwrap().stall_at = Some(number);
		self
	}

	pub fn advance_on_best_query(self) -> Self {
		self.state.lock().unwrap().advance_on_best_query = true;
		self
	}

	pub fn fail_events(self) -> Self {
		self.state.lock().unwrap().fail_events = true;
		self
	}

	pub fn no_events(self) -> Self {
		self.state.lock().unwrap().no_events = true;
		self
	}

	pub fn panic_on_events(self) -> Self {
		self.state.lock().unwrap().panic_on_events = true;
		self
	}

	/// Include `bytes` in the block at `number`, emitting `events`.
	pub fn include(&self, number: u64, bytes: &[u8], events: Vec<MockEvent>) -> H256 {
		let mut state = self.state.lock().unwrap();
		let block = state.blocks.entry(number).or_default();
		// Index 0 is the inherent.
		let index = block.extrinsics.len() as u32 + 1;
		block.extrinsics.push(bytes.to_vec());
		block.events.extend(events.into_iter().map(|e| (Phase::ApplyExtrinsic(index), e)));
		H256::from(sp_core::blake2_256(bytes))
	}

	pub fn best(&self) -> u64 {
		self.state.lock().unwrap().best
	}

	/// Number of heads delivered across all subscriptions.
	pub fn delivered(&self) -> usize {
		self.counters.delivered.load(Ordering::SeqCst)
	}

	pub fn subscribed(&self) -> usize {
		self.counters.subscribed.load(Ordering::SeqCst)
	}

	pub fn unsubscribed(&self) -> usize {
		self.counters.unsubscribed.load(Ordering::SeqCst)
	}

	pub fn events_fetched(&self) -> usize {
		self.counters.events_fetched.load(Ordering::SeqCst)
	}

	pub fn best_queries(&self) -> usize {
		self.counters.best_queries.load(Ordering::SeqCst)
	}

	fn inherent(number: u64) -> Vec<u8> {
		[&[0u8][..], &number.to_le_bytes()].concat()
	}
}

/// A head subscription; counts itself as unsubscribed when dropped.
struct MockSubscription {
	state: Arc<Mutex<MockState>>,
	counters: Arc<Counters>,
	initial: bool,
}

impl Stream for MockSubscription {
	type Item = Result<NewHead, Error>;

	fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
		let this = self.get_mut();
		let mut state = this.state.lock().unwrap();
		if this.initial {
			this.initial = false;
		} else if state.stall_at.is_some_and(|stall| state.best >= stall) {
			return Poll::Pending;
		} else {
			state.best += 1;
		}
		this.counters.delivered.fetch_add(1, Ordering::SeqCst);
		let number = state.best;
		Poll::Ready(Some(Ok(NewHead { number, hash: block_hash(number), author: None })))
	}
}

impl Drop for MockSubscription {
	fn drop(&mut self) {
		self.counters.unsubscribed.fetch_add(1, Ordering::SeqCst);
	}
}

#[async_trait::async_trait]
impl ChainClient for MockChain {
	type Call = MockCall;
	type Signer = ();

	async fn subscribe_new_heads(&self) -> Result<HeadStream, Error> {
		self.counters.subscribed.fetch_add(1, Ordering::SeqCst);
		Ok(Box::pin(MockSubscription {
			state: self.state.clone(),
			counters: self.counters.clone(),
			initial: true,
		}))
	}

	async fn best_block_hash(&self) -> Result<H256, Error> {
		self.counters.best_queries.fetch_add(1, Ordering::SeqCst);
		let mut state = self.state.lock().unwrap();
		if state.advance_on_best_query {
			state.best += 1;
		}
		Ok(block_hash(state.best))
	}

	async fn block_extrinsics(&self, at: H256) -> Result<Vec<Extrinsic>, Error> {
		let number = block_number(at);
		let state = self.state.lock().unwrap();
		let scripted =
			state.blocks.get(&number).map(|b| b.extrinsics.clone()).unwrap_or_default();
		Ok(std::iter::once(Self::inherent(number))
			.chain(scripted)
			.enumerate()
			.map(|(index, bytes)| Extrinsic {
				index: index as u32,
				hash: H256::from(sp_core::blake2_256(&bytes)),
				block_hash: at,
				bytes,
			})
			.collect())
	}

	async fn events_at(&self, at: H256) -> Result<Vec<EventRecord>, Error> {
		self.counters.events_fetched.fetch_add(1, Ordering::SeqCst);
		if self.state.lock().unwrap().panic_on_events {
			panic!("mock panic");
		}
		let state = self.state.lock().unwrap();
		if state.fail_events {
			return Err(Error::EventDecoding("mock failure".into()));
		}
		if state.no_events {
			return Ok(Vec::new());
		}
		let inherent = (
			Phase::ApplyExtrinsic(0),
			(system::SECTION, system::EXTRINSIC_SUCCESS, vec![dispatch_info(1)]),
		);
		let scripted =
			state.blocks.get(&block_number(at)).map(|b| b.events.clone()).unwrap_or_default();
		Ok(std::iter::once(inherent)
			.chain(scripted)
			.enumerate()
			.map(|(index, (phase, (section, method, fields)))| EventRecord {
				index: index as u32,
				phase,
				section: section.into(),
				method: method.into(),
				fields,
			})
			.collect())
	}

	async fn sign_and_submit(
		&self,
		call: &Self::Call,
		_signer: &Self::Signer,
	) -> Result<H256, Error> {
		if call.reject {
			return Err(Error::ExtrinsicSubmissionError("Invalid Transaction".into()));
		}
		let target = self.best() + call.include_after;
		Ok(self.include(target, &call.bytes, call.events.clone()))
	}

	fn module_error(&self, pallet_index: u8, error_index: u8) -> Option<RegistryError> {
		(pallet_index == 5 && error_index == 2).then(|| RegistryError {
			section: "balances".into(),
			name: "InsufficientBalance".into(),
			docs: vec!["Balance too low to send value.".into()],
		})
	}
}
