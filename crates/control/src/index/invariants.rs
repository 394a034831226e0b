use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use super::ControlRegistry;
use crate::RegistryConfig;
use crate::descriptor::{InterfaceDescriptor, TypeDescriptor};
use crate::error::RegisterError;
use crate::handle::ControlHandle;

const THREADS: usize = 16;

fn desc() -> Arc<InterfaceDescriptor> {
	Arc::new(InterfaceDescriptor::new("Counter").attribute("value", TypeDescriptor::I64))
}

fn shared_registry() -> Arc<ControlRegistry> {
	Arc::new(ControlRegistry::new(RegistryConfig::new("invariants")).unwrap())
}

/// Runs `f(thread_index)` on [`THREADS`] threads released together.
fn race<T, F>(f: F) -> Vec<T>
where
	T: Send + 'static,
	F: Fn(usize) -> T + Send + Sync + 'static,
{
	let barrier = Arc::new(Barrier::new(THREADS));
	let f = Arc::new(f);
	let workers: Vec<_> = (0..THREADS)
		.map(|i| {
			let barrier = Arc::clone(&barrier);
			let f = Arc::clone(&f);
			thread::spawn(move || {
				barrier.wait();
				f(i)
			})
		})
		.collect();
	workers
		.into_iter()
		.map(|w| w.join().expect("worker panicked"))
		.collect()
}

/// Invariant: concurrent registrations of one `(type, id)` have exactly one winner.
pub(crate) fn inv_single_winner_per_id() {
	let registry = shared_registry();
	let reg = Arc::clone(&registry);

	let results = race(move |i| {
		reg.register("job", "j-1", Some(&format!("alias-{i}")), desc(), Arc::new(i))
	});

	let winners: Vec<_> = results.iter().filter(|r| r.is_ok()).collect();
	assert_eq!(winners.len(), 1, "exactly one registration must win");
	for result in &results {
		if let Err(err) = result {
			assert!(
				matches!(err, RegisterError::DuplicateIdentifier { .. }),
				"losers must see DuplicateIdentifier, got {err:?}"
			);
		}
	}
	assert_eq!(registry.len(), 1);
	assert_eq!(registry.list_by_type("job").len(), 1);
}

#[cfg_attr(test, test)]
pub(crate) fn test_single_winner_per_id() {
	inv_single_winner_per_id()
}

/// Invariant: concurrent registrations of one `(type, alias)` have exactly one winner.
pub(crate) fn inv_single_winner_per_alias() {
	let registry = shared_registry();
	let reg = Arc::clone(&registry);

	let results = race(move |i| {
		reg.register("job", &format!("j-{i}"), Some("PumpAnalytics"), desc(), Arc::new(i))
	});

	let winners = results.iter().filter(|r| r.is_ok()).count();
	assert_eq!(winners, 1, "exactly one alias owner must win");
	assert!(
		results
			.iter()
			.filter_map(|r| r.as_ref().err())
			.all(|e| matches!(e, RegisterError::DuplicateAlias { .. }))
	);

	let owner = registry.lookup_by_alias("job", "PumpAnalytics").unwrap();
	assert!(Arc::ptr_eq(&registry.lookup("job", owner.id()).unwrap(), &owner));
}

#[cfg_attr(test, test)]
pub(crate) fn test_single_winner_per_alias() {
	inv_single_winner_per_alias()
}

/// Invariant: concurrent writes to distinct keys are all retained.
pub(crate) fn inv_no_lost_updates() {
	const PER_THREAD: usize = 32;
	let registry = shared_registry();
	let reg = Arc::clone(&registry);

	let handles = race(move |t| {
		let ty = if t % 2 == 0 { "job" } else { "oplet" };
		(0..PER_THREAD)
			.map(|n| {
				reg.register(ty, &format!("{t}-{n}"), None, desc(), Arc::new(n))
					.expect("distinct ids must register")
			})
			.collect::<Vec<_>>()
	});

	let all: HashSet<ControlHandle> = handles.into_iter().flatten().collect();
	assert_eq!(all.len(), THREADS * PER_THREAD, "handles must be distinct");
	assert_eq!(registry.len(), THREADS * PER_THREAD);
	assert_eq!(
		registry.list_by_type("job").len() + registry.list_by_type("oplet").len(),
		THREADS * PER_THREAD
	);
}

#[cfg_attr(test, test)]
pub(crate) fn test_no_lost_updates() {
	inv_no_lost_updates()
}

/// Invariant: handles are never reissued, including across churn on one key.
pub(crate) fn inv_handles_never_reused() {
	const ROUNDS: usize = 64;
	let registry = shared_registry();
	let reg = Arc::clone(&registry);

	let issued = race(move |t| {
		let id = format!("slot-{}", t % 4);
		let mut mine = Vec::new();
		for _ in 0..ROUNDS {
			if let Ok(h) = reg.register("job", &id, Some(&id), desc(), Arc::new(t)) {
				mine.push(h.clone());
				reg.unregister(&h);
			}
		}
		mine
	});

	let flat: Vec<ControlHandle> = issued.into_iter().flatten().collect();
	let unique: HashSet<&ControlHandle> = flat.iter().collect();
	assert_eq!(unique.len(), flat.len(), "a handle was issued twice");
	assert!(registry.is_empty(), "every registration was unregistered");
	assert!(registry.types().is_empty());
}

#[cfg_attr(test, test)]
pub(crate) fn test_handles_never_reused() {
	inv_handles_never_reused()
}

/// Invariant: both keys of a live registration resolve to the same entry, and a
/// published entry is never reachable under another registration's keys.
pub(crate) fn inv_keys_resolve_consistently() {
	const ROUNDS: usize = 200;
	let registry = shared_registry();
	let reg = Arc::clone(&registry);

	race(move |t| {
		if t == 0 {
			for n in 0..ROUNDS {
				let h = reg
					.register("job", "j", Some("Alias"), desc(), Arc::new(n))
					.expect("single writer");
				reg.unregister(&h);
			}
		} else {
			for _ in 0..ROUNDS {
				let listing = reg.list_by_type("job");
				for entry in &listing {
					assert_eq!(entry.id(), "j");
					assert_eq!(entry.alias(), Some("Alias"));
				}
				assert!(listing.len() <= 1);
				let by_id = reg.lookup("job", "j");
				let by_alias = reg.lookup_by_alias("job", "Alias");
				if let Some(entry) = &by_id {
					assert_eq!(entry.alias(), Some("Alias"));
				}
				if let Some(entry) = &by_alias {
					assert_eq!(entry.id(), "j");
				}
				if let (Some(a), Some(b)) = (&by_id, &by_alias)
					&& a.handle == b.handle
				{
					assert!(Arc::ptr_eq(a, b), "one registration resolved to two entries");
				}
			}
		}
	});

	assert!(registry.is_empty());
}

#[cfg_attr(test, test)]
pub(crate) fn test_keys_resolve_consistently() {
	inv_keys_resolve_consistently()
}
