// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use parking_lot::{Condvar, Mutex};
use tracing::trace;

use crate::interface::SessionId;

/// The database wide metadata lock.
///
/// Exclusive across sessions and reentrant within one session: a DDL command holds it for its whole structural
/// change while nested catalog calls made on behalf of the same session acquire it again without blocking.
/// Ownership is tracked by session, not by thread.
pub struct MetaLock {
	state: Mutex<LockState>,
	released: Condvar,
}

#[derive(Default)]
struct LockState {
	owner: Option<SessionId>,
	depth: usize,
}

impl Default for MetaLock {
	fn default() -> Self {
		Self::new()
	}
}

impl MetaLock {
	pub fn new() -> Self {
		Self {
			state: Mutex::new(LockState::default()),
			released: Condvar::new(),
		}
	}

	/// Blocks until `session` owns the lock.
	pub fn lock(&self, session: SessionId) -> MetaLockGuard<'_> {
		let mut state = self.state.lock();
		loop {
			match state.owner {
				None => {
					state.owner = Some(session);
					state.depth = 1;
					break;
				}
				Some(owner) if owner == session => {
					state.depth += 1;
					break;
				}
				Some(_) => self.released.wait(&mut state),
			}
		}
		trace!(%session, depth = state.depth, "meta lock acquired");
		MetaLockGuard {
			lock: self,
			session,
		}
	}

	pub fn try_lock(&self, session: SessionId) -> Option<MetaLockGuard<'_>> {
		let mut state = self.state.lock();
		match state.owner {
			None => {
				state.owner = Some(session);
				state.depth = 1;
			}
			Some(owner) if owner == session => state.depth += 1,
			Some(_) => return None,
		}
		Some(MetaLockGuard {
			lock: self,
			session,
		})
	}

	pub fn owner(&self) -> Option<SessionId> {
		self.state.lock().owner
	}

	pub fn is_held_by(&self, session: SessionId) -> bool {
		self.owner() == Some(session)
	}

	fn release(&self, session: SessionId) {
		let mut state = self.state.lock();
		debug_assert_eq!(state.owner, Some(session));
		state.depth -= 1;
		if state.depth == 0 {
			state.owner = None;
			trace!(%session, "meta lock released");
			self.released.notify_all();
		}
	}
}

/// Releases one level of the metadata lock when dropped.
pub struct MetaLockGuard<'a> {
	lock: &'a MetaLock,
	session: SessionId,
}

impl MetaLockGuard<'_> {
	pub fn session(&self) -> SessionId {
		self.session
	}
}

impl Drop for MetaLockGuard<'_> {
	fn drop(&mut self) {
		self.lock.release(self.session);
	}
}
