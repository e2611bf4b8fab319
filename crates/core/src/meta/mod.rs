// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod lock;

pub use lock::{MetaLock, MetaLockGuard};
