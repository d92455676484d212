// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::limiter::RateLimiter;

/// Handle to the background task evicting expired rate-limit windows.
#[derive(Debug)]
pub struct SweepHandle {
	token: CancellationToken,
	handle: JoinHandle<()>,
}

impl SweepHandle {
	/// Ask the task to stop without waiting for it.
	pub fn cancel(&self) {
		self.token.cancel();
	}

	pub fn is_cancelled(&self) -> bool {
		self.token.is_cancelled()
	}

	/// Cancel the task and wait for it to exit.
	pub async fn shutdown(self) {
		self.token.cancel();
		if let Err(e) = self.handle.await {
			tracing::warn!(error = %e, "rate limit sweeper did not exit cleanly");
		}
	}
}

impl RateLimiter {
	/// Start evicting expired windows every `interval`.
	///
	/// Must be called from within a tokio runtime.
	pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> SweepHandle {
		let limiter = Arc::clone(self);
		let token = CancellationToken::new();
		let child = token.clone();

		let handle = tokio::spawn(async move {
			loop {
				tokio::select! {
					_ = tokio::time::sleep(interval) => {
						let removed = limiter.sweep();
						if removed > 0 {
							debug!(removed, remaining = limiter.len(), "swept expired rate limit windows");
						}
					}
					_ = child.cancelled() => {
						info!("Shutting down rate limit sweeper");
						break;
					}
				}
			}
		});

		SweepHandle { token, handle }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::RouteLimit;
	use std::collections::HashMap;

	#[tokio::test]
	async fn sweeper_evicts_expired_windows() {
		let limiter = Arc::new(RateLimiter::new(HashMap::from([(
			"contact".to_string(),
			RouteLimit::new(1, Duration::from_millis(5)),
		)])));
		limiter.check("a", "contact");
		limiter.check("b", "contact");
		assert_eq!(limiter.len(), 2);

		let sweeper = limiter.spawn_sweeper(Duration::from_millis(10));
		tokio::time::sleep(Duration::from_millis(100)).await;
		assert!(limiter.is_empty());

		sweeper.shutdown().await;
	}

	#[tokio::test]
	async fn cancel_stops_the_task() {
		let limiter = Arc::new(RateLimiter::with_defaults());
		let sweeper = limiter.spawn_sweeper(Duration::from_secs(3600));
		sweeper.cancel();
		assert!(sweeper.is_cancelled());
		tokio::time::timeout(Duration::from_secs(1), sweeper.shutdown())
			.await
			.expect("sweeper should stop promptly");
	}
}
