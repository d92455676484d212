// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret values for Hoist.
//!
//! [`Secret<T>`] wraps sensitive values (the admin API token, database
//! credentials) so that they:
//!
//! - print as `[REDACTED]` through `Debug` and `Display`;
//! - are zeroized on drop;
//! - require an explicit `.expose()` to read.
//!
//! [`load_secret_env`] reads a secret from `VAR` or from the file named by
//! `VAR_FILE` (Docker/Kubernetes secret mounts).
//!
//! ```
//! use hoist_common_secret::Secret;
//!
//! let token = Secret::new("s3cr3t".to_string());
//! assert_eq!(format!("{token}"), "[REDACTED]");
//! assert!(token.matches("s3cr3t"));
//! ```

mod env;

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

pub use env::{load_secret_env, SecretEnvError};

/// Placeholder printed instead of a secret value.
pub const REDACTED: &str = "[REDACTED]";

/// A wrapper for sensitive values that prevents accidental exposure.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

/// Secret strings are the only kind Hoist stores.
pub type SecretString = Secret<String>;

impl<T> Secret<T>
where
	T: Zeroize,
{
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Access the inner value. Call sites opt in to seeing the secret.
	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl Secret<String> {
	/// Compare a presented credential against this secret in constant time.
	///
	/// Length mismatches return early; the length of a bearer token is not
	/// considered sensitive.
	pub fn matches(&self, candidate: &str) -> bool {
		let expected = self.inner.as_bytes();
		let candidate = candidate.as_bytes();
		if expected.len() != candidate.len() {
			return false;
		}
		expected.ct_eq(candidate).into()
	}
}

impl<T> Clone for Secret<T>
where
	T: Zeroize + Clone,
{
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T> fmt::Debug for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Secret").field(&REDACTED).finish()
	}
}

impl<T> fmt::Display for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T> PartialEq for Secret<T>
where
	T: Zeroize + PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T> Eq for Secret<T> where T: Zeroize + Eq {}
