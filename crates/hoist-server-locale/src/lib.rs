// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale routing for the Hoist site.
//!
//! Every page URL carries exactly one supported locale as its first path
//! segment (`/en/cranes`, `/de/about`). This crate decides, per request,
//! whether the URL already does so or must be redirected, and which
//! preference cookie to set along the way.
//!
//! # Algorithm
//!
//! 1. Requests matching a [`BypassRules`] rule (API, static assets, uploads,
//!    well-known root files, `_`-prefixed infrastructure paths, file
//!    requests) pass through untouched.
//! 2. The preferred locale is taken from the `NEXT_LOCALE` cookie, else the
//!    URL prefix, else the primary `Accept-Language` tag, else the default.
//! 3. A URL whose prefix equals the preference passes through; any other URL
//!    is redirected once to the same path under the preferred prefix.
//!
//! The resolver itself ([`LocaleResolver`]) is pure and synchronous; the
//! [`LocaleRoutingLayer`] turns its [`Resolution`] into HTTP.
//!
//! # Example
//!
//! ```
//! use hoist_common_i18n::Locale;
//! use hoist_server_locale::{LocaleRequest, LocaleResolver, LocaleResolverConfig, Resolution};
//!
//! let resolver = LocaleResolver::new(LocaleResolverConfig::default());
//! let request = LocaleRequest::new("/cranes").with_accept_language(Some("de-DE,de;q=0.9"));
//!
//! match resolver.resolve(&request) {
//!     Resolution::Redirect { location, .. } => assert_eq!(location, "/de/cranes"),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

mod bypass;
mod cookie;
mod layer;
mod path;
mod resolver;

pub use bypass::BypassRules;
pub use cookie::{LocaleCookie, DEFAULT_COOKIE_MAX_AGE_SECS, DEFAULT_COOKIE_NAME};
pub use layer::{LocaleRoutingFuture, LocaleRoutingLayer, LocaleRoutingService, ResolvedLocale};
pub use path::{normalize_path, prefix_path, split_locale_prefix};
pub use resolver::{
	LocaleRequest, LocaleResolver, LocaleResolverConfig, LocaleSource, RedirectKind, Resolution,
};
