// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Internationalization (i18n) support for Hoist.
//!
//! The site is published in three locales: English (`en`, the default), Dutch
//! (`nl`) and German (`de`). This crate owns that set, the negotiation of a
//! locale from an `Accept-Language` header, and the GNU gettext catalogs used
//! by pages and API error payloads. Catalog sources live in
//! `locales/<code>/messages.po` and are compiled by the build script.
//!
//! # String Naming Convention
//!
//! Catalog keys use hierarchical dot-notation:
//!
//! - `site.` / `nav.` for chrome shared by every page
//! - `page.` for page titles, descriptions and body copy
//! - `api.` for API error and confirmation messages
//!
//! # Example
//!
//! ```
//! use hoist_common_i18n::{negotiate, t, t_fmt, Locale};
//!
//! let locale = negotiate(Some("de-DE,de;q=0.9"), Locale::En);
//! assert_eq!(locale, Locale::De);
//!
//! let title = t(locale, "page.cranes.title");
//! let body = t_fmt(Locale::Nl, "api.upload.too_large", &[("max", "10485760")]);
//! # let _ = (title, body);
//! ```

mod catalog;
mod locale;
mod resolve;

pub use catalog::{t, t_fmt};
pub use locale::{available_locales, is_supported, Locale, UnsupportedLocale, DEFAULT_LOCALE, LOCALES};
pub use resolve::{negotiate, primary_language_tag, resolve_locale};
