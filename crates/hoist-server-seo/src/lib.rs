// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Search-engine plumbing for the locale-prefixed site: sitemap XML with
//! hreflang alternates, `robots.txt`, and canonical URLs.

pub mod alternates;
pub mod error;
pub mod robots;
pub mod sitemap;

pub use alternates::{alternate_links, canonical_url, AlternateLink, BaseUrl, X_DEFAULT};
pub use error::{Result, SeoError};
pub use robots::RobotsTxt;
pub use sitemap::{ChangeFreq, SitemapBuilder, SitemapEntry};
