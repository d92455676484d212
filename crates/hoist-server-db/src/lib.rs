// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database layer for the Hoist server.
//!
//! Each table family has a repository struct holding a `SqlitePool` and an
//! `async_trait` store trait so handlers can depend on the trait:
//!
//! - [`CraneRepository`] / [`CraneStore`]: inventory, including slug history
//! - [`SlugRedirectRepository`] / [`SlugRedirectStore`]: legacy slug lookups
//! - [`UploadRepository`] / [`UploadStore`]: upload metadata
//! - [`InquiryRepository`] / [`InquiryStore`]: contact and quote requests
//!
//! Call [`create_pool`] then [`run_migrations`] at startup.

pub mod crane;
pub mod error;
pub mod inquiry;
pub mod migrations;
pub mod pool;
pub mod redirect;
mod row;
pub mod testing;
pub mod upload;

pub use crane::{
	Crane, CraneCondition, CraneFilter, CraneRepository, CraneSitemapEntry, CraneStatus, CraneStore,
	CraneType, CraneUpdate, NewCrane, SlugMatch,
};
pub use error::{DbError, Result};
pub use inquiry::{Inquiry, InquiryRepository, InquiryStore, NewInquiry};
pub use migrations::run_migrations;
pub use pool::{create_pool, ping};
pub use redirect::{SlugRedirect, SlugRedirectRepository, SlugRedirectStore};
pub use upload::{NewUpload, Upload, UploadRepository, UploadStore};
