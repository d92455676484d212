// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod contact;
pub mod cranes;
pub mod locale;
pub mod uploads;

mod serde_helpers;

pub use contact::{ContactErrorResponse, ContactRequest, ContactResponse};
pub use cranes::{
	CraneErrorResponse, CraneLookupResponse, CraneResponse, CreateCraneRequest, ListCranesQuery,
	ListCranesResponse, UpdateCraneRequest,
};
pub use locale::{LocaleInfo, LocaleSwitchQuery, LocalesResponse};
pub use uploads::{ListUploadsResponse, UploadErrorResponse, UploadResponse};
