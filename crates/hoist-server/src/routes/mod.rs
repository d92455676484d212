// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP handlers, one module per resource.

pub mod contact;
pub mod cranes;
pub mod docs;
pub mod health;
pub mod locale;
pub mod pages;
pub mod seo;
pub mod uploads;
