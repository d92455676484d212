// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod contact;
mod cranes;
mod health;
mod locale;
mod pages;
mod seo;
mod support;
mod uploads;
