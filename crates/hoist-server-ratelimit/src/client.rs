// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::net::{IpAddr, SocketAddr};

use http::HeaderMap;

/// Client address for rate limiting.
///
/// The socket peer is the client unless it is one of `trusted_proxies`. Only
/// then are forwarding headers read: `X-Forwarded-For` is walked from the
/// right, skipping trusted hops, and the first untrusted hop is the client.
/// `X-Real-IP` is used when a trusted proxy sends no `X-Forwarded-For`.
/// Without a peer the address is the literal `unknown`.
pub fn client_address(
	headers: &HeaderMap,
	peer: Option<SocketAddr>,
	trusted_proxies: &[IpAddr],
) -> String {
	let Some(peer) = peer.map(|addr| addr.ip()) else {
		return "unknown".to_string();
	};
	if !trusted_proxies.contains(&peer) {
		return peer.to_string();
	}

	let hops: Vec<&str> = headers
		.get_all("x-forwarded-for")
		.iter()
		.filter_map(|v| v.to_str().ok())
		.flat_map(|v| v.split(','))
		.map(str::trim)
		.filter(|v| !v.is_empty())
		.collect();

	if hops.is_empty() {
		return headers
			.get("x-real-ip")
			.and_then(|v| v.to_str().ok())
			.and_then(|v| v.trim().parse::<IpAddr>().ok())
			.unwrap_or(peer)
			.to_string();
	}

	let mut client = peer;
	for hop in hops.iter().rev() {
		// A hop that is not an address cannot be attributed; stop at the last
		// address we reached through trusted proxies.
		let Ok(ip) = hop.parse::<IpAddr>() else {
			break;
		};
		client = ip;
		if !trusted_proxies.contains(&ip) {
			break;
		}
	}
	client.to_string()
}
