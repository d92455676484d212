// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::net::SocketAddr;

use axum::{
	body::Body,
	extract::ConnectInfo,
	http::{header, Request, StatusCode},
};
use hoist_common_i18n::{t, Locale};
use serde_json::{json, Value};

use super::support::{body_json, header_str, TestApp, BROWSER_UA};

fn inquiry() -> Value {
	json!({
		"name": "Sam Jansen",
		"email": "  Sam@Bouwbedrijf.EXAMPLE ",
		"company": "  ",
		"message": "Is the MDT 219 still available for delivery in March?"
	})
}

#[tokio::test]
async fn test_contact_request_is_stored() {
	let app = TestApp::new().await;

	let mut body = inquiry();
	body["locale"] = json!("nl");
	let response = app.post_json("/api/contact", false, body).await;
	assert_eq!(response.status(), StatusCode::ACCEPTED);
	let body = body_json(response).await;
	assert_eq!(body["status"], "received");
	assert_eq!(body["message"], t(Locale::Nl, "api.contact.received"));

	let (stored, total) = app.state.inquiries.list_inquiries(10, 0).await.unwrap();
	assert_eq!(total, 1);
	assert_eq!(stored[0].email, "sam@bouwbedrijf.example");
	assert_eq!(stored[0].company, None);
	assert_eq!(stored[0].locale, "nl");
}

#[tokio::test]
async fn test_honeypot_is_accepted_but_not_stored() {
	let app = TestApp::new().await;

	let mut body = inquiry();
	body["website"] = json!("https://spam.example");
	let response = app.post_json("/api/contact", false, body).await;
	assert_eq!(response.status(), StatusCode::ACCEPTED);
	assert_eq!(body_json(response).await["status"], "received");

	let (_, total) = app.state.inquiries.list_inquiries(10, 0).await.unwrap();
	assert_eq!(total, 0);
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
	let app = TestApp::new().await;

	let mut body = inquiry();
	body["email"] = json!("not-an-email");
	let response = app.post_json("/api/contact", false, body).await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await["error"], "invalid_email");
}

#[tokio::test]
async fn test_missing_user_agent_is_blocked() {
	let app = TestApp::new().await;

	let request = Request::builder()
		.method("POST")
		.uri("/api/contact")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(inquiry().to_string()))
		.unwrap();
	let response = app.send(request).await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
	assert_eq!(body_json(response).await["error"], "bot_blocked");
}

#[tokio::test]
async fn test_contact_is_rate_limited() {
	let app = TestApp::new().await;

	for _ in 0..5 {
		let response = app.post_json("/api/contact", false, inquiry()).await;
		assert_eq!(response.status(), StatusCode::ACCEPTED);
	}

	let response = app.post_json("/api/contact", false, inquiry()).await;
	assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
	let retry_after: u64 = header_str(&response, header::RETRY_AFTER)
		.unwrap()
		.parse()
		.unwrap();
	assert!(retry_after >= 1);
	assert_eq!(body_json(response).await["error"], "rate_limited");
}

#[tokio::test]
async fn test_rate_limit_can_be_disabled() {
	let app = TestApp::with_config(|config| config.rate_limit.enabled = false).await;

	for _ in 0..7 {
		let response = app.post_json("/api/contact", false, inquiry()).await;
		assert_eq!(response.status(), StatusCode::ACCEPTED);
	}
}

fn proxied_inquiry(peer: &str, forwarded_for: &str) -> Request<Body> {
	let mut request = Request::builder()
		.method("POST")
		.uri("/api/contact")
		.header(header::CONTENT_TYPE, "application/json")
		.header(header::USER_AGENT, BROWSER_UA)
		.header("x-forwarded-for", forwarded_for)
		.body(Body::from(inquiry().to_string()))
		.unwrap();
	let peer: SocketAddr = format!("{peer}:40000").parse().unwrap();
	request.extensions_mut().insert(ConnectInfo(peer));
	request
}

#[tokio::test]
async fn test_forwarded_for_only_trusted_from_configured_proxies() {
	let app = TestApp::with_config(|config| {
		config.rate_limit.trusted_proxies = vec!["10.1.0.5".parse().unwrap()];
	})
	.await;

	// A direct client cannot dodge the limit with a fresh header each time.
	for i in 0..6 {
		let response = app
			.send(proxied_inquiry("198.51.100.3", &format!("172.16.0.{i}")))
			.await;
		let expected = if i < 5 {
			StatusCode::ACCEPTED
		} else {
			StatusCode::TOO_MANY_REQUESTS
		};
		assert_eq!(response.status(), expected);
	}

	// Behind the proxy each forwarded client gets its own window.
	for i in 0..6 {
		let response = app
			.send(proxied_inquiry("10.1.0.5", &format!("203.0.113.{i}")))
			.await;
		assert_eq!(response.status(), StatusCode::ACCEPTED);
	}
}
