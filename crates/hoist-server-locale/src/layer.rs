// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tower middleware applying [`LocaleResolver`] decisions to HTTP requests.
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/{locale}", get(home))
//!     .layer(LocaleRoutingLayer::new(resolver, LocaleCookie::default()));
//! ```

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::extract::FromRequestParts;
use axum::response::Response;
use hoist_common_i18n::Locale;
use http::header::{ACCEPT_LANGUAGE, LOCATION, SET_COOKIE};
use http::request::Parts;
use http::{HeaderValue, Request};
use pin_project_lite::pin_project;
use tower::{Layer, Service};

use crate::cookie::LocaleCookie;
use crate::path::prefix_path;
use crate::resolver::{LocaleRequest, LocaleResolver, LocaleSource, RedirectKind, Resolution};

/// Request extension recording the locale chosen for a passed-through request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLocale {
	pub locale: Locale,
	pub source: LocaleSource,
}

impl<S> FromRequestParts<S> for ResolvedLocale
where
	S: Send + Sync,
{
	type Rejection = Infallible;

	/// Bypassed requests carry no extension and get the default locale.
	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		Ok(parts
			.extensions
			.get::<ResolvedLocale>()
			.copied()
			.unwrap_or(ResolvedLocale {
				locale: Locale::default(),
				source: LocaleSource::Default,
			}))
	}
}

#[derive(Clone)]
pub struct LocaleRoutingLayer {
	resolver: Arc<LocaleResolver>,
	cookie: Arc<LocaleCookie>,
}

impl LocaleRoutingLayer {
	pub fn new(resolver: LocaleResolver, cookie: LocaleCookie) -> Self {
		Self {
			resolver: Arc::new(resolver),
			cookie: Arc::new(cookie),
		}
	}
}

impl<S> Layer<S> for LocaleRoutingLayer {
	type Service = LocaleRoutingService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		LocaleRoutingService {
			inner,
			resolver: self.resolver.clone(),
			cookie: self.cookie.clone(),
		}
	}
}

/// Service wrapper for [`LocaleRoutingLayer`].
#[derive(Clone)]
pub struct LocaleRoutingService<S> {
	inner: S,
	resolver: Arc<LocaleResolver>,
	cookie: Arc<LocaleCookie>,
}

impl<S> LocaleRoutingService<S> {
	fn cookie_header(&self, locale: Option<Locale>) -> Option<HeaderValue> {
		locale.and_then(|l| HeaderValue::from_str(&self.cookie.header_value(l)).ok())
	}
}

impl<S> Service<Request<Body>> for LocaleRoutingService<S>
where
	S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
	S::Future: Send,
{
	type Response = Response;
	type Error = S::Error;
	type Future = LocaleRoutingFuture<S::Future>;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, mut req: Request<Body>) -> Self::Future {
		let cookie = self.cookie.read(req.headers());
		let resolution = {
			let request = LocaleRequest::new(req.uri().path())
				.with_query(req.uri().query())
				.with_cookie(cookie)
				.with_accept_language(
					req.headers()
						.get(ACCEPT_LANGUAGE)
						.and_then(|v| v.to_str().ok()),
				);
			self.resolver.resolve(&request)
		};

		match resolution {
			Resolution::Bypass => LocaleRoutingFuture::Inner {
				fut: self.inner.call(req),
				set_cookie: None,
			},
			Resolution::PassThrough {
				locale,
				source,
				set_cookie,
			} => {
				tracing::debug!(
					path = %req.uri().path(),
					locale = %locale,
					source = source.as_str(),
					"locale pass-through"
				);
				req.extensions_mut().insert(ResolvedLocale { locale, source });
				LocaleRoutingFuture::Inner {
					fut: self.inner.call(req),
					set_cookie: self.cookie_header(set_cookie),
				}
			}
			Resolution::Redirect {
				location,
				kind,
				locale,
				source,
				set_cookie,
			} => {
				tracing::debug!(
					path = %req.uri().path(),
					location = %location,
					locale = %locale,
					source = source.as_str(),
					"locale redirect"
				);
				let location = HeaderValue::from_str(&location)
					.or_else(|_| HeaderValue::from_str(&prefix_path(locale, "/")))
					.unwrap_or_else(|_| HeaderValue::from_static("/"));
				LocaleRoutingFuture::Redirect {
					resp: Some(redirect_response(
						kind,
						location,
						self.cookie_header(set_cookie),
					)),
				}
			}
		}
	}
}

fn redirect_response(
	kind: RedirectKind,
	location: HeaderValue,
	set_cookie: Option<HeaderValue>,
) -> Response {
	let mut response = Response::new(Body::empty());
	*response.status_mut() = kind.status();
	response.headers_mut().insert(LOCATION, location);
	if let Some(cookie) = set_cookie {
		response.headers_mut().append(SET_COOKIE, cookie);
	}
	response
}

pin_project! {
	/// Future for [`LocaleRoutingService`].
	#[project = LocaleRoutingFutureProj]
	pub enum LocaleRoutingFuture<F> {
		Inner { #[pin] fut: F, set_cookie: Option<HeaderValue> },
		Redirect { resp: Option<Response> },
	}
}

impl<F, E> Future for LocaleRoutingFuture<F>
where
	F: Future<Output = Result<Response, E>>,
{
	type Output = Result<Response, E>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		match self.project() {
			LocaleRoutingFutureProj::Inner { fut, set_cookie } => {
				let mut response = match fut.poll(cx) {
					Poll::Ready(Ok(response)) => response,
					other => return other,
				};
				if let Some(cookie) = set_cookie.take() {
					response.headers_mut().append(SET_COOKIE, cookie);
				}
				Poll::Ready(Ok(response))
			}
			LocaleRoutingFutureProj::Redirect { resp } => {
				Poll::Ready(Ok(resp.take().expect("polled after completion")))
			}
		}
	}
}
