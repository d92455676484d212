// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use regex::Regex;

pub const DEFAULT_BOT_PATTERNS: &[&str] = &[
	"bot",
	"crawl",
	"spider",
	"scrape",
	"curl",
	"wget",
	"python-requests",
	"httpclient",
	"headless",
];

/// Rejects requests from automation clients.
///
/// Patterns are literal, case-insensitive substrings of the `User-Agent`.
/// A missing or blank user agent is always blocked.
#[derive(Debug, Clone)]
pub struct BotFilter {
	matcher: Option<Regex>,
}

impl Default for BotFilter {
	fn default() -> Self {
		Self::new(DEFAULT_BOT_PATTERNS).unwrap_or(Self { matcher: None })
	}
}

impl BotFilter {
	pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let alternatives: Vec<String> = patterns
			.into_iter()
			.map(|p| p.as_ref().trim().to_string())
			.filter(|p| !p.is_empty())
			.map(|p| regex::escape(&p))
			.collect();

		if alternatives.is_empty() {
			return Ok(Self { matcher: None });
		}

		let matcher = Regex::new(&format!("(?i)(?:{})", alternatives.join("|")))?;
		Ok(Self {
			matcher: Some(matcher),
		})
	}

	pub fn is_blocked(&self, user_agent: Option<&str>) -> bool {
		let Some(user_agent) = user_agent.map(str::trim).filter(|ua| !ua.is_empty()) else {
			return true;
		};
		self.matcher
			.as_ref()
			.is_some_and(|matcher| matcher.is_match(user_agent))
	}
}
