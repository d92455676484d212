// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `sitemap.xml` with one `<url>` per page per locale, each carrying
//! `xhtml:link` alternates for every locale and `x-default`.

use std::io::Cursor;

use chrono::{DateTime, SecondsFormat, Utc};
use hoist_common_i18n::{Locale, LOCALES};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::alternates::{alternate_links, BaseUrl};
use crate::error::Result;

const NS_SITEMAP: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const NS_XHTML: &str = "http://www.w3.org/1999/xhtml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
	Daily,
	Weekly,
	Monthly,
}

impl ChangeFreq {
	pub fn as_str(&self) -> &'static str {
		match self {
			ChangeFreq::Daily => "daily",
			ChangeFreq::Weekly => "weekly",
			ChangeFreq::Monthly => "monthly",
		}
	}
}

/// A page in the sitemap, addressed by its path without a locale prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
	pub path: String,
	pub lastmod: Option<DateTime<Utc>>,
	pub changefreq: Option<ChangeFreq>,
	pub priority: Option<f32>,
}

impl SitemapEntry {
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			lastmod: None,
			changefreq: None,
			priority: None,
		}
	}

	pub fn lastmod(mut self, ts: DateTime<Utc>) -> Self {
		self.lastmod = Some(ts);
		self
	}

	pub fn changefreq(mut self, freq: ChangeFreq) -> Self {
		self.changefreq = Some(freq);
		self
	}

	pub fn priority(mut self, priority: f32) -> Self {
		self.priority = Some(priority.clamp(0.0, 1.0));
		self
	}
}

pub struct SitemapBuilder {
	base: BaseUrl,
	default_locale: Locale,
	entries: Vec<SitemapEntry>,
}

impl SitemapBuilder {
	pub fn new(base: BaseUrl, default_locale: Locale) -> Self {
		Self {
			base,
			default_locale,
			entries: Vec::new(),
		}
	}

	pub fn push(&mut self, entry: SitemapEntry) -> &mut Self {
		self.entries.push(entry);
		self
	}

	pub fn extend(&mut self, entries: impl IntoIterator<Item = SitemapEntry>) -> &mut Self {
		self.entries.extend(entries);
		self
	}

	/// Number of `<url>` elements `render` will emit.
	pub fn url_count(&self) -> usize {
		self.entries.len() * LOCALES.len()
	}

	pub fn render(&self) -> Result<String> {
		let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

		writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

		let mut root = BytesStart::new("urlset");
		root.push_attribute(("xmlns", NS_SITEMAP));
		root.push_attribute(("xmlns:xhtml", NS_XHTML));
		writer.write_event(Event::Start(root))?;

		for entry in &self.entries {
			let alternates = alternate_links(&self.base, &entry.path, self.default_locale);
			for locale in LOCALES {
				writer.write_event(Event::Start(BytesStart::new("url")))?;
				write_text(&mut writer, "loc", &self.base.page_url(locale, &entry.path))?;

				if let Some(lastmod) = entry.lastmod {
					write_text(
						&mut writer,
						"lastmod",
						&lastmod.to_rfc3339_opts(SecondsFormat::Secs, true),
					)?;
				}
				if let Some(freq) = entry.changefreq {
					write_text(&mut writer, "changefreq", freq.as_str())?;
				}
				if let Some(priority) = entry.priority {
					write_text(&mut writer, "priority", &format!("{priority:.1}"))?;
				}

				for link in &alternates {
					let mut el = BytesStart::new("xhtml:link");
					el.push_attribute(("rel", "alternate"));
					el.push_attribute(("hreflang", link.hreflang.as_str()));
					el.push_attribute(("href", link.href.as_str()));
					writer.write_event(Event::Empty(el))?;
				}

				writer.write_event(Event::End(BytesEnd::new("url")))?;
			}
		}

		writer.write_event(Event::End(BytesEnd::new("urlset")))?;

		let xml = String::from_utf8(writer.into_inner().into_inner())?;
		tracing::debug!(urls = self.url_count(), bytes = xml.len(), "sitemap rendered");
		Ok(xml)
	}
}

fn write_text<W: std::io::Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
	writer.write_event(Event::Start(BytesStart::new(tag)))?;
	writer.write_event(Event::Text(BytesText::new(text)))?;
	writer.write_event(Event::End(BytesEnd::new(tag)))?;
	Ok(())
}
