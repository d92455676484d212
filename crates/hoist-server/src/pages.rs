// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server-rendered HTML pages.
//!
//! Every page shares one shell carrying `<html lang>`, the localized title
//! and description, a canonical link and hreflang alternates. Text from the
//! database or the catalog is escaped before it reaches the markup.

use hoist_common_i18n::{t, t_fmt, Locale, LOCALES};
use hoist_server_db::Crane;
use hoist_server_locale::prefix_path;
use hoist_server_seo::{alternate_links, canonical_url, BaseUrl};
use quick_xml::escape::escape;

/// Static pages, addressed by their path below the locale prefix.
pub const STATIC_PAGES: [&str; 4] = ["/", "/cranes", "/about", "/contact"];

/// Where a page lives, used for canonical and alternate links.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
	pub base: &'a BaseUrl,
	pub default_locale: Locale,
	pub locale: Locale,
	/// Path without the locale prefix, e.g. `/cranes/liebherr-280`.
	pub rest: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
	pub title: String,
	pub description: String,
	/// Pre-escaped markup placed inside `<main>`.
	pub body: String,
	/// Not-found pages are kept out of search indexes.
	pub indexable: bool,
}

pub fn crane_path(locale: Locale, slug: &str) -> String {
	prefix_path(locale, &format!("/cranes/{slug}"))
}

fn esc(raw: &str) -> String {
	escape(raw).into_owned()
}

fn group_thousands(value: i64) -> String {
	let digits = value.unsigned_abs().to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
	if value < 0 {
		out.push('-');
	}
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(' ');
		}
		out.push(ch);
	}
	out
}

/// Render the full HTML document for `page`.
pub fn render_document(ctx: &PageContext<'_>, page: &Page) -> String {
	let site_name = t(ctx.locale, "site.name");
	let mut html = String::with_capacity(4096);

	html.push_str("<!DOCTYPE html>\n");
	html.push_str(&format!("<html lang=\"{}\">\n<head>\n", ctx.locale.code()));
	html.push_str("<meta charset=\"utf-8\">\n");
	html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
	html.push_str(&format!(
		"<title>{} | {}</title>\n",
		esc(&page.title),
		esc(&site_name)
	));
	html.push_str(&format!(
		"<meta name=\"description\" content=\"{}\">\n",
		esc(&page.description)
	));

	if page.indexable {
		html.push_str(&format!(
			"<link rel=\"canonical\" href=\"{}\">\n",
			esc(&canonical_url(ctx.base, ctx.locale, ctx.rest))
		));
		for link in alternate_links(ctx.base, ctx.rest, ctx.default_locale) {
			html.push_str(&format!(
				"<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\">\n",
				link.hreflang,
				esc(&link.href)
			));
		}
	} else {
		html.push_str("<meta name=\"robots\" content=\"noindex\">\n");
	}

	html.push_str("<link rel=\"stylesheet\" href=\"/static/site.css\">\n");
	html.push_str("</head>\n<body>\n");
	html.push_str(&header(ctx, &site_name));
	html.push_str("<main>\n");
	html.push_str(&page.body);
	html.push_str("</main>\n");
	html.push_str(&format!(
		"<footer><p>{}</p></footer>\n",
		esc(&t(ctx.locale, "site.tagline"))
	));
	html.push_str("</body>\n</html>\n");
	html
}

fn header(ctx: &PageContext<'_>, site_name: &str) -> String {
	let locale = ctx.locale;
	let mut out = String::from("<header>\n");
	out.push_str(&format!(
		"<a class=\"brand\" href=\"{}\">{}</a>\n",
		prefix_path(locale, "/"),
		esc(site_name)
	));

	out.push_str("<nav>\n");
	for (rest, key) in [
		("/", "nav.home"),
		("/cranes", "nav.cranes"),
		("/about", "nav.about"),
		("/contact", "nav.contact"),
	] {
		out.push_str(&format!(
			"<a href=\"{}\">{}</a>\n",
			prefix_path(locale, rest),
			esc(&t(locale, key))
		));
	}
	out.push_str("</nav>\n");

	out.push_str(&format!(
		"<nav class=\"languages\" aria-label=\"{}\">\n",
		esc(&t(locale, "nav.language"))
	));
	let current = prefix_path(locale, ctx.rest);
	for other in LOCALES {
		let href = format!("/api/locale?lang={}&redirect={}", other.code(), current);
		if other == locale {
			out.push_str(&format!(
				"<span lang=\"{}\" aria-current=\"true\">{}</span>\n",
				other.code(),
				esc(other.native_name())
			));
		} else {
			out.push_str(&format!(
				"<a lang=\"{}\" hreflang=\"{}\" href=\"{}\">{}</a>\n",
				other.code(),
				other.code(),
				esc(&href),
				esc(other.native_name())
			));
		}
	}
	out.push_str("</nav>\n</header>\n");
	out
}

fn crane_card(locale: Locale, crane: &Crane) -> String {
	format!(
		"<li class=\"crane\"><a href=\"{}\">{}</a> <span>{} {}</span> \
		 <span>{}: {} kg</span> <span class=\"status status-{}\">{}</span></li>\n",
		crane_path(locale, &crane.slug),
		esc(&crane.name),
		esc(&crane.manufacturer),
		esc(&crane.model),
		esc(&t(locale, "page.crane.capacity")),
		group_thousands(crane.max_capacity_kg),
		crane.status.as_str(),
		esc(&t(locale, &format!("page.crane.status.{}", crane.status.as_str()))),
	)
}

fn crane_list(locale: Locale, cranes: &[Crane]) -> String {
	let mut out = String::from("<ul class=\"cranes\">\n");
	for crane in cranes {
		out.push_str(&crane_card(locale, crane));
	}
	out.push_str("</ul>\n");
	out
}

pub fn home_page(locale: Locale, featured: &[Crane]) -> Page {
	let title = t(locale, "page.home.title");
	let description = t(locale, "page.home.description");
	let mut body = format!(
		"<h1>{}</h1>\n<p>{}</p>\n",
		esc(&title),
		esc(&t(locale, "site.tagline"))
	);
	if !featured.is_empty() {
		body.push_str(&format!(
			"<h2>{}</h2>\n",
			esc(&t(locale, "page.home.featured"))
		));
		body.push_str(&crane_list(locale, featured));
	}
	Page {
		title,
		description,
		body,
		indexable: true,
	}
}

pub fn crane_list_page(locale: Locale, cranes: &[Crane], total: i64) -> Page {
	let title = t(locale, "page.cranes.title");
	let description = t(locale, "page.cranes.description");
	let mut body = format!("<h1>{}</h1>\n", esc(&title));
	if cranes.is_empty() {
		body.push_str(&format!("<p>{}</p>\n", esc(&t(locale, "page.cranes.empty"))));
	} else {
		body.push_str(&format!(
			"<p>{}</p>\n",
			esc(&t_fmt(
				locale,
				"page.cranes.count",
				&[("count", total.to_string().as_str())]
			))
		));
		body.push_str(&crane_list(locale, cranes));
	}
	Page {
		title,
		description,
		body,
		indexable: true,
	}
}

pub fn crane_detail_page(locale: Locale, crane: &Crane) -> Page {
	let condition = t(
		locale,
		&format!("page.crane.condition.{}", crane.condition.as_str()),
	);
	let title = t_fmt(locale, "page.crane.title", &[("name", crane.name.as_str())]);
	let description = t_fmt(
		locale,
		"page.crane.description",
		&[
			("manufacturer", crane.manufacturer.as_str()),
			("model", crane.model.as_str()),
			("condition", condition.as_str()),
			("capacity", group_thousands(crane.max_capacity_kg).as_str()),
		],
	);

	let mut specs: Vec<(String, String)> = vec![
		(
			t(locale, "page.crane.type"),
			t(locale, &format!("page.crane.type.{}", crane.crane_type.as_str())),
		),
		(t(locale, "page.crane.condition"), condition.clone()),
		(
			t(locale, "page.crane.capacity"),
			format!("{} kg", group_thousands(crane.max_capacity_kg)),
		),
	];
	if let Some(tip) = crane.tip_capacity_kg {
		specs.push((
			t(locale, "page.crane.tip_capacity"),
			format!("{} kg", group_thousands(tip)),
		));
	}
	if let Some(jib) = crane.max_jib_length_m {
		specs.push((t(locale, "page.crane.jib_length"), format!("{jib} m")));
	}
	if let Some(hook) = crane.max_hook_height_m {
		specs.push((t(locale, "page.crane.hook_height"), format!("{hook} m")));
	}
	if let Some(year) = crane.year_of_manufacture {
		specs.push((t(locale, "page.crane.year"), year.to_string()));
	}
	if let Some(location) = &crane.location {
		specs.push((t(locale, "page.crane.location"), location.clone()));
	}
	specs.push((
		t(locale, "page.crane.price"),
		match crane.price_eur {
			Some(price) => format!("€ {}", group_thousands(price)),
			None => t(locale, "page.crane.price_on_request"),
		},
	));

	let mut body = format!(
		"<article class=\"crane\">\n<h1>{}</h1>\n<p class=\"status status-{}\">{}</p>\n<dl>\n",
		esc(&crane.name),
		crane.status.as_str(),
		esc(&t(locale, &format!("page.crane.status.{}", crane.status.as_str()))),
	);
	for (label, value) in &specs {
		body.push_str(&format!("<dt>{}</dt><dd>{}</dd>\n", esc(label), esc(value)));
	}
	body.push_str("</dl>\n");
	for paragraph in crane.description.split("\n\n").filter(|p| !p.trim().is_empty()) {
		body.push_str(&format!("<p>{}</p>\n", esc(paragraph.trim())));
	}
	body.push_str(&format!(
		"<p><a href=\"{}\">{}</a></p>\n</article>\n",
		prefix_path(locale, "/cranes"),
		esc(&t(locale, "page.crane.back"))
	));

	Page {
		title,
		description,
		body,
		indexable: true,
	}
}

pub fn about_page(locale: Locale) -> Page {
	let title = t(locale, "page.about.title");
	let description = t(locale, "page.about.description");
	let body = format!(
		"<h1>{}</h1>\n<p>{}</p>\n",
		esc(&title),
		esc(&description)
	);
	Page {
		title,
		description,
		body,
		indexable: true,
	}
}

/// The form posts JSON to `/api/contact`; `website` is the honeypot and
/// stays hidden from people.
pub fn contact_page(locale: Locale) -> Page {
	let title = t(locale, "page.contact.title");
	let description = t(locale, "page.contact.description");
	let mut body = format!(
		"<h1>{}</h1>\n<p>{}</p>\n<form class=\"contact\" method=\"post\" data-endpoint=\"/api/contact\">\n",
		esc(&title),
		esc(&description)
	);
	body.push_str(&format!(
		"<input type=\"hidden\" name=\"locale\" value=\"{}\">\n",
		locale.code()
	));
	for (name, key, kind, required) in [
		("name", "page.contact.name", "text", true),
		("email", "page.contact.email", "email", true),
		("phone", "page.contact.phone", "tel", false),
		("company", "page.contact.company", "text", false),
	] {
		body.push_str(&format!(
			"<label>{} <input type=\"{kind}\" name=\"{name}\"{}></label>\n",
			esc(&t(locale, key)),
			if required { " required" } else { "" }
		));
	}
	body.push_str(&format!(
		"<label>{} <textarea name=\"message\" maxlength=\"{}\" required></textarea></label>\n",
		esc(&t(locale, "page.contact.message")),
		crate::validation::MAX_CONTACT_MESSAGE_CHARS
	));
	body.push_str(
		"<div hidden aria-hidden=\"true\"><input type=\"text\" name=\"website\" tabindex=\"-1\" autocomplete=\"off\"></div>\n",
	);
	body.push_str(&format!(
		"<button type=\"submit\">{}</button>\n</form>\n",
		esc(&t(locale, "page.contact.submit"))
	));
	Page {
		title,
		description,
		body,
		indexable: true,
	}
}

pub fn not_found_page(locale: Locale) -> Page {
	let title = t(locale, "page.not_found.title");
	let description = t(locale, "page.not_found.description");
	let body = format!(
		"<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"{}\">{}</a></p>\n",
		esc(&title),
		esc(&description),
		prefix_path(locale, "/"),
		esc(&t(locale, "nav.home"))
	);
	Page {
		title,
		description,
		body,
		indexable: false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Utc;
	use hoist_server_db::{CraneCondition, CraneStatus, CraneType};
	use uuid::Uuid;

	fn base() -> BaseUrl {
		BaseUrl::parse("https://hoist.example").unwrap()
	}

	fn crane() -> Crane {
		Crane {
			id: Uuid::new_v4(),
			slug: "liebherr-280-ec-h".to_string(),
			name: "Liebherr 280 EC-H <12>".to_string(),
			manufacturer: "Liebherr".to_string(),
			model: "280 EC-H".to_string(),
			crane_type: CraneType::FlatTop,
			condition: CraneCondition::Refurbished,
			status: CraneStatus::Reserved,
			year_of_manufacture: Some(2008),
			max_capacity_kg: 12_000,
			tip_capacity_kg: None,
			max_jib_length_m: Some(70.0),
			max_hook_height_m: None,
			price_eur: None,
			location: None,
			description: "First paragraph.\n\nSecond & last.".to_string(),
			featured: true,
			created_at: Utc::now(),
			updated_at: Utc::now(),
		}
	}

	#[test]
	fn test_group_thousands() {
		assert_eq!(group_thousands(0), "0");
		assert_eq!(group_thousands(950), "950");
		assert_eq!(group_thousands(12_000), "12 000");
		assert_eq!(group_thousands(1_234_567), "1 234 567");
		assert_eq!(group_thousands(-4_500), "-4 500");
	}

	#[test]
	fn document_carries_lang_canonical_and_alternates() {
		let base = base();
		let ctx = PageContext {
			base: &base,
			default_locale: Locale::En,
			locale: Locale::Nl,
			rest: "/about",
		};
		let html = render_document(&ctx, &about_page(Locale::Nl));

		assert!(html.contains("<html lang=\"nl\">"));
		assert!(html.contains("<title>Over Hoist | Hoist Torenkranen</title>"));
		assert!(html.contains("<link rel=\"canonical\" href=\"https://hoist.example/nl/about\">"));
		for code in ["en", "nl", "de"] {
			assert!(html.contains(&format!(
				"hreflang=\"{code}\" href=\"https://hoist.example/{code}/about\""
			)));
		}
		assert!(html.contains("hreflang=\"x-default\" href=\"https://hoist.example/en/about\""));
		assert!(html.contains("/api/locale?lang=de&amp;redirect=/nl/about"));
	}

	#[test]
	fn not_found_is_noindex_without_canonical() {
		let base = base();
		let ctx = PageContext {
			base: &base,
			default_locale: Locale::En,
			locale: Locale::De,
			rest: "/missing",
		};
		let html = render_document(&ctx, &not_found_page(Locale::De));
		assert!(html.contains("noindex"));
		assert!(!html.contains("rel=\"canonical\""));
		assert!(html.contains("Seite nicht gefunden"));
	}

	#[test]
	fn crane_detail_escapes_and_localizes() {
		let page = crane_detail_page(Locale::En, &crane());
		assert!(page.body.contains("Liebherr 280 EC-H &lt;12&gt;"));
		assert!(page.body.contains("Second &amp; last."));
		assert!(page.body.contains("Price on request"));
		assert!(page.body.contains("12 000 kg"));
		assert!(page.body.contains("Reserved"));
		assert_eq!(page.title, "Liebherr 280 EC-H <12> for sale");
		assert!(page.description.contains("refurbished"));
	}

	#[test]
	fn crane_list_links_to_locale_detail_pages() {
		let page = crane_list_page(Locale::De, &[crane()], 1);
		assert!(page.body.contains("href=\"/de/cranes/liebherr-280-ec-h\""));
		assert!(page.body.contains("1 Krane auf Lager"));

		let empty = crane_list_page(Locale::En, &[], 0);
		assert!(empty.body.contains("No cranes are listed"));
	}

	#[test]
	fn contact_form_has_hidden_honeypot() {
		let page = contact_page(Locale::En);
		assert!(page.body.contains("name=\"website\""));
		assert!(page.body.contains("<div hidden"));
		assert!(page.body.contains("value=\"en\""));
	}
}
