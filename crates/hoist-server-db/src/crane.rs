// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Crane inventory repository.
//!
//! Slug changes are recorded in `slug_redirects` inside the same transaction
//! as the update, so a former slug always resolves to the crane's current one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, QueryBuilder, Row, Sqlite};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{DbError, Result};
use crate::row::{now_rfc3339, parse_timestamp, parse_uuid};

const CRANE_COLUMNS: &str = "id, slug, name, manufacturer, model, crane_type, condition, status, \
	year_of_manufacture, max_capacity_kg, tip_capacity_kg, max_jib_length_m, max_hook_height_m, \
	price_eur, location, description, featured, created_at, updated_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CraneType {
	FlatTop,
	Hammerhead,
	LuffingJib,
	SelfErecting,
}

impl CraneType {
	pub fn as_str(&self) -> &'static str {
		match self {
			CraneType::FlatTop => "flat_top",
			CraneType::Hammerhead => "hammerhead",
			CraneType::LuffingJib => "luffing_jib",
			CraneType::SelfErecting => "self_erecting",
		}
	}
}

impl std::str::FromStr for CraneType {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"flat_top" => Ok(CraneType::FlatTop),
			"hammerhead" => Ok(CraneType::Hammerhead),
			"luffing_jib" => Ok(CraneType::LuffingJib),
			"self_erecting" => Ok(CraneType::SelfErecting),
			_ => Err(format!("unknown crane type: {s}")),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CraneCondition {
	New,
	Used,
	Refurbished,
}

impl CraneCondition {
	pub fn as_str(&self) -> &'static str {
		match self {
			CraneCondition::New => "new",
			CraneCondition::Used => "used",
			CraneCondition::Refurbished => "refurbished",
		}
	}
}

impl std::str::FromStr for CraneCondition {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"new" => Ok(CraneCondition::New),
			"used" => Ok(CraneCondition::Used),
			"refurbished" => Ok(CraneCondition::Refurbished),
			_ => Err(format!("unknown crane condition: {s}")),
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CraneStatus {
	#[default]
	Available,
	Reserved,
	Sold,
}

impl CraneStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			CraneStatus::Available => "available",
			CraneStatus::Reserved => "reserved",
			CraneStatus::Sold => "sold",
		}
	}
}

impl std::str::FromStr for CraneStatus {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"available" => Ok(CraneStatus::Available),
			"reserved" => Ok(CraneStatus::Reserved),
			"sold" => Ok(CraneStatus::Sold),
			_ => Err(format!("unknown crane status: {s}")),
		}
	}
}

/// A crane listed for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Crane {
	pub id: Uuid,
	pub slug: String,
	pub name: String,
	pub manufacturer: String,
	pub model: String,
	pub crane_type: CraneType,
	pub condition: CraneCondition,
	pub status: CraneStatus,
	pub year_of_manufacture: Option<i32>,
	pub max_capacity_kg: i64,
	pub tip_capacity_kg: Option<i64>,
	pub max_jib_length_m: Option<f64>,
	pub max_hook_height_m: Option<f64>,
	/// Whole euros. `None` means "price on request".
	pub price_eur: Option<i64>,
	pub location: Option<String>,
	pub description: String,
	pub featured: bool,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCrane {
	pub slug: String,
	pub name: String,
	pub manufacturer: String,
	pub model: String,
	pub crane_type: CraneType,
	pub condition: CraneCondition,
	pub status: CraneStatus,
	pub year_of_manufacture: Option<i32>,
	pub max_capacity_kg: i64,
	pub tip_capacity_kg: Option<i64>,
	pub max_jib_length_m: Option<f64>,
	pub max_hook_height_m: Option<f64>,
	pub price_eur: Option<i64>,
	pub location: Option<String>,
	pub description: String,
	pub featured: bool,
}

/// Partial update. For nullable columns the outer `Option` says whether to
/// touch the field, the inner one is the new value (`Some(None)` clears it).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CraneUpdate {
	pub slug: Option<String>,
	pub name: Option<String>,
	pub manufacturer: Option<String>,
	pub model: Option<String>,
	pub crane_type: Option<CraneType>,
	pub condition: Option<CraneCondition>,
	pub status: Option<CraneStatus>,
	pub year_of_manufacture: Option<Option<i32>>,
	pub max_capacity_kg: Option<i64>,
	pub tip_capacity_kg: Option<Option<i64>>,
	pub max_jib_length_m: Option<Option<f64>>,
	pub max_hook_height_m: Option<Option<f64>>,
	pub price_eur: Option<Option<i64>>,
	pub location: Option<Option<String>>,
	pub description: Option<String>,
	pub featured: Option<bool>,
}

impl CraneUpdate {
	pub fn is_empty(&self) -> bool {
		*self == CraneUpdate::default()
	}

	fn apply(self, crane: &mut Crane) {
		if let Some(v) = self.slug {
			crane.slug = v;
		}
		if let Some(v) = self.name {
			crane.name = v;
		}
		if let Some(v) = self.manufacturer {
			crane.manufacturer = v;
		}
		if let Some(v) = self.model {
			crane.model = v;
		}
		if let Some(v) = self.crane_type {
			crane.crane_type = v;
		}
		if let Some(v) = self.condition {
			crane.condition = v;
		}
		if let Some(v) = self.status {
			crane.status = v;
		}
		if let Some(v) = self.year_of_manufacture {
			crane.year_of_manufacture = v;
		}
		if let Some(v) = self.max_capacity_kg {
			crane.max_capacity_kg = v;
		}
		if let Some(v) = self.tip_capacity_kg {
			crane.tip_capacity_kg = v;
		}
		if let Some(v) = self.max_jib_length_m {
			crane.max_jib_length_m = v;
		}
		if let Some(v) = self.max_hook_height_m {
			crane.max_hook_height_m = v;
		}
		if let Some(v) = self.price_eur {
			crane.price_eur = v;
		}
		if let Some(v) = self.location {
			crane.location = v;
		}
		if let Some(v) = self.description {
			crane.description = v;
		}
		if let Some(v) = self.featured {
			crane.featured = v;
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CraneFilter {
	pub status: Option<CraneStatus>,
	pub crane_type: Option<CraneType>,
	pub condition: Option<CraneCondition>,
	pub featured: Option<bool>,
	pub limit: u32,
	pub offset: u32,
}

/// Result of a slug lookup that follows legacy redirects.
#[derive(Debug, Clone, PartialEq)]
pub enum SlugMatch {
	Current(Crane),
	Redirected { from: String, crane: Crane },
}

impl SlugMatch {
	pub fn crane(&self) -> &Crane {
		match self {
			SlugMatch::Current(crane) | SlugMatch::Redirected { crane, .. } => crane,
		}
	}

	pub fn into_crane(self) -> Crane {
		match self {
			SlugMatch::Current(crane) | SlugMatch::Redirected { crane, .. } => crane,
		}
	}

	pub fn is_redirect(&self) -> bool {
		matches!(self, SlugMatch::Redirected { .. })
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraneSitemapEntry {
	pub slug: String,
	pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait CraneStore: Send + Sync {
	async fn create_crane(&self, crane: &NewCrane) -> Result<Crane>;
	async fn get_crane(&self, id: Uuid) -> Result<Option<Crane>>;
	async fn get_crane_by_slug(&self, slug: &str) -> Result<Option<Crane>>;
	async fn find_by_slug_or_redirect(&self, slug: &str) -> Result<Option<SlugMatch>>;
	async fn list_cranes(&self, filter: &CraneFilter) -> Result<(Vec<Crane>, i64)>;
	async fn update_crane(&self, id: Uuid, update: CraneUpdate) -> Result<Crane>;
	async fn delete_crane(&self, id: Uuid) -> Result<bool>;
	async fn list_sitemap_entries(&self) -> Result<Vec<CraneSitemapEntry>>;
}

#[derive(Clone)]
pub struct CraneRepository {
	pool: SqlitePool,
}

impl CraneRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, crane), fields(slug = %crane.slug))]
	pub async fn create_crane(&self, crane: &NewCrane) -> Result<Crane> {
		let id = Uuid::new_v4();
		let now = now_rfc3339();
		let mut tx = self.pool.begin().await?;

		sqlx::query(
			r#"
			INSERT INTO cranes (id, slug, name, manufacturer, model, crane_type, condition, status,
				year_of_manufacture, max_capacity_kg, tip_capacity_kg, max_jib_length_m, max_hook_height_m,
				price_eur, location, description, featured, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(id.to_string())
		.bind(&crane.slug)
		.bind(&crane.name)
		.bind(&crane.manufacturer)
		.bind(&crane.model)
		.bind(crane.crane_type.as_str())
		.bind(crane.condition.as_str())
		.bind(crane.status.as_str())
		.bind(crane.year_of_manufacture)
		.bind(crane.max_capacity_kg)
		.bind(crane.tip_capacity_kg)
		.bind(crane.max_jib_length_m)
		.bind(crane.max_hook_height_m)
		.bind(crane.price_eur)
		.bind(&crane.location)
		.bind(&crane.description)
		.bind(crane.featured)
		.bind(&now)
		.bind(&now)
		.execute(&mut *tx)
		.await
		.map_err(|e| DbError::from_insert(e, || format!("slug already in use: {}", crane.slug)))?;

		// A live slug never redirects elsewhere.
		sqlx::query("DELETE FROM slug_redirects WHERE old_slug = ?")
			.bind(&crane.slug)
			.execute(&mut *tx)
			.await?;

		let created = fetch_by_id(&mut tx, id)
			.await?
			.ok_or_else(|| DbError::Internal(format!("crane {id} vanished after insert")))?;
		tx.commit().await?;

		tracing::info!(crane_id = %id, slug = %created.slug, "crane created");
		Ok(created)
	}

	#[tracing::instrument(skip(self), fields(crane_id = %id))]
	pub async fn get_crane(&self, id: Uuid) -> Result<Option<Crane>> {
		let row = sqlx::query(&format!("SELECT {CRANE_COLUMNS} FROM cranes WHERE id = ?"))
			.bind(id.to_string())
			.fetch_optional(&self.pool)
			.await?;

		row.as_ref().map(parse_crane_row).transpose()
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_crane_by_slug(&self, slug: &str) -> Result<Option<Crane>> {
		let row = sqlx::query(&format!("SELECT {CRANE_COLUMNS} FROM cranes WHERE slug = ?"))
			.bind(slug)
			.fetch_optional(&self.pool)
			.await?;

		row.as_ref().map(parse_crane_row).transpose()
	}

	/// Looks the slug up directly, then through `slug_redirects`.
	#[tracing::instrument(skip(self))]
	pub async fn find_by_slug_or_redirect(&self, slug: &str) -> Result<Option<SlugMatch>> {
		if let Some(crane) = self.get_crane_by_slug(slug).await? {
			return Ok(Some(SlugMatch::Current(crane)));
		}

		let target: Option<String> =
			sqlx::query_scalar("SELECT new_slug FROM slug_redirects WHERE old_slug = ?")
				.bind(slug)
				.fetch_optional(&self.pool)
				.await?;

		let Some(target) = target else {
			return Ok(None);
		};

		match self.get_crane_by_slug(&target).await? {
			Some(crane) => {
				tracing::debug!(from = %slug, to = %crane.slug, "legacy slug resolved");
				Ok(Some(SlugMatch::Redirected {
					from: slug.to_string(),
					crane,
				}))
			}
			None => {
				tracing::warn!(from = %slug, to = %target, "slug redirect points at missing crane");
				Ok(None)
			}
		}
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_cranes(&self, filter: &CraneFilter) -> Result<(Vec<Crane>, i64)> {
		let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM cranes WHERE 1 = 1");
		push_filters(&mut count, filter);
		let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

		let mut select =
			QueryBuilder::<Sqlite>::new(format!("SELECT {CRANE_COLUMNS} FROM cranes WHERE 1 = 1"));
		push_filters(&mut select, filter);
		select
			.push(" ORDER BY featured DESC, created_at DESC, id LIMIT ")
			.push_bind(i64::from(filter.limit))
			.push(" OFFSET ")
			.push_bind(i64::from(filter.offset));

		let rows = select.build().fetch_all(&self.pool).await?;
		let cranes = rows.iter().map(parse_crane_row).collect::<Result<Vec<_>>>()?;

		Ok((cranes, total))
	}

	/// Applies a partial update. A slug change records `old -> new` in
	/// `slug_redirects`, repoints earlier redirects at the new slug, and drops
	/// any redirect whose old slug is now live again.
	#[tracing::instrument(skip(self, update), fields(crane_id = %id))]
	pub async fn update_crane(&self, id: Uuid, update: CraneUpdate) -> Result<Crane> {
		let mut tx = self.pool.begin().await?;

		let mut crane = fetch_by_id(&mut tx, id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("crane {id}")))?;
		let old_slug = crane.slug.clone();
		update.apply(&mut crane);
		let now = now_rfc3339();

		sqlx::query(
			r#"
			UPDATE cranes SET
				slug = ?, name = ?, manufacturer = ?, model = ?, crane_type = ?, condition = ?,
				status = ?, year_of_manufacture = ?, max_capacity_kg = ?, tip_capacity_kg = ?,
				max_jib_length_m = ?, max_hook_height_m = ?, price_eur = ?, location = ?,
				description = ?, featured = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&crane.slug)
		.bind(&crane.name)
		.bind(&crane.manufacturer)
		.bind(&crane.model)
		.bind(crane.crane_type.as_str())
		.bind(crane.condition.as_str())
		.bind(crane.status.as_str())
		.bind(crane.year_of_manufacture)
		.bind(crane.max_capacity_kg)
		.bind(crane.tip_capacity_kg)
		.bind(crane.max_jib_length_m)
		.bind(crane.max_hook_height_m)
		.bind(crane.price_eur)
		.bind(&crane.location)
		.bind(&crane.description)
		.bind(crane.featured)
		.bind(&now)
		.bind(id.to_string())
		.execute(&mut *tx)
		.await
		.map_err(|e| DbError::from_insert(e, || format!("slug already in use: {}", crane.slug)))?;

		if crane.slug != old_slug {
			sqlx::query("UPDATE slug_redirects SET new_slug = ? WHERE new_slug = ?")
				.bind(&crane.slug)
				.bind(&old_slug)
				.execute(&mut *tx)
				.await?;

			sqlx::query(
				r#"
				INSERT INTO slug_redirects (old_slug, new_slug, created_at)
				VALUES (?, ?, ?)
				ON CONFLICT(old_slug) DO UPDATE SET new_slug = excluded.new_slug, created_at = excluded.created_at
				"#,
			)
			.bind(&old_slug)
			.bind(&crane.slug)
			.bind(&now)
			.execute(&mut *tx)
			.await?;

			sqlx::query("DELETE FROM slug_redirects WHERE old_slug = ?")
				.bind(&crane.slug)
				.execute(&mut *tx)
				.await?;

			tracing::info!(crane_id = %id, from = %old_slug, to = %crane.slug, "crane slug changed");
		}

		let updated = fetch_by_id(&mut tx, id)
			.await?
			.ok_or_else(|| DbError::Internal(format!("crane {id} vanished during update")))?;
		tx.commit().await?;

		Ok(updated)
	}

	/// Deletes the crane and every redirect pointing at it.
	#[tracing::instrument(skip(self), fields(crane_id = %id))]
	pub async fn delete_crane(&self, id: Uuid) -> Result<bool> {
		let mut tx = self.pool.begin().await?;

		let slug: Option<String> = sqlx::query_scalar("SELECT slug FROM cranes WHERE id = ?")
			.bind(id.to_string())
			.fetch_optional(&mut *tx)
			.await?;

		let Some(slug) = slug else {
			return Ok(false);
		};

		sqlx::query("DELETE FROM cranes WHERE id = ?")
			.bind(id.to_string())
			.execute(&mut *tx)
			.await?;

		sqlx::query("DELETE FROM slug_redirects WHERE new_slug = ?")
			.bind(&slug)
			.execute(&mut *tx)
			.await?;

		tx.commit().await?;

		tracing::info!(crane_id = %id, slug = %slug, "crane deleted");
		Ok(true)
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_sitemap_entries(&self) -> Result<Vec<CraneSitemapEntry>> {
		let rows = sqlx::query("SELECT slug, updated_at FROM cranes ORDER BY slug")
			.fetch_all(&self.pool)
			.await?;

		rows
			.iter()
			.map(|row| {
				let updated_at: String = row.get("updated_at");
				Ok(CraneSitemapEntry {
					slug: row.get("slug"),
					updated_at: parse_timestamp(&updated_at, "updated_at")?,
				})
			})
			.collect()
	}
}

#[async_trait]
impl CraneStore for CraneRepository {
	async fn create_crane(&self, crane: &NewCrane) -> Result<Crane> {
		self.create_crane(crane).await
	}

	async fn get_crane(&self, id: Uuid) -> Result<Option<Crane>> {
		self.get_crane(id).await
	}

	async fn get_crane_by_slug(&self, slug: &str) -> Result<Option<Crane>> {
		self.get_crane_by_slug(slug).await
	}

	async fn find_by_slug_or_redirect(&self, slug: &str) -> Result<Option<SlugMatch>> {
		self.find_by_slug_or_redirect(slug).await
	}

	async fn list_cranes(&self, filter: &CraneFilter) -> Result<(Vec<Crane>, i64)> {
		self.list_cranes(filter).await
	}

	async fn update_crane(&self, id: Uuid, update: CraneUpdate) -> Result<Crane> {
		self.update_crane(id, update).await
	}

	async fn delete_crane(&self, id: Uuid) -> Result<bool> {
		self.delete_crane(id).await
	}

	async fn list_sitemap_entries(&self) -> Result<Vec<CraneSitemapEntry>> {
		self.list_sitemap_entries().await
	}
}

async fn fetch_by_id(
	tx: &mut sqlx::Transaction<'_, Sqlite>,
	id: Uuid,
) -> Result<Option<Crane>> {
	let row = sqlx::query(&format!("SELECT {CRANE_COLUMNS} FROM cranes WHERE id = ?"))
		.bind(id.to_string())
		.fetch_optional(&mut **tx)
		.await?;

	row.as_ref().map(parse_crane_row).transpose()
}

fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, filter: &CraneFilter) {
	if let Some(status) = filter.status {
		builder.push(" AND status = ").push_bind(status.as_str());
	}
	if let Some(crane_type) = filter.crane_type {
		builder.push(" AND crane_type = ").push_bind(crane_type.as_str());
	}
	if let Some(condition) = filter.condition {
		builder.push(" AND condition = ").push_bind(condition.as_str());
	}
	if let Some(featured) = filter.featured {
		builder.push(" AND featured = ").push_bind(featured);
	}
}

fn parse_crane_row(row: &sqlx::sqlite::SqliteRow) -> Result<Crane> {
	let id_str: String = row.get("id");
	let crane_type: String = row.get("crane_type");
	let condition: String = row.get("condition");
	let status: String = row.get("status");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	Ok(Crane {
		id: parse_uuid(&id_str, "crane id")?,
		slug: row.get("slug"),
		name: row.get("name"),
		manufacturer: row.get("manufacturer"),
		model: row.get("model"),
		crane_type: crane_type.parse().map_err(DbError::Internal)?,
		condition: condition.parse().map_err(DbError::Internal)?,
		status: status.parse().map_err(DbError::Internal)?,
		year_of_manufacture: row.get("year_of_manufacture"),
		max_capacity_kg: row.get("max_capacity_kg"),
		tip_capacity_kg: row.get("tip_capacity_kg"),
		max_jib_length_m: row.get("max_jib_length_m"),
		max_hook_height_m: row.get("max_hook_height_m"),
		price_eur: row.get("price_eur"),
		location: row.get("location"),
		description: row.get("description"),
		featured: row.get("featured"),
		created_at: parse_timestamp(&created_at, "created_at")?,
		updated_at: parse_timestamp(&updated_at, "updated_at")?,
	})
}
