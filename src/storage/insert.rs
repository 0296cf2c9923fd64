//! Report persistence.
//!
//! One row per site identifier. Re-running detection for the same site
//! overwrites the previous row.

use chrono::Utc;
use log::debug;
use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::schema::SchemaReport;

/// A report row as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReport {
    /// Site identifier the row is keyed by
    pub site_id: String,
    /// Inspected URL
    pub url: Option<String>,
    /// Detection outcome message
    pub message: Option<String>,
    /// Discovered logo URL
    pub logo: Option<String>,
    /// Serialized report JSON
    pub report_json: Option<String>,
    /// Last write, milliseconds since the Unix epoch
    pub updated_at: i64,
}

impl StoredReport {
    /// Parses the stored report JSON.
    pub fn report_value(&self) -> Option<serde_json::Value> {
        self.report_json
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok())
    }
}

/// Inserts or replaces the report for `site_id`.
///
/// The `logo` column is only overwritten when the report carries a logo key;
/// reports produced with logo discovery off keep the previously stored logo.
pub async fn upsert_report(
    pool: &SqlitePool,
    site_id: &str,
    report: &SchemaReport,
) -> Result<(), DatabaseError> {
    let report_json = serde_json::to_string(report)?;
    let has_logo = report.logo.is_some();

    sqlx::query(
        "INSERT INTO schema_reports (site_id, url, message, logo, report_json, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)
         ON CONFLICT(site_id) DO UPDATE SET
             url=excluded.url,
             message=excluded.message,
             logo=CASE WHEN ? THEN excluded.logo ELSE schema_reports.logo END,
             report_json=excluded.report_json,
             updated_at=excluded.updated_at",
    )
    .bind(site_id)
    .bind(&report.url)
    .bind(&report.message)
    .bind(report.logo_url())
    .bind(&report_json)
    .bind(Utc::now().timestamp_millis())
    .bind(has_logo)
    .execute(pool)
    .await?;

    debug!("Stored schema report for site {site_id}");
    Ok(())
}

/// Sets only the logo for `site_id`, creating the row if needed.
pub async fn upsert_logo(
    pool: &SqlitePool,
    site_id: &str,
    logo: Option<&str>,
) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO schema_reports (site_id, logo, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(site_id) DO UPDATE SET
             logo=excluded.logo,
             updated_at=excluded.updated_at",
    )
    .bind(site_id)
    .bind(logo)
    .bind(Utc::now().timestamp_millis())
    .execute(pool)
    .await?;

    Ok(())
}

/// Loads the stored row for `site_id`.
pub async fn fetch_report(
    pool: &SqlitePool,
    site_id: &str,
) -> Result<Option<StoredReport>, DatabaseError> {
    let row = sqlx::query(
        "SELECT site_id, url, message, logo, report_json, updated_at
         FROM schema_reports WHERE site_id = ?",
    )
    .bind(site_id)
    .fetch_optional(pool)
    .await?;

    row.map(|row| {
        Ok(StoredReport {
            site_id: row.try_get("site_id")?,
            url: row.try_get("url")?,
            message: row.try_get("message")?,
            logo: row.try_get("logo")?,
            report_json: row.try_get("report_json")?,
            updated_at: row.try_get("updated_at")?,
        })
    })
    .transpose()
    .map_err(DatabaseError::SqlError)
}
