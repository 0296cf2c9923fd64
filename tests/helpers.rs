// Shared test helpers for database setup and fixture markup.

use sqlx::SqlitePool;

use schema_audit::run_migrations;

/// Creates a test database pool with migrations applied.
/// Uses an in-memory database for fast test execution.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// A page mixing all three formats, an Organization logo and an og:image.
#[allow(dead_code)]
pub const MIXED_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta property="og:image" content="https://acme.test/og.png">
    <script type="application/ld+json">
        {"@context": "https://schema.org", "@type": "Organization", "name": "Acme",
         "logo": "https://acme.test/logo.png"}
    </script>
    <script type="application/ld+json">
        {"@context": "https://schema.org", "@type": "Article"}
    </script>
</head>
<body>
    <div itemscope itemtype="https://schema.org/Product">
        <span itemprop="name">Widget</span>
    </div>
    <div vocab="https://schema.org/" typeof="Event"></div>
</body>
</html>"#;

/// Wraps a JSON-LD body in a script tag.
#[allow(dead_code)]
pub fn json_ld_page(json: &str) -> String {
    format!(r#"<html><head><script type="application/ld+json">{json}</script></head><body></body></html>"#)
}
