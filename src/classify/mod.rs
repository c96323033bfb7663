//! Architectural category classification from file paths.
//!
//! Ordered predicate list over path substrings. First match wins:
//! api, database, test, service, then internal.

use serde::Serialize;

/// Path segments marking HTTP route handlers.
pub const API_ROUTE_MARKERS: &[&str] = &["/src/pages/api/"];

/// Path segments marking the database module.
pub const DATABASE_MARKERS: &[&str] = &["/@databases/", "/src/databases/"];

/// Directory segments marking test code.
pub const TEST_DIR_MARKERS: &[&str] = &["/__tests__/"];

/// File name infixes marking test code.
pub const TEST_FILE_INFIXES: &[&str] = &[".test.", ".spec."];

/// Path segments marking domain service modules.
pub const SERVICE_MARKERS: &[&str] = &["/src/modules/domain/", "/src/modules/domain_v2/"];

/// Directory names whose next segment is the business domain.
pub const DOMAIN_SEGMENT_MARKERS: &[&str] = &["/domain/", "/domain_v2/"];

/// Domain filter value that disables service-layer scoping.
pub const UNSCOPED_DOMAIN: &str = "database";

/// Architectural layer of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Route handlers.
    Api,
    /// Domain service modules.
    Service,
    /// Everything else.
    Internal,
    /// Test code.
    Test,
    /// Database module.
    Database,
}

impl Category {
    /// Every category, in report order.
    pub const ALL: [Category; 5] = [
        Category::Api,
        Category::Service,
        Category::Internal,
        Category::Test,
        Category::Database,
    ];

    /// Convert to string for output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Api => "api",
            Category::Service => "service",
            Category::Internal => "internal",
            Category::Test => "test",
            Category::Database => "database",
        }
    }
}

/// Normalize separators, case, and anchor with a leading `/` so segment
/// markers also match at the start of a relative path.
fn normalize(path: &str) -> String {
    let lowered = path.replace('\\', "/").to_lowercase();
    if lowered.starts_with('/') {
        lowered
    } else {
        format!("/{}", lowered)
    }
}

fn contains_any(path: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| path.contains(m))
}

/// Classify a file path.
///
/// # Examples
///
/// ```
/// # use symref::classify::{categorize, Category};
/// assert_eq!(categorize("src/pages/api/users/route.ts"), Category::Api);
/// assert_eq!(
///     categorize("src/modules/domain/billing/invoice.service.ts"),
///     Category::Service
/// );
/// assert_eq!(categorize("src/lib/dates.ts"), Category::Internal);
/// ```
pub fn categorize(path: &str) -> Category {
    let path = normalize(path);

    if contains_any(&path, API_ROUTE_MARKERS) {
        Category::Api
    } else if contains_any(&path, DATABASE_MARKERS) {
        Category::Database
    } else if contains_any(&path, TEST_DIR_MARKERS) || contains_any(&path, TEST_FILE_INFIXES) {
        Category::Test
    } else if contains_any(&path, SERVICE_MARKERS) {
        Category::Service
    } else {
        Category::Internal
    }
}

/// The business domain of a path: the directory following a `domain` or
/// `domain_v2` segment. A file directly inside that segment has none.
pub fn domain_of(path: &str) -> Option<String> {
    let path = normalize(path);
    DOMAIN_SEGMENT_MARKERS.iter().find_map(|marker| {
        let start = path.find(marker)? + marker.len();
        let (segment, _) = path[start..].split_once('/')?;
        Some(segment)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
    })
}

/// Whether a file takes part in a scan narrowed to `domain_filter`.
///
/// Only service files are narrowed; every other category is scanned
/// project-wide. [`UNSCOPED_DOMAIN`] disables narrowing entirely.
pub fn in_scope(path: &str, category: Category, domain_filter: &str) -> bool {
    if domain_filter == UNSCOPED_DOMAIN || category != Category::Service {
        return true;
    }
    domain_of(path).is_some_and(|domain| domain == domain_filter.to_lowercase())
}
