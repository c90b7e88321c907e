//! Table schema for the restaurant directory.
//!
//! The ordered column list below is the single source of truth: the importer
//! binds spreadsheet values positionally against it and the query service maps
//! result rows back through it, so column order lives in exactly one place.

/// Destination table name.
pub const TABLE: &str = "restaurants";

/// SQLite column affinity for a schema column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affinity {
    Text,
    Integer,
    Real,
}

impl Affinity {
    pub fn sql(self) -> &'static str {
        match self {
            Affinity::Text => "TEXT",
            Affinity::Integer => "INTEGER",
            Affinity::Real => "REAL",
        }
    }
}

/// One data column (the auto-assigned `id` primary key is not listed here).
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub affinity: Affinity,
}

const fn col(name: &'static str, affinity: Affinity) -> Column {
    Column { name, affinity }
}

/// The 29 data columns, in spreadsheet order.
pub const COLUMNS: [Column; 29] = [
    col("name", Affinity::Text),
    col("address", Affinity::Text),
    col("phone", Affinity::Text),
    col("tabelog_rating", Affinity::Real),
    col("tabelog_reviews", Affinity::Integer),
    col("tabelog_link", Affinity::Text),
    col("google_rating", Affinity::Real),
    col("google_reviews", Affinity::Integer),
    col("google_link", Affinity::Text),
    col("opening_hours", Affinity::Text),
    col("course", Affinity::Text),
    col("menu", Affinity::Text),
    col("drink_menu", Affinity::Text),
    col("store_top_image", Affinity::Text),
    col("description", Affinity::Text),
    col("longitude", Affinity::Real),
    col("latitude", Affinity::Real),
    col("area", Affinity::Text),
    col("nearest_station", Affinity::Text),
    col("directions", Affinity::Text),
    col("capacity", Affinity::Integer),
    col("category", Affinity::Text),
    col("budget_min", Affinity::Integer),
    col("budget_max", Affinity::Integer),
    col("has_private_room", Affinity::Text),
    col("has_drink_all_included", Affinity::Text),
    col("detail_image1", Affinity::Text),
    col("detail_image2", Affinity::Text),
    col("detail_image3", Affinity::Text),
];

/// Expected width of an imported spreadsheet row.
pub const COLUMN_COUNT: usize = COLUMNS.len();

/// Accepted values for `has_private_room` / `has_drink_all_included`.
/// Filter values outside this vocabulary are treated as absent.
pub const FLAG_VOCABULARY: [&str; 2] = ["有", "無"];

pub fn create_table_sql() -> String {
    let mut sql =
        format!("CREATE TABLE IF NOT EXISTS {TABLE} (\n    id INTEGER PRIMARY KEY AUTOINCREMENT");
    for column in COLUMNS {
        sql.push_str(",\n    ");
        sql.push_str(column.name);
        sql.push(' ');
        sql.push_str(column.affinity.sql());
    }
    sql.push_str("\n)");
    sql
}

pub fn insert_sql() -> String {
    let names: Vec<&str> = COLUMNS.iter().map(|c| c.name).collect();
    let placeholders = vec!["?"; COLUMN_COUNT].join(", ");
    format!(
        "INSERT INTO {TABLE} ({}) VALUES ({placeholders})",
        names.join(", ")
    )
}

/// `SELECT id, <all data columns>` prefix shared by the list/search queries.
pub fn select_sql() -> String {
    let names: Vec<&str> = COLUMNS.iter().map(|c| c.name).collect();
    format!("SELECT id, {} FROM {TABLE}", names.join(", "))
}
