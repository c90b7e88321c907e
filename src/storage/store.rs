//! SQLite-backed restaurant store.
//!
//! Every operation opens its own connection, runs one statement (or one
//! import transaction) and drops the connection. The import replaces the
//! whole table inside a single transaction, so readers observe either the
//! previous contents or the fully reloaded ones.

use std::path::PathBuf;
use std::time::Duration;

use rusqlite::types::{Value, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};
use serde_json::Number;

use crate::storage::schema::{self, COLUMNS, FLAG_VOCABULARY, TABLE};

/// One venue, as a column-name → value mapping in schema order.
///
/// Values are surfaced exactly as stored: numbers stay numbers, text stays
/// text. The importer does no coercion, so a typed struct would be lossy here.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Parsed menu fields of a single record.
#[derive(Debug, PartialEq, Eq)]
pub struct Menu {
    pub food_items: Vec<String>,
    pub drink_items: Vec<String>,
}

/// Optional search criteria. Absent fields constrain nothing; so do empty
/// strings, non-positive guest counts and flag values outside the fixed
/// vocabulary.
#[derive(Debug, Default, Clone)]
pub struct SearchFilters {
    pub area: Option<String>,
    pub genre: Option<String>,
    pub capacity: Option<i64>,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub private_room: Option<String>,
    pub drink_all_included: Option<String>,
}

impl SearchFilters {
    /// Maps each active filter to a predicate fragment plus its bound value.
    /// Values are always bound as parameters, never spliced into the SQL.
    fn clauses(&self) -> Vec<(&'static str, Value)> {
        let mut clauses = Vec::new();

        if let Some(area) = self.area.as_deref().filter(|s| !s.is_empty()) {
            clauses.push(("area = ?", Value::Text(area.to_owned())));
        }
        if let Some(genre) = self.genre.as_deref().filter(|s| !s.is_empty()) {
            clauses.push(("category LIKE ?", Value::Text(format!("%{genre}%"))));
        }
        if let Some(capacity) = self.capacity.filter(|&n| n > 0) {
            clauses.push(("capacity >= ?", Value::Integer(capacity)));
        }
        if let Some(min) = self.budget_min {
            clauses.push(("budget_min >= ?", Value::Integer(min)));
        }
        if let Some(max) = self.budget_max {
            clauses.push(("budget_max <= ?", Value::Integer(max)));
        }
        if let Some(flag) = valid_flag(self.private_room.as_deref()) {
            clauses.push(("has_private_room = ?", Value::Text(flag.to_owned())));
        }
        if let Some(flag) = valid_flag(self.drink_all_included.as_deref()) {
            clauses.push(("has_drink_all_included = ?", Value::Text(flag.to_owned())));
        }

        clauses
    }
}

fn valid_flag(value: Option<&str>) -> Option<&str> {
    value.filter(|v| FLAG_VOCABULARY.contains(v))
}

/// Handle to the restaurant table. Cheap to clone; holds only the path.
#[derive(Debug, Clone)]
pub struct Store {
    db_path: PathBuf,
}

impl Store {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(conn)
    }

    /// Creates the table if it does not exist yet, so the read endpoints
    /// return empty results instead of failing before the first import.
    pub fn ensure_table(&self) -> rusqlite::Result<()> {
        let conn = self.connect()?;
        conn.execute(&schema::create_table_sql(), [])?;
        Ok(())
    }

    /// Drops, recreates and refills the table from header-stripped rows.
    ///
    /// The whole refresh runs in one transaction: a failed insert rolls the
    /// previous contents back, and no reader sees a missing or half-filled
    /// table. Each row must already be padded to the schema width.
    pub fn replace_all(&self, rows: &[Vec<String>]) -> rusqlite::Result<usize> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS {TABLE}"), [])?;
        tx.execute(&schema::create_table_sql(), [])?;
        {
            let mut stmt = tx.prepare(&schema::insert_sql())?;
            for row in rows {
                stmt.execute(params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;
        Ok(rows.len())
    }

    /// Runs the conjunctive filter query. No filters means the full table.
    pub fn search(&self, filters: &SearchFilters) -> rusqlite::Result<Vec<Record>> {
        let conn = self.connect()?;

        let mut sql = schema::select_sql();
        sql.push_str(" WHERE 1=1");
        let mut bound: Vec<Value> = Vec::new();
        for (fragment, value) in filters.clauses() {
            sql.push_str(" AND ");
            sql.push_str(fragment);
            bound.push(value);
        }

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(bound), row_to_record)?;
        rows.collect()
    }

    /// Primary-key lookup. `None` means no such record, which callers report
    /// as not-found rather than an empty list.
    pub fn get(&self, id: i64) -> rusqlite::Result<Option<Record>> {
        let conn = self.connect()?;
        let sql = format!("{} WHERE id = ?", schema::select_sql());
        conn.query_row(&sql, params![id], row_to_record).optional()
    }

    /// Menu and drink-menu fields of one record, parsed into string lists.
    pub fn menu(&self, id: i64) -> rusqlite::Result<Option<Menu>> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("SELECT menu, drink_menu FROM {TABLE} WHERE id = ?"),
            params![id],
            |row| {
                let food: Option<String> = row.get(0)?;
                let drink: Option<String> = row.get(1)?;
                Ok(Menu {
                    food_items: parse_menu_list(food.as_deref().unwrap_or_default()),
                    drink_items: parse_menu_list(drink.as_deref().unwrap_or_default()),
                })
            },
        )
        .optional()
    }

    pub fn distinct_areas(&self) -> rusqlite::Result<Vec<String>> {
        self.distinct_column("area")
    }

    pub fn distinct_categories(&self) -> rusqlite::Result<Vec<String>> {
        self.distinct_column("category")
    }

    fn distinct_column(&self, column: &str) -> rusqlite::Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("SELECT DISTINCT {column} FROM {TABLE}"))?;
        let rows = stmt.query_map([], |row| {
            let value: Option<String> = row.get(0)?;
            Ok(value.unwrap_or_default())
        })?;
        rows.collect()
    }

    /// First `limit` raw rows, for the check-db diagnostic.
    pub fn sample(&self, limit: i64) -> rusqlite::Result<Vec<Record>> {
        let conn = self.connect()?;
        let sql = format!("{} LIMIT ?", schema::select_sql());
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit], row_to_record)?;
        rows.collect()
    }

    pub fn count(&self) -> rusqlite::Result<i64> {
        let conn = self.connect()?;
        conn.query_row(&format!("SELECT COUNT(*) FROM {TABLE}"), [], |row| {
            row.get(0)
        })
    }
}

/// Maps a result row to a record through the schema column list, keeping each
/// value in its stored representation.
fn row_to_record(row: &Row<'_>) -> rusqlite::Result<Record> {
    let mut record = Record::new();
    let id: i64 = row.get(0)?;
    record.insert("id".to_owned(), id.into());
    for (i, column) in COLUMNS.iter().enumerate() {
        let value = match row.get_ref(i + 1)? {
            ValueRef::Null => serde_json::Value::Null,
            ValueRef::Integer(n) => n.into(),
            ValueRef::Real(f) => Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned().into(),
            ValueRef::Blob(_) => serde_json::Value::Null,
        };
        record.insert(column.name.to_owned(), value);
    }
    Ok(record)
}

/// Menu fields arrive either as a JSON-encoded array or as a comma-delimited
/// string. JSON wins when it decodes; empty input is an empty list.
pub fn parse_menu_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
        return items;
    }
    trimmed
        .split(',')
        .map(|item| item.trim().to_owned())
        .filter(|item| !item.is_empty())
        .collect()
}
