//! SQLite-backed repositories via libsql. Implements TransactionRepository and CategoryRepository.
//!
//! One database file (equilibrio.db) in the configured data directory. Timestamps are stored as
//! epoch milliseconds so range filters stay plain integer comparisons. Searchable text is
//! stored a second time, folded by [`fold_case`], so substring filters agree with the
//! in-memory adapter for non-ASCII text.

use crate::domain::filters::{fold_case, non_blank};
use crate::domain::transaction::validate_amount;
use crate::domain::{
    Category, CategoryFilters, CategoryProps, Currency, DomainError, Transaction,
    TransactionFilters, TransactionProps, TransactionType,
};
use crate::ports::{CategoryRepository, TransactionRepository};
use chrono::{DateTime, Utc};
use libsql::params::Params;
use libsql::{Connection, Database, Row, Value, params};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DB_FILE: &str = "equilibrio.db";

const TRANSACTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    uid TEXT NOT NULL UNIQUE,
    amount REAL NOT NULL CHECK (amount > 0 AND amount <= 99999999.99 AND round(amount, 2) = amount),
    type TEXT NOT NULL CHECK (type IN ('INCOME', 'EXPENSE')),
    currency TEXT NOT NULL DEFAULT 'COP' CHECK (currency IN ('COP')),
    category_id TEXT NOT NULL,
    date INTEGER NOT NULL,
    description TEXT,
    description_folded TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
)"#;
const TRANSACTIONS_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions (date DESC)";
const TRANSACTIONS_CATEGORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions (category_id)";

const CATEGORIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    uid TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL UNIQUE,
    name_folded TEXT NOT NULL,
    description TEXT,
    color TEXT,
    icon TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
)"#;
const CATEGORIES_ACTIVE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_categories_is_active ON categories (is_active)";

const TRANSACTION_COLUMNS: &str =
    "id, uid, amount, type, currency, category_id, date, description, created_at, updated_at";
const CATEGORY_COLUMNS: &str =
    "id, uid, name, description, color, icon, is_active, created_at, updated_at";

fn repo_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::Repo(e.to_string())
}

/// Unique-constraint failures surface as `Conflict`, CHECK failures as `Validation`,
/// everything else as `Repo`.
fn write_err(e: libsql::Error) -> DomainError {
    let message = e.to_string();
    if message.contains("UNIQUE constraint failed") {
        DomainError::Conflict(message)
    } else if message.contains("CHECK constraint failed") {
        DomainError::Validation(message)
    } else {
        DomainError::Repo(message)
    }
}

fn millis(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>, DomainError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| DomainError::Repo(format!("timestamp out of range: {ms}")))
}

fn real(row: &Row, idx: i32) -> Result<f64, DomainError> {
    match row.get_value(idx).map_err(repo_err)? {
        Value::Real(v) => Ok(v),
        Value::Integer(v) => Ok(v as f64),
        Value::Null => Ok(0.0),
        other => Err(DomainError::Repo(format!(
            "expected a number in column {idx}, got {other:?}"
        ))),
    }
}

fn opt_text(row: &Row, idx: i32) -> Result<Option<String>, DomainError> {
    match row.get_value(idx).map_err(repo_err)? {
        Value::Null => Ok(None),
        Value::Text(s) => Ok(Some(s)),
        other => Err(DomainError::Repo(format!(
            "expected text in column {idx}, got {other:?}"
        ))),
    }
}

fn opt_text_value(value: Option<&str>) -> Value {
    match value {
        Some(s) => Value::Text(s.to_string()),
        None => Value::Null,
    }
}

/// WHERE clause (possibly empty) and its positional values.
fn transaction_where(filters: &TransactionFilters) -> (String, Vec<Value>) {
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();
    if let Some(kind) = filters.kind {
        clauses.push("type = ?");
        values.push(Value::Text(kind.as_str().to_string()));
    }
    if let Some(currency) = filters.currency {
        clauses.push("currency = ?");
        values.push(Value::Text(currency.as_str().to_string()));
    }
    if let Some(category_id) = non_blank(&filters.category_id) {
        clauses.push("category_id = ?");
        values.push(Value::Text(category_id.to_string()));
    }
    if let Some(from) = filters.date_from {
        clauses.push("date >= ?");
        values.push(Value::Integer(millis(from)));
    }
    if let Some(to) = filters.date_to {
        clauses.push("date <= ?");
        values.push(Value::Integer(millis(to)));
    }
    if let Some(min) = filters.amount_min {
        clauses.push("amount >= ?");
        values.push(Value::Real(min));
    }
    if let Some(max) = filters.amount_max {
        clauses.push("amount <= ?");
        values.push(Value::Real(max));
    }
    if let Some(term) = non_blank(&filters.description) {
        clauses.push("instr(description_folded, ?) > 0");
        values.push(Value::Text(fold_case(term)));
    }
    (where_sql(&clauses), values)
}

fn category_where(filters: &CategoryFilters) -> (String, Vec<Value>) {
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();
    if let Some(term) = non_blank(&filters.name) {
        clauses.push("instr(name_folded, ?) > 0");
        values.push(Value::Text(fold_case(term)));
    }
    if let Some(active) = filters.is_active {
        clauses.push("is_active = ?");
        values.push(Value::Integer(i64::from(active)));
    }
    if let Some(color) = non_blank(&filters.color) {
        clauses.push("color = ?");
        values.push(Value::Text(color.to_string()));
    }
    if let Some(icon) = non_blank(&filters.icon) {
        clauses.push("icon = ?");
        values.push(Value::Text(icon.to_string()));
    }
    (where_sql(&clauses), values)
}

fn where_sql(clauses: &[&str]) -> String {
    if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    }
}

/// SQLite needs a LIMIT for OFFSET; -1 means unbounded.
fn limit_offset_sql(limit: Option<u32>, offset: Option<u32>, values: &mut Vec<Value>) -> String {
    values.push(Value::Integer(limit.map_or(-1, i64::from)));
    values.push(Value::Integer(i64::from(offset.unwrap_or(0))));
    " LIMIT ? OFFSET ?".to_string()
}

fn row_to_transaction(row: &Row) -> Result<Transaction, DomainError> {
    let kind: String = row.get(3).map_err(repo_err)?;
    let currency: String = row.get(4).map_err(repo_err)?;
    let props = TransactionProps {
        id: Some(row.get::<i64>(0).map_err(repo_err)?),
        uid: row.get::<String>(1).map_err(repo_err)?,
        amount: real(row, 2)?,
        kind: kind
            .parse::<TransactionType>()
            .map_err(|e| DomainError::Repo(format!("bad type column: {e}")))?,
        currency: currency
            .parse::<Currency>()
            .map_err(|e| DomainError::Repo(format!("bad currency column: {e}")))?,
        category_id: row.get::<String>(5).map_err(repo_err)?,
        date: from_millis(row.get::<i64>(6).map_err(repo_err)?)?,
        description: opt_text(row, 7)?,
        created_at: Some(from_millis(row.get::<i64>(8).map_err(repo_err)?)?),
        updated_at: Some(from_millis(row.get::<i64>(9).map_err(repo_err)?)?),
    };
    Ok(Transaction::restore(props))
}

fn row_to_category(row: &Row) -> Result<Category, DomainError> {
    let props = CategoryProps {
        id: Some(row.get::<i64>(0).map_err(repo_err)?),
        uid: row.get::<String>(1).map_err(repo_err)?,
        name: row.get::<String>(2).map_err(repo_err)?,
        description: opt_text(row, 3)?,
        color: opt_text(row, 4)?,
        icon: opt_text(row, 5)?,
        is_active: row.get::<i64>(6).map_err(repo_err)? != 0,
        created_at: Some(from_millis(row.get::<i64>(7).map_err(repo_err)?)?),
        updated_at: Some(from_millis(row.get::<i64>(8).map_err(repo_err)?)?),
    };
    Category::create(props).map_err(|e| DomainError::Repo(format!("stored category invalid: {e}")))
}

/// SQLite repository. One database file shared by both tables; safe to share via Arc.
pub struct SqliteRepo {
    db: Database,
    db_path: PathBuf,
}

impl SqliteRepo {
    /// Connect to (or create) the database in `base_dir` and ensure the schema exists.
    /// Call this once at startup.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(repo_err)?;
        let db_path = base.join(DB_FILE);
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(repo_err)?;
        let conn = db.connect().map_err(repo_err)?;

        // PRAGMA returns a row; consume it (execute fails when rows are returned).
        for pragma in ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"] {
            let mut rows = conn
                .query(pragma, ())
                .await
                .map_err(|e| DomainError::Repo(format!("{pragma} failed: {e}")))?;
            while rows.next().await.map_err(repo_err)?.is_some() {}
        }

        for ddl in [
            TRANSACTIONS_TABLE,
            TRANSACTIONS_DATE_INDEX,
            TRANSACTIONS_CATEGORY_INDEX,
            CATEGORIES_TABLE,
            CATEGORIES_ACTIVE_INDEX,
        ] {
            conn.execute(ddl, ()).await.map_err(repo_err)?;
        }

        info!(path = %db_path.display(), "SQLite connected with WAL mode");

        Ok(Self { db, db_path })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn conn(&self) -> Result<Connection, DomainError> {
        self.db.connect().map_err(repo_err)
    }

    async fn query_transactions(
        &self,
        sql: &str,
        values: Vec<Value>,
    ) -> Result<Vec<Transaction>, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(sql, Params::Positional(values))
            .await
            .map_err(repo_err)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await.map_err(repo_err)? {
            out.push(row_to_transaction(&row)?);
        }
        Ok(out)
    }

    async fn query_categories(
        &self,
        sql: &str,
        values: Vec<Value>,
    ) -> Result<Vec<Category>, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(sql, Params::Positional(values))
            .await
            .map_err(repo_err)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await.map_err(repo_err)? {
            out.push(row_to_category(&row)?);
        }
        Ok(out)
    }

    /// First column of the first row as an integer (COUNT queries).
    async fn query_count(&self, sql: &str, values: Vec<Value>) -> Result<u64, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(sql, Params::Positional(values))
            .await
            .map_err(repo_err)?;
        match rows.next().await.map_err(repo_err)? {
            Some(row) => Ok(row.get::<i64>(0).map_err(repo_err)?.max(0) as u64),
            None => Ok(0),
        }
    }
}

#[async_trait::async_trait]
impl TransactionRepository for SqliteRepo {
    async fn save(&self, transaction: Transaction) -> Result<Transaction, DomainError> {
        validate_amount(transaction.amount())?;
        let folded = transaction.description().map(fold_case);
        let conn = self.conn()?;
        if transaction.id() == 0 {
            let mut rows = conn
                .query(
                    r#"
                    INSERT INTO transactions
                        (uid, amount, type, currency, category_id, date, description,
                         description_folded, created_at, updated_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                    RETURNING id
                    "#,
                    params![
                        transaction.uid(),
                        transaction.amount(),
                        transaction.kind().as_str(),
                        transaction.currency().as_str(),
                        transaction.category_id(),
                        millis(transaction.date()),
                        opt_text_value(transaction.description()),
                        opt_text_value(folded.as_deref()),
                        millis(transaction.created_at()),
                        millis(transaction.updated_at()),
                    ],
                )
                .await
                .map_err(write_err)?;
            let id = match rows.next().await.map_err(write_err)? {
                Some(row) => row.get::<i64>(0).map_err(repo_err)?,
                None => return Err(DomainError::Repo("insert returned no id".into())),
            };
            debug!(id, uid = transaction.uid(), "transaction inserted");
            return Ok(transaction.with_id(id));
        }

        conn.execute(
            r#"
            INSERT INTO transactions
                (id, uid, amount, type, currency, category_id, date, description,
                 description_folded, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT (id) DO UPDATE SET
                uid = excluded.uid,
                amount = excluded.amount,
                type = excluded.type,
                currency = excluded.currency,
                category_id = excluded.category_id,
                date = excluded.date,
                description = excluded.description,
                description_folded = excluded.description_folded,
                updated_at = excluded.updated_at
            "#,
            params![
                transaction.id(),
                transaction.uid(),
                transaction.amount(),
                transaction.kind().as_str(),
                transaction.currency().as_str(),
                transaction.category_id(),
                millis(transaction.date()),
                opt_text_value(transaction.description()),
                opt_text_value(folded.as_deref()),
                millis(transaction.created_at()),
                millis(transaction.updated_at()),
            ],
        )
        .await
        .map_err(write_err)?;
        Ok(transaction)
    }

    async fn find_all(&self) -> Result<Vec<Transaction>, DomainError> {
        let sql = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY date DESC, id DESC");
        self.query_transactions(&sql, Vec::new()).await
    }

    async fn find_by_id(&self, uid: &str) -> Result<Option<Transaction>, DomainError> {
        let sql = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE uid = ?");
        let mut found = self
            .query_transactions(&sql, vec![Value::Text(uid.to_string())])
            .await?;
        Ok(found.pop())
    }

    async fn delete(&self, uid: &str) -> Result<(), DomainError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM transactions WHERE uid = ?1", params![uid])
            .await
            .map_err(repo_err)?;
        Ok(())
    }

    async fn find_by_filters(
        &self,
        filters: &TransactionFilters,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Transaction>, DomainError> {
        let (where_clause, mut values) = transaction_where(filters);
        let page = limit_offset_sql(limit, offset, &mut values);
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions{where_clause} ORDER BY date DESC, id DESC{page}"
        );
        self.query_transactions(&sql, values).await
    }

    async fn find_all_paginated(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Transaction>, DomainError> {
        TransactionRepository::find_by_filters(
            self,
            &TransactionFilters::default(),
            Some(limit),
            Some(offset),
        )
        .await
    }

    async fn find_by_category(&self, category_id: &str) -> Result<Vec<Transaction>, DomainError> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE category_id = ? ORDER BY date DESC, id DESC"
        );
        self.query_transactions(&sql, vec![Value::Text(category_id.to_string())])
            .await
    }

    async fn find_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, DomainError> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE date >= ? AND date <= ? ORDER BY date DESC, id DESC"
        );
        self.query_transactions(
            &sql,
            vec![Value::Integer(millis(from)), Value::Integer(millis(to))],
        )
        .await
    }

    async fn count_by_filters(&self, filters: &TransactionFilters) -> Result<u64, DomainError> {
        let (where_clause, values) = transaction_where(filters);
        let sql = format!("SELECT COUNT(*) FROM transactions{where_clause}");
        self.query_count(&sql, values).await
    }

    async fn get_total_amount_by_type(&self, kind: TransactionType) -> Result<f64, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                "SELECT COALESCE(SUM(amount), 0.0) FROM transactions WHERE type = ?1",
                params![kind.as_str()],
            )
            .await
            .map_err(repo_err)?;
        match rows.next().await.map_err(repo_err)? {
            Some(row) => real(&row, 0),
            None => Ok(0.0),
        }
    }

    async fn count_by_category(&self, category_id: &str) -> Result<u64, DomainError> {
        self.query_count(
            "SELECT COUNT(*) FROM transactions WHERE category_id = ?",
            vec![Value::Text(category_id.to_string())],
        )
        .await
    }
}

#[async_trait::async_trait]
impl CategoryRepository for SqliteRepo {
    async fn save(&self, category: Category) -> Result<Category, DomainError> {
        let conn = self.conn()?;
        if category.id() == 0 {
            let mut rows = conn
                .query(
                    r#"
                    INSERT INTO categories
                        (uid, name, name_folded, description, color, icon, is_active, created_at, updated_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                    RETURNING id
                    "#,
                    params![
                        category.uid(),
                        category.name(),
                        fold_case(category.name()),
                        opt_text_value(category.description()),
                        opt_text_value(category.color()),
                        opt_text_value(category.icon()),
                        i64::from(category.is_active()),
                        millis(category.created_at()),
                        millis(category.updated_at()),
                    ],
                )
                .await
                .map_err(write_err)?;
            let id = match rows.next().await.map_err(write_err)? {
                Some(row) => row.get::<i64>(0).map_err(repo_err)?,
                None => return Err(DomainError::Repo("insert returned no id".into())),
            };
            debug!(id, uid = category.uid(), "category inserted");
            return Ok(category.with_id(id));
        }

        conn.execute(
            r#"
            INSERT INTO categories
                (id, uid, name, name_folded, description, color, icon, is_active, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ON CONFLICT (id) DO UPDATE SET
                uid = excluded.uid,
                name = excluded.name,
                name_folded = excluded.name_folded,
                description = excluded.description,
                color = excluded.color,
                icon = excluded.icon,
                is_active = excluded.is_active,
                updated_at = excluded.updated_at
            "#,
            params![
                category.id(),
                category.uid(),
                category.name(),
                fold_case(category.name()),
                opt_text_value(category.description()),
                opt_text_value(category.color()),
                opt_text_value(category.icon()),
                i64::from(category.is_active()),
                millis(category.created_at()),
                millis(category.updated_at()),
            ],
        )
        .await
        .map_err(write_err)?;
        Ok(category)
    }

    async fn find_all(&self) -> Result<Vec<Category>, DomainError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY created_at DESC, id DESC");
        self.query_categories(&sql, Vec::new()).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, DomainError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?");
        let mut found = self.query_categories(&sql, vec![Value::Integer(id)]).await?;
        Ok(found.pop())
    }

    async fn find_by_uid(&self, uid: &str) -> Result<Option<Category>, DomainError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE uid = ?");
        let mut found = self
            .query_categories(&sql, vec![Value::Text(uid.to_string())])
            .await?;
        Ok(found.pop())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM categories WHERE id = ?1", params![id])
            .await
            .map_err(repo_err)?;
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE name = ?");
        let mut found = self
            .query_categories(&sql, vec![Value::Text(name.to_string())])
            .await?;
        Ok(found.pop())
    }

    async fn find_by_filters(
        &self,
        filters: &CategoryFilters,
    ) -> Result<Vec<Category>, DomainError> {
        let (where_clause, values) = category_where(filters);
        let sql = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories{where_clause} ORDER BY created_at DESC, id DESC"
        );
        self.query_categories(&sql, values).await
    }

    async fn find_active_categories(&self) -> Result<Vec<Category>, DomainError> {
        let filters = CategoryFilters {
            is_active: Some(true),
            ..Default::default()
        };
        CategoryRepository::find_by_filters(self, &filters).await
    }

    async fn find_inactive_categories(&self) -> Result<Vec<Category>, DomainError> {
        let filters = CategoryFilters {
            is_active: Some(false),
            ..Default::default()
        };
        CategoryRepository::find_by_filters(self, &filters).await
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let count = self
            .query_count(
                "SELECT COUNT(*) FROM categories WHERE name = ?",
                vec![Value::Text(name.to_string())],
            )
            .await?;
        Ok(count > 0)
    }

    async fn exists_by_name_excluding_id(
        &self,
        name: &str,
        exclude_id: i64,
    ) -> Result<bool, DomainError> {
        let count = self
            .query_count(
                "SELECT COUNT(*) FROM categories WHERE name = ? AND id != ?",
                vec![Value::Text(name.to_string()), Value::Integer(exclude_id)],
            )
            .await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::AMOUNT_MAX;
    use chrono::{Duration, TimeZone};

    async fn temp_repo() -> SqliteRepo {
        let dir = std::env::temp_dir().join(format!("equilibrio-test-{}", uuid::Uuid::new_v4()));
        SqliteRepo::connect(&dir).await.unwrap()
    }

    fn tx(uid: &str, amount: f64, kind: TransactionType, day: u32, description: Option<&str>) -> Transaction {
        Transaction::create(TransactionProps {
            id: None,
            uid: uid.into(),
            amount,
            kind,
            currency: Currency::Cop,
            category_id: if kind == TransactionType::Income { "salary".into() } else { "food".into() },
            date: Utc.with_ymd_and_hms(2025, 1, day, 10, 0, 0).unwrap(),
            description: description.map(Into::into),
            created_at: None,
            updated_at: None,
        })
        .unwrap()
    }

    fn category(uid: &str, name: &str, active: bool, color: Option<&str>) -> Category {
        Category::create(CategoryProps {
            id: None,
            uid: uid.into(),
            name: name.into(),
            description: Some("desc".into()),
            color: color.map(Into::into),
            icon: None,
            is_active: active,
            created_at: None,
            updated_at: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn text_filters_fold_non_ascii_case() {
        let repo = temp_repo().await;
        TransactionRepository::save(
            &repo,
            tx("cafe", 12_000.0, TransactionType::Expense, 5, Some("Almuerzo en CAFÉ")),
        )
        .await
        .unwrap();
        CategoryRepository::save(&repo, category("c-1", "Añoranzas", true, None))
            .await
            .unwrap();

        let by_text = TransactionFilters {
            description: Some("café".into()),
            ..Default::default()
        };
        assert_eq!(repo.count_by_filters(&by_text).await.unwrap(), 1);

        let by_name = CategoryFilters {
            name: Some("AÑOR".into()),
            ..Default::default()
        };
        assert_eq!(CategoryRepository::find_by_filters(&repo, &by_name).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn saved_entity_equals_what_is_read_back() {
        let repo = temp_repo().await;
        let now = Utc::now();
        let original = Transaction::create(TransactionProps {
            id: None,
            uid: "now".into(),
            amount: 99.99,
            kind: TransactionType::Expense,
            currency: Currency::Cop,
            category_id: "food".into(),
            date: now,
            description: None,
            created_at: None,
            updated_at: None,
        })
        .unwrap();
        let saved = TransactionRepository::save(&repo, original).await.unwrap();
        let loaded = TransactionRepository::find_by_id(&repo, "now")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.date(), saved.date());
        assert_eq!(loaded.created_at(), saved.created_at());
        assert_eq!(loaded.updated_at(), saved.updated_at());
        assert!(loaded.equals(&saved));

        let cat = CategoryRepository::save(&repo, category("c-now", "Today", true, None))
            .await
            .unwrap();
        let cat_loaded = CategoryRepository::find_by_id(&repo, cat.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cat_loaded.created_at(), cat.created_at());
    }

    #[tokio::test]
    async fn amounts_outside_decimal_10_2_are_rejected() {
        let repo = temp_repo().await;
        for (uid, amount) in [("big", 1e15), ("frac", 0.001), ("edge", AMOUNT_MAX + 0.01)] {
            let restored = tx(uid, 1.0, TransactionType::Expense, 1, None).to_primitives();
            let bad = Transaction::restore(TransactionProps {
                amount,
                ..restored
            });
            let err = TransactionRepository::save(&repo, bad).await.unwrap_err();
            assert!(err.is_validation(), "{amount}: {err:?}");
        }
        assert!(TransactionRepository::find_all(&repo).await.unwrap().is_empty());

        for (uid, amount) in [("max", AMOUNT_MAX), ("cents", 0.29), ("plain", 1234.56)] {
            let saved = TransactionRepository::save(&repo, tx(uid, amount, TransactionType::Income, 2, None))
                .await
                .unwrap();
            assert_eq!(saved.amount(), amount);
        }
    }

    #[tokio::test]
    async fn transaction_round_trips_through_storage() {
        let repo = temp_repo().await;
        let original = tx("u-1", 50_000.0, TransactionType::Income, 15, Some("pay"));
        let saved = TransactionRepository::save(&repo, original.clone()).await.unwrap();
        assert!(saved.id() > 0);

        let loaded = TransactionRepository::find_by_id(&repo, "u-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, original);
        assert_eq!(loaded.id(), saved.id());
        assert_eq!(loaded.amount(), 50_000.0);
        // stored with millisecond precision
        assert_eq!(
            loaded.created_at().timestamp_millis(),
            saved.created_at().timestamp_millis()
        );
    }

    #[tokio::test]
    async fn duplicate_transaction_uid_is_a_conflict() {
        let repo = temp_repo().await;
        TransactionRepository::save(&repo, tx("dup", 1.0, TransactionType::Income, 1, None))
            .await
            .unwrap();
        let err = TransactionRepository::save(&repo, tx("dup", 2.0, TransactionType::Income, 2, None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)), "{err:?}");
    }

    #[tokio::test]
    async fn filters_counts_and_totals() {
        let repo = temp_repo().await;
        for t in [
            tx("i1", 1000.0, TransactionType::Income, 1, None),
            tx("e1", 120.5, TransactionType::Expense, 2, Some("Groceries 50% off")),
            tx("e2", 80.0, TransactionType::Expense, 3, Some("Cafe")),
            tx("e3", 40.0, TransactionType::Expense, 4, None),
        ] {
            TransactionRepository::save(&repo, t).await.unwrap();
        }

        let all = TransactionRepository::find_all(&repo).await.unwrap();
        let uids: Vec<&str> = all.iter().map(Transaction::uid).collect();
        assert_eq!(uids, ["e3", "e2", "e1", "i1"]);

        let expenses = TransactionFilters {
            kind: Some(TransactionType::Expense),
            ..Default::default()
        };
        assert_eq!(repo.count_by_filters(&expenses).await.unwrap(), 3);
        let page = TransactionRepository::find_by_filters(&repo, &expenses, Some(2), Some(1))
            .await
            .unwrap();
        let uids: Vec<&str> = page.iter().map(Transaction::uid).collect();
        assert_eq!(uids, ["e2", "e1"]);

        let offset_only = TransactionRepository::find_by_filters(&repo, &expenses, None, Some(2))
            .await
            .unwrap();
        assert_eq!(offset_only.len(), 1);

        let by_text = TransactionFilters {
            description: Some("50%".into()),
            ..Default::default()
        };
        assert_eq!(repo.count_by_filters(&by_text).await.unwrap(), 1);
        let by_text = TransactionFilters {
            description: Some("CAFE".into()),
            ..Default::default()
        };
        assert_eq!(repo.count_by_filters(&by_text).await.unwrap(), 1);

        let by_amount = TransactionFilters {
            amount_min: Some(80.0),
            amount_max: Some(120.5),
            ..Default::default()
        };
        assert_eq!(repo.count_by_filters(&by_amount).await.unwrap(), 2);

        assert_eq!(
            repo.get_total_amount_by_type(TransactionType::Expense)
                .await
                .unwrap(),
            240.5
        );
        assert_eq!(repo.count_by_category("food").await.unwrap(), 3);
        assert_eq!(repo.find_by_category("salary").await.unwrap().len(), 1);

        let from = Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap();
        let range = repo
            .find_by_date_range(from, from + Duration::days(1))
            .await
            .unwrap();
        assert_eq!(range.len(), 2);

        let page = repo.find_all_paginated(2, 0).await.unwrap();
        assert_eq!(page.len(), 2);

        TransactionRepository::delete(&repo, "e3").await.unwrap();
        assert_eq!(TransactionRepository::find_all(&repo).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn total_of_missing_type_is_zero() {
        let repo = temp_repo().await;
        assert_eq!(
            repo.get_total_amount_by_type(TransactionType::Income)
                .await
                .unwrap(),
            0.0
        );
    }

    #[tokio::test]
    async fn category_storage_and_lookups() {
        let repo = temp_repo().await;
        let food = CategoryRepository::save(&repo, category("c1", "Food", true, Some("#FF6B6B")))
            .await
            .unwrap();
        CategoryRepository::save(&repo, category("c2", "Archive", false, None))
            .await
            .unwrap();

        let err = CategoryRepository::save(&repo, category("c3", "Food", true, None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)), "{err:?}");

        let loaded = CategoryRepository::find_by_id(&repo, food.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, food);
        assert_eq!(repo.find_by_uid("c2").await.unwrap().unwrap().name(), "Archive");
        assert!(repo.find_by_name("Food").await.unwrap().is_some());
        assert!(repo.exists_by_name("Food").await.unwrap());
        assert!(!repo.exists_by_name_excluding_id("Food", food.id()).await.unwrap());

        assert_eq!(repo.find_active_categories().await.unwrap().len(), 1);
        assert_eq!(repo.find_inactive_categories().await.unwrap()[0].uid(), "c2");

        let filters = CategoryFilters {
            name: Some("foo".into()),
            color: Some("#FF6B6B".into()),
            ..Default::default()
        };
        assert_eq!(
            CategoryRepository::find_by_filters(&repo, &filters)
                .await
                .unwrap()
                .len(),
            1
        );

        CategoryRepository::delete(&repo, food.id()).await.unwrap();
        assert_eq!(CategoryRepository::find_all(&repo).await.unwrap().len(), 1);
    }
}
