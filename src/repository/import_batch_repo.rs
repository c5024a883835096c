// ==========================================
// 桌游数据交换系统 - 导入批次台账仓储
// ==========================================
// 对齐: import_batch 表
// 说明: 写入只发生在 CatalogRepository::save_changes 的事务内
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::import::ImportBatch;
use crate::domain::types::ImportBatchKind;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// 台账原始行（枚举/时间尚未解析）
struct ImportBatchRow {
    batch_id: String,
    batch_kind: String,
    total_entries: i64,
    accepted_entries: i64,
    accepted_children: i64,
    invalid_lines: i64,
    imported_at: String,
    elapsed_ms: i64,
}

impl ImportBatchRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            batch_id: row.get(0)?,
            batch_kind: row.get(1)?,
            total_entries: row.get(2)?,
            accepted_entries: row.get(3)?,
            accepted_children: row.get(4)?,
            invalid_lines: row.get(5)?,
            imported_at: row.get(6)?,
            elapsed_ms: row.get(7)?,
        })
    }

    fn into_batch(self) -> RepositoryResult<ImportBatch> {
        let batch_kind = ImportBatchKind::parse(&self.batch_kind).ok_or_else(|| {
            RepositoryError::FieldValueError {
                field: "batch_kind".to_string(),
                message: format!("未知批次类型: {}", self.batch_kind),
            }
        })?;

        let imported_at = DateTime::parse_from_rfc3339(&self.imported_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| RepositoryError::FieldValueError {
                field: "imported_at".to_string(),
                message: e.to_string(),
            })?;

        Ok(ImportBatch {
            batch_id: self.batch_id,
            batch_kind,
            total_entries: self.total_entries.max(0) as usize,
            accepted_entries: self.accepted_entries.max(0) as usize,
            accepted_children: self.accepted_children.max(0) as usize,
            invalid_lines: self.invalid_lines.max(0) as usize,
            imported_at,
            elapsed_ms: self.elapsed_ms,
        })
    }
}

const BATCH_COLUMNS: &str = "batch_id, batch_kind, total_entries, accepted_entries, \
     accepted_children, invalid_lines, imported_at, elapsed_ms";

// ==========================================
// ImportBatchRepository - 导入批次台账仓储
// ==========================================
pub struct ImportBatchRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ImportBatchRepository {
    /// 创建新的 ImportBatchRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 在调用方事务中写入批次台账
    pub(crate) fn insert_tx(tx: &Connection, batch: &ImportBatch) -> RepositoryResult<()> {
        tx.execute(
            r#"
            INSERT INTO import_batch (
                batch_id, batch_kind, total_entries, accepted_entries,
                accepted_children, invalid_lines, imported_at, elapsed_ms
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                batch.batch_id,
                batch.batch_kind.to_string(),
                batch.total_entries as i64,
                batch.accepted_entries as i64,
                batch.accepted_children as i64,
                batch.invalid_lines as i64,
                batch.imported_at.to_rfc3339(),
                batch.elapsed_ms,
            ],
        )?;
        Ok(())
    }

    /// 按 batch_id 查询台账
    pub fn find_by_id(&self, batch_id: &str) -> RepositoryResult<Option<ImportBatch>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM import_batch WHERE batch_id = ?1", BATCH_COLUMNS);

        let row = conn
            .query_row(&sql, params![batch_id], ImportBatchRow::from_row)
            .optional()?;

        row.map(ImportBatchRow::into_batch).transpose()
    }

    /// 查询最近的台账（按导入时间倒序）
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<ImportBatch>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM import_batch ORDER BY imported_at DESC, batch_id LIMIT ?1",
            BATCH_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt
            .query_map(params![limit as i64], ImportBatchRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(ImportBatchRow::into_batch).collect()
    }
}
