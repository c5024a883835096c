// ==========================================
// 桌游数据交换系统 - 目录仓储实现
// ==========================================
// 职责: 实现 CatalogStore（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::catalog::{Boardgame, BoardgameSeller, Creator, NewCreator, NewSeller, Seller};
use crate::domain::types::CategoryType;
use crate::repository::catalog_store::{CatalogStore, CatalogWriteSet, CommitSummary};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::import_batch_repo::ImportBatchRepository;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};

// 桌游原始行（category_type 尚未转换）
struct BoardgameRow {
    id: i64,
    name: String,
    rating: f64,
    year_published: i32,
    category_code: i32,
    mechanics: String,
    creator_id: i64,
}

impl BoardgameRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            rating: row.get(2)?,
            year_published: row.get(3)?,
            category_code: row.get(4)?,
            mechanics: row.get(5)?,
            creator_id: row.get(6)?,
        })
    }

    fn into_boardgame(self) -> RepositoryResult<Boardgame> {
        let category_type = CategoryType::try_from(self.category_code).map_err(|e| {
            RepositoryError::FieldValueError {
                field: "category_type".to_string(),
                message: format!("boardgame id={}: {}", self.id, e),
            }
        })?;

        Ok(Boardgame {
            id: self.id,
            name: self.name,
            rating: self.rating,
            year_published: self.year_published,
            category_type,
            mechanics: self.mechanics,
            creator_id: self.creator_id,
        })
    }
}

const BOARDGAME_COLUMNS: &str =
    "id, name, rating, year_published, category_type, mechanics, creator_id";

// ==========================================
// CatalogRepository - 目录仓储
// ==========================================
pub struct CatalogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CatalogRepository {
    /// 创建新的 CatalogRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
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

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 在事务中写入创作者及其桌游
    fn insert_creators_tx(
        tx: &Connection,
        creators: &[NewCreator],
        summary: &mut CommitSummary,
    ) -> RepositoryResult<()> {
        let mut creator_stmt =
            tx.prepare("INSERT INTO creators (first_name, last_name) VALUES (?1, ?2)")?;
        let mut boardgame_stmt = tx.prepare(
            r#"
            INSERT INTO boardgames (
                name, rating, year_published, category_type, mechanics, creator_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )?;

        for creator in creators {
            creator_stmt.execute(params![creator.first_name, creator.last_name])?;
            let creator_id = tx.last_insert_rowid();
            summary.creators += 1;

            for boardgame in &creator.boardgames {
                boardgame_stmt.execute(params![
                    boardgame.name,
                    boardgame.rating,
                    boardgame.year_published,
                    boardgame.category_type.code(),
                    boardgame.mechanics,
                    creator_id,
                ])?;
                summary.boardgames += 1;
            }
        }

        Ok(())
    }

    /// 在事务中写入卖家及其关联
    fn insert_sellers_tx(
        tx: &Connection,
        sellers: &[NewSeller],
        summary: &mut CommitSummary,
    ) -> RepositoryResult<()> {
        let mut seller_stmt = tx.prepare(
            "INSERT INTO sellers (name, address, country, website) VALUES (?1, ?2, ?3, ?4)",
        )?;
        let mut link_stmt = tx.prepare(
            "INSERT INTO boardgames_sellers (boardgame_id, seller_id) VALUES (?1, ?2)",
        )?;

        for seller in sellers {
            seller_stmt.execute(params![
                seller.name,
                seller.address,
                seller.country,
                seller.website,
            ])?;
            let seller_id = tx.last_insert_rowid();
            summary.sellers += 1;

            for boardgame_id in &seller.boardgame_ids {
                link_stmt.execute(params![boardgame_id, seller_id])?;
                summary.associations += 1;
            }
        }

        Ok(())
    }
}

impl CatalogStore for CatalogRepository {
    fn find_boardgame_by_id(&self, id: i64) -> RepositoryResult<Option<Boardgame>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM boardgames WHERE id = ?1", BOARDGAME_COLUMNS);

        let row = conn
            .query_row(&sql, params![id], BoardgameRow::from_row)
            .optional()?;

        row.map(BoardgameRow::into_boardgame).transpose()
    }

    #[instrument(skip(self, write_set), fields(
        creators = write_set.creators.len(),
        sellers = write_set.sellers.len()
    ))]
    fn save_changes(&self, write_set: &CatalogWriteSet) -> RepositoryResult<CommitSummary> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut summary = CommitSummary::default();
        Self::insert_creators_tx(&tx, &write_set.creators, &mut summary)?;
        Self::insert_sellers_tx(&tx, &write_set.sellers, &mut summary)?;

        if let Some(batch) = &write_set.batch {
            ImportBatchRepository::insert_tx(&tx, batch)?;
            debug!(batch_id = %batch.batch_id, "批次台账已写入事务");
        }

        // 未提交的事务在 drop 时自动回滚
        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        info!(
            creators = summary.creators,
            boardgames = summary.boardgames,
            sellers = summary.sellers,
            associations = summary.associations,
            "写入集提交完成"
        );
        Ok(summary)
    }

    fn query_creators(&self) -> RepositoryResult<Vec<Creator>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, first_name, last_name FROM creators ORDER BY id")?;

        let creators = stmt
            .query_map([], |row| {
                Ok(Creator {
                    id: row.get(0)?,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(creators)
    }

    fn query_boardgames(&self) -> RepositoryResult<Vec<Boardgame>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM boardgames ORDER BY id", BOARDGAME_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt
            .query_map([], BoardgameRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(BoardgameRow::into_boardgame).collect()
    }

    fn query_sellers(&self) -> RepositoryResult<Vec<Seller>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, address, country, website FROM sellers ORDER BY id")?;

        let sellers = stmt
            .query_map([], |row| {
                Ok(Seller {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    address: row.get(2)?,
                    country: row.get(3)?,
                    website: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sellers)
    }

    fn query_boardgame_sellers(&self) -> RepositoryResult<Vec<BoardgameSeller>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT boardgame_id, seller_id FROM boardgames_sellers ORDER BY seller_id, boardgame_id",
        )?;

        let links = stmt
            .query_map([], |row| {
                Ok(BoardgameSeller {
                    boardgame_id: row.get(0)?,
                    seller_id: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(links)
    }
}
