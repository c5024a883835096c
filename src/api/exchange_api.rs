// ==========================================
// 桌游数据交换系统 - 数据交换 API
// ==========================================
// 职责: 对外门面，串联导入管道、报表构建、格式化与配置
// 说明: 四个操作均为同步调用，共享一个 SQLite 连接
// ==========================================

use crate::api::error::ApiResult;
use crate::config::{ConfigManager, ExchangeConfigReader};
use crate::db::{configure_sqlite_connection, init_schema, open_sqlite_connection};
use crate::domain::import::{ImportBatch, ImportReport};
use crate::export::{CreatorsXmlFormatter, ReportBuilder, ReportFormatter, SellersJsonFormatter};
use crate::importer::ImportPipeline;
use crate::repository::error::RepositoryError;
use crate::repository::{CatalogRepository, ImportBatchRepository};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::{info, instrument};

// ==========================================
// BoardgameExchangeApi - 数据交换门面
// ==========================================
pub struct BoardgameExchangeApi {
    pipeline: ImportPipeline<CatalogRepository>,
    reports: ReportBuilder<CatalogRepository>,
    config: ConfigManager,
    batches: ImportBatchRepository,
}

impl BoardgameExchangeApi {
    /// 打开（必要时创建）数据库并初始化表结构
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ApiResult<Self> {
        let conn = open_sqlite_connection(db_path).map_err(RepositoryError::from)?;
        info!(db_path = db_path, "数据交换 API 已打开数据库");
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建（幂等地应用 PRAGMA 与表结构）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ApiResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard).map_err(RepositoryError::from)?;
            init_schema(&guard).map_err(RepositoryError::from)?;
        }

        Ok(Self {
            pipeline: ImportPipeline::new(CatalogRepository::from_connection(conn.clone())),
            reports: ReportBuilder::new(CatalogRepository::from_connection(conn.clone())),
            config: ConfigManager::from_connection(conn.clone())?,
            batches: ImportBatchRepository::from_connection(conn),
        })
    }

    // ==========================================
    // 导入
    // ==========================================

    /// 导入创作者批次，返回报告文本
    pub fn import_creators(&self, xml: &str) -> ApiResult<String> {
        Ok(self.import_creators_report(xml)?.to_text())
    }

    /// 导入卖家批次，返回报告文本
    pub fn import_sellers(&self, json: &str) -> ApiResult<String> {
        Ok(self.import_sellers_report(json)?.to_text())
    }

    /// 导入创作者批次，返回结构化报告（含批次台账）
    pub fn import_creators_report(&self, xml: &str) -> ApiResult<ImportReport> {
        Ok(self.pipeline.import_creators(xml)?)
    }

    /// 导入卖家批次，返回结构化报告（含批次台账）
    pub fn import_sellers_report(&self, json: &str) -> ApiResult<ImportReport> {
        Ok(self.pipeline.import_sellers(json)?)
    }

    // ==========================================
    // 导出
    // ==========================================

    /// 导出拥有桌游的创作者（XML，根元素 Creators）
    #[instrument(skip(self))]
    pub fn export_creators_with_boardgames(&self) -> ApiResult<String> {
        let reports = self.reports.creators_with_boardgames()?;
        let indent_width = self.config.get_indent_width()?;

        let xml = CreatorsXmlFormatter::new(indent_width).format(&reports)?;
        info!(creators = reports.len(), "创作者报表导出完成");
        Ok(xml)
    }

    /// 导出桌游最多的卖家（JSON）
    ///
    /// # 参数
    /// - min_year: 出版年份下限（含）
    /// - max_rating: 评分上限（含）
    #[instrument(skip(self))]
    pub fn export_top_sellers(&self, min_year: i32, max_rating: f64) -> ApiResult<String> {
        let limit = self.config.get_top_sellers_limit()?;
        let indent_width = self.config.get_indent_width()?;

        let reports = self.reports.top_sellers(min_year, max_rating, limit)?;
        let json = SellersJsonFormatter::new(indent_width).format(&reports)?;
        info!(sellers = reports.len(), limit, "卖家报表导出完成");
        Ok(json)
    }

    // ==========================================
    // 台账与配置
    // ==========================================

    /// 最近的导入批次（按导入时间倒序）
    pub fn recent_import_batches(&self, limit: usize) -> ApiResult<Vec<ImportBatch>> {
        Ok(self.batches.list_recent(limit)?)
    }

    /// 配置管理器
    pub fn config(&self) -> &ConfigManager {
        &self.config
    }
}
