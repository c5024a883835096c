// ==========================================
// 桌游数据交换系统 - 核心库
// ==========================================
// 职责: 创作者/桌游/卖家批次导入（XML/JSON）与报表导出
// 技术栈: Rust + SQLite
// 流程: 解码 → 校验 → 关联 → 原子提交 → 报表
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 外部批次数据
pub mod importer;

// 导出层 - 报表构建与格式化
pub mod export;

// 配置层 - 导出参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/表结构）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 对外门面
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CategoryType, ImportBatchKind};

// 领域实体
pub use domain::{
    Boardgame, BoardgameSeller, Creator, CreatorReport, ImportBatch, ImportReport, Seller,
    SellerReport,
};

// 仓储
pub use repository::{CatalogRepository, CatalogStore, CatalogWriteSet, ImportBatchRepository};

// 导入 / 导出
pub use export::{CreatorsXmlFormatter, ReportBuilder, ReportFormatter, SellersJsonFormatter};
pub use importer::{FieldValidator, ImportPipeline, RecordLinker};

// API
pub use api::{ApiError, ApiResult, BoardgameExchangeApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Boardgames Exchange";
