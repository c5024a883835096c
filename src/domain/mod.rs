// ==========================================
// 桌游数据交换系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、原始记录、报表形态
// 红线: 不含数据访问逻辑，不含导入/导出流程
// ==========================================

pub mod catalog;
pub mod import;
pub mod report;
pub mod types;

// 重导出核心类型
pub use catalog::{Boardgame, BoardgameSeller, Creator, NewBoardgame, NewCreator, NewSeller, Seller};
pub use import::{
    ImportBatch, ImportReport, RawBoardgameRecord, RawCreatorRecord, RawSellerRecord,
    INVALID_DATA_LINE,
};
pub use report::{CreatorBoardgameReport, CreatorReport, SellerBoardgameReport, SellerReport};
pub use types::{CategoryType, ImportBatchKind, InvalidCategoryCode};
