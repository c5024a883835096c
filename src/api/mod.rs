// ==========================================
// 桌游数据交换系统 - API 层
// ==========================================
// 职责: 提供导入/导出门面接口
// ==========================================

pub mod error;
pub mod exchange_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use exchange_api::BoardgameExchangeApi;
