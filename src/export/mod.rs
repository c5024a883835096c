// ==========================================
// 桌游数据交换系统 - 导出层
// ==========================================
// 职责: 只读报表查询与格式化
// 支持: 创作者 XML, 卖家 JSON
// ==========================================

pub mod error;
pub mod formatter;
pub mod report_builder;

// 重导出核心类型
pub use error::{ExportError, ExportResult};
pub use formatter::{CreatorsXmlFormatter, ReportFormatter, SellersJsonFormatter};
pub use report_builder::ReportBuilder;
