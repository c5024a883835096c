// ==========================================
// 桌游数据交换系统 - 导入层
// ==========================================
// 职责: 外部批次数据导入，生成目录实体与导入报告
// 支持: 创作者 XML, 卖家 JSON
// 流程: 解码 → 校验 → 关联 → 一次性提交
// ==========================================

// 模块声明
pub mod batch_decoder;
pub mod error;
pub mod field_validator;
pub mod import_pipeline;
pub mod record_linker;

// 重导出核心类型
pub use batch_decoder::{BatchDecoder, JsonSellerDecoder, XmlCreatorDecoder};
pub use error::{ImportError, ImportResult};
pub use field_validator::{ConstrainedRecord, FieldValidator, FieldViolation, ViolationKind};
pub use import_pipeline::ImportPipeline;
pub use record_linker::RecordLinker;
