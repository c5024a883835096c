// ==========================================
// 桌游数据交换系统 - 导入模块错误类型
// ==========================================
// 说明: 单条记录的校验/引用失败不是错误（记为 Invalid data! 行），
//       这里只有会中止整批导入的致命错误
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 解码错误（整批失败） =====
    #[error("XML 解析失败: {0}")]
    XmlDecode(String),

    #[error("JSON 解析失败: {0}")]
    JsonDecode(String),

    #[error("根元素不匹配: 期望 <{expected}>，实际 <{actual}>")]
    UnexpectedRoot { expected: String, actual: String },

    // ===== 数据库错误（提交失败，无部分落库） =====
    #[error("仓储操作失败: {0}")]
    Repository(#[from] RepositoryError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<quick_xml::de::DeError>
impl From<quick_xml::de::DeError> for ImportError {
    fn from(err: quick_xml::de::DeError) -> Self {
        ImportError::XmlDecode(err.to_string())
    }
}

// 实现 From<quick_xml::Error>
impl From<quick_xml::Error> for ImportError {
    fn from(err: quick_xml::Error) -> Self {
        ImportError::XmlDecode(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonDecode(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
