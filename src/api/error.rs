// ==========================================
// 桌游数据交换系统 - API层错误类型
// ==========================================
// 职责: 统一导入/导出/仓储错误，供门面对外返回
// ==========================================

use crate::export::error::ExportError;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("批次解析失败: {0}")]
    DecodeError(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 输出错误
    // ==========================================
    #[error("报表编码失败: {0}")]
    EncodeError(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    #[error("约束违反: {0}")]
    ConstraintViolation(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::ConstraintViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::ConstraintViolation(format!("外键约束违反: {}", msg))
            }
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::XmlDecode(msg) => ApiError::DecodeError(format!("XML: {}", msg)),
            ImportError::JsonDecode(msg) => ApiError::DecodeError(format!("JSON: {}", msg)),
            ImportError::UnexpectedRoot { expected, actual } => ApiError::DecodeError(format!(
                "根元素应为 <{}>，实际为 <{}>",
                expected, actual
            )),
            ImportError::Repository(err) => err.into(),
            ImportError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 ExportError 转换
// ==========================================
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::XmlEncode(msg) => ApiError::EncodeError(format!("XML: {}", msg)),
            ExportError::JsonEncode(msg) => ApiError::EncodeError(format!("JSON: {}", msg)),
            ExportError::Repository(err) => err.into(),
            ExportError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_errors_are_classified() {
        let err: ApiError = ImportError::JsonDecode("EOF".to_string()).into();
        assert!(matches!(err, ApiError::DecodeError(msg) if msg.contains("EOF")));

        let err: ApiError = ImportError::UnexpectedRoot {
            expected: "Creators".to_string(),
            actual: "Sellers".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::DecodeError(_)));
    }

    #[test]
    fn test_repository_errors_pass_through_layers() {
        let err: ApiError =
            ImportError::Repository(RepositoryError::LockError("poisoned".to_string())).into();
        assert!(matches!(err, ApiError::DatabaseConnectionError(_)));

        let err: ApiError = ExportError::Repository(RepositoryError::FieldValueError {
            field: "category_type".to_string(),
            message: "9".to_string(),
        })
        .into();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}
