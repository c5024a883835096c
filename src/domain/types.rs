// ==========================================
// 桌游数据交换系统 - 领域类型定义
// ==========================================
// 职责: 封闭枚举与编码转换
// 红线: 编码转换必须是全函数，非法编码返回错误而不是 panic
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 桌游类别 (Category Type)
// ==========================================
// 编码: 0..=4，存储层以整数落库，导出层以名称输出
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoryType {
    Abstract, // 0
    Bluffing, // 1
    Dungeon,  // 2
    Economic, // 3
    Strategy, // 4
}

impl CategoryType {
    /// 最小合法编码
    pub const MIN_CODE: i32 = 0;
    /// 最大合法编码
    pub const MAX_CODE: i32 = 4;

    /// 获取整数编码（落库使用）
    pub fn code(&self) -> i32 {
        match self {
            CategoryType::Abstract => 0,
            CategoryType::Bluffing => 1,
            CategoryType::Dungeon => 2,
            CategoryType::Economic => 3,
            CategoryType::Strategy => 4,
        }
    }

    /// 获取类别名称（导出使用）
    pub fn name(&self) -> &'static str {
        match self {
            CategoryType::Abstract => "Abstract",
            CategoryType::Bluffing => "Bluffing",
            CategoryType::Dungeon => "Dungeon",
            CategoryType::Economic => "Economic",
            CategoryType::Strategy => "Strategy",
        }
    }
}

/// 非法类别编码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCategoryCode(pub i32);

impl fmt::Display for InvalidCategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "类别编码 {} 超出范围 [{}, {}]",
            self.0,
            CategoryType::MIN_CODE,
            CategoryType::MAX_CODE
        )
    }
}

impl std::error::Error for InvalidCategoryCode {}

impl TryFrom<i32> for CategoryType {
    type Error = InvalidCategoryCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(CategoryType::Abstract),
            1 => Ok(CategoryType::Bluffing),
            2 => Ok(CategoryType::Dungeon),
            3 => Ok(CategoryType::Economic),
            4 => Ok(CategoryType::Strategy),
            other => Err(InvalidCategoryCode(other)),
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ==========================================
// 导入批次类型 (Import Batch Kind)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportBatchKind {
    Creators, // 创作者 + 嵌套桌游（XML）
    Sellers,  // 卖家 + 桌游引用（JSON）
}

impl ImportBatchKind {
    /// 从数据库字符串解析
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "CREATORS" => Some(ImportBatchKind::Creators),
            "SELLERS" => Some(ImportBatchKind::Sellers),
            _ => None,
        }
    }
}

impl fmt::Display for ImportBatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportBatchKind::Creators => write!(f, "CREATORS"),
            ImportBatchKind::Sellers => write!(f, "SELLERS"),
        }
    }
}
