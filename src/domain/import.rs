// ==========================================
// 桌游数据交换系统 - 导入领域模型
// ==========================================
// 职责: 解码后的原始记录、导入批次台账、导入报告
// 说明: 原始记录字段全部可空，是否合法由 FieldValidator 判定
// ==========================================

use crate::domain::types::ImportBatchKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 失败行（所有校验失败/引用失败共用）
pub const INVALID_DATA_LINE: &str = "Invalid data!";

// ==========================================
// 原始记录（解码后、校验前）
// ==========================================

/// 原始创作者记录（XML 中的 <Creator>）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCreatorRecord {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub boardgames: Vec<RawBoardgameRecord>,
}

/// 原始桌游记录（<Creator> 下嵌套的 <Boardgame>）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBoardgameRecord {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub year_published: Option<i32>,
    pub category_type: Option<i32>, // 原始整数编码，校验通过后才转换为 CategoryType
    pub mechanics: Option<String>,
}

/// 原始卖家记录（JSON 数组元素）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSellerRecord {
    pub name: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub boardgame_ids: Vec<i64>, // 原样保留（可能含重复）
}

// ==========================================
// ImportBatch - 导入批次台账
// ==========================================
// 与本次导入的接受集在同一事务内写入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportBatch {
    pub batch_id: String,
    pub batch_kind: ImportBatchKind,
    pub total_entries: usize,     // 解码出的顶层记录数
    pub accepted_entries: usize,  // 接受的顶层记录数（创作者/卖家）
    pub accepted_children: usize, // 接受的子记录数（桌游/关联）
    pub invalid_lines: usize,     // 报告中 Invalid data! 行数
    pub imported_at: DateTime<Utc>,
    pub elapsed_ms: i64,
}

// ==========================================
// ImportReport - 单次导入的结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub batch: ImportBatch,
    pub lines: Vec<String>, // 按输入顺序排列的报告行
}

impl ImportReport {
    /// 报告文本（换行拼接，去除末尾空白）
    pub fn to_text(&self) -> String {
        self.lines.join("\n").trim_end().to_string()
    }

    /// 失败行数量
    pub fn invalid_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| line.as_str() == INVALID_DATA_LINE)
            .count()
    }
}

impl std::fmt::Display for ImportReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
