// ==========================================
// 桌游数据交换系统 - 目录领域模型
// ==========================================
// 实体: Creator / Boardgame / Seller / BoardgameSeller
// 关系: 显式外键 id，不做隐式导航
// ==========================================

use crate::domain::types::CategoryType;
use serde::{Deserialize, Serialize};

// ==========================================
// Creator - 创作者（已落库）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl Creator {
    /// 展示名称: firstName + " " + lastName
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ==========================================
// Boardgame - 桌游（已落库）
// ==========================================
// 红线: 每个桌游有且仅有一个所属创作者
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boardgame {
    pub id: i64,
    pub name: String,
    pub rating: f64,
    pub year_published: i32,
    pub category_type: CategoryType,
    pub mechanics: String,
    pub creator_id: i64, // 所属创作者
}

// ==========================================
// Seller - 卖家（已落库）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub country: String,
    pub website: String,
}

// ==========================================
// BoardgameSeller - 卖家 ↔ 桌游 关联
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardgameSeller {
    pub boardgame_id: i64,
    pub seller_id: i64,
}

// ==========================================
// 待写入实体（导入期间仅存在于内存）
// ==========================================

/// 待写入的创作者（含其拥有的桌游，顺序即导入顺序）
#[derive(Debug, Clone, PartialEq)]
pub struct NewCreator {
    pub first_name: String,
    pub last_name: String,
    pub boardgames: Vec<NewBoardgame>,
}

/// 待写入的桌游（creator_id 在提交时由所属创作者回填）
#[derive(Debug, Clone, PartialEq)]
pub struct NewBoardgame {
    pub name: String,
    pub rating: f64,
    pub year_published: i32,
    pub category_type: CategoryType,
    pub mechanics: String,
}

/// 待写入的卖家（boardgame_ids 已去重且均已解析成功）
#[derive(Debug, Clone, PartialEq)]
pub struct NewSeller {
    pub name: String,
    pub address: String,
    pub country: String,
    pub website: String,
    pub boardgame_ids: Vec<i64>,
}
