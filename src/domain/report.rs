// ==========================================
// 桌游数据交换系统 - 报表形态
// ==========================================
// 用途: 仅用于导出的内存投影，与落库实体分离
// 约束: 顺序由 ReportBuilder 决定，Formatter 不再排序/过滤
// ==========================================

use crate::domain::types::CategoryType;
use serde::Serialize;

/// 创作者报表行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatorReport {
    pub creator_name: String,
    pub boardgames_count: usize,
    pub boardgames: Vec<CreatorBoardgameReport>, // 按名称升序
}

/// 创作者报表中的桌游（名称 + 年份）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatorBoardgameReport {
    pub name: String,
    pub year_published: i32,
}

/// 卖家报表行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerReport {
    pub name: String,
    pub website: String,
    pub boardgames: Vec<SellerBoardgameReport>, // 评分降序，名称升序
}

/// 卖家报表中的桌游
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerBoardgameReport {
    pub name: String,
    pub rating: f64,
    pub mechanics: String,
    pub category: CategoryType,
}
