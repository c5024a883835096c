// ==========================================
// 桌游数据交换系统 - 目录存储 Trait
// ==========================================
// 职责: 定义导入/导出所依赖的存储接口（不包含实现）
// 红线: 接口只做数据存取，不含校验与排序规则
// ==========================================

use crate::domain::catalog::{Boardgame, BoardgameSeller, Creator, NewCreator, NewSeller, Seller};
use crate::domain::import::ImportBatch;
use crate::repository::error::RepositoryResult;

// ==========================================
// CatalogWriteSet - 单次导入的写入集
// ==========================================
// 用途: 导入过程中累积被接受的实体，最后一次性提交
// 说明: 被拒绝的记录根本不会进入写入集
#[derive(Debug, Clone, Default)]
pub struct CatalogWriteSet {
    pub creators: Vec<NewCreator>,
    pub sellers: Vec<NewSeller>,
    pub batch: Option<ImportBatch>, // 批次台账（与实体同事务写入）
}

impl CatalogWriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一组创作者（含嵌套桌游）
    pub fn add_creators<I>(&mut self, creators: I)
    where
        I: IntoIterator<Item = NewCreator>,
    {
        self.creators.extend(creators);
    }

    /// 追加一组卖家（含桌游关联）
    pub fn add_sellers<I>(&mut self, sellers: I)
    where
        I: IntoIterator<Item = NewSeller>,
    {
        self.sellers.extend(sellers);
    }

    /// 附加批次台账
    pub fn with_batch(mut self, batch: ImportBatch) -> Self {
        self.batch = Some(batch);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.creators.is_empty() && self.sellers.is_empty()
    }
}

// ==========================================
// CommitSummary - 提交结果统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitSummary {
    pub creators: usize,
    pub boardgames: usize,
    pub sellers: usize,
    pub associations: usize,
}

// ==========================================
// CatalogStore Trait
// ==========================================
// 用途: 导入管道、报表构建器共用的存储接口
// 实现者: CatalogRepository（SQLite）
pub trait CatalogStore {
    /// 按 id 查询桌游
    ///
    /// # 返回
    /// - Ok(Some(Boardgame)): 找到记录
    /// - Ok(None): 未找到记录
    /// - Err: 数据库错误
    fn find_boardgame_by_id(&self, id: i64) -> RepositoryResult<Option<Boardgame>>;

    /// 原子提交写入集
    ///
    /// # 说明
    /// - 全部写入或全部不写入
    /// - 写入失败时不会留下部分数据
    fn save_changes(&self, write_set: &CatalogWriteSet) -> RepositoryResult<CommitSummary>;

    /// 查询全部创作者（按 id 升序）
    fn query_creators(&self) -> RepositoryResult<Vec<Creator>>;

    /// 查询全部桌游（按 id 升序）
    fn query_boardgames(&self) -> RepositoryResult<Vec<Boardgame>>;

    /// 查询全部卖家（按 id 升序）
    fn query_sellers(&self) -> RepositoryResult<Vec<Seller>>;

    /// 查询全部卖家-桌游关联
    fn query_boardgame_sellers(&self) -> RepositoryResult<Vec<BoardgameSeller>>;
}
