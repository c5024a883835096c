// ==========================================
// 桌游数据交换系统 - 报表构建器
// ==========================================
// 职责: 只读查询 + 显式关联，生成导出用的内存报表
// 排序: 字符串按字节序比较，浮点使用 total_cmp
// 红线: 不写库，不做格式化
// ==========================================

use crate::domain::catalog::Boardgame;
use crate::domain::report::{
    CreatorBoardgameReport, CreatorReport, SellerBoardgameReport, SellerReport,
};
use crate::export::error::ExportResult;
use crate::repository::catalog_store::CatalogStore;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// ReportBuilder - 报表构建器
// ==========================================
pub struct ReportBuilder<R>
where
    R: CatalogStore,
{
    store: R,
}

impl<R> ReportBuilder<R>
where
    R: CatalogStore,
{
    pub fn new(store: R) -> Self {
        Self { store }
    }

    /// 拥有桌游的创作者报表
    ///
    /// # 排序
    /// - 顶层: 桌游数降序，同数按显示名升序
    /// - 嵌套: 桌游名升序
    #[instrument(skip(self))]
    pub fn creators_with_boardgames(&self) -> ExportResult<Vec<CreatorReport>> {
        let creators = self.store.query_creators()?;
        let boardgames = self.store.query_boardgames()?;

        let mut owned: HashMap<i64, Vec<&Boardgame>> = HashMap::new();
        for boardgame in &boardgames {
            owned.entry(boardgame.creator_id).or_default().push(boardgame);
        }

        let mut reports: Vec<CreatorReport> = creators
            .iter()
            .filter_map(|creator| {
                let mut games = owned.remove(&creator.id)?;
                games.sort_by(|a, b| a.name.cmp(&b.name));

                Some(CreatorReport {
                    creator_name: creator.display_name(),
                    boardgames_count: games.len(),
                    boardgames: games
                        .into_iter()
                        .map(|game| CreatorBoardgameReport {
                            name: game.name.clone(),
                            year_published: game.year_published,
                        })
                        .collect(),
                })
            })
            .collect();

        reports.sort_by(|a, b| {
            b.boardgames_count
                .cmp(&a.boardgames_count)
                .then_with(|| a.creator_name.cmp(&b.creator_name))
        });

        debug!(creators = reports.len(), "创作者报表构建完成");
        Ok(reports)
    }

    /// 按筛选后桌游数排名的卖家报表
    ///
    /// # 参数
    /// - min_year: 出版年份下限（含）
    /// - max_rating: 评分上限（含）
    /// - limit: 返回的卖家数上限
    ///
    /// # 排序
    /// - 顶层: 匹配桌游数降序，同数按卖家名升序，取前 limit 个
    /// - 嵌套: 评分降序，同分按桌游名升序
    #[instrument(skip(self))]
    pub fn top_sellers(
        &self,
        min_year: i32,
        max_rating: f64,
        limit: usize,
    ) -> ExportResult<Vec<SellerReport>> {
        let sellers = self.store.query_sellers()?;
        let boardgames = self.store.query_boardgames()?;
        let links = self.store.query_boardgame_sellers()?;

        let by_id: HashMap<i64, &Boardgame> = boardgames.iter().map(|b| (b.id, b)).collect();

        let mut matching: HashMap<i64, Vec<&Boardgame>> = HashMap::new();
        for link in &links {
            let Some(boardgame) = by_id.get(&link.boardgame_id) else {
                continue;
            };
            if boardgame.year_published >= min_year && boardgame.rating <= max_rating {
                matching.entry(link.seller_id).or_default().push(boardgame);
            }
        }

        let mut reports: Vec<SellerReport> = sellers
            .iter()
            .filter_map(|seller| {
                let mut games = matching.remove(&seller.id)?;
                games.sort_by(|a, b| by_rating_then_name(a, b));

                Some(SellerReport {
                    name: seller.name.clone(),
                    website: seller.website.clone(),
                    boardgames: games
                        .into_iter()
                        .map(|game| SellerBoardgameReport {
                            name: game.name.clone(),
                            rating: game.rating,
                            mechanics: game.mechanics.clone(),
                            category: game.category_type,
                        })
                        .collect(),
                })
            })
            .collect();

        reports.sort_by(|a, b| {
            b.boardgames
                .len()
                .cmp(&a.boardgames.len())
                .then_with(|| a.name.cmp(&b.name))
        });
        reports.truncate(limit);

        debug!(sellers = reports.len(), "卖家报表构建完成");
        Ok(reports)
    }
}

fn by_rating_then_name(a: &Boardgame, b: &Boardgame) -> Ordering {
    b.rating
        .total_cmp(&a.rating)
        .then_with(|| a.name.cmp(&b.name))
}
