// ==========================================
// 桌游数据交换系统 - 记录关联器
// ==========================================
// 职责: 由已校验的父记录构造待写入实体
// - 创作者: 逐条校验嵌套桌游，只保留合法桌游并转换类别编码
// - 卖家: 去重桌游 id，逐个在仓储中解析，生成关联
// 前置: 父记录本身已通过 FieldValidator
// ==========================================

use crate::domain::catalog::{NewBoardgame, NewCreator, NewSeller};
use crate::domain::import::{RawBoardgameRecord, RawCreatorRecord, RawSellerRecord};
use crate::domain::types::CategoryType;
use crate::importer::field_validator::{FieldValidator, FieldViolation};
use crate::repository::catalog_store::CatalogStore;
use crate::repository::error::RepositoryResult;
use std::collections::HashSet;
use tracing::{debug, error, warn};

/// 被拒绝的嵌套桌游
#[derive(Debug, Clone, PartialEq)]
pub struct BoardgameRejection {
    pub index: usize, // 在 <Boardgames> 中的位置
    pub violations: Vec<FieldViolation>,
}

/// 创作者关联结果
#[derive(Debug, Clone, PartialEq)]
pub struct CreatorLink {
    pub creator: NewCreator,
    pub rejected: Vec<BoardgameRejection>, // 按嵌套顺序
}

/// 卖家关联结果
#[derive(Debug, Clone, PartialEq)]
pub struct SellerLink {
    pub seller: NewSeller,
    pub unresolved: Vec<i64>, // 按去重后的顺序
}

// ==========================================
// RecordLinker - 记录关联器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RecordLinker {
    validator: FieldValidator,
}

impl RecordLinker {
    pub fn new(validator: FieldValidator) -> Self {
        Self { validator }
    }

    /// 构造创作者及其合法桌游
    pub fn link_creator(&self, record: &RawCreatorRecord) -> CreatorLink {
        let mut boardgames = Vec::with_capacity(record.boardgames.len());
        let mut rejected = Vec::new();

        for (index, raw) in record.boardgames.iter().enumerate() {
            let violations = self.validator.violations(raw);
            let accepted = if violations.is_empty() {
                to_new_boardgame(raw)
            } else {
                None
            };

            match accepted {
                Some(boardgame) => boardgames.push(boardgame),
                None => {
                    warn!(
                        index,
                        name = raw.name.as_deref().unwrap_or(""),
                        violations = %join_violations(&violations),
                        "桌游记录校验失败，已跳过"
                    );
                    rejected.push(BoardgameRejection { index, violations });
                }
            }
        }

        CreatorLink {
            creator: NewCreator {
                first_name: record.first_name.clone().unwrap_or_default(),
                last_name: record.last_name.clone().unwrap_or_default(),
                boardgames,
            },
            rejected,
        }
    }

    /// 构造卖家及其桌游关联
    ///
    /// # 说明
    /// - 桌游 id 先去重（保留首次出现的顺序）
    /// - 无法解析的 id 单独记录，不影响卖家本身
    pub fn link_seller<S>(&self, store: &S, record: &RawSellerRecord) -> RepositoryResult<SellerLink>
    where
        S: CatalogStore + ?Sized,
    {
        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();

        for boardgame_id in distinct_ids(&record.boardgame_ids) {
            match store.find_boardgame_by_id(boardgame_id)? {
                Some(boardgame) => {
                    debug!(boardgame_id, name = %boardgame.name, "桌游引用解析成功");
                    resolved.push(boardgame.id);
                }
                None => {
                    error!(
                        boardgame_id,
                        seller = record.name.as_deref().unwrap_or(""),
                        "桌游引用不存在，已跳过"
                    );
                    unresolved.push(boardgame_id);
                }
            }
        }

        Ok(SellerLink {
            seller: NewSeller {
                name: record.name.clone().unwrap_or_default(),
                address: record.address.clone().unwrap_or_default(),
                country: record.country.clone().unwrap_or_default(),
                website: record.website.clone().unwrap_or_default(),
                boardgame_ids: resolved,
            },
            unresolved,
        })
    }
}

/// 去重并保留首次出现的顺序
pub fn distinct_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// 已校验的原始桌游 → 待写入桌游（名称为空或编码非法时返回 None）
fn to_new_boardgame(raw: &RawBoardgameRecord) -> Option<NewBoardgame> {
    let name = raw.name.as_deref().filter(|name| !name.is_empty())?;
    let category_type = CategoryType::try_from(raw.category_type?).ok()?;

    Some(NewBoardgame {
        name: name.to_string(),
        rating: raw.rating?,
        year_published: raw.year_published?,
        category_type,
        mechanics: raw.mechanics.clone()?,
    })
}

pub(crate) fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Boardgame, BoardgameSeller, Creator, Seller};
    use crate::repository::catalog_store::{CatalogWriteSet, CommitSummary};

    // 只提供 find_boardgame_by_id 的内存存储
    struct FixedStore {
        ids: Vec<i64>,
    }

    impl CatalogStore for FixedStore {
        fn find_boardgame_by_id(&self, id: i64) -> RepositoryResult<Option<Boardgame>> {
            Ok(self.ids.contains(&id).then(|| Boardgame {
                id,
                name: format!("Boardgame #{id:03}"),
                rating: 5.0,
                year_published: 2020,
                category_type: CategoryType::Strategy,
                mechanics: "Dice".to_string(),
                creator_id: 1,
            }))
        }

        fn save_changes(&self, _write_set: &CatalogWriteSet) -> RepositoryResult<CommitSummary> {
            Ok(CommitSummary::default())
        }

        fn query_creators(&self) -> RepositoryResult<Vec<Creator>> {
            Ok(Vec::new())
        }

        fn query_boardgames(&self) -> RepositoryResult<Vec<Boardgame>> {
            Ok(Vec::new())
        }

        fn query_sellers(&self) -> RepositoryResult<Vec<Seller>> {
            Ok(Vec::new())
        }

        fn query_boardgame_sellers(&self) -> RepositoryResult<Vec<BoardgameSeller>> {
            Ok(Vec::new())
        }
    }

    fn boardgame(name: &str, rating: f64, year: i32, category: i32) -> RawBoardgameRecord {
        RawBoardgameRecord {
            name: Some(name.to_string()),
            rating: Some(rating),
            year_published: Some(year),
            category_type: Some(category),
            mechanics: Some("Worker Placement".to_string()),
        }
    }

    fn seller(ids: Vec<i64>) -> RawSellerRecord {
        RawSellerRecord {
            name: Some("Meeple Mart".to_string()),
            address: Some("5 Elm Rd".to_string()),
            country: Some("Canada".to_string()),
            website: Some("www.meeplemart.com".to_string()),
            boardgame_ids: ids,
        }
    }

    #[test]
    fn test_link_creator_keeps_only_valid_boardgames() {
        let linker = RecordLinker::default();
        let record = RawCreatorRecord {
            first_name: Some("Debra".to_string()),
            last_name: Some("Edwards".to_string()),
            boardgames: vec![
                boardgame("Valid Game One", 7.0, 2019, 1),
                boardgame("Rating Too High", 10.5, 2019, 1),
                boardgame("Too Old Boardgame", 7.0, 2017, 1),
                boardgame("Bad Category Game", 7.0, 2019, 7),
                boardgame("Valid Game Two", 9.1, 2022, 3),
            ],
        };

        let link = linker.link_creator(&record);

        let names: Vec<&str> = link.creator.boardgames.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Valid Game One", "Valid Game Two"]);
        assert_eq!(link.creator.boardgames[1].category_type, CategoryType::Economic);

        let rejected: Vec<usize> = link.rejected.iter().map(|r| r.index).collect();
        assert_eq!(rejected, vec![1, 2, 3]);
    }

    #[test]
    fn test_link_creator_with_no_boardgames() {
        let linker = RecordLinker::default();
        let record = RawCreatorRecord {
            first_name: Some("Al".to_string()),
            last_name: Some("Jo".to_string()),
            boardgames: Vec::new(),
        };

        let link = linker.link_creator(&record);
        assert_eq!(link.creator.first_name, "Al");
        assert!(link.creator.boardgames.is_empty());
        assert!(link.rejected.is_empty());
    }

    #[test]
    fn test_distinct_ids_keeps_first_occurrence_order() {
        assert_eq!(distinct_ids(&[5, 1, 5, 3, 1]), vec![5, 1, 3]);
        assert!(distinct_ids(&[]).is_empty());
    }

    #[test]
    fn test_link_seller_resolves_and_reports_missing() {
        let linker = RecordLinker::default();
        let store = FixedStore { ids: vec![1, 2, 3] };

        let link = linker
            .link_seller(&store, &seller(vec![3, 99, 1, 3, 42, 99]))
            .unwrap();

        assert_eq!(link.seller.boardgame_ids, vec![3, 1]);
        assert_eq!(link.unresolved, vec![99, 42]);
        assert_eq!(link.seller.name, "Meeple Mart");
    }

    #[test]
    fn test_link_seller_all_missing_still_links_seller() {
        let linker = RecordLinker::default();
        let store = FixedStore { ids: Vec::new() };

        let link = linker.link_seller(&store, &seller(vec![7, 8])).unwrap();

        assert!(link.seller.boardgame_ids.is_empty());
        assert_eq!(link.unresolved, vec![7, 8]);
    }
}
