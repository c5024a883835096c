// ==========================================
// 桌游数据交换系统 - 导入管道
// ==========================================
// 职责: 整合一次导入调用，从批次文本到落库与报告
// 流程: 解码 → 顶层校验 → 关联（嵌套校验/引用解析）→ 一次性提交
// 报告: 每条记录按输入顺序产生若干 Invalid data! 行 + 至多一条成功行
// ==========================================

use crate::domain::import::{ImportBatch, ImportReport, INVALID_DATA_LINE};
use crate::domain::types::ImportBatchKind;
use crate::importer::batch_decoder::{BatchDecoder, JsonSellerDecoder, XmlCreatorDecoder};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_validator::FieldValidator;
use crate::importer::record_linker::{join_violations, RecordLinker};
use crate::repository::catalog_store::{CatalogStore, CatalogWriteSet};
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// 创作者成功行
pub fn creator_success_line(first_name: &str, last_name: &str, boardgames: usize) -> String {
    format!(
        "Successfully imported creator \u{2013} {} {} with {} boardgames.",
        first_name, last_name, boardgames
    )
}

/// 卖家成功行
pub fn seller_success_line(name: &str, boardgames: usize) -> String {
    format!(
        "Successfully imported seller - {} with {} boardgames.",
        name, boardgames
    )
}

// ==========================================
// ImportPipeline - 导入管道
// ==========================================
pub struct ImportPipeline<R>
where
    R: CatalogStore,
{
    // 数据访问层
    store: R,

    // 导入组件
    validator: FieldValidator,
    linker: RecordLinker,
    creator_decoder: XmlCreatorDecoder,
    seller_decoder: JsonSellerDecoder,
}

impl<R> ImportPipeline<R>
where
    R: CatalogStore,
{
    /// 创建新的导入管道
    ///
    /// # 参数
    /// - store: 目录存储（引用解析 + 提交）
    pub fn new(store: R) -> Self {
        let validator = FieldValidator::new();
        Self {
            store,
            validator,
            linker: RecordLinker::new(validator),
            creator_decoder: XmlCreatorDecoder::new(),
            seller_decoder: JsonSellerDecoder::new(),
        }
    }

    /// 底层存储
    pub fn store(&self) -> &R {
        &self.store
    }

    /// 导入创作者批次（XML）
    ///
    /// # 返回
    /// - Ok(ImportReport): 完整报告（已提交）
    /// - Err(XmlDecode / UnexpectedRoot): 解码失败，未写入任何数据
    /// - Err(Repository): 提交失败，未写入任何数据
    #[instrument(skip(self, xml), fields(batch_id))]
    pub fn import_creators(&self, xml: &str) -> ImportResult<ImportReport> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());
        info!(batch_id = %batch_id, "开始导入创作者批次");

        // === 步骤 1: 解码 ===
        let records = self.creator_decoder.decode(xml).map_err(|e| {
            error!(error = %e, "创作者批次解码失败");
            e
        })?;
        let total_entries = records.len();
        debug!(total_entries, "创作者批次解码完成");

        // === 步骤 2: 逐条校验与关联 ===
        let mut lines = Vec::new();
        let mut write_set = CatalogWriteSet::new();
        let mut accepted_children = 0;

        for (index, record) in records.iter().enumerate() {
            let violations = self.validator.violations(record);
            if !violations.is_empty() {
                warn!(
                    index,
                    violations = %join_violations(&violations),
                    "创作者记录校验失败，整条跳过"
                );
                lines.push(INVALID_DATA_LINE.to_string());
                continue;
            }

            let link = self.linker.link_creator(record);
            lines.extend(link.rejected.iter().map(|_| INVALID_DATA_LINE.to_string()));
            lines.push(creator_success_line(
                &link.creator.first_name,
                &link.creator.last_name,
                link.creator.boardgames.len(),
            ));

            accepted_children += link.creator.boardgames.len();
            write_set.add_creators(std::iter::once(link.creator));
        }

        // === 步骤 3: 提交 ===
        let accepted_entries = write_set.creators.len();
        self.commit(
            write_set,
            lines,
            BatchTally {
                batch_id,
                batch_kind: ImportBatchKind::Creators,
                total_entries,
                accepted_entries,
                accepted_children,
                start_time,
            },
        )
    }

    /// 导入卖家批次（JSON）
    ///
    /// # 返回
    /// - Ok(ImportReport): 完整报告（已提交）
    /// - Err(JsonDecode): 解码失败，未写入任何数据
    /// - Err(Repository): 引用查询或提交失败，未写入任何数据
    #[instrument(skip(self, json), fields(batch_id))]
    pub fn import_sellers(&self, json: &str) -> ImportResult<ImportReport> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());
        info!(batch_id = %batch_id, "开始导入卖家批次");

        // === 步骤 1: 解码 ===
        let records = self.seller_decoder.decode(json).map_err(|e| {
            error!(error = %e, "卖家批次解码失败");
            e
        })?;
        let total_entries = records.len();
        debug!(total_entries, "卖家批次解码完成");

        // === 步骤 2: 逐条校验与引用解析 ===
        let mut lines = Vec::new();
        let mut write_set = CatalogWriteSet::new();
        let mut accepted_children = 0;

        for (index, record) in records.iter().enumerate() {
            let violations = self.validator.violations(record);
            if !violations.is_empty() {
                warn!(
                    index,
                    violations = %join_violations(&violations),
                    "卖家记录校验失败，整条跳过"
                );
                lines.push(INVALID_DATA_LINE.to_string());
                continue;
            }

            let link = self.linker.link_seller(&self.store, record)?;
            lines.extend(link.unresolved.iter().map(|_| INVALID_DATA_LINE.to_string()));
            lines.push(seller_success_line(
                &link.seller.name,
                link.seller.boardgame_ids.len(),
            ));

            accepted_children += link.seller.boardgame_ids.len();
            write_set.add_sellers(std::iter::once(link.seller));
        }

        // === 步骤 3: 提交 ===
        let accepted_entries = write_set.sellers.len();
        self.commit(
            write_set,
            lines,
            BatchTally {
                batch_id,
                batch_kind: ImportBatchKind::Sellers,
                total_entries,
                accepted_entries,
                accepted_children,
                start_time,
            },
        )
    }

    /// 附加批次台账并一次性提交写入集
    fn commit(
        &self,
        write_set: CatalogWriteSet,
        lines: Vec<String>,
        tally: BatchTally,
    ) -> ImportResult<ImportReport> {
        let invalid_lines = lines
            .iter()
            .filter(|line| line.as_str() == INVALID_DATA_LINE)
            .count();

        let batch = ImportBatch {
            batch_id: tally.batch_id,
            batch_kind: tally.batch_kind,
            total_entries: tally.total_entries,
            accepted_entries: tally.accepted_entries,
            accepted_children: tally.accepted_children,
            invalid_lines,
            imported_at: Utc::now(),
            elapsed_ms: i64::try_from(tally.start_time.elapsed().as_millis()).unwrap_or(i64::MAX),
        };

        let write_set = write_set.with_batch(batch.clone());
        let summary = self.store.save_changes(&write_set).map_err(|e| {
            error!(batch_id = %batch.batch_id, error = %e, "批次提交失败，已回滚");
            ImportError::from(e)
        })?;

        info!(
            batch_id = %batch.batch_id,
            batch_kind = %batch.batch_kind,
            total = batch.total_entries,
            accepted = batch.accepted_entries,
            children = batch.accepted_children,
            invalid = batch.invalid_lines,
            creators = summary.creators,
            boardgames = summary.boardgames,
            sellers = summary.sellers,
            associations = summary.associations,
            elapsed_ms = batch.elapsed_ms,
            "批次导入完成"
        );

        Ok(ImportReport { batch, lines })
    }
}

// 提交前汇总的批次计数
struct BatchTally {
    batch_id: String,
    batch_kind: ImportBatchKind,
    total_entries: usize,
    accepted_entries: usize,
    accepted_children: usize,
    start_time: Instant,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Boardgame, BoardgameSeller, Creator, Seller};
    use crate::domain::types::CategoryType;
    use crate::repository::catalog_store::CommitSummary;
    use crate::repository::error::{RepositoryError, RepositoryResult};
    use std::cell::RefCell;

    // 记录提交内容的内存存储
    #[derive(Default)]
    struct RecordingStore {
        known_ids: Vec<i64>,
        fail_commit: bool,
        committed: RefCell<Vec<CatalogWriteSet>>,
    }

    impl CatalogStore for RecordingStore {
        fn find_boardgame_by_id(&self, id: i64) -> RepositoryResult<Option<Boardgame>> {
            Ok(self.known_ids.contains(&id).then(|| Boardgame {
                id,
                name: format!("Known Boardgame {id}"),
                rating: 6.0,
                year_published: 2020,
                category_type: CategoryType::Abstract,
                mechanics: "Tiles".to_string(),
                creator_id: 1,
            }))
        }

        fn save_changes(&self, write_set: &CatalogWriteSet) -> RepositoryResult<CommitSummary> {
            if self.fail_commit {
                return Err(RepositoryError::DatabaseTransactionError(
                    "disk I/O error".to_string(),
                ));
            }
            self.committed.borrow_mut().push(write_set.clone());
            Ok(CommitSummary {
                creators: write_set.creators.len(),
                boardgames: write_set.creators.iter().map(|c| c.boardgames.len()).sum(),
                sellers: write_set.sellers.len(),
                associations: write_set.sellers.iter().map(|s| s.boardgame_ids.len()).sum(),
            })
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

    #[test]
    fn test_success_line_templates() {
        assert_eq!(
            creator_success_line("Al", "Jo", 0),
            "Successfully imported creator – Al Jo with 0 boardgames."
        );
        assert_eq!(
            seller_success_line("6am", 3),
            "Successfully imported seller - 6am with 3 boardgames."
        );
    }

    #[test]
    fn test_import_creators_line_order() {
        let pipeline = ImportPipeline::new(RecordingStore::default());
        let xml = r#"<Creators>
  <Creator>
    <FirstName>A</FirstName>
    <LastName>Jo</LastName>
  </Creator>
  <Creator>
    <FirstName>Al</FirstName>
    <LastName>Jo</LastName>
    <Boardgames>
      <Boardgame>
        <Name>Too short</Name>
      </Boardgame>
    </Boardgames>
  </Creator>
  <Creator>
    <FirstName>Debra</FirstName>
    <LastName>Edwards</LastName>
    <Boardgames>
      <Boardgame>
        <Name>Valid Boardgame</Name>
        <Rating>7.5</Rating>
        <YearPublished>2019</YearPublished>
        <CategoryType>4</CategoryType>
        <Mechanics>Deck Building</Mechanics>
      </Boardgame>
      <Boardgame>
        <Name>Another Boardgame</Name>
        <Rating>10.5</Rating>
        <YearPublished>2017</YearPublished>
        <CategoryType>7</CategoryType>
        <Mechanics>Dice</Mechanics>
      </Boardgame>
    </Boardgames>
  </Creator>
</Creators>"#;

        let report = pipeline.import_creators(xml).unwrap();

        assert_eq!(
            report.to_text(),
            "Invalid data!\n\
             Invalid data!\n\
             Successfully imported creator – Al Jo with 0 boardgames.\n\
             Invalid data!\n\
             Successfully imported creator – Debra Edwards with 1 boardgames."
        );
        assert_eq!(report.invalid_count(), 3);
        assert_eq!(report.batch.batch_kind, ImportBatchKind::Creators);
        assert_eq!(report.batch.total_entries, 3);
        assert_eq!(report.batch.accepted_entries, 2);
        assert_eq!(report.batch.accepted_children, 1);
        assert_eq!(report.batch.invalid_lines, 3);

        let committed = pipeline.store().committed.borrow();
        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].creators.len(), 2);
        assert_eq!(committed[0].creators[1].boardgames[0].name, "Valid Boardgame");
        assert!(committed[0].batch.is_some());
    }

    #[test]
    fn test_import_empty_batch_still_commits() {
        let pipeline = ImportPipeline::new(RecordingStore::default());

        let report = pipeline.import_creators("<Creators></Creators>").unwrap();
        assert_eq!(report.to_text(), "");

        let report = pipeline.import_sellers("[]").unwrap();
        assert_eq!(report.to_text(), "");

        let committed = pipeline.store().committed.borrow();
        assert_eq!(committed.len(), 2);
        assert!(committed.iter().all(CatalogWriteSet::is_empty));
    }

    #[test]
    fn test_import_sellers_unresolved_references() {
        let store = RecordingStore {
            known_ids: vec![1, 2],
            ..Default::default()
        };
        let pipeline = ImportPipeline::new(store);
        let json = r#"[
          { "Name": "6am", "Address": "Main St", "Country": "Belgium", "Website": "www.6pm.com",
            "Boardgames": [1, 77, 2, 1, 88] },
          { "Name": "NoSite", "Address": "Main St", "Country": "Belgium", "Website": "",
            "Boardgames": [1] }
        ]"#;

        let report = pipeline.import_sellers(json).unwrap();

        assert_eq!(
            report.lines,
            vec![
                "Invalid data!",
                "Invalid data!",
                "Successfully imported seller - 6am with 2 boardgames.",
                "Invalid data!",
            ]
        );
        assert_eq!(report.batch.accepted_entries, 1);
        assert_eq!(report.batch.accepted_children, 2);

        let committed = pipeline.store().committed.borrow();
        assert_eq!(committed[0].sellers[0].boardgame_ids, vec![1, 2]);
    }

    #[test]
    fn test_decode_failure_commits_nothing() {
        let pipeline = ImportPipeline::new(RecordingStore::default());

        assert!(pipeline.import_creators("<Creators><Creator>").is_err());
        assert!(matches!(
            pipeline.import_sellers("{"),
            Err(ImportError::JsonDecode(_))
        ));
        assert!(pipeline.store().committed.borrow().is_empty());
    }

    #[test]
    fn test_commit_failure_is_fatal() {
        let store = RecordingStore {
            fail_commit: true,
            ..Default::default()
        };
        let pipeline = ImportPipeline::new(store);

        let xml = "<Creators><Creator><FirstName>Al</FirstName><LastName>Jo</LastName></Creator></Creators>";
        let result = pipeline.import_creators(xml);

        assert!(matches!(result, Err(ImportError::Repository(_))));
    }
}
