// ==========================================
// 桌游数据交换系统 - 导出配置读取 Trait
// ==========================================
// 职责: 定义导出模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::repository::error::RepositoryResult;

/// 热销卖家报表默认截断数量
pub const DEFAULT_TOP_SELLERS_LIMIT: usize = 5;

/// 导出文本默认缩进宽度
pub const DEFAULT_INDENT_WIDTH: usize = 2;

// ==========================================
// ExchangeConfigReader Trait
// ==========================================
// 用途: 报表构建与格式化所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait ExchangeConfigReader {
    /// 获取热销卖家报表的截断数量
    ///
    /// # 默认值
    /// - 5
    fn get_top_sellers_limit(&self) -> RepositoryResult<usize>;

    /// 获取导出文本（XML/JSON）的缩进宽度
    ///
    /// # 默认值
    /// - 2
    fn get_indent_width(&self) -> RepositoryResult<usize>;
}
