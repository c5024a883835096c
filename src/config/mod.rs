// ==========================================
// 桌游数据交换系统 - 配置层
// ==========================================
// 职责: 导出参数配置，缺省时使用默认值
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod exchange_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use exchange_config_trait::{
    ExchangeConfigReader, DEFAULT_INDENT_WIDTH, DEFAULT_TOP_SELLERS_LIMIT,
};
