// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库、批次文本构造、落库计数
// ==========================================

#![allow(dead_code)]

use boardgames_exchange::db;
use boardgames_exchange::BoardgameExchangeApi;
use rusqlite::Connection;
use serde_json::{json, Value};
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径不是合法 UTF-8")?
        .to_string();

    let conn = db::open_sqlite_connection(&db_path)?;
    db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 创建临时数据库并打开门面
pub fn create_test_api() -> Result<(NamedTempFile, BoardgameExchangeApi), Box<dyn Error>> {
    let (temp_file, db_path) = create_test_db()?;
    let api = BoardgameExchangeApi::new(&db_path)?;
    Ok((temp_file, api))
}

/// 统计表行数
pub fn count_rows(db_path: &str, table: &str) -> i64 {
    let conn = Connection::open(db_path).unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })
    .unwrap()
}

// ==========================================
// 批次文本构造
// ==========================================

/// 单个 <Boardgame> 元素
pub fn boardgame_xml(name: &str, rating: f64, year: i32, category: i32) -> String {
    format!(
        "<Boardgame><Name>{}</Name><Rating>{}</Rating><YearPublished>{}</YearPublished>\
         <CategoryType>{}</CategoryType><Mechanics>Worker Placement</Mechanics></Boardgame>",
        name, rating, year, category
    )
}

/// 单个 <Creator> 元素
pub fn creator_xml(first_name: &str, last_name: &str, boardgames: &[String]) -> String {
    format!(
        "<Creator><FirstName>{}</FirstName><LastName>{}</LastName><Boardgames>{}</Boardgames></Creator>",
        first_name,
        last_name,
        boardgames.concat()
    )
}

/// 完整的创作者批次文档
pub fn creators_document(creators: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Creators>{}</Creators>",
        creators.concat()
    )
}

/// 单个卖家 JSON 对象
pub fn seller_json(name: &str, boardgame_ids: &[i64]) -> Value {
    json!({
        "Name": name,
        "Address": "12 Market Sq",
        "Country": "Germany",
        "Website": format!("www.{}.com", name.to_lowercase()),
        "Boardgames": boardgame_ids,
    })
}

/// 完整的卖家批次文档
pub fn sellers_document(sellers: Vec<Value>) -> String {
    Value::Array(sellers).to_string()
}
