// ==========================================
// 桌游数据交换系统 - 批次解码器
// ==========================================
// 职责: 将整批输入文本解码为原始记录（阶段 0）
// 支持: 创作者 XML（quick-xml serde）/ 卖家 JSON（serde_json）
// 说明: 解码失败是整批致命错误，不产生任何报告行
// ==========================================

use crate::domain::import::{RawBoardgameRecord, RawCreatorRecord, RawSellerRecord};
use crate::importer::error::{ImportError, ImportResult};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

/// 创作者批次的根元素名
pub const CREATORS_ROOT: &str = "Creators";

// ==========================================
// BatchDecoder Trait
// ==========================================
// 用途: 批次文本 → 原始记录序列（保持输入顺序）
// 实现者: XmlCreatorDecoder, JsonSellerDecoder
pub trait BatchDecoder {
    type Record;

    fn decode(&self, text: &str) -> ImportResult<Vec<Self::Record>>;
}

// ==========================================
// 创作者 XML 线格式
// ==========================================

#[derive(Debug, Deserialize)]
struct CreatorsXml {
    #[serde(rename = "Creator", default)]
    creators: Vec<CreatorXml>,
}

#[derive(Debug, Deserialize)]
struct CreatorXml {
    #[serde(rename = "FirstName", default)]
    first_name: Option<String>,
    #[serde(rename = "LastName", default)]
    last_name: Option<String>,
    #[serde(rename = "Boardgames", default)]
    boardgames: BoardgamesXml,
}

#[derive(Debug, Default, Deserialize)]
struct BoardgamesXml {
    #[serde(rename = "Boardgame", default)]
    items: Vec<BoardgameXml>,
}

#[derive(Debug, Deserialize)]
struct BoardgameXml {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Rating", default)]
    rating: Option<f64>,
    #[serde(rename = "YearPublished", default)]
    year_published: Option<i32>,
    #[serde(rename = "CategoryType", default)]
    category_type: Option<i32>,
    #[serde(rename = "Mechanics", default)]
    mechanics: Option<String>,
}

impl From<CreatorXml> for RawCreatorRecord {
    fn from(dto: CreatorXml) -> Self {
        RawCreatorRecord {
            first_name: dto.first_name,
            last_name: dto.last_name,
            boardgames: dto.boardgames.items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<BoardgameXml> for RawBoardgameRecord {
    fn from(dto: BoardgameXml) -> Self {
        RawBoardgameRecord {
            name: dto.name,
            rating: dto.rating,
            year_published: dto.year_published,
            category_type: dto.category_type,
            mechanics: dto.mechanics,
        }
    }
}

// ==========================================
// XmlCreatorDecoder
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCreatorDecoder;

impl XmlCreatorDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl BatchDecoder for XmlCreatorDecoder {
    type Record = RawCreatorRecord;

    fn decode(&self, text: &str) -> ImportResult<Vec<RawCreatorRecord>> {
        let root = root_element_name(text)?;
        if root != CREATORS_ROOT {
            return Err(ImportError::UnexpectedRoot {
                expected: CREATORS_ROOT.to_string(),
                actual: root,
            });
        }

        let document: CreatorsXml = quick_xml::de::from_str(text)?;
        Ok(document.creators.into_iter().map(Into::into).collect())
    }
}

/// 读取文档根元素名（跳过声明/注释）
fn root_element_name(xml: &str) -> ImportResult<String> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                return Ok(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Event::Eof => return Err(ImportError::XmlDecode("缺少根元素".to_string())),
            _ => {}
        }
    }
}

// ==========================================
// 卖家 JSON 线格式
// ==========================================

#[derive(Debug, Deserialize)]
struct SellerJson {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Address", default)]
    address: Option<String>,
    #[serde(rename = "Country", default)]
    country: Option<String>,
    #[serde(rename = "Website", default)]
    website: Option<String>,
    #[serde(rename = "Boardgames", default)]
    boardgames: Option<Vec<i64>>,
}

impl From<SellerJson> for RawSellerRecord {
    fn from(dto: SellerJson) -> Self {
        RawSellerRecord {
            name: dto.name,
            address: dto.address,
            country: dto.country,
            website: dto.website,
            boardgame_ids: dto.boardgames.unwrap_or_default(),
        }
    }
}

// ==========================================
// JsonSellerDecoder
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSellerDecoder;

impl JsonSellerDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl BatchDecoder for JsonSellerDecoder {
    type Record = RawSellerRecord;

    fn decode(&self, text: &str) -> ImportResult<Vec<RawSellerRecord>> {
        let sellers: Vec<SellerJson> = serde_json::from_str(text)?;
        Ok(sellers.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATORS_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Creators>
  <Creator>
    <FirstName>Debra</FirstName>
    <LastName>Edwards</LastName>
    <Boardgames>
      <Boardgame>
        <Name>4 Gods</Name>
        <Rating>7.28</Rating>
        <YearPublished>2017</YearPublished>
        <CategoryType>4</CategoryType>
        <Mechanics>Roll / Spin and Move</Mechanics>
      </Boardgame>
      <Boardgame>
        <Name>7 Steps Reloaded</Name>
        <Rating>7.58</Rating>
        <YearPublished>2019</YearPublished>
        <CategoryType>4</CategoryType>
        <Mechanics>Action Points</Mechanics>
      </Boardgame>
    </Boardgames>
  </Creator>
  <Creator>
    <FirstName>A</FirstName>
    <LastName>Bob</LastName>
    <Boardgames />
  </Creator>
</Creators>"#;

    #[test]
    fn test_decode_creators_preserves_order_and_nesting() {
        let records = XmlCreatorDecoder::new().decode(CREATORS_XML).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].first_name.as_deref(), Some("Debra"));
        assert_eq!(records[0].boardgames.len(), 2);
        assert_eq!(records[0].boardgames[0].name.as_deref(), Some("4 Gods"));
        assert_eq!(records[0].boardgames[0].year_published, Some(2017));
        assert_eq!(records[0].boardgames[1].rating, Some(7.58));
        assert_eq!(records[0].boardgames[1].category_type, Some(4));

        assert_eq!(records[1].first_name.as_deref(), Some("A"));
        assert!(records[1].boardgames.is_empty());
    }

    #[test]
    fn test_decode_creator_without_boardgames_element() {
        let xml = "<Creators><Creator><FirstName>Al</FirstName><LastName>Jo</LastName></Creator></Creators>";
        let records = XmlCreatorDecoder::new().decode(xml).unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].boardgames.is_empty());
    }

    #[test]
    fn test_decode_creator_missing_field_is_none() {
        let xml = "<Creators><Creator><LastName>Jo</LastName></Creator></Creators>";
        let records = XmlCreatorDecoder::new().decode(xml).unwrap();

        assert_eq!(records[0].first_name, None);
        assert_eq!(records[0].last_name.as_deref(), Some("Jo"));
    }

    #[test]
    fn test_decode_creators_wrong_root() {
        let xml = "<Sellers><Creator><FirstName>Al</FirstName></Creator></Sellers>";
        let result = XmlCreatorDecoder::new().decode(xml);

        assert!(matches!(result, Err(ImportError::UnexpectedRoot { .. })));
    }

    #[test]
    fn test_decode_creators_malformed_is_fatal() {
        let result = XmlCreatorDecoder::new().decode("<Creators><Creator>");
        assert!(result.is_err());

        let result = XmlCreatorDecoder::new().decode("");
        assert!(matches!(result, Err(ImportError::XmlDecode(_))));
    }

    #[test]
    fn test_decode_sellers() {
        let json = r#"[
          {
            "Name": "6am",
            "Address": "The Netherlands",
            "Country": "Belgium",
            "Website": "www.6pm.com",
            "Boardgames": [1, 105, 1, 5]
          },
          {
            "Name": "Amazon",
            "Address": null,
            "Country": "USA",
            "Website": "www.amazon.com"
          }
        ]"#;

        let records = JsonSellerDecoder::new().decode(json).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].boardgame_ids, vec![1, 105, 1, 5]);
        assert_eq!(records[1].address, None);
        assert!(records[1].boardgame_ids.is_empty());
    }

    #[test]
    fn test_decode_sellers_malformed_is_fatal() {
        let result = JsonSellerDecoder::new().decode("{ not json");
        assert!(matches!(result, Err(ImportError::JsonDecode(_))));
    }
}
