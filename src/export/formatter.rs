// ==========================================
// 桌游数据交换系统 - 报表格式化
// ==========================================
// 职责: 内存报表 → 文本（创作者 XML / 卖家 JSON）
// 红线: 不排序、不过滤，按传入顺序输出
// ==========================================

use crate::domain::report::{CreatorReport, SellerReport};
use crate::export::error::{ExportError, ExportResult};
use serde::Serialize;

/// XML 声明行
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

// ==========================================
// ReportFormatter Trait
// ==========================================
// 实现者: CreatorsXmlFormatter, SellersJsonFormatter
pub trait ReportFormatter {
    type Report;

    fn format(&self, reports: &[Self::Report]) -> ExportResult<String>;
}

// ==========================================
// 创作者 XML 线格式
// ==========================================

#[derive(Serialize)]
struct CreatorsXml<'a> {
    #[serde(rename = "Creator")]
    creators: Vec<CreatorXml<'a>>,
}

#[derive(Serialize)]
struct CreatorXml<'a> {
    #[serde(rename = "@BoardgamesCount")]
    boardgames_count: usize,
    #[serde(rename = "CreatorName")]
    creator_name: &'a str,
    #[serde(rename = "Boardgames")]
    boardgames: BoardgamesXml<'a>,
}

#[derive(Serialize)]
struct BoardgamesXml<'a> {
    #[serde(rename = "Boardgame")]
    items: Vec<BoardgameXml<'a>>,
}

#[derive(Serialize)]
struct BoardgameXml<'a> {
    #[serde(rename = "BoardgameName")]
    name: &'a str,
    #[serde(rename = "BoardgameYearPublished")]
    year_published: i32,
}

impl<'a> From<&'a CreatorReport> for CreatorXml<'a> {
    fn from(report: &'a CreatorReport) -> Self {
        CreatorXml {
            boardgames_count: report.boardgames_count,
            creator_name: &report.creator_name,
            boardgames: BoardgamesXml {
                items: report
                    .boardgames
                    .iter()
                    .map(|game| BoardgameXml {
                        name: &game.name,
                        year_published: game.year_published,
                    })
                    .collect(),
            },
        }
    }
}

// ==========================================
// CreatorsXmlFormatter
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct CreatorsXmlFormatter {
    indent_width: usize,
}

impl CreatorsXmlFormatter {
    pub const ROOT: &'static str = "Creators";

    pub fn new(indent_width: usize) -> Self {
        Self { indent_width }
    }
}

impl ReportFormatter for CreatorsXmlFormatter {
    type Report = CreatorReport;

    fn format(&self, reports: &[CreatorReport]) -> ExportResult<String> {
        let document = CreatorsXml {
            creators: reports.iter().map(CreatorXml::from).collect(),
        };

        let mut body = String::new();
        let mut serializer = quick_xml::se::Serializer::with_root(&mut body, Some(Self::ROOT))
            .map_err(|e| ExportError::XmlEncode(e.to_string()))?;
        if self.indent_width > 0 {
            serializer.indent(' ', self.indent_width);
        }
        document
            .serialize(serializer)
            .map_err(|e| ExportError::XmlEncode(e.to_string()))?;

        Ok(format!("{}\n{}", XML_DECLARATION, body))
    }
}

// ==========================================
// 卖家 JSON 线格式
// ==========================================

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SellerJson<'a> {
    name: &'a str,
    website: &'a str,
    boardgames: Vec<SellerBoardgameJson<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SellerBoardgameJson<'a> {
    name: &'a str,
    rating: f64,
    mechanics: &'a str,
    category: &'static str, // 类别名称而非编码
}

impl<'a> From<&'a SellerReport> for SellerJson<'a> {
    fn from(report: &'a SellerReport) -> Self {
        SellerJson {
            name: &report.name,
            website: &report.website,
            boardgames: report
                .boardgames
                .iter()
                .map(|game| SellerBoardgameJson {
                    name: &game.name,
                    rating: game.rating,
                    mechanics: &game.mechanics,
                    category: game.category.name(),
                })
                .collect(),
        }
    }
}

// ==========================================
// SellersJsonFormatter
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct SellersJsonFormatter {
    indent_width: usize,
}

impl SellersJsonFormatter {
    pub fn new(indent_width: usize) -> Self {
        Self { indent_width }
    }
}

impl ReportFormatter for SellersJsonFormatter {
    type Report = SellerReport;

    fn format(&self, reports: &[SellerReport]) -> ExportResult<String> {
        let document: Vec<SellerJson<'_>> = reports.iter().map(SellerJson::from).collect();

        let indent = vec![b' '; self.indent_width];
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        document.serialize(&mut serializer)?;

        String::from_utf8(buffer).map_err(|e| ExportError::JsonEncode(e.to_string()))
    }
}
