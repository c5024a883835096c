// ==========================================
// 桌游数据交换系统 - 字段校验器
// ==========================================
// 职责: 按约束表校验单条扁平记录（必填 / 长度 / 数值范围）
// 红线: 纯结构校验，不访问仓储，不看其他记录，无副作用
// ==========================================

use crate::domain::import::{RawBoardgameRecord, RawCreatorRecord, RawSellerRecord};
use crate::domain::types::CategoryType;
use std::fmt;

// ==========================================
// 约束表
// ==========================================

/// 单字段约束（区间均为闭区间）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConstraint {
    pub field: &'static str,
    pub required: bool,
    pub length: Option<(usize, usize)>, // 字符数
    pub range: Option<(f64, f64)>,
}

impl FieldConstraint {
    const fn required(field: &'static str) -> Self {
        Self {
            field,
            required: true,
            length: None,
            range: None,
        }
    }

    const fn with_length(mut self, min: usize, max: usize) -> Self {
        self.length = Some((min, max));
        self
    }

    const fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }
}

/// 创作者约束
pub const CREATOR_CONSTRAINTS: &[FieldConstraint] = &[
    FieldConstraint::required("FirstName").with_length(2, 7),
    FieldConstraint::required("LastName").with_length(2, 7),
];

/// 桌游约束
pub const BOARDGAME_CONSTRAINTS: &[FieldConstraint] = &[
    FieldConstraint::required("Name").with_length(10, 20),
    FieldConstraint::required("Rating").with_range(1.0, 10.0),
    FieldConstraint::required("YearPublished").with_range(2018.0, 2023.0),
    FieldConstraint::required("CategoryType")
        .with_range(CategoryType::MIN_CODE as f64, CategoryType::MAX_CODE as f64),
    FieldConstraint::required("Mechanics"),
];

/// 卖家约束
pub const SELLER_CONSTRAINTS: &[FieldConstraint] = &[
    FieldConstraint::required("Name"),
    FieldConstraint::required("Address"),
    FieldConstraint::required("Country"),
    FieldConstraint::required("Website"),
];

// ==========================================
// 字段取值
// ==========================================

/// 校验时看到的字段值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Number(Option<f64>),
}

/// 可按约束表校验的记录
pub trait ConstrainedRecord {
    /// 本记录类型的约束表
    fn constraints(&self) -> &'static [FieldConstraint];

    /// 按字段名取值（未知字段视为缺失）
    fn field_value(&self, field: &str) -> FieldValue<'_>;
}

impl ConstrainedRecord for RawCreatorRecord {
    fn constraints(&self) -> &'static [FieldConstraint] {
        CREATOR_CONSTRAINTS
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "FirstName" => FieldValue::Text(self.first_name.as_deref()),
            "LastName" => FieldValue::Text(self.last_name.as_deref()),
            _ => FieldValue::Text(None),
        }
    }
}

impl ConstrainedRecord for RawBoardgameRecord {
    fn constraints(&self) -> &'static [FieldConstraint] {
        BOARDGAME_CONSTRAINTS
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "Name" => FieldValue::Text(self.name.as_deref()),
            "Rating" => FieldValue::Number(self.rating),
            "YearPublished" => FieldValue::Number(self.year_published.map(f64::from)),
            "CategoryType" => FieldValue::Number(self.category_type.map(f64::from)),
            "Mechanics" => FieldValue::Text(self.mechanics.as_deref()),
            _ => FieldValue::Text(None),
        }
    }
}

impl ConstrainedRecord for RawSellerRecord {
    fn constraints(&self) -> &'static [FieldConstraint] {
        SELLER_CONSTRAINTS
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "Name" => FieldValue::Text(self.name.as_deref()),
            "Address" => FieldValue::Text(self.address.as_deref()),
            "Country" => FieldValue::Text(self.country.as_deref()),
            "Website" => FieldValue::Text(self.website.as_deref()),
            _ => FieldValue::Text(None),
        }
    }
}

// ==========================================
// 违规明细
// ==========================================

#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    Missing,
    Length { actual: usize, min: usize, max: usize },
    Range { actual: f64, min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub kind: ViolationKind,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "{}: 必填字段缺失", self.field),
            ViolationKind::Length { actual, min, max } => {
                write!(f, "{}: 长度 {} 超出范围 [{}, {}]", self.field, actual, min, max)
            }
            ViolationKind::Range { actual, min, max } => {
                write!(f, "{}: 值 {} 超出范围 [{}, {}]", self.field, actual, min, max)
            }
        }
    }
}

// ==========================================
// FieldValidator - 字段校验器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldValidator;

impl FieldValidator {
    pub fn new() -> Self {
        Self
    }

    /// 记录是否合法（全部字段满足约束）
    pub fn validate<R: ConstrainedRecord + ?Sized>(&self, record: &R) -> bool {
        self.violations(record).is_empty()
    }

    /// 收集记录的全部违规项（按约束表顺序）
    pub fn violations<R: ConstrainedRecord + ?Sized>(&self, record: &R) -> Vec<FieldViolation> {
        record
            .constraints()
            .iter()
            .filter_map(|constraint| {
                check_field(constraint, record.field_value(constraint.field)).map(|kind| {
                    FieldViolation {
                        field: constraint.field,
                        kind,
                    }
                })
            })
            .collect()
    }
}

/// 单字段检查：必填优先，缺失时不再检查长度/范围
fn check_field(constraint: &FieldConstraint, value: FieldValue<'_>) -> Option<ViolationKind> {
    match value {
        FieldValue::Text(None) | FieldValue::Number(None) => {
            constraint.required.then_some(ViolationKind::Missing)
        }
        FieldValue::Text(Some(text)) => {
            if constraint.required && text.trim().is_empty() {
                return Some(ViolationKind::Missing);
            }
            let (min, max) = constraint.length?;
            let actual = text.chars().count();
            (actual < min || actual > max).then_some(ViolationKind::Length { actual, min, max })
        }
        FieldValue::Number(Some(number)) => {
            let (min, max) = constraint.range?;
            // NaN 不落在任何区间内
            let in_range = number >= min && number <= max;
            (!in_range).then_some(ViolationKind::Range {
                actual: number,
                min,
                max,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_boardgame() -> RawBoardgameRecord {
        RawBoardgameRecord {
            name: Some("Catan Cities Pro".to_string()),
            rating: Some(7.5),
            year_published: Some(2019),
            category_type: Some(4),
            mechanics: Some("Trading, Dice Rolling".to_string()),
        }
    }

    fn creator(first: &str, last: &str) -> RawCreatorRecord {
        RawCreatorRecord {
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            boardgames: Vec::new(),
        }
    }

    #[test]
    fn test_creator_name_length_bounds() {
        let validator = FieldValidator::new();

        assert!(validator.validate(&creator("Al", "Jo")));
        assert!(validator.validate(&creator("Martina", "Wallace")));
        assert!(!validator.validate(&creator("A", "Jo")));
        assert!(!validator.validate(&creator("Al", "Lengthy1")));
    }

    #[test]
    fn test_creator_missing_and_blank_names() {
        let validator = FieldValidator::new();

        let mut record = creator("Al", "Jo");
        record.first_name = None;
        let violations = validator.violations(&record);
        assert_eq!(
            violations,
            vec![FieldViolation {
                field: "FirstName",
                kind: ViolationKind::Missing,
            }]
        );

        assert!(!validator.validate(&creator("   ", "Jo")));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let validator = FieldValidator::new();
        // 字符数在范围内，但 UTF-8 字节数超过 7
        assert!(validator.validate(&creator("Žofíé", "Ćirić")));
    }

    #[test]
    fn test_boardgame_valid() {
        let validator = FieldValidator::new();
        assert!(validator.validate(&valid_boardgame()));
    }

    #[test]
    fn test_boardgame_range_edges_inclusive() {
        let validator = FieldValidator::new();

        let mut record = valid_boardgame();
        record.rating = Some(1.0);
        record.year_published = Some(2018);
        record.category_type = Some(0);
        assert!(validator.validate(&record));

        record.rating = Some(10.0);
        record.year_published = Some(2023);
        record.category_type = Some(4);
        assert!(validator.validate(&record));
    }

    #[test]
    fn test_boardgame_out_of_range_fields() {
        let validator = FieldValidator::new();

        let mut record = valid_boardgame();
        record.rating = Some(10.5);
        record.year_published = Some(2017);
        record.category_type = Some(7);

        let fields: Vec<&str> = validator
            .violations(&record)
            .iter()
            .map(|v| v.field)
            .collect();
        assert_eq!(fields, vec!["Rating", "YearPublished", "CategoryType"]);
    }

    #[test]
    fn test_boardgame_name_too_short() {
        let validator = FieldValidator::new();

        let mut record = valid_boardgame();
        record.name = Some("Too short".to_string());

        let violations = validator.violations(&record);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].kind,
            ViolationKind::Length {
                actual: 9,
                min: 10,
                max: 20
            }
        );
    }

    #[test]
    fn test_boardgame_missing_numeric_is_invalid() {
        let validator = FieldValidator::new();

        let mut record = valid_boardgame();
        record.category_type = None;
        assert!(!validator.validate(&record));

        let mut record = valid_boardgame();
        record.rating = Some(f64::NAN);
        assert!(!validator.validate(&record));
    }

    #[test]
    fn test_seller_all_fields_required() {
        let validator = FieldValidator::new();

        let mut seller = RawSellerRecord {
            name: Some("Board Game Hub".to_string()),
            address: Some("12 Market Sq".to_string()),
            country: Some("Germany".to_string()),
            website: Some("www.bghub.com".to_string()),
            boardgame_ids: vec![1, 2],
        };
        assert!(validator.validate(&seller));

        seller.website = Some(String::new());
        assert!(!validator.validate(&seller));

        seller.website = None;
        seller.country = None;
        assert_eq!(validator.violations(&seller).len(), 2);
    }
}
