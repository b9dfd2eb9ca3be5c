use crate::core::{ResultLookup, Semester};
use crate::utils::error::{ProxyError, Result};
use chrono::Datelike;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

pub type QueryParams = HashMap<String, String>;

pub const REQUIRED_PARAMS: [&str; 4] = ["reg_no", "year", "semester", "exam_held"];

/// 最早可查詢的年份
pub const MIN_YEAR: u16 = 2000;

// `\d` 在 regex crate 會吃 Unicode 數字，這裡刻意只收 ASCII
static REG_NO_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{11}$").expect("reg_no pattern is valid"));
static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("year pattern is valid"));
static EXAM_HELD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{3,9}/[0-9]{4}$").expect("exam_held pattern is valid"));

/// 把原始 query 配對收成 map；必要參數重複出現時直接拒絕
pub fn query_from_pairs<I, K, V>(pairs: I) -> Result<QueryParams>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut query = QueryParams::new();

    for (key, value) in pairs {
        let key = key.as_ref();
        let repeated = query
            .insert(key.to_string(), value.as_ref().to_string())
            .is_some();

        if repeated && REQUIRED_PARAMS.iter().any(|name| *name == key) {
            return Err(invalid(key, "must be given only once"));
        }
    }

    Ok(query)
}

impl ResultLookup {
    /// 以今天的年份驗證查詢參數
    pub fn from_query(params: &QueryParams) -> Result<Self> {
        let current_year = chrono::Utc::now().year();
        Self::from_query_at(params, u16::try_from(current_year).unwrap_or(u16::MAX))
    }

    /// 先一次回報所有缺少的參數，再依序檢查格式
    pub fn from_query_at(params: &QueryParams, current_year: u16) -> Result<Self> {
        let value = |name: &str| {
            params
                .get(name)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let reg_no = value("reg_no");
        let year = value("year");
        let semester = value("semester");
        let exam_held = value("exam_held");

        match (reg_no, year, semester, exam_held) {
            (Some(reg_no), Some(year), Some(semester), Some(exam_held)) => Ok(Self {
                reg_no: parse_reg_no(reg_no)?,
                year: parse_year(year, current_year)?,
                semester: parse_semester(semester)?,
                exam_held: parse_exam_held(exam_held)?,
            }),
            _ => {
                let missing = REQUIRED_PARAMS
                    .iter()
                    .zip([reg_no, year, semester, exam_held])
                    .filter(|(_, v)| v.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect();
                Err(ProxyError::MissingParametersError { fields: missing })
            }
        }
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ProxyError {
    ProxyError::InvalidParameterError {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn parse_reg_no(value: &str) -> Result<String> {
    if !REG_NO_PATTERN.is_match(value) {
        return Err(invalid("reg_no", "must be exactly 11 digits"));
    }
    Ok(value.to_string())
}

fn parse_year(value: &str, current_year: u16) -> Result<u16> {
    if !YEAR_PATTERN.is_match(value) {
        return Err(invalid("year", "must be a 4-digit year"));
    }

    let year: u16 = value
        .parse()
        .map_err(|_| invalid("year", "must be a 4-digit year"))?;

    if year < MIN_YEAR || year > current_year {
        return Err(invalid(
            "year",
            format!("must be between {} and {}", MIN_YEAR, current_year),
        ));
    }

    Ok(year)
}

fn parse_semester(value: &str) -> Result<Semester> {
    Semester::parse(value).ok_or_else(|| invalid("semester", "must be I to VIII (or 1 to 8)"))
}

fn parse_exam_held(value: &str) -> Result<String> {
    if !EXAM_HELD_PATTERN.is_match(value) {
        return Err(invalid(
            "exam_held",
            "must look like Month/YYYY, e.g. November/2023",
        ));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid() -> QueryParams {
        params(&[
            ("reg_no", "22105110001"),
            ("year", "2023"),
            ("semester", "iii"),
            ("exam_held", "November/2023"),
        ])
    }

    #[test]
    fn test_query_from_pairs_rejects_repeated_parameters() {
        let query = query_from_pairs([
            ("reg_no", "22105110001"),
            ("year", "2023"),
            ("utm_source", "a"),
            ("utm_source", "b"),
        ])
        .unwrap();
        assert_eq!(query.get("reg_no").map(String::as_str), Some("22105110001"));
        assert_eq!(query.get("utm_source").map(String::as_str), Some("b"));

        match query_from_pairs([("reg_no", "22105110001"), ("reg_no", "22105110099")]) {
            Err(ProxyError::InvalidParameterError { field, reason }) => {
                assert_eq!(field, "reg_no");
                assert_eq!(reason, "must be given only once");
            }
            other => panic!("expected repeated reg_no to be rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_semester_with_padding_or_sign_is_rejected() {
        for semester in ["+3", "03", "008"] {
            let mut query = valid();
            query.insert("semester".to_string(), semester.to_string());
            match ResultLookup::from_query_at(&query, 2025) {
                Err(ProxyError::InvalidParameterError { field, .. }) => {
                    assert_eq!(field, "semester")
                }
                other => panic!("expected {} to be rejected, got {:?}", semester, other),
            }
        }
    }

    #[test]
    fn test_valid_lookup_normalizes_semester() {
        let lookup = ResultLookup::from_query_at(&valid(), 2025).unwrap();

        assert_eq!(lookup.reg_no, "22105110001");
        assert_eq!(lookup.year, 2023);
        assert_eq!(lookup.semester, Semester::III);
        assert_eq!(lookup.exam_held, "November/2023");
    }

    #[test]
    fn test_values_are_trimmed() {
        let mut query = valid();
        query.insert("reg_no".to_string(), " 22105110001 ".to_string());

        let lookup = ResultLookup::from_query_at(&query, 2025).unwrap();
        assert_eq!(lookup.reg_no, "22105110001");
    }

    #[test]
    fn test_all_missing_parameters_reported_together() {
        let query = params(&[("reg_no", "not-a-number"), ("semester", "  ")]);

        match ResultLookup::from_query_at(&query, 2025) {
            Err(ProxyError::MissingParametersError { fields }) => {
                assert_eq!(fields, vec!["year", "semester", "exam_held"]);
            }
            other => panic!("expected missing parameters, got {:?}", other),
        }
    }

    #[test]
    fn test_format_checked_in_order() {
        let mut query = valid();
        query.insert("reg_no".to_string(), "2210511000".to_string());
        query.insert("year".to_string(), "23".to_string());

        match ResultLookup::from_query_at(&query, 2025) {
            Err(ProxyError::InvalidParameterError { field, .. }) => assert_eq!(field, "reg_no"),
            other => panic!("expected invalid reg_no, got {:?}", other),
        }
    }

    #[test]
    fn test_reg_no_rejects_non_ascii_digits() {
        let mut query = valid();
        // 阿拉伯-印度數字
        query.insert("reg_no".to_string(), "٢٢١٠٥١١٠٠٠١".to_string());
        assert!(ResultLookup::from_query_at(&query, 2025).is_err());

        query.insert("reg_no".to_string(), "221051100011".to_string());
        assert!(ResultLookup::from_query_at(&query, 2025).is_err());
    }

    #[test]
    fn test_year_bounds() {
        let mut query = valid();

        query.insert("year".to_string(), "2026".to_string());
        assert!(ResultLookup::from_query_at(&query, 2025).is_err());

        query.insert("year".to_string(), "1999".to_string());
        assert!(ResultLookup::from_query_at(&query, 2025).is_err());

        query.insert("year".to_string(), "2025".to_string());
        assert!(ResultLookup::from_query_at(&query, 2025).is_ok());
    }

    #[test]
    fn test_invalid_semester_and_exam_held() {
        let mut query = valid();
        query.insert("semester".to_string(), "IX".to_string());
        match ResultLookup::from_query_at(&query, 2025) {
            Err(ProxyError::InvalidParameterError { field, .. }) => assert_eq!(field, "semester"),
            other => panic!("expected invalid semester, got {:?}", other),
        }

        let mut query = valid();
        query.insert("exam_held".to_string(), "2023/November".to_string());
        match ResultLookup::from_query_at(&query, 2025) {
            Err(ProxyError::InvalidParameterError { field, .. }) => assert_eq!(field, "exam_held"),
            other => panic!("expected invalid exam_held, got {:?}", other),
        }
    }
}
