use serde::{Deserialize, Serialize};
use std::fmt;

/// 學期，上游 API 只接受羅馬數字
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Semester {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
    VIII,
}

impl Semester {
    const ALL: [Semester; 8] = [
        Semester::I,
        Semester::II,
        Semester::III,
        Semester::IV,
        Semester::V,
        Semester::VI,
        Semester::VII,
        Semester::VIII,
    ];

    pub fn as_roman(&self) -> &'static str {
        match self {
            Semester::I => "I",
            Semester::II => "II",
            Semester::III => "III",
            Semester::IV => "IV",
            Semester::V => "V",
            Semester::VI => "VI",
            Semester::VII => "VII",
            Semester::VIII => "VIII",
        }
    }

    /// 接受 `III`、`iii` 或 `3`
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();

        // 數字只收單一個 ASCII 1..8，`+3`、`03` 一律不收
        if let [digit @ b'1'..=b'8'] = value.as_bytes() {
            return Self::ALL.get(usize::from(digit - b'1')).copied();
        }

        Self::ALL
            .iter()
            .find(|s| s.as_roman().eq_ignore_ascii_case(value))
            .copied()
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_roman())
    }
}

/// 一次查詢的已驗證參數
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLookup {
    pub reg_no: String,
    pub year: u16,
    pub semester: Semester,
    pub exam_held: String,
}

impl ResultLookup {
    /// 同樣的考試，換一個准考證號
    pub fn with_reg_no(&self, reg_no: impl Into<String>) -> Self {
        Self {
            reg_no: reg_no.into(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    Success,
    NotFound,
    Timeout,
    Error,
}

/// 回給客戶端的單筆結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub reg_no: String,
    pub status: LookupStatus,
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
