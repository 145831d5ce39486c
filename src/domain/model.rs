use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A positioned text run taken from one page of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub width: f64,
}

impl Fragment {
    /// 去除空白後為空的文字片段直接丟棄
    pub fn new(text: &str, x: f64, y: f64, width: f64) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            x: x.round() as i32,
            y: y.round() as i32,
            width,
        })
    }
}

/// Fragments believed to lie on one visual line, left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub fragments: Vec<Fragment>,
}

impl Row {
    pub fn texts(&self) -> Vec<&str> {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    /// Fragment texts joined by single spaces.
    pub fn text(&self) -> String {
        self.texts().join(" ")
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "F")]
    F,
}

impl LetterGrade {
    pub const ALL: [LetterGrade; 13] = [
        LetterGrade::APlus,
        LetterGrade::A,
        LetterGrade::AMinus,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::BMinus,
        LetterGrade::CPlus,
        LetterGrade::C,
        LetterGrade::CMinus,
        LetterGrade::DPlus,
        LetterGrade::D,
        LetterGrade::DMinus,
        LetterGrade::F,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::DMinus => "D-",
            LetterGrade::F => "F",
        }
    }

    /// Exact token match, no trimming or case folding.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.as_str() == token)
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weighting tier of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CourseLevel {
    #[serde(rename = "AP")]
    Ap,
    Honors,
    Advanced,
    #[default]
    #[serde(rename = "CP")]
    Cp,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Ap => "AP",
            CourseLevel::Honors => "Honors",
            CourseLevel::Advanced => "Advanced",
            CourseLevel::Cp => "CP",
        }
    }
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credit value of a course. Always positive; serialized as a decimal string
/// in shortest form ("5", "3.75").
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Credits(pub(crate) f64);

impl Credits {
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Credits {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Credits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let value: f64 = raw.trim().parse().map_err(serde::de::Error::custom)?;
        Credits::new(value)
            .ok_or_else(|| serde::de::Error::custom(format!("credits must be positive, got {}", raw)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    pub name: String,
    pub grade: LetterGrade,
    pub level: CourseLevel,
    pub credits: Credits,
}

/// Everything extracted from one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub year_label: String,
    pub courses: Vec<CourseRecord>,
}

#[derive(Debug, Clone)]
pub enum DocumentOutcome {
    Parsed(ImportResult),
    Failed { reason: String },
}

/// One input document after the extract stage.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub source: String,
    pub outcome: DocumentOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub accepted: usize,
    pub discarded: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscardedDocument {
    pub source: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedYear {
    pub source: String,
    #[serde(flatten)]
    pub result: ImportResult,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub summary: BatchSummary,
    pub years: Vec<ImportedYear>,
    pub discarded: Vec<DiscardedDocument>,
    pub csv_output: String,
    pub json_output: String,
}
