//! Fixed lookup tables used by the row classifier.
//!
//! Every table is ordered. Callers walk them front to back and stop at the
//! first hit, so position in the table is priority.

use crate::domain::model::CourseLevel;
use regex::Regex;
use std::sync::LazyLock;

/// Letter grades accepted as marking-period or final grades.
pub const VALID_GRADES: [&str; 13] = [
    "A+", "A", "A-", "B+", "B", "B-", "C+", "C", "C-", "D+", "D", "D-", "F",
];

/// Non-letter grade markers. A row starting with one of these is not a course.
pub const SKIP_GRADES: [&str; 10] = ["P", "W", "I", "AUD", "MED", "CD", "XMT", "N", "O", "S"];

/// Boilerplate rows: headers, legends, contact lines, narrative comments.
pub const SKIP_PATTERN_SOURCES: &[&str] = &[
    r"(?i)Subject",
    r"(?i)Report Card",
    r"(?i)Student No",
    r"(?i)Student Name",
    r"(?i)Grading System",
    r"(?i)Attendance",
    r"(?i)Comments",
    r"(?i)Glen Rock",
    r"(?i)Parent/Guardian",
    r"(?i)Total Credits",
    r"(?i)Additional Information",
    r"(?i)Congratulations",
    r"(?i)Phone",
    r"(?i)School\s+Phone",
    r"(?i)Counselor",
    r"(?i)Homeroom",
    r"(?i)^[0-9]+\s+(Shows|Should|Is a|Works|Takes|Displays|Strong|Active|Consistent|Demonstrates|Excellent|Enthusiastic|Highly|Good|Not enough|Needs|Pleasure|Outstanding)",
    // grading scale legend, e.g. "A+ = 97-100"
    r"^[A-Z][+-]?\s*=\s*[0-9]",
    r"(?i)Earned\s+Credits",
    r"^#$",
    // student id
    r"^[0-9]{6}$",
    r"(?i)Iris Circle",
    r"07452",
];

/// Course name prefixes tried against a row's first fragment. Group 1 is the
/// name. The last entry accepts any run of ASCII word characters.
pub const COURSE_NAME_PATTERN_SOURCES: &[&str] = &[
    r"(?i)^(AP\s+[0-9A-Za-z_\s&:./]+)",
    r"(?i)^(Hon\s+[0-9A-Za-z_\s&:./]+)",
    r"(?i)^(H\s+[0-9A-Za-z_\s&:./]+)",
    r"(?i)^(Adv[.\s]+[0-9A-Za-z_\s&:./]+)",
    r"(?i)^(Physical\s+Ed[.\s]*[0-9]*)",
    r"(?i)^(Health\s*[0-9]*)",
    r"(?i)^(Drivers\s+Ed[.\s]*[0-9]*)",
    r"(?i)^(English\s*[0-9]*)",
    r"(?i)^(French\s+[IVX0-9]+)",
    r"(?i)^(Spanish\s+[IVX0-9]+)",
    r"(?i)^(Latin\s+[IVX0-9]+)",
    r"(?i)^(Algebra\s+[0-9A-Za-z_\s]+)",
    r"(?i)^(Geometry[0-9A-Za-z_\s]*)",
    r"(?i)^(Pre-?Calc[0-9A-Za-z_\s]*)",
    r"(?i)^(Calculus[0-9A-Za-z_\s]*)",
    r"(?i)^(Chemistry[0-9A-Za-z_\s]*)",
    r"(?i)^(Biology[0-9A-Za-z_\s]*)",
    r"(?i)^(Physics[0-9A-Za-z_\s]*)",
    r"(?i)^(World\s+Hist[0-9A-Za-z_\s]*)",
    r"(?i)^(US\s+Hist?[0-9A-Za-z_\s]*)",
    r"(?i)^(Intro\s+to[0-9A-Za-z_\s.]+)",
    r"(?i)^(Economics)",
    r"(?i)^(Comp\s+Sci[0-9A-Za-z_\s]*)",
    r"(?i)^(Web\s+Design)",
    r"(?i)^(Pre-Eng[0-9A-Za-z_\s]*)",
    r"(?i)^(Photo\s*[IV0-9]*)",
    r"(?i)^(Art\s+History)",
    r"(?i)^(Drawing\s*[&0-9A-Za-z_\s]*)",
    r"(?i)^(Sculpture)",
    r"^([0-9A-Za-z_\s&:./]+)",
];

/// Course level decision table.
pub const LEVEL_PATTERN_SOURCES: &[(&str, CourseLevel)] = &[
    (r"(?i)^AP\s", CourseLevel::Ap),
    (r"(?-u:\b)AP(?-u:\b)", CourseLevel::Ap),
    (r"(?i)^Hon\s", CourseLevel::Honors),
    (r"(?i)(?-u:\b)Honors?(?-u:\b)", CourseLevel::Honors),
    (r"(?i)^H\s", CourseLevel::Honors),
    (r"(?i)(?-u:\b)Adv(?-u:\b)", CourseLevel::Advanced),
    (r"(?i)(?-u:\b)Advanced(?-u:\b)", CourseLevel::Advanced),
];

/// Fallback credits for courses known to carry a fixed value.
pub const DEFAULT_CREDIT_SOURCES: &[(&str, f64)] = &[
    (r"(?i)Physical\s*Ed", 3.75),
    (r"(?i)^Health", 1.25),
    (r"(?i)Driver'?s?\s*Ed", 1.25),
];

pub const DEFAULT_CREDITS: f64 = 5.0;

fn compile(source: &str) -> Regex {
    Regex::new(source).unwrap_or_else(|e| panic!("invalid built-in pattern {:?}: {}", source, e))
}

pub static SKIP_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| SKIP_PATTERN_SOURCES.iter().map(|s| compile(s)).collect());

pub static COURSE_NAME_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| COURSE_NAME_PATTERN_SOURCES.iter().map(|s| compile(s)).collect());

pub static LEVEL_PATTERNS: LazyLock<Vec<(Regex, CourseLevel)>> = LazyLock::new(|| {
    LEVEL_PATTERN_SOURCES
        .iter()
        .map(|(s, level)| (compile(s), *level))
        .collect()
});

pub static DEFAULT_CREDIT_RULES: LazyLock<Vec<(Regex, f64)>> = LazyLock::new(|| {
    DEFAULT_CREDIT_SOURCES
        .iter()
        .map(|(s, credits)| (compile(s), *credits))
        .collect()
});

pub static COURSE_CODE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{4}-[0-9]+$"));
pub static BARE_DECIMAL: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]+\.[0-9]+$"));
pub static BARE_INTEGER: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]+$"));
pub static EMBEDDED_COURSE_CODE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\s+[0-9]{4}-[0-9]+.*$"));
pub static TRAILING_NUMBER: LazyLock<Regex> = LazyLock::new(|| compile(r"\s+[0-9]+\s*$"));
pub static CREDIT_TOKEN: LazyLock<Regex> = LazyLock::new(|| compile(r"^([0-9]+\.[0-9]{3})$"));
pub static YEAR_RANGE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"([0-9]{4}-[0-9]{2})(?-u:\b)"));
pub static GRADE_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?-u:\b)(09|10|11|12)(?-u:\b)"));
