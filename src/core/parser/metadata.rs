use crate::core::parser::patterns::{GRADE_LEVEL, YEAR_RANGE};
use crate::domain::model::Row;

pub const PLACEHOLDER_YEAR_LABEL: &str = "Imported Year";

/// Collects the school year range and grade level of a report card.
///
/// Both values lock on first detection; later rows and pages never
/// overwrite them, so pages must be scanned in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataScanner {
    year_range: Option<String>,
    grade_level: Option<u32>,
}

impl MetadataScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scan_rows(&mut self, rows: &[Row]) {
        for row in rows {
            self.scan_text(&row.text());
        }
    }

    pub fn scan_text(&mut self, text: &str) {
        if self.year_range.is_none() {
            if let Some(caps) = YEAR_RANGE.captures(text) {
                tracing::debug!("Detected school year {}", &caps[1]);
                self.year_range = Some(caps[1].to_string());
            }
        }

        if self.grade_level.is_none() && text.contains("Grade") {
            if let Some(level) = GRADE_LEVEL
                .captures(text)
                .and_then(|caps| caps[1].parse::<u32>().ok())
            {
                tracing::debug!("Detected grade level {}", level);
                self.grade_level = Some(level);
            }
        }
    }

    pub fn year_range(&self) -> Option<&str> {
        self.year_range.as_deref()
    }

    pub fn grade_level(&self) -> Option<u32> {
        self.grade_level
    }

    pub fn year_label(&self) -> String {
        match (&self.year_range, self.grade_level) {
            (Some(range), Some(level)) => format!("{} Year ({})", grade_level_label(level), range),
            (Some(range), None) => format!("{} School Year", range),
            // 只有年級沒有學年時無法組出標籤
            (None, _) => PLACEHOLDER_YEAR_LABEL.to_string(),
        }
    }
}

pub fn grade_level_label(level: u32) -> String {
    match level {
        9 => "Freshman".to_string(),
        10 => "Sophomore".to_string(),
        11 => "Junior".to_string(),
        12 => "Senior".to_string(),
        other => format!("Grade {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_metadata_yields_placeholder() {
        let scanner = MetadataScanner::new();
        assert_eq!(scanner.year_label(), "Imported Year");
    }

    #[test]
    fn test_year_only_label() {
        let mut scanner = MetadataScanner::new();
        scanner.scan_text("Marking Period 2024-25");
        assert_eq!(scanner.year_label(), "2024-25 School Year");
    }

    #[test]
    fn test_year_and_grade_level_label() {
        let mut scanner = MetadataScanner::new();
        scanner.scan_text("2024-25 Grade 11");
        assert_eq!(scanner.year_label(), "Junior Year (2024-25)");
    }

    #[test]
    fn test_grade_level_requires_grade_word() {
        let mut scanner = MetadataScanner::new();
        scanner.scan_text("Room 11");
        assert_eq!(scanner.grade_level(), None);
        scanner.scan_text("Grade 09");
        assert_eq!(scanner.grade_level(), Some(9));
    }

    #[test]
    fn test_grade_level_without_year_keeps_placeholder() {
        let mut scanner = MetadataScanner::new();
        scanner.scan_text("Grade 12");
        assert_eq!(scanner.year_label(), "Imported Year");
    }

    #[test]
    fn test_first_match_is_locked() {
        let mut scanner = MetadataScanner::new();
        scanner.scan_text("2023-24 Grade 10");
        scanner.scan_text("2024-25 Grade 11");
        assert_eq!(scanner.year_range(), Some("2023-24"));
        assert_eq!(scanner.year_label(), "Sophomore Year (2023-24)");
    }

    #[test]
    fn test_grade_level_labels() {
        assert_eq!(grade_level_label(9), "Freshman");
        assert_eq!(grade_level_label(12), "Senior");
        assert_eq!(grade_level_label(8), "Grade 8");
    }
}
