use crate::core::parser::patterns::LEVEL_PATTERNS;
use crate::domain::model::CourseLevel;

/// First matching level pattern wins; unmatched names are CP.
pub fn detect_level(course_name: &str) -> CourseLevel {
    LEVEL_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(course_name))
        .map(|(_, level)| *level)
        .unwrap_or_default()
}
