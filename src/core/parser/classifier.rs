use crate::core::parser::credits::resolve_credits;
use crate::core::parser::level::detect_level;
use crate::core::parser::patterns::{
    BARE_DECIMAL, BARE_INTEGER, COURSE_CODE, COURSE_NAME_PATTERNS, EMBEDDED_COURSE_CODE,
    SKIP_GRADES, SKIP_PATTERNS, TRAILING_NUMBER, VALID_GRADES,
};
use crate::domain::model::{CourseRecord, LetterGrade, Row};

/// Rows carrying fewer letter grades are single-period summaries, not courses.
pub const MIN_GRADE_TOKENS: usize = 2;

pub fn is_boilerplate(row_text: &str) -> bool {
    SKIP_PATTERNS.iter().any(|pattern| pattern.is_match(row_text))
}

/// Course codes, numbers, grades and single characters never start a name.
fn can_start_name(first: &str) -> bool {
    !COURSE_CODE.is_match(first)
        && !BARE_DECIMAL.is_match(first)
        && !BARE_INTEGER.is_match(first)
        && !VALID_GRADES.contains(&first)
        && !SKIP_GRADES.contains(&first)
        && first.chars().count() > 1
}

fn match_course_name(first: &str) -> Option<&str> {
    COURSE_NAME_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(first))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn clean_course_name(raw: &str) -> String {
    let without_code = EMBEDDED_COURSE_CODE.replace(raw, "");
    let without_number = TRAILING_NUMBER.replace(&without_code, "");
    without_number.trim().to_string()
}

/// Letter grades after the name, in row order.
fn collect_grades(texts: &[&str]) -> Vec<LetterGrade> {
    texts
        .iter()
        .skip(1)
        .filter_map(|text| LetterGrade::from_token(text))
        .collect()
}

/// Classify one row. `None` means "not a course row".
pub fn classify_row(row: &Row) -> Option<CourseRecord> {
    let texts = row.texts();
    let row_text = texts.join(" ");

    if is_boilerplate(&row_text) {
        return None;
    }

    let first = *texts.first()?;
    if !can_start_name(first) {
        return None;
    }

    let name = clean_course_name(match_course_name(first)?);
    if name.chars().count() < 2 {
        return None;
    }

    let grades = collect_grades(&texts);
    if grades.len() < MIN_GRADE_TOKENS {
        return None;
    }
    // 成績單最後一個成績為期末成績
    let grade = *grades.last()?;

    let credits = resolve_credits(&texts, &name);
    let level = detect_level(&name);

    tracing::debug!(
        "Course row: {} grade={} level={} credits={}",
        name,
        grade,
        level,
        credits
    );

    Some(CourseRecord {
        id: uuid::Uuid::new_v4().to_string(),
        name,
        grade,
        level,
        credits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CourseLevel, Fragment};

    fn row(texts: &[&str]) -> Row {
        Row {
            fragments: texts
                .iter()
                .enumerate()
                .map(|(i, text)| Fragment {
                    text: text.to_string(),
                    x: i as i32 * 40,
                    y: 500,
                    width: 30.0,
                })
                .collect(),
        }
    }

    #[test]
    fn test_full_course_row() {
        let record = classify_row(&row(&["AP Biology", "5750-1", "A", "A-", "5.000"])).unwrap();
        assert_eq!(record.name, "AP Biology");
        assert_eq!(record.grade, LetterGrade::AMinus);
        assert_eq!(record.level, CourseLevel::Ap);
        assert_eq!(record.credits.to_string(), "5");
        assert!(!record.id.is_empty());
    }

    #[test]
    fn test_single_grade_row_is_rejected() {
        assert!(classify_row(&row(&["Chemistry", "B+", "5.000"])).is_none());
        assert!(classify_row(&row(&["Chemistry", "B+", "A", "5.000"])).is_some());
    }

    #[test]
    fn test_last_grade_wins() {
        let record = classify_row(&row(&["English 11", "A", "A-", "B+"])).unwrap();
        assert_eq!(record.grade, LetterGrade::BPlus);
    }

    #[test]
    fn test_header_row_is_rejected() {
        assert!(classify_row(&row(&["Subject", "Teacher", "Grade", "Credits"])).is_none());
        assert!(is_boilerplate("Subject Teacher Grade Credits"));
    }

    #[test]
    fn test_grading_scale_legend_is_rejected() {
        assert!(classify_row(&row(&["A+ = 97-100", "A", "B"])).is_none());
    }

    #[test]
    fn test_narrative_comment_is_rejected() {
        assert!(is_boilerplate("12 Shows great effort"));
        assert!(!is_boilerplate("Geometry A A 5.000"));
    }

    #[test]
    fn test_first_fragment_disqualifiers() {
        assert!(classify_row(&row(&["5730-1", "A", "A"])).is_none());
        assert!(classify_row(&row(&["5.000", "A", "A"])).is_none());
        assert!(classify_row(&row(&["42", "A", "A"])).is_none());
        assert!(classify_row(&row(&["A", "A", "A"])).is_none());
        assert!(classify_row(&row(&["AUD", "A", "A"])).is_none());
        assert!(classify_row(&row(&["X", "A", "A"])).is_none());
    }

    #[test]
    fn test_name_only_from_first_fragment() {
        // grades before the name never count as the name
        let record = classify_row(&row(&["Geometry", "Mr. Smith", "B", "B-"])).unwrap();
        assert_eq!(record.name, "Geometry");
    }

    #[test]
    fn test_name_cleanup_strips_code_and_trailing_number() {
        assert_eq!(clean_course_name("US History 5730-1 MP"), "US History");
        assert_eq!(clean_course_name("Physical Ed 9"), "Physical Ed");
        assert_eq!(clean_course_name("English"), "English");
    }

    #[test]
    fn test_physical_ed_default_credits() {
        let record = classify_row(&row(&["Physical Ed 9", "A", "A"])).unwrap();
        assert_eq!(record.name, "Physical Ed");
        assert_eq!(record.credits.to_string(), "3.75");
    }

    #[test]
    fn test_unmatched_first_fragment_is_rejected() {
        assert!(classify_row(&row(&["(withdrawn)", "A", "B"])).is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = classify_row(&row(&["Economics", "A", "A"])).unwrap();
        let b = classify_row(&row(&["Economics", "A", "A"])).unwrap();
        assert_ne!(a.id, b.id);
    }
}
