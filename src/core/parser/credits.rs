use crate::core::parser::patterns::{CREDIT_TOKEN, DEFAULT_CREDITS, DEFAULT_CREDIT_RULES};
use crate::domain::model::Credits;

pub const MIN_CREDITS: f64 = 1.0;
pub const MAX_CREDITS: f64 = 10.0;

/// Rightmost `d.ddd` token with a value in `[1, 10]`.
pub fn extract_credits(texts: &[&str]) -> Option<Credits> {
    texts.iter().rev().find_map(|text| {
        let caps = CREDIT_TOKEN.captures(text)?;
        let value: f64 = caps[1].parse().ok()?;
        if (MIN_CREDITS..=MAX_CREDITS).contains(&value) {
            Credits::new(value)
        } else {
            None
        }
    })
}

/// Fixed credit value used when a row carries no usable credit token.
pub fn default_credits(course_name: &str) -> Credits {
    let value = DEFAULT_CREDIT_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(course_name))
        .map(|(_, credits)| *credits)
        .unwrap_or(DEFAULT_CREDITS);
    Credits(value)
}

pub fn resolve_credits(texts: &[&str], course_name: &str) -> Credits {
    extract_credits(texts).unwrap_or_else(|| {
        tracing::trace!("No credit token for '{}', using default", course_name);
        default_credits(course_name)
    })
}
