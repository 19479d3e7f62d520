// src/evaluator.rs

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Empty or non-numeric; the submit control stays disabled.
    NotSubmittable,
    Correct,
    Wrong,
}

/// Parses player text as a finite number. Surrounding whitespace is ignored.
pub fn parse_answer(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn is_submittable(raw: &str) -> bool {
    parse_answer(raw).is_some()
}

/// Numeric comparison, exact after parsing: "4.0" matches 4.
pub fn evaluate(raw: &str, expected: f64) -> Evaluation {
    match parse_answer(raw) {
        None => Evaluation::NotSubmittable,
        Some(v) if v == expected => Evaluation::Correct,
        Some(_) => Evaluation::Wrong,
    }
}
