use serde::{Deserialize, Serialize};

/// One integration bound, serialized as `[name, lower, upper]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, f64, f64)", into = "(String, f64, f64)")]
pub struct Interval {
    pub name: String,
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    pub fn new(name: &str, lower: f64, upper: f64) -> Self {
        Self {
            name: name.to_string(),
            lower,
            upper,
        }
    }
}

impl From<(String, f64, f64)> for Interval {
    fn from((name, lower, upper): (String, f64, f64)) -> Self {
        Self { name, lower, upper }
    }
}

impl From<Interval> for (String, f64, f64) {
    fn from(interval: Interval) -> Self {
        (interval.name, interval.lower, interval.upper)
    }
}

/// Splits on `separator` wherever it is not nested inside `()`, `[]` or `{}`.
/// Segments are trimmed; empty segments are kept so callers can count positions.
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = (depth - 1).max(0),
            c if c == separator && depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts
}

/// `"x, y z"` → `["x", "y", "z"]`.
pub fn parse_variable_list(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `"x in [0,1], y in [0,2]"` → `[("x", 0, 1), ("y", 0, 2)]`.
///
/// Fails soft: if any term is malformed the whole result is empty. Callers that
/// received non-empty input must treat an empty result as a parse failure.
pub fn parse_interval_list(text: &str) -> Vec<Interval> {
    split_top_level(text, ',')
        .into_iter()
        .filter(|term| !term.is_empty())
        .map(parse_interval)
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}

fn parse_interval(term: &str) -> Option<Interval> {
    let (name, range) = split_keyword(term, "in")?;
    let name = name.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }

    let inner = range.trim().trim_start_matches('[').trim_end_matches(']');
    let mut bounds = inner.split([',', ';']).map(str::trim);
    let lower = parse_finite(bounds.next()?)?;
    let upper = parse_finite(bounds.next()?)?;
    if bounds.next().is_some() {
        return None;
    }
    Some(Interval::new(name, lower, upper))
}

/// Splits `term` around the first occurrence of `keyword` that follows whitespace and
/// is followed by whitespace, an opening `[` or the end of the term.
fn split_keyword<'a>(term: &'a str, keyword: &str) -> Option<(&'a str, &'a str)> {
    term.match_indices(keyword).find_map(|(start, _)| {
        let end = start + keyword.len();
        let after_space = term[..start].chars().next_back().is_some_and(char::is_whitespace);
        let before_range = term[end..]
            .chars()
            .next()
            .is_none_or(|c| c.is_whitespace() || c == '[');
        (after_space && before_range).then(|| (&term[..start], &term[end..]))
    })
}

fn parse_finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `"1, -2 3.5"` → `[1.0, -2.0, 3.5]`. Non-numeric tokens become `NaN`.
pub fn parse_numeric_vector(text: &str) -> Vec<f64> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|token| token.parse::<f64>().unwrap_or(f64::NAN))
        .collect()
}

/// Drops a leading human label such as `Param:` or `Bounds:` from a segment.
pub fn strip_segment_label(segment: &str) -> &str {
    match segment.split_once(':') {
        Some((label, rest))
            if !label.trim().is_empty()
                && label.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) =>
        {
            rest.trim()
        }
        _ => segment.trim(),
    }
}
