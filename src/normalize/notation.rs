use regex::Regex;
use std::sync::LazyLock;

static LEFT_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\left\s*(\\\{|[(\[{|.])").expect("valid left delimiter regex"));
static RIGHT_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\right\s*(\\\}|[)\]}|.])").expect("valid right delimiter regex"));
static PRODUCT_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(cdot|times)\b").expect("valid product regex"));
static LATEX_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[,;:! ]|\\quad\b|\\qquad\b").expect("valid spacing regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Converts programmer-style solver output into display notation.
///
/// `**` becomes `^`, `sqrt(e)` becomes `\sqrt{e}`, implicit-multiplication stars
/// (`x*y`, `2*x`) are dropped and stray `$$` delimiters removed. The pass repeats
/// until nothing changes, which makes the transform idempotent.
pub fn clean_math_notation(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

// Every rewrite below lowers the count of '$', '*' or '(' characters, so the loop terminates.
fn clean_once(text: &str) -> String {
    let without_delimiters = text.replace("$$", "");
    let with_powers = without_delimiters.replace("**", "^");
    let with_roots = rewrite_sqrt(&with_powers);
    drop_implicit_stars(&with_roots)
}

fn rewrite_sqrt(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut rest = text;
    while let Some(found) = rest.find("sqrt(") {
        let open = found + "sqrt".len();
        let Some(close) = matching_paren(rest, open) else {
            break;
        };
        let head = &rest[..found];
        out.push_str(head.strip_suffix('\\').unwrap_or(head));
        out.push_str("\\sqrt{");
        out.push_str(&rest[open + 1..close]);
        out.push('}');
        rest = &rest[close + 1..];
    }
    out.push_str(rest);
    out
}

/// Byte index of the `)` closing the `(` at `open`, if balanced.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

fn drop_implicit_stars(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '*' {
            let after_operand = out.chars().last().is_some_and(|p| p.is_alphanumeric());
            let before_letter = chars.get(i + 1).is_some_and(|n| n.is_alphabetic());
            if after_operand && before_letter {
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Normalizes a typed or LaTeX expression before it is sent to the solver.
///
/// Strips `$`/`$$` wrappers, sizing commands (`\left(` → `(`), spacing commands,
/// and maps `\cdot`/`\times` to `*`. Everything else is passed through.
pub fn normalize_latex_input(text: &str) -> String {
    let trimmed = text.trim();
    let unwrapped = trimmed
        .strip_prefix("$$")
        .and_then(|s| s.strip_suffix("$$"))
        .or_else(|| trimmed.strip_prefix('$').and_then(|s| s.strip_suffix('$')))
        .unwrap_or(trimmed);

    let sized = LEFT_DELIMITER.replace_all(unwrapped, |caps: &regex::Captures| {
        delimiter_text(&caps[1])
    });
    let sized = RIGHT_DELIMITER.replace_all(&sized, |caps: &regex::Captures| {
        delimiter_text(&caps[1])
    });
    let products = PRODUCT_COMMAND.replace_all(&sized, "*");
    let spaced = LATEX_SPACING.replace_all(&products, " ");
    WHITESPACE_RUN.replace_all(&spaced, " ").trim().to_string()
}

fn delimiter_text(delimiter: &str) -> String {
    match delimiter {
        "." => String::new(),
        "\\{" => "{".to_string(),
        "\\}" => "}".to_string(),
        other => other.to_string(),
    }
}
