//! Complexity estimation from surface patterns in the source text.
//!
//! Nothing here parses code. Each rule is a substring check, evaluated in a
//! fixed precedence order, so the same text always yields the same result.

use common::protocol::{CodeAnalysis, Complexity};

// ── Patterns ────────────────────────────────────────────────────────

const LOOP_KEYWORDS: [&str; 2] = ["for", "while"];
const LOG_PATTERN: &str = "log";
const ARRAY_PATTERNS: [&str; 2] = ["new Array", "[]"];

pub const NESTED_LOOP_RECOMMENDATION: &str =
    "Consider replacing nested loops with a more efficient algorithm.";
pub const DEFAULT_RECOMMENDATION: &str = "Code looks optimal for its purpose.";

/// Replacement offered whenever nested loops are detected.
pub const OPTIMIZED_SINGLE_PASS: &str = r#"// Optimized to avoid nested loops
const optimizedFunction = (arr) => {
  const map = new Map();

  // Single loop with O(n) time complexity
  for (let i = 0; i < arr.length; i++) {
    map.set(arr[i], i);
  }

  return map;
};"#;

// ── Rules ───────────────────────────────────────────────────────────

/// Occurrences of `for` and `while`, counted together.
pub fn loop_count(code: &str) -> usize {
    LOOP_KEYWORDS.iter().map(|kw| code.matches(kw).count()).sum()
}

fn has_nested_loops(code: &str) -> bool {
    loop_count(code) >= 2
}

pub fn estimate_time(code: &str) -> Complexity {
    match loop_count(code) {
        0 if code.contains(LOG_PATTERN) => Complexity::Logarithmic,
        0 | 1 => Complexity::Linear,
        _ => Complexity::Quadratic,
    }
}

pub fn estimate_space(code: &str) -> Complexity {
    if ARRAY_PATTERNS.iter().any(|p| code.contains(p)) {
        Complexity::Linear
    } else {
        Complexity::Constant
    }
}

pub fn recommend(code: &str) -> &'static str {
    if has_nested_loops(code) {
        NESTED_LOOP_RECOMMENDATION
    } else {
        DEFAULT_RECOMMENDATION
    }
}

/// Flat substitution, not a transformation: the input is echoed back unless
/// nested loops were found.
pub fn optimize(code: &str) -> String {
    if has_nested_loops(code) {
        OPTIMIZED_SINGLE_PASS.to_string()
    } else {
        code.to_string()
    }
}

pub fn analyze(code: &str) -> CodeAnalysis {
    CodeAnalysis {
        time_complexity: estimate_time(code),
        space_complexity: estimate_space(code),
        recommendation: recommend(code).to_string(),
        optimized_code: Some(optimize(code)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_loops_are_quadratic() {
        assert_eq!(estimate_time("for(;;){for(;;){}}"), Complexity::Quadratic);
        assert_eq!(estimate_time("while (a) { for (b) {} }"), Complexity::Quadratic);
        // Loop count wins over the log pattern.
        assert_eq!(
            estimate_time("for (x of xs) { for (y of ys) { console.log(x, y) } }"),
            Complexity::Quadratic
        );
    }

    #[test]
    fn test_single_loop_is_linear() {
        assert_eq!(estimate_time("for (let i = 0; i < n; i++) {}"), Complexity::Linear);
        assert_eq!(estimate_time("while (queue.length) { queue.pop() }"), Complexity::Linear);
        assert_eq!(estimate_time("for (x of xs) console.log(x)"), Complexity::Linear);
    }

    #[test]
    fn test_log_without_loops() {
        assert_eq!(estimate_time("console.log('hi')"), Complexity::Logarithmic);
        assert_eq!(estimate_time("return a + b;"), Complexity::Linear);
        assert_eq!(estimate_time(""), Complexity::Linear);
    }

    #[test]
    fn test_space_patterns() {
        assert_eq!(estimate_space("const xs = [];"), Complexity::Linear);
        assert_eq!(estimate_space("const xs = new Array(10);"), Complexity::Linear);
        assert_eq!(estimate_space("const xs = [1, 2];"), Complexity::Constant);
        assert_eq!(estimate_space(""), Complexity::Constant);
    }

    #[test]
    fn test_substring_matching_is_literal() {
        // "format" contains "for"; "before" too.
        assert_eq!(loop_count("format it before"), 2);
        assert_eq!(recommend("format it before"), NESTED_LOOP_RECOMMENDATION);
    }

    #[test]
    fn test_optimized_code() {
        let nested = "for (a) { for (b) {} }";
        assert_eq!(optimize(nested), OPTIMIZED_SINGLE_PASS);
        assert_eq!(optimize("let x = 1;"), "let x = 1;");
    }

    #[test]
    fn test_analyze_empty_input() {
        let analysis = analyze("");
        assert_eq!(analysis.time_complexity, Complexity::Linear);
        assert_eq!(analysis.space_complexity, Complexity::Constant);
        assert_eq!(analysis.recommendation, DEFAULT_RECOMMENDATION);
        assert_eq!(analysis.optimized_code.as_deref(), Some(""));
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let code = "function f(xs) { const out = []; for (x of xs) out.push(x); }";
        assert_eq!(analyze(code), analyze(code));
    }
}
