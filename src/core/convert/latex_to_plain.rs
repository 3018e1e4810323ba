//! LaTeX → plain text, used when an author starts editing existing content.

use lazy_static::lazy_static;
use regex::Regex;

use super::{collapse_whitespace, run_pipeline, Rule};

lazy_static! {
    static ref FRAC: Regex = Regex::new(r"\\frac\{([^}]*)\}\{([^}]*)\}").unwrap();
    static ref SQRT: Regex = Regex::new(r"\\sqrt\{([^}]*)\}").unwrap();
    static ref SIZED_PAREN: Regex = Regex::new(r"\\(?:left|right)\s*[()]").unwrap();
}

/// The rules, in application order.
pub const PIPELINE: &[Rule] = &[
    Rule {
        name: "strip-dollars",
        apply: strip_dollars,
    },
    Rule {
        name: "frac",
        apply: frac_to_slash,
    },
    Rule {
        name: "sqrt",
        apply: sqrt_to_call,
    },
    Rule {
        name: "int",
        apply: int_to_word,
    },
    Rule {
        name: "cdot",
        apply: cdot_to_star,
    },
    Rule {
        name: "pi",
        apply: pi_to_word,
    },
    Rule {
        name: "sized-parens",
        apply: drop_sized_parens,
    },
    Rule {
        name: "whitespace",
        apply: collapse_whitespace,
    },
];

/// Convert LaTeX into an editable plain approximation.
///
/// # Example
///
/// ```
/// use mixtex::latex_to_plain;
///
/// assert_eq!(latex_to_plain(r"$\frac{1}{2}$"), "(1/2)");
/// ```
pub fn latex_to_plain(input: &str) -> String {
    run_pipeline(PIPELINE, input)
}

pub fn strip_dollars(input: &str) -> String {
    input.replace('$', "")
}

/// `\frac{A}{B}` → `(A/B)`, single-level braces only
pub fn frac_to_slash(input: &str) -> String {
    FRAC.replace_all(input, "($1/$2)").into_owned()
}

/// `\sqrt{A}` → `sqrt(A)`, single-level braces only
pub fn sqrt_to_call(input: &str) -> String {
    SQRT.replace_all(input, "sqrt($1)").into_owned()
}

pub fn int_to_word(input: &str) -> String {
    input.replace("\\int", "int")
}

pub fn cdot_to_star(input: &str) -> String {
    input.replace("\\cdot", "*")
}

pub fn pi_to_word(input: &str) -> String {
    input.replace("\\pi", "pi")
}

/// Removes `\left(`, `\right)` and friends, parenthesis included.
pub fn drop_sized_parens(input: &str) -> String {
    SIZED_PAREN.replace_all(input, "").into_owned()
}
