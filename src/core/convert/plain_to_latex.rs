//! Plain text → LaTeX, used when an author finishes an edit.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::{collapse_whitespace, run_pipeline, Rule};

lazy_static! {
    static ref SLASH_FRACTION: Regex = Regex::new(r"\(([^()\s]+)/([^()\s]+)\)").unwrap();
    static ref SQRT_CALL: Regex = Regex::new(r"sqrt\(([^()]+)\)").unwrap();
    static ref DERIVATIVE: Regex = Regex::new(r"d/d([A-Za-z])").unwrap();
    static ref EXPONENT: Regex = Regex::new(r"([A-Za-z0-9])\^([A-Za-z0-9]+)").unwrap();
    static ref GREEK_WORD: Regex =
        Regex::new(r"\b(alpha|beta|gamma|delta|theta|lambda|pi|sigma|omega)\b").unwrap();
    static ref INT_WORD: Regex = Regex::new(r"\bint\b").unwrap();
}

/// Commands whose presence makes the result math. Substring tests.
pub const MATH_TRIGGERS: &[&str] = &[
    "\\frac", "\\sqrt", "^", "\\int", "\\alpha", "\\beta", "\\gamma", "\\pi",
];

/// The rules, in application order.
pub const PIPELINE: &[Rule] = &[
    Rule {
        name: "trim",
        apply: trim,
    },
    Rule {
        name: "fraction",
        apply: slash_to_frac,
    },
    Rule {
        name: "sqrt",
        apply: call_to_sqrt,
    },
    Rule {
        name: "derivative",
        apply: derivative_to_frac,
    },
    Rule {
        name: "exponent",
        apply: brace_exponents,
    },
    Rule {
        name: "greek",
        apply: greek_to_commands,
    },
    Rule {
        name: "int",
        apply: int_to_command,
    },
    Rule {
        name: "whitespace",
        apply: collapse_whitespace,
    },
    Rule {
        name: "wrap",
        apply: wrap_if_math,
    },
];

/// Convert informally typed math into best-effort LaTeX.
///
/// The result is wrapped in `$…$` only when it contains one of
/// [`MATH_TRIGGERS`].
///
/// # Example
///
/// ```
/// use mixtex::plain_to_latex;
///
/// assert_eq!(plain_to_latex("(1/2)"), r"$\frac{1}{2}$");
/// assert_eq!(plain_to_latex("x^10"), "$x^{10}$");
/// ```
pub fn plain_to_latex(input: &str) -> String {
    run_pipeline(PIPELINE, input)
}

pub fn trim(input: &str) -> String {
    input.trim().to_string()
}

/// `(X/Y)` → `\frac{X}{Y}` when neither side has parentheses or spaces
pub fn slash_to_frac(input: &str) -> String {
    SLASH_FRACTION
        .replace_all(input, r"\frac{${1}}{${2}}")
        .into_owned()
}

/// `sqrt(X)` → `\sqrt{X}` when X has no parentheses
pub fn call_to_sqrt(input: &str) -> String {
    SQRT_CALL.replace_all(input, r"\sqrt{${1}}").into_owned()
}

/// `d/dx` → `\frac{d}{dx}` for any single-letter variable
pub fn derivative_to_frac(input: &str) -> String {
    DERIVATIVE
        .replace_all(input, r"\frac{d}{d${1}}")
        .into_owned()
}

/// `x^10` → `x^{10}`; single-character exponents stay bare.
pub fn brace_exponents(input: &str) -> String {
    EXPONENT
        .replace_all(input, |caps: &Captures| {
            let exp = &caps[2];
            if exp.len() > 1 {
                format!("{}^{{{}}}", &caps[1], exp)
            } else {
                format!("{}^{}", &caps[1], exp)
            }
        })
        .into_owned()
}

pub fn greek_to_commands(input: &str) -> String {
    GREEK_WORD.replace_all(input, r"\${1}").into_owned()
}

pub fn int_to_command(input: &str) -> String {
    INT_WORD.replace_all(input, r"\int").into_owned()
}

pub fn wrap_if_math(input: &str) -> String {
    if MATH_TRIGGERS.iter().any(|t| input.contains(t)) {
        format!("${}$", input)
    } else {
        input.to_string()
    }
}
