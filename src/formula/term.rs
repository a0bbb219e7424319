//! Typed formula terms and the formula grammar.
//!
//! A formula is rendered as `response ~ term + term + ...`. The grammar is
//! deliberately small: a term is either a bare column name or one of the log
//! transforms the builder emits (`log1p`, `log10`, `log2`). Categorical
//! expansion is decided at matrix-build time from the column type, not in the
//! formula text.

use std::fmt;

use crate::error::AppError;

/// A single formula term referencing one dataset column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Raw(String),
    Log1p(String),
    Log10(String),
    Log2(String),
}

impl Term {
    /// The dataset column this term reads.
    pub fn column(&self) -> &str {
        match self {
            Term::Raw(c) | Term::Log1p(c) | Term::Log10(c) | Term::Log2(c) => c,
        }
    }

    /// Apply the term's transform to one value.
    pub fn apply(&self, v: f64) -> f64 {
        match self {
            Term::Raw(_) => v,
            Term::Log1p(_) => v.ln_1p(),
            Term::Log10(_) => v.log10(),
            Term::Log2(_) => v.log2(),
        }
    }

    /// Parse a single term (`col`, `log1p(col)`, `log10(col)`, `log2(col)`).
    pub fn parse(text: &str) -> Result<Term, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::new(2, "Empty formula term."));
        }

        for (prefix, ctor) in [
            ("log1p(", Term::Log1p as fn(String) -> Term),
            ("log10(", Term::Log10 as fn(String) -> Term),
            ("log2(", Term::Log2 as fn(String) -> Term),
        ] {
            if let Some(rest) = text.strip_prefix(prefix) {
                let Some(inner) = rest.strip_suffix(')') else {
                    return Err(AppError::new(2, format!("Unbalanced parentheses in term '{text}'.")));
                };
                return Ok(ctor(parse_column(inner)?));
            }
        }

        Ok(Term::Raw(parse_column(text)?))
    }
}

fn parse_column(text: &str) -> Result<String, AppError> {
    let text = text.trim();
    let valid = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(AppError::new(2, format!("Invalid column name '{text}' in formula.")));
    }
    Ok(text.to_string())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Raw(c) => f.write_str(c),
            Term::Log1p(c) => write!(f, "log1p({c})"),
            Term::Log10(c) => write!(f, "log10({c})"),
            Term::Log2(c) => write!(f, "log2({c})"),
        }
    }
}

/// A regression formula: one response expression and an additive term list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    pub response: Term,
    pub terms: Vec<Term>,
}

impl Formula {
    /// Parse the canonical `response ~ a + b + ...` text form.
    pub fn parse(text: &str) -> Result<Formula, AppError> {
        let Some((lhs, rhs)) = text.split_once('~') else {
            return Err(AppError::new(2, format!("Formula '{text}' is missing '~'.")));
        };

        let response = Term::parse(lhs)?;
        let terms: Result<Vec<Term>, AppError> = rhs.split('+').map(Term::parse).collect();
        let terms = terms?;
        if terms.is_empty() {
            return Err(AppError::new(2, format!("Formula '{text}' has no predictor terms.")));
        }

        Ok(Formula { response, terms })
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ ", self.response)?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_parse_and_display_round_trip() {
        for text in ["run_step", "log1p(run_step)", "log10(team_productivity)", "log2(x)"] {
            let term = Term::parse(text).unwrap();
            assert_eq!(term.to_string(), text);
        }
    }

    #[test]
    fn term_apply_transforms() {
        assert_eq!(Term::Raw("x".into()).apply(3.0), 3.0);
        assert!((Term::Log1p("x".into()).apply(0.0)).abs() < 1e-12);
        assert!((Term::Log10("x".into()).apply(100.0) - 2.0).abs() < 1e-12);
        assert!(Term::Log10("x".into()).apply(-1.0).is_nan());
    }

    #[test]
    fn term_parse_rejects_garbage() {
        assert!(Term::parse("").is_err());
        assert!(Term::parse("log10(x").is_err());
        assert!(Term::parse("a b").is_err());
    }

    #[test]
    fn formula_parse_round_trip() {
        let text = "log10(team_productivity) ~ log1p(run_step) + team_fn + team_graph_clustering";
        let formula = Formula::parse(text).unwrap();
        assert_eq!(formula.terms.len(), 3);
        assert_eq!(formula.to_string(), text);
    }

    #[test]
    fn formula_parse_requires_tilde_and_terms() {
        assert!(Formula::parse("y + x").is_err());
        assert!(Formula::parse("y ~ ").is_err());
    }
}
