//! Parser for compact model references.
//!
//! A model reference names a model and optionally attaches capability flags and
//! provider constraints to it. In BNF:
//! ```text
//! <reference>  := [ <author> "/" ] <model> [ "(" [ <clause> { "," <clause> } ] ")" ]
//! <clause>     := <capability> | <field> <operator> <value>
//! <operator>   := "<" | ">" | "<=" | ">=" | "="
//! ```
//!
//! For example, `test/model-1(reasoning,tools)` requests `model-1` by `test` with the
//! `reasoning` and `tools` capabilities, and `test/model-1(cost<1)` constrains the
//! `cost` field of candidate providers to be below one. Whitespace around the
//! separators is insignificant.
//!
//! Parsing never consults the registry or the alias table.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReferenceError {
    #[error("the model reference is empty")]
    Empty,
    #[error("the model reference \"{0}\" does not name a model")]
    EmptyModel(String),
    #[error("the model reference \"{0}\" has an empty author")]
    EmptyAuthor(String),
    #[error("the model reference \"{0}\" has unbalanced parentheses")]
    UnbalancedParentheses(String),
    #[error("the model reference \"{0}\" has trailing text after the closing parenthesis")]
    TrailingText(String),
    #[error("the model reference \"{0}\" contains an empty clause")]
    EmptyClause(String),
    #[error("the clause \"{clause}\" in \"{reference}\" has an empty {side}")]
    IncompleteConstraint {
        reference: String,
        clause: String,
        side: &'static str,
    },
}

/// A comparison operator in a provider constraint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Comparison {
    Eq,
    Lt,
    Gt,
    Lte,
    Gte,
}

impl Comparison {
    /// The operator as it appears in a reference
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Lt => "<",
            Comparison::Gt => ">",
            Comparison::Lte => "<=",
            Comparison::Gte => ">=",
        }
    }

    /// Finds the first operator in `clause` and its byte offset. At that offset the
    /// longest matching symbol wins, so `<=` is preferred over `<`.
    fn find(clause: &str) -> Option<(usize, Comparison)> {
        let pos = clause.find(['<', '>', '='])?;
        let rest = &clause[pos..];

        let op = Comparison::iter()
            .filter(|op| rest.starts_with(op.symbol()))
            .max_by_key(|op| op.symbol().len())?;

        Some((pos, op))
    }
}

/// A provider constraint such as `cost<1`. The value is kept verbatim; it is up
/// to the consumer to interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constraint {
    pub field: String,
    #[serde(rename = "type")]
    pub comparison: Comparison,
    pub value: String,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.comparison.symbol(), self.value)
    }
}

/// One entry in the parenthesized list of a reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Capability(String),
    Constraint(Constraint),
}

impl Clause {
    fn parse(reference: &str, clause: &str) -> Result<Clause, MalformedReferenceError> {
        let clause = clause.trim();

        if clause.is_empty() {
            return Err(MalformedReferenceError::EmptyClause(reference.to_string()));
        }

        let (pos, comparison) = match Comparison::find(clause) {
            Some(op) => op,
            None => return Ok(Clause::Capability(clause.to_string())),
        };

        let field = clause[..pos].trim();
        let value = clause[pos + comparison.symbol().len()..].trim();

        let incomplete = |side| MalformedReferenceError::IncompleteConstraint {
            reference: reference.to_string(),
            clause: clause.to_string(),
            side,
        };

        if field.is_empty() {
            return Err(incomplete("field"));
        }

        if value.is_empty() {
            return Err(incomplete("value"));
        }

        Ok(Clause::Constraint(Constraint {
            field: field.to_string(),
            comparison,
            value: value.to_string(),
        }))
    }
}

/// The structured form of a model reference
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub model: String,
    pub capabilities: BTreeMap<String, bool>,
    pub provider_constraints: Vec<Constraint>,
}

impl ParsedReference {
    /// Parse a reference such as `author/model(capability,field<value)`.
    pub fn parse(input: &str) -> Result<ParsedReference, MalformedReferenceError> {
        let reference = input.trim();

        if reference.is_empty() {
            return Err(MalformedReferenceError::Empty);
        }

        let unbalanced = || MalformedReferenceError::UnbalancedParentheses(reference.to_string());

        let (head, clauses) = match reference.find('(') {
            Some(open) => {
                if reference[..open].contains(')') {
                    return Err(unbalanced());
                }

                let rest = &reference[open + 1..];

                let close = rest.find(')').ok_or_else(unbalanced)?;
                let list = &rest[..close];

                if list.contains('(') {
                    return Err(unbalanced());
                }

                let trailing = rest[close + 1..].trim();

                if trailing.contains(')') {
                    return Err(unbalanced());
                } else if !trailing.is_empty() {
                    return Err(MalformedReferenceError::TrailingText(reference.to_string()));
                }

                (&reference[..open], Some(list))
            }
            None if reference.contains(')') => return Err(unbalanced()),
            None => (reference, None),
        };

        let (author, model) = match head.split_once('/') {
            Some((author, model)) => {
                let author = author.trim();

                if author.is_empty() {
                    return Err(MalformedReferenceError::EmptyAuthor(reference.to_string()));
                }

                (Some(author.to_string()), model.trim())
            }
            None => (None, head.trim()),
        };

        if model.is_empty() {
            return Err(MalformedReferenceError::EmptyModel(reference.to_string()));
        }

        let mut parsed = ParsedReference {
            author,
            model: model.to_string(),
            ..Default::default()
        };

        // "()" carries no clauses
        if let Some(list) = clauses.filter(|list| !list.trim().is_empty()) {
            for clause in list.split(',') {
                match Clause::parse(reference, clause)? {
                    Clause::Capability(name) => {
                        parsed.capabilities.insert(name, true);
                    }
                    Clause::Constraint(constraint) => {
                        parsed.provider_constraints.push(constraint);
                    }
                }
            }
        }

        Ok(parsed)
    }

    /// The `author/model` slug, if an author was given
    pub fn slug(&self) -> Option<String> {
        self.author
            .as_ref()
            .map(|author| format!("{}/{}", author, self.model))
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains_key(capability)
    }
}

impl FromStr for ParsedReference {
    type Err = MalformedReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParsedReference::parse(s)
    }
}

impl fmt::Display for ParsedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(author) = &self.author {
            write!(f, "{}/", author)?;
        }

        write!(f, "{}", self.model)?;

        if self.capabilities.is_empty() && self.provider_constraints.is_empty() {
            return Ok(());
        }

        let clauses: Vec<String> = self
            .capabilities
            .keys()
            .cloned()
            .chain(self.provider_constraints.iter().map(|c| c.to_string()))
            .collect();

        write!(f, "({})", clauses.join(","))
    }
}

/// Shorthand for [`ParsedReference::parse`]
pub fn parse(input: &str) -> Result<ParsedReference, MalformedReferenceError> {
    ParsedReference::parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraint(field: &str, comparison: Comparison, value: &str) -> Constraint {
        Constraint {
            field: field.to_string(),
            comparison,
            value: value.to_string(),
        }
    }

    #[test]
    fn plain_slug() {
        for (input, author, model) in [
            ("test/model-1", "test", "model-1"),
            ("openai/gpt-4o", "openai", "gpt-4o"),
            ("anthropic/claude-3.5-sonnet", "anthropic", "claude-3.5-sonnet"),
        ] {
            let parsed = parse(input).unwrap();

            assert_eq!(parsed.author.as_deref(), Some(author));
            assert_eq!(parsed.model, model);
            assert!(parsed.capabilities.is_empty());
            assert!(parsed.provider_constraints.is_empty());
        }
    }

    #[test]
    fn bare_model_has_no_author() {
        let parsed = parse("gpt-4o").unwrap();

        assert_eq!(parsed.author, None);
        assert_eq!(parsed.model, "gpt-4o");
        assert_eq!(parsed.slug(), None);
    }

    #[test]
    fn capabilities() {
        let parsed = parse("test/model-1(reasoning,tools)").unwrap();

        assert_eq!(parsed.author.as_deref(), Some("test"));
        assert_eq!(parsed.model, "model-1");
        assert_eq!(parsed.capabilities.get("reasoning"), Some(&true));
        assert_eq!(parsed.capabilities.get("tools"), Some(&true));
        assert_eq!(parsed.capabilities.len(), 2);
        assert!(parsed.provider_constraints.is_empty());
    }

    #[test]
    fn duplicate_capabilities_collapse() {
        let parsed = parse("test/model-1(tools, tools)").unwrap();

        assert_eq!(parsed.capabilities.len(), 1);
    }

    #[test]
    fn constraint_less_than() {
        let parsed = parse("test/model-1(cost<1)").unwrap();

        assert!(parsed.capabilities.is_empty());
        assert_eq!(
            parsed.provider_constraints,
            vec![constraint("cost", Comparison::Lt, "1")]
        );
    }

    #[test]
    fn every_operator() {
        let parsed = parse("a/b(w=1, x<2, y>3, z<=4, v>=5)").unwrap();

        assert_eq!(
            parsed.provider_constraints,
            vec![
                constraint("w", Comparison::Eq, "1"),
                constraint("x", Comparison::Lt, "2"),
                constraint("y", Comparison::Gt, "3"),
                constraint("z", Comparison::Lte, "4"),
                constraint("v", Comparison::Gte, "5"),
            ]
        );
    }

    #[test]
    fn split_on_first_operator() {
        let parsed = parse("a/b(region=eu<west)").unwrap();

        assert_eq!(
            parsed.provider_constraints,
            vec![constraint("region", Comparison::Eq, "eu<west")]
        );
    }

    #[test]
    fn doubled_operator_keeps_the_rest_in_the_value() {
        let parsed = parse("a/b(c==1, d<==2, e=>3)").unwrap();

        assert_eq!(
            parsed.provider_constraints,
            vec![
                constraint("c", Comparison::Eq, "=1"),
                constraint("d", Comparison::Lte, "=2"),
                constraint("e", Comparison::Eq, ">3"),
            ]
        );
    }

    #[test]
    fn every_comparison_has_a_distinct_symbol() {
        for op in Comparison::iter() {
            let clause = format!("x{}1", op.symbol());

            assert_eq!(Comparison::find(&clause), Some((1, op)));
        }
    }

    #[test]
    fn mixed_clauses_keep_constraint_order() {
        let parsed = parse("test/model-1(tools, latency < 200, reasoning, cost>=0.5)").unwrap();

        assert_eq!(parsed.capabilities.len(), 2);
        assert_eq!(
            parsed.provider_constraints,
            vec![
                constraint("latency", Comparison::Lt, "200"),
                constraint("cost", Comparison::Gte, "0.5"),
            ]
        );
    }

    #[test]
    fn whitespace_is_trimmed() {
        let parsed = parse("  test / model-1 ( reasoning ,  cost <= 1 ) ").unwrap();

        assert_eq!(parsed.author.as_deref(), Some("test"));
        assert_eq!(parsed.model, "model-1");
        assert!(parsed.has_capability("reasoning"));
        assert_eq!(
            parsed.provider_constraints,
            vec![constraint("cost", Comparison::Lte, "1")]
        );
    }

    #[test]
    fn slash_in_clause_is_not_an_author() {
        let parsed = parse("model-1(format=a/b)").unwrap();

        assert_eq!(parsed.author, None);
        assert_eq!(parsed.model, "model-1");
        assert_eq!(parsed.provider_constraints[0].value, "a/b");
    }

    #[test]
    fn model_keeps_later_slashes() {
        let parsed = parse("openrouter/meta-llama/llama-3").unwrap();

        assert_eq!(parsed.author.as_deref(), Some("openrouter"));
        assert_eq!(parsed.model, "meta-llama/llama-3");
    }

    #[test]
    fn empty_parentheses() {
        let parsed = parse("test/model-1()").unwrap();

        assert!(parsed.capabilities.is_empty());
        assert!(parsed.provider_constraints.is_empty());
    }

    #[test]
    fn malformed() {
        use MalformedReferenceError as E;

        let cases: &[(&str, fn(&E) -> bool)] = &[
            ("", |e| matches!(e, E::Empty)),
            ("   ", |e| matches!(e, E::Empty)),
            ("test/", |e| matches!(e, E::EmptyModel(_))),
            ("test/(tools)", |e| matches!(e, E::EmptyModel(_))),
            ("(tools)", |e| matches!(e, E::EmptyModel(_))),
            ("/model-1", |e| matches!(e, E::EmptyAuthor(_))),
            ("test/model-1(tools", |e| matches!(e, E::UnbalancedParentheses(_))),
            ("test/model-1tools)", |e| matches!(e, E::UnbalancedParentheses(_))),
            ("test/model-1(a(b))", |e| matches!(e, E::UnbalancedParentheses(_))),
            ("test/model-1(a))", |e| matches!(e, E::UnbalancedParentheses(_))),
            ("a/b)(x)", |e| matches!(e, E::UnbalancedParentheses(_))),
            ("a)/b(x)", |e| matches!(e, E::UnbalancedParentheses(_))),
            ("test/model-1(a)b", |e| matches!(e, E::TrailingText(_))),
            ("test/model-1(a,,b)", |e| matches!(e, E::EmptyClause(_))),
            ("test/model-1(a,)", |e| matches!(e, E::EmptyClause(_))),
            ("test/model-1(<1)", |e| {
                matches!(e, E::IncompleteConstraint { side: "field", .. })
            }),
            ("test/model-1(cost>=)", |e| {
                matches!(e, E::IncompleteConstraint { side: "value", .. })
            }),
        ];

        for (input, check) in cases {
            let err = parse(input).unwrap_err();

            assert!(check(&err), "unexpected error for {:?}: {:?}", input, err);
        }
    }

    #[test]
    fn display_is_canonical() {
        let parsed: ParsedReference = " test/model-1 ( tools, cost < 1, reasoning ) "
            .parse()
            .unwrap();

        assert_eq!(parsed.to_string(), "test/model-1(reasoning,tools,cost<1)");
        assert_eq!(parse("gpt-4o").unwrap().to_string(), "gpt-4o");
    }

    #[test]
    fn serializes_with_wire_names() {
        let parsed = parse("test/model-1(tools,cost<1)").unwrap();

        let json = serde_json::to_value(&parsed).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "author": "test",
                "model": "model-1",
                "capabilities": { "tools": true },
                "providerConstraints": [{ "field": "cost", "type": "lt", "value": "1" }],
            })
        );
    }

    #[test]
    fn comparison_names() {
        assert_eq!(Comparison::Lte.to_string(), "lte");
        assert_eq!(Comparison::from_str("gte").unwrap(), Comparison::Gte);
    }
}
