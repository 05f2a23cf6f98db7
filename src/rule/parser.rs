//! Textual rule parser
//!
//! Parses the rule syntax used by view definitions:
//!
//! ```text
//! symmetric: { ?s <http://example.org/knows> ?o . }
//!         => { ?o <http://example.org/knows> ?s . } .
//! ```
//!
//! Terms are `<uri>`, `?variable`, `"literal"` (optionally `^^<datatype>`),
//! `_:label` blank nodes, or `functor(term, ...)` composites. Variable slots
//! are assigned per rule in order of first occurrence.

use indexmap::IndexMap;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::char,
    combinator::{map, opt},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::binding::MAX_VARS;
use crate::term::{Term, Triple};
use super::Rule;

/// Rule parser error type
#[derive(Debug, Clone, thiserror::Error)]
pub enum RuleParseError {
    #[error("Syntax error at offset {offset}")]
    Syntax { offset: usize },

    #[error("Rule uses {count} variables, more than the supported {max}")]
    TooManyVariables { count: usize, max: usize },

    #[error("Unexpected end of input")]
    UnexpectedEof,
}

// ============================================================================
// Raw syntax tree
// ============================================================================

#[derive(Debug, Clone)]
enum RawTerm {
    Uri(String),
    Var(String),
    Blank(String),
    Literal { value: String, datatype: Option<String> },
    Functor(String, Vec<RawTerm>),
}

struct RawRule {
    name: Option<String>,
    body: Vec<[RawTerm; 3]>,
    heads: Vec<[RawTerm; 3]>,
}

// ============================================================================
// nom combinators
// ============================================================================

fn ws(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_whitespace())(input)
}

fn ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

fn uri_body(input: &str) -> IResult<&str, &str> {
    delimited(char('<'), take_while1(|c| c != '>'), char('>'))(input)
}

fn uri_term(input: &str) -> IResult<&str, RawTerm> {
    map(uri_body, |s: &str| RawTerm::Uri(s.to_string()))(input)
}

fn var_term(input: &str) -> IResult<&str, RawTerm> {
    map(preceded(char('?'), ident), |s: &str| {
        RawTerm::Var(s.to_string())
    })(input)
}

fn blank_term(input: &str) -> IResult<&str, RawTerm> {
    map(preceded(tag("_:"), ident), |s: &str| {
        RawTerm::Blank(s.to_string())
    })(input)
}

fn literal_term(input: &str) -> IResult<&str, RawTerm> {
    map(
        pair(
            delimited(char('"'), take_while(|c| c != '"'), char('"')),
            opt(preceded(tag("^^"), uri_body)),
        ),
        |(value, datatype): (&str, Option<&str>)| RawTerm::Literal {
            value: value.to_string(),
            datatype: datatype.map(|d| d.to_string()),
        },
    )(input)
}

fn functor_term(input: &str) -> IResult<&str, RawTerm> {
    map(
        pair(
            ident,
            delimited(
                char('('),
                separated_list0(delimited(ws, char(','), ws), preceded(ws, raw_term)),
                preceded(ws, char(')')),
            ),
        ),
        |(name, args): (&str, Vec<RawTerm>)| RawTerm::Functor(name.to_string(), args),
    )(input)
}

fn raw_term(input: &str) -> IResult<&str, RawTerm> {
    alt((uri_term, var_term, blank_term, literal_term, functor_term))(input)
}

// The separating dot is optional before a closing brace, so one-pattern
// blocks read naturally as `{ ?s <p> ?o }`.
fn raw_pattern(input: &str) -> IResult<&str, [RawTerm; 3]> {
    map(
        tuple((
            terminated(raw_term, ws),
            terminated(raw_term, ws),
            terminated(raw_term, ws),
            opt(char('.')),
        )),
        |(s, p, o, _)| [s, p, o],
    )(input)
}

fn pattern_block(input: &str) -> IResult<&str, Vec<[RawTerm; 3]>> {
    delimited(
        char('{'),
        many0(preceded(ws, raw_pattern)),
        preceded(ws, char('}')),
    )(input)
}

fn raw_rule(input: &str) -> IResult<&str, RawRule> {
    map(
        tuple((
            opt(terminated(ident, tuple((ws, char(':'), ws)))),
            pattern_block,
            preceded(ws, tag("=>")),
            preceded(ws, pattern_block),
            preceded(ws, char('.')),
        )),
        |(name, body, _, heads, _)| RawRule {
            name: name.map(|n: &str| n.to_string()),
            body,
            heads,
        },
    )(input)
}

// ============================================================================
// Slot assignment
// ============================================================================

fn resolve_term(
    raw: &RawTerm,
    slots: &mut IndexMap<String, usize>,
) -> Result<Term, RuleParseError> {
    match raw {
        RawTerm::Uri(u) => Ok(Term::uri(u.clone())),
        RawTerm::Blank(label) => Ok(Term::blank(label.clone())),
        RawTerm::Literal { value, datatype } => Ok(match datatype {
            Some(dt) => Term::typed_literal(value.clone(), dt.clone()),
            None => Term::literal(value.clone()),
        }),
        RawTerm::Var(name) => {
            let next = slots.len();
            let slot = *slots.entry(name.clone()).or_insert(next);
            if slot >= MAX_VARS {
                return Err(RuleParseError::TooManyVariables {
                    count: slots.len(),
                    max: MAX_VARS,
                });
            }
            Ok(Term::var(slot, name.clone()))
        }
        RawTerm::Functor(name, args) => {
            let mut resolved = Vec::with_capacity(args.len());
            for arg in args {
                resolved.push(resolve_term(arg, slots)?);
            }
            Ok(Term::functor(name.clone(), resolved))
        }
    }
}

fn resolve_rule(raw: RawRule) -> Result<Rule, RuleParseError> {
    let mut slots: IndexMap<String, usize> = IndexMap::new();
    let resolve_block = |block: &[[RawTerm; 3]],
                             slots: &mut IndexMap<String, usize>|
     -> Result<Vec<Triple>, RuleParseError> {
        block
            .iter()
            .map(|[s, p, o]| {
                Ok(Triple::new(
                    resolve_term(s, slots)?,
                    resolve_term(p, slots)?,
                    resolve_term(o, slots)?,
                ))
            })
            .collect()
    };

    let body = resolve_block(&raw.body, &mut slots)?;
    let heads = resolve_block(&raw.heads, &mut slots)?;

    // Slot bound already enforced above, so construction cannot fail
    let mut rule = Rule::new(body, heads).map_err(|_| RuleParseError::TooManyVariables {
        count: slots.len(),
        max: MAX_VARS,
    })?;
    rule.name = raw.name;
    Ok(rule)
}

// ============================================================================
// Public entry points
// ============================================================================

/// Parse a single rule from text
pub fn parse_rule(input: &str) -> Result<Rule, RuleParseError> {
    let rules = parse_rules(input)?;
    rules.into_iter().next().ok_or(RuleParseError::UnexpectedEof)
}

/// Parse a sequence of rules from text
pub fn parse_rules(input: &str) -> Result<Vec<Rule>, RuleParseError> {
    let mut rules = Vec::new();
    let mut rest = input;

    loop {
        let (after_ws, _) = ws(rest).map_err(|_: nom::Err<nom::error::Error<&str>>| {
            RuleParseError::Syntax {
                offset: input.len() - rest.len(),
            }
        })?;
        if after_ws.is_empty() {
            break;
        }
        match raw_rule(after_ws) {
            Ok((remaining, raw)) => {
                rules.push(resolve_rule(raw)?);
                rest = remaining;
            }
            Err(_) => {
                return Err(RuleParseError::Syntax {
                    offset: input.len() - after_ws.len(),
                });
            }
        }
    }

    Ok(rules)
}
