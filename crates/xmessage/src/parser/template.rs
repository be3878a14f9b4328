//! Message template parser.
//!
//! Parses template strings into a [`TokenTree`]. Handles:
//! - Literal text with `{{` / `[[` escapes
//! - Simple references: `{0}`, `{user.name}`, `{:numViews}`
//! - Case modifiers (`{user::gen}`) and gendered word forms
//!   (`{user | his, her}`)
//! - Typed constructs: `number`, `choice`, `map`, `anchor`, `link`
//! - Plural shorthands: `{count || message, messages}`
//! - Decorations: `[bold: body]`
//!
//! Parsing is a total function: templates arrive from a multi-tenant
//! content pipeline and are untrusted, so malformed syntax degrades to
//! literal text instead of failing the whole parse. Winnow combinators
//! handle the structured interior of `{...}` and `[...]`; the outer scanner
//! backtracks to literal text whenever a construct does not parse.

use std::mem;

use winnow::combinator::{opt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

use super::ast::{Branch, PluralForm, Reference, Target, Token, TokenTree};

/// Parse a template string into a token tree.
///
/// Total over any input; never fails. Parsing the same string twice yields
/// structurally equal trees, which is what makes the process-wide tree
/// cache safe.
///
/// # Example
///
/// ```
/// use xmessage::parser::{Token, parse_template};
///
/// let tree = parse_template("{0} members");
/// assert_eq!(tree.tokens.len(), 2);
/// assert_eq!(tree.tokens[1], Token::Literal(" members".to_string()));
/// ```
pub fn parse_template(input: &str) -> TokenTree {
    let mut rest = input;
    TokenTree {
        tokens: scan_tokens(&mut rest, &[]),
    }
}

/// Scan tokens until end of input or an unconsumed stop character.
///
/// `stops` is empty at the top level; branch bodies stop at `|` and `}`,
/// decoration bodies at `]`. Stop characters are left in the input for the
/// enclosing construct to consume.
fn scan_tokens(input: &mut &str, stops: &[char]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();

    while let Some(c) = input.chars().next() {
        if stops.contains(&c) {
            break;
        }

        // Doubled delimiters escape to the literal character. Closer
        // escapes are unreachable where the closer is a stop character,
        // which is exactly where they must not apply.
        if let Some(rest) = strip_escape(input) {
            literal.push(c);
            *input = rest;
            continue;
        }

        if c == '{' || c == '[' {
            let mut attempt = *input;
            let parsed = if c == '{' {
                construct(&mut attempt)
            } else {
                decoration(&mut attempt)
            };
            if let Ok(token) = parsed {
                flush_literal(&mut literal, &mut tokens);
                tokens.push(token);
                *input = attempt;
                continue;
            }
            if stops.is_empty() {
                // Unmatched opener at the top level: the remainder is
                // literal text.
                literal.push_str(input);
                *input = "";
                break;
            }
            // Inside a body, degrade just the opener to a literal character
            // and keep scanning.
        }

        literal.push(c);
        *input = &input[c.len_utf8()..];
    }

    flush_literal(&mut literal, &mut tokens);
    tokens
}

/// If `input` starts with a doubled delimiter, return the input after it.
fn strip_escape<'i>(input: &&'i str) -> Option<&'i str> {
    for escape in ["{{", "}}", "[[", "]]"] {
        if input.starts_with(escape) {
            return Some(&input[2..]);
        }
    }
    None
}

fn flush_literal(literal: &mut String, tokens: &mut Vec<Token>) {
    if !literal.is_empty() {
        tokens.push(Token::Literal(mem::take(literal)));
    }
}

fn backtrack() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}

/// Parse a `{...}` construct.
fn construct(input: &mut &str) -> ModalResult<Token> {
    '{'.parse_next(input)?;
    ws(input)?;
    let target = target(input)?;
    let case: Option<&str> = opt(preceded("::", identifier)).parse_next(input)?;
    ws(input)?;

    // `||` must be tried before `|`.
    if opt("||").parse_next(input)?.is_some() {
        let forms = shorthand_forms(input)?;
        let reference = Reference {
            target,
            case: case.map(ToString::to_string),
            gender_forms: Vec::new(),
        };
        if forms.is_empty() {
            return Ok(Token::Param { reference });
        }
        return Ok(Token::PluralShorthand { reference, forms });
    }

    if opt('|').parse_next(input)?.is_some() {
        let gender_forms = gender_forms(input)?;
        return Ok(Token::Param {
            reference: Reference {
                target,
                case: case.map(ToString::to_string),
                gender_forms,
            },
        });
    }

    let reference = Reference {
        target,
        case: case.map(ToString::to_string),
        gender_forms: Vec::new(),
    };

    if opt(',').parse_next(input)?.is_some() {
        ws(input)?;
        let kind: &str = identifier.parse_next(input)?;
        ws(input)?;
        return typed_construct(input, kind, reference);
    }

    '}'.parse_next(input)?;
    Ok(Token::Param { reference })
}

/// Parse the tail of a typed construct after its keyword.
fn typed_construct(input: &mut &str, kind: &str, reference: Reference) -> ModalResult<Token> {
    match kind {
        "number" => {
            let style: Option<&str> =
                opt(preceded((',', ws), identifier)).parse_next(input)?;
            ws(input)?;
            '}'.parse_next(input)?;
            Ok(Token::Number {
                reference,
                style: style.map(ToString::to_string),
            })
        }
        "choice" | "map" | "anchor" | "link" => {
            let branches = if opt(',').parse_next(input)?.is_some() {
                branches(input)?
            } else {
                '}'.parse_next(input)?;
                Vec::new()
            };
            if branches.is_empty() {
                // Degrade an empty branch list to a no-op.
                return Ok(Token::Literal(String::new()));
            }
            Ok(match kind {
                "choice" => Token::Choice {
                    reference,
                    branches,
                },
                "map" => Token::Map {
                    reference,
                    branches,
                },
                _ => Token::Anchor {
                    reference,
                    branches,
                },
            })
        }
        _ => {
            // Unknown type keyword: consume the balanced construct and
            // degrade to a plain parameter.
            skip_balanced(input)?;
            Ok(Token::Param { reference })
        }
    }
}

/// Parse a branch list: `key#body|key#body...}` (consumes the closing brace).
fn branches(input: &mut &str) -> ModalResult<Vec<Branch>> {
    let mut out = Vec::new();
    loop {
        ws(input)?;
        if opt('}').parse_next(input)?.is_some() {
            break;
        }
        let key: &str =
            take_while(0.., |c: char| c != '#' && c != '|' && c != '}').parse_next(input)?;
        '#'.parse_next(input)?;
        let body = scan_tokens(input, &['|', '}']);
        out.push(Branch {
            key: key.trim().to_string(),
            body,
        });
        if opt('|').parse_next(input)?.is_some() {
            continue;
        }
        '}'.parse_next(input)?;
        break;
    }
    Ok(out)
}

/// Parse a `[label: body]` decoration.
fn decoration(input: &mut &str) -> ModalResult<Token> {
    '['.parse_next(input)?;
    let label: &str =
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)?;
    ':'.parse_next(input)?;
    ws(input)?;
    let body = scan_tokens(input, &[']']);
    ']'.parse_next(input)?;
    Ok(Token::Decoration {
        label: label.to_string(),
        body,
    })
}

/// Parse shorthand forms up to and including the closing brace.
fn shorthand_forms(input: &mut &str) -> ModalResult<Vec<PluralForm>> {
    let body: &str = take_while(0.., |c: char| c != '}' && c != '{').parse_next(input)?;
    '}'.parse_next(input)?;
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(body.split(',').map(plural_form).collect())
}

/// Interpret one comma-separated shorthand piece, labeled or positional.
fn plural_form(piece: &str) -> PluralForm {
    if let Some((head, tail)) = piece.split_once(':') {
        let category = head.trim();
        if !category.is_empty()
            && category
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return PluralForm {
                category: Some(category.to_string()),
                text: tail.trim().to_string(),
            };
        }
    }
    PluralForm {
        category: None,
        text: piece.trim().to_string(),
    }
}

/// Parse gendered word forms up to and including the closing brace.
fn gender_forms(input: &mut &str) -> ModalResult<Vec<String>> {
    let body: &str = take_while(0.., |c: char| c != '}' && c != '{').parse_next(input)?;
    '}'.parse_next(input)?;
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(body.split(',').map(|s| s.trim().to_string()).collect())
}

/// Parse a reference target: a positional index or a (dot-path) name.
fn target(input: &mut &str) -> ModalResult<Target> {
    if opt(':').parse_next(input)?.is_some() {
        let name: &str = path.parse_next(input)?;
        return Ok(Target::Name(name.to_string()));
    }

    let start = *input;
    let digits: &str = take_while(0.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    if !digits.is_empty() && !input.starts_with(is_path_char) {
        let index = digits.parse::<usize>().map_err(|_| backtrack())?;
        return Ok(Target::Index(index));
    }

    *input = start;
    let name: &str = path.parse_next(input)?;
    Ok(Target::Name(name.to_string()))
}

/// Parse a dot-path name like `user.name`.
fn path<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_path_char).parse_next(input)
}

fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

/// Parse an identifier (type keywords, case names, decoration labels).
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

/// Consume input up to the brace matching an already-open construct.
fn skip_balanced(input: &mut &str) -> ModalResult<()> {
    let mut depth = 1usize;
    for (i, c) in input.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    *input = &input[i + 1..];
                    return Ok(());
                }
            }
            _ => {}
        }
    }
    Err(backtrack())
}
