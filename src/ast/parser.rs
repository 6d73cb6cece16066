use super::parser_types as types;
use crate::ast::span::Spanned;
use crate::error::{ParseDiagnosticError, SlimParserError};
use log::{debug, trace};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, char, multispace1, not_line_ending},
    combinator::{all_consuming, cut, map, not, opt, peek, recognize, value},
    error::context,
    multi::{many0, many1, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, separated_pair, terminated},
};
use nom_locate::LocatedSpan;

type Span<'a> = LocatedSpan<&'a str>;
type PResult<'a, T> = IResult<Span<'a>, Spanned<T>, SlimParserError>;

fn to_spanned<'a, T>(input: Span, result: IResult<Span<'a>, T, SlimParserError>) -> PResult<'a, T> {
    match result {
        Ok((span, val)) => Ok((
            span,
            Spanned::new(
                val,
                input.location_offset(),
                span.location_offset() - input.location_offset(),
            ),
        )),

        Err(err) => Err(err),
    }
}

fn semicolon(input: Span) -> PResult<()> {
    to_spanned(
        input,
        cut(value(
            (),
            pair(ws_comments0, context("semicolon", char(';'))),
        ))
        .parse(input),
    )
}

// Parses Rust-style line comments and whitespace
fn ws_comment(input: Span) -> PResult<()> {
    to_spanned(
        input,
        value(
            (),
            alt((
                // Match whitespace
                multispace1,
                // Match Rust style comments
                recognize(pair(tag("//"), not_line_ending)),
            )),
        )
        .parse(input),
    )
}

fn ws_comments0(input: Span) -> PResult<()> {
    to_spanned(input, value((), many0(ws_comment)).parse(input))
}

fn ws_comments1(input: Span) -> PResult<()> {
    to_spanned(input, value((), many1(ws_comment)).parse(input))
}

// Define a parser for a standard identifier (starts with alpha, can contain alphanum or underscore)
fn parse_identifier(input: Span) -> PResult<&str> {
    to_spanned(
        input,
        context(
            "identifier",
            map(
                recognize(pair(alpha1, many0(alt((alphanumeric1, tag("_")))))),
                |v: LocatedSpan<&str>| v.into_fragment(),
            ),
        )
        .parse(input),
    )
    // NOTE: Why it is not working with char('_')?
}

fn parse_nested_identifier(input: Span) -> PResult<&str> {
    to_spanned(
        input,
        context(
            "nested_identifier",
            map(
                recognize(separated_list1(tag("::"), parse_identifier)),
                |v: LocatedSpan<&str>| v.into_fragment(),
            ),
        )
        .parse(input),
    )
}

fn parse_string_literal(input: Span) -> PResult<&str> {
    to_spanned(
        input,
        context(
            "string_literal",
            map(
                delimited(char('"'), take_while1(|c: char| c != '"'), cut(char('"'))),
                |v: LocatedSpan<&str>| v.into_fragment(),
            ),
        )
        .parse(input),
    )
}

fn parse_attribute(input: Span) -> PResult<types::Attribute> {
    to_spanned(
        input,
        context(
            "attribute",
            map(
                // FIXME: Why I cannot add cut() here?
                separated_pair(
                    parse_identifier,
                    delimited(ws_comments0, char('='), ws_comments0),
                    parse_string_literal,
                ),
                |(name, value)| types::Attribute { name, value },
            ),
        )
        .parse(input),
    )
}

fn parse_attributes(input: Span) -> PResult<Vec<Spanned<types::Attribute>>> {
    to_spanned(
        input,
        context(
            "attributes",
            delimited(
                char('['),
                separated_list0(
                    char(','),
                    delimited(ws_comments0, parse_attribute, ws_comments0),
                ),
                cut(char(']')),
            ),
        )
        .parse(input),
    )
}

fn parse_type_definition(input: Span) -> PResult<types::TypeDefinition> {
    to_spanned(
        input,
        context(
            "type_definition",
            map(
                delimited(
                    ws_comments0,
                    (
                        pair(tag("type"), ws_comments1),
                        cut((
                            parse_identifier,
                            delimited(ws_comments0, char('='), ws_comments0),
                            parse_identifier,
                            preceded(ws_comments0, opt(parse_attributes)), // Allow 0 or more spaces before attributes
                        )),
                    ),
                    semicolon,
                ),
                |(_, (name, _, base_type, attributes))| types::TypeDefinition {
                    name,
                    base_type,
                    attributes: attributes.unwrap_or_default(),
                },
            ),
        )
        .parse(input),
    )
}

fn parse_type_definitions(input: Span) -> PResult<Vec<Spanned<types::TypeDefinition>>> {
    to_spanned(input, many0(parse_type_definition).parse(input))
}

fn parse_component(input: Span) -> PResult<types::Element> {
    to_spanned(
        input,
        context(
            "component",
            map(
                terminated(
                    (
                        terminated(parse_identifier, ws_comments0),
                        char(':'),
                        peek(not(char(':'))),
                        cut((
                            delimited(ws_comments0, parse_identifier, ws_comments0),
                            opt(parse_attributes),
                            opt(delimited(
                                preceded(ws_comments0, char('{')),
                                parse_elements,
                                preceded(ws_comments0, char('}')),
                            )),
                        )),
                    ),
                    semicolon,
                ),
                |(name, _, _, (type_name, attributes, nested_elements))| {
                    types::Element::Component {
                        name,
                        type_name,
                        attributes: attributes.unwrap_or_default(),
                        nested_elements: nested_elements.unwrap_or_default(),
                    }
                },
            ),
        )
        .parse(input),
    )
}

// Parse a relation type like -> or <- or <-> or -
fn parse_relation_type(input: Span) -> PResult<&str> {
    to_spanned(
        input,
        context(
            "relation_type",
            map(
                alt((tag("<->"), tag("<-"), tag("->"), tag("-"))),
                |v: LocatedSpan<&str>| v.into_fragment(),
            ),
        )
        .parse(input),
    )
}

fn parse_relation(input: Span) -> PResult<types::Element> {
    to_spanned(
        input,
        context(
            "relation",
            map(
                terminated(
                    (
                        terminated(parse_nested_identifier, ws_comments1),
                        parse_relation_type,
                        cut((
                            opt(preceded(ws_comments0, parse_attributes)), // Optional attributes
                            delimited(
                                ws_comments1, // Require at least one space after relation type
                                parse_nested_identifier,
                                ws_comments0, // Target identifier with possible leading space
                            ),
                            opt((preceded(ws_comments0, char(':')), parse_string_literal)),
                        )),
                    ),
                    semicolon,
                ),
                |(source, relation_type, (attributes, target, _))| types::Element::Relation {
                    source,
                    target,
                    attributes: attributes.unwrap_or_default(),
                    relation_type,
                },
            ),
        )
        .parse(input),
    )
}

fn parse_element(input: Span) -> PResult<types::Element> {
    delimited(
        ws_comments0,
        alt((parse_component, parse_relation)),
        ws_comments0,
    )
    .parse(input)
}

fn parse_elements(input: Span) -> PResult<Vec<Spanned<types::Element>>> {
    to_spanned(input, many0(parse_element).parse(input))
}

fn parse_diagram_header(input: Span) -> PResult<&str> {
    context(
        "header",
        cut(delimited(
            pair(context("diagram_keyword", tag("diagram")), multispace1),
            context("diagram_type", parse_identifier),
            semicolon,
        )),
    )
    .parse(input)
}

fn parse_diagram(input: Span) -> PResult<types::Element> {
    to_spanned(
        input,
        map(
            all_consuming(delimited(
                ws_comments0,
                (parse_diagram_header, parse_type_definitions, parse_elements),
                ws_comments0,
            )),
            |(kind, type_definitions, elements)| {
                types::Element::Diagram(types::Diagram {
                    kind,
                    type_definitions,
                    elements,
                })
            },
        )
        .parse(input),
    )
}

pub fn build_diagram(input: &str) -> Result<Spanned<types::Element>, ParseDiagnosticError> {
    debug!("Starting diagram parsing, input length: {}", input.len());

    // Create a span with the full input
    let input_span = Span::new(input);

    // Pass the full input to our parser
    match parse_diagram(input_span) {
        Ok((remaining, diagram)) => {
            if !remaining.is_empty() {
                // Create a slim error for the remaining content
                let err = SlimParserError::new(remaining, nom::error::ErrorKind::NonEmpty);

                // Convert to full error with the complete source
                return Err(err.move_to_full_error(input));
            }
            debug!("Diagram parsed successfully");
            trace!("Parsed diagram: {:?}", diagram);
            Ok(diagram)
        }
        Err(nom::Err::Error(err) | nom::Err::Failure(err)) => {
            trace!("Parser error: kind={:?}, offset={}", err.kind, err.offset);

            // Convert the slim error to a full error with context
            Err(err.move_to_full_error(input))
        }
        Err(err) => {
            trace!("Other parser error");
            Err(ParseDiagnosticError {
                src: input.to_string(),
                message: err.to_string(),
                span: Some((0, input_span.len()).into()),
                help: None,
            })
        }
    }
}
