use super::span::SpanImpl;
use super::tokens::Token;
use chumsky::{
    IterParser as _, Parser,
    error::Rich,
    extra,
    primitive::{any, choice, just, none_of, one_of},
    text,
};
type Spanned<T> = (T, SpanImpl);

/// Parse a complete string literal with double quotes.
///
/// This function parses Rust-style string literals including:
/// - Basic strings: "hello world"
/// - Escape sequences: "hello\nworld", "quote: \"test\""
/// - Unicode escapes: "emoji: \u{1F602}", "symbol: \u{00AC}"
/// - Escaped whitespace: "before\   \n  after" (whitespace is consumed)
/// - Empty strings: ""
fn string_literal<'a>() -> impl Parser<'a, &'a str, Token<'a>, extra::Err<Rich<'a, char>>> {
    // All escape sequences start with backslash
    let escape = just('\\').ignore_then(choice((
        // Unicode escape sequence: u{1-6 hex digits}
        just('u')
            .ignore_then(
                any()
                    .filter(|c: &char| c.is_ascii_hexdigit())
                    .repeated()
                    .at_least(1)
                    .at_most(6)
                    .collect::<String>()
                    .delimited_by(just('{'), just('}'))
                    .try_map(|digits, span| {
                        u32::from_str_radix(&digits, 16)
                            .ok()
                            .and_then(std::char::from_u32)
                            .ok_or_else(|| Rich::custom(span, "Invalid Unicode escape sequence"))
                    }),
            )
            .map(Some)
            .labelled("unicode escape"),
        // Standard escape sequences
        one_of("nrtbf\\/'\"0")
            .map(|c| {
                Some(match c {
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'b' => '\u{08}',
                    'f' => '\u{0C}',
                    '\\' => '\\',
                    '/' => '/',
                    '\'' => '\'',
                    '"' => '"',
                    '0' => '\0',
                    _ => unreachable!(),
                })
            })
            .labelled("escape sequence"),
        // Escaped whitespace (consumed and ignored)
        one_of(" \t\r\n")
            .repeated()
            .at_least(1)
            .to(None) // None means "don't add to output"
            .labelled("escaped whitespace"),
    )));

    // Regular string content (not quotes or backslashes)
    let string_char = none_of("\"\\");

    // String content: mix of regular chars and escapes
    let string_content = choice((escape, string_char.map(Some)))
        .repeated()
        .collect::<Vec<_>>()
        .map(|chars| chars.into_iter().flatten().collect::<String>());

    // Complete string literal
    string_content
        .delimited_by(just('"'), just('"'))
        .map(Token::StringLiteral)
        .labelled("string literal")
}

pub fn lexer<'src>()
-> impl Parser<'src, &'src str, Vec<Spanned<Token<'src>>>, extra::Err<Rich<'src, char, SpanImpl>>> {
    // String literal parser - now with comprehensive escape sequence support
    let string_literal_parser = string_literal();

    // Line comment parser
    let line_comment = just("//")
        .then(any().and_is(just('\n').not()).repeated())
        .to_slice()
        .map(|s: &'src str| Token::LineComment(&s[2..]));

    // Keywords (must come before identifier)
    let keyword = choice((
        text::keyword("diagram").to(Token::Diagram),
        text::keyword("component").to(Token::Component),
        text::keyword("sequence").to(Token::Sequence),
        text::keyword("type").to(Token::Type),
        text::keyword("embed").to(Token::Embed),
        text::keyword("as").to(Token::As),
    ));

    // Identifier parser
    let identifier = text::ident().map(Token::Identifier);

    // Multi-character operators (order matters - longest first)
    let multi_char_op = choice((
        just("<->").to(Token::DoubleArrow),
        just("->").to(Token::Arrow_),
        just("<-").to(Token::LeftArrow),
    ));

    // Single character tokens
    let single_char = choice((
        just('-').to(Token::Plain),
        just('=').to(Token::Equals),
        just(':').to(Token::Colon),
        just('{').to(Token::LeftBrace),
        just('}').to(Token::RightBrace),
        just('[').to(Token::LeftBracket),
        just(']').to(Token::RightBracket),
        just(';').to(Token::Semicolon),
        just(',').to(Token::Comma),
    ));

    // Whitespace (spaces, tabs, etc. but not newlines)
    let whitespace = any()
        .filter(|c: &char| c.is_whitespace() && *c != '\n')
        .repeated()
        .at_least(1)
        .to(Token::Whitespace);

    // Newline
    let newline = just('\n').to(Token::Newline);

    // Combine all token types - order is important!
    let token = choice((
        line_comment,          // Must come before single char '-'
        string_literal_parser, // Must come before any single char
        multi_char_op,         // Must come before single char operators
        keyword,               // Must come before identifier
        identifier,            // Must come before single chars
        single_char,           // Single character tokens
        newline,               // Must come before whitespace
        whitespace,            // General whitespace
    ));

    // Parse tokens with their spans
    token
        .map_with(|tok, extra| (tok, extra.span()))
        .repeated()
        .collect()
}
