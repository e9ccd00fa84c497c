use emerald_lex::{scan, Error, ErrorKind, Literal, Scanner, Token, TokenKind};
use pretty_assertions::assert_eq;

use TokenKind::*;

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

fn errors_of(src: &str) -> Vec<(usize, ErrorKind)> {
    let (_, errors) = scan(src);
    errors.into_iter().map(|e| (e.line(), e.kind().clone())).collect()
}

fn count(tokens: &[Token], kind: TokenKind) -> usize {
    tokens.iter().filter(|t| t.kind == kind).count()
}

#[test]
fn indented_block_is_wrapped_in_layout_tokens() {
    let (tokens, errors) = scan("if x\n    print x\nend\n");
    assert!(errors.is_empty());
    assert_eq!(
        vec![If, Identifier, Indent, Print, Identifier, Dedent, End, Eof],
        kinds(&tokens)
    );
    assert_eq!("    ", tokens[2].lexeme);
    assert_eq!(2, tokens[2].line);
    assert_eq!("", tokens[5].lexeme);
    assert_eq!(3, tokens[5].line);
}

#[test]
fn nested_blocks_close_together() {
    let (tokens, errors) = scan("a\n  b\n    c\nd");
    assert!(errors.is_empty());
    assert_eq!(
        vec![Identifier, Indent, Identifier, Indent, Identifier, Dedent, Dedent, Identifier, Eof],
        kinds(&tokens)
    );
    assert!(tokens[5..7].iter().all(|t| t.line == 4));
}

#[test]
fn tab_indentation_is_consistent_with_itself() {
    let (tokens, errors) = scan("while x\n\tif y\n\t\tprint y\n\tx = 1\nend");
    assert!(errors.is_empty());
    assert_eq!(2, count(&tokens, Indent));
    assert_eq!(2, count(&tokens, Dedent));
    assert_eq!("\t", tokens[2].lexeme);
}

#[test]
fn swapping_a_tab_for_spaces_is_invalid() {
    let (tokens, errors) = scan("if x\n\tprint x\n        print y\nend\n");
    assert_eq!(
        vec![If, Identifier, Indent, Print, Identifier, Print, Identifier, Dedent, End, Eof],
        kinds(&tokens)
    );
    assert_eq!(1, errors.len());
    assert_eq!(&ErrorKind::InvalidIndentation, errors[0].kind());
    assert_eq!(3, errors[0].line());
}

#[test]
fn metrics_disagreeing_in_direction_is_invalid() {
    // "    " is (4, 4); "\t" is (8, 1): wider but fewer characters.
    let errors = errors_of("a\n    b\n\tc\n");
    assert_eq!(vec![(3, ErrorKind::InvalidIndentation)], errors);
}

#[test]
fn dedent_to_unknown_level_stops_at_base() {
    let (tokens, errors) = scan("a\n    b\n  c\n");
    assert_eq!(
        vec![Identifier, Indent, Identifier, Dedent, Identifier, Eof],
        kinds(&tokens)
    );
    assert_eq!(1, errors.len());
    assert_eq!(&ErrorKind::IndentationMismatch, errors[0].kind());
    assert_eq!(3, errors[0].line());
    assert_eq!(count(&tokens, Indent), count(&tokens, Dedent));
}

#[test]
fn open_brackets_swallow_line_breaks() {
    let (tokens, errors) = scan("f(a,\n        b,\n  c)\nx\n");
    assert!(errors.is_empty());
    assert_eq!(
        vec![
            Identifier, LeftParen, Identifier, Comma, Identifier, Comma, Identifier, RightParen,
            Identifier, Eof,
        ],
        kinds(&tokens)
    );
    let lines: Vec<_> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(vec![1, 1, 1, 1, 2, 2, 3, 3, 4, 5], lines);
}

#[test]
fn closing_last_bracket_restores_layout() {
    let (tokens, errors) = scan("f([a,\n   {b}])\n    y\n");
    assert!(errors.is_empty());
    assert_eq!(1, count(&tokens, Indent));
    let indent = tokens.iter().position(|t| t.kind == Indent).unwrap();
    assert_eq!(RightParen, tokens[indent - 1].kind);
    assert_eq!(3, tokens[indent].line);
}

#[test]
fn unclosed_brackets_report_each_opening_line() {
    assert_eq!(
        vec![
            (1, ErrorKind::UnclosedBracket),
            (2, ErrorKind::UnclosedBracket),
            (3, ErrorKind::UnclosedBracket),
        ],
        errors_of("(\n[\n{")
    );
    assert_eq!(
        vec![(1, ErrorKind::UnclosedBracket), (1, ErrorKind::UnclosedBracket)],
        errors_of("((")
    );
    assert_eq!(vec![(2, ErrorKind::UnclosedBracket)], errors_of("x\nf((x)"));
    assert!(errors_of("f(x)").is_empty());
}

#[test]
fn blank_and_comment_lines_do_not_affect_layout() {
    let (tokens, errors) = scan("if x\n    a\n\n// note\n  # another\n    b\nend");
    assert!(errors.is_empty());
    assert_eq!(
        vec![If, Identifier, Indent, Identifier, Identifier, Dedent, End, Eof],
        kinds(&tokens)
    );
}

#[test]
fn single_line_block_comments_do_not_affect_layout() {
    for src in [
        "if x\n    a\n/* c */\n    b\nend",
        "if x\n    a\n#* c *# // d\n    b\nend",
        "if x\n    a\n  /* c */ /* d */\n    b\nend",
    ]
    .iter()
    {
        let (tokens, errors) = scan(src);
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(
            vec![If, Identifier, Indent, Identifier, Identifier, Dedent, End, Eof],
            kinds(&tokens)
        );
    }
}

#[test]
fn multi_line_block_comment_starts_a_measured_line() {
    let (tokens, errors) = scan("if x\n    a\n/* c\n*/\n    b\nend");
    assert!(errors.is_empty());
    assert_eq!(
        vec![If, Identifier, Indent, Identifier, Dedent, Indent, Identifier, Dedent, End, Eof],
        kinds(&tokens)
    );
}

#[test]
fn crlf_blank_lines_do_not_affect_layout() {
    let (tokens, errors) = scan("a\r\n\r\n    b\r\n");
    assert!(errors.is_empty());
    assert_eq!(vec![Identifier, Indent, Identifier, Eof], kinds(&tokens));
    assert_eq!(3, tokens[1].line);
}

#[test]
fn trailing_carriage_return_at_eof_is_blank() {
    let (tokens, errors) = scan("if x\n    a\n\r");
    assert!(errors.is_empty());
    assert_eq!(vec![If, Identifier, Indent, Identifier, Eof], kinds(&tokens));
    assert_eq!(3, tokens.last().unwrap().line);
}

#[test]
fn literals_follow_the_numeric_and_string_rules() {
    let (tokens, errors) = scan("3.14 10 \"abc\"");
    assert!(errors.is_empty());
    assert_eq!(vec![Number, Number, String, Eof], kinds(&tokens));
    assert_eq!(Some(Literal::Number(3.14)), tokens[0].literal);
    assert_eq!(Some(Literal::Number(10.0)), tokens[1].literal);
    assert_eq!(Some(Literal::String("abc".into())), tokens[2].literal);
    assert_eq!(None, tokens[3].literal);
}

#[test]
fn unterminated_string_is_reported_once() {
    let (tokens, errors) = scan("\"abc");
    assert_eq!(vec![Eof], kinds(&tokens));
    assert_eq!(1, errors.len());
    assert_eq!(&ErrorKind::UnterminatedString, errors[0].kind());
}

#[test]
fn forest_is_one_identifier() {
    let (tokens, _) = scan("forest");
    assert_eq!(vec![Identifier, Eof], kinds(&tokens));
    assert_eq!("forest", tokens[0].lexeme);
}

#[test]
fn scanning_continues_past_errors() {
    let (tokens, errors) = scan("a ` b\nc @\n(");
    assert_eq!(vec![Identifier, Identifier, Identifier, LeftParen, Eof], kinds(&tokens));
    assert_eq!(
        vec![
            "[line 1] Error: Unexpected character '`'.".to_string(),
            "[line 2] Error: Unexpected character '@'.".to_string(),
            "[line 3] Error: Unclosed bracket.".to_string(),
        ],
        errors.iter().map(|e| e.to_string()).collect::<Vec<_>>()
    );
}

#[test]
fn lazy_and_eager_scans_agree() {
    let src = "fn f(a, b)\n    return a <=> b ** 2\nend\n";
    let (eager, _) = scan(src);
    let mut errors: Vec<Error> = Vec::new();
    let lazy: Vec<Token> = Scanner::new(src, &mut errors).collect();
    assert_eq!(eager, lazy);
    assert_eq!(1, count(&lazy, Eof));
    assert!(errors.is_empty());
}

#[test]
fn small_program() {
    let src = "\
import math

fn area(r)
    // circle
    return r ** 2 * 3.14
end

var xs = [1, 2, 3]
for x in xs
    if x >= 2 && x != 3
        print area(x)
    elsif x <= 1 || !true
        x++
    else
        print nil
    end
end
";
    let (tokens, errors) = scan(src);
    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(count(&tokens, Indent), count(&tokens, Dedent));
    assert_eq!(5, count(&tokens, Indent));
    assert_eq!(
        vec![Import, Identifier, Fn, Identifier, LeftParen, Identifier, RightParen, Indent, Return],
        kinds(&tokens[..9])
    );
    assert!(tokens.iter().any(|t| t.kind == ElseIf));
    assert_eq!(Eof, tokens.last().unwrap().kind);
}

mod properties {
    use super::{count, scan};
    use emerald_lex::TokenKind;
    use proptest::prelude::*;

    fn layout_program() -> impl Strategy<Value = String> {
        let unit = prop_oneof![Just("  "), Just("    "), Just("\t")];
        (unit, prop::collection::vec(0usize..5, 0..40)).prop_map(|(unit, raw)| {
            let mut depth = 0;
            let mut src = String::new();
            for (i, want) in raw.into_iter().enumerate() {
                depth = want.min(depth + 1);
                src.push_str(&unit.repeat(depth));
                src.push_str(&format!("x{}\n", i));
            }
            src.push_str("end\n");
            src
        })
    }

    proptest! {
        #[test]
        fn well_formed_layout_balances(src in layout_program()) {
            let (tokens, errors) = scan(&src);
            prop_assert!(errors.is_empty(), "{:?}", errors);
            prop_assert_eq!(count(&tokens, TokenKind::Indent), count(&tokens, TokenKind::Dedent));
            prop_assert_eq!(1, count(&tokens, TokenKind::Eof));
        }

        #[test]
        fn always_ends_in_a_single_eof(src in "[ \t\n(){}\\[\\]a-z0-9\"#*/.<=>!&|+-]{0,80}") {
            let (tokens, _) = scan(&src);
            prop_assert_eq!(Some(TokenKind::Eof), tokens.last().map(|t| t.kind));
            prop_assert_eq!(1, count(&tokens, TokenKind::Eof));
        }
    }
}
