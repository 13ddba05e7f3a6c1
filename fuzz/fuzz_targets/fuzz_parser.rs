#![no_main]

use arbitrary::Arbitrary;
use jsonscan::{Lexer, Parser, ParserOptions, Scanner, ValueBuilder, WriterOptions, to_string_with};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    text: &'a str,
    max_depth: u8,
    from_reader: bool,
}

fn lexer<'a>(input: &Input<'a>) -> Lexer<'a> {
    if input.from_reader {
        Lexer::from_reader(input.text.as_bytes())
    } else {
        Lexer::from_str(input.text)
    }
}

fuzz_target!(|input: Input<'_>| {
    let options = ParserOptions {
        max_depth: usize::from(input.max_depth),
        ..Default::default()
    };

    let parsed = Parser::new(options).parse(&mut lexer(&input));
    let mut builder = ValueBuilder::new();
    let scanned = Scanner::new(options).scan(&mut lexer(&input), &mut builder);

    match (&parsed, &scanned) {
        (Ok(value), Ok(())) => assert_eq!(builder.finish().as_ref(), Some(value)),
        (Err(_), Err(_)) => {}
        // The scanner accepts empty input; the parser does not.
        (Err(_), Ok(())) if input.text.trim().is_empty() => {}
        _ => panic!("parser and scanner disagree: {parsed:?} vs {scanned:?}"),
    }

    if let Ok(value) = parsed {
        for layout in [WriterOptions::compact(), WriterOptions::neat()] {
            let text = to_string_with(&value, layout).expect("parsed numbers are finite");
            let reparsed = Parser::default()
                .parse(&mut Lexer::from_str(&text))
                .expect("writer output parses");
            assert_eq!(reparsed, value);
        }
    }
});
