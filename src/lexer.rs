//! Byte-by-byte scanner turning source text into a [`Token`] stream.

use crate::token::{lookup_ident, Token, TokenKind};

/// Stateful cursor over the input bytes. Never fails: unrecognized bytes
/// become `Illegal` tokens and scanning continues.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a [u8],
    position: usize,
    read_position: usize,
    ch: u8,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self {
            input: input.as_bytes(),
            position: 0,
            read_position: 0,
            ch: 0,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        self.ch = if self.read_position >= self.input.len() {
            0
        } else {
            self.input[self.read_position]
        };
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> u8 {
        if self.read_position >= self.input.len() {
            0
        } else {
            self.input[self.read_position]
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\r' | b'\n') {
            self.read_char();
        }
    }

    /// Produce the next token. After EOF, further calls keep returning EOF.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let tok = match self.ch {
            b'=' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenKind::Eq, "==")
                } else {
                    Token::new(TokenKind::Assign, "=")
                }
            }
            b'+' => Token::new(TokenKind::Plus, "+"),
            b'-' => Token::new(TokenKind::Minus, "-"),
            b'!' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenKind::NotEq, "!=")
                } else {
                    Token::new(TokenKind::Bang, "!")
                }
            }
            b'*' => Token::new(TokenKind::Asterisk, "*"),
            b'/' => Token::new(TokenKind::Slash, "/"),
            b'<' => Token::new(TokenKind::Lt, "<"),
            b'>' => Token::new(TokenKind::Gt, ">"),
            b',' => Token::new(TokenKind::Comma, ","),
            b';' => Token::new(TokenKind::Semicolon, ";"),
            b'(' => Token::new(TokenKind::Lparen, "("),
            b')' => Token::new(TokenKind::Rparen, ")"),
            b'{' => Token::new(TokenKind::Lbrace, "{"),
            b'}' => Token::new(TokenKind::Rbrace, "}"),
            b'"' => Token::new(TokenKind::String, self.read_string()),
            0 => Token::new(TokenKind::Eof, ""),
            ch if is_letter(ch) => {
                // read_identifier already advances past the last consumed byte.
                let literal = self.read_identifier();
                let kind = lookup_ident(&literal);
                return Token::new(kind, literal);
            }
            ch if ch.is_ascii_digit() => {
                return Token::new(TokenKind::Int, self.read_number());
            }
            ch => {
                let literal = (ch as char).to_string();
                log::trace!("lexer: illegal byte {literal:?} at position {}", self.position);
                Token::new(TokenKind::Illegal, literal)
            }
        };

        self.read_char();
        tok
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while is_letter(self.ch) || self.ch.is_ascii_digit() {
            self.read_char();
        }
        String::from_utf8_lossy(&self.input[start..self.position]).into_owned()
    }

    fn read_number(&mut self) -> String {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char();
        }
        String::from_utf8_lossy(&self.input[start..self.position]).into_owned()
    }

    /// Reads a string literal, decoding `\"`, `\n`, `\t` escapes. Any other
    /// escaped byte drops the backslash and keeps the byte as-is. Leaves
    /// `ch` on the closing quote (or on 0 at end of input).
    fn read_string(&mut self) -> String {
        let mut out = String::new();
        loop {
            self.read_char();
            match self.ch {
                0 => break,
                b'"' => break,
                b'\\' => {
                    self.read_char();
                    match self.ch {
                        b'"' => out.push('"'),
                        b'n' => out.push('\n'),
                        b't' => out.push('\t'),
                        0 => break,
                        other => out.push(other as char),
                    }
                }
                other => out.push(other as char),
            }
        }
        out
    }
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_literals(input: &str) -> Vec<(TokenKind, String)> {
        let mut lexer = Lexer::new(input);
        let mut out = vec![];
        loop {
            let tok = lexer.next_token();
            let done = tok.kind == TokenKind::Eof;
            out.push((tok.kind, tok.literal));
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn lexes_next_token_symbols() {
        let input = "=+(){},;";
        let expected = [
            (TokenKind::Assign, "="),
            (TokenKind::Plus, "+"),
            (TokenKind::Lparen, "("),
            (TokenKind::Rparen, ")"),
            (TokenKind::Lbrace, "{"),
            (TokenKind::Rbrace, "}"),
            (TokenKind::Comma, ","),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Eof, ""),
        ];
        let got = kinds_and_literals(input);
        assert_eq!(got.len(), expected.len());
        for ((kind, literal), (ekind, eliteral)) in got.iter().zip(expected.iter()) {
            assert_eq!(kind, ekind);
            assert_eq!(literal, eliteral);
        }
    }

    #[test]
    fn lexes_a_small_program() {
        let input = r#"
            let five = 5;
            let ten = 10;

            let add = fn(x, y) {
                x + y;
            };

            let result = add(five, ten);
            !-/*5;
            5 < 10 > 5;

            if (5 < 10) {
                return true;
            } else {
                return false;
            }

            10 == 10;
            10 != 9;
            "foobar"
            "foo bar"
            "with \"quotes\" and \n newline"
        "#;

        let mut lexer = Lexer::new(input);
        let mut kinds = vec![];
        loop {
            let tok = lexer.next_token();
            let done = tok.kind == TokenKind::Eof;
            kinds.push(tok.kind);
            if done {
                break;
            }
        }
        assert_eq!(*kinds.last().unwrap(), TokenKind::Eof);
        assert!(kinds.contains(&TokenKind::Function));
        assert!(kinds.contains(&TokenKind::Let));
        assert!(kinds.contains(&TokenKind::Eq));
        assert!(kinds.contains(&TokenKind::NotEq));
        assert!(kinds.contains(&TokenKind::String));
    }

    #[test]
    fn eof_is_sticky() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn illegal_byte_does_not_stop_scanning() {
        let mut lexer = Lexer::new("@5");
        let first = lexer.next_token();
        assert_eq!(first.kind, TokenKind::Illegal);
        assert_eq!(first.literal, "@");
        let second = lexer.next_token();
        assert_eq!(second.kind, TokenKind::Int);
        assert_eq!(second.literal, "5");
    }

    #[test]
    fn string_escapes() {
        let mut lexer = Lexer::new(r#""a\"b\nc\td\q""#);
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::String);
        assert_eq!(tok.literal, "a\"b\nc\td\\q".replace('\\', "").as_str());
        // \q drops the backslash and keeps the 'q'
        assert_eq!(tok.literal, "a\"b\nc\tdq");
    }

    #[test]
    fn unterminated_string_closes_at_eof() {
        let mut lexer = Lexer::new(r#""unterminated"#);
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::String);
        assert_eq!(tok.literal, "unterminated");
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn identifier_with_interior_digits() {
        let mut lexer = Lexer::new("foo123 = 1");
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Ident);
        assert_eq!(tok.literal, "foo123");
    }
}
