// Copyright 2026 The QCC Developers
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use this file except
// in compliance with the License.You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the License
// is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express
// or implied. See the License for the specific language governing permissions and limitations under
// the License.

//! Hand-written lexer producing a flat [`Token`] stream, tracking
//! `(line, col)` on every token so [`crate::ParseError`] can report
//! `line:col: message`.

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    OpenQasm,
    Include,
    QReg,
    CReg,
    Gate,
    Measure,
    Reset,
    If,
    Barrier,
    Pi,
    Identifier(String),
    Integer(i64),
    Real(f64),
    Str(String),
    Plus,
    Minus,
    Times,
    Divide,
    Power,
    Assign,
    Equals,
    Arrow,
    Semicolon,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub col: usize,
}

fn keyword(text: &str) -> Option<TokenKind> {
    Some(match text {
        "OPENQASM" => TokenKind::OpenQasm,
        "include" => TokenKind::Include,
        "qreg" => TokenKind::QReg,
        "creg" => TokenKind::CReg,
        "gate" => TokenKind::Gate,
        "measure" => TokenKind::Measure,
        "reset" => TokenKind::Reset,
        "if" => TokenKind::If,
        "barrier" => TokenKind::Barrier,
        "pi" => TokenKind::Pi,
        _ => return None,
    })
}

pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Lexer { src: src.as_bytes(), pos: 0, line: 1, col: 1 }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        while !self.is_at_end() {
            if let Some(tok) = self.scan_token()? {
                tokens.push(tok);
            }
        }
        tokens.push(Token { kind: TokenKind::Eof, line: self.line, col: self.col });
        Ok(tokens)
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> u8 {
        if self.is_at_end() { 0 } else { self.src[self.pos] }
    }

    fn peek_next(&self) -> u8 {
        if self.pos + 1 >= self.src.len() { 0 } else { self.src[self.pos + 1] }
    }

    fn advance(&mut self) -> u8 {
        let c = self.src[self.pos];
        self.pos += 1;
        self.col += 1;
        c
    }

    fn matches(&mut self, expected: u8) -> bool {
        if self.is_at_end() || self.src[self.pos] != expected {
            return false;
        }
        self.pos += 1;
        self.col += 1;
        true
    }

    fn scan_token(&mut self) -> Result<Option<Token>, ParseError> {
        let start_line = self.line;
        let start_col = self.col;
        let c = self.advance();
        let kind = match c {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'+' => TokenKind::Plus,
            b'-' => {
                if self.matches(b'>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            b'*' => TokenKind::Times,
            b'/' => {
                if self.matches(b'/') {
                    while self.peek() != b'\n' && !self.is_at_end() {
                        self.advance();
                    }
                    return Ok(None);
                }
                TokenKind::Divide
            }
            b'^' => TokenKind::Power,
            b'=' => {
                if self.matches(b'=') {
                    TokenKind::Equals
                } else {
                    TokenKind::Assign
                }
            }
            b'"' => return self.string(start_line, start_col).map(Some),
            b' ' | b'\r' | b'\t' => return Ok(None),
            b'\n' => {
                self.line += 1;
                self.col = 1;
                return Ok(None);
            }
            _ if c.is_ascii_digit() => return self.number(start_line, start_col).map(Some),
            _ if c.is_ascii_alphabetic() || c == b'_' => return Ok(Some(self.identifier(start_line, start_col))),
            other => return Err(ParseError::new(start_line, start_col, format!("unexpected character '{}'", other as char))),
        };
        Ok(Some(Token { kind, line: start_line, col: start_col }))
    }

    fn identifier(&mut self, line: usize, col: usize) -> Token {
        let start = self.pos - 1;
        while self.peek().is_ascii_alphanumeric() || self.peek() == b'_' {
            self.advance();
        }
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or_default().to_string();
        let kind = keyword(&text).unwrap_or(TokenKind::Identifier(text));
        Token { kind, line, col }
    }

    fn number(&mut self, line: usize, col: usize) -> Result<Token, ParseError> {
        let start = self.pos - 1;
        let mut is_real = false;
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            is_real = true;
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }
        if self.peek() == b'e' || self.peek() == b'E' {
            is_real = true;
            self.advance();
            if self.peek() == b'+' || self.peek() == b'-' {
                self.advance();
            }
            if !self.peek().is_ascii_digit() {
                let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or_default().to_string();
                return Err(ParseError::new(line, col, format!("invalid scientific notation: {text}")));
            }
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or_default();
        let kind = if is_real {
            let value: f64 = text.parse().map_err(|_| ParseError::new(line, col, format!("invalid real literal: {text}")))?;
            TokenKind::Real(value)
        } else {
            let value: i64 = text.parse().map_err(|_| ParseError::new(line, col, format!("invalid integer literal: {text}")))?;
            TokenKind::Integer(value)
        };
        Ok(Token { kind, line, col })
    }

    fn string(&mut self, line: usize, col: usize) -> Result<Token, ParseError> {
        let start = self.pos;
        while self.peek() != b'"' && !self.is_at_end() {
            if self.peek() == b'\n' {
                self.line += 1;
                self.col = 1;
            }
            self.advance();
        }
        if self.is_at_end() {
            return Err(ParseError::new(line, col, "unterminated string literal".to_string()));
        }
        let value = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or_default().to_string();
        self.advance();
        Ok(Token { kind: TokenKind::Str(value), line, col })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src).tokenize().unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn tokenizes_qreg_declaration() {
        let ks = kinds("qreg q[2];");
        assert_eq!(
            ks,
            vec![
                TokenKind::QReg,
                TokenKind::Identifier("q".into()),
                TokenKind::LBracket,
                TokenKind::Integer(2),
                TokenKind::RBracket,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tokenizes_arrow_and_measure() {
        let ks = kinds("measure q[0] -> c[0];");
        assert!(ks.contains(&TokenKind::Arrow));
        assert!(ks.contains(&TokenKind::Measure));
    }

    #[test]
    fn tokenizes_pauli_string_as_identifier_with_sign() {
        let ks = kinds("t_pauli -XYZI;");
        assert_eq!(ks[0], TokenKind::Identifier("t_pauli".into()));
        assert_eq!(ks[1], TokenKind::Minus);
        assert_eq!(ks[2], TokenKind::Identifier("XYZI".into()));
    }

    #[test]
    fn reports_line_and_column_of_each_token() {
        let toks = Lexer::new("qreg q[2];\nh q[0];").tokenize().unwrap();
        let h_tok = toks.iter().find(|t| t.kind == TokenKind::Identifier("h".into())).unwrap();
        assert_eq!(h_tok.line, 2);
    }

    #[test]
    fn skips_line_comments() {
        let ks = kinds("// a comment\nh q[0];");
        assert_eq!(ks[0], TokenKind::Identifier("h".into()));
    }

    #[test]
    fn rejects_unterminated_string() {
        assert!(Lexer::new("include \"no_close.inc;").tokenize().is_err());
    }
}
