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

//! Recursive-descent parser: `Token` stream to [`Program`]. Stops at the
//! first malformed statement rather than the original's synchronize-and-continue
//! recovery, per this toolchain's "ParseError halts the current compilation" policy.

use crate::ast::{BinOp, Expr, GateCall, GateDecl, Program, Statement};
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0 }
    }

    pub fn parse(mut self) -> Result<Program, ParseError> {
        let mut program = Program::default();
        while !self.is_at_end() {
            program.statements.push(self.declaration()?);
        }
        Ok(program)
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn check(&self, kind: &TokenKind) -> bool {
        !self.is_at_end() && std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn matches(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.peek().line, self.peek().col, message.into())
    }

    fn consume(&mut self, kind: &TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.error(message.to_string()))
        }
    }

    fn consume_identifier(&mut self, message: &str) -> Result<String, ParseError> {
        match &self.peek().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error(message.to_string())),
        }
    }

    fn declaration(&mut self) -> Result<Statement, ParseError> {
        if self.matches(&TokenKind::OpenQasm) {
            return self.version_declaration();
        }
        if self.matches(&TokenKind::Include) {
            return self.include_statement();
        }
        if self.matches(&TokenKind::QReg) {
            return self.qreg_declaration();
        }
        if self.matches(&TokenKind::CReg) {
            return self.creg_declaration();
        }
        if self.matches(&TokenKind::Gate) {
            return self.gate_declaration();
        }
        self.statement()
    }

    fn version_declaration(&mut self) -> Result<Statement, ParseError> {
        let version = match &self.peek().kind {
            TokenKind::Real(_) | TokenKind::Integer(_) => {
                let tok = self.advance();
                match &tok.kind {
                    TokenKind::Real(v) => v.to_string(),
                    TokenKind::Integer(v) => v.to_string(),
                    _ => unreachable!(),
                }
            }
            _ => return Err(self.error("expected version number after OPENQASM")),
        };
        self.consume(&TokenKind::Semicolon, "expected ';' after version number")?;
        Ok(Statement::Version(version))
    }

    fn include_statement(&mut self) -> Result<Statement, ParseError> {
        let filename = match &self.peek().kind {
            TokenKind::Str(s) => s.clone(),
            _ => return Err(self.error("expected file name after include")),
        };
        self.advance();
        self.consume(&TokenKind::Semicolon, "expected ';' after include statement")?;
        Ok(Statement::Include(filename))
    }

    fn integer_literal(&mut self, message: &str) -> Result<i64, ParseError> {
        match &self.peek().kind {
            TokenKind::Integer(v) => {
                let v = *v;
                self.advance();
                Ok(v)
            }
            _ => Err(self.error(message.to_string())),
        }
    }

    fn qreg_declaration(&mut self) -> Result<Statement, ParseError> {
        let name = self.consume_identifier("expected register name after qreg")?;
        self.consume(&TokenKind::LBracket, "expected '[' after register name")?;
        let size = self.integer_literal("expected size after '['")?;
        self.consume(&TokenKind::RBracket, "expected ']' after size")?;
        self.consume(&TokenKind::Semicolon, "expected ';' after register declaration")?;
        Ok(Statement::QReg { name, size: size as usize })
    }

    fn creg_declaration(&mut self) -> Result<Statement, ParseError> {
        let name = self.consume_identifier("expected register name after creg")?;
        self.consume(&TokenKind::LBracket, "expected '[' after register name")?;
        let size = self.integer_literal("expected size after '['")?;
        self.consume(&TokenKind::RBracket, "expected ']' after size")?;
        self.consume(&TokenKind::Semicolon, "expected ';' after register declaration")?;
        Ok(Statement::CReg { name, size: size as usize })
    }

    fn gate_declaration(&mut self) -> Result<Statement, ParseError> {
        let name = self.consume_identifier("expected gate name")?;

        let mut params = Vec::new();
        if self.matches(&TokenKind::LParen) {
            if !self.check(&TokenKind::RParen) {
                loop {
                    params.push(self.consume_identifier("expected parameter name")?);
                    if !self.matches(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.consume(&TokenKind::RParen, "expected ')' after parameters")?;
        }

        let mut qubits = Vec::new();
        if !self.check(&TokenKind::LBrace) {
            loop {
                qubits.push(self.consume_identifier("expected qubit name")?);
                if !self.matches(&TokenKind::Comma) {
                    break;
                }
            }
        }

        let body = self.gate_body()?;
        Ok(Statement::GateDecl(GateDecl { name, params, qubits, body }))
    }

    fn gate_body(&mut self) -> Result<Vec<Statement>, ParseError> {
        self.consume(&TokenKind::LBrace, "expected '{' before gate body")?;
        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.gate_operation()?);
        }
        self.consume(&TokenKind::RBrace, "expected '}' after gate body")?;
        Ok(statements)
    }

    fn gate_operation(&mut self) -> Result<Statement, ParseError> {
        let name = self.consume_identifier("expected gate operation in gate body")?;

        let mut params = Vec::new();
        if self.matches(&TokenKind::LParen) {
            if !self.check(&TokenKind::RParen) {
                params.push(self.expression()?);
                while self.matches(&TokenKind::Comma) {
                    params.push(self.expression()?);
                }
            }
            self.consume(&TokenKind::RParen, "expected ')' after gate parameters")?;
        }

        let mut qubits = vec![Expr::Variable(self.consume_identifier("expected qubit argument")?)];
        while self.matches(&TokenKind::Comma) {
            qubits.push(Expr::Variable(self.consume_identifier("expected qubit argument")?));
        }
        self.consume(&TokenKind::Semicolon, "expected ';' after gate operation")?;
        Ok(Statement::Gate(GateCall { name, params, qubits }))
    }

    fn statement(&mut self) -> Result<Statement, ParseError> {
        if self.matches(&TokenKind::Measure) {
            return self.measure_statement();
        }
        if self.matches(&TokenKind::Reset) {
            return self.reset_statement();
        }
        if self.matches(&TokenKind::If) {
            return self.if_statement();
        }
        if self.matches(&TokenKind::LBrace) {
            return self.block_statement();
        }
        if self.matches(&TokenKind::Barrier) {
            return self.barrier_statement();
        }
        self.gate_statement()
    }

    fn barrier_statement(&mut self) -> Result<Statement, ParseError> {
        let mut qubits = vec![self.primary_expr()?];
        while self.matches(&TokenKind::Comma) {
            qubits.push(self.primary_expr()?);
        }
        self.consume(&TokenKind::Semicolon, "expected ';' after barrier statement")?;
        Ok(Statement::Barrier(qubits))
    }

    fn measure_statement(&mut self) -> Result<Statement, ParseError> {
        let qubit = self.primary_expr()?;
        self.consume(&TokenKind::Arrow, "expected '->' after qubit in measure statement")?;
        let bit = self.primary_expr()?;
        self.consume(&TokenKind::Semicolon, "expected ';' after measure statement")?;
        Ok(Statement::Measure { qubit, bit })
    }

    fn reset_statement(&mut self) -> Result<Statement, ParseError> {
        let qubit = self.primary_expr()?;
        self.consume(&TokenKind::Semicolon, "expected ';' after reset statement")?;
        Ok(Statement::Reset(qubit))
    }

    fn if_statement(&mut self) -> Result<Statement, ParseError> {
        self.consume(&TokenKind::LParen, "expected '(' after if")?;
        let creg = self.consume_identifier("expected classical register name")?;
        self.consume(&TokenKind::Equals, "expected '==' after register name")?;
        let value = self.integer_literal("expected integer after '=='")?;
        self.consume(&TokenKind::RParen, "expected ')' after condition")?;
        let then_branch = Box::new(self.statement()?);
        Ok(Statement::If { creg, value, then_branch })
    }

    fn block_statement(&mut self) -> Result<Statement, ParseError> {
        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.declaration()?);
        }
        self.consume(&TokenKind::RBrace, "expected '}' after block")?;
        Ok(Statement::Block(statements))
    }

    fn gate_statement(&mut self) -> Result<Statement, ParseError> {
        let name_token = self.peek().clone();
        let name = self.consume_identifier("expected gate name")?;

        if matches!(name.as_str(), "t_pauli" | "s_pauli" | "z_pauli" | "m_pauli") {
            let sign = if self.matches(&TokenKind::Plus) {
                '+'
            } else if self.matches(&TokenKind::Minus) {
                '-'
            } else {
                '+'
            };
            let body = self.consume_identifier(&format!("expected Pauli string after {name}: e.g. +XYZI"))?;
            self.consume(&TokenKind::Semicolon, "expected ';' after Pauli gate")?;
            return Ok(Statement::Pauli { gate_name: name, pauli_string: format!("{sign}{body}") });
        }

        let mut params = Vec::new();
        if self.matches(&TokenKind::LParen) {
            if !self.check(&TokenKind::RParen) {
                params.push(self.expression()?);
                while self.matches(&TokenKind::Comma) {
                    params.push(self.expression()?);
                }
            }
            self.consume(&TokenKind::RParen, "expected ')' after gate parameters")?;
        }

        let mut qubits = vec![self.primary_expr()?];
        while self.matches(&TokenKind::Comma) {
            qubits.push(self.primary_expr()?);
        }
        self.consume(&TokenKind::Semicolon, "expected ';' after gate application")?;
        let _ = &name_token;
        Ok(Statement::Gate(GateCall { name, params, qubits }))
    }

    fn expression(&mut self) -> Result<Expr, ParseError> {
        self.additive_expr()
    }

    fn additive_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.multiplicative_expr()?;
        loop {
            let op = if self.matches(&TokenKind::Plus) {
                BinOp::Plus
            } else if self.matches(&TokenKind::Minus) {
                BinOp::Minus
            } else {
                break;
            };
            let right = self.multiplicative_expr()?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(right));
        }
        Ok(expr)
    }

    fn multiplicative_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.unary_expr()?;
        loop {
            let op = if self.matches(&TokenKind::Times) {
                BinOp::Multiply
            } else if self.matches(&TokenKind::Divide) {
                BinOp::Divide
            } else {
                break;
            };
            let right = self.unary_expr()?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(right));
        }
        Ok(expr)
    }

    fn unary_expr(&mut self) -> Result<Expr, ParseError> {
        if self.matches(&TokenKind::Minus) {
            let right = self.unary_expr()?;
            return Ok(Expr::Binary(Box::new(Expr::Number(0.0)), BinOp::Minus, Box::new(right)));
        }
        self.power_expr()
    }

    fn power_expr(&mut self) -> Result<Expr, ParseError> {
        let expr = self.primary_expr()?;
        if self.matches(&TokenKind::Power) {
            let right = self.unary_expr()?;
            return Ok(Expr::Binary(Box::new(expr), BinOp::Power, Box::new(right)));
        }
        Ok(expr)
    }

    fn primary_expr(&mut self) -> Result<Expr, ParseError> {
        match self.peek().kind.clone() {
            TokenKind::Integer(v) => {
                self.advance();
                Ok(Expr::Number(v as f64))
            }
            TokenKind::Real(v) => {
                self.advance();
                Ok(Expr::Number(v))
            }
            TokenKind::Pi => {
                self.advance();
                Ok(Expr::Pi)
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume(&TokenKind::RParen, "expected ')' after expression")?;
                Ok(Expr::Paren(Box::new(expr)))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if self.matches(&TokenKind::LBracket) {
                    let index = self.expression()?;
                    self.consume(&TokenKind::RBracket, "expected ']' after index")?;
                    Ok(Expr::Index(name, Box::new(index)))
                } else {
                    Ok(Expr::Variable(name))
                }
            }
            _ => Err(self.error("expected expression")),
        }
    }
}

/// Tokenizes and parses `source` into a [`Program`].
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = crate::lexer::Lexer::new(source).tokenize()?;
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bell_circuit() {
        let program = parse("OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[2];\ncreg c[2];\nh q[0];\ncx q[0],q[1];\nmeasure q[0] -> c[0];\n").unwrap();
        assert_eq!(program.statements.len(), 7);
    }

    #[test]
    fn parses_t_pauli_with_default_sign() {
        let program = parse("t_pauli XYZI;").unwrap();
        match &program.statements[0] {
            Statement::Pauli { gate_name, pauli_string } => {
                assert_eq!(gate_name, "t_pauli");
                assert_eq!(pauli_string, "+XYZI");
            }
            other => panic!("expected Pauli statement, got {other:?}"),
        }
    }

    #[test]
    fn parses_gate_declaration_and_call() {
        let src = "gate bell a,b { h a; cx a,b; }\nqreg q[2];\nbell q[0],q[1];\n";
        let program = parse(src).unwrap();
        assert_eq!(program.statements.len(), 3);
        assert!(matches!(program.statements[0], Statement::GateDecl(_)));
    }

    #[test]
    fn reports_error_with_line_and_column() {
        let err = parse("qreg q[2]\n").unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn parses_if_statement_without_lowering_it() {
        let program = parse("if (c==1) x q[0];").unwrap();
        assert!(matches!(program.statements[0], Statement::If { .. }));
    }

    #[test]
    fn parses_power_expression_right_associatively() {
        let program = parse("rz(2^3^2) q[0];").unwrap();
        match &program.statements[0] {
            Statement::Gate(call) => assert_eq!(call.params[0].evaluate(), 2.0_f64.powf(3.0_f64.powf(2.0))),
            other => panic!("expected gate statement, got {other:?}"),
        }
    }
}
