use crate::expression::ast::{BinaryOp, Expr, Literal, ObjectMember, Property, UnaryOp};
use crate::expression::error::ExprErrorKind;
use crate::expression::lexer::{Token, TokenKind, lex};

const ASSIGNMENT_OPS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "**=", "<<=", ">>=", ">>>=", "&=", "|=", "^=", "&&=", "||=",
    "??=",
];

/// Parse `src` into an expression tree.
///
/// Grammar nesting is capped at twice `max_depth`: redundant parentheses add grammar levels but
/// no tree depth, and the validator enforces the exact tree bound afterwards.
pub(crate) fn parse_expression(src: &str, max_depth: usize) -> Result<Expr, ExprErrorKind> {
    let tokens = lex(src)?;
    let mut p = Parser {
        tokens,
        pos: 0,
        depth: 0,
        limit: max_depth.saturating_mul(2),
        max_depth,
    };
    if p.at(&TokenKind::Eof) {
        return Err(ExprErrorKind::parse(0, "empty expression"));
    }
    let expr = p.parse_sequence()?;
    if !p.at(&TokenKind::Eof) {
        return Err(p.unexpected());
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    limit: usize,
    max_depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // The lexer always terminates the stream with Eof and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn at(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<(), ExprErrorKind> {
        if self.eat(kind) {
            Ok(())
        } else {
            let tok = self.peek();
            Err(ExprErrorKind::parse(
                tok.span.start,
                format!("expected {what}, found {}", describe(&tok.kind)),
            ))
        }
    }

    fn unexpected(&self) -> ExprErrorKind {
        let tok = self.peek();
        ExprErrorKind::parse(
            tok.span.start,
            format!("unexpected {}", describe(&tok.kind)),
        )
    }

    fn check_depth(&self, depth: usize) -> Result<(), ExprErrorKind> {
        if depth > self.limit {
            Err(ExprErrorKind::TooDeep {
                max: self.max_depth,
            })
        } else {
            Ok(())
        }
    }

    /// Run `f` one grammar level deeper.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ExprErrorKind>,
    ) -> Result<T, ExprErrorKind> {
        self.depth += 1;
        let out = self.check_depth(self.depth).and_then(|()| f(self));
        self.depth -= 1;
        out
    }

    fn parse_sequence(&mut self) -> Result<Expr, ExprErrorKind> {
        let first = self.parse_assignment()?;
        if !self.at(&TokenKind::Comma) {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.eat(&TokenKind::Comma) {
            items.push(self.parse_assignment()?);
        }
        Ok(Expr::Sequence(items))
    }

    fn parse_assignment(&mut self) -> Result<Expr, ExprErrorKind> {
        let target = self.parse_conditional()?;
        let op = match self.peek().kind {
            TokenKind::Op(op) if ASSIGNMENT_OPS.contains(&op) => op,
            _ => return Ok(target),
        };
        self.advance();
        let value = self.nested(Self::parse_assignment)?;
        Ok(Expr::Assignment {
            op,
            target: Box::new(target),
            value: Box::new(value),
        })
    }

    fn parse_conditional(&mut self) -> Result<Expr, ExprErrorKind> {
        let test = self.parse_binary(1)?;
        if !self.eat(&TokenKind::Question) {
            return Ok(test);
        }
        let consequent = self.nested(Self::parse_assignment)?;
        self.expect(&TokenKind::Colon, "':' in conditional expression")?;
        let alternate = self.nested(Self::parse_assignment)?;
        Ok(Expr::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    fn peek_binary(&self) -> Option<BinaryOp> {
        match self.peek().kind {
            TokenKind::Op(op) => BinaryOp::from_token(op),
            _ => None,
        }
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ExprErrorKind> {
        let mut left = self.parse_unary()?;
        // Left-associative chains deepen the tree without recursing here.
        let mut chain = 0usize;
        while let Some(op) = self.peek_binary() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            chain += 1;
            self.check_depth(self.depth + chain)?;
            let next_min = if op.is_right_assoc() { prec } else { prec + 1 };
            let right = self.nested(|p| p.parse_binary(next_min))?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprErrorKind> {
        let TokenKind::Op(op) = self.peek().kind else {
            return self.parse_postfix();
        };
        if let Some(unary) = UnaryOp::from_token(op) {
            self.advance();
            let argument = self.nested(Self::parse_unary)?;
            return Ok(Expr::Unary {
                op: unary,
                argument: Box::new(argument),
            });
        }
        if op == "++" || op == "--" {
            self.advance();
            let argument = self.nested(Self::parse_unary)?;
            return Ok(Expr::Update {
                op,
                prefix: true,
                argument: Box::new(argument),
            });
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr, ExprErrorKind> {
        let mut expr = self.parse_primary()?;
        let mut chain = 0usize;
        loop {
            let kind = self.peek().kind.clone();
            match kind {
                TokenKind::Dot => {
                    self.advance();
                    let name = self.parse_property_name()?;
                    expr = Expr::Member {
                        object: Box::new(expr),
                        property: Box::new(Expr::Identifier(name)),
                        computed: false,
                    };
                }
                TokenKind::LBracket => {
                    self.advance();
                    let property = self.nested(Self::parse_sequence)?;
                    self.expect(&TokenKind::RBracket, "']'")?;
                    expr = Expr::Member {
                        object: Box::new(expr),
                        property: Box::new(property),
                        computed: true,
                    };
                }
                TokenKind::LParen => {
                    self.advance();
                    let arguments = self.parse_arguments()?;
                    expr = Expr::Call {
                        callee: Box::new(expr),
                        arguments,
                    };
                }
                TokenKind::Op(op @ ("++" | "--")) => {
                    self.advance();
                    return Ok(Expr::Update {
                        op,
                        prefix: false,
                        argument: Box::new(expr),
                    });
                }
                _ => return Ok(expr),
            }
            chain += 1;
            self.check_depth(self.depth + chain)?;
        }
    }

    /// Property name after `.`: identifiers and keywords alike.
    fn parse_property_name(&mut self) -> Result<String, ExprErrorKind> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::Ident(name) => Ok(name),
            TokenKind::True => Ok("true".to_owned()),
            TokenKind::False => Ok("false".to_owned()),
            TokenKind::Null => Ok("null".to_owned()),
            TokenKind::This => Ok("this".to_owned()),
            TokenKind::New => Ok("new".to_owned()),
            other => Err(ExprErrorKind::parse(
                tok.span.start,
                format!("expected property name, found {}", describe(&other)),
            )),
        }
    }

    /// Argument list after the opening `(`, through the closing `)`.
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ExprErrorKind> {
        let mut args = Vec::new();
        if self.eat(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.nested(Self::parse_element)?);
            if self.eat(&TokenKind::RParen) {
                return Ok(args);
            }
            self.expect(&TokenKind::Comma, "',' or ')' in argument list")?;
        }
    }

    /// Array element or call argument: an assignment expression or a spread.
    fn parse_element(&mut self) -> Result<Expr, ExprErrorKind> {
        if self.eat(&TokenKind::Ellipsis) {
            let inner = self.nested(Self::parse_assignment)?;
            return Ok(Expr::Spread(Box::new(inner)));
        }
        self.parse_assignment()
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprErrorKind> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::Number(n) => Ok(Expr::Literal(Literal::Number(n))),
            TokenKind::Str(s) => Ok(Expr::Literal(Literal::String(s))),
            TokenKind::True => Ok(Expr::Literal(Literal::Bool(true))),
            TokenKind::False => Ok(Expr::Literal(Literal::Bool(false))),
            TokenKind::Null => Ok(Expr::Literal(Literal::Null)),
            TokenKind::Ident(name) => Ok(Expr::Identifier(name)),
            TokenKind::This => Ok(Expr::This),
            TokenKind::New => self.nested(Self::parse_new),
            TokenKind::LParen => {
                let inner = self.nested(Self::parse_sequence)?;
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::LBracket => self.nested(Self::parse_array),
            TokenKind::LBrace => self.nested(Self::parse_object),
            other => Err(ExprErrorKind::parse(
                tok.span.start,
                format!("unexpected {}", describe(&other)),
            )),
        }
    }

    /// `new` target: a primary with `.name` accesses, then an optional argument list.
    fn parse_new(&mut self) -> Result<Expr, ExprErrorKind> {
        let mut callee = self.parse_primary()?;
        while self.eat(&TokenKind::Dot) {
            let name = self.parse_property_name()?;
            callee = Expr::Member {
                object: Box::new(callee),
                property: Box::new(Expr::Identifier(name)),
                computed: false,
            };
        }
        let arguments = if self.eat(&TokenKind::LParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(Expr::New {
            callee: Box::new(callee),
            arguments,
        })
    }

    /// Array literal after the opening `[`.
    fn parse_array(&mut self) -> Result<Expr, ExprErrorKind> {
        let mut items = Vec::new();
        loop {
            if self.eat(&TokenKind::RBracket) {
                return Ok(Expr::Array(items));
            }
            if self.eat(&TokenKind::Comma) {
                items.push(None);
                continue;
            }
            items.push(Some(self.parse_element()?));
            if self.eat(&TokenKind::RBracket) {
                return Ok(Expr::Array(items));
            }
            self.expect(&TokenKind::Comma, "',' or ']' in array literal")?;
        }
    }

    /// Object literal after the opening `{`.
    fn parse_object(&mut self) -> Result<Expr, ExprErrorKind> {
        let mut members = Vec::new();
        loop {
            if self.eat(&TokenKind::RBrace) {
                return Ok(Expr::Object(members));
            }
            if self.eat(&TokenKind::Ellipsis) {
                let inner = self.nested(Self::parse_assignment)?;
                members.push(ObjectMember::Spread(inner));
            } else {
                members.push(ObjectMember::Property(self.parse_property()?));
            }
            if self.eat(&TokenKind::RBrace) {
                return Ok(Expr::Object(members));
            }
            self.expect(&TokenKind::Comma, "',' or '}' in object literal")?;
        }
    }

    fn parse_property(&mut self) -> Result<Property, ExprErrorKind> {
        let start = self.peek().span.start;
        let (key, computed) = match self.peek().kind.clone() {
            TokenKind::LBracket => {
                self.advance();
                let key = self.nested(Self::parse_assignment)?;
                self.expect(&TokenKind::RBracket, "']' after computed key")?;
                (key, true)
            }
            TokenKind::Str(s) => {
                self.advance();
                (Expr::Literal(Literal::String(s)), false)
            }
            TokenKind::Number(n) => {
                self.advance();
                (Expr::Literal(Literal::Number(n)), false)
            }
            _ => (Expr::Identifier(self.parse_property_name()?), false),
        };

        if self.eat(&TokenKind::Colon) {
            let value = self.nested(Self::parse_assignment)?;
            return Ok(Property {
                key,
                value,
                computed,
                shorthand: false,
            });
        }

        match key {
            Expr::Identifier(_) if !computed => Ok(Property {
                value: key.clone(),
                key,
                computed: false,
                shorthand: true,
            }),
            _ => Err(ExprErrorKind::parse(start, "expected ':' after object key")),
        }
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Ident(name) => format!("identifier `{name}`"),
        TokenKind::Number(n) => format!("number {n}"),
        TokenKind::Str(_) => "string literal".to_owned(),
        TokenKind::True => "`true`".to_owned(),
        TokenKind::False => "`false`".to_owned(),
        TokenKind::Null => "`null`".to_owned(),
        TokenKind::This => "`this`".to_owned(),
        TokenKind::New => "`new`".to_owned(),
        TokenKind::LParen => "'('".to_owned(),
        TokenKind::RParen => "')'".to_owned(),
        TokenKind::LBracket => "'['".to_owned(),
        TokenKind::RBracket => "']'".to_owned(),
        TokenKind::LBrace => "'{'".to_owned(),
        TokenKind::RBrace => "'}'".to_owned(),
        TokenKind::Comma => "','".to_owned(),
        TokenKind::Dot => "'.'".to_owned(),
        TokenKind::Ellipsis => "'...'".to_owned(),
        TokenKind::Question => "'?'".to_owned(),
        TokenKind::Colon => "':'".to_owned(),
        TokenKind::Op(op) => format!("operator '{op}'"),
        TokenKind::Eof => "end of expression".to_owned(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parser.rs"]
mod tests;
