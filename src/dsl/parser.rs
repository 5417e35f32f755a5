//! Parser for the scenario format.

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::error::{GenstabError, Result};
use crate::network::ComponentKind;

/// Parser for scenario descriptions.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire scenario.
    pub fn parse(&mut self) -> Result<ScenarioAst> {
        let mut ast = ScenarioAst::new();

        while self.current.kind != TokenKind::Eof {
            match self.current.kind {
                TokenKind::Newline => {
                    self.advance()?;
                    continue;
                }
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier => {
                    let component = self.parse_component()?;
                    ast.components.push(component);
                }
                _ => {
                    return Err(GenstabError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            self.end_of_line()?;
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(GenstabError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn end_of_line(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Newline => self.advance(),
            TokenKind::Eof => Ok(()),
            _ => Err(GenstabError::parse(
                self.current.line,
                format!("trailing token: {:?}", self.current.text),
            )),
        }
    }

    fn number(&mut self) -> Result<f64> {
        let tok = self.expect(TokenKind::Number)?;
        let value = parse_value(&tok.text)
            .ok_or_else(|| GenstabError::parse(tok.line, format!("invalid number: {}", tok.text)))?;
        if !value.is_finite() {
            return Err(GenstabError::parse(
                tok.line,
                format!("number out of range: {}", tok.text),
            ));
        }
        Ok(value)
    }

    /// Parse `key=value` pairs up to the end of the line.
    fn key_values(&mut self) -> Result<Vec<ParamDef>> {
        let mut pairs = Vec::new();
        while self.current.kind == TokenKind::Identifier {
            let key = self.expect(TokenKind::Identifier)?;
            self.expect(TokenKind::Equals)?;
            let value = self.number()?;
            pairs.push(ParamDef {
                key: key.text,
                value,
                line: key.line,
            });
        }
        Ok(pairs)
    }

    fn parse_directive(&mut self, ast: &mut ScenarioAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".machine" => {
                let pairs = self.key_values()?;
                if pairs.is_empty() {
                    return Err(GenstabError::parse(line, ".machine needs key=value pairs"));
                }
                ast.machine.extend(pairs);
            }
            ".voltage" => {
                if ast.voltage.is_some() {
                    return Err(GenstabError::parse(line, "duplicate .voltage directive"));
                }
                let value = self.number()?;
                ast.voltage = Some(VoltageDef { value, line });
            }
            ".point" => {
                if ast.point.is_some() {
                    return Err(GenstabError::parse(line, "duplicate .point directive"));
                }
                let mut g = None;
                let mut bc = None;
                for pair in self.key_values()? {
                    match pair.key.to_ascii_lowercase().as_str() {
                        "g" => g = Some(pair.value),
                        "bc" | "b" => bc = Some(pair.value),
                        other => {
                            return Err(GenstabError::parse(
                                line,
                                format!("unknown .point key '{}' (expected G, Bc)", other),
                            ));
                        }
                    }
                }
                let (Some(g), Some(bc)) = (g, bc) else {
                    return Err(GenstabError::parse(line, ".point needs both G and Bc"));
                };
                ast.point = Some(PointDef { g, bc, line });
            }
            _ => {
                return Err(GenstabError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    fn parse_component(&mut self) -> Result<ComponentDef> {
        let first = self.expect(TokenKind::Identifier)?;
        let line = first.line;

        // Keywords first so LOAD/CAP are never read as prefixed names
        let (kind, name) = if let Some(kind) = ComponentKind::from_keyword(&first.text) {
            let name = self.expect(TokenKind::Identifier)?.text;
            (kind, name)
        } else {
            let prefix = first.text.chars().next().unwrap_or('?');
            let kind = ComponentKind::from_prefix(prefix).ok_or_else(|| {
                GenstabError::UnknownComponentType {
                    component_type: first.text.clone(),
                    line,
                }
            })?;
            (kind, first.text)
        };

        if self.current.kind != TokenKind::Number {
            return Err(GenstabError::invalid_component(&name, line, "missing magnitude"));
        }
        let magnitude = self.number()?;

        let connected = if self.current.kind == TokenKind::Identifier {
            let state = self.expect(TokenKind::Identifier)?.text;
            match state.to_ascii_lowercase().as_str() {
                "on" => true,
                "off" => false,
                _ => {
                    return Err(GenstabError::invalid_component(
                        &name,
                        line,
                        format!("expected 'on' or 'off', got '{}'", state),
                    ));
                }
            }
        } else {
            true
        };

        Ok(ComponentDef {
            kind,
            name,
            magnitude,
            connected,
            line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<ScenarioAst> {
        super::super::parse(input)
    }

    #[test]
    fn test_parse_components() {
        let ast = parse("LOAD motor 0.06\nCAP bank1 0.12 off\nR2 10m\nC2 0.03 on").unwrap();
        assert_eq!(ast.components.len(), 4);

        assert_eq!(ast.components[0].kind, ComponentKind::Load);
        assert_eq!(ast.components[0].name, "motor");
        assert!(ast.components[0].connected);

        assert_eq!(ast.components[1].kind, ComponentKind::Capacitor);
        assert!(!ast.components[1].connected);

        assert_eq!(ast.components[2].kind, ComponentKind::Load);
        assert_eq!(ast.components[2].name, "R2");
        assert!((ast.components[2].magnitude - 0.01).abs() < 1e-12);

        assert_eq!(ast.components[3].kind, ComponentKind::Capacitor);
        assert_eq!(ast.components[3].line, 4);
    }

    #[test]
    fn test_parse_directives() {
        let input = ".machine Xd=2.0 XL=4\n.voltage 1.05\n.point G=0.1 Bc=0.15\n";
        let ast = parse(input).unwrap();
        assert_eq!(ast.machine.len(), 2);
        assert_eq!(ast.machine[0].key, "Xd");
        assert_eq!(ast.machine[1].value, 4.0);
        assert_eq!(ast.voltage.map(|v| v.value), Some(1.05));
        let point = ast.point.unwrap();
        assert_eq!((point.g, point.bc), (0.1, 0.15));
    }

    #[test]
    fn test_parse_with_comments() {
        let input = "# island grid\nLOAD motor 0.06 ; main drive\n\n";
        let ast = parse(input).unwrap();
        assert_eq!(ast.components.len(), 1);
    }

    #[test]
    fn test_unknown_component_type() {
        assert!(matches!(
            parse("X1 0.5"),
            Err(GenstabError::UnknownComponentType { line: 1, .. })
        ));
    }

    #[test]
    fn test_missing_magnitude_and_bad_state() {
        assert!(matches!(
            parse("LOAD motor"),
            Err(GenstabError::InvalidComponent { .. })
        ));
        assert!(matches!(
            parse("CAP bank 0.1 maybe"),
            Err(GenstabError::InvalidComponent { .. })
        ));
    }

    #[test]
    fn test_point_needs_both_keys() {
        assert!(matches!(
            parse(".point G=0.1"),
            Err(GenstabError::ParseError { .. })
        ));
        assert!(matches!(
            parse(".point G=0.1 Bc=0.2 X=1"),
            Err(GenstabError::ParseError { .. })
        ));
    }

    #[test]
    fn test_leading_dot_magnitude() {
        let ast = parse("LOAD m .5\nCAP c .25 off").unwrap();
        assert_eq!(ast.components[0].magnitude, 0.5);
        assert_eq!(ast.components[1].magnitude, 0.25);
        assert!(!ast.components[1].connected);
    }

    #[test]
    fn test_out_of_range_number_rejected() {
        assert!(matches!(
            parse(".point G=1e400 Bc=0"),
            Err(GenstabError::ParseError { line: 1, .. })
        ));
        assert!(matches!(
            parse("LOAD m 1e400"),
            Err(GenstabError::ParseError { .. })
        ));
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        assert!(matches!(
            parse(".voltage 1.0 2.0"),
            Err(GenstabError::ParseError { .. })
        ));
        assert!(parse(".frequency 50").is_err());
    }
}
