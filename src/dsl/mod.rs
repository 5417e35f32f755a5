//! Text format for describing an analysis scenario.
//!
//! A scenario names the machine constants and either the switchable load
//! network or a directly chosen operating point. The format is line-oriented
//! and human-editable.
//!
//! # Grammar Overview
//!
//! ```text
//! scenario    = { line }
//! line        = comment | directive | component | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = '.machine' pair+ | '.voltage' number | '.point' pair+
//! component   = ('LOAD' | 'CAP') name number [state]
//!             | prefixed_name number [state]
//! pair        = identifier '=' number
//! state       = 'on' | 'off'
//! prefixed_name = ('R' | 'C') { letter | digit | '_' }
//!
//! number      = ['-'|'+'] digit+ ['.' digit*] [('e'|'E') ['-'|'+'] digit+] [suffix]
//! suffix      = 'u' | 'm' | 'k' | 'M'
//! ```
//!
//! # Directives
//!
//! | Directive | Description | Syntax |
//! |-----------|-------------|--------|
//! | .machine | Override machine constants | `.machine Xd=1.8 Xdp=0.3 XL=5 Td0p=5 Tq0p=1` |
//! | .voltage | Reference voltage V (default 1.0) | `.voltage <value>` |
//! | .point | Direct operating point | `.point G=<g> Bc=<bc>` |
//!
//! # Example
//!
//! ```text
//! # Generator feeding a cable-heavy island
//! .machine XL=5.0
//! .voltage 1.0
//!
//! LOAD motor   0.06
//! LOAD heater  0.04 off
//! CAP  bank1   0.12
//! C2           0.03
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a scenario string into an AST.
pub fn parse(input: &str) -> Result<ScenarioAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a scenario file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<ScenarioAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::GenstabError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
