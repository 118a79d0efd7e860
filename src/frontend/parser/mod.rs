use lalrpop_util::lalrpop_mod;

use crate::frontend::error::FrontendError;
use crate::meta::LocationMeta;

use self::ast::{BinaryOperator, Expression, ExpressionKind, Program, StatementKind};
use self::c2lua::ProgramParser;

lalrpop_mod!(
    #[allow(clippy::all)]
    c2lua,
    "/frontend/parser/c2lua.rs"
);

pub mod ast;


pub type ParsedProgram = Program<LocationMeta>;
pub type ParserErrors = Vec<FrontendError<LocationMeta>>;


pub fn parse_program(source_code: String) -> Result<ParsedProgram, ParserErrors> {
    let parser = ProgramParser::new();
    parser.parse(&source_code)
        .map_err(|e| vec![FrontendError::from(e)])
}

/// shortcut used by the grammar for all binary operators
pub fn binary(
    offset: usize, left: Expression<LocationMeta>, op: BinaryOperator, right: Expression<LocationMeta>,
) -> Expression<LocationMeta> {
    let kind = ExpressionKind::Binary { left: Box::new(left), op, right: Box::new(right) };
    Expression::new(kind, LocationMeta::from(offset))
}

/// convert `target = expr` into a variable or array slot assignment
pub fn assignment(
    target: Expression<LocationMeta>, expr: Expression<LocationMeta>,
) -> Result<StatementKind<LocationMeta>, &'static str> {
    match target.item {
        ExpressionKind::Identifier { ident } => {
            Ok(StatementKind::Ass { ident, expr: Box::new(expr) })
        }
        ExpressionKind::Subscript { arr, idx } => match arr.item {
            ExpressionKind::Identifier { ident } => {
                Ok(StatementKind::ArrAss { ident, idx, expr: Box::new(expr) })
            }
            _ => Err("Only named arrays can be assigned to"),
        },
        _ => Err("Invalid assignment target"),
    }
}

/// desugar `x op= expr` (and `x++`, `x--`) into `x = x op expr`
pub fn compound_assignment(
    target: Expression<LocationMeta>, op: BinaryOperator, expr: Expression<LocationMeta>,
) -> Result<StatementKind<LocationMeta>, &'static str> {
    match &target.item {
        ExpressionKind::Identifier { .. } => {
            let offset = target.get_meta().offset;
            let value = binary(offset, target.clone(), op, expr);
            assignment(target, value)
        }
        _ => Err("Compound assignment is only supported for variables"),
    }
}

/// get the character represented by a char literal token (including quotes)
pub fn unescape_char(literal: &str) -> char {
    let inner = &literal[1..literal.len() - 1];
    let mut chars = inner.chars();
    match (chars.next(), chars.next()) {
        (Some('\\'), Some(escaped)) => match escaped {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            other => other,
        },
        (Some(c), _) => c,
        // the lexer never produces an empty char literal
        (None, _) => '\0',
    }
}
