use itertools::Itertools;

use crate::backend::emitter::Emitter;
use crate::backend::ir::Helper;
use crate::backend::names::mangle;
use crate::frontend::ast::{BinaryOperator, Expression, ExpressionKind, Type, UnaryOperator};
use crate::meta::{GetType, TypeMeta};

/// lua representation of a char literal, printable characters stay readable
fn char_literal(val: i64) -> String {
    match val {
        34 | 92 => format!("string.byte(\"\\{}\")", val as u8 as char),
        32..=126 => format!("string.byte(\"{}\")", val as u8 as char),
        _ => val.to_string(),
    }
}

fn float_literal(val: f64) -> String {
    if val.is_finite() {
        format!("{:?}", val)
    } else {
        String::from("math.huge")
    }
}

impl Emitter {
    pub fn compile_expression(&mut self, expr: &Expression<TypeMeta>) -> String {
        match &expr.item {
            ExpressionKind::LitInt { val } => match expr.get_type() {
                Type::Char => char_literal(*val),
                _ => val.to_string(),
            },
            ExpressionKind::LitChar { val } => char_literal(*val as i64),
            ExpressionKind::LitFloat { val } => float_literal(*val),
            ExpressionKind::LitBool { val } => val.to_string(),
            // escape sequences of the source language are valid in lua strings
            ExpressionKind::LitStr { val } => format!("\"{}\"", val),
            ExpressionKind::Identifier { ident } => self.variable_name(ident),
            ExpressionKind::Unary { op, arg } => {
                match op {
                    UnaryOperator::Not if arg.get_type().is_integer() => {
                        format!("{} == 0", self.compile_operand(arg))
                    }
                    _ => format!("{}{}", op, self.compile_operand(arg)),
                }
            }
            ExpressionKind::Binary { left, op, right } => {
                self.compile_binary(left, op, right, &expr.get_type())
            }
            ExpressionKind::Call { ident, args } => self.compile_call(ident, args),
            ExpressionKind::ArrayLit { elements } => {
                let elements = elements.iter()
                    .map(|e| self.compile_expression(e))
                    .collect::<Vec<_>>();
                format!("{{{}}}", elements.join(", "))
            }
            ExpressionKind::Subscript { arr, idx } => {
                format!("{}[{}]", self.compile_operand(arr), self.compile_index(idx))
            }
        }
    }

    /// operator expressions are wrapped in parentheses, so that lua precedence does not matter
    pub fn compile_operand(&mut self, expr: &Expression<TypeMeta>) -> String {
        let compiled = self.compile_expression(expr);
        match &expr.item {
            ExpressionKind::Unary { .. } | ExpressionKind::Binary { .. } => format!("({})", compiled),
            _ => compiled,
        }
    }

    /// value used as a condition, integers are compared with zero
    pub fn compile_condition(&mut self, expr: &Expression<TypeMeta>) -> String {
        if expr.get_type().is_integer() {
            format!("{} ~= 0", self.compile_operand(expr))
        } else {
            self.compile_expression(expr)
        }
    }

    /// lua tables are indexed from 1
    pub fn compile_index(&mut self, idx: &Expression<TypeMeta>) -> String {
        match (&idx.item, idx.get_type()) {
            (ExpressionKind::LitInt { val }, Type::Int) => (val + 1).to_string(),
            _ => format!("{} + 1", self.compile_operand(idx)),
        }
    }

    fn compile_binary(
        &mut self, left: &Expression<TypeMeta>, op: &BinaryOperator, right: &Expression<TypeMeta>, t: &Type,
    ) -> String {
        match op {
            BinaryOperator::And | BinaryOperator::Or => {
                let l = self.compile_logical_operand(left);
                let r = self.compile_logical_operand(right);
                format!("{} {} {}", l, op, r)
            }
            BinaryOperator::Plus if *t == Type::Str => {
                format!("{} .. {}", self.compile_operand(left), self.compile_operand(right))
            }
            BinaryOperator::Divide if t.is_integer() => {
                self.context.require_helper(Helper::IntDivision);
                format!("__c2lua_idiv({}, {})", self.compile_expression(left), self.compile_expression(right))
            }
            BinaryOperator::Modulo => {
                format!("math.fmod({}, {})", self.compile_expression(left), self.compile_expression(right))
            }
            _ => format!("{} {} {}", self.compile_operand(left), op, self.compile_operand(right)),
        }
    }

    fn compile_logical_operand(&mut self, expr: &Expression<TypeMeta>) -> String {
        if expr.get_type().is_integer() {
            format!("({})", self.compile_condition(expr))
        } else {
            self.compile_operand(expr)
        }
    }

    fn compile_call(&mut self, ident: &String, args: &[Box<Expression<TypeMeta>>]) -> String {
        let compiled_args = args.iter()
            .map(|arg| self.compile_expression(arg))
            .collect::<Vec<_>>();
        match ident.as_str() {
            "printf" => format!("io.write(string.format({}))", compiled_args.iter().join(", ")),
            "puts" | "print_int" | "print_float" => format!("print({})", compiled_args.iter().join(", ")),
            _ => format!("{}({})", mangle(ident), compiled_args.iter().join(", ")),
        }
    }
}
