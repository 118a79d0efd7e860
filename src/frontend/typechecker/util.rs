use std::iter::FromIterator;

use crate::frontend::ast::{BinaryOperator, Function, Program, Type};
use crate::frontend::error::{FrontendError, FrontendErrorKind};
use crate::meta::{GetLocation, LocationMeta};
use crate::util::env::Env;

/// argument and return types of a callable function
#[derive(Debug, PartialEq, Clone)]
pub struct Signature {
    pub args: Vec<Type>,
    pub ret: Type,
    /// accepts any number of additional arguments after `args`
    pub variadic: bool,
}

impl Signature {
    pub fn new(args: Vec<Type>, ret: Type) -> Self {
        Self { args, ret, variadic: false }
    }

    pub fn variadic(args: Vec<Type>, ret: Type) -> Self {
        Self { args, ret, variadic: true }
    }
}

impl<MetaT> From<&Function<MetaT>> for Signature {
    fn from(function: &Function<MetaT>) -> Self {
        Signature::new(function.item.arg_types(), function.item.ret.clone())
    }
}

/// get environment containing all builtin functions
pub fn get_builtins() -> Env<Signature> {
    let builtin_vec: Vec<(String, Signature)> = vec![
        (String::from("printf"), Signature::variadic(vec![Type::Str], Type::Int)),
        (String::from("puts"), Signature::new(vec![Type::Str], Type::Void)),
        (String::from("print_int"), Signature::new(vec![Type::Int], Type::Void)),
        (String::from("print_float"), Signature::new(vec![Type::Float], Type::Void)),
    ];
    Env::from_iter(builtin_vec.into_iter())
}

/// checks that main, if present, can be called by the generated entry point
pub fn check_main(program: &Program<LocationMeta>) -> Result<(), Vec<FrontendError<LocationMeta>>> {
    match program.get_function("main") {
        Some(func) if !func.item.args.is_empty() => {
            let kind = FrontendErrorKind::ArgumentError {
                message: String::from("Function 'main' cannot take any arguments")
            };
            Err(vec![FrontendError::new(kind, func.get_location())])
        }
        Some(func) if func.item.ret != Type::Int && func.item.ret != Type::Void => {
            let kind = FrontendErrorKind::TypeError {
                expected: Type::Int,
                actual: func.item.ret.clone()
            };
            Err(vec![FrontendError::new(kind, func.get_location())])
        }
        _ => Ok(()),
    }
}

/// check if a value of type `actual` can be stored in a variable of type `expected`
pub fn is_assignable(expected: &Type, actual: &Type) -> bool {
    if expected == actual || *expected == Type::Unknown || *actual == Type::Unknown {
        return true;
    }
    match expected {
        Type::Int | Type::Char => actual.is_integer(),
        Type::Float => actual.is_numeric(),
        _ => false,
    }
}

/// result type of a binary operation or the error kind describing the mismatch
pub fn binary_type(left: &Type, op: &BinaryOperator, right: &Type) -> Result<Type, FrontendErrorKind> {
    use BinaryOperator::*;

    if *left == Type::Unknown || *right == Type::Unknown {
        return Ok(Type::Unknown);
    }
    let mismatch = |expected: Type| {
        let actual = if expected == *left || (expected.is_numeric() && left.is_numeric()) {
            right.clone()
        } else {
            left.clone()
        };
        Err(FrontendErrorKind::TypeError { expected, actual })
    };
    match op {
        Plus if *left == Type::Str && *right == Type::Str => Ok(Type::Str),
        Plus | Minus | Times | Divide | Modulo => {
            if left.is_numeric() && right.is_numeric() {
                if *left == Type::Float || *right == Type::Float {
                    Ok(Type::Float)
                } else {
                    Ok(Type::Int)
                }
            } else {
                mismatch(Type::Int)
            }
        }
        Less | LessEqual | Greater | GreaterEqual => {
            if left.is_numeric() && right.is_numeric() {
                Ok(Type::Bool)
            } else {
                mismatch(Type::Int)
            }
        }
        Equal | NotEqual => {
            if (left.is_numeric() && right.is_numeric()) || left == right {
                Ok(Type::Bool)
            } else {
                mismatch(left.clone())
            }
        }
        And | Or => {
            let is_logical = |t: &Type| *t == Type::Bool || t.is_integer();
            if is_logical(left) && is_logical(right) {
                Ok(Type::Bool)
            } else {
                mismatch(Type::Bool)
            }
        }
    }
}
