use crate::frontend::ast::{Keyed, Program, Type};
use crate::frontend::error::{FrontendError, FrontendErrorKind};
use crate::frontend::typechecker::util::{is_assignable, Signature};
use crate::meta::{GetLocation, LocationMeta, Meta};
use crate::util::env::{Env, UniqueEnv};
use crate::util::names::is_reserved;

pub type TypeCheckErrors = Vec<FrontendError<LocationMeta>>;

#[derive(Debug, PartialEq)]
pub struct TypeChecker<'prog> {
    /// environment containing builtin functions
    builtins: &'prog Env<Signature>,

    /// signatures of all functions defined in the program
    functions: Env<Signature>,

    /// one environment per nested scope, the last one is the innermost
    scopes: Vec<Env<Type>>,

    /// return type of the function that is currently checked
    current_ret: Type,
}

impl<'p> TypeChecker<'p> {
    pub fn new(builtins: &'p Env<Signature>) -> Self {
        Self { builtins, functions: Env::new(), scopes: vec![], current_ret: Type::Void }
    }

    /// register signatures of all functions, so they can be called before their definition
    pub fn declare_functions(&mut self, program: &Program<LocationMeta>) -> Result<(), TypeCheckErrors> {
        let mut errors = Vec::new();
        for func in program.functions.iter() {
            let ident = func.get_key();
            if self.builtins.contains_key(ident) {
                let kind = FrontendErrorKind::EnvError {
                    message: format!("Function {} shadows built-in function", ident)
                };
                errors.push(FrontendError::new(kind, func.get_location()));
            } else if let Err(e) = self.check_identifier(ident, &func.get_location()) {
                errors.push(e);
            } else {
                let signature = Meta::new(Signature::from(func), func.get_location());
                if let Err(e) = self.functions.insert_unique(ident.clone(), signature) {
                    errors.push(e);
                }
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn set_return_type(&mut self, t: Type) {
        self.current_ret = t;
    }

    pub fn get_return_type(&self) -> &Type {
        &self.current_ret
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(Env::new());
    }

    pub fn exit_scope(&mut self) {
        self.scopes.pop();
    }

    /// get signature of a builtin or user-defined function
    pub fn get_function(&self, ident: &String, loc: &LocationMeta) -> Result<Signature, TypeCheckErrors> {
        match self.functions.get(ident).or_else(|| self.builtins.get(ident)) {
            Some(signature) => Ok(signature.clone()),
            None => {
                let kind = FrontendErrorKind::EnvError {
                    message: format!("Undeclared function {}", ident)
                };
                Err(vec![FrontendError::new(kind, loc.clone())])
            }
        }
    }

    /// get type of the variable visible from the current scope
    pub fn get_variable(&self, ident: &String, loc: &LocationMeta) -> Result<Type, TypeCheckErrors> {
        for scope in self.scopes.iter().rev() {
            if let Some(t) = scope.get(ident) {
                return Ok(t.clone());
            }
        }
        let kind = FrontendErrorKind::EnvError {
            message: format!("Undeclared variable {}", ident)
        };
        Err(vec![FrontendError::new(kind, loc.clone())])
    }

    /// declare a variable in the innermost scope
    pub fn declare_variable(&mut self, ident: &String, t: Type, loc: &LocationMeta) -> Result<(), TypeCheckErrors> {
        self.check_identifier(ident, loc).map_err(|e| vec![e])?;
        if t == Type::Void {
            let kind = FrontendErrorKind::EnvError {
                message: format!("Variable {} cannot have type void", ident)
            };
            return Err(vec![FrontendError::new(kind, loc.clone())]);
        }
        match self.scopes.last_mut() {
            Some(scope) => scope
                .insert_unique(ident.clone(), Meta::new(t, loc.clone()))
                .map_err(|e| vec![e]),
            None => unreachable!("variables are always declared inside a function scope"),
        }
    }

    /// names from the compiler namespace are reserved for generated code
    fn check_identifier(&self, ident: &str, loc: &LocationMeta) -> Result<(), FrontendError<LocationMeta>> {
        if is_reserved(ident) {
            let kind = FrontendErrorKind::EnvError {
                message: format!("Identifier {} uses a reserved prefix", ident)
            };
            Err(FrontendError::new(kind, loc.clone()))
        } else {
            Ok(())
        }
    }

    /// check if rvalue can be assigned to lvalue
    pub fn check_assignment(&self, lvalue: &Type, rvalue: &Type, loc: &LocationMeta) -> Result<(), TypeCheckErrors> {
        if is_assignable(lvalue, rvalue) {
            Ok(())
        } else {
            let kind = FrontendErrorKind::TypeError {
                expected: lvalue.clone(),
                actual: rvalue.clone()
            };
            Err(vec![FrontendError::new(kind, loc.clone())])
        }
    }

    /// loop conditions can be booleans or integers (compared with 0)
    pub fn check_condition(&self, t: &Type, loc: &LocationMeta) -> Result<(), TypeCheckErrors> {
        if *t == Type::Bool || t.is_integer() || *t == Type::Unknown {
            Ok(())
        } else {
            let kind = FrontendErrorKind::TypeError {
                expected: Type::Bool,
                actual: t.clone()
            };
            Err(vec![FrontendError::new(kind, loc.clone())])
        }
    }
}
