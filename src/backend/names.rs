use std::collections::HashSet;

use crate::util::names::reserved;

/// lua keywords that are valid identifiers in the source language
const LUA_KEYWORDS: [&str; 22] = [
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// globals used by the generated code, user definitions cannot shadow them
const LUA_GLOBALS: [&str; 8] = ["io", "os", "math", "print", "string", "table", "_ENV", "_G"];

/// name of the variable or function in generated code
pub fn mangle(ident: &str) -> String {
    if LUA_KEYWORDS.contains(&ident) || LUA_GLOBALS.contains(&ident) {
        reserved(ident)
    } else {
        String::from(ident)
    }
}

/// name of a local variable or parameter in generated code,
/// functions are lua globals, so locals sharing their names are moved out of the way
pub fn mangle_variable(ident: &str, functions: &HashSet<String>) -> String {
    if functions.contains(ident) {
        reserved(&format!("var_{}", ident))
    } else {
        mangle(ident)
    }
}
