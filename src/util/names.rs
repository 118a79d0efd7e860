/// prefix of every compiler-generated identifier, source programs cannot declare names starting with it
pub const RESERVED_PREFIX: &str = "__c2lua_";

/// check if the identifier belongs to the compiler-generated namespace
pub fn is_reserved(ident: &str) -> bool {
    ident.starts_with(RESERVED_PREFIX)
}

/// builds an identifier inside the reserved namespace
pub fn reserved(suffix: &str) -> String {
    format!("{}{}", RESERVED_PREFIX, suffix)
}
