use std::fmt;

use crate::meta::Meta;

/// trait for marking ast items that can searched by key (in an environment)
pub trait Keyed {
    fn get_key(&self) -> &String;
}

/// alias for all metadata containers attached to ast items
pub type AstItem<ItemT, MetaT> = Meta<ItemT, MetaT>;

impl<ItemT: Keyed, MetaT> Keyed for AstItem<ItemT, MetaT> {
    /// if item is keyed, the whole wrapper can also be keyed using same key
    fn get_key(&self) -> &String {
        self.item.get_key()
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Times,
    Divide,
    Modulo,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
    And,
    Or,
}

impl BinaryOperator {
    pub fn is_arithmetic(&self) -> bool {
        match self {
            BinaryOperator::Plus | BinaryOperator::Minus | BinaryOperator::Times
            | BinaryOperator::Divide | BinaryOperator::Modulo => true,
            _ => false,
        }
    }

    pub fn is_relational(&self) -> bool {
        match self {
            BinaryOperator::Less | BinaryOperator::LessEqual
            | BinaryOperator::Greater | BinaryOperator::GreaterEqual => true,
            _ => false,
        }
    }

    pub fn is_logical(&self) -> bool {
        *self == BinaryOperator::And || *self == BinaryOperator::Or
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum UnaryOperator {
    Neg,
    Not,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ExpressionKind<MetaT> {
    LitInt { val: i64 },
    /// parser never emits typed integers, typechecker converts this into LitInt of type Char
    LitChar { val: char },
    LitFloat { val: f64 },
    LitBool { val: bool },
    /// string contents as written in the source, escape sequences are kept
    LitStr { val: String },
    Identifier { ident: String },
    Unary { op: UnaryOperator, arg: Box<Expression<MetaT>> },
    Binary {
        left: Box<Expression<MetaT>>,
        op: BinaryOperator,
        right: Box<Expression<MetaT>>,
    },
    Call { ident: String, args: Vec<Box<Expression<MetaT>>> },
    ArrayLit { elements: Vec<Box<Expression<MetaT>>> },
    Subscript { arr: Box<Expression<MetaT>>, idx: Box<Expression<MetaT>> },
}

impl<MetaT> ExpressionKind<MetaT> {
    /// function calls are the only expressions that can have observable effects
    pub fn has_side_effects(&self) -> bool {
        match self {
            ExpressionKind::Call { .. } => true,
            ExpressionKind::Unary { arg, .. } => arg.item.has_side_effects(),
            ExpressionKind::Binary { left, right, .. } => {
                left.item.has_side_effects() || right.item.has_side_effects()
            }
            ExpressionKind::ArrayLit { elements } => {
                elements.iter().any(|e| e.item.has_side_effects())
            }
            ExpressionKind::Subscript { arr, idx } => {
                arr.item.has_side_effects() || idx.item.has_side_effects()
            }
            _ => false,
        }
    }
}

pub type Expression<MetaT> = AstItem<ExpressionKind<MetaT>, MetaT>;

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Type {
    /// basic types
    Int,
    Char,
    Float,
    Bool,
    Str,
    Void,

    Array { item_t: Box<Type> },

    /// unresolved type, expressions of this type are never touched by the optimizer
    Unknown,
}

impl Type {
    pub fn is_integer(&self) -> bool {
        *self == Type::Int || *self == Type::Char
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || *self == Type::Float
    }
}

impl Default for Type {
    fn default() -> Self {
        Type::Void
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Char => write!(f, "char"),
            Type::Float => write!(f, "float"),
            Type::Bool => write!(f, "bool"),
            Type::Str => write!(f, "string"),
            Type::Void => write!(f, "void"),
            Type::Array { item_t } => write!(f, "{}[]", item_t),
            Type::Unknown => write!(f, "<unknown>"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct BlockItem<MetaT> {
    pub stmts: Vec<Box<Statement<MetaT>>>
}

pub type Block<MetaT> = AstItem<BlockItem<MetaT>, MetaT>;

#[derive(Debug, PartialEq, Clone)]
pub enum StatementKind<MetaT> {
    Block { block: Block<MetaT> },
    /// for arrays `t` is the item type and `init` can only be an ArrayLit
    Decl {
        t: Type,
        ident: String,
        init: Option<Box<Expression<MetaT>>>,
        is_array: bool,
        size: Option<usize>,
        /// set by the typechecker, true if the variable is referenced after its declaration
        is_used: bool,
    },
    Ass { ident: String, expr: Box<Expression<MetaT>> },
    ArrAss { ident: String, idx: Box<Expression<MetaT>>, expr: Box<Expression<MetaT>> },
    Expr { expr: Box<Expression<MetaT>> },
    Return { expr: Option<Box<Expression<MetaT>>> },
    While { expr: Box<Expression<MetaT>>, stmt: Box<Statement<MetaT>> },
    For {
        init: Option<Box<Statement<MetaT>>>,
        cond: Option<Box<Expression<MetaT>>>,
        post: Option<Box<Statement<MetaT>>>,
        stmt: Box<Statement<MetaT>>,
    },
}

pub type Statement<MetaT> = AstItem<StatementKind<MetaT>, MetaT>;

#[derive(Debug, PartialEq, Hash, Clone)]
pub struct ArgItem { pub t: Type, pub ident: String }

pub type Arg<MetaT> = AstItem<ArgItem, MetaT>;

impl Keyed for ArgItem {
    fn get_key(&self) -> &String {
        &self.ident
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct FunctionItem<MetaT> {
    pub ret: Type,
    pub ident: String,
    pub args: Vec<Arg<MetaT>>,
    pub block: Block<MetaT>,
}

pub type Function<MetaT> = AstItem<FunctionItem<MetaT>, MetaT>;

impl<MetaT> FunctionItem<MetaT> {
    pub fn arg_types(&self) -> Vec<Type> {
        self.args.iter().map(|arg| arg.item.t.clone()).collect()
    }
}

impl<MetaT> Keyed for FunctionItem<MetaT> {
    fn get_key(&self) -> &String {
        &self.ident
    }
}

/// the result of parsing and all subsequent operations (ast root),
/// functions are kept in declaration order
#[derive(Debug, PartialEq, Clone)]
pub struct Program<MetaT> {
    pub functions: Vec<Function<MetaT>>,
}

impl<MetaT> Program<MetaT> {
    pub fn get_function(&self, ident: &str) -> Option<&Function<MetaT>> {
        self.functions.iter().find(|f| f.get_key() == ident)
    }
}
