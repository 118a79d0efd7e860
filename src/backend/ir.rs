/// single line of generated lua code
#[derive(Debug, PartialEq, Clone)]
pub struct Chunk {
    /// nesting level, rendered as indentation
    pub depth: usize,
    pub code: String,
}

impl Chunk {
    pub fn new(depth: usize, code: String) -> Self {
        Self { depth, code }
    }
}

/// runtime support functions, emitted before the program only when it uses them
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum Helper {
    /// integer division truncating towards zero, lua `//` rounds towards negative infinity
    IntDivision,
}

impl Helper {
    pub fn chunks(&self) -> Vec<Chunk> {
        let lines: &[(usize, &str)] = match self {
            Helper::IntDivision => &[
                (0, "local function __c2lua_idiv(a, b)"),
                (1, "local q = a // b"),
                (1, "if q < 0 and q * b ~= a then"),
                (2, "q = q + 1"),
                (1, "end"),
                (1, "return q"),
                (0, "end"),
            ],
        };
        lines.iter()
            .map(|(depth, code)| Chunk::new(*depth, String::from(*code)))
            .collect()
    }
}
