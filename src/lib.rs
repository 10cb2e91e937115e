pub mod ast;
pub mod cli;
pub mod lexer;
pub mod parser;
pub mod scanner;

pub use ast::{Attribute, CondList, Condition, FromList, Pattern, Query, Relation, SelList, Token};
pub use lexer::Lexer;
pub use parser::{MAX_DEPTH, Parser, SyntaxError, parse};
pub use scanner::{Chunk, ChunkKind, Position, Scanner, scan};
