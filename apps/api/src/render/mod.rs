pub mod compiler;

pub use compiler::{CompileError, DocumentCompiler, LatexCompiler};
