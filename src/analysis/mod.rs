pub mod openai;
pub mod parser;
pub mod prompt;
