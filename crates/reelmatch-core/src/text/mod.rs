//! Text processing: tokenization and stop-word removal.
//!
//! Tokens are lowercased maximal runs of alphanumeric characters or `_`,
//! at least two characters long.

mod stopwords;
mod tokenizer;

pub use stopwords::{StopWords, ENGLISH_STOP_WORDS};
pub use tokenizer::{tokenize, Tokenizer};
