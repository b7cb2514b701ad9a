//! Default scorer implementations

mod bleu;
mod ngram;
mod rouge;
mod semantic;
mod tokenizer;

pub use bleu::NgramBleuScorer;
pub use rouge::LcsRougeScorer;
pub use semantic::EmbeddingSemanticEvaluator;
pub use tokenizer::{JiebaTokenizer, UnicodeWordTokenizer};
