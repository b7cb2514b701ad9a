use std::fmt::Debug;

/// Splits text into the units BLEU and ROUGE compare
pub trait Tokenizer: Send + Sync + Debug {
    fn tokenize(&self, text: &str) -> Vec<String>;
}
