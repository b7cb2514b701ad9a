//! Text similarity scoring seams

mod bleu;
mod rouge;
mod semantic;
mod tokenizer;

pub use bleu::{BleuScore, BleuScorer, MAX_NGRAM_ORDER};
pub use rouge::{RougeScorer, RougeScores, RougeType};
pub use semantic::{SemanticEvaluator, SimilarityResult};
pub use tokenizer::Tokenizer;

#[cfg(test)]
pub use bleu::mock::FixedBleuScorer;
#[cfg(test)]
pub use rouge::mock::FixedRougeScorer;
#[cfg(test)]
pub use semantic::MockSemanticEvaluator;
#[cfg(test)]
pub use tokenizer::mock::WhitespaceTokenizer;
