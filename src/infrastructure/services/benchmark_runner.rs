//! Scores one generated answer against its ground truth

use std::sync::Arc;

use crate::domain::metrics::{EvaluationLog, Metrics};
use crate::domain::scoring::{BleuScorer, RougeScorer, RougeType, SemanticEvaluator, Tokenizer};
use crate::domain::{DomainError, MetricsRecord, ScoredPassage};

/// BLEU average followed by the 1- to 4-gram precisions
pub type BleuBreakdown = (f64, f64, f64, f64, f64);

/// Combines the scorers into one metrics record per question.
///
/// BLEU, ROUGE-L and recall are computed synchronously; semantic
/// similarity is the only step that awaits. Scorer errors are returned
/// as-is.
pub struct BenchmarkRunner {
    tokenizer: Arc<dyn Tokenizer>,
    bleu: Arc<dyn BleuScorer>,
    rouge: Arc<dyn RougeScorer>,
    semantic: Arc<dyn SemanticEvaluator>,
}

impl BenchmarkRunner {
    pub fn new(
        tokenizer: Arc<dyn Tokenizer>,
        bleu: Arc<dyn BleuScorer>,
        rouge: Arc<dyn RougeScorer>,
        semantic: Arc<dyn SemanticEvaluator>,
    ) -> Self {
        Self {
            tokenizer,
            bleu,
            rouge,
            semantic,
        }
    }

    fn bleu_breakdown(
        &self,
        generated: &str,
        reference: &str,
        with_penalty: bool,
    ) -> Result<BleuBreakdown, DomainError> {
        let score = self.bleu.score(
            &[generated.to_string()],
            &[vec![reference.to_string()]],
            self.tokenizer.as_ref(),
        )?;

        let avg = if with_penalty {
            score.bleu
        } else if score.brevity_penalty == 0.0 {
            0.0
        } else {
            score.bleu / score.brevity_penalty
        };

        let [p1, p2, p3, p4] = score.precisions;
        Ok((avg, p1, p2, p3, p4))
    }

    /// BLEU with the brevity penalty divided back out
    pub fn compute_bleu(
        &self,
        generated: &str,
        reference: &str,
    ) -> Result<BleuBreakdown, DomainError> {
        self.bleu_breakdown(generated, reference, false)
    }

    /// BLEU as reported by the scorer, brevity penalty included
    pub fn compute_bleu_with_penalty(
        &self,
        generated: &str,
        reference: &str,
    ) -> Result<BleuBreakdown, DomainError> {
        self.bleu_breakdown(generated, reference, true)
    }

    pub fn compute_rouge_l(&self, generated: &str, reference: &str) -> Result<f64, DomainError> {
        let scores = self.rouge.score(
            &[generated.to_string()],
            &[vec![reference.to_string()]],
            self.tokenizer.as_ref(),
            &[RougeType::RougeL],
        )?;

        scores
            .get(RougeType::RougeL)
            .ok_or_else(|| DomainError::scorer("rouge", "ROUGE-L missing from scorer output"))
    }

    /// 1.0 when some retrieved passage is exactly the reference passage.
    /// Nothing retrieved counts as a miss.
    pub fn compute_recall(&self, retrieved: &[ScoredPassage], reference_passage: &str) -> f64 {
        if retrieved.is_empty() {
            return 0.0;
        }

        if retrieved.iter().any(|p| p.text == reference_passage) {
            1.0
        } else {
            0.0
        }
    }

    pub async fn compute_semantic_similarity(
        &self,
        generated: &str,
        reference: &str,
    ) -> Result<f64, DomainError> {
        Ok(self.semantic.evaluate(generated, reference).await?.score)
    }

    /// Score one answer. The returned log has an empty `question`; the
    /// caller fills it in.
    pub async fn evaluate(
        &self,
        generated: &str,
        reference_answer: &str,
        retrieved: &[ScoredPassage],
        reference_passage: &str,
    ) -> Result<MetricsRecord, DomainError> {
        let recall = self.compute_recall(retrieved, reference_passage);
        let (bleu_avg, bleu_1, bleu_2, bleu_3, bleu_4) =
            self.compute_bleu(generated, reference_answer)?;
        let rouge_l = self.compute_rouge_l(generated, reference_answer)?;
        let semantic_similarity = self
            .compute_semantic_similarity(generated, reference_answer)
            .await?;

        let metrics = Metrics {
            bleu_avg,
            bleu_1,
            bleu_2,
            bleu_3,
            bleu_4,
            rouge_l,
            semantic_similarity,
            recall,
            length: generated.chars().count(),
        };

        let log = EvaluationLog {
            generated_text: generated.to_string(),
            reference_text: reference_answer.to_string(),
            question: String::new(),
        };

        Ok(MetricsRecord::new(metrics, log))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scoring::{
        FixedBleuScorer, FixedRougeScorer, MockSemanticEvaluator, SimilarityResult,
        WhitespaceTokenizer,
    };
    use crate::infrastructure::scoring::{LcsRougeScorer, NgramBleuScorer, UnicodeWordTokenizer};

    fn semantic(score: f64) -> Arc<MockSemanticEvaluator> {
        let mut evaluator = MockSemanticEvaluator::new();
        evaluator.expect_evaluate().returning(move |_, _| {
            Ok(SimilarityResult {
                score,
                passing: score >= 0.8,
            })
        });
        Arc::new(evaluator)
    }

    fn runner(bleu: FixedBleuScorer) -> BenchmarkRunner {
        BenchmarkRunner::new(
            Arc::new(WhitespaceTokenizer),
            Arc::new(bleu),
            Arc::new(FixedRougeScorer::new(0.68)),
            semantic(0.95),
        )
    }

    #[test]
    fn test_bleu_divides_out_brevity_penalty() {
        let runner = runner(FixedBleuScorer::new(0.4, [0.56, 0.5, 0.46, 0.42], 0.8));

        let (avg, p1, p2, p3, p4) = runner.compute_bleu("a b", "a b").unwrap();

        assert!((avg - 0.5).abs() < 1e-12);
        assert_eq!((p1, p2, p3, p4), (0.56, 0.5, 0.46, 0.42));
    }

    #[test]
    fn test_bleu_zero_brevity_penalty() {
        let runner = runner(FixedBleuScorer::new(0.0, [0.3, 0.2, 0.1, 0.0], 0.0));

        let (avg, p1, ..) = runner.compute_bleu("a", "a b c").unwrap();

        assert_eq!(avg, 0.0);
        assert_eq!(p1, 0.3);
    }

    #[test]
    fn test_bleu_with_penalty_is_raw_score() {
        let runner = runner(FixedBleuScorer::new(0.4, [0.5; 4], 0.8));

        let (avg, ..) = runner.compute_bleu_with_penalty("a b", "a b").unwrap();
        assert_eq!(avg, 0.4);
    }

    #[test]
    fn test_bleu_error_propagates() {
        let runner = runner(FixedBleuScorer::failing());
        assert!(matches!(
            runner.compute_bleu("a", "b"),
            Err(DomainError::Scorer { .. })
        ));
    }

    #[test]
    fn test_rouge_l() {
        let runner = runner(FixedBleuScorer::new(0.4, [0.5; 4], 0.8));
        assert_eq!(runner.compute_rouge_l("a b", "a c").unwrap(), 0.68);
    }

    #[test]
    fn test_recall_exact_match() {
        let runner = runner(FixedBleuScorer::new(0.4, [0.5; 4], 0.8));
        let retrieved = vec![
            ScoredPassage::new("Productivity tips", 10.0),
            ScoredPassage::new("I wrote curriculum", 7.0),
        ];

        assert_eq!(runner.compute_recall(&retrieved, "I wrote curriculum"), 1.0);
        assert_eq!(runner.compute_recall(&retrieved, "I wrote"), 0.0);
    }

    #[test]
    fn test_recall_nothing_retrieved() {
        let runner = runner(FixedBleuScorer::new(0.4, [0.5; 4], 0.8));
        assert_eq!(runner.compute_recall(&[], "X"), 0.0);
    }

    #[tokio::test]
    async fn test_semantic_similarity_is_not_thresholded() {
        let runner = BenchmarkRunner::new(
            Arc::new(WhitespaceTokenizer),
            Arc::new(FixedBleuScorer::new(0.4, [0.5; 4], 0.8)),
            Arc::new(FixedRougeScorer::new(0.5)),
            semantic(0.42),
        );

        assert_eq!(runner.compute_semantic_similarity("a", "b").await.unwrap(), 0.42);
    }

    #[tokio::test]
    async fn test_evaluate_assembles_record() {
        let runner = runner(FixedBleuScorer::new(0.4, [0.56, 0.5, 0.46, 0.42], 0.8));
        let generated = "国家卫生健康委开展启明行动";
        let retrieved = vec![ScoredPassage::new("启明行动", 1.0)];

        let record = runner
            .evaluate(generated, "启明行动是为了防控近视", &retrieved, "启明行动")
            .await
            .unwrap();

        assert!((record.metrics.bleu_avg - 0.5).abs() < 1e-12);
        assert_eq!(record.metrics.bleu_4, 0.42);
        assert_eq!(record.metrics.rouge_l, 0.68);
        assert_eq!(record.metrics.semantic_similarity, 0.95);
        assert_eq!(record.metrics.recall, 1.0);
        assert_eq!(record.metrics.length, 13);
        assert_eq!(record.log.generated_text, generated);
        assert_eq!(record.log.reference_text, "启明行动是为了防控近视");
        assert!(record.log.question.is_empty());
    }

    #[tokio::test]
    async fn test_evaluate_propagates_semantic_error() {
        let mut evaluator = MockSemanticEvaluator::new();
        evaluator
            .expect_evaluate()
            .returning(|_, _| Err(DomainError::scorer("semantic_similarity", "embedding down")));

        let runner = BenchmarkRunner::new(
            Arc::new(WhitespaceTokenizer),
            Arc::new(FixedBleuScorer::new(0.4, [0.5; 4], 0.8)),
            Arc::new(FixedRougeScorer::new(0.5)),
            Arc::new(evaluator),
        );

        let result = runner.evaluate("a", "b", &[], "c").await;
        assert!(matches!(result, Err(DomainError::Scorer { .. })));
    }

    #[tokio::test]
    async fn test_identical_texts_with_bundled_scorers() {
        let runner = BenchmarkRunner::new(
            Arc::new(UnicodeWordTokenizer::new()),
            Arc::new(NgramBleuScorer::new()),
            Arc::new(LcsRougeScorer::new()),
            semantic(1.0),
        );
        let text = "Bob likes traveling to Paris in the spring";

        let (avg, p1, _, _, p4) = runner.compute_bleu(text, text).unwrap();
        assert!((avg - 1.0).abs() < 1e-9);
        assert_eq!(p1, 1.0);
        assert_eq!(p4, 1.0);
        assert!((runner.compute_rouge_l(text, text).unwrap() - 1.0).abs() < 1e-9);
    }
}
