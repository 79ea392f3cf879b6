use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use quiz_core::model::Question;
use storage::bank::group_by_topic;

/// How questions are drawn from the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStrategy {
    /// Uniform draw without replacement over the whole bank.
    Random,
    /// Equal share per topic first, remaining slots filled from the whole bank.
    #[default]
    Balanced,
}

impl SelectionStrategy {
    #[must_use]
    pub fn from_balanced(balanced: bool) -> Self {
        if balanced { Self::Balanced } else { Self::Random }
    }
}

/// Selection result for a test build.
#[derive(Debug, Clone, PartialEq)]
pub struct TestPlan {
    pub questions: Vec<Question>,
    pub strategy: SelectionStrategy,
    /// Share taken from each topic in the balanced pass (0 for random).
    pub per_topic: usize,
    /// Questions picked in the per-topic pass.
    pub topic_selected: usize,
    /// Questions picked while filling up from the whole bank.
    pub fill_selected: usize,
}

impl TestPlan {
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Builds a test set from a pool of questions.
pub struct TestBuilder<'a> {
    pool: &'a [Question],
    strategy: SelectionStrategy,
}

impl<'a> TestBuilder<'a> {
    #[must_use]
    pub fn new(pool: &'a [Question]) -> Self {
        Self {
            pool,
            strategy: SelectionStrategy::default(),
        }
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Select up to `count` distinct questions. Never fails; a count larger
    /// than the pool yields the whole pool.
    pub fn build<R: Rng + ?Sized>(self, count: usize, rng: &mut R) -> TestPlan {
        match self.strategy {
            SelectionStrategy::Random => {
                let questions = random_selection(self.pool, count, rng);
                TestPlan {
                    fill_selected: questions.len(),
                    questions,
                    strategy: SelectionStrategy::Random,
                    per_topic: 0,
                    topic_selected: 0,
                }
            }
            SelectionStrategy::Balanced => balanced_selection(self.pool, count, rng),
        }
    }
}

/// Full Fisher–Yates pass over a copy of the pool, then the first `count`.
pub fn random_selection<R: Rng + ?Sized>(
    pool: &[Question],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut shuffled: Vec<&Question> = pool.iter().collect();
    shuffled.shuffle(rng);
    shuffled.into_iter().take(count).cloned().collect()
}

/// Topic-balanced selection.
///
/// Each topic contributes up to `count / topics` questions, chosen after
/// shuffling that topic. Remaining slots are filled from a shuffle of the
/// whole pool, skipping questions already chosen. The final set is shuffled
/// again so topic grouping never shows in presentation order.
pub fn balanced_selection<R: Rng + ?Sized>(
    pool: &[Question],
    count: usize,
    rng: &mut R,
) -> TestPlan {
    let groups = group_by_topic(pool);
    if groups.is_empty() {
        return TestPlan {
            questions: Vec::new(),
            strategy: SelectionStrategy::Balanced,
            per_topic: 0,
            topic_selected: 0,
            fill_selected: 0,
        };
    }

    let per_topic = count / groups.len();
    let mut selected: Vec<Question> = Vec::with_capacity(count.min(pool.len()));
    let mut selected_ids = HashSet::with_capacity(selected.capacity());

    for group in groups.values() {
        let mut shuffled = group.clone();
        shuffled.shuffle(rng);
        for question in shuffled.into_iter().take(per_topic) {
            if selected_ids.insert(question.id()) {
                selected.push(question.clone());
            }
        }
    }
    let topic_selected = selected.len();

    if selected.len() < count {
        let mut everything: Vec<&Question> = pool.iter().collect();
        everything.shuffle(rng);
        for question in everything {
            if selected.len() >= count {
                break;
            }
            if selected_ids.insert(question.id()) {
                selected.push(question.clone());
            }
        }
    }
    let fill_selected = selected.len() - topic_selected;

    selected.shuffle(rng);

    TestPlan {
        questions: selected,
        strategy: SelectionStrategy::Balanced,
        per_topic,
        topic_selected,
        fill_selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionDraft, QuestionId, Topic};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn question(id: u64, topic: &str) -> Question {
        QuestionDraft {
            topic: Topic::new(topic).unwrap(),
            question: format!("Q{id}"),
            options: vec!["a".into(), "b".into()],
            correct_index: 0,
            explanation: String::new(),
        }
        .validate(QuestionId::new(id))
        .unwrap()
    }

    fn pool(layout: &[(&str, usize)]) -> Vec<Question> {
        let mut next = 0;
        let mut out = Vec::new();
        for (topic, n) in layout {
            for _ in 0..*n {
                out.push(question(next, topic));
                next += 1;
            }
        }
        out
    }

    fn distinct(questions: &[Question]) -> usize {
        questions.iter().map(Question::id).collect::<HashSet<_>>().len()
    }

    fn per_topic_counts(questions: &[Question]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for q in questions {
            *counts.entry(q.topic().to_string()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn random_returns_count_distinct_questions() {
        let pool = pool(&[("law", 5), ("rights", 5)]);
        let mut rng = StdRng::seed_from_u64(7);

        for count in 1..=pool.len() {
            let picked = random_selection(&pool, count, &mut rng);
            assert_eq!(picked.len(), count);
            assert_eq!(distinct(&picked), count);
        }
    }

    #[test]
    fn random_clamps_to_pool_size() {
        let pool = pool(&[("law", 3)]);
        let mut rng = StdRng::seed_from_u64(1);
        let picked = random_selection(&pool, 10, &mut rng);
        assert_eq!(picked.len(), 3);
        assert_eq!(distinct(&picked), 3);
    }

    #[test]
    fn random_selection_is_uniform() {
        let pool = pool(&[("law", 10)]);
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 30_000;
        let count = 3;
        let mut hits = vec![0_u32; pool.len()];

        for _ in 0..trials {
            for q in random_selection(&pool, count, &mut rng) {
                let idx = usize::try_from(q.id().value()).unwrap();
                hits[idx] += 1;
            }
        }

        let expected = f64::from(trials * 3) / 10.0;
        let chi_square: f64 = hits
            .iter()
            .map(|&h| {
                let diff = f64::from(h) - expected;
                diff * diff / expected
            })
            .sum();
        // 9 degrees of freedom; 40 is far beyond the 0.001 critical value (27.9).
        assert!(chi_square < 40.0, "chi-square {chi_square} with hits {hits:?}");
    }

    #[test]
    fn balanced_three_topics_of_two() {
        let pool = pool(&[("geography", 2), ("history", 2), ("symbols", 2)]);
        let mut rng = StdRng::seed_from_u64(11);

        let plan = TestBuilder::new(&pool)
            .with_strategy(SelectionStrategy::Balanced)
            .build(4, &mut rng);

        assert_eq!(plan.per_topic, 1);
        assert_eq!(plan.topic_selected, 3);
        assert_eq!(plan.fill_selected, 1);
        assert_eq!(plan.total(), 4);
        assert_eq!(distinct(&plan.questions), 4);
        let counts = per_topic_counts(&plan.questions);
        assert_eq!(counts.len(), 3);
        assert!(counts.values().all(|&n| n >= 1));
    }

    #[test]
    fn balanced_respects_floor_share_or_topic_size() {
        let pool = pool(&[("economy", 1), ("law", 8), ("rights", 4)]);
        let mut rng = StdRng::seed_from_u64(3);

        for count in 1..=pool.len() {
            let plan = balanced_selection(&pool, count, &mut rng);
            assert_eq!(plan.total(), count);
            assert_eq!(distinct(&plan.questions), count);

            let counts = per_topic_counts(&plan.questions);
            for (topic, available) in [("economy", 1), ("law", 8), ("rights", 4)] {
                let got = counts.get(topic).copied().unwrap_or(0);
                assert!(
                    got >= plan.per_topic.min(available),
                    "topic {topic} got {got} of share {} for count {count}",
                    plan.per_topic
                );
            }
        }
    }

    #[test]
    fn balanced_clamps_to_pool_size() {
        let pool = pool(&[("law", 2), ("rights", 1)]);
        let mut rng = StdRng::seed_from_u64(5);
        let plan = balanced_selection(&pool, 50, &mut rng);
        assert_eq!(plan.total(), 3);
        assert_eq!(distinct(&plan.questions), 3);
    }

    #[test]
    fn balanced_final_order_is_shuffled() {
        // With topic-grouped output, the first two picks would always share a topic.
        let pool = pool(&[("a", 10), ("b", 10)]);
        let mut rng = StdRng::seed_from_u64(9);
        let mixed = (0..50).any(|_| {
            let plan = balanced_selection(&pool, 4, &mut rng);
            plan.questions[0].topic() != plan.questions[1].topic()
        });
        assert!(mixed);
    }

    #[test]
    fn empty_pool_gives_empty_plan() {
        let mut rng = StdRng::seed_from_u64(0);
        let plan = TestBuilder::new(&[]).build(5, &mut rng);
        assert!(plan.is_empty());
        let plan = TestBuilder::new(&[])
            .with_strategy(SelectionStrategy::Random)
            .build(5, &mut rng);
        assert!(plan.is_empty());
    }

    #[test]
    fn strategy_from_flag() {
        assert_eq!(SelectionStrategy::from_balanced(true), SelectionStrategy::Balanced);
        assert_eq!(SelectionStrategy::from_balanced(false), SelectionStrategy::Random);
    }
}
