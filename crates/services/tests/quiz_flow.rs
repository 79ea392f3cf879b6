use std::collections::HashSet;

use quiz_core::model::{QuestionId, Topic};
use quiz_core::time::fixed_now;
use services::{Clock, QuizEngine, ReviewMode};
use storage::{BankConfig, InMemoryQuestionSource, StorageError, load_bank};

fn topic_json(topic: &str, count: usize) -> String {
    let items: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"topic":"{topic}","question":"{topic} {i}?","options":["w","x","y","z"],"correctIndex":{},"explanation":"because {i}"}}"#,
                i % 4
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

async fn engine() -> QuizEngine {
    let mut source = InMemoryQuestionSource::new();
    let mut topics = Vec::new();
    for name in ["rights", "history", "law"] {
        let topic = Topic::new(name).unwrap();
        source = source.with_json(topic.clone(), &topic_json(name, 4)).unwrap();
        topics.push(topic);
    }
    let bank = load_bank(&source, &topics).await.expect("bank loads");
    QuizEngine::new(bank, Clock::fixed(fixed_now())).with_seed(7)
}

#[tokio::test]
async fn full_attempt_retry_and_history() {
    let mut engine = engine().await;
    assert_eq!(engine.bank().len(), 12);

    let mut session = engine.start_test(6, true).unwrap();
    assert_eq!(session.total(), 6);
    let ids: HashSet<QuestionId> = session.questions().iter().map(|q| q.id()).collect();
    assert_eq!(ids.len(), 6);

    // Correct on even positions, wrong on odd ones.
    let mut expected_wrong = Vec::new();
    loop {
        let question = session.current_question().unwrap().clone();
        if session.position() % 2 == 0 {
            session.select_answer(question.correct_index()).unwrap();
        } else {
            session.select_answer((question.correct_index() + 1) % 4).unwrap();
            expected_wrong.push(question.id());
        }
        if !session.can_go_next() {
            break;
        }
        session.next().unwrap();
    }
    assert!(session.is_at_last());
    assert!((session.progress().percent_answered() - 100.0).abs() < f64::EPSILON);

    let first = engine.submit(session).unwrap().clone();
    assert_eq!(first.score(), 3);
    assert_eq!(first.incorrect_count(), 3);
    assert_eq!(engine.list_history().len(), 1);

    let mut retry = engine.retry_incorrect().unwrap();
    let retry_ids: Vec<_> = retry.questions().iter().map(|q| q.id()).collect();
    assert_eq!(retry_ids, expected_wrong);

    let correct = retry.current_question().unwrap().correct_index();
    retry.select_answer(correct).unwrap();
    let second = engine.submit(retry).unwrap().clone();
    assert_eq!(second.total(), 3);
    assert_eq!(second.score(), 1);

    // Earlier history entries are untouched by later sessions.
    assert_eq!(engine.list_history().len(), 2);
    assert_eq!(engine.get_session_detail(0).unwrap(), &first);
    assert_eq!(engine.last_incorrect().unwrap().len(), 2);

    let reviewed = engine.review_session(0, ReviewMode::Incorrect).unwrap();
    let reviewed_ids: Vec<usize> = reviewed.iter().map(|item| item.index).collect();
    assert_eq!(reviewed_ids, vec![1, 3, 5]);
    assert!(reviewed.iter().all(|item| item.your_answer != item.correct_answer));

    let current = engine.review_current(ReviewMode::Correct).unwrap();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].index, 0);
}

#[tokio::test]
async fn random_sessions_never_repeat_questions() {
    let mut engine = engine().await;
    for count in 1..=12 {
        let session = engine.start_test(count, false).unwrap();
        let ids: HashSet<QuestionId> = session.questions().iter().map(|q| q.id()).collect();
        assert_eq!(session.total(), count);
        assert_eq!(ids.len(), count);
    }
}

#[tokio::test]
async fn engine_loads_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("symbols.json"), topic_json("symbols", 3)).unwrap();
    std::fs::write(dir.path().join("economy.json"), topic_json("economy", 2)).unwrap();
    let config = BankConfig {
        questions_dir: dir.path().to_path_buf(),
        topics: vec![Topic::new("symbols").unwrap(), Topic::new("economy").unwrap()],
    };

    let engine = QuizEngine::load(&config, Clock::fixed(fixed_now()))
        .await
        .unwrap();

    assert_eq!(engine.bank().len(), 5);
    assert_eq!(engine.bank().topics().len(), 2);
}

#[tokio::test]
async fn missing_topic_file_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("symbols.json"), topic_json("symbols", 3)).unwrap();
    let config = BankConfig {
        questions_dir: dir.path().to_path_buf(),
        topics: vec![Topic::new("symbols").unwrap(), Topic::new("law").unwrap()],
    };

    let err = QuizEngine::load(&config, Clock::default()).await.unwrap_err();

    assert!(matches!(
        err,
        services::EngineError::Storage(StorageError::Io { .. })
    ));
}
