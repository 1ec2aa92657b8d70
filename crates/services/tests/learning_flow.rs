use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{
    AppServices, MoodDetector, MoodDetectorConfig, NavParams, NavigationController,
    NoCamera, QuizStart, QuizStep, ScreenContent,
};
use smart_learn_core::model::{
    ClassId, Language, LessonId, Mood, Screen, ScreenKind, SubjectId,
};
use smart_learn_core::time::fixed_clock;

fn class(n: u32) -> ClassId {
    ClassId::new(n).unwrap()
}

fn subject(id: &str) -> SubjectId {
    SubjectId::new(id).unwrap()
}

fn lesson(id: &str) -> LessonId {
    LessonId::new(id).unwrap()
}

#[tokio::test]
async fn browse_study_and_quiz_updates_progress_screen() {
    let services = AppServices::in_memory(fixed_clock()).await.unwrap();
    let mut nav = NavigationController::new();

    nav.select_class(class(6));
    let ScreenContent::Subjects { subjects, .. } = services.current_screen(&nav).await else {
        panic!("expected the subject list");
    };
    assert_eq!(subjects.len(), 2);

    nav.select_lesson(lesson("c6-sci-l1"), subject("c6-science"));
    let mut flow = services
        .open_lesson(subject("c6-science"), lesson("c6-sci-l1"))
        .await
        .unwrap();
    assert_eq!(flow.take_quiz().await.unwrap(), QuizStart::Started);

    // Answer the first question wrong, the rest right: 2 of 3.
    let quiz = flow.quiz_mut().unwrap();
    let mut first = true;
    let outcome = loop {
        let correct = quiz.current_question().correct_answer;
        let pick = if first { (correct + 1) % 3 } else { correct };
        first = false;
        quiz.select(pick).unwrap();
        quiz.submit().unwrap();
        if let QuizStep::Completed(outcome) = quiz.next().unwrap() {
            break outcome;
        }
    };
    assert_eq!(outcome.score.value(), 67);
    flow.finish_quiz(outcome.score).await.unwrap();

    assert_eq!(nav.back(), &Screen::Subjects { class_id: class(6) });
    nav.open_progress();
    let ScreenContent::Progress {
        overall, completed, ..
    } = services.current_screen(&nav).await
    else {
        panic!("expected the progress screen");
    };
    assert_eq!(overall.total_completed, 1);
    assert_eq!(overall.average_score, 67);
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].subject_name.en, "Science");
}

#[tokio::test]
async fn navigation_keeps_unspecified_selections() {
    let mut nav = NavigationController::new();
    nav.navigate(
        ScreenKind::Lesson,
        NavParams::new().subject(subject("S1")).lesson(lesson("L0")),
    )
    .unwrap();
    nav.navigate(ScreenKind::Home, NavParams::new()).unwrap();

    let screen = nav
        .navigate(ScreenKind::Lesson, NavParams::new().lesson(lesson("L1")))
        .unwrap();
    assert_eq!(
        screen,
        &Screen::Lesson {
            subject_id: subject("S1"),
            lesson_id: lesson("L1"),
        }
    );
    assert_eq!(nav.selections().subject, Some(subject("S1")));
}

#[tokio::test]
async fn stale_lesson_screen_resolves_to_not_found() {
    let services = AppServices::in_memory(fixed_clock()).await.unwrap();
    let mut nav = NavigationController::new();
    nav.select_lesson(lesson("deleted"), subject("c6-science"));
    assert!(matches!(
        services.current_screen(&nav).await,
        ScreenContent::NotFound { .. }
    ));
}

#[tokio::test]
async fn mood_flow_without_a_camera_uses_manual_selection() {
    let detector = MoodDetector::with_rng(
        MoodDetectorConfig {
            delay: Duration::ZERO,
        },
        StdRng::seed_from_u64(11),
    );
    let camera = NoCamera;
    assert!(!detector.start_camera(&camera).await);
    assert!(detector.camera_message(Language::En).is_some());

    let reading = detector.select_manually(Mood::Happy);
    let mut nav = NavigationController::new();
    nav.open_mood();
    nav.finish_mood(Some(reading.mood));
    detector.stop_camera(&camera).await;

    assert_eq!(nav.current_mood(), Some(Mood::Happy));
}

#[tokio::test]
async fn language_preference_and_speech_share_the_context() {
    let services = AppServices::in_memory(fixed_clock()).await.unwrap();
    assert_eq!(services.language().toggle().await.unwrap(), Language::Ta);
    assert_eq!(services.language().load().await.unwrap(), Language::Ta);

    let spoken = services.speech().speak("வணக்கம்", Language::Ta);
    assert!(spoken);
    services.speech().stop();
    assert!(!services.speech().is_speaking());

    let flow = services
        .open_lesson(subject("c1-tamil"), lesson("c1-tamil-l2"))
        .await
        .unwrap();
    assert_eq!(flow.position(), (1, 2));
}
