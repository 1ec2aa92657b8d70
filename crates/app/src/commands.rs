//! Subcommand handlers. Each prints a plain-text view of the derived state.

use anyhow::{Result, bail};
use services::{
    AppServices, CompletedLessonDetail, NavigationController, NoCamera, QuizOutcome, QuizStart,
    QuizStep, ScreenContent,
};
use smart_learn_core::model::{ClassId, Language, LessonId, Mood, QuizScore, SubjectId};

// `QuizScore` displays with its own percent sign.

fn completion_line(score: Option<QuizScore>) -> String {
    match score {
        Some(score) => format!("Completed, quiz score {score}"),
        None => "Completed".to_string(),
    }
}

fn quiz_summary(outcome: &QuizOutcome, language: Language) -> String {
    format!(
        "Score {} ({}/{}) - {}",
        outcome.score,
        outcome.correct,
        outcome.total,
        outcome.verdict().get(language)
    )
}

fn progress_row(detail: &CompletedLessonDetail, language: Language) -> String {
    let score = detail
        .score
        .map_or_else(|| "-".to_string(), |score| score.to_string());
    format!(
        "  {} {} / {}  {score}",
        detail.subject_icon,
        detail.subject_name.get(language),
        detail.lesson_title.get(language)
    )
}

pub async fn status(app: &AppServices) -> Result<()> {
    let language = app.language().load().await?;
    let progress = app.progress();
    let record = progress.snapshot().await;
    let overall = record.overall();

    println!("Streak:           {} day(s)", overall.streak);
    println!("Lessons complete: {}", overall.total_completed);
    println!("Average score:    {}%", overall.average_score);
    println!("Time spent:       {} min", overall.total_time_spent);
    println!("Language:         {language}");
    if let Some(lesson_id) = record.last_visited_lesson() {
        let catalog = app.catalog();
        match catalog.find_lesson(lesson_id) {
            Some(found) => println!("Continue with:    {}", found.lesson.title.get(language)),
            None => println!("Continue with:    {lesson_id}"),
        }
    }

    println!();
    for (achievement, unlocked) in progress.achievements().await {
        let mark = if unlocked { "x" } else { " " };
        println!(
            "[{mark}] {} - {}",
            achievement.title().get(language),
            achievement.description().get(language)
        );
    }
    Ok(())
}

pub async fn classes(app: &AppServices, class: Option<u32>) -> Result<()> {
    let language = app.language().load().await?;
    let Some(class) = class else {
        for level in app.catalog().classes() {
            println!("{:>2}  {}", level.id.value(), level.name.get(language));
        }
        return Ok(());
    };

    let mut nav = NavigationController::new();
    nav.select_class(ClassId::new(class)?);
    match app.current_screen(&nav).await {
        ScreenContent::Subjects { class, subjects } => {
            println!("{}", class.name.get(language));
            for summary in subjects {
                println!(
                    "  {} {} ({}/{}) [{}]",
                    summary.subject.icon,
                    summary.subject.name.get(language),
                    summary.completed,
                    summary.total,
                    summary.subject.id
                );
                for lesson in summary.subject.lessons() {
                    println!("      {}  {}", lesson.id, lesson.title.get(language));
                }
            }
            Ok(())
        }
        _ => bail!("class {class} has no content"),
    }
}

pub async fn lesson(
    app: &AppServices,
    subject: SubjectId,
    lesson: LessonId,
    complete: bool,
    read_aloud: bool,
) -> Result<()> {
    let language = app.language().load().await?;
    let mut nav = NavigationController::new();
    nav.select_lesson(lesson.clone(), subject.clone());

    let (body, position, total, has_quiz) = match app.current_screen(&nav).await {
        ScreenContent::Lesson {
            location,
            position,
            total,
            completed,
            has_quiz,
            score,
        } => {
            let current = location.lesson;
            println!(
                "{} ({}/{}, {})",
                current.title.get(language),
                position + 1,
                total,
                current.difficulty.label().get(language)
            );
            if completed {
                println!("{}", completion_line(score));
            }
            println!();
            println!("{}", current.content.get(language));
            (current.content.get(language).to_owned(), position, total, has_quiz)
        }
        _ => bail!("lesson {lesson} not found in subject {subject}"),
    };

    let mut flow = app.open_lesson(subject, lesson).await?;
    if read_aloud {
        app.speech().speak(&body, language);
    }
    if complete {
        if has_quiz {
            flow.complete().await?;
        } else if let QuizStart::CompletedWithoutQuiz(_) = flow.take_quiz().await? {
            println!("No quiz for this lesson.");
        }
        println!("Marked complete.");
    }
    if position + 1 < total {
        println!("Next lesson available.");
    }
    Ok(())
}

pub async fn quiz(
    app: &AppServices,
    subject: SubjectId,
    lesson: LessonId,
    answers: &[usize],
) -> Result<()> {
    let language = app.language().load().await?;
    let mut flow = app.open_lesson(subject, lesson).await?;
    if let QuizStart::CompletedWithoutQuiz(_) = flow.take_quiz().await? {
        println!("This lesson has no quiz; it was marked complete.");
        return Ok(());
    }

    let Some(quiz) = flow.quiz_mut() else {
        bail!("quiz did not open");
    };
    if answers.len() != quiz.total() {
        bail!("expected {} answers, got {}", quiz.total(), answers.len());
    }

    let mut outcome = None;
    for &answer in answers {
        println!("Q{}. {}", quiz.index() + 1, quiz.current_question().question.get(language));
        quiz.select(answer)?;
        let feedback = quiz.submit()?;
        println!("    {}", feedback.spoken_text().get(language));
        if !feedback.correct {
            println!("    {}", feedback.explanation.get(language));
        }
        if let QuizStep::Completed(done) = quiz.next()? {
            outcome = Some(done);
        }
    }
    let Some(outcome) = outcome else {
        bail!("quiz did not finish");
    };

    flow.finish_quiz(outcome.score).await?;
    println!();
    println!("{}", quiz_summary(&outcome, language));
    Ok(())
}

pub async fn time(app: &AppServices, minutes: u32) -> Result<()> {
    let record = app.progress().add_time_spent(minutes).await?;
    println!("Total time spent: {} min", record.total_time_spent());
    Ok(())
}

pub async fn mood(app: &AppServices, pick: Option<Mood>) -> Result<()> {
    let language = app.language().load().await?;
    let detector = app.mood();
    let camera = NoCamera;

    let mut nav = NavigationController::new();
    nav.open_mood();
    let reading = match pick {
        Some(mood) => detector.select_manually(mood),
        None => {
            if !detector.start_camera(&camera).await {
                if let Some(message) = detector.camera_message(language) {
                    eprintln!("{message}");
                }
            }
            let reading = detector.detect().await?;
            detector.stop_camera(&camera).await;
            reading
        }
    };
    nav.finish_mood(Some(reading.mood));

    println!(
        "Mood: {} ({:.0}% confidence)",
        reading.mood.label().get(language),
        reading.confidence * 100.0
    );
    if let ScreenContent::Home {
        suggestion: Some(suggestion),
        ..
    } = app.current_screen(&nav).await
    {
        println!("{}", suggestion.get(language));
    }
    Ok(())
}

pub async fn progress(app: &AppServices) -> Result<()> {
    let language = app.language().load().await?;
    let mut nav = NavigationController::new();
    nav.open_progress();
    let ScreenContent::Progress {
        overall, completed, ..
    } = app.current_screen(&nav).await
    else {
        bail!("progress screen unavailable");
    };

    println!(
        "{} lesson(s) complete, average {}%",
        overall.total_completed, overall.average_score
    );
    for detail in &completed {
        println!("{}", progress_row(detail, language));
    }
    Ok(())
}

pub async fn language(app: &AppServices, language: Option<Language>) -> Result<()> {
    let service = app.language();
    let language = match language {
        Some(language) => service.set(language).await?,
        None => service.toggle().await?,
    };
    println!("Language: {language}");
    Ok(())
}

pub async fn reset(app: &AppServices) -> Result<()> {
    app.progress().reset().await?;
    println!("Progress reset.");
    Ok(())
}
