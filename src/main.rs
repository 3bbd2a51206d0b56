use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use env_logger::Env;

use quiz_engine::{
    app_state::AppState,
    config::{Config, ReportFormat},
    errors::{AppError, AppResult},
    models::domain::{Answers, Student},
    services::QuizGenerator,
};

fn options(entries: [(char, &str); 4]) -> BTreeMap<char, String> {
    entries
        .into_iter()
        .map(|(letter, text)| (letter, text.to_string()))
        .collect()
}

fn main() -> AppResult<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let state = AppState::new(Config::from_env())?;
    let factory = &state.question_factory;

    let eu_countries = factory.multiple_choice(
        "Which are member countries of the EU?",
        options([
            ('A', "United Kingdom"),
            ('B', "France"),
            ('C', "Germany"),
            ('D', "United States"),
        ]),
        BTreeSet::from(['B', 'C']),
    )?;
    let addition = factory.multiple_choice(
        "What is 1+1?",
        options([
            ('A', "4 (in decimal)"),
            ('B', "2 (in decimal)"),
            ('C', "0 (in binary)"),
            ('D', "10 (in binary)"),
        ]),
        BTreeSet::from(['B', 'D']),
    )?;
    let france = factory.free_response("What is the capital of France?", "Paris")?;
    let czechia = factory.free_response("What is the capital of Czechia?", "Prague")?;

    let generator = QuizGenerator::with_pool([
        eu_countries.clone(),
        addition.clone(),
        france.clone(),
        czechia.clone(),
    ]);
    let students = &state.student_service;
    let bob = Student::new(
        "Bob",
        "Smith",
        NaiveDate::from_ymd_opt(2000, 4, 20)
            .ok_or_else(|| AppError::InvalidArgument("invalid date of birth".to_string()))?,
    );

    let first_quiz = generator.generate_quiz(state.config.regular_quiz_size)?;
    let first_answers: Answers = HashMap::from([
        (france.clone(), "Berlin".to_string()),
        (eu_countries.clone(), "a,b".to_string()),
        (czechia.clone(), "Prague".to_string()),
        (addition.clone(), "d,a".to_string()),
    ]);
    students.take_quiz(&bob, &first_quiz, &first_answers)?;

    let revision_quiz = students.revise(&generator, &bob, state.config.revision_quiz_size)?;
    for question in revision_quiz.questions() {
        log::info!("Revising: {}", question);
    }
    let revision_answers: Answers = HashMap::from([
        (france.clone(), "Paris".to_string()),
        (eu_countries.clone(), "c,b".to_string()),
        (addition.clone(), "b,d".to_string()),
    ]);
    students.take_revision_quiz(&bob, &revision_quiz, &revision_answers)?;

    let second_quiz = generator.generate_quiz(state.config.regular_quiz_size)?;
    let second_answers: Answers = HashMap::from([
        (france, "Paris".to_string()),
        (eu_countries, "c,b".to_string()),
        (czechia, "Prague".to_string()),
        (addition, "b,d".to_string()),
    ]);
    students.take_quiz(&bob, &second_quiz, &second_answers)?;

    let report = students.report(&bob)?;
    match state.config.report_format {
        ReportFormat::Text => print!("{}", report),
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|err| AppError::InternalError(err.to_string()))?;
            println!("{}", json);
        }
    }

    Ok(())
}
