//! services/app/src/bin/app.rs
//!
//! A terminal shell standing in for the mobile presentation layer: it wires
//! the configuration, the AI capability and the session together, then runs
//! an interactive chat loop against the tutor.

use std::sync::Arc;

use app_lib::{
    ai::AiCapability,
    config::Config,
    error::AppError,
    shell::{AppState, SplashTimer},
};
use edusmart_core::{
    domain::{Role, TranscriptEntry, UserProfile},
    session::{AuthEvent, NavEvent, Section, Session},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting EduSmart shell...");

    // --- 2. Decide AI Availability Once ---
    let ai = Arc::new(AiCapability::from_config(&config));
    if ai.is_enabled() {
        info!(tutor_model = %config.tutor_model, quiz_model = %config.quiz_model, "AI features enabled");
    }

    // --- 3. Build the Session & Shared State ---
    let session = Arc::new(Mutex::new(Session::new(
        UserProfile {
            name: "Quốc Anh".to_string(),
            avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=QuocAnh".to_string(),
            level: 12,
            xp: 2450,
        },
        Vec::new(),
    )));
    let state = AppState {
        session: session.clone(),
        ai: ai.clone(),
        config: config.clone(),
    };
    let splash = SplashTimer::start(session.clone());

    // --- 4. Sign In and Open the Tutor Screen ---
    // The terminal shell has no splash screen to show, so skip straight
    // through the unauthenticated flow. If the timer already fired, the
    // extra SplashTimeout is an undocumented pair and leaves the phase
    // unchanged.
    splash.cancel();
    {
        let mut s = state.session.lock().await;
        s.handle_auth(AuthEvent::SplashTimeout);
        s.handle_auth(AuthEvent::GetStarted);
        s.handle_auth(AuthEvent::SubmitLogin);
        s.dispatch(NavEvent::Go(Section::AiTutor));
    }

    // --- 5. Run the Chat Loop ---
    println!("EduSmart AI tutor. Type a message, '/quiz <topic>' for a quiz, or 'exit'.");
    let mut transcript: Vec<TranscriptEntry> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") {
            break;
        }

        if let Some(topic) = input.strip_prefix("/quiz ") {
            match state.ai.generate_quiz(topic.trim()).await {
                None => println!("Quiz generation failed. Try again in a moment."),
                Some(quiz) if quiz.is_empty() => println!("The model produced no questions."),
                Some(quiz) => {
                    for (number, q) in quiz.iter().enumerate() {
                        println!("{}. {}", number + 1, q.question);
                        for (index, option) in q.options.iter().enumerate() {
                            let marker = if index == q.correct_answer { "*" } else { " " };
                            println!("  {marker} {option}");
                        }
                    }
                }
            }
            continue;
        }

        let reply = state.ai.tutor_reply(&transcript, input).await;
        println!("{reply}");
        transcript.push(TranscriptEntry::new(Role::User, input));
        transcript.push(TranscriptEntry::new(Role::Model, reply));
    }

    info!("Shutting down.");
    Ok(())
}
