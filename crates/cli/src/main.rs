use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use deck::{Gesture, Outcome};
use quiz_store::DatabaseClient;
use server::{
    CardView, Config, DecisionDispatcher, DeckLoader, HttpDecisionSink, NotesFile, QuizGenerator,
    SwipeSession,
};
use sources::{FixedPosition, HttpPodClient, PodSource, ReverseGeocoder};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// podswipe - discover pods by swiping
#[derive(Parser)]
#[command(name = "podswipe")]
#[command(about = "Browse and swipe through pods, and manage study quizzes", long_about = None)]
struct Cli {
    /// Pod server base URL (overrides POD_SERVER_URL)
    #[arg(long)]
    server_url: Option<String>,

    /// Only show pods within this many meters (overrides POD_MAX_DISTANCE_M)
    #[arg(long, value_parser = parse_distance)]
    max_distance: Option<f64>,

    /// Your latitude; distance filtering needs both --lat and --lng
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Your longitude
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Quiz database file (overrides QUIZ_DATABASE_PATH)
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the cards in your deck without deciding anything
    Deck {
        /// Look up the town for each pod
        #[arg(long)]
        towns: bool,
    },

    /// Swipe through your deck interactively
    Swipe,

    /// Show who joined a pod
    Attenders {
        /// Pod ID
        #[arg(long)]
        pod_id: String,
    },

    /// Manage quizzes
    Quiz {
        #[command(subcommand)]
        command: QuizCommands,
    },
}

#[derive(Subcommand)]
enum QuizCommands {
    /// Generate a quiz from notes and save it
    Generate {
        /// Subject, e.g. "cell biology"
        #[arg(long)]
        subject: String,

        /// Number of questions to ask for
        #[arg(long, default_value = "10")]
        num_questions: u32,

        /// Notes file to upload
        #[arg(long)]
        notes: PathBuf,
    },

    /// Save questions from a JSON file (an array of question objects)
    Save {
        #[arg(long)]
        subject: String,

        #[arg(long)]
        file: PathBuf,
    },

    /// List categories and their quiz counts
    Categories,

    /// List quizzes saved under a subject
    List {
        #[arg(long)]
        subject: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let position = match (cli.lat, cli.lng) {
        (Some(lat), Some(lng)) => FixedPosition::at(lat, lng),
        _ => FixedPosition::unavailable(),
    };

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Deck { towns } => handle_deck(&config, position, towns).await?,
        Commands::Swipe => handle_swipe(&config, position).await?,
        Commands::Attenders { pod_id } => handle_attenders(&config, &pod_id).await?,
        Commands::Quiz { command } => handle_quiz(&config, command).await?,
    }

    Ok(())
}

fn parse_distance(raw: &str) -> std::result::Result<f64, String> {
    let meters: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if meters.is_finite() && meters >= 0.0 {
        Ok(meters)
    } else {
        Err(format!("{raw} is not a distance in meters"))
    }
}

/// Environment first, then command line flags on top.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(url) = &cli.server_url {
        config.pod_server_url = url.clone();
    }
    if cli.max_distance.is_some() {
        config.max_distance_m = cli.max_distance;
    }
    if let Some(db) = &cli.db {
        config.database_path = db.clone();
    }
    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

async fn load_deck(config: &Config, position: FixedPosition) -> Result<(HttpPodClient, server::Deck)> {
    let client = HttpPodClient::new(config.pod_server_url.clone())
        .context("Failed to create pod server client")?;
    let loader = DeckLoader::new(
        Arc::new(client.clone()),
        Arc::new(position),
        config.max_distance_m,
    );

    println!("Loading pods from {}...", config.pod_server_url);
    let start = Instant::now();
    let deck = loader.load().await?;
    println!(
        "{} Loaded {} cards in {:?}",
        "✓".green(),
        deck.queue.len(),
        start.elapsed()
    );
    Ok((client, deck))
}

/// Handle the 'deck' command
async fn handle_deck(config: &Config, position: FixedPosition, towns: bool) -> Result<()> {
    let (_, deck) = load_deck(config, position).await?;
    if deck.queue.is_empty() {
        println!("{}", "No pods to show.".yellow());
        return Ok(());
    }

    let geocoder = if towns {
        Some(ReverseGeocoder::new(config.geocoder_url.clone())?)
    } else {
        None
    };

    println!("{}", "Your deck:".bold().blue());
    for (i, pod) in deck.queue.upcoming().enumerate() {
        let view = CardView {
            pod,
            details: deck.details_for(pod),
            remaining: deck.queue.len() - i,
        };
        print_card(i + 1, &view);

        if let (Some(geocoder), Some(location)) = (&geocoder, &pod.location) {
            match geocoder.settlement_for(location).await {
                Ok(Some(town)) => println!("   {} {}", "in".dimmed(), town),
                Ok(None) => {}
                Err(e) => println!("   {} {}", "town lookup failed:".red(), e),
            }
        }
    }
    Ok(())
}

/// Handle the 'swipe' command
async fn handle_swipe(config: &Config, position: FixedPosition) -> Result<()> {
    let (client, deck) = load_deck(config, position).await?;
    let dispatcher = DecisionDispatcher::spawn(Arc::new(HttpDecisionSink::new(client)));
    let mut session = SwipeSession::new(deck, dispatcher);

    println!(
        "{}",
        "r = love, l = nope, d <dx> <vx> = drag, q = quit".dimmed()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(card) = session.current_card() {
        print_card(1, &card);

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let result = match parse_swipe(&line) {
            Some(SwipeCommand::Button(outcome)) => session.handle_button(outcome)?,
            Some(SwipeCommand::Drag(gesture)) => session.handle_drag(gesture)?,
            Some(SwipeCommand::Quit) => break,
            None => {
                println!("{}", "Unrecognized input".red());
                continue;
            }
        };
        match result {
            Some(Outcome::Accept) => println!("{}", "♥ love".green()),
            Some(Outcome::Reject) => println!("{}", "✗ nope".red()),
            None => println!("{}", "(snapped back)".dimmed()),
        }
    }

    if session.current_card().is_none() {
        println!("{}", "No more pods.".yellow());
    }
    let summary = session.finish().await?;
    println!(
        "{} {} loved, {} noped ({} reported, {} failed)",
        "✓".green(),
        summary.accepted,
        summary.rejected,
        summary.dispatch.delivered,
        summary.dispatch.failed
    );
    Ok(())
}

/// Handle the 'attenders' command
async fn handle_attenders(config: &Config, pod_id: &str) -> Result<()> {
    let client = HttpPodClient::new(config.pod_server_url.clone())?;
    let attenders = client
        .get_attenders(pod_id)
        .await
        .with_context(|| format!("Failed to fetch attenders for pod {}", pod_id))?;

    println!("{}", format!("Attenders of {}:", pod_id).bold().blue());
    if attenders.is_empty() {
        println!("  (nobody yet)");
    }
    for attender in attenders {
        println!("{}{}", "• ".green(), attender.name);
    }
    Ok(())
}

/// Handle the 'quiz' subcommands
async fn handle_quiz(config: &Config, command: QuizCommands) -> Result<()> {
    let db = DatabaseClient::open(&config.database_path)
        .with_context(|| format!("Failed to open {}", config.database_path.display()))?;

    match command {
        QuizCommands::Generate {
            subject,
            num_questions,
            notes,
        } => {
            let notes = NotesFile::read(&notes).await?;
            let generator = QuizGenerator::new(config.pod_server_url.clone())?;
            let questions = generator.generate(&subject, num_questions, notes).await?;
            let quiz = db.save_quiz(&subject, questions)?;
            println!(
                "{} Saved '{}' ({} questions)",
                "✓".green(),
                quiz.title,
                quiz.questions.len()
            );
        }
        QuizCommands::Save { subject, file } => {
            let raw = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let questions: Vec<serde_json::Value> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array", file.display()))?;
            let quiz = db.save_quiz(&subject, questions)?;
            println!("{} Saved '{}'", "✓".green(), quiz.title);
        }
        QuizCommands::Categories => {
            println!("{}", "Categories:".bold().blue());
            for category in db.categories()? {
                println!(
                    "{}{} ({} quizzes)",
                    "• ".green(),
                    category.name,
                    category.num_quizzes
                );
            }
        }
        QuizCommands::List { subject } => {
            let category = db
                .categories()?
                .into_iter()
                .find(|c| c.name == quiz_store::format_subject(&subject))
                .ok_or_else(|| anyhow!("No quizzes for {}", subject))?;
            println!("{}", category.name.bold().blue());
            for quiz in db.quizzes_for_category(category.id)? {
                println!("  - {} ({} questions)", quiz.title, quiz.questions.len());
            }
        }
    }

    db.close()?;
    Ok(())
}

fn print_card(rank: usize, card: &CardView<'_>) {
    let pod = card.pod;
    println!(
        "{}. {} [{}]",
        rank.to_string().green(),
        pod.name.bold(),
        pod.tags.join(", ")
    );
    if let Some(details) = card.details {
        let mut line = Vec::new();
        if let Some(schedule) = &details.schedule_label {
            line.push(schedule.clone());
        }
        if let Some(distance) = &details.distance_label {
            line.push(distance.clone());
        }
        if !line.is_empty() {
            println!("   {}", line.join(" ").cyan());
        }
    }
    if !pod.event_description.is_empty() {
        println!("   {}", pod.event_description);
    }
}

#[derive(Debug, PartialEq)]
enum SwipeCommand {
    Button(Outcome),
    Drag(Gesture),
    Quit,
}

fn parse_swipe(line: &str) -> Option<SwipeCommand> {
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "r" | "right" | "love" => Some(SwipeCommand::Button(Outcome::Accept)),
        "l" | "left" | "nope" => Some(SwipeCommand::Button(Outcome::Reject)),
        "q" | "quit" => Some(SwipeCommand::Quit),
        "d" | "drag" => {
            let dx = parts.next()?.parse().ok()?;
            let vx = parts.next()?.parse().ok()?;
            Some(SwipeCommand::Drag(Gesture::horizontal(dx, vx)))
        }
        _ => None,
    }
}
