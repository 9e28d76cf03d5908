//! Cube Guesser - Main Binary
//!
//! Text front end for the guessing game: load a cube, pick a mode, play from
//! stdin.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use cube_guesser::{
    core::CardRepository,
    game::{
        spawn_line_reader, EventHandler, EventLoop, Flow, GameEngine, GameLogger, GameMode,
        InvalidAction, Outcome, Phase, Transition, VerbosityLevel,
    },
    loader::{CubeDirectory, CubeLoader},
    persist::{JsonFileStore, MemoryStore, ScoreStore},
    quiz::{CubeStats, Fact},
    GameConfig,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "cubeguess")]
#[command(about = "Guess the card from a cube, one hint at a time", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the cube comes from
#[derive(clap::Args, Debug)]
struct CubeSource {
    /// Cube export file (Cube Cobra JSON)
    #[arg(long, value_name = "FILE", conflicts_with_all = ["cube_dir", "id"])]
    cube: Option<PathBuf>,

    /// Directory of cube exports named <ID>.json
    #[arg(long, value_name = "DIR", requires = "id")]
    cube_dir: Option<PathBuf>,

    /// Cube identifier inside --cube-dir
    #[arg(long, value_name = "ID", requires = "cube_dir")]
    id: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a session
    Play {
        #[command(flatten)]
        source: CubeSource,

        /// Game mode: infinite, challenge, challenge-<N>, timed, hardcore, trivia, stats
        #[arg(long, default_value = "infinite")]
        mode: GameMode,

        /// Config file (JSON); unset fields keep their defaults
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Random seed for deterministic draws
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal")]
        verbosity: VerbosityLevel,

        /// High-score and statistics file; kept in memory when absent
        #[arg(long, value_name = "FILE")]
        scores: Option<PathBuf>,
    },

    /// Print aggregate statistics of a cube (and stored play statistics)
    Stats {
        #[command(flatten)]
        source: CubeSource,

        /// High-score and statistics file
        #[arg(long, value_name = "FILE")]
        scores: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Stdin is read on a blocking thread that cannot be cancelled; shut down
    // in the background so quitting does not wait for another line.
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(cli));
    runtime.shutdown_background();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Play {
            source,
            mode,
            config,
            seed,
            verbosity,
            scores,
        } => run_play(source, mode, config, seed, verbosity, scores).await?,
        Commands::Stats { source, scores } => run_stats(source, scores).await?,
    }

    Ok(())
}

async fn load_cube(source: &CubeSource) -> anyhow::Result<Arc<CardRepository>> {
    match (&source.cube, &source.cube_dir, &source.id) {
        (Some(path), _, _) => {
            let repo = CubeLoader::load_from_file_async(path)
                .await
                .with_context(|| format!("failed to load cube {}", path.display()))?;
            if repo.is_empty() {
                bail!("cube {} has no usable cards", path.display());
            }
            Ok(Arc::new(repo))
        }
        (None, Some(dir), Some(id)) => CubeDirectory::new(dir)
            .load(id)
            .await
            .with_context(|| format!("failed to load cube \"{id}\"")),
        _ => bail!("either --cube <FILE> or --cube-dir <DIR> --id <ID> is required"),
    }
}

fn open_store(scores: Option<&Path>) -> anyhow::Result<Box<dyn ScoreStore>> {
    Ok(match scores {
        Some(path) => Box::new(
            JsonFileStore::open(path)
                .with_context(|| format!("failed to open scores file {}", path.display()))?,
        ),
        None => Box::new(MemoryStore::new()),
    })
}

async fn run_play(
    source: CubeSource,
    mode: GameMode,
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    verbosity: VerbosityLevel,
    scores: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = match &config_path {
        Some(path) => GameConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let repo = load_cube(&source).await?;
    let store = open_store(scores.as_deref())?;
    let logger = GameLogger::with_verbosity(verbosity);

    println!("=== Cube Guesser ===");
    println!("Loaded {} cards", repo.len());
    if repo.skipped() > 0 {
        println!("({} records without a name were skipped)", repo.skipped());
    }

    let mut engine = GameEngine::with_logger(repo, config, store, logger)?;
    if let Err(e) = engine.start_mode(mode) {
        bail!("cannot start {}: {e}", mode.label());
    }
    print_help(mode);

    let mut terminal = Terminal;
    terminal.show(&engine);

    let mut event_loop = EventLoop::new();
    let reader = spawn_line_reader(tokio::io::stdin(), event_loop.sender());
    event_loop.run(&mut engine, &mut terminal).await;
    reader.abort();

    let stats = engine.play_stats();
    if stats.games_played > 0 {
        println!(
            "Lifetime: {} cards guessed of {} played, {:.1} guesses per card, best streak {}",
            stats.cards_guessed,
            stats.games_played,
            stats.average_guesses(),
            stats.best_streak
        );
    }
    Ok(())
}

async fn run_stats(source: CubeSource, scores: Option<PathBuf>) -> anyhow::Result<()> {
    let repo = load_cube(&source).await?;
    let stats = CubeStats::compute(&repo);

    println!("=== Cube Statistics ===");
    for fact in stats.facts() {
        println!("{:>5}  {}", stats.count(&fact), fact_label(&fact));
    }

    if let Some(path) = scores {
        let store = open_store(Some(&path))?;
        let play = store.play_stats();
        println!();
        println!("=== Play Statistics ===");
        println!("Games played:     {}", play.games_played);
        println!("Cards guessed:    {}", play.cards_guessed);
        println!("Average guesses:  {:.1}", play.average_guesses());
        println!("Best streak:      {}", play.best_streak);
        for mode in [
            GameMode::challenge(),
            GameMode::Challenge { rounds: 10 },
            GameMode::Timed,
            GameMode::Hardcore,
            GameMode::Trivia,
            GameMode::StatsChallenge,
        ] {
            println!("Best {:<18}{}", format!("{}:", mode.label()), store.high_score(&mode.key()));
        }
    }
    Ok(())
}

fn fact_label(fact: &Fact) -> String {
    match fact {
        Fact::TotalCards => "cards".to_string(),
        Fact::Color(color) => color.name().to_string(),
        Fact::Colorless => "colorless".to_string(),
        Fact::Multicolor => "multicolor".to_string(),
        Fact::CardType(t) => t.to_string(),
        Fact::Keyword(k) => format!("mention {k}"),
        Fact::ManaValue(bucket) if *bucket + 1 >= cube_guesser::quiz::stats::MANA_VALUE_BUCKETS => {
            format!("mana value {bucket}+")
        }
        Fact::ManaValue(bucket) => format!("mana value {bucket}"),
        Fact::Set(name) => format!("from {name}"),
    }
}

fn print_help(mode: GameMode) {
    if mode.is_quiz() {
        println!("Answer with an option number (1-4). n = next question, q = quit");
    } else {
        println!(
            "Type a card name to guess. h = next hint, < > = browse hints, r = reveal, \
             n = next card, s <text> = suggestions, q = quit"
        );
    }
}

/// Stdin/stdout presentation of a session
struct Terminal;

impl Terminal {
    fn show(&self, engine: &GameEngine) {
        let view = engine.view();
        println!();
        let round = match view.rounds_total {
            Some(total) => format!("{} / {total}", view.round),
            None => view.round.to_string(),
        };
        let mut status = format!("[{}] Round {round}  Score {}", view.mode_label, view.score);
        if let Some(lives) = view.lives_left {
            status.push_str(&format!("  Lives {lives}"));
        }
        if let Some(time) = view.time_remaining {
            status.push_str(&format!("  Time {time}s"));
        }
        if view.streak > 0 {
            status.push_str(&format!("  Streak {}", view.streak));
        }
        println!("{status}");

        if let Some(question) = &view.question {
            println!("{}", question.prompt);
            for (i, option) in question.options.iter().enumerate() {
                println!("  {}) {option}", i + 1);
            }
        } else {
            for hint in &view.hints {
                let marker = if hint.index == view.current_hint { ">" } else { " " };
                println!("{marker} {}: {}", hint.category, hint.text);
            }
            if view.phase == Phase::RoundActive {
                println!(
                    "Guesses: {} / {}",
                    view.guesses_used, view.guess_cap
                );
            }
        }

        if let Some(answer) = &view.answer {
            let verdict = if view.outcome == Outcome::Won { "Correct!" } else { "The card was" };
            println!("{verdict} {answer}");
        }
        if let Some(summary) = &view.summary {
            println!("Final score: {} ({summary})", view.score);
            if view.new_high_score {
                println!("New high score!");
            }
        } else if view.final_round {
            println!("Press n to see your results");
        }
    }

    fn report(&self, engine: &GameEngine, result: Result<Transition, InvalidAction>) -> Flow {
        match result {
            Ok(Transition::GuessRejected { guess, guesses_left }) => {
                println!("Not {guess}. {guesses_left} guesses left.");
            }
            Ok(Transition::HintViewed { .. }) | Ok(Transition::HintRevealed { .. }) => {
                self.show(engine);
            }
            Ok(Transition::SessionComplete { .. }) => {
                self.show(engine);
                return Flow::Quit;
            }
            Ok(_) => self.show(engine),
            Err(reason) => println!("({reason})"),
        }
        Flow::Continue
    }

    /// A guess that is not an exact name goes to the first suggestion
    fn resolve_guess(engine: &GameEngine, text: &str) -> String {
        if !engine.repository().find_by_name(text).is_empty() {
            return text.to_string();
        }
        engine
            .suggest(text)
            .into_iter()
            .next()
            .unwrap_or_else(|| text.to_string())
    }
}

impl EventHandler for Terminal {
    fn on_input(&mut self, engine: &mut GameEngine, line: &str) -> Flow {
        let line = line.trim();
        let quiz = engine.session().mode.is_quiz();
        let result = match line {
            "" => return Flow::Continue,
            "q" | "quit" => return Flow::Quit,
            "h" | "hint" => engine.advance_hint(),
            "<" => engine.previous_hint(),
            ">" => engine.next_revealed_hint(),
            "r" | "reveal" => engine.reveal_answer(),
            "n" | "next" => engine.advance_round(),
            _ if line.starts_with("s ") => {
                let suggestions = engine.suggest(&line[2..]);
                if suggestions.is_empty() {
                    println!("No matching cards");
                }
                for name in suggestions {
                    println!("  {name}");
                }
                return Flow::Continue;
            }
            _ if quiz => match line.parse::<usize>() {
                Ok(n) if n >= 1 => engine.answer_option(n - 1),
                _ => Err(InvalidAction::UnknownOption),
            },
            guess => {
                let guess = Self::resolve_guess(engine, guess);
                engine.submit_guess(&guess)
            }
        };
        self.report(engine, result)
    }

    fn on_tick(&mut self, engine: &GameEngine, transition: &Transition) -> Flow {
        match transition {
            Transition::Ticked { remaining } if *remaining % 10 == 0 || *remaining <= 5 => {
                println!("{remaining}s left");
            }
            Transition::TimeExpired => {
                println!("Time's up!");
                self.show(engine);
            }
            _ => {}
        }
        Flow::Continue
    }
}
