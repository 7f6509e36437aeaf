use std::{
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use anyhow::Context;
use clap::{error::ErrorKind, Args, CommandFactory, Parser, Subcommand};
use crossterm::{
    event::KeyCode,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use stronglytyped::{
    config::{Config, ConfigStore, FileConfigStore},
    corpus::Corpus,
    runtime::{session_event, AppEvent, Countdown, CrosstermEventSource, FixedTicker, Runner},
    session::{Event, Mode, Session},
    stats::Stats,
    ui::SessionView,
    word_generator::WordGenerator,
    TICK_RATE_MS,
};

/// typing test with an endless scrolling word stream
#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start typing test
    Tt(TestArgs),
}

#[derive(Args, Debug)]
struct TestArgs {
    /// length of the test in seconds
    #[clap(short = 'l', long)]
    length: Option<u64>,

    /// type a fixed number of words instead of racing the clock
    #[clap(short = 'w', long)]
    words: Option<usize>,

    /// shortest word to generate
    #[clap(long)]
    min_length: Option<usize>,

    /// longest word to generate
    #[clap(long)]
    max_length: Option<usize>,

    /// words rendered per line
    #[clap(long)]
    words_per_line: Option<usize>,

    /// number of visible lines
    #[clap(long)]
    lines: Option<usize>,

    /// newline-separated (or json) word list to draw from
    #[clap(short = 'c', long)]
    corpus: Option<PathBuf>,

    /// remember these settings for next time
    #[clap(long)]
    save: bool,
}

impl TestArgs {
    /// Flags win over stored settings
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(length) = self.length {
            cfg.duration_secs = length;
            cfg.word_count = None;
        }
        if let Some(words) = self.words {
            cfg.word_count = Some(words);
        }
        if let Some(min) = self.min_length {
            cfg.min_word_length = min;
        }
        if let Some(max) = self.max_length {
            cfg.max_word_length = max;
        }
        if let Some(wpl) = self.words_per_line {
            cfg.words_per_line = wpl;
        }
        if let Some(lines) = self.lines {
            cfg.lines_per_page = lines;
        }
        cfg
    }
}

fn new_session(cfg: &Config, corpus: &Corpus) -> stronglytyped::Result<Session> {
    let generator = WordGenerator::new(corpus.clone(), cfg.min_word_length, cfg.max_word_length);
    Session::new(cfg.session_config(), generator)
}

fn countdown(cfg: &Config) -> Option<Countdown> {
    match cfg.mode() {
        Mode::Timed(duration) => Some(Countdown::new(duration)),
        Mode::Words(_) => None,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Command::Tt(args) = cli.command;

    let store = FileConfigStore::new();
    let cfg = args.apply(store.load());
    cfg.validate()?;
    if args.save {
        store
            .save(&cfg)
            .with_context(|| format!("saving config to {}", store.path().display()))?;
    }

    let corpus = match &args.corpus {
        Some(path) => Corpus::from_file(path)
            .with_context(|| format!("loading word list {}", path.display()))?,
        None => Corpus::embedded()?,
    };
    // surfaces an empty filtered corpus before the terminal is touched
    let session = new_session(&cfg, &corpus)?;

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &cfg, &corpus, session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(stats) = result? {
        println!("{stats}");
    }

    Ok(())
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    cfg: &Config,
    corpus: &Corpus,
    mut session: Session,
) -> anyhow::Result<Option<Stats>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let mut timer = countdown(cfg);

    loop {
        terminal.draw(|f| f.render_widget(SessionView::new(session.state()), f.area()))?;

        match runner.step() {
            AppEvent::Tick => {
                let state = session.state();
                if !state.has_started() || state.is_done() {
                    continue;
                }
                let dt = runner.tick_interval();
                match timer.as_mut() {
                    Some(timer) => {
                        for event in timer.tick(dt) {
                            session.handle(event);
                        }
                    }
                    None => session.handle(Event::Tick(dt)),
                }
            }
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                let event = session_event(&key);
                if session.state().is_done() {
                    if event == Some(Event::Interrupt) {
                        return Ok(session.finalize());
                    }
                    if key.code == KeyCode::Char('r') {
                        session = new_session(cfg, corpus)?;
                        timer = countdown(cfg);
                    }
                    continue;
                }

                if let Some(event) = event {
                    session.handle(event);
                }
                if session.state().is_interrupted() {
                    return Ok(None);
                }
            }
        }
    }
}
