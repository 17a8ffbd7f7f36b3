use clap::Parser;
use crossterm::{
    cursor,
    event::{
        DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flashcard_generator::{
    config::Config,
    controller::{ActionOutcome, FlashcardController},
    input::{handle_key, handle_paste, Command},
    logger, ui,
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    let _log_guard = logger::init(config.log_dir.as_deref());

    let generator = config.build_generator()?;
    let decks = config.build_deck_service()?;
    tracing::info!(backend = ?config.backend, generator = %generator.name(), "starting");

    let mut controller = FlashcardController::new(
        generator,
        decks,
        config.deck_name.clone(),
        config.output_dir.clone(),
    );

    // Request tasks run on runtime workers and recover from panics themselves;
    // only a panic on this thread tears the UI down.
    let ui_thread = std::thread::current().id();
    logger::install_panic_hook(move || {
        if std::thread::current().id() == ui_thread {
            restore_terminal();
        }
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut controller).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "event loop terminated");
    }
    result?;
    Ok(())
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        DisableBracketedPaste,
        LeaveAlternateScreen,
        cursor::Show
    );
}

async fn run(terminal: &mut Tui, controller: &mut FlashcardController) -> io::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<ActionOutcome>();
    let mut events = EventStream::new();

    loop {
        terminal.draw(|f| ui::draw_app(f, controller))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match handle_key(controller, key) {
                        Command::Quit => break,
                        Command::Generate => controller.dispatch_generate(&tx),
                        Command::Submit => controller.dispatch_submit(&tx),
                        Command::Download => {
                            controller.download();
                        }
                        Command::None => {}
                    }
                }
                Some(Ok(Event::Paste(text))) => handle_paste(controller, &text),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },
            Some(outcome) = rx.recv() => controller.apply(outcome),
        }
    }

    Ok(())
}
