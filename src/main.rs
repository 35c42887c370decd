//! Sortle - headless runner for the animated sorting engine
//!
//! Builds a shuffled array, runs one algorithm over it and prints each frame
//! the renderer would draw.

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sortle::events::EventReceiver;
use sortle::shuffle::ShuffleMode;
use sortle::{ElementState, SequenceEvent, Session, Settings, SortError};

#[derive(Debug, Parser)]
#[command(
    name = "sortle",
    about = "Watch classic sorting algorithms step through a shuffled array",
    version
)]
struct Cli {
    /// bubble, insertion, merge, heap or quick
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Number of elements, clamped to the configured maximum
    #[arg(short, long)]
    size: Option<usize>,

    /// Sort immediately without animation
    #[arg(long)]
    silent: bool,

    /// Fixed shuffle seed
    #[arg(long)]
    seed: Option<u64>,

    /// Use the original shuffle, which never leaves a value in place
    #[arg(long)]
    classic_shuffle: bool,

    /// Pause per step in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Pause after the sort in milliseconds
    #[arg(long)]
    end_delay_ms: Option<u64>,

    /// Print a frame for every visible change
    #[arg(long)]
    frames: bool,

    /// Store the effective settings as the new defaults
    #[arg(long)]
    save_settings: bool,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(delay_ms) = self.delay_ms {
            settings.animation.delay_ms = delay_ms;
        }
        if let Some(end_delay_ms) = self.end_delay_ms {
            settings.animation.end_delay_ms = end_delay_ms;
        }
        if self.seed.is_some() {
            settings.array.seed = self.seed;
        }
        if self.classic_shuffle {
            settings.array.shuffle_mode = ShuffleMode::Classic;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::load();
    cli.apply(&mut settings);
    if cli.save_settings {
        settings.save().context("saving settings")?;
        info!("Settings saved to {:?}", Settings::file_path());
    }

    let size = cli.size.unwrap_or(settings.array.default_size);
    let mut session = Session::new(settings);
    if let Some(name) = &cli.algorithm {
        session.select(name)?;
    }

    let initial = session.refresh(size)?.values();
    println!("{}", format_frame(&initial, None));

    if cli.silent {
        let report = session.run_silent()?;
        if let Some(seq) = session.active_sequence() {
            println!("{}", format_frame(&seq.values(), None));
        }
        info!(algorithm = %report.algorithm, stats = ?report.stats, "Done");
        return Ok(());
    }

    // Ctrl-C stops the sort at its next step
    let cancel = session.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let events = session.subscribe()?;
    let renderer = tokio::spawn(render(events, initial, cli.frames));

    match session.run_animated().await {
        Ok(report) => {
            let last = renderer.await.context("renderer task")?;
            println!("{}", format_frame(&last, None));
            info!(
                algorithm = %report.algorithm,
                comparisons = report.stats.comparisons,
                swaps = report.stats.swaps,
                writes = report.stats.writes,
                elapsed = ?report.elapsed,
                "Done"
            );
            Ok(())
        }
        Err(SortError::Cancelled) => {
            renderer.abort();
            warn!("Sort cancelled, array left partially sorted");
            Ok(())
        }
        Err(e) => {
            renderer.abort();
            Err(e.into())
        }
    }
}

/// Mirror the sequence from its events until the completion animation ends
async fn render(mut events: EventReceiver, mut values: Vec<u32>, frames: bool) -> Vec<u32> {
    let mut states = vec![ElementState::Inactive; values.len()];

    while let Some(event) = events.recv().await {
        match event {
            SequenceEvent::ValueChanged { index, value } => {
                if let Some(slot) = values.get_mut(index) {
                    *slot = value;
                }
            }
            SequenceEvent::StateChanged { index, state } => {
                if let Some(slot) = states.get_mut(index) {
                    *slot = state;
                }
            }
            SequenceEvent::StatesReset => states.fill(ElementState::Inactive),
            SequenceEvent::Finished => break,
        }

        if frames {
            println!("{}", format_frame(&values, Some(states.as_slice())));
        }
    }

    values
}

fn format_frame(values: &[u32], states: Option<&[ElementState]>) -> String {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let state = states
                .and_then(|s| s.get(i))
                .copied()
                .unwrap_or_default();
            match state {
                ElementState::Inactive => format!(" {} ", value),
                ElementState::Active => format!(">{}<", value),
                ElementState::Swapping => format!("*{}*", value),
                ElementState::Done => format!("[{}]", value),
            }
        })
        .collect::<Vec<_>>()
        .join("")
}
