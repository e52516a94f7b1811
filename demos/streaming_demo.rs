//! Streaming Demo: Watch a document being revised live.
//!
//! Simulates a model that first creates a document and then rewrites it,
//! streaming word-sized fragments through a [`DocumentWorker`]. Each
//! published update is redrawn as a styled redline.
//!
//! With `--ndjson`, events are read from stdin instead, one JSON object per
//! line (`{"type":"delta","data":"..."}`).
//!
//! Set `RUST_LOG=redline=debug` to see lifecycle logging.

use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, execute};
use redline::document::word_chunks;
use redline::{
    DiffPalette, Document, DocumentEvent, DocumentUpdate, DocumentWorker, RevisionWriter,
    WorkerConfig,
};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const FIRST_DRAFT: &str = r"## Release checklist

1. Run the test suite
2. Update the changelog
3. Tag the release

Ping the team in **#releases** when done.
";

const REVISION: &str = r"## Release checklist

1. Run the full test suite
2. Update the changelog and version
3. Tag the release

```sh
git tag -s v1.2.0
```

Ping the team in **#announcements** when done.
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let worker = DocumentWorker::spawn(WorkerConfig {
        debounce: Duration::from_millis(40),
        ..WorkerConfig::default()
    })?;
    let updates = worker.updates().clone();
    let display = thread::Builder::new()
        .name("redline-display".to_string())
        .spawn(move || {
            let palette = DiffPalette::default();
            for update in updates {
                if let Err(e) = draw(&update, &palette) {
                    eprintln!("Display error: {e}");
                    break;
                }
            }
        })?;

    if std::env::args().any(|arg| arg == "--ndjson") {
        replay_stdin(&worker)?;
    } else {
        simulate(&worker)?;
    }

    let final_state = worker.join()?;
    display
        .join()
        .map_err(|_| io::Error::other("display thread panicked"))?;

    let (previous, document) = final_state.into_parts();
    println!();
    println!(
        "Done: {:?}, {} lines (was {} lines).",
        document.title,
        document.line_count(),
        previous.lines().count()
    );
    Ok(())
}

/// Create a document, then rewrite it.
fn simulate(worker: &DocumentWorker) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = RevisionWriter::create(worker, "Release checklist")?;
    stream(&mut writer, FIRST_DRAFT)?;
    let draft: Document = writer.finish()?;

    thread::sleep(Duration::from_millis(800));

    let mut writer = RevisionWriter::update(worker, &draft)?;
    stream(&mut writer, REVISION)?;
    writer.finish()?;
    Ok(())
}

fn stream(
    writer: &mut RevisionWriter<&DocumentWorker>,
    text: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    for chunk in word_chunks(text) {
        writer.push(chunk)?;
        thread::sleep(Duration::from_millis(25));
    }
    Ok(())
}

/// Forward newline-delimited JSON events from stdin.
fn replay_stdin(worker: &DocumentWorker) -> Result<(), Box<dyn std::error::Error>> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<DocumentEvent>(&line) {
            Ok(event) => worker.send(event)?,
            Err(e) => eprintln!("Skipping malformed event: {e}"),
        }
    }
    worker.flush()?;
    Ok(())
}

fn draw(update: &DocumentUpdate, palette: &DiffPalette) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    execute!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

    let status = if update.is_final_revision() { "done" } else { "streaming" };
    writeln!(
        stdout,
        "{} (revision {}, {status})\r\n",
        update.document.title, update.revision
    )?;

    let body = update.annotated.as_deref().unwrap_or(&update.document.content);
    redline::write_annotated(&mut stdout, &body.replace('\n', "\r\n"), palette)?;
    stdout.flush()
}
