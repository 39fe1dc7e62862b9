//! Line-oriented host for the wish story.
//!
//! A simple text protocol suitable for terminals, scripts and AI agents:
//! - Lines starting with `#` are commands (step, reset, restart, status, help, quit)
//! - Any other line is the primary action of the current stage: the wish
//!   text while waiting for one, otherwise "continue" (an empty line works)

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::warn;
use wish_core::headless::{HeadlessConfig, HeadlessSession};
use wish_core::{DisplayPayload, Mark, Outcome, SessionError};

/// How payloads are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human readable text.
    Text,
    /// One JSON object per payload.
    Json,
}

const HELP: &[(&str, &str)] = &[
    ("#step", "Check the next present"),
    ("#reset", "Start the search over"),
    ("#restart", "Forget the wish and start a new story"),
    ("#status", "Show where the story is"),
    ("#help", "Show this help"),
    ("#quit", "Exit"),
];

/// Print one payload.
pub fn render<W: Write>(out: &mut W, payload: &DisplayPayload, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            writeln!(out, "{}", serde_json::to_string(payload)?)?;
        }
        Format::Text => {
            writeln!(out, "{}", payload.message)?;
            writeln!(out)?;

            if !payload.gifts.is_empty() {
                writeln!(out, "Presents under the tree (unsorted):")?;
                for gift in &payload.gifts {
                    let status = match gift.mark {
                        Mark::Unchecked => String::new(),
                        mark => format!("  {}", mark.label()),
                    };
                    writeln!(out, "  [{:>2}] {:<16}{status}", gift.index, gift.name)?;
                }
                writeln!(out)?;
            }

            if payload.controls.search_controls {
                writeln!(out, "> {} (enter)   #reset", payload.action.label())?;
            } else {
                writeln!(out, "> {} (enter)", payload.action.label())?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "[HELP]")?;
    for (command, description) in HELP {
        writeln!(out, "  {command:<12} - {description}")?;
    }
    writeln!(out, "  (anything else is your wish, or continues the story)")?;
    Ok(())
}

fn print_status<W: Write>(out: &mut W, game: &HeadlessSession) -> Result<()> {
    writeln!(out, "[STATUS]")?;
    writeln!(out, "  Stage: {}", game.stage())?;
    writeln!(out, "  Wish: {}", game.wish().unwrap_or("(none yet)"))?;
    writeln!(out, "  Presents: {}", game.presents().len())?;
    writeln!(out, "  Cursor: {}", game.cursor())?;
    match game.outcome() {
        Some(Outcome::Found(index)) => writeln!(out, "  Outcome: found at [{index}]")?,
        Some(Outcome::NotFound) => writeln!(out, "  Outcome: not found")?,
        None => {}
    }
    Ok(())
}

/// Print the result of an event; rejected events are reported and ignored.
fn report<W: Write>(
    out: &mut W,
    result: Result<&DisplayPayload, SessionError>,
    format: Format,
) -> Result<()> {
    match result {
        Ok(payload) => render(out, payload, format),
        Err(e) => {
            writeln!(out, "[ERROR] {e}")?;
            Ok(())
        }
    }
}

/// Run the story over a line protocol until input ends or `#quit`.
pub fn run_headless<R: BufRead, W: Write>(
    config: HeadlessConfig,
    input: R,
    out: &mut W,
    format: Format,
) -> Result<()> {
    let mut game = HeadlessSession::new(config)?;

    if format == Format::Text {
        writeln!(out, "=== Christmas Linear Search ===")?;
        writeln!(out, "Type #help for commands.")?;
        writeln!(out)?;
    }
    if let Some(welcome) = game.last_payload() {
        render(out, welcome, format)?;
    }
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();

        if let Some(command) = line.strip_prefix('#') {
            match command.trim() {
                "quit" | "exit" => {
                    if format == Format::Text {
                        writeln!(out, "Merry Christmas!")?;
                    }
                    break;
                }
                "step" => report(out, game.step(), format)?,
                "reset" => report(out, game.reset(), format)?,
                "restart" => render(out, game.restart(), format)?,
                "status" => print_status(out, &game)?,
                "help" => print_help(out)?,
                other => {
                    warn!(command = other, "unknown command");
                    writeln!(out, "[ERROR] Unknown command. Type #help for help.")?;
                }
            }
        } else {
            report(out, game.send(line), format)?;
        }
        out.flush()?;
    }

    Ok(())
}

/// Play one whole story without input and print every payload.
pub fn run_auto<W: Write>(config: HeadlessConfig, wish: &str, out: &mut W, format: Format) -> Result<()> {
    let mut game = HeadlessSession::new(config)?;
    let transcript = game.play(wish)?;
    for payload in &transcript.payloads {
        render(out, payload, format)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};
    use std::sync::{Arc, Mutex};

    /// Collects log lines written by a test subscriber.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn run(script: &str, format: Format) -> String {
        let config = HeadlessConfig::quick_start().with_seed(3);
        let mut out = Vec::new();
        run_headless(config, Cursor::new(script), &mut out, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_walks_to_christmas_morning() {
        let output = run("Lego Set\n\n\n", Format::Text);
        assert!(output.contains("Welcome"));
        assert!(output.contains("time for bed"));
        assert!(output.contains("The night passes"));
        assert!(output.contains("Presents under the tree"));
        assert!(output.contains("> Start searching (enter)"));
    }

    #[test]
    fn test_empty_first_line_asks_again() {
        let output = run("\n", Format::Text);
        assert!(output.contains("Please enter your gift"));
    }

    #[test]
    fn test_illegal_command_is_reported() {
        let output = run("#reset\n#bogus\n", Format::Text);
        assert!(output.contains("[ERROR] Story error: Cannot reset during Make a Wish"));
        assert!(output.contains("Unknown command"));
    }

    #[test]
    fn test_unknown_command_is_logged() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let output = tracing::subscriber::with_default(subscriber, || run("#bogus\n", Format::Text));
        assert!(output.contains("Unknown command"));

        let logs = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("WARN"), "Logs: {logs}");
        assert!(logs.contains("unknown command"));
        assert!(logs.contains("bogus"));
    }

    #[test]
    fn test_quit_stops_reading() {
        let output = run("#quit\nLego Set\n", Format::Text);
        assert!(output.contains("Merry Christmas!"));
        assert!(!output.contains("time for bed"));
    }

    #[test]
    fn test_json_lines() {
        let output = run("Kite\n#status\n", Format::Json);
        let payloads: Vec<serde_json::Value> = output
            .lines()
            .filter(|l| l.starts_with('{'))
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[1]["action"], "go_to_sleep");
        assert_eq!(payloads[1]["state"]["stage"]["stage"], "bedtime");
        assert!(output.contains("Stage: Bedtime"));
    }

    #[test]
    fn test_auto_plays_to_the_end() {
        let config = HeadlessConfig::quick_start().with_seed(12);
        let mut out = Vec::new();
        run_auto(config, "Puzzle", &mut out, Format::Text).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Found it!") || output.contains("Not found"));
        assert!(output.contains("> Play again"));
    }
}
