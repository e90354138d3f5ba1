use anyhow::{bail, Context};
use rafflebox_core::{Action, Event, EventBus, Session};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Reads options from `path` (`-` for stdin).
pub fn read_options_text(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("read options from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("read options from {}", path.display()))
}

/// Generates tickets from `text` and draws `count` of them (0 = all), writing one label
/// per line. Stops early with the drawn-out notice when the pool empties.
pub fn draw_labels<W: Write>(
    session: &mut Session,
    text: &str,
    count: usize,
    out: &mut W,
) -> anyhow::Result<Vec<String>> {
    let mut events = EventBus::default();
    session.dispatch(
        Action::Generate {
            text: text.to_string(),
        },
        &mut events,
    )?;
    if events.drain().any(|event| event == Event::OptionsMissing) {
        bail!("{}", session.t("enterOptions"));
    }
    let rounds = if count == 0 {
        session.store().counts().total
    } else {
        count
    };
    let mut drawn = Vec::with_capacity(rounds);
    for _ in 0..rounds {
        session.dispatch(Action::Draw, &mut events)?;
        for event in events.drain() {
            match event {
                Event::TicketRevealed { label, .. } => {
                    writeln!(out, "{label}")?;
                    drawn.push(label);
                }
                Event::DrawnOut => {
                    writeln!(out, "{}", session.t("drawnOut"))?;
                    return Ok(drawn);
                }
                _ => {}
            }
        }
    }
    Ok(drawn)
}
