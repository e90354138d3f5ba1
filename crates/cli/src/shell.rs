use rafflebox_core::{Action, Event, EventBus, RevealSource, Session};
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    Options,
    Generate(String),
    Draw,
    Pick(usize),
    Reset,
    Lang(String),
    Langs,
    Show,
    History,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let command = match head {
        "" => ShellCommand::Empty,
        "options" | "o" => ShellCommand::Options,
        "gen" | "g" => {
            if rest.is_empty() {
                return Err("usage: gen <a|b|c>".to_string());
            }
            ShellCommand::Generate(rest.split('|').collect::<Vec<_>>().join("\n"))
        }
        "draw" | "d" => ShellCommand::Draw,
        "pick" | "p" => {
            let number = rest
                .parse::<usize>()
                .map_err(|_| "usage: pick <ticket number>".to_string())?;
            if number == 0 {
                return Err("ticket numbers start at 1".to_string());
            }
            ShellCommand::Pick(number - 1)
        }
        "reset" | "r" => ShellCommand::Reset,
        "lang" | "l" => {
            if rest.is_empty() {
                return Err("usage: lang <code>".to_string());
            }
            ShellCommand::Lang(rest.to_string())
        }
        "langs" => ShellCommand::Langs,
        "show" | "s" | "ls" => ShellCommand::Show,
        "history" | "h" => ShellCommand::History,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try help)")),
    };
    Ok(command)
}

/// Interactive loop over any line source; returns when input ends or on `quit`.
pub fn run_shell<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let mut events = EventBus::default();
    writeln!(out, "{} (help: ?)", session.t("title"))?;
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        let action = match command {
            ShellCommand::Empty => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                print_help(session, out)?;
                continue;
            }
            ShellCommand::Show => {
                print_board(session, out)?;
                continue;
            }
            ShellCommand::History => {
                print_history(session, out)?;
                continue;
            }
            ShellCommand::Langs => {
                print_languages(session, out)?;
                continue;
            }
            ShellCommand::Options => {
                writeln!(out, "{} ('.' to finish)", session.t("optionsPlaceholder"))?;
                Action::Generate {
                    text: read_block(input)?,
                }
            }
            ShellCommand::Generate(text) => Action::Generate { text },
            ShellCommand::Draw => Action::Draw,
            ShellCommand::Pick(index) => Action::Select { index },
            ShellCommand::Reset => Action::Reset,
            ShellCommand::Lang(code) => Action::ChangeLanguage { code },
        };
        if let Err(err) = session.dispatch(action, &mut events) {
            writeln!(out, "error: {err}")?;
            continue;
        }
        for event in events.drain() {
            writeln!(out, "{}", format_event(session, &event))?;
        }
        print_board(session, out)?;
    }
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Collects lines until a lone `.` or end of input.
fn read_block<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut text = String::new();
    while let Some(line) = read_line(input)? {
        if line.trim_end_matches(['\r', '\n']) == "." {
            break;
        }
        text.push_str(&line);
    }
    Ok(text)
}

pub fn format_event(session: &Session, event: &Event) -> String {
    match event {
        Event::TicketsGenerated { total } => format!("{}: {total}", session.t("generate")),
        Event::OptionsMissing => session.t("enterOptions"),
        Event::TicketRevealed {
            index,
            label,
            source,
        } => {
            let marker = match source {
                RevealSource::Drawn => "*",
                RevealSource::Selected => "+",
            };
            format!("{marker} {} {}: {label}", session.t("ticketPrefix"), index + 1)
        }
        Event::DrawnOut => session.t("drawnOut"),
        Event::Reset => session.t("reset"),
        Event::LanguageChanged { code } => format!("{}: {code}", session.t("language")),
    }
}

fn print_board<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let view = session.view();
    let cells: Vec<String> = view
        .tickets
        .iter()
        .map(|ticket| {
            if ticket.revealed {
                format!("[{}] ({})", ticket.text, ticket.mark)
            } else {
                ticket.text.clone()
            }
        })
        .collect();
    if !cells.is_empty() {
        writeln!(out, "{}", cells.join(" | "))?;
    }
    writeln!(
        out,
        "{}: {}  {}: {}  {}: {}",
        view.labels.total,
        view.total,
        view.labels.picked,
        view.picked,
        view.labels.result,
        view.result
    )
}

fn print_history<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    writeln!(out, "== {} ==", session.t("history"))?;
    for label in session.store().history() {
        writeln!(out, "  {label}")?;
    }
    Ok(())
}

fn print_languages<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let current = session.localizer().current();
    for option in session.view().languages {
        let marker = if option.code == current { "*" } else { " " };
        writeln!(out, "{marker} {:<6} {}", option.code, option.name)?;
    }
    Ok(())
}

const HELP_LINES: [(&str, &str); 9] = [
    ("options", "helpOptions"),
    ("gen a|b|c", "helpGenerate"),
    ("draw | d", "helpDraw"),
    ("pick <n> | p <n>", "helpPick"),
    ("reset | r", "helpReset"),
    ("lang <code>", "helpLang"),
    ("langs", "helpLangs"),
    ("show | history", "helpShow"),
    ("quit | q", "helpQuit"),
];

fn print_help<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    writeln!(out, "== {} ==", session.t("help"))?;
    for (command, key) in HELP_LINES {
        writeln!(out, "{command:<16} {}", session.t(key))?;
    }
    Ok(())
}
