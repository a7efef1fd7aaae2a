//! Interactive REPL for the sensor station.
//!
//! Launch with `sensor-station repl` (or no subcommand) to enter interactive mode.
//! Type `/help` for available commands, Tab for completion.

use rustyline::completion::{Completer, Pair};
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Config, Editor, Event, EventContext, EventHandler, Helper,
    KeyEvent, RepeatCount,
};

use sensor_station::{Reading, Sensor, StationError, StationResult};

use crate::config::resolve_history_path;
use crate::session::StationSession;

/// Available REPL commands.
const COMMANDS: &[(&str, &str)] = &[
    ("/temp", "Create a temperature sensor: /temp <id>"),
    ("/pressure", "Create a pressure sensor: /pressure <id>"),
    ("/record", "Record a manual reading: /record <id> <value>"),
    ("/simulate", "Simulate Arduino readings: /simulate <id> <count>"),
    ("/process", "Process all sensors"),
    ("/describe", "Show info for all sensors"),
    ("/port", "Show serial port info"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Release all sensors and quit"),
];

/// A parsed REPL line.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    CreateTemperature(String),
    CreatePressure(String),
    Record { id: String, value: String },
    Simulate { id: String, count: usize },
    Process,
    Describe,
    Port,
    Help,
    Clear,
    Exit,
}

/// Parse one input line. A leading `/` is optional.
pub fn parse_command(line: &str) -> StationResult<ReplCommand> {
    let input = line.trim();
    let input = input.strip_prefix('/').unwrap_or(input);
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("help");
    let args: Vec<&str> = parts.collect();

    let command = match cmd {
        "exit" | "quit" => ReplCommand::Exit,
        "help" | "h" | "?" => ReplCommand::Help,
        "clear" | "cls" => ReplCommand::Clear,
        "process" => ReplCommand::Process,
        "describe" | "info" => ReplCommand::Describe,
        "port" => ReplCommand::Port,
        "temp" => ReplCommand::CreateTemperature(single_arg(&args, "/temp <id>")?),
        "pressure" => ReplCommand::CreatePressure(single_arg(&args, "/pressure <id>")?),
        "record" => match args.as_slice() {
            [id, value] => ReplCommand::Record {
                id: id.to_string(),
                value: value.to_string(),
            },
            _ => return Err(usage("/record <id> <value>")),
        },
        "simulate" => match args.as_slice() {
            [id, count] => {
                let count = count.parse::<usize>().map_err(|_| {
                    StationError::InvalidInput(format!("invalid reading count: {count}"))
                })?;
                ReplCommand::Simulate {
                    id: id.to_string(),
                    count,
                }
            }
            _ => return Err(usage("/simulate <id> <count>")),
        },
        _ => {
            return Err(StationError::InvalidInput(format!(
                "unknown command '/{cmd}'. Type /help for commands."
            )));
        }
    };
    Ok(command)
}

fn single_arg(args: &[&str], usage_line: &str) -> StationResult<String> {
    match args {
        [id] => Ok(id.to_string()),
        _ => Err(usage(usage_line)),
    }
}

fn usage(line: &str) -> StationError {
    StationError::InvalidInput(format!("usage: {line}"))
}

/// Run a parsed command against the session and return the text to show.
pub fn execute(session: &mut StationSession, command: &ReplCommand) -> StationResult<String> {
    let output = match command {
        ReplCommand::CreateTemperature(id) => {
            session.create_temperature(id)?;
            format!("Temperature sensor {id} created.")
        }
        ReplCommand::CreatePressure(id) => {
            session.create_pressure(id)?;
            format!("Pressure sensor {id} created.")
        }
        ReplCommand::Record { id, value } => {
            let reading = session.record(id, value)?;
            format!("[{id}] Reading registered: {reading}")
        }
        ReplCommand::Simulate { id, count } => {
            let readings = session.simulate(id, *count)?;
            let values: Vec<String> = readings.iter().map(Reading::to_string).collect();
            format!(
                "[{id}] Simulated {} readings: {}",
                readings.len(),
                values.join(", ")
            )
        }
        ReplCommand::Process => session
            .process_all()?
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        ReplCommand::Describe => session.describe_all()?.to_string(),
        ReplCommand::Port => session.port_info().to_string(),
        ReplCommand::Help => help_text(),
        ReplCommand::Clear | ReplCommand::Exit => String::new(),
    };
    Ok(output)
}

fn help_text() -> String {
    let mut text = String::from("Commands:\n\n");
    for (cmd, desc) in COMMANDS {
        text.push_str(&format!("  {cmd:<12} {desc}\n"));
    }
    text.push_str("\nTip: Tab completion works for commands and sensor IDs.");
    text
}

/// REPL helper for tab completion.
#[derive(Default)]
struct StationHelper {
    sensor_ids: Vec<String>,
}

impl Completer for StationHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];

        if !input.contains(' ') {
            let matches: Vec<Pair> = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<12} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return Ok((0, matches));
        }

        Ok(self
            .complete_sensor_id(input)
            .unwrap_or_else(|| (pos, Vec::new())))
    }
}

impl StationHelper {
    /// Complete the sensor ID argument of `record` / `simulate`, with or without the `/`.
    fn complete_sensor_id(&self, input: &str) -> Option<(usize, Vec<Pair>)> {
        let parts: Vec<&str> = input.splitn(2, ' ').collect();
        let cmd = parts[0].strip_prefix('/').unwrap_or(parts[0]);
        let args = if parts.len() > 1 { parts[1] } else { "" };

        if !matches!(cmd, "record" | "simulate") || args.contains(' ') {
            return None;
        }

        let prefix_start = input.len() - args.len();
        let matches: Vec<Pair> = self
            .sensor_ids
            .iter()
            .filter(|id| id.starts_with(args))
            .map(|id| Pair {
                display: id.clone(),
                replacement: format!("{id} "),
            })
            .collect();
        Some((prefix_start, matches))
    }
}

impl Hinter for StationHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        if line.starts_with('/') && !line.contains(' ') {
            for (cmd, _) in COMMANDS {
                if cmd.starts_with(line) && *cmd != line {
                    return Some(cmd[line.len()..].to_string());
                }
            }
        }
        None
    }
}

impl Highlighter for StationHelper {}
impl Validator for StationHelper {}
impl Helper for StationHelper {}

struct TabCompleteOrAcceptHint;

impl ConditionalEventHandler for TabCompleteOrAcceptHint {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        if ctx.has_hint() {
            Some(Cmd::CompleteHint)
        } else {
            Some(Cmd::Complete)
        }
    }
}

fn print_block(text: &str) {
    if text.is_empty() {
        return;
    }
    eprintln!();
    for line in text.lines() {
        if line.is_empty() {
            eprintln!();
        } else {
            eprintln!("  {line}");
        }
    }
    eprintln!();
}

/// Run the interactive REPL.
pub fn run(seed: Option<u64>) -> anyhow::Result<()> {
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{25c9}\x1b[0m \x1b[1msensor-station v{}\x1b[0m \x1b[90m\u{2014} IoT monitoring station\x1b[0m",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!();
    eprintln!(
        "    Press \x1b[36m/\x1b[0m to browse commands, \x1b[90mTab\x1b[0m to complete, \x1b[90m/exit\x1b[0m to quit."
    );
    eprintln!();

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let mut rl: Editor<StationHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(StationHelper::default()));
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabCompleteOrAcceptHint)),
    );

    let hist_path = resolve_history_path();
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let mut session = StationSession::open(seed);
    let prompt = " \x1b[36mstation>\x1b[0m ";

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("  {e}");
                        continue;
                    }
                };

                match command {
                    ReplCommand::Exit => {
                        eprintln!("  \x1b[90m\u{2728}\x1b[0m Releasing sensors. Goodbye!");
                        break;
                    }
                    ReplCommand::Clear => eprint!("\x1b[2J\x1b[H"),
                    command => match execute(&mut session, &command) {
                        Ok(output) => print_block(&output),
                        Err(e) => eprintln!("  \x1b[31m[Error]\x1b[0m {e}"),
                    },
                }

                if let Some(helper) = rl.helper_mut() {
                    helper.sensor_ids = session
                        .registry()
                        .iter()
                        .map(|s| s.name().to_string())
                        .collect();
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1m/exit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => {
                eprintln!("  \x1b[90m\u{2728}\x1b[0m Releasing sensors. Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = std::fs::create_dir_all(hist_path.parent().unwrap_or(std::path::Path::new(".")));
    let _ = rl.save_history(&hist_path);

    Ok(())
}
