extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use ansi_term::Style;
use drone_asm::error;
use drone_asm::lang::token::Word;
use drone_asm::lang::Error;
use drone_asm::mach::{Config, Event, Listing, Program, Runtime, Vehicle};
use drone_asm::vision::Picture;
use linefeed::{Completer, Completion, Interface, Prompter, ReadResult, Terminal};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::warn;

const HELP: &str = "\
.run          compile and run the listing
.list         show the listing
.new          clear the listing
.load FILE    replace the listing with a file
.save FILE    write the listing to a file
.live         fly a Tello
.sim          fly the simulator
.path         show the last flight path
.help         this text
.quit         exit
Any other line is appended to the listing.";

pub struct Options {
    pub live: bool,
    pub check: bool,
    pub telemetry: bool,
    /// Pictures shown with DISPLAY are also written here as PNG files.
    pub show_dir: Option<PathBuf>,
}

fn vehicle(live: bool) -> Vehicle {
    if live {
        Vehicle::Live
    } else {
        Vehicle::Simulated
    }
}

fn bold(error: &Error) -> String {
    Style::new().bold().paint(error.to_string()).to_string()
}

fn install_interrupt(runtime: &Runtime) {
    let interrupted = runtime.interrupt_handle();
    if let Err(e) = ctrlc::set_handler(move || {
        interrupted.store(true, Ordering::SeqCst);
    }) {
        warn!("unable to set Ctrl-C handler: {}", e);
    }
}

/// Compile and run one file. Returns the process exit code.
pub fn run_file(path: &Path, config: Config, options: &Options) -> i32 {
    let program = match load(path).and_then(|listing| listing.compile()) {
        Ok(program) => program,
        Err(error) => {
            eprintln!("{}", bold(&error));
            return 1;
        }
    };
    if options.check {
        println!("{}: {} lines OK", path.display(), program.line_count());
        return 0;
    }
    let mut runtime = Runtime::new(config);
    install_interrupt(&runtime);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = run(&mut runtime, program, vehicle(options.live), options, |s| {
        writeln!(out, "{}", s)
    });
    if options.telemetry {
        for line in telemetry(&runtime) {
            println!("{}", line);
        }
    }
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            eprintln!("{}", error);
            1
        }
    }
}

/// Interactive session. Returns the process exit code.
pub fn main(config: Config, options: &Options) -> i32 {
    if let Err(error) = main_loop(config, options) {
        eprintln!("{}", error);
        return 1;
    }
    0
}

fn main_loop(config: Config, options: &Options) -> io::Result<()> {
    let mut runtime = Runtime::new(config);
    install_interrupt(&runtime);
    let interface = Interface::new("DroneASM")?;
    interface.set_completer(Arc::new(WordCompleter));
    let mut listing = Listing::default();
    let mut live = options.live;
    interface.write_fmt(format_args!("DroneASM\n.help for commands\n"))?;

    loop {
        interface.set_prompt(if live { "live> " } else { "> " })?;
        let input = match interface.read_line()? {
            ReadResult::Input(input) => input,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        if input.trim().is_empty() {
            continue;
        }
        let command = match input.trim().strip_prefix('.') {
            Some(command) => command.trim().to_string(),
            None => {
                match listing.push(&input) {
                    Ok(_) => interface.add_history_unique(input),
                    Err(error) => interface.write_fmt(format_args!("{}\n", bold(&error)))?,
                }
                continue;
            }
        };
        interface.add_history_unique(input.clone());
        let (verb, argument) = match command.find(char::is_whitespace) {
            Some(index) => (&command[..index], command[index..].trim()),
            None => (command.as_str(), ""),
        };
        match verb.to_lowercase().as_str() {
            "run" => {
                let program = match listing.compile() {
                    Ok(program) => program,
                    Err(error) => {
                        interface.write_fmt(format_args!("{}\n", bold(&error)))?;
                        continue;
                    }
                };
                run(&mut runtime, program, vehicle(live), options, |s| {
                    interface.write_fmt(format_args!("{}\n", s))
                })?;
                if options.telemetry {
                    for line in telemetry(&runtime) {
                        interface.write_fmt(format_args!("{}\n", line))?;
                    }
                }
            }
            "list" => {
                for (index, line) in listing.lines().enumerate() {
                    interface.write_fmt(format_args!("{:>4} {}\n", index + 1, line))?;
                }
            }
            "new" => {
                listing.clear();
                runtime.reset();
            }
            "load" => match load(Path::new(argument)) {
                Ok(loaded) => listing = loaded,
                Err(error) => interface.write_fmt(format_args!("{}\n", bold(&error)))?,
            },
            "save" => {
                if let Err(error) = save(&listing, Path::new(argument)) {
                    interface.write_fmt(format_args!("{}\n", bold(&error)))?;
                }
            }
            "live" => live = true,
            "sim" => live = false,
            "path" => {
                for line in render_path(&runtime) {
                    interface.write_fmt(format_args!("{}\n", line))?;
                }
            }
            "help" => interface.write_fmt(format_args!("{}\n", HELP))?,
            "quit" => break,
            _ => interface.write_fmt(format_args!("UNKNOWN COMMAND .{}\n", verb))?,
        }
    }
    Ok(())
}

/// Drive a run to the end. `Ok(false)` when it ended in an error.
fn run<F>(
    runtime: &mut Runtime,
    program: Program,
    vehicle: Vehicle,
    options: &Options,
    mut emit: F,
) -> io::Result<bool>
where
    F: FnMut(&str) -> io::Result<()>,
{
    if let Err(error) = runtime.start(program, vehicle) {
        emit(&bold(&error))?;
        return Ok(false);
    }
    let mut shown = 0;
    loop {
        match runtime.execute(5000) {
            Event::Running | Event::Moved(_) => {}
            Event::Print(s) => emit(&s)?,
            Event::Show(picture) => {
                emit(&picture.to_string())?;
                if let Some(dir) = &options.show_dir {
                    shown += 1;
                    match write_picture(&picture, dir, shown) {
                        Ok(path) => emit(&format!("SAVED {}", path.display()))?,
                        Err(error) => emit(&bold(&error))?,
                    }
                }
            }
            Event::Stopped => return Ok(!runtime.has_failed()),
            Event::Error(error) => {
                emit(&bold(&error))?;
                return Ok(false);
            }
        }
    }
}

fn write_picture(picture: &Picture, dir: &Path, index: usize) -> Result<PathBuf, Error> {
    if let Err(error) = std::fs::create_dir_all(dir) {
        return Err(error!(SoftwareError; format!("UNABLE TO CREATE {}: {}", dir.display(), error)));
    }
    let path = dir.join(format!("picture-{:03}-{:08x}.png", index, picture.checksum()));
    picture.save(&path)?;
    Ok(path)
}

fn render_path(runtime: &Runtime) -> Vec<String> {
    let path = runtime.path();
    let mut lines: Vec<String> = path
        .iter()
        .enumerate()
        .map(|(index, position)| format!("{:>4} {}", index, position))
        .collect();
    if let Some(last) = path.last() {
        let distance = path
            .windows(2)
            .map(|w| {
                let (a, b) = (w[0], w[1]);
                ((b.x - a.x).powi(2) + (b.y - a.y).powi(2) + (b.z - a.z).powi(2)).sqrt()
            })
            .sum::<f64>();
        lines.push(format!("ENDED AT {} AFTER {:.1} CM", last, distance));
    }
    lines
}

fn telemetry(runtime: &Runtime) -> Vec<String> {
    runtime
        .telemetry()
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect()
}

struct WordCompleter;

impl<Term: Terminal> Completer<Term> for WordCompleter {
    fn complete(
        &self,
        word: &str,
        _prompter: &Prompter<Term>,
        _start: usize,
        _end: usize,
    ) -> Option<Vec<Completion>> {
        let word = word.to_uppercase();
        let completions: Vec<Completion> = Word::ALL
            .iter()
            .map(|w| w.as_str())
            .filter(|w| w.starts_with(&word))
            .map(|w| Completion::simple(w.to_string()))
            .collect();
        if completions.is_empty() {
            None
        } else {
            Some(completions)
        }
    }
}

fn load(path: &Path) -> Result<Listing, Error> {
    let mut listing = Listing::default();
    let reader = match File::open(path) {
        Ok(file) => BufReader::new(file),
        Err(error) => {
            return Err(error!(SoftwareError; format!(
                "UNABLE TO OPEN {}: {}",
                path.display(),
                error
            )))
        }
    };
    for line in reader.lines() {
        match line {
            Err(error) => return Err(error!(SoftwareError; error.to_string())),
            Ok(line) => listing.push(&line)?,
        }
    }
    Ok(listing)
}

fn save(listing: &Listing, path: &Path) -> Result<(), Error> {
    if listing.is_empty() {
        return Err(error!(SoftwareError; "NOTHING TO SAVE"));
    }
    let mut file = match File::create(path) {
        Ok(file) => file,
        Err(error) => return Err(error!(SoftwareError; error.to_string())),
    };
    for line in listing.lines() {
        if let Err(error) = writeln!(file, "{}", line) {
            return Err(error!(SoftwareError; error.to_string()));
        }
    }
    Ok(())
}
