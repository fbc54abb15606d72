// This file is part of RazzShell.
// Copyright (C) 2026 The RazzShell authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The REPL driver (C8, `spec.md` §4.8) and binary entry point: parses the
//! command line, wires up a [`UnixSystem`] plus the C4/C5/C7 state, and
//! loops print-prompt / read-line / lex-parse-execute until EOF or an
//! `exit`.

use nix::unistd::Pid;
use razzshell_builtin::register_core;
use razzshell_env::{History, JobTable, Mode, Registry, ShellConfig, ShellContext, UnixSystem};
use razzshell_semantics::{Executor, TerminalSupervisor};
use razzshell_syntax::{ParseErrorKind, Parser};
use std::io::{self, Write};
use std::os::unix::io::RawFd;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const STDIN_FD: RawFd = 0;

/// What one call to [`read_line_interruptible`] produced.
enum ReadOutcome {
    /// End of input (fd 0 closed).
    Eof,
    /// `SIGINT` arrived mid-read; the caller discards whatever was typed
    /// so far and reprompts (`spec.md` §4.7/§8 property 12).
    Interrupted,
    Line(String),
}

/// Reads one newline-terminated line from fd 0 a byte at a time, so a
/// `SIGINT` that interrupts the underlying `read(2)` (no `SA_RESTART`,
/// `spec.md` §9's self-pipe handler) is visible as `EINTR` here rather
/// than silently retried the way `std::io::Stdin::read_line` would retry
/// it. Byte-at-a-time is the price of observing that interruption.
fn read_line_interruptible(supervisor: &TerminalSupervisor) -> io::Result<ReadOutcome> {
    let mut buf = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        match nix::unistd::read(STDIN_FD, &mut byte) {
            Ok(0) => return Ok(ReadOutcome::Eof),
            Ok(_) => {
                buf.push(byte[0]);
                if byte[0] == b'\n' {
                    return Ok(ReadOutcome::Line(String::from_utf8_lossy(&buf).into_owned()));
                }
            }
            Err(nix::Error::EINTR) => {
                if supervisor.poll_sigint() {
                    return Ok(ReadOutcome::Interrupted);
                }
            }
            Err(e) => return Err(io::Error::from(e)),
        }
    }
}

fn print_help() {
    println!(
        "Usage: razzshell [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --posix        start in POSIX mode\n\
         \x20 -b, --bash     start in BASH mode\n\
         \x20 -h, --help     print this help and exit\n\
         \x20     --version  print the version and exit\n\
         \n\
         With no options, RazzShell starts in its native mode."
    );
}

/// Parses `argv[1..]` into a starting [`Mode`], per `spec.md` §6's CLI
/// surface. `--help`/`--version` short-circuit the whole process.
fn parse_args(args: &[String]) -> Mode {
    let mut mode = Mode::default();
    for arg in args {
        match arg.as_str() {
            "--posix" => mode = Mode::Posix,
            "-b" | "--bash" => mode = Mode::Bash,
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--version" => {
                println!("razzshell {VERSION}");
                std::process::exit(0);
            }
            other => {
                eprintln!("razzshell: unrecognized option `{other}`");
                std::process::exit(2);
            }
        }
    }
    mode
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = parse_args(&args);

    // SAFETY: this is the one `UnixSystem` for the process, constructed
    // once at startup (`razzshell_env::system::unix`'s documented
    // invariant).
    let mut system = unsafe { UnixSystem::new() };
    let supervisor = TerminalSupervisor::start(&mut system)
        .unwrap_or_else(|e| panic!("razzshell: failed to take the controlling terminal: {e}"));
    let mut terminal = supervisor;

    let shell_path = std::env::args().next().unwrap_or_else(|| "razzshell".to_string());
    system.setenv("SHELL", &shell_path);
    system.setenv("RAZZSHELL_VERSION", VERSION);
    system.setenv("RAZZSHELL_MODE", mode.as_str());

    let mut config = ShellConfig::new(mode);
    let mut registry = Registry::new();
    register_core(&mut registry);
    let mut jobs = JobTable::new();
    let mut history = History::new();
    let shell_pid = system.getpid();

    let mut last_status = 0;
    let interactive = system.isatty(0);

    let final_status = 'repl: loop {
        reap_finished_background_jobs(&mut system, &mut jobs);

        if interactive {
            print!("{}$ ", config.mode.as_str());
            let _ = io::stdout().flush();
        }

        let mut line = match read_line_interruptible(&terminal) {
            Ok(ReadOutcome::Eof) => {
                // EOF: spec.md §4.8 says print a newline and exit with the
                // last status.
                println!();
                break 'repl last_status;
            }
            Ok(ReadOutcome::Interrupted) => {
                // SIGINT at the prompt discards the partial line only.
                println!();
                continue 'repl;
            }
            Ok(ReadOutcome::Line(line)) => line,
            Err(e) => {
                eprintln!("razzshell: read error: {e}");
                break 'repl last_status;
            }
        };

        if line.trim().is_empty() {
            continue 'repl;
        }

        // A dangling here-document keeps pulling more lines until its
        // delimiter shows up or stdin runs out.
        let node = loop {
            let mut parser = Parser::new(&line);
            match parser.parse_line() {
                Ok(None) => continue 'repl,
                Ok(Some(node)) => break node,
                Err(e) if e.kind == ParseErrorKind::UnterminatedHereDoc => {
                    match read_line_interruptible(&terminal) {
                        Ok(ReadOutcome::Line(more)) => line.push_str(&more),
                        _ => {
                            eprintln!("razzshell: {}", e.render(&line));
                            continue 'repl;
                        }
                    }
                }
                Err(e) => {
                    eprintln!("razzshell: {}", e.render(&line));
                    continue 'repl;
                }
            }
        };

        history.push(line.trim_end_matches('\n'));

        if config.flags.verbose {
            print!("{line}");
            if !line.ends_with('\n') {
                println!();
            }
            let _ = io::stdout().flush();
        }

        let ctx = ShellContext::new(
            &mut system,
            &mut config,
            &mut jobs,
            &mut registry,
            &mut history,
            &mut terminal,
            shell_pid,
            last_status,
        );
        let mut executor = Executor::new(ctx);
        last_status = match executor.execute(&node) {
            Ok(status) => status,
            Err(e) => {
                eprintln!("razzshell: {e}");
                1
            }
        };
        let exit_requested = executor.ctx.exit_requested;
        let should_stop = executor.should_stop_after_errexit(last_status);

        if let Some(status) = exit_requested {
            break 'repl status;
        }
        if should_stop {
            break 'repl last_status;
        }
    };

    std::process::exit(final_status);
}

/// Opportunistic, non-blocking reap of any background child that finished
/// since the last prompt (`spec.md` §5: background jobs never block the
/// REPL).
fn reap_finished_background_jobs(system: &mut UnixSystem, jobs: &mut JobTable) {
    use nix::sys::wait::WaitStatus;

    loop {
        if jobs.is_empty() {
            return;
        }
        match system.waitpid(Pid::from_raw(-1), false, true) {
            Ok(WaitStatus::Exited(pid, _)) | Ok(WaitStatus::Signaled(pid, _, _)) => {
                if let Some(job) = jobs.find_by_pid(pid) {
                    let id = job.id;
                    jobs.remove(id);
                }
            }
            Ok(WaitStatus::Stopped(pid, _)) => {
                if let Some(job) = jobs.find_by_pid_mut(pid) {
                    job.state = razzshell_env::JobState::Stopped;
                }
            }
            Ok(WaitStatus::Continued(pid)) => {
                if let Some(job) = jobs.find_by_pid_mut(pid) {
                    job.state = razzshell_env::JobState::Running;
                }
            }
            Ok(WaitStatus::StillAlive) | Err(_) => return,
            Ok(_) => continue,
        }
    }
}
