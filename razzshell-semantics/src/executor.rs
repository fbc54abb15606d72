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

//! The executor (C6): walks one parsed [`Node`] to an exit status.
//!
//! Dispatch order on a simple command is fixed by `spec.md` §4.5: alias
//! expansion (one non-recursive token swap), then built-in, then plugin,
//! then `$PATH`. A command's own `&` suffix forks unconditionally —
//! including built-ins and plugins, so a backgrounded built-in runs
//! concurrently with the shell rather than blocking it — while a
//! foreground external command and a pipeline additionally hand the
//! controlling terminal to the new process group for the duration of the
//! wait and reclaim it on every exit path (`spec.md` §4.6/§4.7).

use crate::error::{ExecError, Result};
use crate::expand::{expand_word, Expander};
use crate::redirect::{self, RedirectGuard};
use crate::test_expr;
use nix::sys::signal::Signal;
use nix::sys::wait::WaitStatus;
use nix::unistd::Pid;
use razzshell_env::{
    BuiltinHandler, ForkOutcome, JobState, Resolution, ShellContext, SignalAction, System,
};
use razzshell_syntax::syntax::{Command, Node, Pipeline, Redirection};
use std::ffi::CString;
use std::os::unix::io::RawFd;

/// Signals a forked child resets to their default disposition before it
/// runs anything else, regardless of what the shell itself installed
/// (`spec.md` §4.6's child-side job-control dance).
const RESET_SIGNALS: [Signal; 4] = [
    Signal::SIGINT,
    Signal::SIGTSTP,
    Signal::SIGTTOU,
    Signal::SIGQUIT,
];

/// Drives one parsed [`Node`] to completion against a borrowed
/// [`ShellContext`]. Built fresh by the REPL for each line; holds no state
/// of its own beyond the context it wraps.
pub struct Executor<'a> {
    pub ctx: ShellContext<'a>,
}

impl<'a> Executor<'a> {
    pub fn new(ctx: ShellContext<'a>) -> Self {
        Executor { ctx }
    }

    /// Whether `-e`/`errexit` should stop the REPL after `status`. Exposed
    /// so `razzshell-cli` can consult it after each top-level node without
    /// duplicating the flag check.
    pub fn should_stop_after_errexit(&self, status: i32) -> bool {
        self.ctx.config.flags.errexit && status != 0
    }

    /// Executes `node`, returning its exit status and recording it as
    /// `ctx.last_status` for `$?`-style built-ins to consult afterward.
    pub fn execute(&mut self, node: &Node) -> Result<i32> {
        let status = match node {
            Node::Command(cmd) => self.exec_command(cmd)?,
            Node::Pipeline(p) => self.exec_pipeline(p)?,
            Node::List(items) => {
                let mut status = 0;
                for item in items {
                    status = self.execute(item)?;
                }
                status
            }
            Node::AndList(lhs, rhs) => {
                let status = self.execute(lhs)?;
                if status == 0 {
                    self.execute(rhs)?
                } else {
                    status
                }
            }
            Node::OrList(lhs, rhs) => {
                let status = self.execute(lhs)?;
                if status != 0 {
                    self.execute(rhs)?
                } else {
                    status
                }
            }
            Node::Subshell(inner) => self.exec_subshell(inner)?,
            Node::Assignment(a) => {
                let value = self.expand(&a.value)?;
                self.ctx.system.setenv(&a.name, &value);
                0
            }
            Node::Test(t) => {
                let mut tokens = Vec::with_capacity(t.tokens.len());
                for tok in &t.tokens {
                    tokens.push(self.expand(tok)?);
                }
                i32::from(!test_expr::evaluate(&tokens)?)
            }
            // A heredoc's body is always captured into its owning
            // redirection's `content` at parse time; as a standalone
            // statement there is nothing left to do.
            Node::HereDoc(_) => 0,
            Node::Reserved(keyword) => {
                return Err(ExecError::Unsupported(format!("{keyword:?}")));
            }
        };
        self.ctx.last_status = status;
        Ok(status)
    }

    /// Expands one raw word through the full tilde/parameter/command-
    /// substitution/escape/quote-removal pipeline (`spec.md` §4.6).
    fn expand(&mut self, raw: &str) -> Result<String> {
        let nounset = self.ctx.config.flags.nounset;
        let mut expander = CommandExpander { exec: self };
        expand_word(raw, &mut expander, nounset)
    }

    fn exec_command(&mut self, cmd: &Command) -> Result<i32> {
        let mut argv = Vec::with_capacity(cmd.argv.len());
        for raw in &cmd.argv {
            argv.push(self.expand(raw)?);
        }
        if argv.is_empty() {
            return Ok(0);
        }

        let assignments = self.expand_assignments(cmd)?;

        let mode = self.ctx.config.mode;
        if let Resolution::Alias(expansion) = self.ctx.registry.resolve(&argv[0], mode) {
            argv[0] = expansion.to_string();
        }

        if self.ctx.config.flags.xtrace {
            eprintln!("+ {}", argv.join(" "));
        }

        let builtin_handler = match self.ctx.registry.resolve(&argv[0], mode) {
            Resolution::Builtin(entry) => Some(entry.handler),
            _ => None,
        };
        let is_plugin = matches!(self.ctx.registry.resolve(&argv[0], mode), Resolution::Plugin(_));

        if cmd.background {
            return self.spawn_background(cmd, &argv, &assignments, builtin_handler, is_plugin);
        }
        if let Some(handler) = builtin_handler {
            return self.run_builtin(cmd, &argv, &assignments, handler);
        }
        if is_plugin {
            return self.run_plugin(cmd, &argv, &assignments);
        }
        self.run_external_foreground(cmd, &argv, &assignments)
    }

    fn expand_assignments(&mut self, cmd: &Command) -> Result<Vec<(String, String)>> {
        let mut out = Vec::with_capacity(cmd.assignments.len());
        for a in &cmd.assignments {
            let value = self.expand(&a.value)?;
            out.push((a.name.clone(), value));
        }
        Ok(out)
    }

    fn run_builtin(
        &mut self,
        cmd: &Command,
        argv: &[String],
        assignments: &[(String, String)],
        handler: BuiltinHandler,
    ) -> Result<i32> {
        let env_guard = EnvGuard::apply(self.ctx.system, assignments);
        let mut redir_guard = RedirectGuard::default();
        let applied = self.apply_redirections(&cmd.redirections, Some(&mut redir_guard));
        let result = applied.map(|()| handler(&mut self.ctx, argv));
        redir_guard.restore(self.ctx.system);
        env_guard.restore(self.ctx.system);
        result
    }

    fn run_plugin(
        &mut self,
        cmd: &Command,
        argv: &[String],
        assignments: &[(String, String)],
    ) -> Result<i32> {
        let env_guard = EnvGuard::apply(self.ctx.system, assignments);
        let mut redir_guard = RedirectGuard::default();
        let applied = self.apply_redirections(&cmd.redirections, Some(&mut redir_guard));
        let result = applied.map(|()| {
            let mode = self.ctx.config.mode;
            match self.ctx.registry.resolve(&argv[0], mode) {
                Resolution::Plugin(entry) => entry.invoke(argv),
                // The caller already confirmed this resolves to a plugin;
                // the registry cannot change underneath a single command.
                _ => 127,
            }
        });
        redir_guard.restore(self.ctx.system);
        env_guard.restore(self.ctx.system);
        result
    }

    fn run_external_foreground(
        &mut self,
        cmd: &Command,
        argv: &[String],
        assignments: &[(String, String)],
    ) -> Result<i32> {
        match unsafe { self.ctx.system.fork()? } {
            ForkOutcome::Parent(pid) => {
                let _ = self.ctx.system.setpgid(pid, pid);
                self.ctx.terminal.hand_to(self.ctx.system, pid);
                let status = self.wait_and_classify(pid, &argv.join(" "), pid)?;
                self.ctx.terminal.reclaim(self.ctx.system);
                Ok(status)
            }
            ForkOutcome::Child => {
                self.child_setup(Pid::from_raw(0), true);
                let _ = self.apply_redirections(&cmd.redirections, None);
                for (name, value) in assignments {
                    self.ctx.system.setenv(name, value);
                }
                let status = self.exec_external(argv);
                std::process::exit(status);
            }
        }
    }

    fn spawn_background(
        &mut self,
        cmd: &Command,
        argv: &[String],
        assignments: &[(String, String)],
        builtin_handler: Option<BuiltinHandler>,
        is_plugin: bool,
    ) -> Result<i32> {
        let command_text = argv.join(" ");
        match unsafe { self.ctx.system.fork()? } {
            ForkOutcome::Parent(pid) => {
                let _ = self.ctx.system.setpgid(pid, pid);
                self.ctx.jobs.insert(pid, command_text, true)?;
                Ok(0)
            }
            ForkOutcome::Child => {
                self.child_setup(Pid::from_raw(0), false);
                let _ = self.apply_redirections(&cmd.redirections, None);
                for (name, value) in assignments {
                    self.ctx.system.setenv(name, value);
                }
                let status = if let Some(handler) = builtin_handler {
                    handler(&mut self.ctx, argv)
                } else if is_plugin {
                    let mode = self.ctx.config.mode;
                    match self.ctx.registry.resolve(&argv[0], mode) {
                        Resolution::Plugin(entry) => entry.invoke(argv),
                        _ => 127,
                    }
                } else {
                    self.exec_external(argv)
                };
                std::process::exit(status);
            }
        }
    }

    fn exec_subshell(&mut self, inner: &Node) -> Result<i32> {
        match unsafe { self.ctx.system.fork()? } {
            ForkOutcome::Parent(pid) => self.wait_and_classify(pid, "(subshell)", pid),
            ForkOutcome::Child => {
                let status = self.execute(inner).unwrap_or(1);
                std::process::exit(status);
            }
        }
    }

    fn exec_pipeline(&mut self, p: &Pipeline) -> Result<i32> {
        let n = p.stages.len();
        let mut pipes: Vec<(RawFd, RawFd)> = Vec::with_capacity(n - 1);
        for _ in 0..n - 1 {
            pipes.push(self.ctx.system.pipe()?);
        }

        let mut pids: Vec<Pid> = Vec::with_capacity(n);
        let mut leader: Option<Pid> = None;

        for (i, stage) in p.stages.iter().enumerate() {
            match unsafe { self.ctx.system.fork()? } {
                ForkOutcome::Parent(pid) => {
                    let target = leader.unwrap_or(pid);
                    let _ = self.ctx.system.setpgid(pid, target);
                    leader.get_or_insert(pid);
                    pids.push(pid);
                }
                ForkOutcome::Child => {
                    let target = leader.unwrap_or_else(|| Pid::from_raw(0));
                    self.child_setup(target, false);
                    if i > 0 {
                        let _ = self.ctx.system.dup2(pipes[i - 1].0, 0);
                    }
                    if i < n - 1 {
                        let _ = self.ctx.system.dup2(pipes[i].1, 1);
                    }
                    for &(r, w) in &pipes {
                        let _ = self.ctx.system.close(r);
                        let _ = self.ctx.system.close(w);
                    }
                    let status = self.execute(stage).unwrap_or(1);
                    std::process::exit(status);
                }
            }
        }

        for &(r, w) in &pipes {
            let _ = self.ctx.system.close(r);
            let _ = self.ctx.system.close(w);
        }

        let leader_pgrp = leader.expect("a pipeline always has at least two stages");
        let backgrounded = matches!(p.stages.last(), Some(Node::Command(c)) if c.background);

        if backgrounded {
            self.ctx.jobs.insert(leader_pgrp, "pipeline", true)?;
            return Ok(0);
        }

        self.ctx.terminal.hand_to(self.ctx.system, leader_pgrp);
        let mut statuses = Vec::with_capacity(n);
        for pid in &pids {
            statuses.push(self.wait_and_classify(*pid, "pipeline", leader_pgrp)?);
        }
        self.ctx.terminal.reclaim(self.ctx.system);

        let status = pipeline_status(&statuses, self.ctx.config.flags.pipefail);
        Ok(if p.negated { i32::from(status == 0) } else { status })
    }

    /// The child-side half of the job-control dance shared by every fork
    /// path: join (or found) the target process group, then drop back to
    /// default signal dispositions so the child behaves like any ordinary
    /// Unix process rather than inheriting the shell's own handlers.
    fn child_setup(&mut self, target_pgrp: Pid, claim_terminal: bool) {
        let own = Pid::from_raw(0);
        let _ = self.ctx.system.setpgid(own, target_pgrp);
        if claim_terminal && self.ctx.system.isatty(0) {
            let _ = self.ctx.system.tcsetpgrp(0, self.ctx.system.getpid());
        }
        for sig in RESET_SIGNALS {
            let _ = self.ctx.system.set_signal_action(sig, SignalAction::Default);
        }
    }

    fn apply_redirections(
        &mut self,
        redirs: &[Redirection],
        mut guard: Option<&mut RedirectGuard>,
    ) -> Result<()> {
        for r in redirs {
            let target = self.expand(&r.target)?;
            redirect::apply_one(self.ctx.system, r, &target, guard.as_deref_mut())?;
        }
        Ok(())
    }

    /// Waits for `pid`, classifying the outcome. `pgrp` is the job-table
    /// key to use if the process stops rather than exits (the pipeline's
    /// leader for a pipeline stage, `pid` itself for a standalone command).
    fn wait_and_classify(&mut self, pid: Pid, command_text: &str, pgrp: Pid) -> Result<i32> {
        loop {
            match self.ctx.system.waitpid(pid, true, true)? {
                WaitStatus::Exited(p, code) if p == pid => return Ok(code),
                WaitStatus::Signaled(p, sig, _) if p == pid => return Ok(128 + sig as i32),
                WaitStatus::Stopped(p, sig) if p == pid => {
                    if self.ctx.jobs.find_by_pid(pgrp).is_none() {
                        let _ = self.ctx.jobs.insert(pgrp, command_text, false);
                    }
                    if let Some(job) = self.ctx.jobs.find_by_pid_mut(pgrp) {
                        job.state = JobState::Stopped;
                    }
                    eprintln!("[stopped] {command_text}");
                    return Ok(128 + sig as i32);
                }
                _ => continue,
            }
        }
    }

    /// Looks `argv[0]` up on `$PATH` (or takes it literally if it already
    /// contains a `/`) and `execve`s it. Only returns on failure — the
    /// caller's fork branch exits with whatever status comes back.
    fn exec_external(&mut self, argv: &[String]) -> i32 {
        let name = &argv[0];
        let path = if name.contains('/') {
            Some(std::path::PathBuf::from(name))
        } else {
            self.ctx.system.find_in_path(name)
        };
        let Some(path) = path else {
            eprintln!("{name}: command not found");
            return 127;
        };

        let path_c = razzshell_env::to_cstring(&path.to_string_lossy());
        let argv_c: Vec<CString> = argv.iter().map(|a| razzshell_env::to_cstring(a)).collect();
        let env_c: Vec<CString> = self
            .ctx
            .system
            .environ()
            .iter()
            .map(|(k, v)| razzshell_env::to_cstring(&format!("{k}={v}")))
            .collect();

        match self.ctx.system.execve(&path_c, &argv_c, &env_c) {
            Ok(()) => unreachable!("a successful execve never returns"),
            Err(e) if e.0 == nix::Error::EACCES => {
                eprintln!("{name}: permission denied");
                126
            }
            Err(_) => {
                eprintln!("{name}: command not found");
                127
            }
        }
    }
}

fn pipeline_status(statuses: &[i32], pipefail: bool) -> i32 {
    if pipefail {
        statuses.iter().rev().find(|&&s| s != 0).copied().unwrap_or(0)
    } else {
        statuses.last().copied().unwrap_or(0)
    }
}

/// Bridges [`Expander`] to the executor: variable lookup reads the live
/// environment through `System`, and command substitution forks a child
/// that executes the substituted text with its stdout captured over a
/// pipe, recursively re-entering [`Executor::execute`].
struct CommandExpander<'a, 'b> {
    exec: &'b mut Executor<'a>,
}

impl<'a, 'b> Expander for CommandExpander<'a, 'b> {
    fn get(&mut self, name: &str) -> Option<String> {
        self.exec
            .ctx
            .system
            .getenv(name)
            .map(|v| v.to_string_lossy().into_owned())
    }

    fn run(&mut self, command_text: &str) -> Result<String> {
        let mut parser = razzshell_syntax::Parser::new(command_text);
        let node = match parser.parse_line() {
            Ok(Some(node)) => node,
            // An empty or unparseable substitution behaves like a
            // subshell that produced no output, rather than aborting the
            // word expansion it is embedded in.
            Ok(None) | Err(_) => return Ok(String::new()),
        };
        self.exec.capture_node_output(&node)
    }
}

impl<'a> Executor<'a> {
    fn capture_node_output(&mut self, node: &Node) -> Result<String> {
        let (read_fd, write_fd) = self.ctx.system.pipe()?;
        match unsafe { self.ctx.system.fork()? } {
            ForkOutcome::Parent(pid) => {
                let _ = self.ctx.system.close(write_fd);
                let mut buf = Vec::new();
                let mut chunk = [0u8; 4096];
                loop {
                    match nix::unistd::read(read_fd, &mut chunk) {
                        Ok(0) => break,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        Err(nix::Error::EINTR) => continue,
                        Err(_) => break,
                    }
                }
                let _ = self.ctx.system.close(read_fd);
                let _ = self.ctx.system.waitpid(pid, true, false);
                Ok(String::from_utf8_lossy(&buf).into_owned())
            }
            ForkOutcome::Child => {
                let _ = self.ctx.system.close(read_fd);
                let _ = self.ctx.system.dup2(write_fd, 1);
                let _ = self.ctx.system.close(write_fd);
                let status = self.execute(node).unwrap_or(1);
                std::process::exit(status);
            }
        }
    }
}

/// Save/restore stack for per-command assignments (`FOO=bar cmd`), mirroring
/// [`RedirectGuard`]'s discipline but over environment variables: a builtin
/// or plugin sees the assignment for the duration of its call only.
struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn apply(system: &mut dyn System, assignments: &[(String, String)]) -> Self {
        let mut saved = Vec::with_capacity(assignments.len());
        for (name, value) in assignments {
            let previous = system.getenv(name).map(|v| v.to_string_lossy().into_owned());
            saved.push((name.clone(), previous));
            system.setenv(name, value);
        }
        EnvGuard { saved }
    }

    fn restore(self, system: &mut dyn System) {
        for (name, previous) in self.saved.into_iter().rev() {
            match previous {
                Some(value) => system.setenv(&name, &value),
                None => system.unsetenv(&name),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use razzshell_env::{History, JobTable, NullTerminalControl, Registry, ShellConfig};

    fn fresh_ctx<'a>(
        system: &'a mut dyn System,
        config: &'a mut ShellConfig,
        jobs: &'a mut JobTable,
        registry: &'a mut Registry,
        history: &'a mut History,
        terminal: &'a mut NullTerminalControl,
    ) -> ShellContext<'a> {
        ShellContext::new(system, config, jobs, registry, history, terminal, Pid::from_raw(1), 0)
    }

    fn cmd(words: &[&str]) -> Command {
        Command::new(words.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn assignment_node_sets_the_environment() {
        let mut system = razzshell_env::FakeSystem::new();
        let mut config = ShellConfig::default();
        let mut jobs = JobTable::new();
        let mut registry = Registry::new();
        let mut history = History::new();
        let mut terminal = NullTerminalControl;
        let ctx = fresh_ctx(
            &mut system,
            &mut config,
            &mut jobs,
            &mut registry,
            &mut history,
            &mut terminal,
        );
        let mut exec = Executor::new(ctx);
        let node = Node::Assignment(
            razzshell_syntax::syntax::Assignment::new("FOO", "bar").unwrap(),
        );
        assert_eq!(exec.execute(&node).unwrap(), 0);
        assert_eq!(
            exec.ctx.system.getenv("FOO").unwrap().to_string_lossy(),
            "bar"
        );
    }

    #[test]
    fn and_list_short_circuits_on_failure() {
        let mut system = razzshell_env::FakeSystem::new();
        let mut config = ShellConfig::default();
        let mut jobs = JobTable::new();
        let mut registry = Registry::new();
        registry.register_builtin(razzshell_env::BuiltinEntry {
            name: "false",
            handler: |_ctx, _args| 1,
            description: "always fails",
        });
        registry.register_builtin(razzshell_env::BuiltinEntry {
            name: "true",
            handler: |_ctx, _args| 0,
            description: "always succeeds",
        });
        let mut history = History::new();
        let mut terminal = NullTerminalControl;
        let ctx = fresh_ctx(
            &mut system,
            &mut config,
            &mut jobs,
            &mut registry,
            &mut history,
            &mut terminal,
        );
        let mut exec = Executor::new(ctx);
        let node = Node::AndList(
            Box::new(Node::Command(cmd(&["false"]))),
            Box::new(Node::Command(cmd(&["true"]))),
        );
        assert_eq!(exec.execute(&node).unwrap(), 1);
    }

    #[test]
    fn or_list_runs_rhs_only_on_failure() {
        let mut system = razzshell_env::FakeSystem::new();
        let mut config = ShellConfig::default();
        let mut jobs = JobTable::new();
        let mut registry = Registry::new();
        registry.register_builtin(razzshell_env::BuiltinEntry {
            name: "false",
            handler: |_ctx, _args| 1,
            description: "always fails",
        });
        registry.register_builtin(razzshell_env::BuiltinEntry {
            name: "true",
            handler: |_ctx, _args| 0,
            description: "always succeeds",
        });
        let mut history = History::new();
        let mut terminal = NullTerminalControl;
        let ctx = fresh_ctx(
            &mut system,
            &mut config,
            &mut jobs,
            &mut registry,
            &mut history,
            &mut terminal,
        );
        let mut exec = Executor::new(ctx);
        let node = Node::OrList(
            Box::new(Node::Command(cmd(&["false"]))),
            Box::new(Node::Command(cmd(&["true"]))),
        );
        assert_eq!(exec.execute(&node).unwrap(), 0);
    }

    #[test]
    fn builtin_runs_in_process_without_forking() {
        let mut system = razzshell_env::FakeSystem::new();
        let mut config = ShellConfig::default();
        let mut jobs = JobTable::new();
        let mut registry = Registry::new();
        registry.register_builtin(razzshell_env::BuiltinEntry {
            name: "true",
            handler: |_ctx, _args| 0,
            description: "always succeeds",
        });
        let mut history = History::new();
        let mut terminal = NullTerminalControl;
        let ctx = fresh_ctx(
            &mut system,
            &mut config,
            &mut jobs,
            &mut registry,
            &mut history,
            &mut terminal,
        );
        let mut exec = Executor::new(ctx);
        let node = Node::Command(cmd(&["true"]));
        assert_eq!(exec.execute(&node).unwrap(), 0);
        drop(exec);
        assert!(!system
            .calls
            .iter()
            .any(|c| matches!(c, razzshell_env::RecordedCall::Fork)));
    }

    #[test]
    fn test_node_evaluates_string_equality() {
        let mut system = razzshell_env::FakeSystem::new();
        let mut config = ShellConfig::default();
        let mut jobs = JobTable::new();
        let mut registry = Registry::new();
        let mut history = History::new();
        let mut terminal = NullTerminalControl;
        let ctx = fresh_ctx(
            &mut system,
            &mut config,
            &mut jobs,
            &mut registry,
            &mut history,
            &mut terminal,
        );
        let mut exec = Executor::new(ctx);
        let node = Node::Test(razzshell_syntax::syntax::Test {
            tokens: vec!["foo".into(), "=".into(), "foo".into()],
        });
        assert_eq!(exec.execute(&node).unwrap(), 0);
    }

    #[test]
    fn should_stop_after_errexit_respects_the_flag() {
        let mut system = razzshell_env::FakeSystem::new();
        let mut config = ShellConfig::default();
        config.flags.errexit = true;
        let mut jobs = JobTable::new();
        let mut registry = Registry::new();
        let mut history = History::new();
        let mut terminal = NullTerminalControl;
        let ctx = fresh_ctx(
            &mut system,
            &mut config,
            &mut jobs,
            &mut registry,
            &mut history,
            &mut terminal,
        );
        let exec = Executor::new(ctx);
        assert!(exec.should_stop_after_errexit(1));
        assert!(!exec.should_stop_after_errexit(0));
    }
}
