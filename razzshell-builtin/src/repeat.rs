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

//! `repeat <n> <cmd...>` (`spec.md` §6, §8): re-parses and executes the
//! given command text `n` times, fresh each time — matching
//! `original_source/razzshell.c`'s `repeat` (`SPEC_FULL.md` §2), which
//! re-runs the whole lex/parse/execute pipeline per iteration rather than
//! caching the parsed tree.

use razzshell_env::ShellContext;
use razzshell_semantics::Executor;
use razzshell_syntax::Parser;

pub fn main(ctx: &mut ShellContext<'_>, args: &[String]) -> i32 {
    let (Some(count_arg), true) = (args.get(1), args.len() > 2) else {
        eprintln!("repeat: usage: repeat <n> <command...>");
        return 1;
    };
    let Ok(count) = count_arg.parse::<u32>() else {
        eprintln!("repeat: {count_arg}: numeric argument required");
        return 1;
    };
    let command_text = args[2..].join(" ");

    let mut status = 0;
    for _ in 0..count {
        let sub_ctx = ShellContext::new(
            &mut *ctx.system,
            &mut *ctx.config,
            &mut *ctx.jobs,
            &mut *ctx.registry,
            &mut *ctx.history,
            &mut *ctx.terminal,
            ctx.shell_pid,
            status,
        );
        let mut executor = Executor::new(sub_ctx);
        let mut parser = Parser::new(&command_text);
        status = match parser.parse_line() {
            Ok(Some(node)) => executor.execute(&node).unwrap_or(1),
            Ok(None) => 0,
            Err(e) => {
                eprintln!("repeat: {}", e.message);
                1
            }
        };
    }
    status
}
