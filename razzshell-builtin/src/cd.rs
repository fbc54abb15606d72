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

//! `cd [path]` (`spec.md` §6): changes the shell's own working directory.
//! With no argument, changes to `$HOME`; an unset `$HOME` is an error.

use razzshell_env::ShellContext;
use std::path::Path;

pub fn main(ctx: &mut ShellContext<'_>, args: &[String]) -> i32 {
    let target = match args.get(1) {
        Some(path) => path.clone(),
        None => match ctx.system.getenv("HOME") {
            Some(home) => home.to_string_lossy().into_owned(),
            None => {
                eprintln!("cd: HOME not set");
                return 1;
            }
        },
    };
    match ctx.system.chdir(Path::new(&target)) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("cd: {target}: {e}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ctx_harness;

    #[test]
    fn cd_with_argument_changes_to_that_path() {
        let mut h = ctx_harness();
        let mut ctx = h.context();
        let status = main(&mut ctx, &["cd".into(), "/tmp".into()]);
        assert_eq!(status, 0);
        assert_eq!(ctx.system.getcwd().unwrap(), Path::new("/tmp"));
    }

    #[test]
    fn cd_with_no_argument_uses_home() {
        let mut h = ctx_harness();
        h.system.setenv("HOME", "/home/razz");
        let mut ctx = h.context();
        let status = main(&mut ctx, &["cd".into()]);
        assert_eq!(status, 0);
        assert_eq!(ctx.system.getcwd().unwrap(), Path::new("/home/razz"));
    }

    #[test]
    fn cd_with_no_argument_and_no_home_is_an_error() {
        let mut h = ctx_harness();
        let mut ctx = h.context();
        let status = main(&mut ctx, &["cd".into()]);
        assert_eq!(status, 1);
    }
}
