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

//! `loadplugin <path>` (`spec.md` §3, §4.5, §6): opens a dynamic module and
//! records its exported `plugin_command` symbol under the load path, per
//! `spec.md` §3's "name (path used at load)". A load failure leaves the
//! registry unchanged (`spec.md` §7).

use razzshell_env::ShellContext;
use std::path::Path;

pub fn main(ctx: &mut ShellContext<'_>, args: &[String]) -> i32 {
    let Some(path) = args.get(1) else {
        eprintln!("loadplugin: usage: loadplugin <path>");
        return 1;
    };
    // SAFETY: the caller (an interactive user or a script they trust)
    // vouches that `path` implements the documented `plugin_command` ABI;
    // the shell has no way to verify that statically.
    match unsafe { ctx.registry.load_plugin(Path::new(path)) } {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("loadplugin: {e}");
            1
        }
    }
}
