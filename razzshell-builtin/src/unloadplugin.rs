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

//! `unloadplugin <name>` (`spec.md` §6): releases a loaded module. `name`
//! is the path it was loaded under, matching `PluginEntry::path`.

use razzshell_env::ShellContext;

pub fn main(ctx: &mut ShellContext<'_>, args: &[String]) -> i32 {
    let Some(name) = args.get(1) else {
        eprintln!("unloadplugin: usage: unloadplugin <name>");
        return 1;
    };
    match ctx.registry.unload_plugin(name) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("unloadplugin: {e}");
            1
        }
    }
}
