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

//! Name → handler resolution (`spec.md` §4.5, C5).
//!
//! [`Registry::resolve`] is the single function the executor calls to turn
//! a command's first word into something runnable, consulting, in order:
//! POSIX name translation (if the mode calls for it), built-ins, aliases,
//! plugins, and finally "fall through to `$PATH`".

use crate::config::Mode;
use crate::posix_compat;
use std::collections::HashMap;
use std::os::raw::{c_char, c_int};
use std::path::{Path, PathBuf};

/// `original_source/razzshell.c`'s bounded alias-table capacity.
pub const MAX_ALIASES: usize = 100;
/// Matching bound for the plugin table; the original does not distinguish
/// the two capacities, but we track them separately so one table filling up
/// cannot starve the other.
pub const MAX_PLUGINS: usize = 100;

/// Signature every built-in handler implements. `ShellContext` is defined in
/// this crate so both `razzshell-semantics` (the executor, which constructs
/// one per invocation) and `razzshell-builtin` (which writes handlers
/// against it) can share it without a dependency cycle.
pub type BuiltinHandler = fn(&mut crate::context::ShellContext<'_>, &[String]) -> i32;

/// A statically registered built-in command.
#[derive(Clone, Copy)]
pub struct BuiltinEntry {
    pub name: &'static str,
    pub handler: BuiltinHandler,
    pub description: &'static str,
}

impl std::fmt::Debug for BuiltinEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// The raw ABI a plugin's exported `plugin_command` symbol must satisfy:
/// a C-style `main`, operating on the shell's already-redirected stdio.
pub type PluginEntryPoint = unsafe extern "C" fn(argc: c_int, argv: *const *const c_char) -> c_int;

/// A loaded plugin module.
pub struct PluginEntry {
    /// The filesystem path the plugin was loaded from; this doubles as its
    /// registered name, per `spec.md` §3 ("name (path used at load)").
    pub path: PathBuf,
    entry: PluginEntryPoint,
    // Kept alive for as long as `entry` may be called; dropping this
    // unloads the module, which is why `unload` removes both together.
    _library: libloading::Library,
}

impl PluginEntry {
    /// Invokes the plugin's entry point with `argv` (including the plugin
    /// path itself as `argv[0]`, per `spec.md` §8's worked example).
    pub fn invoke(&self, argv: &[String]) -> i32 {
        let c_args: Vec<std::ffi::CString> = argv
            .iter()
            .map(|a| std::ffi::CString::new(a.as_bytes()).unwrap_or_default())
            .collect();
        let c_ptrs: Vec<*const c_char> = c_args.iter().map(|a| a.as_ptr()).collect();
        // SAFETY: `entry` was resolved from a live `Library` we still own,
        // and `c_ptrs` stays alive for the duration of this call.
        unsafe { (self.entry)(c_ptrs.len() as c_int, c_ptrs.as_ptr()) }
    }
}

/// Errors raised while mutating the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("alias table is full (max {MAX_ALIASES} aliases)")]
    AliasTableFull,
    #[error("plugin table is full (max {MAX_PLUGINS} plugins)")]
    PluginTableFull,
    #[error("no such alias: {0}")]
    NoSuchAlias(String),
    #[error("no such plugin: {0}")]
    NoSuchPlugin(String),
    #[error("failed to load plugin {path}: {source}")]
    PluginLoad {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
    #[error("plugin {path} does not export `plugin_command`: {source}")]
    MissingEntryPoint {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
}

/// What a name resolves to, in the exact priority order `spec.md` §4.5
/// requires: built-in, alias, plugin, external, or nothing.
#[derive(Clone, Copy, Debug)]
pub enum Resolution<'a> {
    Builtin(&'a BuiltinEntry),
    Alias(&'a str),
    Plugin(&'a PluginEntry),
    External,
    None,
}

/// Name → handler registry: built-ins (static), aliases and plugins
/// (mutable, both capacity-bounded).
#[derive(Default)]
pub struct Registry {
    builtins: HashMap<&'static str, BuiltinEntry>,
    aliases: HashMap<String, String>,
    plugins: HashMap<String, PluginEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn register_builtin(&mut self, entry: BuiltinEntry) {
        self.builtins.insert(entry.name, entry);
    }

    pub fn builtins(&self) -> impl Iterator<Item = &BuiltinEntry> {
        self.builtins.values()
    }

    pub fn set_alias(&mut self, name: impl Into<String>, expansion: impl Into<String>) -> Result<(), RegistryError> {
        let name = name.into();
        if !self.aliases.contains_key(&name) && self.aliases.len() >= MAX_ALIASES {
            return Err(RegistryError::AliasTableFull);
        }
        self.aliases.insert(name, expansion.into());
        Ok(())
    }

    pub fn remove_alias(&mut self, name: &str) -> Result<(), RegistryError> {
        self.aliases
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| RegistryError::NoSuchAlias(name.to_string()))
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Loads a plugin from `path` and registers it under the path string.
    ///
    /// # Safety
    /// Loading and calling into an arbitrary shared object is inherently
    /// unsafe; the caller vouches that `path` names a module implementing
    /// the documented `plugin_command` ABI.
    pub unsafe fn load_plugin(&mut self, path: &Path) -> Result<(), RegistryError> {
        let key = path.to_string_lossy().into_owned();
        if !self.plugins.contains_key(&key) && self.plugins.len() >= MAX_PLUGINS {
            return Err(RegistryError::PluginTableFull);
        }
        let library = libloading::Library::new(path).map_err(|source| RegistryError::PluginLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let symbol = {
            let sym: libloading::Symbol<PluginEntryPoint> = library
                .get(b"plugin_command\0")
                .map_err(|source| RegistryError::MissingEntryPoint {
                    path: path.to_path_buf(),
                    source,
                })?;
            *sym
        };
        self.plugins.insert(
            key,
            PluginEntry {
                path: path.to_path_buf(),
                entry: symbol,
                _library: library,
            },
        );
        Ok(())
    }

    pub fn unload_plugin(&mut self, name: &str) -> Result<(), RegistryError> {
        self.plugins
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| RegistryError::NoSuchPlugin(name.to_string()))
    }

    pub fn plugins(&self) -> impl Iterator<Item = &PluginEntry> {
        self.plugins.values()
    }

    /// Resolves `name` in the priority order `spec.md` §4.5 mandates:
    /// POSIX translation first (only outside `Mode::Native`), then
    /// built-in, alias, plugin, and finally "defer to `$PATH`".
    pub fn resolve<'a>(&'a self, name: &str, mode: Mode) -> Resolution<'a> {
        let translated;
        let name = if mode.translates_posix_names() {
            match posix_compat::translate(name) {
                Some(native) => {
                    translated = native;
                    translated
                }
                None => name,
            }
        } else {
            name
        };

        if let Some(entry) = self.builtins.get(name) {
            return Resolution::Builtin(entry);
        }
        if let Some(expansion) = self.aliases.get(name) {
            return Resolution::Alias(expansion);
        }
        if let Some(plugin) = self.plugins.get(name) {
            return Resolution::Plugin(plugin);
        }
        Resolution::External
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_handler(_ctx: &mut crate::context::ShellContext<'_>, _args: &[String]) -> i32 {
        0
    }

    #[test]
    fn builtin_beats_alias_and_plugin() {
        let mut registry = Registry::new();
        registry.register_builtin(BuiltinEntry {
            name: "cd",
            handler: dummy_handler,
            description: "change directory",
        });
        registry.set_alias("cd", "echo not-the-builtin").unwrap();
        assert!(matches!(
            registry.resolve("cd", Mode::Native),
            Resolution::Builtin(_)
        ));
    }

    #[test]
    fn alias_beats_plugin_and_external() {
        let mut registry = Registry::new();
        registry.set_alias("ll", "list -l").unwrap();
        match registry.resolve("ll", Mode::Native) {
            Resolution::Alias(expansion) => assert_eq!(expansion, "list -l"),
            other => panic!("expected alias, got {other:?}"),
        }
    }

    #[test]
    fn unknown_name_resolves_to_external() {
        let registry = Registry::new();
        assert!(matches!(
            registry.resolve("/usr/bin/doesnotexist", Mode::Native),
            Resolution::External
        ));
    }

    #[test]
    fn posix_translation_applies_before_builtin_lookup() {
        let mut registry = Registry::new();
        registry.register_builtin(BuiltinEntry {
            name: "list",
            handler: dummy_handler,
            description: "list directory",
        });
        assert!(matches!(
            registry.resolve("ls", Mode::Posix),
            Resolution::Builtin(_)
        ));
        // In native mode the table is bypassed, so `ls` resolves as an
        // ordinary (unregistered) external name instead.
        assert!(matches!(
            registry.resolve("ls", Mode::Native),
            Resolution::External
        ));
    }

    #[test]
    fn alias_table_is_bounded() {
        let mut registry = Registry::new();
        for i in 0..MAX_ALIASES {
            registry.set_alias(format!("a{i}"), "x").unwrap();
        }
        assert!(matches!(
            registry.set_alias("overflow", "x"),
            Err(RegistryError::AliasTableFull)
        ));
    }

    #[test]
    fn removing_unknown_alias_errors() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.remove_alias("nope"),
            Err(RegistryError::NoSuchAlias(_))
        ));
    }
}
