//! Composition of zypper command lines run inside containers.
//!
//! Boolean flags are only emitted when set, since zypper treats every
//! missing flag as false. Options are only emitted when they carry a value.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ZypperCommand {
    verb: String,
    args: Vec<String>,
}

impl ZypperCommand {
    /// Non-interactive zypper invocation of `verb` (`lu`, `lp`, `up`, `patch`...).
    pub fn new(verb: &str) -> Self {
        Self {
            verb: verb.to_string(),
            args: Vec::new(),
        }
    }

    pub fn flag(mut self, name: &str, enabled: bool) -> Self {
        if enabled {
            self.args.push(dashed(name));
        }
        self
    }

    pub fn option<V: ToString>(mut self, name: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.is_empty() {
                self.args.push(dashed(name));
                self.args.push(value);
            }
        }
        self
    }

    /// Shell snippet refreshing the repositories before running this command.
    pub fn after_refresh(&self) -> String {
        format!("zypper ref && {self}")
    }
}

fn dashed(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("-{name}")
    } else {
        format!("--{name}")
    }
}

impl fmt::Display for ZypperCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zypper -n {}", self.verb)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
