use crate::error::SessionError;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A key press, optionally with Ctrl held
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub ctrl: bool,
    pub key: String,
}

impl KeyBinding {
    pub fn new(key: &str) -> Self {
        Self {
            ctrl: false,
            key: key.to_ascii_lowercase(),
        }
    }

    pub fn ctrl(key: &str) -> Self {
        Self {
            ctrl: true,
            key: key.to_ascii_lowercase(),
        }
    }

    /// The command this key triggers, if any
    pub fn command(&self) -> Option<Command> {
        match (self.ctrl, self.key.as_str()) {
            (_, "f") => Some(Command::CycleFilter),
            (_, "s" | "c") => Some(Command::Screenshot),
            (true, "q") => Some(Command::Quit),
            _ => None,
        }
    }
}

impl FromStr for KeyBinding {
    type Err = SessionError;

    /// Parse `f`, `ctrl+f`, `Ctrl-S`, `escape`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (ctrl, key) = match lower
            .strip_prefix("ctrl+")
            .or_else(|| lower.strip_prefix("ctrl-"))
        {
            Some(rest) => (true, rest),
            None => (false, lower.as_str()),
        };
        if key.is_empty() {
            return Err(SessionError::KeyScript(s.to_string()));
        }
        Ok(Self {
            ctrl,
            key: key.to_string(),
        })
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "ctrl+{}", self.key)
        } else {
            f.write_str(&self.key)
        }
    }
}

/// What the session loop does in response to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Advance to the next filter mode
    CycleFilter,
    /// Save the current filtered frame
    Screenshot,
    /// Stop the session
    Quit,
}

/// Keys scheduled by tick, from a script like `3:f,5:s,9:ctrl+q`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyScript {
    keys: BTreeMap<u64, Vec<KeyBinding>>,
}

impl KeyScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` for `tick`; several keys on one tick keep their order
    pub fn push(&mut self, tick: u64, key: KeyBinding) {
        self.keys.entry(tick).or_default().push(key);
    }

    /// Keys pressed on `tick`
    pub fn keys_at(&self, tick: u64) -> &[KeyBinding] {
        self.keys.get(&tick).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Commands for `tick`, with unbound keys dropped
    pub fn commands_at(&self, tick: u64) -> Vec<Command> {
        self.keys_at(tick)
            .iter()
            .filter_map(|k| {
                let command = k.command();
                if command.is_none() {
                    tracing::debug!(key = %k, tick, "Key has no binding");
                }
                command
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromStr for KeyScript {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut script = Self::new();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (tick, key) = entry
                .split_once(':')
                .ok_or_else(|| SessionError::KeyScript(entry.to_string()))?;
            let tick: u64 = tick
                .trim()
                .parse()
                .map_err(|_| SessionError::KeyScript(entry.to_string()))?;
            script.push(tick, key.parse()?);
        }
        Ok(script)
    }
}
