use std::env;

use entityext_core::error::Severity;
use tracing::warn;

pub const DEFAULT_TASK_NAME: &str = "entityext_task";
pub const DEFAULT_DISPATCH_CAPACITY: usize = 32;
pub const DEFAULT_LOG_LEVEL: Severity = Severity::Info;

pub const ENV_TASK_NAME: &str = "ENTITYEXT_TASK_NAME";
pub const ENV_DISPATCH_CAPACITY: &str = "ENTITYEXT_DISPATCH_CAPACITY";
pub const ENV_LOG_LEVEL: &str = "ENTITYEXT_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskConfig {
    pub task_name: String,
    /// Snapshots buffered per subscriber before the slowest one starts lagging.
    pub dispatch_capacity: usize,
    pub log_level: Severity,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            task_name: DEFAULT_TASK_NAME.to_string(),
            dispatch_capacity: DEFAULT_DISPATCH_CAPACITY,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl TaskConfig {
    pub fn from_args() -> Self {
        Self::from_args_iter(env::args())
    }

    /// Environment first, then command-line flags. The first item is the
    /// program name and is skipped.
    pub fn from_args_iter<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();

        if let Ok(name) = env::var(ENV_TASK_NAME) {
            config.set_task_name(&name);
        }
        if let Ok(value) = env::var(ENV_DISPATCH_CAPACITY) {
            config.set_dispatch_capacity(&value);
        }
        if let Ok(value) = env::var(ENV_LOG_LEVEL) {
            config.set_log_level(&value);
        }

        let mut args = iter.into_iter();
        let _ = args.next();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            match arg {
                "--task-name" => {
                    if let Some(value) = args.next() {
                        config.set_task_name(value.as_ref());
                    }
                }
                "--dispatch-capacity" => {
                    if let Some(value) = args.next() {
                        config.set_dispatch_capacity(value.as_ref());
                    }
                }
                "--log-level" => {
                    if let Some(value) = args.next() {
                        config.set_log_level(value.as_ref());
                    }
                }
                _ if arg.starts_with("--task-name=") => {
                    config.set_task_name(&arg["--task-name=".len()..]);
                }
                _ if arg.starts_with("--dispatch-capacity=") => {
                    config.set_dispatch_capacity(&arg["--dispatch-capacity=".len()..]);
                }
                _ if arg.starts_with("--log-level=") => {
                    config.set_log_level(&arg["--log-level=".len()..]);
                }
                _ => {}
            }
        }

        config
    }

    fn set_task_name(&mut self, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            warn!("ignoring empty task name");
        } else {
            self.task_name = value.to_string();
        }
    }

    fn set_dispatch_capacity(&mut self, value: &str) {
        match parse_capacity(value) {
            Some(capacity) => self.dispatch_capacity = capacity,
            None => warn!(value, "ignoring invalid dispatch capacity"),
        }
    }

    fn set_log_level(&mut self, value: &str) {
        match Severity::from_label(value) {
            Some(level) => self.log_level = level,
            None => warn!(value, "ignoring unknown log level"),
        }
    }
}

fn parse_capacity(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|c| *c > 0)
}
