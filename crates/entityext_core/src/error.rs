use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Convenient result alias for entityext_core.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Log/handling importance. Shared by errors and by the owner's log sink.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Severity {
    /// Lowercase label, matching the names accepted by log-level config.
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// Parse a config-style level name (case-insensitive, `warning` accepted).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Severity::Trace),
            "debug" => Some(Severity::Debug),
            "info" => Some(Severity::Info),
            "warn" | "warning" => Some(Severity::Warn),
            "error" => Some(Severity::Error),
            "fatal" => Some(Severity::Fatal),
            _ => None,
        }
    }
}

/// Where an error came from (helps triage and routing).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Domain {
    Entity,
    Activation,
    Config,
    Dispatch,
    Other,
}

/// Stable error "kind" for matching/branching.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidArgument,
    AlreadyExists,
    Exhausted,
    UnknownId,
    Other,
}

/// Optional structured payload for rich context without forcing allocation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Payload {
    None,

    /// Generic key/value context (usually no heap alloc if using &str).
    Context {
        key: &'static str,
        value: Cow<'static, str>,
    },

    /// Numeric id that failed to map onto a known enumeration value.
    Code(u32),
}

/// The one error type that crosses module boundaries in entityext.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{severity:?}: {message}")]
pub struct CoreError {
    pub domain: Domain,
    pub kind: ErrorKind,
    pub severity: Severity,
    pub message: Cow<'static, str>,
    pub payload: Payload,
}

impl CoreError {
    /// Fully-specified constructor (rarely needed at call sites).
    pub fn new(
        domain: Domain,
        kind: ErrorKind,
        severity: Severity,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            domain,
            kind,
            severity,
            message: message.into(),
            payload: Payload::None,
        }
    }

    // ---------------- Fluent entry points ----------------

    #[inline]
    pub fn trace() -> ErrB {
        ErrB::new(Severity::Trace)
    }
    #[inline]
    pub fn debug() -> ErrB {
        ErrB::new(Severity::Debug)
    }
    #[inline]
    pub fn info() -> ErrB {
        ErrB::new(Severity::Info)
    }
    #[inline]
    pub fn warn() -> ErrB {
        ErrB::new(Severity::Warn)
    }
    #[inline]
    pub fn error() -> ErrB {
        ErrB::new(Severity::Error)
    }
    #[inline]
    pub fn fatal() -> ErrB {
        ErrB::new(Severity::Fatal)
    }

    /// Construct an UnknownId error for a numeric id outside an enumeration.
    pub fn unknown_id(domain: Domain, what: &'static str, id: u8) -> Self {
        CoreError::warn()
            .domain(domain)
            .kind(ErrorKind::UnknownId)
            .msgf(format_args!("unknown {what} id {id}"))
            .payload(Payload::Code(u32::from(id)))
            .build()
    }
}

/// Fluent builder that behaves like iterator chains (takes self, returns Self).
/// Defaults:
/// - domain = Other
/// - kind = Other
/// - message = ""
/// - payload = None
#[derive(Debug, Clone)]
pub struct ErrB {
    domain: Domain,
    kind: ErrorKind,
    severity: Severity,
    message: Cow<'static, str>,
    payload: Payload,
}

impl ErrB {
    #[inline]
    fn new(severity: Severity) -> Self {
        Self {
            domain: Domain::Other,
            kind: ErrorKind::Other,
            severity,
            message: Cow::Borrowed(""),
            payload: Payload::None,
        }
    }

    /// Set/override the domain (defaults to Domain::Other).
    #[inline]
    pub fn domain(mut self, d: Domain) -> Self {
        self.domain = d;
        self
    }

    /// Set/override the kind (defaults to ErrorKind::Other).
    #[inline]
    pub fn kind(mut self, k: ErrorKind) -> Self {
        self.kind = k;
        self
    }

    /// Set/override the message (defaults to "").
    #[inline]
    pub fn msg(mut self, m: impl Into<Cow<'static, str>>) -> Self {
        self.message = m.into();
        self
    }

    /// Formatting-friendly message setter.
    #[inline]
    pub fn msgf(mut self, args: fmt::Arguments<'_>) -> Self {
        self.message = Cow::Owned(args.to_string());
        self
    }

    /// Only one payload: this replaces any previous payload (default is None).
    #[inline]
    pub fn payload(mut self, p: Payload) -> Self {
        self.payload = p;
        self
    }

    #[inline]
    pub fn build(self) -> CoreError {
        CoreError {
            domain: self.domain,
            kind: self.kind,
            severity: self.severity,
            message: self.message,
            payload: self.payload,
        }
    }
}

impl From<ErrB> for CoreError {
    fn from(b: ErrB) -> Self {
        b.build()
    }
}
