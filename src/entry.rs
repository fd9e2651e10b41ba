//! Log record data model.
//!
//! An [`Entry`] is one log record: severity, final namespace, message, the
//! wall-clock time captured at the call site, and the merged context pairs.
//! Entries are built by the logging surface (see [`crate::log`]) by merging
//! the call-site arguments with the ambient [`Key`]; sinks only ever see the
//! merged form.

use chrono::{DateTime, Utc};

use crate::key::{ContextVec, Key, Pair};

/// Log severity, lowest to highest.
///
/// # Examples
///
/// ```
/// use task_rail::Severity;
///
/// assert_eq!(Severity::Warning.label(), "WARNING");
/// assert_eq!(Severity::Alert.to_string(), "Alert");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Alert,
}

impl Severity {
    /// Stable uppercase label, used by the file sink's line format.
    #[inline]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Alert => "ALERT",
        }
    }

    /// Capitalised name, used by the terminal sink's header.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Alert => "Alert",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One log record, fully merged with the ambient key.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    /// Severity the entry was logged at.
    pub severity: Severity,
    /// Final namespace: the key's accumulated prefix plus the call-site
    /// namespace, concatenated without a separator.
    pub namespace: String,
    /// The message text.
    pub message: String,
    /// Wall-clock time captured when the log call ran, not when a sink
    /// eventually wrote the entry.
    pub time: DateTime<Utc>,
    /// Context pairs: the key's accumulated pairs followed by the call-site
    /// pairs, order preserved, duplicates permitted.
    pub context: ContextVec,
}

impl Entry {
    /// Merges call-site arguments with the ambient key, stamping the current
    /// time.
    pub(crate) fn merge<I>(severity: Severity, key: &Key, namespace: &str, message: String, pairs: I) -> Self
    where
        I: IntoIterator<Item = Pair>,
    {
        let mut full_namespace =
            String::with_capacity(key.namespace().len() + namespace.len());
        full_namespace.push_str(key.namespace());
        full_namespace.push_str(namespace);

        let mut context: ContextVec = key.context().iter().cloned().collect();
        context.extend(pairs);

        Self {
            severity,
            namespace: full_namespace,
            message,
            time: Utc::now(),
            context,
        }
    }
}
