//! The ambient key threaded through every task invocation.
//!
//! A [`Key`] bundles the current namespace prefix, the accumulated context
//! pairs, the process identity captured at driver start, and the queue
//! handles of every configured sink. Tasks receive it implicitly when the
//! driver runs them; [`context`](crate::context()) swaps in an extended copy
//! for the dynamic extent of an inner task.
//!
//! Keys are never mutated after construction. Extension builds a new value,
//! so sequentially-composed scopes cannot observe each other's additions.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::sink::worker::QueueHandle;

/// A single `(name, value)` context pair attached to log entries.
pub type Pair = (String, String);

/// Inline storage for context pairs; most scopes carry only a handful.
pub type ContextVec = SmallVec<[Pair; 4]>;

/// The immutable ambient state a task runs under.
///
/// A `Key` is created once per [`perform`](crate::perform) invocation and
/// extended (never modified) by [`context`](crate::context()). Cloning is
/// cheap: host, pid and the queue handles live behind a shared [`Arc`].
///
/// There is no public constructor. Keys exist only inside a running task
/// tree, which is what keeps context propagation purely lexical: a task
/// cannot smuggle its Key out and replay it under a different scope.
#[derive(Clone)]
pub struct Key {
    namespace: String,
    context: ContextVec,
    shared: Arc<KeyShared>,
}

struct KeyShared {
    host: String,
    pid: u32,
    queues: Vec<QueueHandle>,
}

impl Key {
    /// Builds the root key for one driver invocation.
    pub(crate) fn root(host: String, pid: u32, queues: Vec<QueueHandle>) -> Self {
        Self {
            namespace: String::new(),
            context: ContextVec::new(),
            shared: Arc::new(KeyShared { host, pid, queues }),
        }
    }

    /// Returns a key whose namespace and context are extended by the given
    /// suffix and pairs. Host, pid and queues are shared with `self`.
    ///
    /// Namespace extension is plain concatenation; callers control
    /// separators. Context extension is append-only: existing pairs keep
    /// their order, duplicates are preserved.
    pub(crate) fn extend<I>(&self, namespace: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = Pair>,
    {
        let mut extended_namespace =
            String::with_capacity(self.namespace.len() + namespace.len());
        extended_namespace.push_str(&self.namespace);
        extended_namespace.push_str(namespace);

        let mut extended_context = self.context.clone();
        extended_context.extend(pairs);

        Self {
            namespace: extended_namespace,
            context: extended_context,
            shared: self.shared.clone(),
        }
    }

    /// The accumulated namespace prefix of the current scope.
    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The accumulated context pairs of the current scope, oldest first.
    #[inline]
    pub fn context(&self) -> &[Pair] {
        &self.context
    }

    /// Host name captured when the driver started.
    #[inline]
    pub fn host(&self) -> &str {
        &self.shared.host
    }

    /// Process id captured when the driver started.
    #[inline]
    pub fn pid(&self) -> u32 {
        self.shared.pid
    }

    /// Queue handles of every configured sink, in declaration order.
    #[inline]
    pub(crate) fn queues(&self) -> &[QueueHandle] {
        &self.shared.queues
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("namespace", &self.namespace)
            .field("context", &self.context)
            .field("host", &self.shared.host)
            .field("pid", &self.shared.pid)
            .field("queues", &self.shared.queues.len())
            .finish()
    }
}
