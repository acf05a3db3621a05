//! Structured fault captured at an execution boundary.
//!
//! A [`Fault`] is what an unexpected failure looks like once it has been
//! caught: a message plus an optional underlying cause. Faults only travel
//! inside [`Fin::Fail`](super::Fin::Fail); callers are expected to convert
//! them into domain errors close to where they were produced.

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

type Cause = Arc<dyn Error + Send + Sync + 'static>;

/// Where a fault came from. Only the effect runtime creates the non-`Other` kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FaultKind {
    Other,
    Timeout,
    Cancelled,
}

/// A caught, unexpected failure.
///
/// # Examples
///
/// ```rust
/// use finkit::effect::Fault;
///
/// let io_error = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// let fault = Fault::with_cause("could not persist user", io_error);
///
/// assert_eq!(fault.message(), "could not persist user");
/// assert_eq!(fault.cause().map(|cause| cause.to_string()), Some("disk full".to_string()));
/// ```
#[derive(Clone)]
pub struct Fault {
    message: String,
    cause: Option<Cause>,
    kind: FaultKind,
}

impl Fault {
    /// Creates a fault with a message and no cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
            kind: FaultKind::Other,
        }
    }

    /// Creates a fault with a message and an underlying cause.
    pub fn with_cause<E>(message: impl Into<String>, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            cause: Some(Arc::new(cause)),
            kind: FaultKind::Other,
        }
    }

    /// Wraps an error, using its `Display` output as the message.
    pub fn from_error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            message: error.to_string(),
            cause: Some(Arc::new(error)),
            kind: FaultKind::Other,
        }
    }

    /// Converts a panic payload into a fault.
    ///
    /// `&str` and `String` payloads become the message; anything else is
    /// reported as `"unknown panic"`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "unknown panic".to_string()
        };
        Self::new(message)
    }

    /// The fault produced when a timer wins the race against a step.
    pub fn timed_out(duration: Duration) -> Self {
        Self {
            kind: FaultKind::Timeout,
            ..Self::new(format!("timed out after {duration:?}"))
        }
    }

    /// The fault produced when a cancellation is observed between steps.
    pub fn cancelled() -> Self {
        Self {
            kind: FaultKind::Cancelled,
            ..Self::new("cancelled before the next step started")
        }
    }

    /// Returns the message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the underlying cause, if any.
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Returns the cause downcast to `T`, if the cause is a `T`.
    ///
    /// ```rust
    /// use finkit::effect::Fault;
    ///
    /// let fault = Fault::from_error(std::fmt::Error);
    /// assert!(fault.cause_as::<std::fmt::Error>().is_some());
    /// assert!(fault.cause_as::<std::io::Error>().is_none());
    /// ```
    pub fn cause_as<T>(&self) -> Option<&T>
    where
        T: Error + 'static,
    {
        self.cause().and_then(|cause| cause.downcast_ref::<T>())
    }

    /// Returns `true` when this fault was produced by a timeout.
    pub fn is_timeout(&self) -> bool {
        self.kind == FaultKind::Timeout
    }

    /// Returns `true` when this fault was produced by a cancellation.
    pub fn is_cancelled(&self) -> bool {
        self.kind == FaultKind::Cancelled
    }

    /// Prefixes the message with some context, keeping the cause.
    #[must_use]
    pub fn context(self, context: impl fmt::Display) -> Self {
        Self {
            message: format!("{context}: {}", self.message),
            ..self
        }
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = formatter.debug_struct("Fault");
        debug.field("message", &self.message);
        if let Some(cause) = &self.cause {
            debug.field("cause", &cause.to_string());
        }
        debug.finish()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.message)
    }
}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}

impl PartialEq for Fault {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.message == other.message
            && self.cause.as_ref().map(ToString::to_string)
                == other.cause.as_ref().map(ToString::to_string)
    }
}

impl Eq for Fault {}

impl From<String> for Fault {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for Fault {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<std::io::Error> for Fault {
    fn from(error: std::io::Error) -> Self {
        Self::from_error(error)
    }
}
