//! Result wrapper for every repository read.

/// State of a single logical repository request.
///
/// A request yields exactly one `Loading` followed by exactly one terminal
/// `Success` or `Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> Outcome<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Outcome::Loading)
    }

    /// Returns true for `Success` and `Error`.
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Loading => Outcome::Loading,
            Outcome::Success(data) => Outcome::Success(f(data)),
            Outcome::Error(message) => Outcome::Error(message),
        }
    }

    /// Converts a terminal outcome into a `Result`. `Loading` yields `None`.
    pub fn into_result(self) -> Option<Result<T, String>> {
        match self {
            Outcome::Loading => None,
            Outcome::Success(data) => Some(Ok(data)),
            Outcome::Error(message) => Some(Err(message)),
        }
    }
}
