use core::fmt;

/// Errors raised when a configuration or agent set is rejected.
///
/// Stepping never fails; only population changes and config updates are
/// validated.
#[derive(Debug, Clone, PartialEq)]
pub enum FlockError {
    /// Requested population exceeds [`MAX_AGENTS`](crate::MAX_AGENTS).
    TooManyAgents { requested: usize, max: usize },
    /// A numeric parameter is out of range or not finite.
    InvalidParameter { name: &'static str, value: f32 },
}

impl fmt::Display for FlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlockError::TooManyAgents { requested, max } => write!(
                f,
                "Requested {} agents, but at most {} are supported",
                requested, max
            ),
            FlockError::InvalidParameter { name, value } => {
                write!(f, "Invalid value {} for parameter `{}`", value, name)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FlockError {}
