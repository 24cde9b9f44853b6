//! Result type alias for Be Healthy
//!
//! This module provides a convenient Result type alias that uses AppError
//! as the error type.

use super::errors::AppError;

/// Result type alias for Be Healthy operations
///
/// # Examples
///
/// ```
/// use behealthy::domain::result::Result;
/// use behealthy::domain::errors::AppError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(AppError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::AppError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(AppError::Validation("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
