// 📐 Input validation - raw form fields to a checked draw request
// Nothing mutates until all three fields pass

/// Digit length used when the field is left blank, zero, or non-numeric.
pub const DEFAULT_DIGITS: u32 = 3;

// ============================================================================
// VALIDATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn invalid(field: &str, message: &str) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

// ============================================================================
// DRAW REQUEST
// ============================================================================

/// Validated form input for one generation action.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRequest {
    pub name: String,
    pub count: usize,
    pub digits: u32,
}

/// Parse the three raw form fields into a [`DrawRequest`].
///
/// The digits field defaults to [`DEFAULT_DIGITS`] when blank, zero, or not
/// a number at all; an explicit negative value is rejected rather than
/// silently defaulted.
pub fn parse_draw_request(
    name: &str,
    count: &str,
    digits: &str,
) -> Result<DrawRequest, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid("name", "Please enter a participant name"));
    }

    let count = match count.trim().parse::<i64>() {
        Ok(n) if n > 0 => n as usize,
        _ => {
            return Err(invalid(
                "count",
                "Please enter a positive number of tickets",
            ))
        }
    };

    let digits = match digits.trim().parse::<i64>() {
        // Values past u32 range must not wrap into tiny digit lengths
        Ok(n) if n > 0 => u32::try_from(n)
            .map_err(|_| invalid("digits", "Please enter a positive number of digits"))?,
        Ok(0) => DEFAULT_DIGITS,
        Ok(_) => {
            return Err(invalid(
                "digits",
                "Please enter a positive number of digits",
            ))
        }
        Err(_) => DEFAULT_DIGITS,
    };

    Ok(DrawRequest {
        name: name.to_string(),
        count,
        digits,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let request = parse_draw_request("Alice", "5", "4").unwrap();
        assert_eq!(
            request,
            DrawRequest {
                name: "Alice".to_string(),
                count: 5,
                digits: 4,
            }
        );
    }

    #[test]
    fn test_name_is_trimmed_and_required() {
        let request = parse_draw_request("  Alice  ", "1", "3").unwrap();
        assert_eq!(request.name, "Alice");

        let err = parse_draw_request("   ", "1", "3").unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn test_count_must_be_a_positive_number() {
        assert_eq!(parse_draw_request("A", "", "3").unwrap_err().field, "count");
        assert_eq!(
            parse_draw_request("A", "abc", "3").unwrap_err().field,
            "count"
        );
        assert_eq!(parse_draw_request("A", "0", "3").unwrap_err().field, "count");
        assert_eq!(
            parse_draw_request("A", "-2", "3").unwrap_err().field,
            "count"
        );
    }

    #[test]
    fn test_digits_default_boundary() {
        // Blank, non-numeric, and zero all fall back to the default
        assert_eq!(parse_draw_request("A", "1", "").unwrap().digits, 3);
        assert_eq!(parse_draw_request("A", "1", "abc").unwrap().digits, 3);
        assert_eq!(parse_draw_request("A", "1", "0").unwrap().digits, 3);

        // An explicit negative value is an error, not a default
        assert_eq!(
            parse_draw_request("A", "1", "-2").unwrap_err().field,
            "digits"
        );

        assert_eq!(parse_draw_request("A", "1", "4").unwrap().digits, 4);
    }

    #[test]
    fn test_digits_beyond_u32_are_rejected_not_truncated() {
        // 2^32 would wrap to 0 and 2^32 + 1 to 1 under a plain cast
        assert_eq!(
            parse_draw_request("A", "1", "4294967296").unwrap_err().field,
            "digits"
        );
        assert_eq!(
            parse_draw_request("A", "1", "4294967297").unwrap_err().field,
            "digits"
        );
    }
}
