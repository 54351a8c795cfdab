//! Gateway error codes.

use std::fmt;

/// Code the gateway reports on success.
pub const SUCCESS_CODE: i64 = 0;

/// Code the gateway reports when no records match a request.
pub const NO_RECORDS_CODE: i64 = 401;

/// An error reported by the gateway, identified by its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GatewayError {
    code: i64,
}

impl GatewayError {
    /// Creates an error from a gateway code.
    pub fn new(code: i64) -> Self {
        Self { code }
    }

    /// The "no records match" error.
    pub fn no_records() -> Self {
        Self::new(NO_RECORDS_CODE)
    }

    /// Returns the numeric code.
    pub fn code(&self) -> i64 {
        self.code
    }

    /// Returns a human-readable description of the code.
    pub fn description(&self) -> &'static str {
        describe(self.code)
    }

    /// Returns true for the "no records match" code.
    pub fn is_no_records(&self) -> bool {
        self.code == NO_RECORDS_CODE
    }
}

impl From<i64> for GatewayError {
    fn from(code: i64) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gateway error {}: {}", self.code, self.description())
    }
}

impl std::error::Error for GatewayError {}

fn describe(code: i64) -> &'static str {
    match code {
        0 => "no error",
        1 => "user canceled action",
        100 => "file is missing",
        101 => "record is missing",
        102 => "field is missing",
        104 => "script is missing",
        105 => "layout is missing",
        106 => "table is missing",
        200 => "record access is denied",
        201 => "field cannot be modified",
        212 => "invalid user account or password",
        301 => "record is in use by another user",
        401 => "no records match the request",
        500 => "date value does not meet validation entry options",
        501 => "time value does not meet validation entry options",
        502 => "number value does not meet validation entry options",
        503 => "value in field is not within the range specified in validation entry options",
        504 => "value in field is not unique as required in validation entry options",
        505 => "value in field is not an existing value in the database file",
        506 => "value in field is not listed on the value list specified in validation entry options",
        507 => "value in field failed calculation test of validation entry options",
        508 => "invalid value entered in find mode",
        509 => "field requires a valid value",
        510 => "related value is empty or unavailable",
        511 => "value in field exceeds maximum field size",
        802 => "unable to open file",
        958 => "parameter missing",
        959 => "XML publishing is disabled",
        _ => "unknown gateway error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_codes() {
        assert_eq!(GatewayError::new(105).description(), "layout is missing");
        assert_eq!(GatewayError::new(4242).description(), "unknown gateway error");
    }

    #[test]
    fn error_display() {
        let err = GatewayError::no_records();
        assert!(err.is_no_records());
        assert_eq!(err.to_string(), "gateway error 401: no records match the request");

        let err = GatewayError::from(212);
        assert_eq!(err.code(), 212);
        assert!(!err.is_no_records());
        assert!(err.to_string().contains("212"));
    }
}
