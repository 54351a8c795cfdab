//! Gateway response envelopes and their normalization.

use crate::error::{ClientError, ClientResult};
use crate::gateway::{GatewayError, NO_RECORDS_CODE, SUCCESS_CODE};
use crate::value::Record;
use serde::{Deserialize, Serialize};

/// The response envelope returned by the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResponse {
    /// Gateway status.
    pub error: ErrorEnvelope,
    /// Found-set metadata; present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    /// Returned rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<Record>>,
}

impl RawResponse {
    /// A successful response.
    pub fn success(found: i64, total: i64, records: Vec<Record>) -> Self {
        Self {
            error: ErrorEnvelope { code: SUCCESS_CODE },
            meta: Some(Meta {
                found: Count::Integer(found),
                total: Count::Integer(total),
            }),
            records: Some(records),
        }
    }

    /// The "no records match" response.
    pub fn no_records() -> Self {
        Self::error(NO_RECORDS_CODE)
    }

    /// A response carrying only a status code.
    pub fn error(code: i64) -> Self {
        Self {
            error: ErrorEnvelope { code },
            meta: None,
            records: None,
        }
    }
}

/// Status block of a response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Gateway status code; `0` on success.
    pub code: i64,
}

/// Found-set metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Number of records in the found set.
    pub found: Count,
    /// Number of records in the table.
    pub total: Count,
}

/// A record count, sent by the gateway as either a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Count {
    /// Integer count.
    Integer(i64),
    /// Floating point count; truncated when read.
    Float(f64),
    /// Count rendered as text.
    Text(String),
}

impl Count {
    /// Reads the count as a non-negative integer.
    ///
    /// Text is read like a lenient integer parse: leading whitespace is
    /// skipped and the leading run of digits is used, so `" 12 rows"` is 12.
    /// Returns `None` when there are no digits or the value is negative.
    pub fn to_u64(&self) -> Option<u64> {
        match self {
            Count::Integer(i) => u64::try_from(*i).ok(),
            Count::Float(f) if f.is_finite() && *f >= 0.0 => Some(f.trunc() as u64),
            Count::Float(_) => None,
            Count::Text(s) => {
                let s = s.trim_start();
                let s = s.strip_prefix('+').unwrap_or(s);
                let end = s
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(s.len());
                s[..end].parse().ok()
            }
        }
    }
}

/// The normalized outcome of a gateway call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Number of records in the found set.
    pub count: u64,
    /// Number of records in the table, when meaningful.
    pub total: Option<u64>,
    /// Returned rows.
    pub records: Vec<Record>,
}

impl ResultSet {
    /// The "nothing matched" result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if no rows were returned.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the first row.
    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// Iterates over the returned rows.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Interprets a response envelope.
///
/// - `0`: success; counts come from `meta`, rows from `records`.
/// - `401`: nothing matched; an empty result with no total.
/// - anything else: [`ClientError::Gateway`] carrying the code.
pub fn normalize(response: RawResponse) -> ClientResult<ResultSet> {
    match response.error.code {
        SUCCESS_CODE => {
            let meta = response.meta.ok_or_else(|| {
                ClientError::MalformedResponse("success response without meta".into())
            })?;
            let count = meta.found.to_u64().ok_or_else(|| {
                ClientError::MalformedResponse(format!("unreadable found count: {:?}", meta.found))
            })?;
            let total = meta.total.to_u64().ok_or_else(|| {
                ClientError::MalformedResponse(format!("unreadable total count: {:?}", meta.total))
            })?;

            Ok(ResultSet {
                count,
                total: Some(total),
                records: response.records.unwrap_or_default(),
            })
        }
        NO_RECORDS_CODE => Ok(ResultSet::empty()),
        code => Err(GatewayError::new(code).into()),
    }
}
