// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Time related utils.

use chrono::SecondsFormat;
use chrono::Utc;

use crate::{Error, Result};

/// DateTime in UTC.
pub type DateTime = chrono::DateTime<Utc>;

/// Current time in UTC.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time as ISO 8601 with milliseconds: "2022-03-13T07:20:04.000Z"
pub fn format_iso8601(t: DateTime) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an ISO 8601 / RFC 3339 time string into UTC.
pub fn parse_iso8601(s: &str) -> Result<DateTime> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::unexpected(format!("parse '{s}' as iso8601 failed")).with_source(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_iso8601() -> Result<()> {
        let t = parse_iso8601("2022-03-13T07:20:04Z")?;
        assert_eq!("2022-03-13T07:20:04.000Z", format_iso8601(t));

        let t = parse_iso8601("2022-03-13T09:20:04.123+02:00")?;
        assert_eq!("2022-03-13T07:20:04.123Z", format_iso8601(t));

        Ok(())
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_iso8601("yesterday").is_err());
    }
}
