//! 宽松反序列化工具
//!
//! 后端返回的字段类型并不稳定：id 可能是字符串也可能是数字，
//! 角色字段可能是字符串也可能是布尔值，日期可能只有年月日。

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::Text(s) => s,
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Float(f) => f.to_string(),
        }
    }
}

/// 接受字符串或数字，统一转为字符串
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

/// 同 [`string_or_number`]，但允许 `null`
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}

/// 解析日期时间，无法识别的格式返回 `None` 而不是报错
///
/// 支持 RFC 3339、`YYYY-MM-DDTHH:MM:SS`（按 UTC 处理）以及 `YYYY-MM-DD`。
pub fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_datetime))
}

pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `Option<Role>` 的序列化/反序列化
///
/// 写入时输出 "admin" / "user"；读取时：
/// - 字符串按 [`Role::parse`](crate::Role::parse) 解析
/// - `true` 视为管理员，`false` 视为普通用户
/// - 其他值一律视为无角色
pub mod role_field {
    use super::*;
    use crate::Role;
    use serde::Serializer;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRole {
        Text(String),
        Flag(bool),
        Other(IgnoredAny),
    }

    pub fn serialize<S>(role: &Option<Role>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match role {
            Some(role) => serializer.serialize_str(role.as_str()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawRole>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawRole::Text(s)) => Role::parse(&s),
            Some(RawRole::Flag(true)) => Some(Role::Admin),
            Some(RawRole::Flag(false)) => Some(Role::User),
            Some(RawRole::Other(_)) | None => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_datetime_formats() {
        let dt = parse_datetime("2025-03-01T10:30:00Z").unwrap();
        assert_eq!((dt.month(), dt.day(), dt.hour()), (3, 1, 10));

        let dt = parse_datetime("2025-03-01T10:30:00.123").unwrap();
        assert_eq!(dt.minute(), 30);

        let dt = parse_datetime("2025-03-01").unwrap();
        assert_eq!((dt.year(), dt.hour()), (2025, 0));

        assert!(parse_datetime("next tuesday").is_none());
    }
}
