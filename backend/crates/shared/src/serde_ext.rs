//! Serde helpers shared by request DTOs.
//!
//! - [`deserialize_some`]: tri-state patch fields (`absent` / `null` / value)
//! - [`LenientInt`]: integers that browsers send as either numbers or strings

use serde::{Deserialize, Deserializer};

/// Deserialize a present field into `Some(..)`, including an explicit `null`.
///
/// Combined with `#[serde(default)]` this yields `Option<Option<T>>`:
/// `None` when the key is absent, `Some(None)` for `null`, `Some(Some(v))`
/// otherwise.
///
/// ```rust
/// use serde::Deserialize;
/// use kernel::serde_ext::deserialize_some;
///
/// #[derive(Deserialize)]
/// struct Patch {
///     #[serde(default, deserialize_with = "deserialize_some")]
///     alias: Option<Option<String>>,
/// }
///
/// let p: Patch = serde_json::from_str("{}").unwrap();
/// assert_eq!(p.alias, None);
/// let p: Patch = serde_json::from_str(r#"{"alias":null}"#).unwrap();
/// assert_eq!(p.alias, Some(None));
/// ```
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// 数値または数値文字列として送られる整数
///
/// フォームから送られる `"3"` と `3` を同じものとして扱う。
/// 空文字列は「未指定」とみなす。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LenientInt {
    Number(i64),
    Text(String),
}

/// A field that should have held an integer did not.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid integer for {field}")]
pub struct InvalidInteger {
    pub field: &'static str,
}

impl LenientInt {
    /// Resolve to an integer. Blank text is `None`.
    pub fn resolve(&self, field: &'static str) -> Result<Option<i64>, InvalidInteger> {
        match self {
            LenientInt::Number(n) => Ok(Some(*n)),
            LenientInt::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                s.parse::<i64>()
                    .map(Some)
                    .map_err(|_| InvalidInteger { field })
            }
        }
    }
}

/// Resolve an optional lenient integer; absent and `null` both become `None`.
pub fn resolve_opt(
    value: Option<&LenientInt>,
    field: &'static str,
) -> Result<Option<i64>, InvalidInteger> {
    match value {
        Some(v) => v.resolve(field),
        None => Ok(None),
    }
}
