use indexmap::IndexMap;

use super::ApiClientError;

/// Ordered multi-map of query parameters.
///
/// Keys keep their first insertion position; a key can carry several values,
/// encoded as repeated `key=value` pairs.
///
/// # Example
///
/// ```rust
/// use onecrm_core::QueryValues;
///
/// # fn example() -> Result<(), onecrm_core::ApiClientError> {
/// let query = QueryValues::new()
///     .append("tag", "rust")
///     .append("tag", "http")
///     .set("page", "2");
///
/// assert_eq!(query.to_query_string()?, "tag=rust&tag=http&page=2");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues {
    values: IndexMap<String, Vec<String>>,
}

impl QueryValues {
    /// Creates an empty set of query values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all values of `key` with `value`.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key.into(), value.into());
        self
    }

    /// Adds `value` to the values of `key`, keeping the existing ones.
    #[must_use]
    pub fn append(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key.into(), value.into());
        self
    }

    /// Returns the first value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns all the values of `key`.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Encodes the values as an `application/x-www-form-urlencoded` query string.
    ///
    /// # Errors
    ///
    /// Returns an error if the values cannot be encoded.
    pub fn to_query_string(&self) -> Result<String, ApiClientError> {
        let pairs = self
            .values
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key, value)))
            .collect::<Vec<_>>();
        let query = serde_urlencoded::to_string(pairs)?;
        Ok(query)
    }

    pub(super) fn insert(&mut self, key: String, value: String) {
        self.values.insert(key, vec![value]);
    }

    pub(super) fn push(&mut self, key: String, value: String) {
        self.values.entry(key).or_default().push(value);
    }
}

impl<K, V> FromIterator<(K, V)> for QueryValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |query, (key, value)| query.append(key, value))
    }
}
