use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Deserializes a JSON array element by element, keeping only the elements
/// that decode. `null` in place of the array reads as empty.
///
/// Use with `#[serde(deserialize_with = "best_effort_vec")]`.
pub fn best_effort_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let total = values.len();

    let items: Vec<T> = values
        .into_iter()
        .filter_map(|value| match T::deserialize(serde_stacker::Deserializer::new(value)) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!("Dropping malformed element: {}", e);
                None
            }
        })
        .collect();

    if items.len() < total {
        tracing::warn!("Dropped {} of {} malformed elements", total - items.len(), total);
    }

    Ok(items)
}
