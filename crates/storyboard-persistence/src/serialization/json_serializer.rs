use crate::traits::Serializer;
use storyboard_core::{BoardError, BoardResult};

/// JSON serializer for stored card collections. Output is indented, since
/// people may open the board file by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl<T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync> Serializer<T>
    for JsonSerializer
{
    fn serialize(&self, data: &T) -> BoardResult<Vec<u8>> {
        serde_json::to_vec_pretty(data).map_err(|e| BoardError::Serialization(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> BoardResult<T> {
        serde_json::from_slice(bytes).map_err(|e| BoardError::Serialization(e.to_string()))
    }
}
