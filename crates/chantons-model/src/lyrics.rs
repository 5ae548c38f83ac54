use serde::{Deserialize, Serialize};

/// Segmented lyrics of one song: the refrain plus its verses in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lyrics {
    /// Consolidated refrain text. Empty when the song has no distinct refrain.
    pub refrain: String,
    /// Verse bodies ("couplets"), in catalogue order.
    #[serde(rename = "couplet")]
    pub couplets: Vec<String>,
}
