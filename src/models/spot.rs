use serde::{Deserialize, Serialize};

/// One live activation spot as delivered by the external spot feed.
/// Frequency stays a kHz string, exactly as the feed sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spot {
    pub spot_id: i64,
    pub activator: String,
    pub reference: String,
    pub park_name: String,
    pub frequency: String, // kHz
    pub mode: String,
    pub comments: String,
    pub spot_time: String,
}

/// A spot annotated against the local log.
#[derive(Debug, Clone)]
pub struct AnnotatedSpot {
    pub spot: Spot,
    /// This activator+park pair is already in the log.
    pub hunted: bool,
    /// This park has never been worked before.
    pub new_park: bool,
}
