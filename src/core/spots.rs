//! Spot-feed annotation: flag each live spot against the local log. The
//! core neither fetches nor caches spots, it only annotates what the feed
//! collaborator hands over.

use std::collections::{BTreeSet, HashSet};

use crate::models::{AnnotatedSpot, Qso, Spot};

fn hunted_key(callsign: &str, park: &str) -> String {
    format!("{callsign}:{park}")
}

fn build_hunted_set(qsos: &[Qso]) -> HashSet<String> {
    qsos.iter()
        .map(|q| hunted_key(&q.callsign, q.park_reference.as_deref().unwrap_or("")))
        .collect()
}

/// Annotate spots: `hunted` marks an activator+park pair already logged,
/// `new_park` a park reference absent from the worked history.
pub fn annotate_spots(
    spots: Vec<Spot>,
    qsos: &[Qso],
    worked: &BTreeSet<String>,
) -> Vec<AnnotatedSpot> {
    let hunted = build_hunted_set(qsos);
    spots
        .into_iter()
        .map(|spot| {
            let is_hunted = hunted.contains(&hunted_key(&spot.activator, &spot.reference));
            let new_park = !worked.contains(&spot.reference);
            AnnotatedSpot {
                spot,
                hunted: is_hunted,
                new_park,
            }
        })
        .collect()
}

/// Sort spots by numeric frequency, then mode, then spot time.
pub fn sort_spots(spots: &mut [AnnotatedSpot]) {
    spots.sort_by(|a, b| {
        let fa = a.spot.frequency.parse::<f64>().unwrap_or(0.0);
        let fb = b.spot.frequency.parse::<f64>().unwrap_or(0.0);
        fa.partial_cmp(&fb)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.spot.mode.cmp(&b.spot.mode))
            .then_with(|| a.spot.spot_time.cmp(&b.spot.spot_time))
    });
}
