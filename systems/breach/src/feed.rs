//! Decoding of breach events from action-frame JSON.

use diamond_siege_core::CellCoord;
use serde_json::Value;
use thiserror::Error;

use crate::BreachEvent;

/// Position of the `[x, y]` location inside a breach entry.
const LOCATION_FIELD: usize = 0;
/// Position of the faction flag inside a breach entry.
const FACTION_FIELD: usize = 4;
/// Faction flag value marking a breach on the own edge.
const OWN_EDGE_FLAG: u64 = 1;

/// Errors raised while decoding the breach feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The frame is not valid JSON.
    #[error("malformed action frame: {0}")]
    Json(#[from] serde_json::Error),
    /// `events.breach` exists but is not a list.
    #[error("breach events are not a list")]
    NotAList,
}

/// Extracts the breach events listed in one frame line.
///
/// Frames without an `events.breach` list yield no events. Entries that do
/// not carry a location and a faction flag are skipped with a warning.
pub fn parse_breach_events(line: &str) -> Result<Vec<BreachEvent>, FeedError> {
    let frame: Value = serde_json::from_str(line)?;
    let Some(breaches) = frame.get("events").and_then(|events| events.get("breach")) else {
        return Ok(Vec::new());
    };
    let entries = breaches.as_array().ok_or(FeedError::NotAList)?;

    let mut events = Vec::with_capacity(entries.len());
    for entry in entries {
        match decode_entry(entry) {
            Some(event) => events.push(event),
            None => tracing::warn!(%entry, "skipping malformed breach entry"),
        }
    }
    Ok(events)
}

fn decode_entry(entry: &Value) -> Option<BreachEvent> {
    let fields = entry.as_array()?;
    let location = fields.get(LOCATION_FIELD)?.as_array()?;
    let column = u32::try_from(location.first()?.as_u64()?).ok()?;
    let row = u32::try_from(location.get(1)?.as_u64()?).ok()?;
    let flag = fields.get(FACTION_FIELD)?.as_u64()?;

    Some(BreachEvent {
        cell: CellCoord::new(column, row),
        inbound_to_self: flag == OWN_EDGE_FLAG,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breach_entries_decode_location_and_faction() {
        let events = parse_breach_events(
            r#"{"events":{"breach":[[[5,8],1,3,"17",1],[[22,8],1,3,"18",2]]}}"#,
        )
        .expect("feed");
        assert_eq!(
            events,
            vec![
                BreachEvent {
                    cell: CellCoord::new(5, 8),
                    inbound_to_self: true,
                },
                BreachEvent {
                    cell: CellCoord::new(22, 8),
                    inbound_to_self: false,
                },
            ]
        );
    }

    #[test]
    fn frames_without_breaches_yield_nothing() {
        assert!(parse_breach_events(r#"{"turnInfo":[1,3,4]}"#)
            .expect("feed")
            .is_empty());
        assert!(parse_breach_events(r#"{"events":{"breach":[]}}"#)
            .expect("feed")
            .is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let events = parse_breach_events(
            r#"{"events":{"breach":[[[5]],"junk",[[3,10],1,3,"4",1]]}}"#,
        )
        .expect("feed");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].cell, CellCoord::new(3, 10));
    }

    #[test]
    fn malformed_frames_are_errors() {
        assert!(matches!(parse_breach_events("{"), Err(FeedError::Json(_))));
        assert!(matches!(
            parse_breach_events(r#"{"events":{"breach":7}}"#),
            Err(FeedError::NotAList)
        ));
    }
}
