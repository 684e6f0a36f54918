//! Frame-tree reconstruction from tracing metadata events.
//!
//! The main frame comes from the first `TracingStartedInBrowser` event: it is
//! the listed frame without a parent. Child frames are linked through the
//! `parent` fields of that event and of every `FrameCommittedInBrowser` event.

use super::TraceOfTab;
use crate::computed::{AuditContext, ComputedArtifact};
use crate::parser::{Trace, TraceEvent};
use crate::utils::config::{FRAME_COMMITTED_EVENT_NAME, TRACING_STARTED_EVENT_NAME};
use crate::utils::error::MetricError;
use async_trait::async_trait;
use log::{debug, info};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Summarizer that attributes events to the traced tab by frame id
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameTreeSummarizer;

#[async_trait]
impl ComputedArtifact for FrameTreeSummarizer {
    const NAME: &'static str = "TraceOfTab";
    type Output = Arc<TraceOfTab>;

    async fn compute_(
        &self,
        trace: &Trace,
        _context: &AuditContext,
    ) -> Result<Arc<TraceOfTab>, MetricError> {
        summarize(trace.events()).map(Arc::new)
    }
}

/// Build the [`TraceOfTab`] for a chronologically ordered event list
pub fn summarize(events: &[TraceEvent]) -> Result<TraceOfTab, MetricError> {
    let tracing_started = events
        .iter()
        .find(|e| e.name == TRACING_STARTED_EVENT_NAME)
        .ok_or(MetricError::NoTracingStarted)?;

    let listed_frames = tracing_started
        .data()
        .and_then(|data| data.get("frames"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let main_frame_id = listed_frames
        .iter()
        .filter_map(frame_link)
        .find(|(_, parent)| parent.is_none())
        .map(|(frame, _)| frame.to_string())
        .ok_or(MetricError::NoMainFrame)?;

    info!("Main frame: {}", main_frame_id);

    let committed = events
        .iter()
        .filter(|e| e.name == FRAME_COMMITTED_EVENT_NAME)
        .filter_map(|e| e.data().and_then(frame_link_from_map));

    let mut parents: HashMap<&str, Option<&str>> = HashMap::new();
    for (frame, parent) in listed_frames.iter().filter_map(frame_link).chain(committed) {
        // A later commit without parent info shouldn't detach a known child
        let entry = parents.entry(frame).or_insert(parent);
        if parent.is_some() {
            *entry = parent;
        }
    }

    let tree = frame_tree(&main_frame_id, &parents);
    debug!("Frame tree has {} frame(s)", tree.len());

    let mut frame_tree_events: Vec<TraceEvent> = events
        .iter()
        .filter(|e| e.frame_id().is_some_and(|frame| tree.contains(frame)))
        .cloned()
        .collect();
    // Stable sort keeps emission order for equal timestamps
    frame_tree_events.sort_by(|a, b| a.ts.total_cmp(&b.ts));

    let mut frame_ids: Vec<String> = tree.into_iter().map(str::to_string).collect();
    frame_ids.sort();

    Ok(TraceOfTab {
        main_frame_id,
        frame_ids,
        frame_tree_events,
    })
}

fn frame_link(value: &Value) -> Option<(&str, Option<&str>)> {
    frame_link_from_map(value.as_object()?)
}

fn frame_link_from_map(data: &serde_json::Map<String, Value>) -> Option<(&str, Option<&str>)> {
    let frame = data.get("frame")?.as_str()?;
    let parent = data.get("parent").and_then(Value::as_str);
    Some((frame, parent))
}

/// Frames whose parent chain reaches `main_frame_id`
fn frame_tree<'a>(main_frame_id: &'a str, parents: &HashMap<&'a str, Option<&'a str>>) -> HashSet<&'a str> {
    let mut tree = HashSet::from([main_frame_id]);

    for &frame in parents.keys() {
        let mut chain = vec![frame];
        let mut current = frame;
        // Bounded walk so a malformed parent cycle can't spin forever
        for _ in 0..=parents.len() {
            if tree.contains(current) {
                tree.extend(chain);
                break;
            }
            match parents.get(current).copied().flatten() {
                Some(parent) => {
                    chain.push(parent);
                    current = parent;
                }
                None => break,
            }
        }
    }

    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn event(value: Value) -> TraceEvent {
        serde_json::from_value(value).unwrap()
    }

    fn tracing_started() -> TraceEvent {
        event(json!({
            "name": "TracingStartedInBrowser",
            "ts": 0.0,
            "args": {"data": {"frames": [
                {"frame": "MAIN", "url": "https://example.com"},
                {"frame": "CHILD", "parent": "MAIN"}
            ]}}
        }))
    }

    #[test]
    fn test_collects_main_and_child_frame_events_in_order() {
        let events = vec![
            tracing_started(),
            event(json!({"name": "B", "ts": 20.0, "args": {"frame": "CHILD"}})),
            event(json!({"name": "A", "ts": 10.0, "args": {"data": {"frame": "MAIN"}}})),
            event(json!({"name": "Other", "ts": 15.0, "args": {"frame": "OTHER_TAB"}})),
            event(json!({"name": "NoFrame", "ts": 16.0})),
        ];

        let tab = summarize(&events).unwrap();

        assert_eq!(tab.main_frame_id, "MAIN");
        assert_eq!(tab.frame_ids, vec!["CHILD".to_string(), "MAIN".to_string()]);
        let names: Vec<&str> = tab.frame_tree_events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_frames_committed_later_join_the_tree() {
        let events = vec![
            tracing_started(),
            event(json!({
                "name": "FrameCommittedInBrowser",
                "ts": 5.0,
                "args": {"data": {"frame": "GRANDCHILD", "parent": "CHILD"}}
            })),
            event(json!({"name": "Deep", "ts": 30.0, "args": {"frame": "GRANDCHILD"}})),
        ];

        let tab = summarize(&events).unwrap();
        assert!(tab.frame_ids.contains(&"GRANDCHILD".to_string()));
        // The commit event is itself attributed to the new frame
        let names: Vec<&str> = tab.frame_tree_events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["FrameCommittedInBrowser", "Deep"]);
    }

    #[test]
    fn test_data_frame_takes_precedence_over_args_frame() {
        let events = vec![
            tracing_started(),
            event(json!({
                "name": "LayoutShift",
                "ts": 10.0,
                "args": {"frame": "OTHER_TAB", "data": {"frame": "MAIN"}}
            })),
        ];

        let tab = summarize(&events).unwrap();
        assert_eq!(tab.frame_tree_events.len(), 1);
    }

    #[test]
    fn test_equal_timestamps_keep_emission_order() {
        let events = vec![
            tracing_started(),
            event(json!({"name": "first", "ts": 10.0, "args": {"frame": "MAIN"}})),
            event(json!({"name": "second", "ts": 10.0, "args": {"frame": "CHILD"}})),
        ];

        let tab = summarize(&events).unwrap();
        assert_eq!(tab.frame_tree_events[0].name, "first");
        assert_eq!(tab.frame_tree_events[1].name, "second");
    }

    #[test]
    fn test_parent_cycle_terminates() {
        let events = vec![
            tracing_started(),
            event(json!({"name": "FrameCommittedInBrowser", "args": {"data": {"frame": "X", "parent": "Y"}}})),
            event(json!({"name": "FrameCommittedInBrowser", "args": {"data": {"frame": "Y", "parent": "X"}}})),
        ];

        let tab = summarize(&events).unwrap();
        assert!(!tab.frame_ids.contains(&"X".to_string()));
    }

    #[test]
    fn test_missing_tracing_started() {
        let events = vec![event(json!({"name": "LayoutShift"}))];
        assert!(matches!(summarize(&events), Err(MetricError::NoTracingStarted)));
    }

    #[test]
    fn test_missing_main_frame() {
        let events = vec![event(json!({
            "name": "TracingStartedInBrowser",
            "args": {"data": {"frames": [{"frame": "CHILD", "parent": "GONE"}]}}
        }))];
        assert!(matches!(summarize(&events), Err(MetricError::NoMainFrame)));
    }
}
