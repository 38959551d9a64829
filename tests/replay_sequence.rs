//! Replay ordering, pacing, and cancellation through the facade

use pathboard::{EdgeKey, NodeId, Pathboard, Position, VisualEvent};
use std::time::Duration;

fn triangle_board(step_delay: Duration) -> (Pathboard, [NodeId; 3]) {
    let board = Pathboard::with_step_delay(step_delay);
    let a = board.add_node(Position::new(0.0, 0.0));
    let b = board.add_node(Position::new(10.0, 0.0));
    let c = board.add_node(Position::new(5.0, 10.0));
    board.add_edge(a, b, 1).unwrap();
    board.add_edge(b, c, 1).unwrap();
    board.add_edge(a, c, 5).unwrap();
    board.set_start(a).unwrap();
    board.set_end(c).unwrap();
    (board, [a, b, c])
}

async fn collect(handle: &mut pathboard::ReplayHandle) -> Vec<VisualEvent> {
    let mut events = Vec::new();
    while let Some(event) = handle.next().await {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn replay_emits_visits_then_path_then_completed() {
    let (board, [a, b, c]) = triangle_board(Duration::from_millis(1));
    let mut handle = board.run().unwrap();

    let events = collect(&mut handle).await;
    assert_eq!(
        events,
        vec![
            VisualEvent::MarkVisited { node: b },
            VisualEvent::HighlightEdge {
                edge: EdgeKey::new(a, b)
            },
            VisualEvent::HighlightEdge {
                edge: EdgeKey::new(b, c)
            },
            VisualEvent::Completed { found: true },
        ]
    );
}

#[tokio::test]
async fn replay_without_a_path_reports_not_found() {
    let board = Pathboard::with_step_delay(Duration::from_millis(1));
    let a = board.add_node(Position::default());
    let b = board.add_node(Position::default());
    let island = board.add_node(Position::default());
    board.add_edge(a, b, 1).unwrap();
    board.set_start(a).unwrap();
    board.set_end(island).unwrap();

    let mut handle = board.run().unwrap();
    let events = collect(&mut handle).await;

    // Node b is explored before the frontier drains.
    assert_eq!(
        events,
        vec![
            VisualEvent::MarkVisited { node: b },
            VisualEvent::Completed { found: false },
        ]
    );
}

#[tokio::test]
async fn events_respect_the_step_delay() {
    let delay = Duration::from_millis(25);
    let (board, _) = triangle_board(delay);
    let mut handle = board.run().unwrap();

    let started = tokio::time::Instant::now();
    let events = collect(&mut handle).await;
    assert_eq!(events.len(), 4);
    // Three gaps between four events.
    assert!(started.elapsed() >= delay * 3);
}

#[tokio::test]
async fn new_run_cancels_the_pending_replay() {
    let (board, _) = triangle_board(Duration::from_millis(40));
    let mut stale = board.run().unwrap();
    let first = stale.next().await;
    assert!(first.is_some());

    let mut fresh = board.run().unwrap();
    assert!(stale.is_cancelled());
    assert_eq!(stale.next().await, None);

    // The fresh run plays out in full.
    let events = collect(&mut fresh).await;
    assert_eq!(events.len(), 4);
}

#[tokio::test]
async fn reset_stops_the_replay() {
    let (board, _) = triangle_board(Duration::from_millis(40));
    let mut handle = board.run().unwrap();
    handle.next().await;

    board.reset();

    assert_eq!(handle.next().await, None);
    assert_eq!(board.node_count(), 0);
}

#[tokio::test]
async fn source_equals_target_completes_immediately() {
    let board = Pathboard::with_step_delay(Duration::from_millis(1));
    let a = board.add_node(Position::default());
    board.set_start(a).unwrap();
    board.set_end(a).unwrap();

    let mut handle = board.run().unwrap();
    let events = collect(&mut handle).await;
    assert_eq!(events, vec![VisualEvent::Completed { found: true }]);
}
