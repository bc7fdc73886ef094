//! Async runtime tests: session workers, connections and the room directory.

use std::time::Duration;

use tabletop_sync::core::{ConnectionId, Rejection, SeatIndex, SessionConfig, SessionError, SessionRng};
use tabletop_sync::runtime::{Connection, SessionDirectory, SessionHandle};
use tabletop_sync::sync::{Command, ServerEvent};
use tabletop_sync::table::TokenKind;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(2);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("tabletop_sync=debug")
        .with_test_writer()
        .try_init();
}

async fn next(connection: &mut Connection) -> ServerEvent {
    timeout(WAIT, connection.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event stream ended")
}

/// Receive until `pick` matches, returning the match.
async fn wait_for<T>(connection: &mut Connection, mut pick: impl FnMut(&ServerEvent) -> Option<T>) -> T {
    loop {
        let event = next(connection).await;
        if let Some(found) = pick(&event) {
            return found;
        }
    }
}

/// Connecting yields a seat and the initial snapshots in order.
#[tokio::test]
async fn test_connect_assigns_seats_and_snapshots() {
    init_tracing();
    let handle = SessionHandle::spawn(SessionConfig::default(), SessionRng::new(1));

    let mut p1 = handle.connect(ConnectionId::from_u128(1)).await.unwrap();
    assert_eq!(p1.seat(), Some(SeatIndex::new(1)));
    assert_eq!(next(&mut p1).await, ServerEvent::SeatAssigned(SeatIndex::new(1)));
    assert!(matches!(next(&mut p1).await, ServerEvent::TableUpdated(t) if t.is_empty()));

    let mut kinds = Vec::new();
    for _ in 0..3 {
        match next(&mut p1).await {
            ServerEvent::TokensUpdated { kind, .. } => kinds.push(kind),
            other => panic!("expected tokens-updated, got {}", other.name()),
        }
    }
    assert_eq!(kinds, TokenKind::ALL.to_vec());
    assert_eq!(
        next(&mut p1).await,
        ServerEvent::SupplyUpdated { standard: 44, special: 10 }
    );
}

/// Hand contents reach only their owner; table changes reach everyone.
#[tokio::test]
async fn test_draw_reaches_owner_only() {
    init_tracing();
    let handle = SessionHandle::spawn(SessionConfig::default(), SessionRng::new(2));
    let mut p1 = handle.connect(ConnectionId::from_u128(1)).await.unwrap();
    let mut p2 = handle.connect(ConnectionId::from_u128(2)).await.unwrap();

    p1.send(Command::DrawStandard).unwrap();
    let hand = wait_for(&mut p1, |e| match e {
        ServerEvent::HandUpdated(cards) => Some(cards.clone()),
        _ => None,
    })
    .await;
    assert_eq!(hand.len(), 1);

    let counts = wait_for(&mut p2, |e| match e {
        ServerEvent::HandCountUpdated(counts) if counts[0].count > 0 => Some(counts.clone()),
        ServerEvent::HandUpdated(_) => panic!("hand leaked to another participant"),
        _ => None,
    })
    .await;
    assert_eq!(counts[0].count, 1);
    assert_eq!(counts[1].count, 0);

    // The drawn card can be played and both see it.
    p1.send(Command::PlayCard { card: hand[0].clone(), x: 100.0, y: 150.0 }).unwrap();
    for connection in [&mut p1, &mut p2] {
        let table = wait_for(connection, |e| match e {
            ServerEvent::TableUpdated(t) => Some(t.clone()),
            _ => None,
        })
        .await;
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].card, hand[0]);
    }
}

/// A third connection gets room-full followed by a closed stream.
#[tokio::test]
async fn test_third_connection_gets_room_full() {
    init_tracing();
    let handle = SessionHandle::spawn(SessionConfig::default(), SessionRng::new(3));
    let _p1 = handle.connect(ConnectionId::from_u128(1)).await.unwrap();
    let _p2 = handle.connect(ConnectionId::from_u128(2)).await.unwrap();

    let mut p3 = handle.connect(ConnectionId::from_u128(3)).await.unwrap();
    assert_eq!(p3.seat(), None);
    assert!(!p3.is_seated());
    assert_eq!(next(&mut p3).await, ServerEvent::RoomFull);
    assert_eq!(timeout(WAIT, p3.recv()).await.unwrap(), None);

    let refused = handle.connect_seated(ConnectionId::from_u128(4)).await;
    assert!(matches!(
        refused,
        Err(SessionError::Rejected(Rejection::RoomFull))
    ));
}

/// Both `leave` and dropping a connection free its seat, and seats are never reused.
#[tokio::test]
async fn test_leave_and_drop_release_seats() {
    init_tracing();
    let handle = SessionHandle::spawn(SessionConfig::default(), SessionRng::new(4));
    let p1 = handle.connect(ConnectionId::from_u128(1)).await.unwrap();
    let p2 = handle.connect(ConnectionId::from_u128(2)).await.unwrap();

    assert_eq!(p1.leave().await.unwrap(), 1);

    let p3 = handle.connect(ConnectionId::from_u128(3)).await.unwrap();
    assert_eq!(p3.seat(), Some(SeatIndex::new(3)));

    drop(p2);
    let p4 = handle.connect(ConnectionId::from_u128(4)).await.unwrap();
    assert_eq!(p4.seat(), Some(SeatIndex::new(4)));
}

/// Cards held by a departing participant do not go back to the supply.
#[tokio::test]
async fn test_departed_hand_is_not_returned() {
    init_tracing();
    let handle = SessionHandle::spawn(SessionConfig::default(), SessionRng::new(5));
    let p1 = handle.connect(ConnectionId::from_u128(1)).await.unwrap();
    let mut p2 = handle.connect(ConnectionId::from_u128(2)).await.unwrap();

    for _ in 0..3 {
        p1.send(Command::DrawStandard).unwrap();
    }
    p1.leave().await.unwrap();

    // Supply snapshots after the departure still show the hand missing.
    p2.send(Command::DrawStandard).unwrap();
    let hand = wait_for(&mut p2, |e| match e {
        ServerEvent::HandUpdated(cards) => Some(cards.clone()),
        _ => None,
    })
    .await;
    assert_eq!(hand.len(), 1);
    let standard = wait_for(&mut p2, |e| match e {
        ServerEvent::SupplyUpdated { standard, .. } => Some(*standard),
        _ => None,
    })
    .await;
    assert_eq!(standard, 44 - 3 - 1);
}

/// Rooms in one directory have separate sessions.
#[tokio::test]
async fn test_directory_rooms_are_independent() {
    init_tracing();
    let directory = SessionDirectory::new(SessionConfig::default());

    let mut a1 = directory.join("alpha").await.unwrap();
    let a2 = directory.join("alpha").await.unwrap();
    let mut b1 = directory.join("beta").await.unwrap();
    assert_eq!(directory.len(), 2);
    assert_eq!(a1.seat(), Some(SeatIndex::new(1)));
    assert_eq!(a2.seat(), Some(SeatIndex::new(2)));
    assert_eq!(b1.seat(), Some(SeatIndex::new(1)));

    a1.send(Command::DrawSpecial).unwrap();
    wait_for(&mut a1, |e| matches!(e, ServerEvent::HandUpdated(_)).then_some(())).await;

    // beta's supplies are untouched.
    b1.send(Command::DrawStandard).unwrap();
    let special = wait_for(&mut b1, |e| match e {
        ServerEvent::SupplyUpdated { standard: 43, special } => Some(*special),
        _ => None,
    })
    .await;
    assert_eq!(special, 10);
}

/// A room disappears once its last connection is gone.
#[tokio::test]
async fn test_directory_tears_down_empty_room() {
    init_tracing();
    let directory = SessionDirectory::new(SessionConfig::default());

    let a1 = directory.join("alpha").await.unwrap();
    let a2 = directory.join("alpha").await.unwrap();
    let refused = directory.join("alpha").await.unwrap();
    assert_eq!(refused.seat(), None);
    drop(refused);
    assert!(directory.contains("alpha"));

    a1.leave().await.unwrap();
    assert!(directory.contains("alpha"));
    drop(a2);
    assert!(!directory.contains("alpha"));
    assert!(directory.is_empty());

    // Rejoining starts a fresh session.
    let again = directory.join("alpha").await.unwrap();
    assert_eq!(again.seat(), Some(SeatIndex::new(1)));
}

/// A second connect under a live connection's id is refused and leaves the
/// first connection's stream and seat intact.
#[tokio::test]
async fn test_duplicate_connection_id_is_refused() {
    init_tracing();
    let handle = SessionHandle::spawn(SessionConfig::default(), SessionRng::new(6));
    let mut first = handle.connect(ConnectionId::from_u128(1)).await.unwrap();

    let mut duplicate = handle.connect(ConnectionId::from_u128(1)).await.unwrap();
    assert_eq!(duplicate.seat(), None);
    assert_eq!(duplicate.refusal(), Some(Rejection::AlreadyConnected));
    assert!(!duplicate.is_seated());
    assert_eq!(timeout(WAIT, duplicate.recv()).await.unwrap(), None);

    // Dropping the refused duplicate must not release the shared seat.
    drop(duplicate);

    first.send(Command::DrawStandard).unwrap();
    let hand = wait_for(&mut first, |e| match e {
        ServerEvent::HandUpdated(cards) => Some(cards.len()),
        _ => None,
    })
    .await;
    assert_eq!(hand, 1);
    assert!(first.is_seated());

    // Seat 1 is still held: one more participant fits, the next does not.
    let second = handle.connect(ConnectionId::from_u128(2)).await.unwrap();
    assert_eq!(second.seat(), Some(SeatIndex::new(2)));
    let third = handle.connect(ConnectionId::from_u128(3)).await.unwrap();
    assert_eq!(third.refusal(), Some(Rejection::RoomFull));

    let again = handle.connect_seated(ConnectionId::from_u128(1)).await;
    assert!(matches!(
        again,
        Err(SessionError::Rejected(Rejection::AlreadyConnected))
    ));
}

/// Leaving on a refused connection reports the refusal, not a dead worker.
#[tokio::test]
async fn test_leave_after_refusal_reports_room_full() {
    init_tracing();
    let handle = SessionHandle::spawn(SessionConfig::default(), SessionRng::new(7));
    let _p1 = handle.connect(ConnectionId::from_u128(1)).await.unwrap();
    let _p2 = handle.connect(ConnectionId::from_u128(2)).await.unwrap();

    let refused = handle.connect(ConnectionId::from_u128(3)).await.unwrap();
    assert!(matches!(
        refused.leave().await,
        Err(SessionError::Rejected(Rejection::RoomFull))
    ));
    assert!(handle.is_running());
}
