//! Property tests over random command sequences.
//!
//! Whatever participants send, in whatever order, every card identifier
//! stays in exactly one place and snapshots go only where they belong.

use std::collections::HashSet;

use proptest::prelude::*;
use tabletop_sync::cards::{Card, Namespace};
use tabletop_sync::core::{ConnectionId, SessionConfig, SessionRng};
use tabletop_sync::sync::{Broadcaster, Command, Delivery, Inbound, ServerEvent};
use tabletop_sync::table::{PlacementId, TokenKind};

#[derive(Clone, Debug)]
enum Step {
    Admit(u8),
    Release(u8),
    Send(u8, Command),
}

fn connection(n: u8) -> ConnectionId {
    ConnectionId::from_u128(u128::from(n) + 1)
}

fn arb_card() -> impl Strategy<Value = Card> {
    prop_oneof![
        3 => (1u32..=44).prop_map(|n| Card::numbered(Namespace::Standard, n)),
        1 => (1u32..=10).prop_map(|n| Card::numbered(Namespace::Special, n)),
        1 => Just(Card::from("not-a-card")),
    ]
}

fn arb_kind() -> impl Strategy<Value = TokenKind> {
    prop_oneof![Just(TokenKind::Dot), Just(TokenKind::Hex), Just(TokenKind::Square)]
}

fn arb_command() -> impl Strategy<Value = Command> {
    let coord = -50.0f64..550.0;
    prop_oneof![
        4 => Just(Command::DrawStandard),
        2 => Just(Command::DrawSpecial),
        1 => Just(Command::ShuffleStandard),
        1 => Just(Command::ShuffleSpecial),
        4 => (arb_card(), coord.clone(), coord.clone())
            .prop_map(|(card, x, y)| Command::PlayCard { card, x, y }),
        2 => (0usize..8, coord.clone(), coord.clone())
            .prop_map(|(index, x, y)| Command::MoveTableCard { index, x, y }),
        1 => (0u64..8, coord.clone(), coord.clone())
            .prop_map(|(id, x, y)| Command::MovePlacement { id: PlacementId(id), x, y }),
        2 => arb_card().prop_map(|card| Command::ReturnCardFromHand { card }),
        2 => (0usize..8, arb_card())
            .prop_map(|(index, card)| Command::ReturnCardFromTable { index, card }),
        1 => (0u64..8, arb_card())
            .prop_map(|(id, card)| Command::ReturnPlacement { id: PlacementId(id), card }),
        1 => (arb_kind(), 0usize..30, coord.clone(), coord)
            .prop_map(|(kind, index, x, y)| Command::MoveToken { kind, index, x, y }),
        1 => (arb_kind(), 0usize..30, -5i32..30)
            .prop_map(|(kind, index, value)| Command::UpdateToken { kind, index, value }),
        1 => (arb_kind(), 0usize..30).prop_map(|(kind, index)| Command::RollToken { kind, index }),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        2 => (0u8..4).prop_map(Step::Admit),
        1 => (0u8..4).prop_map(Step::Release),
        12 => (0u8..4, arb_command()).prop_map(|(n, c)| Step::Send(n, c)),
    ]
}

fn inbound(step: Step) -> Inbound {
    match step {
        Step::Admit(n) => Inbound::Admit(connection(n)),
        Step::Release(n) => Inbound::Release(connection(n)),
        Step::Send(n, command) => Inbound::Command { from: connection(n), command },
    }
}

/// Every card of both namespaces, each in exactly one store.
fn assert_partition(b: &Broadcaster) {
    let session = b.session();
    let mut seen: HashSet<Card> = HashSet::new();
    let all = session
        .supplies()
        .get(Namespace::Standard)
        .cards()
        .iter()
        .chain(session.supplies().get(Namespace::Special).cards())
        .chain(session.hands().cards())
        .chain(session.table().placements.iter().map(|p| &p.card))
        .chain(session.dropped());
    for card in all {
        assert!(card.is_valid(), "{card} is not a dealt identifier");
        assert!(seen.insert(card.clone()), "{card} appears twice");
    }
    assert_eq!(seen.len(), Namespace::Standard.size() + Namespace::Special.size());
    assert!(session.audit().is_conserved());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// No command sequence can duplicate, lose, or invent a card.
    #[test]
    fn prop_cards_are_conserved(seed in any::<u64>(), steps in prop::collection::vec(arb_step(), 0..120)) {
        let mut b = Broadcaster::new(SessionConfig::default(), SessionRng::new(seed));
        assert_partition(&b);

        for step in steps {
            b.apply(inbound(step));
            assert_partition(&b);
            prop_assert!(b.session().registry().len() <= 2);
        }
    }

    /// Hand contents never reach anyone but the hand's owner.
    #[test]
    fn prop_hands_stay_private(seed in any::<u64>(), steps in prop::collection::vec(arb_step(), 0..80)) {
        let mut b = Broadcaster::new(SessionConfig::default(), SessionRng::new(seed));

        for step in steps {
            let sender = match &step {
                Step::Admit(n) | Step::Release(n) | Step::Send(n, _) => connection(*n),
            };
            let outcome = b.apply(inbound(step));
            for out in &outcome.outbox {
                if let ServerEvent::HandUpdated(cards) = &out.event {
                    prop_assert_eq!(out.delivery, Delivery::To(sender));
                    let held = b.session().hands().hand(sender).unwrap_or(&[]);
                    prop_assert_eq!(cards.as_slice(), held);
                }
            }
        }
    }

    /// Rejected commands leave no trace in the outbox.
    #[test]
    fn prop_rejections_are_silent(seed in any::<u64>(), steps in prop::collection::vec(arb_step(), 0..80)) {
        let mut b = Broadcaster::new(SessionConfig::default(), SessionRng::new(seed));

        for step in steps {
            let outcome = b.apply(inbound(step));
            if let Some(rejection) = outcome.rejection {
                if rejection == tabletop_sync::core::Rejection::RoomFull {
                    prop_assert_eq!(outcome.outbox.len(), 1);
                } else {
                    prop_assert!(outcome.outbox.is_empty());
                }
            }
        }
    }

    /// Shuffling keeps the same cards in a supply.
    #[test]
    fn prop_shuffle_is_a_permutation(seed in any::<u64>(), shuffles in 1usize..6) {
        let mut b = Broadcaster::new(SessionConfig::default(), SessionRng::new(seed));
        let host = connection(0);
        b.admit(host);

        let mut before: Vec<Card> = b.session().supplies().get(Namespace::Standard).cards().to_vec();
        for _ in 0..shuffles {
            b.command(host, Command::ShuffleStandard);
        }
        let mut after: Vec<Card> = b.session().supplies().get(Namespace::Standard).cards().to_vec();

        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }
}
