//! Scroll-triggered "drawing" entrance for content cards

use crate::dom::{Dom, NodeId};

/// Cards that animate in when scrolled into view
pub const CARD_SELECTORS: [&str; 4] = [".skill-card", ".project-entry", ".stats-grid", ".frame-container"];

/// Marks a card as waiting for its entrance
pub const PENDING_CLASS: &str = "draw-anim";
/// Marks a card as revealed; never removed
pub const VISIBLE_CLASS: &str = "visible";

/// Tag every card for animation; returns the cards to observe
pub fn tag_cards(dom: &mut dyn Dom) -> Vec<NodeId> {
    let mut cards: Vec<NodeId> = Vec::new();
    for selector in CARD_SELECTORS {
        for node in dom.query_all(selector) {
            if !cards.contains(&node) {
                cards.push(node);
            }
        }
    }
    for &card in &cards {
        dom.add_class(card, PENDING_CLASS);
    }
    cards
}

/// Intersection observer callback for one card
pub fn on_intersection(dom: &mut dyn Dom, card: NodeId, intersecting: bool) {
    if intersecting {
        dom.add_class(card, VISIBLE_CLASS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    #[test]
    fn test_tag_cards_once_each() {
        let mut dom = MemoryDom::portfolio();
        let cards = tag_cards(&mut dom);

        // 2 skill cards, 1 stats grid, 2 project entries (one also a frame container)
        assert_eq!(cards.len(), 5);
        for card in &cards {
            assert!(dom.has_class(*card, PENDING_CLASS));
            assert!(!dom.has_class(*card, VISIBLE_CLASS));
        }
        let tagged = dom.classes(cards[3]).iter().filter(|c| *c == PENDING_CLASS).count();
        assert_eq!(tagged, 1);
    }

    #[test]
    fn test_visible_is_permanent() {
        let mut dom = MemoryDom::portfolio();
        let cards = tag_cards(&mut dom);
        let card = cards[0];

        on_intersection(&mut dom, card, false);
        assert!(!dom.has_class(card, VISIBLE_CLASS));

        on_intersection(&mut dom, card, true);
        on_intersection(&mut dom, card, false);
        on_intersection(&mut dom, card, true);
        assert!(dom.has_class(card, VISIBLE_CLASS));
        assert_eq!(dom.classes(card).iter().filter(|c| *c == VISIBLE_CLASS).count(), 1);
    }
}
