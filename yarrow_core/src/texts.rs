//! Static text table and reading assembly.
//!
//! Every emitted line is assembled from looked-up constants plus computed
//! identifiers and positions; nothing here generates language.

use crate::reveal::{Reading, ReadingKind};
use crate::types::Cast;

/// Hexagram names in King Wen order (index 0 = hexagram 1).
pub const NAMES: [&str; 64] = [
    "The Creative",
    "The Receptive",
    "Difficulty at the Beginning",
    "Youthful Folly",
    "Waiting",
    "Conflict",
    "The Army",
    "Holding Together",
    "The Taming Power of the Small",
    "Treading",
    "Peace",
    "Standstill",
    "Fellowship",
    "Possession in Great Measure",
    "Modesty",
    "Enthusiasm",
    "Following",
    "Work on the Spoiled",
    "Approach",
    "Contemplation",
    "Biting Through",
    "Grace",
    "Splitting Apart",
    "Return",
    "Innocence",
    "The Taming Power of the Great",
    "The Corners of the Mouth",
    "Preponderance of the Great",
    "The Abysmal",
    "The Clinging",
    "Influence",
    "Duration",
    "Retreat",
    "The Power of the Great",
    "Progress",
    "Darkening of the Light",
    "The Family",
    "Opposition",
    "Obstruction",
    "Deliverance",
    "Decrease",
    "Increase",
    "Breakthrough",
    "Coming to Meet",
    "Gathering Together",
    "Pushing Upward",
    "Oppression",
    "The Well",
    "Revolution",
    "The Cauldron",
    "The Arousing",
    "Keeping Still",
    "Development",
    "The Marrying Maiden",
    "Abundance",
    "The Wanderer",
    "The Gentle",
    "The Joyous",
    "Dispersion",
    "Limitation",
    "Inner Truth",
    "Preponderance of the Small",
    "After Completion",
    "Before Completion",
];

/// One-line commentary per hexagram, in King Wen order.
pub const APHORISMS: [&str; 64] = [
    "heaven moves with strength; act without pause",
    "the earth carries all things; yield and sustain",
    "sprouting through hard ground; persist in the tangle",
    "the spring wells up at the mountain's foot; ask once, then listen",
    "clouds gather but no rain falls; nourish yourself and wait",
    "heaven and water go opposite ways; do not force the quarrel",
    "water hides under the earth; order the multitude with discipline",
    "waters flow together on the plain; hold to the center",
    "wind crosses heaven; small restraints prepare great work",
    "tread on the tiger's tail with care and it does not bite",
    "heaven and earth unite; the small departs, the great arrives",
    "heaven and earth do not meet; withdraw into stillness",
    "fire rises to heaven; companions gather in the open",
    "fire in heaven above; possession asks for humility",
    "the mountain hides within the earth; carry fullness lightly",
    "thunder comes out of the earth; readiness gladdens the many",
    "thunder rests in the lake; follow what is timely",
    "wind at the mountain's foot; repair what was let rot",
    "the earth opens above the lake; approach with care",
    "wind moves over the earth; observe before you act",
    "thunder and lightning together; bite through the obstruction",
    "fire lights the mountain's base; adorn only what is sound",
    "the mountain rests on thin earth; do not prop the collapsing",
    "thunder stirs within the earth; the turning point has come",
    "thunder rolls under heaven; move without contrivance",
    "heaven held within the mountain; store force for the crossing",
    "thunder below the mountain; watch what feeds you",
    "the lake rises over the trees; stand alone without fear",
    "water flows on and fills the deeps; danger teaches constancy",
    "brightness doubled; what clings must also tend its flame",
    "the lake rests on the mountain; influence begins in stillness",
    "thunder and wind endure together; stand firm in the long road",
    "the mountain under heaven; retreat is not flight",
    "thunder over heaven; great strength asks for right measure",
    "the sun rises over the earth; advance and be seen",
    "light sinks into the earth; guard the inner flame",
    "wind issues from fire; the household orders the world",
    "fire above, the lake below; turned apart yet paired",
    "water on the mountain; the path bends around the cliff",
    "thunder breaks the rain; loosen what was knotted",
    "the lake below the mountain gives up its vapor; lessen and be light",
    "wind and thunder increase each other; give what enlarges",
    "the lake rises to heaven; announce the breach plainly",
    "wind under heaven; meet what comes toward you",
    "the lake gathers on the earth; assemble around the center",
    "wood grows within the earth; ascend step by step",
    "the lake drains away; stay true in exhaustion",
    "water over wood; the well stays where the town moves",
    "fire in the lake; molt when the season turns",
    "fire over wood; the vessel transforms what it holds",
    "thunder repeats; shock ends in laughter",
    "mountain joined to mountain; rest where rest is due",
    "the tree on the mountain grows slowly; advance by degrees",
    "thunder over the lake; enter as the younger, not the chief",
    "thunder and lightning at the zenith; fullness does not linger",
    "fire on the mountain; the stranger stays courteous and brief",
    "wind follows wind; penetrate by gentleness",
    "lake answers lake; joy shared is joy doubled",
    "wind disperses the water; dissolve what divides",
    "water held by the lake's banks; set limits and keep them",
    "wind stirs the lake's surface; truth reaches even pigs and fishes",
    "thunder on the mountain; the small bird should not fly high",
    "water over fire; after the crossing, tend the embers",
    "fire over water; the crossing is not yet made",
];

/// Hexagram name for a canonical identifier.
pub fn name(id: u8) -> &'static str {
    NAMES[(id - 1) as usize]
}

fn kind_label(reading: &Reading, cast: &Cast) -> Option<&'static str> {
    match reading.kind {
        ReadingKind::Primary => None,
        ReadingKind::Nuclear => Some("nuclear"),
        // a locked pair collapses mirror and shadow into one reading
        ReadingKind::Shadow if cast.locked_pair => Some("mirror-and-shadow"),
        ReadingKind::Shadow => Some("shadow"),
        ReadingKind::Mirror if cast.locked_pair => Some("mirror-and-shadow"),
        ReadingKind::Mirror => Some("mirror"),
        ReadingKind::SelfMirror => Some("mirror turned back on itself"),
        ReadingKind::Becoming => Some("becoming"),
    }
}

/// Assemble the single output line for a reading.
pub fn render(cast: &Cast, reading: &Reading) -> String {
    let idx = (reading.id - 1) as usize;
    let mut out = String::new();

    if let Some(label) = kind_label(reading, cast) {
        out.push_str(label);
        out.push_str(" \u{b7} ");
    }

    out.push_str(&format!(
        "{} {} \u{b7} {}: {}",
        reading.id,
        NAMES[idx],
        reading.style.label(),
        APHORISMS[idx]
    ));

    if reading.kind == ReadingKind::Becoming && !cast.changing_positions.is_empty() {
        let positions: Vec<String> = cast
            .changing_positions
            .iter()
            .map(|p| p.to_string())
            .collect();
        out.push_str(&format!(" (changing lines {})", positions.join(", ")));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::derive_cast;
    use crate::reveal::Style;
    use crate::types::Line;

    #[test]
    fn test_tables_cover_all_identifiers() {
        assert_eq!(NAMES.len(), 64);
        assert_eq!(APHORISMS.len(), 64);
        for id in 1u8..=64 {
            assert!(!name(id).is_empty());
        }
    }

    #[test]
    fn test_render_primary_has_no_kind_label() {
        let cast = derive_cast([Line::YoungYang; 6]);
        let line = render(
            &cast,
            &Reading {
                kind: ReadingKind::Primary,
                id: cast.primary,
                style: Style::Image,
            },
        );
        assert!(line.starts_with("1 The Creative"));
        assert!(line.contains("the image says"));
    }

    #[test]
    fn test_render_derived_carries_kind_label() {
        let cast = derive_cast([Line::YoungYang; 6]);
        let line = render(
            &cast,
            &Reading {
                kind: ReadingKind::Nuclear,
                id: cast.nuclear,
                style: Style::Counsel,
            },
        );
        assert!(line.starts_with("nuclear \u{b7} "));
        assert!(line.contains("the counsel says"));
    }

    #[test]
    fn test_render_self_mirror_uses_primary_text() {
        let cast = derive_cast([Line::YoungYang; 6]);
        assert!(cast.self_mirroring);
        let line = render(
            &cast,
            &Reading {
                kind: ReadingKind::SelfMirror,
                id: cast.primary,
                style: Style::Image,
            },
        );
        assert!(line.starts_with("mirror turned back on itself \u{b7} 1 The Creative"));
    }

    #[test]
    fn test_render_locked_pair_unifies_mirror_and_shadow() {
        // Peace (11): mirror == shadow == 12
        let lines = [
            Line::YoungYang,
            Line::YoungYang,
            Line::YoungYang,
            Line::YoungYin,
            Line::YoungYin,
            Line::YoungYin,
        ];
        let cast = derive_cast(lines);
        assert!(cast.locked_pair);
        for kind in [ReadingKind::Mirror, ReadingKind::Shadow] {
            let line = render(
                &cast,
                &Reading {
                    kind,
                    id: cast.mirror,
                    style: Style::Omen,
                },
            );
            assert!(line.starts_with("mirror-and-shadow \u{b7} 12 Standstill"));
        }
    }

    #[test]
    fn test_render_becoming_lists_changing_positions() {
        let mut lines = [Line::YoungYin; 6];
        lines[0] = Line::OldYin;
        lines[3] = Line::OldYin;
        let cast = derive_cast(lines);
        let line = render(
            &cast,
            &Reading {
                kind: ReadingKind::Becoming,
                id: cast.becoming.unwrap(),
                style: Style::Movement,
            },
        );
        assert!(line.starts_with("becoming \u{b7} "));
        assert!(line.ends_with("(changing lines 1, 4)"));
    }
}
