// Copyright 2026 Daniel Pelikan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Built-in squad-command catalog.
//!
//! Keys follow the in-game command menus: the first digit opens a menu, the
//! second picks the entry. Subjects select units with F1-F10, or the whole
//! squad with the grave key.

use tracing::debug;

use super::{Command, CommandRegistry};
use crate::error::Result;
use crate::grammar::{Grammar, GrammarAssembler, Slot};
use crate::input::{key_presses, KeyCode};

use KeyCode::*;

/// Rule id of the subject slot.
pub const SUBJECT_RULE: &str = "subject";

struct Entry {
    tag: &'static str,
    phrases: &'static [&'static str],
    keys: &'static [KeyCode],
}

struct DirectObjectDef {
    name: &'static str,
    entries: &'static [Entry],
}

struct CommandDef {
    id: &'static str,
    phrases: &'static [&'static str],
    keys: &'static [KeyCode],
    /// Whether the order can be given to selected units.
    addressed: bool,
    direct_object: Option<&'static DirectObjectDef>,
}

const fn entry(
    tag: &'static str,
    phrases: &'static [&'static str],
    keys: &'static [KeyCode],
) -> Entry {
    Entry { tag, phrases, keys }
}

const fn utility(
    id: &'static str,
    phrases: &'static [&'static str],
    keys: &'static [KeyCode],
) -> CommandDef {
    CommandDef {
        id,
        phrases,
        keys,
        addressed: false,
        direct_object: None,
    }
}

const fn order(
    id: &'static str,
    phrases: &'static [&'static str],
    keys: &'static [KeyCode],
) -> CommandDef {
    CommandDef {
        id,
        phrases,
        keys,
        addressed: true,
        direct_object: None,
    }
}

const fn order_with(
    id: &'static str,
    phrases: &'static [&'static str],
    keys: &'static [KeyCode],
    direct_object: &'static DirectObjectDef,
) -> CommandDef {
    CommandDef {
        id,
        phrases,
        keys,
        addressed: true,
        direct_object: Some(direct_object),
    }
}

const SUBJECTS: &[Entry] = &[
    entry("ONE", &["one", "unit one"], &[F1]),
    entry("TWO", &["two", "unit two"], &[F2]),
    entry("THREE", &["three", "unit three"], &[F3]),
    entry("FOUR", &["four", "unit four"], &[F4]),
    entry("FIVE", &["five", "unit five"], &[F5]),
    entry("SIX", &["six", "unit six"], &[F6]),
    entry("SEVEN", &["seven", "unit seven"], &[F7]),
    entry("EIGHT", &["eight", "unit eight"], &[F8]),
    entry("NINE", &["nine", "unit nine"], &[F9]),
    entry("TEN", &["ten", "unit ten"], &[F10]),
    entry(
        "ALL",
        &["all", "all units", "everyone", "everybody", "squad"],
        &[Grave],
    ),
];

const DIRECTIONS: DirectObjectDef = DirectObjectDef {
    name: "directionDO",
    entries: &[
        entry("NORTH", &["north"], &[One]),
        entry("NORTHEAST", &["north east"], &[Two]),
        entry("EAST", &["east"], &[Three]),
        entry("SOUTHEAST", &["south east"], &[Four]),
        entry("SOUTH", &["south"], &[Five]),
        entry("SOUTHWEST", &["south west"], &[Six]),
        entry("WEST", &["west"], &[Seven]),
        entry("NORTHWEST", &["north west"], &[Eight]),
    ],
};

const TEAMS: DirectObjectDef = DirectObjectDef {
    name: "teamDO",
    entries: &[
        entry("RED", &["team red", "red"], &[One]),
        entry("GREEN", &["team green", "green"], &[Two]),
        entry("BLUE", &["team blue", "blue"], &[Three]),
        entry("YELLOW", &["team yellow", "yellow"], &[Four]),
        entry("WHITE", &["team white", "white"], &[Five]),
    ],
};

const COMMANDS: &[CommandDef] = &[
    // Utilities
    utility(
        "MAP",
        &["map", "toggle map", "show map", "hide map", "open map", "close map"],
        &[M],
    ),
    utility(
        "INVENTORY",
        &[
            "inventory",
            "toggle inventory",
            "show inventory",
            "hide inventory",
            "open inventory",
            "close inventory",
        ],
        &[I],
    ),
    utility(
        "LIGHTS",
        &["lights", "light", "flashlight", "torch", "laser"],
        &[L],
    ),
    // Move (1)
    order(
        "FORMUP",
        &[
            "return to formation",
            "form up",
            "fallback",
            "fall back",
            "regroup",
            "join up",
            "rally on me",
            "rally to me",
            "with me",
        ],
        &[One, One],
    ),
    order("ADVANCE", &["advance", "move up"], &[One, Two]),
    order("STAYBACK", &["stay back", "go back", "back up"], &[One, Three]),
    order("FLANKLEFT", &["flank left", "go left"], &[One, Four]),
    order("FLANKRIGHT", &["flank right", "go right"], &[One, Five]),
    order(
        "STOP",
        &["stop", "hold position", "halt", "stay there", "stay here", "stay put"],
        &[One, Six],
    ),
    order("WAIT", &["wait for me", "wait up", "wait"], &[One, Seven]),
    order(
        "COVER",
        &[
            "go for cover",
            "look for cover",
            "cover",
            "find cover",
            "get to cover",
            "hide",
            "take cover",
        ],
        &[One, Eight],
    ),
    order(
        "NEXTWAYPOINT",
        &["next waypoint", "go to the next waypoint"],
        &[One, Nine],
    ),
    order("MOVETO", &["move to", "move", "move there", "move up"], &[Space]),
    // Target (2)
    order(
        "OPENTARGET",
        &["show targets", "target menu", "open target menu", "targets"],
        &[Two],
    ),
    order(
        "CANCELTARGET",
        &["cancel target", "cancel targets", "no target"],
        &[Two, One],
    ),
    // Engage (3)
    order("OPENFIRE", &["open fire", "go loud", "fire at will"], &[Three, One]),
    order("HOLDFIRE", &["hold fire", "go quiet", "cease fire"], &[Three, Two]),
    order("FIRE", &["fire", "take the shot"], &[Three, Three]),
    order("ENGAGE", &["engage", "move to engage"], &[Three, Four]),
    order("ENGAGEATWILL", &["engage at will"], &[Three, Five]),
    order("DISENGAGE", &["disengage"], &[Three, Six]),
    order(
        "SCANHORIZON",
        &["scan horizon", "scan the horizon"],
        &[Three, Seven],
    ),
    order_with("WATCH", &["watch", "watch the"], &[Three, Eight], &DIRECTIONS),
    order("SUPPRESS", &["suppressive fire", "suppress"], &[Three, Nine]),
    // Mount (4)
    order(
        "OPENMOUNT",
        &[
            "show mount menu",
            "open mount menu",
            "show vehicles",
            "mount menu",
            "get in vehicle",
            "get in that vehicle",
        ],
        &[Four],
    ),
    order("DISMOUNT", &["dismount", "get out"], &[Four, One]),
    // Status (5)
    order(
        "LOWFUEL",
        &[
            "fuel low",
            "bingo fuel",
            "be advised bingo fuel",
            "be advised low fuel",
            "be advised fuel low",
        ],
        &[Five, Two],
    ),
    order(
        "LOWAMMO",
        &["I'm running low on ammo", "running low on ammo", "ammo low"],
        &[Five, Three],
    ),
    order(
        "INJURED",
        &[
            "I'm injured",
            "injured",
            "medic",
            "I need a medic",
            "I need some help",
            "I need some help now",
            "somebody help me",
            "wounded",
            "I'm hit",
            "fuck I'm hurt",
        ],
        &[Five, Four],
    ),
    order(
        "SITREP",
        &["report in over", "sitrep", "report status", "report in"],
        &[Five, Five],
    ),
    order(
        "UNDERFIRE",
        &["I'm under fire", "taking fire", "under fire", "enemy fire"],
        &[Five, Six],
    ),
    order(
        "HOSTILEDOWN",
        &[
            "hostile down",
            "target down",
            "scratch one",
            "he is down",
            "target neutralized",
            "tango down",
        ],
        &[Five, Seven],
    ),
    order(
        "KIA",
        &[
            "we have lost one",
            "man down",
            "he is hit",
            "shit we have got a man down",
            "we have got a man down",
        ],
        &[Five, Eight],
    ),
    // Action (6)
    order(
        "OPENACTION",
        &[
            "show actions",
            "action menu",
            "perform action",
            "do action",
            "open action menu",
            "actions",
        ],
        &[Six],
    ),
    // Combat mode (7)
    order("STEALTH", &["stealth", "stealthy", "stealth mode"], &[Seven, One]),
    order("COMBAT", &["combat", "danger", "combat mode"], &[Seven, Two]),
    order(
        "AWARE",
        &["aware", "alert", "aware mode", "stay sharp", "stay frosty", "stay alert"],
        &[Seven, Three],
    ),
    order("RELAX", &["relax", "relaxed mode", "safe"], &[Seven, Four]),
    order("STANDUP", &["stand up", "get up", "stand"], &[Seven, Six]),
    order(
        "CROUCH",
        &["get low", "crouch", "stay crouched", "stay low"],
        &[Seven, Seven],
    ),
    order(
        "PRONE",
        &["go prone", "get down", "prone", "hit the dirt", "down"],
        &[Seven, Eight],
    ),
    order(
        "COPYMYSTANCE",
        &["copy my stance", "default stance"],
        &[Seven, Nine],
    ),
    // Formation (8)
    order("COLUMN", &["formation column", "form column"], &[Eight, One]),
    order(
        "STAGGEREDCOLUMN",
        &["formation staggered column", "form staggered column"],
        &[Eight, Two],
    ),
    order("WEDGE", &["formation wedge", "form wedge"], &[Eight, Three]),
    order(
        "ECHELONLEFT",
        &["formation echelon left", "form echelon left"],
        &[Eight, Four],
    ),
    order(
        "ECHELONRIGHT",
        &["formation echelon right", "form echelon right"],
        &[Eight, Five],
    ),
    order("VEE", &["formation vee", "form vee"], &[Eight, Six]),
    order("LINE", &["formation line", "form line"], &[Eight, Seven]),
    order("FILE", &["formation file", "form file"], &[Eight, Eight]),
    order("DIAMOND", &["formation diamond", "form diamond"], &[Eight, Nine]),
    // Assign team (9)
    order_with(
        "ASSIGN",
        &["assign", "assign to", "add to", "switch to", "you're"],
        &[Nine],
        &TEAMS,
    ),
];

fn slot_from(mut slot: Slot, entries: &[Entry]) -> Result<Slot> {
    for e in entries {
        slot.add_entry(e.phrases.iter().copied(), e.tag, key_presses(e.keys))?;
    }
    Ok(slot)
}

/// The subject slot: units one to ten and the whole squad.
pub fn subject_slot(max_subjects: u32) -> Result<Slot> {
    slot_from(Slot::subject(SUBJECT_RULE, max_subjects), SUBJECTS)
}

/// Add every built-in command, in menu order.
pub fn register_commands(assembler: &mut GrammarAssembler) -> Result<()> {
    let subject = assembler.subject_ref();

    for def in COMMANDS {
        let mut command = Command::new(def.id, def.phrases.iter().copied(), key_presses(def.keys));
        if def.addressed {
            command = command.with_subject(subject.clone());
        }
        if let Some(direct_object) = def.direct_object {
            let slot = slot_from(Slot::direct_object(direct_object.name), direct_object.entries)?;
            command = command.with_direct_object(slot);
        }
        assembler.add_command(command)?;
    }

    debug!("Registered {} built-in commands", assembler.command_count());
    Ok(())
}

/// Assemble the built-in grammar and registry.
pub fn assemble(culture: &str, max_subjects: u32) -> Result<(Grammar, CommandRegistry)> {
    let mut assembler = GrammarAssembler::new(culture, subject_slot(max_subjects)?)?;
    register_commands(&mut assembler)?;
    Ok(assembler.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::resolve;
    use crate::semantics::parse;

    fn keys_for(utterance: &str) -> Vec<KeyCode> {
        let (grammar, registry) = assemble("en-US", 10).unwrap();
        let result = grammar
            .interpret(utterance)
            .unwrap_or_else(|| panic!("no match for '{}'", utterance));
        resolve(&registry, &parse(&result))
            .iter()
            .map(|op| op.key)
            .collect()
    }

    #[test]
    fn test_catalog_assembles() {
        let (grammar, registry) = assemble("en-US", 10).unwrap();
        assert_eq!(registry.len(), COMMANDS.len());
        assert!(grammar.rule("directionDO").is_some());
        assert!(grammar.rule("teamDO").is_some());
        assert_eq!(registry.subject().entries().len(), SUBJECTS.len());
        for def in COMMANDS {
            assert!(registry.contains(def.id), "{} missing", def.id);
        }
    }

    #[test]
    fn test_utility_command() {
        assert_eq!(keys_for("open map"), vec![M]);
    }

    #[test]
    fn test_addressed_order() {
        assert_eq!(keys_for("one two advance"), vec![F1, F2, One, Two]);
        assert_eq!(keys_for("everyone take cover"), vec![Grave, One, Eight]);
    }

    #[test]
    fn test_direct_objects() {
        assert_eq!(keys_for("watch north east"), vec![Three, Eight, Two]);
        assert_eq!(keys_for("three assign team blue"), vec![F3, Nine, Three]);
        assert_eq!(keys_for("watch"), vec![Three, Eight]);
    }

    #[test]
    fn test_subject_only_selects_units() {
        assert_eq!(keys_for("unit four five"), vec![F4, F5]);
    }

    #[test]
    fn test_utilities_take_no_subject() {
        let (grammar, _) = assemble("en-US", 10).unwrap();
        assert!(grammar.interpret("one open map").is_none());
    }

    #[test]
    fn test_status_reports() {
        assert_eq!(keys_for("fuck I'm hurt"), vec![Five, Four]);
        assert_eq!(keys_for("shit we have got a man down"), vec![Five, Eight]);
    }

    #[test]
    fn test_overlapping_phrase_goes_to_first_declared() {
        // "move up" is a trigger of both ADVANCE and MOVETO.
        assert_eq!(keys_for("move up"), vec![One, Two]);
    }
}
