//! Team naming - flavor names, bracket codenames and colors
//!
//! Team names are drawn without replacement from a list of item names.
//! Brackets larger than that list fall back to "TEAM <codename>".

use rand::seq::SliceRandom;
use rand::Rng;

// 25 item names, one per team at most
const FLAVOR_NAMES: [&str; 25] = [
    "Eternity Blade", "Shadow Ripper", "Daybreaker", "Doomsday", "Bloodweeper",
    "Mortal Punishment", "Sparkforged Dagger", "Axe of Torment", "Sage’s Destiny", "Twilight Bow",
    "Ominous Premonition", "Insatiable Tome", "Augury's Staff", "Venomous Staff", "Void Staff",
    "Moonbow", "Glacial Buckler", "Sage’s Sanctuary", "Calamity Cape", "Longnight Guardian",
    "Blazing Armor", "Cuirass of Savagery", "Overlord's Platemail", "Radiant Dawn", "Frostscar",
];

const CODENAMES: [&str; 16] = [
    "Alpha", "Beta", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel",
    "India", "Juliet", "Kilo", "Lima", "Mike", "November", "Oscar", "Papa",
];

const TEAM_COLORS: [&str; 14] = [
    "#00d2ff", // Cyan
    "#ef4444", // Red
    "#fbbf24", // Gold
    "#a855f7", // Purple
    "#10b981", // Emerald
    "#f97316", // Orange
    "#ec4899", // Pink
    "#ffffff", // White
    "#6366f1", // Indigo
    "#84cc16", // Lime
    "#06b6d4", // Cyan Dark
    "#d946ef", // Fuchsia
    "#14b8a6", // Teal
    "#f43f5e", // Rose
];

/// Draw `count` distinct team names.
///
/// The first names come from the shuffled flavor list; team `t` beyond its
/// length is named `TEAM <codename>` with codename index `t % 16`.
pub fn draw_team_names<R: Rng>(count: usize, rng: &mut R) -> Vec<String> {
    let mut flavor: Vec<&str> = FLAVOR_NAMES.to_vec();
    flavor.shuffle(rng);

    (0..count)
        .map(|t| match flavor.get(t) {
            Some(name) => name.to_string(),
            None => format!("TEAM {}", CODENAMES[t % CODENAMES.len()]),
        })
        .collect()
}

/// Display color for the team at `index`, cycling through the palette
pub fn team_color(index: usize) -> &'static str {
    TEAM_COLORS[index % TEAM_COLORS.len()]
}

/// Number of distinct flavor names available
pub fn flavor_name_count() -> usize {
    FLAVOR_NAMES.len()
}
