use super::stats::{TeamDatabase, TeamStats};

/// Sportsbook feeds name teams in full ("Michigan State Spartans"); the
/// stats snapshot keys them by short NCAA name ("michigan st."). This
/// module bridges the two.

/// Mascot suffixes stripped during normalization, longest match first.
const MASCOTS: &[&str] = &[
    "fighting irish",
    "crimson tide",
    "demon deacons",
    "golden eagles",
    "golden gophers",
    "horned frogs",
    "nittany lions",
    "rainbow warriors",
    "ragin cajuns",
    "red raiders",
    "red storm",
    "scarlet knights",
    "sun devils",
    "tar heels",
    "thundering herd",
    "yellow jackets",
    "blue devils",
    "blue jays",
    "green wave",
    "mean green",
    "aggies",
    "badgers",
    "bearcats",
    "bears",
    "bison",
    "bobcats",
    "boilermakers",
    "broncos",
    "bruins",
    "buckeyes",
    "buffaloes",
    "bulldogs",
    "bulls",
    "cardinals",
    "catamounts",
    "cavaliers",
    "commodores",
    "cornhuskers",
    "cougars",
    "cowboys",
    "crusaders",
    "cyclones",
    "dons",
    "ducks",
    "eagles",
    "falcons",
    "flames",
    "flyers",
    "friars",
    "gaels",
    "gamecocks",
    "gators",
    "grizzlies",
    "hawkeyes",
    "hawks",
    "hokies",
    "hoosiers",
    "hoyas",
    "hurricanes",
    "huskies",
    "hilltoppers",
    "illini",
    "jaspers",
    "jayhawks",
    "knights",
    "lobos",
    "longhorns",
    "lumberjacks",
    "mastodons",
    "midshipmen",
    "miners",
    "minutemen",
    "mountaineers",
    "musketeers",
    "mustangs",
    "orange",
    "owls",
    "paladins",
    "panthers",
    "peacocks",
    "penguins",
    "pioneers",
    "pirates",
    "racers",
    "raiders",
    "ramblers",
    "rams",
    "razorbacks",
    "rebels",
    "redbirds",
    "redhawks",
    "rockets",
    "salukis",
    "seminoles",
    "shockers",
    "sooners",
    "spartans",
    "spiders",
    "sycamores",
    "terrapins",
    "terriers",
    "tigers",
    "titans",
    "trojans",
    "vandals",
    "vikings",
    "volunteers",
    "waves",
    "wildcats",
    "wolfpack",
    "wolverines",
    "zips",
];

/// Explicit sportsbook-name -> NCAA short-name mappings, checked before
/// and after mascot stripping.
fn alias(name: &str) -> Option<&'static str> {
    let mapped = match name {
        "usc" => "southern california",
        "unc" | "north carolina tar heels" => "north carolina",
        "pitt" => "pittsburgh",
        "cal" => "california",
        "uva" => "virginia",
        "penn" => "pennsylvania",
        "umass" => "massachusetts",
        "uri" => "rhode island",
        "northern iowa" => "uni",
        "miami" | "miami hurricanes" => "miami (fl)",
        "miami redhawks" => "miami (oh)",
        "saint mary's" | "st. mary's" | "st mary's" => "saint mary's (ca)",
        "st. john's" | "saint john's" | "st john's" => "st. john's (ny)",
        "nc st." | "north carolina st." | "north carolina state" => "nc state",
        "louisiana-lafayette" | "ul lafayette" => "louisiana",
        "louisiana-monroe" => "ulm",
        "florida int'l" | "florida international" => "fiu",
        "fairleigh dickinson" => "fdu",
        "army" => "army west point",
        "appalachian st." | "appalachian state" => "app state",
        "sam houston st." | "sam houston state" => "sam houston",
        "south florida" | "usf" => "south fla.",
        "southeastern louisiana" | "se louisiana" => "southeastern la.",
        "southeast missouri st." | "se missouri st." => "southeast mo. st.",
        "unc wilmington" => "uncw",
        "k-state" => "kansas st.",
        "ole miss rebels" => "ole miss",
        _ => return None,
    };
    Some(mapped)
}

/// Normalize a sportsbook team name to the snapshot's short-name form.
/// Lowercases, applies aliases, strips a trailing mascot, and converts
/// " state" to " st." to match the NCAA convention.
pub fn normalize(name: &str) -> String {
    let mut normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return normalized;
    }

    if let Some(mapped) = alias(&normalized) {
        return mapped.to_string();
    }

    for mascot in MASCOTS {
        if let Some(stripped) = normalized.strip_suffix(&format!(" {}", mascot)) {
            normalized = stripped.trim().to_string();
            break;
        }
    }

    if let Some(mapped) = alias(&normalized) {
        return mapped.to_string();
    }

    if normalized.ends_with(" state") {
        normalized = format!("{} st.", normalized.trim_end_matches(" state"));
    } else if normalized.ends_with(" st") {
        normalized = format!("{}.", normalized);
    }

    normalized
}

/// Look a team up in the snapshot by sportsbook name.
///
/// Direct match on the normalized name first, then a contains fallback
/// for partial forms ("texas tech" vs "texas tech red"); the fallback
/// requires at least 5 significant characters to avoid junk matches.
/// Ambiguous fallbacks pick the longest key, then the lexicographically
/// first, so identical inputs always resolve to the same team.
pub fn resolve<'a>(db: &'a TeamDatabase, name: &str) -> Option<&'a TeamStats> {
    let normalized = normalize(name);
    if normalized.is_empty() {
        return None;
    }
    if let Some(stats) = db.get(&normalized) {
        return Some(stats);
    }

    let mut candidates: Vec<&str> = db
        .keys()
        .filter(|key| {
            (normalized.len() >= 5 || key.len() >= 5)
                && key.len() >= 4
                && normalized.len() >= 4
                && (key.contains(&normalized) || normalized.contains(key.as_str()))
        })
        .map(String::as_str)
        .collect();
    candidates.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    candidates.first().and_then(|key| db.get(*key))
}
