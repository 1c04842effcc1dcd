//! Region names and the short codes library views display.

/// Region names used in No-Intro groups, with their short codes.
const REGIONS: &[(&str, &str)] = &[
    ("USA", "us"),
    ("Europe", "eu"),
    ("Japan", "jp"),
    ("World", "world"),
    ("Asia", "asia"),
    ("Australia", "au"),
    ("Brazil", "br"),
    ("Canada", "ca"),
    ("China", "cn"),
    ("Denmark", "dk"),
    ("Finland", "fi"),
    ("France", "fr"),
    ("Germany", "de"),
    ("Greece", "gr"),
    ("Hong Kong", "hk"),
    ("India", "in"),
    ("Italy", "it"),
    ("Korea", "kr"),
    ("Latin America", "latam"),
    ("Mexico", "mx"),
    ("Netherlands", "nl"),
    ("New Zealand", "nz"),
    ("Norway", "no"),
    ("Poland", "pl"),
    ("Portugal", "pt"),
    ("Russia", "ru"),
    ("Scandinavia", "scand"),
    ("South Africa", "za"),
    ("Spain", "es"),
    ("Sweden", "se"),
    ("Taiwan", "tw"),
    ("United Kingdom", "uk"),
];

/// Code returned when a name carries no recognisable region.
pub const UNKNOWN_REGION: &str = "unknown";

fn lookup(region: &str) -> Option<&'static str> {
    REGIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(region))
        .map(|&(_, code)| code)
}

/// True when every comma-separated part of `s` is a known region name.
pub(crate) fn is_region_list(s: &str) -> bool {
    s.split(',').all(|part| lookup(part.trim()).is_some())
}

/// Short code for one region name, e.g. `"Europe"` → `"eu"`.
pub fn region_code_for(region: &str) -> &'static str {
    lookup(region.trim()).unwrap_or(UNKNOWN_REGION)
}

/// Short code for the first region in a No-Intro style name.
///
/// `"Super Game (USA)"` → `"us"`, `"Foo (Europe, France)"` → `"eu"`.
pub fn region_code(name: &str) -> &'static str {
    crate::name::parse_game_name(name)
        .regions
        .first()
        .map_or(UNKNOWN_REGION, |r| region_code_for(r))
}
