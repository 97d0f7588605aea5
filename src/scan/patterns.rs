//! Screenshot filename recognition patterns.
//!
//! A static, data-driven table of regexes covering the default filenames
//! produced by macOS (across localizations) and common Linux screenshot
//! tools. New tools or locales are additions to the table, not code changes.

use regex::RegexSet;
use std::sync::LazyLock;

/// Raw pattern table, matched against the file's base name (extension included).
///
/// Patterns are anchored at the start; the `.png` extension check happens
/// separately in the scanner so the table stays about names, not formats.
const NAME_PATTERNS: &[&str] = &[
    // macOS, English ("Screenshot 2024-01-30 at 10.00.00.png", pre-Monterey
    // "Screen Shot ..." spelling)
    r"^Screenshot \d{4}-\d{2}-\d{2} at \d{1,2}\.\d{2}\.\d{2}",
    r"^Screen Shot \d{4}-\d{2}-\d{2} at \d{1,2}\.\d{2}\.\d{2}",
    // macOS localizations
    r"^Bildschirmfoto ",
    r"^Captura de pantalla ",
    r"^Capture d['’]écran ",
    r"^Schermafbeelding ",
    r"^Istantanea ",
    r"^Captura de ecrã ",
    r"^Zrzut ekranu ",
    r"^Снимок экрана ",
    r"^Skärmavbild ",
    r"^Skjermbilde ",
    r"^Näyttökuva ",
    r"^スクリーンショット ?",
    r"^스크린샷 ?",
    r"^截屏",
    r"^截圖",
    // gnome-screenshot ("Screenshot from 2024-01-30 10-00-00.png")
    r"^Screenshot from \d{4}-\d{2}-\d{2}",
    // KDE Spectacle / generic underscore style ("Screenshot_20240130_100000.png")
    r"^Screenshot_\d{8}",
    r"^Screenshot_\d{4}-\d{2}-\d{2}",
    // grim default ("20240130_10h00m00s_grim.png") and bare timestamp styles
    r"^\d{8}_\d{2}h\d{2}m\d{2}s_grim",
    r"^\d{8}_\d{6}",
    r"^\d{4}-\d{2}-\d{2}[-_ ]\d{2}[.:-]\d{2}",
    // swappy / satty annotated output
    r"^swappy-\d{8}",
    r"^satty-\d{8}",
    // flameshot default prefix
    r"^flameshot_",
];

static NAME_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(NAME_PATTERNS).expect("screenshot name patterns are valid regexes")
});

/// Returns true if the base name matches at least one known screenshot
/// naming pattern.
pub fn matches_screenshot_name(name: &str) -> bool {
    NAME_SET.is_match(name)
}
