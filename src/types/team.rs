//! Constructor colour palette

/// Colour used for constructors missing from the palette.
pub const NEUTRAL_COLOR: &str = "#6B7280";

const TEAM_COLORS: &[(&str, &str)] = &[
    ("red_bull", "#1E3A8A"),
    ("mercedes", "#00D2BE"),
    ("ferrari", "#DC2626"),
    ("mclaren", "#F97316"),
    ("alpine", "#EC4899"),
    ("aston_martin", "#16A34A"),
    ("williams", "#3B82F6"),
    ("alphatauri", "#6366F1"),
    ("rb", "#6366F1"),
    ("alfa", "#7C2D12"),
    ("kick_sauber", "#7C2D12"),
    ("sauber", "#7C2D12"),
    ("haas", "#EF4444"),
];

/// Look up the display colour for an upstream constructor id.
pub fn team_color(constructor_id: &str) -> &'static str {
    TEAM_COLORS
        .iter()
        .find(|(id, _)| *id == constructor_id)
        .map(|(_, color)| *color)
        .unwrap_or(NEUTRAL_COLOR)
}
