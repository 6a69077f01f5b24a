use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shift {
    Morning,   // ca 1
    Afternoon, // ca 2 (also "evening")
    Night,     // ca 3
}

impl Shift {
    pub fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Night => "Night",
        }
    }

    /// Parse a shift label as typed on the CLI or found in a sheet.
    /// English and Vietnamese labels are accepted, case-insensitive.
    pub fn from_label(s: &str) -> Option<Self> {
        let norm = s.trim().to_lowercase();
        let norm = norm.split_whitespace().collect::<Vec<_>>().join(" ");
        match norm.as_str() {
            "morning" | "m" | "sáng" | "ca sáng" | "ca 1" | "1" => Some(Shift::Morning),
            "afternoon" | "evening" | "afternoon/evening" | "a" | "e" | "chiều" | "ca chiều"
            | "ca 2" | "2" => Some(Shift::Afternoon),
            "night" | "n" | "tối" | "đêm" | "ca tối" | "ca đêm" | "ca 3" | "3" => {
                Some(Shift::Night)
            }
            _ => None,
        }
    }

    /// Canonical label when recognised, otherwise the trimmed input.
    pub fn canonical_label(s: &str) -> String {
        Shift::from_label(s)
            .map(|sh| sh.label().to_string())
            .unwrap_or_else(|| s.trim().to_string())
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
