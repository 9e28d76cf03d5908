//! Mana symbols and casting costs

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// The five colors of Magic, in canonical WUBRG order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    /// Parse a single color letter (case-insensitive)
    pub fn from_letter(c: char) -> Option<Color> {
        match c.to_ascii_uppercase() {
            'W' => Some(Color::White),
            'U' => Some(Color::Blue),
            'B' => Some(Color::Black),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            _ => None,
        }
    }

    /// Parse a color code such as "W" or "g"
    pub fn from_code(s: &str) -> Option<Color> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Color::from_letter(c),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Blue => "blue",
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
        }
    }

    fn index(self) -> u32 {
        match self {
            Color::White => 0,
            Color::Blue => 1,
            Color::Black => 2,
            Color::Red => 3,
            Color::Green => 4,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Hybrid pairs that have a printed symbol
const PRINTED_HYBRIDS: [(Color, Color); 10] = [
    (Color::White, Color::Blue),
    (Color::White, Color::Black),
    (Color::Blue, Color::Black),
    (Color::Blue, Color::Red),
    (Color::Black, Color::Red),
    (Color::Black, Color::Green),
    (Color::Red, Color::Green),
    (Color::Red, Color::White),
    (Color::Green, Color::White),
    (Color::Green, Color::Blue),
];

/// Non-mana symbols that still have a printed glyph (snow, tap, energy, ...)
const PRINTED_SPECIALS: [&str; 7] = ["S", "T", "Q", "E", "P", "A", "CHAOS"];

/// Highest generic cost with a printed glyph
const MAX_PRINTED_GENERIC: u32 = 20;

/// One symbol of a casting cost
///
/// Tokens come from Cube Cobra's `parsed_cost` array, e.g. `"3"`, `"g"`,
/// `"w-u"` or `"W/U"`. Anything that is not recognized is kept verbatim in
/// `Other` so it can still be shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ManaSymbol {
    /// Generic numeric cost ({0}..{20} and beyond)
    Generic(u32),
    /// Variable cost: X, Y or Z
    Variable(char),
    /// Colorless-specific {C}
    Colorless,
    /// Single colored pip
    Colored(Color),
    /// Two-color hybrid, e.g. {W/U}
    Hybrid(Color, Color),
    /// Generic/color hybrid, e.g. {2/W}
    TwoHybrid(Color),
    /// Phyrexian color, e.g. {W/P}
    Phyrexian(Color),
    /// Snow, energy, tap and anything unrecognized
    Other(String),
}

impl ManaSymbol {
    /// Parse a symbol token, with or without surrounding braces
    pub fn parse(token: &str) -> ManaSymbol {
        let raw = token.trim().trim_start_matches('{').trim_end_matches('}');
        let key = raw.to_ascii_uppercase().replace('-', "/");

        if !key.is_empty() && key.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(n) = key.parse::<u32>() {
                return ManaSymbol::Generic(n);
            }
        }

        match key.as_str() {
            "X" | "Y" | "Z" => {
                return ManaSymbol::Variable(key.chars().next().unwrap_or('X'));
            }
            "C" => return ManaSymbol::Colorless,
            _ => {}
        }

        if let Some(color) = Color::from_code(&key) {
            return ManaSymbol::Colored(color);
        }

        if let Some((left, right)) = key.split_once('/') {
            match (left, Color::from_code(left), right, Color::from_code(right)) {
                (_, Some(a), _, Some(b)) => return ManaSymbol::Hybrid(a, b),
                ("2", None, _, Some(c)) => return ManaSymbol::TwoHybrid(c),
                (_, Some(c), "P", None) => return ManaSymbol::Phyrexian(c),
                _ => {}
            }
        }

        ManaSymbol::Other(raw.to_string())
    }

    /// Position in the canonical display order
    ///
    /// Generic costs ascending, then X/Y/Z, colorless, WUBRG, hybrid pairs,
    /// generic/color hybrids, Phyrexian pips, and everything else last.
    pub fn sort_key(&self) -> u32 {
        match self {
            ManaSymbol::Generic(n) => (*n).min(99),
            ManaSymbol::Variable('X') => 100,
            ManaSymbol::Variable('Y') => 101,
            ManaSymbol::Variable(_) => 102,
            ManaSymbol::Colorless => 103,
            ManaSymbol::Colored(c) => 104 + c.index(),
            ManaSymbol::Hybrid(_, _) => 110,
            ManaSymbol::TwoHybrid(_) => 111,
            ManaSymbol::Phyrexian(_) => 112,
            ManaSymbol::Other(_) => 120,
        }
    }

    /// Whether a printed glyph exists for this symbol
    pub fn has_glyph(&self) -> bool {
        match self {
            ManaSymbol::Generic(n) => *n <= MAX_PRINTED_GENERIC,
            ManaSymbol::Variable(v) => *v == 'X',
            ManaSymbol::Colorless | ManaSymbol::Colored(_) => true,
            ManaSymbol::Hybrid(a, b) => PRINTED_HYBRIDS.contains(&(*a, *b)),
            ManaSymbol::TwoHybrid(_) | ManaSymbol::Phyrexian(_) => true,
            ManaSymbol::Other(raw) => PRINTED_SPECIALS.contains(&raw.to_ascii_uppercase().as_str()),
        }
    }

    /// Symbol code as shown on the card, without braces
    pub fn code(&self) -> String {
        match self {
            ManaSymbol::Generic(n) => n.to_string(),
            ManaSymbol::Variable(v) => v.to_string(),
            ManaSymbol::Colorless => "C".to_string(),
            ManaSymbol::Colored(c) => c.letter().to_string(),
            ManaSymbol::Hybrid(a, b) => format!("{a}/{b}"),
            ManaSymbol::TwoHybrid(c) => format!("2/{c}"),
            ManaSymbol::Phyrexian(c) => format!("{c}/P"),
            ManaSymbol::Other(raw) => raw.clone(),
        }
    }
}

impl From<String> for ManaSymbol {
    fn from(s: String) -> Self {
        ManaSymbol::parse(&s)
    }
}

impl From<&str> for ManaSymbol {
    fn from(s: &str) -> Self {
        ManaSymbol::parse(s)
    }
}

impl From<ManaSymbol> for String {
    fn from(symbol: ManaSymbol) -> Self {
        symbol.code()
    }
}

impl fmt::Display for ManaSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.code())
    }
}

/// A casting cost as an ordered list of symbols (e.g. {2}{W}{W})
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManaCost {
    symbols: SmallVec<[ManaSymbol; 4]>,
}

impl ManaCost {
    pub fn new() -> Self {
        ManaCost::default()
    }

    /// Build a cost from individual symbol tokens
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ManaCost {
            symbols: tokens
                .into_iter()
                .filter(|t| !t.as_ref().trim().is_empty())
                .map(|t| ManaSymbol::parse(t.as_ref()))
                .collect(),
        }
    }

    /// Parse a brace-delimited cost string like "{2}{R}{R}"
    pub fn from_string(s: &str) -> Self {
        let mut tokens = Vec::new();
        let mut rest = s;
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    tokens.push(&after[..close]);
                    rest = &after[close + 1..];
                }
                None => break,
            }
        }
        ManaCost::from_tokens(tokens)
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Symbols in the order they were given
    pub fn symbols(&self) -> &[ManaSymbol] {
        &self.symbols
    }

    /// Symbols sorted into canonical display order (stable within a bucket)
    pub fn canonical(&self) -> Vec<&ManaSymbol> {
        let mut sorted: Vec<&ManaSymbol> = self.symbols.iter().collect();
        sorted.sort_by_key(|s| s.sort_key());
        sorted
    }
}

impl fmt::Display for ManaCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.canonical() {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}
