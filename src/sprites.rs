//! Temperature illustrations with auto-sizing and multi-color layer support
//!
//! Sprites are loaded from text files at compile time using `include_str!`.
//! Each illustration has Small and Large variants built from two colored
//! layers that are composited with spaces treated as transparent.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};

// ============================================================================
// Sprite data - embedded at compile time
// File naming: {size}_{color}.txt (e.g., small_yellow.txt, large_gray.txt)
// ============================================================================

mod sprite_data {
    pub mod hot {
        // Sun
        pub const SMALL_YELLOW: &str = include_str!("../sprites/hot/small_yellow.txt");
        pub const LARGE_YELLOW: &str = include_str!("../sprites/hot/large_yellow.txt");
        // Heat haze
        pub const SMALL_RED: &str = include_str!("../sprites/hot/small_red.txt");
        pub const LARGE_RED: &str = include_str!("../sprites/hot/large_red.txt");
    }
    pub mod regular {
        // Sun layer (background)
        pub const SMALL_YELLOW: &str = include_str!("../sprites/regular/small_yellow.txt");
        pub const LARGE_YELLOW: &str = include_str!("../sprites/regular/large_yellow.txt");
        // Cloud layer (foreground)
        pub const SMALL_GRAY: &str = include_str!("../sprites/regular/small_gray.txt");
        pub const LARGE_GRAY: &str = include_str!("../sprites/regular/large_gray.txt");
    }
    pub mod cold {
        // Cloud layer (background)
        pub const SMALL_GRAY: &str = include_str!("../sprites/cold/small_gray.txt");
        pub const LARGE_GRAY: &str = include_str!("../sprites/cold/large_gray.txt");
        // Snow layer (foreground)
        pub const SMALL_WHITE: &str = include_str!("../sprites/cold/small_white.txt");
        pub const LARGE_WHITE: &str = include_str!("../sprites/cold/large_white.txt");
    }
}

// ============================================================================
// Layer compositing
// ============================================================================

struct SpriteLayer {
    content: &'static str,
    color: Color,
}

/// Composite multiple layers into Text, treating spaces as transparent
fn composite_layers(layers: &[SpriteLayer]) -> Text<'static> {
    if layers.is_empty() {
        return Text::default();
    }

    let layer_lines: Vec<Vec<Vec<char>>> = layers
        .iter()
        .map(|l| l.content.lines().map(|line| line.chars().collect()).collect())
        .collect();

    let max_lines = layer_lines.iter().map(|l| l.len()).max().unwrap_or(0);
    let max_width = layer_lines
        .iter()
        .flat_map(|lines| lines.iter())
        .map(|line| line.len())
        .max()
        .unwrap_or(0);

    let mut result_lines = Vec::with_capacity(max_lines);

    for line_idx in 0..max_lines {
        let mut spans = Vec::with_capacity(max_width);

        for col_idx in 0..max_width {
            // Last layer is the foreground
            let mut found_char = ' ';
            let mut found_color = Color::Reset;

            for (layer_idx, layer) in layers.iter().enumerate().rev() {
                let ch = layer_lines[layer_idx]
                    .get(line_idx)
                    .and_then(|line| line.get(col_idx))
                    .copied();
                if let Some(ch) = ch.filter(|c| *c != ' ') {
                    found_char = ch;
                    found_color = layer.color;
                    break;
                }
            }

            spans.push(Span::styled(
                found_char.to_string(),
                Style::default().fg(found_color),
            ));
        }

        result_lines.push(Line::from(spans));
    }

    Text::from(result_lines)
}

// ============================================================================
// Types
// ============================================================================

/// Sprite size categories
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteSize {
    /// 5 lines
    Small,
    /// 9 lines
    Large,
}

impl SpriteSize {
    /// Pick the largest sprite that fits the available height.
    /// Returns `None` if even Small won't fit.
    pub fn for_height(available: u16) -> Option<Self> {
        match available {
            0..=4 => None,
            5..=8 => Some(SpriteSize::Small),
            _ => Some(SpriteSize::Large),
        }
    }
}

/// Picture shown next to the conditions, chosen by temperature alone
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Illustration {
    Hot,
    Regular,
    Cold,
}

impl Illustration {
    /// Above 30°C is hot, above 15°C is regular, anything else is cold.
    pub fn for_temperature(celsius: f64) -> Self {
        if celsius > 30.0 {
            Illustration::Hot
        } else if celsius > 15.0 {
            Illustration::Regular
        } else {
            Illustration::Cold
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Illustration::Hot => "hot",
            Illustration::Regular => "regular",
            Illustration::Cold => "cold",
        }
    }

    /// Emoji representation for when sprites don't fit
    pub fn emoji(self) -> &'static str {
        match self {
            Illustration::Hot => "\u{2600}\u{fe0f}",
            Illustration::Regular => "\u{26c5}",
            Illustration::Cold => "\u{2744}\u{fe0f}",
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Get art for the given illustration and size
pub fn get_sprite(illustration: Illustration, size: SpriteSize) -> Text<'static> {
    let layers = match illustration {
        Illustration::Hot => [
            SpriteLayer {
                content: match size {
                    SpriteSize::Small => sprite_data::hot::SMALL_YELLOW,
                    SpriteSize::Large => sprite_data::hot::LARGE_YELLOW,
                },
                color: Color::Yellow,
            },
            SpriteLayer {
                content: match size {
                    SpriteSize::Small => sprite_data::hot::SMALL_RED,
                    SpriteSize::Large => sprite_data::hot::LARGE_RED,
                },
                color: Color::Rgb(255, 90, 60),
            },
        ],

        Illustration::Regular => [
            SpriteLayer {
                content: match size {
                    SpriteSize::Small => sprite_data::regular::SMALL_YELLOW,
                    SpriteSize::Large => sprite_data::regular::LARGE_YELLOW,
                },
                color: Color::Yellow,
            },
            SpriteLayer {
                content: match size {
                    SpriteSize::Small => sprite_data::regular::SMALL_GRAY,
                    SpriteSize::Large => sprite_data::regular::LARGE_GRAY,
                },
                color: Color::Rgb(200, 200, 210),
            },
        ],

        Illustration::Cold => [
            SpriteLayer {
                content: match size {
                    SpriteSize::Small => sprite_data::cold::SMALL_GRAY,
                    SpriteSize::Large => sprite_data::cold::LARGE_GRAY,
                },
                color: Color::Rgb(160, 160, 175),
            },
            SpriteLayer {
                content: match size {
                    SpriteSize::Small => sprite_data::cold::SMALL_WHITE,
                    SpriteSize::Large => sprite_data::cold::LARGE_WHITE,
                },
                color: Color::Rgb(200, 220, 255),
            },
        ],
    };

    composite_layers(&layers)
}
