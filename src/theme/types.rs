use ratatui::style::Color;
use std::path::PathBuf;

/// Application theme palette used by rendering code.
///
/// All colors are provided as [`ratatui::style::Color`] and are suitable for
/// direct use with widgets and styles.
#[derive(Clone, Copy)]
pub struct Theme {
    /// Primary background color for the canvas.
    pub base: Color,
    /// Slightly lighter background layer used behind panels and modals.
    pub mantle: Color,
    /// Darkest background shade for deep contrast areas.
    pub crust: Color,
    /// Subtle surface color for component borders (level 1).
    pub surface1: Color,
    /// Subtle surface color for component borders (level 2).
    pub surface2: Color,
    /// Muted overlay color for titles and separators (primary).
    pub overlay1: Color,
    /// Muted overlay color for secondary annotations.
    pub overlay2: Color,
    /// Primary foreground text color.
    pub text: Color,
    /// Secondary text for less prominent content.
    pub subtext0: Color,
    /// Tertiary text for captions and hints.
    pub subtext1: Color,
    /// Accent color for interactive highlights.
    pub sapphire: Color,
    /// Accent color for focused pane titles.
    pub mauve: Color,
    /// Success/positive state color.
    pub green: Color,
    /// Warning/attention state color.
    pub yellow: Color,
    /// Error/danger state color.
    pub red: Color,
    /// Accent color for selections.
    pub lavender: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin Mocha
        Theme {
            base: Color::Rgb(30, 30, 46),
            mantle: Color::Rgb(24, 24, 37),
            crust: Color::Rgb(17, 17, 27),
            surface1: Color::Rgb(69, 71, 90),
            surface2: Color::Rgb(88, 91, 112),
            overlay1: Color::Rgb(127, 132, 156),
            overlay2: Color::Rgb(147, 153, 178),
            text: Color::Rgb(205, 214, 244),
            subtext0: Color::Rgb(166, 173, 200),
            subtext1: Color::Rgb(186, 194, 222),
            sapphire: Color::Rgb(116, 199, 236),
            mauve: Color::Rgb(203, 166, 247),
            green: Color::Rgb(166, 227, 161),
            yellow: Color::Rgb(249, 226, 175),
            red: Color::Rgb(243, 139, 168),
            lavender: Color::Rgb(180, 190, 254),
        }
    }
}

/// User-configurable application settings parsed from `settings.toml`.
///
/// Every table the original kept hardcoded (demo users, component tags,
/// technical drawings) can be swapped via the `*_file` overrides here.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Quiet period after the last search keystroke before filtering runs.
    pub debounce_ms: u64,
    /// Interval between automatic gallery advances while cycling.
    pub gallery_cycle_ms: u64,
    /// Candidate dataset paths, tried in order; first success wins.
    pub data_paths: Vec<String>,
    /// Address used for "request info" mailto links.
    pub contact_email: String,
    /// Number used for the WhatsApp deep link (international, digits only).
    pub whatsapp_number: String,
    /// Pre-filled WhatsApp message text.
    pub contact_message: String,
    /// Maximum number of related products shown on the detail view.
    pub related_limit: usize,
    /// Character budget for list excerpts.
    pub excerpt_len: usize,
    /// Optional TOML file replacing the built-in demo user table.
    pub users_file: Option<PathBuf>,
    /// Optional TOML file replacing the built-in component-tag table.
    pub tags_file: Option<PathBuf>,
    /// Optional TOML file replacing the built-in technical-drawing table.
    pub drawings_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            debounce_ms: 300,
            gallery_cycle_ms: 1400,
            data_paths: vec![
                "data/products.json".to_string(),
                "../data/products.json".to_string(),
            ],
            contact_email: "info@listino.example".to_string(),
            whatsapp_number: "393400000000".to_string(),
            contact_message: "Ciao, vorrei maggiori informazioni sui vostri prodotti.".to_string(),
            related_limit: 6,
            excerpt_len: 150,
            users_file: None,
            tags_file: None,
            drawings_file: None,
        }
    }
}
