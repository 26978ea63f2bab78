//! Color themes
//!
//! Eight fixed palettes of nine RGB565 roles. Which theme is active is owned
//! by a [`ThemeProvider`]; persisting the choice across reboots is left to
//! the firmware.

use embedded_graphics::pixelcolor::Rgb565;

/// Build an [`Rgb565`] from its packed 16-bit representation.
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb565(raw: u16) -> Rgb565 {
    Rgb565::new((raw >> 11) as u8, ((raw >> 5) & 0x3F) as u8, (raw & 0x1F) as u8)
}

/// Available themes, in cycling order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Theme {
    /// Classic black background.
    #[default]
    Dark,
    /// White background.
    Light,
    /// Cyan/magenta cyberpunk.
    Neon,
    /// Hot pink neon.
    NeonPink,
    /// Electric blue neon.
    NeonBlue,
    /// Toxic green neon.
    NeonGreen,
    /// Purple/violet neon.
    NeonPurple,
    /// Monochrome.
    Minimal,
}

impl Theme {
    /// Every theme, in cycling order.
    pub const ALL: [Self; 8] = [
        Self::Dark,
        Self::Light,
        Self::Neon,
        Self::NeonPink,
        Self::NeonBlue,
        Self::NeonGreen,
        Self::NeonPurple,
        Self::Minimal,
    ];

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
            Self::Neon => "Neon",
            Self::NeonPink => "Neon Pink",
            Self::NeonBlue => "Neon Blue",
            Self::NeonGreen => "Neon Green",
            Self::NeonPurple => "Neon Purple",
            Self::Minimal => "Minimal",
        }
    }

    /// Palette for this theme.
    pub const fn colors(self) -> ThemeColors {
        match self {
            Self::Dark => ThemeColors::from_raw([
                0x0000, 0xFFFF, 0x07FF, 0xFD20, 0xF800, 0x07E0, 0xC618, 0xFFE0, 0x4208,
            ]),
            Self::Light => ThemeColors::from_raw([
                0xFFFF, 0x0000, 0x001F, 0xFD20, 0xF800, 0x07E0, 0x8410, 0xFFE0, 0xC618,
            ]),
            Self::Neon => ThemeColors::from_raw([
                0x0010, 0x07FF, 0xF81F, 0xFFE0, 0xF800, 0x07E0, 0x051F, 0xFD20, 0x2104,
            ]),
            Self::NeonPink => ThemeColors::from_raw([
                0x0000, 0xF81F, 0xFC1F, 0xFFE0, 0xF800, 0x07FF, 0xF99E, 0xFD20, 0x4208,
            ]),
            Self::NeonBlue => ThemeColors::from_raw([
                0x0008, 0x07FF, 0x001F, 0xFFE0, 0xF800, 0x07E0, 0x051F, 0x07FF, 0x2104,
            ]),
            Self::NeonGreen => ThemeColors::from_raw([
                0x0200, 0x07E0, 0xAFE5, 0xFFE0, 0xF800, 0x07FF, 0x87E0, 0xFFE0, 0x2945,
            ]),
            Self::NeonPurple => ThemeColors::from_raw([
                0x2004, 0xF81F, 0x781F, 0xFFE0, 0xF800, 0x07FF, 0xA01F, 0xFC1F, 0x4010,
            ]),
            Self::Minimal => ThemeColors::from_raw([
                0x0000, 0xFFFF, 0xFFFF, 0x8410, 0x8410, 0xC618, 0x8410, 0xFFFF, 0x4208,
            ]),
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Following theme, wrapping after the last.
    #[must_use]
    pub fn next(self) -> Self {
        let i = self.index().wrapping_add(1) % Self::ALL.len();
        Self::ALL.get(i).copied().unwrap_or_default()
    }

    /// Preceding theme, wrapping before the first.
    #[must_use]
    pub fn previous(self) -> Self {
        let len = Self::ALL.len();
        let i = self.index().wrapping_add(len).wrapping_sub(1) % len;
        Self::ALL.get(i).copied().unwrap_or_default()
    }
}

/// The nine color roles of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    /// Background.
    pub bg: Rgb565,
    /// Primary text.
    pub text: Rgb565,
    /// Accent and progress.
    pub accent: Rgb565,
    /// Warnings (paused, heating).
    pub warning: Rgb565,
    /// Errors.
    pub error: Rgb565,
    /// Success (complete, connected).
    pub success: Rgb565,
    /// Secondary text and icons.
    pub secondary: Rgb565,
    /// Highlights.
    pub highlight: Rgb565,
    /// Dimmed decoration.
    pub dimmed: Rgb565,
}

impl ThemeColors {
    const fn from_raw(c: [u16; 9]) -> Self {
        let [bg, text, accent, warning, error, success, secondary, highlight, dimmed] = c;
        Self {
            bg: rgb565(bg),
            text: rgb565(text),
            accent: rgb565(accent),
            warning: rgb565(warning),
            error: rgb565(error),
            success: rgb565(success),
            secondary: rgb565(secondary),
            highlight: rgb565(highlight),
            dimmed: rgb565(dimmed),
        }
    }
}

/// Theme collaborator: owns the active palette.
pub trait ThemeProvider {
    /// Palette currently in use.
    fn colors(&self) -> ThemeColors;

    /// Switch to the next theme and return it.
    fn next_theme(&mut self) -> Theme;

    /// Switch to the previous theme and return it.
    fn previous_theme(&mut self) -> Theme;
}

/// In-memory [`ThemeProvider`] cycling through [`Theme::ALL`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeCycle {
    current: Theme,
}

impl ThemeCycle {
    /// Start at `theme`.
    pub const fn new(theme: Theme) -> Self {
        Self { current: theme }
    }

    /// Active theme.
    pub const fn current(&self) -> Theme {
        self.current
    }
}

impl ThemeProvider for ThemeCycle {
    fn colors(&self) -> ThemeColors {
        self.current.colors()
    }

    fn next_theme(&mut self) -> Theme {
        self.current = self.current.next();
        tracing::debug!(theme = self.current.name(), "theme changed");
        self.current
    }

    fn previous_theme(&mut self) -> Theme {
        self.current = self.current.previous();
        tracing::debug!(theme = self.current.name(), "theme changed");
        self.current
    }
}
