//! FIGlet rendering for the big countdown display.

use figlet_rs::FIGfont;

use super::error::TerminalError;

/// Renders labels in the built-in FIGlet "standard" font.
pub struct BigFont {
    font: FIGfont,
}

impl BigFont {
    /// Loads the standard font bundled with figlet-rs.
    ///
    /// # Errors
    ///
    /// Returns `TerminalError::Font` if the bundled font cannot be parsed.
    pub fn standard() -> Result<Self, TerminalError> {
        let font = FIGfont::standard().map_err(TerminalError::Font)?;
        Ok(Self { font })
    }

    /// Renders `text` as FIGlet art, one string with a line per font row.
    ///
    /// Empty text renders as an empty string.
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        self.font
            .convert(text)
            .map(|figure| figure.to_string().trim_end_matches('\n').to_string())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for BigFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BigFont").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> BigFont {
        BigFont::standard().unwrap()
    }

    fn width(rendered: &str) -> usize {
        rendered.lines().map(|l| l.chars().count()).max().unwrap_or(0)
    }

    #[test]
    fn test_renders_multiple_rows() {
        let rendered = font().render("1h5s");
        assert!(rendered.lines().count() > 1);
        assert!(!rendered.ends_with('\n'));
    }

    #[test]
    fn test_labels_share_height() {
        let font = font();
        let short = font.render("0s");
        let long = font.render("12h34m56s");
        assert_eq!(short.lines().count(), long.lines().count());
    }

    #[test]
    fn test_longer_labels_are_wider() {
        let font = font();
        assert!(width(&font.render("59m59s")) > width(&font.render("9s")));
    }

    #[test]
    fn test_every_label_character_is_drawn() {
        let font = font();
        for c in "0123456789hmsE".chars() {
            let rendered = font.render(&c.to_string());
            assert!(
                rendered.chars().any(|ch| !ch.is_whitespace()),
                "no glyph for {:?}",
                c
            );
        }
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(font().render(""), "");
    }
}
