//! Category → color mapping.

use serde::{Deserialize, Serialize};

use crate::event::{Category, EventColor};

/// Colors used for each category. Loaded from the `[palette]` config table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default = "Palette::default_event")]
    pub event: EventColor,
    #[serde(default = "Palette::default_break", rename = "break")]
    pub break_time: EventColor,
}

impl Palette {
    fn default_event() -> EventColor {
        EventColor::new("#1e90ff", "#D1E8FF")
    }

    fn default_break() -> EventColor {
        EventColor::new("#C5C3C3", "#C5C3C3")
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            event: Self::default_event(),
            break_time: Self::default_break(),
        }
    }
}

/// Derives an event's display color from its category.
///
/// Every path that persists or displays an event asks the classifier for the
/// color; it is never copied from an earlier version of the event.
#[derive(Debug, Clone, Default)]
pub struct EventClassifier {
    palette: Palette,
}

impl EventClassifier {
    pub fn new(palette: Palette) -> Self {
        EventClassifier { palette }
    }

    /// `Break` gets the break color; everything else, including no category, gets the event color.
    pub fn color_for(&self, category: Option<Category>) -> EventColor {
        match category {
            Some(Category::Break) => self.palette.break_time.clone(),
            Some(Category::Event) | None => self.palette.event.clone(),
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn break_is_gray_everything_else_blue() {
        let classifier = EventClassifier::default();
        let blue = EventColor::new("#1e90ff", "#D1E8FF");
        let gray = EventColor::new("#C5C3C3", "#C5C3C3");

        assert_eq!(classifier.color_for(Some(Category::Break)), gray);
        assert_eq!(classifier.color_for(Some(Category::Event)), blue);
        assert_eq!(classifier.color_for(None), blue);
    }

    #[test]
    fn uses_injected_palette() {
        let palette = Palette {
            event: EventColor::new("#ad2121", "#FAE3E3"),
            break_time: EventColor::new("#e3bc08", "#FDF1BA"),
        };
        let classifier = EventClassifier::new(palette);
        assert_eq!(
            classifier.color_for(Some(Category::Break)).primary,
            "#e3bc08"
        );
        assert_eq!(classifier.color_for(None).primary, "#ad2121");
    }

    #[test]
    fn partial_palette_table_falls_back_to_defaults() {
        let palette: Palette = toml::from_str(
            r##"
            [break]
            primary = "#333333"
            secondary = "#eeeeee"
            "##,
        )
        .unwrap();
        assert_eq!(palette.break_time.primary, "#333333");
        assert_eq!(palette.event, Palette::default().event);
    }
}
