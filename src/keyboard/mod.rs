//! Calculator keyboard shared by the platform renderers.
//!
//! The keyboard holds no reference to a focused field. Whoever owns the
//! focused [`CalculatorField`] passes it in with each press.

mod field;
mod layout;

pub use field::{CalculatorField, TextChange};
pub use layout::{KeyboardLayout, LayoutError};

use tracing::{debug, warn};

use crate::config::Config;
use crate::editing::{Key, KeyError, KeyOutcome, KeyRouter};

/// Layout plus routing rules for one keyboard instance.
#[derive(Clone, Debug, Default)]
pub struct Keyboard {
    layout: KeyboardLayout,
    router: KeyRouter,
}

impl Keyboard {
    pub fn new(layout: KeyboardLayout, router: KeyRouter) -> Self {
        Self { layout, router }
    }

    /// Build a keyboard from configuration, falling back to the default
    /// layout when the configured one is invalid.
    pub fn from_config(config: &Config) -> Self {
        let layout = config.keyboard_layout().unwrap_or_else(|err| {
            warn!(%err, "Invalid keyboard layout in config, using default");
            KeyboardLayout::default()
        });
        Self::new(layout, KeyRouter::new(config.format_options()))
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    pub fn router(&self) -> &KeyRouter {
        &self.router
    }

    /// Apply a key press to `field`.
    pub fn press(&self, field: &mut CalculatorField, key: Key) -> KeyOutcome {
        let outcome = field.apply(&self.router, key);
        debug!(field = field.id(), ?outcome, "Key handled");
        outcome
    }

    /// Apply a key given by its label, as pushed programmatically by the host.
    pub fn press_glyph(
        &self,
        field: &mut CalculatorField,
        glyph: &str,
    ) -> Result<KeyOutcome, KeyError> {
        let key = glyph.parse()?;
        Ok(self.press(field, key))
    }
}
