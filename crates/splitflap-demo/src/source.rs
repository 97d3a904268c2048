//! Board configuration as a [`FlapSource`].

use std::sync::Arc;

use splitflap_core::host::DEFAULT_ROTATION;
use splitflap_core::style::{Rgba, TextAlignment};
use splitflap_core::{Alphabet, FlapSource, FlapStyle};
use web_time::Duration;

/// Every flap shares one alphabet, style and rotation.
#[derive(Debug, Clone)]
pub struct UniformSource {
    count: usize,
    alphabet: Arc<Alphabet>,
    style: FlapStyle,
    rotation: Duration,
}

impl UniformSource {
    #[must_use]
    pub fn new(count: usize, alphabet: Alphabet) -> Self {
        Self {
            count,
            alphabet: Arc::new(alphabet),
            style: board_style(),
            rotation: DEFAULT_ROTATION,
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Duration) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: FlapStyle) -> Self {
        self.style = style;
        self
    }
}

/// White Courier on black, rounded corners, dark split line.
#[must_use]
pub fn board_style() -> FlapStyle {
    FlapStyle::new()
        .background(Rgba::BLACK)
        .text_color(Rgba::WHITE)
        .line_color(Rgba::DARK_GRAY)
        .font("Courier", 50.0)
        .corner_radius(5.0)
        .alignment(TextAlignment::Center)
}

impl FlapSource for UniformSource {
    fn flap_count(&self) -> usize {
        self.count
    }

    fn alphabet_for(&self, _index: usize) -> Arc<Alphabet> {
        Arc::clone(&self.alphabet)
    }

    fn style_for(&self, _index: usize) -> FlapStyle {
        self.style.clone()
    }

    fn duration_for(&self, _index: usize) -> Duration {
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_source_repeats_configuration() {
        let source = UniformSource::new(3, Alphabet::numeric())
            .with_rotation(Duration::from_millis(80));
        assert_eq!(source.flap_count(), 3);
        assert!(Arc::ptr_eq(&source.alphabet_for(0), &source.alphabet_for(2)));
        assert_eq!(source.duration_for(1), Duration::from_millis(80));
        assert_eq!(source.style_for(0).font_family(), "Courier");
    }

    #[test]
    fn default_rotation_matches_core() {
        let source = UniformSource::new(1, Alphabet::numeric());
        assert_eq!(source.duration_for(0), DEFAULT_ROTATION);
    }
}
