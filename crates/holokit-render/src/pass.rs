use holokit_core::{BlendMode, WindowRect};

use crate::passes::PassKind;

/// One step of an effect pipeline: a procedural kind, how it blends, and
/// where it applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderPass {
    pub id: &'static str,
    pub kind: PassKind,
    pub blend: BlendMode,
    /// Restricts the pass to a normalized rectangle. Pixels outside it are
    /// left exactly as the previous pass produced them.
    pub window: Option<WindowRect>,
    /// Multiplier on the invocation intensity, clamped to [0, 1] after
    /// multiplication.
    pub strength: f32,
}

impl ShaderPass {
    /// An unwindowed pass at full strength, named after its kind.
    pub fn new(kind: PassKind, blend: BlendMode) -> Self {
        Self {
            id: kind.name(),
            kind,
            blend,
            window: None,
            strength: 1.0,
        }
    }

    pub fn with_id(mut self, id: &'static str) -> Self {
        self.id = id;
        self
    }

    pub fn windowed(mut self, window: WindowRect) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    pub fn is_windowed(&self) -> bool {
        self.window.is_some()
    }
}
