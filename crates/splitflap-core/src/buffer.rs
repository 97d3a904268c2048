//! Double-buffered flap surfaces.
//!
//! A flap is drawn as two halves. Each half owns a [`BufferPair`]: two
//! surfaces named by [`Phase`] (`Tic` and `Tac`). One is visible; the other
//! is repainted off-screen with the next token and revealed by the flip.
//!
//! # Invariants
//!
//! 1. Exactly one surface per pair is visible at a time.
//! 2. [`Slot::Back`] always names the hidden surface, [`Slot::Front`] the
//!    visible one, so painting the back never changes what is on screen.
//! 3. `swap_visible` exchanges the roles of the two surfaces and nothing else.

use crate::token::Token;

/// Vertical half of a flap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Half {
    Top,
    Bottom,
}

impl Half {
    pub const ALL: [Half; 2] = [Half::Top, Half::Bottom];
}

/// Identity of one of the two alternating buffers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Tic,
    Tac,
}

impl Phase {
    pub const ALL: [Phase; 2] = [Phase::Tic, Phase::Tac];

    #[inline]
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Tic => Self::Tac,
            Self::Tac => Self::Tic,
        }
    }

    #[inline]
    pub fn toggle(&mut self) {
        *self = self.other();
    }

    #[inline]
    const fn index(self) -> usize {
        match self {
            Self::Tic => 0,
            Self::Tac => 1,
        }
    }
}

/// Names one of the four host surfaces of a flap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceRef {
    pub half: Half,
    pub phase: Phase,
}

impl SurfaceRef {
    #[must_use]
    pub const fn new(half: Half, phase: Phase) -> Self {
        Self { half, phase }
    }

    /// All four surfaces in a stable order.
    pub const ALL: [SurfaceRef; 4] = [
        SurfaceRef::new(Half::Top, Phase::Tic),
        SurfaceRef::new(Half::Bottom, Phase::Tic),
        SurfaceRef::new(Half::Top, Phase::Tac),
        SurfaceRef::new(Half::Bottom, Phase::Tac),
    ];
}

/// Role of a surface relative to what is currently visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Hidden surface; safe to repaint.
    Back,
    /// Visible surface.
    Front,
}

/// Two alternating surfaces for one half of a flap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferPair {
    half: Half,
    surfaces: [Option<Token>; 2],
    visible: Phase,
}

impl BufferPair {
    /// An unpainted pair whose `visible` surface is shown first.
    #[must_use]
    pub fn new(half: Half, visible: Phase) -> Self {
        Self {
            half,
            surfaces: [None, None],
            visible,
        }
    }

    #[inline]
    #[must_use]
    pub fn half(&self) -> Half {
        self.half
    }

    #[inline]
    #[must_use]
    pub fn visible_phase(&self) -> Phase {
        self.visible
    }

    #[must_use]
    pub fn phase_of(&self, slot: Slot) -> Phase {
        match slot {
            Slot::Front => self.visible,
            Slot::Back => self.visible.other(),
        }
    }

    /// The host surface currently playing `slot`.
    #[must_use]
    pub fn surface(&self, slot: Slot) -> SurfaceRef {
        SurfaceRef::new(self.half, self.phase_of(slot))
    }

    pub fn paint(&mut self, slot: Slot, token: Token) {
        let index = self.phase_of(slot).index();
        self.surfaces[index] = Some(token);
    }

    pub fn swap_visible(&mut self) {
        self.visible.toggle();
    }

    #[must_use]
    pub fn token(&self, slot: Slot) -> Option<&Token> {
        self.surfaces[self.phase_of(slot).index()].as_ref()
    }

    #[must_use]
    pub fn visible_token(&self) -> Option<&Token> {
        self.token(Slot::Front)
    }

    #[must_use]
    pub fn hidden_token(&self) -> Option<&Token> {
        self.token(Slot::Back)
    }
}
