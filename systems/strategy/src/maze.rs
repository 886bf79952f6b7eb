//! Two-turn toggle that moves the support maze's open exit between lanes.

use diamond_siege_core::Lane;
use rand::Rng;

/// Toggle step chosen for one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MazeAction {
    /// An armed switch plugged the named side and the open exit moved there.
    PlugAndFlip(Lane),
    /// A switch was armed by unplugging the named side.
    Unplug(Lane),
    /// No switch was armed. The named side stays plugged.
    Plug(Lane),
}

impl MazeAction {
    /// Side whose plug supports are spawned this turn, if any.
    #[must_use]
    pub fn plugged(self) -> Option<Lane> {
        match self {
            Self::PlugAndFlip(lane) | Self::Plug(lane) => Some(lane),
            Self::Unplug(_) => None,
        }
    }

    /// Side whose plug supports are removed this turn, if any.
    #[must_use]
    pub fn unplugged(self) -> Option<Lane> {
        match self {
            Self::Unplug(lane) => Some(lane),
            Self::PlugAndFlip(_) | Self::Plug(_) => None,
        }
    }
}

/// Which maze exit is open and whether a switch is pending.
///
/// The open side is the lane currently named by `open`. Its opposite stays
/// plugged until a coin flip arms a switch, which unplugs it for one turn.
/// The following turn plugs the previously open side and flips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MazeToggle {
    open: Lane,
    armed: bool,
}

impl MazeToggle {
    pub(crate) fn new() -> Self {
        Self {
            open: Lane::Left,
            armed: false,
        }
    }

    pub(crate) fn open(&self) -> Lane {
        self.open
    }

    pub(crate) fn advance<R>(&mut self, rng: &mut R) -> MazeAction
    where
        R: Rng + ?Sized,
    {
        if self.armed {
            let plugged = self.open;
            self.open = self.open.opposite();
            self.armed = false;
            return MazeAction::PlugAndFlip(plugged);
        }

        self.armed = rng.gen_bool(0.5);
        let far_side = self.open.opposite();
        if self.armed {
            MazeAction::Unplug(far_side)
        } else {
            MazeAction::Plug(far_side)
        }
    }
}
