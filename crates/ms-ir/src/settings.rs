//! Visualizer settings read by the stage core.

/// How instruments move between stack slots when siblings appear or
/// disappear.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Transition {
    /// Snap instantly to the target slot.
    #[default]
    None,
    /// Ease quickly.
    Fast,
    /// Ease at the default rate.
    Normal,
    /// Ease slowly.
    Slow,
}

impl Transition {
    /// Easing divisor for this mode, or `None` when movement snaps.
    ///
    /// Larger divisor = slower easing.
    pub fn easing_divisor(self) -> Option<f32> {
        match self {
            Self::None => None,
            Self::Fast => Some(200.0),
            Self::Normal => Some(500.0),
            Self::Slow => Some(1000.0),
        }
    }
}

/// Settings the host exposes to the stage. Read fresh every frame, so a
/// live settings panel takes effect immediately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    /// Stack transition mode.
    pub transition: Transition,
}

impl Settings {
    /// Settings with the given transition mode.
    pub fn with_transition(transition: Transition) -> Self {
        Self { transition }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_snap() {
        assert_eq!(Settings::default().transition, Transition::None);
        assert!(Transition::None.easing_divisor().is_none());
    }

    #[test]
    fn eased_modes_order_by_divisor() {
        let fast = Transition::Fast.easing_divisor().unwrap();
        let normal = Transition::Normal.easing_divisor().unwrap();
        let slow = Transition::Slow.easing_divisor().unwrap();
        assert!(fast < normal && normal < slow);
    }
}
