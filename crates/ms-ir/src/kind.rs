//! Visual instrument kinds.
//!
//! The stage groups "instruments of the same type" by this explicit
//! discriminant rather than by the concrete struct behind the trait
//! object, so sibling queries stay cheap and deterministic.

/// The visual family an instrument belongs to.
///
/// Two instruments share a stack (and therefore compete for stack slots)
/// exactly when their kinds are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstrumentKind {
    /// Pianos and electric pianos; side-by-side stacking.
    Keyboard,
    /// Guitars; side-by-side stacking behind the keyboards.
    Guitar,
    /// Saxophones; circular stacking around the stage center.
    Saxophone,
    /// The percussion channel's kit; vertical stacking.
    DrumKit,
}

impl InstrumentKind {
    /// Map a GM-1 program number to the visual kind that renders it.
    ///
    /// Returns `None` for programs that have no visual implementation;
    /// those channels simply do not appear on stage.
    pub fn from_program(program: u8) -> Option<Self> {
        match program {
            0..=7 => Some(Self::Keyboard),
            24..=31 => Some(Self::Guitar),
            64..=67 => Some(Self::Saxophone),
            _ => None,
        }
    }

    /// Human-readable name for traces and logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Keyboard => "keyboard",
            Self::Guitar => "guitar",
            Self::Saxophone => "saxophone",
            Self::DrumKit => "drum kit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piano_programs_map_to_keyboard() {
        for program in 0..=7 {
            assert_eq!(
                InstrumentKind::from_program(program),
                Some(InstrumentKind::Keyboard)
            );
        }
    }

    #[test]
    fn sax_programs_map_to_saxophone() {
        assert_eq!(
            InstrumentKind::from_program(65),
            Some(InstrumentKind::Saxophone)
        );
    }

    #[test]
    fn unimplemented_programs_map_to_none() {
        assert_eq!(InstrumentKind::from_program(52), None); // choir aahs
        assert_eq!(InstrumentKind::from_program(127), None); // gunshot
    }
}
