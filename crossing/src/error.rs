/// A raw state id that names none of the controller's states.
#[derive(Debug, PartialEq, Eq, Copy, Clone, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("no crossing state has id {0}")]
pub struct UnknownState(pub u8);
