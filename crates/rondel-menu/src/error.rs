use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    #[error("Radial menu has no slot template to instantiate slots from")]
    MissingSlotTemplate,
    #[error("Radial menu slots have not been set up")]
    NotSetUp,
    #[error("No action is bound to slot {0}")]
    UnboundSlot(usize),
}
