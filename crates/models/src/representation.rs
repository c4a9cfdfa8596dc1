use strum::{Display, EnumIter};

/// The shape a resource is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Representation {
    /// Lightweight shape used in collections
    Summary,
    /// Fully nested shape for a single resource
    Detail,
    /// Flat shape mirroring what clients write
    Canonical,
}

/// The operation a handler performs on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    List,
    Retrieve,
    Create,
    Update,
}

impl Operation {
    pub fn representation(self) -> Representation {
        match self {
            Self::List => Representation::Summary,
            Self::Retrieve => Representation::Detail,
            Self::Create | Self::Update => Representation::Canonical,
        }
    }
}
