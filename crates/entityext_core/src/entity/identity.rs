/// Raw entity number reserved for "not addressable".
pub const UNKNOWN_ENTITY_ID: u8 = 255;

/// An addressable entity number. Never equal to [`UNKNOWN_ENTITY_ID`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EntityId(u8);

impl EntityId {
    /// Returns `None` for the reserved unknown-entity number.
    pub const fn new(raw: u8) -> Option<Self> {
        if raw == UNKNOWN_ENTITY_ID {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Whether an entity has been given an addressable number.
///
/// An `Unassigned` entity exists only locally: every dispatch it would
/// perform is silently skipped.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Identity {
    #[default]
    Unassigned,
    Assigned(EntityId),
}

impl Identity {
    /// Map a raw wire number, treating the reserved number as unassigned.
    pub const fn from_raw(raw: u8) -> Self {
        match EntityId::new(raw) {
            Some(id) => Identity::Assigned(id),
            None => Identity::Unassigned,
        }
    }

    pub const fn raw(self) -> u8 {
        match self {
            Identity::Assigned(id) => id.get(),
            Identity::Unassigned => UNKNOWN_ENTITY_ID,
        }
    }

    pub const fn id(self) -> Option<EntityId> {
        match self {
            Identity::Assigned(id) => Some(id),
            Identity::Unassigned => None,
        }
    }

    pub const fn is_assigned(self) -> bool {
        matches!(self, Identity::Assigned(_))
    }
}

impl From<EntityId> for Identity {
    fn from(id: EntityId) -> Self {
        Identity::Assigned(id)
    }
}
