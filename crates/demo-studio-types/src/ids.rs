//! Typed identities for every stored entity
//!
//! Each identity wraps a UUID so that a demo id can never be handed to a
//! template lookup by mistake.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identity
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap a known UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

entity_id!(
    /// Identity of a [`crate::Template`]
    TemplateId
);

entity_id!(
    /// Identity of a [`crate::DemoInstance`], also keys its analytics snapshot
    DemoId
);

entity_id!(
    /// Identity of a [`crate::GuestAccessGrant`]
    GrantId
);

entity_id!(
    /// Identity of a [`crate::ChatGptAppRecord`]
    AppId
);
