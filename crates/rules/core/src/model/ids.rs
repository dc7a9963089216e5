use std::fmt;
use std::str::FromStr;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true for the empty identifier used by unlinked data.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Generates a fresh random identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().simple().to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl FromStr for $name {
            type Err = core::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_owned()))
            }
        }
    };
}

string_id!(
    /// Stable identifier of an [`Effect`](crate::effect::Effect).
    EffectId
);
string_id!(
    /// Stable identifier of a [`Component`](crate::effect::Component).
    ComponentId
);
string_id!(
    /// Identifier of an item owned by an actor.
    ItemId
);
string_id!(
    /// Identifier of an actor snapshot.
    ActorId
);

/// Reference to another actor's snapshot, as stored in durations and summons.
///
/// The persisted form is a dotted path: `Actor.<id>` for a world actor, or
/// `Scene.<scene>.Token.<token>` for an unlinked token.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum SnapshotRef {
    Actor(ActorId),
    Token { scene: String, token: String },
}

impl FromStr for SnapshotRef {
    type Err = crate::error::ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        match parts.as_slice() {
            ["Actor", id] if !id.is_empty() => Ok(Self::Actor(ActorId::new(*id))),
            ["Scene", scene, "Token", token] if !scene.is_empty() && !token.is_empty() => {
                Ok(Self::Token {
                    scene: (*scene).to_owned(),
                    token: (*token).to_owned(),
                })
            }
            _ => Err(crate::error::ResolveError::UnresolvedReference(s.to_owned())),
        }
    }
}

impl TryFrom<String> for SnapshotRef {
    type Error = crate::error::ResolveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SnapshotRef> for String {
    fn from(value: SnapshotRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SnapshotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actor(id) => write!(f, "Actor.{id}"),
            Self::Token { scene, token } => write!(f, "Scene.{scene}.Token.{token}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_ref_parses_both_forms() {
        assert_eq!(
            "Actor.abc".parse::<SnapshotRef>().unwrap(),
            SnapshotRef::Actor(ActorId::new("abc"))
        );
        let token: SnapshotRef = "Scene.s1.Token.t9".parse().unwrap();
        assert_eq!(token.to_string(), "Scene.s1.Token.t9");
    }

    #[test]
    fn malformed_ref_is_unresolved() {
        assert!("Item.abc".parse::<SnapshotRef>().is_err());
        assert!("Actor.".parse::<SnapshotRef>().is_err());
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(ComponentId::generate(), ComponentId::generate());
    }
}
