use itertools::Itertools;

use crate::model::{Player, PlayerKey};

/// Maps a match-scoped roster entry to a cross-match player identity.
pub trait IdentityResolver {
    fn resolve(&self, player: &Player) -> PlayerKey;
}

/// Keys players by jersey number and normalized name, e.g. `7-ana`.
///
/// Two different people with the same number and name share a key, and a
/// player who changes number gets a second one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberNameResolver;

impl IdentityResolver for NumberNameResolver {
    fn resolve(&self, player: &Player) -> PlayerKey {
        PlayerKey(format!("{}-{}", player.number, normalize_name(&player.name)))
    }
}

/// Lowercase, trim and collapse inner whitespace.
pub(crate) fn normalize_name(name: &str) -> String {
    name.split_whitespace().map(str::to_lowercase).join(" ")
}
