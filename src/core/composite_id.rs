//! Synthetic identifiers for relationship records.
//!
//! Memberships and vault grants have no identifier of their own in the
//! organization backend, so their id is the two keys joined with `/`.

use crate::core::errors::{OrgError, OrgResult};

const SEPARATOR: char = '/';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKey {
    /// `<GROUP ID>/<USER ID>`
    Membership,
    /// `<VAULT ID>/<GROUP ID>`
    VaultGroupAccess,
    /// `<VAULT ID>/<USER ID>`
    VaultUserAccess,
}

impl CompositeKey {
    /// Names of the two halves, first then second.
    pub fn labels(&self) -> (&'static str, &'static str) {
        match self {
            CompositeKey::Membership => ("group", "user"),
            CompositeKey::VaultGroupAccess => ("vault", "group"),
            CompositeKey::VaultUserAccess => ("vault", "user"),
        }
    }

    pub fn shape(&self) -> String {
        let (first, second) = self.labels();
        format!(
            "<{} ID>/<{} ID>",
            first.to_ascii_uppercase(),
            second.to_ascii_uppercase()
        )
    }

    pub fn pack(&self, first: &str, second: &str) -> String {
        format!("{first}{SEPARATOR}{second}")
    }

    /// Splits on the first separator only: `a/b/c` yields `("a", "b/c")`.
    pub fn unpack(&self, id: &str) -> OrgResult<(String, String)> {
        match id.split_once(SEPARATOR) {
            Some((first, second)) => Ok((first.to_owned(), second.to_owned())),
            None => Err(OrgError::InvalidId {
                id: id.to_owned(),
                expected: self.shape(),
            }),
        }
    }

    /// Reconciles an explicit id with separately supplied keys.
    ///
    /// Without an id the keys are returned as-is. With an id, empty keys are
    /// filled from it and non-empty keys must equal the unpacked halves.
    pub fn resolve(
        &self,
        id: Option<&str>,
        first: &str,
        second: &str,
    ) -> OrgResult<(String, String)> {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            return Ok((first.to_owned(), second.to_owned()));
        };

        let (id_first, id_second) = self.unpack(id)?;
        let (first_label, second_label) = self.labels();

        if !first.is_empty() && first != id_first {
            return Err(OrgError::IdMismatch(first_label));
        }
        if !second.is_empty() && second != id_second {
            return Err(OrgError::IdMismatch(second_label));
        }

        Ok((id_first, id_second))
    }
}
