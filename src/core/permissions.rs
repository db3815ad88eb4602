//! Fine-grained vault access permissions.
//!
//! The external tool speaks permissions as a flat list of lowercase tokens, one
//! per granted capability. [`AccessPermissions`] is the struct-of-booleans view
//! used everywhere else; [`AccessPermissions::to_tokens`] and
//! [`AccessPermissions::from_tokens`] convert between the two.

use serde::{Deserialize, Serialize};

pub const ALLOW_VIEWING: &str = "allow_viewing";
pub const ALLOW_EDITING: &str = "allow_editing";
pub const ALLOW_MANAGING: &str = "allow_managing";
pub const VIEW_ITEMS: &str = "view_items";
pub const CREATE_ITEMS: &str = "create_items";
pub const EDIT_ITEMS: &str = "edit_items";
pub const ARCHIVE_ITEMS: &str = "archive_items";
pub const DELETE_ITEMS: &str = "delete_items";
pub const VIEW_AND_COPY_PASSWORDS: &str = "view_and_copy_passwords";
pub const VIEW_ITEM_HISTORY: &str = "view_item_history";
pub const IMPORT_ITEMS: &str = "import_items";
pub const EXPORT_ITEMS: &str = "export_items";
pub const COPY_AND_SHARE_ITEMS: &str = "copy_and_share_items";
pub const PRINT_ITEMS: &str = "print_items";
pub const MANAGE_VAULT: &str = "manage_vault";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessPermissions {
    pub allow_viewing: bool,
    pub allow_editing: bool,
    pub allow_managing: bool,
    pub view_items: bool,
    pub create_items: bool,
    pub edit_items: bool,
    pub archive_items: bool,
    pub delete_items: bool,
    pub view_and_copy_passwords: bool,
    pub view_item_history: bool,
    pub import_items: bool,
    pub export_items: bool,
    pub copy_and_share_items: bool,
    pub print_items: bool,
    pub manage_vault: bool,
}

impl AccessPermissions {
    /// Every flag paired with its wire token, in declaration order.
    pub fn flags(&self) -> [(&'static str, bool); 15] {
        [
            (ALLOW_VIEWING, self.allow_viewing),
            (ALLOW_EDITING, self.allow_editing),
            (ALLOW_MANAGING, self.allow_managing),
            (VIEW_ITEMS, self.view_items),
            (CREATE_ITEMS, self.create_items),
            (EDIT_ITEMS, self.edit_items),
            (ARCHIVE_ITEMS, self.archive_items),
            (DELETE_ITEMS, self.delete_items),
            (VIEW_AND_COPY_PASSWORDS, self.view_and_copy_passwords),
            (VIEW_ITEM_HISTORY, self.view_item_history),
            (IMPORT_ITEMS, self.import_items),
            (EXPORT_ITEMS, self.export_items),
            (COPY_AND_SHARE_ITEMS, self.copy_and_share_items),
            (PRINT_ITEMS, self.print_items),
            (MANAGE_VAULT, self.manage_vault),
        ]
    }

    fn slot(&mut self, token: &str) -> Option<&mut bool> {
        let slot = match token {
            ALLOW_VIEWING => &mut self.allow_viewing,
            ALLOW_EDITING => &mut self.allow_editing,
            ALLOW_MANAGING => &mut self.allow_managing,
            VIEW_ITEMS => &mut self.view_items,
            CREATE_ITEMS => &mut self.create_items,
            EDIT_ITEMS => &mut self.edit_items,
            ARCHIVE_ITEMS => &mut self.archive_items,
            DELETE_ITEMS => &mut self.delete_items,
            VIEW_AND_COPY_PASSWORDS => &mut self.view_and_copy_passwords,
            VIEW_ITEM_HISTORY => &mut self.view_item_history,
            IMPORT_ITEMS => &mut self.import_items,
            EXPORT_ITEMS => &mut self.export_items,
            COPY_AND_SHARE_ITEMS => &mut self.copy_and_share_items,
            PRINT_ITEMS => &mut self.print_items,
            MANAGE_VAULT => &mut self.manage_vault,
            _ => return None,
        };
        Some(slot)
    }

    /// Tokens of the granted flags, in declaration order.
    pub fn to_tokens(&self) -> Vec<&'static str> {
        self.flags()
            .into_iter()
            .filter_map(|(token, granted)| granted.then_some(token))
            .collect()
    }

    /// Unknown tokens are skipped so newer tool versions don't break reads.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut permissions = Self::default();
        for token in tokens {
            if let Some(slot) = permissions.slot(token.as_ref()) {
                *slot = true;
            }
        }
        permissions
    }
}
