use crate::common::{Address, View};

/// Role of a replica, derived from the latest view it has seen.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Role {
    Unknown,
    Primary,
    Backup,
}

impl Role {
    pub(crate) fn assigned_by(view: &View, me: &Address) -> Role {
        if view.is_primary(me) {
            Role::Primary
        } else if view.is_backup(me) {
            Role::Backup
        } else {
            Role::Unknown
        }
    }
}
