use crate::common::{Address, Epoch};
use crate::grpc::ProtoView;

/// View is an epoch-numbered assignment of the primary and backup slots.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct View {
    pub epoch: Epoch,
    pub primary: Option<Address>,
    pub backup: Option<Address>,
}

impl View {
    pub fn uninitialized() -> Self {
        View::default()
    }

    pub fn is_primary(&self, address: &Address) -> bool {
        self.primary.as_ref() == Some(address)
    }

    pub fn is_backup(&self, address: &Address) -> bool {
        self.backup.as_ref() == Some(address)
    }
}

// ------- Conversions --------

// The wire format uses the empty string for an empty slot.

impl From<View> for ProtoView {
    fn from(view: View) -> Self {
        ProtoView {
            epoch: view.epoch.as_u64(),
            primary: view.primary.map(Address::into_inner).unwrap_or_default(),
            backup: view.backup.map(Address::into_inner).unwrap_or_default(),
        }
    }
}

impl From<ProtoView> for View {
    fn from(proto_view: ProtoView) -> Self {
        View {
            epoch: Epoch::new(proto_view.epoch),
            primary: slot_from_wire(proto_view.primary),
            backup: slot_from_wire(proto_view.backup),
        }
    }
}

fn slot_from_wire(slot: String) -> Option<Address> {
    if slot.is_empty() {
        None
    } else {
        Some(Address::new(slot))
    }
}
