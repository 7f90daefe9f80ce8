use crate::common::{Address, Epoch};

/// ServerRecord is the view service's liveness bookkeeping for one server address.
#[derive(Debug)]
pub(super) struct ServerRecord {
    address: Address,
    missed_heartbeats: u32,
    heard_since_last_tick: bool,
    alive: bool,
    first_seen_epoch: Epoch,
    // Set when a slot holder re-registers with epoch 0, i.e. it restarted and lost its state.
    // Cleared once the slot has been vacated.
    restarted: bool,
}

impl ServerRecord {
    fn new(address: Address, first_seen_epoch: Epoch, restarted: bool) -> Self {
        ServerRecord {
            address,
            missed_heartbeats: 0,
            heard_since_last_tick: true,
            alive: true,
            first_seen_epoch,
            restarted,
        }
    }

    pub(super) fn first_seen_epoch(&self) -> Epoch {
        self.first_seen_epoch
    }
}

/// ServerTable holds every live server that has registered, in the order they registered.
#[derive(Debug, Default)]
pub(super) struct ServerTable {
    records: Vec<ServerRecord>,
}

#[derive(Debug, Eq, PartialEq)]
pub(super) enum Registration {
    New,
    Refreshed,
    Restarted,
}

impl ServerTable {
    pub(super) fn new() -> Self {
        ServerTable::default()
    }

    /// Registers `address`, or refreshes it in place if already known. A server that holds a slot
    /// and registers again has restarted: it moves to the back of the registration order and is
    /// flagged so the next tick vacates its slot.
    pub(super) fn register(&mut self, address: Address, current_epoch: Epoch, holds_slot: bool) -> Registration {
        match self.position(&address) {
            Some(idx) if holds_slot => {
                self.records.remove(idx);
                self.records.push(ServerRecord::new(address, current_epoch, true));
                Registration::Restarted
            }
            Some(idx) => {
                let record = &mut self.records[idx];
                record.missed_heartbeats = 0;
                record.heard_since_last_tick = true;
                record.alive = true;
                Registration::Refreshed
            }
            None => {
                // A slot holder with no record was swept while its slot was pinned by an
                // unacknowledged view. It restarted all the same.
                self.records.push(ServerRecord::new(address, current_epoch, holds_slot));
                if holds_slot {
                    Registration::Restarted
                } else {
                    Registration::New
                }
            }
        }
    }

    /// Records a heartbeat. Returns false if `address` is unknown.
    pub(super) fn heartbeat(&mut self, address: &Address) -> bool {
        match self.position(address) {
            Some(idx) => {
                self.records[idx].heard_since_last_tick = true;
                true
            }
            None => false,
        }
    }

    /// Advances every record by one tick and drops the servers that have now missed `dead_pings`
    /// consecutive ticks. Returns the dropped addresses.
    pub(super) fn sweep(&mut self, dead_pings: u32) -> Vec<Address> {
        let mut dead = Vec::new();
        for record in self.records.iter_mut() {
            if record.heard_since_last_tick {
                record.missed_heartbeats = 0;
                record.heard_since_last_tick = false;
            } else {
                record.missed_heartbeats += 1;
            }

            if record.missed_heartbeats >= dead_pings {
                record.alive = false;
                dead.push(record.address.clone());
            }
        }

        // Removal happens after the scan.
        self.records.retain(|record| record.alive);

        dead
    }

    /// A slot holder must be evicted from its slot if it is no longer tracked, or if it restarted.
    pub(super) fn must_evict(&self, address: &Address) -> bool {
        match self.get(address) {
            Some(record) => record.restarted,
            None => true,
        }
    }

    pub(super) fn clear_restarted(&mut self, address: &Address) {
        if let Some(idx) = self.position(address) {
            self.records[idx].restarted = false;
        }
    }

    /// First live, non-restarted server in registration order that `is_candidate` accepts.
    pub(super) fn first_eligible<F>(&self, is_candidate: F) -> Option<&Address>
    where
        F: Fn(&Address) -> bool,
    {
        self.records
            .iter()
            .filter(|record| record.alive && !record.restarted)
            .map(|record| &record.address)
            .find(|address| is_candidate(address))
    }

    pub(super) fn get(&self, address: &Address) -> Option<&ServerRecord> {
        self.records.iter().find(|record| &record.address == address)
    }

    #[cfg(test)]
    pub(super) fn len(&self) -> usize {
        self.records.len()
    }

    fn position(&self, address: &Address) -> Option<usize> {
        self.records.iter().position(|record| &record.address == address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        Address::new(s)
    }

    #[test]
    fn sweep_drops_after_dead_pings_missed_ticks() {
        let mut table = ServerTable::new();
        table.register(addr("a"), Epoch::new(1), false);
        table.register(addr("b"), Epoch::new(1), false);

        // Registration counts as a heartbeat for the first tick.
        assert!(table.sweep(3).is_empty());

        for _ in 0..2 {
            assert!(table.heartbeat(&addr("b")));
            assert!(table.sweep(3).is_empty());
        }

        assert!(table.heartbeat(&addr("b")));
        assert_eq!(table.sweep(3), vec![addr("a")]);
        assert_eq!(table.len(), 1);
        assert!(table.must_evict(&addr("a")));
        assert!(!table.must_evict(&addr("b")));
        assert!(!table.heartbeat(&addr("a")));
    }

    #[test]
    fn heartbeat_resets_missed_count() {
        let mut table = ServerTable::new();
        table.register(addr("a"), Epoch::new(1), false);
        table.sweep(2);

        for _ in 0..10 {
            table.sweep(2);
            assert_eq!(table.len(), 1, "missed one tick only, still alive");
            table.heartbeat(&addr("a"));
            table.sweep(2);
        }
    }

    #[test]
    fn refresh_keeps_order_and_restart_moves_to_back() {
        let mut table = ServerTable::new();
        assert_eq!(table.register(addr("a"), Epoch::new(1), false), Registration::New);
        assert_eq!(table.register(addr("b"), Epoch::new(1), false), Registration::New);
        assert_eq!(table.register(addr("a"), Epoch::new(2), false), Registration::Refreshed);

        assert_eq!(table.first_eligible(|_| true), Some(&addr("a")));
        assert_eq!(table.get(&addr("a")).unwrap().first_seen_epoch(), Epoch::new(1));

        assert_eq!(table.register(addr("a"), Epoch::new(3), true), Registration::Restarted);
        assert!(table.must_evict(&addr("a")));
        // Restarted servers are not eligible until their old slot has been vacated.
        assert_eq!(table.first_eligible(|_| true), Some(&addr("b")));

        table.clear_restarted(&addr("a"));
        assert!(!table.must_evict(&addr("a")));
        assert_eq!(table.first_eligible(|a| a != &addr("b")), Some(&addr("a")));
        assert_eq!(table.get(&addr("a")).unwrap().first_seen_epoch(), Epoch::new(3));
    }

    #[test]
    fn swept_slot_holder_registering_again_is_a_restart() {
        let mut table = ServerTable::new();
        table.register(addr("a"), Epoch::new(1), false);
        for _ in 0..3 {
            table.sweep(2);
        }
        assert!(table.get(&addr("a")).is_none());

        assert_eq!(table.register(addr("a"), Epoch::new(2), true), Registration::Restarted);
        assert!(table.heartbeat(&addr("a")));
        assert!(table.must_evict(&addr("a")));
        assert_eq!(table.first_eligible(|_| true), None);

        // Same address holding no slot is simply new.
        let mut table = ServerTable::new();
        assert_eq!(table.register(addr("b"), Epoch::new(2), false), Registration::New);
        assert!(!table.must_evict(&addr("b")));
    }
}
