use std::fmt;

/// Address is the opaque endpoint identifier of a server, e.g. "127.0.0.1:7001".
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Address(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(address: &str) -> Self {
        Address::new(address)
    }
}

/// Epoch (a.k.a. viewnum) identifies a configuration generation. Epoch 0 is the uninitialized
/// view, before any server has pinged the view service.
#[derive(Copy, Clone, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Epoch(u64);

impl Epoch {
    pub const ZERO: Epoch = Epoch(0);

    pub fn new(epoch: u64) -> Self {
        Epoch(epoch)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub(crate) fn incr(&mut self) {
        self.0 += 1;
    }
}

impl fmt::Debug for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ClientId identifies one client (Clerk) for duplicate suppression.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ClientId(u64);

impl ClientId {
    pub fn new(id: u64) -> Self {
        ClientId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Token identifies one logical write of a client. Retries of the same write reuse the token.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct Token(u64);

impl Token {
    pub fn new(token: u64) -> Self {
        Token(token)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}
