mod client;
mod options;

pub use client::Clerk;
pub use client::ClerkConfig;
pub use client::ClerkError;
pub use options::ClerkOptions;
