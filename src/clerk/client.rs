use crate::clerk::options::ClerkOptionsValidated;
use crate::clerk::ClerkOptions;
use crate::common::{Address, ClientId, Token};
use crate::pbservice::{GetInput, PbCallError, PbClients, PrimaryTransport, PutInput};
use crate::viewservice::{ViewServiceClient, ViewServiceTransport};
use std::convert::TryFrom;
use std::sync::Arc;
use std::time::Duration;

pub struct ClerkConfig {
    pub view_service_address: Address,
    pub logger: slog::Logger,
    pub options: ClerkOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum ClerkError {
    #[error("Invalid view service address '{0}'")]
    InvalidAddress(String),
    #[error("Illegal options: {0}")]
    IllegalOptions(String),
}

/// Clerk is a client of the replicated store. It finds the primary through the view service, and
/// retries every request until it succeeds, redirecting as the view changes.
///
/// Must be created within a tokio runtime.
pub struct Clerk {
    logger: slog::Logger,
    client_id: ClientId,
    view_service: Arc<dyn ViewServiceTransport>,
    replicas: Arc<dyn PrimaryTransport>,
    // Cached, possibly stale. Cleared on any failure.
    primary: Option<Address>,
    retry_interval: Duration,
}

impl Clerk {
    pub fn new(config: ClerkConfig) -> Result<Self, ClerkError> {
        let ClerkConfig {
            view_service_address,
            logger,
            options,
        } = config;
        let options =
            ClerkOptionsValidated::try_from(options).map_err(|e| ClerkError::IllegalOptions(e.to_string()))?;

        let client_id = ClientId::new(rand::random());
        let logger = logger.new(slog::o!("Clerk" => format!("{:?}", client_id)));

        let view_service = ViewServiceClient::new(logger.clone(), &view_service_address, options.rpc_timeout)
            .map_err(|_| ClerkError::InvalidAddress(view_service_address.to_string()))?;
        let replicas = PbClients::new(logger.clone(), options.rpc_timeout);

        Ok(Clerk::with_transports(
            logger,
            client_id,
            Arc::new(view_service),
            Arc::new(replicas),
            options.retry_interval,
        ))
    }

    pub(crate) fn with_transports(
        logger: slog::Logger,
        client_id: ClientId,
        view_service: Arc<dyn ViewServiceTransport>,
        replicas: Arc<dyn PrimaryTransport>,
        retry_interval: Duration,
    ) -> Self {
        Clerk {
            logger,
            client_id,
            view_service,
            replicas,
            primary: None,
            retry_interval,
        }
    }

    /// Current value of `key`, or the empty string if there's none.
    pub async fn get(&mut self, key: &str) -> String {
        loop {
            if let Some(primary) = self.find_primary().await {
                let input = GetInput { key: key.to_string() };
                match self.replicas.get(&primary, input).await {
                    Ok(output) => return output.value,
                    Err(PbCallError::NoKey) => return String::new(),
                    Err(e) => self.on_failure(&primary, e),
                }
            }

            tokio::time::sleep(self.retry_interval).await;
        }
    }

    pub async fn put(&mut self, key: &str, value: &str) {
        self.put_with_retries(key, value, false).await;
    }

    /// Stores the hash of the previous value and `value`. Returns the previous value.
    pub async fn put_hash(&mut self, key: &str, value: &str) -> String {
        self.put_with_retries(key, value, true).await
    }

    async fn put_with_retries(&mut self, key: &str, value: &str, combine_with_hash: bool) -> String {
        // One token per logical write, reused across every retry.
        let input = PutInput {
            client_id: self.client_id,
            token: Token::new(rand::random()),
            key: key.to_string(),
            value: value.to_string(),
            combine_with_hash,
        };

        loop {
            if let Some(primary) = self.find_primary().await {
                match self.replicas.put(&primary, input.clone()).await {
                    Ok(output) => return output.previous_value,
                    Err(e) => self.on_failure(&primary, e),
                }
            }

            tokio::time::sleep(self.retry_interval).await;
        }
    }

    async fn find_primary(&mut self) -> Option<Address> {
        if self.primary.is_none() {
            match self.view_service.get().await {
                Ok(view) => {
                    slog::debug!(self.logger, "Refreshed view: {:?}", view);
                    self.primary = view.primary;
                }
                Err(e) => slog::warn!(self.logger, "Failed to query view service: {}", e),
            }
        }

        self.primary.clone()
    }

    fn on_failure(&mut self, primary: &Address, error: PbCallError) {
        slog::debug!(self.logger, "Request to {:?} failed, will retry: {}", primary, error);
        self.primary = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Epoch, View};
    use crate::pbservice::{GetOutput, PutOutput};
    use crate::viewservice::{PingOutput, ViewServiceError};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct FixedViewService {
        primaries: Mutex<VecDeque<&'static str>>,
    }

    #[async_trait::async_trait]
    impl ViewServiceTransport for FixedViewService {
        async fn ping(&self, _: &Address, _: Epoch) -> Result<PingOutput, ViewServiceError> {
            unimplemented!()
        }

        async fn get(&self) -> Result<View, ViewServiceError> {
            let mut primaries = self.primaries.lock().unwrap();
            let primary = if primaries.len() > 1 {
                primaries.pop_front().unwrap()
            } else {
                primaries[0]
            };

            Ok(View {
                epoch: Epoch::new(1),
                primary: Some(Address::new(primary)),
                backup: None,
            })
        }
    }

    /// Only `primary` answers. Remembers every put it was sent.
    struct ScriptedReplicas {
        primary: Address,
        failures_left: Mutex<u32>,
        puts: Mutex<Vec<(Address, PutInput)>>,
    }

    impl ScriptedReplicas {
        fn check(&self, target: &Address) -> Result<(), PbCallError> {
            if target != &self.primary {
                return Err(PbCallError::WrongServer);
            }
            let mut failures_left = self.failures_left.lock().unwrap();
            if *failures_left > 0 {
                *failures_left -= 1;
                return Err(PbCallError::Unreachable("Dropped".to_string()));
            }

            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl PrimaryTransport for ScriptedReplicas {
        async fn put(&self, primary: &Address, input: PutInput) -> Result<PutOutput, PbCallError> {
            self.puts.lock().unwrap().push((primary.clone(), input));
            self.check(primary)?;

            Ok(PutOutput {
                previous_value: "prev".to_string(),
            })
        }

        async fn get(&self, primary: &Address, input: GetInput) -> Result<GetOutput, PbCallError> {
            self.check(primary)?;
            if input.key == "missing" {
                return Err(PbCallError::NoKey);
            }

            Ok(GetOutput {
                value: format!("value of {}", input.key),
            })
        }
    }

    fn clerk(primaries: Vec<&'static str>, replicas: Arc<ScriptedReplicas>) -> Clerk {
        let view_service = Arc::new(FixedViewService {
            primaries: Mutex::new(primaries.into_iter().collect()),
        });

        Clerk::with_transports(
            slog::Logger::root(slog::Discard, slog::o!()),
            ClientId::new(42),
            view_service,
            replicas,
            Duration::from_millis(1),
        )
    }

    fn replicas(primary: &str, failures: u32) -> Arc<ScriptedReplicas> {
        Arc::new(ScriptedReplicas {
            primary: Address::new(primary),
            failures_left: Mutex::new(failures),
            puts: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn redirects_after_wrong_server() {
        // -- setup --
        let replicas = replicas("new", 0);
        let mut clerk = clerk(vec!["old", "new"], replicas.clone());

        // -- execute --
        let previous = clerk.put_hash("k", "v").await;

        // -- verify --
        assert_eq!(previous, "prev");
        let puts = replicas.puts.lock().unwrap();
        assert_eq!(puts.len(), 2);
        assert_eq!(puts[0].0, Address::new("old"));
        assert_eq!(puts[1].0, Address::new("new"));
    }

    #[tokio::test]
    async fn retries_reuse_client_id_and_token() {
        let replicas = replicas("p", 3);
        let mut clerk = clerk(vec!["p"], replicas.clone());

        clerk.put("k", "v").await;

        let puts = replicas.puts.lock().unwrap();
        assert_eq!(puts.len(), 4);
        for (_, input) in puts.iter() {
            assert_eq!(input.client_id, ClientId::new(42));
            assert_eq!(input.token, puts[0].1.token);
            assert!(!input.combine_with_hash);
        }
    }

    #[tokio::test]
    async fn distinct_writes_get_distinct_tokens() {
        let replicas = replicas("p", 0);
        let mut clerk = clerk(vec!["p"], replicas.clone());

        clerk.put("k", "v").await;
        clerk.put("k", "v").await;

        let puts = replicas.puts.lock().unwrap();
        assert_ne!(puts[0].1.token, puts[1].1.token);
    }

    #[tokio::test]
    async fn missing_key_reads_as_empty() {
        let replicas = replicas("p", 1);
        let mut clerk = clerk(vec!["p"], replicas);

        assert_eq!(clerk.get("missing").await, "");
        assert_eq!(clerk.get("x").await, "value of x");
    }
}
