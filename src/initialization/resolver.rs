//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

use crate::config::DNS_TIMEOUT_SECS;

/// Initializes the DNS resolver used by the auxiliary DNS checks.
///
/// Uses the default upstream configuration with short timeouts so a slow
/// nameserver cannot hold up a lookup for long. `ndots = 0` keeps search
/// domains from being appended to bare registered domains.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = 2;
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(ResolverConfig::default(), opts))
}
