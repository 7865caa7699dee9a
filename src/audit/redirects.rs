//! HTTP redirect chain resolution.
//!
//! This module follows redirect chains manually to track the full path from
//! initial URL to final destination. Hops are strictly sequential (each one
//! depends on the previous response's `Location` header) and the walk is
//! bounded so that server-side redirect loops always terminate here.

use reqwest::{Method, Url};

use crate::audit::context::AuditContext;
use crate::audit::probe::{probe, ProbeError};
use crate::config::MAX_REDIRECT_HOPS;

/// One followed redirect hop: the URL that was probed and the 3xx status it returned.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RedirectHop {
    /// Status code returned at this hop (301, 302, ...)
    pub status: u16,
    /// URL that was probed at this hop
    pub url: String,
}

/// Result of walking a redirect chain.
#[derive(Debug)]
pub struct RedirectResolution {
    /// The URL the chain ended on (not probed again after the last redirect
    /// when the hop bound was exhausted)
    pub final_url: String,
    /// Every followed redirect hop, in order; empty when the start URL did not redirect
    pub chain: Vec<RedirectHop>,
    /// True when the walk stopped because the hop bound was reached while the
    /// server was still redirecting. A distinct outcome, not an error.
    pub bound_exceeded: bool,
}

impl RedirectResolution {
    /// Number of redirects that were followed.
    pub fn redirect_count(&self) -> usize {
        self.chain.len()
    }
}

/// Resolves the redirect chain for a URL, following redirects up to
/// `MAX_REDIRECT_HOPS` hops.
///
/// Each hop issues one HEAD probe with redirects disabled. A response in the
/// 300–399 range with a `Location` header continues the walk (relative
/// locations are resolved against the current URL); anything else ends it. A
/// redirect status without a `Location` header ends the chain at that hop and
/// is treated as a non-error terminal state.
///
/// # Errors
///
/// Returns the probe error of the failing hop if any request times out or
/// fails at the network layer. Exceeding the hop bound is NOT an error; it is
/// reported via [`RedirectResolution::bound_exceeded`].
pub async fn resolve_redirect_chain(
    ctx: &AuditContext,
    start_url: &Url,
) -> Result<RedirectResolution, ProbeError> {
    let mut chain: Vec<RedirectHop> = Vec::new();
    let mut current = start_url.clone();

    for _ in 0..MAX_REDIRECT_HOPS {
        let resp = probe(&ctx.client, Method::HEAD, &current, ctx.head_timeout, false).await?;

        if !resp.is_redirect() {
            return Ok(RedirectResolution {
                final_url: current.to_string(),
                chain,
                bound_exceeded: false,
            });
        }

        let Some(location) = resp.location() else {
            // Redirect status but no Location header - unusual, stop here
            log::warn!(
                "Redirect status {} for {} but no Location header",
                resp.status,
                current
            );
            return Ok(RedirectResolution {
                final_url: current.to_string(),
                chain,
                bound_exceeded: false,
            });
        };

        let next = match Url::parse(location) {
            Ok(absolute) => absolute,
            // Relative reference - resolve against the current URL
            Err(_) => match current.join(location) {
                Ok(joined) => joined,
                Err(e) => {
                    log::warn!("Unresolvable Location '{}' at {}: {}", location, current, e);
                    return Ok(RedirectResolution {
                        final_url: current.to_string(),
                        chain,
                        bound_exceeded: false,
                    });
                }
            },
        };

        chain.push(RedirectHop {
            status: resp.status,
            url: current.to_string(),
        });
        current = next;
    }

    // Hop budget exhausted while the server was still redirecting
    Ok(RedirectResolution {
        final_url: current.to_string(),
        chain,
        bound_exceeded: true,
    })
}
