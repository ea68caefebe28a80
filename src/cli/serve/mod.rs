//! HTTP server for the SEO surfaces and listing pages.
//!
//! Every request resolves its own origin from the configured site URL or
//! its `Host`/`X-Forwarded-*` headers, so one process can sit behind
//! several hostnames.

mod lifecycle;
mod response;
mod route;

pub use route::Route;

use crate::{
    catalog::MemoryCatalog,
    config::SiteConfig,
    debug, log,
    seo::{RequestHeaders, resolve_base_url},
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tiny_http::{Request, Server};
use tokio::runtime::Handle;

/// Read-only state shared by all request workers.
#[derive(Clone)]
pub struct ServerContext {
    pub config: Arc<SiteConfig>,
    pub catalog: Arc<MemoryCatalog>,
    pub runtime: Handle,
}

/// Bind the server and handle requests until Ctrl+C.
pub fn serve(ctx: ServerContext) -> Result<()> {
    let serve = &ctx.config.serve;
    let (server, addr) = lifecycle::bind_with_retry(serve.interface, serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server_for_shutdown(Arc::clone(&server));

    log!("serve"; "http://{}", addr);
    debug!("serve"; "{} prompts in catalog", ctx.catalog.len());

    run_request_loop(&server, &ctx)
}

fn run_request_loop(server: &Server, ctx: &ServerContext) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(lifecycle::worker_count(ctx.config.serve.workers))
        .build()
        .context("failed to create request thread pool")?;

    for request in server.incoming_requests() {
        let ctx = ctx.clone();
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &ctx) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, ctx: &ServerContext) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    if !response::is_allowed_method(request.method()) {
        return response::respond_method_not_allowed(request);
    }

    let Some(route) = Route::resolve(request.url(), &ctx.config) else {
        debug!("serve"; "404 {}", request.url());
        return response::respond_not_found(request);
    };

    let headers = request_headers(&request);
    let origin = resolve_base_url(ctx.config.explicit_origin(), Some(&headers));

    let rendered = ctx
        .runtime
        .block_on(route.render(ctx.catalog.as_ref(), &ctx.config, &origin));

    match rendered {
        Ok(rendered) => response::respond_rendered(request, rendered),
        Err(e) => {
            log!("serve"; "{} failed: {e}", request.url());
            response::respond_internal_error(request)
        }
    }
}

fn request_headers(request: &Request) -> RequestHeaders {
    RequestHeaders::from_pairs(
        request
            .headers()
            .iter()
            .map(|h| (h.field.as_str().as_str(), h.value.as_str())),
    )
}
