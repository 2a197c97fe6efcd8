//! Options sources for handlers.
//!
//! A handler is configured with either a static options value or a factory
//! deriving one from the invocation context. The source is resolved to a
//! concrete value at the start of every invocation, before any other work.

use std::future::Future;
use std::pin::Pin;

use crate::request::RequestContext;

/// Boxed future alias used across the collaborator traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Factory deriving an options value from the invocation context.
///
/// Covers both synchronous and asynchronous factories — a synchronous one
/// returns an already-ready future.
pub type OptionsFactory<O> =
    Box<dyn Fn(&RequestContext) -> BoxFuture<'static, O> + Send + Sync>;

/// Where a handler's options come from.
pub enum OptionsSource<O> {
    /// A fixed options value shared by every invocation.
    Static(O),
    /// A per-invocation factory.
    Derived(OptionsFactory<O>),
}

impl<O: Clone> OptionsSource<O> {
    /// Resolve this source to a concrete options value.
    pub async fn resolve(&self, ctx: &RequestContext) -> O {
        match self {
            OptionsSource::Static(options) => options.clone(),
            OptionsSource::Derived(factory) => factory(ctx).await,
        }
    }
}

impl<O> OptionsSource<O> {
    /// Wrap a synchronous factory function.
    pub fn derived<F>(factory: F) -> Self
    where
        F: Fn(&RequestContext) -> O + Send + Sync + 'static,
        O: Send + 'static,
    {
        OptionsSource::Derived(Box::new(move |ctx| {
            let options = factory(ctx);
            Box::pin(async move { options })
        }))
    }
}

impl<O> From<O> for OptionsSource<O> {
    fn from(options: O) -> Self {
        OptionsSource::Static(options)
    }
}

impl<O> std::fmt::Debug for OptionsSource<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionsSource::Static(_) => f.write_str("OptionsSource::Static"),
            OptionsSource::Derived(_) => f.write_str("OptionsSource::Derived"),
        }
    }
}
