use std::sync::Arc;

use tbx_core::{
    config::Config,
    ports::{LinkResolverPort, LinkStorePort},
};
use tbx_mongo::MongoLinkStore;
use tbx_resolver::HttpLinkResolver;

mod web;

#[tokio::main]
async fn main() -> Result<(), tbx_core::Error> {
    tbx_core::logging::init("tbx");

    let cfg = Arc::new(Config::load()?);

    let store: Arc<dyn LinkStorePort> =
        Arc::new(MongoLinkStore::connect(&cfg.mongodb_uri, &cfg.mongodb_db).await?);

    let resolver: Arc<dyn LinkResolverPort> = Arc::new(HttpLinkResolver::new(
        cfg.resolver_api_url.clone(),
        cfg.resolver_api_key.clone(),
    ));

    web::spawn(cfg.http_port).await?;

    tbx_telegram::router::run_polling(cfg, store, resolver)
        .await
        .map_err(|e| tbx_core::Error::Messaging(format!("telegram bot failed: {e}")))?;

    Ok(())
}
